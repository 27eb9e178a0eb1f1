use thiserror::Error;

use crate::db_types::UserId;

#[derive(Debug, Error)]
pub enum AccountStoreError {
    #[error("Database error: {0}")]
    DatabaseError(String),
}

/// Resolution of a caller's credential to a stable account identifier.
#[allow(async_fn_in_trait)]
pub trait AccountManagement {
    /// Returns the account id registered under the given email address, or `None` if no such account exists.
    async fn fetch_user_id_for_email(&self, email: &str) -> Result<Option<UserId>, AccountStoreError>;
}
