use thiserror::Error;

use crate::db_types::UserId;

#[derive(Debug, Error)]
pub enum CartStoreError {
    #[error("Database error: {0}")]
    DatabaseError(String),
}

/// Invalidation of a user's pending-purchase cart. Invoked exactly once per successfully verified payment.
#[allow(async_fn_in_trait)]
pub trait CartManagement {
    /// Deletes the user's cart record, if there is one. Clearing an absent cart is a no-op, which keeps the
    /// verification flow retry-safe.
    async fn clear_cart_for_user(&self, user_id: &UserId) -> Result<(), CartStoreError>;
}
