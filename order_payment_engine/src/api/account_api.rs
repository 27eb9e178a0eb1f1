use std::fmt::Debug;

use log::*;

use crate::{api::errors::AccountApiError, db_types::UserId, traits::AccountManagement};

/// `AccountApi` resolves an authenticated caller's credential to the stable account identifier that order ownership
/// is recorded against. The credential itself (bearer token validation) is the server's concern; this API only
/// answers "which account is this".
pub struct AccountApi<B> {
    db: B,
}

impl<B> Debug for AccountApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "AccountApi")
    }
}

impl<B> AccountApi<B> {
    pub fn new(db: B) -> Self {
        Self { db }
    }
}

impl<B> AccountApi<B>
where B: AccountManagement
{
    /// Resolves the email address carried by a validated credential to an account id.
    ///
    /// A missing account is [`AccountApiError::UserNotFound`]: since only validated credentials reach this call, it
    /// indicates a server-side consistency fault rather than a user mistake.
    pub async fn user_id_for_email(&self, email: &str) -> Result<UserId, AccountApiError> {
        let user_id = self.db.fetch_user_id_for_email(email).await?;
        user_id.ok_or_else(|| {
            warn!("🔑️ A valid credential for {email} resolved to no account");
            AccountApiError::UserNotFound
        })
    }
}
