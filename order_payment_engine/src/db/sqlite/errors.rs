use thiserror::Error;

use crate::traits::{AccountStoreError, CartStoreError, OrderStoreError};

#[derive(Debug, Error)]
pub enum SqliteDatabaseError {
    #[error("Database error: {0}")]
    Sqlx(#[from] sqlx::Error),
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
    #[error("Could not encode order items: {0}")]
    ItemEncoding(#[from] serde_json::Error),
}

impl From<SqliteDatabaseError> for OrderStoreError {
    fn from(e: SqliteDatabaseError) -> Self {
        OrderStoreError::DatabaseError(e.to_string())
    }
}

impl From<SqliteDatabaseError> for CartStoreError {
    fn from(e: SqliteDatabaseError) -> Self {
        CartStoreError::DatabaseError(e.to_string())
    }
}

impl From<SqliteDatabaseError> for AccountStoreError {
    fn from(e: SqliteDatabaseError) -> Self {
        AccountStoreError::DatabaseError(e.to_string())
    }
}
