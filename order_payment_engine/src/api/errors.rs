use thiserror::Error;

use crate::traits::{AccountStoreError, CartStoreError, GatewayError, OrderStoreError};

#[derive(Debug, Error)]
pub enum OrderFlowError {
    /// The persisted order is missing a field the payment initialization requires, or carries an invalid amount.
    #[error("Cannot initialize payment. {0}")]
    InvalidOrderState(String),
    #[error("Order not found")]
    OrderNotFound,
    /// The gateway could not be reached, or rejected the initialize call. The order record persisted before the call
    /// remains in the store without a payment reference.
    #[error("Payment initialization failed. {0}")]
    GatewayInit(#[source] GatewayError),
    /// The verify call itself failed at the transport or protocol level. Distinct from
    /// [`OrderFlowError::PaymentVerificationFailed`], which is the gateway explicitly reporting a non-success state.
    #[error("Payment verification could not be completed. {0}")]
    GatewayVerify(#[source] GatewayError),
    #[error("Payment was not successful. The gateway reported status '{0}'")]
    PaymentVerificationFailed(String),
    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl From<OrderStoreError> for OrderFlowError {
    fn from(e: OrderStoreError) -> Self {
        match e {
            OrderStoreError::OrderNotFound(_) => OrderFlowError::OrderNotFound,
            OrderStoreError::ReferenceAlreadySet(_) => OrderFlowError::DatabaseError(e.to_string()),
            OrderStoreError::DatabaseError(e) => OrderFlowError::DatabaseError(e),
        }
    }
}

impl From<CartStoreError> for OrderFlowError {
    fn from(e: CartStoreError) -> Self {
        match e {
            CartStoreError::DatabaseError(e) => OrderFlowError::DatabaseError(e),
        }
    }
}

#[derive(Debug, Error)]
pub enum AccountApiError {
    /// A valid credential resolved to no known account. This is a server-side consistency fault, not a user error;
    /// a valid credential should always resolve.
    #[error("No account found for the presented credential")]
    UserNotFound,
    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl From<AccountStoreError> for AccountApiError {
    fn from(e: AccountStoreError) -> Self {
        match e {
            AccountStoreError::DatabaseError(e) => AccountApiError::DatabaseError(e),
        }
    }
}
