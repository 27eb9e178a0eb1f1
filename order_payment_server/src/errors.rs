use actix_web::{
    error::ResponseError,
    http::{header::ContentType, StatusCode},
    HttpResponse,
};
use order_payment_engine::{AccountApiError, OrderFlowError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Could not initialize server. {0}")]
    InitializeError(String),
    #[error("An error occurred on the backend of the server. {0}")]
    BackendError(String),
    #[error("Could not read request body: {0}")]
    InvalidRequestBody(String),
    #[error("An I/O error happened in the server. {0}")]
    IOError(#[from] std::io::Error),
    #[error("Authentication Error. {0}")]
    AuthenticationError(#[from] AuthError),
    #[error("The data was not found. {0}")]
    NoRecordFound(String),
    #[error("Invalid order. {0}")]
    InvalidOrder(String),
    #[error("Payment was not completed. {0}")]
    PaymentNotCompleted(String),
    #[error("Payment gateway failure. {0}")]
    GatewayFailure(String),
}

impl ResponseError for ServerError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequestBody(_) => StatusCode::BAD_REQUEST,
            Self::InvalidOrder(_) => StatusCode::BAD_REQUEST,
            Self::AuthenticationError(e) => match e {
                AuthError::MissingToken => StatusCode::UNAUTHORIZED,
                AuthError::ValidationError(_) => StatusCode::UNAUTHORIZED,
                AuthError::PoorlyFormattedToken(_) => StatusCode::BAD_REQUEST,
            },
            Self::NoRecordFound(_) => StatusCode::NOT_FOUND,
            Self::PaymentNotCompleted(_) => StatusCode::PAYMENT_REQUIRED,
            // Gateway failures are surfaced as server-side faults; the order itself is persisted in its last good
            // state, so the caller can retry.
            Self::InitializeError(_) | Self::BackendError(_) | Self::IOError(_) | Self::GatewayFailure(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            },
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .insert_header(ContentType::json())
            .body(serde_json::json!({ "error": self.to_string() }).to_string())
    }
}

#[derive(Debug, Clone, Error)]
pub enum AuthError {
    #[error("No access token was provided.")]
    MissingToken,
    #[error("Access token is invalid. {0}")]
    ValidationError(String),
    #[error("Access token is not in the correct format. {0}")]
    PoorlyFormattedToken(String),
}

impl From<OrderFlowError> for ServerError {
    fn from(e: OrderFlowError) -> Self {
        match e {
            OrderFlowError::InvalidOrderState(_) => Self::InvalidOrder(e.to_string()),
            OrderFlowError::OrderNotFound => Self::NoRecordFound(e.to_string()),
            OrderFlowError::GatewayInit(_) | OrderFlowError::GatewayVerify(_) => Self::GatewayFailure(e.to_string()),
            OrderFlowError::PaymentVerificationFailed(_) => Self::PaymentNotCompleted(e.to_string()),
            OrderFlowError::DatabaseError(_) => Self::BackendError(e.to_string()),
        }
    }
}

impl From<AccountApiError> for ServerError {
    fn from(e: AccountApiError) -> Self {
        match e {
            // Only validated credentials reach identity resolution, so a missing account is a consistency fault on
            // our side, not a client error.
            AccountApiError::UserNotFound => Self::BackendError(e.to_string()),
            AccountApiError::DatabaseError(_) => Self::BackendError(e.to_string()),
        }
    }
}
