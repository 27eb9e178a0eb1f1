use thiserror::Error;

/// A transport- or protocol-level failure while talking to the payment gateway. This is never a legitimate negative
/// verification outcome; those are carried by [`VerificationStatus::Other`].
#[derive(Debug, Clone, Error)]
#[error("Gateway request failed: {0}")]
pub struct GatewayError(pub String);

/// The result of a successful initialize-transaction call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionInit {
    /// Where the payer must be redirected to complete the payment.
    pub authorization_url: String,
    /// The gateway's reference for this payment attempt; the join key back to the order.
    pub reference: String,
}

/// The gateway-reported state of a payment attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerificationStatus {
    Success,
    /// Anything the gateway reports other than success (e.g. `abandoned`, `failed`, `pending`). A legitimate
    /// outcome, not an error.
    Other(String),
}

impl VerificationStatus {
    /// Gateway status strings are compared case-insensitively against `"success"`.
    pub fn from_gateway_status(status: &str) -> Self {
        if status.eq_ignore_ascii_case("success") {
            VerificationStatus::Success
        } else {
            VerificationStatus::Other(status.to_string())
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, VerificationStatus::Success)
    }
}

/// The two external operations the payment provider exposes. Amounts cross this boundary in the gateway's minor
/// currency unit.
#[allow(async_fn_in_trait)]
pub trait PaymentGateway {
    async fn initialize_transaction(&self, email: &str, amount_kobo: i64) -> Result<TransactionInit, GatewayError>;

    async fn verify_transaction(&self, reference: &str) -> Result<VerificationStatus, GatewayError>;
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn status_comparison_is_case_insensitive() {
        assert!(VerificationStatus::from_gateway_status("success").is_success());
        assert!(VerificationStatus::from_gateway_status("Success").is_success());
        assert!(VerificationStatus::from_gateway_status("SUCCESS").is_success());
        assert_eq!(
            VerificationStatus::from_gateway_status("abandoned"),
            VerificationStatus::Other("abandoned".to_string())
        );
    }
}
