use serde::{Deserialize, Serialize};

/// The body of an initialize-transaction call. `amount` is in kobo.
#[derive(Debug, Clone, Serialize)]
pub struct InitializeBody {
    pub email: String,
    pub amount: i64,
}

/// Every Paystack response wraps its payload in `{status, message, data}`.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiEnvelope<T> {
    pub status: bool,
    #[serde(default)]
    pub message: String,
    pub data: Option<T>,
}

/// The payload of a successful initialize-transaction call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionData {
    pub authorization_url: String,
    #[serde(default)]
    pub access_code: Option<String>,
    pub reference: String,
}

/// The payload of a verify-transaction call. `status` is the gateway's own label for the payment attempt
/// (`success`, `abandoned`, `failed`, ...).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationData {
    pub status: String,
    #[serde(default)]
    pub reference: Option<String>,
    #[serde(default)]
    pub amount: Option<i64>,
    #[serde(default)]
    pub gateway_response: Option<String>,
    #[serde(default)]
    pub paid_at: Option<String>,
}

impl VerificationData {
    /// The gateway compares status labels case-insensitively.
    pub fn is_success(&self) -> bool {
        self.status.eq_ignore_ascii_case("success")
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn deserialize_initialize_response() {
        let json = r#"{
            "status": true,
            "message": "Authorization URL created",
            "data": {
                "authorization_url": "https://checkout.paystack.com/0peioxfhpn",
                "access_code": "0peioxfhpn",
                "reference": "7PVGX8MEk85tgeEpVDtD"
            }
        }"#;
        let envelope: ApiEnvelope<TransactionData> = serde_json::from_str(json).unwrap();
        assert!(envelope.status);
        let data = envelope.data.unwrap();
        assert_eq!(data.authorization_url, "https://checkout.paystack.com/0peioxfhpn");
        assert_eq!(data.reference, "7PVGX8MEk85tgeEpVDtD");
    }

    #[test]
    fn deserialize_verify_response() {
        let json = r#"{
            "status": true,
            "message": "Verification successful",
            "data": {
                "status": "success",
                "reference": "7PVGX8MEk85tgeEpVDtD",
                "amount": 150000,
                "gateway_response": "Successful",
                "paid_at": "2024-05-01T13:31:24.000Z"
            }
        }"#;
        let envelope: ApiEnvelope<VerificationData> = serde_json::from_str(json).unwrap();
        let data = envelope.data.unwrap();
        assert!(data.is_success());
        assert_eq!(data.amount, Some(150_000));
    }

    #[test]
    fn non_success_status_is_not_an_error() {
        let json = r#"{"status": true, "message": "Verification successful", "data": {"status": "abandoned"}}"#;
        let envelope: ApiEnvelope<VerificationData> = serde_json::from_str(json).unwrap();
        let data = envelope.data.unwrap();
        assert!(!data.is_success());
        assert_eq!(data.status, "abandoned");
    }

    #[test]
    fn declined_envelope_carries_the_message() {
        let json = r#"{"status": false, "message": "Invalid key"}"#;
        let envelope: ApiEnvelope<TransactionData> = serde_json::from_str(json).unwrap();
        assert!(!envelope.status);
        assert_eq!(envelope.message, "Invalid key");
        assert!(envelope.data.is_none());
    }

    #[test]
    fn initialize_body_serializes_amount_in_kobo() {
        let body = InitializeBody { email: "a@b.com".to_string(), amount: 150_000 };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json, serde_json::json!({"email": "a@b.com", "amount": 150000}));
    }
}
