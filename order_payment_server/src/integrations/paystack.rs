use order_payment_engine::traits::{GatewayError, PaymentGateway, TransactionInit, VerificationStatus};
use paystack_tools::{PaystackApi, PaystackConfig};

use crate::errors::ServerError;

/// Adapts the Paystack REST client to the engine's [`PaymentGateway`] contract. The engine only distinguishes
/// "the gateway answered" from "the call failed"; every client-side error collapses into a [`GatewayError`] here.
#[derive(Clone)]
pub struct PaystackGateway {
    api: PaystackApi,
}

impl PaystackGateway {
    pub fn new(config: PaystackConfig) -> Result<Self, ServerError> {
        let api = PaystackApi::new(config).map_err(|e| ServerError::InitializeError(e.to_string()))?;
        Ok(Self { api })
    }
}

impl PaymentGateway for PaystackGateway {
    async fn initialize_transaction(&self, email: &str, amount_kobo: i64) -> Result<TransactionInit, GatewayError> {
        let data = self
            .api
            .initialize_transaction(email, amount_kobo)
            .await
            .map_err(|e| GatewayError(e.to_string()))?;
        Ok(TransactionInit { authorization_url: data.authorization_url, reference: data.reference })
    }

    async fn verify_transaction(&self, reference: &str) -> Result<VerificationStatus, GatewayError> {
        let data = self.api.verify_transaction(reference).await.map_err(|e| GatewayError(e.to_string()))?;
        Ok(VerificationStatus::from_gateway_status(&data.status))
    }
}
