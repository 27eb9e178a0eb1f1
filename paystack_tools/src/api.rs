use std::sync::Arc;

use log::*;
use reqwest::{
    header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE},
    Client,
    Method,
};
use serde::{de::DeserializeOwned, Serialize};

use crate::{
    config::PaystackConfig,
    data_objects::{ApiEnvelope, InitializeBody, TransactionData, VerificationData},
    PaystackApiError,
};

#[derive(Clone)]
pub struct PaystackApi {
    config: PaystackConfig,
    client: Arc<Client>,
}

impl PaystackApi {
    pub fn new(config: PaystackConfig) -> Result<Self, PaystackApiError> {
        let mut headers = HeaderMap::with_capacity(2);
        let bearer = format!("Bearer {}", config.secret_key.reveal());
        let mut val =
            HeaderValue::from_str(&bearer).map_err(|e| PaystackApiError::Initialization(e.to_string()))?;
        val.set_sensitive(true);
        headers.insert(AUTHORIZATION, val);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .map_err(|e| PaystackApiError::Initialization(e.to_string()))?;
        Ok(Self { config, client: Arc::new(client) })
    }

    pub async fn rest_query<T: DeserializeOwned, B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: Option<B>,
    ) -> Result<T, PaystackApiError> {
        let url = self.url(path);
        trace!("Sending REST query: {url}");
        let mut req = self.client.request(method, url);
        if let Some(body) = body {
            req = req.json(&body);
        }
        let response = req.send().await.map_err(|e| PaystackApiError::RestResponseError(e.to_string()))?;
        if response.status().is_success() {
            trace!("REST query successful. {}", response.status());
            response.json::<T>().await.map_err(|e| PaystackApiError::JsonError(e.to_string()))
        } else {
            let status = response.status().as_u16();
            let message = response.text().await.map_err(|e| PaystackApiError::RestResponseError(e.to_string()))?;
            Err(PaystackApiError::QueryError { status, message })
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.config.api_url)
    }

    /// Asks the gateway to set up a payment attempt for `amount_kobo`, payable by `email`. Returns the checkout URL
    /// the payer must be redirected to and the reference that identifies the attempt from here on.
    pub async fn initialize_transaction(
        &self,
        email: &str,
        amount_kobo: i64,
    ) -> Result<TransactionData, PaystackApiError> {
        let body = InitializeBody { email: email.to_string(), amount: amount_kobo };
        debug!("Initializing transaction over {amount_kobo} kobo");
        let result: ApiEnvelope<TransactionData> =
            self.rest_query(Method::POST, "/transaction/initialize", Some(body)).await?;
        if !result.status {
            return Err(PaystackApiError::DeclinedRequest(result.message));
        }
        let data = result.data.ok_or(PaystackApiError::EmptyResponse)?;
        info!("Transaction initialized with reference [{}]", data.reference);
        Ok(data)
    }

    /// Fetches the gateway's view of the payment attempt behind `reference`. A non-success `status` in the returned
    /// data is a legitimate outcome; only transport and protocol failures produce an `Err`.
    pub async fn verify_transaction(&self, reference: &str) -> Result<VerificationData, PaystackApiError> {
        let path = format!("/transaction/verify/{reference}");
        debug!("Verifying transaction [{reference}]");
        let result: ApiEnvelope<VerificationData> = self.rest_query::<_, ()>(Method::GET, &path, None).await?;
        if !result.status {
            return Err(PaystackApiError::DeclinedRequest(result.message));
        }
        let data = result.data.ok_or(PaystackApiError::EmptyResponse)?;
        info!("Transaction [{reference}] verified. Gateway status: {}", data.status);
        Ok(data)
    }
}
