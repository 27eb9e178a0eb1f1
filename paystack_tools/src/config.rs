use std::time::Duration;

use log::*;
use ops_common::Secret;

pub const DEFAULT_PAYSTACK_API_URL: &str = "https://api.paystack.co";
/// A hung gateway call would otherwise block the calling request indefinitely.
pub const DEFAULT_PAYSTACK_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct PaystackConfig {
    pub api_url: String,
    pub secret_key: Secret<String>,
    pub timeout: Duration,
}

impl Default for PaystackConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_PAYSTACK_API_URL.to_string(),
            secret_key: Secret::default(),
            timeout: DEFAULT_PAYSTACK_TIMEOUT,
        }
    }
}

impl PaystackConfig {
    pub fn new_from_env_or_default() -> Self {
        let api_url = std::env::var("OPS_PAYSTACK_API_URL").unwrap_or_else(|_| {
            debug!("OPS_PAYSTACK_API_URL not set, using {DEFAULT_PAYSTACK_API_URL}");
            DEFAULT_PAYSTACK_API_URL.to_string()
        });
        let secret_key = Secret::new(std::env::var("OPS_PAYSTACK_SECRET_KEY").unwrap_or_else(|_| {
            warn!("OPS_PAYSTACK_SECRET_KEY not set. Gateway calls will be rejected until it is configured");
            String::default()
        }));
        let timeout = std::env::var("OPS_GATEWAY_TIMEOUT")
            .ok()
            .and_then(|s| {
                s.parse::<u64>()
                    .map_err(|e| {
                        error!(
                            "{s} is not a valid number of seconds for OPS_GATEWAY_TIMEOUT. {e} Using the default, \
                             {}s, instead.",
                            DEFAULT_PAYSTACK_TIMEOUT.as_secs()
                        );
                    })
                    .ok()
            })
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_PAYSTACK_TIMEOUT);
        Self { api_url, secret_key, timeout }
    }
}
