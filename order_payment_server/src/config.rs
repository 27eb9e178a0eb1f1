use std::env;

use log::*;
use ops_common::Secret;
use paystack_tools::PaystackConfig;
use rand::{distributions::Alphanumeric, Rng};

const DEFAULT_OPS_HOST: &str = "127.0.0.1";
const DEFAULT_OPS_PORT: u16 = 8460;

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub auth: AuthConfig,
    pub paystack: PaystackConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_OPS_HOST.to_string(),
            port: DEFAULT_OPS_PORT,
            database_url: String::default(),
            auth: AuthConfig::default(),
            paystack: PaystackConfig::default(),
        }
    }
}

impl ServerConfig {
    pub fn new(host: &str, port: u16) -> Self {
        Self { host: host.to_string(), port, ..Default::default() }
    }

    pub fn from_env_or_default() -> Self {
        let host = env::var("OPS_HOST").ok().unwrap_or_else(|| DEFAULT_OPS_HOST.into());
        let port = env::var("OPS_PORT")
            .map(|s| {
                s.parse::<u16>().unwrap_or_else(|e| {
                    error!(
                        "🪛️ {s} is not a valid port for OPS_PORT. {e} Using the default, {DEFAULT_OPS_PORT}, instead."
                    );
                    DEFAULT_OPS_PORT
                })
            })
            .ok()
            .unwrap_or(DEFAULT_OPS_PORT);
        let database_url = env::var("OPS_DATABASE_URL").ok().unwrap_or_else(|| {
            error!("🪛️ OPS_DATABASE_URL is not set. Please set it to the URL for the orders database.");
            String::default()
        });
        let auth = AuthConfig::from_env_or_default();
        let paystack = PaystackConfig::new_from_env_or_default();
        Self { host, port, database_url, auth, paystack }
    }
}

#[derive(Clone, Debug)]
pub struct AuthConfig {
    /// The HMAC secret access tokens are signed with.
    pub jwt_secret: Secret<String>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self { jwt_secret: Secret::new(random_secret()) }
    }
}

impl AuthConfig {
    pub fn from_env_or_default() -> Self {
        match env::var("OPS_JWT_SECRET") {
            Ok(secret) if !secret.is_empty() => Self { jwt_secret: Secret::new(secret) },
            _ => {
                warn!(
                    "🪛️ OPS_JWT_SECRET is not set. A random signing secret will be used, so access tokens will not \
                     survive a restart."
                );
                Self::default()
            },
        }
    }
}

fn random_secret() -> String {
    rand::thread_rng().sample_iter(&Alphanumeric).take(64).map(char::from).collect()
}
