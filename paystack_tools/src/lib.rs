//! A thin client for the Paystack REST API, covering the two transaction operations the order workflow needs:
//! initializing a transaction and verifying one. Amounts cross this boundary in kobo, the minor currency unit.

mod api;
mod config;
mod data_objects;
mod error;

pub use api::PaystackApi;
pub use config::PaystackConfig;
pub use data_objects::{ApiEnvelope, InitializeBody, TransactionData, VerificationData};
pub use error::PaystackApiError;
