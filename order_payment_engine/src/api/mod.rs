//! The engine public API. [`order_flow_api::OrderFlowApi`] drives the order lifecycle state machine;
//! [`account_api::AccountApi`] resolves caller identities.

pub mod account_api;
pub mod errors;
pub mod order_flow_api;
