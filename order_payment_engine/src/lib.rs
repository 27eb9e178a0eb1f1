//! Order Payment Engine
//!
//! The Order Payment Engine contains the core logic for the order-and-payment workflow: creating purchase orders,
//! binding them to a payment gateway transaction, and reconciling their state when the gateway confirms or denies
//! payment. It is HTTP-framework agnostic; the server crate wires it up to the outside world.
//!
//! The library is divided into two main sections:
//! 1. Database management and control ([`mod@db`]). Sqlite is the supported backend. You should never need to access
//!    the database directly. Instead, use the public API provided by the engine. The exception is the data types used
//!    in the database. These are defined in the `db_types` module and are public.
//! 2. The engine public API ([`mod@api`]). This provides the public-facing functionality of the engine: the order
//!    lifecycle flow and caller identity resolution. Specific backends need to implement the traits in [`mod@traits`]
//!    in order to act as a backend for the Order Payment Server.
mod db;

pub mod api;
pub mod db_types;
pub mod traits;

#[cfg(feature = "sqlite")]
pub use db::sqlite::{SqliteDatabase, SqliteDatabaseError};
pub use api::{
    account_api::AccountApi,
    errors::{AccountApiError, OrderFlowError},
    order_flow_api::OrderFlowApi,
};
