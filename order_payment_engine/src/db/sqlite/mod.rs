//! Sqlite backend for the order payment engine. [`db::SqliteDatabase`] owns the pool and implements the storage
//! traits; the per-concern SQL lives in [`orders`], [`users`] and [`carts`].

mod carts;
mod db;
mod errors;
mod orders;
mod users;

pub use db::SqliteDatabase;
pub use errors::SqliteDatabaseError;
