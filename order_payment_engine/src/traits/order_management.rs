use thiserror::Error;

use crate::db_types::{NewOrder, Order, UserId};

#[derive(Debug, Error)]
pub enum OrderStoreError {
    #[error("Order #{0} does not exist")]
    OrderNotFound(i64),
    #[error("Order #{0} already has a payment reference bound to it")]
    ReferenceAlreadySet(i64),
    #[error("Database error: {0}")]
    DatabaseError(String),
}

/// Durable persistence of order records. Orders are keyed by their identifier and, once payment has been
/// initialized, by the gateway reference. Every operation is a single-record transaction; no multi-order guarantee
/// is provided or required.
#[allow(async_fn_in_trait)]
pub trait OrderManagement {
    /// Stores a brand-new order and assigns its identifier. The stored record has no payment reference and an
    /// `unset` payment status.
    async fn insert_order(&self, order: NewOrder) -> Result<Order, OrderStoreError>;

    async fn fetch_order_by_id(&self, id: i64) -> Result<Option<Order>, OrderStoreError>;

    /// All orders belonging to the given user, in insertion order.
    async fn fetch_orders_for_user(&self, user_id: &UserId) -> Result<Vec<Order>, OrderStoreError>;

    /// Every order in the store, irrespective of owner.
    async fn fetch_all_orders(&self) -> Result<Vec<Order>, OrderStoreError>;

    /// Looks an order up by its gateway reference. References are unique, so the result is unambiguous.
    async fn fetch_order_by_reference(&self, reference: &str) -> Result<Option<Order>, OrderStoreError>;

    /// Binds the gateway reference to the order. The reference can be set exactly once; attempting to overwrite an
    /// existing reference fails with [`OrderStoreError::ReferenceAlreadySet`].
    async fn attach_payment_reference(&self, id: i64, reference: &str) -> Result<Order, OrderStoreError>;

    /// Flips the order to `paid` / `preparing` in a single update. Re-applying the flip to an already-paid order is
    /// harmless.
    async fn mark_order_paid(&self, id: i64) -> Result<Order, OrderStoreError>;

    /// Unconditionally overwrites the order status label. Any string is accepted.
    async fn update_order_status(&self, id: i64, status: &str) -> Result<Order, OrderStoreError>;

    async fn delete_order_by_id(&self, id: i64) -> Result<(), OrderStoreError>;
}
