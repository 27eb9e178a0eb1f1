use std::fmt::Debug;

use log::*;

use crate::{
    api::errors::OrderFlowError,
    db_types::{NewOrder, Order, UserId},
    traits::{CartManagement, OrderManagement, PaymentGateway, VerificationStatus},
};

/// `OrderFlowApi` is the primary API for the order lifecycle: creating an order bound to a gateway transaction, and
/// reconciling the order's state when the gateway confirms or denies the payment.
///
/// The lifecycle is a two-phase, externally mediated state transition. An order is persisted *before* the gateway is
/// called, so a record always exists even when the external call fails; the reference returned by the gateway is then
/// bound to the order and later used as the join key for verification.
pub struct OrderFlowApi<B, G> {
    db: B,
    gateway: G,
}

impl<B, G> Debug for OrderFlowApi<B, G> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "OrderFlowApi")
    }
}

impl<B, G> OrderFlowApi<B, G> {
    pub fn new(db: B, gateway: G) -> Self {
        Self { db, gateway }
    }
}

impl<B, G> OrderFlowApi<B, G>
where
    B: OrderManagement + CartManagement,
    G: PaymentGateway,
{
    /// Creates a new order and initializes a gateway transaction for it.
    ///
    /// The order is persisted first, then validated, then the gateway is called. A gateway failure therefore leaves
    /// a persisted order with no payment reference behind; the caller can retry the whole call, or an operator can
    /// reconcile the orphan manually. On success the gateway reference is bound to the order exactly once, and the
    /// authorization URL the payer must be redirected to is returned alongside the stored order.
    pub async fn create_order_with_payment(&self, order: NewOrder) -> Result<(Order, String), OrderFlowError> {
        let order = self.db.insert_order(order).await?;
        debug!("📦️ Order #{} saved for user {}", order.id, order.user_id);
        // Validation happens after the first save: a rejected order is already in the store, with no reference.
        if order.email.is_empty() {
            return Err(OrderFlowError::InvalidOrderState("Order email is missing".to_string()));
        }
        if !order.amount.is_positive() {
            return Err(OrderFlowError::InvalidOrderState(format!("Invalid order amount {}", order.amount)));
        }
        let init = self
            .gateway
            .initialize_transaction(&order.email, order.amount.to_kobo())
            .await
            .map_err(OrderFlowError::GatewayInit)?;
        let order = self.db.attach_payment_reference(order.id, &init.reference).await?;
        info!("📦️ Order #{} initialized with payment reference [{}]", order.id, init.reference);
        Ok((order, init.authorization_url))
    }

    /// Reconciles an order against the gateway's view of the payment attempt identified by `reference`.
    ///
    /// Verifying an already-paid order is a no-op that succeeds without calling the gateway again or re-clearing the
    /// cart, which makes the flow safe against duplicate callbacks and concurrent verification calls. A gateway
    /// status other than success leaves the order untouched and fails with
    /// [`OrderFlowError::PaymentVerificationFailed`].
    pub async fn verify_payment(&self, reference: &str) -> Result<Order, OrderFlowError> {
        let order = self.db.fetch_order_by_reference(reference).await?.ok_or(OrderFlowError::OrderNotFound)?;
        if order.is_paid() {
            debug!("💰️ Order #{} is already paid. Nothing to do for reference [{reference}]", order.id);
            return Ok(order);
        }
        let status = self.gateway.verify_transaction(reference).await.map_err(OrderFlowError::GatewayVerify)?;
        match status {
            VerificationStatus::Success => {
                let order = self.db.mark_order_paid(order.id).await?;
                self.db.clear_cart_for_user(&order.user_id).await?;
                info!("💰️ Payment for order #{} confirmed. Cart for user {} cleared", order.id, order.user_id);
                Ok(order)
            },
            VerificationStatus::Other(status) => {
                debug!("💰️ Gateway reported status '{status}' for reference [{reference}]. Order state unchanged");
                Err(OrderFlowError::PaymentVerificationFailed(status))
            },
        }
    }

    /// All orders belonging to `user_id`, in insertion order.
    pub async fn orders_for_user(&self, user_id: &UserId) -> Result<Vec<Order>, OrderFlowError> {
        let orders = self.db.fetch_orders_for_user(user_id).await?;
        Ok(orders)
    }

    /// Every order in the store. Callers of this method are privileged by definition; no ownership check applies.
    pub async fn fetch_all_orders(&self) -> Result<Vec<Order>, OrderFlowError> {
        let orders = self.db.fetch_all_orders().await?;
        Ok(orders)
    }

    /// Deletes an order by id. No ownership check is enforced here; any authenticated caller may remove any order.
    pub async fn remove_order(&self, id: i64) -> Result<(), OrderFlowError> {
        self.db.delete_order_by_id(id).await?;
        info!("📦️ Order #{id} deleted");
        Ok(())
    }

    /// Unconditionally overwrites the order status label. Any string is accepted; no transition legality is
    /// checked.
    pub async fn update_order_status(&self, id: i64, status: &str) -> Result<Order, OrderFlowError> {
        let order = self.db.update_order_status(id, status).await?;
        info!("📦️ Order #{id} status set to '{status}'");
        Ok(order)
    }
}
