use std::fmt::Display;

use ops_common::Naira;
use order_payment_engine::db_types::{NewOrder, Order, OrderItem, PaymentStatus, UserId};
use serde::{Deserialize, Serialize};

/// The request body for creating an order. There is deliberately no owner field; ownership always comes from the
/// resolved caller identity.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderRequest {
    pub amount: Naira,
    pub email: String,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub user_address: Option<String>,
    #[serde(default)]
    pub ordered_items: Vec<OrderItem>,
    /// Initial status label. Defaults to `pending` when omitted.
    #[serde(default)]
    pub order_status: Option<String>,
}

impl OrderRequest {
    pub fn into_new_order(self, user_id: UserId) -> NewOrder {
        let mut order = NewOrder::new(user_id, self.amount, self.email).with_items(self.ordered_items);
        order.phone_number = self.phone_number;
        order.user_address = self.user_address;
        if let Some(status) = self.order_status {
            order = order.with_status(status);
        }
        order
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct OrderResult {
    pub id: i64,
    pub user_id: UserId,
    pub amount: Naira,
    pub email: String,
    pub phone_number: Option<String>,
    pub user_address: Option<String>,
    pub ordered_items: Vec<OrderItem>,
    pub payment_reference: Option<String>,
    pub payment_status: PaymentStatus,
    pub order_status: String,
    /// Only present on a fresh create response, where the payer must be redirected to the gateway.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authorization_url: Option<String>,
}

impl From<Order> for OrderResult {
    fn from(order: Order) -> Self {
        Self {
            id: order.id,
            user_id: order.user_id,
            amount: order.amount,
            email: order.email,
            phone_number: order.phone_number,
            user_address: order.user_address,
            ordered_items: order.items,
            payment_reference: order.payment_reference,
            payment_status: order.payment_status,
            order_status: order.order_status,
            authorization_url: None,
        }
    }
}

impl OrderResult {
    pub fn with_authorization_url<S: Into<String>>(mut self, url: S) -> Self {
        self.authorization_url = Some(url.into());
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyPaymentParams {
    pub reference: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusUpdateParams {
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonResponse {
    pub success: bool,
    pub message: String,
}

impl JsonResponse {
    pub fn success<S: Display>(message: S) -> Self {
        Self { success: true, message: message.to_string() }
    }

    pub fn failure<S: Display>(message: S) -> Self {
        Self { success: false, message: message.to_string() }
    }
}
