use std::{fmt::Display, str::FromStr};

use chrono::{DateTime, Utc};
use log::error;
use ops_common::Naira;
use serde::{Deserialize, Serialize};
use sqlx::Type;
use thiserror::Error;

/// Order status written at creation time when the caller does not supply one.
pub const ORDER_STATUS_PENDING: &str = "pending";
/// Order status written by the payment verification flow.
pub const ORDER_STATUS_PREPARING: &str = "preparing";

//--------------------------------------       UserId        ---------------------------------------------------------
/// A lightweight wrapper around the stable account identifier of a user.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Type, Serialize, Deserialize)]
#[sqlx(transparent)]
#[serde(transparent)]
pub struct UserId(pub String);

impl Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<S: Into<String>> From<S> for UserId {
    fn from(value: S) -> Self {
        Self(value.into())
    }
}

impl UserId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

//--------------------------------------    PaymentStatus    ---------------------------------------------------------
/// The payment state of an order. An order starts out `Unset` and moves to `Paid` exactly once, via a successful
/// gateway verification. There is no transition back.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Type, Serialize, Deserialize)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    #[default]
    Unset,
    Paid,
}

impl Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentStatus::Unset => write!(f, "unset"),
            PaymentStatus::Paid => write!(f, "paid"),
        }
    }
}

#[derive(Debug, Clone, Error)]
#[error("Invalid payment status: {0}")]
pub struct ConversionError(String);

impl FromStr for PaymentStatus {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "unset" => Ok(Self::Unset),
            "paid" => Ok(Self::Paid),
            s => Err(ConversionError(format!("Invalid payment status: {s}"))),
        }
    }
}

impl From<String> for PaymentStatus {
    fn from(value: String) -> Self {
        value.parse().unwrap_or_else(|_| {
            error!("Invalid payment status: {value}. But this conversion cannot fail. Defaulting to unset");
            PaymentStatus::Unset
        })
    }
}

//--------------------------------------      OrderItem      ---------------------------------------------------------
/// A single line item on an order. The lifecycle logic copies items through untouched; they only matter to whoever
/// prepares the order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub item_id: String,
    pub quantity: u32,
    pub unit_price: Naira,
}

//--------------------------------------        Order        ---------------------------------------------------------
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    /// The account that created the order. Set once at creation from the caller's identity, never changed.
    pub user_id: UserId,
    /// The order total. Immutable after creation.
    pub amount: Naira,
    pub email: String,
    pub phone_number: Option<String>,
    pub user_address: Option<String>,
    pub items: Vec<OrderItem>,
    /// The reference issued by the payment gateway. Unset at creation, bound exactly once after a successful
    /// initialization, and the join key for later verification.
    pub payment_reference: Option<String>,
    pub payment_status: PaymentStatus,
    /// Open-ended status label. The verification flow writes `preparing`; an administrator may overwrite it with any
    /// value afterwards.
    pub order_status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    pub fn is_paid(&self) -> bool {
        self.payment_status == PaymentStatus::Paid
    }
}

//--------------------------------------      NewOrder       ---------------------------------------------------------
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewOrder {
    /// The account the order belongs to. Always taken from the resolved caller identity, never from request fields.
    pub user_id: UserId,
    /// The total price of the order
    pub amount: Naira,
    /// Contact email. The payment gateway requires it to initialize a transaction.
    pub email: String,
    pub phone_number: Option<String>,
    pub user_address: Option<String>,
    pub items: Vec<OrderItem>,
    /// The initial order status label
    pub order_status: String,
}

impl NewOrder {
    pub fn new<S: Into<String>>(user_id: UserId, amount: Naira, email: S) -> Self {
        Self {
            user_id,
            amount,
            email: email.into(),
            phone_number: None,
            user_address: None,
            items: Vec::new(),
            order_status: ORDER_STATUS_PENDING.to_string(),
        }
    }

    pub fn with_items(mut self, items: Vec<OrderItem>) -> Self {
        self.items = items;
        self
    }

    pub fn with_address<S: Into<String>>(mut self, address: S) -> Self {
        self.user_address = Some(address.into());
        self
    }

    pub fn with_phone_number<S: Into<String>>(mut self, phone_number: S) -> Self {
        self.phone_number = Some(phone_number.into());
        self
    }

    pub fn with_status<S: Into<String>>(mut self, status: S) -> Self {
        self.order_status = status.into();
        self
    }
}
