use chrono::{DateTime, Utc};
use ops_common::Naira;
use sqlx::{FromRow, SqliteConnection};

use crate::{
    db::sqlite::SqliteDatabaseError,
    db_types::{NewOrder, Order, PaymentStatus, UserId, ORDER_STATUS_PREPARING},
};

const ORDER_COLUMNS: &str = "id, user_id, amount, email, phone_number, user_address, ordered_items, \
                             payment_reference, payment_status, order_status, created_at, updated_at";

/// The raw orders row. Items are stored as a JSON column and decoded on the way out.
#[derive(Debug, FromRow)]
struct OrderRow {
    id: i64,
    user_id: UserId,
    amount: Naira,
    email: String,
    phone_number: Option<String>,
    user_address: Option<String>,
    ordered_items: String,
    payment_reference: Option<String>,
    payment_status: PaymentStatus,
    order_status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<OrderRow> for Order {
    type Error = SqliteDatabaseError;

    fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
        let items = serde_json::from_str(&row.ordered_items)?;
        Ok(Order {
            id: row.id,
            user_id: row.user_id,
            amount: row.amount,
            email: row.email,
            phone_number: row.phone_number,
            user_address: row.user_address,
            items,
            payment_reference: row.payment_reference,
            payment_status: row.payment_status,
            order_status: row.order_status,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

pub async fn insert_order(order: NewOrder, conn: &mut SqliteConnection) -> Result<Order, SqliteDatabaseError> {
    let items = serde_json::to_string(&order.items)?;
    let id = sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO orders (user_id, amount, email, phone_number, user_address, ordered_items, order_status)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        RETURNING id
        "#,
    )
    .bind(&order.user_id)
    .bind(order.amount)
    .bind(&order.email)
    .bind(&order.phone_number)
    .bind(&order.user_address)
    .bind(items)
    .bind(&order.order_status)
    .fetch_one(&mut *conn)
    .await?;
    fetch_order_by_id(id, conn).await?.ok_or(SqliteDatabaseError::Sqlx(sqlx::Error::RowNotFound))
}

pub async fn fetch_order_by_id(id: i64, conn: &mut SqliteConnection) -> Result<Option<Order>, SqliteDatabaseError> {
    let row = sqlx::query_as::<_, OrderRow>(&format!("SELECT {ORDER_COLUMNS} FROM orders WHERE id = ?"))
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;
    row.map(Order::try_from).transpose()
}

/// References are unique in the schema, so at most one row can match.
pub async fn fetch_order_by_reference(
    reference: &str,
    conn: &mut SqliteConnection,
) -> Result<Option<Order>, SqliteDatabaseError> {
    let row = sqlx::query_as::<_, OrderRow>(&format!("SELECT {ORDER_COLUMNS} FROM orders WHERE payment_reference = ?"))
        .bind(reference)
        .fetch_optional(&mut *conn)
        .await?;
    row.map(Order::try_from).transpose()
}

pub async fn fetch_orders_for_user(
    user_id: &UserId,
    conn: &mut SqliteConnection,
) -> Result<Vec<Order>, SqliteDatabaseError> {
    let rows = sqlx::query_as::<_, OrderRow>(&format!("SELECT {ORDER_COLUMNS} FROM orders WHERE user_id = ? ORDER BY id"))
        .bind(user_id)
        .fetch_all(&mut *conn)
        .await?;
    rows.into_iter().map(Order::try_from).collect()
}

pub async fn fetch_all_orders(conn: &mut SqliteConnection) -> Result<Vec<Order>, SqliteDatabaseError> {
    let rows = sqlx::query_as::<_, OrderRow>(&format!("SELECT {ORDER_COLUMNS} FROM orders ORDER BY id"))
        .fetch_all(&mut *conn)
        .await?;
    rows.into_iter().map(Order::try_from).collect()
}

/// Binds the gateway reference to the order, but only if no reference is bound yet. Returns the updated order, or
/// `None` if no un-referenced row matched the id.
pub async fn attach_payment_reference(
    id: i64,
    reference: &str,
    conn: &mut SqliteConnection,
) -> Result<Option<Order>, SqliteDatabaseError> {
    let result = sqlx::query(
        "UPDATE orders SET payment_reference = ?, updated_at = CURRENT_TIMESTAMP \
         WHERE id = ? AND payment_reference IS NULL",
    )
    .bind(reference)
    .bind(id)
    .execute(&mut *conn)
    .await?;
    if result.rows_affected() == 0 {
        return Ok(None);
    }
    fetch_order_by_id(id, conn).await
}

/// Flips the payment and order status in a single update. Returns `None` if the order does not exist.
pub async fn mark_order_paid(id: i64, conn: &mut SqliteConnection) -> Result<Option<Order>, SqliteDatabaseError> {
    let result = sqlx::query(
        "UPDATE orders SET payment_status = ?, order_status = ?, updated_at = CURRENT_TIMESTAMP WHERE id = ?",
    )
    .bind(PaymentStatus::Paid)
    .bind(ORDER_STATUS_PREPARING)
    .bind(id)
    .execute(&mut *conn)
    .await?;
    if result.rows_affected() == 0 {
        return Ok(None);
    }
    fetch_order_by_id(id, conn).await
}

pub async fn update_order_status(
    id: i64,
    status: &str,
    conn: &mut SqliteConnection,
) -> Result<Option<Order>, SqliteDatabaseError> {
    let result = sqlx::query("UPDATE orders SET order_status = ?, updated_at = CURRENT_TIMESTAMP WHERE id = ?")
        .bind(status)
        .bind(id)
        .execute(&mut *conn)
        .await?;
    if result.rows_affected() == 0 {
        return Ok(None);
    }
    fetch_order_by_id(id, conn).await
}

/// Returns true if a row was deleted.
pub async fn delete_order_by_id(id: i64, conn: &mut SqliteConnection) -> Result<bool, SqliteDatabaseError> {
    let result = sqlx::query("DELETE FROM orders WHERE id = ?").bind(id).execute(&mut *conn).await?;
    Ok(result.rows_affected() > 0)
}
