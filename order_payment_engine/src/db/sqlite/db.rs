use std::{fmt::Debug, str::FromStr};

use log::*;
use sqlx::{
    migrate,
    pool::PoolConnection,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    Sqlite,
    SqlitePool,
};

use crate::{
    db::sqlite::{carts, orders, users, SqliteDatabaseError},
    db_types::{NewOrder, Order, UserId},
    traits::{AccountManagement, AccountStoreError, CartManagement, CartStoreError, OrderManagement, OrderStoreError},
};

#[derive(Clone)]
pub struct SqliteDatabase {
    url: String,
    pool: SqlitePool,
}

impl Debug for SqliteDatabase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "SqliteDatabase ({:?})", self.pool)
    }
}

impl SqliteDatabase {
    /// Connects to the database at `url`, creating it if necessary, and brings the schema up to date.
    pub async fn new_with_url(url: &str, max_connections: u32) -> Result<Self, SqliteDatabaseError> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new().max_connections(max_connections).connect_with(options).await?;
        migrate!("./src/db/sqlite/migrations").run(&pool).await?;
        debug!("🗃️ Connected to database at {url}");
        Ok(Self { url: url.to_string(), pool })
    }

    pub fn url(&self) -> &str {
        self.url.as_str()
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    async fn acquire(&self) -> Result<PoolConnection<Sqlite>, SqliteDatabaseError> {
        let conn = self.pool.acquire().await?;
        Ok(conn)
    }
}

impl OrderManagement for SqliteDatabase {
    async fn insert_order(&self, order: NewOrder) -> Result<Order, OrderStoreError> {
        let mut conn = self.acquire().await?;
        let order = orders::insert_order(order, &mut conn).await?;
        debug!("🗃️ Order #{} has been saved in the DB for user {}", order.id, order.user_id);
        Ok(order)
    }

    async fn fetch_order_by_id(&self, id: i64) -> Result<Option<Order>, OrderStoreError> {
        let mut conn = self.acquire().await?;
        let order = orders::fetch_order_by_id(id, &mut conn).await?;
        Ok(order)
    }

    async fn fetch_orders_for_user(&self, user_id: &UserId) -> Result<Vec<Order>, OrderStoreError> {
        let mut conn = self.acquire().await?;
        let orders = orders::fetch_orders_for_user(user_id, &mut conn).await?;
        Ok(orders)
    }

    async fn fetch_all_orders(&self) -> Result<Vec<Order>, OrderStoreError> {
        let mut conn = self.acquire().await?;
        let orders = orders::fetch_all_orders(&mut conn).await?;
        Ok(orders)
    }

    async fn fetch_order_by_reference(&self, reference: &str) -> Result<Option<Order>, OrderStoreError> {
        let mut conn = self.acquire().await?;
        let order = orders::fetch_order_by_reference(reference, &mut conn).await?;
        Ok(order)
    }

    async fn attach_payment_reference(&self, id: i64, reference: &str) -> Result<Order, OrderStoreError> {
        let mut conn = self.acquire().await?;
        match orders::attach_payment_reference(id, reference, &mut conn).await? {
            Some(order) => {
                debug!("🗃️ Payment reference [{reference}] bound to order #{id}");
                Ok(order)
            },
            // The guarded update matched nothing: either the order is missing, or a reference is already bound.
            None => match orders::fetch_order_by_id(id, &mut conn).await? {
                Some(_) => Err(OrderStoreError::ReferenceAlreadySet(id)),
                None => Err(OrderStoreError::OrderNotFound(id)),
            },
        }
    }

    async fn mark_order_paid(&self, id: i64) -> Result<Order, OrderStoreError> {
        let mut conn = self.acquire().await?;
        orders::mark_order_paid(id, &mut conn).await?.ok_or(OrderStoreError::OrderNotFound(id))
    }

    async fn update_order_status(&self, id: i64, status: &str) -> Result<Order, OrderStoreError> {
        let mut conn = self.acquire().await?;
        orders::update_order_status(id, status, &mut conn).await?.ok_or(OrderStoreError::OrderNotFound(id))
    }

    async fn delete_order_by_id(&self, id: i64) -> Result<(), OrderStoreError> {
        let mut conn = self.acquire().await?;
        if orders::delete_order_by_id(id, &mut conn).await? {
            Ok(())
        } else {
            Err(OrderStoreError::OrderNotFound(id))
        }
    }
}

impl CartManagement for SqliteDatabase {
    async fn clear_cart_for_user(&self, user_id: &UserId) -> Result<(), CartStoreError> {
        let mut conn = self.acquire().await?;
        let removed = carts::clear_cart_for_user(user_id, &mut conn).await?;
        if removed > 0 {
            debug!("🗃️ Cart for user {user_id} cleared");
        } else {
            trace!("🗃️ User {user_id} had no cart to clear");
        }
        Ok(())
    }
}

impl AccountManagement for SqliteDatabase {
    async fn fetch_user_id_for_email(&self, email: &str) -> Result<Option<UserId>, AccountStoreError> {
        let mut conn = self.acquire().await?;
        let user_id = users::fetch_user_id_for_email(email, &mut conn).await?;
        Ok(user_id)
    }
}
