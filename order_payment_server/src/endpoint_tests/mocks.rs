use mockall::mock;
use order_payment_engine::{
    db_types::{NewOrder, Order, UserId},
    traits::{
        AccountManagement,
        AccountStoreError,
        CartManagement,
        CartStoreError,
        GatewayError,
        OrderManagement,
        OrderStoreError,
        PaymentGateway,
        TransactionInit,
        VerificationStatus,
    },
};

mock! {
    pub Db {}

    impl OrderManagement for Db {
        async fn insert_order(&self, order: NewOrder) -> Result<Order, OrderStoreError>;
        async fn fetch_order_by_id(&self, id: i64) -> Result<Option<Order>, OrderStoreError>;
        async fn fetch_orders_for_user(&self, user_id: &UserId) -> Result<Vec<Order>, OrderStoreError>;
        async fn fetch_all_orders(&self) -> Result<Vec<Order>, OrderStoreError>;
        async fn fetch_order_by_reference(&self, reference: &str) -> Result<Option<Order>, OrderStoreError>;
        async fn attach_payment_reference(&self, id: i64, reference: &str) -> Result<Order, OrderStoreError>;
        async fn mark_order_paid(&self, id: i64) -> Result<Order, OrderStoreError>;
        async fn update_order_status(&self, id: i64, status: &str) -> Result<Order, OrderStoreError>;
        async fn delete_order_by_id(&self, id: i64) -> Result<(), OrderStoreError>;
    }

    impl CartManagement for Db {
        async fn clear_cart_for_user(&self, user_id: &UserId) -> Result<(), CartStoreError>;
    }

    impl AccountManagement for Db {
        async fn fetch_user_id_for_email(&self, email: &str) -> Result<Option<UserId>, AccountStoreError>;
    }
}

mock! {
    pub Gateway {}

    impl PaymentGateway for Gateway {
        async fn initialize_transaction(&self, email: &str, amount_kobo: i64) -> Result<TransactionInit, GatewayError>;
        async fn verify_transaction(&self, reference: &str) -> Result<VerificationStatus, GatewayError>;
    }
}
