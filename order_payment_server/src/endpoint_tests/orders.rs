use actix_web::{http::StatusCode, web};
use chrono::{TimeZone, Utc};
use ops_common::Naira;
use order_payment_engine::{
    db_types::{Order, PaymentStatus, UserId, ORDER_STATUS_PENDING, ORDER_STATUS_PREPARING},
    traits::{OrderStoreError, TransactionInit, VerificationStatus},
    AccountApi,
    OrderFlowApi,
};
use serde_json::{json, Value};

use super::{
    helpers::{delete_request, get_request, issue_token, patch_request, post_request},
    mocks::{MockDb, MockGateway},
};
use crate::routes::{all_orders, create_order, delete_order, my_orders, update_order_status, verify_payment};

/// Registers the full order route table against the given mocks, mirroring the layout in `server.rs`.
fn configure(store: MockDb, accounts: MockDb, gateway: MockGateway) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg| {
        let orders_api = OrderFlowApi::new(store, gateway);
        let accounts_api = AccountApi::new(accounts);
        cfg.app_data(web::Data::new(orders_api)).app_data(web::Data::new(accounts_api)).service(
            web::scope("/api/orders")
                .route("/create", web::post().to(create_order::<MockDb, MockGateway>))
                .route("/verify", web::post().to(verify_payment::<MockDb, MockGateway>))
                .route("/all", web::get().to(all_orders::<MockDb, MockGateway>))
                .route("/status/{order_id}", web::patch().to(update_order_status::<MockDb, MockGateway>))
                .route("", web::get().to(my_orders::<MockDb, MockGateway>))
                .route("/{order_id}", web::delete().to(delete_order::<MockDb, MockGateway>)),
        );
    }
}

fn stored_order(id: i64, user: &str, amount: f64) -> Order {
    Order {
        id,
        user_id: UserId::from(user),
        amount: Naira::from(amount),
        email: "a@b.com".to_string(),
        phone_number: None,
        user_address: None,
        items: Vec::new(),
        payment_reference: None,
        payment_status: PaymentStatus::Unset,
        order_status: ORDER_STATUS_PENDING.to_string(),
        created_at: Utc.with_ymd_and_hms(2024, 2, 29, 13, 30, 0).unwrap(),
        updated_at: Utc.with_ymd_and_hms(2024, 2, 29, 13, 30, 0).unwrap(),
    }
}

fn accounts_resolving(user: &'static str) -> MockDb {
    let mut accounts = MockDb::new();
    accounts.expect_fetch_user_id_for_email().returning(move |_| Ok(Some(UserId::from(user))));
    accounts
}

fn order_body() -> Value {
    json!({
        "amount": 1500.0,
        "email": "a@b.com",
        "phone_number": "+2348012345678",
        "user_address": "12 Allen Avenue, Ikeja",
        "ordered_items": [{"item_id": "jollof-rice", "quantity": 2, "unit_price": 750.0}]
    })
}

#[actix_web::test]
async fn create_order_returns_the_order_and_checkout_url() {
    let mut store = MockDb::new();
    store.expect_insert_order().times(1).returning(|o| {
        let mut stored = stored_order(1, "user-1", o.amount.value());
        stored.user_id = o.user_id;
        stored.email = o.email;
        stored.items = o.items;
        Ok(stored)
    });
    store.expect_attach_payment_reference().times(1).returning(|id, r| {
        let mut o = stored_order(id, "user-1", 1500.0);
        o.payment_reference = Some(r.to_string());
        Ok(o)
    });
    let mut gateway = MockGateway::new();
    gateway.expect_initialize_transaction().times(1).returning(|_, _| {
        Ok(TransactionInit {
            authorization_url: "https://checkout.paystack.com/abc123".to_string(),
            reference: "ref-1".to_string(),
        })
    });
    let token = issue_token("a@b.com");
    let (status, body) =
        post_request(&token, "/api/orders/create", order_body(), configure(store, accounts_resolving("user-1"), gateway))
            .await;
    assert_eq!(status, StatusCode::CREATED);
    let order: Value = serde_json::from_str(&body).expect("invalid response body");
    assert_eq!(order["user_id"], "user-1");
    assert_eq!(order["amount"], 1500.0);
    assert_eq!(order["payment_reference"], "ref-1");
    assert_eq!(order["payment_status"], "unset");
    assert_eq!(order["authorization_url"], "https://checkout.paystack.com/abc123");
}

#[actix_web::test]
async fn create_order_without_a_token_is_unauthorized() {
    let (status, _) =
        post_request("", "/api/orders/create", order_body(), configure(MockDb::new(), MockDb::new(), MockGateway::new()))
            .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn create_order_with_a_tampered_token_is_unauthorized() {
    let mut token = issue_token("a@b.com");
    token.replace_range(token.len() - 5.., "AAAAA");
    let (status, _) =
        post_request(&token, "/api/orders/create", order_body(), configure(MockDb::new(), MockDb::new(), MockGateway::new()))
            .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn create_order_for_an_unknown_account_is_a_server_fault() {
    let mut accounts = MockDb::new();
    accounts.expect_fetch_user_id_for_email().times(1).returning(|_| Ok(None));
    let token = issue_token("ghost@b.com");
    let (status, _) =
        post_request(&token, "/api/orders/create", order_body(), configure(MockDb::new(), accounts, MockGateway::new()))
            .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[actix_web::test]
async fn create_order_with_a_zero_amount_is_rejected() {
    let mut store = MockDb::new();
    store.expect_insert_order().times(1).returning(|o| Ok(stored_order(1, "user-1", o.amount.value())));
    let mut gateway = MockGateway::new();
    gateway.expect_initialize_transaction().times(0);
    let token = issue_token("a@b.com");
    let body = json!({"amount": 0.0, "email": "a@b.com"});
    let (status, _) =
        post_request(&token, "/api/orders/create", body, configure(store, accounts_resolving("user-1"), gateway)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn verify_payment_confirms_the_order() {
    let mut store = MockDb::new();
    store.expect_fetch_order_by_reference().times(1).returning(|r| {
        let mut o = stored_order(1, "user-1", 1500.0);
        o.payment_reference = Some(r.to_string());
        Ok(Some(o))
    });
    store.expect_mark_order_paid().times(1).returning(|id| {
        let mut o = stored_order(id, "user-1", 1500.0);
        o.payment_reference = Some("ref-1".to_string());
        o.payment_status = PaymentStatus::Paid;
        o.order_status = ORDER_STATUS_PREPARING.to_string();
        Ok(o)
    });
    store.expect_clear_cart_for_user().times(1).returning(|_| Ok(()));
    let mut gateway = MockGateway::new();
    gateway.expect_verify_transaction().times(1).returning(|_| Ok(VerificationStatus::Success));
    let token = issue_token("a@b.com");
    let (status, body) = post_request(
        &token,
        "/api/orders/verify",
        json!({"reference": "ref-1"}),
        configure(store, MockDb::new(), gateway),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let response: Value = serde_json::from_str(&body).expect("invalid response body");
    assert_eq!(response["success"], true);
}

#[actix_web::test]
async fn verify_payment_for_an_unknown_reference_is_not_found() {
    let mut store = MockDb::new();
    store.expect_fetch_order_by_reference().times(1).returning(|_| Ok(None));
    let token = issue_token("a@b.com");
    let (status, _) = post_request(
        &token,
        "/api/orders/verify",
        json!({"reference": "no-such-ref"}),
        configure(store, MockDb::new(), MockGateway::new()),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn verify_payment_reported_unsuccessful_is_payment_required() {
    let mut store = MockDb::new();
    store.expect_fetch_order_by_reference().times(1).returning(|r| {
        let mut o = stored_order(1, "user-1", 1500.0);
        o.payment_reference = Some(r.to_string());
        Ok(Some(o))
    });
    store.expect_mark_order_paid().times(0);
    store.expect_clear_cart_for_user().times(0);
    let mut gateway = MockGateway::new();
    gateway.expect_verify_transaction().times(1).returning(|_| Ok(VerificationStatus::Other("abandoned".to_string())));
    let token = issue_token("a@b.com");
    let (status, _) = post_request(
        &token,
        "/api/orders/verify",
        json!({"reference": "ref-1"}),
        configure(store, MockDb::new(), gateway),
    )
    .await;
    assert_eq!(status, StatusCode::PAYMENT_REQUIRED);
}

#[actix_web::test]
async fn my_orders_lists_the_callers_orders() {
    let mut store = MockDb::new();
    store.expect_fetch_orders_for_user().times(1).returning(|user_id| {
        Ok(vec![stored_order(1, user_id.as_str(), 100.0), stored_order(2, user_id.as_str(), 250.5)])
    });
    let token = issue_token("a@b.com");
    let (status, body) =
        get_request(&token, "/api/orders", configure(store, accounts_resolving("user-1"), MockGateway::new())).await;
    assert_eq!(status, StatusCode::OK);
    let orders: Value = serde_json::from_str(&body).expect("invalid response body");
    let orders = orders.as_array().expect("expected an array");
    assert_eq!(orders.len(), 2);
    assert!(orders.iter().all(|o| o["user_id"] == "user-1"));
}

#[actix_web::test]
async fn my_orders_without_a_token_is_unauthorized() {
    let (status, _) = get_request("", "/api/orders", configure(MockDb::new(), MockDb::new(), MockGateway::new())).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn all_orders_needs_no_credentials() {
    let mut store = MockDb::new();
    store
        .expect_fetch_all_orders()
        .times(1)
        .returning(|| Ok(vec![stored_order(1, "user-1", 100.0), stored_order(2, "user-2", 200.0)]));
    let (status, body) = get_request("", "/api/orders/all", configure(store, MockDb::new(), MockGateway::new())).await;
    assert_eq!(status, StatusCode::OK);
    let orders: Value = serde_json::from_str(&body).expect("invalid response body");
    assert_eq!(orders.as_array().expect("expected an array").len(), 2);
}

#[actix_web::test]
async fn status_updates_need_no_credentials_and_overwrite() {
    let mut store = MockDb::new();
    store.expect_update_order_status().times(1).returning(|id, status| {
        let mut o = stored_order(id, "user-1", 100.0);
        o.order_status = status.to_string();
        Ok(o)
    });
    let (status, body) =
        patch_request("", "/api/orders/status/5?status=delivered", configure(store, MockDb::new(), MockGateway::new()))
            .await;
    assert_eq!(status, StatusCode::OK);
    let response: Value = serde_json::from_str(&body).expect("invalid response body");
    assert_eq!(response["success"], true);
    assert!(response["message"].as_str().unwrap().contains("delivered"));
}

#[actix_web::test]
async fn status_update_for_a_missing_order_is_not_found() {
    let mut store = MockDb::new();
    store.expect_update_order_status().times(1).returning(|id, _| Err(OrderStoreError::OrderNotFound(id)));
    let (status, _) =
        patch_request("", "/api/orders/status/999?status=delivered", configure(store, MockDb::new(), MockGateway::new()))
            .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn deleting_an_order_returns_no_content() {
    let mut store = MockDb::new();
    store.expect_delete_order_by_id().times(1).returning(|_| Ok(()));
    let token = issue_token("a@b.com");
    let (status, _) = delete_request(&token, "/api/orders/5", configure(store, MockDb::new(), MockGateway::new())).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[actix_web::test]
async fn deleting_an_order_without_a_token_is_unauthorized() {
    let (status, _) =
        delete_request("", "/api/orders/5", configure(MockDb::new(), MockDb::new(), MockGateway::new())).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
