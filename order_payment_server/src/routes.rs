//! Request handler definitions
//!
//! Define each route and its handler here.
//! Handlers that are more than a line or two MUST go into a separate module. Keep this module neat and tidy 🙏
//!
//! Handlers are generic over the storage backend and the gateway client, so the endpoint tests can run them against
//! mocks. The server registers them with the concrete Sqlite/Paystack types in [`crate::server`].

use actix_web::{get, web, HttpResponse, Responder};
use log::*;
use order_payment_engine::{
    traits::{AccountManagement, CartManagement, OrderManagement, PaymentGateway},
    AccountApi,
    OrderFlowApi,
};

use crate::{
    auth::JwtClaims,
    data_objects::{JsonResponse, OrderRequest, OrderResult, StatusUpdateParams, VerifyPaymentParams},
    errors::ServerError,
};

// ----------------------------------------------   Health  ----------------------------------------------------
#[get("/health")]
pub async fn health() -> impl Responder {
    trace!("💻️ Received health check request");
    HttpResponse::Ok().body("👍️\n")
}

// ----------------------------------------------   Orders  ----------------------------------------------------

/// Creates an order for the authenticated caller and initializes a gateway transaction for it.
///
/// The response carries the stored order plus the authorization URL the payer must be redirected to. The order's
/// owner is always the caller; the request body cannot name one.
pub async fn create_order<B, G>(
    claims: JwtClaims,
    api: web::Data<OrderFlowApi<B, G>>,
    accounts: web::Data<AccountApi<B>>,
    body: web::Json<OrderRequest>,
) -> Result<HttpResponse, ServerError>
where
    B: OrderManagement + CartManagement + AccountManagement,
    G: PaymentGateway,
{
    trace!("💻️ Received create order request from {}", claims.sub);
    let user_id = accounts.user_id_for_email(&claims.sub).await?;
    let new_order = body.into_inner().into_new_order(user_id);
    let (order, authorization_url) = api.create_order_with_payment(new_order).await?;
    let result = OrderResult::from(order).with_authorization_url(authorization_url);
    Ok(HttpResponse::Created().json(result))
}

/// Reconciles an order against the gateway, after the payer returns from the checkout page or the frontend polls.
pub async fn verify_payment<B, G>(
    claims: JwtClaims,
    api: web::Data<OrderFlowApi<B, G>>,
    body: web::Json<VerifyPaymentParams>,
) -> Result<HttpResponse, ServerError>
where
    B: OrderManagement + CartManagement,
    G: PaymentGateway,
{
    trace!("💻️ Received payment verification request from {} for [{}]", claims.sub, body.reference);
    let order = api.verify_payment(&body.reference).await?;
    Ok(HttpResponse::Ok().json(JsonResponse::success(format!("Payment for order #{} verified", order.id))))
}

/// The authenticated caller's own orders.
pub async fn my_orders<B, G>(
    claims: JwtClaims,
    api: web::Data<OrderFlowApi<B, G>>,
    accounts: web::Data<AccountApi<B>>,
) -> Result<HttpResponse, ServerError>
where
    B: OrderManagement + CartManagement + AccountManagement,
    G: PaymentGateway,
{
    trace!("💻️ Received my orders request from {}", claims.sub);
    let user_id = accounts.user_id_for_email(&claims.sub).await?;
    let orders = api.orders_for_user(&user_id).await?.into_iter().map(OrderResult::from).collect::<Vec<_>>();
    Ok(HttpResponse::Ok().json(orders))
}

/// Every order, irrespective of owner. An admin-style view: no ownership check applies here.
pub async fn all_orders<B, G>(api: web::Data<OrderFlowApi<B, G>>) -> Result<HttpResponse, ServerError>
where
    B: OrderManagement + CartManagement,
    G: PaymentGateway,
{
    trace!("💻️ Received all orders request");
    let orders = api.fetch_all_orders().await?.into_iter().map(OrderResult::from).collect::<Vec<_>>();
    Ok(HttpResponse::Ok().json(orders))
}

/// Deletes an order. Authenticated, but deliberately not restricted to the order's owner.
pub async fn delete_order<B, G>(
    claims: JwtClaims,
    api: web::Data<OrderFlowApi<B, G>>,
    path: web::Path<i64>,
) -> Result<HttpResponse, ServerError>
where
    B: OrderManagement + CartManagement,
    G: PaymentGateway,
{
    let order_id = path.into_inner();
    trace!("💻️ Received delete request for order #{order_id} from {}", claims.sub);
    api.remove_order(order_id).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Overwrites an order's status label with whatever the caller supplies. An admin-style operation: any string is
/// accepted and no transition legality is checked.
pub async fn update_order_status<B, G>(
    api: web::Data<OrderFlowApi<B, G>>,
    path: web::Path<i64>,
    params: web::Query<StatusUpdateParams>,
) -> Result<HttpResponse, ServerError>
where
    B: OrderManagement + CartManagement,
    G: PaymentGateway,
{
    let order_id = path.into_inner();
    trace!("💻️ Received status update for order #{order_id}");
    let order = api.update_order_status(order_id, &params.status).await?;
    Ok(HttpResponse::Ok().json(JsonResponse::success(format!(
        "Order #{} status set to '{}'",
        order.id, order.order_status
    ))))
}
