use std::time::Duration;

use actix_web::{dev::Server, http::KeepAlive, middleware::Logger, web, App, HttpServer};
use order_payment_engine::{traits::PaymentGateway, AccountApi, OrderFlowApi, SqliteDatabase};

use crate::{
    auth::TokenVerifier,
    config::ServerConfig,
    errors::ServerError,
    integrations::PaystackGateway,
    routes::{all_orders, create_order, delete_order, health, my_orders, update_order_status, verify_payment},
};

pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    let db = SqliteDatabase::new_with_url(&config.database_url, 25)
        .await
        .map_err(|e| ServerError::InitializeError(e.to_string()))?;
    let gateway = PaystackGateway::new(config.paystack.clone())?;
    let srv = create_server_instance(config, db, gateway)?;
    srv.await.map_err(|e| ServerError::BackendError(e.to_string()))
}

pub fn create_server_instance<G>(config: ServerConfig, db: SqliteDatabase, gateway: G) -> Result<Server, ServerError>
where G: PaymentGateway + Clone + Send + 'static
{
    let host = config.host.clone();
    let port = config.port;
    let srv = HttpServer::new(move || {
        let orders_api = OrderFlowApi::new(db.clone(), gateway.clone());
        let accounts_api = AccountApi::new(db.clone());
        let verifier = TokenVerifier::new(&config.auth);
        App::new()
            .wrap(Logger::new("%t (%D ms) %s %a %{Host}i %U").log_target("ops::access_log"))
            .app_data(web::Data::new(orders_api))
            .app_data(web::Data::new(accounts_api))
            .app_data(web::Data::new(verifier))
            .service(health)
            .service(
                web::scope("/api/orders")
                    .route("/create", web::post().to(create_order::<SqliteDatabase, G>))
                    .route("/verify", web::post().to(verify_payment::<SqliteDatabase, G>))
                    // The /all and /status routes are the privileged tier: they carry no ownership check, and the
                    // storefront exposes them without credentials.
                    .route("/all", web::get().to(all_orders::<SqliteDatabase, G>))
                    .route("/status/{order_id}", web::patch().to(update_order_status::<SqliteDatabase, G>))
                    .route("", web::get().to(my_orders::<SqliteDatabase, G>))
                    .route("/{order_id}", web::delete().to(delete_order::<SqliteDatabase, G>)),
            )
    })
    .keep_alive(KeepAlive::Timeout(Duration::from_secs(600)))
    .bind((host.as_str(), port))?
    .run();
    Ok(srv)
}
