use actix_web::{
    http::{header, StatusCode},
    test,
    web,
    App,
};
use ops_common::Secret;

use crate::{
    auth::{TokenIssuer, TokenVerifier},
    config::AuthConfig,
};

pub fn test_auth_config() -> AuthConfig {
    AuthConfig { jwt_secret: Secret::new("endpoint-test-signing-secret".to_string()) }
}

pub fn issue_token(email: &str) -> String {
    TokenIssuer::new(&test_auth_config()).issue_token(email, None).expect("Could not issue test token")
}

async fn send_request<F>(req: test::TestRequest, token: &str, configure: F) -> (StatusCode, String)
where F: FnOnce(&mut web::ServiceConfig)
{
    let _ = env_logger::try_init();
    let verifier = TokenVerifier::new(&test_auth_config());
    let app = test::init_service(App::new().app_data(web::Data::new(verifier)).configure(configure)).await;
    let mut req = req;
    if !token.is_empty() {
        req = req.insert_header((header::AUTHORIZATION, format!("Bearer {token}")));
    }
    let res = test::call_service(&app, req.to_request()).await;
    let status = res.status();
    let body = test::read_body(res).await;
    (status, String::from_utf8_lossy(&body).to_string())
}

pub async fn get_request<F>(token: &str, path: &str, configure: F) -> (StatusCode, String)
where F: FnOnce(&mut web::ServiceConfig)
{
    send_request(test::TestRequest::get().uri(path), token, configure).await
}

pub async fn post_request<F>(token: &str, path: &str, body: serde_json::Value, configure: F) -> (StatusCode, String)
where F: FnOnce(&mut web::ServiceConfig)
{
    send_request(test::TestRequest::post().uri(path).set_json(body), token, configure).await
}

pub async fn patch_request<F>(token: &str, path: &str, configure: F) -> (StatusCode, String)
where F: FnOnce(&mut web::ServiceConfig)
{
    send_request(test::TestRequest::patch().uri(path), token, configure).await
}

pub async fn delete_request<F>(token: &str, path: &str, configure: F) -> (StatusCode, String)
where F: FnOnce(&mut web::ServiceConfig)
{
    send_request(test::TestRequest::delete().uri(path), token, configure).await
}
