use std::{future::ready, future::Ready, time::Duration};

use actix_web::{dev::Payload, http::header::AUTHORIZATION, web, FromRequest, HttpRequest};
use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::{
    config::AuthConfig,
    errors::{AuthError, ServerError},
};

/// The claims carried by an access token. `sub` is the email address the caller's account is registered under; the
/// order subsystem resolves it to a stable account id per request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JwtClaims {
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

/// Signs access tokens. Token issuance itself (login) lives outside this service; the issuer is shared so that
/// operators and tests can mint tokens against the same secret the server verifies with.
pub struct TokenIssuer {
    key: EncodingKey,
}

impl TokenIssuer {
    pub fn new(config: &AuthConfig) -> Self {
        let key = EncodingKey::from_secret(config.jwt_secret.reveal().as_bytes());
        Self { key }
    }

    pub fn issue_token(&self, email: &str, duration: Option<Duration>) -> Result<String, AuthError> {
        let duration = duration.unwrap_or_else(|| Duration::from_secs(60 * 60 * 24));
        let now = Utc::now().timestamp();
        #[allow(clippy::cast_possible_wrap)]
        let claims = JwtClaims { sub: email.to_string(), iat: now, exp: now + duration.as_secs() as i64 };
        encode(&Header::new(Algorithm::HS256), &claims, &self.key)
            .map_err(|e| AuthError::ValidationError(e.to_string()))
    }
}

/// Validates bearer tokens on incoming requests.
#[derive(Clone)]
pub struct TokenVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    pub fn new(config: &AuthConfig) -> Self {
        let key = DecodingKey::from_secret(config.jwt_secret.reveal().as_bytes());
        let validation = Validation::new(Algorithm::HS256);
        Self { key, validation }
    }

    pub fn decode_token(&self, token: &str) -> Result<JwtClaims, AuthError> {
        decode::<JwtClaims>(token, &self.key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| AuthError::ValidationError(e.to_string()))
    }
}

impl FromRequest for JwtClaims {
    type Error = ServerError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(claims_from_request(req))
    }
}

fn claims_from_request(req: &HttpRequest) -> Result<JwtClaims, ServerError> {
    let verifier = req
        .app_data::<web::Data<TokenVerifier>>()
        .ok_or_else(|| ServerError::InitializeError("No token verifier is configured".to_string()))?;
    let header = req.headers().get(AUTHORIZATION).ok_or(AuthError::MissingToken)?;
    let value = header.to_str().map_err(|e| AuthError::PoorlyFormattedToken(e.to_string()))?;
    let token = value
        .strip_prefix("Bearer ")
        .ok_or_else(|| AuthError::PoorlyFormattedToken("Expected a bearer token".to_string()))?;
    let claims = verifier.decode_token(token.trim())?;
    debug!("💻️ Access token for {} validated", claims.sub);
    Ok(claims)
}

#[cfg(test)]
mod test {
    use super::*;

    fn config() -> AuthConfig {
        AuthConfig { jwt_secret: ops_common::Secret::new("a-test-signing-secret".to_string()) }
    }

    #[test]
    fn issued_tokens_round_trip() {
        let issuer = TokenIssuer::new(&config());
        let verifier = TokenVerifier::new(&config());
        let token = issuer.issue_token("a@b.com", None).expect("issue failed");
        let claims = verifier.decode_token(&token).expect("decode failed");
        assert_eq!(claims.sub, "a@b.com");
    }

    #[test]
    fn tampered_tokens_are_rejected() {
        let issuer = TokenIssuer::new(&config());
        let verifier = TokenVerifier::new(&config());
        let mut token = issuer.issue_token("a@b.com", None).expect("issue failed");
        token.replace_range(token.len() - 5.., "AAAAA");
        assert!(verifier.decode_token(&token).is_err());
    }

    #[test]
    fn expired_tokens_are_rejected() {
        let verifier = TokenVerifier::new(&config());
        let now = Utc::now().timestamp();
        let claims = JwtClaims { sub: "a@b.com".to_string(), iat: now - 7200, exp: now - 3600 };
        let key = EncodingKey::from_secret(config().jwt_secret.reveal().as_bytes());
        let token = encode(&Header::new(Algorithm::HS256), &claims, &key).expect("encode failed");
        assert!(verifier.decode_token(&token).is_err());
    }
}
