//! Request authentication.
//!
//! The auth service issues an HS256 JWT whose claims are an
//! [`AuthenticatedUser`]. The token is read from an `Authorization: Bearer`
//! header or, failing that, from the identity cookie. Requests without a
//! valid token get a 401 that points at the auth service's sign-in page.

use std::future::{Ready, ready};

use actix_identity::IdentityExt;
use actix_web::error::{ErrorInternalServerError, InternalError};
use actix_web::{FromRequest, HttpRequest, HttpResponse, dev::Payload, http::header, web};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};

use crate::domain::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;

/// Verifies a token and returns its claims.
pub fn decode_token(
    token: &str,
    secret: &str,
) -> Result<AuthenticatedUser, jsonwebtoken::errors::Error> {
    let data = decode::<AuthenticatedUser>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )?;
    Ok(data.claims)
}

/// Signs the user's claims.
pub fn encode_token(
    user: &AuthenticatedUser,
    secret: &str,
) -> Result<String, jsonwebtoken::errors::Error> {
    encode(
        &Header::default(),
        user,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

fn bearer_token(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|token| token.trim().to_string())
}

fn unauthorized(config: &ServerConfig, reason: &'static str) -> actix_web::Error {
    let response = HttpResponse::Unauthorized().json(serde_json::json!({
        "error": reason,
        "signin_url": config.auth_service_url,
    }));
    InternalError::from_response(reason, response).into()
}

fn authenticate(req: &HttpRequest) -> Result<AuthenticatedUser, actix_web::Error> {
    let config = req
        .app_data::<web::Data<ServerConfig>>()
        .ok_or_else(|| ErrorInternalServerError("server configuration is missing"))?;

    let token = bearer_token(req)
        .or_else(|| req.get_identity().ok().and_then(|identity| identity.id().ok()))
        .ok_or_else(|| unauthorized(config, "authentication required"))?;

    decode_token(&token, &config.secret).map_err(|err| {
        log::warn!("Rejected token: {err}");
        unauthorized(config, "invalid token")
    })
}

impl FromRequest for AuthenticatedUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req))
    }
}
