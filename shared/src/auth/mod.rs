//! Session credentials and the middleware that enforces them.
//!
//! The credential is an HS256 JWT carrying the whole guest payload, set
//! as an HttpOnly cookie. Handlers re-issue it on every state-changing
//! call, so a fresh `iat`/`exp` pair is minted each time; temporal claims
//! live only in the claims wrapper and never travel inside the payload.

use axum::{
    body::Body,
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
    Json,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use log::{debug, error, warn};
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;

use crate::models::GuestPayload;

/// Name of the session cookie.
pub const AUTH_COOKIE: &str = "auth";

/// Session lifetime in seconds.
pub const SESSION_TTL_SECS: i64 = 2 * 60 * 60;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("failed to sign session token")]
    Signing,
    #[error("invalid or expired session token")]
    ExpiredOrInvalid,
}

#[derive(Debug, Serialize, Deserialize)]
struct SessionClaims {
    #[serde(flatten)]
    guest: GuestPayload,
    iat: i64,
    exp: i64,
}

/// Signs and verifies session credentials with the configured secret.
#[derive(Clone)]
pub struct SessionCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl SessionCodec {
    pub fn new(secret: &str) -> Self {
        SessionCodec {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    /// Issues a fresh two-hour credential for the payload.
    pub fn sign(&self, guest: &GuestPayload) -> Result<String, SessionError> {
        let now = Utc::now().timestamp();
        let claims = SessionClaims {
            guest: guest.clone(),
            iat: now,
            exp: now + SESSION_TTL_SECS,
        };
        encode(&Header::default(), &claims, &self.encoding).map_err(|e| {
            error!("Failed to sign session token: {}", e);
            SessionError::Signing
        })
    }

    /// Checks integrity and expiry, returning the embedded payload.
    pub fn verify(&self, token: &str) -> Result<GuestPayload, SessionError> {
        let data = decode::<SessionClaims>(token, &self.decoding, &Validation::default())
            .map_err(|e| {
                debug!("Session token rejected: {}", e);
                SessionError::ExpiredOrInvalid
            })?;
        Ok(data.claims.guest)
    }
}

/// Builds the session cookie carrying a signed token.
pub fn session_cookie(token: String, secure: bool) -> Cookie<'static> {
    let mut cookie = Cookie::new(AUTH_COOKIE, token);
    cookie.set_http_only(true);
    cookie.set_same_site(SameSite::Lax);
    cookie.set_secure(secure);
    cookie.set_path("/");
    cookie.set_max_age(time::Duration::seconds(SESSION_TTL_SECS));
    cookie
}

/// Builds an immediately-expiring cookie that clears the session.
pub fn clear_session_cookie() -> Cookie<'static> {
    let mut cookie = Cookie::new(AUTH_COOKIE, "");
    cookie.set_http_only(true);
    cookie.set_same_site(SameSite::Lax);
    cookie.set_path("/");
    cookie.set_max_age(time::Duration::ZERO);
    cookie
}

/// Middleware for the API routes that need a logged-in guest. On success
/// the verified payload is inserted as a request extension.
pub async fn require_session(
    State(codec): State<SessionCodec>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    let Some(cookie) = jar.get(AUTH_COOKIE) else {
        warn!("Rejected {} {}: no session cookie", request.method(), request.uri().path());
        return unauthorized();
    };
    match codec.verify(cookie.value()) {
        Ok(guest) => {
            request.extensions_mut().insert(guest);
            next.run(request).await
        }
        Err(_) => {
            warn!(
                "Rejected {} {}: invalid session cookie",
                request.method(),
                request.uri().path()
            );
            unauthorized()
        }
    }
}

fn unauthorized() -> Response {
    (StatusCode::UNAUTHORIZED, Json(json!({ "error": "Unauthorized" }))).into_response()
}

/// Middleware for everything that is not an API call: guests without a
/// valid session are bounced to the login page, and a cookie that fails
/// verification is cleared on the way out.
pub async fn guard_pages(
    State(codec): State<SessionCodec>,
    jar: CookieJar,
    request: Request,
    next: Next,
) -> Response {
    if is_public_path(request.uri().path()) {
        return next.run(request).await;
    }
    let Some(cookie) = jar.get(AUTH_COOKIE) else {
        return Redirect::temporary("/login").into_response();
    };
    if codec.verify(cookie.value()).is_err() {
        debug!("Clearing stale session cookie on page request");
        let jar = jar.add(clear_session_cookie());
        return (jar, Redirect::temporary("/login")).into_response();
    }
    next.run(request).await
}

fn is_public_path(path: &str) -> bool {
    path == "/api"
        || path.starts_with("/api/")
        || path == "/login"
        || path.starts_with("/assets/")
        || path.starts_with("/images/")
        || path.starts_with("/fonts/")
        || path == "/favicon.ico"
}

/// Builds a request for handler tests, optionally carrying a session
/// cookie and a JSON body.
pub fn create_test_request(
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Request<Body> {
    let mut builder = axum::http::Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::COOKIE, format!("{}={}", AUTH_COOKIE, token));
    }
    let body = match body {
        Some(value) => Body::from(value.to_string()),
        None => Body::empty(),
    };
    builder.body(body).unwrap()
}
