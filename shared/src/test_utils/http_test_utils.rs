use axum::body::to_bytes;
use axum::http::header::SET_COOKIE;
use axum::response::Response;
use serde_json::Value;

use crate::auth::AUTH_COOKIE;

/// Reads a response body to completion and parses it as JSON.
pub async fn response_to_json(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("failed to read response body");
    serde_json::from_slice(&bytes).expect("response body was not valid JSON")
}

/// Extracts the session token from a response's `Set-Cookie` header.
/// Returns `None` when no session cookie was set or it was cleared.
pub fn session_token(response: &Response) -> Option<String> {
    let header = response.headers().get(SET_COOKIE)?;
    let raw = header.to_str().ok()?;
    let value = raw.strip_prefix(AUTH_COOKIE)?.strip_prefix('=')?;
    let token = value.split(';').next().unwrap_or_default();
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}
