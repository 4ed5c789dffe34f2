use axum::{
    extract::{Extension, State},
    Json,
};
use axum_extra::extract::CookieJar;
use log::{error, info};
use serde_json::json;

use wedding_shared::auth::{clear_session_cookie, session_cookie, AUTH_COOKIE};
use wedding_shared::models::GuestPayload;
use wedding_shared::payload::{build_guest_payload, find_login_row};
use wedding_shared::store::SheetStore;

use crate::error::{AppError, Result};
use crate::models::{LoginRequest, RefreshRequest};
use crate::state::AppState;

// POST /api/auth/login
pub async fn login<S>(
    State(state): State<AppState<S>>,
    jar: CookieJar,
    Json(request): Json<LoginRequest>,
) -> Result<(CookieJar, Json<serde_json::Value>)>
where
    S: SheetStore,
{
    let full_name = request.full_name.unwrap_or_default();
    let postal_code = request.postal_code.unwrap_or_default();
    if full_name.trim().is_empty() || postal_code.trim().is_empty() {
        return Err(AppError::bad_request("Missing required fields".into()));
    }

    let rows = state.store.fetch_rows().await?;
    if rows.is_empty() {
        error!("Guest sheet returned no rows");
        return Err(AppError::internal_server_error("No data found".into()));
    }

    let Some(row_index) = find_login_row(&rows, &full_name, &postal_code) else {
        info!("Login rejected: no row matches the supplied identity");
        return Err(AppError::unauthorized("Invalid credentials".into()));
    };

    let guest = build_guest_payload(&rows, row_index);
    let token = state.codec.sign(&guest)?;
    info!(
        "Login succeeded for group '{}' (row {})",
        guest.invitation_group, row_index
    );

    let jar = jar.add(session_cookie(token.clone(), state.secure_cookies));
    Ok((jar, Json(json!({ "guest": guest, "token": token }))))
}

// POST /api/auth/logout
pub async fn logout(jar: CookieJar) -> (CookieJar, Json<serde_json::Value>) {
    (
        jar.add(clear_session_cookie()),
        Json(json!({ "ok": true })),
    )
}

// GET /api/me
pub async fn me<S>(
    State(state): State<AppState<S>>,
    jar: CookieJar,
) -> Json<serde_json::Value>
where
    S: SheetStore,
{
    let guest = jar
        .get(AUTH_COOKIE)
        .and_then(|cookie| state.codec.verify(cookie.value()).ok());
    Json(json!({ "guest": guest }))
}

// POST /api/auth/refresh
pub async fn refresh<S>(
    State(state): State<AppState<S>>,
    Extension(guest): Extension<GuestPayload>,
    jar: CookieJar,
    body: Option<Json<RefreshRequest>>,
) -> Result<(CookieJar, Json<serde_json::Value>)>
where
    S: SheetStore,
{
    let mut guest = guest;
    if let Some(Json(update)) = body {
        if let Some(first_name) = update.first_name {
            guest.first_name = first_name;
        }
        if let Some(last_name) = update.last_name {
            guest.last_name = last_name;
        }
    }

    let token = state.codec.sign(&guest)?;
    let jar = jar.add(session_cookie(token.clone(), state.secure_cookies));
    Ok((jar, Json(json!({ "guest": guest, "token": token }))))
}
