use axum::{
    extract::Request,
    handler::HandlerWithoutStateExt,
    middleware,
    routing::{get, post},
    Router,
};
use log::{info, warn};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;

use crate::handlers::{
    auth_handlers::{login, logout, me, refresh},
    guest_handlers::update_guest_details,
    rsvp_handlers::{get_rsvp, put_rsvp},
};
use crate::state::AppState;
use wedding_shared::config::Settings;
use wedding_shared::store::{sheets::GoogleSheetsStore, SheetStore};

// Import shared auth middleware
use wedding_shared::auth::{guard_pages, require_session, SessionCodec};

/// Directory the exported site is served from.
const STATIC_DIR: &str = "static";

/// Creates a router backed by the live spreadsheet
pub fn create_router(settings: &Settings) -> Router {
    info!("Creating router with Google Sheets store");

    let store = Arc::new(GoogleSheetsStore::new(
        settings.spreadsheet_id.clone(),
        settings.service_account.clone(),
    ));
    let codec = SessionCodec::new(&settings.jwt_secret);

    create_router_with_store(store, codec, settings.secure_cookies)
}

/// Creates a router with a given store implementation
pub fn create_router_with_store<S>(
    store: Arc<S>,
    codec: SessionCodec,
    secure_cookies: bool,
) -> Router
where
    S: SheetStore + 'static,
{
    info!("Setting up API routes");

    let state = AppState {
        store,
        codec: codec.clone(),
        secure_cookies,
    };

    // Configure CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Logging middleware to trace all requests
    async fn logging_middleware(
        req: Request,
        next: axum::middleware::Next,
    ) -> impl axum::response::IntoResponse {
        info!(
            "Router received request: method={}, uri={}",
            req.method(),
            req.uri()
        );
        next.run(req).await
    }

    // Routes that require a verified session credential
    let session_routes = Router::new()
        .route("/api/auth/refresh", post(refresh))
        .route("/api/rsvp", get(get_rsvp).put(put_rsvp))
        .route("/api/updateGuestDetails", post(update_guest_details))
        .layer(middleware::from_fn_with_state(
            codec.clone(),
            require_session,
        ))
        .with_state(state.clone());

    // Routes that establish or inspect a session
    let public_routes = Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/auth/logout", post(logout))
        .route("/api/me", get(me))
        .with_state(state);

    // Merge all API routes
    let api_routes = session_routes.merge(public_routes);

    // Everything that is not an API route falls through to the exported
    // site, with page access gated on the session cookie.
    async fn handle_404(req: Request) -> impl axum::response::IntoResponse {
        warn!("No route matched for: {} {}", req.method(), req.uri());
        (
            axum::http::StatusCode::NOT_FOUND,
            "The requested resource was not found".to_string(),
        )
    }
    let pages = ServeDir::new(STATIC_DIR).not_found_service(handle_404.into_service());

    let router = api_routes
        .fallback_service(pages)
        .layer(middleware::from_fn_with_state(codec, guard_pages))
        .layer(cors)
        .layer(middleware::from_fn(logging_middleware));

    info!("Router configured with all routes and middleware");

    router
}
