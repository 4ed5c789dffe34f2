mod guest_handlers_test;

use std::sync::Arc;

use axum::{http::StatusCode, Router};
use serde_json::json;
use tower::ServiceExt;

use wedding_shared::auth::{create_test_request, SessionCodec};
use wedding_shared::test_utils::fixtures::sample_rows;
use wedding_shared::test_utils::http_test_utils::session_token;
use wedding_shared::test_utils::mock_sheet_store::MockSheetStore;
use wedding_shared::test_utils::test_logging::init_test_logging;

use crate::routes::create_router_with_store;

const TEST_SECRET: &str = "test-secret";

/// Test app over the sample guest list.
fn create_test_app() -> (Router, Arc<MockSheetStore>) {
    init_test_logging();
    let store = Arc::new(MockSheetStore::with_rows(sample_rows()));
    let app = create_router_with_store(store.clone(), SessionCodec::new(TEST_SECRET), false);
    (app, store)
}

/// Test app over a store that fails every call.
fn create_failing_app() -> Router {
    init_test_logging();
    let store = Arc::new(MockSheetStore::failing());
    create_router_with_store(store, SessionCodec::new(TEST_SECRET), false)
}

/// Logs in as the named guest and returns the session token.
async fn login_as(app: &Router, full_name: &str, postal_code: &str) -> String {
    let response = app
        .clone()
        .oneshot(create_test_request(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({ "fullName": full_name, "postalCode": postal_code })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    session_token(&response).expect("login should set the session cookie")
}
