use axum::http::StatusCode;
use serde_json::json;
use tower::ServiceExt;

use wedding_shared::auth::create_test_request;
use wedding_shared::models::col;
use wedding_shared::test_utils::http_test_utils::{response_to_json, session_token};

use super::{create_test_app, login_as};

#[tokio::test]
async fn update_details_requires_a_session() {
    let (app, _store) = create_test_app();

    let response = app
        .oneshot(create_test_request(
            "POST",
            "/api/updateGuestDetails",
            None,
            Some(json!({ "address": "99 King St" })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn household_update_fans_out_and_lands_in_the_audit_sheet() {
    let (app, store) = create_test_app();
    let token = login_as(&app, "John Smith", "M5V 2T6").await;

    let response = app
        .oneshot(create_test_request(
            "POST",
            "/api/updateGuestDetails",
            Some(&token),
            Some(json!({
                "address": "99 King St",
                "city": "Toronto",
                "province": "ON",
                "country": "Canada",
                "postalCode": "M4C 1A1",
                "email": "smiths@example.com"
            })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(session_token(&response).is_some());
    let body = response_to_json(response).await;
    assert_eq!(body["success"], true);

    let audits = store.recorded_address_updates().await;
    assert_eq!(audits.len(), 1);
    assert_eq!(audits[0].invitation_group, "smith");
    assert_eq!(audits[0].address, "99 King St");
    assert_eq!(audits[0].postal_code, "M4C 1A1");
    assert!(!audits[0].updated_at.is_empty());

    // Both smith rows get the same span; it stops at column M because
    // phone is per-person and never fans out.
    let writes = store.recorded_writes().await;
    let ranges: Vec<&str> = writes.iter().map(|w| w.range.as_str()).collect();
    assert_eq!(ranges, vec!["H2:M2", "H3:M3"]);
    assert_eq!(writes[0].values.len(), 6);

    let rows = store.rows().await;
    assert_eq!(rows[0].get(col::POSTAL_CODE), "M4C 1A1");
    assert_eq!(rows[1].get(col::ADDRESS), "99 King St");
    assert_eq!(rows[0].get(col::PHONE), "416-555-0100");
}

#[tokio::test]
async fn person_edit_writes_only_the_addressed_row() {
    let (app, store) = create_test_app();
    let token = login_as(&app, "John Smith", "M5V 2T6").await;

    let response = app
        .oneshot(create_test_request(
            "POST",
            "/api/updateGuestDetails",
            Some(&token),
            Some(json!({
                "individuals": [{
                    "rowIndex": 1,
                    "firstName": "Anne",
                    "lastName": "Smith-Jones",
                    "phone": "416-555-0199"
                }]
            })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let writes = store.recorded_writes().await;
    let ranges: Vec<&str> = writes.iter().map(|w| w.range.as_str()).collect();
    assert_eq!(ranges, vec!["C3", "D3", "N3"]);

    let rows = store.rows().await;
    assert_eq!(rows[1].get(col::FIRST_NAME), "Anne");
    assert_eq!(rows[1].get(col::PHONE), "416-555-0199");

    let body = response_to_json(response).await;
    let details = body["guest"]["individualDetails"].as_array().unwrap();
    let ann = details.iter().find(|d| d["rowIndex"] == 1).unwrap();
    assert_eq!(ann["firstName"], "Anne");
    assert_eq!(ann["phone"], "416-555-0199");
    // Editing another group member leaves the session holder alone.
    assert_eq!(body["guest"]["firstName"], "John");
}

#[tokio::test]
async fn person_can_be_matched_by_unambiguous_name() {
    let (app, store) = create_test_app();
    let token = login_as(&app, "John Smith", "M5V 2T6").await;

    let response = app
        .oneshot(create_test_request(
            "POST",
            "/api/updateGuestDetails",
            Some(&token),
            Some(json!({
                "individuals": [{ "fullName": "ann smith", "phone": "647-555-0123" }]
            })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let writes = store.recorded_writes().await;
    assert_eq!(writes.len(), 1);
    assert_eq!(writes[0].range, "N3");
    assert_eq!(writes[0].values, vec!["647-555-0123".to_string()]);
}

#[tokio::test]
async fn ambiguous_person_name_is_rejected() {
    let (app, store) = create_test_app();
    let token = login_as(&app, "Kim Lee", "K1A 0A1").await;

    let response = app
        .oneshot(create_test_request(
            "POST",
            "/api/updateGuestDetails",
            Some(&token),
            Some(json!({
                "individuals": [{ "fullName": "Pat Lee", "firstName": "Patrick" }]
            })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response_to_json(response).await;
    assert_eq!(
        body["error"],
        "Ambiguous match for \"Pat Lee\". Send rowIndex for each person."
    );
    assert!(store.recorded_writes().await.is_empty());
}

#[tokio::test]
async fn rows_outside_the_group_are_skipped() {
    let (app, store) = create_test_app();
    let token = login_as(&app, "John Smith", "M5V 2T6").await;

    // Row 3 belongs to the lee group; John's credential does not carry it.
    let response = app
        .oneshot(create_test_request(
            "POST",
            "/api/updateGuestDetails",
            Some(&token),
            Some(json!({
                "individuals": [{ "rowIndex": 3, "phone": "555-0000" }]
            })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(store.recorded_writes().await.is_empty());

    let rows = store.rows().await;
    assert_eq!(rows[3].get(col::PHONE), "");
}

#[tokio::test]
async fn self_edit_updates_the_credential_display_names() {
    let (app, store) = create_test_app();
    let token = login_as(&app, "John Smith", "M5V 2T6").await;

    let response = app
        .oneshot(create_test_request(
            "POST",
            "/api/updateGuestDetails",
            Some(&token),
            Some(json!({
                "individuals": [{ "rowIndex": 0, "firstName": "Jon" }]
            })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let writes = store.recorded_writes().await;
    assert_eq!(writes.len(), 1);
    assert_eq!(writes[0].range, "C2");

    let body = response_to_json(response).await;
    assert_eq!(body["guest"]["firstName"], "Jon");
    // The login identity never follows display-name edits.
    assert_eq!(body["guest"]["fullName"], "john smith");
}

#[tokio::test]
async fn household_and_person_edits_combine_in_one_request() {
    let (app, store) = create_test_app();
    let token = login_as(&app, "Kim Lee", "K1A 0A1").await;

    let response = app
        .oneshot(create_test_request(
            "POST",
            "/api/updateGuestDetails",
            Some(&token),
            Some(json!({
                "address": "7 Oak Ave",
                "city": "Ottawa",
                "province": "ON",
                "country": "Canada",
                "postalCode": "K2P 1L4",
                "email": "lees@example.com",
                "individuals": [{ "rowIndex": 5, "phone": "613-555-0142" }]
            })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(store.recorded_address_updates().await.len(), 1);

    // Four lee rows fan out, then Kim's phone lands on its own row.
    let writes = store.recorded_writes().await;
    let ranges: Vec<&str> = writes.iter().map(|w| w.range.as_str()).collect();
    assert_eq!(ranges, vec!["H5:M5", "H6:M6", "H7:M7", "H8:M8", "N7"]);

    let rows = store.rows().await;
    assert_eq!(rows[6].get(col::ADDRESS), "7 Oak Ave");
    assert_eq!(rows[5].get(col::PHONE), "613-555-0142");
}
