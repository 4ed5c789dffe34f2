use axum::{
    extract::{Extension, Query, State},
    response::{IntoResponse, Response},
    Json,
};
use axum_extra::extract::CookieJar;
use log::{debug, info};
use serde_json::json;

use wedding_shared::auth::session_cookie;
use wedding_shared::models::{Event, GuestPayload};
use wedding_shared::payload::{build_guest_payload, resolve_guest_row, rsvp_list_view};
use wedding_shared::reconcile::reconcile_rsvps;
use wedding_shared::store::SheetStore;

use crate::error::{AppError, Result};
use crate::models::{EventQuery, RsvpPutRequest};
use crate::state::AppState;

fn parse_event(query: &EventQuery) -> Result<Event> {
    Event::parse(&query.event).ok_or_else(|| AppError::bad_request("Invalid event type".into()))
}

// GET /api/rsvp?event=wedding|rehearsal
//
// Reads go back to the sheet: the guest is re-resolved against a fresh
// snapshot and the credential re-issued. When resolution fails the
// credential's own lists are served unchanged, without a cookie refresh.
pub async fn get_rsvp<S>(
    State(state): State<AppState<S>>,
    Extension(guest): Extension<GuestPayload>,
    Query(query): Query<EventQuery>,
    jar: CookieJar,
) -> Result<Response>
where
    S: SheetStore,
{
    let event = parse_event(&query)?;
    let rows = state.store.fetch_rows().await?;

    let Some(row_index) = resolve_guest_row(&rows, &guest) else {
        debug!(
            "Could not re-resolve '{}' against {} rows, serving token view",
            guest.full_name,
            rows.len()
        );
        if event.requires_invitation() && guest.rehearsal_guests.is_empty() {
            return Err(AppError::forbidden("Not invited to rehearsal dinner".into()));
        }
        return Ok(Json(rsvp_list_view(&guest, event)).into_response());
    };

    let fresh = build_guest_payload(&rows, row_index);
    let token = state.codec.sign(&fresh)?;
    let jar = jar.add(session_cookie(token, state.secure_cookies));

    // The invite gate applies to the fresh view too, but the session
    // itself is fine, so the refreshed cookie still goes out.
    if event.requires_invitation() && fresh.rehearsal_guests.is_empty() {
        return Ok((
            jar,
            AppError::forbidden("Not invited to rehearsal dinner".into()),
        )
            .into_response());
    }

    Ok((jar, Json(rsvp_list_view(&fresh, event))).into_response())
}

// PUT /api/rsvp?event=wedding|rehearsal
//
// Writes trust the verified credential: edits reconcile against its
// invitee list, land on the sheet in one batch, and come back inside a
// re-issued credential. No row re-read happens here.
pub async fn put_rsvp<S>(
    State(state): State<AppState<S>>,
    Extension(guest): Extension<GuestPayload>,
    Query(query): Query<EventQuery>,
    jar: CookieJar,
    Json(request): Json<RsvpPutRequest>,
) -> Result<(CookieJar, Json<serde_json::Value>)>
where
    S: SheetStore,
{
    let event = parse_event(&query)?;
    let mut guest = guest;

    let outcome = reconcile_rsvps(
        event,
        guest.event_guests(event),
        &guest.individual_details,
        &request.rsvp_list,
    )?;

    info!(
        "Reconciled {} edits for {}: {} cell writes",
        request.rsvp_list.len(),
        event.as_str(),
        outcome.writes.len()
    );
    state.store.batch_update(&outcome.writes).await?;

    guest.set_event_guests(event, outcome.updated);
    for detail in guest.individual_details.iter_mut() {
        if let Some(dietary) = outcome.dietary_by_row.get(&detail.row_index) {
            detail.dietary = dietary.clone();
        }
    }

    let token = state.codec.sign(&guest)?;
    let list = rsvp_list_view(&guest, event);
    let jar = jar.add(session_cookie(token.clone(), state.secure_cookies));
    Ok((
        jar,
        Json(json!({
            "success": true,
            "guest": guest,
            "token": token,
            "rsvpList": list,
        })),
    ))
}
