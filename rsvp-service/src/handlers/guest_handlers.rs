use axum::{
    extract::{Extension, State},
    Json,
};
use axum_extra::extract::CookieJar;
use chrono::Utc;
use log::{info, warn};
use serde_json::json;

use wedding_shared::auth::session_cookie;
use wedding_shared::models::{col_letter, AddressUpdate, CellWrite, GuestPayload};
use wedding_shared::reconcile::{match_individual_by_name, RowMatch};
use wedding_shared::store::SheetStore;

use crate::error::{AppError, Result};
use crate::models::GuestDetailsRequest;
use crate::state::AppState;

// POST /api/updateGuestDetails
//
// Household fields fan out to every row of the invitation group and land
// in the audit sheet; per-person fields write only the addressed row.
// The logged-in guest's own display names follow a self edit, but the
// credential's fullName is the login identity and never changes here.
pub async fn update_guest_details<S>(
    State(state): State<AppState<S>>,
    Extension(guest): Extension<GuestPayload>,
    jar: CookieJar,
    Json(request): Json<GuestDetailsRequest>,
) -> Result<(CookieJar, Json<serde_json::Value>)>
where
    S: SheetStore,
{
    let mut guest = guest;
    let mut writes: Vec<CellWrite> = Vec::new();

    if request.has_household_fields() {
        let update = AddressUpdate {
            invitation_group: guest.invitation_group.clone(),
            address: request.address.clone().unwrap_or_default(),
            city: request.city.clone().unwrap_or_default(),
            province: request.province.clone().unwrap_or_default(),
            country: request.country.clone().unwrap_or_default(),
            postal_code: request.postal_code.clone().unwrap_or_default(),
            email: request.email.clone().unwrap_or_default(),
            updated_at: Utc::now().to_rfc3339(),
        };
        state.store.append_address_update(&update).await?;

        let household = vec![
            update.address.clone(),
            update.city.clone(),
            update.province.clone(),
            update.country.clone(),
            update.postal_code.clone(),
            update.email.clone(),
        ];
        for member in &guest.wedding_guests {
            writes.push(CellWrite::span(
                col_letter::ADDRESS,
                col_letter::EMAIL,
                member.row_index,
                household.clone(),
            ));
        }
        info!(
            "Household update for group '{}' touches {} rows",
            guest.invitation_group,
            guest.wedding_guests.len()
        );
    }

    for person in &request.individuals {
        let row_index = match person.row_index {
            Some(index) => {
                // A credential only authorizes rows it actually carries.
                if guest.individual_details.iter().any(|d| d.row_index == index) {
                    Some(index)
                } else {
                    warn!("Skipping edit for row {} outside the invitation group", index);
                    None
                }
            }
            None => match person.full_name.as_deref() {
                Some(name) => match match_individual_by_name(&guest.individual_details, name) {
                    RowMatch::Found(index) => Some(index),
                    RowMatch::Ambiguous => return Err(AppError::ambiguous_match(name)),
                    RowMatch::NotFound => None,
                },
                None => None,
            },
        };
        let Some(row_index) = row_index else { continue };

        let first_name = person.first_name.as_ref().map(|v| v.trim().to_string());
        let last_name = person.last_name.as_ref().map(|v| v.trim().to_string());
        let phone = person.phone.as_ref().map(|v| v.trim().to_string());

        if let Some(value) = &first_name {
            writes.push(CellWrite::cell(col_letter::FIRST_NAME, row_index, value.clone()));
        }
        if let Some(value) = &last_name {
            writes.push(CellWrite::cell(col_letter::LAST_NAME, row_index, value.clone()));
        }
        if let Some(value) = &phone {
            writes.push(CellWrite::cell(col_letter::PHONE, row_index, value.clone()));
        }

        if let Some(detail) = guest
            .individual_details
            .iter_mut()
            .find(|d| d.row_index == row_index)
        {
            if let Some(value) = &first_name {
                detail.first_name = Some(value.clone());
            }
            if let Some(value) = &last_name {
                detail.last_name = Some(value.clone());
            }
            if let Some(value) = &phone {
                detail.phone = value.clone();
            }
        }
        if row_index == guest.row_index {
            if let Some(value) = first_name {
                guest.first_name = value;
            }
            if let Some(value) = last_name {
                guest.last_name = value;
            }
        }
    }

    state.store.batch_update(&writes).await?;

    let token = state.codec.sign(&guest)?;
    let jar = jar.add(session_cookie(token.clone(), state.secure_cookies));
    Ok((
        jar,
        Json(json!({ "success": true, "token": token, "guest": guest })),
    ))
}
