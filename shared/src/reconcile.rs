//! Merges client RSVP edits into staged sheet writes and an updated
//! invitee list, without re-reading the store.

use std::collections::HashMap;

use serde::Deserialize;
use thiserror::Error;

use crate::models::{col_letter, CellWrite, Event, EventGuest, IndividualDetail, RsvpAnswer};
use crate::normalize::{clean_dietary, normalize_name};

/// One entry of a PUT rsvp body. `row_index` is the authoritative join
/// key; the name is only consulted when the index is absent. A present
/// `dietary` (even "") is an instruction to write; an absent one leaves
/// the stored note alone.
#[derive(Debug, Clone, Deserialize)]
pub struct RsvpEdit {
    #[serde(rename = "rowIndex")]
    pub row_index: Option<usize>,
    #[serde(rename = "fullName")]
    pub full_name: Option<String>,
    #[serde(default)]
    pub rsvp: RsvpAnswer,
    pub dietary: Option<String>,
}

/// Result of a name-fallback row lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowMatch {
    Found(usize),
    Ambiguous,
    NotFound,
}

/// Resolves a display name against the group's individual details.
/// Two rows sharing a normalized name is a real situation in family
/// groups, so a multiple hit is reported instead of guessed at.
pub fn match_individual_by_name(individuals: &[IndividualDetail], name: &str) -> RowMatch {
    let needle = normalize_name(name);
    let mut hits = individuals
        .iter()
        .filter(|detail| normalize_name(&detail.full_name) == needle);
    match (hits.next(), hits.next()) {
        (Some(detail), None) => RowMatch::Found(detail.row_index),
        (Some(_), Some(_)) => RowMatch::Ambiguous,
        (None, _) => RowMatch::NotFound,
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("not invited")]
pub struct NotInvited;

/// What a reconciliation run produced: the invitee list with canonical
/// answers applied, the writes to commit in one batch, and dietary notes
/// keyed by row for patching the credential.
#[derive(Debug, Default)]
pub struct ReconcileOutcome {
    pub updated: Vec<EventGuest>,
    pub writes: Vec<CellWrite>,
    pub dietary_by_row: HashMap<usize, String>,
}

/// Applies `edits` to the event's current invitee list.
///
/// Invitation gating happens before anything is staged: a rehearsal
/// reconciliation with an empty invitee list refuses outright. Entries
/// with no matching edit pass through untouched and produce no writes.
pub fn reconcile_rsvps(
    event: Event,
    current: &[EventGuest],
    individuals: &[IndividualDetail],
    edits: &[RsvpEdit],
) -> Result<ReconcileOutcome, NotInvited> {
    if event.requires_invitation() && current.is_empty() {
        return Err(NotInvited);
    }

    let mut outcome = ReconcileOutcome {
        updated: current.to_vec(),
        ..Default::default()
    };

    for guest in outcome.updated.iter_mut() {
        let Some(edit) = edits.iter().find(|edit| edit_matches(edit, guest)) else {
            continue;
        };
        guest.rsvp = edit.rsvp;
        outcome.writes.push(CellWrite::cell(
            event.rsvp_column_letter(),
            guest.row_index,
            guest.rsvp.as_sheet_str(),
        ));
        if let Some(raw) = &edit.dietary {
            outcome.writes.push(CellWrite::cell(
                col_letter::DIETARY,
                guest.row_index,
                clean_dietary(raw),
            ));
        }
    }

    // Dietary notes can name any group member, not just this event's
    // invitees; resolved rows patch the credential's details.
    for edit in edits {
        let Some(raw) = &edit.dietary else { continue };
        let row_index = match edit.row_index {
            Some(index) => Some(index),
            None => match edit.full_name.as_deref() {
                Some(name) => match match_individual_by_name(individuals, name) {
                    RowMatch::Found(index) => Some(index),
                    _ => None,
                },
                None => None,
            },
        };
        if let Some(index) = row_index {
            outcome.dietary_by_row.insert(index, clean_dietary(raw));
        }
    }

    Ok(outcome)
}

fn edit_matches(edit: &RsvpEdit, guest: &EventGuest) -> bool {
    match edit.row_index {
        Some(index) => index == guest.row_index,
        None => match edit.full_name.as_deref() {
            Some(name) => normalize_name(name) == normalize_name(&guest.full_name),
            None => false,
        },
    }
}
