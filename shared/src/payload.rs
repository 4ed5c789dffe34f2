//! Assembles the guest profile embedded in session credentials.

use crate::models::{
    col, Event, EventGuest, GuestPayload, GuestRow, IndividualDetail, RsvpAnswer, RsvpListEntry,
};
use crate::normalize::{is_truthy_flag, normalize_name, normalize_postal};

/// Finds the row matching a login attempt. Both sides of the comparison
/// are normalized, so spacing, case and accents never block a login.
pub fn find_login_row(rows: &[GuestRow], full_name: &str, postal_code: &str) -> Option<usize> {
    let name = normalize_name(full_name);
    let postal = normalize_postal(postal_code);
    rows.iter().position(|row| {
        normalize_name(row.get(col::FULL_NAME)) == name
            && normalize_postal(row.get(col::POSTAL_CODE)) == postal
    })
}

/// Re-resolves a verified session against a fresh row snapshot.
///
/// Rows move when the couple edits the sheet, so identity wins over the
/// remembered offset: name + postal first, then group key + rebuilt
/// first/last name, then the embedded row index while it is still in
/// bounds. `None` means the caller serves the credential's own data.
pub fn resolve_guest_row(rows: &[GuestRow], guest: &GuestPayload) -> Option<usize> {
    if let Some(found) = rows.iter().position(|row| {
        normalize_name(row.get(col::FULL_NAME)) == guest.full_name
            && normalize_postal(row.get(col::POSTAL_CODE)) == guest.postal_code
    }) {
        return Some(found);
    }

    if !guest.first_name.is_empty() && !guest.last_name.is_empty() {
        let rebuilt = normalize_name(&format!("{} {}", guest.first_name, guest.last_name));
        if let Some(found) = rows.iter().position(|row| {
            row.get(col::GROUP_KEY) == guest.invitation_group
                && normalize_name(row.get(col::FULL_NAME)) == rebuilt
        }) {
            return Some(found);
        }
    }

    if guest.row_index < rows.len() {
        return Some(guest.row_index);
    }
    None
}

/// Builds the full guest profile for the row at `row_index`.
///
/// The invitation group is every row sharing the anchor's trimmed group
/// key (blank keys therefore group together). The wedding list covers the
/// whole group; the rehearsal list filters on the invited flag; the
/// individual details always cover the whole group so dietary and phone
/// lookups work for everyone.
pub fn build_guest_payload(rows: &[GuestRow], row_index: usize) -> GuestPayload {
    let anchor = &rows[row_index];
    let group = anchor.get(col::GROUP_KEY).to_string();
    let members: Vec<usize> = rows
        .iter()
        .enumerate()
        .filter(|(_, row)| row.get(col::GROUP_KEY) == group)
        .map(|(index, _)| index)
        .collect();

    let event_guest = |index: usize, rsvp_col: usize| EventGuest {
        full_name: rows[index].get(col::FULL_NAME).to_string(),
        rsvp: RsvpAnswer::parse(rows[index].get(rsvp_col)),
        row_index: index,
    };

    let wedding_guests = members
        .iter()
        .map(|&index| event_guest(index, col::WEDDING_RSVP))
        .collect();
    let rehearsal_guests = members
        .iter()
        .filter(|&&index| is_truthy_flag(rows[index].get(col::REHEARSAL_INVITED)))
        .map(|&index| event_guest(index, col::REHEARSAL_RSVP))
        .collect();
    let individual_details = members
        .iter()
        .map(|&index| IndividualDetail {
            full_name: rows[index].get(col::FULL_NAME).to_string(),
            row_index: index,
            dietary: rows[index].get(col::DIETARY).to_string(),
            phone: rows[index].get(col::PHONE).to_string(),
            first_name: None,
            last_name: None,
        })
        .collect();

    let household_complete =
        (col::ADDRESS..=col::PHONE).all(|column| !anchor.get(column).is_empty());

    GuestPayload {
        full_name: normalize_name(anchor.get(col::FULL_NAME)),
        first_name: anchor.get(col::FIRST_NAME).to_string(),
        last_name: anchor.get(col::LAST_NAME).to_string(),
        postal_code: normalize_postal(anchor.get(col::POSTAL_CODE)),
        invitation_group: group,
        household_complete,
        row_index,
        wedding_guests,
        rehearsal_guests,
        individual_details,
    }
}

/// Joins an event's invitee list with dietary notes for the client view.
pub fn rsvp_list_view(guest: &GuestPayload, event: Event) -> Vec<RsvpListEntry> {
    guest
        .event_guests(event)
        .iter()
        .map(|entry| RsvpListEntry {
            full_name: entry.full_name.clone(),
            rsvp: entry.rsvp,
            dietary: guest.dietary_for_row(entry.row_index).to_string(),
            row_index: entry.row_index,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(
        group: &str,
        full_name: &str,
        first: &str,
        last: &str,
        postal: &str,
        wedding_rsvp: &str,
        rehearsal_invited: &str,
        rehearsal_rsvp: &str,
        dietary: &str,
    ) -> GuestRow {
        let mut cells = vec![String::new(); 29];
        cells[col::GROUP_KEY] = group.to_string();
        cells[col::FULL_NAME] = full_name.to_string();
        cells[col::FIRST_NAME] = first.to_string();
        cells[col::LAST_NAME] = last.to_string();
        cells[col::POSTAL_CODE] = postal.to_string();
        cells[col::WEDDING_RSVP] = wedding_rsvp.to_string();
        cells[col::REHEARSAL_INVITED] = rehearsal_invited.to_string();
        cells[col::REHEARSAL_RSVP] = rehearsal_rsvp.to_string();
        cells[col::DIETARY] = dietary.to_string();
        GuestRow(cells)
    }

    fn family() -> Vec<GuestRow> {
        vec![
            row("smith", "John Smith", "John", "Smith", "M5V 2T6", "Yes", "yes", "", ""),
            row("smith", "Ann Smith", "Ann", "Smith", "M5V 2T6", "", "", "", "vegan"),
            row("obrien", "Jane O'Brien", "Jane", "O'Brien", "L6P 0B2", "", "x", "No", ""),
        ]
    }

    #[test]
    fn login_matches_despite_spacing_case_and_accents() {
        let rows = family();
        assert_eq!(find_login_row(&rows, "jane  o'brien", "l6p 0b2"), Some(2));
        assert_eq!(find_login_row(&rows, "Jané O'Brien", "L6P0B2"), Some(2));
        assert_eq!(find_login_row(&rows, "Jane O'Brien", "M5V 2T6"), None);
        assert_eq!(find_login_row(&rows, "Nobody Here", "L6P 0B2"), None);
    }

    #[test]
    fn login_searches_every_data_row() {
        let rows = family();
        assert_eq!(find_login_row(&rows, "John Smith", "m5v2t6"), Some(0));
    }

    #[test]
    fn payload_covers_the_whole_group() {
        let rows = family();
        let guest = build_guest_payload(&rows, 1);

        assert_eq!(guest.full_name, "ann smith");
        assert_eq!(guest.invitation_group, "smith");
        assert_eq!(guest.row_index, 1);
        assert_eq!(guest.postal_code, "M5V2T6");

        let wedding: Vec<usize> = guest.wedding_guests.iter().map(|g| g.row_index).collect();
        assert_eq!(wedding, vec![0, 1]);
        assert_eq!(guest.wedding_guests[0].rsvp, RsvpAnswer::Yes);
        assert_eq!(guest.wedding_guests[1].rsvp, RsvpAnswer::Blank);

        // Only John has the invited flag ticked.
        let rehearsal: Vec<usize> = guest.rehearsal_guests.iter().map(|g| g.row_index).collect();
        assert_eq!(rehearsal, vec![0]);

        assert_eq!(guest.individual_details.len(), 2);
        assert_eq!(guest.dietary_for_row(1), "vegan");
        assert!(!guest.household_complete);
    }

    #[test]
    fn household_complete_requires_every_contact_column() {
        let mut rows = family();
        for column in col::ADDRESS..=col::PHONE {
            rows[0].0[column] = "filled".to_string();
        }
        assert!(build_guest_payload(&rows, 0).household_complete);

        rows[0].0[col::EMAIL] = String::new();
        assert!(!build_guest_payload(&rows, 0).household_complete);
    }

    #[test]
    fn resolution_prefers_identity_over_remembered_offset() {
        let rows = family();
        let mut guest = build_guest_payload(&rows, 2);

        // Row moved: identity still finds it.
        guest.row_index = 0;
        assert_eq!(resolve_guest_row(&rows, &guest), Some(2));
    }

    #[test]
    fn resolution_falls_back_to_group_and_rebuilt_name() {
        let rows = family();
        let mut guest = build_guest_payload(&rows, 2);

        // Full name cell was retyped; postal changed too.
        guest.full_name = "janet o'brien".to_string();
        guest.postal_code = "X0X0X0".to_string();
        assert_eq!(resolve_guest_row(&rows, &guest), Some(2));
    }

    #[test]
    fn resolution_keeps_in_bounds_offset_as_last_resort() {
        let rows = family();
        let mut guest = build_guest_payload(&rows, 2);
        guest.full_name = "someone else".to_string();
        guest.postal_code = "X0X0X0".to_string();
        guest.first_name = String::new();

        assert_eq!(resolve_guest_row(&rows, &guest), Some(2));

        guest.row_index = 99;
        assert_eq!(resolve_guest_row(&rows, &guest), None);
    }

    #[test]
    fn list_view_joins_dietary_by_row() {
        let rows = family();
        let guest = build_guest_payload(&rows, 0);
        let view = rsvp_list_view(&guest, Event::Wedding);

        assert_eq!(view.len(), 2);
        assert_eq!(view[0].full_name, "John Smith");
        assert_eq!(view[0].dietary, "");
        assert_eq!(view[1].dietary, "vegan");
        assert_eq!(view[1].row_index, 1);
    }
}
