use serde::{Deserialize, Serialize};

/// 0-based column offsets within the guest sheet's data range.
pub mod col {
    pub const GROUP_KEY: usize = 0;
    pub const FULL_NAME: usize = 1;
    pub const FIRST_NAME: usize = 2;
    pub const LAST_NAME: usize = 3;
    pub const ADDRESS: usize = 7;
    pub const CITY: usize = 8;
    pub const PROVINCE: usize = 9;
    pub const COUNTRY: usize = 10;
    pub const POSTAL_CODE: usize = 11;
    pub const EMAIL: usize = 12;
    pub const PHONE: usize = 13;
    pub const WEDDING_RSVP: usize = 20;
    pub const REHEARSAL_INVITED: usize = 21;
    pub const REHEARSAL_RSVP: usize = 23;
    pub const DIETARY: usize = 28;
}

/// Column letters used when staging writes back to the sheet.
pub mod col_letter {
    pub const FIRST_NAME: &str = "C";
    pub const LAST_NAME: &str = "D";
    pub const ADDRESS: &str = "H";
    pub const EMAIL: &str = "M";
    pub const PHONE: &str = "N";
    pub const WEDDING_RSVP: &str = "U";
    pub const REHEARSAL_RSVP: &str = "X";
    pub const DIETARY: &str = "AC";
}

/// Rows are read from `A2`, so data offset 0 is physical sheet row 2.
pub const SHEET_ROW_OFFSET: usize = 2;

/// One guest row as returned by the row store. The API omits trailing
/// blank cells, so rows are ragged; reading past the end yields "".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GuestRow(pub Vec<String>);

impl GuestRow {
    pub fn new(cells: Vec<String>) -> Self {
        GuestRow(cells)
    }

    /// Trimmed cell contents at `index`, or "" for a missing cell.
    pub fn get(&self, index: usize) -> &str {
        self.0.get(index).map(|c| c.trim()).unwrap_or("")
    }
}

impl From<Vec<&str>> for GuestRow {
    fn from(cells: Vec<&str>) -> Self {
        GuestRow(cells.into_iter().map(String::from).collect())
    }
}

/// Canonical RSVP state as stored in the sheet: "Yes", "No" or "".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RsvpAnswer {
    Yes,
    No,
    #[default]
    Blank,
}

impl RsvpAnswer {
    /// Lenient coercion: common affirmative/negative spellings map to the
    /// canonical pair, anything else is Blank.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "yes" | "y" | "attending" | "true" | "1" => RsvpAnswer::Yes,
            "no" | "n" | "decline" | "declining" | "false" | "0" => RsvpAnswer::No,
            _ => RsvpAnswer::Blank,
        }
    }

    pub fn as_sheet_str(&self) -> &'static str {
        match self {
            RsvpAnswer::Yes => "Yes",
            RsvpAnswer::No => "No",
            RsvpAnswer::Blank => "",
        }
    }
}

impl Serialize for RsvpAnswer {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_sheet_str())
    }
}

impl<'de> Deserialize<'de> for RsvpAnswer {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(RsvpAnswer::parse(&raw))
    }
}

/// The two RSVP-able events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Wedding,
    Rehearsal,
}

impl Event {
    pub fn parse(raw: &str) -> Option<Event> {
        match raw {
            "wedding" => Some(Event::Wedding),
            "rehearsal" => Some(Event::Rehearsal),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Event::Wedding => "wedding",
            Event::Rehearsal => "rehearsal",
        }
    }

    pub fn rsvp_column(&self) -> usize {
        match self {
            Event::Wedding => col::WEDDING_RSVP,
            Event::Rehearsal => col::REHEARSAL_RSVP,
        }
    }

    pub fn rsvp_column_letter(&self) -> &'static str {
        match self {
            Event::Wedding => col_letter::WEDDING_RSVP,
            Event::Rehearsal => col_letter::REHEARSAL_RSVP,
        }
    }

    /// The wedding list covers the whole invitation group; the rehearsal
    /// dinner is limited to rows with a truthy invited flag.
    pub fn requires_invitation(&self) -> bool {
        matches!(self, Event::Rehearsal)
    }
}

/// One invitee on an event list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventGuest {
    pub full_name: String,
    pub rsvp: RsvpAnswer,
    pub row_index: usize,
}

/// Per-person details carried for the whole invitation group, regardless
/// of which events each row is invited to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndividualDetail {
    pub full_name: String,
    pub row_index: usize,
    #[serde(default)]
    pub dietary: String,
    #[serde(default)]
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
}

/// Denormalized guest profile embedded in the session credential.
///
/// `full_name` and `postal_code` are stored in normalized form and act as
/// the guest's identity; `row_index` values are data-range offsets valid
/// as of the snapshot the payload was built from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuestPayload {
    pub full_name: String,
    pub first_name: String,
    pub last_name: String,
    pub postal_code: String,
    pub invitation_group: String,
    pub household_complete: bool,
    pub row_index: usize,
    pub wedding_guests: Vec<EventGuest>,
    pub rehearsal_guests: Vec<EventGuest>,
    pub individual_details: Vec<IndividualDetail>,
}

impl GuestPayload {
    pub fn event_guests(&self, event: Event) -> &[EventGuest] {
        match event {
            Event::Wedding => &self.wedding_guests,
            Event::Rehearsal => &self.rehearsal_guests,
        }
    }

    pub fn set_event_guests(&mut self, event: Event, guests: Vec<EventGuest>) {
        match event {
            Event::Wedding => self.wedding_guests = guests,
            Event::Rehearsal => self.rehearsal_guests = guests,
        }
    }

    /// Dietary note for a row, joined from the individual details.
    pub fn dietary_for_row(&self, row_index: usize) -> &str {
        self.individual_details
            .iter()
            .find(|d| d.row_index == row_index)
            .map(|d| d.dietary.as_str())
            .unwrap_or("")
    }
}

/// One invitee as served to the client: event list entry plus dietary.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RsvpListEntry {
    pub full_name: String,
    pub rsvp: RsvpAnswer,
    pub dietary: String,
    pub row_index: usize,
}

/// A staged write to one cell or one horizontal span on the guest sheet.
/// Ranges are A1 notation without the sheet name; the store prefixes its
/// configured sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct CellWrite {
    pub range: String,
    pub values: Vec<String>,
}

impl CellWrite {
    pub fn cell(column: &str, row_index: usize, value: impl Into<String>) -> Self {
        CellWrite {
            range: format!("{}{}", column, row_index + SHEET_ROW_OFFSET),
            values: vec![value.into()],
        }
    }

    pub fn span(start: &str, end: &str, row_index: usize, values: Vec<String>) -> Self {
        let row = row_index + SHEET_ROW_OFFSET;
        CellWrite {
            range: format!("{start}{row}:{end}{row}"),
            values,
        }
    }
}

/// Audit record appended to the address-updates sheet whenever household
/// fields change. The guest sheet itself is overwritten in place.
#[derive(Debug, Clone, PartialEq)]
pub struct AddressUpdate {
    pub invitation_group: String,
    pub address: String,
    pub city: String,
    pub province: String,
    pub country: String,
    pub postal_code: String,
    pub email: String,
    pub updated_at: String,
}

impl AddressUpdate {
    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.invitation_group.clone(),
            self.address.clone(),
            self.city.clone(),
            self.province.clone(),
            self.country.clone(),
            self.postal_code.clone(),
            self.email.clone(),
            String::new(),
            self.updated_at.clone(),
        ]
    }
}
