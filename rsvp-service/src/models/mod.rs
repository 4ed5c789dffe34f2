use serde::Deserialize;

use wedding_shared::reconcile::RsvpEdit;

// Request DTOs
#[derive(Deserialize, Debug)]
pub struct LoginRequest {
    #[serde(rename = "fullName")]
    pub full_name: Option<String>,
    #[serde(rename = "postalCode")]
    pub postal_code: Option<String>,
}

/// Refresh accepts only the display-name fields. Everything else in the
/// credential stays exactly as verified.
#[derive(Deserialize, Debug, Default)]
pub struct RefreshRequest {
    #[serde(rename = "firstName")]
    pub first_name: Option<String>,
    #[serde(rename = "lastName")]
    pub last_name: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct EventQuery {
    #[serde(default)]
    pub event: String,
}

#[derive(Deserialize, Debug)]
pub struct RsvpPutRequest {
    #[serde(rename = "rsvpList", default)]
    pub rsvp_list: Vec<RsvpEdit>,
}

/// Any present household field (even an empty one) triggers the audit
/// append and the group-wide address write; when none are present that
/// whole step is skipped.
#[derive(Deserialize, Debug)]
pub struct GuestDetailsRequest {
    pub address: Option<String>,
    pub city: Option<String>,
    pub province: Option<String>,
    pub country: Option<String>,
    #[serde(rename = "postalCode")]
    pub postal_code: Option<String>,
    pub email: Option<String>,
    #[serde(default)]
    pub individuals: Vec<IndividualEdit>,
}

impl GuestDetailsRequest {
    pub fn has_household_fields(&self) -> bool {
        self.address.is_some()
            || self.city.is_some()
            || self.province.is_some()
            || self.country.is_some()
            || self.postal_code.is_some()
            || self.email.is_some()
    }
}

#[derive(Deserialize, Debug)]
pub struct IndividualEdit {
    #[serde(rename = "rowIndex")]
    pub row_index: Option<usize>,
    #[serde(rename = "fullName")]
    pub full_name: Option<String>,
    #[serde(rename = "firstName")]
    pub first_name: Option<String>,
    #[serde(rename = "lastName")]
    pub last_name: Option<String>,
    pub phone: Option<String>,
}
