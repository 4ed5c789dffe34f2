use crate::models::{col, GuestRow};

/// Full width of the data range (columns A through AD).
const ROW_WIDTH: usize = 30;

/// Builds one guest sheet row, padded to the full data-range width so
/// column constants index into it the way they index into live data.
pub struct RowBuilder {
    cells: Vec<String>,
}

impl RowBuilder {
    pub fn new(group_key: &str, full_name: &str) -> Self {
        let mut cells = vec![String::new(); ROW_WIDTH];
        cells[col::GROUP_KEY] = group_key.to_string();
        cells[col::FULL_NAME] = full_name.to_string();
        RowBuilder { cells }
    }

    pub fn name_parts(mut self, first: &str, last: &str) -> Self {
        self.cells[col::FIRST_NAME] = first.to_string();
        self.cells[col::LAST_NAME] = last.to_string();
        self
    }

    pub fn address(
        mut self,
        address: &str,
        city: &str,
        province: &str,
        country: &str,
        postal_code: &str,
    ) -> Self {
        self.cells[col::ADDRESS] = address.to_string();
        self.cells[col::CITY] = city.to_string();
        self.cells[col::PROVINCE] = province.to_string();
        self.cells[col::COUNTRY] = country.to_string();
        self.cells[col::POSTAL_CODE] = postal_code.to_string();
        self
    }

    pub fn postal_code(mut self, postal_code: &str) -> Self {
        self.cells[col::POSTAL_CODE] = postal_code.to_string();
        self
    }

    pub fn contact(mut self, email: &str, phone: &str) -> Self {
        self.cells[col::EMAIL] = email.to_string();
        self.cells[col::PHONE] = phone.to_string();
        self
    }

    pub fn wedding_rsvp(mut self, answer: &str) -> Self {
        self.cells[col::WEDDING_RSVP] = answer.to_string();
        self
    }

    /// Marks the row invited (or not) to the rehearsal dinner, with the
    /// recorded answer when there is one.
    pub fn rehearsal(mut self, invited: bool, answer: &str) -> Self {
        self.cells[col::REHEARSAL_INVITED] = if invited { "x" } else { "" }.to_string();
        self.cells[col::REHEARSAL_RSVP] = answer.to_string();
        self
    }

    pub fn dietary(mut self, note: &str) -> Self {
        self.cells[col::DIETARY] = note.to_string();
        self
    }

    pub fn build(self) -> GuestRow {
        GuestRow::new(self.cells)
    }
}

/// Seven guest rows across three invitation groups.
///
/// Row layout (0-based, matching payload row indices):
///   0  John Smith   - smith group, wedding "Yes", rehearsal invited
///   1  Ann Smith    - smith group, dietary note, not at the rehearsal
///   2  Jane O'Brien - solo group, not invited to the rehearsal
///   3  Pat Lee      - lee group
///   4  Sam Lee      - lee group
///   5  Kim Lee      - lee group, nothing recorded yet
///   6  Pat Lee      - lee group, same name as row 3
pub fn sample_rows() -> Vec<GuestRow> {
    vec![
        RowBuilder::new("smith", "John Smith")
            .name_parts("John", "Smith")
            .address("12 Elm St", "Toronto", "ON", "Canada", "M5V 2T6")
            .contact("john@smith.ca", "416-555-0100")
            .wedding_rsvp("Yes")
            .rehearsal(true, "Yes")
            .build(),
        RowBuilder::new("smith", "Ann Smith")
            .name_parts("Ann", "Smith")
            .postal_code("M5V 2T6")
            .dietary("vegan")
            .build(),
        RowBuilder::new("obrien", "Jane O'Brien")
            .name_parts("Jane", "O'Brien")
            .postal_code("L6P 0B2")
            .wedding_rsvp("No")
            .build(),
        RowBuilder::new("lee", "Pat Lee")
            .name_parts("Pat", "Lee")
            .postal_code("K1A 0A1")
            .wedding_rsvp("Yes")
            .build(),
        RowBuilder::new("lee", "Sam Lee")
            .name_parts("Sam", "Lee")
            .postal_code("K1A 0A1")
            .build(),
        RowBuilder::new("lee", "Kim Lee")
            .name_parts("Kim", "Lee")
            .postal_code("K1A 0A1")
            .build(),
        RowBuilder::new("lee", "Pat Lee")
            .name_parts("Pat", "Lee")
            .postal_code("K1A 0A1")
            .build(),
    ]
}
