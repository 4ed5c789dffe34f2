use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::models::{AddressUpdate, CellWrite, GuestRow, SHEET_ROW_OFFSET};
use crate::store::{SheetStore, StoreError};

/// In-memory stand-in for the spreadsheet API.
///
/// Writes are recorded for assertions and also applied to the held rows,
/// so a follow-up read observes them the way a live sheet would.
pub struct MockSheetStore {
    rows: RwLock<Vec<GuestRow>>,
    writes: RwLock<Vec<CellWrite>>,
    address_updates: RwLock<Vec<AddressUpdate>>,
    fail_requests: bool,
}

impl MockSheetStore {
    pub fn new() -> Self {
        Self::with_rows(Vec::new())
    }

    pub fn with_rows(rows: Vec<GuestRow>) -> Self {
        MockSheetStore {
            rows: RwLock::new(rows),
            writes: RwLock::new(Vec::new()),
            address_updates: RwLock::new(Vec::new()),
            fail_requests: false,
        }
    }

    /// A store whose every call fails, for exercising upstream error paths.
    pub fn failing() -> Self {
        MockSheetStore {
            fail_requests: true,
            ..Self::new()
        }
    }

    pub async fn rows(&self) -> Vec<GuestRow> {
        self.rows.read().await.clone()
    }

    pub async fn recorded_writes(&self) -> Vec<CellWrite> {
        self.writes.read().await.clone()
    }

    pub async fn recorded_address_updates(&self) -> Vec<AddressUpdate> {
        self.address_updates.read().await.clone()
    }

    /// A1 column letters to a 0-based index ("A" -> 0, "AC" -> 28).
    fn column_index(letters: &str) -> usize {
        letters
            .chars()
            .fold(0, |acc, c| acc * 26 + (c as usize - 'A' as usize + 1))
            - 1
    }

    async fn apply(&self, write: &CellWrite) {
        // Only the start cell matters: values fill consecutive columns.
        let start = write.range.split(':').next().unwrap_or(&write.range);
        let letters: String = start
            .chars()
            .take_while(|c| c.is_ascii_alphabetic())
            .collect();
        let digits: String = start
            .chars()
            .skip_while(|c| c.is_ascii_alphabetic())
            .collect();
        if letters.is_empty() {
            return;
        }
        let Ok(sheet_row) = digits.parse::<usize>() else {
            return;
        };
        if sheet_row < SHEET_ROW_OFFSET {
            return;
        }
        let column = Self::column_index(&letters);
        let row_index = sheet_row - SHEET_ROW_OFFSET;

        let mut rows = self.rows.write().await;
        let Some(row) = rows.get_mut(row_index) else {
            return;
        };
        for (offset, value) in write.values.iter().enumerate() {
            let target = column + offset;
            if row.0.len() <= target {
                row.0.resize(target + 1, String::new());
            }
            row.0[target] = value.clone();
        }
    }

    fn failure() -> StoreError {
        StoreError::Api {
            status: 500,
            message: "mock store failure".to_string(),
        }
    }
}

impl Default for MockSheetStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SheetStore for MockSheetStore {
    async fn fetch_rows(&self) -> Result<Vec<GuestRow>, StoreError> {
        if self.fail_requests {
            return Err(Self::failure());
        }
        Ok(self.rows.read().await.clone())
    }

    async fn batch_update(&self, writes: &[CellWrite]) -> Result<(), StoreError> {
        if self.fail_requests {
            return Err(Self::failure());
        }
        for write in writes {
            self.apply(write).await;
        }
        self.writes.write().await.extend_from_slice(writes);
        Ok(())
    }

    async fn append_address_update(&self, update: &AddressUpdate) -> Result<(), StoreError> {
        if self.fail_requests {
            return Err(Self::failure());
        }
        self.address_updates.write().await.push(update.clone());
        Ok(())
    }
}
