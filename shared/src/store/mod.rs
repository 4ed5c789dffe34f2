//! Row-store abstraction over the guest spreadsheet.

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{AddressUpdate, CellWrite, GuestRow};

pub mod sheets;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("sheet request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("sheet API returned {status}: {message}")]
    Api { status: u16, message: String },
    #[error("service account authorization failed: {0}")]
    Auth(String),
}

/// The spreadsheet operations the service needs: one ranged read, one
/// batched write, and an append to the audit sheet.
#[async_trait]
pub trait SheetStore: Send + Sync {
    /// Every guest row in the data range, header excluded. Index 0 is the
    /// first data row.
    async fn fetch_rows(&self) -> Result<Vec<GuestRow>, StoreError>;

    /// Commits all staged writes in a single batch. A no-op for an empty
    /// batch.
    async fn batch_update(&self, writes: &[CellWrite]) -> Result<(), StoreError>;

    /// Appends one audit row to the address-updates sheet.
    async fn append_address_update(&self, update: &AddressUpdate) -> Result<(), StoreError>;
}
