use crate::domain::models::booking::{BookingRecord, BookingRequest, LedgerField, RowKey};
use crate::domain::services::admission::{Admission, AdmissionCalculator};
use crate::error::AppError;
use async_trait::async_trait;

/// The shared booking ledger. Rows are never deleted.
#[async_trait]
pub trait LedgerRepository: Send + Sync {
    /// All rows in insertion order, cancelled ones included.
    async fn list_all(&self) -> Result<Vec<BookingRecord>, AppError>;

    /// Appends a finished row as-is. No duplicate check.
    async fn append(&self, record: &BookingRecord) -> Result<(), AppError>;

    /// Reads the occurrence, computes the row and appends it in one
    /// transaction, serialized per eventID.
    async fn admit(&self, request: &BookingRequest, calculator: &AdmissionCalculator) -> Result<Admission, AppError>;

    /// Sets `field` on the first row matching `key`.
    async fn set_flag(&self, key: &RowKey, field: LedgerField, value: bool) -> Result<(), AppError>;

    /// Sets `field` on the row at 0-based insertion `position`.
    async fn set_flag_at(&self, position: i64, field: LedgerField, value: bool) -> Result<(), AppError>;
}
