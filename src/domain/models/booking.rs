use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClassCategory {
    Regular,
    Special,
    Practice,
}

impl ClassCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClassCategory::Regular => "Regular",
            ClassCategory::Special => "Special",
            ClassCategory::Practice => "Practice",
        }
    }
}

impl fmt::Display for ClassCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BookingStatus {
    Open,
    Full,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Open => "Open",
            BookingStatus::Full => "Full",
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One ledger row. Derived fields (`max_participants`, `status`,
/// `price_per_seat`, `venue_cost`) are frozen at insertion time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingRecord {
    pub date: String,
    #[serde(rename = "event")]
    pub event_title: String,
    #[serde(rename = "startTime")]
    pub start_time: String,
    #[serde(rename = "endTime")]
    pub end_time: String,
    #[serde(rename = "maxParticipants")]
    pub max_participants: i32,
    #[serde(rename = "nickName")]
    pub participant_name: String,
    #[serde(rename = "classType")]
    pub class_category: ClassCategory,
    pub status: BookingStatus,
    pub attended: bool,
    pub cancelled: bool,
    #[serde(rename = "studio")]
    pub venue: String,
    pub room: String,
    #[serde(rename = "price")]
    pub price_per_seat: i32,
    #[serde(rename = "studioCost")]
    pub venue_cost: i64,
    #[serde(rename = "eventID")]
    pub event_id: String,
    pub note: String,
    pub introducer: String,
}

/// Storage shape of a ledger row. Enum columns are plain text so the same
/// struct decodes from both SQLite and PostgreSQL.
#[derive(Debug, Clone, FromRow)]
pub struct LedgerRow {
    pub row_index: i64,
    pub date: String,
    pub event_title: String,
    pub start_time: String,
    pub end_time: String,
    pub max_participants: i32,
    pub participant_name: String,
    pub class_category: String,
    pub status: String,
    pub attended: bool,
    pub cancelled: bool,
    pub venue: String,
    pub room: String,
    pub price_per_seat: i32,
    pub venue_cost: i64,
    pub event_id: String,
    pub note: String,
    pub introducer: String,
}

impl From<LedgerRow> for BookingRecord {
    fn from(row: LedgerRow) -> Self {
        // Rows edited by hand may carry labels we never emit.
        let class_category = match row.class_category.as_str() {
            "Special" => ClassCategory::Special,
            "Practice" => ClassCategory::Practice,
            _ => ClassCategory::Regular,
        };
        let status = if row.status == "Full" { BookingStatus::Full } else { BookingStatus::Open };

        Self {
            date: row.date,
            event_title: row.event_title,
            start_time: row.start_time,
            end_time: row.end_time,
            max_participants: row.max_participants,
            participant_name: row.participant_name,
            class_category,
            status,
            attended: row.attended,
            cancelled: row.cancelled,
            venue: row.venue,
            room: row.room,
            price_per_seat: row.price_per_seat,
            venue_cost: row.venue_cost,
            event_id: row.event_id,
            note: row.note,
            introducer: row.introducer,
        }
    }
}

/// A validated booking submission. Identity is always explicit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingRequest {
    pub date: String,
    pub event_title: String,
    pub start_time: String,
    pub end_time: String,
    pub participant_name: String,
    pub venue: String,
    pub room: String,
    pub note: String,
    pub introducer: String,
}

/// Identifies a ledger row for in-place flag updates. First match wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowKey {
    pub date: String,
    pub event_title: String,
    pub start_time: String,
    pub participant_name: String,
}

/// The only two columns that may change after a row is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerField {
    Attended,
    Cancelled,
}

impl LedgerField {
    pub fn column(&self) -> &'static str {
        match self {
            LedgerField::Attended => "attended",
            LedgerField::Cancelled => "cancelled",
        }
    }
}

impl FromStr for LedgerField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "attended" => Ok(LedgerField::Attended),
            "cancelled" => Ok(LedgerField::Cancelled),
            other => Err(other.to_string()),
        }
    }
}
