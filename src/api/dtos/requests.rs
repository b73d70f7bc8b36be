use serde::Deserialize;
use crate::domain::models::booking::{BookingRequest, RowKey};
use crate::error::AppError;

#[derive(Deserialize)]
pub struct LoginRequest {
    pub password: String,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ListBookingsQuery {
    pub nick_name: Option<String>,
    pub order: Option<String>,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    pub event: Option<String>,
    pub date: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub nick_name: Option<String>,
    pub studio: Option<String>,
    pub room: Option<String>,
    pub note: Option<String>,
    pub introducer: Option<String>,
}

fn required(value: Option<String>, name: &'static str, missing: &mut Vec<&'static str>) -> String {
    match value {
        Some(v) if !v.is_empty() => v,
        _ => {
            missing.push(name);
            String::new()
        }
    }
}

impl CreateBookingRequest {
    /// Empty strings count as missing.
    pub fn validate(self) -> Result<BookingRequest, AppError> {
        let mut missing = Vec::new();
        let request = BookingRequest {
            event_title: required(self.event, "event", &mut missing),
            date: required(self.date, "date", &mut missing),
            start_time: required(self.start_time, "startTime", &mut missing),
            end_time: required(self.end_time, "endTime", &mut missing),
            participant_name: required(self.nick_name, "nickName", &mut missing),
            venue: required(self.studio, "studio", &mut missing),
            room: required(self.room, "room", &mut missing),
            note: self.note.unwrap_or_default(),
            introducer: self.introducer.unwrap_or_default(),
        };

        if missing.is_empty() {
            Ok(request)
        } else {
            Err(AppError::MissingFields(missing))
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBookingRequest {
    pub date: Option<String>,
    pub event: Option<String>,
    pub start_time: Option<String>,
    pub nick_name: Option<String>,
    #[serde(default)]
    pub field: String,
    pub value: bool,
    /// 0-based position in the booking list; older clients send this.
    pub row_index: Option<i64>,
}

impl UpdateBookingRequest {
    /// The exact tuple, when every part of it is present and non-empty.
    pub fn row_key(&self) -> Option<RowKey> {
        let present = |v: &Option<String>| v.as_deref().filter(|s| !s.is_empty()).map(str::to_string);
        Some(RowKey {
            date: present(&self.date)?,
            event_title: present(&self.event)?,
            start_time: present(&self.start_time)?,
            participant_name: present(&self.nick_name)?,
        })
    }
}
