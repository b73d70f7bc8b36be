use serde::Serialize;
use crate::domain::models::booking::BookingStatus;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingCreatedResponse {
    pub success: bool,
    /// The new booking's ordinal within its occurrence.
    pub event_count: usize,
    pub status: BookingStatus,
    pub price: i32,
}

#[derive(Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}
