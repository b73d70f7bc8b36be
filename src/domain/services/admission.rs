//! Admission & pricing: derives the frozen fields of a new ledger row from
//! the request and the ledger as observed at insertion time.

use std::sync::Arc;
use tracing::info;
use crate::domain::models::booking::{BookingRecord, BookingRequest, BookingStatus, ClassCategory};
use crate::domain::models::venue::Lookup;
use crate::domain::services::{classifier::classify, duration::half_hours, rate_table::VenueRateTable};
use crate::error::AppError;

pub const BASE_PRICE: i32 = 3000;
pub const GROUP_PRICE: i32 = 2500;
/// Ordinal from which regular classes get the group price.
pub const GROUP_THRESHOLD: usize = 4;

/// Grouping key of an occurrence: date without slashes + lowercased title.
pub fn event_id(date: &str, event_title: &str) -> String {
    format!("{}{}", date.replace('/', ""), event_title.to_lowercase())
}

/// Non-cancelled rows of the occurrence in `ledger`.
pub fn prior_count(event_id: &str, ledger: &[BookingRecord]) -> usize {
    ledger
        .iter()
        .filter(|r| r.event_id == event_id && !r.cancelled)
        .count()
}

pub fn seat_price(category: ClassCategory, ordinal: usize) -> i32 {
    match category {
        ClassCategory::Regular if ordinal >= GROUP_THRESHOLD => GROUP_PRICE,
        _ => BASE_PRICE,
    }
}

pub fn status_for(ordinal: usize, max_participants: i32) -> BookingStatus {
    if ordinal as i64 >= max_participants as i64 {
        BookingStatus::Full
    } else {
        BookingStatus::Open
    }
}

/// A computed row plus how it was derived.
#[derive(Debug, Clone, PartialEq)]
pub struct Admission {
    pub record: BookingRecord,
    /// 1-based rank among non-cancelled bookings of the occurrence.
    pub ordinal: usize,
    pub capacity: Lookup<i32>,
    pub rate: Lookup<i32>,
}

#[derive(Clone)]
pub struct AdmissionCalculator {
    rates: Arc<VenueRateTable>,
}

impl AdmissionCalculator {
    pub fn new(rates: Arc<VenueRateTable>) -> Self {
        Self { rates }
    }

    pub fn rates(&self) -> &VenueRateTable {
        &self.rates
    }

    /// Pure: same request and snapshot always yield the same admission.
    pub fn admit(&self, request: &BookingRequest, ledger: &[BookingRecord]) -> Result<Admission, AppError> {
        let event_id = event_id(&request.date, &request.event_title);
        let ordinal = prior_count(&event_id, ledger) + 1;

        let rates = self.rates.rates_for(&request.venue, &request.room);
        let capacity = rates.clone().map(|r| r.capacity);
        let rate = rates.map(|r| r.evening_rate);
        let max_participants = capacity.value();

        let class_category = classify(&request.event_title);
        let status = status_for(ordinal, max_participants);
        let price_per_seat = seat_price(class_category, ordinal);
        let venue_cost = half_hours(&request.start_time, &request.end_time)?.cost_at(rate.value());

        info!(
            event_id = %event_id,
            ordinal,
            max_participants,
            status = %status,
            price_per_seat,
            venue_cost,
            "admission computed"
        );

        let record = BookingRecord {
            date: request.date.clone(),
            event_title: request.event_title.clone(),
            start_time: request.start_time.clone(),
            end_time: request.end_time.clone(),
            max_participants,
            participant_name: request.participant_name.clone(),
            class_category,
            status,
            attended: false,
            cancelled: false,
            venue: request.venue.clone(),
            room: request.room.clone(),
            price_per_seat,
            venue_cost,
            event_id,
            note: request.note.clone(),
            introducer: request.introducer.clone(),
        };

        Ok(Admission { record, ordinal, capacity, rate })
    }
}
