use chrono::NaiveDate;
use serde::Serialize;
use crate::domain::models::booking::BookingRecord;

const DATE_FORMATS: [&str; 3] = ["%m/%d/%Y", "%Y/%m/%d", "%Y-%m-%d"];

/// Ledger dates are whatever the booking form sent, usually `M/D/YYYY`.
pub fn parse_booking_date(input: &str) -> Option<NaiveDate> {
    let input = input.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(input, fmt).ok())
}

/// A participant's own active bookings, in ledger order.
pub fn participant_view(records: Vec<BookingRecord>, participant_name: &str) -> Vec<BookingRecord> {
    records
        .into_iter()
        .filter(|r| r.participant_name == participant_name && !r.cancelled)
        .collect()
}

/// Everything, latest date first. Unparseable dates sink to the bottom.
pub fn admin_view(mut records: Vec<BookingRecord>) -> Vec<BookingRecord> {
    records.sort_by_key(|r| std::cmp::Reverse(parse_booking_date(&r.date)));
    records
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NextClass {
    pub datetime: String,
    pub studio: String,
    pub room: String,
    pub bookings: usize,
}

pub fn next_class(records: &[BookingRecord], today: NaiveDate) -> Option<NextClass> {
    let next = records
        .iter()
        .filter(|r| !r.cancelled)
        .filter_map(|r| parse_booking_date(&r.date).map(|d| (d, r)))
        .filter(|(d, _)| *d >= today)
        .min_by_key(|(d, _)| *d)
        .map(|(_, r)| r)?;

    // Counted by date string, not occurrence: one studio session per day.
    let bookings = records
        .iter()
        .filter(|r| r.date == next.date && !r.cancelled)
        .count();

    let or_tbd = |s: &str| if s.is_empty() { "TBD".to_string() } else { s.to_string() };

    Some(NextClass {
        datetime: format!("{} {}", next.date, next.start_time),
        studio: or_tbd(&next.venue),
        room: or_tbd(&next.room),
        bookings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::booking::{BookingStatus, ClassCategory};

    fn record(date: &str, name: &str, cancelled: bool) -> BookingRecord {
        BookingRecord {
            date: date.into(),
            event_title: "Basic".into(),
            start_time: "07:00 PM".into(),
            end_time: "08:30 PM".into(),
            max_participants: 7,
            participant_name: name.into(),
            class_category: ClassCategory::Regular,
            status: BookingStatus::Open,
            attended: false,
            cancelled,
            venue: "BUZZ池袋西口PARK".into(),
            room: "D".into(),
            price_per_seat: 3000,
            venue_cost: 3300,
            event_id: crate::domain::services::admission::event_id(date, "Basic"),
            note: String::new(),
            introducer: String::new(),
        }
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_booking_date_formats() {
        assert_eq!(parse_booking_date("7/5/2025"), Some(day(2025, 7, 5)));
        assert_eq!(parse_booking_date("07/15/2025"), Some(day(2025, 7, 15)));
        assert_eq!(parse_booking_date("2025/7/15"), Some(day(2025, 7, 15)));
        assert_eq!(parse_booking_date("2025-07-15"), Some(day(2025, 7, 15)));
        assert_eq!(parse_booking_date("next tuesday"), None);
    }

    #[test]
    fn test_participant_view_hides_cancelled_and_others() {
        let rows = vec![
            record("7/1/2025", "aya", false),
            record("7/2/2025", "ken", false),
            record("7/3/2025", "aya", true),
            record("7/4/2025", "aya", false),
        ];
        let view = participant_view(rows, "aya");
        let dates: Vec<_> = view.iter().map(|r| r.date.as_str()).collect();
        assert_eq!(dates, ["7/1/2025", "7/4/2025"]);
    }

    #[test]
    fn test_admin_view_latest_first_keeps_cancelled() {
        let rows = vec![
            record("7/1/2025", "aya", false),
            record("garbled", "ken", false),
            record("8/1/2025", "aya", true),
            record("7/20/2025", "mio", false),
        ];
        let view = admin_view(rows);
        let dates: Vec<_> = view.iter().map(|r| r.date.as_str()).collect();
        assert_eq!(dates, ["8/1/2025", "7/20/2025", "7/1/2025", "garbled"]);
    }

    #[test]
    fn test_next_class_counts_active_rows_on_that_date() {
        let rows = vec![
            record("6/30/2025", "old", false),
            record("7/20/2025", "aya", false),
            record("7/10/2025", "ken", true),
            record("7/12/2025", "mio", false),
            record("7/12/2025", "rin", false),
            record("7/12/2025", "sho", true),
        ];
        let next = next_class(&rows, day(2025, 7, 10)).unwrap();
        assert_eq!(next.datetime, "7/12/2025 07:00 PM");
        assert_eq!(next.bookings, 2);
        assert_eq!(next.studio, "BUZZ池袋西口PARK");
    }

    #[test]
    fn test_next_class_includes_today_and_fills_tbd() {
        let mut today = record("7/10/2025", "aya", false);
        today.venue = String::new();
        today.room = String::new();
        let next = next_class(&[today], day(2025, 7, 10)).unwrap();
        assert_eq!(next.studio, "TBD");
        assert_eq!(next.room, "TBD");
        assert_eq!(next.bookings, 1);
    }

    #[test]
    fn test_no_next_class() {
        assert_eq!(next_class(&[], day(2025, 7, 10)), None);
        assert_eq!(next_class(&[record("7/9/2025", "aya", false)], day(2025, 7, 10)), None);
    }
}
