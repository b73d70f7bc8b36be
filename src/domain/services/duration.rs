use chrono::{NaiveDate, NaiveTime};
use crate::error::AppError;

const TIME_FORMATS: [&str; 6] = ["%I:%M %p", "%I:%M%p", "%I:%M:%S %p", "%I:%M:%S%p", "%H:%M", "%H:%M:%S"];

/// Elapsed time in half-hour units. Keeps exact minutes so fractional
/// half hours (e.g. 45 minutes = 1.5) are not lost. May be zero or negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct HalfHours {
    minutes: i64,
}

impl HalfHours {
    pub fn from_minutes(minutes: i64) -> Self {
        Self { minutes }
    }

    pub fn minutes(&self) -> i64 {
        self.minutes
    }

    pub fn as_f64(&self) -> f64 {
        self.minutes as f64 / 30.0
    }

    /// `rate * half_hours`, rounded to the nearest currency unit.
    pub fn cost_at(&self, rate_per_half_hour: i32) -> i64 {
        (rate_per_half_hour as f64 * self.as_f64()).round() as i64
    }
}

/// Parses a wall-clock time in 12-hour ("7:00 PM") or 24-hour ("19:00") form.
pub fn parse_time_of_day(input: &str) -> Result<NaiveTime, AppError> {
    // Browsers emit U+202F / U+00A0 between the time and the meridiem.
    let normalized = input
        .replace(['\u{202f}', '\u{a0}'], " ")
        .trim()
        .to_uppercase();

    TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(&normalized, fmt).ok())
        .ok_or_else(|| AppError::Validation(format!("Unrecognized time of day: {}", input)))
}

/// Half hours between `start` and `end` on the same (arbitrary) day. An end
/// before the start yields a negative value, not an error.
pub fn half_hours(start: &str, end: &str) -> Result<HalfHours, AppError> {
    let anchor = NaiveDate::from_ymd_opt(2000, 1, 1).ok_or(AppError::Internal)?;
    let start = anchor.and_time(parse_time_of_day(start)?);
    let end = anchor.and_time(parse_time_of_day(end)?);

    Ok(HalfHours::from_minutes((end - start).num_minutes()))
}
