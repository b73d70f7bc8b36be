use serde::{Deserialize, Serialize};
use std::fmt;

/// Capacity and evening tariff of one rentable room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomRate {
    pub capacity: i32,
    /// Currency units per half hour.
    pub evening_rate: i32,
}

/// Canonical venue name: everything before the first comma, trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VenueKey(String);

impl VenueKey {
    pub fn canonical(raw: &str) -> Self {
        let name = raw.split(',').next().unwrap_or_default().trim();
        Self(name.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefaultReason {
    UnknownRoom { venue: String, room: String },
    UnknownVenue { venue: String },
}

impl fmt::Display for DefaultReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DefaultReason::UnknownRoom { venue, room } => write!(f, "unknown room '{}' at '{}'", room, venue),
            DefaultReason::UnknownVenue { venue } => write!(f, "unknown venue '{}'", venue),
        }
    }
}

/// Result of a rate table lookup. Both arms carry a usable value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup<T> {
    Found(T),
    DefaultedTo(T, DefaultReason),
}

impl<T: Copy> Lookup<T> {
    pub fn value(&self) -> T {
        match self {
            Lookup::Found(v) | Lookup::DefaultedTo(v, _) => *v,
        }
    }
}

impl<T> Lookup<T> {
    pub fn is_found(&self) -> bool {
        matches!(self, Lookup::Found(_))
    }

    pub fn default_reason(&self) -> Option<&DefaultReason> {
        match self {
            Lookup::Found(_) => None,
            Lookup::DefaultedTo(_, reason) => Some(reason),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Lookup<U> {
        match self {
            Lookup::Found(v) => Lookup::Found(f(v)),
            Lookup::DefaultedTo(v, reason) => Lookup::DefaultedTo(f(v), reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_venue_strips_qualifier() {
        assert_eq!(VenueKey::canonical("BUZZ池袋西口PARK, 東京都豊島区").as_str(), "BUZZ池袋西口PARK");
        assert_eq!(VenueKey::canonical("  ワークル池袋 ").as_str(), "ワークル池袋");
        assert_eq!(VenueKey::canonical("").as_str(), "");
    }

    #[test]
    fn test_lookup_value_and_reason() {
        let found: Lookup<i32> = Lookup::Found(7);
        assert_eq!(found.value(), 7);
        assert!(found.is_found());
        assert!(found.default_reason().is_none());

        let guessed = Lookup::DefaultedTo(5, DefaultReason::UnknownVenue { venue: "Nowhere".into() });
        assert_eq!(guessed.value(), 5);
        assert!(!guessed.is_found());
        assert_eq!(guessed.default_reason().unwrap().to_string(), "unknown venue 'Nowhere'");
    }
}
