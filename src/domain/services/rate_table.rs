use std::collections::{BTreeMap, HashMap};
use serde::{Deserialize, Serialize};
use tracing::warn;
use crate::domain::models::venue::{DefaultReason, Lookup, RoomRate, VenueKey};

/// Serialized form of the rate table, as stored in `VENUE_TABLE_PATH` and
/// returned by `GET /api/v1/venues`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VenueTableDef {
    pub venues: BTreeMap<String, VenueDef>,
    pub unknown_venue: RoomRate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VenueDef {
    #[serde(default)]
    pub aliases: Vec<String>,
    pub rooms: BTreeMap<String, RoomRate>,
    pub other_rooms: RoomRate,
}

/// Immutable lookup table keyed by (venue, room), built once at startup.
#[derive(Debug, Clone)]
pub struct VenueRateTable {
    def: VenueTableDef,
    rooms: HashMap<(VenueKey, String), RoomRate>,
    venues: HashMap<VenueKey, RoomRate>,
}

impl VenueRateTable {
    pub fn new(def: VenueTableDef) -> Self {
        let mut rooms = HashMap::new();
        let mut venues = HashMap::new();

        for (name, venue) in &def.venues {
            let keys = std::iter::once(name).chain(venue.aliases.iter()).map(|n| VenueKey::canonical(n));
            for key in keys {
                venues.insert(key.clone(), venue.other_rooms);
                for (room, rate) in &venue.rooms {
                    rooms.insert((key.clone(), room.clone()), *rate);
                }
            }
        }

        Self { def, rooms, venues }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<VenueTableDef>(json).map(Self::new)
    }

    pub fn definition(&self) -> &VenueTableDef {
        &self.def
    }

    pub fn rates_for(&self, venue: &str, room: &str) -> Lookup<RoomRate> {
        let key = VenueKey::canonical(venue);

        if let Some(rate) = self.rooms.get(&(key.clone(), room.to_string())) {
            return Lookup::Found(*rate);
        }

        let (rate, reason) = match self.venues.get(&key) {
            Some(fallback) => (*fallback, DefaultReason::UnknownRoom { venue: key.as_str().to_string(), room: room.to_string() }),
            None => (self.def.unknown_venue, DefaultReason::UnknownVenue { venue: key.as_str().to_string() }),
        };
        warn!("Rate table fallback: {} (capacity {}, rate {})", reason, rate.capacity, rate.evening_rate);
        Lookup::DefaultedTo(rate, reason)
    }

    pub fn capacity_for(&self, venue: &str, room: &str) -> Lookup<i32> {
        self.rates_for(venue, room).map(|r| r.capacity)
    }

    /// Evening tariff per half hour; the only tariff modelled.
    pub fn rate_for(&self, venue: &str, room: &str) -> Lookup<i32> {
        self.rates_for(venue, room).map(|r| r.evening_rate)
    }
}

impl Default for VenueRateTable {
    fn default() -> Self {
        Self::new(builtin_table())
    }
}

fn rate(capacity: i32, evening_rate: i32) -> RoomRate {
    RoomRate { capacity, evening_rate }
}

fn rooms(entries: &[(&str, RoomRate)]) -> BTreeMap<String, RoomRate> {
    entries.iter().map(|(room, r)| (room.to_string(), *r)).collect()
}

/// Capacities are the student count, i.e. room size minus the instructor.
pub fn builtin_table() -> VenueTableDef {
    let mut venues = BTreeMap::new();

    venues.insert("BUZZ池袋西口PARK".to_string(), VenueDef {
        aliases: vec![],
        rooms: rooms(&[("D", rate(7, 1100)), ("E", rate(5, 900)), ("F", rate(5, 900))]),
        other_rooms: rate(5, 900),
    });

    venues.insert("BUZZ池袋西口タワー".to_string(), VenueDef {
        aliases: vec![],
        rooms: rooms(&[
            ("101", rate(9, 1000)),
            ("201", rate(7, 1000)),
            ("202", rate(5, 750)),
            ("301", rate(7, 1000)),
            ("302", rate(7, 1000)),
        ]),
        other_rooms: rate(7, 1000),
    });

    venues.insert("studio worcle Ikebukuroten".to_string(), VenueDef {
        aliases: vec!["ワークル池袋".to_string()],
        rooms: rooms(&[
            ("201", rate(10, 1100)),
            ("202", rate(10, 1100)),
            ("402", rate(10, 1100)),
            ("403", rate(10, 1100)),
            ("301", rate(5, 800)),
            ("302", rate(5, 800)),
            ("303", rate(5, 800)),
        ]),
        other_rooms: rate(5, 800),
    });

    VenueTableDef { venues, unknown_venue: rate(5, 1000) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_rooms() {
        let table = VenueRateTable::default();
        assert_eq!(table.capacity_for("BUZZ池袋西口PARK", "D"), Lookup::Found(7));
        assert_eq!(table.rate_for("BUZZ池袋西口PARK", "D"), Lookup::Found(1100));
        assert_eq!(table.capacity_for("BUZZ池袋西口タワー", "101"), Lookup::Found(9));
        assert_eq!(table.rate_for("BUZZ池袋西口タワー", "202"), Lookup::Found(750));
        assert_eq!(table.capacity_for("studio worcle Ikebukuroten", "403"), Lookup::Found(10));
        assert_eq!(table.rate_for("studio worcle Ikebukuroten", "303"), Lookup::Found(800));
    }

    #[test]
    fn test_alias_and_qualifier() {
        let table = VenueRateTable::default();
        assert_eq!(table.capacity_for("ワークル池袋", "201"), Lookup::Found(10));
        assert_eq!(table.rate_for("BUZZ池袋西口PARK, 豊島区西池袋1-12-6", "E"), Lookup::Found(900));
    }

    #[test]
    fn test_unknown_room_defaults_per_venue() {
        let table = VenueRateTable::default();
        let capacity = table.capacity_for("BUZZ池袋西口タワー", "999");
        assert_eq!(capacity.value(), 7);
        assert_eq!(
            capacity.default_reason(),
            Some(&DefaultReason::UnknownRoom { venue: "BUZZ池袋西口タワー".into(), room: "999".into() })
        );
        assert_eq!(table.rate_for("BUZZ池袋西口PARK", "Z").value(), 900);
        assert_eq!(table.rate_for("ワークル池袋", "").value(), 800);
    }

    #[test]
    fn test_unknown_venue_uses_global_default() {
        let table = VenueRateTable::default();
        let capacity = table.capacity_for("Somewhere Else", "A");
        assert_eq!(capacity.value(), 5);
        assert!(!capacity.is_found());
        assert_eq!(table.rate_for("Somewhere Else", "A").value(), 1000);
    }

    #[test]
    fn test_room_codes_are_exact() {
        let table = VenueRateTable::default();
        assert!(!table.capacity_for("BUZZ池袋西口PARK", "d").is_found());
    }

    #[test]
    fn test_table_loads_from_json() {
        let json = r#"{
            "venues": {
                "Hall A": { "aliases": ["ホールA"], "rooms": { "1": { "capacity": 12, "evening_rate": 1500 } },
                            "other_rooms": { "capacity": 6, "evening_rate": 700 } }
            },
            "unknown_venue": { "capacity": 4, "evening_rate": 500 }
        }"#;

        let table = VenueRateTable::from_json(json).unwrap();
        assert_eq!(table.capacity_for("ホールA", "1"), Lookup::Found(12));
        assert_eq!(table.rate_for("Hall A", "2").value(), 700);
        assert_eq!(table.capacity_for("BUZZ池袋西口PARK", "D").value(), 4);
    }

    #[test]
    fn test_builtin_definition_round_trips_through_json() {
        let table = VenueRateTable::default();
        let json = serde_json::to_string(table.definition()).unwrap();
        assert_eq!(VenueRateTable::from_json(&json).unwrap().definition(), table.definition());
    }
}
