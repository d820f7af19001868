//! The compacted schedule snapshot.
//!
//! A snapshot is the only thing the compactor hands to the query engine.
//! Once built it is never modified; the server shares one behind an `Arc`.

mod error;
mod store;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::{Departure, Direction, FeedDate, HolidayMap, Station};

pub use error::SnapshotError;
pub use store::{MINIFIED_FILE, PRETTY_FILE, WrittenSnapshot, load_snapshot, write_snapshot};

/// Departures from one station, split by direction.
///
/// Each list holds every service type interleaved, sorted by minute.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StationTimetable {
    #[serde(default)]
    pub n: Vec<Departure>,
    #[serde(default)]
    pub s: Vec<Departure>,
}

impl StationTimetable {
    /// Departures in one direction.
    pub fn departures(&self, direction: Direction) -> &[Departure] {
        match direction {
            Direction::North => &self.n,
            Direction::South => &self.s,
        }
    }

    pub(crate) fn departures_mut(&mut self, direction: Direction) -> &mut Vec<Departure> {
        match direction {
            Direction::North => &mut self.n,
            Direction::South => &mut self.s,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.n.is_empty() && self.s.is_empty()
    }

    pub fn len(&self) -> usize {
        self.n.len() + self.s.len()
    }
}

/// A compacted, versioned schedule.
///
/// `stations` is ordered north to south and lists only stations with at
/// least one departure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub stations: Vec<Station>,
    pub schedule: BTreeMap<String, StationTimetable>,
    pub holidays: HolidayMap,
    pub valid_from: FeedDate,
    pub valid_to: FeedDate,
}

impl Snapshot {
    /// Look up a station by id.
    pub fn station(&self, id: &str) -> Option<&Station> {
        self.stations.iter().find(|s| s.id == id)
    }

    /// Departures from a station in one direction. Unknown stations have none.
    pub fn departures(&self, station_id: &str, direction: Direction) -> &[Departure] {
        self.schedule
            .get(station_id)
            .map(|t| t.departures(direction))
            .unwrap_or(&[])
    }

    /// Direction of travel from `origin` to `destination`.
    ///
    /// Stations are listed north to south, so a destination later in the
    /// list lies to the south. Returns `None` when either station is
    /// unknown or both are the same.
    pub fn direction_between(&self, origin: &str, destination: &str) -> Option<Direction> {
        let from = self.stations.iter().position(|s| s.id == origin)?;
        let to = self.stations.iter().position(|s| s.id == destination)?;
        match to.cmp(&from) {
            std::cmp::Ordering::Greater => Some(Direction::South),
            std::cmp::Ordering::Less => Some(Direction::North),
            std::cmp::Ordering::Equal => None,
        }
    }

    /// Whether `date` lies inside the snapshot's validity window.
    pub fn is_valid_on(&self, date: FeedDate) -> bool {
        self.valid_from <= date && date <= self.valid_to
    }

    /// Total number of departures across all stations.
    pub fn departure_count(&self) -> usize {
        self.schedule.values().map(StationTimetable::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{HolidayOverride, RouteType, ServiceType};

    fn date(s: &str) -> FeedDate {
        FeedDate::parse(s).unwrap()
    }

    fn sample() -> Snapshot {
        let mut schedule = BTreeMap::new();
        schedule.insert(
            "sf".to_string(),
            StationTimetable {
                n: vec![],
                s: vec![Departure::new(310, "101", RouteType::Local, ServiceType::Weekday)],
            },
        );
        schedule.insert(
            "sj".to_string(),
            StationTimetable {
                n: vec![Departure::new(400, "102", RouteType::Limited, ServiceType::Weekday)],
                s: vec![],
            },
        );

        let mut holidays = HolidayMap::new();
        holidays.insert(date("20241225"), HolidayOverride::Weekend);

        Snapshot {
            stations: vec![
                Station::new("sf", "San Francisco"),
                Station::new("pa", "Palo Alto"),
                Station::new("sj", "San Jose Diridon"),
            ],
            schedule,
            holidays,
            valid_from: date("20240101"),
            valid_to: date("20241231"),
        }
    }

    #[test]
    fn wire_format() {
        let json = serde_json::to_string(&sample()).unwrap();
        assert_eq!(
            json,
            concat!(
                r#"{"stations":[{"id":"sf","name":"San Francisco"},"#,
                r#"{"id":"pa","name":"Palo Alto"},{"id":"sj","name":"San Jose Diridon"}],"#,
                r#""schedule":{"sf":{"n":[],"s":[[310,"101",0,0]]},"#,
                r#""sj":{"n":[[400,"102",1,0]],"s":[]}},"#,
                r#""holidays":{"20241225":1},"validFrom":"20240101","validTo":"20241231"}"#
            )
        );
    }

    #[test]
    fn wire_format_roundtrip() {
        let snapshot = sample();
        let json = serde_json::to_string_pretty(&snapshot).unwrap();
        let back: Snapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snapshot);
    }

    #[test]
    fn departures_lookup() {
        let snapshot = sample();
        assert_eq!(snapshot.departures("sf", Direction::South).len(), 1);
        assert!(snapshot.departures("sf", Direction::North).is_empty());
        assert!(snapshot.departures("nowhere", Direction::North).is_empty());
        assert_eq!(snapshot.departure_count(), 2);
    }

    #[test]
    fn direction_from_station_order() {
        let snapshot = sample();
        assert_eq!(snapshot.direction_between("sf", "sj"), Some(Direction::South));
        assert_eq!(snapshot.direction_between("sj", "pa"), Some(Direction::North));
        assert_eq!(snapshot.direction_between("sf", "sf"), None);
        assert_eq!(snapshot.direction_between("sf", "nowhere"), None);
    }

    #[test]
    fn validity_window_is_inclusive() {
        let snapshot = sample();
        assert!(snapshot.is_valid_on(date("20240101")));
        assert!(snapshot.is_valid_on(date("20241231")));
        assert!(!snapshot.is_valid_on(date("20231231")));
        assert!(!snapshot.is_valid_on(date("20250101")));
    }

    #[test]
    fn station_lookup() {
        let snapshot = sample();
        assert_eq!(snapshot.station("pa").unwrap().name, "Palo Alto");
        assert!(snapshot.station("zz").is_none());
    }
}
