//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{Station, format_clock_time};
use crate::query::{BoardEntry, DepartureBoard};
use crate::snapshot::Snapshot;

/// A station in API responses.
#[derive(Debug, Serialize)]
pub struct StationResult {
    /// Parent-station id
    pub id: String,

    /// Display name
    pub name: String,
}

impl From<&Station> for StationResult {
    fn from(station: &Station) -> Self {
        Self {
            id: station.id.clone(),
            name: station.name.clone(),
        }
    }
}

/// Response listing every station, north to south.
#[derive(Debug, Serialize)]
pub struct StationsResponse {
    pub stations: Vec<StationResult>,

    /// First date the schedule covers (YYYYMMDD)
    pub valid_from: String,

    /// Last date the schedule covers (YYYYMMDD)
    pub valid_to: String,
}

impl StationsResponse {
    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        Self {
            stations: snapshot.stations.iter().map(StationResult::from).collect(),
            valid_from: snapshot.valid_from.to_string(),
            valid_to: snapshot.valid_to.to_string(),
        }
    }
}

/// Request for upcoming departures between two stations.
#[derive(Debug, Deserialize)]
pub struct DeparturesRequest {
    /// Origin station id
    pub from: String,

    /// Destination station id
    pub to: String,

    /// "n" or "s"; inferred from station order when absent
    pub direction: Option<String>,

    /// RFC 3339 timestamp (defaults to now)
    pub at: Option<String>,
}

/// One train on the board.
#[derive(Debug, Serialize)]
pub struct DepartureResult {
    /// Public train number (e.g., "101")
    pub train_number: String,

    /// Stopping pattern label (e.g., "Express")
    pub route: String,

    /// Departure time on a 12-hour clock
    pub departs: String,

    /// Departure as minutes since the service day's midnight
    pub departure_minute: u16,

    /// Arrival time at the destination, when known
    pub arrives: Option<String>,

    /// Minutes on board, when the arrival is known
    pub duration_minutes: Option<u16>,
}

impl From<&BoardEntry> for DepartureResult {
    fn from(entry: &BoardEntry) -> Self {
        Self {
            train_number: entry.train_number.clone(),
            route: entry.route_type.label().to_string(),
            departs: entry.departs(),
            departure_minute: entry.departure_minute,
            arrives: entry.arrives(),
            duration_minutes: entry.duration_minutes(),
        }
    }
}

/// Departure board response.
#[derive(Debug, Serialize)]
pub struct DeparturesResponse {
    pub origin: StationResult,
    pub destination: StationResult,

    /// "northbound" or "southbound"
    pub direction: String,

    /// Service day the board belongs to (YYYYMMDD)
    pub service_date: String,

    /// Schedule in effect ("weekday", "weekend" or "modified")
    pub service_type: String,

    /// Current time on a 12-hour clock
    pub now: String,

    /// Whether the service date lies inside the schedule's validity window
    pub schedule_valid: bool,

    pub next: Vec<DepartureResult>,
    pub later: Vec<DepartureResult>,
    pub rest: Vec<DepartureResult>,
}

impl DeparturesResponse {
    pub fn from_board(
        board: &DepartureBoard,
        origin: &Station,
        destination: &Station,
        schedule_valid: bool,
    ) -> Self {
        let rows = |entries: &[BoardEntry]| -> Vec<DepartureResult> {
            entries.iter().map(DepartureResult::from).collect()
        };
        Self {
            origin: origin.into(),
            destination: destination.into(),
            direction: board.direction.to_string(),
            service_date: board.service_date.to_string(),
            service_type: board.service_type.label().to_string(),
            now: format_clock_time(board.now_minutes),
            schedule_valid,
            next: rows(&board.next),
            later: rows(&board.later),
            rest: rows(&board.rest),
        }
    }
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}
