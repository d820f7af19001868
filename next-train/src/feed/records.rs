//! Typed rows for each feed table.
//!
//! Numbers, flags, times and dates are converted while the row is
//! deserialized. Optional columns default to `None` when absent from the
//! header or empty in the row.

use serde::{Deserialize, Deserializer};

use crate::domain::{FeedDate, parse_feed_time};

/// A row of `stops.txt`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StopRecord {
    pub stop_id: String,
    #[serde(default)]
    pub stop_name: String,
    #[serde(default)]
    pub stop_lat: Option<f64>,
    #[serde(default)]
    pub stop_lon: Option<f64>,
    /// 0 (or empty) = platform/stop, 1 = station.
    #[serde(default)]
    pub location_type: Option<u8>,
    #[serde(default)]
    pub parent_station: Option<String>,
}

impl StopRecord {
    pub fn is_station(&self) -> bool {
        self.location_type == Some(1)
    }
}

/// A row of `trips.txt`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TripRecord {
    pub route_id: String,
    pub service_id: String,
    pub trip_id: String,
    #[serde(default)]
    pub trip_headsign: Option<String>,
    /// Public train number.
    #[serde(default)]
    pub trip_short_name: Option<String>,
    #[serde(default)]
    pub direction_id: Option<u8>,
}

impl TripRecord {
    /// The train number riders see, falling back to the trip id.
    pub fn train_number(&self) -> &str {
        self.trip_short_name.as_deref().unwrap_or(&self.trip_id)
    }
}

/// A row of `stop_times.txt`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StopTimeRecord {
    pub trip_id: String,
    pub stop_id: String,
    /// Minutes since the service day's midnight.
    #[serde(default, deserialize_with = "optional_feed_time")]
    pub departure_time: Option<u16>,
    #[serde(default, deserialize_with = "optional_feed_time")]
    pub arrival_time: Option<u16>,
    #[serde(default)]
    pub stop_sequence: Option<u32>,
}

impl StopTimeRecord {
    /// Departure minute, falling back to the arrival minute at a terminus.
    pub fn minute(&self) -> Option<u16> {
        self.departure_time.or(self.arrival_time)
    }
}

/// A row of `calendar.txt`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CalendarRecord {
    pub service_id: String,
    #[serde(deserialize_with = "flag")]
    pub monday: bool,
    #[serde(deserialize_with = "flag")]
    pub tuesday: bool,
    #[serde(deserialize_with = "flag")]
    pub wednesday: bool,
    #[serde(deserialize_with = "flag")]
    pub thursday: bool,
    #[serde(deserialize_with = "flag")]
    pub friday: bool,
    #[serde(deserialize_with = "flag")]
    pub saturday: bool,
    #[serde(deserialize_with = "flag")]
    pub sunday: bool,
    pub start_date: FeedDate,
    pub end_date: FeedDate,
}

/// Whether a calendar exception adds or removes service on its date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExceptionType {
    Added,
    Removed,
}

impl<'de> Deserialize<'de> for ExceptionType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match u8::deserialize(deserializer)? {
            1 => Ok(ExceptionType::Added),
            2 => Ok(ExceptionType::Removed),
            other => Err(serde::de::Error::invalid_value(
                serde::de::Unexpected::Unsigned(other as u64),
                &"1 or 2",
            )),
        }
    }
}

/// A row of `calendar_dates.txt`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CalendarDateRecord {
    pub service_id: String,
    pub date: FeedDate,
    pub exception_type: ExceptionType,
}

/// A row of `routes.txt`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RouteRecord {
    pub route_id: String,
    #[serde(default)]
    pub route_short_name: Option<String>,
    #[serde(default)]
    pub route_long_name: Option<String>,
}

impl RouteRecord {
    /// The display name used to classify the route.
    pub fn display_name(&self) -> &str {
        self.route_long_name
            .as_deref()
            .or(self.route_short_name.as_deref())
            .unwrap_or(&self.route_id)
    }
}

/// Deserialize a 0/1 feed flag.
fn flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    match u8::deserialize(deserializer)? {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(serde::de::Error::invalid_value(
            serde::de::Unexpected::Unsigned(other as u64),
            &"0 or 1",
        )),
    }
}

/// Deserialize an optional "HH:MM:SS" time into service-day minutes.
fn optional_feed_time<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<u16>, D::Error> {
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => parse_feed_time(s)
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}
