//! Feed compactor.
//!
//! Turns the raw feed tables into a [`Snapshot`]: the station list, each
//! station's departures by direction, the holiday override table and the
//! feed's validity window.
//!
//! The stages share nothing but the immutable lookup maps built at the
//! start, and the output depends only on the input tables, so compacting
//! the same feed twice gives byte-identical documents.

mod calendar;
mod lookups;
mod timetable;

use std::path::Path;

use tracing::info;

use crate::domain::FeedDate;
use crate::feed::{FeedError, FeedTables};
use crate::snapshot::Snapshot;

pub use timetable::sort_and_dedup;

/// Default agency name stripped from station names.
pub const DEFAULT_AGENCY_NAME: &str = "Caltrain";

/// Configuration for compaction.
#[derive(Debug, Clone)]
pub struct CompactConfig {
    /// Agency name removed from the end of station names.
    pub agency_name: String,

    /// Station records whose names contain any of these are dropped.
    pub excluded_name_parts: Vec<String>,
}

impl CompactConfig {
    /// Create a config for the given agency with the default exclusions.
    pub fn new(agency_name: impl Into<String>) -> Self {
        Self {
            agency_name: agency_name.into(),
            ..Self::default()
        }
    }
}

impl Default for CompactConfig {
    fn default() -> Self {
        Self {
            agency_name: DEFAULT_AGENCY_NAME.to_string(),
            excluded_name_parts: vec!["Shuttle".to_string(), "Elevator".to_string()],
        }
    }
}

/// Errors that stop compaction. No snapshot is produced when one occurs.
#[derive(Debug, thiserror::Error)]
pub enum CompactError {
    /// The feed directory could not be read
    #[error(transparent)]
    Feed(#[from] FeedError),

    /// Neither the calendar nor its exceptions carry any date
    #[error("feed has no service dates; cannot determine validity window")]
    NoServiceDates,
}

/// Counts describing a finished compaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompactSummary {
    pub stations: usize,
    pub departures: usize,
    pub holidays: usize,
    pub valid_from: FeedDate,
    pub valid_to: FeedDate,
    /// Stop-times dropped because their trip, station or time was unknown.
    pub skipped_stop_times: usize,
    /// Exact duplicate departures removed.
    pub duplicates_removed: usize,
}

/// A compacted snapshot and its summary.
#[derive(Debug, Clone)]
pub struct Compaction {
    pub snapshot: Snapshot,
    pub summary: CompactSummary,
}

/// Load a feed directory and compact it.
pub fn compact_dir(dir: &Path, config: &CompactConfig) -> Result<Compaction, CompactError> {
    let feed = FeedTables::load(dir)?;
    compact(&feed, config)
}

/// Compact loaded feed tables into a snapshot.
pub fn compact(feed: &FeedTables, config: &CompactConfig) -> Result<Compaction, CompactError> {
    let (valid_from, valid_to) = calendar::validity(&feed.calendar, &feed.calendar_dates)
        .ok_or(CompactError::NoServiceDates)?;

    let lookups = lookups::Lookups::build(&feed.stops, &feed.trips, &feed.routes);
    let services = calendar::service_types(&feed.calendar);
    let holidays = calendar::holidays(&feed.calendar_dates, &services);
    info!(
        parents = lookups.parent_of.len(),
        trips = lookups.trips.len(),
        routes = lookups.route_types.len(),
        services = services.len(),
        holidays = holidays.len(),
        "Built lookup tables"
    );

    let timetables = timetable::build(&feed.stop_times, &lookups, &services);

    let stations: Vec<_> = lookups::station_list(&feed.stops, config)
        .into_iter()
        .filter(|s| {
            timetables
                .schedule
                .get(&s.id)
                .is_some_and(|t| !t.is_empty())
        })
        .collect();

    let snapshot = Snapshot {
        stations,
        schedule: timetables.schedule,
        holidays,
        valid_from,
        valid_to,
    };

    let summary = CompactSummary {
        stations: snapshot.stations.len(),
        departures: snapshot.departure_count(),
        holidays: snapshot.holidays.len(),
        valid_from,
        valid_to,
        skipped_stop_times: timetables.skipped,
        duplicates_removed: timetables.duplicates,
    };
    info!(
        stations = summary.stations,
        departures = summary.departures,
        holidays = summary.holidays,
        skipped = summary.skipped_stop_times,
        duplicates = summary.duplicates_removed,
        "Compacted feed"
    );

    Ok(Compaction { snapshot, summary })
}
