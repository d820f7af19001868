//! Raw transit-feed tables.
//!
//! Reads the six GTFS text files the compactor needs into typed rows. A
//! missing file or unreadable header aborts the load; a row whose values
//! fail to parse is skipped and counted.

mod error;
mod records;

use std::io::Read;
use std::path::Path;

use serde::de::DeserializeOwned;
use tracing::{info, warn};

pub use error::FeedError;
pub use records::{
    CalendarDateRecord, CalendarRecord, ExceptionType, RouteRecord, StopRecord, StopTimeRecord,
    TripRecord,
};

/// A feed table: its file name and the columns every row needs.
pub trait FeedTable: DeserializeOwned {
    const FILE: &'static str;
    const REQUIRED: &'static [&'static str];
}

impl FeedTable for StopRecord {
    const FILE: &'static str = "stops.txt";
    const REQUIRED: &'static [&'static str] = &["stop_id"];
}

impl FeedTable for TripRecord {
    const FILE: &'static str = "trips.txt";
    const REQUIRED: &'static [&'static str] = &["route_id", "service_id", "trip_id"];
}

impl FeedTable for StopTimeRecord {
    const FILE: &'static str = "stop_times.txt";
    const REQUIRED: &'static [&'static str] = &["trip_id", "stop_id"];
}

impl FeedTable for CalendarRecord {
    const FILE: &'static str = "calendar.txt";
    const REQUIRED: &'static [&'static str] = &[
        "service_id",
        "monday",
        "tuesday",
        "wednesday",
        "thursday",
        "friday",
        "saturday",
        "sunday",
        "start_date",
        "end_date",
    ];
}

impl FeedTable for CalendarDateRecord {
    const FILE: &'static str = "calendar_dates.txt";
    const REQUIRED: &'static [&'static str] = &["service_id", "date", "exception_type"];
}

impl FeedTable for RouteRecord {
    const FILE: &'static str = "routes.txt";
    const REQUIRED: &'static [&'static str] = &["route_id"];
}

/// Rows of one parsed table plus the number of rows dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct Table<T> {
    pub rows: Vec<T>,
    pub skipped: usize,
}

/// All feed tables the compactor reads.
#[derive(Debug, Clone, Default)]
pub struct FeedTables {
    pub stops: Vec<StopRecord>,
    pub trips: Vec<TripRecord>,
    pub stop_times: Vec<StopTimeRecord>,
    pub calendar: Vec<CalendarRecord>,
    pub calendar_dates: Vec<CalendarDateRecord>,
    pub routes: Vec<RouteRecord>,
    /// Rows dropped across all tables because their values did not parse.
    pub skipped_rows: usize,
}

impl FeedTables {
    /// Load every table from a feed directory.
    pub fn load(dir: &Path) -> Result<Self, FeedError> {
        info!(dir = %dir.display(), "Loading feed tables");

        let stops = read_table_file::<StopRecord>(dir)?;
        let trips = read_table_file::<TripRecord>(dir)?;
        let stop_times = read_table_file::<StopTimeRecord>(dir)?;
        let calendar = read_table_file::<CalendarRecord>(dir)?;
        let calendar_dates = read_table_file::<CalendarDateRecord>(dir)?;
        let routes = read_table_file::<RouteRecord>(dir)?;

        let skipped_rows = stops.skipped
            + trips.skipped
            + stop_times.skipped
            + calendar.skipped
            + calendar_dates.skipped
            + routes.skipped;

        Ok(Self {
            stops: stops.rows,
            trips: trips.rows,
            stop_times: stop_times.rows,
            calendar: calendar.rows,
            calendar_dates: calendar_dates.rows,
            routes: routes.rows,
            skipped_rows,
        })
    }
}

/// Read one table from `dir`.
pub fn read_table_file<T: FeedTable>(dir: &Path) -> Result<Table<T>, FeedError> {
    let path = dir.join(T::FILE);
    let file = std::fs::File::open(&path).map_err(|e| FeedError::Open {
        path: path.clone(),
        source: csv::Error::from(e),
    })?;
    read_table(file)
}

/// Read one table from any reader.
pub fn read_table<T: FeedTable, R: Read>(reader: R) -> Result<Table<T>, FeedError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = rdr
        .headers()
        .map_err(|source| FeedError::Malformed {
            table: T::FILE,
            source,
        })?
        .clone();
    for &column in T::REQUIRED {
        if !headers.iter().any(|h| h == column) {
            return Err(FeedError::MissingColumn {
                table: T::FILE,
                column,
            });
        }
    }

    let mut rows = Vec::new();
    let mut skipped = 0usize;
    for result in rdr.deserialize::<T>() {
        match result {
            Ok(row) => rows.push(row),
            Err(e) if is_row_error(&e) => skipped += 1,
            Err(source) => {
                return Err(FeedError::Malformed {
                    table: T::FILE,
                    source,
                });
            }
        }
    }

    if skipped > 0 {
        warn!(table = T::FILE, skipped, "Skipped unparseable feed rows");
    }
    info!(table = T::FILE, count = rows.len(), "Parsed feed table");

    Ok(Table { rows, skipped })
}

/// Whether a CSV error concerns a single row rather than the whole file.
fn is_row_error(err: &csv::Error) -> bool {
    matches!(
        err.kind(),
        csv::ErrorKind::Deserialize { .. } | csv::ErrorKind::UnequalLengths { .. }
    )
}
