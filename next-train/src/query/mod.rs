//! Departure query engine.
//!
//! Answers "which trains can I catch from here to there, starting now?"
//! against an immutable [`Snapshot`]. Everything here is pure computation;
//! the engine holds no mutable state and may be shared between threads.

mod board;
mod config;
mod departures;
mod service_day;

use std::sync::Arc;

use chrono::{DateTime, NaiveDateTime, TimeZone};

use crate::domain::{Direction, service_minutes_with_start};
use crate::snapshot::Snapshot;

pub use board::{BoardEntry, DepartureBoard, Sections, partition};
pub use config::{DEFAULT_BUCKET_SIZE, DEFAULT_HORIZON_MINUTES, QueryConfig};
pub use departures::{DepartureQuery, Trip, query_departures, query_trips};
pub use service_day::{ServiceDay, resolve_service_day, resolve_service_day_with_start};

/// A snapshot paired with the settings used to query it.
#[derive(Debug, Clone)]
pub struct QueryEngine {
    snapshot: Arc<Snapshot>,
    config: QueryConfig,
}

impl QueryEngine {
    pub fn new(snapshot: Arc<Snapshot>, config: QueryConfig) -> Self {
        Self { snapshot, config }
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn config(&self) -> &QueryConfig {
        &self.config
    }

    /// Convert an instant into wall-clock time in the transit time zone.
    pub fn local_time<Tz: TimeZone>(&self, at: &DateTime<Tz>) -> NaiveDateTime {
        at.with_timezone(&self.config.timezone).naive_local()
    }

    /// The service day a local time belongs to.
    pub fn service_day(&self, local: NaiveDateTime) -> ServiceDay {
        resolve_service_day_with_start(
            local,
            &self.snapshot.holidays,
            self.config.service_day_start_hour,
        )
    }

    /// Minutes since the start of the service day's midnight.
    pub fn service_minutes(&self, local: NaiveDateTime) -> u32 {
        service_minutes_with_start(local.time(), self.config.service_day_start_hour)
    }

    /// Build the departure board for a trip at a local time.
    pub fn board(
        &self,
        origin: &str,
        destination: &str,
        direction: Direction,
        local: NaiveDateTime,
    ) -> DepartureBoard {
        let day = self.service_day(local);
        let now_minutes = self.service_minutes(local);

        let trips = DepartureQuery::new(
            origin,
            destination,
            direction,
            day.service_type,
            now_minutes,
        )
        .horizon(self.config.horizon_minutes)
        .trips(&self.snapshot);
        let (next, later, rest) = board::sections_from_trips(&trips, self.config.bucket_size);

        DepartureBoard {
            origin: origin.to_string(),
            destination: destination.to_string(),
            direction,
            service_date: day.date,
            service_type: day.service_type,
            now_minutes,
            next,
            later,
            rest,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use chrono::{NaiveDate, Utc};

    use super::*;
    use crate::domain::{
        Departure, FeedDate, HolidayMap, HolidayOverride, RouteType, ServiceType, Station,
    };
    use crate::snapshot::StationTimetable;

    fn date(s: &str) -> FeedDate {
        FeedDate::parse(s).unwrap()
    }

    fn local(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    /// Fifteen weekday trains a minute apart and the sample's weekend and
    /// holiday trains, all calling at both stations.
    fn engine() -> QueryEngine {
        let mut origin = Vec::new();
        let mut dest = Vec::new();
        for i in 0..15u16 {
            let train = format!("{}", 101 + i);
            origin.push(Departure::new(
                600 + i,
                train.clone(),
                RouteType::Local,
                ServiceType::Weekday,
            ));
            dest.push(Departure::new(630 + i, train, RouteType::Local, ServiceType::Weekday));
        }
        origin.push(Departure::new(400, "201", RouteType::Express, ServiceType::Weekend));
        dest.push(Departure::new(420, "201", RouteType::Express, ServiceType::Weekend));
        origin.push(Departure::new(1454, "664", RouteType::Local, ServiceType::Weekend));
        dest.push(Departure::new(1474, "664", RouteType::Local, ServiceType::Weekend));
        origin.push(Departure::new(500, "M101", RouteType::Local, ServiceType::Modified));
        dest.push(Departure::new(520, "M101", RouteType::Local, ServiceType::Modified));
        origin.sort_by_key(|d| d.minute);
        dest.sort_by_key(|d| d.minute);

        let mut schedule = BTreeMap::new();
        schedule.insert("sf".to_string(), StationTimetable { n: vec![], s: origin });
        schedule.insert("sj".to_string(), StationTimetable { n: vec![], s: dest });

        let mut holidays = HolidayMap::new();
        holidays.insert(date("20241128"), HolidayOverride::Modified);

        let snapshot = Snapshot {
            stations: vec![Station::new("sf", "San Francisco"), Station::new("sj", "San Jose")],
            schedule,
            holidays,
            valid_from: date("20240101"),
            valid_to: date("20241231"),
        };
        QueryEngine::new(Arc::new(snapshot), QueryConfig::default())
    }

    #[test]
    fn weekday_board_sections() {
        let engine = engine();
        // Monday 09:00
        let board = engine.board("sf", "sj", Direction::South, local(2024, 3, 11, 9, 0));

        assert_eq!(board.service_type, ServiceType::Weekday);
        assert_eq!(board.now_minutes, 540);
        assert_eq!(board.next.len(), 6);
        assert_eq!(board.later.len(), 6);
        assert_eq!(board.rest.len(), 3);
        assert_eq!(board.len(), 15);
        assert_eq!(board.next[0].train_number, "101");
        assert_eq!(board.next[0].departs(), "10:00am");
        assert_eq!(board.next[0].arrives().as_deref(), Some("10:30am"));
        assert_eq!(board.rest[2].train_number, "115");
    }

    #[test]
    fn board_entries_are_in_order() {
        let engine = engine();
        let board = engine.board("sf", "sj", Direction::South, local(2024, 3, 11, 10, 5));
        let minutes: Vec<_> = board.entries().map(|e| e.departure_minute).collect();
        assert_eq!(minutes, (605..615).collect::<Vec<u16>>());
    }

    #[test]
    fn holiday_board_uses_modified_schedule() {
        let engine = engine();
        let board = engine.board("sf", "sj", Direction::South, local(2024, 11, 28, 4, 0));
        assert_eq!(board.service_type, ServiceType::Modified);
        let trains: Vec<_> = board.entries().map(|e| e.train_number.as_str()).collect();
        assert_eq!(trains, ["M101"]);
    }

    #[test]
    fn late_night_board_continues_previous_day() {
        let engine = engine();
        // Sunday 00:10 still runs Saturday's schedule; 664 leaves at 00:14
        let board = engine.board("sf", "sj", Direction::South, local(2024, 3, 17, 0, 10));
        assert_eq!(board.service_date, date("20240316"));
        assert_eq!(board.service_type, ServiceType::Weekend);
        assert_eq!(board.now_minutes, 1450);
        let trains: Vec<_> = board.entries().map(|e| e.train_number.as_str()).collect();
        assert_eq!(trains, ["664"]);
        assert_eq!(board.next[0].departs(), "12:14am");
    }

    #[test]
    fn empty_board_is_valid() {
        let engine = engine();
        let board = engine.board("sf", "sj", Direction::North, local(2024, 3, 11, 9, 0));
        assert!(board.is_empty());
        assert_eq!(board.len(), 0);
    }

    #[test]
    fn local_time_converts_to_transit_zone() {
        let engine = engine();
        // Daylight time has started by 11 March
        let utc = Utc.with_ymd_and_hms(2024, 3, 11, 17, 0, 0).unwrap();
        assert_eq!(engine.local_time(&utc), local(2024, 3, 11, 10, 0));

        let winter = Utc.with_ymd_and_hms(2024, 1, 15, 17, 0, 0).unwrap();
        assert_eq!(engine.local_time(&winter), local(2024, 1, 15, 9, 0));
    }

    #[test]
    fn engine_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<QueryEngine>();
    }
}
