//! Domain types for the departure board.
//!
//! Feed values are validated when they enter these types, so the compactor
//! and the query engine can work with plain minutes, dates and enums instead
//! of re-reading strings.

mod calendar;
mod date;
mod departure;
mod station;
mod time;

pub use calendar::{HolidayMap, HolidayOverride, classify_date};
pub use date::FeedDate;
pub use departure::{Departure, Direction, InvalidCode, RouteType, ServiceType};
pub use station::{Station, display_name};
pub use time::{
    MINUTES_PER_DAY, SERVICE_DAY_START_HOUR, TimeError, current_service_minutes,
    format_clock_time, parse_feed_time, service_minutes_with_start,
};
