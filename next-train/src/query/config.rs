//! Configuration for departure queries.

use chrono_tz::Tz;

use crate::domain::SERVICE_DAY_START_HOUR;

/// Latest service-day minute a departure may have and still be shown.
///
/// 1560 is 02:00 the following morning.
pub const DEFAULT_HORIZON_MINUTES: u32 = 1560;

/// Size of the "next" and "later" board sections.
pub const DEFAULT_BUCKET_SIZE: usize = 6;

/// Parameters for answering departure queries.
#[derive(Debug, Clone)]
pub struct QueryConfig {
    /// Local hour at which a new service day begins.
    pub service_day_start_hour: u32,

    /// Departures after this service-day minute are never returned.
    pub horizon_minutes: u32,

    /// Number of departures in each of the first two board sections.
    pub bucket_size: usize,

    /// Time zone the schedule's wall-clock times are expressed in.
    pub timezone: Tz,
}

impl QueryConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(
        service_day_start_hour: u32,
        horizon_minutes: u32,
        bucket_size: usize,
        timezone: Tz,
    ) -> Self {
        Self {
            service_day_start_hour,
            horizon_minutes,
            bucket_size,
            timezone,
        }
    }

    /// Default settings in another time zone.
    pub fn with_timezone(timezone: Tz) -> Self {
        Self {
            timezone,
            ..Self::default()
        }
    }
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            service_day_start_hour: SERVICE_DAY_START_HOUR,
            horizon_minutes: DEFAULT_HORIZON_MINUTES,
            bucket_size: DEFAULT_BUCKET_SIZE,
            timezone: chrono_tz::America::Los_Angeles,
        }
    }
}
