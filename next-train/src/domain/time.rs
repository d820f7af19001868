//! Service-day time handling.
//!
//! Feed times are "HH:MM:SS" strings counted from midnight of the service
//! day, so trips running after midnight carry hours of 24 or more. This
//! module keeps those values as plain minute counts and provides the
//! conversions between them and wall-clock time.

use chrono::{NaiveTime, Timelike};

/// Minutes in a calendar day.
pub const MINUTES_PER_DAY: u32 = 1440;

/// Hour of the local day at which a new service day begins.
///
/// Trains departing between midnight and this hour belong to the previous
/// service day's schedule.
pub const SERVICE_DAY_START_HOUR: u32 = 3;

/// Error returned when parsing an invalid time or date string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time: {reason}")]
pub struct TimeError {
    reason: &'static str,
}

impl TimeError {
    pub(crate) fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// Parse a feed time ("HH:MM:SS" or "H:MM:SS") into minutes since the start
/// of the service day.
///
/// Hours past 23 are preserved as-is, never wrapped. Seconds are validated
/// and then discarded.
///
/// # Examples
///
/// ```
/// use next_train::domain::parse_feed_time;
///
/// assert_eq!(parse_feed_time("05:10:00").unwrap(), 310);
/// assert_eq!(parse_feed_time("5:10:00").unwrap(), 310);
///
/// // Post-midnight trips keep counting from the service day's midnight
/// assert_eq!(parse_feed_time("24:14:00").unwrap(), 1454);
///
/// assert!(parse_feed_time("05:10").is_err());
/// assert!(parse_feed_time("05:61:00").is_err());
/// ```
pub fn parse_feed_time(s: &str) -> Result<u16, TimeError> {
    let mut parts = s.trim().split(':');
    let (Some(h), Some(m), Some(sec), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(TimeError::new("expected HH:MM:SS format"));
    };

    if h.is_empty() || h.len() > 2 {
        return Err(TimeError::new("hour must be one or two digits"));
    }
    let hour = parse_digits(h).ok_or_else(|| TimeError::new("invalid hour digits"))?;

    if m.len() != 2 {
        return Err(TimeError::new("minute must be two digits"));
    }
    let minute = parse_digits(m).ok_or_else(|| TimeError::new("invalid minute digits"))?;
    if minute > 59 {
        return Err(TimeError::new("minute must be 0-59"));
    }

    if sec.len() != 2 {
        return Err(TimeError::new("second must be two digits"));
    }
    let second = parse_digits(sec).ok_or_else(|| TimeError::new("invalid second digits"))?;
    if second > 59 {
        return Err(TimeError::new("second must be 0-59"));
    }

    Ok((hour * 60 + minute) as u16)
}

/// Minutes since local midnight for a wall-clock time, normalised onto the
/// service day.
///
/// Before the service-day start hour the value is shifted by a full day, so
/// 01:30 becomes 1530. This lines up with how post-midnight departures are
/// stored and lets callers compare directly against departure minutes.
///
/// # Examples
///
/// ```
/// use chrono::NaiveTime;
/// use next_train::domain::current_service_minutes;
///
/// let t = |h, m| NaiveTime::from_hms_opt(h, m, 0).unwrap();
/// assert_eq!(current_service_minutes(t(10, 30)), 630);
/// assert_eq!(current_service_minutes(t(0, 4)), 1444);
/// assert_eq!(current_service_minutes(t(3, 0)), 180);
/// ```
pub fn current_service_minutes(now: NaiveTime) -> u32 {
    service_minutes_with_start(now, SERVICE_DAY_START_HOUR)
}

/// As [`current_service_minutes`], with an explicit service-day start hour.
pub fn service_minutes_with_start(now: NaiveTime, start_hour: u32) -> u32 {
    let minutes = now.hour() * 60 + now.minute();
    if now.hour() < start_hour {
        minutes + MINUTES_PER_DAY
    } else {
        minutes
    }
}

/// Format a service-day minute as a 12-hour clock time ("3:45pm").
///
/// Values of a day or more wrap back onto the clock face, so 1454 shows as
/// "12:14am".
///
/// # Examples
///
/// ```
/// use next_train::domain::format_clock_time;
///
/// assert_eq!(format_clock_time(0), "12:00am");
/// assert_eq!(format_clock_time(720), "12:00pm");
/// assert_eq!(format_clock_time(945), "3:45pm");
/// assert_eq!(format_clock_time(1530), "1:30am");
/// ```
pub fn format_clock_time(minute: u32) -> String {
    let hour = (minute / 60) % 24;
    let mins = minute % 60;
    let display_hour = match hour % 12 {
        0 => 12,
        h => h,
    };
    let suffix = if hour < 12 { "am" } else { "pm" };
    format!("{display_hour}:{mins:02}{suffix}")
}

/// Parse one or more ASCII digits into a u32.
fn parse_digits(s: &str) -> Option<u32> {
    s.chars().try_fold(0u32, |acc, c| {
        let d = c.to_digit(10)?;
        acc.checked_mul(10)?.checked_add(d)
    })
}
