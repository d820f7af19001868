//! Service calendar classification and holiday detection.

use std::collections::{BTreeMap, HashMap};

use crate::domain::{FeedDate, HolidayMap, HolidayOverride, ServiceType};
use crate::feed::{CalendarDateRecord, CalendarRecord, ExceptionType};

/// Classify every calendar service as weekday or weekend.
///
/// A service running on Saturday is a weekend service whatever its other
/// flags say; everything else in the calendar is a weekday service.
/// Services missing from this map exist only through exceptions and run as
/// [`ServiceType::Modified`].
pub(super) fn service_types(calendar: &[CalendarRecord]) -> HashMap<&str, ServiceType> {
    calendar
        .iter()
        .map(|c| {
            let kind = if c.saturday {
                ServiceType::Weekend
            } else {
                ServiceType::Weekday
            };
            (c.service_id.as_str(), kind)
        })
        .collect()
}

/// The service type a trip runs under.
pub(super) fn service_type_of(
    services: &HashMap<&str, ServiceType>,
    service_id: &str,
) -> ServiceType {
    services
        .get(service_id)
        .copied()
        .unwrap_or(ServiceType::Modified)
}

/// Build the holiday override table from the exception records.
///
/// A date where an exception adds an exception-only service runs the
/// modified schedule. Otherwise, a date where an exception removes a
/// weekday service runs the weekend schedule. Other dates are left out.
pub(super) fn holidays(
    exceptions: &[CalendarDateRecord],
    services: &HashMap<&str, ServiceType>,
) -> HolidayMap {
    #[derive(Default)]
    struct DateFlags {
        adds_modified: bool,
        removes_weekday: bool,
    }

    let mut flags: BTreeMap<FeedDate, DateFlags> = BTreeMap::new();
    for ex in exceptions {
        let entry = flags.entry(ex.date).or_default();
        match (ex.exception_type, service_type_of(services, &ex.service_id)) {
            (ExceptionType::Added, ServiceType::Modified) => entry.adds_modified = true,
            (ExceptionType::Removed, ServiceType::Weekday) => entry.removes_weekday = true,
            _ => {}
        }
    }

    flags
        .into_iter()
        .filter_map(|(date, f)| {
            if f.adds_modified {
                Some((date, HolidayOverride::Modified))
            } else if f.removes_weekday {
                Some((date, HolidayOverride::Weekend))
            } else {
                None
            }
        })
        .collect()
}

/// Overall date range the feed covers.
///
/// Taken from the calendar's start and end dates. A feed whose calendar is
/// empty falls back to the range of its exception dates.
pub(super) fn validity(
    calendar: &[CalendarRecord],
    exceptions: &[CalendarDateRecord],
) -> Option<(FeedDate, FeedDate)> {
    let from = calendar.iter().map(|c| c.start_date).min();
    let to = calendar.iter().map(|c| c.end_date).max();
    match (from, to) {
        (Some(from), Some(to)) => Some((from, to)),
        _ => {
            let from = exceptions.iter().map(|e| e.date).min()?;
            let to = exceptions.iter().map(|e| e.date).max()?;
            Some((from, to))
        }
    }
}
