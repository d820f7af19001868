//! Service-day resolution.

use chrono::{NaiveDateTime, Timelike};

use crate::domain::{
    FeedDate, HolidayMap, SERVICE_DAY_START_HOUR, ServiceType, classify_date,
};

/// The operating day a moment belongs to and the schedule it runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceDay {
    pub date: FeedDate,
    pub service_type: ServiceType,
}

/// Resolve the service day for a local wall-clock time.
///
/// Before 03:00 the previous calendar date is used, since trains running
/// after midnight belong to the day that started them. The date is then
/// classified by the holiday map, falling back to weekday/weekend.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use next_train::domain::{HolidayMap, ServiceType};
/// use next_train::query::resolve_service_day;
///
/// // Sunday 01:30 still runs Saturday's schedule; Monday 01:30 runs Sunday's
/// let monday = NaiveDate::from_ymd_opt(2024, 3, 11).unwrap();
/// let early = monday.and_hms_opt(1, 30, 0).unwrap();
/// let day = resolve_service_day(early, &HolidayMap::new());
/// assert_eq!(day.date.to_string(), "20240310");
/// assert_eq!(day.service_type, ServiceType::Weekend);
/// ```
pub fn resolve_service_day(now: NaiveDateTime, holidays: &HolidayMap) -> ServiceDay {
    resolve_service_day_with_start(now, holidays, SERVICE_DAY_START_HOUR)
}

/// As [`resolve_service_day`], with an explicit service-day start hour.
pub fn resolve_service_day_with_start(
    now: NaiveDateTime,
    holidays: &HolidayMap,
    start_hour: u32,
) -> ServiceDay {
    let calendar_date = now.date();
    let date = if now.hour() < start_hour {
        calendar_date.pred_opt().unwrap_or(calendar_date)
    } else {
        calendar_date
    };
    let date = FeedDate::new(date);

    ServiceDay {
        date,
        service_type: classify_date(date, holidays),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::HolidayOverride;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    fn date(s: &str) -> FeedDate {
        FeedDate::parse(s).unwrap()
    }

    fn holidays() -> HolidayMap {
        let mut map = HolidayMap::new();
        // Thursday
        map.insert(date("20241128"), HolidayOverride::Modified);
        // Monday
        map.insert(date("20240527"), HolidayOverride::Weekend);
        map
    }

    #[test]
    fn plain_monday_is_weekday() {
        let day = resolve_service_day(at(2024, 3, 11, 8, 0), &holidays());
        assert_eq!(day.date, date("20240311"));
        assert_eq!(day.service_type, ServiceType::Weekday);
    }

    #[test]
    fn saturday_and_sunday_are_weekend() {
        let sat = resolve_service_day(at(2024, 3, 16, 12, 0), &holidays());
        let sun = resolve_service_day(at(2024, 3, 17, 23, 59), &holidays());
        assert_eq!(sat.service_type, ServiceType::Weekend);
        assert_eq!(sun.service_type, ServiceType::Weekend);
    }

    #[test]
    fn modified_override_on_weekday() {
        let day = resolve_service_day(at(2024, 11, 28, 9, 0), &holidays());
        assert_eq!(day.service_type, ServiceType::Modified);
    }

    #[test]
    fn weekend_override_on_weekday() {
        let day = resolve_service_day(at(2024, 5, 27, 9, 0), &holidays());
        assert_eq!(day.service_type, ServiceType::Weekend);
    }

    #[test]
    fn before_three_uses_previous_date() {
        // 02:30 on Thanksgiving belongs to Wednesday's weekday service
        let day = resolve_service_day(at(2024, 11, 28, 2, 30), &holidays());
        assert_eq!(day.date, date("20241127"));
        assert_eq!(day.service_type, ServiceType::Weekday);

        // 01:00 the day after Thanksgiving still runs the holiday schedule
        let day = resolve_service_day(at(2024, 11, 29, 1, 0), &holidays());
        assert_eq!(day.date, date("20241128"));
        assert_eq!(day.service_type, ServiceType::Modified);
    }

    #[test]
    fn three_am_starts_new_day() {
        let day = resolve_service_day(at(2024, 3, 16, 3, 0), &holidays());
        assert_eq!(day.date, date("20240316"));
        assert_eq!(day.service_type, ServiceType::Weekend);

        // Saturday 02:59 still runs Friday's weekday schedule
        let day = resolve_service_day(at(2024, 3, 16, 2, 59), &holidays());
        assert_eq!(day.date, date("20240315"));
        assert_eq!(day.service_type, ServiceType::Weekday);
    }

    #[test]
    fn custom_start_hour() {
        let day = resolve_service_day_with_start(at(2024, 3, 16, 3, 30), &holidays(), 4);
        assert_eq!(day.date, date("20240315"));
    }
}
