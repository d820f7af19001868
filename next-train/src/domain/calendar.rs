//! Holiday overrides and date classification.

use std::collections::BTreeMap;

use serde::de;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::{FeedDate, ServiceType};

/// A calendar override for a single date.
///
/// Encoded as 1 (run the weekend schedule) or 2 (run the modified holiday
/// schedule).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum HolidayOverride {
    Weekend = 1,
    Modified = 2,
}

impl HolidayOverride {
    pub fn code(&self) -> u8 {
        *self as u8
    }

    /// The service type the override selects.
    pub fn service_type(&self) -> ServiceType {
        match self {
            HolidayOverride::Weekend => ServiceType::Weekend,
            HolidayOverride::Modified => ServiceType::Modified,
        }
    }
}

impl Serialize for HolidayOverride {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.code())
    }
}

impl<'de> Deserialize<'de> for HolidayOverride {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match u8::deserialize(deserializer)? {
            1 => Ok(HolidayOverride::Weekend),
            2 => Ok(HolidayOverride::Modified),
            other => Err(de::Error::invalid_value(
                de::Unexpected::Unsigned(other as u64),
                &"1 or 2",
            )),
        }
    }
}

/// Dates whose service differs from the normal weekday/weekend pattern.
pub type HolidayMap = BTreeMap<FeedDate, HolidayOverride>;

/// Which schedule runs on a service date.
///
/// An entry in the holiday map wins; otherwise Saturdays and Sundays run
/// the weekend schedule and every other day the weekday schedule.
pub fn classify_date(date: FeedDate, holidays: &HolidayMap) -> ServiceType {
    match holidays.get(&date) {
        Some(over) => over.service_type(),
        None if date.is_weekend() => ServiceType::Weekend,
        None => ServiceType::Weekday,
    }
}
