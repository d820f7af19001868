//! Feed-native calendar dates.

use std::fmt;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::TimeError;

/// A calendar date in the feed's "YYYYMMDD" form.
///
/// Serializes as the 8-digit string, which also makes it usable as a JSON
/// map key. Ordering is chronological.
///
/// # Examples
///
/// ```
/// use next_train::domain::FeedDate;
///
/// let date = FeedDate::parse("20241225").unwrap();
/// assert_eq!(date.to_string(), "20241225");
///
/// assert!(FeedDate::parse("2024-12-25").is_err());
/// assert!(FeedDate::parse("20241332").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FeedDate(NaiveDate);

impl FeedDate {
    /// Wrap a chrono date.
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Parse a date from "YYYYMMDD".
    pub fn parse(s: &str) -> Result<Self, TimeError> {
        let s = s.trim();
        if s.len() != 8 || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(TimeError::new("expected YYYYMMDD date"));
        }
        let year: i32 = s[0..4]
            .parse()
            .map_err(|_| TimeError::new("invalid year"))?;
        let month: u32 = s[4..6]
            .parse()
            .map_err(|_| TimeError::new("invalid month"))?;
        let day: u32 = s[6..8].parse().map_err(|_| TimeError::new("invalid day"))?;

        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self)
            .ok_or_else(|| TimeError::new("date out of range"))
    }

    /// Returns the underlying chrono date.
    pub fn date(&self) -> NaiveDate {
        self.0
    }

    /// Returns the day of the week.
    pub fn weekday(&self) -> Weekday {
        self.0.weekday()
    }

    /// Whether the date falls on a Saturday or Sunday.
    pub fn is_weekend(&self) -> bool {
        matches!(self.weekday(), Weekday::Sat | Weekday::Sun)
    }
}

impl From<NaiveDate> for FeedDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl fmt::Debug for FeedDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FeedDate({self})")
    }
}

impl fmt::Display for FeedDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}{:02}{:02}",
            self.0.year(),
            self.0.month(),
            self.0.day()
        )
    }
}

impl Serialize for FeedDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for FeedDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct FeedDateVisitor;

        impl Visitor<'_> for FeedDateVisitor {
            type Value = FeedDate;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a YYYYMMDD date string")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<FeedDate, E> {
                FeedDate::parse(v).map_err(E::custom)
            }
        }

        deserializer.deserialize_str(FeedDateVisitor)
    }
}
