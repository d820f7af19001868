//! Departure records and their classification enums.

use std::fmt;

use serde::de::{self, SeqAccess, Visitor};
use serde::ser::SerializeTuple;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Error returned when decoding an out-of-range enum code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {kind} code: {code}")]
pub struct InvalidCode {
    kind: &'static str,
    code: u8,
}

/// Travel direction along the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    North,
    South,
}

impl Direction {
    /// Map a feed `direction_id` onto a direction.
    ///
    /// The feed marks northbound trips with 0 and southbound trips with 1.
    pub fn from_direction_id(id: u8) -> Option<Self> {
        match id {
            0 => Some(Direction::North),
            1 => Some(Direction::South),
            _ => None,
        }
    }

    /// Short key used in the snapshot ("n" or "s").
    pub fn key(&self) -> &'static str {
        match self {
            Direction::North => "n",
            Direction::South => "s",
        }
    }

    /// Parse a direction key. Accepts "n"/"s" and the full words.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "n" | "north" | "northbound" => Some(Direction::North),
            "s" | "south" | "southbound" => Some(Direction::South),
            _ => None,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Direction::North => "northbound",
            Direction::South => "southbound",
        })
    }
}

/// Stopping pattern of a train.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum RouteType {
    #[default]
    Local = 0,
    Limited = 1,
    Express = 2,
    SouthCounty = 3,
}

impl RouteType {
    /// Classify a route by its display name.
    ///
    /// Matching is case-insensitive on the words the operator uses in route
    /// names. Anything unrecognised is a local train.
    ///
    /// # Examples
    ///
    /// ```
    /// use next_train::domain::RouteType;
    ///
    /// assert_eq!(RouteType::from_route_name("Limited"), RouteType::Limited);
    /// assert_eq!(RouteType::from_route_name("Baby Bullet"), RouteType::Express);
    /// assert_eq!(RouteType::from_route_name("South County"), RouteType::SouthCounty);
    /// assert_eq!(RouteType::from_route_name("Weekend Shuttle"), RouteType::Local);
    /// ```
    pub fn from_route_name(name: &str) -> Self {
        let name = name.to_ascii_lowercase();
        if name.contains("south county") {
            RouteType::SouthCounty
        } else if name.contains("express") || name.contains("bullet") {
            RouteType::Express
        } else if name.contains("limited") {
            RouteType::Limited
        } else {
            RouteType::Local
        }
    }

    pub fn code(&self) -> u8 {
        *self as u8
    }

    pub fn from_code(code: u8) -> Result<Self, InvalidCode> {
        match code {
            0 => Ok(RouteType::Local),
            1 => Ok(RouteType::Limited),
            2 => Ok(RouteType::Express),
            3 => Ok(RouteType::SouthCounty),
            _ => Err(InvalidCode {
                kind: "route type",
                code,
            }),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RouteType::Local => "Local",
            RouteType::Limited => "Limited",
            RouteType::Express => "Express",
            RouteType::SouthCounty => "South County",
        }
    }
}

/// Which calendar variant of the timetable a departure runs under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ServiceType {
    Weekday = 0,
    Weekend = 1,
    /// Holiday-only special service.
    Modified = 2,
}

impl ServiceType {
    pub fn code(&self) -> u8 {
        *self as u8
    }

    pub fn from_code(code: u8) -> Result<Self, InvalidCode> {
        match code {
            0 => Ok(ServiceType::Weekday),
            1 => Ok(ServiceType::Weekend),
            2 => Ok(ServiceType::Modified),
            _ => Err(InvalidCode {
                kind: "service type",
                code,
            }),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ServiceType::Weekday => "weekday",
            ServiceType::Weekend => "weekend",
            ServiceType::Modified => "modified",
        }
    }
}

macro_rules! serde_as_code {
    ($ty:ty) => {
        impl Serialize for $ty {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_u8(self.code())
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let code = u8::deserialize(deserializer)?;
                <$ty>::from_code(code).map_err(de::Error::custom)
            }
        }
    };
}

serde_as_code!(RouteType);
serde_as_code!(ServiceType);

/// One train leaving one station.
///
/// `minute` counts from midnight of the service day and may exceed 1440 for
/// trains running after local midnight. On the wire a departure is the
/// positional tuple `[minute, trainNumber, routeType, serviceType]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Departure {
    pub minute: u16,
    pub train_number: String,
    pub route_type: RouteType,
    pub service_type: ServiceType,
}

impl Departure {
    pub fn new(
        minute: u16,
        train_number: impl Into<String>,
        route_type: RouteType,
        service_type: ServiceType,
    ) -> Self {
        Self {
            minute,
            train_number: train_number.into(),
            route_type,
            service_type,
        }
    }
}

impl Serialize for Departure {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut tuple = serializer.serialize_tuple(4)?;
        tuple.serialize_element(&self.minute)?;
        tuple.serialize_element(&self.train_number)?;
        tuple.serialize_element(&self.route_type)?;
        tuple.serialize_element(&self.service_type)?;
        tuple.end()
    }
}

impl<'de> Deserialize<'de> for Departure {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct DepartureVisitor;

        impl<'de> Visitor<'de> for DepartureVisitor {
            type Value = Departure;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a [minute, trainNumber, routeType, serviceType] tuple")
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Departure, A::Error> {
                let minute = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(0, &self))?;
                let train_number = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(1, &self))?;
                let route_type = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(2, &self))?;
                let service_type = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(3, &self))?;
                if seq.next_element::<de::IgnoredAny>()?.is_some() {
                    return Err(de::Error::invalid_length(5, &self));
                }
                Ok(Departure {
                    minute,
                    train_number,
                    route_type,
                    service_type,
                })
            }
        }

        deserializer.deserialize_tuple(4, DepartureVisitor)
    }
}
