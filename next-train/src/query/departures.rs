//! Destination-filtered departure lookups.

use std::collections::{HashMap, HashSet};

use crate::domain::{Departure, Direction, ServiceType};
use crate::snapshot::Snapshot;

use super::config::DEFAULT_HORIZON_MINUTES;

/// A departure lookup between two stations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepartureQuery<'q> {
    pub origin: &'q str,
    pub destination: &'q str,
    pub direction: Direction,
    pub service_type: ServiceType,
    /// Earliest service-day minute to return.
    pub now_minutes: u32,
    /// Latest service-day minute to return.
    pub horizon_minutes: u32,
}

impl<'q> DepartureQuery<'q> {
    /// Create a query with the default horizon.
    pub fn new(
        origin: &'q str,
        destination: &'q str,
        direction: Direction,
        service_type: ServiceType,
        now_minutes: u32,
    ) -> Self {
        Self {
            origin,
            destination,
            direction,
            service_type,
            now_minutes,
            horizon_minutes: DEFAULT_HORIZON_MINUTES,
        }
    }

    /// Replace the horizon.
    pub fn horizon(mut self, horizon_minutes: u32) -> Self {
        self.horizon_minutes = horizon_minutes;
        self
    }

    /// Departures from the origin, in ascending minute order, that run the
    /// requested service type inside the time window and also call at the
    /// destination in the same direction under the same service type.
    pub fn run<'s>(&self, snapshot: &'s Snapshot) -> Vec<&'s Departure> {
        let calling_at_destination: HashSet<&str> = snapshot
            .departures(self.destination, self.direction)
            .iter()
            .filter(|d| d.service_type == self.service_type)
            .map(|d| d.train_number.as_str())
            .collect();

        snapshot
            .departures(self.origin, self.direction)
            .iter()
            .filter(|d| d.service_type == self.service_type)
            .filter(|d| {
                let minute = u32::from(d.minute);
                self.now_minutes <= minute && minute <= self.horizon_minutes
            })
            .filter(|d| calling_at_destination.contains(d.train_number.as_str()))
            .collect()
    }

    /// As [`run`](Self::run), pairing each departure with the time the same
    /// train reaches the destination.
    ///
    /// The arrival is `None` when the destination's only call for that train
    /// is earlier than the origin's, which happens when the requested
    /// direction points away from the destination.
    pub fn trips<'s>(&self, snapshot: &'s Snapshot) -> Vec<Trip<'s>> {
        let mut arrivals: HashMap<&str, Vec<u16>> = HashMap::new();
        for d in snapshot.departures(self.destination, self.direction) {
            if d.service_type == self.service_type {
                arrivals
                    .entry(d.train_number.as_str())
                    .or_default()
                    .push(d.minute);
            }
        }

        self.run(snapshot)
            .into_iter()
            .map(|departure| {
                let arrival_minute = arrivals
                    .get(departure.train_number.as_str())
                    .and_then(|minutes| minutes.iter().copied().find(|&m| m >= departure.minute));
                Trip {
                    departure,
                    arrival_minute,
                }
            })
            .collect()
    }
}

/// A departure paired with its arrival at the destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Trip<'s> {
    pub departure: &'s Departure,
    pub arrival_minute: Option<u16>,
}

impl Trip<'_> {
    /// Minutes spent on board, when the arrival is known.
    pub fn duration_minutes(&self) -> Option<u16> {
        self.arrival_minute
            .map(|arrival| arrival.saturating_sub(self.departure.minute))
    }
}

/// Upcoming departures from `origin` that also call at `destination`.
///
/// Only departures of `service_type` between `now_minutes` and 02:00 the
/// next morning (minute 1560) are returned, ascending by minute. Unknown
/// stations give an empty list.
///
/// # Examples
///
/// ```
/// use next_train::domain::{Direction, ServiceType};
/// use next_train::query::query_departures;
/// # use next_train::snapshot::Snapshot;
/// # let snapshot: Snapshot = serde_json::from_str(r#"{
/// #   "stations": [{"id": "sf", "name": "San Francisco"}, {"id": "pa", "name": "Palo Alto"}],
/// #   "schedule": {
/// #     "sf": {"s": [[310, "101", 0, 0], [344, "102", 2, 0]]},
/// #     "pa": {"s": [[340, "101", 0, 0]]}
/// #   },
/// #   "holidays": {}, "validFrom": "20240101", "validTo": "20241231"
/// # }"#).unwrap();
///
/// let trains: Vec<_> =
///     query_departures(&snapshot, "sf", "pa", Direction::South, ServiceType::Weekday, 300)
///         .into_iter()
///         .map(|d| d.train_number.as_str())
///         .collect();
/// // 102 runs through Palo Alto without stopping
/// assert_eq!(trains, ["101"]);
/// ```
pub fn query_departures<'s>(
    snapshot: &'s Snapshot,
    origin: &str,
    destination: &str,
    direction: Direction,
    service_type: ServiceType,
    now_minutes: u32,
) -> Vec<&'s Departure> {
    DepartureQuery::new(origin, destination, direction, service_type, now_minutes).run(snapshot)
}

/// As [`query_departures`], pairing each departure with its arrival time.
pub fn query_trips<'s>(
    snapshot: &'s Snapshot,
    origin: &str,
    destination: &str,
    direction: Direction,
    service_type: ServiceType,
    now_minutes: u32,
) -> Vec<Trip<'s>> {
    DepartureQuery::new(origin, destination, direction, service_type, now_minutes).trips(snapshot)
}


#[cfg(test)]
mod proptests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::domain::{FeedDate, HolidayMap, RouteType, Station};
    use crate::snapshot::StationTimetable;
    use proptest::prelude::*;

    fn bucket() -> impl Strategy<Value = Vec<Departure>> {
        proptest::collection::vec((0u16..1700, 0u8..8, 0u8..3), 0..40).prop_map(|raw| {
            let mut deps: Vec<_> = raw
                .into_iter()
                .map(|(minute, train, service)| {
                    Departure::new(
                        minute,
                        format!("{}", 100 + train),
                        RouteType::Local,
                        ServiceType::from_code(service).unwrap(),
                    )
                })
                .collect();
            crate::compactor::sort_and_dedup(&mut deps);
            deps
        })
    }

    fn snapshot(origin: Vec<Departure>, dest: Vec<Departure>) -> Snapshot {
        let mut schedule = BTreeMap::new();
        schedule.insert("a".to_string(), StationTimetable { n: vec![], s: origin });
        schedule.insert("b".to_string(), StationTimetable { n: vec![], s: dest });
        Snapshot {
            stations: vec![Station::new("a", "A"), Station::new("b", "B")],
            schedule,
            holidays: HolidayMap::new(),
            valid_from: FeedDate::parse("20240101").unwrap(),
            valid_to: FeedDate::parse("20241231").unwrap(),
        }
    }

    proptest! {
        /// Every result honours the query contract and results stay sorted
        #[test]
        fn results_satisfy_contract(
            origin in bucket(),
            dest in bucket(),
            service in 0u8..3,
            now in 0u32..1700,
        ) {
            let service = ServiceType::from_code(service).unwrap();
            let snapshot = snapshot(origin, dest);
            let results = query_departures(&snapshot, "a", "b", Direction::South, service, now);

            prop_assert!(results.windows(2).all(|w| w[0].minute <= w[1].minute));
            for d in &results {
                prop_assert_eq!(d.service_type, service);
                prop_assert!(u32::from(d.minute) >= now);
                prop_assert!(u32::from(d.minute) <= DEFAULT_HORIZON_MINUTES);
                let calls_at_dest = snapshot
                    .departures("b", Direction::South)
                    .iter()
                    .any(|a| a.train_number == d.train_number && a.service_type == service);
                prop_assert!(calls_at_dest);
            }
        }

        /// Every qualifying origin departure is returned
        #[test]
        fn results_are_complete(
            origin in bucket(),
            dest in bucket(),
            service in 0u8..3,
            now in 0u32..1700,
        ) {
            let service = ServiceType::from_code(service).unwrap();
            let snapshot = snapshot(origin, dest);
            let results = query_departures(&snapshot, "a", "b", Direction::South, service, now);

            let expected = snapshot
                .departures("a", Direction::South)
                .iter()
                .filter(|d| d.service_type == service)
                .filter(|d| (now..=DEFAULT_HORIZON_MINUTES).contains(&u32::from(d.minute)))
                .filter(|d| snapshot.departures("b", Direction::South).iter().any(|a| {
                    a.train_number == d.train_number && a.service_type == service
                }))
                .count();
            prop_assert_eq!(results.len(), expected);
        }

        /// Paired arrivals never precede their departure
        #[test]
        fn arrivals_follow_departures(
            origin in bucket(),
            dest in bucket(),
            service in 0u8..3,
            now in 0u32..1700,
        ) {
            let service = ServiceType::from_code(service).unwrap();
            let snapshot = snapshot(origin, dest);
            for trip in query_trips(&snapshot, "a", "b", Direction::South, service, now) {
                if let Some(arrival) = trip.arrival_minute {
                    prop_assert!(arrival >= trip.departure.minute);
                }
            }
        }
    }
}
