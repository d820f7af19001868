//! Per-station departure lists.

use std::collections::{BTreeMap, HashMap, HashSet};

use tracing::debug;

use crate::domain::{Departure, Direction, ServiceType};
use crate::feed::StopTimeRecord;
use crate::snapshot::StationTimetable;

use super::calendar::service_type_of;
use super::lookups::Lookups;

/// Departure lists keyed by parent station, plus what was dropped.
#[derive(Debug, Default)]
pub(super) struct Timetables {
    pub schedule: BTreeMap<String, StationTimetable>,
    /// Stop-times whose trip, station or time could not be resolved.
    pub skipped: usize,
    /// Exact duplicates removed from the buckets.
    pub duplicates: usize,
}

/// Turn every resolvable stop-time into a departure at its parent station.
///
/// Buckets are filled in feed order and then sorted and deduplicated, so
/// the result depends only on the input tables.
pub(super) fn build(
    stop_times: &[StopTimeRecord],
    lookups: &Lookups<'_>,
    services: &HashMap<&str, ServiceType>,
) -> Timetables {
    let mut schedule: BTreeMap<String, StationTimetable> = BTreeMap::new();
    let mut skipped = 0usize;

    for st in stop_times {
        let (Some(trip), Some(station), Some(minute)) = (
            lookups.trips.get(st.trip_id.as_str()),
            lookups.parent_of.get(st.stop_id.as_str()),
            st.minute(),
        ) else {
            skipped += 1;
            continue;
        };

        let departure = Departure::new(
            minute,
            trip.train_number,
            lookups.route_type(trip.route_id),
            service_type_of(services, trip.service_id),
        );
        schedule
            .entry((*station).to_string())
            .or_default()
            .departures_mut(trip.direction)
            .push(departure);
    }

    let mut duplicates = 0usize;
    for timetable in schedule.values_mut() {
        for direction in [Direction::North, Direction::South] {
            duplicates += sort_and_dedup(timetable.departures_mut(direction));
        }
    }

    if skipped > 0 {
        debug!(skipped, "Stop-times with unknown trip, station or time skipped");
    }
    if duplicates > 0 {
        debug!(duplicates, "Duplicate departures removed");
    }

    Timetables {
        schedule,
        skipped,
        duplicates,
    }
}

/// Sort a bucket by minute and drop repeated departures.
///
/// Two departures are the same when they share minute, train number and
/// service type; the first one in feed order is kept. The sort is stable,
/// so departures at the same minute keep their feed order. Returns how many
/// entries were removed.
pub fn sort_and_dedup(departures: &mut Vec<Departure>) -> usize {
    departures.sort_by_key(|d| d.minute);

    let before = departures.len();
    let mut seen: HashSet<(u16, String, ServiceType)> = HashSet::with_capacity(before);
    departures.retain(|d| seen.insert((d.minute, d.train_number.clone(), d.service_type)));
    before - departures.len()
}
