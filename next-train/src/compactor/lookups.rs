//! Lookup tables built from the stop, trip and route tables.
//!
//! Every map borrows from the loaded feed, is built once, and is passed by
//! reference to the later stages.

use std::collections::HashMap;

use tracing::debug;

use crate::domain::{Direction, RouteType, Station, display_name};
use crate::feed::{RouteRecord, StopRecord, TripRecord};

use super::CompactConfig;

/// What the compactor needs to know about a trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct TripInfo<'a> {
    pub service_id: &'a str,
    pub direction: Direction,
    pub route_id: &'a str,
    pub train_number: &'a str,
}

/// Immutable lookup tables shared by the compaction stages.
#[derive(Debug)]
pub(super) struct Lookups<'a> {
    /// Platform stop id -> parent station id.
    pub parent_of: HashMap<&'a str, &'a str>,
    pub trips: HashMap<&'a str, TripInfo<'a>>,
    pub route_types: HashMap<&'a str, RouteType>,
}

impl<'a> Lookups<'a> {
    pub fn build(
        stops: &'a [StopRecord],
        trips: &'a [TripRecord],
        routes: &'a [RouteRecord],
    ) -> Self {
        Self {
            parent_of: parent_stations(stops),
            trips: trip_infos(trips),
            route_types: route_types(routes),
        }
    }

    /// Route type of a trip's route; unknown routes run as locals.
    pub fn route_type(&self, route_id: &str) -> RouteType {
        self.route_types.get(route_id).copied().unwrap_or_default()
    }
}

/// Parent stations in north-to-south order.
///
/// Keeps `location_type = 1` records whose names contain none of the
/// excluded words, strips "Station"/agency suffixes from their names and
/// sorts by descending latitude. Stations without a latitude sort last;
/// ties fall back to the id so the order is stable across runs.
pub(super) fn station_list(stops: &[StopRecord], config: &CompactConfig) -> Vec<Station> {
    let mut stations: Vec<(&StopRecord, Station)> = stops
        .iter()
        .filter(|s| s.is_station())
        .filter(|s| {
            !config
                .excluded_name_parts
                .iter()
                .any(|part| s.stop_name.contains(part.as_str()))
        })
        .map(|s| {
            let name = display_name(&s.stop_name, &config.agency_name);
            (s, Station::new(s.stop_id.clone(), name))
        })
        .collect();

    stations.sort_by(|(a, _), (b, _)| {
        let lat_a = a.stop_lat.unwrap_or(f64::NEG_INFINITY);
        let lat_b = b.stop_lat.unwrap_or(f64::NEG_INFINITY);
        lat_b.total_cmp(&lat_a).then_with(|| a.stop_id.cmp(&b.stop_id))
    });

    stations.into_iter().map(|(_, station)| station).collect()
}

/// Map every stop that names a parent to that parent.
fn parent_stations(stops: &[StopRecord]) -> HashMap<&str, &str> {
    stops
        .iter()
        .filter_map(|s| Some((s.stop_id.as_str(), s.parent_station.as_deref()?)))
        .collect()
}

/// Index trips by id. Trips without a usable direction are left out.
fn trip_infos(trips: &[TripRecord]) -> HashMap<&str, TripInfo<'_>> {
    let mut skipped = 0usize;
    let map: HashMap<_, _> = trips
        .iter()
        .filter_map(|t| {
            let Some(direction) = t.direction_id.and_then(Direction::from_direction_id) else {
                skipped += 1;
                return None;
            };
            Some((
                t.trip_id.as_str(),
                TripInfo {
                    service_id: &t.service_id,
                    direction,
                    route_id: &t.route_id,
                    train_number: t.train_number(),
                },
            ))
        })
        .collect();
    if skipped > 0 {
        debug!(skipped, "Trips without a direction left out");
    }
    map
}

/// Classify each route by its display name.
fn route_types(routes: &[RouteRecord]) -> HashMap<&str, RouteType> {
    routes
        .iter()
        .map(|r| (r.route_id.as_str(), RouteType::from_route_name(r.display_name())))
        .collect()
}
