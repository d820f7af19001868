//! Departure board sections.

use crate::domain::{Direction, FeedDate, RouteType, ServiceType, format_clock_time};

use super::departures::Trip;

/// A list split into "next", "later" and "rest of day" sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sections<'a, T> {
    pub next: &'a [T],
    pub later: &'a [T],
    pub rest: &'a [T],
}

/// Split `items` into consecutive sections of `size`, `size` and the rest.
///
/// # Examples
///
/// ```
/// use next_train::query::partition;
///
/// let items: Vec<u32> = (0..15).collect();
/// let sections = partition(&items, 6);
/// assert_eq!(sections.next, &[0, 1, 2, 3, 4, 5]);
/// assert_eq!(sections.later, &[6, 7, 8, 9, 10, 11]);
/// assert_eq!(sections.rest, &[12, 13, 14]);
/// ```
pub fn partition<T>(items: &[T], size: usize) -> Sections<'_, T> {
    let (next, remainder) = items.split_at(size.min(items.len()));
    let (later, rest) = remainder.split_at(size.min(remainder.len()));
    Sections { next, later, rest }
}

/// One row of a departure board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardEntry {
    pub train_number: String,
    pub route_type: RouteType,
    pub departure_minute: u16,
    pub arrival_minute: Option<u16>,
}

impl BoardEntry {
    /// Departure time on a 12-hour clock.
    pub fn departs(&self) -> String {
        format_clock_time(u32::from(self.departure_minute))
    }

    /// Arrival time on a 12-hour clock, when known.
    pub fn arrives(&self) -> Option<String> {
        self.arrival_minute
            .map(|minute| format_clock_time(u32::from(minute)))
    }

    /// Minutes from departure to arrival, when the arrival is known.
    pub fn duration_minutes(&self) -> Option<u16> {
        self.arrival_minute
            .map(|arrival| arrival.saturating_sub(self.departure_minute))
    }
}

impl From<&Trip<'_>> for BoardEntry {
    fn from(trip: &Trip<'_>) -> Self {
        Self {
            train_number: trip.departure.train_number.clone(),
            route_type: trip.departure.route_type,
            departure_minute: trip.departure.minute,
            arrival_minute: trip.arrival_minute,
        }
    }
}

/// Upcoming trains between two stations, split into display sections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepartureBoard {
    pub origin: String,
    pub destination: String,
    pub direction: Direction,
    pub service_date: FeedDate,
    pub service_type: ServiceType,
    pub now_minutes: u32,
    pub next: Vec<BoardEntry>,
    pub later: Vec<BoardEntry>,
    pub rest: Vec<BoardEntry>,
}

impl DepartureBoard {
    /// Total number of trains on the board.
    pub fn len(&self) -> usize {
        self.next.len() + self.later.len() + self.rest.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All entries in departure order.
    pub fn entries(&self) -> impl Iterator<Item = &BoardEntry> {
        self.next.iter().chain(&self.later).chain(&self.rest)
    }
}

/// Convert trips into board rows for each section.
pub(super) fn sections_from_trips(
    trips: &[Trip<'_>],
    size: usize,
) -> (Vec<BoardEntry>, Vec<BoardEntry>, Vec<BoardEntry>) {
    let sections = partition(trips, size);
    let rows = |slice: &[Trip<'_>]| slice.iter().map(BoardEntry::from).collect::<Vec<_>>();
    (rows(sections.next), rows(sections.later), rows(sections.rest))
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Sections are contiguous, cover the input and respect the size
        #[test]
        fn partition_covers_input(
            items in proptest::collection::vec(any::<u16>(), 0..40),
            size in 0usize..10,
        ) {
            let sections = partition(&items, size);
            prop_assert!(sections.next.len() <= size);
            prop_assert!(sections.later.len() <= size);
            if !sections.rest.is_empty() {
                prop_assert_eq!(sections.next.len(), size);
                prop_assert_eq!(sections.later.len(), size);
            }

            let joined: Vec<u16> = sections
                .next
                .iter()
                .chain(sections.later)
                .chain(sections.rest)
                .copied()
                .collect();
            prop_assert_eq!(joined, items);
        }
    }
}
