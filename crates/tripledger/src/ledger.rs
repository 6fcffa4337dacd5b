//! The trip ledger.
//!
//! A [`Ledger`] is an ordered sequence of trips plus an insertion cursor.
//! Every operation takes the current ledger by reference and returns the
//! next one, so a refused operation leaves the caller's value untouched.
//!
//! After every insert or delete the ledger guarantees:
//! - each trip starts at the previous trip's end reading,
//! - each cumulative distance is the running sum of leg distances,
//! - sequence labels are `<major>.1`, `<major>.2`, ... in order,
//! - existing leg distances are never altered.

use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::trip::{sequence_label, Trip, DEFAULT_MAJOR};

/// Where a new trip goes relative to the existing sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertAt {
    /// Before every existing trip.
    Head,
    /// Immediately after the trip at this position.
    After(usize),
}

/// The user-supplied part of a new trip.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TripDraft {
    /// Departure address.
    pub begin_address: String,
    /// Arrival address.
    pub end_address: String,
    /// Odometer reading at arrival.
    pub end_reading: f64,
    /// Date of travel.
    pub date: String,
}

/// Ordered trips and the active insertion cursor.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Ledger {
    trips: Vec<Trip>,
    cursor: Option<usize>,
}

impl Ledger {
    /// Create an empty ledger with no cursor.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole sequence with externally supplied trips.
    ///
    /// The trips are trusted as-is. The cursor points at the last trip, or
    /// stays unset when `trips` is empty.
    #[must_use]
    pub fn load(trips: Vec<Trip>) -> Self {
        let cursor = trips.len().checked_sub(1);
        debug!(count = trips.len(), "loaded ledger");
        Self { trips, cursor }
    }

    /// Rebuild a ledger from persisted parts.
    ///
    /// A missing or out-of-range cursor falls back to the last trip, so a
    /// non-empty ledger always has somewhere to insert.
    #[must_use]
    pub fn from_parts(trips: Vec<Trip>, cursor: Option<usize>) -> Self {
        let cursor = cursor
            .filter(|&c| c < trips.len())
            .or_else(|| trips.len().checked_sub(1));
        Self { trips, cursor }
    }

    /// The trips in ledger order.
    #[must_use]
    pub fn trips(&self) -> &[Trip] {
        &self.trips
    }

    /// Number of trips.
    #[must_use]
    pub fn len(&self) -> usize {
        self.trips.len()
    }

    /// Whether the ledger holds no trips.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.trips.is_empty()
    }

    /// The trip at `position`, if any.
    #[must_use]
    pub fn get(&self, position: usize) -> Option<&Trip> {
        self.trips.get(position)
    }

    /// The current insertion cursor.
    #[must_use]
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// The trip under the cursor.
    #[must_use]
    pub fn cursor_trip(&self) -> Option<&Trip> {
        self.cursor.and_then(|c| self.trips.get(c))
    }

    /// Cumulative distance of the whole ledger.
    #[must_use]
    pub fn total_distance(&self) -> f64 {
        self.trips.last().map_or(0.0, |t| t.cumulative_distance)
    }

    /// The next unused trip id.
    #[must_use]
    pub fn next_id(&self) -> i64 {
        self.trips.iter().map(|t| t.id).max().unwrap_or(0) + 1
    }

    /// Insert a new trip built from `draft`.
    ///
    /// The new trip starts at the end reading of the trip it follows (or 0
    /// at the head). Every later trip is shifted by the new leg distance and
    /// the cursor moves onto the new trip. A negative leg is accepted.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPosition`] if `at` names a position outside
    /// the ledger.
    pub fn insert(&self, draft: TripDraft, at: InsertAt) -> Result<Self> {
        let (index, begin_reading, previous_cumulative) = match at {
            InsertAt::Head => (0, 0.0, 0.0),
            InsertAt::After(position) => {
                let anchor = self
                    .trips
                    .get(position)
                    .ok_or_else(|| Error::invalid_position(position, self.len()))?;
                (position + 1, anchor.odometer_end, anchor.cumulative_distance)
            }
        };

        let leg_distance = draft.end_reading - begin_reading;
        if leg_distance < 0.0 {
            warn!(
                begin_reading,
                end_reading = draft.end_reading,
                "end reading is below begin reading; recording a negative leg"
            );
        }

        let trip = Trip {
            id: self.next_id(),
            date: draft.date,
            start_address: draft.begin_address,
            odometer_start: begin_reading,
            end_address: draft.end_address,
            odometer_end: draft.end_reading,
            leg_distance,
            cumulative_distance: previous_cumulative + leg_distance,
            ..Trip::default()
        };

        // Read before the insert: an unlabelled head trip would otherwise
        // reset every label to the default major.
        let major = major_of(&self.trips);
        let mut trips = self.trips.clone();
        trips.insert(index, trip);
        relabel(&mut trips, &major);

        for i in index + 1..trips.len() {
            let previous = trips[i - 1].cumulative_distance;
            let next = &mut trips[i];
            next.shift_readings(leg_distance);
            next.cumulative_distance = previous + next.leg_distance;
        }

        debug!(position = index, leg_distance, "inserted trip");
        Ok(Self {
            trips,
            cursor: Some(index),
        })
    }

    /// Delete the trip at `position` and re-chain the readings after it.
    ///
    /// Removing the head re-anchors the new first trip at a reading of 0.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LastTrip`] if the ledger holds one trip or fewer, and
    /// [`Error::InvalidPosition`] if `position` is out of range.
    pub fn delete(&self, position: usize) -> Result<Self> {
        if self.trips.len() <= 1 {
            return Err(Error::LastTrip);
        }
        if position >= self.trips.len() {
            return Err(Error::invalid_position(position, self.len()));
        }

        let cursor = match self.cursor {
            Some(c) if c == position => Some(position.saturating_sub(1)),
            Some(c) if c > position => Some(c - 1),
            other => other,
        };

        let mut trips = self.trips.clone();
        trips.remove(position);
        let major = major_of(&trips);
        relabel(&mut trips, &major);

        if position == 0 {
            let head = &mut trips[0];
            head.anchor_at(0.0);
            head.cumulative_distance = head.leg_distance;
        }

        for i in position.max(1)..trips.len() {
            let (previous_end, previous_cumulative) =
                (trips[i - 1].odometer_end, trips[i - 1].cumulative_distance);
            let trip = &mut trips[i];
            trip.anchor_at(previous_end);
            trip.cumulative_distance = previous_cumulative + trip.leg_distance;
        }

        debug!(position, remaining = trips.len(), "deleted trip");
        Ok(Self { trips, cursor })
    }

    /// Point the cursor at `position`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPosition`] if `position` is out of range.
    pub fn set_cursor(&self, position: usize) -> Result<Self> {
        if position >= self.trips.len() {
            return Err(Error::invalid_position(position, self.len()));
        }
        Ok(Self {
            trips: self.trips.clone(),
            cursor: Some(position),
        })
    }

    /// Move the cursor back to the last trip. No-op on an empty ledger.
    #[must_use]
    pub fn clear_cursor_to_end(&self) -> Self {
        let cursor = self.trips.len().checked_sub(1).or(self.cursor);
        Self {
            trips: self.trips.clone(),
            cursor,
        }
    }

    /// Recompute every sequence label from the first trip's major number.
    #[must_use]
    pub fn renumber(&self) -> Self {
        let mut trips = self.trips.clone();
        let major = major_of(&trips);
        relabel(&mut trips, &major);
        Self {
            trips,
            cursor: self.cursor,
        }
    }
}

fn major_of(trips: &[Trip]) -> String {
    trips
        .first()
        .and_then(Trip::major)
        .unwrap_or(DEFAULT_MAJOR)
        .to_string()
}

fn relabel(trips: &mut [Trip], major: &str) {
    for (position, trip) in trips.iter_mut().enumerate() {
        trip.sequence_label = sequence_label(major, position);
    }
}
