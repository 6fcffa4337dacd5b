//! Core trip types for tripledger.
//!
//! A [`Trip`] is one leg of travel between two odometer readings. Trips live
//! in a [`crate::ledger::Ledger`], which keeps their readings chained and
//! their sequence labels contiguous.

use serde::{Deserialize, Serialize};

/// Major number used when the ledger has no labelled first trip.
pub const DEFAULT_MAJOR: &str = "1";

/// One recorded leg of travel.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Trip {
    /// Identifier; a new trip takes one more than the highest id present.
    pub id: i64,
    /// Label of the form `<major>.<index>`.
    pub sequence_label: String,
    /// Date of travel, free text.
    pub date: String,
    /// Departure time, free text.
    pub start_time: String,
    /// Name of the departure location.
    pub start_name: String,
    /// Departure address.
    pub start_address: String,
    /// Odometer reading at departure.
    pub odometer_start: f64,
    /// Arrival time, free text.
    pub end_time: String,
    /// Name of the arrival location.
    pub end_name: String,
    /// Arrival address.
    pub end_address: String,
    /// Odometer reading at arrival.
    pub odometer_end: f64,
    /// Distance of this leg alone.
    pub leg_distance: f64,
    /// Running total of leg distances up to and including this trip.
    pub cumulative_distance: f64,
    /// Trip duration, free text.
    pub duration: String,
    /// Time parked at the destination, free text.
    pub parked_time: String,
}

impl Trip {
    /// The major part of this trip's sequence label, if it has one.
    ///
    /// A label without a `.` is treated as a bare major number.
    #[must_use]
    pub fn major(&self) -> Option<&str> {
        self.sequence_label
            .split('.')
            .next()
            .map(str::trim)
            .filter(|major| !major.is_empty())
    }

    /// Shift both odometer readings by `offset`, preserving the leg distance.
    pub fn shift_readings(&mut self, offset: f64) {
        self.odometer_start += offset;
        self.odometer_end += offset;
    }

    /// Re-anchor this trip to start at `start`, keeping its leg distance.
    pub fn anchor_at(&mut self, start: f64) {
        self.odometer_start = start;
        self.odometer_end = start + self.leg_distance;
    }
}

/// Format a sequence label from a major number and a zero-based position.
#[must_use]
pub fn sequence_label(major: &str, position: usize) -> String {
    format!("{major}.{}", position + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labelled(label: &str) -> Trip {
        Trip {
            sequence_label: label.to_string(),
            ..Trip::default()
        }
    }

    #[test]
    fn test_major_from_dotted_label() {
        assert_eq!(labelled("4.12").major(), Some("4"));
    }

    #[test]
    fn test_major_from_bare_label() {
        assert_eq!(labelled("7").major(), Some("7"));
    }

    #[test]
    fn test_major_missing() {
        assert_eq!(labelled("").major(), None);
        assert_eq!(labelled(".3").major(), None);
    }

    #[test]
    fn test_sequence_label() {
        assert_eq!(sequence_label("1", 0), "1.1");
        assert_eq!(sequence_label("12", 9), "12.10");
    }

    #[test]
    fn test_shift_readings_preserves_leg() {
        let mut trip = Trip {
            odometer_start: 10.0,
            odometer_end: 15.5,
            leg_distance: 5.5,
            ..Trip::default()
        };
        trip.shift_readings(2.5);
        assert_eq!(trip.odometer_start, 12.5);
        assert_eq!(trip.odometer_end, 18.0);
        assert_eq!(trip.leg_distance, 5.5);
    }

    #[test]
    fn test_anchor_at() {
        let mut trip = Trip {
            odometer_start: 100.0,
            odometer_end: 104.0,
            leg_distance: 4.0,
            ..Trip::default()
        };
        trip.anchor_at(0.0);
        assert_eq!(trip.odometer_start, 0.0);
        assert_eq!(trip.odometer_end, 4.0);
    }

    #[test]
    fn test_trip_serialization() {
        let trip = Trip {
            id: 3,
            sequence_label: "1.3".to_string(),
            start_address: "Dorpsstraat 1".to_string(),
            odometer_end: 12.5,
            ..Trip::default()
        };
        let json = serde_json::to_string(&trip).unwrap();
        let back: Trip = serde_json::from_str(&json).unwrap();
        assert_eq!(trip, back);
    }
}
