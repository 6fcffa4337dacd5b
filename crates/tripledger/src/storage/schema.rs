//! `SQLite` schema definitions for tripledger.

/// One row per trip, keyed by its position in the ledger.
pub const CREATE_TRIPS_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS trips (
    position INTEGER PRIMARY KEY,
    id INTEGER NOT NULL,
    sequence_label TEXT NOT NULL,
    date TEXT NOT NULL,
    start_time TEXT NOT NULL,
    start_name TEXT NOT NULL,
    start_address TEXT NOT NULL,
    odometer_start REAL NOT NULL,
    end_time TEXT NOT NULL,
    end_name TEXT NOT NULL,
    end_address TEXT NOT NULL,
    odometer_end REAL NOT NULL,
    leg_distance REAL NOT NULL,
    cumulative_distance REAL NOT NULL,
    duration TEXT NOT NULL,
    parked_time TEXT NOT NULL
)
";

/// Key-value pairs: schema version and ledger cursor.
pub const CREATE_METADATA_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS metadata (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
)
";

/// Column list shared by inserts and selects, in [`crate::Trip`] field order.
pub const TRIP_COLUMNS: &str = "id, sequence_label, date, start_time, start_name, start_address, \
     odometer_start, end_time, end_name, end_address, odometer_end, leg_distance, \
     cumulative_distance, duration, parked_time";
