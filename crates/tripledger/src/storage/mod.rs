//! Storage layer for tripledger.
//!
//! The CLI is stateless between runs, so the ledger lives in a `SQLite`
//! database. Each save replaces the stored ledger wholesale inside one
//! transaction; a load rebuilds exactly what was saved.

pub mod migrations;
pub mod schema;

use std::path::{Path, PathBuf};

use rusqlite::{params, Connection, OptionalExtension};
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::ledger::Ledger;
use crate::trip::Trip;

use schema::TRIP_COLUMNS;

/// Metadata key holding the cursor position.
const CURSOR_KEY: &str = "cursor";

/// Persistent home of the ledger.
#[derive(Debug)]
pub struct Storage {
    /// Path to the database file.
    path: PathBuf,
    /// Database connection.
    conn: Connection,
}

impl Storage {
    /// Open or create a storage database at the given path.
    ///
    /// Creates the parent directories and database file if they don't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or schema initialization fails.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|source| Error::DirectoryCreate {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        debug!("Opening database at {}", path.display());
        let conn = Connection::open(&path).map_err(|source| Error::DatabaseOpen {
            path: path.clone(),
            source,
        })?;

        migrations::initialize_schema(&conn)?;

        Ok(Self { path, conn })
    }

    /// Create an in-memory storage instance for testing.
    ///
    /// # Errors
    ///
    /// Returns an error if the in-memory database cannot be created.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|source| Error::DatabaseOpen {
            path: PathBuf::from(":memory:"),
            source,
        })?;

        migrations::initialize_schema(&conn)?;

        Ok(Self {
            path: PathBuf::from(":memory:"),
            conn,
        })
    }

    /// Get the path to the database file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the stored ledger. A fresh database yields an empty ledger.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn load_ledger(&self) -> Result<Ledger> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {TRIP_COLUMNS} FROM trips ORDER BY position"))?;
        let trips = stmt
            .query_map([], Self::row_to_trip)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let cursor = self.stored_cursor()?;
        let ledger = Ledger::from_parts(trips, cursor);
        if cursor.is_some() && ledger.cursor() != cursor {
            warn!("Stored cursor is outside the ledger; moving it to the last trip");
        }
        debug!("Loaded {} trips from {}", ledger.len(), self.path.display());
        Ok(ledger)
    }

    /// Replace the stored ledger with `ledger`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails; the previously
    /// stored ledger is then left intact.
    pub fn save_ledger(&self, ledger: &Ledger) -> Result<()> {
        let tx = self.conn.unchecked_transaction()?;
        tx.execute("DELETE FROM trips", [])?;
        {
            let mut stmt = tx.prepare(&format!(
                "INSERT INTO trips (position, {TRIP_COLUMNS}) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16)"
            ))?;
            for (position, trip) in (0_i64..).zip(ledger.trips()) {
                stmt.execute(params![
                    position,
                    trip.id,
                    trip.sequence_label,
                    trip.date,
                    trip.start_time,
                    trip.start_name,
                    trip.start_address,
                    trip.odometer_start,
                    trip.end_time,
                    trip.end_name,
                    trip.end_address,
                    trip.odometer_end,
                    trip.leg_distance,
                    trip.cumulative_distance,
                    trip.duration,
                    trip.parked_time,
                ])?;
            }
        }

        match ledger.cursor() {
            Some(cursor) => {
                tx.execute(
                    "INSERT OR REPLACE INTO metadata (key, value) VALUES (?1, ?2)",
                    (CURSOR_KEY, cursor.to_string()),
                )?;
            }
            None => {
                tx.execute("DELETE FROM metadata WHERE key = ?1", [CURSOR_KEY])?;
            }
        }
        tx.commit()?;

        info!("Saved {} trips", ledger.len());
        Ok(())
    }

    fn stored_cursor(&self) -> Result<Option<usize>> {
        let value: Option<String> = self
            .conn
            .query_row(
                "SELECT value FROM metadata WHERE key = ?1",
                [CURSOR_KEY],
                |row| row.get(0),
            )
            .optional()?;

        Ok(value.and_then(|v| match v.parse() {
            Ok(cursor) => Some(cursor),
            Err(_) => {
                warn!("Ignoring unreadable stored cursor {v:?}");
                None
            }
        }))
    }

    fn row_to_trip(row: &rusqlite::Row) -> rusqlite::Result<Trip> {
        Ok(Trip {
            id: row.get(0)?,
            sequence_label: row.get(1)?,
            date: row.get(2)?,
            start_time: row.get(3)?,
            start_name: row.get(4)?,
            start_address: row.get(5)?,
            odometer_start: row.get(6)?,
            end_time: row.get(7)?,
            end_name: row.get(8)?,
            end_address: row.get(9)?,
            odometer_end: row.get(10)?,
            leg_distance: row.get(11)?,
            cumulative_distance: row.get(12)?,
            duration: row.get(13)?,
            parked_time: row.get(14)?,
        })
    }
}
