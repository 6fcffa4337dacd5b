//! Schema versioning for the ledger database.
//!
//! The `metadata` table always exists and records how many entries of
//! [`MIGRATIONS`] have been applied. Each pending migration runs in its own
//! transaction together with the version bump.

use rusqlite::Connection;
use tracing::debug;

use crate::error::{Error, Result};

use super::schema::{CREATE_METADATA_TABLE, CREATE_TRIPS_TABLE};

/// Migrations in order; entry `i` moves the schema from version `i` to `i + 1`.
const MIGRATIONS: &[&str] = &[CREATE_TRIPS_TABLE];

/// The schema version this build writes.
pub const CURRENT_VERSION: usize = MIGRATIONS.len();

/// Metadata key holding the schema version.
const VERSION_KEY: &str = "schema_version";

/// Bring the database schema up to [`CURRENT_VERSION`].
///
/// # Errors
///
/// Returns an error if the database was written by a newer schema or a
/// migration fails. A failed migration leaves the previous version in place.
pub fn initialize_schema(conn: &Connection) -> Result<()> {
    conn.execute(CREATE_METADATA_TABLE, [])?;

    let version = schema_version(conn)?;
    if version > CURRENT_VERSION {
        return Err(Error::DatabaseMigration {
            message: format!(
                "database schema version {version} is newer than supported version {CURRENT_VERSION}"
            ),
        });
    }

    for (applied, statement) in MIGRATIONS.iter().enumerate().skip(version) {
        let target = applied + 1;
        let tx = conn.unchecked_transaction()?;
        tx.execute_batch(statement)
            .map_err(|e| Error::DatabaseMigration {
                message: format!("migration to version {target} failed: {e}"),
            })?;
        set_schema_version(&tx, target)?;
        tx.commit()?;
        debug!("Migrated ledger schema to version {target}");
    }
    Ok(())
}

/// The stored schema version, or 0 for a fresh database.
fn schema_version(conn: &Connection) -> Result<usize> {
    let result: std::result::Result<String, rusqlite::Error> = conn.query_row(
        "SELECT value FROM metadata WHERE key = ?1",
        [VERSION_KEY],
        |row| row.get(0),
    );

    match result {
        Ok(value) => value.parse().map_err(|_| Error::DatabaseMigration {
            message: format!("invalid schema version: {value}"),
        }),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(0),
        Err(e) => Err(e.into()),
    }
}

fn set_schema_version(conn: &Connection, version: usize) -> Result<()> {
    conn.execute(
        "INSERT OR REPLACE INTO metadata (key, value) VALUES (?1, ?2)",
        (VERSION_KEY, version.to_string()),
    )?;
    Ok(())
}
