//! Error types for tripledger.
//!
//! This module defines all error types used throughout the tripledger crate,
//! providing detailed context for debugging and user-friendly error messages.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for tripledger operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Ledger Errors ===
    /// The only remaining trip cannot be deleted.
    #[error("cannot delete the only trip; at least one trip must remain")]
    LastTrip,

    /// A position does not address a trip in the ledger.
    #[error("position {position} is out of range for a ledger of {len} trips")]
    InvalidPosition {
        /// The requested zero-based position.
        position: usize,
        /// Number of trips in the ledger.
        len: usize,
    },

    // === Form Errors ===
    /// A required form field was not provided.
    #[error("missing required field: {field}")]
    FormIncomplete {
        /// Name of the missing field.
        field: &'static str,
    },

    // === Access Errors ===
    /// The supplied name did not pass the access gate.
    #[error("Access denied. Please enter a valid name.")]
    AccessDenied,

    // === Spreadsheet Errors ===
    /// Failed to open or read a workbook.
    #[error("failed to read spreadsheet {path}: {message}")]
    SpreadsheetRead {
        /// Path to the workbook.
        path: PathBuf,
        /// Description of what went wrong.
        message: String,
    },

    /// Failed to build or save a workbook.
    #[error("failed to write spreadsheet: {0}")]
    SpreadsheetWrite(#[from] rust_xlsxwriter::XlsxError),

    // === Storage Errors ===
    /// Failed to open or create the database.
    #[error("failed to open database at {path}: {source}")]
    DatabaseOpen {
        /// Path to the database file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: rusqlite::Error,
    },

    /// A database query failed.
    #[error("database query failed: {0}")]
    DatabaseQuery(#[from] rusqlite::Error),

    /// Failed to run database migrations.
    #[error("database migration failed: {message}")]
    DatabaseMigration {
        /// Description of what went wrong.
        message: String,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === I/O Errors ===
    /// File system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to create a required directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for tripledger operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create an invalid position error.
    #[must_use]
    pub fn invalid_position(position: usize, len: usize) -> Self {
        Self::InvalidPosition { position, len }
    }

    /// Create a spreadsheet read error.
    #[must_use]
    pub fn spreadsheet_read(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::SpreadsheetRead {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Check if this error is a refused ledger mutation.
    ///
    /// Refusals leave the ledger unchanged and are reported to the user
    /// rather than treated as failures of the tool itself.
    #[must_use]
    pub fn is_refusal(&self) -> bool {
        matches!(
            self,
            Self::LastTrip
                | Self::InvalidPosition { .. }
                | Self::FormIncomplete { .. }
                | Self::AccessDenied
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_trip_display() {
        let err = Error::LastTrip;
        assert!(err.to_string().contains("only trip"));
    }

    #[test]
    fn test_invalid_position_display() {
        let err = Error::invalid_position(7, 3);
        let msg = err.to_string();
        assert!(msg.contains('7'));
        assert!(msg.contains('3'));
    }

    #[test]
    fn test_access_denied_display() {
        assert_eq!(
            Error::AccessDenied.to_string(),
            "Access denied. Please enter a valid name."
        );
    }

    #[test]
    fn test_form_incomplete_display() {
        let err = Error::FormIncomplete {
            field: "end address",
        };
        assert_eq!(err.to_string(), "missing required field: end address");
    }

    #[test]
    fn test_spreadsheet_read_display() {
        let err = Error::spreadsheet_read("/tmp/trips.xlsx", "no worksheet");
        let msg = err.to_string();
        assert!(msg.contains("/tmp/trips.xlsx"));
        assert!(msg.contains("no worksheet"));
    }

    #[test]
    fn test_is_refusal() {
        assert!(Error::LastTrip.is_refusal());
        assert!(Error::AccessDenied.is_refusal());
        assert!(Error::invalid_position(1, 1).is_refusal());
        assert!(!Error::ConfigValidation {
            message: "bad".to_string()
        }
        .is_refusal());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_from_rusqlite_error() {
        let result = rusqlite::Connection::open_with_flags(
            "/nonexistent/path/db.sqlite",
            rusqlite::OpenFlags::SQLITE_OPEN_READ_ONLY,
        );
        if let Err(sqlite_err) = result {
            let err: Error = sqlite_err.into();
            assert!(matches!(err, Error::DatabaseQuery(_)));
        }
    }

    #[test]
    fn test_from_json_error() {
        let json_result: std::result::Result<i32, serde_json::Error> =
            serde_json::from_str("not valid json");
        if let Err(json_err) = json_result {
            let err: Error = json_err.into();
            assert!(matches!(err, Error::Json(_)));
        }
    }

    #[test]
    fn test_database_migration_error_display() {
        let err = Error::DatabaseMigration {
            message: "version mismatch".to_string(),
        };
        assert!(err.to_string().contains("version mismatch"));
    }

    #[test]
    fn test_directory_create_error_display() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = Error::DirectoryCreate {
            path: PathBuf::from("/root/forbidden"),
            source: io_err,
        };
        assert!(err.to_string().contains("/root/forbidden"));
    }
}
