//! CLI command definitions.
//!
//! Rows are addressed 1-based, as printed by `tripreg list`.

use std::num::NonZeroUsize;
use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::form::LegInput;

/// Import command arguments.
#[derive(Debug, Args)]
pub struct ImportCommand {
    /// Workbook to read (.xlsx, .xls or .ods)
    pub file: PathBuf,

    /// 1-based row where trip data starts (overrides configuration)
    #[arg(long, value_name = "ROW")]
    pub first_row: Option<u32>,
}

/// Export command arguments.
#[derive(Debug, Args)]
pub struct ExportCommand {
    /// Output path (defaults to the configured file name)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

/// List command arguments.
#[derive(Debug, Args)]
pub struct ListCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Add command arguments.
#[derive(Debug, Args)]
pub struct AddCommand {
    /// Arrival address
    #[arg(long, value_name = "ADDRESS")]
    pub to: Option<String>,

    /// Departure address (defaults to the previous trip's arrival address)
    #[arg(long, value_name = "ADDRESS")]
    pub from: Option<String>,

    /// Odometer reading at arrival
    #[arg(short, long, value_name = "KM", conflicts_with = "distance", allow_negative_numbers = true)]
    pub end_reading: Option<f64>,

    /// Distance driven; the end reading is derived from the start
    #[arg(short, long, value_name = "KM", allow_negative_numbers = true)]
    pub distance: Option<f64>,

    /// Date of travel (defaults to the previous trip's date or today)
    #[arg(long)]
    pub date: Option<String>,

    /// Insert after this row instead of the cursor
    #[arg(short, long, value_name = "ROW", conflicts_with = "head")]
    pub after: Option<NonZeroUsize>,

    /// Insert before every existing trip
    #[arg(long)]
    pub head: bool,
}

impl AddCommand {
    /// The leg input the user chose, if any.
    #[must_use]
    pub fn leg(&self) -> Option<LegInput> {
        self.end_reading
            .map(LegInput::EndReading)
            .or_else(|| self.distance.map(LegInput::Distance))
    }
}

/// Delete command arguments.
#[derive(Debug, Args)]
pub struct DeleteCommand {
    /// Row to delete
    pub row: NonZeroUsize,
}

/// Cursor commands.
#[derive(Debug, Subcommand)]
pub enum CursorCommand {
    /// Insert new trips after this row
    Set {
        /// Row to place the cursor on
        row: NonZeroUsize,
    },

    /// Move the cursor back to the last trip
    Reset,
}

/// Status command arguments.
#[derive(Debug, Args)]
pub struct StatusCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Convert a 1-based row to a ledger position.
#[must_use]
pub fn position(row: NonZeroUsize) -> usize {
    row.get() - 1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn add(end_reading: Option<f64>, distance: Option<f64>) -> AddCommand {
        AddCommand {
            to: Some("Markt 9".to_string()),
            from: None,
            end_reading,
            distance,
            date: None,
            after: None,
            head: false,
        }
    }

    #[test]
    fn test_add_leg_end_reading() {
        assert_eq!(add(Some(12.5), None).leg(), Some(LegInput::EndReading(12.5)));
    }

    #[test]
    fn test_add_leg_distance() {
        assert_eq!(add(None, Some(3.0)).leg(), Some(LegInput::Distance(3.0)));
    }

    #[test]
    fn test_add_leg_missing() {
        assert_eq!(add(None, None).leg(), None);
    }

    #[test]
    fn test_position_from_row() {
        assert_eq!(position(NonZeroUsize::new(1).unwrap()), 0);
        assert_eq!(position(NonZeroUsize::new(12).unwrap()), 11);
    }

    #[test]
    fn test_cursor_command_debug() {
        let cmd = CursorCommand::Set {
            row: NonZeroUsize::new(2).unwrap(),
        };
        let debug_str = format!("{cmd:?}");
        assert!(debug_str.contains("Set"));
    }
}
