//! Command-line interface for tripledger.
//!
//! This module provides the CLI structure for the `tripreg` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    position, AddCommand, ConfigCommand, CursorCommand, DeleteCommand, ExportCommand,
    ImportCommand, ListCommand, StatusCommand,
};

use crate::logging::Verbosity;

/// tripreg - Keep a ledger of vehicle trips
///
/// Records trips between odometer readings, keeps the readings chained and
/// the totals consistent, and moves trips in and out of spreadsheets.
#[derive(Debug, Parser)]
#[command(name = "tripreg")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Your name, checked against the configured access name
    #[arg(short, long, global = true, env = "TRIPREG_USER")]
    pub user: Option<String>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Commands that read or change the ledger; these pass the access gate.
    #[command(flatten)]
    Ledger(LedgerCommand),

    /// View configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

/// Commands operating on the stored ledger.
#[derive(Debug, Subcommand)]
pub enum LedgerCommand {
    /// Replace the ledger with trips read from a workbook
    Import(ImportCommand),

    /// Write the ledger to an .xlsx workbook
    Export(ExportCommand),

    /// Show all trips
    List(ListCommand),

    /// Add a trip after the cursor
    Add(AddCommand),

    /// Delete a trip
    Delete(DeleteCommand),

    /// Choose where new trips are inserted
    #[command(subcommand)]
    Cursor(CursorCommand),

    /// Show a summary of the ledger
    Status(StatusCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.quiet, self.verbose)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_cli_name() {
        assert_eq!(Cli::command().get_name(), "tripreg");
    }

    #[test]
    fn test_cli_verify() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_verbosity_flags() {
        assert_eq!(parse(&["tripreg", "-q", "list"]).verbosity(), Verbosity::Quiet);
        assert_eq!(parse(&["tripreg", "list"]).verbosity(), Verbosity::Normal);
        assert_eq!(parse(&["tripreg", "-v", "list"]).verbosity(), Verbosity::Verbose);
        assert_eq!(parse(&["tripreg", "-vv", "list"]).verbosity(), Verbosity::Trace);
    }

    #[test]
    fn test_parse_user_and_config() {
        let cli = parse(&["tripreg", "-u", "Marc", "-c", "/custom/config.toml", "status"]);
        assert_eq!(cli.user.as_deref(), Some("Marc"));
        assert_eq!(cli.config, Some(PathBuf::from("/custom/config.toml")));
        assert!(matches!(
            cli.command,
            Command::Ledger(LedgerCommand::Status(_))
        ));
    }

    #[test]
    fn test_parse_import() {
        let cli = parse(&["tripreg", "import", "ritten.xlsx", "--first-row", "2"]);
        match cli.command {
            Command::Ledger(LedgerCommand::Import(cmd)) => {
                assert_eq!(cmd.file, PathBuf::from("ritten.xlsx"));
                assert_eq!(cmd.first_row, Some(2));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_add_with_end_reading() {
        let cli = parse(&["tripreg", "add", "--to", "Markt 9", "--end-reading", "46.5"]);
        match cli.command {
            Command::Ledger(LedgerCommand::Add(cmd)) => {
                assert_eq!(cmd.to.as_deref(), Some("Markt 9"));
                assert_eq!(cmd.end_reading, Some(46.5));
                assert!(!cmd.head);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_add_rejects_both_leg_inputs() {
        let result = Cli::try_parse_from([
            "tripreg", "add", "--to", "X", "--end-reading", "4", "--distance", "2",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_add_rejects_head_and_after() {
        let result = Cli::try_parse_from([
            "tripreg", "add", "--to", "X", "--distance", "2", "--head", "--after", "1",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_delete_rejects_row_zero() {
        assert!(Cli::try_parse_from(["tripreg", "delete", "0"]).is_err());
        let cli = parse(&["tripreg", "delete", "3"]);
        match cli.command {
            Command::Ledger(LedgerCommand::Delete(cmd)) => assert_eq!(position(cmd.row), 2),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_cursor_commands() {
        assert!(matches!(
            parse(&["tripreg", "cursor", "reset"]).command,
            Command::Ledger(LedgerCommand::Cursor(CursorCommand::Reset))
        ));
        assert!(matches!(
            parse(&["tripreg", "cursor", "set", "2"]).command,
            Command::Ledger(LedgerCommand::Cursor(CursorCommand::Set { .. }))
        ));
    }

    #[test]
    fn test_config_commands_are_not_ledger_commands() {
        assert!(matches!(
            parse(&["tripreg", "list"]).command,
            Command::Ledger(LedgerCommand::List(_))
        ));
        assert!(matches!(
            parse(&["tripreg", "config", "path"]).command,
            Command::Config(ConfigCommand::Path)
        ));
    }
}
