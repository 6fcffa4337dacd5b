//! `tripreg` - CLI for tripledger
//!
//! Every ledger command loads the stored ledger, applies one operation and
//! saves the result. A refused operation leaves the stored ledger untouched.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use anyhow::Context;
use clap::Parser;
use tracing::{info, warn};

use tripledger::cli::{
    position, AddCommand, Cli, Command, ConfigCommand, CursorCommand, LedgerCommand,
};
use tripledger::report::{format_reading, render_table, LedgerSummary};
use tripledger::sheet::{export_trips, import_trips};
use tripledger::{form, init_logging, Config, Error, Ledger, Storage, TripForm};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    // Load configuration
    let config = Config::load_from(cli.config.clone())?;

    match cli.command {
        Command::Config(config_cmd) => handle_config(&config, config_cmd),
        Command::Ledger(command) => {
            config.access_gate().check(cli.user.as_deref())?;

            let storage = Storage::open(config.database_path())?;
            let ledger = storage.load_ledger()?;
            run(&config, &storage, ledger, command).inspect_err(|err| {
                if err
                    .downcast_ref::<Error>()
                    .is_some_and(Error::is_refusal)
                {
                    warn!("Operation refused; stored ledger left unchanged");
                }
            })
        }
    }
}

fn run(
    config: &Config,
    storage: &Storage,
    ledger: Ledger,
    command: LedgerCommand,
) -> anyhow::Result<()> {
    match command {
        LedgerCommand::Import(cmd) => {
            let first_row = cmd.first_row.unwrap_or(config.import.first_row);
            let trips = import_trips(&cmd.file, first_row)?;
            if trips.is_empty() {
                warn!("No valid data found in {}", cmd.file.display());
                println!("No valid data found; the ledger was not changed.");
                return Ok(());
            }
            let imported = Ledger::load(trips);
            storage.save_ledger(&imported)?;
            println!(
                "Imported {} trips from {}",
                imported.len(),
                cmd.file.display()
            );
        }
        LedgerCommand::Export(cmd) => {
            let path = config.export_path(cmd.output);
            export_trips(ledger.trips(), &path, &config.export.sheet_name)?;
            println!("Exported {} trips to {}", ledger.len(), path.display());
        }
        LedgerCommand::List(cmd) => {
            if cmd.json {
                println!("{}", serde_json::to_string_pretty(ledger.trips())?);
            } else {
                print!("{}", render_table(&ledger));
            }
        }
        LedgerCommand::Add(cmd) => handle_add(storage, &ledger, cmd)?,
        LedgerCommand::Delete(cmd) => {
            let row = cmd.row;
            let next = ledger
                .delete(position(row))
                .with_context(|| format!("cannot delete row {row}"))?;
            storage.save_ledger(&next)?;
            println!("Deleted row {row}; {} trips remain", next.len());
        }
        LedgerCommand::Cursor(CursorCommand::Set { row }) => {
            let next = ledger.set_cursor(position(row))?;
            storage.save_ledger(&next)?;
            println!("New trips will be inserted after row {row}");
        }
        LedgerCommand::Cursor(CursorCommand::Reset) => {
            let next = form::cancel(&ledger);
            storage.save_ledger(&next)?;
            match next.cursor() {
                Some(cursor) => println!("Cursor reset to row {}", cursor + 1),
                None => println!("Cursor cleared; the ledger is empty"),
            }
        }
        LedgerCommand::Status(cmd) => handle_status(storage, &ledger, cmd.json)?,
    }
    Ok(())
}

fn handle_add(storage: &Storage, ledger: &Ledger, cmd: AddCommand) -> anyhow::Result<()> {
    let ledger = match cmd.after {
        Some(row) => ledger.set_cursor(position(row))?,
        None => ledger.clone(),
    };

    let mut trip_form = TripForm::prefill(&ledger, form::today());
    // An empty ledger has nowhere to insert but the head.
    if cmd.head || ledger.is_empty() {
        trip_form = trip_form.at_head();
    }
    trip_form.leg = cmd.leg();
    if let Some(from) = cmd.from {
        trip_form.begin_address = from;
    }
    if let Some(to) = cmd.to {
        trip_form.end_address = to;
    }
    if let Some(date) = cmd.date {
        trip_form.date = date;
    }

    let request = trip_form.submit().context("trip not added")?;
    let next = request.apply(&ledger)?;
    storage.save_ledger(&next)?;

    if let Some(added) = next.cursor_trip() {
        info!("Added trip {} (id {})", added.sequence_label, added.id);
        println!(
            "Added trip {}: {} -> {} ({} km, total {} km)",
            added.sequence_label,
            added.start_address,
            added.end_address,
            format_reading(added.leg_distance),
            format_reading(added.cumulative_distance)
        );
    }
    Ok(())
}

fn handle_status(storage: &Storage, ledger: &Ledger, json: bool) -> anyhow::Result<()> {
    let summary = LedgerSummary::of(ledger);
    if json {
        let status = serde_json::json!({
            "database_path": storage.path(),
            "ledger": summary,
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
    } else {
        println!("tripreg status");
        println!("--------------");
        println!("Database:       {}", storage.path().display());
        println!("Trips:          {}", summary.trips);
        match (summary.cursor_row, summary.cursor_label) {
            (Some(row), Some(label)) => println!("Cursor:         row {row} ({label})"),
            _ => println!("Cursor:         none"),
        }
        println!("Last reading:   {}", format_reading(summary.last_reading));
        println!("Total distance: {}", format_reading(summary.total_distance));
    }
    Ok(())
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Storage]");
                println!("  Database path:  {}", config.database_path().display());
                println!();
                println!("[Access]");
                println!("  Name:           {}", config.access.name);
                println!();
                println!("[Import]");
                println!("  First row:      {}", config.import.first_row);
                println!();
                println!("[Export]");
                println!("  File name:      {}", config.export.file_name);
                println!("  Sheet name:     {}", config.export.sheet_name);
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => println!("Configuration error: {e}"),
            }
        }
    }
    Ok(())
}
