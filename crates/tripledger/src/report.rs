//! Rendering of the ledger for the terminal.

use std::fmt::Write as _;

use serde::Serialize;

use crate::ledger::Ledger;
use crate::trip::Trip;

/// Message shown for a ledger without trips.
pub const EMPTY_MESSAGE: &str =
    "No trip data available. Please import a spreadsheet or add a trip.";

const COLUMNS: [&str; 8] = [
    "Rit Nr.",
    "Datum",
    "Begin Adres",
    "Begin Stand",
    "Eind Adres",
    "Eind Stand",
    "Rit Afstand",
    "Totaal",
];

/// Format a reading to one decimal place, showing NaN as 0.
#[must_use]
pub fn format_reading(value: f64) -> String {
    if value.is_nan() {
        "0".to_string()
    } else {
        let rounded = format!("{value:.1}");
        rounded
            .strip_suffix(".0")
            .map_or_else(|| rounded.clone(), str::to_string)
    }
}

fn cells(trip: &Trip) -> [String; 8] {
    [
        trip.sequence_label.clone(),
        trip.date.clone(),
        trip.start_address.clone(),
        format_reading(trip.odometer_start),
        trip.end_address.clone(),
        format_reading(trip.odometer_end),
        format_reading(trip.leg_distance),
        format_reading(trip.cumulative_distance),
    ]
}

/// Render the ledger as an aligned text table, marking the cursor row.
///
/// Rows are numbered from 1, matching the row arguments the CLI accepts.
#[must_use]
pub fn render_table(ledger: &Ledger) -> String {
    if ledger.is_empty() {
        return format!("{EMPTY_MESSAGE}\n");
    }

    let rows: Vec<[String; 8]> = ledger.trips().iter().map(cells).collect();
    let mut widths = COLUMNS.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }
    let row_width = ledger.len().to_string().len();

    let mut out = String::new();
    let _ = write!(out, "  {:>row_width$}", "#");
    for (header, width) in COLUMNS.iter().zip(widths) {
        let _ = write!(out, "  {header:<width$}");
    }
    out.push('\n');

    for (position, row) in rows.iter().enumerate() {
        let marker = if ledger.cursor() == Some(position) {
            '>'
        } else {
            ' '
        };
        let _ = write!(out, "{marker} {:>row_width$}", position + 1);
        for (cell, width) in row.iter().zip(widths) {
            let _ = write!(out, "  {cell:<width$}");
        }
        out.push('\n');
    }
    out
}

/// Summary of a ledger, as printed by the `status` command.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LedgerSummary {
    /// Number of trips.
    pub trips: usize,
    /// 1-based cursor row, if set.
    pub cursor_row: Option<usize>,
    /// Label of the cursor trip.
    pub cursor_label: Option<String>,
    /// Odometer reading at the end of the last trip.
    pub last_reading: f64,
    /// Cumulative distance over all trips.
    pub total_distance: f64,
}

impl LedgerSummary {
    /// Summarize `ledger`.
    #[must_use]
    pub fn of(ledger: &Ledger) -> Self {
        Self {
            trips: ledger.len(),
            cursor_row: ledger.cursor().map(|c| c + 1),
            cursor_label: ledger.cursor_trip().map(|t| t.sequence_label.clone()),
            last_reading: ledger.trips().last().map_or(0.0, |t| t.odometer_end),
            total_distance: ledger.total_distance(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ledger() -> Ledger {
        Ledger::load(vec![
            Trip {
                id: 1,
                sequence_label: "1.1".to_string(),
                date: "3/4/25".to_string(),
                start_address: "Dorpsstraat 1".to_string(),
                end_address: "Stationsplein 4".to_string(),
                odometer_end: 23.0,
                leg_distance: 23.0,
                cumulative_distance: 23.0,
                ..Trip::default()
            },
            Trip {
                id: 2,
                sequence_label: "1.2".to_string(),
                start_address: "Stationsplein 4".to_string(),
                odometer_start: 23.0,
                end_address: "Markt 9".to_string(),
                odometer_end: 46.55,
                leg_distance: 23.55,
                cumulative_distance: 46.55,
                ..Trip::default()
            },
        ])
    }

    #[test]
    fn test_format_reading() {
        assert_eq!(format_reading(23.0), "23");
        assert_eq!(format_reading(46.5), "46.5");
        assert_eq!(format_reading(0.34), "0.3");
        assert_eq!(format_reading(f64::NAN), "0");
    }

    #[test]
    fn test_render_empty() {
        assert_eq!(render_table(&Ledger::new()), format!("{EMPTY_MESSAGE}\n"));
    }

    #[test]
    fn test_render_table_rows() {
        let table = render_table(&ledger());
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("Rit Nr."));
        assert!(lines[0].contains("Totaal"));
        assert!(lines[1].starts_with("  1"));
        assert!(lines[1].contains("Dorpsstraat 1"));
        assert!(lines[2].starts_with("> 2"));
        assert!(lines[2].contains("Markt 9"));
    }

    #[test]
    fn test_render_table_columns_align() {
        let table = render_table(&ledger());
        let lines: Vec<&str> = table.lines().collect();
        let header_pos = lines[0].find("Eind Adres").unwrap();
        let cell_pos = lines[1].find("Stationsplein 4").unwrap();
        assert_eq!(header_pos, cell_pos);
    }

    #[test]
    fn test_summary() {
        let summary = LedgerSummary::of(&ledger());
        assert_eq!(summary.trips, 2);
        assert_eq!(summary.cursor_row, Some(2));
        assert_eq!(summary.cursor_label.as_deref(), Some("1.2"));
        assert_eq!(summary.last_reading, 46.55);
    }

    #[test]
    fn test_summary_empty() {
        let summary = LedgerSummary::of(&Ledger::new());
        assert_eq!(summary.trips, 0);
        assert_eq!(summary.cursor_row, None);
        assert_eq!(summary.total_distance, 0.0);
    }
}
