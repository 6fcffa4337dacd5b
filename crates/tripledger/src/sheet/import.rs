//! Workbook import.

use std::path::Path;

use calamine::{open_workbook_auto, Data, Range, Reader};
use tracing::{debug, info};

use super::row::{Column, SheetRow};
use crate::error::{Error, Result};
use crate::trip::Trip;

/// Read trips from the first worksheet of the workbook at `path`.
///
/// Rows before the 1-based `first_row` are ignored. Returns an empty vector
/// when no row carries trip data; deciding what to do with that is left to
/// the caller.
///
/// # Errors
///
/// Returns [`Error::SpreadsheetRead`] if the workbook cannot be opened or has
/// no readable worksheet.
pub fn import_trips(path: impl AsRef<Path>, first_row: u32) -> Result<Vec<Trip>> {
    let path = path.as_ref();
    debug!("Opening workbook at {}", path.display());

    let mut workbook =
        open_workbook_auto(path).map_err(|e| Error::spreadsheet_read(path, e.to_string()))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| Error::spreadsheet_read(path, "workbook has no worksheets"))?
        .map_err(|e| Error::spreadsheet_read(path, e.to_string()))?;

    let trips = trips_from_range(&range, first_row);
    info!("Read {} trips from {}", trips.len(), path.display());
    Ok(trips)
}

/// Map the rows of `range` from the 1-based `first_row` onward to trips.
///
/// Blank rows are skipped and ids are assigned sequentially from 1.
#[must_use]
pub fn trips_from_range(range: &Range<Data>, first_row: u32) -> Vec<Trip> {
    let Some((last_row, _)) = range.end() else {
        return Vec::new();
    };

    let mut trips = Vec::new();
    for row_index in first_row.saturating_sub(1)..=last_row {
        let row = SheetRow::from_range(range, row_index);
        if row.is_blank() {
            continue;
        }
        let id = i64::try_from(trips.len()).unwrap_or(i64::MAX - 1) + 1;
        trips.push(trip_from_row(&row, id));
    }
    trips
}

fn trip_from_row(row: &SheetRow, id: i64) -> Trip {
    Trip {
        id,
        sequence_label: row.text(Column::SequenceLabel),
        date: row.text(Column::Date),
        start_time: row.text(Column::StartTime),
        start_name: row.text(Column::StartName),
        start_address: row.text(Column::StartAddress),
        odometer_start: row.number(Column::OdometerStart),
        end_time: row.text(Column::EndTime),
        end_name: row.text(Column::EndName),
        end_address: row.text(Column::EndAddress),
        odometer_end: row.number(Column::OdometerEnd),
        leg_distance: row.number(Column::LegDistance),
        cumulative_distance: row.number(Column::CumulativeDistance),
        duration: row.text(Column::Duration),
        parked_time: row.text(Column::ParkedTime),
    }
}
