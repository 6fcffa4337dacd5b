//! Workbook export.

use std::path::Path;

use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};
use tracing::info;

use super::row::Column;
use super::HEADERS;
use crate::error::Result;
use crate::trip::Trip;

/// Write `trips` to a new `.xlsx` workbook at `path`.
///
/// The single worksheet holds a header row followed by one row per trip in
/// ledger order. An existing file at `path` is overwritten.
///
/// # Errors
///
/// Returns [`crate::Error::SpreadsheetWrite`] if the workbook cannot be built
/// or saved.
pub fn export_trips(trips: &[Trip], path: impl AsRef<Path>, sheet_name: &str) -> Result<()> {
    let path = path.as_ref();
    let mut workbook = Workbook::new();
    {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(sheet_name)?;
        write_sheet(worksheet, trips)?;
    }
    workbook.save(path)?;
    info!("Exported {} trips to {}", trips.len(), path.display());
    Ok(())
}

fn write_sheet(worksheet: &mut Worksheet, trips: &[Trip]) -> std::result::Result<(), XlsxError> {
    let bold = Format::new().set_bold();
    for (column, header) in Column::ALL.iter().zip(HEADERS) {
        worksheet.write_string_with_format(0, column.index(), header, &bold)?;
    }

    for (row, trip) in (1u32..).zip(trips) {
        for column in Column::ALL {
            let col = column.index();
            match column {
                Column::OdometerStart => worksheet.write_number(row, col, trip.odometer_start)?,
                Column::OdometerEnd => worksheet.write_number(row, col, trip.odometer_end)?,
                Column::LegDistance => worksheet.write_number(row, col, trip.leg_distance)?,
                Column::CumulativeDistance => {
                    worksheet.write_number(row, col, trip.cumulative_distance)?
                }
                _ => worksheet.write_string(row, col, text_field(trip, column))?,
            };
        }
    }
    Ok(())
}

fn text_field(trip: &Trip, column: Column) -> &str {
    match column {
        Column::SequenceLabel => &trip.sequence_label,
        Column::Date => &trip.date,
        Column::StartTime => &trip.start_time,
        Column::StartName => &trip.start_name,
        Column::StartAddress => &trip.start_address,
        Column::EndTime => &trip.end_time,
        Column::EndName => &trip.end_name,
        Column::EndAddress => &trip.end_address,
        Column::Duration => &trip.duration,
        Column::ParkedTime => &trip.parked_time,
        Column::OdometerStart
        | Column::OdometerEnd
        | Column::LegDistance
        | Column::CumulativeDistance => "",
    }
}
