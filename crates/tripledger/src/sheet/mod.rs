//! Spreadsheet import and export for tripledger.
//!
//! Trips travel in and out of the ledger as workbooks with fourteen fixed
//! columns (A–N). Reading goes through calamine and accepts any format it
//! understands; writing produces `.xlsx` via `rust_xlsxwriter`.

mod export;
mod import;
pub mod row;

pub use export::export_trips;
pub use import::{import_trips, trips_from_range};
pub use row::{Column, SheetRow};

/// Header names written above exported trips, one per [`Column`].
pub const HEADERS: [&str; 14] = [
    "Rit Nummer",
    "Datum",
    "Begin Tijd",
    "Naam",
    "Begin Adres",
    "Begin Stand",
    "Eind Tijd",
    "Naam",
    "Eind Adres",
    "Eind Stand",
    "Ritafstand",
    "afstand",
    "Duur",
    "Parkeer Tijd",
];

/// Default 1-based row where trip data starts in imported workbooks.
pub const DEFAULT_FIRST_ROW: u32 = 6;

/// Default file name for exported workbooks.
pub const DEFAULT_EXPORT_FILE: &str = "trip_data.xlsx";

/// Default worksheet name for exported workbooks.
pub const DEFAULT_SHEET_NAME: &str = "Trip Data";
