//! `tripledger` - A vehicle trip ledger
//!
//! This library keeps an ordered list of trips whose odometer readings chain
//! from one trip to the next, with cumulative distances kept consistent under
//! insertion and deletion. Trips move in and out of spreadsheets and persist
//! between runs in a local database.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod access;
pub mod cli;
pub mod config;
pub mod error;
pub mod form;
pub mod ledger;
pub mod logging;
pub mod report;
pub mod sheet;
pub mod storage;
pub mod trip;

pub use access::AccessGate;
pub use config::Config;
pub use error::{Error, Result};
pub use form::{LegInput, TripForm};
pub use ledger::{InsertAt, Ledger, TripDraft};
pub use logging::init_logging;
pub use storage::Storage;
pub use trip::Trip;
