//! The new-trip form.
//!
//! A [`TripForm`] is prefilled from the ledger's cursor, edited by the user,
//! and turned into an [`InsertRequest`] on submit. A form with missing fields
//! never reaches [`Ledger::insert`].

use chrono::{Datelike, Local, NaiveDate};

use crate::error::{Error, Result};
use crate::ledger::{InsertAt, Ledger, TripDraft};

/// How the user specifies the length of the new leg.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LegInput {
    /// The absolute odometer reading at arrival.
    EndReading(f64),
    /// The distance driven; the end reading is derived from the start.
    Distance(f64),
}

/// A validated form, ready to be applied with [`Ledger::insert`].
#[derive(Debug, Clone, PartialEq)]
pub struct InsertRequest {
    /// The new trip's user-supplied fields.
    pub draft: TripDraft,
    /// Where the trip goes.
    pub at: InsertAt,
}

impl InsertRequest {
    /// Apply this request to `ledger`.
    ///
    /// # Errors
    ///
    /// Propagates [`Ledger::insert`] errors.
    pub fn apply(self, ledger: &Ledger) -> Result<Ledger> {
        ledger.insert(self.draft, self.at)
    }
}

/// State of the new-trip form.
#[derive(Debug, Clone, PartialEq)]
pub struct TripForm {
    /// Date of travel.
    pub date: String,
    /// Departure address.
    pub begin_address: String,
    /// Odometer at departure; display only, the ledger derives the real one.
    pub begin_reading: f64,
    /// Arrival address.
    pub end_address: String,
    /// End reading or distance, whichever mode the user chose.
    pub leg: Option<LegInput>,
    /// Where the trip will be inserted.
    pub target: Option<InsertAt>,
}

impl TripForm {
    /// Prefill the form from the trip under the ledger's cursor.
    ///
    /// Falls back to the last trip when the cursor is unset. The start
    /// address and reading continue from that trip's end, and the date is
    /// that trip's date or `today`.
    #[must_use]
    pub fn prefill(ledger: &Ledger, today: NaiveDate) -> Self {
        let source = ledger
            .cursor_trip()
            .or_else(|| ledger.trips().last());
        let today = format_short_date(today);

        let (begin_address, begin_reading, date) = match source {
            Some(trip) => {
                let date = if trip.date.is_empty() {
                    today
                } else {
                    trip.date.clone()
                };
                (trip.end_address.clone(), trip.odometer_end, date)
            }
            None => (String::new(), 0.0, today),
        };

        Self {
            date,
            begin_address,
            begin_reading,
            end_address: String::new(),
            leg: None,
            target: ledger.cursor().map(InsertAt::After),
        }
    }

    /// Retarget the form at the head of the ledger.
    ///
    /// The head trip starts at a reading of 0 and has no predecessor to take
    /// a start address from, so the prefilled address is cleared.
    #[must_use]
    pub fn at_head(mut self) -> Self {
        self.target = Some(InsertAt::Head);
        self.begin_reading = 0.0;
        self.begin_address.clear();
        self
    }

    /// The end reading implied by the current input.
    #[must_use]
    pub fn end_reading(&self) -> Option<f64> {
        match self.leg? {
            LegInput::EndReading(end) => Some(end),
            LegInput::Distance(distance) => Some(self.begin_reading + distance),
        }
    }

    /// The distance implied by the current input, shown only when positive.
    #[must_use]
    pub fn implied_distance(&self) -> Option<f64> {
        match self.leg? {
            LegInput::Distance(distance) => Some(distance),
            LegInput::EndReading(end) => Some(end - self.begin_reading).filter(|d| *d > 0.0),
        }
    }

    /// Validate the form and produce an insert request.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FormIncomplete`] naming the first missing field.
    pub fn submit(&self) -> Result<InsertRequest> {
        if self.begin_address.trim().is_empty() {
            return Err(Error::FormIncomplete {
                field: "begin address",
            });
        }
        if self.end_address.trim().is_empty() {
            return Err(Error::FormIncomplete {
                field: "end address",
            });
        }
        let end_reading = self
            .end_reading()
            .ok_or(Error::FormIncomplete {
                field: "end reading",
            })?;
        let at = self.target.ok_or(Error::FormIncomplete {
            field: "insert position",
        })?;

        Ok(InsertRequest {
            draft: TripDraft {
                begin_address: self.begin_address.trim().to_string(),
                end_address: self.end_address.trim().to_string(),
                end_reading,
                date: self.date.clone(),
            },
            at,
        })
    }
}

/// Abandon the form: the cursor returns to the last trip.
#[must_use]
pub fn cancel(ledger: &Ledger) -> Ledger {
    ledger.clear_cursor_to_end()
}

/// Format a date as `M/D/YY`.
#[must_use]
pub fn format_short_date(date: NaiveDate) -> String {
    format!(
        "{}/{}/{:02}",
        date.month(),
        date.day(),
        date.year().rem_euclid(100)
    )
}

/// Today's date in local time.
#[must_use]
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}
