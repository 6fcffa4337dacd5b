//! Typed access to one spreadsheet row.

use calamine::{Data, Range};

/// The fourteen trip columns, in sheet order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    /// A: sequence label.
    SequenceLabel,
    /// B: date.
    Date,
    /// C: departure time.
    StartTime,
    /// D: departure location name.
    StartName,
    /// E: departure address.
    StartAddress,
    /// F: odometer at departure.
    OdometerStart,
    /// G: arrival time.
    EndTime,
    /// H: arrival location name.
    EndName,
    /// I: arrival address.
    EndAddress,
    /// J: odometer at arrival.
    OdometerEnd,
    /// K: leg distance.
    LegDistance,
    /// L: cumulative distance.
    CumulativeDistance,
    /// M: duration.
    Duration,
    /// N: time parked.
    ParkedTime,
}

impl Column {
    /// All columns in sheet order.
    pub const ALL: [Column; 14] = [
        Column::SequenceLabel,
        Column::Date,
        Column::StartTime,
        Column::StartName,
        Column::StartAddress,
        Column::OdometerStart,
        Column::EndTime,
        Column::EndName,
        Column::EndAddress,
        Column::OdometerEnd,
        Column::LegDistance,
        Column::CumulativeDistance,
        Column::Duration,
        Column::ParkedTime,
    ];

    /// Zero-based column index.
    #[must_use]
    pub fn index(self) -> u16 {
        match self {
            Column::SequenceLabel => 0,
            Column::Date => 1,
            Column::StartTime => 2,
            Column::StartName => 3,
            Column::StartAddress => 4,
            Column::OdometerStart => 5,
            Column::EndTime => 6,
            Column::EndName => 7,
            Column::EndAddress => 8,
            Column::OdometerEnd => 9,
            Column::LegDistance => 10,
            Column::CumulativeDistance => 11,
            Column::Duration => 12,
            Column::ParkedTime => 13,
        }
    }

    /// Spreadsheet column letter.
    #[must_use]
    pub fn letter(self) -> char {
        char::from(b'A' + u8::try_from(self.index()).unwrap_or(0))
    }
}

/// The cells of one row, addressed by [`Column`].
#[derive(Debug, Clone, PartialEq)]
pub struct SheetRow {
    cells: Vec<Data>,
}

impl SheetRow {
    /// Read the row at zero-based absolute index `row` from `range`.
    ///
    /// Cells outside the range read as empty.
    #[must_use]
    pub fn from_range(range: &Range<Data>, row: u32) -> Self {
        let cells = Column::ALL
            .iter()
            .map(|col| {
                range
                    .get_value((row, u32::from(col.index())))
                    .cloned()
                    .unwrap_or(Data::Empty)
            })
            .collect();
        Self { cells }
    }

    /// Build a row directly from cells in column order.
    #[must_use]
    pub fn from_cells(cells: Vec<Data>) -> Self {
        Self { cells }
    }

    fn cell(&self, column: Column) -> &Data {
        self.cells
            .get(usize::from(column.index()))
            .unwrap_or(&Data::Empty)
    }

    /// The cell as text. Numbers render in their shortest decimal form and
    /// empty or error cells read as `""`.
    #[must_use]
    pub fn text(&self, column: Column) -> String {
        match self.cell(column) {
            Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
            Data::Float(f) => f.to_string(),
            Data::Int(i) => i.to_string(),
            Data::Bool(b) => b.to_string(),
            Data::DateTime(dt) => dt.as_f64().to_string(),
            Data::Error(_) | Data::Empty => String::new(),
        }
    }

    /// The cell as a number, defaulting to 0 when missing or non-numeric.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn number(&self, column: Column) -> f64 {
        let value = match self.cell(column) {
            Data::Float(f) => *f,
            Data::Int(i) => *i as f64,
            Data::Bool(b) => f64::from(u8::from(*b)),
            Data::DateTime(dt) => dt.as_f64(),
            Data::String(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    0.0
                } else {
                    trimmed.parse().unwrap_or(0.0)
                }
            }
            Data::DateTimeIso(_) | Data::DurationIso(_) | Data::Error(_) | Data::Empty => 0.0,
        };
        if value.is_finite() {
            value
        } else {
            0.0
        }
    }

    /// Whether the cell holds something other than blank text or a zero.
    #[must_use]
    pub fn is_filled(&self, column: Column) -> bool {
        match self.cell(column) {
            Data::Empty | Data::Error(_) => false,
            Data::String(s) => !s.is_empty(),
            Data::Float(f) => *f != 0.0 && !f.is_nan(),
            Data::Int(i) => *i != 0,
            Data::Bool(b) => *b,
            Data::DateTime(_) | Data::DateTimeIso(_) | Data::DurationIso(_) => true,
        }
    }

    /// Whether this row carries no trip: no label and no readings.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        !self.is_filled(Column::SequenceLabel)
            && !self.is_filled(Column::OdometerStart)
            && !self.is_filled(Column::OdometerEnd)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row_with(column: Column, value: Data) -> SheetRow {
        let mut cells = vec![Data::Empty; 14];
        cells[usize::from(column.index())] = value;
        SheetRow::from_cells(cells)
    }

    #[test]
    fn test_column_letters() {
        assert_eq!(Column::SequenceLabel.letter(), 'A');
        assert_eq!(Column::OdometerStart.letter(), 'F');
        assert_eq!(Column::OdometerEnd.letter(), 'J');
        assert_eq!(Column::ParkedTime.letter(), 'N');
    }

    #[test]
    fn test_column_indices_are_sequential() {
        for (i, col) in Column::ALL.iter().enumerate() {
            assert_eq!(usize::from(col.index()), i);
        }
    }

    #[test]
    fn test_text_from_string_and_number() {
        let row = row_with(Column::Date, Data::String("3/4/25".to_string()));
        assert_eq!(row.text(Column::Date), "3/4/25");

        let row = row_with(Column::StartTime, Data::Float(9.0));
        assert_eq!(row.text(Column::StartTime), "9");

        let row = row_with(Column::StartTime, Data::Float(0.375));
        assert_eq!(row.text(Column::StartTime), "0.375");
    }

    #[test]
    fn test_text_defaults_to_empty() {
        let row = row_with(Column::Date, Data::Empty);
        assert_eq!(row.text(Column::Date), "");
        assert_eq!(row.text(Column::Duration), "");
    }

    #[test]
    fn test_number_parsing() {
        assert_eq!(row_with(Column::OdometerStart, Data::Float(37092.4)).number(Column::OdometerStart), 37092.4);
        assert_eq!(row_with(Column::OdometerStart, Data::Int(12)).number(Column::OdometerStart), 12.0);
        assert_eq!(
            row_with(Column::OdometerStart, Data::String(" 46.5 ".to_string())).number(Column::OdometerStart),
            46.5
        );
    }

    #[test]
    fn test_number_defaults_to_zero() {
        assert_eq!(
            row_with(Column::OdometerEnd, Data::String("n/a".to_string())).number(Column::OdometerEnd),
            0.0
        );
        assert_eq!(row_with(Column::OdometerEnd, Data::Empty).number(Column::OdometerEnd), 0.0);
        assert_eq!(
            row_with(Column::OdometerEnd, Data::Float(f64::NAN)).number(Column::OdometerEnd),
            0.0
        );
    }

    #[test]
    fn test_is_blank() {
        assert!(SheetRow::from_cells(vec![Data::Empty; 14]).is_blank());
        assert!(row_with(Column::OdometerStart, Data::Float(0.0)).is_blank());
        assert!(row_with(Column::Date, Data::String("1/1/25".to_string())).is_blank());
        assert!(!row_with(Column::SequenceLabel, Data::String("1.1".to_string())).is_blank());
        assert!(!row_with(Column::OdometerEnd, Data::Float(4.2)).is_blank());
    }

    #[test]
    fn test_short_row_reads_empty() {
        let row = SheetRow::from_cells(vec![Data::String("1.1".to_string())]);
        assert_eq!(row.text(Column::ParkedTime), "");
        assert_eq!(row.number(Column::OdometerEnd), 0.0);
    }

    #[test]
    fn test_from_range_reads_absolute_row() {
        let mut range = Range::new((0, 0), (6, 13));
        range.set_value((5, 0), Data::String("2.1".to_string()));
        range.set_value((5, 9), Data::Float(88.0));

        let row = SheetRow::from_range(&range, 5);
        assert_eq!(row.text(Column::SequenceLabel), "2.1");
        assert_eq!(row.number(Column::OdometerEnd), 88.0);

        let outside = SheetRow::from_range(&range, 40);
        assert!(outside.is_blank());
    }
}
