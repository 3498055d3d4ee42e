pub use crate::table::*;

/// A builder for in-memory sheets.
///
/// Readers of spreadsheet files and tests both go through it.
///
/// ```
/// use survey_charts::builder::SheetBuilder;
///
/// let sheet = SheetBuilder::new("responses")
///     .row(&["Id", "Class", "Do you like it?"])
///     .row(&["1", "5A", "Yes"])
///     .build();
///
/// assert_eq!(sheet.num_data_rows(), 1);
/// ```
pub struct SheetBuilder {
    _name: String,
    _first_column: usize,
    _rows: Vec<Vec<String>>,
}

impl SheetBuilder {
    pub fn new(name: &str) -> SheetBuilder {
        SheetBuilder {
            _name: name.to_string(),
            _first_column: 1,
            _rows: Vec::new(),
        }
    }

    /// Sets the absolute (1-based) column of the first cell of every row.
    pub fn first_column(self, column: usize) -> SheetBuilder {
        SheetBuilder {
            _first_column: column,
            ..self
        }
    }

    pub fn row(mut self, cells: &[&str]) -> SheetBuilder {
        self.add_row(cells.iter().map(|s| s.to_string()).collect());
        self
    }

    /// Adds a row of owned cells.
    ///
    /// Rows may have different lengths, missing cells read as blank.
    pub fn add_row(&mut self, cells: Vec<String>) {
        self._rows.push(cells);
    }

    pub fn build(self) -> Sheet {
        Sheet::new(&self._name, self._first_column, self._rows)
    }
}
