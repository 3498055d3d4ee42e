// ********* Input data structures ***********

use crate::text::{eq_folded, is_blank};

/// A cell of the header row.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct HeaderCell {
    /// 1-based, absolute column position.
    pub column: usize,
    /// The header text, trimmed. May be empty.
    pub text: String,
}

/// A rectangular block of text cells, as read from one worksheet.
///
/// The first row is the header row. `first_column` is the absolute position
/// of the leftmost stored column, so that a sheet whose used range starts at
/// column C still reports C as position 3.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Sheet {
    pub(crate) name: String,
    pub(crate) first_column: usize,
    pub(crate) rows: Vec<Vec<String>>,
}

/// One data row of a sheet.
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    first_column: usize,
    cells: &'a [String],
}

impl<'a> Row<'a> {
    /// The text at the given column, or an empty string outside the stored cells.
    pub fn cell(&self, column: usize) -> &'a str {
        column
            .checked_sub(self.first_column)
            .and_then(|idx| self.cells.get(idx))
            .map(|s| s.as_str())
            .unwrap_or("")
    }
}

impl Sheet {
    pub fn new(name: &str, first_column: usize, rows: Vec<Vec<String>>) -> Sheet {
        Sheet {
            name: name.to_string(),
            first_column: first_column.max(1),
            rows,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The header row, one entry per stored column.
    pub fn header(&self) -> Vec<HeaderCell> {
        match self.rows.first() {
            Some(cells) => cells
                .iter()
                .enumerate()
                .map(|(idx, text)| HeaderCell {
                    column: self.first_column + idx,
                    text: text.trim().to_string(),
                })
                .collect(),
            None => Vec::new(),
        }
    }

    /// All the rows after the header.
    pub fn data_rows(&self) -> impl Iterator<Item = Row<'_>> {
        let first_column = self.first_column;
        self.rows.iter().skip(1).map(move |cells| Row {
            first_column,
            cells: cells.as_slice(),
        })
    }

    pub fn num_data_rows(&self) -> usize {
        self.rows.len().saturating_sub(1)
    }

    /// The non-blank data cells of one column, trimmed, in row order.
    pub fn column_values(&self, column: usize) -> Vec<String> {
        self.data_rows()
            .map(|row| row.cell(column))
            .filter(|s| !is_blank(s))
            .map(|s| s.trim().to_string())
            .collect()
    }
}

/// A survey workbook: the response table plus the auxiliary sheets.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct SurveyBook {
    main: Sheet,
    auxiliary: Vec<Sheet>,
}

impl SurveyBook {
    pub fn new(main: Sheet, auxiliary: Vec<Sheet>) -> SurveyBook {
        SurveyBook { main, auxiliary }
    }

    pub fn main(&self) -> &Sheet {
        &self.main
    }

    /// Finds an auxiliary sheet by name, trying the candidates in order.
    /// Names are compared case-insensitively.
    pub fn find_sheet(&self, names: &[String]) -> Option<&Sheet> {
        names.iter().find_map(|name| {
            self.auxiliary
                .iter()
                .find(|sheet| eq_folded(&sheet.name, name))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::SheetBuilder;

    #[test]
    fn positions_follow_the_used_range_origin() {
        let sheet = SheetBuilder::new("main")
            .first_column(3)
            .row(&["Q1", " Q2 "])
            .row(&["a", "b"])
            .build();
        let header = sheet.header();
        assert_eq!(header[0].column, 3);
        assert_eq!(header[1].column, 4);
        assert_eq!(header[1].text, "Q2");
        let row = sheet.data_rows().next().unwrap();
        assert_eq!(row.cell(4), "b");
        assert_eq!(row.cell(2), "");
        assert_eq!(row.cell(9), "");
    }

    #[test]
    fn aux_sheets_found_case_insensitively_in_candidate_order() {
        let book = SurveyBook::new(
            SheetBuilder::new("main").row(&["x"]).build(),
            vec![
                SheetBuilder::new("Options").row(&["o"]).build(),
                SheetBuilder::new("OPTIES").row(&["p"]).build(),
            ],
        );
        let names = vec!["opties".to_string(), "options".to_string()];
        assert_eq!(book.find_sheet(&names).unwrap().name(), "OPTIES");
        assert!(book.find_sheet(&["other".to_string()]).is_none());
    }

    #[test]
    fn column_values_skip_blanks() {
        let sheet = SheetBuilder::new("s")
            .row(&["h"])
            .row(&[" a "])
            .row(&["  "])
            .row(&[])
            .row(&["b"])
            .build();
        assert_eq!(sheet.column_values(1), vec!["a", "b"]);
        assert_eq!(sheet.num_data_rows(), 4);
    }
}
