// Reading the responses from an Excel workbook.

use calamine::{open_workbook, DataType, Range, Reader, Xlsx};

use crate::survey::io_common::simplify_file_name;
use crate::survey::*;

/// Reads a whole workbook. The main sheet is the worksheet with the given name,
/// or the first one. All the other worksheets are kept as auxiliary sheets.
///
/// Returns `None` when the requested worksheet does not exist.
pub fn read_xlsx_book(path: &str, worksheet_name: Option<&str>) -> SurveyResult<Option<SurveyBook>> {
    debug!(
        "read_xlsx_book: path: {:?} worksheet: {:?}",
        path, worksheet_name
    );
    let mut workbook: Xlsx<_> = open_workbook(path).context(OpeningExcelSnafu { path })?;
    let names: Vec<String> = workbook.sheet_names().to_vec();

    let main_name = match worksheet_name.or_else(|| names.first().map(|s| s.as_str())) {
        Some(n) => n.to_string(),
        None => {
            warn!("read_xlsx_book: {} has no worksheet", simplify_file_name(path));
            return Ok(None);
        }
    };

    let mut main: Option<Sheet> = None;
    let mut auxiliary: Vec<Sheet> = vec![];
    for name in names.iter() {
        let wrange = match workbook.worksheet_range(name) {
            Some(r) => r.context(ReadingWorksheetSnafu { path, name })?,
            None => continue,
        };
        let sheet = range_to_sheet(name, &wrange);
        debug!(
            "read_xlsx_book: worksheet {:?}: {} data rows",
            name,
            sheet.num_data_rows()
        );
        if main.is_none() && *name == main_name {
            main = Some(sheet);
        } else {
            auxiliary.push(sheet);
        }
    }

    match main {
        Some(m) => {
            if m.is_empty() {
                warn!(
                    "read_xlsx_book: worksheet {:?} in {} is empty",
                    main_name,
                    simplify_file_name(path)
                );
            }
            Ok(Some(SurveyBook::new(m, auxiliary)))
        }
        None => {
            warn!(
                "read_xlsx_book: worksheet {:?} not found in {}",
                main_name,
                simplify_file_name(path)
            );
            Ok(None)
        }
    }
}

fn range_to_sheet(name: &str, wrange: &Range<DataType>) -> Sheet {
    // The used range may not start at column A.
    let first_column = wrange
        .start()
        .map(|(_, col)| col as usize + 1)
        .unwrap_or(1);
    let rows: Vec<Vec<String>> = wrange
        .rows()
        .map(|row| row.iter().map(cell_text).collect())
        .collect();
    Sheet::new(name, first_column, rows)
}

fn cell_text(cell: &DataType) -> String {
    match cell {
        DataType::String(s) => s.clone(),
        DataType::Empty => String::new(),
        DataType::Int(i) => i.to_string(),
        DataType::Float(f) => f.to_string(),
        DataType::Bool(b) => b.to_string(),
        DataType::DateTime(serial) => date_text(cell, *serial),
        other => other.to_string(),
    }
}

/// Dates without a time of day are written `2023-07-16`, the others `2023-07-16 12:00:00`.
fn date_text(cell: &DataType, serial: f64) -> String {
    let format = if serial.fract() == 0.0 {
        "%Y-%m-%d"
    } else {
        "%Y-%m-%d %H:%M:%S"
    };
    match cell.as_datetime() {
        Some(dt) => dt.format(format).to_string(),
        None => serial.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_texts() {
        assert_eq!(cell_text(&DataType::String("  Yes ".to_string())), "  Yes ");
        assert_eq!(cell_text(&DataType::Empty), "");
        assert_eq!(cell_text(&DataType::Int(3)), "3");
        assert_eq!(cell_text(&DataType::Float(4.0)), "4");
        assert_eq!(cell_text(&DataType::Float(2.5)), "2.5");
        assert_eq!(cell_text(&DataType::Bool(true)), "true");
    }

    #[test]
    fn dates_are_readable() {
        assert_eq!(cell_text(&DataType::DateTime(45123.0)), "2023-07-16");
        assert_eq!(
            cell_text(&DataType::DateTime(45123.5)),
            "2023-07-16 12:00:00"
        );
    }

    #[test]
    fn range_offset() {
        let mut wrange: Range<DataType> = Range::new((0, 1), (1, 2));
        wrange.set_value((0, 1), DataType::String("Class".to_string()));
        wrange.set_value((0, 2), DataType::String("Age?".to_string()));
        wrange.set_value((1, 1), DataType::String("5a".to_string()));
        wrange.set_value((1, 2), DataType::Int(12));
        let sheet = range_to_sheet("Sheet1", &wrange);
        let header = sheet.header();
        assert_eq!(header[0].column, 2);
        assert_eq!(header[1].text, "Age?");
        let row = sheet.data_rows().next().unwrap();
        assert_eq!(row.cell(2), "5a");
        assert_eq!(row.cell(3), "12");

        let empty = range_to_sheet("Sheet2", &Range::empty());
        assert!(empty.is_empty());
        assert!(empty.header().is_empty());
    }
}
