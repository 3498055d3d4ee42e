// Primitives for reading CSV files.

use survey_charts::builder::SheetBuilder;

use crate::survey::io_common::simplify_file_name;
use crate::survey::*;

/// Reads every line of a CSV file. The first line is the header.
pub fn read_csv_sheet(path: &str, name: &str) -> SurveyResult<Sheet> {
    let rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .context(CsvOpenSnafu { path })?;
    let mut builder = SheetBuilder::new(name);
    for (idx, line_r) in rdr.into_records().enumerate() {
        let lineno = idx + 1;
        let line = line_r.context(CsvLineParseSnafu { path, lineno })?;
        let mut cells: Vec<String> = line.iter().map(|s| s.to_string()).collect();
        // Spreadsheet exports often start with a byte order mark.
        if let Some(first) = cells.first_mut() {
            if idx == 0 && first.starts_with('\u{feff}') {
                *first = first.trim_start_matches('\u{feff}').to_string();
            }
        }
        builder.add_row(cells);
    }
    let sheet = builder.build();
    debug!(
        "read_csv_sheet: {}: {} data rows",
        simplify_file_name(path),
        sheet.num_data_rows()
    );
    Ok(sheet)
}

/// The responses in one CSV file, the options in another one.
/// The options sheet is named after the first options sheet name of the rules.
pub fn read_csv_book(
    path: &str,
    options_path: Option<&str>,
    rules: &SurveyRules,
) -> SurveyResult<Option<SurveyBook>> {
    let main = read_csv_sheet(path, &simplify_file_name(path))?;
    let mut auxiliary: Vec<Sheet> = vec![];
    if let Some(op) = options_path {
        if Path::new(op).exists() {
            let name = rules
                .options_sheet_names
                .first()
                .cloned()
                .unwrap_or_else(|| simplify_file_name(op));
            auxiliary.push(read_csv_sheet(op, &name)?);
        } else {
            warn!("read_csv_book: options file {:?} does not exist", op);
        }
    }
    Ok(Some(SurveyBook::new(main, auxiliary)))
}
