use log::debug;
use std::collections::{BTreeMap, HashMap};

use crate::config::SurveyRules;
use crate::table::SurveyBook;
use crate::text::{eq_folded, fold, is_blank, FoldedSet};

/// The valid answer options of each column.
///
/// A column without an entry is an open question.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct OptionCatalog {
    by_column: BTreeMap<usize, Vec<String>>,
}

impl OptionCatalog {
    pub fn empty() -> OptionCatalog {
        OptionCatalog::default()
    }

    /// Builds a catalog from explicit lists. Blank and duplicate options are
    /// dropped, empty lists are ignored.
    pub fn from_columns(columns: &[(usize, Vec<&str>)]) -> OptionCatalog {
        let mut catalog = OptionCatalog::empty();
        for (column, options) in columns {
            catalog.set(*column, options.iter().map(|s| s.to_string()).collect());
        }
        catalog
    }

    /// Reads the options sheet of the book.
    ///
    /// The header of each options column names the column it applies to,
    /// either by the exact header text of the main sheet or by its column
    /// letters (`D`, `AB`). Headers that resolve to nothing are skipped.
    pub fn load(book: &SurveyBook, rules: &SurveyRules) -> OptionCatalog {
        let mut catalog = OptionCatalog::empty();
        let sheet = match book.find_sheet(&rules.options_sheet_names) {
            Some(s) => s,
            None => {
                debug!(
                    "OptionCatalog::load: no options sheet among {:?}",
                    rules.options_sheet_names
                );
                return catalog;
            }
        };

        // First occurrence wins for duplicated main headers.
        let mut main_columns: HashMap<String, usize> = HashMap::new();
        for cell in book.main().header() {
            if !is_blank(&cell.text) {
                main_columns.entry(fold(&cell.text)).or_insert(cell.column);
            }
        }

        for cell in sheet.header() {
            if is_blank(&cell.text) {
                continue;
            }
            let target = main_columns
                .get(&fold(&cell.text))
                .cloned()
                .or_else(|| column_letters_to_number(&cell.text));
            let target = match target {
                Some(c) => c,
                None => {
                    debug!(
                        "OptionCatalog::load: skipping options header {:?}",
                        cell.text
                    );
                    continue;
                }
            };
            let options = sheet.column_values(cell.column);
            debug!(
                "OptionCatalog::load: header {:?} -> column {}: {:?}",
                cell.text, target, options
            );
            catalog.set(target, options);
        }
        catalog
    }

    fn set(&mut self, column: usize, options: Vec<String>) {
        let mut distinct = FoldedSet::new();
        for opt in options.iter().filter(|s| !is_blank(s)) {
            distinct.insert(opt.trim());
        }
        if !distinct.is_empty() {
            self.by_column.insert(column, distinct.into_vec());
        }
    }

    pub fn options(&self, column: usize) -> Option<&[String]> {
        self.by_column.get(&column).map(|v| v.as_slice())
    }

    pub fn has_options(&self, column: usize) -> bool {
        self.by_column.contains_key(&column)
    }

    /// The canonical option matching the token, compared case-insensitively.
    pub fn resolve(&self, column: usize, token: &str) -> Option<&str> {
        self.options(column)?
            .iter()
            .find(|opt| eq_folded(opt, token))
            .map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.by_column.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_column.is_empty()
    }
}

/// Parses Excel-style column letters: A=1, Z=26, AA=27.
pub fn column_letters_to_number(s: &str) -> Option<usize> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    let mut res: usize = 0;
    for c in s.chars() {
        if !c.is_ascii_alphabetic() {
            return None;
        }
        let digit = (c.to_ascii_uppercase() as usize) - ('A' as usize) + 1;
        res = res.checked_mul(26)?.checked_add(digit)?;
    }
    Some(res)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::SheetBuilder;

    fn book(options: SheetBuilder) -> SurveyBook {
        SurveyBook::new(
            SheetBuilder::new("responses")
                .row(&["Id", "Class", "Favourite colour?", "Pets"])
                .build(),
            vec![options.build()],
        )
    }

    #[test]
    fn letters() {
        assert_eq!(column_letters_to_number("A"), Some(1));
        assert_eq!(column_letters_to_number("z"), Some(26));
        assert_eq!(column_letters_to_number("AA"), Some(27));
        assert_eq!(column_letters_to_number("AB"), Some(28));
        assert_eq!(column_letters_to_number("A1"), None);
        assert_eq!(column_letters_to_number(""), None);
        assert_eq!(column_letters_to_number("ZZZZZZZZZZZZZZZZZZZZ"), None);
    }

    #[test]
    fn resolves_by_header_then_by_letters() {
        let catalog = OptionCatalog::load(
            &book(
                SheetBuilder::new("Opties")
                    .row(&["favourite colour?", "D", "not a header 1", ""])
                    .row(&["Red", "Cat", "x", "y"])
                    .row(&[" Blue ", "", "x", "y"])
                    .row(&["red", "Dog"]),
            ),
            &SurveyRules::default(),
        );
        assert_eq!(catalog.len(), 2);
        assert_eq!(
            catalog.options(3),
            Some(&["Red".to_string(), "Blue".to_string()][..])
        );
        assert_eq!(
            catalog.options(4),
            Some(&["Cat".to_string(), "Dog".to_string()][..])
        );
        assert_eq!(catalog.resolve(3, "BLUE"), Some("Blue"));
        assert_eq!(catalog.resolve(3, "Purple"), None);
        assert_eq!(catalog.resolve(5, "Red"), None);
    }

    #[test]
    fn header_names_a_column_by_letters() {
        let catalog = OptionCatalog::load(
            &book(SheetBuilder::new("options").row(&["AB"]).row(&["Yes"])),
            &SurveyRules::default(),
        );
        assert!(catalog.has_options(28));
    }

    #[test]
    fn empty_lists_are_dropped() {
        let catalog = OptionCatalog::load(
            &book(SheetBuilder::new("opties").row(&["C"]).row(&["  "])),
            &SurveyRules::default(),
        );
        assert!(catalog.is_empty());
    }

    #[test]
    fn missing_sheet_gives_empty_catalog() {
        let catalog = OptionCatalog::load(
            &book(SheetBuilder::new("something else").row(&["C"]).row(&["Yes"])),
            &SurveyRules::default(),
        );
        assert!(catalog.is_empty());
    }
}
