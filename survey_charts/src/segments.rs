use log::debug;

use crate::config::SurveyRules;
use crate::table::Sheet;
use crate::text::{eq_folded, is_blank, sort_folded, FoldedSet};

/// Restricts an aggregation to the respondents of one segment.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct SegmentFilter {
    selected: Option<String>,
}

impl SegmentFilter {
    /// A blank selection selects every respondent.
    pub fn new(selected: Option<&str>) -> SegmentFilter {
        SegmentFilter {
            selected: selected
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(|s| s.to_string()),
        }
    }

    pub fn all() -> SegmentFilter {
        SegmentFilter { selected: None }
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Whether a row with this segment value takes part in the tallies.
    pub fn matches(&self, segment_value: &str) -> bool {
        match &self.selected {
            Some(s) => eq_folded(s, segment_value),
            None => true,
        }
    }

    /// Whether a selector entry corresponds to the current selection.
    /// Two blank values are the same selection.
    pub fn is_selected(&self, candidate: Option<&str>) -> bool {
        let candidate = candidate.filter(|s| !is_blank(s));
        match (&self.selected, candidate) {
            (None, None) => true,
            (Some(s), Some(c)) => eq_folded(s, c),
            _ => false,
        }
    }
}

/// The distinct segments of the sheet, in display order.
///
/// The segments of the priority list come first, in the order of that list,
/// followed by the others in alphabetical order.
pub fn list_segments(sheet: &Sheet, rules: &SurveyRules) -> Vec<String> {
    let mut found = FoldedSet::new();
    for row in sheet.data_rows() {
        let value = row.cell(rules.segment_column).trim().to_uppercase();
        if !value.is_empty() {
            found.insert(&value);
        }
    }
    debug!("list_segments: found {} segments", found.len());

    let mut ordered: Vec<String> = Vec::new();
    for p in rules.segment_priority.iter() {
        if found.contains(p) && !ordered.iter().any(|o| eq_folded(o, p)) {
            ordered.push(p.clone());
        }
    }
    let mut rest: Vec<String> = found
        .iter()
        .filter(|s| !rules.segment_priority.iter().any(|p| eq_folded(p, s)))
        .map(|s| s.to_string())
        .collect();
    sort_folded(&mut rest);
    ordered.extend(rest);
    ordered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::SheetBuilder;

    #[test]
    fn priority_first_then_alphabetical() {
        let sheet = SheetBuilder::new("s")
            .row(&["Id", "Class"])
            .row(&["1", "zeta"])
            .row(&["2", " 5hsd2 "])
            .row(&["3", ""])
            .row(&["4", "ALPHA"])
            .row(&["5", "5HSD1"])
            .row(&["6", "Zeta"])
            .row(&["7"])
            .build();
        let segments = list_segments(&sheet, &SurveyRules::default());
        assert_eq!(segments, vec!["5HSD1", "5HSD2", "ALPHA", "ZETA"]);
    }

    #[test]
    fn empty_sheet_has_no_segments() {
        let sheet = SheetBuilder::new("s").build();
        assert!(list_segments(&sheet, &SurveyRules::default()).is_empty());
    }

    #[test]
    fn filter_matching() {
        let f = SegmentFilter::new(Some(" 5a "));
        assert!(f.matches("5A"));
        assert!(f.matches(" 5a"));
        assert!(!f.matches("5B"));
        assert!(!f.matches(""));
        let all = SegmentFilter::new(Some("   "));
        assert_eq!(all, SegmentFilter::all());
        assert!(all.matches(""));
        assert!(all.matches("anything"));
    }

    #[test]
    fn selection() {
        assert!(SegmentFilter::all().is_selected(None));
        assert!(SegmentFilter::all().is_selected(Some(" ")));
        assert!(!SegmentFilter::all().is_selected(Some("5A")));
        let f = SegmentFilter::new(Some("5a"));
        assert!(f.is_selected(Some("5A")));
        assert!(!f.is_selected(None));
    }
}
