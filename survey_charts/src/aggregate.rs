use log::debug;
use std::collections::HashMap;

use crate::assemble::{grid_chart, open_text_chart, order_labels, single_choice_chart};
use crate::catalog::OptionCatalog;
use crate::classify::{QuestionGroup, QuestionKind};
use crate::config::{ChartDatum, SurveyRules};
use crate::segments::SegmentFilter;
use crate::table::{Row, Sheet};
use crate::text::{fold, split_tokens, FoldedSet};

/// Grid answers without a catalog starting with this prefix are "Others".
/// The free text follows the first colon.
pub const LEGACY_OTHER_PREFIX: &str = "other";

/// What an answer token stands for.
#[derive(Eq, PartialEq, Debug, Clone)]
struct Resolved {
    key: String,
    other_text: Option<String>,
}

/// Groups the inputs shared by all the questions of one computation.
pub struct Aggregator<'a> {
    sheet: &'a Sheet,
    filter: &'a SegmentFilter,
    catalog: &'a OptionCatalog,
    rules: &'a SurveyRules,
}

impl<'a> Aggregator<'a> {
    pub fn new(
        sheet: &'a Sheet,
        filter: &'a SegmentFilter,
        catalog: &'a OptionCatalog,
        rules: &'a SurveyRules,
    ) -> Aggregator<'a> {
        Aggregator {
            sheet,
            filter,
            catalog,
            rules,
        }
    }

    /// The chart of one question, if it has anything to show.
    pub fn aggregate(&self, group: &QuestionGroup) -> Option<ChartDatum> {
        match group.kind {
            QuestionKind::OpenText => Some(self.open_text(group)),
            QuestionKind::SingleChoice => self.single_choice(group),
            QuestionKind::GridStacked(_) => Some(self.grid(group)),
        }
    }

    /// The rows of the selected segment.
    fn qualifying_rows(&self) -> impl Iterator<Item = Row<'a>> + '_ {
        let segment_column = self.rules.segment_column;
        self.sheet
            .data_rows()
            .filter(move |row| self.filter.matches(row.cell(segment_column)))
    }

    fn open_text(&self, group: &QuestionGroup) -> ChartDatum {
        let column = group.members[0].column;
        let mut responses = FoldedSet::new();
        for row in self.qualifying_rows() {
            for token in split_tokens(row.cell(column), group.multi_value) {
                responses.insert(token);
            }
        }
        debug!(
            "open_text: column {}: {} distinct responses",
            column,
            responses.len()
        );
        open_text_chart(&group.title, responses)
    }

    fn single_choice(&self, group: &QuestionGroup) -> Option<ChartDatum> {
        let column = group.members[0].column;
        let options = self.catalog.options(column);
        // Folded key -> (display text, count). Catalog casing wins.
        let mut tally: HashMap<String, (String, u64)> = HashMap::new();
        // Options nobody picked are still shown.
        for opt in options.unwrap_or(&[]) {
            tally.entry(fold(opt)).or_insert_with(|| (opt.clone(), 0));
        }
        let mut other_texts = FoldedSet::new();
        for row in self.qualifying_rows() {
            for token in split_tokens(row.cell(column), group.multi_value) {
                let key = match self.catalog.resolve(column, token) {
                    Some(opt) => opt,
                    None => {
                        other_texts.insert(token);
                        self.rules.others_label.as_str()
                    }
                };
                tally.entry(fold(key)).or_insert_with(|| (key.to_string(), 0)).1 += 1;
            }
        }
        debug!("single_choice: column {}: tally {:?}", column, tally);
        single_choice_chart(
            &group.title,
            &tally,
            options,
            other_texts,
            &self.rules.palette,
        )
    }

    fn resolve_grid_token(&self, column: usize, token: &str) -> Resolved {
        if self.catalog.has_options(column) {
            return match self.catalog.resolve(column, token) {
                Some(opt) => Resolved {
                    key: opt.to_string(),
                    other_text: None,
                },
                None => Resolved {
                    key: self.rules.others_label.clone(),
                    other_text: Some(token.to_string()),
                },
            };
        }
        if fold(token).starts_with(LEGACY_OTHER_PREFIX) {
            let other_text = token
                .find(':')
                .map(|idx| token[idx + 1..].trim())
                .filter(|s| !s.is_empty())
                .map(|s| s.to_string());
            Resolved {
                key: self.rules.others_label.clone(),
                other_text,
            }
        } else {
            Resolved {
                key: token.to_string(),
                other_text: None,
            }
        }
    }

    fn grid(&self, group: &QuestionGroup) -> ChartDatum {
        let num_members = group.members.len();
        let mut choices = FoldedSet::new();
        let mut other_texts = FoldedSet::new();
        // Folded choice -> number of respondents per member column.
        let mut counts: HashMap<String, Vec<u64>> = HashMap::new();

        for (member_idx, member) in group.members.iter().enumerate() {
            for row in self.qualifying_rows() {
                let mut row_keys = FoldedSet::new();
                for token in split_tokens(row.cell(member.column), group.multi_value) {
                    let resolved = self.resolve_grid_token(member.column, token);
                    if let Some(text) = resolved.other_text.as_deref() {
                        other_texts.insert(text);
                    }
                    choices.insert(&resolved.key);
                    row_keys.insert(&resolved.key);
                }
                // A respondent counts once per choice and column.
                for key in row_keys.iter() {
                    let per_member = counts
                        .entry(fold(key))
                        .or_insert_with(|| vec![0; num_members]);
                    per_member[member_idx] += 1;
                }
            }
        }

        let reference_column = group.members[0].column;
        let ordered = order_labels(choices.iter(), self.catalog.options(reference_column));
        debug!("grid: columns {:?}: choices {:?}", group.columns(), ordered);
        grid_chart(
            &group.title,
            group.members.iter().map(|m| m.label.clone()).collect(),
            &ordered,
            &counts,
            other_texts,
            &self.rules.palette,
        )
    }
}
