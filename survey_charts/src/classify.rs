use log::debug;
use std::collections::HashSet;

use crate::catalog::OptionCatalog;
use crate::config::{SurveyRules, ViewSide};
use crate::table::HeaderCell;
use crate::text::{
    bracket_label, eq_folded, has_bracket_segment, question_stem, starts_with_folded,
};

pub const GRID_TITLE_FALLBACK: &str = "Grid question";

/// How a grid group was recognized.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum GridOrigin {
    ExplicitRange,
    SharedPrefix,
    BracketStem,
}

#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum QuestionKind {
    SingleChoice,
    OpenText,
    GridStacked(GridOrigin),
}

/// One column of a question, with the label it is displayed under.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct GroupMember {
    pub column: usize,
    pub label: String,
}

/// A logical question: one standalone column or the columns of a grid.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct QuestionGroup {
    pub title: String,
    pub kind: QuestionKind,
    /// Never empty; in header order.
    pub members: Vec<GroupMember>,
    /// Cells hold comma-separated answers.
    pub multi_value: bool,
}

impl QuestionGroup {
    pub fn columns(&self) -> Vec<usize> {
        self.members.iter().map(|m| m.column).collect()
    }
}

/// A way of grouping several columns into one grid question.
///
/// The rules are tried in order, the first one that claims a column builds
/// the whole group.
#[derive(Eq, PartialEq, Debug, Clone)]
enum GroupingRule<'a> {
    ExplicitRange(&'a [usize]),
    SharedPrefix(&'a str),
    BracketStem { from_column: usize },
}

impl<'a> GroupingRule<'a> {
    fn origin(&self) -> GridOrigin {
        match self {
            GroupingRule::ExplicitRange(_) => GridOrigin::ExplicitRange,
            GroupingRule::SharedPrefix(_) => GridOrigin::SharedPrefix,
            GroupingRule::BracketStem { .. } => GridOrigin::BracketStem,
        }
    }

    fn multi_value(&self) -> bool {
        matches!(self, GroupingRule::SharedPrefix(_))
    }

    fn claims(&self, cell: &HeaderCell) -> bool {
        match self {
            GroupingRule::ExplicitRange(cols) => cols.contains(&cell.column),
            GroupingRule::SharedPrefix(prefix) => starts_with_folded(&cell.text, prefix),
            GroupingRule::BracketStem { from_column } => {
                cell.column >= *from_column
                    && has_bracket_segment(&cell.text)
                    && question_stem(&cell.text).is_some()
            }
        }
    }

    /// The members of the group opened by `cell`, among the candidates.
    fn members(&self, cell: &HeaderCell, candidates: &[&HeaderCell]) -> Vec<HeaderCell> {
        let keep = |other: &HeaderCell| -> bool {
            match self {
                GroupingRule::ExplicitRange(_) | GroupingRule::SharedPrefix(_) => {
                    self.claims(other)
                }
                GroupingRule::BracketStem { from_column } => {
                    other.column >= *from_column
                        && match (question_stem(&cell.text), question_stem(&other.text)) {
                            (Some(s1), Some(s2)) => eq_folded(s1, s2),
                            _ => false,
                        }
                }
            }
        };
        candidates
            .iter()
            .filter(|c| keep(**c))
            .map(|c| (*c).clone())
            .collect()
    }
}

fn grouping_rules(rules: &SurveyRules) -> Vec<GroupingRule<'_>> {
    let mut res: Vec<GroupingRule> = Vec::new();
    for range in rules.grid_ranges.iter().filter(|r| !r.is_empty()) {
        res.push(GroupingRule::ExplicitRange(range.as_slice()));
    }
    for prefix in rules.grid_prefixes.iter().filter(|p| !p.trim().is_empty()) {
        res.push(GroupingRule::SharedPrefix(prefix.as_str()));
    }
    res.push(GroupingRule::BracketStem {
        from_column: rules.bracket_grid_column,
    });
    res
}

/// Partitions the question columns of a header row into question groups.
///
/// Groups are disjoint and appear at the position of their leftmost column.
/// Columns hidden by the view are left out, but a group opened by a visible
/// column takes all its members with it.
pub fn classify_columns(
    header: &[HeaderCell],
    side: ViewSide,
    rules: &SurveyRules,
    catalog: &OptionCatalog,
) -> Vec<QuestionGroup> {
    let questions: Vec<&HeaderCell> = header
        .iter()
        .filter(|c| c.column >= rules.first_question_column)
        .collect();
    let grouping = grouping_rules(rules);

    let mut consumed: HashSet<usize> = HashSet::new();
    let mut res: Vec<QuestionGroup> = Vec::new();
    for cell in questions.iter() {
        if consumed.contains(&cell.column) || !rules.shows_column(side, cell.column) {
            continue;
        }

        let grid = grouping.iter().find(|rule| rule.claims(cell)).map(|rule| {
            let free: Vec<&HeaderCell> = questions
                .iter()
                .filter(|c| !consumed.contains(&c.column))
                .cloned()
                .collect();
            (rule, rule.members(cell, &free))
        });

        let group = match grid {
            Some((rule, members)) if !members.is_empty() => {
                debug!(
                    "classify_columns: column {} opens a {:?} grid of {:?}",
                    cell.column,
                    rule.origin(),
                    members.iter().map(|m| m.column).collect::<Vec<_>>()
                );
                grid_group(&members, rule.origin(), rule.multi_value())
            }
            _ => standalone_group(cell, rules, catalog),
        };
        for m in group.members.iter() {
            consumed.insert(m.column);
        }
        res.push(group);
    }
    res
}

fn grid_group(members: &[HeaderCell], origin: GridOrigin, multi_value: bool) -> QuestionGroup {
    let title = members
        .first()
        .and_then(|c| question_stem(&c.text))
        .unwrap_or(GRID_TITLE_FALLBACK)
        .to_string();
    QuestionGroup {
        title,
        kind: QuestionKind::GridStacked(origin),
        members: members
            .iter()
            .map(|c| GroupMember {
                column: c.column,
                label: grid_row_label(c),
            })
            .collect(),
        multi_value,
    }
}

fn grid_row_label(cell: &HeaderCell) -> String {
    if let Some(label) = bracket_label(&cell.text) {
        label.to_string()
    } else if !cell.text.trim().is_empty() {
        cell.text.trim().to_string()
    } else {
        format!("Column {}", cell.column)
    }
}

fn standalone_group(
    cell: &HeaderCell,
    rules: &SurveyRules,
    catalog: &OptionCatalog,
) -> QuestionGroup {
    let title = if cell.text.trim().is_empty() {
        format!("Question {}", cell.column.saturating_sub(1))
    } else {
        cell.text.trim().to_string()
    };
    let multi_value = rules.multi_value_columns.contains(&cell.column)
        || rules
            .multi_value_headers
            .iter()
            .any(|h| eq_folded(h, &cell.text));
    let kind = if catalog.has_options(cell.column) {
        QuestionKind::SingleChoice
    } else {
        QuestionKind::OpenText
    };
    QuestionGroup {
        members: vec![GroupMember {
            column: cell.column,
            label: title.clone(),
        }],
        title,
        kind,
        multi_value,
    }
}
