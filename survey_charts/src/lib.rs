mod aggregate;
mod assemble;
pub mod builder;
mod catalog;
mod classify;
mod config;
pub mod manual;
mod segments;
mod table;
mod text;

use log::{debug, info};

pub use crate::aggregate::{Aggregator, LEGACY_OTHER_PREFIX};
pub use crate::assemble::{order_labels, palette_color};
pub use crate::catalog::{column_letters_to_number, OptionCatalog};
pub use crate::classify::{
    classify_columns, GridOrigin, GroupMember, QuestionGroup, QuestionKind, GRID_TITLE_FALLBACK,
};
pub use crate::config::*;
pub use crate::segments::SegmentFilter;
pub use crate::table::{HeaderCell, Row, Sheet, SurveyBook};
pub use crate::text::fold;

/// Computes the charts of all the questions shown by a view.
///
/// Arguments:
/// * `book` the responses, with the options sheet if there is one
/// * `segment` only count the respondents of this segment. Blank or `None` counts everyone.
/// * `view` the name of the view, see [`SurveyRules::view_side`]
/// * `rules` the layout of the survey
///
/// The result only depends on the arguments: calling it twice gives the same
/// charts in the same order.
pub fn compute_chart_data(
    book: &SurveyBook,
    segment: Option<&str>,
    view: &str,
    rules: &SurveyRules,
) -> Vec<ChartDatum> {
    let sheet = book.main();
    let side = rules.view_side(view);
    let filter = SegmentFilter::new(segment);
    info!(
        "compute_chart_data: {} responses, segment: {:?}, view: {:?} ({:?})",
        sheet.num_data_rows(),
        filter.selected(),
        view,
        side
    );

    let catalog = OptionCatalog::load(book, rules);
    info!(
        "compute_chart_data: option catalog covers {} columns",
        catalog.len()
    );

    let groups = classify_columns(&sheet.header(), side, rules, &catalog);
    debug!("compute_chart_data: {} question groups", groups.len());

    let aggregator = Aggregator::new(sheet, &filter, &catalog, rules);
    groups
        .iter()
        .filter_map(|group| {
            let chart = aggregator.aggregate(group);
            if chart.is_none() {
                debug!("compute_chart_data: nothing to show for {:?}", group.title);
            }
            chart
        })
        .collect()
}

/// The segments found in the responses, in display order.
pub fn list_segments(book: &SurveyBook, rules: &SurveyRules) -> Vec<String> {
    segments::list_segments(book.main(), rules)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::SheetBuilder;

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn rules() -> SurveyRules {
        SurveyRules {
            palette: vec!["#1".to_string(), "#2".to_string()],
            grid_ranges: vec![],
            grid_prefixes: vec!["Tools".to_string()],
            bracket_grid_column: 5,
            split_column: 7,
            multi_value_columns: vec![],
            multi_value_headers: vec![],
            ..SurveyRules::default()
        }
    }

    fn book() -> SurveyBook {
        SurveyBook::new(
            SheetBuilder::new("responses")
                .row(&[
                    "Id",
                    "Class",
                    "Ok?",
                    "Tools home",
                    "Rate [Speed]",
                    "Rate [Price]",
                    "Copilot [Fun]",
                    "Later",
                ])
                .row(&["1", "5a", "Yes", "vim, emacs", "Good", "Bad", "Yes", "x"])
                .row(&["2", "5b", "Maybe", "vim", "Good", "", "No", ""])
                .row(&["3", "5A", "no", "", "", "Other: cheap", "", "y"])
                .build(),
            vec![SheetBuilder::new("Opties")
                .row(&["Ok?"])
                .row(&["Yes"])
                .row(&["No"])
                .build()],
        )
    }

    fn titles(charts: &[ChartDatum]) -> Vec<(String, ChartKind)> {
        charts.iter().map(|c| (c.title.clone(), c.kind())).collect()
    }

    #[test]
    fn general_view() {
        init();
        let charts = compute_chart_data(&book(), None, "anything", &rules());
        assert_eq!(
            titles(&charts),
            vec![
                ("Ok?".to_string(), ChartKind::SingleChoice),
                ("Tools home".to_string(), ChartKind::GridStacked),
                ("Rate".to_string(), ChartKind::GridStacked),
            ]
        );
        assert_eq!(
            charts[0].payload,
            ChartPayload::SingleChoice {
                labels: vec!["Yes".to_string(), "No".to_string(), "Others".to_string()],
                values: vec![1, 1, 1],
                colors: vec!["#1".to_string(), "#2".to_string(), "#1".to_string()],
            }
        );
        assert_eq!(charts[0].other_texts, vec!["Maybe"]);
        assert_eq!(charts[2].other_texts, vec!["cheap"]);
    }

    #[test]
    fn second_view() {
        init();
        let charts = compute_chart_data(&book(), Some("5A"), "copilot", &rules());
        assert_eq!(
            titles(&charts),
            vec![
                ("Copilot".to_string(), ChartKind::GridStacked),
                ("Later".to_string(), ChartKind::OpenText),
            ]
        );
        assert_eq!(
            charts[1].payload,
            ChartPayload::OpenText {
                responses: vec!["x".to_string(), "y".to_string()]
            }
        );
    }

    #[test]
    fn idempotent() {
        let b = book();
        let r = rules();
        assert_eq!(
            compute_chart_data(&b, Some("5a"), "Chatbots", &r),
            compute_chart_data(&b, Some("5a"), "Chatbots", &r)
        );
    }

    #[test]
    fn every_catalog_option_is_listed() {
        let charts = compute_chart_data(&book(), Some("5B"), "", &rules());
        assert_eq!(
            charts[0].payload,
            ChartPayload::SingleChoice {
                labels: vec!["Yes".to_string(), "No".to_string(), "Others".to_string()],
                values: vec![0, 0, 1],
                colors: vec!["#1".to_string(), "#2".to_string(), "#1".to_string()],
            }
        );
    }

    #[test]
    fn segments_in_display_order() {
        let r = SurveyRules {
            segment_priority: vec!["5B".to_string()],
            ..rules()
        };
        assert_eq!(list_segments(&book(), &r), vec!["5B", "5A"]);
    }
}
