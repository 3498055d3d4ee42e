use std::collections::HashMap;

use crate::config::{ChartDatum, ChartPayload, Series};
use crate::text::{fold, sort_folded, FoldedSet};

/// Puts labels in display order.
///
/// With a catalog, its options come first in catalog order, then the other
/// labels alphabetically. Without one, all the labels are alphabetical.
/// Labels are distinct case-insensitively in the result.
pub fn order_labels<'a, I>(labels: I, catalog: Option<&[String]>) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut remaining = FoldedSet::new();
    for l in labels {
        remaining.insert(l);
    }

    let mut ordered: Vec<String> = Vec::new();
    let mut emitted = FoldedSet::new();
    for opt in catalog.unwrap_or(&[]) {
        if remaining.contains(opt) && emitted.insert(opt) {
            ordered.push(opt.clone());
        }
    }

    let mut rest: Vec<String> = remaining
        .iter()
        .filter(|l| !emitted.contains(l))
        .map(|l| l.to_string())
        .collect();
    sort_folded(&mut rest);
    ordered.extend(rest);
    ordered
}

/// The color of the label at `position`, cycling through the palette.
pub fn palette_color(palette: &[String], position: usize) -> String {
    if palette.is_empty() {
        return String::new();
    }
    palette[position % palette.len()].clone()
}

/// A single-choice chart. Returns `None` when nothing was tallied.
pub fn single_choice_chart(
    title: &str,
    tally: &HashMap<String, (String, u64)>,
    catalog: Option<&[String]>,
    other_texts: FoldedSet,
    palette: &[String],
) -> Option<ChartDatum> {
    if tally.is_empty() {
        return None;
    }
    let labels = order_labels(tally.values().map(|(label, _)| label.as_str()), catalog);
    let values: Vec<u64> = labels
        .iter()
        .map(|l| tally.get(&fold(l)).map(|(_, n)| *n).unwrap_or(0))
        .collect();
    let colors: Vec<String> = (0..labels.len())
        .map(|idx| palette_color(palette, idx))
        .collect();
    Some(ChartDatum {
        title: title.to_string(),
        payload: ChartPayload::SingleChoice {
            labels,
            values,
            colors,
        },
        other_texts: other_texts.into_vec(),
    })
}

pub fn open_text_chart(title: &str, responses: FoldedSet) -> ChartDatum {
    ChartDatum {
        title: title.to_string(),
        payload: ChartPayload::OpenText {
            responses: responses.into_vec(),
        },
        other_texts: Vec::new(),
    }
}

/// A stacked chart with one series per choice.
///
/// `counts` maps each folded choice to its per-member counts.
pub fn grid_chart(
    title: &str,
    row_labels: Vec<String>,
    choices: &[String],
    counts: &HashMap<String, Vec<u64>>,
    other_texts: FoldedSet,
    palette: &[String],
) -> ChartDatum {
    let series: Vec<Series> = choices
        .iter()
        .enumerate()
        .map(|(idx, choice)| Series {
            name: choice.clone(),
            values: counts
                .get(&fold(choice))
                .cloned()
                .unwrap_or_else(|| vec![0; row_labels.len()]),
            color: palette_color(palette, idx),
        })
        .collect();
    ChartDatum {
        title: title.to_string(),
        payload: ChartPayload::GridStacked { row_labels, series },
        other_texts: other_texts.into_vec(),
    }
}
