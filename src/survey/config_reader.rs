use crate::survey::*;

use serde::{Deserialize, Serialize};
use serde_json::Value as JSValue;

#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceSettings {
    pub provider: Option<String>,
    #[serde(rename = "filePath")]
    pub file_path: Option<String>,
    #[serde(rename = "optionsFilePath")]
    pub options_file_path: Option<String>,
    #[serde(rename = "worksheetName")]
    pub worksheet_name: Option<String>,
}

#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct LayoutSettings {
    #[serde(rename = "firstQuestionColumn")]
    pub first_question_column: Option<JSValue>,
    #[serde(rename = "segmentColumn")]
    pub segment_column: Option<JSValue>,
    #[serde(rename = "splitColumn")]
    pub split_column: Option<JSValue>,
    #[serde(rename = "bracketGridColumn")]
    pub bracket_grid_column: Option<JSValue>,
    #[serde(rename = "gridRanges")]
    pub grid_ranges: Option<Vec<Vec<JSValue>>>,
    #[serde(rename = "gridPrefixes")]
    pub grid_prefixes: Option<Vec<String>>,
    #[serde(rename = "multiValueColumns")]
    pub multi_value_columns: Option<Vec<JSValue>>,
    #[serde(rename = "multiValueHeaders")]
    pub multi_value_headers: Option<Vec<String>>,
    #[serde(rename = "optionsSheetNames")]
    pub options_sheet_names: Option<Vec<String>>,
}

#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct ViewSettings {
    #[serde(rename = "beforeSplit")]
    pub before_split: Option<String>,
    #[serde(rename = "fromSplit")]
    pub from_split: Option<String>,
}

#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputSettings {
    #[serde(rename = "outputPath")]
    pub output_path: Option<String>,
}

#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct SurveyConfig {
    pub source: Option<SourceSettings>,
    pub layout: Option<LayoutSettings>,
    pub views: Option<ViewSettings>,
    #[serde(rename = "segmentPriority")]
    pub segment_priority: Option<Vec<String>>,
    pub palette: Option<Vec<String>>,
    #[serde(rename = "othersLabel")]
    pub others_label: Option<String>,
    pub output: Option<OutputSettings>,
}

impl SurveyConfig {
    /// The layout rules: the defaults, overridden by every key present in the file.
    pub fn rules(&self) -> SurveyResult<SurveyRules> {
        let mut rules = SurveyRules::default();

        if let Some(layout) = &self.layout {
            if let Some(x) = &layout.first_question_column {
                rules.first_question_column = read_js_column(x)?;
            }
            if let Some(x) = &layout.segment_column {
                rules.segment_column = read_js_column(x)?;
            }
            if let Some(x) = &layout.split_column {
                rules.split_column = read_js_column(x)?;
            }
            if let Some(x) = &layout.bracket_grid_column {
                rules.bracket_grid_column = read_js_column(x)?;
            }
            if let Some(ranges) = &layout.grid_ranges {
                rules.grid_ranges = ranges
                    .iter()
                    .map(|range| read_js_columns(range))
                    .collect::<SurveyResult<Vec<Vec<usize>>>>()?;
            }
            if let Some(x) = &layout.grid_prefixes {
                rules.grid_prefixes = x.clone();
            }
            if let Some(x) = &layout.multi_value_columns {
                rules.multi_value_columns = read_js_columns(x)?;
            }
            if let Some(x) = &layout.multi_value_headers {
                rules.multi_value_headers = x.clone();
            }
            if let Some(x) = &layout.options_sheet_names {
                rules.options_sheet_names = x.clone();
            }
        }

        if let Some(views) = &self.views {
            if let Some(x) = &views.before_split {
                rules.views.before_split = x.clone();
            }
            if let Some(x) = &views.from_split {
                rules.views.from_split = x.clone();
            }
        }
        if let Some(x) = &self.segment_priority {
            rules.segment_priority = x.clone();
        }
        if let Some(x) = &self.palette {
            ensure!(!x.is_empty(), EmptyPaletteSnafu {});
            rules.palette = x.clone();
        }
        if let Some(x) = &self.others_label {
            rules.others_label = x.clone();
        }
        Ok(rules)
    }
}

pub fn read_config(path: &str) -> SurveyResult<SurveyConfig> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let config: SurveyConfig =
        serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu { path })?;
    Ok(config)
}

pub fn read_summary(path: &str) -> SurveyResult<JSValue> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let js: JSValue = serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu { path })?;
    Ok(js)
}

fn read_js_columns(xs: &[JSValue]) -> SurveyResult<Vec<usize>> {
    xs.iter().map(read_js_column).collect()
}

/// A column position, counted from 1. Accepts a number, a string of digits,
/// or Excel-style letters (`A`, `AB`, ...).
pub fn read_js_column(x: &JSValue) -> SurveyResult<usize> {
    let res = match x {
        JSValue::Number(n) => n.as_u64().map(|x| x as usize),
        JSValue::String(s) if s.trim().chars().all(|c| c.is_ascii_digit()) => {
            s.trim().parse::<usize>().ok()
        }
        // Parsing the Excel-style columns
        JSValue::String(s) => column_letters_to_number(s),
        _ => None,
    };
    res.filter(|c| *c >= 1).context(InvalidColumnSnafu {
        content: x.to_string(),
    })
}
