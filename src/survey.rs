use log::{debug, info, warn};

use snafu::{prelude::*, Snafu};
use survey_charts::*;

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::json;
use serde_json::Map as JSMap;
use serde_json::Value as JSValue;
use text_diff::print_diff;

use crate::args::Args;
use crate::survey::config_reader::*;

pub mod config_reader;
mod io_common;
mod io_csv;
mod io_xlsx;

/// The responses read when neither a configuration nor an input is given.
pub const DEFAULT_DATA_FILE: &str = "Data/Enquête_Totaal_ChatGPT.xlsx";

#[derive(Debug, Snafu)]
pub enum SurveyError {
    #[snafu(display("Error opening file {path}"))]
    OpeningExcel {
        source: calamine::XlsxError,
        path: String,
    },
    #[snafu(display("Error reading worksheet {name} in {path}"))]
    ReadingWorksheet {
        source: calamine::XlsxError,
        path: String,
        name: String,
    },
    #[snafu(display("Error opening CSV file {path}"))]
    CsvOpen { source: csv::Error, path: String },
    #[snafu(display("Error parsing line {lineno} of CSV file {path}"))]
    CsvLineParse {
        source: csv::Error,
        path: String,
        lineno: usize,
    },
    #[snafu(display("Error opening JSON file {path}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing JSON file {path}"))]
    ParsingJson {
        source: serde_json::Error,
        path: String,
    },
    #[snafu(display("Error serializing the report"))]
    WritingJson { source: serde_json::Error },
    #[snafu(display("Error writing the report to {path}"))]
    WritingOutput {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Could not understand column {content} (expected a number starting at 1 or column letters)"))]
    InvalidColumn { content: String },
    #[snafu(display("The palette must contain at least one color"))]
    EmptyPalette {},
    #[snafu(display("Input provider not implemented: {provider}"))]
    UnknownProvider { provider: String },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type SurveyResult<T> = Result<T, SurveyError>;

/// Where the responses come from, after merging the configuration and the command line.
#[derive(Eq, PartialEq, Debug, Clone)]
struct ResolvedSource {
    provider: String,
    file_path: String,
    options_file_path: Option<String>,
    worksheet_name: Option<String>,
}

fn chart_to_json(chart: &ChartDatum) -> JSValue {
    let mut js: JSMap<String, JSValue> = JSMap::new();
    js.insert("title".to_string(), json!(chart.title));
    js.insert("kind".to_string(), json!(chart.kind().as_str()));
    let no_values: Vec<u64> = vec![];
    let no_strings: Vec<String> = vec![];
    let mut other_texts = chart.other_texts.clone();
    match &chart.payload {
        ChartPayload::SingleChoice {
            labels,
            values,
            colors,
        } => {
            js.insert("labels".to_string(), json!(labels));
            js.insert("values".to_string(), json!(values));
            js.insert("colors".to_string(), json!(colors));
        }
        ChartPayload::OpenText { responses } => {
            js.insert("labels".to_string(), json!(no_strings));
            js.insert("values".to_string(), json!(no_values));
            js.insert("colors".to_string(), json!(no_strings));
            other_texts = responses.clone();
        }
        ChartPayload::GridStacked { row_labels, series } => {
            js.insert("labels".to_string(), json!(row_labels));
            js.insert("values".to_string(), json!(no_values));
            js.insert("colors".to_string(), json!(no_strings));
            let series_js: Vec<JSValue> = series
                .iter()
                .map(|s| json!({"name": s.name, "values": s.values, "color": s.color}))
                .collect();
            js.insert("series".to_string(), JSValue::Array(series_js));
        }
    }
    if !other_texts.is_empty() {
        js.insert("otherTexts".to_string(), json!(other_texts));
    }
    JSValue::Object(js)
}

/// Assembles the report for one request.
/// A missing book gives an empty report.
fn build_report_js(
    book: Option<&SurveyBook>,
    segment: Option<&str>,
    view: Option<&str>,
    rules: &SurveyRules,
    segments_only: bool,
) -> JSValue {
    let segments: Vec<String> = book.map(|b| list_segments(b, rules)).unwrap_or_default();
    if segments_only {
        return json!({ "segments": segments });
    }

    let filter = SegmentFilter::new(segment);
    let view = view.map(str::trim).filter(|v| !v.is_empty());
    let side = rules.view_side(view.unwrap_or(&rules.views.before_split));
    let view_name = rules.view_name(side).to_string();

    let charts: Vec<JSValue> = match book {
        Some(b) => compute_chart_data(b, filter.selected(), &view_name, rules)
            .iter()
            .map(chart_to_json)
            .collect(),
        None => vec![],
    };
    json!({
        "segments": segments,
        "selectedSegment": filter.selected(),
        "view": view_name,
        "charts": charts,
    })
}

fn resolve_source(
    args: &Args,
    config: &SurveyConfig,
    root: Option<&Path>,
) -> SurveyResult<ResolvedSource> {
    let settings = config.source.clone().unwrap_or_default();
    let resolve = |p: &String| io_common::resolve_path(root, p);

    let file_path = match (&args.input, &settings.file_path) {
        (Some(p), _) => p.clone(),
        (None, Some(p)) => resolve(p),
        (None, None) => DEFAULT_DATA_FILE.to_string(),
    };
    let options_file_path = match (&args.options, &settings.options_file_path) {
        (Some(p), _) => Some(p.clone()),
        (None, Some(p)) => Some(resolve(p)),
        (None, None) => None,
    };
    let provider = args
        .input_type
        .clone()
        .or(settings.provider)
        .unwrap_or_else(|| io_common::infer_provider(&file_path).to_string());
    let worksheet_name = args
        .excel_worksheet_name
        .clone()
        .or(settings.worksheet_name);

    Ok(ResolvedSource {
        provider,
        file_path,
        options_file_path,
        worksheet_name,
    })
}

fn read_book(source: &ResolvedSource, rules: &SurveyRules) -> SurveyResult<Option<SurveyBook>> {
    info!("Attempting to read survey file {:?}", source.file_path);
    if !Path::new(&source.file_path).exists() {
        warn!(
            "read_book: {:?} does not exist, the report will be empty",
            source.file_path
        );
        return Ok(None);
    }
    match source.provider.as_str() {
        "xlsx" => io_xlsx::read_xlsx_book(&source.file_path, source.worksheet_name.as_deref()),
        "csv" => io_csv::read_csv_book(
            &source.file_path,
            source.options_file_path.as_deref(),
            rules,
        ),
        x => UnknownProviderSnafu { provider: x }.fail(),
    }
}

fn output_path(args: &Args, config: &SurveyConfig, root: Option<&Path>) -> Option<String> {
    if args.out.is_some() {
        return args.out.clone();
    }
    config
        .output
        .as_ref()
        .and_then(|o| o.output_path.as_ref())
        .map(|p| io_common::resolve_path(root, p))
}

fn check_reference(reference_path: &str, report: &JSValue) -> SurveyResult<()> {
    let reference = read_summary(reference_path)?;
    info!("reference: {:?}", reference);
    if reference != *report {
        let pretty_ref = serde_json::to_string_pretty(&reference).context(WritingJsonSnafu {})?;
        let pretty_report = serde_json::to_string_pretty(report).context(WritingJsonSnafu {})?;
        warn!("Found differences with the reference report");
        print_diff(pretty_ref.as_str(), pretty_report.as_str(), "\n");
        whatever!("Difference detected between the computed report and the reference report")
    }
    Ok(())
}

pub fn run_report(args: &Args) -> SurveyResult<()> {
    let (config, root): (SurveyConfig, Option<PathBuf>) = match &args.config {
        Some(p) => {
            let config = read_config(p)?;
            let root = Path::new(p).parent().map(|r| r.to_path_buf());
            (config, root)
        }
        None => (SurveyConfig::default(), None),
    };
    info!("config: {:?}", config);

    let rules = config.rules()?;
    debug!("rules: {:?}", rules);

    let source = resolve_source(args, &config, root.as_deref())?;
    debug!("source: {:?}", source);
    let book = read_book(&source, &rules)?;

    let report = build_report_js(
        book.as_ref(),
        args.segment.as_deref(),
        args.view.as_deref(),
        &rules,
        args.list_segments,
    );
    let pretty = serde_json::to_string_pretty(&report).context(WritingJsonSnafu {})?;

    match output_path(args, &config, root.as_deref()) {
        Some(p) if !p.is_empty() && p != "stdout" => {
            info!("Writing report to {:?}", p);
            fs::write(&p, &pretty).context(WritingOutputSnafu { path: p.clone() })?;
        }
        _ => {
            println!("{}", pretty);
        }
    }

    // The reference report, if provided for comparison
    if let Some(reference_path) = &args.reference {
        check_reference(reference_path, &report)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use snafu::ErrorCompat;

    fn test_dir(test_name: &str) -> String {
        format!("{}/tests/data/{}", env!("CARGO_MANIFEST_DIR"), test_name)
    }

    fn run_report_test(test_name: &str, args: Args, expected: &str) {
        let _ = env_logger::builder().is_test(true).try_init();
        let dir = test_dir(test_name);
        let args = Args {
            config: Some(format!("{}/{}_config.json", dir, test_name)),
            reference: Some(format!("{}/{}", dir, expected)),
            ..args
        };
        info!("Running test {}", test_name);
        let res = run_report(&args);
        if let Err(e) = &res {
            eprintln!("An error occured {}", e);
            if let Some(bt) = ErrorCompat::backtrace(e) {
                eprintln!("trace: {}", bt);
            }
        }
        assert!(res.is_ok());
    }

    fn test_wrapper(test_name: &str) {
        run_report_test(
            test_name,
            Args::default(),
            format!("{}_expected.json", test_name).as_str(),
        )
    }

    #[test]
    fn basic_survey() {
        test_wrapper("basic_survey");
    }

    #[test]
    fn basic_survey_segment() {
        run_report_test(
            "basic_survey",
            Args {
                segment: Some("5a".to_string()),
                ..Args::default()
            },
            "basic_survey_5a_expected.json",
        );
    }

    #[test]
    fn basic_survey_segments_only() {
        run_report_test(
            "basic_survey",
            Args {
                list_segments: true,
                ..Args::default()
            },
            "basic_survey_segments_expected.json",
        );
    }

    #[test]
    fn xlsx_survey() {
        test_wrapper("xlsx_survey");
    }

    #[test]
    fn missing_source() {
        test_wrapper("missing_source");
    }

    #[test]
    fn reference_mismatch_is_an_error() {
        let dir = test_dir("basic_survey");
        let args = Args {
            config: Some(format!("{}/basic_survey_config.json", dir)),
            reference: Some(format!("{}/basic_survey_5a_expected.json", dir)),
            ..Args::default()
        };
        assert!(run_report(&args).is_err());
    }

    #[test]
    fn unknown_provider() {
        let dir = test_dir("basic_survey");
        let args = Args {
            config: Some(format!("{}/basic_survey_config.json", dir)),
            input_type: Some("ods".to_string()),
            ..Args::default()
        };
        let res = run_report(&args);
        assert!(matches!(res, Err(SurveyError::UnknownProvider { .. })));
    }

    #[test]
    fn open_text_json_carries_responses() {
        let chart = ChartDatum {
            title: "Remarks".to_string(),
            payload: ChartPayload::OpenText {
                responses: vec!["Nice".to_string()],
            },
            other_texts: vec![],
        };
        assert_eq!(
            chart_to_json(&chart),
            json!({
                "title": "Remarks",
                "kind": "open-text",
                "labels": [],
                "values": [],
                "colors": [],
                "otherTexts": ["Nice"],
            })
        );
    }

    #[test]
    fn missing_book_gives_empty_report() {
        let report = build_report_js(None, Some(" "), Some("copilot"), &SurveyRules::default(), false);
        assert_eq!(
            report,
            json!({
                "segments": [],
                "selectedSegment": null,
                "view": "Copilot",
                "charts": [],
            })
        );
    }
}
