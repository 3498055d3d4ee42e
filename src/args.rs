use clap::Parser;

/// This program turns survey responses into chart data.
#[derive(Parser, Debug, Clone, Default)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path, optional) The JSON file describing the survey layout and where to find the responses.
    /// All the settings are optional. For more information about the file format, read the manual
    /// of the survey_charts crate.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,

    /// (file path) A reference file containing the expected report in JSON format. If provided, surveycharts will
    /// check that the computed report matches the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    /// (file path, 'stdout' or empty) If specified, the report will be written in JSON format to the given
    /// location. Setting this option overrides the path that may be specified with the --config option.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path or empty) The file containing the responses (.xlsx or .csv). Setting this option
    /// overrides the path that may be specified with the --config option.
    #[clap(short, long, value_parser)]
    pub input: Option<String>,

    /// (xlsx or csv) The type of the input. By default, it is guessed from the extension of the file.
    #[clap(long, value_parser)]
    pub input_type: Option<String>,

    /// (file path) With CSV input, the CSV file listing the valid options of each question.
    #[clap(long, value_parser)]
    pub options: Option<String>,

    /// (default: first worksheet) When using an Excel file, indicates the name of the worksheet holding the responses.
    #[clap(long, value_parser)]
    pub excel_worksheet_name: Option<String>,

    /// (optional) Only count the respondents of this segment (case-insensitive).
    #[clap(short, long, value_parser)]
    pub segment: Option<String>,

    /// (optional) The view to compute. See the manual for the view names.
    #[clap(long, value_parser)]
    pub view: Option<String>,

    /// If passed as an argument, only the list of segments is written.
    #[clap(long, takes_value = false)]
    pub list_segments: bool,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
