// ********* Output data structures ***********

/// The kind of chart a question is rendered as.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum ChartKind {
    /// One column with a catalog of valid options: a frequency tally.
    SingleChoice,
    /// One column without a catalog: the collected free-text answers.
    OpenText,
    /// Several columns sharing one question: one series per answer.
    GridStacked,
}

impl ChartKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChartKind::SingleChoice => "single-choice",
            ChartKind::OpenText => "open-text",
            ChartKind::GridStacked => "grid-stacked",
        }
    }
}

/// One named answer series of a grid question.
///
/// `values` holds one count per member column, in member order.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Series {
    pub name: String,
    pub values: Vec<u64>,
    pub color: String,
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub enum ChartPayload {
    SingleChoice {
        labels: Vec<String>,
        values: Vec<u64>,
        colors: Vec<String>,
    },
    OpenText {
        responses: Vec<String>,
    },
    GridStacked {
        row_labels: Vec<String>,
        series: Vec<Series>,
    },
}

/// The output unit: everything needed to draw the chart of one question.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ChartDatum {
    pub title: String,
    pub payload: ChartPayload,
    /// The literal text of the answers that landed in the "Others" bucket.
    pub other_texts: Vec<String>,
}

impl ChartDatum {
    pub fn kind(&self) -> ChartKind {
        match self.payload {
            ChartPayload::SingleChoice { .. } => ChartKind::SingleChoice,
            ChartPayload::OpenText { .. } => ChartKind::OpenText,
            ChartPayload::GridStacked { .. } => ChartKind::GridStacked,
        }
    }
}

// ********* Configuration **********

/// The side of the split column a view shows.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum ViewSide {
    /// Columns strictly before the split column.
    BeforeSplit,
    /// The split column and all the columns after it.
    FromSplit,
}

/// Names under which the two views are selected.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ViewNames {
    pub before_split: String,
    pub from_split: String,
}

/// All the layout knobs of a survey.
///
/// Column positions are 1-based (A=1). The default value describes the
/// reference ChatGPT/Copilot questionnaire.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct SurveyRules {
    /// The first column holding a question. Columns before it are bookkeeping (id, segment).
    pub first_question_column: usize,
    /// The column holding the respondent segment (class, cohort, ...).
    pub segment_column: usize,
    /// Segments listed first, in this order, when present.
    pub segment_priority: Vec<String>,
    /// Colors handed out by position, wrapping around.
    pub palette: Vec<String>,
    /// Sets of columns that always form one grid question.
    pub grid_ranges: Vec<Vec<usize>>,
    /// Header prefixes grouping all matching columns into one multi-value grid.
    pub grid_prefixes: Vec<String>,
    /// Bracketed headers (`Stem [Item]`) are only grouped at or after this column.
    pub bracket_grid_column: usize,
    /// Column at which the second view starts.
    pub split_column: usize,
    pub views: ViewNames,
    /// Standalone columns whose cells hold comma-separated answers.
    pub multi_value_columns: Vec<usize>,
    /// Same as `multi_value_columns`, matched on the header text.
    pub multi_value_headers: Vec<String>,
    /// Candidate names of the auxiliary sheet holding the option catalog.
    pub options_sheet_names: Vec<String>,
    /// The aggregation key of the answers outside the catalog.
    pub others_label: String,
}

/// The palette of the reference dashboard.
pub const DEFAULT_PALETTE: [&str; 15] = [
    "#4e79a7", "#f28e2b", "#e15759", "#76b7b2", "#59a14f", "#edc949", "#af7aa1", "#ff9da7",
    "#9c755f", "#bab0ab", "#3b4b8c", "#c66a32", "#b03a48", "#4a9c9b", "#3f7f44",
];

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Default for SurveyRules {
    fn default() -> Self {
        SurveyRules {
            first_question_column: 3,
            segment_column: 2,
            segment_priority: strings(&["5HSD1", "5HSD2", "5HSD3", "5HSD4"]),
            palette: strings(&DEFAULT_PALETTE),
            grid_ranges: vec![vec![7, 8, 9], vec![10, 11, 12, 13]],
            grid_prefixes: strings(&["Gebruik je wel eens verschillende chatbots?"]),
            bracket_grid_column: 28,
            split_column: 28,
            views: ViewNames {
                before_split: "Chatbots".to_string(),
                from_split: "Copilot".to_string(),
            },
            multi_value_columns: vec![14],
            multi_value_headers: strings(&["Wanneer kies je voor gebruik van Github Copilot?"]),
            options_sheet_names: strings(&["opties", "options"]),
            others_label: "Others".to_string(),
        }
    }
}

impl SurveyRules {
    /// Resolves a view name. Only the exact (case-insensitive) name of the
    /// second view selects it, everything else falls back to the first one.
    pub fn view_side(&self, view: &str) -> ViewSide {
        if crate::text::eq_folded(view, &self.views.from_split) {
            ViewSide::FromSplit
        } else {
            ViewSide::BeforeSplit
        }
    }

    pub fn shows_column(&self, side: ViewSide, column: usize) -> bool {
        match side {
            ViewSide::BeforeSplit => column < self.split_column,
            ViewSide::FromSplit => column >= self.split_column,
        }
    }

    pub fn view_name(&self, side: ViewSide) -> &str {
        match side {
            ViewSide::BeforeSplit => &self.views.before_split,
            ViewSide::FromSplit => &self.views.from_split,
        }
    }
}
