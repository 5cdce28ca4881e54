//! Canonical report tables - per-paradigm header and row construction

use std::fmt;

use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::error::{Error, Result};
use crate::experiment::{ScoredSample, Selection, Test, TestParadigm, TestResult};
use crate::report::columns::ColumnSet;

/// Sentinel cell marking an absent answer for a discovered column.
pub const NULL_SENTINEL: &str = "Null";

/// A single report cell value.
///
/// Renders via `Display` in natural text form: no locale formatting,
/// integral floats without a trailing `.0`, booleans as `true`/`false`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    /// Free text (identifiers, paths, feedback, sentinels).
    Text(String),
    /// Unsigned integer (question ids).
    Integer(u32),
    /// Floating-point number (scores and ratings).
    Float(f64),
    /// Boolean flag (ABX `xSelected`).
    Bool(bool),
}

impl Cell {
    /// The empty text cell.
    #[must_use]
    pub const fn empty() -> Self {
        Self::Text(String::new())
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Integer(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value}"),
            Self::Bool(value) => write!(f, "{value}"),
        }
    }
}

impl From<&str> for Cell {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

impl From<String> for Cell {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<u32> for Cell {
    fn from(value: u32) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for Cell {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// Canonical header+rows table of one test's report.
///
/// Both serializers consume this shape; they never interact with each
/// other. MUSHRA rows may be shorter than the header (see
/// [`build_table`]); no row is ever longer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl Table {
    /// Create a table with the given header row and no data rows.
    #[must_use]
    pub const fn new(headers: Vec<String>) -> Self {
        Self {
            headers,
            rows: Vec::new(),
        }
    }

    /// Append a data row.
    pub fn push_row(&mut self, row: Vec<Cell>) {
        self.rows.push(row);
    }

    /// Get the header labels.
    #[must_use]
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Get the data rows.
    #[must_use]
    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    /// Number of columns, as defined by the header row.
    #[must_use]
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Whether the table has no data rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Build the canonical table for one test from its results and discovered
/// columns.
///
/// Only results whose `test_number` matches the test contribute rows; the
/// report for test N includes exactly the results of test N. Every row ends
/// with a feedback cell (empty string when absent).
///
/// Row shapes per paradigm:
///
/// - **AB**: paradigm label, then `(question_id, sample_or_"Null")` pairs
///   for every discovered question column in order.
/// - **ABX**: as AB with `x_sample_id, x_selected` after the label.
/// - **MUSHRA**: label, reference asset path (empty if the test has none),
///   reference score, then `(sample_id, score)` pairs for the discovered
///   anchor columns and then the sample columns - pairs a result did not
///   supply are omitted outright, so rows come out ragged but
///   column-labeled.
/// - **APE**: one row per axis per result: label, axis id, then
///   `(sample_id, rating_or_"Null")` pairs for every discovered sample
///   column.
///
/// # Errors
///
/// Returns [`Error::ParadigmMismatch`] when a contributing result's variant
/// differs from the test's paradigm, and [`Error::ColumnSetMismatch`] when
/// `columns` has the wrong shape for it. Neither condition degrades to an
/// empty table; callers choose whether to surface or suppress.
pub fn build_table(results: &[TestResult], columns: &ColumnSet, test: &Test) -> Result<Table> {
    let matching: Vec<&TestResult> = results
        .iter()
        .filter(|result| result.test_number() == test.number())
        .collect();
    for result in &matching {
        if result.paradigm() != test.paradigm() {
            return Err(Error::ParadigmMismatch {
                test_number: test.number(),
                expected: test.paradigm(),
                found: result.paradigm(),
            });
        }
    }

    match (test.paradigm(), columns) {
        (TestParadigm::Ab, ColumnSet::Questions(questions)) => Ok(build_ab(&matching, questions)),
        (TestParadigm::Abx, ColumnSet::Questions(questions)) => Ok(build_abx(&matching, questions)),
        (TestParadigm::Mushra, ColumnSet::ScoredSamples { anchors, samples }) => {
            Ok(build_mushra(&matching, anchors, samples, test))
        }
        (TestParadigm::Ape, ColumnSet::RatedSamples(samples)) => Ok(build_ape(&matching, samples)),
        (paradigm, columns) => Err(Error::ColumnSetMismatch {
            paradigm,
            columns: columns.describe(),
        }),
    }
}

fn build_ab(results: &[&TestResult], questions: &[u32]) -> Table {
    let mut headers = vec!["Test type".to_owned()];
    for i in 0..questions.len() {
        headers.push(format!("question {}", i + 1));
        headers.push(format!("sample {}", i + 1));
    }
    headers.push("Feedback".to_owned());

    let mut table = Table::new(headers);
    for result in results {
        if let TestResult::Ab(r) = result {
            let mut row = vec![Cell::from(TestParadigm::Ab.label())];
            push_selection_pairs(&mut row, r.selections(), questions);
            row.push(feedback_cell(r.feedback()));
            table.push_row(row);
        }
    }
    table
}

fn build_abx(results: &[&TestResult], questions: &[u32]) -> Table {
    let mut headers = vec![
        "Test type".to_owned(),
        "xSample".to_owned(),
        "xSelected".to_owned(),
    ];
    for i in 0..questions.len() {
        headers.push(format!("question {}", i + 1));
        headers.push(format!("sample {}", i + 1));
    }
    headers.push("Feedback".to_owned());

    let mut table = Table::new(headers);
    for result in results {
        if let TestResult::Abx(r) = result {
            let mut row = vec![
                Cell::from(TestParadigm::Abx.label()),
                Cell::from(r.x_sample_id()),
                Cell::from(r.x_selected()),
            ];
            push_selection_pairs(&mut row, r.selections(), questions);
            row.push(feedback_cell(r.feedback()));
            table.push_row(row);
        }
    }
    table
}

fn build_mushra(
    results: &[&TestResult],
    anchors: &[String],
    samples: &[String],
    test: &Test,
) -> Table {
    let mut headers = vec![
        "Test type".to_owned(),
        "ReferenceFile".to_owned(),
        "ReferenceScore".to_owned(),
    ];
    for i in 0..anchors.len() {
        headers.push(format!("Anchor Sample {}", i + 1));
        headers.push(format!("Anchor Score {}", i + 1));
    }
    for i in 0..samples.len() {
        headers.push(format!("Sample {}", i + 1));
        headers.push(format!("Sample Score {}", i + 1));
    }
    headers.push("Feedback".to_owned());

    let reference_path = test
        .reference()
        .map_or_else(String::new, |sample| sample.asset_path().to_owned());

    let mut table = Table::new(headers);
    for result in results {
        if let TestResult::Mushra(r) = result {
            let mut row = vec![
                Cell::from(TestParadigm::Mushra.label()),
                Cell::from(reference_path.clone()),
                Cell::from(r.reference_score()),
            ];
            push_scored_pairs(&mut row, r.anchors_scores(), anchors);
            push_scored_pairs(&mut row, r.samples_scores(), samples);
            row.push(feedback_cell(r.feedback()));
            table.push_row(row);
        }
    }
    table
}

fn build_ape(results: &[&TestResult], samples: &[String]) -> Table {
    let mut headers = vec!["Test type".to_owned(), "Axis".to_owned()];
    for i in 0..samples.len() {
        headers.push(format!("Sample {}", i + 1));
        headers.push(format!("Sample Score {}", i + 1));
    }
    headers.push("Feedback".to_owned());

    let mut table = Table::new(headers);
    for result in results {
        if let TestResult::Ape(r) = result {
            for axis in r.axis_results() {
                let mut row = vec![
                    Cell::from(TestParadigm::Ape.label()),
                    Cell::from(axis.axis_id()),
                ];
                let by_sample: FxHashMap<&str, f64> = axis
                    .sample_ratings()
                    .iter()
                    .map(|rating| (rating.sample_id(), rating.rating()))
                    .collect();
                for sample_id in samples {
                    row.push(Cell::from(sample_id.clone()));
                    row.push(match by_sample.get(sample_id.as_str()) {
                        Some(&rating) => Cell::from(rating),
                        None => Cell::from(NULL_SENTINEL),
                    });
                }
                row.push(feedback_cell(r.feedback()));
                table.push_row(row);
            }
        }
    }
    table
}

/// `(question_id, sample_or_"Null")` pairs for every discovered question.
fn push_selection_pairs(row: &mut Vec<Cell>, selections: &[Selection], questions: &[u32]) {
    let by_question: FxHashMap<u32, &str> = selections
        .iter()
        .map(|selection| (selection.question_id(), selection.sample_id()))
        .collect();
    for &question in questions {
        row.push(Cell::from(question));
        row.push(match by_question.get(&question) {
            Some(&sample) => Cell::from(sample),
            None => Cell::from(NULL_SENTINEL),
        });
    }
}

/// `(sample_id, score)` pairs for the discovered columns a result supplied;
/// absent pairs are omitted, not filled with a sentinel.
fn push_scored_pairs(row: &mut Vec<Cell>, scored: &[ScoredSample], columns: &[String]) {
    let by_sample: FxHashMap<&str, f64> = scored
        .iter()
        .map(|entry| (entry.sample_id(), entry.score()))
        .collect();
    for sample_id in columns {
        if let Some(&score) = by_sample.get(sample_id.as_str()) {
            row.push(Cell::from(sample_id.clone()));
            row.push(Cell::from(score));
        }
    }
}

fn feedback_cell(feedback: Option<&str>) -> Cell {
    feedback.map_or_else(Cell::empty, Cell::from)
}
