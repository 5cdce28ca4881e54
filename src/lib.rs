//! # Perqual: Result Export Engine for Listening Experiments
//!
//! **Version**: 0.2.1
//!
//! Perqual turns stored results of perceptual listening tests (AB, ABX,
//! MUSHRA, APE) into downloadable reports: flat delimited text per test,
//! a paginated plain-text document per experiment, and a zip archive
//! bundling every test's report.
//!
//! ## Design Principles
//!
//! - **Discovery over configuration**: report columns come from the union
//!   of identifiers in the stored results, never from test setup
//! - **One table, many formats**: flat text and document pages are fed by
//!   the same canonical table, so labels and values cannot drift
//! - **Atomic sessions**: a submission is stored whole or rejected whole
//! - **Deterministic artifacts**: identical inputs produce identical
//!   bytes, archives included
//!
//! ## Example Usage
//!
//! ```rust
//! use perqual::experiment::{AbResult, Experiment, Selection, Test, TestParadigm, TestResult};
//! use perqual::ExportEngine;
//!
//! let experiment = Experiment::builder("demo")
//!     .test(Test::new(1, TestParadigm::Ab))
//!     .build();
//! let results = vec![TestResult::Ab(AbResult::new(1, vec![Selection::new(1, "s1")]))];
//!
//! let engine = ExportEngine::default();
//! let report = engine.flat_report(&experiment, &results, 1)?;
//! assert!(report.starts_with("Test type,question 1,sample 1,Feedback"));
//!
//! let archive = engine.archive(&experiment, &results)?;
//! assert!(!archive.is_empty());
//! # Ok::<(), perqual::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

pub mod error;
pub mod experiment;
pub mod report;

pub use error::{Error, Result};

use experiment::{Experiment, TestResult};
use report::{
    archive_reports, build_table, compose_document, discover_columns, render_document,
    to_delimited_text, CsvOptions, DocumentOptions, Page, QuotePolicy,
};

/// Export engine: one configured entry point for every report format.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExportEngine {
    csv: CsvOptions,
    document: DocumentOptions,
}

impl ExportEngine {
    /// Create a new export engine builder.
    #[must_use]
    pub fn builder() -> ExportEngineBuilder {
        ExportEngineBuilder::default()
    }

    /// Get the delimited-text options.
    #[must_use]
    pub const fn csv_options(&self) -> &CsvOptions {
        &self.csv
    }

    /// Get the document options.
    #[must_use]
    pub const fn document_options(&self) -> &DocumentOptions {
        &self.document
    }

    /// Serialize one test's stored results as flat delimited text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownTestReference`] if the experiment has no
    /// test with that number, or a table-construction error if the stored
    /// results disagree with the test's paradigm.
    pub fn flat_report(
        &self,
        experiment: &Experiment,
        results: &[TestResult],
        test_number: u32,
    ) -> Result<String> {
        let test = experiment
            .test(test_number)
            .ok_or(Error::UnknownTestReference(test_number))?;
        let matching: Vec<TestResult> = results
            .iter()
            .filter(|result| result.test_number() == test_number)
            .cloned()
            .collect();
        let columns = discover_columns(&matching, test.paradigm());
        let table = build_table(&matching, &columns, test)?;
        to_delimited_text(&table, &self.csv)
    }

    /// Compose the whole-experiment document pages, one per test with
    /// stored results.
    #[must_use]
    pub fn pages(&self, experiment: &Experiment, results: &[TestResult]) -> Vec<Page> {
        compose_document(experiment, results, &self.document)
    }

    /// Render the whole-experiment document as one printable byte stream.
    #[must_use]
    pub fn document(&self, experiment: &Experiment, results: &[TestResult]) -> Vec<u8> {
        render_document(&self.pages(experiment, results))
    }

    /// Bundle one flat report per configured test into a zip archive.
    ///
    /// # Errors
    ///
    /// Returns a table-construction error if any test's stored results
    /// disagree with its paradigm.
    pub fn archive(&self, experiment: &Experiment, results: &[TestResult]) -> Result<Vec<u8>> {
        archive_reports(experiment, results, &self.csv)
    }
}

/// Export engine builder.
#[derive(Debug, Clone, Default)]
pub struct ExportEngineBuilder {
    csv: CsvOptions,
    document: DocumentOptions,
}

impl ExportEngineBuilder {
    /// Set the field delimiter for flat reports.
    #[must_use]
    pub const fn delimiter(mut self, delimiter: u8) -> Self {
        self.csv = self.csv.with_delimiter(delimiter);
        self
    }

    /// Set the quoting policy for flat reports.
    #[must_use]
    pub const fn quote_policy(mut self, policy: QuotePolicy) -> Self {
        self.csv = self.csv.with_quote_policy(policy);
        self
    }

    /// Set the lower bound for document column widths.
    #[must_use]
    pub const fn min_col_width(mut self, width: usize) -> Self {
        self.document = self.document.with_min_col_width(width);
        self
    }

    /// Set the upper bound for document column widths.
    #[must_use]
    pub const fn max_col_width(mut self, width: usize) -> Self {
        self.document = self.document.with_max_col_width(width);
        self
    }

    /// Build the export engine.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the delimiter collides with quoting or
    /// record separators, or if the column width bounds are inverted or
    /// too small to hold emphasis markers.
    pub fn build(self) -> Result<ExportEngine> {
        if matches!(self.csv.delimiter(), b'"' | b'\n' | b'\r') {
            return Err(Error::Config(
                "delimiter cannot be a quote or record separator".to_string(),
            ));
        }
        if self.document.min_col_width() < 3 {
            return Err(Error::Config(format!(
                "min_col_width {} leaves no room for cell text",
                self.document.min_col_width()
            )));
        }
        if self.document.min_col_width() > self.document.max_col_width() {
            return Err(Error::Config(format!(
                "min_col_width {} exceeds max_col_width {}",
                self.document.min_col_width(),
                self.document.max_col_width()
            )));
        }
        Ok(ExportEngine {
            csv: self.csv,
            document: self.document,
        })
    }
}
