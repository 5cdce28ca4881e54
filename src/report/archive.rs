//! Bundling per-test reports into a single zip archive

use std::io::{Cursor, Write};

use tracing::debug;
use zip::write::FileOptions;
use zip::ZipWriter;

use crate::error::Result;
use crate::experiment::{Experiment, TestResult};
use crate::report::columns::discover_columns;
use crate::report::csv::{to_delimited_text, CsvOptions};
use crate::report::table::build_table;

/// Per-test report entry name: `{experiment}_test_{number}_{paradigm}.csv`.
#[must_use]
pub fn report_file_name(experiment_name: &str, test_number: u32, paradigm: &str) -> String {
    format!("{experiment_name}_test_{test_number}_{paradigm}.csv")
}

/// Archive name for a whole experiment: `{experiment}.zip`.
#[must_use]
pub fn archive_file_name(experiment_name: &str) -> String {
    format!("{experiment_name}.zip")
}

/// Bundle one flat report per test into an in-memory zip archive.
///
/// Every configured test gets an entry, even with zero matching results
/// (the entry is then a header-only report). Entries use deflate with a
/// fixed timestamp, so the same experiment and results always produce the
/// same bytes. Table construction errors abort the whole archive.
pub fn archive_reports(
    experiment: &Experiment,
    results: &[TestResult],
    options: &CsvOptions,
) -> Result<Vec<u8>> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let entry_options = FileOptions::default();

    for test in experiment.tests() {
        let matching: Vec<TestResult> = results
            .iter()
            .filter(|result| result.test_number() == test.number())
            .cloned()
            .collect();
        let columns = discover_columns(&matching, test.paradigm());
        let table = build_table(&matching, &columns, test)?;
        let text = to_delimited_text(&table, options)?;

        let name = report_file_name(experiment.name(), test.number(), test.paradigm().label());
        debug!(
            "archiving {name}: {} rows, {} bytes",
            table.rows().len(),
            text.len()
        );
        writer.start_file(name, entry_options)?;
        writer.write_all(text.as_bytes())?;
    }

    let cursor = writer.finish()?;
    Ok(cursor.into_inner())
}
