//! Error types for the result export engine

use thiserror::Error;

use crate::experiment::TestParadigm;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Export engine error types
#[derive(Error, Debug)]
pub enum Error {
    /// Result payload does not match the required shape of its paradigm
    #[error("Incorrect data in {paradigm} test result: {reason}")]
    InvalidPayload {
        /// Paradigm the payload was validated against
        paradigm: TestParadigm,
        /// First structural violation encountered
        reason: String,
    },

    /// Submitted result carries no usable test number
    #[error("Result payload is missing a test number")]
    MissingTestNumber,

    /// Result names a test number absent from the experiment
    #[error("No matching test found for test number {0}")]
    UnknownTestReference(u32),

    /// Submission envelope carries no results array
    #[error("No results data provided")]
    MissingResults,

    /// Stored results and test paradigm disagree at table-build time
    #[error("Paradigm mismatch for test {test_number}: expected {expected}, got {found}")]
    ParadigmMismatch {
        /// Test the table was being built for
        test_number: u32,
        /// Paradigm of the test
        expected: TestParadigm,
        /// Paradigm of the offending result
        found: TestParadigm,
    },

    /// Discovered column set of the wrong shape handed to the table builder
    #[error("Column set mismatch: {columns} columns cannot serve a {paradigm} table")]
    ColumnSetMismatch {
        /// Paradigm of the test being built
        paradigm: TestParadigm,
        /// Shape of the column set that was supplied
        columns: &'static str,
    },

    /// Invalid engine configuration
    #[error("Invalid export configuration: {0}")]
    Config(String),

    /// Delimited-text writer error
    #[error("Delimited text error: {0}")]
    Csv(#[from] csv::Error),

    /// Archive assembly error
    #[error("Archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
