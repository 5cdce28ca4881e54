//! Report pipeline: column discovery, table building, serialization
//!
//! Stored results flow through a fixed pipeline:
//!
//! ```text
//! [TestResult] --discover--> ColumnSet --build--> Table --+--> delimited text
//!                                                         +--> document pages --> bytes
//!                                                         +--> zip archive
//! ```
//!
//! Discovery scans a test's results for the union of question, sample, and
//! axis identifiers, so the report shape is driven by what participants
//! actually submitted rather than by test configuration. The canonical
//! [`Table`] then feeds every output format; flat text and paginated pages
//! never disagree on labels or cell values.
//!
//! # Example
//!
//! ```
//! use perqual::experiment::{AbResult, Experiment, Selection, Test, TestParadigm, TestResult};
//! use perqual::report::{build_table, discover_columns, to_delimited_text, CsvOptions};
//!
//! let test = Test::new(1, TestParadigm::Ab);
//! let results = vec![TestResult::Ab(AbResult::new(1, vec![Selection::new(1, "s1")]))];
//!
//! let columns = discover_columns(&results, TestParadigm::Ab);
//! let table = build_table(&results, &columns, &test)?;
//! let text = to_delimited_text(&table, &CsvOptions::default())?;
//! assert!(text.starts_with("Test type,question 1,sample 1,Feedback"));
//! # Ok::<(), perqual::error::Error>(())
//! ```

mod archive;
mod columns;
mod csv;
mod document;
mod render;
mod table;

pub use archive::{archive_file_name, archive_reports, report_file_name};
pub use columns::{discover_columns, ColumnSet};
pub use csv::{to_delimited_text, CsvOptions, QuotePolicy};
pub use document::{
    compose_document, CellStyle, DocumentOptions, GridCell, Page, DEFAULT_MAX_COL_WIDTH,
    DEFAULT_MIN_COL_WIDTH,
};
pub use render::render_document;
pub use table::{build_table, Cell, Table, NULL_SENTINEL};
