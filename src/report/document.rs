//! Paginated document composition - one report page per test

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::warn;

use crate::experiment::{Experiment, Test, TestResult};
use crate::report::columns::discover_columns;
use crate::report::table::{build_table, Table};

/// Default lower bound for a column width, in characters.
pub const DEFAULT_MIN_COL_WIDTH: usize = 10;

/// Default upper bound for a column width, in characters.
pub const DEFAULT_MAX_COL_WIDTH: usize = 100;

/// Cell rendering style in the paginated document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellStyle {
    /// Filled/emphasized cell (the first cell of each data row).
    Emphasis,
    /// Plain cell.
    Plain,
}

/// One grid cell of a composed page: pre-rendered text plus style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridCell {
    text: String,
    style: CellStyle,
}

impl GridCell {
    const fn new(text: String, style: CellStyle) -> Self {
        Self { text, style }
    }

    /// Get the rendered cell text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Get the cell style.
    #[must_use]
    pub const fn style(&self) -> CellStyle {
        self.style
    }
}

/// One document page: the full report grid for a single test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    title: String,
    headers: Vec<String>,
    widths: Vec<usize>,
    rows: Vec<Vec<GridCell>>,
}

impl Page {
    /// Get the page title line.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Get the header labels.
    #[must_use]
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Get the fixed column widths, one per header.
    #[must_use]
    pub fn widths(&self) -> &[usize] {
        &self.widths
    }

    /// Get the data rows, padded to the header width.
    #[must_use]
    pub fn rows(&self) -> &[Vec<GridCell>] {
        &self.rows
    }
}

/// Options for the paginated composer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocumentOptions {
    min_col_width: usize,
    max_col_width: usize,
}

impl Default for DocumentOptions {
    fn default() -> Self {
        Self {
            min_col_width: DEFAULT_MIN_COL_WIDTH,
            max_col_width: DEFAULT_MAX_COL_WIDTH,
        }
    }
}

impl DocumentOptions {
    /// Set the lower bound for column widths.
    #[must_use]
    pub const fn with_min_col_width(mut self, width: usize) -> Self {
        self.min_col_width = width;
        self
    }

    /// Set the upper bound for column widths.
    #[must_use]
    pub const fn with_max_col_width(mut self, width: usize) -> Self {
        self.max_col_width = width;
        self
    }

    /// Get the lower bound for column widths.
    #[must_use]
    pub const fn min_col_width(&self) -> usize {
        self.min_col_width
    }

    /// Get the upper bound for column widths.
    #[must_use]
    pub const fn max_col_width(&self) -> usize {
        self.max_col_width
    }
}

/// Compose the whole-experiment document: one page per test, in experiment
/// order, skipping tests with zero matching results outright (no blank
/// page).
///
/// Column widths are computed independently per page as
/// `clamp(longest_cell + 4, min, max)` over each column's rendered cells
/// (header included); widths are never shared across pages. The first cell
/// of each data row is emphasized, everything else is plain.
///
/// Tests are independent of one another: with the `parallel` feature the
/// pages are composed on a rayon pool and reassembled in experiment order.
/// A test whose table cannot be built (stored results disagreeing with the
/// configured paradigm) is logged and skipped rather than failing the whole
/// document.
#[must_use]
pub fn compose_document(
    experiment: &Experiment,
    results: &[TestResult],
    options: &DocumentOptions,
) -> Vec<Page> {
    #[cfg(feature = "parallel")]
    {
        experiment
            .tests()
            .par_iter()
            .filter_map(|test| compose_page(experiment.name(), test, results, options))
            .collect()
    }
    #[cfg(not(feature = "parallel"))]
    {
        experiment
            .tests()
            .iter()
            .filter_map(|test| compose_page(experiment.name(), test, results, options))
            .collect()
    }
}

fn compose_page(
    experiment_name: &str,
    test: &Test,
    results: &[TestResult],
    options: &DocumentOptions,
) -> Option<Page> {
    let matching: Vec<TestResult> = results
        .iter()
        .filter(|result| result.test_number() == test.number())
        .cloned()
        .collect();
    if matching.is_empty() {
        return None;
    }

    let columns = discover_columns(&matching, test.paradigm());
    let table = match build_table(&matching, &columns, test) {
        Ok(table) => table,
        Err(err) => {
            warn!("skipping document page for test {}: {err}", test.number());
            return None;
        }
    };

    let title = format!(
        "Experiment: {experiment_name} - Test {} ({})",
        test.number(),
        test.paradigm()
    );
    Some(page_from_table(title, &table, options))
}

fn page_from_table(title: String, table: &Table, options: &DocumentOptions) -> Page {
    let column_count = table.column_count();
    let rows: Vec<Vec<GridCell>> = table
        .rows()
        .iter()
        .map(|row| {
            let mut grid_row: Vec<GridCell> = row
                .iter()
                .take(column_count)
                .enumerate()
                .map(|(i, cell)| {
                    let style = if i == 0 {
                        CellStyle::Emphasis
                    } else {
                        CellStyle::Plain
                    };
                    GridCell::new(cell.to_string(), style)
                })
                .collect();
            grid_row.resize(column_count, GridCell::new(String::new(), CellStyle::Plain));
            grid_row
        })
        .collect();

    let widths = (0..column_count)
        .map(|i| {
            let longest = rows
                .iter()
                .map(|row| row[i].text().chars().count())
                .chain(std::iter::once(table.headers()[i].chars().count()))
                .max()
                .unwrap_or(0);
            column_width(longest, options)
        })
        .collect();

    Page {
        title,
        headers: table.headers().to_vec(),
        widths,
        rows,
    }
}

/// Monotonic width rule: four characters of slack around the longest
/// rendered cell, clamped to the configured bounds.
const fn column_width(longest: usize, options: &DocumentOptions) -> usize {
    let padded = longest + 4;
    if padded < options.min_col_width {
        options.min_col_width
    } else if padded > options.max_col_width {
        options.max_col_width
    } else {
        padded
    }
}
