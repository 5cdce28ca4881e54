//! Flat report serialization - one table to delimited text

use csv::{QuoteStyle, WriterBuilder};

use crate::error::{Error, Result};
use crate::report::table::Table;

/// Field quoting policy for flat reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuotePolicy {
    /// Fields are written raw, matching the form existing report consumers
    /// parse. A delimiter inside free text (feedback) breaks column
    /// alignment for that row; callers wanting round-trip safety opt into
    /// [`QuotePolicy::Escaped`].
    #[default]
    Unescaped,
    /// Minimal RFC 4180 quoting: fields containing the delimiter, a quote,
    /// or a line break are quoted and inner quotes doubled.
    Escaped,
}

/// Options for the flat report serializer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CsvOptions {
    delimiter: u8,
    quote_policy: QuotePolicy,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            quote_policy: QuotePolicy::Unescaped,
        }
    }
}

impl CsvOptions {
    /// Set the field delimiter.
    #[must_use]
    pub const fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Set the quoting policy.
    #[must_use]
    pub const fn with_quote_policy(mut self, quote_policy: QuotePolicy) -> Self {
        self.quote_policy = quote_policy;
        self
    }

    /// Get the field delimiter.
    #[must_use]
    pub const fn delimiter(&self) -> u8 {
        self.delimiter
    }

    /// Get the quoting policy.
    #[must_use]
    pub const fn quote_policy(&self) -> QuotePolicy {
        self.quote_policy
    }
}

/// Serialize one table as delimited text: the header row first, then each
/// data row in table order, fields joined by the delimiter, rows terminated
/// by `\n`.
///
/// Cells render in their natural text form. Ragged MUSHRA rows are written
/// as-is (shorter than the header); the writer does not pad them.
///
/// # Errors
///
/// Returns [`Error::Csv`] when the underlying writer fails.
pub fn to_delimited_text(table: &Table, options: &CsvOptions) -> Result<String> {
    let quote_style = match options.quote_policy() {
        QuotePolicy::Unescaped => QuoteStyle::Never,
        QuotePolicy::Escaped => QuoteStyle::Necessary,
    };
    let mut writer = WriterBuilder::new()
        .delimiter(options.delimiter())
        .quote_style(quote_style)
        .flexible(true)
        .from_writer(Vec::new());

    writer.write_record(table.headers())?;
    for row in table.rows() {
        writer.write_record(row.iter().map(ToString::to_string))?;
    }

    let buffer = writer
        .into_inner()
        .map_err(|err| Error::Io(err.into_error()))?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::table::Cell;

    fn sample_table() -> Table {
        let mut table = Table::new(vec![
            "Test type".to_owned(),
            "question 1".to_owned(),
            "sample 1".to_owned(),
            "Feedback".to_owned(),
        ]);
        table.push_row(vec![
            Cell::from("AB"),
            Cell::from(1_u32),
            Cell::from("s1"),
            Cell::empty(),
        ]);
        table
    }

    #[test]
    fn test_header_then_rows_newline_terminated() {
        let text = to_delimited_text(&sample_table(), &CsvOptions::default()).unwrap();
        assert_eq!(text, "Test type,question 1,sample 1,Feedback\nAB,1,s1,\n");
    }

    #[test]
    fn test_unescaped_feedback_passes_through_raw() {
        let mut table = sample_table();
        table.push_row(vec![
            Cell::from("AB"),
            Cell::from(1_u32),
            Cell::from("s2"),
            Cell::from("loud, but fine"),
        ]);

        let text = to_delimited_text(&table, &CsvOptions::default()).unwrap();
        // The embedded comma is not quoted; that row splits into one extra
        // field. Legacy consumers depend on the raw form.
        assert!(text.contains("AB,1,s2,loud, but fine\n"));
    }

    #[test]
    fn test_escaped_policy_quotes_when_needed() {
        let mut table = sample_table();
        table.push_row(vec![
            Cell::from("AB"),
            Cell::from(1_u32),
            Cell::from("s2"),
            Cell::from("loud, but fine"),
        ]);

        let options = CsvOptions::default().with_quote_policy(QuotePolicy::Escaped);
        let text = to_delimited_text(&table, &options).unwrap();
        assert!(text.contains("AB,1,s2,\"loud, but fine\"\n"));
    }

    #[test]
    fn test_custom_delimiter() {
        let options = CsvOptions::default().with_delimiter(b';');
        let text = to_delimited_text(&sample_table(), &options).unwrap();
        assert!(text.starts_with("Test type;question 1;sample 1;Feedback\n"));
    }

    #[test]
    fn test_ragged_rows_are_written_short() {
        let mut table = Table::new(vec!["a".to_owned(), "b".to_owned(), "c".to_owned()]);
        table.push_row(vec![Cell::from("x")]);

        let text = to_delimited_text(&table, &CsvOptions::default()).unwrap();
        assert_eq!(text, "a,b,c\nx\n");
    }

    #[test]
    fn test_header_only_table() {
        let table = Table::new(vec!["Test type".to_owned(), "Feedback".to_owned()]);
        let text = to_delimited_text(&table, &CsvOptions::default()).unwrap();
        assert_eq!(text, "Test type,Feedback\n");
    }
}
