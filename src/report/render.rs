//! Plain-text rendering of composed document pages
//!
//! Pages become bordered character grids separated by form feeds, so the
//! whole document stays a single printable byte stream with no drawing
//! library behind it.

use crate::report::document::{CellStyle, Page};

const PAGE_BREAK: &str = "\u{c}\n";

/// Render composed pages into one printable byte stream.
///
/// Each page carries a centered title, a horizontal rule, a centered header
/// row, then one bordered line per data row. Emphasized cells are wrapped
/// in `*`; the width slack guarantees the markers fit whenever the text
/// itself does. Cell text longer than its column is truncated. Pages are
/// separated by a form feed; zero pages render as an empty stream.
#[must_use]
pub fn render_document(pages: &[Page]) -> Vec<u8> {
    let mut out = String::new();
    for (i, page) in pages.iter().enumerate() {
        if i > 0 {
            out.push_str(PAGE_BREAK);
        }
        render_page(&mut out, page);
    }
    out.into_bytes()
}

fn render_page(out: &mut String, page: &Page) {
    let total: usize = page.widths().iter().sum::<usize>() + page.widths().len() + 1;

    out.push_str(&center(page.title(), total));
    out.push('\n');
    out.push('\n');

    push_rule(out, page.widths());
    out.push('|');
    for (header, width) in page.headers().iter().zip(page.widths()) {
        out.push_str(&center(header, *width));
        out.push('|');
    }
    out.push('\n');
    push_rule(out, page.widths());

    for row in page.rows() {
        out.push('|');
        for (cell, width) in row.iter().zip(page.widths()) {
            let text = match cell.style() {
                CellStyle::Emphasis => format!("*{}*", cell.text()),
                CellStyle::Plain => cell.text().to_string(),
            };
            out.push_str(&left_align(&text, *width));
            out.push('|');
        }
        out.push('\n');
    }
    push_rule(out, page.widths());
}

fn push_rule(out: &mut String, widths: &[usize]) {
    out.push('+');
    for width in widths {
        for _ in 0..*width {
            out.push('-');
        }
        out.push('+');
    }
    out.push('\n');
}

fn truncate(text: &str, width: usize) -> String {
    text.chars().take(width).collect()
}

fn center(text: &str, width: usize) -> String {
    let text = truncate(text, width);
    let len = text.chars().count();
    let left = (width - len) / 2;
    let right = width - len - left;
    format!("{}{}{}", " ".repeat(left), text, " ".repeat(right))
}

fn left_align(text: &str, width: usize) -> String {
    let text = truncate(text, width);
    let len = text.chars().count();
    format!("{}{}", text, " ".repeat(width - len))
}
