//! Fixed-width ASCII table layout.
//!
//! The first row is the header. Column widths are measured once over the
//! full row set in characters, headers are centered, body cells are
//! left-justified, and the whole block is framed by `=` separators.

use thiserror::Error;

/// Spacing placed between two columns.
pub const GUTTER: &str = "   ";
const SEPARATOR_CHAR: char = '=';

/// Errors raised when a row set cannot be laid out.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TableError {
    /// No header row was supplied.
    #[error("Cannot render a table without a header row")]
    EmptyTable,
    /// A row does not have as many cells as the header.
    #[error("Row {row} has {found} cells but the header has {expected}")]
    RowShapeMismatch {
        row: usize,
        expected: usize,
        found: usize,
    },
}

/// Lay out `rows` as a bordered table; `rows[0]` is the header.
pub fn render_table<S: AsRef<str>>(rows: &[Vec<S>]) -> Result<String, TableError> {
    let header = rows.first().ok_or(TableError::EmptyTable)?;
    let widths = column_widths(rows)?;
    let separator = separator_line(&widths);

    let mut lines = Vec::with_capacity(rows.len() + 3);
    lines.push(separator.clone());
    lines.push(join_cells(header, &widths, center));
    lines.push(separator.clone());
    for row in &rows[1..] {
        lines.push(join_cells(row, &widths, left_justify));
    }
    lines.push(separator);
    Ok(lines.join("\n"))
}

fn column_widths<S: AsRef<str>>(rows: &[Vec<S>]) -> Result<Vec<usize>, TableError> {
    let expected = rows.first().map(Vec::len).unwrap_or_default();
    let mut widths = vec![0usize; expected];
    for (index, row) in rows.iter().enumerate() {
        if row.len() != expected {
            return Err(TableError::RowShapeMismatch {
                row: index,
                expected,
                found: row.len(),
            });
        }
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(char_len(cell.as_ref()));
        }
    }
    Ok(widths)
}

fn separator_line(widths: &[usize]) -> String {
    let gutters = GUTTER.len() * widths.len().saturating_sub(1);
    let total = widths.iter().sum::<usize>() + gutters;
    std::iter::repeat_n(SEPARATOR_CHAR, total).collect()
}

fn join_cells<S: AsRef<str>>(
    row: &[S],
    widths: &[usize],
    pad: fn(&str, usize) -> String,
) -> String {
    row.iter()
        .zip(widths)
        .map(|(cell, width)| pad(cell.as_ref(), *width))
        .collect::<Vec<_>>()
        .join(GUTTER)
}

fn char_len(cell: &str) -> usize {
    cell.chars().count()
}

fn left_justify(cell: &str, width: usize) -> String {
    let fill = width.saturating_sub(char_len(cell));
    format!("{cell}{}", " ".repeat(fill))
}

/// Odd padding puts the extra space on the right.
fn center(cell: &str, width: usize) -> String {
    let fill = width.saturating_sub(char_len(cell));
    let left = fill / 2;
    format!("{}{cell}{}", " ".repeat(left), " ".repeat(fill - left))
}
