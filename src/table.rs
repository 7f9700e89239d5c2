//! Plain-text table rendering for decoded records.

use std::borrow::Cow;
use std::fmt::Write as _;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
}

#[derive(Debug, Clone)]
pub struct Column {
    pub title: String,
    pub align: Align,
}

impl Column {
    pub fn left(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            align: Align::Left,
        }
    }

    pub fn right(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            align: Align::Right,
        }
    }
}

/// A value that renders as one table row.
pub trait TableRow {
    fn columns() -> Vec<Column>;
    fn cells(&self) -> Vec<String>;
}

pub fn render_records<T: TableRow>(records: &[T]) -> String {
    let rows = records.iter().map(TableRow::cells).collect::<Vec<_>>();
    render_table(&T::columns(), &rows)
}

pub fn render_table(columns: &[Column], rows: &[Vec<String>]) -> String {
    let mut widths = columns
        .iter()
        .map(|c| display_width(&c.title).max(1))
        .collect::<Vec<_>>();
    for row in rows {
        for (idx, cell) in row.iter().enumerate().take(columns.len()) {
            widths[idx] = widths[idx].max(display_width(&sanitize_cell(cell)));
        }
    }

    let mut output = String::new();
    let titles = columns.iter().map(|c| c.title.clone()).collect::<Vec<_>>();
    let _ = writeln!(output, "{}", format_row(&titles, columns, &widths));
    let rule = widths.iter().map(|w| "-".repeat(*w)).collect::<Vec<_>>();
    let _ = writeln!(output, "{}", format_row(&rule, columns, &widths));
    for row in rows {
        let _ = writeln!(output, "{}", format_row(row, columns, &widths));
    }
    output
}

fn format_row(values: &[String], columns: &[Column], widths: &[usize]) -> String {
    let cells = values
        .iter()
        .zip(columns.iter().zip(widths))
        .map(|(value, (column, width))| {
            let sanitized = sanitize_cell(value);
            let padding = " ".repeat(width.saturating_sub(display_width(&sanitized)));
            match column.align {
                Align::Left => format!("{sanitized}{padding}"),
                Align::Right => format!("{padding}{sanitized}"),
            }
        })
        .collect::<Vec<_>>();
    cells.join("  ").trim_end().to_string()
}

fn display_width(value: &str) -> usize {
    value.chars().count()
}

fn sanitize_cell(value: &str) -> Cow<'_, str> {
    if value.contains(['\n', '\r', '\t']) {
        Cow::Owned(value.replace(['\n', '\r', '\t'], " "))
    } else {
        Cow::Borrowed(value)
    }
}
