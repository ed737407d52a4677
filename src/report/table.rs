use std::io::Write;

use crossterm::style::Stylize;

use crate::error::ReportError;
use crate::metrics::Stats;
use crate::runner::MeasurementRecord;

use super::format::{format_seconds, format_throughput};

const METRIC_COLUMNS: [&str; 5] = ["average", "median", "min", "max", "requests per sec"];
const HEAD_SUFFIX: &str = " (head)";
const TTFB_PREFIX: &str = "[ttfb] ";
const COLUMN_GAP: &str = "  ";

/// One report field. Rendering differs between CSV and console.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    Text(String),
    Number(String),
    Flag(bool),
    Empty,
}

impl Cell {
    fn plain(&self) -> &str {
        match self {
            Cell::Text(value) | Cell::Number(value) => value,
            Cell::Flag(true) => "1",
            Cell::Flag(false) | Cell::Empty => "",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportTable {
    pub header: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

/// Lays out one row per record, in record order.
#[must_use]
pub fn build_table(records: &[MeasurementRecord], include_ttfb: bool) -> ReportTable {
    let header = header_columns(include_ttfb);
    let rows = records
        .iter()
        .map(|record| build_row(record, include_ttfb, header.len()))
        .collect();
    ReportTable { header, rows }
}

fn header_columns(include_ttfb: bool) -> Vec<String> {
    let mut columns = vec!["url".to_owned(), "status".to_owned(), "type".to_owned()];
    let mut push_metrics = |prefix: &str| {
        for suffix in ["", HEAD_SUFFIX] {
            for name in METRIC_COLUMNS {
                columns.push(format!("{}{}{}", prefix, name, suffix));
            }
        }
    };
    push_metrics("");
    if include_ttfb {
        push_metrics(TTFB_PREFIX);
    }
    columns.push("failure".to_owned());
    columns
}

fn build_row(record: &MeasurementRecord, include_ttfb: bool, width: usize) -> Vec<Cell> {
    let mut row = Vec::with_capacity(width);
    row.push(Cell::Text(record.endpoint.url.clone()));

    let Some(summary) = record.summary.as_ref() else {
        row.resize(width.saturating_sub(1), Cell::Empty);
        row.push(Cell::Flag(true));
        return row;
    };

    row.push(Cell::Number(summary.status().to_string()));
    row.push(
        summary
            .content_type()
            .map_or(Cell::Empty, |value| Cell::Text(value.to_owned())),
    );
    push_stats(&mut row, Some(&summary.body.elapsed));
    push_stats(&mut row, Some(&summary.header.elapsed));
    if include_ttfb {
        push_stats(&mut row, summary.body.ttfb.as_ref());
        push_stats(&mut row, summary.header.ttfb.as_ref());
    }
    row.push(Cell::Flag(false));
    row
}

fn push_stats(row: &mut Vec<Cell>, stats: Option<&Stats>) {
    let Some(stats) = stats else {
        row.extend(std::iter::repeat_n(Cell::Empty, METRIC_COLUMNS.len()));
        return;
    };
    row.push(Cell::Number(format_seconds(stats.average)));
    row.push(Cell::Number(format_seconds(stats.median)));
    row.push(Cell::Number(format_seconds(stats.min)));
    row.push(Cell::Number(format_seconds(stats.max)));
    row.push(format_throughput(stats.requests_per_sec).map_or(Cell::Empty, Cell::Number));
}

/// Aligned plain-text rendering of the report for stdout.
#[must_use]
pub fn render_console_table(table: &ReportTable, use_color: bool) -> String {
    let mut widths: Vec<usize> = table.header.iter().map(|name| name.chars().count()).collect();
    for row in &table.rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.plain().chars().count());
        }
    }

    let header_line = pad_line(table.header.iter().map(String::as_str), &widths);
    let rule = widths
        .iter()
        .map(|width| "-".repeat(*width))
        .collect::<Vec<_>>()
        .join(COLUMN_GAP);

    let mut lines = Vec::with_capacity(table.rows.len().saturating_add(2));
    lines.push(if use_color {
        header_line.bold().to_string()
    } else {
        header_line
    });
    lines.push(rule);
    for row in &table.rows {
        let line = pad_line(row.iter().map(Cell::plain), &widths);
        let failed = matches!(row.last(), Some(Cell::Flag(true)));
        lines.push(if use_color && failed {
            line.red().to_string()
        } else {
            line
        });
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// Writes the rendered console table to `out`.
///
/// # Errors
///
/// Returns an error when the output cannot be written.
pub fn print_console_table<W>(
    out: &mut W,
    table: &ReportTable,
    use_color: bool,
) -> Result<(), ReportError>
where
    W: Write,
{
    out.write_all(render_console_table(table, use_color).as_bytes())
        .and_then(|()| out.flush())
        .map_err(|err| ReportError::Console { source: err })
}

fn pad_line<'row, I>(cells: I, widths: &[usize]) -> String
where
    I: Iterator<Item = &'row str>,
{
    cells
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
        .collect::<Vec<_>>()
        .join(COLUMN_GAP)
        .trim_end()
        .to_owned()
}
