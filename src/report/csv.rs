use std::path::Path;

use tokio::io::{AsyncWriteExt, BufWriter};

use crate::error::ReportError;

use super::table::{Cell, ReportTable};

pub const CSV_DELIMITER: char = ';';

/// Renders the report as `;`-separated CSV. Text is wrapped in `"` with
/// embedded `"` turned into `'`; numbers stay bare; flags are `1` or empty.
#[must_use]
pub fn render_csv(table: &ReportTable) -> String {
    let mut out = String::new();
    let header: Vec<String> = table.header.iter().map(|name| quote(name)).collect();
    push_line(&mut out, &header);
    for row in &table.rows {
        let fields: Vec<String> = row.iter().map(render_cell).collect();
        push_line(&mut out, &fields);
    }
    out
}

/// Writes the rendered CSV to `path`, replacing an existing file.
///
/// # Errors
///
/// Returns an error when the file cannot be created or written.
pub async fn write_csv(path: &Path, table: &ReportTable) -> Result<(), ReportError> {
    let to_error = |err: std::io::Error| ReportError::WriteCsv {
        path: path.to_path_buf(),
        source: err,
    };
    let file = tokio::fs::File::create(path).await.map_err(to_error)?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(render_csv(table).as_bytes())
        .await
        .map_err(to_error)?;
    writer.flush().await.map_err(to_error)?;
    Ok(())
}

fn push_line(out: &mut String, fields: &[String]) {
    out.push_str(&fields.join(&CSV_DELIMITER.to_string()));
    out.push('\n');
}

fn render_cell(cell: &Cell) -> String {
    match cell {
        Cell::Text(value) => quote(value),
        Cell::Number(value) => value.clone(),
        Cell::Flag(true) => "1".to_owned(),
        Cell::Flag(false) | Cell::Empty => String::new(),
    }
}

fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "'"))
}
