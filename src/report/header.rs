use std::io::Write;

use crossterm::style::{Color, Stylize};

use crate::config::RunSettings;
use crate::error::ReportError;

const TITLE_COLOR: Color = Color::Rgb {
    r: 0x3a,
    g: 0xa9,
    b: 0xff,
};

/// Prints the run banner: target host, repetitions and endpoint count.
///
/// # Errors
///
/// Returns an error when the output cannot be written.
pub fn print_run_header<W>(
    out: &mut W,
    settings: &RunSettings,
    endpoints: usize,
    use_color: bool,
) -> Result<(), ReportError>
where
    W: Write,
{
    write_header(out, settings, endpoints, use_color)
        .and_then(|()| out.flush())
        .map_err(|err| ReportError::Console { source: err })
}

fn write_header<W>(
    out: &mut W,
    settings: &RunSettings,
    endpoints: usize,
    use_color: bool,
) -> Result<(), std::io::Error>
where
    W: Write,
{
    let title = format!("pagetime v{} | {}", env!("CARGO_PKG_VERSION"), settings.host);
    let ttfb = if settings.ttfb { ", ttfb on" } else { "" };
    let detail = format!(
        "{} requests per mode (body + head) on {} endpoints{}",
        settings.requests, endpoints, ttfb
    );
    if use_color {
        writeln!(out, "{}", title.with(TITLE_COLOR).bold())?;
    } else {
        writeln!(out, "{}", title)?;
    }
    writeln!(out, "{}", detail)
}
