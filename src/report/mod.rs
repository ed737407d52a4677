//! CSV report, console table and progress output.
mod csv;
mod format;
mod header;
mod progress;
mod table;


pub use csv::{CSV_DELIMITER, render_csv, write_csv};
pub use format::{format_rate_x100, format_seconds};
pub use header::print_run_header;
pub use progress::ConsoleProgress;
pub use table::{Cell, ReportTable, build_table, print_console_table, render_console_table};
