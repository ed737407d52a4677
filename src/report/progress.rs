use std::io::{Stderr, Write};

use crossterm::{
    queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
};

use crate::metrics::Sample;
use crate::runner::{MeasurementRecord, ProgressSink};

const SUCCESS_GLYPH: char = '.';
const FAILURE_GLYPH: char = 'x';

/// Prints one glyph per attempt to stderr and closes each endpoint's line
/// with its path.
pub struct ConsoleProgress {
    out: Stderr,
    use_color: bool,
    enabled: bool,
}

impl ConsoleProgress {
    #[must_use]
    pub fn new(enabled: bool, use_color: bool) -> Self {
        Self {
            out: std::io::stderr(),
            use_color,
            enabled,
        }
    }

    fn write_glyph(&mut self, glyph: char, color: Color) -> Result<(), std::io::Error> {
        if self.use_color {
            queue!(
                self.out,
                SetForegroundColor(color),
                Print(glyph),
                ResetColor
            )?;
        } else {
            queue!(self.out, Print(glyph))?;
        }
        self.out.flush()
    }

    fn write_endpoint_line(&mut self, record: &MeasurementRecord) -> Result<(), std::io::Error> {
        let marker = if record.is_failure() { " failed" } else { "" };
        writeln!(self.out, " {}{}", record.endpoint.path, marker)
    }

    fn disable_on_error(&mut self, result: Result<(), std::io::Error>) {
        if let Err(err) = result {
            tracing::debug!("Progress output disabled: {}", err);
            self.enabled = false;
        }
    }
}

impl ProgressSink for ConsoleProgress {
    fn on_sample(&mut self, sample: &Sample) {
        if !self.enabled {
            return;
        }
        let result = if sample.is_success() {
            self.write_glyph(SUCCESS_GLYPH, Color::Green)
        } else {
            self.write_glyph(FAILURE_GLYPH, Color::Red)
        };
        self.disable_on_error(result);
    }

    fn on_endpoint_finished(&mut self, record: &MeasurementRecord) {
        if !self.enabled {
            return;
        }
        let result = self.write_endpoint_line(record);
        self.disable_on_error(result);
    }
}
