use std::time::Duration;

use super::stats::{Stats, aggregate};

/// Whether an attempt downloads the response body or stops at the head.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    Body,
    Header,
}

impl Mode {
    /// Measurement order used for every endpoint.
    pub const ALL: [Mode; 2] = [Mode::Body, Mode::Header];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Mode::Body => "body",
            Mode::Header => "header",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    /// Dispatch until the attempt finished (last body chunk in body mode).
    pub total: Duration,
    /// Dispatch until the response head arrived.
    pub ttfb: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseMeta {
    pub status: u16,
    pub content_type: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Timeout,
    Connect,
    Transport,
}

impl FailureKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            FailureKind::Timeout => "timeout",
            FailureKind::Connect => "connect",
            FailureKind::Transport => "transport",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SampleOutcome {
    Completed { timing: Timing, meta: ResponseMeta },
    Failed(FailureKind),
}

/// One timed attempt against a cache-busted URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sample {
    pub url: String,
    pub outcome: SampleOutcome,
}

impl Sample {
    #[must_use]
    pub const fn completed(url: String, timing: Timing, meta: ResponseMeta) -> Self {
        Self {
            url,
            outcome: SampleOutcome::Completed { timing, meta },
        }
    }

    #[must_use]
    pub const fn failed(url: String, kind: FailureKind) -> Self {
        Self {
            url,
            outcome: SampleOutcome::Failed(kind),
        }
    }

    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self.outcome, SampleOutcome::Completed { .. })
    }

    #[must_use]
    pub const fn timing(&self) -> Option<&Timing> {
        match &self.outcome {
            SampleOutcome::Completed { timing, .. } => Some(timing),
            SampleOutcome::Failed(_) => None,
        }
    }

    #[must_use]
    pub const fn meta(&self) -> Option<&ResponseMeta> {
        match &self.outcome {
            SampleOutcome::Completed { meta, .. } => Some(meta),
            SampleOutcome::Failed(_) => None,
        }
    }
}

/// All attempts for one endpoint in one mode, in dispatch order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleSet {
    mode: Mode,
    samples: Vec<Sample>,
}

impl SampleSet {
    #[must_use]
    pub fn with_capacity(mode: Mode, capacity: usize) -> Self {
        Self {
            mode,
            samples: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, sample: Sample) {
        self.samples.push(sample);
    }

    #[must_use]
    pub const fn mode(&self) -> Mode {
        self.mode
    }

    #[must_use]
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    #[must_use]
    pub fn attempts(&self) -> usize {
        self.samples.len()
    }

    #[must_use]
    pub fn successes(&self) -> usize {
        self.samples
            .iter()
            .filter(|sample| sample.is_success())
            .count()
    }

    #[must_use]
    pub fn failures(&self) -> usize {
        self.attempts().saturating_sub(self.successes())
    }

    /// True when no attempt produced a timing value.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        !self.samples.iter().any(Sample::is_success)
    }

    #[must_use]
    pub fn total_times(&self) -> Vec<Duration> {
        self.samples
            .iter()
            .filter_map(Sample::timing)
            .map(|timing| timing.total)
            .collect()
    }

    #[must_use]
    pub fn ttfb_times(&self) -> Vec<Duration> {
        self.samples
            .iter()
            .filter_map(Sample::timing)
            .map(|timing| timing.ttfb)
            .collect()
    }

    /// Status and content type of the first successful attempt.
    #[must_use]
    pub fn first_meta(&self) -> Option<&ResponseMeta> {
        self.samples.iter().find_map(Sample::meta)
    }

    #[must_use]
    pub fn stats(&self) -> Option<Stats> {
        aggregate(&self.total_times())
    }

    #[must_use]
    pub fn ttfb_stats(&self) -> Option<Stats> {
        aggregate(&self.ttfb_times())
    }
}
