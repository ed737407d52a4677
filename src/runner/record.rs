use crate::http::Endpoint;
use crate::metrics::{ResponseMeta, SampleSet, Stats};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModeSummary {
    pub elapsed: Stats,
    /// Present only when ttfb reporting is enabled.
    pub ttfb: Option<Stats>,
    /// Metadata of the first successful attempt in this mode.
    pub meta: ResponseMeta,
}

impl ModeSummary {
    fn from_set(set: &SampleSet, include_ttfb: bool) -> Option<Self> {
        let elapsed = set.stats()?;
        let meta = set.first_meta()?.clone();
        let ttfb = if include_ttfb { set.ttfb_stats() } else { None };
        Some(Self {
            elapsed,
            ttfb,
            meta,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordSummary {
    pub body: ModeSummary,
    pub header: ModeSummary,
}

impl RecordSummary {
    /// Status reported for the endpoint, taken from the body mode.
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.body.meta.status
    }

    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.body.meta.content_type.as_deref()
    }
}

/// Outcome of measuring one endpoint in both modes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeasurementRecord {
    pub endpoint: Endpoint,
    pub body: SampleSet,
    pub header: SampleSet,
    /// `None` marks a failure record: one of the modes never succeeded.
    pub summary: Option<RecordSummary>,
}

impl MeasurementRecord {
    #[must_use]
    pub fn from_sets(
        endpoint: Endpoint,
        body: SampleSet,
        header: SampleSet,
        include_ttfb: bool,
    ) -> Self {
        let summary = summarize(&body, &header, include_ttfb);
        Self {
            endpoint,
            body,
            header,
            summary,
        }
    }

    #[must_use]
    pub const fn is_failure(&self) -> bool {
        self.summary.is_none()
    }
}

fn summarize(body: &SampleSet, header: &SampleSet, include_ttfb: bool) -> Option<RecordSummary> {
    Some(RecordSummary {
        body: ModeSummary::from_set(body, include_ttfb)?,
        header: ModeSummary::from_set(header, include_ttfb)?,
    })
}
