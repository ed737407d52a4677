//! Sequential measurement loop over endpoints, modes and repetitions.
mod record;


pub use record::{MeasurementRecord, ModeSummary, RecordSummary};

use tracing::{debug, info, warn};

use crate::args::PositiveU64;
use crate::http::{Endpoint, Sampler};
use crate::metrics::{Mode, Sample, SampleSet, Stats, Throughput};
use crate::shutdown::{ShutdownReceiver, wait_for_shutdown};

/// Observer for per-attempt progress output.
pub trait ProgressSink {
    fn on_sample(&mut self, sample: &Sample);

    fn on_endpoint_finished(&mut self, _record: &MeasurementRecord) {}
}

/// Progress sink that discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn on_sample(&mut self, _sample: &Sample) {}
}

#[derive(Debug, Clone, Copy)]
pub struct RunnerConfig {
    pub requests: PositiveU64,
    pub include_ttfb: bool,
}

#[derive(Debug)]
pub struct RunReport {
    /// One record per endpoint that ran to completion, in endpoint order.
    pub records: Vec<MeasurementRecord>,
    pub cancelled: bool,
}

impl RunReport {
    #[must_use]
    pub fn failures(&self) -> usize {
        self.records
            .iter()
            .filter(|record| record.is_failure())
            .count()
    }
}

pub struct MeasurementRunner<S> {
    sampler: S,
    config: RunnerConfig,
}

impl<S> MeasurementRunner<S>
where
    S: Sampler,
{
    #[must_use]
    pub const fn new(sampler: S, config: RunnerConfig) -> Self {
        Self { sampler, config }
    }

    /// Measures every endpoint in order. A shutdown signal stops the run; the
    /// endpoint in progress is dropped and the report is marked cancelled.
    pub async fn run<P>(
        &self,
        endpoints: &[Endpoint],
        progress: &mut P,
        shutdown_rx: &mut ShutdownReceiver,
    ) -> RunReport
    where
        P: ProgressSink,
    {
        let mut records = Vec::with_capacity(endpoints.len());
        for endpoint in endpoints {
            let Some(record) = self.measure_endpoint(endpoint, progress, shutdown_rx).await else {
                info!(
                    "Run cancelled during {}; {} of {} endpoints completed",
                    endpoint.path,
                    records.len(),
                    endpoints.len()
                );
                return RunReport {
                    records,
                    cancelled: true,
                };
            };
            progress.on_endpoint_finished(&record);
            records.push(record);
        }
        RunReport {
            records,
            cancelled: false,
        }
    }

    async fn measure_endpoint<P>(
        &self,
        endpoint: &Endpoint,
        progress: &mut P,
        shutdown_rx: &mut ShutdownReceiver,
    ) -> Option<MeasurementRecord>
    where
        P: ProgressSink,
    {
        debug!("Measuring {} ({})", endpoint.path, endpoint.url);
        let body = self
            .collect(endpoint, Mode::Body, progress, shutdown_rx)
            .await?;
        let header = self
            .collect(endpoint, Mode::Header, progress, shutdown_rx)
            .await?;

        let record =
            MeasurementRecord::from_sets(endpoint.clone(), body, header, self.config.include_ttfb);
        log_record(&record);
        Some(record)
    }

    async fn collect<P>(
        &self,
        endpoint: &Endpoint,
        mode: Mode,
        progress: &mut P,
        shutdown_rx: &mut ShutdownReceiver,
    ) -> Option<SampleSet>
    where
        P: ProgressSink,
    {
        let requests = self.config.requests.get();
        let mut set = SampleSet::with_capacity(mode, usize::try_from(requests).unwrap_or(0));
        for _ in 0..requests {
            let sample = tokio::select! {
                biased;
                () = wait_for_shutdown(shutdown_rx) => return None,
                sample = self.sampler.measure_once(&endpoint.url, mode) => sample,
            };
            progress.on_sample(&sample);
            set.push(sample);
        }
        if set.is_exhausted() {
            warn!(
                "All {} {} requests to {} failed",
                set.attempts(),
                mode.as_str(),
                endpoint.url
            );
        } else if set.failures() > 0 {
            debug!(
                "{} of {} {} requests to {} failed",
                set.failures(),
                set.attempts(),
                mode.as_str(),
                endpoint.url
            );
        }
        Some(set)
    }
}

fn log_record(record: &MeasurementRecord) {
    let Some(summary) = record.summary.as_ref() else {
        return;
    };
    let modes = [
        (Mode::Body, &summary.body),
        (Mode::Header, &summary.header),
    ];
    for (mode, mode_summary) in modes {
        let all_stats: [Option<&Stats>; 2] =
            [Some(&mode_summary.elapsed), mode_summary.ttfb.as_ref()];
        if all_stats
            .iter()
            .flatten()
            .any(|stats| matches!(stats.requests_per_sec, Throughput::Degenerate))
        {
            warn!(
                "{} timings for {} summed to zero; requests per sec left blank",
                mode.as_str(),
                record.endpoint.path
            );
        }
    }
}
