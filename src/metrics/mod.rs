//! Sample collection and timing aggregation.
mod stats;
mod types;


pub use stats::{Stats, Throughput, aggregate, median};
pub use types::{FailureKind, Mode, ResponseMeta, Sample, SampleOutcome, SampleSet, Timing};
