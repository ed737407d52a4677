use std::time::Duration;

const NANOS_PER_SEC: u128 = 1_000_000_000;
/// Throughput is kept in hundredths of a request per second.
const THROUGHPUT_SCALE: u128 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Throughput {
    /// Requests per second multiplied by 100, rounded half up.
    PerSecondX100(u64),
    /// The summed time was zero, so no rate can be expressed.
    Degenerate,
}

impl Throughput {
    #[must_use]
    pub fn from_total(count: usize, total: Duration) -> Self {
        let total_nanos = total.as_nanos();
        if total_nanos == 0 {
            return Throughput::Degenerate;
        }
        let scaled = (count as u128)
            .saturating_mul(THROUGHPUT_SCALE)
            .saturating_mul(NANOS_PER_SEC);
        let half = total_nanos.checked_div(2).unwrap_or(0);
        let rounded = scaled
            .saturating_add(half)
            .checked_div(total_nanos)
            .unwrap_or(0);
        Throughput::PerSecondX100(u64::try_from(rounded).unwrap_or(u64::MAX))
    }

    #[must_use]
    pub const fn as_x100(self) -> Option<u64> {
        match self {
            Throughput::PerSecondX100(value) => Some(value),
            Throughput::Degenerate => None,
        }
    }
}

/// Summary of a non-empty set of timing values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
    pub count: usize,
    pub total: Duration,
    pub median: Duration,
    pub average: Duration,
    pub min: Duration,
    pub max: Duration,
    pub requests_per_sec: Throughput,
}

/// Reduces timing values to [`Stats`]; `None` when there is nothing to
/// summarize.
#[must_use]
pub fn aggregate(values: &[Duration]) -> Option<Stats> {
    let mut sorted = values.to_vec();
    sorted.sort();

    let count = sorted.len();
    let min = sorted.first().copied()?;
    let max = sorted.last().copied()?;
    let median = median(&sorted)?;
    let total = sorted
        .iter()
        .fold(Duration::ZERO, |sum, value| sum.saturating_add(*value));
    let divisor = u32::try_from(count).unwrap_or(u32::MAX);
    let average = total.checked_div(divisor)?;

    Some(Stats {
        count,
        total,
        median,
        average,
        min,
        max,
        requests_per_sec: Throughput::from_total(count, total),
    })
}

/// Median of values already sorted ascending. Even counts average the two
/// middle values.
#[must_use]
pub fn median(sorted: &[Duration]) -> Option<Duration> {
    let count = sorted.len();
    let mid = count.checked_div(2)?;
    match count.checked_rem(2) {
        Some(0) => {
            let lower = sorted.get(mid.checked_sub(1)?)?;
            let upper = sorted.get(mid)?;
            lower.checked_add(*upper)?.checked_div(2)
        }
        Some(_) => sorted.get(mid).copied(),
        None => None,
    }
}
