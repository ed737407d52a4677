use std::time::Duration;

use crate::metrics::Throughput;

const RATE_SCALE: u64 = 100;
const RATE_TENTHS: u64 = 10;

/// Seconds with microsecond precision, e.g. `0.250000`.
#[must_use]
pub fn format_seconds(duration: Duration) -> String {
    format!("{}.{:06}", duration.as_secs(), duration.subsec_micros())
}

/// Renders a hundredths value with trailing zeros dropped: `50` -> `0.5`,
/// `1200` -> `12`, `429` -> `4.29`.
#[must_use]
pub fn format_rate_x100(value: u64) -> String {
    let whole = value.checked_div(RATE_SCALE).unwrap_or(0);
    let frac = value.checked_rem(RATE_SCALE).unwrap_or(0);
    if frac == 0 {
        return whole.to_string();
    }
    if frac.checked_rem(RATE_TENTHS) == Some(0) {
        let tenths = frac.checked_div(RATE_TENTHS).unwrap_or(0);
        return format!("{}.{}", whole, tenths);
    }
    format!("{}.{:02}", whole, frac)
}

pub(super) fn format_throughput(rate: Throughput) -> Option<String> {
    rate.as_x100().map(format_rate_x100)
}
