// THEORY:
// Footfall intelligence over a caller-supplied time series of counter
// readings: total inflow, total outflow, the net change and the busiest
// interval. The peak is the first reading with the maximum inflow, so ties
// resolve to the earliest interval.
//
// Raw readings can be rolled up to a coarser `Granularity` first; each bucket
// starts at a multiple of the step since the epoch.
//
// Counts arrive from clients, so every sum saturates at `u64::MAX` and the net
// flow saturates at the `i64` range instead of wrapping.

use std::collections::BTreeMap;
use std::str::FromStr;
use thiserror::Error;

/// Bucket width for footfall series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Granularity {
    #[cfg_attr(feature = "serde", serde(rename = "15m"))]
    FifteenMinutes,
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "1h"))]
    Hour,
    #[cfg_attr(feature = "serde", serde(rename = "1d"))]
    Day,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown granularity `{0}` (expected 15m, 1h or 1d)")]
pub struct ParseGranularityError(pub String);

impl FromStr for Granularity {
    type Err = ParseGranularityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "15m" => Ok(Granularity::FifteenMinutes),
            "1h" => Ok(Granularity::Hour),
            "1d" => Ok(Granularity::Day),
            other => Err(ParseGranularityError(other.to_string())),
        }
    }
}

impl Granularity {
    pub fn as_str(self) -> &'static str {
        match self {
            Granularity::FifteenMinutes => "15m",
            Granularity::Hour => "1h",
            Granularity::Day => "1d",
        }
    }

    pub fn step_seconds(self) -> u64 {
        match self {
            Granularity::FifteenMinutes => 15 * 60,
            Granularity::Hour => 60 * 60,
            Granularity::Day => 24 * 60 * 60,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FootfallPoint {
    /// Start of the interval, milliseconds since the Unix epoch.
    pub timestamp: u64,
    pub inflow: u64,
    pub outflow: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct FootfallSummary {
    pub total_inflow: u64,
    pub total_outflow: u64,
    /// Inflow minus outflow; negative when more people left than entered.
    /// Saturates at the `i64` range.
    pub net_flow: i64,
    pub peak: Option<FootfallPoint>,
}

/// Sums readings into buckets of `granularity`, earliest bucket first.
pub fn bucket_footfall(points: &[FootfallPoint], granularity: Granularity) -> Vec<FootfallPoint> {
    let step = granularity.step_seconds() * 1000;
    let mut buckets: BTreeMap<u64, (u64, u64)> = BTreeMap::new();
    for p in points {
        let entry = buckets.entry(p.timestamp - p.timestamp % step).or_default();
        entry.0 = entry.0.saturating_add(p.inflow);
        entry.1 = entry.1.saturating_add(p.outflow);
    }
    buckets
        .into_iter()
        .map(|(timestamp, (inflow, outflow))| FootfallPoint { timestamp, inflow, outflow })
        .collect()
}

pub fn summarize_footfall(points: &[FootfallPoint]) -> FootfallSummary {
    let total_inflow = points.iter().fold(0u64, |sum, p| sum.saturating_add(p.inflow));
    let total_outflow = points.iter().fold(0u64, |sum, p| sum.saturating_add(p.outflow));
    let peak = points
        .iter()
        .fold(None::<&FootfallPoint>, |best, p| match best {
            Some(b) if b.inflow >= p.inflow => Some(b),
            _ => Some(p),
        })
        .copied();

    FootfallSummary {
        total_inflow,
        total_outflow,
        net_flow: net_flow(total_inflow, total_outflow),
        peak,
    }
}

fn net_flow(inflow: u64, outflow: u64) -> i64 {
    let net = i128::from(inflow) - i128::from(outflow);
    i64::try_from(net).unwrap_or(if net < 0 { i64::MIN } else { i64::MAX })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(timestamp: u64, inflow: u64, outflow: u64) -> FootfallPoint {
        FootfallPoint { timestamp, inflow, outflow }
    }

    #[test]
    fn totals_and_net_flow() {
        let points = [point(0, 60, 40), point(1, 120, 150), point(2, 30, 10)];
        let summary = summarize_footfall(&points);
        assert_eq!(summary.total_inflow, 210);
        assert_eq!(summary.total_outflow, 200);
        assert_eq!(summary.net_flow, 10);
        assert_eq!(summary.peak, Some(points[1]));
    }

    #[test]
    fn peak_ties_resolve_to_earliest() {
        let points = [point(0, 10, 0), point(1, 90, 0), point(2, 90, 0)];
        assert_eq!(summarize_footfall(&points).peak.unwrap().timestamp, 1);
    }

    #[test]
    fn net_flow_can_be_negative() {
        let summary = summarize_footfall(&[point(0, 5, 25)]);
        assert_eq!(summary.net_flow, -20);
    }

    #[test]
    fn granularity_round_trips_its_label() {
        for g in [Granularity::FifteenMinutes, Granularity::Hour, Granularity::Day] {
            assert_eq!(g.as_str().parse::<Granularity>(), Ok(g));
        }
        assert_eq!(Granularity::default(), Granularity::Hour);
        assert_eq!(Granularity::Day.step_seconds(), 86_400);
        assert!("1w".parse::<Granularity>().is_err());
    }

    #[test]
    fn readings_roll_up_into_buckets() {
        const MIN: u64 = 60_000;
        let points = [point(5 * MIN, 10, 1), point(70 * MIN, 4, 4), point(20 * MIN, 6, 2)];
        let hourly = bucket_footfall(&points, Granularity::Hour);
        assert_eq!(hourly, [point(0, 16, 3), point(60 * MIN, 4, 4)]);

        let quarters = bucket_footfall(&points, Granularity::FifteenMinutes);
        assert_eq!(quarters.iter().map(|p| p.timestamp / MIN).collect::<Vec<_>>(), [0, 15, 60]);
    }

    #[test]
    fn huge_counts_saturate() {
        let points = [point(0, u64::MAX, 0), point(1, 1, 0)];
        let hourly = bucket_footfall(&points, Granularity::Hour);
        assert_eq!(hourly, [point(0, u64::MAX, 0)]);
        assert_eq!(summarize_footfall(&points).total_inflow, u64::MAX);
        assert_eq!(summarize_footfall(&points).net_flow, i64::MAX);
    }

    #[test]
    fn net_flow_keeps_its_sign_past_i64() {
        let summary = summarize_footfall(&[point(0, 0, u64::MAX / 2 + 10)]);
        assert_eq!(summary.net_flow, i64::MIN);

        let summary = summarize_footfall(&[point(0, u64::MAX / 2 + 10, 0)]);
        assert_eq!(summary.net_flow, i64::MAX);
    }

    #[test]
    fn empty_series_has_no_peak() {
        assert_eq!(summarize_footfall(&[]), FootfallSummary::default());
    }
}
