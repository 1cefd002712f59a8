// THEORY:
// Zone-to-zone movement. The flow panel lists every observed movement,
// busiest first, with each bar scaled against the busiest flow, plus the total
// number of movements. Zone ids are resolved to display names where the zone
// is known; unknown ids are shown as-is.

use crate::core_modules::zone::ZoneRecord;
use std::collections::HashMap;

/// People counted moving from `source` to `target`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FlowRecord {
    pub source: String,
    pub target: String,
    pub count: u64,
}

impl FlowRecord {
    pub fn new(source: impl Into<String>, target: impl Into<String>, count: u64) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            count,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct FlowRow {
    pub source: String,
    pub source_name: String,
    pub target: String,
    pub target_name: String,
    pub count: u64,
    /// Share of the busiest flow, 0-100.
    pub percent_of_max: f64,
}

#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FlowSummary {
    /// Flows sorted by count, busiest first.
    pub rows: Vec<FlowRow>,
    /// Sum of all flow counts.
    pub total: u64,
}

pub fn summarize_flows(flows: &[FlowRecord], zones: &[ZoneRecord]) -> FlowSummary {
    let names: HashMap<&str, &str> = zones.iter().map(|z| (z.id.as_str(), z.name.as_str())).collect();
    let name_of = |id: &str| names.get(id).copied().unwrap_or(id).to_string();
    let max_count = flows.iter().map(|f| f.count).max().unwrap_or(0);

    let mut sorted: Vec<&FlowRecord> = flows.iter().collect();
    sorted.sort_by(|a, b| b.count.cmp(&a.count));

    let rows = sorted
        .into_iter()
        .map(|flow| FlowRow {
            source: flow.source.clone(),
            source_name: name_of(&flow.source),
            target: flow.target.clone(),
            target_name: name_of(&flow.target),
            count: flow.count,
            percent_of_max: if max_count == 0 {
                0.0
            } else {
                flow.count as f64 / max_count as f64 * 100.0
            },
        })
        .collect();

    FlowSummary {
        rows,
        total: flows.iter().map(|f| f.count).sum(),
    }
}
