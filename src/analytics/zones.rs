// THEORY:
// Zone performance ranking. The table on the dashboard sorts zones by one of
// three metrics, highest first, and tags each zone with a density level that
// uses the same strict thresholds as the heatmap outline (so a zone with an
// amber outline reads "Moderate" in the table too).

use crate::core_modules::polygon_renderer::{ALERT_THRESHOLD, WARNING_THRESHOLD};
use crate::core_modules::zone::ZoneRecord;
use std::str::FromStr;
use thiserror::Error;

/// Metric used to rank zones, descending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum SortKey {
    #[default]
    TotalFootfall,
    Density,
    DwellTime,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown sort key `{0}` (expected totalFootfall, density or dwellTime)")]
pub struct ParseSortKeyError(pub String);

impl FromStr for SortKey {
    type Err = ParseSortKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "totalFootfall" => Ok(SortKey::TotalFootfall),
            "density" => Ok(SortKey::Density),
            "dwellTime" => Ok(SortKey::DwellTime),
            other => Err(ParseSortKeyError(other.to_string())),
        }
    }
}

impl SortKey {
    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::TotalFootfall => "totalFootfall",
            SortKey::Density => "density",
            SortKey::DwellTime => "dwellTime",
        }
    }
}

/// Sorts zones by `key`, highest first. Ties keep their input order.
pub fn rank_zones(mut zones: Vec<ZoneRecord>, key: SortKey) -> Vec<ZoneRecord> {
    match key {
        SortKey::TotalFootfall => zones.sort_by(|a, b| b.total_footfall.cmp(&a.total_footfall)),
        SortKey::Density => zones.sort_by(|a, b| b.current_density.total_cmp(&a.current_density)),
        SortKey::DwellTime => zones.sort_by(|a, b| b.avg_dwell_time.cmp(&a.avg_dwell_time)),
    }
    zones
}

/// Occupancy tag shown next to each zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum DensityLevel {
    High,
    Moderate,
    Low,
}

impl DensityLevel {
    pub fn from_density(density: f64) -> Self {
        if density > ALERT_THRESHOLD {
            DensityLevel::High
        } else if density > WARNING_THRESHOLD {
            DensityLevel::Moderate
        } else {
            DensityLevel::Low
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DensityLevel::High => "High Density",
            DensityLevel::Moderate => "Moderate",
            DensityLevel::Low => "Low Density",
        }
    }
}

/// Width of the density bar in percent; 2.5 persons/m² fills the bar.
pub fn density_bar_percent(density: f64) -> f64 {
    (density * 40.0).min(100.0)
}

/// Human dwell time: `45s`, `30m`, `1h 5m`.
pub fn format_dwell_time(seconds: u64) -> String {
    if seconds < 60 {
        format!("{seconds}s")
    } else if seconds < 3600 {
        format!("{}m", seconds / 60)
    } else {
        format!("{}h {}m", seconds / 3600, (seconds % 3600) / 60)
    }
}

/// One row of the zone performance table.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ZoneRow {
    /// 1-based position after ranking.
    pub rank: usize,
    pub zone_id: String,
    pub name: String,
    pub density: f64,
    pub level: DensityLevel,
    pub level_label: String,
    pub density_bar_percent: f64,
    pub dwell_time: String,
    pub total_footfall: u64,
}

/// Ranks zones and formats them for the performance table.
pub fn zone_table(zones: Vec<ZoneRecord>, key: SortKey) -> Vec<ZoneRow> {
    rank_zones(zones, key)
        .into_iter()
        .enumerate()
        .map(|(index, zone)| {
            let level = DensityLevel::from_density(zone.current_density);
            ZoneRow {
                rank: index + 1,
                level,
                level_label: level.label().to_string(),
                density_bar_percent: density_bar_percent(zone.current_density),
                dwell_time: format_dwell_time(zone.avg_dwell_time),
                density: zone.current_density,
                total_footfall: zone.total_footfall,
                zone_id: zone.id,
                name: zone.name,
            }
        })
        .collect()
}
