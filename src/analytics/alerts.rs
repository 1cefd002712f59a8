// THEORY:
// Safety alerts are derived, not stored: every zone whose density is above the
// alert outline threshold raises one congestion alert, graded `high` above
// 2 persons/m² and `medium` otherwise. The caller supplies the timestamp so
// the derivation itself stays deterministic.

use crate::core_modules::polygon_renderer::{ALERT_THRESHOLD, to_fixed_1};
use crate::core_modules::zone::ZoneRecord;

/// Densities strictly above this raise a `high` severity alert.
pub const HIGH_SEVERITY_THRESHOLD: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum AlertKind {
    Congestion,
    Queue,
}

impl AlertKind {
    pub fn title(self) -> &'static str {
        match self {
            AlertKind::Congestion => "Congestion Alert",
            AlertKind::Queue => "Queue Alert",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Severity {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Alert {
    pub id: String,
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind: AlertKind,
    pub zone_id: String,
    pub zone_name: String,
    /// Milliseconds since the Unix epoch.
    pub timestamp: u64,
    pub message: String,
    pub severity: Severity,
}

/// Raises one congestion alert per overcrowded zone, in zone order.
pub fn derive_alerts(zones: &[ZoneRecord], timestamp: u64) -> Vec<Alert> {
    zones
        .iter()
        .filter(|zone| zone.current_density > ALERT_THRESHOLD)
        .map(|zone| Alert {
            id: format!("alert-{}", zone.id),
            kind: AlertKind::Congestion,
            zone_id: zone.id.clone(),
            zone_name: zone.name.clone(),
            timestamp,
            message: format!(
                "High density detected in {}: {} persons/m²",
                zone.name,
                to_fixed_1(zone.current_density)
            ),
            severity: if zone.current_density > HIGH_SEVERITY_THRESHOLD {
                Severity::High
            } else {
                Severity::Medium
            },
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct AlertSummary {
    pub total_alerts: usize,
    /// Alerts at `high` severity.
    pub active_alerts: usize,
}

pub fn summarize_alerts(alerts: &[Alert]) -> AlertSummary {
    AlertSummary {
        total_alerts: alerts.len(),
        active_alerts: alerts.iter().filter(|a| a.severity == Severity::High).count(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::fixtures::sample_zones;

    #[test]
    fn sample_floor_raises_event_space_alert() {
        let alerts = derive_alerts(&sample_zones(), 1_700_000_000_000);
        assert_eq!(alerts.len(), 1);
        let alert = &alerts[0];
        assert_eq!(alert.id, "alert-zone-4");
        assert_eq!(alert.kind, AlertKind::Congestion);
        assert_eq!(alert.severity, Severity::High);
        assert_eq!(alert.message, "High density detected in Event Space: 2.1 persons/m²");
        assert_eq!(alert.timestamp, 1_700_000_000_000);
    }

    #[test]
    fn severity_grades_on_strict_thresholds() {
        let zone = |density| ZoneRecord::new("z", "Z", vec![(0.0, 0.0)], density);
        assert!(derive_alerts(&[zone(1.5)], 0).is_empty());
        assert_eq!(derive_alerts(&[zone(1.6)], 0)[0].severity, Severity::Medium);
        assert_eq!(derive_alerts(&[zone(2.0)], 0)[0].severity, Severity::Medium);
        assert_eq!(derive_alerts(&[zone(2.01)], 0)[0].severity, Severity::High);
    }

    #[test]
    fn message_density_rounds_ties_up() {
        let zone = ZoneRecord::new("z", "Atrium", vec![(0.0, 0.0)], 2.25);
        assert_eq!(derive_alerts(&[zone], 0)[0].message, "High density detected in Atrium: 2.3 persons/m²");
    }

    #[test]
    fn summary_counts_high_severity_as_active() {
        let zones = vec![
            ZoneRecord::new("a", "A", vec![(0.0, 0.0)], 1.7),
            ZoneRecord::new("b", "B", vec![(0.0, 0.0)], 2.4),
            ZoneRecord::new("c", "C", vec![(0.0, 0.0)], 0.2),
        ];
        let summary = summarize_alerts(&derive_alerts(&zones, 0));
        assert_eq!(summary, AlertSummary { total_alerts: 2, active_alerts: 1 });
    }

    #[test]
    fn kind_titles() {
        assert_eq!(AlertKind::Congestion.title(), "Congestion Alert");
        assert_eq!(AlertKind::Queue.title(), "Queue Alert");
    }
}
