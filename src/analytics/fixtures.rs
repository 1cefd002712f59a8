// Sample floor used by the dashboard and the tester when no zone file is
// supplied. The values are fixed so every render of the sample is identical.

use crate::analytics::flows::FlowRecord;
use crate::core_modules::zone::{Point, ZoneRecord};

fn zone(id: &str, name: &str, polygon: [Point; 4], density: f64, dwell: u64, footfall: u64, area: f64) -> ZoneRecord {
    ZoneRecord {
        id: id.to_string(),
        name: name.to_string(),
        polygon: polygon.to_vec(),
        current_density: density,
        avg_dwell_time: dwell,
        total_footfall: footfall,
        area,
    }
}

/// The five zones of the sample floor, in drawing order.
pub fn sample_zones() -> Vec<ZoneRecord> {
    vec![
        zone("zone-1", "Main Entrance", [(10.0, 10.0), (100.0, 10.0), (100.0, 80.0), (10.0, 80.0)], 0.8, 45, 1250, 90.0),
        zone("zone-2", "Food Court", [(120.0, 10.0), (250.0, 10.0), (250.0, 120.0), (120.0, 120.0)], 1.2, 1800, 890, 130.0),
        zone("zone-3", "Retail Area A", [(10.0, 100.0), (100.0, 100.0), (100.0, 200.0), (10.0, 200.0)], 0.5, 600, 650, 90.0),
        zone("zone-4", "Event Space", [(120.0, 140.0), (300.0, 140.0), (300.0, 250.0), (120.0, 250.0)], 2.1, 2400, 1500, 180.0),
        zone("zone-5", "Restrooms", [(310.0, 10.0), (380.0, 10.0), (380.0, 60.0), (310.0, 60.0)], 0.3, 180, 420, 50.0),
    ]
}

/// Observed movements between the sample zones.
pub fn sample_flows() -> Vec<FlowRecord> {
    [
        ("zone-1", "zone-2", 450),
        ("zone-1", "zone-3", 320),
        ("zone-2", "zone-4", 280),
        ("zone-3", "zone-2", 190),
        ("zone-4", "zone-2", 210),
        ("zone-1", "zone-5", 150),
        ("zone-5", "zone-2", 120),
    ]
    .into_iter()
    .map(|(source, target, count)| FlowRecord::new(source, target, count))
    .collect()
}
