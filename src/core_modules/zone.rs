// THEORY:
// `ZoneRecord` is the input boundary of the heatmap core. Like the other data
// containers in this crate it is "dumb": it knows nothing about colors or
// drawing and is never mutated during a render. The heatmap only reads `id`,
// `name`, `polygon` and `current_density`; dwell time, footfall and area ride
// along for the analytics layer.

/// A 2D point in canvas coordinate space, `(x, y)`.
pub type Point = (f64, f64);

/// A monitored region of the floor plan and its current occupancy.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ZoneRecord {
    /// Opaque identifier, unique within one rendering pass.
    pub id: String,
    /// Display label drawn at the zone centroid.
    pub name: String,
    /// Outline of the zone. The path is closed implicitly from the last
    /// vertex back to the first.
    pub polygon: Vec<Point>,
    /// Persons per square metre. Non-negative, unbounded above.
    pub current_density: f64,
    /// Average dwell time in seconds.
    #[cfg_attr(feature = "serde", serde(default))]
    pub avg_dwell_time: u64,
    /// Number of visitors counted into the zone.
    #[cfg_attr(feature = "serde", serde(default))]
    pub total_footfall: u64,
    /// Floor area in square metres.
    #[cfg_attr(feature = "serde", serde(default))]
    pub area: f64,
}

impl ZoneRecord {
    /// Builds a record carrying only what the heatmap consumes.
    pub fn new(id: impl Into<String>, name: impl Into<String>, polygon: Vec<Point>, current_density: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            polygon,
            current_density,
            avg_dwell_time: 0,
            total_footfall: 0,
            area: 0.0,
        }
    }
}
