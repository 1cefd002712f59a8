// THEORY:
// The polygon renderer turns one zone into one drawing instruction. It does
// not draw anything itself; it describes, as plain data, what a 2D drawing
// surface should do: fill the closed outline, stroke it, then place two
// centered text labels on top.
//
// Key architectural principles:
// 1.  **Fill and stroke are independent scales**: the fill comes from the
//     density ramp, the stroke from three alert levels with strict
//     thresholds (> 1.5 alert, > 0.8 warning). The two scales deliberately
//     disagree between 0.8 and 1.0, where an amber outline surrounds a fill
//     that is still blue-green.
// 2.  **Vertex-average centroid**: labels are anchored at the arithmetic mean
//     of the vertices, not the area-weighted centroid. For the near
//     rectangular zones of a floor plan the two agree; for irregular shapes
//     they do not, and the vertex average is kept for visual parity.
// 3.  **Degenerate shapes are allowed**: one or two vertices produce a path
//     with no area and a well-defined centroid. Only an empty (or
//     non-finite) outline is rejected.

use crate::core_modules::color::Color;
use crate::core_modules::error::{HeatmapError, Result};
use crate::core_modules::zone::Point;

/// Densities strictly above this get the alert stroke.
pub const ALERT_THRESHOLD: f64 = 1.5;
/// Densities strictly above this (and not above the alert threshold) get the warning stroke.
pub const WARNING_THRESHOLD: f64 = 0.8;
pub const STROKE_WIDTH: f64 = 2.0;
/// Vertical offset of the name label from the centroid (negative is up).
pub const NAME_LABEL_OFFSET: f64 = -5.0;
/// Vertical offset of the density label from the centroid.
pub const DENSITY_LABEL_OFFSET: f64 = 10.0;
pub const LABEL_FONT_FAMILY: &str = "Inter, sans-serif";

/// Outline color tier, chosen from density alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum StrokeLevel {
    Alert,
    Warning,
    Neutral,
}

impl StrokeLevel {
    pub fn for_density(density: f64) -> Self {
        if density > ALERT_THRESHOLD {
            StrokeLevel::Alert
        } else if density > WARNING_THRESHOLD {
            StrokeLevel::Warning
        } else {
            StrokeLevel::Neutral
        }
    }

    pub fn color(self) -> Color {
        match self {
            StrokeLevel::Alert => Color::rgb8(0xef, 0x44, 0x44),
            StrokeLevel::Warning => Color::rgb8(0xf5, 0x9e, 0x0b),
            StrokeLevel::Neutral => Color::rgb8(0x3b, 0x82, 0xf6),
        }
    }
}

/// Font of a text label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct LabelFont {
    pub size_px: u32,
    pub bold: bool,
}

impl LabelFont {
    pub const NAME: LabelFont = LabelFont { size_px: 12, bold: true };
    pub const DENSITY: LabelFont = LabelFont { size_px: 10, bold: false };

    /// CSS font shorthand, e.g. `bold 12px Inter, sans-serif`.
    pub fn css(&self) -> String {
        let weight = if self.bold { "bold " } else { "" };
        format!("{weight}{}px {LABEL_FONT_FAMILY}", self.size_px)
    }
}

/// A text label, horizontally centered on `position`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TextLabel {
    pub text: String,
    pub position: Point,
    pub font: LabelFont,
    pub color: Color,
}

/// Everything a drawing surface needs to paint one zone: fill, then stroke,
/// then the two labels.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct RenderInstruction {
    pub zone_id: String,
    pub fill: Color,
    pub stroke: Color,
    pub stroke_level: StrokeLevel,
    pub stroke_width: f64,
    /// Closed outline; the surface joins the last vertex back to the first.
    pub path: Vec<Point>,
    /// Vertex-average label anchor.
    pub centroid: Point,
    pub name_label: TextLabel,
    pub density_label: TextLabel,
}

impl RenderInstruction {
    /// True when the path encloses no area (fewer than three vertices).
    pub fn is_degenerate(&self) -> bool {
        self.path.len() < 3
    }
}

/// Arithmetic mean of the vertex coordinates.
pub fn centroid(polygon: &[Point]) -> Result<Point> {
    if polygon.is_empty() {
        return Err(HeatmapError::InvalidGeometry {
            zone_id: None,
            reason: "polygon has no vertices",
        });
    }
    if polygon.iter().any(|(x, y)| !x.is_finite() || !y.is_finite()) {
        return Err(HeatmapError::InvalidGeometry {
            zone_id: None,
            reason: "polygon has a non-finite vertex",
        });
    }
    let count = polygon.len() as f64;
    let sum_x: f64 = polygon.iter().map(|p| p.0).sum();
    let sum_y: f64 = polygon.iter().map(|p| p.1).sum();
    Ok((sum_x / count, sum_y / count))
}

/// One-decimal rendering of `value` in the dashboard's number style: the
/// exact binary value is rounded, exact ties go to the larger magnitude and
/// `-0` prints as `0.0`.
pub fn to_fixed_1(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    let sign = if value < 0.0 { "-" } else { "" };
    let magnitude = value.abs();

    // A tie at one decimal is an odd number of quarters; scaling by 4 is exact.
    let quarters = magnitude * 4.0;
    if quarters.fract() == 0.0 && quarters % 2.0 == 1.0 {
        let tenths = (5 * quarters as u128 + 1) / 2;
        return format!("{sign}{}.{}", tenths / 10, tenths % 10);
    }
    format!("{sign}{magnitude:.1}")
}

/// Density caption drawn under the zone name, e.g. `0.8 p/m²`.
pub fn format_density(density: f64) -> String {
    format!("{} p/m²", to_fixed_1(density))
}

/// Builds the drawing instruction for one zone.
///
/// `fill` is normally the output of `map_density_to_color` for the same
/// density; the renderer does not recompute it.
pub fn render_zone(zone_id: &str, name: &str, polygon: &[Point], density: f64, fill: Color) -> Result<RenderInstruction> {
    let (cx, cy) = centroid(polygon).map_err(|e| e.with_zone(zone_id))?;
    let stroke_level = StrokeLevel::for_density(density);

    Ok(RenderInstruction {
        zone_id: zone_id.to_string(),
        fill,
        stroke: stroke_level.color(),
        stroke_level,
        stroke_width: STROKE_WIDTH,
        path: polygon.to_vec(),
        centroid: (cx, cy),
        name_label: TextLabel {
            text: name.to_string(),
            position: (cx, cy + NAME_LABEL_OFFSET),
            font: LabelFont::NAME,
            color: Color::WHITE,
        },
        density_label: TextLabel {
            text: format_density(density),
            position: (cx, cy + DENSITY_LABEL_OFFSET),
            font: LabelFont::DENSITY,
            color: Color::WHITE,
        },
    })
}
