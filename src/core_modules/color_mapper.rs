// THEORY:
// The density color mapper is the thermal ramp of the heatmap. It turns a
// single density scalar into a fill color, with no knowledge of the zone the
// density came from, its neighbours or any previous render.
//
// Key architectural principles:
// 1.  **Four half-open bands**: the ramp is split at 0.5, 1.0 and 1.5
//     persons/m². Each band `[lo, hi)` computes its own interpolation ratio
//     and blends toward the next landmark color (blue, green-yellow, orange,
//     red). The top band is open-ended and saturates at density 2.5.
// 2.  **Continuity**: at every threshold the band below ends exactly where the
//     band above begins, so color and alpha never jump across a boundary.
// 3.  **Totality over the valid domain**: every non-negative density yields
//     exactly one color. Negative and NaN densities are rejected rather than
//     clamped, so bad upstream data stays visible.
// 4.  **Clamped output**: the final color goes through `Color::new`, which
//     clamps channels and alpha regardless of floating-point drift.

use crate::core_modules::color::Color;
use crate::core_modules::error::{HeatmapError, Result};

pub const LOW_BAND_LIMIT: f64 = 0.5;
pub const MEDIUM_BAND_LIMIT: f64 = 1.0;
pub const HIGH_BAND_LIMIT: f64 = 1.5;
/// Density at which the critical band stops getting redder.
pub const SATURATION_DENSITY: f64 = 2.5;

/// One segment of the thermal ramp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum DensityBand {
    /// `[0, 0.5)`: fixed blue, fading in.
    Low,
    /// `[0.5, 1.0)`: blue toward yellow-green.
    Medium,
    /// `[1.0, 1.5)`: yellow toward orange.
    High,
    /// `[1.5, ∞)`: orange toward red, saturating at 2.5.
    Critical,
}

impl DensityBand {
    pub const ALL: [DensityBand; 4] = [
        DensityBand::Low,
        DensityBand::Medium,
        DensityBand::High,
        DensityBand::Critical,
    ];

    /// Finds the band a density falls into.
    pub fn classify(density: f64) -> Result<Self> {
        validate_density(density)?;
        Ok(if density < LOW_BAND_LIMIT {
            DensityBand::Low
        } else if density < MEDIUM_BAND_LIMIT {
            DensityBand::Medium
        } else if density < HIGH_BAND_LIMIT {
            DensityBand::High
        } else {
            DensityBand::Critical
        })
    }

    /// Inclusive lower bound of the band.
    pub fn lower_bound(self) -> f64 {
        match self {
            DensityBand::Low => 0.0,
            DensityBand::Medium => LOW_BAND_LIMIT,
            DensityBand::High => MEDIUM_BAND_LIMIT,
            DensityBand::Critical => HIGH_BAND_LIMIT,
        }
    }

    /// Exclusive upper bound, `None` for the open-ended critical band.
    pub fn upper_bound(self) -> Option<f64> {
        match self {
            DensityBand::Low => Some(LOW_BAND_LIMIT),
            DensityBand::Medium => Some(MEDIUM_BAND_LIMIT),
            DensityBand::High => Some(HIGH_BAND_LIMIT),
            DensityBand::Critical => None,
        }
    }

    /// Position of `density` inside the band, in `[0, 1]`.
    pub fn ratio(self, density: f64) -> f64 {
        match self {
            DensityBand::Critical => ((density - HIGH_BAND_LIMIT) / (SATURATION_DENSITY - HIGH_BAND_LIMIT)).min(1.0),
            band => (density - band.lower_bound()) / 0.5,
        }
    }

    /// Legend caption.
    pub fn label(self) -> &'static str {
        match self {
            DensityBand::Low => "Low (0-0.5)",
            DensityBand::Medium => "Medium (0.5-1.0)",
            DensityBand::High => "High (1.0-1.5)",
            DensityBand::Critical => "Critical (1.5+)",
        }
    }

    /// Representative legend swatch. These are palette colors, not ramp
    /// samples.
    pub fn swatch(self) -> Color {
        match self {
            DensityBand::Low => Color::rgb8(0x3b, 0x82, 0xf6),
            DensityBand::Medium => Color::rgb8(0xea, 0xb3, 0x08),
            DensityBand::High => Color::rgb8(0xf9, 0x73, 0x16),
            DensityBand::Critical => Color::rgb8(0xef, 0x44, 0x44),
        }
    }

    fn color_at(self, r: f64) -> Color {
        match self {
            DensityBand::Low => Color::new(59.0, 130.0, 246.0, 0.3 + r * 0.2),
            DensityBand::Medium => Color::new(59.0 + r * 196.0, 130.0 + r * 70.0, 246.0 - r * 146.0, 0.5 + r * 0.2),
            DensityBand::High => Color::new(255.0, 200.0 - r * 55.0, 100.0 - r * 100.0, 0.7 + r * 0.1),
            DensityBand::Critical => Color::new(255.0, 145.0 - r * 145.0, 0.0, 0.8 + r * 0.2),
        }
    }
}

/// Maps a density (persons/m²) onto the heatmap's thermal ramp.
///
/// Returns `InvalidDensity` for negative or NaN input. `+∞` is accepted and
/// saturates like any density at or above 2.5.
pub fn map_density_to_color(density: f64) -> Result<Color> {
    let band = DensityBand::classify(density)?;
    Ok(band.color_at(band.ratio(density)))
}

fn validate_density(density: f64) -> Result<()> {
    if density.is_nan() || density < 0.0 {
        return Err(HeatmapError::InvalidDensity { zone_id: None, density });
    }
    Ok(())
}

/// One row of the heatmap legend.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct LegendEntry {
    pub band: DensityBand,
    pub label: String,
    pub lower_bound: f64,
    pub upper_bound: Option<f64>,
    /// `#rrggbb` swatch for the legend chip.
    pub swatch: String,
}

/// The legend shown next to the heatmap, lowest band first.
pub fn legend() -> Vec<LegendEntry> {
    DensityBand::ALL
        .iter()
        .map(|&band| LegendEntry {
            band,
            label: band.label().to_string(),
            lower_bound: band.lower_bound(),
            upper_bound: band.upper_bound(),
            swatch: band.swatch().to_hex(),
        })
        .collect()
}
