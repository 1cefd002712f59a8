// THEORY:
// The heatmap core is a set of pure functions, so the only failures it knows
// about are precondition violations on its inputs: a polygon that cannot
// anchor a label, or a density outside the ramp's domain. They are surfaced
// to the caller unchanged; no zone is ever silently repainted with a
// placeholder color.
//
// The two remaining variants belong to the PNG helpers in `raster`, which
// are the only I/O in the crate.

use thiserror::Error;

/// Errors produced while building or encoding a heatmap.
#[derive(Debug, Error)]
pub enum HeatmapError {
    /// The zone polygon cannot produce a centroid (no vertices, or a
    /// non-finite coordinate).
    #[error("invalid geometry for zone {}: {reason}", .zone_id.as_deref().unwrap_or("<unnamed>"))]
    InvalidGeometry {
        zone_id: Option<String>,
        reason: &'static str,
    },

    /// The density is negative or NaN and has no place on the color ramp.
    #[error("invalid density {density} for zone {}", .zone_id.as_deref().unwrap_or("<unnamed>"))]
    InvalidDensity { zone_id: Option<String>, density: f64 },

    #[error("failed to encode heatmap image: {0}")]
    Image(#[from] image::ImageError),

    #[error("failed to write heatmap output: {0}")]
    Io(#[from] std::io::Error),
}

impl HeatmapError {
    /// Attaches the offending zone id to a validation error that was raised
    /// without one. Other variants pass through untouched.
    pub fn with_zone(self, id: &str) -> Self {
        match self {
            HeatmapError::InvalidGeometry { zone_id: None, reason } => HeatmapError::InvalidGeometry {
                zone_id: Some(id.to_string()),
                reason,
            },
            HeatmapError::InvalidDensity { zone_id: None, density } => HeatmapError::InvalidDensity {
                zone_id: Some(id.to_string()),
                density,
            },
            other => other,
        }
    }

    /// The zone this error refers to, when known.
    pub fn zone_id(&self) -> Option<&str> {
        match self {
            HeatmapError::InvalidGeometry { zone_id, .. } | HeatmapError::InvalidDensity { zone_id, .. } => {
                zone_id.as_deref()
            }
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, HeatmapError>;
