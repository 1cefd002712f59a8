// THEORY:
// The `heatmap` module is the top-level API of the core. It walks an ordered
// zone sequence and turns each zone into a `RenderInstruction` by running
// the color mapper and then the polygon renderer.
//
// The orchestrator is a pure function: no caching, no state between calls,
// output order equals input order (which is also the z-order on the canvas;
// later zones paint over earlier ones). The first invalid zone aborts the
// render and its error is returned with the zone id attached. An empty zone
// sequence is a valid "nothing to draw" state and yields an empty plan.

use crate::core_modules::color_mapper::map_density_to_color;
use crate::core_modules::error::Result;
use crate::core_modules::polygon_renderer::{RenderInstruction, render_zone};
use crate::core_modules::zone::ZoneRecord;

/// Largest accepted canvas side, in pixels.
pub const MAX_CANVAS_SIDE: u32 = 8192;

/// Drawing surface size used by the dashboard canvas and the rasterizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HeatmapCanvas {
    pub width: u32,
    pub height: u32,
}

impl Default for HeatmapCanvas {
    fn default() -> Self {
        Self { width: 400, height: 300 }
    }
}

impl HeatmapCanvas {
    /// Parses `WIDTHxHEIGHT`, e.g. `800x600`. Sides must be in
    /// `1..=MAX_CANVAS_SIDE`.
    pub fn parse(raw: &str) -> Option<Self> {
        let (w, h) = raw.trim().split_once(['x', 'X'])?;
        let width = w.trim().parse::<u32>().ok()?;
        let height = h.trim().parse::<u32>().ok()?;
        (Self::is_valid_side(width) && Self::is_valid_side(height)).then_some(Self { width, height })
    }

    pub fn is_valid_side(side: u32) -> bool {
        (1..=MAX_CANVAS_SIDE).contains(&side)
    }

    /// Clamps both sides into `1..=MAX_CANVAS_SIDE`.
    pub fn clamped(width: u32, height: u32) -> Self {
        Self {
            width: width.clamp(1, MAX_CANVAS_SIDE),
            height: height.clamp(1, MAX_CANVAS_SIDE),
        }
    }
}

/// Renders one zone record.
pub fn render_zone_record(zone: &ZoneRecord) -> Result<RenderInstruction> {
    let fill = map_density_to_color(zone.current_density).map_err(|e| e.with_zone(&zone.id))?;
    render_zone(&zone.id, &zone.name, &zone.polygon, zone.current_density, fill)
}

/// Builds the rendering plan for a zone sequence, one instruction per zone in
/// input order.
pub fn render_heatmap(zones: &[ZoneRecord]) -> Result<Vec<RenderInstruction>> {
    let plan = zones
        .iter()
        .map(|zone| {
            render_zone_record(zone).inspect_err(|e| log::warn!("heatmap rejected zone: {e}"))
        })
        .collect::<Result<Vec<_>>>()?;
    log::debug!("rendered heatmap plan with {} zone(s)", plan.len());
    Ok(plan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::fixtures::sample_zones;
    use crate::core_modules::error::HeatmapError;
    use crate::core_modules::polygon_renderer::StrokeLevel;

    #[test]
    fn empty_input_renders_empty_plan() {
        assert!(render_heatmap(&[]).unwrap().is_empty());
    }

    #[test]
    fn plan_preserves_input_order() {
        let zones = sample_zones();
        let plan = render_heatmap(&zones).unwrap();
        let ids: Vec<_> = plan.iter().map(|i| i.zone_id.as_str()).collect();
        let expected: Vec<_> = zones.iter().map(|z| z.id.as_str()).collect();
        assert_eq!(ids, expected);

        let mut reversed = zones.clone();
        reversed.reverse();
        let reversed_plan = render_heatmap(&reversed).unwrap();
        assert_eq!(reversed_plan.first(), plan.last());
    }

    #[test]
    fn rendering_is_idempotent() {
        let zones = sample_zones();
        assert_eq!(render_heatmap(&zones).unwrap(), render_heatmap(&zones).unwrap());
    }

    #[test]
    fn main_entrance_scenario() {
        let zones = sample_zones();
        let plan = render_heatmap(&zones).unwrap();
        let entrance = &plan[0];
        assert_eq!(entrance.zone_id, "zone-1");
        assert_eq!(entrance.fill.to_css(), "rgba(177, 172, 158, 0.62)");
        assert_eq!(entrance.stroke_level, StrokeLevel::Neutral);
        assert_eq!(entrance.name_label.position, (55.0, 40.0));
        assert_eq!(entrance.density_label.position, (55.0, 55.0));
    }

    #[test]
    fn event_space_is_stroked_as_alert() {
        let plan = render_heatmap(&sample_zones()).unwrap();
        let event_space = plan.iter().find(|i| i.zone_id == "zone-4").unwrap();
        assert_eq!(event_space.stroke_level, StrokeLevel::Alert);
        assert_eq!(event_space.density_label.text, "2.1 p/m²");
    }

    #[test]
    fn invalid_zone_aborts_with_its_id() {
        let mut zones = sample_zones();
        zones[2].polygon.clear();
        let err = render_heatmap(&zones).unwrap_err();
        assert!(matches!(err, HeatmapError::InvalidGeometry { .. }));
        assert_eq!(err.zone_id(), Some("zone-3"));

        let mut zones = sample_zones();
        zones[1].current_density = -0.2;
        let err = render_heatmap(&zones).unwrap_err();
        assert!(matches!(err, HeatmapError::InvalidDensity { .. }));
        assert_eq!(err.zone_id(), Some("zone-2"));
    }

    #[test]
    fn oversized_canvas_is_clamped() {
        assert_eq!(
            HeatmapCanvas::clamped(70_000, 0),
            HeatmapCanvas { width: MAX_CANVAS_SIDE, height: 1 }
        );
    }

    #[test]
    fn canvas_spec_parsing() {
        assert_eq!(HeatmapCanvas::parse("800x600"), Some(HeatmapCanvas { width: 800, height: 600 }));
        assert_eq!(HeatmapCanvas::parse(" 640 X 480 "), Some(HeatmapCanvas { width: 640, height: 480 }));
        assert_eq!(HeatmapCanvas::parse("0x10"), None);
        assert_eq!(HeatmapCanvas::parse("wide"), None);
        assert_eq!(HeatmapCanvas::parse("8192x8192"), Some(HeatmapCanvas { width: 8192, height: 8192 }));
        assert_eq!(HeatmapCanvas::parse("8193x10"), None);
        assert_eq!(HeatmapCanvas::parse("65536x65536"), None);
        assert_eq!(HeatmapCanvas::default(), HeatmapCanvas { width: 400, height: 300 });
    }
}
