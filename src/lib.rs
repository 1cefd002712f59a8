// THEORY:
// This file is the main entry point for the `zone_heatmap` library crate.
// It exposes the density heatmap core (color ramp, polygon render plans and
// the orchestrator that ties them together) as a small, synchronous API that
// the dashboard server and the command-line tester both build on.
//
// The crate is layered bottom-up:
// 1.  `core_modules` holds the "dumb" data containers (`ZoneRecord`, `Color`)
//     and the two pure building blocks of the heatmap: the density color
//     mapper and the polygon renderer.
// 2.  `heatmap` is the orchestrator. It walks a zone sequence in order and
//     turns it into a rendering plan, one `RenderInstruction` per zone.
// 3.  `raster` paints a rendering plan into an RGBA image for consumers that
//     cannot draw the plan themselves.
// 4.  `analytics` carries the aggregation helpers of the occupancy dashboard
//     (zone ranking, flows, alerts, footfall) and the sample floor fixtures.
//
// Nothing in this crate performs I/O except the explicit PNG helpers in
// `raster`, and nothing holds state between calls.

pub mod analytics;
pub mod core_modules;
pub mod heatmap;
pub mod raster;

pub use crate::core_modules::color::Color;
pub use crate::core_modules::color_mapper::{DensityBand, LegendEntry, legend, map_density_to_color};
pub use crate::core_modules::error::{HeatmapError, Result};
pub use crate::core_modules::polygon_renderer::{RenderInstruction, StrokeLevel, TextLabel, render_zone};
pub use crate::core_modules::zone::{Point, ZoneRecord};
pub use crate::heatmap::{HeatmapCanvas, MAX_CANVAS_SIDE, render_heatmap};
