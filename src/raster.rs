// THEORY:
// The rasterizer is a reference drawing surface for rendering plans. It
// paints instructions in order onto a transparent RGBA image so that the
// plan can be shipped as a PNG to consumers that have no canvas of their
// own (the dashboard's `/api/heatmap.png`, the command-line tester).
//
// Per instruction it follows the same order a 2D canvas would:
// 1.  **Fill**: even-odd scanline coverage, sampled at pixel centres.
// 2.  **Stroke**: every edge of the closed path, including the closing edge,
//     widened to the stroke width. A pixel is covered at most once per
//     stroke so corners do not double-blend.
// Both passes blend source-over with straight alpha.
//
// Labels are not rasterized; there is no font stack here. They stay in the
// JSON plan for surfaces that can draw text.

use crate::core_modules::color::Color;
use crate::core_modules::error::Result;
use crate::core_modules::polygon_renderer::RenderInstruction;
use crate::core_modules::zone::Point;
use crate::heatmap::HeatmapCanvas;
use image::{ImageEncoder, Rgba, RgbaImage};
use std::path::Path;

/// Paints a rendering plan onto a fresh transparent image. The canvas is
/// clamped to `MAX_CANVAS_SIDE` per side.
pub fn rasterize(plan: &[RenderInstruction], canvas: HeatmapCanvas) -> RgbaImage {
    let canvas = HeatmapCanvas::clamped(canvas.width, canvas.height);
    let mut image = RgbaImage::new(canvas.width, canvas.height);
    for instruction in plan {
        fill_polygon(&mut image, &instruction.path, instruction.fill);
        stroke_polygon(&mut image, &instruction.path, instruction.stroke_width, instruction.stroke);
    }
    image
}

/// Encodes an image as PNG bytes.
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    let encoder = image::codecs::png::PngEncoder::new(&mut buffer);
    encoder.write_image(image.as_raw(), image.width(), image.height(), image::ExtendedColorType::Rgba8)?;
    Ok(buffer)
}

/// Writes an image to `path` as PNG.
pub fn save_png(image: &RgbaImage, path: impl AsRef<Path>) -> Result<()> {
    let output = std::fs::File::create(path)?;
    let encoder = image::codecs::png::PngEncoder::new(std::io::BufWriter::new(output));
    encoder.write_image(image.as_raw(), image.width(), image.height(), image::ExtendedColorType::Rgba8)?;
    Ok(())
}

fn fill_polygon(image: &mut RgbaImage, path: &[Point], color: Color) {
    if path.len() < 3 {
        return;
    }
    let (width, height) = image.dimensions();
    let mut crossings = Vec::with_capacity(path.len());

    for row in 0..height {
        let sample_y = row as f64 + 0.5;
        crossings.clear();
        for (i, &(x0, y0)) in path.iter().enumerate() {
            let (x1, y1) = path[(i + 1) % path.len()];
            if (y0 <= sample_y) != (y1 <= sample_y) {
                crossings.push(x0 + (sample_y - y0) * (x1 - x0) / (y1 - y0));
            }
        }
        crossings.sort_by(f64::total_cmp);

        for span in crossings.chunks_exact(2) {
            let start = (span[0] - 0.5).ceil().max(0.0) as u32;
            let end = ((span[1] - 0.5).ceil().max(0.0) as u32).min(width);
            for column in start..end {
                blend(image.get_pixel_mut(column, row), color);
            }
        }
    }
}

fn stroke_polygon(image: &mut RgbaImage, path: &[Point], stroke_width: f64, color: Color) {
    if path.is_empty() || stroke_width <= 0.0 {
        return;
    }
    let (width, height) = image.dimensions();
    let half = stroke_width / 2.0;
    let mut covered = vec![false; width as usize * height as usize];

    for (i, &start) in path.iter().enumerate() {
        let end = path[(i + 1) % path.len()];
        let min_x = (start.0.min(end.0) - half).floor().max(0.0) as u32;
        let min_y = (start.1.min(end.1) - half).floor().max(0.0) as u32;
        let max_x = ((start.0.max(end.0) + half).ceil().max(0.0) as u32).min(width);
        let max_y = ((start.1.max(end.1) + half).ceil().max(0.0) as u32).min(height);

        for row in min_y..max_y {
            for column in min_x..max_x {
                let centre = (column as f64 + 0.5, row as f64 + 0.5);
                if distance_to_segment(centre, start, end) <= half {
                    covered[row as usize * width as usize + column as usize] = true;
                }
            }
        }
    }

    for (index, _) in covered.iter().enumerate().filter(|(_, hit)| **hit) {
        let column = (index % width as usize) as u32;
        let row = (index / width as usize) as u32;
        blend(image.get_pixel_mut(column, row), color);
    }
}

fn distance_to_segment(p: Point, a: Point, b: Point) -> f64 {
    let (dx, dy) = (b.0 - a.0, b.1 - a.1);
    let length_sq = dx * dx + dy * dy;
    let t = if length_sq == 0.0 {
        0.0
    } else {
        (((p.0 - a.0) * dx + (p.1 - a.1) * dy) / length_sq).clamp(0.0, 1.0)
    };
    let (nx, ny) = (a.0 + t * dx, a.1 + t * dy);
    ((p.0 - nx).powi(2) + (p.1 - ny).powi(2)).sqrt()
}

/// Source-over compositing of a straight-alpha color onto a pixel.
fn blend(pixel: &mut Rgba<u8>, color: Color) {
    let source_alpha = color.alpha;
    let dest_alpha = pixel[3] as f64 / 255.0;
    let out_alpha = source_alpha + dest_alpha * (1.0 - source_alpha);
    if out_alpha <= 0.0 {
        *pixel = Rgba([0, 0, 0, 0]);
        return;
    }
    let mix = |source: f64, dest: u8| {
        let value = (source * source_alpha + dest as f64 * dest_alpha * (1.0 - source_alpha)) / out_alpha;
        value.round().clamp(0.0, 255.0) as u8
    };
    *pixel = Rgba([
        mix(color.red, pixel[0]),
        mix(color.green, pixel[1]),
        mix(color.blue, pixel[2]),
        (out_alpha * 255.0).round() as u8,
    ]);
}
