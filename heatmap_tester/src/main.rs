use anyhow::Context;
use clap::Parser;
use std::path::{Path, PathBuf};
use zone_heatmap::analytics::fixtures::sample_zones;
use zone_heatmap::raster::{rasterize, save_png};
use zone_heatmap::{HeatmapCanvas, MAX_CANVAS_SIDE, RenderInstruction, ZoneRecord, render_heatmap};

/// Renders a zone file (or the sample floor) to a PNG and/or a JSON render plan.
#[derive(Debug, Parser)]
#[command(name = "heatmap_tester")]
struct Args {
    /// JSON array of zone records; the sample floor is used when omitted
    #[arg(long)]
    zones: Option<PathBuf>,
    /// Write the rasterized heatmap here
    #[arg(long)]
    png: Option<PathBuf>,
    /// Write the render plan as pretty JSON here
    #[arg(long)]
    plan: Option<PathBuf>,
    #[arg(long, default_value_t = 400)]
    width: u32,
    #[arg(long, default_value_t = 300)]
    height: u32,
}

impl Args {
    fn canvas(&self) -> anyhow::Result<HeatmapCanvas> {
        if !HeatmapCanvas::is_valid_side(self.width) || !HeatmapCanvas::is_valid_side(self.height) {
            anyhow::bail!(
                "canvas sides must be within 1..={MAX_CANVAS_SIDE}, got {}x{}",
                self.width,
                self.height
            );
        }
        Ok(HeatmapCanvas {
            width: self.width,
            height: self.height,
        })
    }
}

fn load_zones(path: Option<&Path>) -> anyhow::Result<Vec<ZoneRecord>> {
    let Some(path) = path else {
        log::info!("no zone file given, using the sample floor");
        return Ok(sample_zones());
    };
    let content = std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
}

fn run(args: &Args) -> anyhow::Result<Vec<RenderInstruction>> {
    let canvas = args.canvas()?;
    let zones = load_zones(args.zones.as_deref())?;
    let plan = render_heatmap(&zones)?;

    for ins in &plan {
        log::info!(
            "{:<10} {:<16} {:>10} stroke={:?} fill={}",
            ins.zone_id,
            ins.name_label.text,
            ins.density_label.text,
            ins.stroke_level,
            ins.fill.to_css()
        );
    }

    if let Some(out) = &args.plan {
        let json = serde_json::to_string_pretty(&plan)?;
        std::fs::write(out, json).with_context(|| format!("failed to write {}", out.display()))?;
        log::info!("wrote render plan to {}", out.display());
    }
    if let Some(out) = &args.png {
        save_png(&rasterize(&plan, canvas), out)?;
        log::info!("wrote {}x{} heatmap to {}", canvas.width, canvas.height, out.display());
    }
    Ok(plan)
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    let plan = run(&args)?;
    println!("rendered {} zone(s)", plan.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_sample_floor_and_canvas() {
        let args = Args::try_parse_from(["heatmap_tester"]).unwrap();
        assert!(args.zones.is_none());
        assert_eq!(args.canvas().unwrap(), HeatmapCanvas::default());
    }

    #[test]
    fn parses_all_flags() {
        let args = Args::try_parse_from([
            "heatmap_tester",
            "--zones",
            "floor.json",
            "--png",
            "out.png",
            "--plan",
            "plan.json",
            "--width",
            "800",
            "--height",
            "600",
        ])
        .unwrap();
        assert_eq!(args.zones, Some(PathBuf::from("floor.json")));
        assert_eq!(args.png, Some(PathBuf::from("out.png")));
        assert_eq!(args.plan, Some(PathBuf::from("plan.json")));
        assert_eq!(args.canvas().unwrap(), HeatmapCanvas { width: 800, height: 600 });
    }

    #[test]
    fn rejects_bad_width_and_zero_canvas() {
        assert!(Args::try_parse_from(["heatmap_tester", "--width", "wide"]).is_err());
        let args = Args::try_parse_from(["heatmap_tester", "--height", "0"]).unwrap();
        assert!(args.canvas().is_err());
    }

    #[test]
    fn rejects_oversized_canvas() {
        let args = Args::try_parse_from(["heatmap_tester", "--width", "65536", "--height", "65536"]).unwrap();
        assert!(args.canvas().is_err());
        let args = Args::try_parse_from(["heatmap_tester", "--width", "8192"]).unwrap();
        assert_eq!(args.canvas().unwrap().width, 8192);
    }

    #[test]
    fn writes_png_and_plan() {
        let dir = tempfile::tempdir().unwrap();
        let png = dir.path().join("heatmap.png");
        let plan_path = dir.path().join("plan.json");
        let args = Args::try_parse_from([
            "heatmap_tester".into(),
            "--png".into(),
            png.clone().into_os_string(),
            "--plan".into(),
            plan_path.clone().into_os_string(),
        ])
        .unwrap();

        let plan = run(&args).unwrap();
        assert_eq!(plan.len(), 5);

        let bytes = std::fs::read(&png).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
        let written: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&plan_path).unwrap()).unwrap();
        assert_eq!(written.as_array().unwrap().len(), 5);
        assert_eq!(written[0]["zoneId"], "zone-1");
    }

    #[test]
    fn invalid_zone_file_reports_zone() {
        let dir = tempfile::tempdir().unwrap();
        let zones = dir.path().join("zones.json");
        std::fs::write(&zones, r#"[{"id":"bad","name":"Bad","polygon":[],"currentDensity":1.0}]"#).unwrap();
        let args = Args::try_parse_from(["heatmap_tester".into(), "--zones".into(), zones.into_os_string()]).unwrap();
        let err = run(&args).unwrap_err();
        assert!(err.to_string().contains("bad"), "{err}");
    }
}
