//! Dashboard server configuration.
//!
//! Settings come from an optional `dashboard.toml`, then environment
//! variables override individual fields:
//!
//! | Variable | Field |
//! |---|---|
//! | `ZH_BIND` | `bind_addr` |
//! | `ZH_CANVAS` | `canvas_width` / `canvas_height` (`WIDTHxHEIGHT`) |
//! | `ZH_ZONES` | `zones_path` |
//! | `ZH_FLOWS` | `flows_path` |

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use zone_heatmap::{HeatmapCanvas, MAX_CANVAS_SIDE};
use zone_heatmap::analytics::fixtures::{sample_flows, sample_zones};
use zone_heatmap::analytics::flows::FlowRecord;
use zone_heatmap::core_modules::zone::ZoneRecord;

pub const DEFAULT_CONFIG_FILE: &str = "dashboard.toml";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3001";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address the HTTP listener binds to.
    pub bind_addr: String,
    pub canvas_width: u32,
    pub canvas_height: u32,
    /// JSON array of zone records. The sample floor is served when unset.
    pub zones_path: Option<PathBuf>,
    /// JSON array of flow records. The sample flows are served when unset.
    pub flows_path: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        let canvas = HeatmapCanvas::default();
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            canvas_width: canvas.width,
            canvas_height: canvas.height,
            zones_path: None,
            flows_path: None,
        }
    }
}

impl ServerConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).with_context(|| format!("failed to read config file {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("failed to parse config file {}", path.display()))
    }

    /// Loads `path` if it exists, defaults otherwise. A file that exists but
    /// does not parse is still an error.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        if path.as_ref().exists() {
            Self::load_from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Applies overrides from the process environment.
    pub fn merge_with_env(&mut self) {
        self.merge_with_vars(|key| std::env::var(key).ok());
    }

    /// Applies overrides from any key/value source. Empty values are ignored,
    /// as are canvas sizes that do not parse.
    pub fn merge_with_vars(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(bind) = var("ZH_BIND") {
            self.bind_addr = bind;
        }
        if let Some(raw) = var("ZH_CANVAS") {
            match HeatmapCanvas::parse(&raw) {
                Some(canvas) => {
                    self.canvas_width = canvas.width;
                    self.canvas_height = canvas.height;
                }
                None => log::warn!("ignoring ZH_CANVAS={raw:?}: expected WIDTHxHEIGHT, sides 1..={MAX_CANVAS_SIDE}"),
            }
        }
        if let Some(path) = var("ZH_ZONES") {
            self.zones_path = Some(PathBuf::from(path));
        }
        if let Some(path) = var("ZH_FLOWS") {
            self.flows_path = Some(PathBuf::from(path));
        }
    }

    /// File (or defaults) first, then the environment on top.
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let mut config = Self::load_or_default(path)?;
        config.merge_with_env();
        Ok(config)
    }

    /// Canvas size with both sides clamped into `1..=MAX_CANVAS_SIDE`.
    pub fn canvas(&self) -> HeatmapCanvas {
        HeatmapCanvas::clamped(self.canvas_width, self.canvas_height)
    }
}

/// The zone and flow data a server instance answers from. Loaded once at
/// start-up and never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct FloorData {
    pub zones: Vec<ZoneRecord>,
    pub flows: Vec<FlowRecord>,
}

impl FloorData {
    pub fn sample() -> Self {
        Self {
            zones: sample_zones(),
            flows: sample_flows(),
        }
    }

    pub fn load(config: &ServerConfig) -> anyhow::Result<Self> {
        let zones = match &config.zones_path {
            Some(path) => read_json(path)?,
            None => sample_zones(),
        };
        let flows = match &config.flows_path {
            Some(path) => read_json(path)?,
            None => sample_flows(),
        };
        Ok(Self { zones, flows })
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let content = std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_match_original_canvas() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_addr, "127.0.0.1:3001");
        assert_eq!(config.canvas(), HeatmapCanvas { width: 400, height: 300 });
    }

    #[test]
    fn toml_fields_are_optional() {
        let config: ServerConfig = toml::from_str("bind_addr = \"0.0.0.0:8080\"").unwrap();
        assert_eq!(config.bind_addr, "0.0.0.0:8080");
        assert_eq!(config.canvas_width, 400);
        assert!(config.zones_path.is_none());
    }

    #[test]
    fn environment_overrides_file_values() {
        let mut config = ServerConfig::default();
        config.merge_with_vars(vars(&[("ZH_BIND", "0.0.0.0:9000"), ("ZH_CANVAS", "800x600"), ("ZH_ZONES", "floor.json")]));
        assert_eq!(config.bind_addr, "0.0.0.0:9000");
        assert_eq!(config.canvas(), HeatmapCanvas { width: 800, height: 600 });
        assert_eq!(config.zones_path, Some(PathBuf::from("floor.json")));
    }

    #[test]
    fn malformed_or_empty_overrides_are_ignored() {
        let mut config = ServerConfig::default();
        config.merge_with_vars(vars(&[("ZH_CANVAS", "huge"), ("ZH_BIND", "  ")]));
        assert_eq!(config, ServerConfig::default());
    }

    #[test]
    fn oversized_canvas_from_file_is_clamped() {
        let config: ServerConfig = toml::from_str("canvas_width = 65536\ncanvas_height = 65536").unwrap();
        assert_eq!(config.canvas(), HeatmapCanvas { width: 8192, height: 8192 });

        let mut config = ServerConfig::default();
        config.merge_with_vars(vars(&[("ZH_CANVAS", "65536x65536")]));
        assert_eq!(config.canvas(), HeatmapCanvas::default());
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = ServerConfig::load_or_default(dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, ServerConfig::default());
    }

    #[test]
    fn unparsable_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dashboard.toml");
        std::fs::write(&path, "canvas_width = \"wide\"").unwrap();
        assert!(ServerConfig::load_or_default(&path).is_err());
    }

    #[test]
    fn floor_data_reads_zone_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("zones.json");
        std::fs::write(
            &path,
            r#"[{"id":"a","name":"Atrium","polygon":[[0,0],[10,0],[10,10]],"currentDensity":1.1}]"#,
        )
        .unwrap();
        let config = ServerConfig {
            zones_path: Some(path),
            ..ServerConfig::default()
        };
        let floor = FloorData::load(&config).unwrap();
        assert_eq!(floor.zones.len(), 1);
        assert_eq!(floor.zones[0].name, "Atrium");
        assert_eq!(floor.flows, sample_flows());
    }
}
