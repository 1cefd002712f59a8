// THEORY:
// The dashboard crate is a thin HTTP shell around `zone_heatmap`. Every
// request recomputes its answer from the immutable floor data loaded at
// start-up: ranking, flow summary, alerts and the heatmap plan are all cheap
// pure functions, so nothing is cached and no handler holds a lock.
//
// The HTTP surface is behind the `web` feature (on by default). Without it
// only the configuration types are compiled and `start_server` reports that
// the server is unavailable.

pub mod config;
#[cfg(feature = "web")]
pub mod page;
#[cfg(feature = "web")]
pub mod routes;

use std::net::SocketAddr;
use std::sync::Arc;
use zone_heatmap::HeatmapCanvas;

pub use config::{FloorData, ServerConfig};
#[cfg(feature = "web")]
pub use routes::build_router;

/// Shared, read-only state handed to every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    pub floor: Arc<FloorData>,
    pub canvas: HeatmapCanvas,
}

impl AppState {
    pub fn new(floor: FloorData, canvas: HeatmapCanvas) -> Self {
        Self {
            floor: Arc::new(floor),
            canvas,
        }
    }

    pub fn from_config(cfg: &ServerConfig) -> anyhow::Result<Self> {
        Ok(Self::new(FloorData::load(cfg)?, cfg.canvas()))
    }
}

/// Binds the listener and serves the dashboard on a background task.
/// Returns the bound address (useful when binding port 0) and the task handle.
#[cfg(feature = "web")]
pub async fn start_server(cfg: ServerConfig) -> anyhow::Result<(SocketAddr, tokio::task::JoinHandle<()>)> {
    use anyhow::Context;

    let state = AppState::from_config(&cfg)?;
    log::info!(
        "serving {} zone(s) and {} flow(s) on a {}x{} canvas",
        state.floor.zones.len(),
        state.floor.flows.len(),
        state.canvas.width,
        state.canvas.height
    );
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&cfg.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", cfg.bind_addr))?;
    let addr = listener.local_addr().context("listener has no local address")?;
    log::info!("dashboard listening on http://{addr}");

    let server = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            log::error!("dashboard server stopped: {e}");
        }
    });

    Ok((addr, server))
}

#[cfg(not(feature = "web"))]
pub async fn start_server(_cfg: ServerConfig) -> anyhow::Result<(SocketAddr, tokio::task::JoinHandle<()>)> {
    Err(anyhow::anyhow!("web feature not enabled for zone_heatmap_dashboard"))
}
