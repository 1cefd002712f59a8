//! HTTP routes. JSON answers use the envelope
//! `{ "success": true, "data": ..., "metadata": { ... } }`; failures answer
//! `{ "success": false, "error": "..." }`.

use crate::AppState;
use crate::page::{CLIENT_JS, INDEX_HTML};
use axum::extract::{Query, State};
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;
use std::time::{SystemTime, UNIX_EPOCH};
use zone_heatmap::analytics::alerts::{derive_alerts, summarize_alerts};
use zone_heatmap::analytics::flows::summarize_flows;
use zone_heatmap::analytics::footfall::{FootfallPoint, Granularity, bucket_footfall, summarize_footfall};
use zone_heatmap::analytics::zones::{SortKey, rank_zones, zone_table};
use zone_heatmap::raster::{encode_png, rasterize};
use zone_heatmap::{HeatmapError, legend, render_heatmap};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(|| async { Html(INDEX_HTML) }))
        .route("/client.js", get(client_js))
        .route("/healthz", get(|| async { "ok" }))
        .route("/api/analytics/zones", get(zones))
        .route("/api/analytics/zones/performance", get(zone_performance))
        .route("/api/analytics/flow", get(flows))
        .route("/api/analytics/footfall/summary", post(footfall_summary))
        .route("/api/alerts/safety", get(safety_alerts))
        .route("/api/heatmap", get(heatmap))
        .route("/api/heatmap.png", get(heatmap_png))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
struct ZonesQuery {
    #[serde(rename = "sortBy")]
    sort_by: Option<String>,
}

impl ZonesQuery {
    /// Ranking key plus the `sortBy` value echoed in the metadata. Unknown
    /// keys rank by total footfall but are echoed as sent.
    fn sort_key(&self) -> (SortKey, String) {
        let raw = self.sort_by.as_deref().filter(|raw| !raw.is_empty());
        let key = match raw.map(str::parse::<SortKey>) {
            Some(Ok(key)) => key,
            Some(Err(e)) => {
                log::debug!("{e}, ranking by {}", SortKey::default().as_str());
                SortKey::default()
            }
            None => SortKey::default(),
        };
        (key, raw.unwrap_or(key.as_str()).to_string())
    }
}

fn error_response(status: StatusCode, message: String) -> Response {
    (status, Json(json!({ "success": false, "error": message }))).into_response()
}

fn heatmap_error(err: HeatmapError) -> Response {
    let status = match err {
        HeatmapError::InvalidGeometry { .. } | HeatmapError::InvalidDensity { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        HeatmapError::Image(_) | HeatmapError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    log::warn!("heatmap request failed: {err}");
    error_response(status, err.to_string())
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

async fn client_js() -> Response {
    let mut resp = Response::new(axum::body::Body::from(CLIENT_JS));
    resp.headers_mut()
        .insert(header::CONTENT_TYPE, HeaderValue::from_static("application/javascript"));
    resp
}

async fn zones(State(state): State<AppState>, Query(query): Query<ZonesQuery>) -> Json<serde_json::Value> {
    let (key, sort_by) = query.sort_key();
    let zones = rank_zones(state.floor.zones.clone(), key);
    log::debug!("zones sorted by {}", key.as_str());
    Json(json!({
        "success": true,
        "data": zones,
        "metadata": { "totalZones": zones.len(), "sortBy": sort_by },
    }))
}

async fn zone_performance(State(state): State<AppState>, Query(query): Query<ZonesQuery>) -> Json<serde_json::Value> {
    let (key, sort_by) = query.sort_key();
    let rows = zone_table(state.floor.zones.clone(), key);
    Json(json!({
        "success": true,
        "data": rows,
        "metadata": { "totalZones": rows.len(), "sortBy": sort_by },
    }))
}

async fn flows(State(state): State<AppState>) -> Json<serde_json::Value> {
    let summary = summarize_flows(&state.floor.flows, &state.floor.zones);
    Json(json!({
        "success": true,
        "data": state.floor.flows,
        "summary": summary,
        "metadata": { "totalFlows": state.floor.flows.len() },
    }))
}

#[derive(Debug, Deserialize)]
struct FootfallQuery {
    granularity: Option<String>,
}

async fn footfall_summary(Query(query): Query<FootfallQuery>, Json(points): Json<Vec<FootfallPoint>>) -> Response {
    let granularity = match query.granularity.as_deref().map(str::parse::<Granularity>).transpose() {
        Ok(g) => g.unwrap_or_default(),
        Err(e) => return error_response(StatusCode::BAD_REQUEST, e.to_string()),
    };
    let series = bucket_footfall(&points, granularity);
    let summary = summarize_footfall(&series);
    Json(json!({
        "success": true,
        "data": summary,
        "series": series,
        "metadata": { "totalRecords": points.len(), "granularity": granularity.as_str() },
    }))
    .into_response()
}

async fn safety_alerts(State(state): State<AppState>) -> Json<serde_json::Value> {
    let alerts = derive_alerts(&state.floor.zones, now_millis());
    let summary = summarize_alerts(&alerts);
    if summary.active_alerts > 0 {
        log::info!("{} high severity alert(s) active", summary.active_alerts);
    }
    Json(json!({
        "success": true,
        "data": alerts,
        "metadata": summary,
    }))
}

async fn heatmap(State(state): State<AppState>) -> Response {
    match render_heatmap(&state.floor.zones) {
        Ok(plan) => {
            let total = plan.len();
            Json(json!({
                "success": true,
                "data": plan,
                "metadata": { "totalZones": total, "canvas": state.canvas, "legend": legend() },
            }))
            .into_response()
        }
        Err(e) => heatmap_error(e),
    }
}

async fn heatmap_png(State(state): State<AppState>) -> Response {
    let png = render_heatmap(&state.floor.zones).and_then(|plan| encode_png(&rasterize(&plan, state.canvas)));
    match png {
        Ok(bytes) => ([(header::CONTENT_TYPE, "image/png")], bytes).into_response(),
        Err(e) => heatmap_error(e),
    }
}
