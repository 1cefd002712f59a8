use zone_heatmap_dashboard::config::DEFAULT_CONFIG_FILE;
use zone_heatmap_dashboard::{ServerConfig, start_server};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    // Config file from env or default; ZH_* variables override its fields
    let path = std::env::var("ZH_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
    let cfg = ServerConfig::load(&path)?;

    let (_addr, handle) = start_server(cfg).await?;
    // Park until the server task ends
    handle.await.ok();
    Ok(())
}
