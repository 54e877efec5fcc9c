//! Channel Earnings Pipeline - Main Entry Point

use api::{init_logging, run_server, AppState, Settings};
use artifact_store::ArtifactStore;
use std::sync::Arc;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    info!("=== Channel Earnings Pipeline v{} ===", env!("CARGO_PKG_VERSION"));

    let settings = Settings::load()?;

    // A stale or partial artifact set yields silently wrong numbers, so
    // any load failure means refusing to serve at all.
    let store = match ArtifactStore::load(&settings.artifacts_dir) {
        Ok(store) => Arc::new(store),
        Err(e) => {
            error!("artifact load failed: {e}");
            std::process::exit(1);
        }
    };

    let state = Arc::new(AppState::new(store));
    run_server(&settings.listen_addr, state).await?;

    Ok(())
}
