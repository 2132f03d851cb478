//! `genui serve` command: run the retrieval API server.

use anyhow::{Context, Result};

use genui::api::server::{start_server, AppState};
use genui::config::Config;
use genui::store::ArtifactStore;

/// Start the retrieval API server, with optional bind/port overrides.
pub(crate) async fn cmd_serve(bind: Option<String>, port: Option<u16>) -> Result<()> {
    let config = Config::load().with_context(|| "Failed to load configuration")?;

    let mut server_config = config.server.clone();
    if let Some(b) = bind {
        server_config.bind = b;
    }
    if let Some(p) = port {
        server_config.port = p;
    }

    let store = ArtifactStore::from_config(&config);
    println!("Cache slot:    {}", store.dir().display());
    println!(
        "Retrieval API: http://{}:{}/api/get-generated-component",
        server_config.bind, server_config.port
    );
    println!("Press Ctrl+C to stop.");

    start_server(&server_config, AppState::new(store))
        .await
        .map_err(|e| anyhow::anyhow!("API server error: {e}"))?;

    Ok(())
}
