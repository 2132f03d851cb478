//! Cache maintenance commands: `clear-cache` and `status`.

use anyhow::{Context, Result};

use genui::config::Config;
use genui::store::{ArtifactStore, ClearOutcome};

/// Clear the cache slot so the next retrieval cycle regenerates.
///
/// Absence of cached artifacts is not a failure: the command reports what it
/// found and exits successfully either way. Only a real deletion error (a
/// permission problem, say) aborts with a nonzero status.
pub(crate) fn cmd_clear_cache() -> Result<()> {
    let config = Config::load().with_context(|| "Failed to load configuration")?;
    let store = ArtifactStore::from_config(&config);
    let outcome = store
        .clear()
        .with_context(|| format!("Failed to clear cache at {:?}", store.dir()))?;

    for line in clear_report(&store, &outcome) {
        println!("{line}");
    }
    Ok(())
}

/// Render the `clear-cache` output: one line per removed artifact, then a
/// distinct empty-cache line or a summary count.
fn clear_report(store: &ArtifactStore, outcome: &ClearOutcome) -> Vec<String> {
    let mut lines = Vec::new();
    for kind in &outcome.removed {
        lines.push(format!(
            "Removed {}: {}",
            kind.label(),
            store.artifact_path(*kind).display()
        ));
    }
    if outcome.is_empty() {
        lines.push("No cached artifacts to clear.".to_string());
    } else {
        lines.push(format!(
            "Cleared {} cached artifact(s). Next request will trigger regeneration.",
            outcome.count()
        ));
    }
    lines
}

/// Show configuration and slot status.
pub(crate) fn cmd_status() -> Result<()> {
    let config = Config::load().unwrap_or_default();
    let store = ArtifactStore::from_config(&config);

    println!("GenUI Status");
    println!("============");
    println!();

    println!("Version: {}", env!("CARGO_PKG_VERSION"));
    println!();

    println!("Configuration");
    println!("-------------");
    println!("  Config directory: {:?}", Config::dir());
    println!("  Config file:      {:?}", Config::path());
    println!("  Config exists:    {}", Config::path().exists());
    println!();

    println!("Cache Slot");
    println!("----------");
    println!("  Path:   {:?}", store.dir());
    println!("  Exists: {}", store.dir().exists());
    match store.get() {
        Ok(Some(pair)) => {
            println!("  State:  populated");
            println!("  Generated at: {}", pair.generated_at.to_rfc3339());
            println!("  Component:    {} bytes", pair.component_source.len());
            println!("  Runtime ops:  {}", pair.runtime_ops.len());
        }
        Ok(None) => println!("  State:  empty"),
        Err(e) => println!("  State:  unreadable ({e})"),
    }
    println!();

    println!("Server");
    println!("------");
    println!("  Bind: {}", config.server.bind);
    println!("  Port: {}", config.server.port);
    println!();

    Ok(())
}
