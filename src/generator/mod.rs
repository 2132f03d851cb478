//! Generator contract and single-flight regeneration coordination.
//!
//! The actual component generation is an external collaborator (an LLM call
//! somewhere else); this crate only defines the contract it must satisfy and
//! the coordination that guarantees exactly one generation per cache-miss
//! cycle. The store stays oblivious to all of this; its only promise is
//! that whichever `put` lands is observed atomically and in full.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::error::Result;
use crate::store::{ArtifactPair, ArtifactStore, RuntimeOp};

/// A freshly generated component, not yet persisted.
#[derive(Debug, Clone)]
pub struct GeneratedComponent {
    /// Generated UI component source text.
    pub component_source: String,
    /// Runtime operations that informed the generation.
    pub runtime_ops: Vec<RuntimeOp>,
}

/// Contract for the external component generator.
#[async_trait]
pub trait ComponentGenerator: Send + Sync {
    /// Produce a new component from the instrumented runtime session.
    async fn generate(&self) -> Result<GeneratedComponent>;
}

/// Single-flight coordinator between the store and a generator.
///
/// Concurrent regeneration triggers collapse into one `generate` call and
/// one `put`: the slot is checked, the in-flight lock is taken, and the slot
/// is checked again under the lock before generating. Callers that lose the
/// race observe the winner's pair.
pub struct RegenCoordinator {
    store: ArtifactStore,
    generator: Arc<dyn ComponentGenerator>,
    inflight: tokio::sync::Mutex<()>,
}

impl RegenCoordinator {
    /// Create a coordinator over a store and a generator.
    pub fn new(store: ArtifactStore, generator: Arc<dyn ComponentGenerator>) -> Self {
        Self {
            store,
            generator,
            inflight: tokio::sync::Mutex::new(()),
        }
    }

    /// Return the cached pair, generating and persisting one on a miss.
    pub async fn ensure(&self) -> Result<ArtifactPair> {
        if let Some(pair) = self.store.get()? {
            return Ok(pair);
        }

        let _guard = self.inflight.lock().await;
        // Re-check under the lock: a concurrent caller may have generated
        // and written while we waited.
        if let Some(pair) = self.store.get()? {
            debug!("Slot was filled while waiting for the in-flight lock");
            return Ok(pair);
        }

        info!("Cache miss, running component generation");
        let generated = self.generator.generate().await?;
        let pair = self
            .store
            .put(&generated.component_source, generated.runtime_ops)?;
        info!(
            ops = pair.runtime_ops.len(),
            "Generated component written to slot"
        );
        Ok(pair)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::OpKind;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::TempDir;

    /// Counts generate() calls and emits a distinct source per call.
    struct CountingGenerator {
        calls: AtomicUsize,
        delay_ms: u64,
    }

    impl CountingGenerator {
        fn new(delay_ms: u64) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                delay_ms,
            }
        }
    }

    #[async_trait]
    impl ComponentGenerator for CountingGenerator {
        async fn generate(&self) -> Result<GeneratedComponent> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst);
            if self.delay_ms > 0 {
                tokio::time::sleep(std::time::Duration::from_millis(self.delay_ms)).await;
            }
            Ok(GeneratedComponent {
                component_source: format!("<Generated {n}/>"),
                runtime_ops: vec![RuntimeOp::new(OpKind::Create)],
            })
        }
    }

    fn coordinator(delay_ms: u64) -> (TempDir, Arc<RegenCoordinator>, Arc<CountingGenerator>) {
        let tmp = TempDir::new().unwrap();
        let store = ArtifactStore::new(tmp.path().join("cache"));
        let generator = Arc::new(CountingGenerator::new(delay_ms));
        let coord = Arc::new(RegenCoordinator::new(store, generator.clone()));
        (tmp, coord, generator)
    }

    #[tokio::test]
    async fn test_ensure_generates_on_miss() {
        let (_tmp, coord, generator) = coordinator(0);
        let pair = coord.ensure().await.unwrap();
        assert_eq!(pair.component_source, "<Generated 0/>");
        assert_eq!(generator.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_ensure_hits_without_regenerating() {
        let (_tmp, coord, generator) = coordinator(0);
        coord.ensure().await.unwrap();
        let pair = coord.ensure().await.unwrap();
        assert_eq!(pair.component_source, "<Generated 0/>");
        assert_eq!(generator.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_concurrent_triggers_are_single_flight() {
        let (_tmp, coord, generator) = coordinator(20);
        let tasks: Vec<_> = (0..8)
            .map(|_| {
                let coord = coord.clone();
                tokio::spawn(async move { coord.ensure().await.unwrap() })
            })
            .collect();

        for task in tasks {
            let pair = task.await.unwrap();
            // Every caller observes the single winner's pair.
            assert_eq!(pair.component_source, "<Generated 0/>");
        }
        assert_eq!(generator.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_ensure_regenerates_after_clear() {
        let (_tmp, coord, generator) = coordinator(0);
        coord.ensure().await.unwrap();
        coord.store.clear().unwrap();

        let pair = coord.ensure().await.unwrap();
        assert_eq!(pair.component_source, "<Generated 1/>");
        assert_eq!(generator.calls.load(Ordering::SeqCst), 2);
    }
}
