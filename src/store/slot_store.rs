//! Single-slot artifact store with atomic replace-on-write.
//!
//! The store manages exactly one logical slot inside a scratch directory,
//! materialized as two fixed-path files: `generated-component.tsx` (the
//! component source text) and `runtime-ops.json` (the structured ops log).
//! Writes go through temp files in the same directory and land via atomic
//! rename, so a concurrent reader sees either the fully-old or fully-new
//! pair, never a partially-written one.
//!
//! Cross-file consistency is enforced with a SHA-256 digest: the ops log
//! records the digest of the component source it was written with, and
//! `get()` rejects any combination where the digest does not match.

use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Utc;
use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{GenUiError, Result};

use super::artifact::{component_digest, OpsLog};
use super::{ArtifactKind, ArtifactPair, ClearOutcome, RuntimeOp};

/// Attempts before a digest mismatch is treated as a torn slot rather than
/// an in-flight concurrent write.
const TORN_READ_RETRIES: usize = 3;

/// What a single read of the slot observed.
enum SlotRead {
    /// Neither artifact exists.
    Empty,
    /// Both artifacts exist and digest-match.
    Pair(ArtifactPair),
    /// The artifacts disagree: one file missing, or digest mismatch.
    Torn,
}

/// Persistent single-slot holder of one artifact pair.
///
/// The slot location is injected at construction; nothing in the store
/// consults ambient path globals. All operations are bounded synchronous
/// filesystem actions and every failure propagates to the caller.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    dir: PathBuf,
}

impl ArtifactStore {
    /// Create a store over the given scratch directory.
    ///
    /// The directory is created lazily on the first `put`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Create a store at the configured cache directory.
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.cache_dir())
    }

    /// The scratch directory this store manages.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Absolute path of one of the two slot artifacts.
    pub fn artifact_path(&self, kind: ArtifactKind) -> PathBuf {
        self.dir.join(kind.file_name())
    }

    /// Overwrite the slot with a new artifact pair.
    ///
    /// Both artifacts are staged as temp files in the scratch directory
    /// before either live path is touched, then renamed into place: ops log
    /// first, component source last. Combined with `get()` reading the
    /// component before the log, a reader that observes the new source is
    /// guaranteed to also observe the new log.
    pub fn put(&self, component_source: &str, runtime_ops: Vec<RuntimeOp>) -> Result<ArtifactPair> {
        std::fs::create_dir_all(&self.dir).map_err(|e| GenUiError::io(&self.dir, e))?;

        let generated_at = Utc::now();
        let log = OpsLog {
            generated_at,
            component_digest: component_digest(component_source),
            ops: runtime_ops,
        };

        // Stage both temps before replacing anything, so a serialization or
        // write failure leaves the previous pair untouched.
        let mut ops_tmp =
            NamedTempFile::new_in(&self.dir).map_err(|e| GenUiError::io(&self.dir, e))?;
        ops_tmp
            .write_all(serde_json::to_string_pretty(&log)?.as_bytes())
            .map_err(|e| GenUiError::io(ops_tmp.path(), e))?;

        let mut component_tmp =
            NamedTempFile::new_in(&self.dir).map_err(|e| GenUiError::io(&self.dir, e))?;
        component_tmp
            .write_all(component_source.as_bytes())
            .map_err(|e| GenUiError::io(component_tmp.path(), e))?;

        let ops_path = self.artifact_path(ArtifactKind::RuntimeOps);
        ops_tmp
            .persist(&ops_path)
            .map_err(|e| GenUiError::io(&ops_path, e.error))?;

        let component_path = self.artifact_path(ArtifactKind::ComponentSource);
        component_tmp
            .persist(&component_path)
            .map_err(|e| GenUiError::io(&component_path, e.error))?;

        debug!(
            ops = log.ops.len(),
            bytes = component_source.len(),
            "Artifact pair written to slot"
        );

        Ok(ArtifactPair {
            component_source: component_source.to_string(),
            runtime_ops: log.ops,
            generated_at,
        })
    }

    /// Read the current artifact pair, or `None` when the slot is empty.
    ///
    /// A digest mismatch between the two files is retried a few times to
    /// step over an in-flight concurrent `put`. A mismatch that persists
    /// (a torn write left by a crash) is logged and reported as a miss, so
    /// the next generation cycle overwrites and heals the slot. Any other
    /// read failure while an artifact exists is an error.
    pub fn get(&self) -> Result<Option<ArtifactPair>> {
        for attempt in 0..TORN_READ_RETRIES {
            match self.read_slot()? {
                SlotRead::Empty => return Ok(None),
                SlotRead::Pair(pair) => return Ok(Some(pair)),
                SlotRead::Torn => {
                    debug!(attempt, "Slot artifacts disagree, retrying read");
                    std::thread::yield_now();
                }
            }
        }
        warn!(
            dir = %self.dir.display(),
            "Slot holds a torn artifact pair; treating as a miss to force regeneration"
        );
        Ok(None)
    }

    /// Remove both artifacts from the slot.
    ///
    /// Idempotent: a missing artifact is skipped, not an error. The outcome
    /// reports which artifacts actually existed and were removed. Component
    /// source is deleted first so an interrupted clear leaves the slot in a
    /// state `get()` already treats as a miss.
    pub fn clear(&self) -> Result<ClearOutcome> {
        let mut outcome = ClearOutcome::default();
        for kind in [ArtifactKind::ComponentSource, ArtifactKind::RuntimeOps] {
            let path = self.artifact_path(kind);
            match std::fs::remove_file(&path) {
                Ok(()) => {
                    debug!(path = %path.display(), "Removed cached artifact");
                    outcome.removed.push(kind);
                }
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => return Err(GenUiError::io(&path, e)),
            }
        }
        Ok(outcome)
    }

    /// `true` when both slot artifacts are present on disk.
    pub fn exists(&self) -> bool {
        self.artifact_path(ArtifactKind::ComponentSource).exists()
            && self.artifact_path(ArtifactKind::RuntimeOps).exists()
    }

    // -- private helpers ---------------------------------------------------

    /// One observation of the slot. Reads the component source before the
    /// ops log; `put()` replaces them in the opposite order, which closes
    /// the window where a reader could pair a new source with a stale log.
    fn read_slot(&self) -> Result<SlotRead> {
        let component_path = self.artifact_path(ArtifactKind::ComponentSource);
        let component = match std::fs::read_to_string(&component_path) {
            Ok(source) => Some(source),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => return Err(GenUiError::io(&component_path, e)),
        };

        let ops_path = self.artifact_path(ArtifactKind::RuntimeOps);
        let log = match std::fs::read_to_string(&ops_path) {
            Ok(data) => Some(serde_json::from_str::<OpsLog>(&data)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => return Err(GenUiError::io(&ops_path, e)),
        };

        Ok(match (component, log) {
            (None, None) => SlotRead::Empty,
            (Some(source), Some(log)) => {
                if component_digest(&source) == log.component_digest {
                    SlotRead::Pair(ArtifactPair {
                        component_source: source,
                        runtime_ops: log.ops,
                        generated_at: log.generated_at,
                    })
                } else {
                    SlotRead::Torn
                }
            }
            _ => SlotRead::Torn,
        })
    }
}
