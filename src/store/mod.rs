//! Single-slot persistence for generated component artifacts.

pub mod artifact;
pub mod slot_store;

pub use artifact::{ArtifactKind, ArtifactPair, ClearOutcome, OpKind, RuntimeOp};
pub use slot_store::ArtifactStore;
