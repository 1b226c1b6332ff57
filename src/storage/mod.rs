//! Persisted model artifacts and dataset dumps.

mod artifacts;

pub use artifacts::{ArtifactMeta, ArtifactStore};
