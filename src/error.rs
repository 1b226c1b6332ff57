//! Crate error type. Every failure is terminal for the invocation; binaries
//! wrap these with `anyhow` context and exit non-zero.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Artifact file does not exist (model never trained, or wrong directory)
    #[error("artifact not found: {}", .0.display())]
    ArtifactMissing(PathBuf),

    /// Artifact exists but failed envelope, kind or checksum validation
    #[error("artifact {} is corrupt: {reason}", .path.display())]
    ArtifactCorrupt { path: PathBuf, reason: String },

    /// A transformer or model was used before `fit`
    #[error("{0} used before fit")]
    NotFitted(&'static str),

    #[error("feature dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("cannot train on an empty dataset")]
    EmptyDataset,

    #[error("tree induction failed: {0}")]
    Tree(#[from] linfa::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
