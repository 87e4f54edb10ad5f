//! Error types for snapshot loading.
//!
//! Uses [`thiserror`] for ergonomic error derivation. Provides
//! [`SnapshotError`] for capture decoding problems and converts it to
//! [`ConvertError`] for unified error handling across the library.

use layerize_core::ConvertError;
use thiserror::Error;

/// Error type for snapshot loading and decoding.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// The snapshot JSON could not be decoded.
    #[error("snapshot decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// Error reading snapshot data.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The snapshot is structurally unusable (e.g. zero-sized viewport).
    #[error("invalid snapshot: {0}")]
    Invalid(String),
}

impl From<SnapshotError> for ConvertError {
    fn from(err: SnapshotError) -> Self {
        match err {
            SnapshotError::Decode(e) => ConvertError::Snapshot(e.to_string()),
            SnapshotError::Io(e) => ConvertError::Io(e.to_string()),
            SnapshotError::Invalid(msg) => ConvertError::Snapshot(msg),
        }
    }
}
