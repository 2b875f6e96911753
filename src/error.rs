//! Error types for the asset layer
//!
//! Every fallible operation in this crate recovers locally: it logs a
//! descriptive message (including the asset id where one is known) and
//! returns an error value. Nothing in the asset layer panics or aborts the
//! process; a material that fails to load stays unloaded while the rest of
//! the project keeps working.

use crate::asset::AssetKind;
use crate::id::AssetId;

/// Error type for asset operations
#[derive(Debug)]
pub enum AssetError {
    /// An id was not registered in the bank, or a referenced file is absent
    NotFound(String),
    /// An id resolved to a different asset kind than requested
    TypeMismatch {
        id: AssetId,
        expected: AssetKind,
        found: AssetKind,
    },
    /// Registering an id or project path that is already taken
    Duplicate(String),
    /// File content unreadable as the expected type, or a decode/compile
    /// failure in the construction backend
    MalformedSource(String),
    /// A reference holding the invalid sentinel, or pointing at an asset
    /// whose own load failed
    InvalidReference(String),
    /// An asset reappeared in its own dependency resolution chain
    CycleDetected(AssetId),
    /// File I/O error outside the cases above (permissions, disk full)
    Io(String),
}

impl std::fmt::Display for AssetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssetError::NotFound(msg) => write!(f, "not found: {}", msg),
            AssetError::TypeMismatch { id, expected, found } => {
                write!(f, "asset {} is a {}, expected {}", id, found, expected)
            }
            AssetError::Duplicate(msg) => write!(f, "duplicate: {}", msg),
            AssetError::MalformedSource(msg) => write!(f, "malformed source: {}", msg),
            AssetError::InvalidReference(msg) => write!(f, "invalid reference: {}", msg),
            AssetError::CycleDetected(id) => {
                write!(f, "asset {} appears in its own dependency chain", id)
            }
            AssetError::Io(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl std::error::Error for AssetError {}

impl From<std::io::Error> for AssetError {
    fn from(e: std::io::Error) -> Self {
        AssetError::Io(e.to_string())
    }
}

impl AssetError {
    /// Classify a file read failure: a missing file is `NotFound`, anything
    /// else is `Io`.
    pub(crate) fn from_file_read(path: &std::path::Path, e: std::io::Error) -> Self {
        if e.kind() == std::io::ErrorKind::NotFound {
            AssetError::NotFound(format!("file '{}' does not exist", path.display()))
        } else {
            AssetError::Io(format!("reading '{}': {}", path.display(), e))
        }
    }
}
