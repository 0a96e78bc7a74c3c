//! CLI error types.

use std::path::PathBuf;

use slotnav_core::NavigatorError;
use thiserror::Error;

/// Manifest loading errors.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("failed to read manifest {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid manifest: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("manifest declares no routes")]
    Empty,
}

/// Everything a command can fail with.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    #[error("invalid navigation target \"{0}\", expected CONTEXT=NAME")]
    InvalidTarget(String),

    #[error("no navigator is mounted at \"{0}\"")]
    UnknownNavigator(String),

    #[error("navigator at \"{context_key}\" did not handle navigation to \"{name}\"")]
    Unhandled { context_key: String, name: String },

    #[error(transparent)]
    Render(#[from] NavigatorError),

    #[error("failed to serialize navigation state: {0}")]
    Json(#[from] serde_json::Error),
}
