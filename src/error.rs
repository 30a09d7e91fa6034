//! Error types
//!
//! Only startup can fail: configuration, asset loading and GPU setup.
//! The simulation tick itself is infallible.

use std::path::PathBuf;

use thiserror::Error;

/// Invalid or unreadable game configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config: {0}")]
    Invalid(String),
    #[error("failed to parse config JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("failed to read config file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Missing or undecodable asset
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("missing asset {}", path.display())]
    Missing { path: PathBuf },
    #[error("failed to read asset {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode image {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: image::ImageError,
    },
    #[error("failed to fetch asset {path}: {reason}")]
    Fetch { path: String, reason: String },
    #[error("cannot locate the executable directory: {0}")]
    ExeDir(#[source] std::io::Error),
}

/// Top-level startup error
#[derive(Debug, Error)]
pub enum GameError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Asset(#[from] AssetError),
    #[error("graphics initialization failed: {0}")]
    Graphics(String),
    #[error("audio initialization failed: {0}")]
    Audio(String),
    #[error("failed to write run report: {0}")]
    Report(#[from] serde_json::Error),
}
