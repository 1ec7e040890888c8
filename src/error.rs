//! Library error type

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HelperError {
    #[error("invalid configuration: {0}")]
    Config(#[from] Box<figment::Error>),

    #[error("config file not found: {}", .0.display())]
    MissingConfig(PathBuf),

    #[error("unsupported config format: {} (expected .toml, .yml or .yaml)", .0.display())]
    UnsupportedConfig(PathBuf),

    #[error("failed to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse stats JSON in {}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, HelperError>;
