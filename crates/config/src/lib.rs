// Configuration loading

pub mod ai;
pub mod settings;

use std::path::PathBuf;

use thiserror::Error;

pub use ai::{get_api_key, AIConfigStatus, AIDiagnostics, KeyLookup, KeySource, ResolvedAIConfig};
pub use settings::{AIProvider, AISettings, Settings};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid settings JSON: {0}")]
    Json(#[from] serde_json::Error),
}
