//! Error types for Genesis operations.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for Genesis operations
pub type GenesisResult<T> = Result<T, GenesisError>;

/// Errors surfaced by the project root, agent bridge, preview server and browser launcher.
#[derive(Error, Debug)]
pub enum GenesisError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Walk(#[from] walkdir::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Path escapes project root: {}", .0.display())]
    PathEscape(PathBuf),

    #[error("Failed to start agent `{program}`: {source}")]
    AgentSpawn {
        program: String,
        source: std::io::Error,
    },

    #[error("Agent exited with {}: {stderr}", .code.map(|c| format!("code {}", c)).unwrap_or_else(|| "signal".to_string()))]
    AgentFailed { code: Option<i32>, stderr: String },

    #[error("Agent payload error: {0}")]
    AgentPayload(#[from] serde_json::Error),

    #[error("Cannot bind {addr}: {source}")]
    Bind {
        addr: String,
        source: std::io::Error,
    },

    #[error("Browser error: {0}")]
    Browser(String),
}
