// File: crates/annotation-core/src/error.rs
// Summary: Error types for configuration parsing. Geometry and interaction never fail.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ColorError {
    #[error("empty color string")]
    Empty,
    #[error("invalid hex color `{0}`")]
    InvalidHex(String),
    #[error("invalid color function `{0}`")]
    InvalidFunction(String),
    #[error("unknown color name `{0}`")]
    UnknownName(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid annotation configuration: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Color(#[from] ColorError),
}
