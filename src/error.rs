//! Error types for dataset loading and analytics

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// A percentage was requested against a zero denominator.
    #[error("cannot compute a percentage of {part} against a total of zero")]
    DivisionByZero { part: u32 },

    /// The dataset is malformed (bad totals, rates out of range, duplicates).
    #[error("invalid dataset: {0}")]
    InvalidDataset(String),

    #[error("unsupported dataset format: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse TOML dataset: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("failed to serialize dataset as TOML: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidDataset(message.into())
    }
}
