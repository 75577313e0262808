//! Error types for LinkCore
//!
//! Scanning and wiki-link parsing never fail: any string is valid input.
//! Only building a scanner and loading configuration can go wrong.

use thiserror::Error;

/// Errors raised while constructing scanners or loading configuration
#[derive(Debug, Error)]
pub enum LinkCoreError {
    #[error("Failed to build automaton: {0}")]
    AutomatonBuild(#[from] aho_corasick::BuildError),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] serde_json::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type for LinkCore operations
pub type LinkCoreResult<T> = Result<T, LinkCoreError>;
