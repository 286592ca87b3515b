// assay-core/src/infrastructure/error.rs

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum InfrastructureError {
    // --- FILESYSTEM (IO) ---
    #[error("File System Error: {0}")]
    #[diagnostic(
        code(assay::infra::io),
        help("Check file permissions or path validity.")
    )]
    Io(#[from] std::io::Error),

    // --- CONFIG / YAML ---
    #[error("YAML Parsing Error: {0}")]
    #[diagnostic(
        code(assay::infra::yaml),
        help("Check your YAML syntax (indentation, types).")
    )]
    YamlError(#[from] serde_yaml::Error),

    // --- SNAPSHOTS / JSON ---
    #[error("JSON Parsing Error: {0}")]
    #[diagnostic(
        code(assay::infra::json),
        help("The snapshot must be a JSON array of asset records.")
    )]
    JsonError(#[from] serde_json::Error),

    #[error("Configuration Error: {0}")]
    ConfigError(String),

    #[error("Configuration not found at '{0}'")]
    #[diagnostic(code(assay::infra::config_missing))]
    ConfigNotFound(String),

    #[error("Snapshot not found at '{0}'")]
    #[diagnostic(
        code(assay::infra::snapshot_missing),
        help("Pass a JSON file or a directory containing .json files.")
    )]
    SnapshotNotFound(String),
}

// Validation failures collapse into a readable config error
impl From<validator::ValidationErrors> for InfrastructureError {
    fn from(err: validator::ValidationErrors) -> Self {
        InfrastructureError::ConfigError(err.to_string())
    }
}
