// assay-core/src/error.rs

use crate::domain::error::DomainError;
use crate::infrastructure::error::InfrastructureError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AssayError {
    // --- DOMAIN ERRORS (Catalog lookups, malformed plans) ---
    #[error(transparent)]
    Domain(#[from] DomainError),

    // --- INFRASTRUCTURE ERRORS (IO, Parsing) ---
    #[error(transparent)]
    Infrastructure(#[from] InfrastructureError),

    // --- GENERIC / APPLICATION ERRORS ---
    #[error("Internal Error: {0}")]
    InternalError(String),
}

// Manual implementation to avoid a duplicate enum variant but keep ergonomics
impl From<std::io::Error> for AssayError {
    fn from(err: std::io::Error) -> Self {
        AssayError::Infrastructure(InfrastructureError::Io(err))
    }
}
