// assay-core/src/domain/mod.rs

pub mod antipatterns;
pub mod asset;
pub mod catalog;
pub mod coverage;
pub mod error;
pub mod gaps;
pub mod patterns;
pub mod scoring;
pub mod signals;

// Convenient re-exports to simplify imports elsewhere
pub use asset::AssetRecord;
pub use error::DomainError;
