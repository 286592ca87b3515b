// assay-core/src/infrastructure/mod.rs

pub mod config;
pub mod error;
pub mod snapshot;

pub use config::{Settings, load_settings, load_settings_from};
pub use error::InfrastructureError;
pub use snapshot::load_assets;
