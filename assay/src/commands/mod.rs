// assay/src/commands/mod.rs

pub mod assess;
pub mod catalog;
pub mod compare;
pub mod gaps;
pub mod patterns;
pub mod risk;

use std::path::{Path, PathBuf};
use tracing::debug;

use assay_core::AssayError;
use assay_core::application::AssessmentConfig;
use assay_core::domain::asset::AssetRecord;
use assay_core::infrastructure::{load_assets, load_settings, load_settings_from};

/// Shared loading step: snapshot plus (optional) settings file.
pub(crate) fn load_inputs(
    snapshot: &Path,
    config: Option<&PathBuf>,
) -> Result<(Vec<AssetRecord>, AssessmentConfig), AssayError> {
    let settings = match config {
        Some(path) => load_settings_from(path)?,
        None => load_settings(Path::new("."))?,
    };
    let assets = load_assets(snapshot)?;
    debug!(assets = assets.len(), "Inputs ready");
    Ok((assets, settings.into_assessment_config()))
}
