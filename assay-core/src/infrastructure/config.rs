// assay-core/src/infrastructure/config.rs
//
// Optional runtime settings. Without a settings file every engine runs on
// its documented defaults; a file only overrides what it names.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};
use validator::Validate;

use crate::application::AssessmentConfig;
use crate::domain::catalog::signals::CanonicalSignal;
use crate::domain::gaps::GapConfig;
use crate::domain::scoring::ScoreConfig;
use crate::infrastructure::error::InfrastructureError;

#[derive(Debug, Clone, Deserialize, Validate, Default)]
pub struct Settings {
    #[validate(range(min = 0.0, max = 1.0, message = "impact_threshold must be within [0,1]"))]
    #[serde(default)]
    pub impact_threshold: Option<f64>,

    #[validate(range(min = 0.0, max = 1.0, message = "quality_threshold must be within [0,1]"))]
    #[serde(default)]
    pub quality_threshold: Option<f64>,

    /// Coverage bar for pattern matching.
    #[validate(range(min = 0.0, max = 1.0, message = "pattern_threshold must be within [0,1]"))]
    #[serde(default)]
    pub pattern_threshold: Option<f64>,

    #[serde(default)]
    pub required_signals: Option<Vec<CanonicalSignal>>,

    #[serde(default)]
    pub optional_signals: Option<Vec<CanonicalSignal>>,
}

impl Settings {
    /// Layered merge: file values override engine defaults, field by field.
    pub fn into_assessment_config(self) -> AssessmentConfig {
        let mut score = ScoreConfig::default();
        if let Some(t) = self.impact_threshold {
            score.impact_threshold = t;
        }
        if let Some(t) = self.quality_threshold {
            score.quality_threshold = t;
        }
        if let Some(signals) = &self.required_signals {
            score.required_signals = signals.clone();
        }

        let mut gaps = GapConfig::default();
        if let Some(signals) = self.required_signals {
            gaps.required_signals = signals;
        }
        if let Some(signals) = self.optional_signals {
            gaps.optional_signals = signals;
        }

        AssessmentConfig {
            score,
            gaps,
            pattern_threshold: self.pattern_threshold,
        }
    }
}

/// Discovers and loads settings from a directory. A missing file is not an
/// error: defaults apply.
#[instrument(skip(dir))]
pub fn load_settings(dir: &Path) -> Result<Settings, InfrastructureError> {
    match find_settings_file(dir) {
        Some(path) => load_settings_from(&path),
        None => {
            info!("No settings file found, using defaults");
            Ok(Settings::default())
        }
    }
}

/// Loads an explicitly named settings file. Here a missing file IS an
/// error: the caller asked for this exact path.
#[instrument]
pub fn load_settings_from(path: &Path) -> Result<Settings, InfrastructureError> {
    if !path.exists() {
        return Err(InfrastructureError::ConfigNotFound(
            path.display().to_string(),
        ));
    }

    info!(path = ?path, "Loading settings");
    let content = fs::read_to_string(path)?;
    let mut settings: Settings = serde_yaml::from_str(&content)?;

    apply_env_overrides(&mut settings);
    settings.validate()?;

    Ok(settings)
}

fn find_settings_file(root: &Path) -> Option<PathBuf> {
    let candidates = ["assay.yaml", "assay.yml"];
    candidates
        .iter()
        .map(|name| root.join(name))
        .find(|p| p.exists())
}

fn apply_env_overrides(settings: &mut Settings) {
    if let Ok(val) = std::env::var("ASSAY_IMPACT_THRESHOLD") {
        if let Ok(parsed) = val.parse::<f64>() {
            info!(old = ?settings.impact_threshold, new = parsed, "Overriding impact threshold via ENV");
            settings.impact_threshold = Some(parsed);
        }
    }
    if let Ok(val) = std::env::var("ASSAY_QUALITY_THRESHOLD") {
        if let Ok(parsed) = val.parse::<f64>() {
            info!(old = ?settings.quality_threshold, new = parsed, "Overriding quality threshold via ENV");
            settings.quality_threshold = Some(parsed);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let settings = load_settings(dir.path()).unwrap();
        assert!(settings.impact_threshold.is_none());
        let config = settings.into_assessment_config();
        assert_eq!(config.score.impact_threshold, 0.5);
    }

    #[test]
    fn test_explicit_missing_path_is_an_error() {
        let dir = TempDir::new().unwrap();
        let result = load_settings_from(&dir.path().join("nope.yaml"));
        assert!(matches!(
            result,
            Err(InfrastructureError::ConfigNotFound(_))
        ));
    }

    #[test]
    fn test_partial_file_overrides_only_named_fields() {
        let dir = TempDir::new().unwrap();
        write_config(&dir, "assay.yaml", "impact_threshold: 0.8\n");
        let settings = load_settings(dir.path()).unwrap();
        let config = settings.into_assessment_config();
        assert_eq!(config.score.impact_threshold, 0.8);
        assert_eq!(config.score.quality_threshold, 0.7);
    }

    #[test]
    fn test_out_of_range_threshold_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "assay.yaml", "impact_threshold: 1.5\n");
        let result = load_settings_from(&path);
        assert!(matches!(result, Err(InfrastructureError::ConfigError(_))));
    }

    #[test]
    fn test_signal_lists_parse_from_yaml() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            "assay.yaml",
            "required_signals: [OWNERSHIP, SEMANTICS]\n",
        );
        let settings = load_settings_from(&path).unwrap();
        let config = settings.into_assessment_config();
        assert_eq!(
            config.gaps.required_signals,
            vec![CanonicalSignal::Ownership, CanonicalSignal::Semantics]
        );
    }
}
