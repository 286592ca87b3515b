// assay-core/src/domain/scoring/mod.rs

pub mod engine;

pub use engine::ScoreEngine;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::catalog::signals::CanonicalSignal;

/// Signals an asset must carry to be considered well-governed. Quality is
/// judged against this list.
pub const DEFAULT_REQUIRED_SIGNALS: [CanonicalSignal; 5] = [
    CanonicalSignal::Ownership,
    CanonicalSignal::Semantics,
    CanonicalSignal::Lineage,
    CanonicalSignal::Sensitivity,
    CanonicalSignal::Trust,
];

pub const DEFAULT_IMPACT_THRESHOLD: f64 = 0.5;
pub const DEFAULT_QUALITY_THRESHOLD: f64 = 0.7;

/// Scoring policy, injectable per invocation (different runs may apply
/// different thresholds).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreConfig {
    pub required_signals: Vec<CanonicalSignal>,
    pub impact_threshold: f64,
    pub quality_threshold: f64,
}

impl Default for ScoreConfig {
    fn default() -> Self {
        Self {
            required_signals: DEFAULT_REQUIRED_SIGNALS.to_vec(),
            impact_threshold: DEFAULT_IMPACT_THRESHOLD,
            quality_threshold: DEFAULT_QUALITY_THRESHOLD,
        }
    }
}

/// The 2x2 Impact/Quality classification, plus the "quality unknown" column.
/// Always derived from `(impact, quality, quality_unknown)` under the run's
/// thresholds; never stored independently of the scores that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Quadrant {
    HH,
    HL,
    LH,
    LL,
    HU,
    LU,
}

impl Quadrant {
    pub fn classify(
        impact: f64,
        quality: Option<f64>,
        impact_threshold: f64,
        quality_threshold: f64,
    ) -> Self {
        let high_impact = impact >= impact_threshold;
        match quality {
            None => {
                if high_impact {
                    Self::HU
                } else {
                    Self::LU
                }
            }
            Some(q) => match (high_impact, q >= quality_threshold) {
                (true, true) => Self::HH,
                (true, false) => Self::HL,
                (false, true) => Self::LH,
                (false, false) => Self::LL,
            },
        }
    }

    pub fn describe(&self) -> &'static str {
        match self {
            Self::HH => "High impact, well governed",
            Self::HL => "High impact, governance gaps",
            Self::LH => "Low impact, well governed",
            Self::LL => "Low impact, governance gaps",
            Self::HU => "High impact, governance unknown",
            Self::LU => "Low impact, governance unknown",
        }
    }
}

/// Human-readable scoring rationale for UI drill-down. Never used for
/// control flow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Explanation {
    pub aspect: String,
    pub detail: String,
}

impl Explanation {
    pub fn new(aspect: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            aspect: aspect.into(),
            detail: detail.into(),
        }
    }
}

/// Per-asset score output. Invariant: `quality_score.is_none()` iff
/// `quality_unknown`.
#[derive(Debug, Clone, Serialize)]
pub struct SubjectScore {
    pub subject_id: String,
    pub impact_score: f64,
    pub quality_score: Option<f64>,
    pub quality_unknown: bool,
    pub quadrant: Quadrant,
    pub dimension_scores: BTreeMap<CanonicalSignal, f64>,
    pub explanations: Vec<Explanation>,
}
