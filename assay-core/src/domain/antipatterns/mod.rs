// assay-core/src/domain/antipatterns/mod.rs

pub mod detector;
pub mod rules;

pub use detector::{GovernanceRisk, RiskLevel, calculate_governance_risk, detect_anti_patterns};
pub use rules::{AntiPatternRule, Detection, RULE_CATALOG};

use serde::Serialize;

/// Severity of a systemic finding. Ordering (critical < warning < info)
/// doubles as the sort order of detected findings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FindingSeverity {
    Critical,
    Warning,
    Info,
}

impl FindingSeverity {
    /// Governance-risk contribution weight. Preserved exactly for
    /// reproducible audit comparisons across runs.
    pub fn weight(&self) -> f64 {
        match self {
            Self::Critical => 30.0,
            Self::Warning => 15.0,
            Self::Info => 5.0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }
}

/// A rule that fired, paired with the numbers that made it fire. Never
/// persisted independently of the coverage snapshot that produced it;
/// recomputed each run.
#[derive(Debug, Clone, Serialize)]
pub struct DetectedAntiPattern {
    pub rule_id: String,
    pub name: String,
    pub severity: FindingSeverity,
    pub category: String,
    pub affected_count: usize,
    pub total_count: usize,
    pub percentage_affected: f64,
    pub detail: String,
}
