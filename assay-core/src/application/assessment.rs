// assay-core/src/application/assessment.rs
//
// Orchestration of a full assessment run: scores, gaps, coverage,
// anti-patterns, risk, pattern matches. Each stage is pure domain logic;
// this layer wires them together and times the run.

use std::collections::BTreeMap;
use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, instrument};

use crate::domain::antipatterns::DetectedAntiPattern;
use crate::domain::antipatterns::detector::{
    GovernanceRisk, calculate_governance_risk, detect_anti_patterns,
};
use crate::domain::asset::AssetRecord;
use crate::domain::coverage::CoverageSnapshot;
use crate::domain::gaps::{GapConfig, GapEngine, GapReport};
use crate::domain::patterns::matcher::{DEFAULT_COVERAGE_THRESHOLD, PatternMatch, match_patterns};
use crate::domain::scoring::engine::ScoreEngine;
use crate::domain::scoring::{Quadrant, ScoreConfig, SubjectScore};

#[derive(Debug, Clone, Default)]
pub struct AssessmentConfig {
    pub score: ScoreConfig,
    pub gaps: GapConfig,
    pub pattern_threshold: Option<f64>,
}

/// Everything one run produces, ready for rendering or JSON export.
#[derive(Debug, Clone, Serialize)]
pub struct AssessmentReport {
    pub generated_at: DateTime<Utc>,
    pub total_assets: usize,
    pub scores: Vec<SubjectScore>,
    pub quadrant_counts: BTreeMap<Quadrant, usize>,
    pub gap_report: GapReport,
    pub coverage: CoverageSnapshot,
    pub anti_patterns: Vec<DetectedAntiPattern>,
    pub risk: GovernanceRisk,
    pub pattern_matches: Vec<PatternMatch>,
}

/// Runs every engine over one asset batch. Deterministic: the same batch
/// and config always yield the same report (modulo `generated_at`).
#[instrument(skip(assets, config), fields(assets = assets.len()))]
pub fn run_assessment(assets: &[AssetRecord], config: &AssessmentConfig) -> AssessmentReport {
    let start = Instant::now();

    // 1. Scoring and quadrant placement.
    let score_engine = ScoreEngine::new(config.score.clone());
    let scores = score_engine.score_batch(assets);

    let mut quadrant_counts: BTreeMap<Quadrant, usize> = BTreeMap::new();
    for score in &scores {
        *quadrant_counts.entry(score.quadrant).or_insert(0) += 1;
    }

    // 2. Gap analysis.
    let gap_engine = GapEngine::new(config.gaps.clone());
    let gap_report = gap_engine.analyze(assets);

    // 3. Batch coverage feeds the detector and the pattern matcher.
    let coverage = CoverageSnapshot::aggregate(assets);
    let anti_patterns = detect_anti_patterns(&coverage);
    let risk = calculate_governance_risk(&anti_patterns);

    let threshold = config
        .pattern_threshold
        .unwrap_or(DEFAULT_COVERAGE_THRESHOLD);
    let pattern_matches = match_patterns(&coverage, threshold);

    info!(
        assets = assets.len(),
        findings = anti_patterns.len(),
        risk = risk.score,
        elapsed = ?start.elapsed(),
        "Assessment complete"
    );

    AssessmentReport {
        generated_at: Utc::now(),
        total_assets: assets.len(),
        scores,
        quadrant_counts,
        gap_report,
        coverage,
        anti_patterns,
        risk,
        pattern_matches,
    }
}
