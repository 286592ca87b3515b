// assay-core/src/domain/scoring/engine.rs

use serde_json::Value;
use std::collections::BTreeMap;

use crate::domain::asset::AssetRecord;
use crate::domain::catalog::fields::field_by_id;
use crate::domain::catalog::signals::CanonicalSignal;
use crate::domain::scoring::{Explanation, Quadrant, ScoreConfig, SubjectScore};
use crate::domain::signals::{SignalValue, evaluate_signals, evaluator::lookup_field};

// Policy constants, preserved bit-exact for behavioral compatibility with
// historical runs. Treated as configuration, not algorithm.
/// Impact when usage is confirmed, before magnitude scaling.
pub const IMPACT_FLOOR: f64 = 0.5;
/// Impact when no usage signal is present.
pub const IMPACT_DEFAULT: f64 = 0.25;
/// Popularity saturates at 1000: ln(1 + 1000) normalizes the curve.
pub const POPULARITY_CAP: f64 = 1001.0;
/// Fraction of required signals allowed to be Unknown before the asset is
/// declared unjudgeable.
pub const UNKNOWN_GATE: f64 = 0.5;

/// Computes per-asset Impact/Quality scores and quadrant placement.
/// Stateless apart from the injected policy; never errors on malformed
/// attributes.
pub struct ScoreEngine {
    config: ScoreConfig,
}

impl ScoreEngine {
    pub fn new(config: ScoreConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScoreConfig {
        &self.config
    }

    /// Scores a single asset. Deterministic for fixed (asset, config).
    pub fn score_asset(&self, asset: &AssetRecord) -> SubjectScore {
        let signals = evaluate_signals(&asset.attributes);

        let (impact, impact_basis) = self.impact_score(asset, &signals);
        let (quality, quality_basis) = self.quality_score(&signals);
        let quality_unknown = quality.is_none();

        let quadrant = Quadrant::classify(
            impact,
            quality,
            self.config.impact_threshold,
            self.config.quality_threshold,
        );

        let dimension_scores: BTreeMap<CanonicalSignal, f64> = signals
            .iter()
            .map(|(s, v)| (*s, v.dimension_score()))
            .collect();

        let mut explanations = vec![
            Explanation::new("impact", impact_basis),
            Explanation::new("quality", quality_basis),
        ];
        let confirmed_absent: Vec<&str> = signals
            .iter()
            .filter(|(_, v)| **v == SignalValue::Absent)
            .map(|(s, _)| s.as_str())
            .collect();
        if !confirmed_absent.is_empty() {
            explanations.push(Explanation::new(
                "absent_signals",
                format!("Confirmed absent: {}", confirmed_absent.join(", ")),
            ));
        }

        SubjectScore {
            subject_id: asset.guid.clone(),
            impact_score: impact,
            quality_score: quality,
            quality_unknown,
            quadrant,
            dimension_scores,
            explanations,
        }
    }

    /// A batch is just a map over assets; no cross-asset coupling.
    pub fn score_batch(&self, assets: &[AssetRecord]) -> Vec<SubjectScore> {
        assets.iter().map(|a| self.score_asset(a)).collect()
    }

    /// Impact: confirmed usage floors the score at IMPACT_FLOOR and scales
    /// logarithmically with popularity above it. Presence of usage data is
    /// itself informative before considering magnitude; without it the
    /// score falls back to IMPACT_DEFAULT.
    fn impact_score(
        &self,
        asset: &AssetRecord,
        signals: &BTreeMap<CanonicalSignal, SignalValue>,
    ) -> (f64, String) {
        let usage = signals
            .get(&CanonicalSignal::Usage)
            .copied()
            .unwrap_or(SignalValue::Unknown);

        if usage != SignalValue::Present {
            return (
                IMPACT_DEFAULT,
                format!("No usage signal; default impact {}", IMPACT_DEFAULT),
            );
        }

        let popularity = popularity_of(asset);
        let scaled = ((1.0 + popularity).ln() / POPULARITY_CAP.ln()).max(IMPACT_FLOOR);
        let impact = scaled.clamp(0.0, 1.0);
        (
            impact,
            format!(
                "Usage detected (popularity {:.1}); log-scaled impact {:.3}",
                popularity, impact
            ),
        )
    }

    /// Quality: judged only against the required signal list. When half or
    /// more of the list is Unknown the asset cannot be fairly judged and
    /// quality is reported as unknown instead of a misleading low score.
    fn quality_score(
        &self,
        signals: &BTreeMap<CanonicalSignal, SignalValue>,
    ) -> (Option<f64>, String) {
        let required = &self.config.required_signals;
        if required.is_empty() {
            return (None, "No required signals configured".to_string());
        }

        let mut present = 0usize;
        let mut unknown = 0usize;
        for signal in required {
            match signals.get(signal).copied().unwrap_or(SignalValue::Unknown) {
                SignalValue::Present => present += 1,
                SignalValue::Unknown => unknown += 1,
                SignalValue::Absent => {}
            }
        }

        let unknown_fraction = unknown as f64 / required.len() as f64;
        if unknown_fraction >= UNKNOWN_GATE {
            return (
                None,
                format!(
                    "{}/{} required signals are UNKNOWN; quality not judgeable",
                    unknown, required.len()
                ),
            );
        }

        // Past the gate, Unknown counts the same as Absent in the denominator
        let quality = present as f64 / required.len() as f64;
        (
            Some(quality),
            format!(
                "{}/{} required signals present ({:.0}%)",
                present,
                required.len(),
                quality * 100.0
            ),
        )
    }
}

impl Default for ScoreEngine {
    fn default() -> Self {
        Self::new(ScoreConfig::default())
    }
}

/// Popularity magnitude, read through the field catalog so connector
/// spellings keep working. Malformed values degrade to 0.
fn popularity_of(asset: &AssetRecord) -> f64 {
    let Some(field) = field_by_id("popularity_score") else {
        return 0.0;
    };
    match lookup_field(&asset.attributes, field) {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0).max(0.0),
        Some(Value::String(s)) => s.trim().parse::<f64>().unwrap_or(0.0).max(0.0),
        _ => 0.0,
    }
}
