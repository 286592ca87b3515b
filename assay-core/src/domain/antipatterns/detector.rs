// assay-core/src/domain/antipatterns/detector.rs

use serde::Serialize;

use crate::domain::antipatterns::rules::RULE_CATALOG;
use crate::domain::antipatterns::{DetectedAntiPattern, FindingSeverity};
use crate::domain::coverage::CoverageSnapshot;

// Risk bands; preserved exactly for reproducible audit comparisons.
const RISK_BAND_CRITICAL: f64 = 75.0;
const RISK_BAND_HIGH: f64 = 50.0;
const RISK_BAND_MEDIUM: f64 = 25.0;

/// Runs the whole rule catalog against one coverage snapshot.
/// Findings are sorted by severity (critical first), then blast radius.
pub fn detect_anti_patterns(snapshot: &CoverageSnapshot) -> Vec<DetectedAntiPattern> {
    let mut detected: Vec<DetectedAntiPattern> = RULE_CATALOG
        .iter()
        .filter_map(|rule| {
            (rule.check)(snapshot).map(|d| DetectedAntiPattern {
                rule_id: rule.id.to_string(),
                name: rule.name.to_string(),
                severity: rule.severity,
                category: rule.category.to_string(),
                affected_count: d.affected_count,
                total_count: d.total_count,
                percentage_affected: d.percentage_affected,
                detail: d.detail,
            })
        })
        .collect();

    detected.sort_by(|a, b| {
        a.severity
            .cmp(&b.severity)
            .then(b.affected_count.cmp(&a.affected_count))
    });
    detected
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Critical,
    High,
    Medium,
    Low,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GovernanceRisk {
    /// 0..100, higher is worse.
    pub score: f64,
    pub level: RiskLevel,
    pub summary: String,
}

/// Risk score: each finding contributes (affected fraction x severity
/// weight); the sum is clamped to [0,100].
pub fn calculate_governance_risk(detected: &[DetectedAntiPattern]) -> GovernanceRisk {
    let raw: f64 = detected
        .iter()
        .map(|d| d.percentage_affected / 100.0 * d.severity.weight())
        .sum();
    let score = raw.clamp(0.0, 100.0);

    let level = if score >= RISK_BAND_CRITICAL {
        RiskLevel::Critical
    } else if score >= RISK_BAND_HIGH {
        RiskLevel::High
    } else if score >= RISK_BAND_MEDIUM {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    };

    let criticals = detected
        .iter()
        .filter(|d| d.severity == FindingSeverity::Critical)
        .count();
    let summary = format!(
        "{} finding(s), {} critical; governance risk {:.1}/100 ({})",
        detected.len(),
        criticals,
        score,
        level.as_str()
    );

    GovernanceRisk { score, level, summary }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::asset::AssetRecord;
    use serde_json::json;

    fn finding(severity: FindingSeverity, pct: f64, affected: usize) -> DetectedAntiPattern {
        DetectedAntiPattern {
            rule_id: "x".into(),
            name: "X".into(),
            severity,
            category: "test".into(),
            affected_count: affected,
            total_count: 100,
            percentage_affected: pct,
            detail: String::new(),
        }
    }

    #[test]
    fn test_risk_score_weights() {
        // 100% critical -> 30, 100% warning -> 15, 100% info -> 5
        let risk = calculate_governance_risk(&[
            finding(FindingSeverity::Critical, 100.0, 100),
            finding(FindingSeverity::Warning, 100.0, 100),
            finding(FindingSeverity::Info, 100.0, 100),
        ]);
        assert!((risk.score - 50.0).abs() < 1e-9);
        assert_eq!(risk.level, RiskLevel::High);
    }

    #[test]
    fn test_risk_bands() {
        assert_eq!(calculate_governance_risk(&[]).level, RiskLevel::Low);
        assert_eq!(
            calculate_governance_risk(&[finding(FindingSeverity::Critical, 90.0, 90)]).level,
            RiskLevel::Medium // 27.0
        );
        let heavy: Vec<_> = (0..3)
            .map(|_| finding(FindingSeverity::Critical, 90.0, 90))
            .collect();
        assert_eq!(calculate_governance_risk(&heavy).level, RiskLevel::Critical); // 81.0
    }

    #[test]
    fn test_risk_score_is_clamped() {
        let heavy: Vec<_> = (0..10)
            .map(|_| finding(FindingSeverity::Critical, 100.0, 100))
            .collect();
        let risk = calculate_governance_risk(&heavy);
        assert_eq!(risk.score, 100.0);
    }

    #[test]
    fn test_detection_sort_order() {
        // An info finding with a huge blast radius still sorts after a
        // critical one with a small radius.
        let mut assets: Vec<AssetRecord> = (0..10)
            .map(|i| {
                AssetRecord::new(format!("a-{}", i), "Table")
                    .with_attribute("OWNER_USERS", json!([]))
                    .with_attribute("DESCRIPTION", json!(""))
            })
            .collect();
        assets.push(
            AssetRecord::new("owned", "Table")
                .with_attribute("OWNER_USERS", json!(["alice"]))
                .with_attribute("DESCRIPTION", json!("")),
        );

        let snapshot = CoverageSnapshot::aggregate(&assets);
        let detected = detect_anti_patterns(&snapshot);
        assert!(detected.len() >= 2);
        assert_eq!(detected[0].severity, FindingSeverity::Critical);
        for pair in detected.windows(2) {
            assert!(pair[0].severity <= pair[1].severity);
        }
    }
}
