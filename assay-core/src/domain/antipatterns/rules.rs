// assay-core/src/domain/antipatterns/rules.rs
//
// The anti-pattern rule catalog: {metadata, predicate} records over the
// aggregate coverage snapshot. Appending a record adds a rule. Several
// rules need inputs the engine does not receive yet (owner histograms,
// PII detection, domain hierarchies); they stay in the catalog as
// always-None checks because the catalog doubles as the documented
// taxonomy of governance risks.

use crate::domain::antipatterns::FindingSeverity;
use crate::domain::coverage::CoverageSnapshot;

/// Raw numbers behind a firing rule.
#[derive(Debug, Clone)]
pub struct Detection {
    pub affected_count: usize,
    pub total_count: usize,
    pub percentage_affected: f64,
    pub detail: String,
}

/// Static rule: metadata plus a pure predicate over the snapshot.
pub struct AntiPatternRule {
    pub id: &'static str,
    pub name: &'static str,
    pub severity: FindingSeverity,
    pub category: &'static str,
    pub description: &'static str,
    pub check: fn(&CoverageSnapshot) -> Option<Detection>,
}

// --- COVERAGE THRESHOLDS (fractions) ---
const ORPHAN_THRESHOLD: f64 = 0.5;
const DOCUMENTATION_THRESHOLD: f64 = 0.3;
const GLOSSARY_THRESHOLD: f64 = 0.2;
const LINEAGE_THRESHOLD: f64 = 0.4;
const CERTIFICATION_THRESHOLD: f64 = 0.25;
const QUALITY_MONITOR_THRESHOLD: f64 = 0.2;

/// Fires when the best coverage among the candidate fields is strictly
/// below the threshold. Fields that never resolved in this batch are
/// skipped; if none resolved the rule cannot judge and stays silent.
fn coverage_below(
    snapshot: &CoverageSnapshot,
    field_ids: &[&str],
    threshold: f64,
) -> Option<Detection> {
    let mut best: Option<(&str, f64, usize)> = None;
    for id in field_ids {
        if let Some(cov) = snapshot.field(id) {
            if let Some(fraction) = cov.fraction() {
                let replace = match best {
                    Some((_, best_fraction, _)) => fraction > best_fraction,
                    None => true,
                };
                if replace {
                    best = Some((id, fraction, cov.populated));
                }
            }
        }
    }

    let (field_id, fraction, populated) = best?;
    if fraction >= threshold {
        return None;
    }

    let total = snapshot.total_assets;
    let affected = total.saturating_sub(
        // Scale the best field's population up to the batch denominator
        ((populated as f64 / snapshot.field(field_id)?.total.max(1) as f64) * total as f64)
            .round() as usize,
    );
    let percentage_affected = if total > 0 {
        affected as f64 / total as f64 * 100.0
    } else {
        0.0
    };

    Some(Detection {
        affected_count: affected,
        total_count: total,
        percentage_affected,
        detail: format!(
            "'{}' coverage is {:.0}% (threshold {:.0}%)",
            field_id,
            fraction * 100.0,
            threshold * 100.0
        ),
    })
}

// Placeholder predicate for rules whose inputs are not collected yet.
fn not_yet_detectable(_snapshot: &CoverageSnapshot) -> Option<Detection> {
    None
}

pub const RULE_CATALOG: &[AntiPatternRule] = &[
    AntiPatternRule {
        id: "orphan-assets",
        name: "Orphan Assets",
        severity: FindingSeverity::Critical,
        category: "ownership",
        description: "The majority of assets have no accountable owner.",
        check: |s| {
            coverage_below(s, &["owner_users", "owner_groups"], ORPHAN_THRESHOLD)
        },
    },
    AntiPatternRule {
        id: "documentation-desert",
        name: "Documentation Desert",
        severity: FindingSeverity::Warning,
        category: "documentation",
        description: "Descriptions are missing across most of the catalog.",
        check: |s| coverage_below(s, &["description"], DOCUMENTATION_THRESHOLD),
    },
    AntiPatternRule {
        id: "semantic-vacuum",
        name: "Semantic Vacuum",
        severity: FindingSeverity::Warning,
        category: "documentation",
        description: "Glossary terms are almost never assigned.",
        check: |s| coverage_below(s, &["glossary_terms"], GLOSSARY_THRESHOLD),
    },
    AntiPatternRule {
        id: "lineage-blindspot",
        name: "Lineage Blindspot",
        severity: FindingSeverity::Warning,
        category: "lineage",
        description: "Lineage is captured for too few assets to trace impact.",
        check: |s| coverage_below(s, &["has_lineage"], LINEAGE_THRESHOLD),
    },
    AntiPatternRule {
        id: "certification-gap",
        name: "Certification Gap",
        severity: FindingSeverity::Warning,
        category: "trust",
        description: "Few assets carry an explicit certification verdict.",
        check: |s| coverage_below(s, &["certificate_status"], CERTIFICATION_THRESHOLD),
    },
    AntiPatternRule {
        id: "unmonitored-quality",
        name: "Unmonitored Quality",
        severity: FindingSeverity::Info,
        category: "quality",
        description: "No data-quality tooling watches most assets.",
        check: |s| {
            coverage_below(
                s,
                &["dq_soda_status", "mc_is_monitored"],
                QUALITY_MONITOR_THRESHOLD,
            )
        },
    },
    // --- NOT YET DETECTABLE (inputs not collected) ---
    AntiPatternRule {
        id: "owner-concentration",
        name: "Owner Concentration",
        severity: FindingSeverity::Critical,
        category: "ownership",
        description: "A handful of people own most of the catalog. Needs an owner distribution histogram.",
        check: not_yet_detectable,
    },
    AntiPatternRule {
        id: "stale-owners",
        name: "Stale Owners",
        severity: FindingSeverity::Warning,
        category: "ownership",
        description: "Owners who left the organization still hold assets. Needs identity-system reconciliation.",
        check: not_yet_detectable,
    },
    AntiPatternRule {
        id: "tag-explosion",
        name: "Tag Explosion",
        severity: FindingSeverity::Warning,
        category: "governance",
        description: "An unbounded, redundant tag vocabulary. Needs per-tag usage counts.",
        check: not_yet_detectable,
    },
    AntiPatternRule {
        id: "pii-ungoverned",
        name: "Ungoverned PII",
        severity: FindingSeverity::Critical,
        category: "protection",
        description: "Likely-PII columns without sensitivity tags. Needs content-level PII detection.",
        check: not_yet_detectable,
    },
    AntiPatternRule {
        id: "domain-structure",
        name: "Missing Domain Structure",
        severity: FindingSeverity::Info,
        category: "organization",
        description: "Assets are not organized into data domains. Needs the domain hierarchy.",
        check: not_yet_detectable,
    },
];

pub fn rule_by_id(id: &str) -> Option<&'static AntiPatternRule> {
    RULE_CATALOG.iter().find(|r| r.id == id)
}
