// assay-core/src/domain/gaps/engine.rs

use std::collections::BTreeMap;

use crate::domain::asset::AssetRecord;
use crate::domain::catalog::fields;
use crate::domain::catalog::signals::CanonicalSignal;
use crate::domain::gaps::{AggregatedGap, AssetGap, AssetGapSet, GapConfig, GapReport, GapSummary};
use crate::domain::signals::{SignalValue, evaluate_signals};

/// Least urgent priority; optional-list gaps are bumped toward it.
const PRIORITY_FLOOR: u8 = 3;

pub struct GapEngine {
    config: GapConfig,
}

impl GapEngine {
    pub fn new(config: GapConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GapConfig {
        &self.config
    }

    /// Gaps for a single asset. Required signals gap on anything that is
    /// not Present (Unknown included); optional signals only gap on a
    /// confirmed Absent.
    pub fn find_asset_gaps(&self, asset: &AssetRecord) -> Vec<AssetGap> {
        let signals = evaluate_signals(&asset.attributes);
        let mut gaps = Vec::new();

        for signal in &self.config.required_signals {
            let value = signals.get(signal).copied().unwrap_or(SignalValue::Unknown);
            if value != SignalValue::Present {
                gaps.push(self.build_gap(*signal, asset, false, value));
            }
        }
        for signal in &self.config.optional_signals {
            let value = signals.get(signal).copied().unwrap_or(SignalValue::Unknown);
            if value == SignalValue::Absent {
                gaps.push(self.build_gap(*signal, asset, true, value));
            }
        }

        gaps
    }

    /// Full batch analysis: per-asset pass, then a single-pass signal-level
    /// roll-up. Per-asset results are independent; the reduction runs after
    /// all of them.
    pub fn analyze(&self, assets: &[AssetRecord]) -> GapReport {
        let asset_gaps: Vec<AssetGapSet> = assets
            .iter()
            .map(|asset| AssetGapSet {
                guid: asset.guid.clone(),
                display_name: asset.label().to_string(),
                gaps: self.find_asset_gaps(asset),
            })
            .collect();

        let aggregated_gaps = self.aggregate(&asset_gaps, assets.len());

        let total_gaps: usize = asset_gaps.iter().map(|a| a.gaps.len()).sum();
        let mut by_priority: BTreeMap<u8, usize> = BTreeMap::new();
        for set in &asset_gaps {
            for gap in &set.gaps {
                *by_priority.entry(gap.priority).or_insert(0) += 1;
            }
        }

        GapReport {
            summary: GapSummary {
                total_assets: assets.len(),
                assets_with_gaps: asset_gaps.iter().filter(|a| !a.gaps.is_empty()).count(),
                total_gaps,
                by_priority,
            },
            asset_gaps,
            aggregated_gaps,
        }
    }

    fn build_gap(
        &self,
        signal: CanonicalSignal,
        asset: &AssetRecord,
        from_optional: bool,
        value: SignalValue,
    ) -> AssetGap {
        let def = signal.definition();
        let mut priority = def.severity.priority();
        if from_optional {
            // One tier less urgent, capped at the floor
            priority = (priority + 1).min(PRIORITY_FLOOR);
        }

        let state = match value {
            SignalValue::Unknown => "not evaluable for this schema",
            _ => "missing",
        };

        AssetGap {
            signal,
            priority,
            severity: def.severity,
            from_optional,
            remediation_fields: remediation_fields_for(signal, &asset.type_name),
            description: format!("{} is {} on '{}'", def.display_name, state, asset.label()),
        }
    }

    fn aggregate(&self, asset_gaps: &[AssetGapSet], total_assets: usize) -> Vec<AggregatedGap> {
        let mut by_signal: BTreeMap<CanonicalSignal, AggregatedGap> = BTreeMap::new();

        for set in asset_gaps {
            for gap in &set.gaps {
                let entry = by_signal.entry(gap.signal).or_insert_with(|| AggregatedGap {
                    id: format!("gap-{}", gap.signal.as_str().to_lowercase()),
                    signal: gap.signal,
                    priority: gap.priority,
                    severity: gap.severity,
                    affected_asset_ids: Default::default(),
                    affected_asset_count: 0,
                    coverage_percent: 0,
                    remediation_fields: Vec::new(),
                    description: String::new(),
                });
                // The most urgent per-asset priority wins for the aggregate
                entry.priority = entry.priority.min(gap.priority);
                entry.affected_asset_ids.insert(set.guid.clone());
                for field in &gap.remediation_fields {
                    if !entry.remediation_fields.contains(field) {
                        entry.remediation_fields.push(field.clone());
                    }
                }
            }
        }

        let mut aggregated: Vec<AggregatedGap> = by_signal
            .into_values()
            .map(|mut gap| {
                gap.affected_asset_count = gap.affected_asset_ids.len();
                gap.coverage_percent = coverage_percent(gap.affected_asset_count, total_assets);
                gap.remediation_fields.sort();
                gap.description = format!(
                    "{} missing on {} of {} assets",
                    gap.signal.definition().display_name,
                    gap.affected_asset_count,
                    total_assets
                );
                gap
            })
            .collect();

        // Priority ascending, then widest blast radius first
        aggregated.sort_by(|a, b| {
            a.priority
                .cmp(&b.priority)
                .then(b.affected_asset_count.cmp(&a.affected_asset_count))
        });
        aggregated
    }
}

impl Default for GapEngine {
    fn default() -> Self {
        Self::new(GapConfig::default())
    }
}

fn coverage_percent(affected: usize, total: usize) -> u32 {
    if total == 0 {
        return 100;
    }
    ((1.0 - affected as f64 / total as f64) * 100.0).round() as u32
}

/// Display names of the catalog fields that contribute to the signal and
/// apply to this asset type. Recomputed per type: applicability varies.
fn remediation_fields_for(signal: CanonicalSignal, type_name: &str) -> Vec<String> {
    fields::fields_for_signal(signal)
        .filter(|(f, _)| f.applies_to(type_name))
        .map(|(f, _)| f.display_name.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn owned(guid: &str) -> AssetRecord {
        AssetRecord::new(guid, "Table")
            .with_attribute("OWNER_USERS", json!(["alice"]))
            .with_attribute("DESCRIPTION", json!("documented"))
            .with_attribute("HAS_LINEAGE", json!(true))
            .with_attribute("TAGS", json!(["internal"]))
            .with_attribute("CERTIFICATE_STATUS", json!("VERIFIED"))
    }

    fn orphan(guid: &str) -> AssetRecord {
        let mut asset = owned(guid);
        asset
            .attributes
            .insert("OWNER_USERS".to_string(), json!([]));
        asset
    }

    #[test]
    fn test_fully_governed_asset_has_no_required_gaps() {
        let engine = GapEngine::default();
        let gaps = engine.find_asset_gaps(&owned("g1"));
        assert!(gaps.iter().all(|g| g.from_optional), "unexpected: {:?}", gaps);
    }

    #[test]
    fn test_required_gap_on_unknown_signal() {
        // No trust columns at all -> TRUST is Unknown -> still a gap
        let engine = GapEngine::default();
        let asset = AssetRecord::new("g1", "Table")
            .with_attribute("OWNER_USERS", json!(["alice"]));
        let gaps = engine.find_asset_gaps(&asset);
        assert!(gaps.iter().any(|g| g.signal == CanonicalSignal::Trust));
    }

    #[test]
    fn test_optional_gap_only_on_confirmed_absent() {
        let engine = GapEngine::default();

        // QUALITY columns missing entirely -> Unknown -> no optional gap
        let blind = AssetRecord::new("g1", "Table");
        let gaps = engine.find_asset_gaps(&blind);
        assert!(!gaps.iter().any(|g| g.signal == CanonicalSignal::Quality));

        // QUALITY column present but empty -> Absent -> optional gap
        let unmonitored = AssetRecord::new("g2", "Table")
            .with_attribute("ASSET_SODA_DQ_STATUS", json!(""));
        let gaps = engine.find_asset_gaps(&unmonitored);
        assert!(gaps.iter().any(|g| g.signal == CanonicalSignal::Quality));
    }

    #[test]
    fn test_optional_priority_is_bumped_one_tier() {
        let engine = GapEngine::default();
        // ACCESS is MED (priority 2); as optional it lands at 3
        let asset = AssetRecord::new("g", "Table").with_attribute("ADMIN_USERS", json!([]));
        let gaps = engine.find_asset_gaps(&asset);
        let access = gaps
            .iter()
            .find(|g| g.signal == CanonicalSignal::Access)
            .unwrap();
        assert!(access.from_optional);
        assert_eq!(access.priority, 3);
    }

    #[test]
    fn test_scenario_batch_aggregation_and_coverage_duality() {
        // 100 assets, 40 with empty owners -> one OWNERSHIP gap,
        // affected=40, coverage=60
        let mut assets = Vec::new();
        for i in 0..60 {
            assets.push(owned(&format!("ok-{}", i)));
        }
        for i in 0..40 {
            assets.push(orphan(&format!("orphan-{}", i)));
        }

        let report = GapEngine::default().analyze(&assets);
        let ownership = report
            .aggregated_gaps
            .iter()
            .find(|g| g.signal == CanonicalSignal::Ownership)
            .expect("ownership gap expected");

        assert_eq!(ownership.affected_asset_count, 40);
        assert_eq!(ownership.affected_asset_ids.len(), 40);
        assert_eq!(ownership.coverage_percent, 60);
        assert_eq!(ownership.priority, 1);
    }

    #[test]
    fn test_aggregated_sort_order() {
        // Two gap signals with different priorities: required OWNERSHIP
        // (1) must come before optional QUALITY (3) regardless of counts.
        let mut assets = vec![orphan("a"), orphan("b")];
        assets.push(
            owned("c").with_attribute("ASSET_SODA_DQ_STATUS", json!("")),
        );

        let report = GapEngine::default().analyze(&assets);
        let positions: Vec<CanonicalSignal> =
            report.aggregated_gaps.iter().map(|g| g.signal).collect();
        let own = positions.iter().position(|s| *s == CanonicalSignal::Ownership);
        let quality = positions.iter().position(|s| *s == CanonicalSignal::Quality);
        assert!(own < quality);
    }

    #[test]
    fn test_remediation_fields_respect_asset_type() {
        let engine = GapEngine::default();

        // LINEAGE gap on a Table: key-constraint fields are Column-only
        let table = AssetRecord::new("t", "Table").with_attribute("HAS_LINEAGE", json!(false));
        let gaps = engine.find_asset_gaps(&table);
        let lineage = gaps
            .iter()
            .find(|g| g.signal == CanonicalSignal::Lineage)
            .unwrap();
        assert_eq!(lineage.remediation_fields, vec!["Has Lineage".to_string()]);

        let column = AssetRecord::new("c", "Column").with_attribute("HAS_LINEAGE", json!(false));
        let gaps = engine.find_asset_gaps(&column);
        let lineage = gaps
            .iter()
            .find(|g| g.signal == CanonicalSignal::Lineage)
            .unwrap();
        assert!(lineage.remediation_fields.contains(&"Is Primary Key".to_string()));
    }

    #[test]
    fn test_summary_counts() {
        let assets = vec![owned("a"), orphan("b")];
        let report = GapEngine::default().analyze(&assets);
        assert_eq!(report.summary.total_assets, 2);
        assert!(report.summary.assets_with_gaps >= 1);
        assert_eq!(
            report.summary.total_gaps,
            report.asset_gaps.iter().map(|a| a.gaps.len()).sum::<usize>()
        );
    }
}
