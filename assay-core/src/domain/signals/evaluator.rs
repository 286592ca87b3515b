// assay-core/src/domain/signals/evaluator.rs
//
// Schema-adaptive signal evaluation. The evaluator resolves the field
// catalog against a discovered column set ONCE, then evaluates any number
// of rows against the resulting bindings (compile once, evaluate many).

use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::collections::HashMap;
use std::str::FromStr;

use crate::domain::asset::AssetRecord;
use crate::domain::catalog::fields::{self, FieldDefinition};
use crate::domain::catalog::signals::CanonicalSignal;
use crate::domain::signals::SignalValue;
use crate::domain::signals::columns::ColumnResolver;
use crate::domain::signals::value::{ValueKind, infer_kind, is_populated};

/// One contributing field resolved against the current schema.
#[derive(Debug, Clone)]
struct FieldBinding {
    /// Discovered column spelling.
    column: String,
    kind: ValueKind,
    weight: f64,
}

/// Result of evaluating one signal id for one row, with a diagnostic
/// reason when the evaluation could not happen.
#[derive(Debug, Clone, serde::Serialize)]
pub struct SignalEvaluation {
    pub signal_id: String,
    pub value: SignalValue,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Per-asset signal set, the unit the Score and Gap engines consume.
#[derive(Debug, Clone, serde::Serialize)]
pub struct AssetSignals {
    pub guid: String,
    pub signals: BTreeMap<CanonicalSignal, SignalValue>,
}

/// Schema confidence report, for UI drill-down only. Never feeds back
/// into per-asset evaluation.
#[derive(Debug, Clone, serde::Serialize)]
pub struct SchemaSummary {
    pub total_columns: usize,
    pub resolved_fields: usize,
    pub evaluable_signals: usize,
    /// Per signal: fraction of its defined weight resolvable here.
    pub signal_confidence: BTreeMap<CanonicalSignal, f64>,
}

pub struct SchemaEvaluator {
    column_count: usize,
    bindings: BTreeMap<CanonicalSignal, Vec<FieldBinding>>,
}

impl SchemaEvaluator {
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::from_resolver(ColumnResolver::new(columns))
    }

    /// Variant taking column type hints from the discovery layer.
    pub fn with_types<I, S>(columns: I, types: HashMap<String, String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::from_resolver(ColumnResolver::with_types(columns, types))
    }

    fn from_resolver(resolver: ColumnResolver) -> Self {
        let mut bindings: BTreeMap<CanonicalSignal, Vec<FieldBinding>> = BTreeMap::new();

        for signal in CanonicalSignal::ALL {
            let mut resolved = Vec::new();
            for (field, weight) in fields::fields_for_signal(signal) {
                if let Some(column) = resolver.resolve_any(field.source_columns) {
                    let kind = infer_kind(column, resolver.type_hint(column));
                    resolved.push(FieldBinding {
                        column: column.to_string(),
                        kind,
                        weight,
                    });
                }
            }
            bindings.insert(signal, resolved);
        }

        Self {
            column_count: resolver.len(),
            bindings,
        }
    }

    /// Evaluates one signal for one row.
    ///
    /// The ordering is exact and load-bearing: a signal with zero
    /// contributing fields resolvable in this schema is `Unknown`; with at
    /// least one resolvable field it is `Present` or `Absent` depending on
    /// whether any of them is populated.
    pub fn evaluate_signal(&self, signal: CanonicalSignal, row: &Map<String, Value>) -> SignalValue {
        let Some(bindings) = self.bindings.get(&signal) else {
            return SignalValue::Unknown;
        };
        if bindings.is_empty() {
            return SignalValue::Unknown;
        }

        let populated = bindings.iter().any(|b| {
            lookup_value(row, &b.column)
                .map(|v| is_populated(v, b.kind))
                .unwrap_or(false)
        });

        if populated {
            SignalValue::Present
        } else {
            SignalValue::Absent
        }
    }

    /// String-keyed entry point kept total on purpose: an unrecognized
    /// signal id yields an annotated `Unknown`, never an error, so one
    /// malformed request cannot abort a batch.
    pub fn evaluate_signal_id(&self, signal_id: &str, row: &Map<String, Value>) -> SignalEvaluation {
        match CanonicalSignal::from_str(signal_id) {
            Ok(signal) => SignalEvaluation {
                signal_id: signal.as_str().to_string(),
                value: self.evaluate_signal(signal, row),
                reason: None,
            },
            Err(e) => SignalEvaluation {
                signal_id: signal_id.to_string(),
                value: SignalValue::Unknown,
                reason: Some(e.to_string()),
            },
        }
    }

    pub fn evaluate_all(&self, row: &Map<String, Value>) -> BTreeMap<CanonicalSignal, SignalValue> {
        CanonicalSignal::ALL
            .into_iter()
            .map(|signal| (signal, self.evaluate_signal(signal, row)))
            .collect()
    }

    /// Independent per-asset map; order of assets is preserved.
    pub fn evaluate_batch(&self, assets: &[AssetRecord]) -> Vec<AssetSignals> {
        assets
            .iter()
            .map(|asset| AssetSignals {
                guid: asset.guid.clone(),
                signals: self.evaluate_all(&asset.attributes),
            })
            .collect()
    }

    /// Per signal, the fraction of its total defined weight resolvable
    /// against the current schema. Reporting only; does not feed into
    /// `evaluate_signal`.
    pub fn evaluable_signals(&self) -> BTreeMap<CanonicalSignal, f64> {
        CanonicalSignal::ALL
            .into_iter()
            .map(|signal| {
                let total = fields::total_weight(signal);
                let resolved: f64 = self
                    .bindings
                    .get(&signal)
                    .map(|b| b.iter().map(|x| x.weight).sum())
                    .unwrap_or(0.0);
                let fraction = if total > 0.0 { resolved / total } else { 0.0 };
                (signal, fraction)
            })
            .collect()
    }

    pub fn summary(&self) -> SchemaSummary {
        let signal_confidence = self.evaluable_signals();
        SchemaSummary {
            total_columns: self.column_count,
            resolved_fields: self.bindings.values().map(Vec::len).sum(),
            evaluable_signals: signal_confidence.values().filter(|f| **f > 0.0).count(),
            signal_confidence,
        }
    }
}

/// Exact key first, then a case-insensitive scan. The fetcher normalizes
/// keys, but rows coming straight from a connector may disagree on case.
fn lookup_value<'a>(row: &'a Map<String, Value>, column: &str) -> Option<&'a Value> {
    if let Some(v) = row.get(column) {
        return Some(v);
    }
    row.iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(column))
        .map(|(_, v)| v)
}

/// Plain single-asset contract: the attribute map's own keys ARE the
/// schema. A signal whose fields never appear among the keys is `Unknown`.
pub fn evaluate_signals(attributes: &Map<String, Value>) -> BTreeMap<CanonicalSignal, SignalValue> {
    let evaluator = SchemaEvaluator::new(attributes.keys().cloned());
    evaluator.evaluate_all(attributes)
}

/// Resolves a catalog field against an attribute map and returns its raw
/// value. Used by the Score Engine for usage magnitudes.
pub fn lookup_field<'a>(
    attributes: &'a Map<String, Value>,
    field: &FieldDefinition,
) -> Option<&'a Value> {
    let resolver = ColumnResolver::new(attributes.keys().cloned());
    resolver
        .resolve_any(field.source_columns)
        .and_then(|column| lookup_value(attributes, column))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(pairs: &[(&str, Value)]) -> Map<String, Value> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_unknown_when_no_contributing_column_resolves() {
        // Schema without any ownership column: OWNERSHIP must be Unknown,
        // never Absent.
        let evaluator = SchemaEvaluator::new(["DESCRIPTION", "POPULARITY_SCORE"]);
        let r = row(&[("DESCRIPTION", json!("sales facts"))]);
        assert_eq!(
            evaluator.evaluate_signal(CanonicalSignal::Ownership, &r),
            SignalValue::Unknown
        );
    }

    #[test]
    fn test_absent_when_column_resolves_but_is_empty() {
        let evaluator = SchemaEvaluator::new(["OWNER_USERS"]);
        let r = row(&[("OWNER_USERS", json!([]))]);
        assert_eq!(
            evaluator.evaluate_signal(CanonicalSignal::Ownership, &r),
            SignalValue::Absent
        );
    }

    #[test]
    fn test_present_when_any_contributing_field_is_populated() {
        let evaluator = SchemaEvaluator::new(["OWNER_USERS", "OWNER_GROUPS"]);
        let r = row(&[
            ("OWNER_USERS", json!([])),
            ("OWNER_GROUPS", json!(["data-platform"])),
        ]);
        assert_eq!(
            evaluator.evaluate_signal(CanonicalSignal::Ownership, &r),
            SignalValue::Present
        );
    }

    #[test]
    fn test_monotonicity_populating_a_field_never_downgrades() {
        let evaluator = SchemaEvaluator::new(["OWNER_USERS"]);
        let before = evaluator.evaluate_signal(
            CanonicalSignal::Ownership,
            &row(&[("OWNER_USERS", json!([]))]),
        );
        let after = evaluator.evaluate_signal(
            CanonicalSignal::Ownership,
            &row(&[("OWNER_USERS", json!(["alice"]))]),
        );
        assert_eq!(before, SignalValue::Absent);
        assert_eq!(after, SignalValue::Present);
    }

    #[test]
    fn test_unrecognized_signal_id_yields_annotated_unknown() {
        let evaluator = SchemaEvaluator::new(["OWNER_USERS"]);
        let eval = evaluator.evaluate_signal_id("POPULARITY", &Map::new());
        assert_eq!(eval.value, SignalValue::Unknown);
        assert!(eval.reason.is_some());
    }

    #[test]
    fn test_camel_case_schema_still_resolves() {
        // Atlan-style attribute spellings
        let evaluator = SchemaEvaluator::new(["ownerUsers", "__hasLineage"]);
        let r = row(&[
            ("ownerUsers", json!(["alice"])),
            ("__hasLineage", json!(true)),
        ]);
        assert_eq!(
            evaluator.evaluate_signal(CanonicalSignal::Ownership, &r),
            SignalValue::Present
        );
        assert_eq!(
            evaluator.evaluate_signal(CanonicalSignal::Lineage, &r),
            SignalValue::Present
        );
    }

    #[test]
    fn test_evaluable_fraction_reflects_partial_resolution() {
        // Only owner_users (weight 0.4 of OWNERSHIP's 1.0) resolves
        let evaluator = SchemaEvaluator::new(["OWNER_USERS"]);
        let confidence = evaluator.evaluable_signals();
        let ownership = confidence[&CanonicalSignal::Ownership];
        assert!((ownership - 0.4).abs() < 1e-9);
        assert_eq!(confidence[&CanonicalSignal::Trust], 0.0);
    }

    #[test]
    fn test_string_encoded_arrays_count_as_populated() {
        let evaluator = SchemaEvaluator::new(["OWNER_USERS"]);
        let r = row(&[("OWNER_USERS", json!("[\"alice\"]"))]);
        assert_eq!(
            evaluator.evaluate_signal(CanonicalSignal::Ownership, &r),
            SignalValue::Present
        );
    }

    #[test]
    fn test_evaluate_signals_over_raw_attribute_map() {
        let attrs = row(&[
            ("ownerUsers", json!(["alice"])),
            ("description", json!("")),
        ]);
        let signals = evaluate_signals(&attrs);
        assert_eq!(signals[&CanonicalSignal::Ownership], SignalValue::Present);
        assert_eq!(signals[&CanonicalSignal::Semantics], SignalValue::Absent);
        // Nothing lineage-ish in the map at all
        assert_eq!(signals[&CanonicalSignal::Lineage], SignalValue::Unknown);
    }

    #[test]
    fn test_batch_preserves_order_and_guids() {
        let a = AssetRecord::new("g1", "Table").with_attribute("OWNER_USERS", json!(["a"]));
        let b = AssetRecord::new("g2", "Table").with_attribute("OWNER_USERS", json!([]));
        let evaluator = SchemaEvaluator::new(["OWNER_USERS"]);
        let out = evaluator.evaluate_batch(&[a, b]);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].guid, "g1");
        assert_eq!(out[0].signals[&CanonicalSignal::Ownership], SignalValue::Present);
        assert_eq!(out[1].signals[&CanonicalSignal::Ownership], SignalValue::Absent);
    }

    #[test]
    fn test_summary_counts() {
        let evaluator = SchemaEvaluator::new(["OWNER_USERS", "DESCRIPTION", "RANDOM_COL"]);
        let summary = evaluator.summary();
        assert_eq!(summary.total_columns, 3);
        // owner_users -> OWNERSHIP; description -> SEMANTICS + AI_READY
        assert_eq!(summary.resolved_fields, 3);
        assert!(summary.evaluable_signals >= 3);
    }
}
