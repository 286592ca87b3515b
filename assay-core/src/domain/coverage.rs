// assay-core/src/domain/coverage.rs
//
// Aggregate field-coverage statistics for one run. The anti-pattern
// detector and the pattern matcher consume this snapshot, never raw rows.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::domain::asset::AssetRecord;
use crate::domain::catalog::fields::FIELD_CATALOG;
use crate::domain::signals::columns::ColumnResolver;
use crate::domain::signals::value::{infer_kind, is_populated};

/// Population counts for one catalog field across a batch.
/// `total` counts assets where the field resolved in the asset's own
/// attribute keys AND applies to its type; `populated` the subset passing
/// the populated rule.
#[derive(Debug, Clone, Serialize)]
pub struct FieldCoverage {
    pub field_id: String,
    pub display_name: String,
    pub total: usize,
    pub populated: usize,
}

impl FieldCoverage {
    /// Populated fraction in [0,1]. None when the field never resolved —
    /// the aggregate cousin of the per-asset UNKNOWN.
    pub fn fraction(&self) -> Option<f64> {
        if self.total == 0 {
            None
        } else {
            Some(self.populated as f64 / self.total as f64)
        }
    }

    pub fn percent(&self) -> Option<f64> {
        self.fraction().map(|f| f * 100.0)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CoverageSnapshot {
    pub total_assets: usize,
    pub fields: BTreeMap<String, FieldCoverage>,
}

impl CoverageSnapshot {
    /// Single-pass reduction over the batch. Per-asset work is independent;
    /// the shared catalogs are read-only.
    pub fn aggregate(assets: &[AssetRecord]) -> Self {
        let mut fields: BTreeMap<String, FieldCoverage> = FIELD_CATALOG
            .iter()
            .map(|f| {
                (
                    f.id.to_string(),
                    FieldCoverage {
                        field_id: f.id.to_string(),
                        display_name: f.display_name.to_string(),
                        total: 0,
                        populated: 0,
                    },
                )
            })
            .collect();

        for asset in assets {
            let resolver = ColumnResolver::new(asset.attributes.keys().cloned());
            for field in FIELD_CATALOG {
                if !field.applies_to(&asset.type_name) {
                    continue;
                }
                let Some(column) = resolver.resolve_any(field.source_columns) else {
                    continue;
                };
                let Some(entry) = fields.get_mut(field.id) else {
                    continue;
                };
                entry.total += 1;

                let kind = infer_kind(column, None);
                let populated = asset
                    .attributes
                    .get(column)
                    .or_else(|| {
                        asset
                            .attributes
                            .iter()
                            .find(|(k, _)| k.eq_ignore_ascii_case(column))
                            .map(|(_, v)| v)
                    })
                    .map(|v| is_populated(v, kind))
                    .unwrap_or(false);
                if populated {
                    entry.populated += 1;
                }
            }
        }

        Self {
            total_assets: assets.len(),
            fields,
        }
    }

    pub fn field(&self, field_id: &str) -> Option<&FieldCoverage> {
        self.fields.get(field_id)
    }

    /// Populated fraction for a field, None when it never resolved.
    pub fn fraction(&self, field_id: &str) -> Option<f64> {
        self.field(field_id).and_then(FieldCoverage::fraction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_aggregate_counts_resolved_and_populated() {
        let assets = vec![
            AssetRecord::new("a", "Table").with_attribute("OWNER_USERS", json!(["alice"])),
            AssetRecord::new("b", "Table").with_attribute("OWNER_USERS", json!([])),
            AssetRecord::new("c", "Table"), // column missing entirely
        ];
        let snapshot = CoverageSnapshot::aggregate(&assets);
        let owners = snapshot.field("owner_users").unwrap();
        assert_eq!(owners.total, 2);
        assert_eq!(owners.populated, 1);
        assert_eq!(snapshot.fraction("owner_users"), Some(0.5));
    }

    #[test]
    fn test_unresolved_field_has_no_fraction() {
        let assets = vec![AssetRecord::new("a", "Table")];
        let snapshot = CoverageSnapshot::aggregate(&assets);
        assert_eq!(snapshot.fraction("owner_users"), None);
    }

    #[test]
    fn test_type_scoped_fields_skip_inapplicable_assets() {
        let assets = vec![
            AssetRecord::new("t", "Table").with_attribute("IS_PRIMARY_KEY", json!(true)),
            AssetRecord::new("c", "Column").with_attribute("IS_PRIMARY_KEY", json!(true)),
        ];
        let snapshot = CoverageSnapshot::aggregate(&assets);
        // Only the Column asset counts: the field does not apply to Tables
        let pk = snapshot.field("is_primary_key").unwrap();
        assert_eq!(pk.total, 1);
        assert_eq!(pk.populated, 1);
    }
}
