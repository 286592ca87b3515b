// assay-core/src/domain/patterns/plan.rs
//
// Enrichment-plan comparison: an explicit list of field requirements
// checked against actual per-asset attribute values. Unlike templates
// (aggregate coverage), this contract looks at each asset.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use crate::domain::asset::AssetRecord;
use crate::domain::signals::value::{infer_kind, is_populated};

// Per-asset quality penalties.
const MISSING_PENALTY: f64 = 10.0;
const PARTIAL_PENALTY: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequirementStatus {
    Required,
    Optional,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AssetScope {
    #[serde(default)]
    pub asset_types: Vec<String>,
}

/// One field demand in a plan. `field` is a dotted path into the asset's
/// attribute map (e.g. "certificateStatus" or "custom.steward.email").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrichmentPlanRequirement {
    pub field: String,
    #[serde(default = "default_status")]
    pub status: RequirementStatus,
    #[serde(default)]
    pub asset_scope: Option<AssetScope>,
}

fn default_status() -> RequirementStatus {
    RequirementStatus::Required
}

impl EnrichmentPlanRequirement {
    /// Unscoped requirements apply to every asset type.
    pub fn applies_to(&self, type_name: &str) -> bool {
        match &self.asset_scope {
            None => true,
            Some(scope) if scope.asset_types.is_empty() => true,
            Some(scope) => scope
                .asset_types
                .iter()
                .any(|t| t == "*" || t.eq_ignore_ascii_case(type_name)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrichmentPlan {
    pub name: String,
    #[serde(default)]
    pub requirements: Vec<EnrichmentPlanRequirement>,
}

/// State of one requirement on one asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldState {
    /// Value present and populated.
    Complete,
    /// Value present but empty/unpopulated.
    Partial,
    /// Path absent (or traversal hit a non-object).
    Missing,
}

#[derive(Debug, Clone, Serialize)]
pub struct FieldComparisonResult {
    pub field: String,
    pub status: RequirementStatus,
    pub state: FieldState,
}

#[derive(Debug, Clone, Serialize)]
pub struct AssetComparisonSummary {
    pub guid: String,
    pub display_name: String,
    pub results: Vec<FieldComparisonResult>,
    pub applicable_requirements: usize,
    /// round(((complete + 0.5*partial) / applicable) * 100)
    pub completion_percentage: f64,
    /// max(0, 100 - missing*10 - partial*5)
    pub quality_score: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlanComparisonResult {
    pub plan_name: String,
    pub assets: Vec<AssetComparisonSummary>,
    /// Per field: number of assets where the requirement applied and was
    /// not Complete.
    pub gaps_by_field: BTreeMap<String, usize>,
    pub fully_complete: usize,
    pub partially_complete: usize,
    pub not_started: usize,
}

/// Compares every asset against the plan. Total: a malformed value on one
/// asset degrades that asset's result, never the batch.
pub fn compare_plan_to_assets(
    plan: &EnrichmentPlan,
    assets: &[AssetRecord],
) -> PlanComparisonResult {
    let mut summaries = Vec::with_capacity(assets.len());
    let mut gaps_by_field: BTreeMap<String, usize> = BTreeMap::new();
    let mut fully_complete = 0usize;
    let mut partially_complete = 0usize;
    let mut not_started = 0usize;

    for asset in assets {
        let summary = compare_asset(plan, asset, &mut gaps_by_field);

        let complete = summary
            .results
            .iter()
            .filter(|r| r.state == FieldState::Complete)
            .count();
        let partial = summary
            .results
            .iter()
            .filter(|r| r.state == FieldState::Partial)
            .count();

        if summary.applicable_requirements == 0 || complete == summary.applicable_requirements {
            fully_complete += 1;
        } else if complete == 0 && partial == 0 {
            not_started += 1;
        } else {
            partially_complete += 1;
        }

        summaries.push(summary);
    }

    PlanComparisonResult {
        plan_name: plan.name.clone(),
        assets: summaries,
        gaps_by_field,
        fully_complete,
        partially_complete,
        not_started,
    }
}

fn compare_asset(
    plan: &EnrichmentPlan,
    asset: &AssetRecord,
    gaps_by_field: &mut BTreeMap<String, usize>,
) -> AssetComparisonSummary {
    let mut results = Vec::new();
    let mut complete = 0usize;
    let mut partial = 0usize;
    let mut missing = 0usize;

    for requirement in &plan.requirements {
        if !requirement.applies_to(&asset.type_name) {
            continue;
        }

        let state = evaluate_requirement(&asset.attributes, &requirement.field);
        match state {
            FieldState::Complete => complete += 1,
            FieldState::Partial => partial += 1,
            FieldState::Missing => missing += 1,
        }
        if state != FieldState::Complete {
            *gaps_by_field.entry(requirement.field.clone()).or_insert(0) += 1;
        }

        results.push(FieldComparisonResult {
            field: requirement.field.clone(),
            status: requirement.status,
            state,
        });
    }

    let applicable = results.len();
    let completion_percentage = if applicable == 0 {
        // Nothing was demanded of this asset
        100.0
    } else {
        ((complete as f64 + 0.5 * partial as f64) / applicable as f64 * 100.0).round()
    };
    let quality_score =
        (100.0 - missing as f64 * MISSING_PENALTY - partial as f64 * PARTIAL_PENALTY).max(0.0);

    AssetComparisonSummary {
        guid: asset.guid.clone(),
        display_name: asset.label().to_string(),
        results,
        applicable_requirements: applicable,
        completion_percentage,
        quality_score,
    }
}

fn evaluate_requirement(attributes: &Map<String, Value>, path: &str) -> FieldState {
    match lookup_path(attributes, path) {
        None => FieldState::Missing,
        Some(value) => {
            let leaf = path.rsplit('.').next().unwrap_or(path);
            if is_populated(value, infer_kind(leaf, None)) {
                FieldState::Complete
            } else {
                FieldState::Partial
            }
        }
    }
}

/// Dotted-path lookup. Total by construction: a non-object in the middle
/// of the path simply yields None ("field value absent").
fn lookup_path<'a>(attributes: &'a Map<String, Value>, path: &str) -> Option<&'a Value> {
    let mut segments = path.split('.');
    let first = segments.next()?;
    let mut current = lookup_key(attributes, first)?;

    for segment in segments {
        match current {
            Value::Object(map) => current = lookup_key(map, segment)?,
            _ => return None,
        }
    }
    Some(current)
}

fn lookup_key<'a>(map: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    map.get(key)
        .or_else(|| map.iter().find(|(k, _)| k.eq_ignore_ascii_case(key)).map(|(_, v)| v))
}
