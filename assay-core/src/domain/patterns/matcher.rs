// assay-core/src/domain/patterns/matcher.rs

use serde::Serialize;

use crate::domain::coverage::CoverageSnapshot;
use crate::domain::patterns::templates::{PatternTemplate, TEMPLATE_CATALOG};

/// A field "counts" toward a template when its batch coverage reaches this
/// fraction, unless the caller overrides it.
pub const DEFAULT_COVERAGE_THRESHOLD: f64 = 0.7;

/// Required fields weigh double toward the fit score.
const REQUIRED_WEIGHT: f64 = 2.0;
const RECOMMENDED_WEIGHT: f64 = 1.0;

/// Weeks of enrichment work per gap field.
const WEEKS_PER_REQUIRED_GAP: f64 = 1.5;
const WEEKS_PER_RECOMMENDED_GAP: f64 = 1.0;
/// Fixed closing phase.
const OPTIMIZATION_WEEKS: u32 = 2;

#[derive(Debug, Clone, Serialize)]
pub struct PatternMatch {
    pub template_id: String,
    pub name: String,
    /// 0..100 weighted fit.
    pub match_score: f64,
    pub missing_required: Vec<String>,
    pub missing_recommended: Vec<String>,
    /// True iff no required field is below the threshold.
    pub ready_to_implement: bool,
}

/// Deterministic fit report for every template in the catalog, best fit
/// first.
pub fn match_patterns(snapshot: &CoverageSnapshot, threshold: f64) -> Vec<PatternMatch> {
    let mut matches: Vec<PatternMatch> = TEMPLATE_CATALOG
        .iter()
        .map(|template| match_template(template, snapshot, threshold))
        .collect();
    matches.sort_by(|a, b| {
        b.match_score
            .partial_cmp(&a.match_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    matches
}

fn match_template(
    template: &PatternTemplate,
    snapshot: &CoverageSnapshot,
    threshold: f64,
) -> PatternMatch {
    let mut points = 0.0;
    let mut max_points = 0.0;
    let mut missing_required = Vec::new();
    let mut missing_recommended = Vec::new();

    for field in template.required_fields {
        max_points += REQUIRED_WEIGHT;
        if field_counts(snapshot, field, threshold) {
            points += REQUIRED_WEIGHT;
        } else {
            missing_required.push(field.to_string());
        }
    }
    for field in template.recommended_fields {
        max_points += RECOMMENDED_WEIGHT;
        if field_counts(snapshot, field, threshold) {
            points += RECOMMENDED_WEIGHT;
        } else {
            missing_recommended.push(field.to_string());
        }
    }

    let match_score = if max_points > 0.0 {
        (points / max_points * 100.0).round()
    } else {
        0.0
    };

    PatternMatch {
        template_id: template.id.to_string(),
        name: template.name.to_string(),
        match_score,
        ready_to_implement: missing_required.is_empty(),
        missing_required,
        missing_recommended,
    }
}

/// Unresolved fields have no coverage and never count.
fn field_counts(snapshot: &CoverageSnapshot, field_id: &str, threshold: f64) -> bool {
    snapshot
        .fraction(field_id)
        .map(|f| f >= threshold)
        .unwrap_or(false)
}

#[derive(Debug, Clone, Serialize)]
pub struct PlanPhase {
    pub name: String,
    pub fields: Vec<String>,
    pub estimated_weeks: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct ImplementationPlan {
    pub template_id: String,
    pub phases: Vec<PlanPhase>,
    pub total_weeks: u32,
}

/// Phased enrichment plan for one template against current coverage:
/// Foundation (required gaps), Enhancement (recommended gaps), and a
/// fixed-length Optimization phase closing the effort.
pub fn generate_implementation_plan(
    template: &PatternTemplate,
    snapshot: &CoverageSnapshot,
) -> ImplementationPlan {
    generate_plan_with_threshold(template, snapshot, DEFAULT_COVERAGE_THRESHOLD)
}

pub fn generate_plan_with_threshold(
    template: &PatternTemplate,
    snapshot: &CoverageSnapshot,
    threshold: f64,
) -> ImplementationPlan {
    let required_gaps: Vec<String> = template
        .required_fields
        .iter()
        .filter(|f| !field_counts(snapshot, f, threshold))
        .map(|f| f.to_string())
        .collect();
    let recommended_gaps: Vec<String> = template
        .recommended_fields
        .iter()
        .filter(|f| !field_counts(snapshot, f, threshold))
        .map(|f| f.to_string())
        .collect();

    let mut phases = Vec::new();
    if !required_gaps.is_empty() {
        let weeks = (required_gaps.len() as f64 * WEEKS_PER_REQUIRED_GAP).ceil() as u32;
        phases.push(PlanPhase {
            name: "Foundation".to_string(),
            fields: required_gaps,
            estimated_weeks: weeks,
        });
    }
    if !recommended_gaps.is_empty() {
        let weeks = (recommended_gaps.len() as f64 * WEEKS_PER_RECOMMENDED_GAP).ceil() as u32;
        phases.push(PlanPhase {
            name: "Enhancement".to_string(),
            fields: recommended_gaps,
            estimated_weeks: weeks,
        });
    }
    phases.push(PlanPhase {
        name: "Optimization".to_string(),
        fields: Vec::new(),
        estimated_weeks: OPTIMIZATION_WEEKS,
    });

    let total_weeks = phases.iter().map(|p| p.estimated_weeks).sum();
    ImplementationPlan {
        template_id: template.id.to_string(),
        phases,
        total_weeks,
    }
}
