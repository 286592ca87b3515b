// assay-core/src/domain/patterns/mod.rs

pub mod matcher;
pub mod plan;
pub mod templates;

// Re-exports
pub use matcher::{
    DEFAULT_COVERAGE_THRESHOLD, ImplementationPlan, PatternMatch, PlanPhase,
    generate_implementation_plan, match_patterns,
};
pub use plan::{
    AssetComparisonSummary, EnrichmentPlan, EnrichmentPlanRequirement, FieldComparisonResult,
    FieldState, PlanComparisonResult, RequirementStatus, compare_plan_to_assets,
};
pub use templates::{PatternTemplate, TEMPLATE_CATALOG, template_by_id};
