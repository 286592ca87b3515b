// assay-core/src/domain/error.rs

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum DomainError {
    #[error("Unknown signal identifier: '{0}'")]
    #[diagnostic(
        code(assay::domain::unknown_signal),
        help("Valid identifiers: OWNERSHIP, SEMANTICS, LINEAGE, SENSITIVITY, ACCESS, QUALITY, FRESHNESS, USAGE, TRUST, AI_READY.")
    )]
    UnknownSignal(String),

    #[error("Unknown field identifier: '{0}'")]
    #[diagnostic(code(assay::domain::unknown_field))]
    UnknownField(String),

    #[error("Unknown pattern template: '{0}'")]
    #[diagnostic(
        code(assay::domain::unknown_template),
        help("Run 'assay catalog patterns' to list the available templates.")
    )]
    UnknownTemplate(String),

    #[error("Enrichment plan '{plan}' is empty")]
    #[diagnostic(
        code(assay::domain::empty_plan),
        help("A plan needs at least one field requirement to be comparable.")
    )]
    EmptyPlan { plan: String },
}
