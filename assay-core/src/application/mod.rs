// assay-core/src/application/mod.rs

pub mod assessment;

pub use assessment::{AssessmentConfig, AssessmentReport, run_assessment};
