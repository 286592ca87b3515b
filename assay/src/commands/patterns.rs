// assay/src/commands/patterns.rs
//
// USE CASE: template fit scores, optionally with a phased implementation
// plan for one template.

use comfy_table::{Table, presets::UTF8_FULL};
use std::path::PathBuf;

use assay_core::domain::coverage::CoverageSnapshot;
use assay_core::domain::error::DomainError;
use assay_core::domain::patterns::matcher::{
    DEFAULT_COVERAGE_THRESHOLD, generate_plan_with_threshold, match_patterns,
};
use assay_core::domain::patterns::templates::template_by_id;
use assay_core::infrastructure::load_assets;

pub fn execute(
    snapshot: PathBuf,
    threshold: Option<f64>,
    plan: Option<String>,
) -> anyhow::Result<()> {
    let assets = load_assets(&snapshot)?;
    let coverage = CoverageSnapshot::aggregate(&assets);
    let threshold = threshold.unwrap_or(DEFAULT_COVERAGE_THRESHOLD);

    let matches = match_patterns(&coverage, threshold);

    println!("🧩 Pattern fit across {} assets (bar: {:.0}%)", assets.len(), threshold * 100.0);
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Template", "Score", "Ready", "Missing required"]);
    for m in &matches {
        table.add_row(vec![
            m.name.clone(),
            format!("{:.0}", m.match_score),
            if m.ready_to_implement { "✅" } else { "✗" }.to_string(),
            m.missing_required.join(", "),
        ]);
    }
    println!("{table}");

    if let Some(template_id) = plan {
        let template = template_by_id(&template_id)
            .ok_or_else(|| DomainError::UnknownTemplate(template_id.clone()))?;
        let plan = generate_plan_with_threshold(template, &coverage, threshold);

        println!("\n🗺️  Implementation plan for '{}'", template.name);
        let mut phases = Table::new();
        phases.load_preset(UTF8_FULL);
        phases.set_header(vec!["Phase", "Fields", "Weeks"]);
        for phase in &plan.phases {
            phases.add_row(vec![
                phase.name.clone(),
                phase.fields.join(", "),
                phase.estimated_weeks.to_string(),
            ]);
        }
        println!("{phases}");
        println!("   Total: {} weeks", plan.total_weeks);
    }

    Ok(())
}
