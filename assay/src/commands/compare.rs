// assay/src/commands/compare.rs
//
// USE CASE: compare a snapshot against an enrichment plan (YAML).

use comfy_table::{Table, presets::UTF8_FULL};
use std::fs;
use std::path::PathBuf;

use assay_core::domain::error::DomainError;
use assay_core::domain::patterns::plan::{EnrichmentPlan, compare_plan_to_assets};
use assay_core::infrastructure::load_assets;

pub fn execute(snapshot: PathBuf, plan_path: PathBuf) -> anyhow::Result<()> {
    let assets = load_assets(&snapshot)?;
    let content = fs::read_to_string(&plan_path)?;
    let plan: EnrichmentPlan = serde_yaml::from_str(&content)?;
    if plan.requirements.is_empty() {
        return Err(DomainError::EmptyPlan { plan: plan.name }.into());
    }

    let result = compare_plan_to_assets(&plan, &assets);

    println!(
        "📋 Plan '{}': {} complete, {} partial, {} not started",
        result.plan_name, result.fully_complete, result.partially_complete, result.not_started
    );

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Asset", "Completion", "Quality"]);
    for asset in &result.assets {
        table.add_row(vec![
            asset.display_name.clone(),
            format!("{:.0}%", asset.completion_percentage),
            format!("{:.0}", asset.quality_score),
        ]);
    }
    println!("{table}");

    if !result.gaps_by_field.is_empty() {
        println!("\n🕳️  Gaps by field");
        let mut gaps = Table::new();
        gaps.load_preset(UTF8_FULL);
        gaps.set_header(vec!["Field", "Assets missing it"]);
        for (field, count) in &result.gaps_by_field {
            gaps.add_row(vec![field.clone(), count.to_string()]);
        }
        println!("{gaps}");
    }

    Ok(())
}
