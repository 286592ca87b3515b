// assay/src/commands/gaps.rs
//
// USE CASE: aggregated gap listing with remediation guidance.

use comfy_table::{Table, presets::UTF8_FULL};
use std::path::PathBuf;

use assay_core::domain::gaps::GapEngine;

pub fn execute(snapshot: PathBuf, config: Option<PathBuf>) -> anyhow::Result<()> {
    let (assets, config) = super::load_inputs(&snapshot, config.as_ref())?;

    let report = GapEngine::new(config.gaps).analyze(&assets);

    println!(
        "🕳️  {} gaps across {} of {} assets",
        report.summary.total_gaps,
        report.summary.assets_with_gaps,
        report.summary.total_assets
    );

    if report.aggregated_gaps.is_empty() {
        println!("✨ No gaps. The batch is fully governed.");
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec![
        "Signal",
        "Priority",
        "Affected",
        "Coverage",
        "Remediation fields",
    ]);
    for gap in &report.aggregated_gaps {
        table.add_row(vec![
            gap.signal.as_str().to_string(),
            format!("P{}", gap.priority),
            gap.affected_asset_count.to_string(),
            format!("{}%", gap.coverage_percent),
            gap.remediation_fields.join(", "),
        ]);
    }
    println!("{table}");

    Ok(())
}
