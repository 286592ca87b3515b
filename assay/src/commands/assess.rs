// assay/src/commands/assess.rs
//
// USE CASE: full assessment of a snapshot, rendered as tables or JSON.

use comfy_table::{Table, presets::UTF8_FULL};
use std::fs;
use std::path::PathBuf;

use assay_core::application::run_assessment;

pub fn execute(
    snapshot: PathBuf,
    config: Option<PathBuf>,
    json: bool,
    output: Option<PathBuf>,
) -> anyhow::Result<()> {
    println!("⚙️  Loading snapshot...");
    let (assets, config) = super::load_inputs(&snapshot, config.as_ref())?;
    println!("   {} assets loaded", assets.len());

    let report = run_assessment(&assets, &config);

    if json || output.is_some() {
        let rendered = serde_json::to_string_pretty(&report)?;
        match output {
            Some(path) => {
                fs::write(&path, rendered)?;
                println!("✨ Report written to {}", path.display());
            }
            None => println!("{}", rendered),
        }
        return Ok(());
    }

    // --- QUADRANTS ---
    println!("\n🔬 Assessment of {} assets", report.total_assets);
    let mut quadrants = Table::new();
    quadrants.load_preset(UTF8_FULL);
    quadrants.set_header(vec!["Quadrant", "Assets", "Meaning"]);
    for (quadrant, count) in &report.quadrant_counts {
        quadrants.add_row(vec![
            format!("{:?}", quadrant),
            count.to_string(),
            quadrant.describe().to_string(),
        ]);
    }
    println!("{quadrants}");

    // --- TOP GAPS ---
    if !report.gap_report.aggregated_gaps.is_empty() {
        println!("\n🕳️  Top gaps");
        let mut gaps = Table::new();
        gaps.load_preset(UTF8_FULL);
        gaps.set_header(vec!["Signal", "Priority", "Affected", "Coverage"]);
        for gap in report.gap_report.aggregated_gaps.iter().take(5) {
            gaps.add_row(vec![
                gap.signal.as_str().to_string(),
                format!("P{}", gap.priority),
                gap.affected_asset_count.to_string(),
                format!("{}%", gap.coverage_percent),
            ]);
        }
        println!("{gaps}");
    }

    // --- FINDINGS ---
    if !report.anti_patterns.is_empty() {
        println!("\n🚨 Anti-patterns");
        let mut findings = Table::new();
        findings.load_preset(UTF8_FULL);
        findings.set_header(vec!["Rule", "Severity", "Affected", "Detail"]);
        for finding in &report.anti_patterns {
            findings.add_row(vec![
                finding.name.clone(),
                format!("{:?}", finding.severity),
                format!("{}/{}", finding.affected_count, finding.total_count),
                finding.detail.clone(),
            ]);
        }
        println!("{findings}");
    }

    println!("\n📊 {}", report.risk.summary);
    Ok(())
}
