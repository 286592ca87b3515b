// assay/src/commands/risk.rs
//
// USE CASE: anti-pattern detection plus the governance risk score.

use comfy_table::{Table, presets::UTF8_FULL};
use std::path::PathBuf;

use assay_core::domain::antipatterns::detector::{
    calculate_governance_risk, detect_anti_patterns,
};
use assay_core::domain::coverage::CoverageSnapshot;
use assay_core::infrastructure::load_assets;

pub fn execute(snapshot: PathBuf) -> anyhow::Result<()> {
    let assets = load_assets(&snapshot)?;
    let coverage = CoverageSnapshot::aggregate(&assets);
    let detected = detect_anti_patterns(&coverage);
    let risk = calculate_governance_risk(&detected);

    if detected.is_empty() {
        println!("✨ No anti-patterns detected across {} assets.", assets.len());
    } else {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.set_header(vec!["Rule", "Severity", "Category", "Affected", "Detail"]);
        for finding in &detected {
            table.add_row(vec![
                finding.name.clone(),
                format!("{:?}", finding.severity),
                finding.category.clone(),
                format!(
                    "{}/{} ({:.0}%)",
                    finding.affected_count, finding.total_count, finding.percentage_affected
                ),
                finding.detail.clone(),
            ]);
        }
        println!("{table}");
    }

    println!("\n📊 {}", risk.summary);
    Ok(())
}
