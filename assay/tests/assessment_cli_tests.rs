use anyhow::Result;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use serde_json::json;
use std::path::PathBuf;
use std::process::Command;
use tempfile::TempDir;

/// Abstraction for managing the assay test environment: a temp dir with a
/// snapshot fixture and optional plan/settings files.
struct AssayTestEnv {
    _tmp: TempDir,
    root: PathBuf,
}

impl AssayTestEnv {
    fn new() -> Result<Self> {
        let tmp = tempfile::tempdir()?;
        let root = tmp.path().to_path_buf();
        Ok(Self { _tmp: tmp, root })
    }

    /// Mixed governance fixture: 2 owned and documented assets, 3 orphans.
    fn write_snapshot(&self) -> Result<PathBuf> {
        let assets: Vec<serde_json::Value> = (0..5)
            .map(|i| {
                let owners = if i < 2 { json!(["alice"]) } else { json!([]) };
                json!({
                    "guid": format!("asset-{}", i),
                    "typeName": "Table",
                    "displayName": format!("table_{}", i),
                    "attributes": {
                        "ownerUsers": owners,
                        "description": "documented",
                        "certificateStatus": "VERIFIED",
                        "classificationNames": ["internal"],
                        "__hasLineage": true,
                        "popularityScore": i * 50
                    }
                })
            })
            .collect();

        let path = self.root.join("snapshot.json");
        std::fs::write(&path, serde_json::to_string_pretty(&assets)?)?;
        Ok(path)
    }

    fn write_plan(&self, content: &str) -> Result<PathBuf> {
        let path = self.root.join("plan.yaml");
        std::fs::write(&path, content)?;
        Ok(path)
    }

    fn assay(&self) -> Command {
        let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("assay"));
        cmd.current_dir(&self.root);
        cmd
    }
}

#[test]
fn test_assess_renders_tables_and_risk() -> Result<()> {
    let env = AssayTestEnv::new()?;
    let snapshot = env.write_snapshot()?;

    env.assay()
        .arg("assess")
        .arg("--snapshot")
        .arg(&snapshot)
        .assert()
        .success()
        .stdout(predicate::str::contains("5 assets"))
        .stdout(predicate::str::contains("governance risk"));
    Ok(())
}

#[test]
fn test_assess_json_output_is_parseable() -> Result<()> {
    let env = AssayTestEnv::new()?;
    let snapshot = env.write_snapshot()?;
    let out = env.root.join("report.json");

    env.assay()
        .arg("assess")
        .arg("--snapshot")
        .arg(&snapshot)
        .arg("--output")
        .arg(&out)
        .assert()
        .success();

    let report: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&out)?)?;
    assert_eq!(report["totalAssets"].as_u64(), None, "no camelCase top level");
    assert_eq!(report["total_assets"].as_u64(), Some(5));
    assert!(report["risk"]["score"].is_number());
    assert!(report["scores"].as_array().is_some_and(|s| s.len() == 5));
    Ok(())
}

#[test]
fn test_gaps_lists_ownership() -> Result<()> {
    let env = AssayTestEnv::new()?;
    let snapshot = env.write_snapshot()?;

    // 3 of 5 assets have empty owners
    env.assay()
        .arg("gaps")
        .arg("--snapshot")
        .arg(&snapshot)
        .assert()
        .success()
        .stdout(predicate::str::contains("OWNERSHIP"));
    Ok(())
}

#[test]
fn test_risk_reports_orphan_assets() -> Result<()> {
    let env = AssayTestEnv::new()?;
    let snapshot = env.write_snapshot()?;

    // 40% owner coverage is strictly below the 50% orphan tolerance
    env.assay()
        .arg("risk")
        .arg("--snapshot")
        .arg(&snapshot)
        .assert()
        .success()
        .stdout(predicate::str::contains("Orphan Assets"));
    Ok(())
}

#[test]
fn test_patterns_with_implementation_plan() -> Result<()> {
    let env = AssayTestEnv::new()?;
    let snapshot = env.write_snapshot()?;

    env.assay()
        .arg("patterns")
        .arg("--snapshot")
        .arg(&snapshot)
        .arg("--plan")
        .arg("pii-governance")
        .assert()
        .success()
        .stdout(predicate::str::contains("PII Governance Pattern"))
        .stdout(predicate::str::contains("Optimization"));
    Ok(())
}

#[test]
fn test_patterns_rejects_unknown_template() -> Result<()> {
    let env = AssayTestEnv::new()?;
    let snapshot = env.write_snapshot()?;

    env.assay()
        .arg("patterns")
        .arg("--snapshot")
        .arg(&snapshot)
        .arg("--plan")
        .arg("no-such-template")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown pattern template"));
    Ok(())
}

#[test]
fn test_compare_against_plan() -> Result<()> {
    let env = AssayTestEnv::new()?;
    let snapshot = env.write_snapshot()?;
    let plan = env.write_plan(
        "name: ownership sweep\nrequirements:\n  - field: ownerUsers\n  - field: description\n",
    )?;

    env.assay()
        .arg("compare")
        .arg("--snapshot")
        .arg(&snapshot)
        .arg("--plan")
        .arg(&plan)
        .assert()
        .success()
        .stdout(predicate::str::contains("ownership sweep"))
        .stdout(predicate::str::contains("2 complete"));
    Ok(())
}

#[test]
fn test_compare_rejects_empty_plan() -> Result<()> {
    let env = AssayTestEnv::new()?;
    let snapshot = env.write_snapshot()?;
    let plan = env.write_plan("name: hollow\nrequirements: []\n")?;

    env.assay()
        .arg("compare")
        .arg("--snapshot")
        .arg(&snapshot)
        .arg("--plan")
        .arg(&plan)
        .assert()
        .failure()
        .stderr(predicate::str::contains("is empty"));
    Ok(())
}

#[test]
fn test_missing_snapshot_fails_cleanly() -> Result<()> {
    let env = AssayTestEnv::new()?;

    env.assay()
        .arg("assess")
        .arg("--snapshot")
        .arg("does-not-exist.json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Snapshot not found"));
    Ok(())
}

#[test]
fn test_catalog_sections() -> Result<()> {
    let env = AssayTestEnv::new()?;

    env.assay()
        .arg("catalog")
        .assert()
        .success()
        .stdout(predicate::str::contains("OWNERSHIP"));

    env.assay()
        .arg("catalog")
        .arg("fields")
        .assert()
        .success()
        .stdout(predicate::str::contains("owner_users"));

    env.assay()
        .arg("catalog")
        .arg("patterns")
        .assert()
        .success()
        .stdout(predicate::str::contains("pii-governance"));
    Ok(())
}
