// assay-core/src/infrastructure/snapshot.rs
//
// Asset snapshot loading. A snapshot is either one JSON file holding an
// array of asset records (optionally wrapped in {"assets": [...]}) or a
// directory whose .json files are merged in path order.

use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::{info, instrument, warn};
use walkdir::WalkDir;

use crate::domain::asset::AssetRecord;
use crate::infrastructure::error::InfrastructureError;

#[derive(Deserialize)]
#[serde(untagged)]
enum SnapshotDocument {
    Wrapped { assets: Vec<AssetRecord> },
    Bare(Vec<AssetRecord>),
    Single(Box<AssetRecord>),
}

impl SnapshotDocument {
    fn into_assets(self) -> Vec<AssetRecord> {
        match self {
            Self::Wrapped { assets } => assets,
            Self::Bare(assets) => assets,
            Self::Single(asset) => vec![*asset],
        }
    }
}

#[instrument]
pub fn load_assets(path: &Path) -> Result<Vec<AssetRecord>, InfrastructureError> {
    if !path.exists() {
        return Err(InfrastructureError::SnapshotNotFound(
            path.display().to_string(),
        ));
    }

    let assets = if path.is_dir() {
        load_directory(path)?
    } else {
        load_file(path)?
    };

    info!(count = assets.len(), "📦 Snapshot loaded");
    Ok(assets)
}

fn load_file(path: &Path) -> Result<Vec<AssetRecord>, InfrastructureError> {
    let content = fs::read_to_string(path)?;
    let document: SnapshotDocument = serde_json::from_str(&content)?;
    Ok(document.into_assets())
}

/// Deterministic merge order: walkdir sorted by path.
fn load_directory(dir: &Path) -> Result<Vec<AssetRecord>, InfrastructureError> {
    let mut assets = Vec::new();
    let mut files = 0usize;

    for entry in WalkDir::new(dir)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
    {
        let path = entry.path();
        if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some("json") {
            continue;
        }
        files += 1;
        let mut batch = load_file(path)?;
        assets.append(&mut batch);
    }

    if files == 0 {
        warn!(dir = ?dir, "Directory contains no .json files");
    }
    Ok(assets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_json(dir: &TempDir, name: &str, value: serde_json::Value) {
        let mut file = fs::File::create(dir.path().join(name)).unwrap();
        file.write_all(value.to_string().as_bytes()).unwrap();
    }

    #[test]
    fn test_bare_array_snapshot() {
        let dir = TempDir::new().unwrap();
        write_json(
            &dir,
            "snap.json",
            json!([{"guid": "g1", "typeName": "Table", "attributes": {"ownerUsers": ["a"]}}]),
        );
        let assets = load_assets(&dir.path().join("snap.json")).unwrap();
        assert_eq!(assets.len(), 1);
        assert_eq!(assets[0].guid, "g1");
        assert_eq!(assets[0].type_name, "Table");
    }

    #[test]
    fn test_single_record_snapshot() {
        let dir = TempDir::new().unwrap();
        write_json(&dir, "one.json", json!({"guid": "solo", "typeName": "View"}));
        let assets = load_assets(&dir.path().join("one.json")).unwrap();
        assert_eq!(assets.len(), 1);
        assert_eq!(assets[0].guid, "solo");
    }

    #[test]
    fn test_wrapped_snapshot() {
        let dir = TempDir::new().unwrap();
        write_json(
            &dir,
            "snap.json",
            json!({"assets": [{"guid": "g1"}, {"guid": "g2"}]}),
        );
        let assets = load_assets(&dir.path().join("snap.json")).unwrap();
        assert_eq!(assets.len(), 2);
    }

    #[test]
    fn test_directory_merge_is_path_ordered() {
        let dir = TempDir::new().unwrap();
        write_json(&dir, "b.json", json!([{"guid": "from-b"}]));
        write_json(&dir, "a.json", json!([{"guid": "from-a"}]));
        write_json(&dir, "notes.txt", json!("ignored"));

        let assets = load_assets(dir.path()).unwrap();
        assert_eq!(assets.len(), 2);
        assert_eq!(assets[0].guid, "from-a");
        assert_eq!(assets[1].guid, "from-b");
    }

    #[test]
    fn test_missing_path_is_a_snapshot_error() {
        let result = load_assets(Path::new("/definitely/not/here.json"));
        assert!(matches!(
            result,
            Err(InfrastructureError::SnapshotNotFound(_))
        ));
    }

    #[test]
    fn test_malformed_json_is_a_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, "{not json").unwrap();
        let result = load_assets(&path);
        assert!(matches!(result, Err(InfrastructureError::JsonError(_))));
    }
}
