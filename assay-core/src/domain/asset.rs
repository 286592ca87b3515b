// assay-core/src/domain/asset.rs

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One asset as handed over by the (external) fetcher layer: identity
/// fields plus an open, connector-specific attribute map. The engine never
/// mutates it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetRecord {
    pub guid: String,
    #[serde(default)]
    pub type_name: String,
    #[serde(default)]
    pub qualified_name: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub attributes: Map<String, Value>,
}

impl AssetRecord {
    pub fn new(guid: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            guid: guid.into(),
            type_name: type_name.into(),
            qualified_name: String::new(),
            display_name: String::new(),
            attributes: Map::new(),
        }
    }

    /// Builder used heavily in tests and fixtures.
    pub fn with_attribute(mut self, key: impl Into<String>, value: Value) -> Self {
        self.attributes.insert(key.into(), value);
        self
    }

    /// Best label for human-facing output.
    pub fn label(&self) -> &str {
        if !self.display_name.is_empty() {
            &self.display_name
        } else if !self.qualified_name.is_empty() {
            &self.qualified_name
        } else {
            &self.guid
        }
    }
}
