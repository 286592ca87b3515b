// assay-core/src/domain/signals/mod.rs

pub mod columns;
pub mod evaluator;
pub mod value;

// Re-exports
pub use columns::{ColumnResolver, name_variants};
pub use evaluator::{AssetSignals, SchemaEvaluator, SchemaSummary, SignalEvaluation, evaluate_signals};
pub use value::{ValueKind, infer_kind, is_populated};

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

/// Tri-state outcome for one asset/one signal.
///
/// `Unknown` means none of the signal's contributing fields exist in the
/// source schema at all. `Absent` means at least one field exists but none
/// is populated. The distinction is load-bearing: it is how the engine
/// degrades across heterogeneous connectors instead of reporting false
/// negatives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalValue {
    Present,
    Absent,
    Unknown,
}

impl SignalValue {
    pub fn is_present(&self) -> bool {
        matches!(self, Self::Present)
    }

    /// 0 | 0.5 | 1 dimension score used by the quadrant view.
    pub fn dimension_score(&self) -> f64 {
        match self {
            Self::Present => 1.0,
            Self::Unknown => 0.5,
            Self::Absent => 0.0,
        }
    }
}

// Wire format: true | false | "UNKNOWN" (kept for persistence compatibility).
impl Serialize for SignalValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Present => serializer.serialize_bool(true),
            Self::Absent => serializer.serialize_bool(false),
            Self::Unknown => serializer.serialize_str("UNKNOWN"),
        }
    }
}

impl<'de> Deserialize<'de> for SignalValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = serde_json::Value::deserialize(deserializer)?;
        match raw {
            serde_json::Value::Bool(true) => Ok(Self::Present),
            serde_json::Value::Bool(false) => Ok(Self::Absent),
            serde_json::Value::String(s) if s.eq_ignore_ascii_case("unknown") => Ok(Self::Unknown),
            other => Err(de::Error::custom(format!(
                "expected true, false or \"UNKNOWN\", got {}",
                other
            ))),
        }
    }
}
