// assay-core/src/domain/gaps/mod.rs

pub mod engine;

pub use engine::GapEngine;

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::domain::catalog::signals::{CanonicalSignal, SeverityTier};
use crate::domain::scoring::DEFAULT_REQUIRED_SIGNALS;

/// Signals an asset must address (absence of Present, Unknown included,
/// produces a gap) vs signals that are merely nice to have (gap only when
/// confirmed Absent; an unknown optional signal is not actionable).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GapConfig {
    pub required_signals: Vec<CanonicalSignal>,
    pub optional_signals: Vec<CanonicalSignal>,
}

impl Default for GapConfig {
    fn default() -> Self {
        Self {
            required_signals: DEFAULT_REQUIRED_SIGNALS.to_vec(),
            optional_signals: vec![
                CanonicalSignal::Access,
                CanonicalSignal::Quality,
                CanonicalSignal::Freshness,
                CanonicalSignal::Usage,
                CanonicalSignal::AiReady,
            ],
        }
    }
}

/// One missing signal for one asset, with remediation guidance scoped to
/// the asset's type.
#[derive(Debug, Clone, Serialize)]
pub struct AssetGap {
    pub signal: CanonicalSignal,
    pub priority: u8,
    pub severity: SeverityTier,
    pub from_optional: bool,
    /// Display names of catalog fields that would close this gap for this
    /// asset type.
    pub remediation_fields: Vec<String>,
    pub description: String,
}

/// All gaps found on one asset.
#[derive(Debug, Clone, Serialize)]
pub struct AssetGapSet {
    pub guid: String,
    pub display_name: String,
    pub gaps: Vec<AssetGap>,
}

/// One signal-level gap aggregated across a batch.
/// Invariant: `affected_asset_count == affected_asset_ids.len()`.
#[derive(Debug, Clone, Serialize)]
pub struct AggregatedGap {
    pub id: String,
    pub signal: CanonicalSignal,
    pub priority: u8,
    pub severity: SeverityTier,
    pub affected_asset_ids: BTreeSet<String>,
    pub affected_asset_count: usize,
    /// round((1 - affected/total) * 100)
    pub coverage_percent: u32,
    pub remediation_fields: Vec<String>,
    pub description: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct GapSummary {
    pub total_assets: usize,
    pub assets_with_gaps: usize,
    pub total_gaps: usize,
    pub by_priority: BTreeMap<u8, usize>,
}

/// Full gap analysis output for one batch.
#[derive(Debug, Clone, Serialize)]
pub struct GapReport {
    pub asset_gaps: Vec<AssetGapSet>,
    pub aggregated_gaps: Vec<AggregatedGap>,
    pub summary: GapSummary,
}
