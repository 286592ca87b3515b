// assay-core/src/domain/catalog/signals.rs

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::error::DomainError;

/// The closed set of canonical governance dimensions. Every raw source
/// field contributes to one or more of these.
///
/// Discriminants index directly into `SIGNAL_CATALOG`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CanonicalSignal {
    Ownership = 0,
    Semantics = 1,
    Lineage = 2,
    Sensitivity = 3,
    Access = 4,
    Quality = 5,
    Freshness = 6,
    Usage = 7,
    Trust = 8,
    AiReady = 9,
}

impl CanonicalSignal {
    pub const ALL: [CanonicalSignal; 10] = [
        Self::Ownership,
        Self::Semantics,
        Self::Lineage,
        Self::Sensitivity,
        Self::Access,
        Self::Quality,
        Self::Freshness,
        Self::Usage,
        Self::Trust,
        Self::AiReady,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ownership => "OWNERSHIP",
            Self::Semantics => "SEMANTICS",
            Self::Lineage => "LINEAGE",
            Self::Sensitivity => "SENSITIVITY",
            Self::Access => "ACCESS",
            Self::Quality => "QUALITY",
            Self::Freshness => "FRESHNESS",
            Self::Usage => "USAGE",
            Self::Trust => "TRUST",
            Self::AiReady => "AI_READY",
        }
    }

    /// Static definition for this signal (display name, tier, workstream...).
    pub fn definition(&self) -> &'static SignalDefinition {
        // SIGNAL_CATALOG is ordered by discriminant, checked in tests.
        &SIGNAL_CATALOG[*self as usize]
    }
}

impl fmt::Display for CanonicalSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CanonicalSignal {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "OWNERSHIP" => Ok(Self::Ownership),
            "SEMANTICS" => Ok(Self::Semantics),
            "LINEAGE" => Ok(Self::Lineage),
            "SENSITIVITY" => Ok(Self::Sensitivity),
            "ACCESS" => Ok(Self::Access),
            "QUALITY" => Ok(Self::Quality),
            "FRESHNESS" => Ok(Self::Freshness),
            "USAGE" => Ok(Self::Usage),
            "TRUST" => Ok(Self::Trust),
            "AI_READY" | "AIREADY" => Ok(Self::AiReady),
            other => Err(DomainError::UnknownSignal(other.to_string())),
        }
    }
}

/// Urgency tier of a signal. Drives gap priority (HIGH -> 1, MED -> 2, LOW -> 3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SeverityTier {
    High,
    Med,
    Low,
}

impl SeverityTier {
    pub fn priority(&self) -> u8 {
        match self {
            Self::High => 1,
            Self::Med => 2,
            Self::Low => 3,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "HIGH",
            Self::Med => "MED",
            Self::Low => "LOW",
        }
    }
}

/// How the contributing fields of a signal roll up into one value.
/// Row evaluation implements `Any`; `WeightedThreshold` is catalog data
/// used for schema-confidence reporting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AggregationMethod {
    /// Present if any contributing field is populated.
    Any,
    /// Present if the populated weight fraction exceeds the threshold.
    WeightedThreshold(f64),
}

/// Static definition of one canonical signal.
#[derive(Debug)]
pub struct SignalDefinition {
    pub signal: CanonicalSignal,
    pub display_name: &'static str,
    pub description: &'static str,
    pub severity: SeverityTier,
    pub workstream: &'static str,
    pub aggregation: AggregationMethod,
}

/// The signal catalog, ordered by `CanonicalSignal` discriminant.
pub const SIGNAL_CATALOG: [SignalDefinition; 10] = [
    SignalDefinition {
        signal: CanonicalSignal::Ownership,
        display_name: "Ownership",
        description: "Someone is accountable for this asset (owner or admin users/groups).",
        severity: SeverityTier::High,
        workstream: "Ownership & Stewardship",
        aggregation: AggregationMethod::Any,
    },
    SignalDefinition {
        signal: CanonicalSignal::Semantics,
        display_name: "Semantics",
        description: "The asset carries human meaning: description, README or glossary terms.",
        severity: SeverityTier::High,
        workstream: "Documentation",
        aggregation: AggregationMethod::Any,
    },
    SignalDefinition {
        signal: CanonicalSignal::Lineage,
        display_name: "Lineage",
        description: "Upstream/downstream relationships are captured.",
        severity: SeverityTier::Med,
        workstream: "Lineage",
        aggregation: AggregationMethod::Any,
    },
    SignalDefinition {
        signal: CanonicalSignal::Sensitivity,
        display_name: "Sensitivity",
        description: "Classification tags or policies mark how sensitive the data is.",
        severity: SeverityTier::High,
        workstream: "Data Protection",
        aggregation: AggregationMethod::Any,
    },
    SignalDefinition {
        signal: CanonicalSignal::Access,
        display_name: "Access",
        description: "Access administration is declared (admin users/groups, policies).",
        severity: SeverityTier::Med,
        workstream: "Access Management",
        aggregation: AggregationMethod::Any,
    },
    SignalDefinition {
        signal: CanonicalSignal::Quality,
        display_name: "Quality Monitoring",
        description: "A data-quality tool watches this asset (Soda, Monte Carlo...).",
        severity: SeverityTier::Med,
        workstream: "Data Quality",
        aggregation: AggregationMethod::Any,
    },
    SignalDefinition {
        signal: CanonicalSignal::Freshness,
        display_name: "Freshness",
        description: "Lifecycle timestamps exist, so staleness can be judged.",
        severity: SeverityTier::Low,
        workstream: "Lifecycle",
        aggregation: AggregationMethod::Any,
    },
    SignalDefinition {
        signal: CanonicalSignal::Usage,
        display_name: "Usage",
        description: "Usage analytics are collected (popularity, query counts).",
        severity: SeverityTier::Low,
        workstream: "Usage Analytics",
        aggregation: AggregationMethod::Any,
    },
    SignalDefinition {
        signal: CanonicalSignal::Trust,
        display_name: "Trust",
        description: "An explicit certification verdict exists for the asset.",
        severity: SeverityTier::High,
        workstream: "Certification",
        aggregation: AggregationMethod::Any,
    },
    SignalDefinition {
        signal: CanonicalSignal::AiReady,
        display_name: "AI Readiness",
        description: "Enough context (docs, terms, tags) for safe LLM consumption.",
        severity: SeverityTier::Low,
        workstream: "AI Enablement",
        aggregation: AggregationMethod::WeightedThreshold(0.5),
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_ordered_by_discriminant() {
        for (idx, def) in SIGNAL_CATALOG.iter().enumerate() {
            assert_eq!(def.signal as usize, idx, "catalog out of order at {}", idx);
        }
    }

    #[test]
    fn test_signal_string_round_trip() {
        for signal in CanonicalSignal::ALL {
            let parsed: CanonicalSignal = signal.as_str().parse().unwrap();
            assert_eq!(parsed, signal);
        }
    }

    #[test]
    fn test_unknown_signal_is_an_error() {
        let res = "POPULARITY".parse::<CanonicalSignal>();
        assert!(matches!(res, Err(DomainError::UnknownSignal(_))));
    }

    #[test]
    fn test_priority_mapping() {
        assert_eq!(SeverityTier::High.priority(), 1);
        assert_eq!(SeverityTier::Med.priority(), 2);
        assert_eq!(SeverityTier::Low.priority(), 3);
    }
}
