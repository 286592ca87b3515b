// assay-core/src/domain/catalog/fields.rs
//
// The unified field catalog: logical governance fields mapped to the raw
// column names the connectors actually expose (MDLH lakehouse tables and
// Atlan attribute spellings), plus their signal contributions.

use crate::domain::catalog::signals::CanonicalSignal;

/// How much one field counts toward one signal.
#[derive(Debug, Clone, Copy)]
pub struct SignalContribution {
    pub signal: CanonicalSignal,
    pub weight: f64,
}

/// Static catalog entry for one logical field.
#[derive(Debug)]
pub struct FieldDefinition {
    pub id: &'static str,
    pub display_name: &'static str,
    pub category: &'static str,
    /// Candidate raw column names, most canonical first. Variant expansion
    /// (case, underscores, "__" prefix) happens at resolution time.
    pub source_columns: &'static [&'static str],
    pub contributions: &'static [SignalContribution],
    /// Asset type names this field applies to; "*" means all.
    pub supported_asset_types: &'static [&'static str],
    /// Weight used for documentation-completeness scoring.
    pub completeness_weight: f64,
}

impl FieldDefinition {
    /// Whether this field is meaningful for the given asset type.
    pub fn applies_to(&self, type_name: &str) -> bool {
        self.supported_asset_types
            .iter()
            .any(|t| *t == "*" || t.eq_ignore_ascii_case(type_name))
    }

    pub fn weight_for(&self, signal: CanonicalSignal) -> Option<f64> {
        self.contributions
            .iter()
            .find(|c| c.signal == signal)
            .map(|c| c.weight)
    }
}

const ALL_TYPES: &[&str] = &["*"];
const TABLE_LIKE: &[&str] = &["Table", "View", "MaterialisedView"];
const COLUMN_ONLY: &[&str] = &["Column"];

macro_rules! contrib {
    ($($sig:ident => $w:expr),* $(,)?) => {
        &[$(SignalContribution { signal: CanonicalSignal::$sig, weight: $w }),*]
    };
}

/// The field catalog. Append-only; order is not significant.
pub const FIELD_CATALOG: &[FieldDefinition] = &[
    // --- OWNERSHIP ---
    FieldDefinition {
        id: "owner_users",
        display_name: "Owner Users",
        category: "ownership",
        source_columns: &["OWNER_USERS", "ownerUsers"],
        contributions: contrib!(Ownership => 0.4),
        supported_asset_types: ALL_TYPES,
        completeness_weight: 1.0,
    },
    FieldDefinition {
        id: "owner_groups",
        display_name: "Owner Groups",
        category: "ownership",
        source_columns: &["OWNER_GROUPS", "ownerGroups"],
        contributions: contrib!(Ownership => 0.3),
        supported_asset_types: ALL_TYPES,
        completeness_weight: 0.5,
    },
    FieldDefinition {
        id: "admin_users",
        display_name: "Admin Users",
        category: "ownership",
        source_columns: &["ADMIN_USERS", "adminUsers"],
        contributions: contrib!(Ownership => 0.2, Access => 0.4),
        supported_asset_types: ALL_TYPES,
        completeness_weight: 0.3,
    },
    FieldDefinition {
        id: "admin_groups",
        display_name: "Admin Groups",
        category: "ownership",
        source_columns: &["ADMIN_GROUPS", "adminGroups"],
        contributions: contrib!(Ownership => 0.1, Access => 0.3),
        supported_asset_types: ALL_TYPES,
        completeness_weight: 0.2,
    },
    // --- DOCUMENTATION ---
    FieldDefinition {
        id: "description",
        display_name: "Description",
        category: "documentation",
        source_columns: &["DESCRIPTION", "USER_DESCRIPTION", "userDescription"],
        contributions: contrib!(Semantics => 0.5, AiReady => 0.4),
        supported_asset_types: ALL_TYPES,
        completeness_weight: 1.0,
    },
    FieldDefinition {
        id: "readme",
        display_name: "README",
        category: "documentation",
        source_columns: &["README", "README_GUID", "readmeGuid"],
        contributions: contrib!(Semantics => 0.2, AiReady => 0.1),
        supported_asset_types: ALL_TYPES,
        completeness_weight: 0.5,
    },
    FieldDefinition {
        id: "glossary_terms",
        display_name: "Glossary Terms",
        category: "documentation",
        source_columns: &["TERM_GUIDS", "MEANINGS", "assignedTerms"],
        contributions: contrib!(Semantics => 0.3, AiReady => 0.3),
        supported_asset_types: ALL_TYPES,
        completeness_weight: 0.8,
    },
    // --- LINEAGE ---
    FieldDefinition {
        id: "has_lineage",
        display_name: "Has Lineage",
        category: "lineage",
        source_columns: &["HAS_LINEAGE", "__hasLineage"],
        contributions: contrib!(Lineage => 0.8),
        supported_asset_types: ALL_TYPES,
        completeness_weight: 0.8,
    },
    FieldDefinition {
        id: "is_primary_key",
        display_name: "Is Primary Key",
        category: "lineage",
        source_columns: &["IS_PRIMARY_KEY", "isPrimary"],
        contributions: contrib!(Lineage => 0.1),
        supported_asset_types: COLUMN_ONLY,
        completeness_weight: 0.2,
    },
    FieldDefinition {
        id: "is_foreign_key",
        display_name: "Is Foreign Key",
        category: "lineage",
        source_columns: &["IS_FOREIGN_KEY", "isForeign"],
        contributions: contrib!(Lineage => 0.1),
        supported_asset_types: COLUMN_ONLY,
        completeness_weight: 0.2,
    },
    // --- GOVERNANCE ---
    FieldDefinition {
        id: "tags",
        display_name: "Tags",
        category: "governance",
        source_columns: &["TAGS", "CLASSIFICATION_NAMES", "classificationNames"],
        contributions: contrib!(Sensitivity => 0.7, AiReady => 0.2),
        supported_asset_types: ALL_TYPES,
        completeness_weight: 0.8,
    },
    FieldDefinition {
        id: "policy_count",
        display_name: "Policy Count",
        category: "governance",
        source_columns: &["ASSET_POLICIES_COUNT", "assetPoliciesCount"],
        contributions: contrib!(Sensitivity => 0.3, Access => 0.3),
        supported_asset_types: ALL_TYPES,
        completeness_weight: 0.3,
    },
    FieldDefinition {
        id: "certificate_status",
        display_name: "Certificate Status",
        category: "governance",
        source_columns: &["CERTIFICATE_STATUS", "certificateStatus"],
        contributions: contrib!(Trust => 0.8),
        supported_asset_types: ALL_TYPES,
        completeness_weight: 0.8,
    },
    FieldDefinition {
        id: "certificate_message",
        display_name: "Certificate Message",
        category: "governance",
        source_columns: &["CERTIFICATE_STATUS_MESSAGE", "certificateStatusMessage"],
        contributions: contrib!(Trust => 0.2),
        supported_asset_types: ALL_TYPES,
        completeness_weight: 0.2,
    },
    // --- QUALITY ---
    FieldDefinition {
        id: "dq_soda_status",
        display_name: "Soda DQ Status",
        category: "quality",
        source_columns: &["ASSET_SODA_DQ_STATUS", "assetSodaDQStatus"],
        contributions: contrib!(Quality => 0.5),
        supported_asset_types: TABLE_LIKE,
        completeness_weight: 0.5,
    },
    FieldDefinition {
        id: "mc_is_monitored",
        display_name: "Monte Carlo Monitored",
        category: "quality",
        source_columns: &["ASSET_MC_IS_MONITORED", "assetMcIsMonitored"],
        contributions: contrib!(Quality => 0.5),
        supported_asset_types: TABLE_LIKE,
        completeness_weight: 0.5,
    },
    // --- USAGE ---
    FieldDefinition {
        id: "popularity_score",
        display_name: "Popularity Score",
        category: "usage",
        source_columns: &["POPULARITY_SCORE", "popularityScore"],
        contributions: contrib!(Usage => 0.5),
        supported_asset_types: ALL_TYPES,
        completeness_weight: 0.5,
    },
    FieldDefinition {
        id: "query_count",
        display_name: "Query Count",
        category: "usage",
        source_columns: &["QUERY_COUNT", "queryCount"],
        contributions: contrib!(Usage => 0.3),
        supported_asset_types: ALL_TYPES,
        completeness_weight: 0.3,
    },
    FieldDefinition {
        id: "query_user_count",
        display_name: "Query User Count",
        category: "usage",
        source_columns: &["QUERY_USER_COUNT", "queryUserCount"],
        contributions: contrib!(Usage => 0.2),
        supported_asset_types: ALL_TYPES,
        completeness_weight: 0.2,
    },
    // --- LIFECYCLE ---
    FieldDefinition {
        id: "updated_at",
        display_name: "Updated At",
        category: "lifecycle",
        source_columns: &["UPDATE_TIME", "__modificationTimestamp"],
        contributions: contrib!(Freshness => 0.6),
        supported_asset_types: ALL_TYPES,
        completeness_weight: 0.3,
    },
    FieldDefinition {
        id: "created_at",
        display_name: "Created At",
        category: "lifecycle",
        source_columns: &["CREATE_TIME", "__timestamp"],
        contributions: contrib!(Freshness => 0.4),
        supported_asset_types: ALL_TYPES,
        completeness_weight: 0.2,
    },
];

pub fn field_by_id(id: &str) -> Option<&'static FieldDefinition> {
    FIELD_CATALOG.iter().find(|f| f.id == id)
}

/// All fields contributing to a signal, with their weight for it.
pub fn fields_for_signal(
    signal: CanonicalSignal,
) -> impl Iterator<Item = (&'static FieldDefinition, f64)> {
    FIELD_CATALOG
        .iter()
        .filter_map(move |f| f.weight_for(signal).map(|w| (f, w)))
}

/// Total defined weight for a signal across the whole catalog.
/// Denominator for the schema-confidence fraction.
pub fn total_weight(signal: CanonicalSignal) -> f64 {
    fields_for_signal(signal).map(|(_, w)| w).sum()
}
