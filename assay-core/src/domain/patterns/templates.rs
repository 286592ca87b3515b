// assay-core/src/domain/patterns/templates.rs
//
// Reusable governance use cases expressed as field bundles. A template is
// matched against aggregate coverage, never against single assets.

/// Named bundle of required and recommended catalog fields.
#[derive(Debug)]
pub struct PatternTemplate {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub required_fields: &'static [&'static str],
    pub recommended_fields: &'static [&'static str],
}

pub const TEMPLATE_CATALOG: &[PatternTemplate] = &[
    PatternTemplate {
        id: "pii-governance",
        name: "PII Governance Pattern",
        description: "Classify, certify and assign accountability for personal data.",
        required_fields: &["tags", "certificate_status", "owner_users"],
        recommended_fields: &["glossary_terms", "policy_count"],
    },
    PatternTemplate {
        id: "ownership-foundation",
        name: "Ownership Foundation",
        description: "Every asset has an accountable owner before anything else.",
        required_fields: &["owner_users"],
        recommended_fields: &["owner_groups", "admin_users", "admin_groups"],
    },
    PatternTemplate {
        id: "documentation-excellence",
        name: "Documentation Excellence",
        description: "Assets are understandable without tribal knowledge.",
        required_fields: &["description"],
        recommended_fields: &["readme", "glossary_terms"],
    },
    PatternTemplate {
        id: "lineage-transparency",
        name: "Lineage Transparency",
        description: "Impact analysis works because relationships are captured.",
        required_fields: &["has_lineage"],
        recommended_fields: &["is_primary_key", "is_foreign_key"],
    },
    PatternTemplate {
        id: "trusted-data",
        name: "Trusted Data Pattern",
        description: "Consumers can tell verified assets from drafts at a glance.",
        required_fields: &["certificate_status"],
        recommended_fields: &["certificate_message", "dq_soda_status", "mc_is_monitored"],
    },
    PatternTemplate {
        id: "ai-readiness",
        name: "AI Readiness Pattern",
        description: "Enough context that an LLM can consume assets safely.",
        required_fields: &["description", "glossary_terms"],
        recommended_fields: &["readme", "tags"],
    },
];

pub fn template_by_id(id: &str) -> Option<&'static PatternTemplate> {
    TEMPLATE_CATALOG.iter().find(|t| t.id == id)
}
