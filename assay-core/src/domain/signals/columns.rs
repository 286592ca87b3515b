// assay-core/src/domain/signals/columns.rs
//
// Schema-variant column resolution. Connectors disagree on spelling
// (OWNER_USERS vs OWNERUSERS vs ownerUsers vs __hasLineage), so each
// declared column name expands into a small set of name variants matched
// case-insensitively against the discovered schema. Variant generation is
// a pure function on purpose: the matching strategy can be swapped for a
// precomputed lookup table without touching signal semantics.

use std::collections::HashMap;

/// Name variants for one declared column, uppercased, in match order:
/// exact, underscores stripped, underscores inserted at case boundaries,
/// and a "__"-prefixed form of each.
pub fn name_variants(declared: &str) -> Vec<String> {
    let exact = declared.to_uppercase();
    let stripped = exact.replace('_', "");
    let snake = insert_case_boundaries(declared).to_uppercase();

    let mut variants = vec![exact, stripped, snake];
    // MDLH system columns carry a "__" prefix (__HASLINEAGE, __TIMESTAMP)
    for i in 0..variants.len() {
        let v = &variants[i];
        if !v.starts_with("__") {
            variants.push(format!("__{}", v));
        }
    }
    variants.dedup_in_order();
    variants
}

/// "ownerUsers" -> "owner_Users"; no-op for names without case boundaries.
fn insert_case_boundaries(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    let mut prev_lower = false;
    for ch in name.chars() {
        if ch.is_uppercase() && prev_lower {
            out.push('_');
        }
        prev_lower = ch.is_lowercase() || ch.is_ascii_digit();
        out.push(ch);
    }
    out
}

// Small order-preserving dedup helper; the variant lists are tiny.
trait DedupInOrder {
    fn dedup_in_order(&mut self);
}

impl DedupInOrder for Vec<String> {
    fn dedup_in_order(&mut self) {
        let mut seen = std::collections::HashSet::new();
        self.retain(|v| seen.insert(v.clone()));
    }
}

/// Case-insensitive index over the discovered column set, with optional
/// type hints from the schema-discovery layer.
#[derive(Debug, Clone, Default)]
pub struct ColumnResolver {
    /// UPPERCASE name -> original spelling as discovered.
    index: HashMap<String, String>,
    /// UPPERCASE name -> declared type (e.g. "ARRAY", "BOOLEAN").
    types: HashMap<String, String>,
}

impl ColumnResolver {
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut index = HashMap::new();
        for col in columns {
            let original: String = col.into();
            index.insert(original.to_uppercase(), original);
        }
        Self {
            index,
            types: HashMap::new(),
        }
    }

    pub fn with_types<I, S>(columns: I, types: HashMap<String, String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut resolver = Self::new(columns);
        resolver.types = types
            .into_iter()
            .map(|(k, v)| (k.to_uppercase(), v))
            .collect();
        resolver
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Resolves one declared column name to the discovered spelling.
    /// First matching variant wins; None means the column is missing for
    /// this schema.
    pub fn resolve(&self, declared: &str) -> Option<&str> {
        for variant in name_variants(declared) {
            if let Some(original) = self.index.get(&variant) {
                return Some(original.as_str());
            }
        }
        None
    }

    /// First source column of the candidate list that resolves.
    pub fn resolve_any<'a>(&'a self, candidates: &[&str]) -> Option<&'a str> {
        candidates.iter().find_map(|c| self.resolve(c))
    }

    /// Declared type hint for a discovered column, if the discovery layer
    /// provided one.
    pub fn type_hint(&self, column: &str) -> Option<&str> {
        self.types.get(&column.to_uppercase()).map(String::as_str)
    }
}
