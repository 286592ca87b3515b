// assay-core/src/domain/signals/value.rs
//
// "Populated" rules per inferred column kind. The fetcher layer normally
// JSON-decodes array/object values, but MDLH sometimes ships arrays as
// JSON strings, so the array rule re-parses defensively.

use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

/// Column names that hold multi-valued governance data follow a small set
/// of naming conventions across connectors. Compiled once.
#[allow(clippy::expect_used)]
static ARRAY_NAME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"OWNER|ADMIN|CLASSIFICATION|TAG|TERM|GUID|DOMAIN|MEANING")
        .expect("static array-name pattern is valid")
});

/// Value interpretation applied when deciding whether a field is populated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// Multi-valued: populated iff length > 0.
    Array,
    /// Flag: populated iff truthy.
    Boolean,
    /// Everything else: populated iff non-null, non-empty, non-"null".
    Scalar,
}

/// Infers the interpretation for a column from its type hint (when the
/// discovery layer provides one) or its name.
pub fn infer_kind(column: &str, type_hint: Option<&str>) -> ValueKind {
    if let Some(hint) = type_hint {
        let hint = hint.to_uppercase();
        if hint.contains("ARRAY") || hint.contains("VARIANT") {
            return ValueKind::Array;
        }
        if hint.contains("BOOL") {
            return ValueKind::Boolean;
        }
    }

    let upper = column.to_uppercase();
    let trimmed = upper.trim_start_matches('_');
    // __HASLINEAGE and ISPRIMARYKEY both classify as boolean flags
    if trimmed.starts_with("HAS") || trimmed.starts_with("IS") {
        return ValueKind::Boolean;
    }
    if ARRAY_NAME_PATTERN.is_match(&upper) {
        return ValueKind::Array;
    }
    ValueKind::Scalar
}

/// The populated predicate. Total: any malformed value degrades to false,
/// never to an error.
pub fn is_populated(value: &Value, kind: ValueKind) -> bool {
    match kind {
        ValueKind::Array => array_is_populated(value),
        ValueKind::Boolean => is_truthy(value),
        ValueKind::Scalar => scalar_is_populated(value),
    }
}

fn array_is_populated(value: &Value) -> bool {
    match value {
        Value::Array(items) => !items.is_empty(),
        // Defensive re-parse of string-encoded arrays ("[\"alice\"]")
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.starts_with('[') {
                match serde_json::from_str::<Value>(trimmed) {
                    Ok(Value::Array(items)) => !items.is_empty(),
                    _ => false,
                }
            } else {
                // Not array-shaped at all; fall back to the scalar rule
                scalar_is_populated(value)
            }
        }
        Value::Null => false,
        other => scalar_is_populated(other),
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::String(s) => s.eq_ignore_ascii_case("true"),
        Value::Number(n) => n.as_i64() == Some(1) || n.as_f64() == Some(1.0),
        _ => false,
    }
}

fn scalar_is_populated(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => {
            let trimmed = s.trim();
            !trimmed.is_empty() && !trimmed.eq_ignore_ascii_case("null")
        }
        _ => true,
    }
}
