//! Keyword-aware coercion of parsed term triples.
//!
//! Both parsing paths — single tokens from a filter string and structured
//! keyword entries from a server filter echo — feed through [`convert`], so
//! a `rows=10` term carries the integer `10` regardless of where it came
//! from.

use super::term::{FilterTerm, Relation, TermValue};

/// Keywords whose values collapse to a 0/1 flag.
const BOOLEAN_KEYWORDS: [&str; 4] = ["apply_overrides", "notes", "overrides", "result_hosts_only"];

/// Keywords whose values are integers (paging cursors, QoD threshold).
const INT_KEYWORDS: [&str; 4] = ["autofp", "first", "min_qod", "rows"];

/// Logical connector tokens; these are never keyword/value pairs.
const CONNECTORS: [&str; 3] = ["and", "or", "not"];

/// Apply the conversion table to a raw keyword/relation/value triple.
///
/// Precedence: keyword converters, then value converters, then the
/// empty-keyword rule; everything else passes through unchanged.
pub(crate) fn convert(
    keyword: Option<&str>,
    relation: Option<Relation>,
    value: Option<&str>,
) -> FilterTerm {
    if let Some(kw) = keyword.filter(|k| !k.is_empty()) {
        if BOOLEAN_KEYWORDS.contains(&kw) {
            return FilterTerm::new(
                Some(kw.to_string()),
                relation,
                Some(TermValue::Int(boolean_flag(value))),
            );
        }
        if INT_KEYWORDS.contains(&kw) {
            return FilterTerm::new(Some(kw.to_string()), relation, value.map(int_value));
        }
    }

    if let Some(v) = value {
        if CONNECTORS.contains(&v) {
            // connector words drop keyword and relation entirely
            return FilterTerm::bare(v);
        }
        if matches!(v, "re" | "regexp" | "") {
            return FilterTerm::new(
                keyword.filter(|k| !k.is_empty()).map(str::to_string),
                None,
                Some(TermValue::Text(v.to_string())),
            );
        }
    }

    match keyword.filter(|k| !k.is_empty()) {
        None => FilterTerm::new(None, relation, value.map(|v| TermValue::Text(v.to_string()))),
        Some(kw) => FilterTerm::new(
            Some(kw.to_string()),
            relation,
            value.map(|v| TermValue::Text(v.to_string())),
        ),
    }
}

/// Coerce a boolean-like value: integers >= 1 become 1, everything else 0.
fn boolean_flag(value: Option<&str>) -> i64 {
    let parsed = value.and_then(|v| v.trim().parse::<i64>().ok());
    match parsed {
        Some(n) if n >= 1 => 1,
        _ => 0,
    }
}

/// Parse an integer value, keeping the raw text when it does not parse.
fn int_value(value: &str) -> TermValue {
    match value.trim().parse::<i64>() {
        Ok(n) => TermValue::Int(n),
        Err(_) => TermValue::Text(value.to_string()),
    }
}
