//! Filter model and filter string parsing
//!
//! This module implements the console's filter model: an ordered list
//! of keyword/relation/value terms with paging and sort semantics, parsed
//! from and serialized back to the filter-bar string syntax.
//!
//! # Syntax
//!
//! ```text
//! keyword=value         exact match
//! keyword~value         contains
//! keyword>value         greater than
//! keyword<value         less than
//! keyword:value         column match
//! value                 free-text term
//! and / or / not        logical connectors (kept as bare terms)
//! ```
//!
//! # Examples
//!
//! ```text
//! name~admin sort=name first=1 rows=10     paged, sorted criteria
//! severity>6.9 and status=Done             combined criteria
//! apply_overrides=1 min_qod=70             boolean/int coerced keywords
//! ```
//!
//! A fixed set of "extra" keywords (paging, sorting, result tweaks) is kept
//! apart from user-entered criteria so the two halves of a filter string can
//! be split, merged and cached independently.

mod convert;
pub mod term;

pub use term::{FilterTerm, Relation, TermValue};

use serde_json::Value;
use std::collections::HashSet;
use std::fmt;
use std::sync::LazyLock;

/// Reserved keywords controlling paging, sorting and result tweaks rather
/// than search criteria.
static EXTRA_KEYWORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    HashSet::from([
        "apply_overrides",
        "autofp",
        "delta_states",
        "first",
        "levels",
        "min_qod",
        "notes",
        "overrides",
        "result_hosts_only",
        "rows",
        "sort",
        "sort-reverse",
        "timezone",
    ])
});

/// Number of rows assumed when a filter carries no `rows` term.
const DEFAULT_ROWS: i64 = 10;

/// An ordered collection of filter terms with paging and sort semantics.
///
/// Lookup is first-match-per-keyword; term order is significant for
/// serialization and for the equality of keyword-less terms. Mutation is
/// in-place via [`Filter::set`]/[`Filter::delete`]; the derivation methods
/// ([`Filter::copy`], [`Filter::next`], [`Filter::all`], ...) always return
/// new instances and leave the original untouched.
#[derive(Debug, Clone, Default)]
pub struct Filter {
    terms: Vec<FilterTerm>,
    /// Saved-filter id echoed by the backend, forwarded as `filt_id`.
    id: Option<String>,
}

impl Filter {
    pub fn new() -> Self {
        Filter::default()
    }

    /// Parse a filter from its string form.
    pub fn from_string(s: &str) -> Self {
        let mut filter = Filter::new();
        filter.parse_string(s);
        filter
    }

    /// Parse a filter from its string form, then adopt any extra keywords
    /// from `merge` that `s` itself did not set. Used to carry paging/sort
    /// state over when the user types a new criteria string.
    pub fn from_string_merged(s: &str, merge: &Filter) -> Self {
        Filter::from_string(s).merge_extra_keywords(merge)
    }

    /// Build a filter from a server filter echo element.
    ///
    /// Prefers the structured keyword entries when present (they go through
    /// the same conversion table as string parsing); falls back to parsing
    /// the echoed term string.
    pub fn from_element(element: &Value) -> Self {
        let id = crate::model::text(element, "id").filter(|id| !id.is_empty() && id != "0");

        let mut filter = Filter { terms: Vec::new(), id };

        let entries = element
            .get("keywords")
            .map(|kw| crate::model::elements(kw, "keyword"))
            .unwrap_or_default();
        if entries.is_empty() {
            if let Some(term) = crate::model::text(element, "term") {
                filter.parse_string(&term);
            }
        } else {
            for entry in entries {
                let column = crate::model::text(entry, "column").unwrap_or_default();
                let relation = crate::model::text(entry, "relation").unwrap_or_default();
                let value = crate::model::text(entry, "value").unwrap_or_default();
                filter
                    .terms
                    .push(FilterTerm::from_keyword_entry(&column, &relation, &value));
            }
        }
        filter
    }

    /// Tokenize `s` on whitespace and append each token as a term.
    pub fn parse_string(&mut self, s: &str) {
        for token in s.split_whitespace() {
            let token = token.trim();
            if !token.is_empty() {
                self.terms.push(FilterTerm::from_string(token));
            }
        }
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn set_id(&mut self, id: Option<String>) {
        self.id = id;
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn terms(&self) -> &[FilterTerm] {
        &self.terms
    }

    /// First term carrying `keyword`, if any.
    pub fn get_term(&self, keyword: &str) -> Option<&FilterTerm> {
        self.terms.iter().find(|t| t.keyword() == Some(keyword))
    }

    pub fn has(&self, keyword: &str) -> bool {
        self.get_term(keyword).is_some()
    }

    /// Value of the first term carrying `keyword`.
    pub fn get(&self, keyword: &str) -> Option<&TermValue> {
        self.get_term(keyword).and_then(FilterTerm::value)
    }

    pub fn get_int(&self, keyword: &str) -> Option<i64> {
        self.get(keyword).and_then(TermValue::as_int)
    }

    pub fn get_text(&self, keyword: &str) -> Option<&str> {
        self.get(keyword).and_then(TermValue::as_text)
    }

    /// Replace the value of `keyword` in place, or append a new term.
    ///
    /// Only one sort direction may be active: setting `sort` removes
    /// `sort-reverse` and vice versa.
    pub fn set(&mut self, keyword: &str, value: impl Into<TermValue>, relation: Relation) {
        match keyword {
            "sort" => self.delete("sort-reverse"),
            "sort-reverse" => self.delete("sort"),
            _ => {}
        }

        let term = FilterTerm::new(
            Some(keyword.to_string()),
            Some(relation),
            Some(value.into()),
        );
        match self.terms.iter().position(|t| t.keyword() == Some(keyword)) {
            Some(idx) => self.terms[idx] = term,
            None => self.terms.push(term),
        }
    }

    /// Remove the first term carrying `keyword`; no-op when absent.
    pub fn delete(&mut self, keyword: &str) {
        if let Some(idx) = self.terms.iter().position(|t| t.keyword() == Some(keyword)) {
            self.terms.remove(idx);
        }
    }

    /// A new filter with the same terms and id.
    pub fn copy(&self) -> Filter {
        self.clone()
    }

    /// Derive the next page: `first` advances by `rows` (default 10).
    /// An unset `first` starts the cursor at 1.
    pub fn next(&self) -> Filter {
        let mut filter = self.copy();
        let rows = filter.get_int("rows").unwrap_or(DEFAULT_ROWS);
        let first = match filter.get_int("first") {
            Some(first) => (first + rows).max(1),
            None => 1,
        };
        filter.set("first", first, Relation::Equals);
        filter.set("rows", rows, Relation::Equals);
        filter
    }

    /// Derive the previous page: `first` retreats by `rows`, never below 1.
    pub fn previous(&self) -> Filter {
        let mut filter = self.copy();
        let rows = filter.get_int("rows").unwrap_or(DEFAULT_ROWS);
        let first = match filter.get_int("first") {
            Some(first) => (first - rows).max(1),
            None => 1,
        };
        filter.set("first", first, Relation::Equals);
        filter.set("rows", rows, Relation::Equals);
        filter
    }

    /// Derive a filter positioned at row `first`.
    pub fn first_at(&self, first: i64) -> Filter {
        let mut filter = self.copy();
        filter.set("first", first.max(1), Relation::Equals);
        filter
    }

    /// Derive the unbounded view: `first=1 rows=-1`.
    pub fn all(&self) -> Filter {
        let mut filter = self.copy();
        filter.set("first", 1, Relation::Equals);
        filter.set("rows", -1, Relation::Equals);
        filter
    }

    /// Derive a filter stripped of paging and the active sort direction.
    /// Used as a stable signature for caching, independent of the page and
    /// sort the user happens to be on.
    pub fn simple(&self) -> Filter {
        let mut filter = self.copy();
        filter.delete("first");
        filter.delete("rows");
        filter.delete(if filter.has("sort-reverse") {
            "sort-reverse"
        } else {
            "sort"
        });
        filter
    }

    /// Structural equality: same term count, keyworded terms matched by
    /// keyword (order-insensitive), keyword-less terms matched positionally.
    pub fn equals(&self, other: &Filter) -> bool {
        if self.terms.len() != other.terms.len() {
            return false;
        }
        let mut other_bare = other.terms.iter().filter(|t| !t.has_keyword());
        for term in &self.terms {
            let matched = match term.keyword() {
                Some(keyword) => other.get_term(keyword),
                None => other_bare.next(),
            };
            if matched != Some(term) {
                return false;
            }
        }
        true
    }

    /// Copy this filter, then append any extra-keyword term from `other`
    /// that this filter does not already carry.
    pub fn merge_extra_keywords(&self, other: &Filter) -> Filter {
        let mut filter = self.copy();
        for term in &other.terms {
            if let Some(keyword) = term.keyword() {
                if EXTRA_KEYWORDS.contains(keyword) && !filter.has(keyword) {
                    filter.terms.push(term.clone());
                }
            }
        }
        filter
    }

    /// Full string form, all terms space-joined.
    pub fn to_filter_string(&self) -> String {
        self.join_terms(|_| true)
    }

    /// Criteria-only string form: everything except the extra keywords.
    pub fn to_filter_criteria_string(&self) -> String {
        self.join_terms(|t| !is_extra(t))
    }

    /// Extra-only string form: paging, sorting and result tweaks.
    pub fn to_filter_extra_string(&self) -> String {
        self.join_terms(is_extra)
    }

    fn join_terms(&self, keep: impl Fn(&FilterTerm) -> bool) -> String {
        let joined = self
            .terms
            .iter()
            .filter(|t| keep(t))
            .map(FilterTerm::to_string)
            .collect::<Vec<_>>()
            .join(" ");
        joined.trim().to_string()
    }
}

fn is_extra(term: &FilterTerm) -> bool {
    term.keyword().is_some_and(|k| EXTRA_KEYWORDS.contains(k))
}

impl PartialEq for Filter {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_filter_string())
    }
}

impl From<&str> for Filter {
    fn from(s: &str) -> Self {
        Filter::from_string(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_get_is_typed() {
        let filter = Filter::from_string("rows=10 name~foo");
        assert_eq!(filter.get_int("rows"), Some(10));
        assert_eq!(filter.get_text("name"), Some("foo"));
        assert_eq!(filter.get("missing"), None);
    }

    #[test]
    fn test_set_replaces_in_place() {
        let mut filter = Filter::from_string("first=1 rows=10");
        filter.set("first", 11, Relation::Equals);
        assert_eq!(filter.get_int("first"), Some(11));
        assert_eq!(filter.len(), 2);
        // position preserved
        assert_eq!(filter.terms()[0].keyword(), Some("first"));
    }

    #[test]
    fn test_set_sort_clears_sort_reverse() {
        let mut filter = Filter::from_string("sort-reverse=severity");
        filter.set("sort", "name", Relation::Equals);
        assert!(!filter.has("sort-reverse"));
        assert_eq!(filter.get_text("sort"), Some("name"));
        assert_eq!(filter.len(), 1);

        filter.set("sort-reverse", "severity", Relation::Equals);
        assert!(!filter.has("sort"));
        assert_eq!(filter.get_text("sort-reverse"), Some("severity"));
    }

    #[test]
    fn test_delete_is_noop_when_absent() {
        let mut filter = Filter::from_string("name~foo");
        filter.delete("rows");
        assert_eq!(filter.len(), 1);
        filter.delete("name");
        assert!(filter.is_empty());
    }

    #[test]
    fn test_copy_is_independent() {
        let original = Filter::from_string("name~foo");
        let mut copy = original.copy();
        copy.set("x", "y", Relation::Equals);
        assert!(original.equals(&original.copy()));
        assert!(!original.has("x"));
        assert!(copy.has("x"));
    }

    #[test]
    fn test_next_from_unset_first() {
        let filter = Filter::new();
        let page1 = filter.next();
        assert_eq!(page1.get_int("first"), Some(1));
        assert_eq!(page1.get_int("rows"), Some(10));

        let page2 = page1.next();
        assert_eq!(page2.get_int("first"), Some(11));
    }

    #[test]
    fn test_previous_clamps_at_one() {
        let filter = Filter::from_string("first=5 rows=10");
        assert_eq!(filter.previous().get_int("first"), Some(1));
        assert_eq!(Filter::new().previous().get_int("first"), Some(1));
    }

    #[test]
    fn test_all_is_unbounded() {
        let filter = Filter::from_string("first=21 rows=10 name~foo");
        let all = filter.all();
        assert_eq!(all.get_int("first"), Some(1));
        assert_eq!(all.get_int("rows"), Some(-1));
        // original untouched
        assert_eq!(filter.get_int("first"), Some(21));
    }

    #[test]
    fn test_simple_drops_paging_and_active_sort() {
        let filter = Filter::from_string("name~foo first=11 rows=10 sort=name");
        let simple = filter.simple();
        assert!(!simple.has("first"));
        assert!(!simple.has("rows"));
        assert!(!simple.has("sort"));
        assert!(simple.has("name"));

        let reversed = Filter::from_string("sort-reverse=severity first=1").simple();
        assert!(!reversed.has("sort-reverse"));
    }

    #[test]
    fn test_equals_ignores_keyword_order() {
        let a = Filter::from_string("name~foo rows=10");
        let b = Filter::from_string("rows=10 name~foo");
        assert!(a.equals(&b));
    }

    #[test]
    fn test_equals_is_positional_for_bare_terms() {
        let a = Filter::from_string("foo and bar");
        let b = Filter::from_string("foo and bar");
        let c = Filter::from_string("bar and foo");
        assert!(a.equals(&b));
        assert!(!a.equals(&c));
    }

    #[test]
    fn test_equals_requires_same_length() {
        let a = Filter::from_string("name~foo");
        let b = Filter::from_string("name~foo rows=10");
        assert!(!a.equals(&b));
    }

    #[test]
    fn test_merge_extra_keywords() {
        let base = Filter::from_string("name~foo");
        let extra = Filter::from_string("first=5 rows=20 comment~x");
        let merged = base.merge_extra_keywords(&extra);
        assert_eq!(merged.get_int("first"), Some(5));
        assert_eq!(merged.get_int("rows"), Some(20));
        // criteria keywords are not adopted
        assert!(!merged.has("comment"));
        // base unchanged
        assert_eq!(base.len(), 1);
    }

    #[test]
    fn test_merge_does_not_override_existing() {
        let base = Filter::from_string("rows=5");
        let merged = base.merge_extra_keywords(&Filter::from_string("rows=20"));
        assert_eq!(merged.get_int("rows"), Some(5));
    }

    #[test]
    fn test_criteria_and_extra_split() {
        let filter = Filter::from_string("name~foo first=1 rows=10 sort=name");
        assert_eq!(filter.to_filter_criteria_string(), "name~foo");
        assert_eq!(filter.to_filter_extra_string(), "first=1 rows=10 sort=name");
        assert_eq!(
            filter.to_filter_string(),
            "name~foo first=1 rows=10 sort=name"
        );
    }

    #[test]
    fn test_round_trip() {
        for input in [
            "name~foo first=1 rows=10 sort=name",
            "severity>6.9 and status=Done",
            "apply_overrides=1 min_qod=70",
            "  spaced    out\tterms ",
        ] {
            let parsed = Filter::from_string(input);
            let reparsed = Filter::from_string(&parsed.to_filter_string());
            assert!(parsed.equals(&reparsed), "input: {:?}", input);
        }
    }

    #[test]
    fn test_from_element_with_keyword_entries() {
        let element = json!({
            "id": "f1",
            "term": "ignored=1",
            "keywords": {
                "keyword": [
                    {"column": "first", "relation": "=", "value": "1"},
                    {"column": "rows", "relation": "=", "value": "10"},
                    {"column": "", "relation": "=", "value": "and"},
                ]
            }
        });
        let filter = Filter::from_element(&element);
        assert_eq!(filter.id(), Some("f1"));
        assert_eq!(filter.get_int("first"), Some(1));
        assert_eq!(filter.get_int("rows"), Some(10));
        assert_eq!(filter.len(), 3);
    }

    #[test]
    fn test_from_element_falls_back_to_term_string() {
        let element = json!({"id": "0", "term": "name~foo rows=10"});
        let filter = Filter::from_element(&element);
        // id "0" means "no saved filter"
        assert_eq!(filter.id(), None);
        assert_eq!(filter.get_text("name"), Some("foo"));
        assert_eq!(filter.get_int("rows"), Some(10));
    }
}
