use super::convert::convert;
use std::fmt;

/// Relation operators understood by the filter syntax.
///
/// The scan order in [`FilterTerm::from_string`] follows this fixed sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Relation {
    /// `=` exact equality
    Equals,
    /// `:` column match
    Matches,
    /// `~` contains
    Contains,
    /// `>` greater than
    Greater,
    /// `<` less than
    Less,
}

impl Relation {
    /// Operators in the order the term parser scans for them.
    pub const SCAN_ORDER: [Relation; 5] = [
        Relation::Equals,
        Relation::Matches,
        Relation::Contains,
        Relation::Greater,
        Relation::Less,
    ];

    pub fn as_char(self) -> char {
        match self {
            Relation::Equals => '=',
            Relation::Matches => ':',
            Relation::Contains => '~',
            Relation::Greater => '>',
            Relation::Less => '<',
        }
    }

    pub fn from_char(c: char) -> Option<Relation> {
        Relation::SCAN_ORDER.into_iter().find(|r| r.as_char() == c)
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// A term value after keyword-aware coercion.
///
/// Paging and boolean-like keywords carry integers; everything else stays
/// text. The distinction matters for equality: `Int(1)` and `Text("1")` are
/// not the same value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TermValue {
    Int(i64),
    Text(String),
}

impl TermValue {
    pub fn as_int(&self) -> Option<i64> {
        match self {
            TermValue::Int(n) => Some(*n),
            TermValue::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            TermValue::Int(_) => None,
            TermValue::Text(s) => Some(s),
        }
    }
}

impl fmt::Display for TermValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TermValue::Int(n) => write!(f, "{}", n),
            TermValue::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for TermValue {
    fn from(n: i64) -> Self {
        TermValue::Int(n)
    }
}

impl From<&str> for TermValue {
    fn from(s: &str) -> Self {
        TermValue::Text(s.to_string())
    }
}

impl From<String> for TermValue {
    fn from(s: String) -> Self {
        TermValue::Text(s)
    }
}

/// A single keyword/relation/value triple.
///
/// Terms are immutable after construction; a [`crate::filter::Filter`] shares
/// them freely between derived copies. Any of the three parts may be absent:
/// free-text tokens and the connector words (`and`, `or`, `not`) are bare
/// value terms without keyword or relation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterTerm {
    keyword: Option<String>,
    relation: Option<Relation>,
    value: Option<TermValue>,
}

impl FilterTerm {
    pub fn new(
        keyword: Option<String>,
        relation: Option<Relation>,
        value: Option<TermValue>,
    ) -> Self {
        FilterTerm {
            keyword,
            relation,
            value,
        }
    }

    /// A value-only term, as produced for free-text and connector tokens.
    pub fn bare(value: impl Into<TermValue>) -> Self {
        FilterTerm {
            keyword: None,
            relation: None,
            value: Some(value.into()),
        }
    }

    pub fn keyword(&self) -> Option<&str> {
        self.keyword.as_deref()
    }

    pub fn relation(&self) -> Option<Relation> {
        self.relation
    }

    pub fn value(&self) -> Option<&TermValue> {
        self.value.as_ref()
    }

    pub fn has_keyword(&self) -> bool {
        self.keyword.is_some()
    }

    /// Parse a single token from a filter string.
    ///
    /// The relation operators are scanned in [`Relation::SCAN_ORDER`]; the
    /// first operator that occurs anywhere in the token splits it at that
    /// operator's first occurrence. A token without any operator becomes a
    /// bare value term. Parsing never fails; malformed input degenerates to
    /// the least specific interpretation.
    ///
    /// Note that the scan does not respect quoting: an operator character
    /// inside a value (`tag:a=b`) still splits the token at its first
    /// occurrence. Pending product clarification this stays as-is.
    pub fn from_string(s: &str) -> FilterTerm {
        for relation in Relation::SCAN_ORDER {
            if let Some(idx) = s.find(relation.as_char()) {
                let keyword = &s[..idx];
                let value = &s[idx + relation.as_char().len_utf8()..];
                return convert(Some(keyword), Some(relation), Some(value));
            }
        }
        convert(None, None, Some(s))
    }

    /// Build a term from a structured keyword entry of a server filter echo.
    ///
    /// Goes through the same conversion table as [`FilterTerm::from_string`]
    /// so both sources behave identically.
    pub fn from_keyword_entry(column: &str, relation: &str, value: &str) -> FilterTerm {
        let relation = relation.chars().next().and_then(Relation::from_char);
        let keyword = if column.is_empty() { None } else { Some(column) };
        convert(keyword, relation, Some(value))
    }
}

impl fmt::Display for FilterTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(keyword) = &self.keyword {
            write!(f, "{}", keyword)?;
        }
        if let Some(relation) = self.relation {
            write!(f, "{}", relation)?;
        }
        if let Some(value) = &self.value {
            write!(f, "{}", value)?;
        }
        Ok(())
    }
}
