//! Typed entity models parsed from XML-derived JSON elements.
//!
//! The backend answers every command with an XML envelope the transport
//! layer hands over as JSON. The artifacts of that translation are handled
//! here once: attribute-vs-text nodes (`__text`), singleton-vs-array
//! elements, `"0"/"1"` booleans and GMT timestamps. Each entity type is a
//! plain struct with a pure parse function composed from these helpers; no
//! inheritance chains.

pub mod permission;
pub mod schedule;
pub mod tag;
pub mod task;

pub use permission::Permission;
pub use schedule::Schedule;
pub use tag::Tag;
pub use task::{Task, TaskStatus};

use chrono::{DateTime, Utc};
use serde_json::Value;
use thiserror::Error;

/// Errors raised while extracting model data from a response element.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("missing required field '{0}'")]
    MissingField(&'static str),

    #[error("missing element '{0}' in response")]
    MissingElement(String),

    #[error("unexpected value for '{field}': {value}")]
    InvalidValue { field: &'static str, value: String },
}

/// The closed set of resource kinds the console talks to.
///
/// Commands are wired per kind at client construction; there is no runtime
/// string-keyed registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Alert,
    Permission,
    ScanConfig,
    Schedule,
    Tag,
    Target,
    Task,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 7] = [
        ResourceKind::Alert,
        ResourceKind::Permission,
        ResourceKind::ScanConfig,
        ResourceKind::Schedule,
        ResourceKind::Tag,
        ResourceKind::Target,
        ResourceKind::Task,
    ];

    /// Singular element/command name on the wire.
    pub fn singular(self) -> &'static str {
        match self {
            ResourceKind::Alert => "alert",
            ResourceKind::Permission => "permission",
            ResourceKind::ScanConfig => "config",
            ResourceKind::Schedule => "schedule",
            ResourceKind::Tag => "tag",
            ResourceKind::Target => "target",
            ResourceKind::Task => "task",
        }
    }

    /// Plural element/command name on the wire.
    pub fn plural(self) -> &'static str {
        match self {
            ResourceKind::Alert => "alerts",
            ResourceKind::Permission => "permissions",
            ResourceKind::ScanConfig => "configs",
            ResourceKind::Schedule => "schedules",
            ResourceKind::Tag => "tags",
            ResourceKind::Target => "targets",
            ResourceKind::Task => "tasks",
        }
    }

    pub fn from_name(name: &str) -> Option<ResourceKind> {
        ResourceKind::ALL
            .into_iter()
            .find(|k| k.singular() == name || k.plural() == name)
    }
}

/// A typed entity parsed from its response element.
pub trait Entity: Sized + Send + Sync + 'static {
    const KIND: ResourceKind;

    /// Pure transformation from the raw element to the typed model.
    fn from_element(element: &Value) -> Result<Self, ParseError>;

    fn id(&self) -> &str;
}

/// Text content of `element[key]`, looking through `__text` wrappers.
pub fn text(element: &Value, key: &str) -> Option<String> {
    element.get(key).and_then(node_text)
}

fn node_text(node: &Value) -> Option<String> {
    match node {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Object(map) => map.get("__text").and_then(node_text),
        _ => None,
    }
}

/// Child elements under `key`, normalized to a list.
///
/// The XML-to-JSON translation emits a bare object for a single child and
/// an array for several; callers always see a list.
pub fn elements<'a>(element: &'a Value, key: &str) -> Vec<&'a Value> {
    match element.get(key) {
        Some(Value::Array(items)) => items.iter().collect(),
        Some(Value::Null) | None => Vec::new(),
        Some(single) => vec![single],
    }
}

pub fn parse_int(element: &Value, key: &str) -> Option<i64> {
    text(element, key).and_then(|s| s.trim().parse().ok())
}

/// `"0"`/`"1"` flags; anything non-zero counts as set.
pub fn parse_bool(element: &Value, key: &str) -> Option<bool> {
    parse_int(element, key).map(|n| n != 0)
}

/// Timestamps arrive as ISO-8601 with offset (`2024-03-05T09:12:00Z`).
pub fn parse_date(element: &Value, key: &str) -> Option<DateTime<Utc>> {
    text(element, key)
        .and_then(|s| DateTime::parse_from_rfc3339(s.trim()).ok())
        .map(|d| d.with_timezone(&Utc))
}

/// The fields every managed resource carries, embedded by composition in
/// each entity struct.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct EntityData {
    pub id: String,
    pub name: Option<String>,
    pub comment: Option<String>,
    pub owner: Option<String>,
    pub creation_time: Option<DateTime<Utc>>,
    pub modification_time: Option<DateTime<Utc>>,
    pub writable: bool,
    pub in_use: bool,
}

impl EntityData {
    pub fn from_element(element: &Value) -> Result<Self, ParseError> {
        let id = text(element, "id").ok_or(ParseError::MissingField("id"))?;
        Ok(EntityData {
            id,
            name: text(element, "name"),
            comment: text(element, "comment").filter(|c| !c.is_empty()),
            owner: element.get("owner").and_then(|o| text(o, "name")),
            creation_time: parse_date(element, "creation_time"),
            modification_time: parse_date(element, "modification_time"),
            writable: parse_bool(element, "writable").unwrap_or(true),
            in_use: parse_bool(element, "in_use").unwrap_or(false),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_text_looks_through_text_nodes() {
        let element = json!({"plain": "a", "wrapped": {"__text": "b"}, "num": 3});
        assert_eq!(text(&element, "plain"), Some("a".to_string()));
        assert_eq!(text(&element, "wrapped"), Some("b".to_string()));
        assert_eq!(text(&element, "num"), Some("3".to_string()));
        assert_eq!(text(&element, "missing"), None);
    }

    #[test]
    fn test_elements_normalizes_singletons() {
        let element = json!({"one": {"id": "a"}, "many": [{"id": "a"}, {"id": "b"}]});
        assert_eq!(elements(&element, "one").len(), 1);
        assert_eq!(elements(&element, "many").len(), 2);
        assert!(elements(&element, "none").is_empty());
    }

    #[test]
    fn test_resource_kind_names() {
        assert_eq!(ResourceKind::Task.plural(), "tasks");
        assert_eq!(ResourceKind::ScanConfig.singular(), "config");
        assert_eq!(ResourceKind::from_name("task"), Some(ResourceKind::Task));
        assert_eq!(ResourceKind::from_name("configs"), Some(ResourceKind::ScanConfig));
        assert_eq!(ResourceKind::from_name("bogus"), None);
    }

    #[test]
    fn test_entity_data_from_element() {
        let element = json!({
            "id": "t1",
            "name": "Weekly scan",
            "comment": "",
            "owner": {"name": "admin"},
            "creation_time": "2024-03-05T09:12:00Z",
            "writable": "0",
            "in_use": "1",
        });
        let data = EntityData::from_element(&element).unwrap();
        assert_eq!(data.id, "t1");
        assert_eq!(data.name.as_deref(), Some("Weekly scan"));
        // empty comments are dropped
        assert_eq!(data.comment, None);
        assert_eq!(data.owner.as_deref(), Some("admin"));
        assert!(data.creation_time.is_some());
        assert!(!data.writable);
        assert!(data.in_use);
    }

    #[test]
    fn test_entity_data_requires_id() {
        let element = json!({"name": "no id"});
        assert!(matches!(
            EntityData::from_element(&element),
            Err(ParseError::MissingField("id"))
        ));
    }
}
