use super::{Entity, EntityData, ParseError, ResourceKind, parse_bool, text};
use serde::Serialize;
use serde_json::Value;

/// A user-defined tag attachable to other resources.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tag {
    #[serde(flatten)]
    pub data: EntityData,
    pub value: Option<String>,
    /// Kind of resource this tag attaches to, when restricted.
    pub resource_type: Option<ResourceKind>,
    pub active: bool,
}

impl Entity for Tag {
    const KIND: ResourceKind = ResourceKind::Tag;

    fn from_element(element: &Value) -> Result<Self, ParseError> {
        let resource_type = element
            .get("resources")
            .and_then(|r| text(r, "type"))
            .and_then(|t| ResourceKind::from_name(&t));
        Ok(Tag {
            data: EntityData::from_element(element)?,
            value: text(element, "value").filter(|v| !v.is_empty()),
            resource_type,
            active: parse_bool(element, "active").unwrap_or(true),
        })
    }

    fn id(&self) -> &str {
        &self.data.id
    }
}
