use super::{Entity, EntityData, ParseError, ResourceKind, text};
use serde::Serialize;
use serde_json::Value;

/// A permission granting a subject (user, group or role) an operation on a
/// resource.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Permission {
    #[serde(flatten)]
    pub data: EntityData,
    pub resource_type: Option<ResourceKind>,
    pub resource_id: Option<String>,
    pub subject_type: Option<String>,
    pub subject_id: Option<String>,
}

impl Entity for Permission {
    const KIND: ResourceKind = ResourceKind::Permission;

    fn from_element(element: &Value) -> Result<Self, ParseError> {
        let resource = element.get("resource");
        let subject = element.get("subject");
        Ok(Permission {
            data: EntityData::from_element(element)?,
            resource_type: resource
                .and_then(|r| text(r, "type"))
                .and_then(|t| ResourceKind::from_name(&t)),
            resource_id: resource.and_then(|r| text(r, "id")),
            subject_type: subject.and_then(|s| text(s, "type")),
            subject_id: subject.and_then(|s| text(s, "id")),
        })
    }

    fn id(&self) -> &str {
        &self.data.id
    }
}
