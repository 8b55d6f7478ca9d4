use super::{Entity, EntityData, ParseError, ResourceKind, text};
use serde::Serialize;
use serde_json::Value;

/// A scan schedule. The recurrence itself is an opaque iCalendar block the
/// backend owns; the console only displays and round-trips it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Schedule {
    #[serde(flatten)]
    pub data: EntityData,
    pub icalendar: Option<String>,
    pub timezone: Option<String>,
}

impl Entity for Schedule {
    const KIND: ResourceKind = ResourceKind::Schedule;

    fn from_element(element: &Value) -> Result<Self, ParseError> {
        Ok(Schedule {
            data: EntityData::from_element(element)?,
            icalendar: text(element, "icalendar"),
            timezone: text(element, "timezone").filter(|tz| !tz.is_empty()),
        })
    }

    fn id(&self) -> &str {
        &self.data.id
    }
}
