use super::{Entity, EntityData, ParseError, ResourceKind, parse_bool, parse_int, text};
use serde::Serialize;
use serde_json::Value;

/// Scan task lifecycle states as reported by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TaskStatus {
    New,
    Requested,
    Queued,
    Running,
    StopRequested,
    Stopped,
    Interrupted,
    Done,
}

impl TaskStatus {
    pub fn from_text(s: &str) -> Option<TaskStatus> {
        match s {
            "New" => Some(TaskStatus::New),
            "Requested" => Some(TaskStatus::Requested),
            "Queued" => Some(TaskStatus::Queued),
            "Running" => Some(TaskStatus::Running),
            "Stop Requested" => Some(TaskStatus::StopRequested),
            "Stopped" => Some(TaskStatus::Stopped),
            "Interrupted" => Some(TaskStatus::Interrupted),
            "Done" => Some(TaskStatus::Done),
            _ => None,
        }
    }

    /// Whether the scanner is still working on this task.
    pub fn is_active(self) -> bool {
        matches!(
            self,
            TaskStatus::Requested | TaskStatus::Queued | TaskStatus::Running | TaskStatus::StopRequested
        )
    }
}

/// A scan task.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Task {
    #[serde(flatten)]
    pub data: EntityData,
    pub status: TaskStatus,
    /// Scan progress in percent; -1 while no scan is running.
    pub progress: i64,
    pub alterable: bool,
}

impl Entity for Task {
    const KIND: ResourceKind = ResourceKind::Task;

    fn from_element(element: &Value) -> Result<Self, ParseError> {
        let status = match text(element, "status") {
            Some(s) => TaskStatus::from_text(&s).ok_or(ParseError::InvalidValue {
                field: "status",
                value: s,
            })?,
            None => TaskStatus::New,
        };
        Ok(Task {
            data: EntityData::from_element(element)?,
            status,
            progress: parse_int(element, "progress").unwrap_or(-1),
            alterable: parse_bool(element, "alterable").unwrap_or(false),
        })
    }

    fn id(&self) -> &str {
        &self.data.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_task() {
        let element = json!({
            "id": "t1",
            "name": "Nightly scan",
            "status": "Running",
            "progress": {"__text": "73"},
            "alterable": "0",
        });
        let task = Task::from_element(&element).unwrap();
        assert_eq!(task.data.id, "t1");
        assert_eq!(task.status, TaskStatus::Running);
        assert!(task.status.is_active());
        assert_eq!(task.progress, 73);
        assert!(!task.alterable);
    }

    #[test]
    fn test_parse_task_defaults() {
        let task = Task::from_element(&json!({"id": "t2"})).unwrap();
        assert_eq!(task.status, TaskStatus::New);
        assert_eq!(task.progress, -1);
    }

    #[test]
    fn test_unknown_status_is_an_error() {
        let result = Task::from_element(&json!({"id": "t3", "status": "Exploded"}));
        assert!(matches!(
            result,
            Err(ParseError::InvalidValue { field: "status", .. })
        ));
    }
}
