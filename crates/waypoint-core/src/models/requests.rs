//! Request types for updating models.

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use super::{Task, TaskIntelligence, TaskStatus};

/// Partial update of a task's user-editable fields.
///
/// Intelligence metadata is deliberately absent: it only changes through
/// regeneration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// `Some(None)` clears the description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    /// `Some(None)` clears the due date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<Option<Date>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<u32>,
}

impl TaskPatch {
    pub fn status(status: TaskStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }

    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Default::default()
        }
    }

    /// True when no field would change.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.status.is_none()
            && self.due_date.is_none()
            && self.order.is_none()
    }

    /// Applies the patch to a task in place.
    ///
    /// ```rust
    /// use waypoint_core::models::{Task, TaskPatch, TaskStatus};
    ///
    /// let mut task = Task::new(1, 1, "Draft outline", 0);
    /// TaskPatch::status(TaskStatus::Completed).apply_to(&mut task);
    /// assert_eq!(task.status, TaskStatus::Completed);
    /// assert_eq!(task.title, "Draft outline");
    /// ```
    pub fn apply_to(&self, task: &mut Task) {
        if let Some(title) = &self.title {
            task.title = title.clone();
        }
        if let Some(description) = &self.description {
            task.description = description.clone();
        }
        if let Some(status) = self.status {
            task.status = status;
        }
        if let Some(due_date) = self.due_date {
            task.due_date = due_date;
        }
        if let Some(order) = self.order {
            task.order = order;
        }
    }
}

/// Everything needed to create a task.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewTask {
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<Date>,
    /// Zero-based insert position; `None` appends
    pub position: Option<u32>,
    pub intelligence: TaskIntelligence,
}

impl NewTask {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }
}
