//! Parameter structures for Waypoint operations.
//!
//! These are the shared inputs of every interface (CLI, MCP). They carry only
//! serde derives, plus JSON schema derives behind the `schema` feature, and
//! take loosely typed values such as status strings. Each structure knows
//! how to validate itself into the strongly typed request the
//! [`Planner`](crate::Planner) works with.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │   CLI Args      │    │   MCP Params    │    │  Core Params    │
//! │  (clap derives) │───▶│ (serde derives) │───▶│ (minimal deps)  │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```

use std::str::FromStr;

use jiff::civil::Date;
#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{
    error::{PlannerError, Result},
    models::{NewTask, PlanStatus, ResourceType, TaskIntelligence, TaskPatch, TaskStatus},
    ordering::TaskOrder,
};

/// Longest accepted title, in characters.
pub const TITLE_MAX_CHARS: usize = 200;
/// Longest accepted description, in characters.
pub const DESCRIPTION_MAX_CHARS: usize = 1000;

/// Generic parameters for operations requiring just an ID.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct Id {
    /// The ID of the resource to operate on
    pub id: u64,
}

/// Parameters for creating a new plan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct CreatePlan {
    /// Title of the plan (required, at most 200 characters)
    pub title: String,
    /// Optional description of the plan
    pub description: Option<String>,
    /// Initial status: 'draft', 'active' (default), 'completed' or 'archived'
    #[serde(default)]
    pub status: Option<String>,
}

impl CreatePlan {
    /// Validates the title and description and parses the status.
    pub fn validate(&self) -> Result<PlanStatus> {
        validate_title(&self.title)?;
        if let Some(description) = &self.description {
            validate_description(description)?;
        }
        self.status
            .as_deref()
            .map(|s| parse_field::<PlanStatus>("status", s))
            .transpose()
            .map(Option::unwrap_or_default)
    }
}

/// Parameters for listing plans.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct ListPlans {
    /// Only plans with this status ('draft', 'active', 'completed', 'archived')
    #[serde(default)]
    pub status: Option<String>,
    /// Include archived plans when no status is given
    #[serde(default)]
    pub all: bool,
}

/// Parameters for changing a plan's status.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct UpdatePlanStatus {
    /// Plan ID
    pub id: u64,
    /// New status: 'draft', 'active', 'completed' or 'archived'
    pub status: String,
}

impl UpdatePlanStatus {
    pub fn validate(&self) -> Result<PlanStatus> {
        parse_field("status", &self.status)
    }
}

/// Parameters for deleting a plan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct DeletePlan {
    /// Plan ID
    pub id: u64,
    /// Must be true; deleting a plan also deletes its tasks and resources
    #[serde(default)]
    pub confirmed: bool,
}

/// Parameters for attaching a resource link to a plan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct AddResource {
    /// Plan ID
    pub plan_id: u64,
    /// Title of the resource
    pub title: String,
    /// URL of the resource
    pub url: String,
    /// 'link' (default), 'document', 'video' or 'other'
    #[serde(default)]
    pub resource_type: Option<String>,
}

impl AddResource {
    pub fn validate(&self) -> Result<ResourceType> {
        validate_title(&self.title)?;
        if self.url.trim().is_empty() {
            return Err(PlannerError::invalid_input("url").with_reason("URL must not be empty"));
        }
        self.resource_type
            .as_deref()
            .map(|s| parse_field::<ResourceType>("resource_type", s))
            .transpose()
            .map(Option::unwrap_or_default)
    }
}

/// Parameters for adding a task to a plan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct CreateTask {
    /// ID of the plan to add the task to
    pub plan_id: u64,
    /// Title of the task (required, at most 200 characters)
    pub title: String,
    /// Optional description (at most 1000 characters)
    pub description: Option<String>,
    /// Optional due date as YYYY-MM-DD
    pub due_date: Option<String>,
    /// Zero-based position to insert at; appends when omitted
    pub position: Option<u32>,
}

impl TryFrom<&CreateTask> for NewTask {
    type Error = PlannerError;

    fn try_from(params: &CreateTask) -> Result<Self> {
        validate_title(&params.title)?;
        if let Some(description) = &params.description {
            validate_description(description)?;
        }
        let due_date = params
            .due_date
            .as_deref()
            .map(|s| parse_field::<Date>("due_date", s))
            .transpose()?;

        Ok(NewTask {
            title: params.title.clone(),
            description: params.description.clone(),
            due_date,
            position: params.position,
            intelligence: TaskIntelligence::default(),
        })
    }
}

/// Parameters for updating an existing task.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct UpdateTask {
    /// Task ID to update (required)
    pub id: u64,
    /// New status: 'pending', 'in_progress' or 'completed'
    pub status: Option<String>,
    /// New title
    pub title: Option<String>,
    /// New description; an empty string clears it
    pub description: Option<String>,
    /// New due date as YYYY-MM-DD; an empty string clears it
    pub due_date: Option<String>,
    /// New zero-based position within the plan
    pub order: Option<u32>,
}

impl UpdateTask {
    /// Validates every supplied field and builds the patch.
    ///
    /// # Errors
    ///
    /// * `PlannerError::InvalidInput` when no field is supplied
    /// * `PlannerError::InvalidInput` for an unknown status, an empty or
    ///   overlong title, an overlong description or a malformed date
    ///
    /// ```rust
    /// use waypoint_core::{models::TaskStatus, params::UpdateTask};
    ///
    /// let params = UpdateTask {
    ///     id: 1,
    ///     status: Some("done".to_string()),
    ///     ..Default::default()
    /// };
    /// assert_eq!(params.validate()?.status, Some(TaskStatus::Completed));
    ///
    /// assert!(UpdateTask { id: 1, ..Default::default() }.validate().is_err());
    /// # Ok::<(), waypoint_core::PlannerError>(())
    /// ```
    pub fn validate(&self) -> Result<TaskPatch> {
        let status = self
            .status
            .as_deref()
            .map(|s| {
                TaskStatus::from_str(s).map_err(|_| {
                    PlannerError::invalid_input("status").with_reason(format!(
                        "Invalid status: {s}. Must be 'pending', 'in_progress' or 'completed'"
                    ))
                })
            })
            .transpose()?;

        if let Some(title) = &self.title {
            validate_title(title)?;
        }

        let description = self.description.as_deref().map(|d| {
            validate_description(d)?;
            Ok::<_, PlannerError>(if d.trim().is_empty() {
                None
            } else {
                Some(d.to_string())
            })
        });
        let description = description.transpose()?;

        let due_date = self
            .due_date
            .as_deref()
            .map(|d| {
                if d.trim().is_empty() {
                    Ok(None)
                } else {
                    parse_field::<Date>("due_date", d).map(Some)
                }
            })
            .transpose()?;

        let patch = TaskPatch {
            title: self.title.clone(),
            description,
            status,
            due_date,
            order: self.order,
        };

        if patch.is_empty() {
            return Err(PlannerError::invalid_input("task").with_reason("No fields to update"));
        }
        Ok(patch)
    }
}

/// Parameters for a drag-and-drop move within a plan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct MoveTask {
    /// Plan ID
    pub plan_id: u64,
    /// Current zero-based position of the task
    pub source: usize,
    /// Target zero-based position; omit to cancel the move
    pub destination: Option<usize>,
}

/// Parameters for an explicit reorder batch.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct ReorderTasks {
    /// New order for each task; all tasks must belong to the same plan
    pub orders: Vec<TaskOrder>,
}

/// Parameters for replacing a task's estimates and prerequisites.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct SetTaskIntelligence {
    /// Task ID
    pub id: u64,
    /// The new metadata; omitted fields are cleared
    #[serde(flatten)]
    pub intelligence: TaskIntelligence,
}

/// Parameters for listing a plan's tasks in prerequisite order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct SortTasks {
    /// Plan ID
    pub plan_id: u64,
    /// Fail on prerequisite cycles instead of breaking them silently
    #[serde(default)]
    pub strict: bool,
}

/// Parameters for a plan progress report.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct ShowProgress {
    /// Plan ID
    pub plan_id: u64,
    /// Reference date as YYYY-MM-DD; defaults to today
    pub today: Option<String>,
}

impl ShowProgress {
    pub fn today(&self) -> Result<Date> {
        match self.today.as_deref() {
            Some(s) => parse_field("today", s),
            None => Ok(crate::ordering::schedule::today()),
        }
    }
}

fn parse_field<T>(field: &str, value: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse::<T>()
        .map_err(|e| PlannerError::invalid_input(field).with_reason(format!("'{value}': {e}")))
}

/// Titles must be non-blank and at most [`TITLE_MAX_CHARS`] characters.
pub fn validate_title(title: &str) -> Result<()> {
    if title.trim().is_empty() {
        return Err(PlannerError::invalid_input("title").with_reason("Title must not be empty"));
    }
    let length = title.chars().count();
    if length > TITLE_MAX_CHARS {
        return Err(PlannerError::invalid_input("title").with_reason(format!(
            "Title is {length} characters long; the limit is {TITLE_MAX_CHARS}"
        )));
    }
    Ok(())
}

/// Descriptions may be empty but at most [`DESCRIPTION_MAX_CHARS`]
/// characters.
pub fn validate_description(description: &str) -> Result<()> {
    let length = description.chars().count();
    if length > DESCRIPTION_MAX_CHARS {
        return Err(PlannerError::invalid_input("description").with_reason(format!(
            "Description is {length} characters long; the limit is {DESCRIPTION_MAX_CHARS}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_task_status_aliases() {
        for (raw, expected) in [
            ("pending", TaskStatus::Pending),
            ("in-progress", TaskStatus::InProgress),
            ("completed", TaskStatus::Completed),
        ] {
            let params = UpdateTask {
                id: 1,
                status: Some(raw.to_string()),
                ..Default::default()
            };
            assert_eq!(params.validate().unwrap().status, Some(expected));
        }
    }

    #[test]
    fn test_update_task_invalid_status() {
        let params = UpdateTask {
            id: 1,
            status: Some("blocked".to_string()),
            ..Default::default()
        };
        match params.validate().unwrap_err() {
            PlannerError::InvalidInput { field, reason } => {
                assert_eq!(field, "status");
                assert!(reason.contains("Invalid status: blocked"));
            }
            other => panic!("Expected InvalidInput error, got {other:?}"),
        }
    }

    #[test]
    fn test_update_task_no_fields() {
        let err = UpdateTask {
            id: 4,
            ..Default::default()
        }
        .validate()
        .unwrap_err();
        assert!(err.to_string().contains("No fields to update"));
    }

    #[test]
    fn test_update_task_clearing_fields() {
        let patch = UpdateTask {
            id: 1,
            description: Some(String::new()),
            due_date: Some(String::new()),
            ..Default::default()
        }
        .validate()
        .unwrap();
        assert_eq!(patch.description, Some(None));
        assert_eq!(patch.due_date, Some(None));
    }

    #[test]
    fn test_title_limits() {
        assert!(validate_title("").is_err());
        assert!(validate_title("   ").is_err());
        assert!(validate_title(&"x".repeat(TITLE_MAX_CHARS)).is_ok());
        assert!(validate_title(&"x".repeat(TITLE_MAX_CHARS + 1)).is_err());
        assert!(validate_description(&"é".repeat(DESCRIPTION_MAX_CHARS)).is_ok());
        assert!(validate_description(&"y".repeat(DESCRIPTION_MAX_CHARS + 1)).is_err());
    }

    #[test]
    fn test_create_task_parses_due_date() {
        let params = CreateTask {
            plan_id: 1,
            title: "Ship it".to_string(),
            due_date: Some("2025-02-28".to_string()),
            ..Default::default()
        };
        let new = NewTask::try_from(&params).unwrap();
        assert_eq!(new.due_date, Some(jiff::civil::date(2025, 2, 28)));

        let bad = CreateTask {
            due_date: Some("28/02/2025".to_string()),
            ..params
        };
        assert!(NewTask::try_from(&bad).is_err());
    }

    #[test]
    fn test_create_plan_status_defaults_to_active() {
        let params = CreatePlan {
            title: "Trip".to_string(),
            ..Default::default()
        };
        assert_eq!(params.validate().unwrap(), PlanStatus::Active);

        let draft = CreatePlan {
            status: Some("draft".to_string()),
            ..params
        };
        assert_eq!(draft.validate().unwrap(), PlanStatus::Draft);
    }
}
