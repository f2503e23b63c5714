//! Status enumerations for plans, tasks and resources.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Type-safe enumeration of plan statuses.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub enum PlanStatus {
    /// Plan is being drafted and not yet worked on
    Draft,

    /// Plan is active and visible
    #[default]
    Active,

    /// Every task of the plan has been finished
    Completed,

    /// Plan is archived and hidden from normal views
    Archived,
}

impl FromStr for PlanStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "draft" => Ok(PlanStatus::Draft),
            "active" => Ok(PlanStatus::Active),
            "completed" => Ok(PlanStatus::Completed),
            "archived" => Ok(PlanStatus::Archived),
            _ => Err(format!("Invalid plan status: {s}")),
        }
    }
}

impl PlanStatus {
    /// All statuses, in lifecycle order.
    pub const ALL: [PlanStatus; 4] = [
        PlanStatus::Draft,
        PlanStatus::Active,
        PlanStatus::Completed,
        PlanStatus::Archived,
    ];

    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanStatus::Draft => "draft",
            PlanStatus::Active => "active",
            PlanStatus::Completed => "completed",
            PlanStatus::Archived => "archived",
        }
    }
}

/// Type-safe enumeration of task statuses.
///
/// Transitions are unordered: any status can be reached from any other one.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub enum TaskStatus {
    /// Task has not been started
    #[default]
    Pending,

    /// Task is being worked on
    InProgress,

    /// Task has been completed
    Completed,
}

impl FromStr for TaskStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" | "todo" => Ok(TaskStatus::Pending),
            "in_progress" | "inprogress" | "in-progress" => Ok(TaskStatus::InProgress),
            "completed" | "done" => Ok(TaskStatus::Completed),
            _ => Err(format!("Invalid task status: {s}")),
        }
    }
}

impl TaskStatus {
    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Completed => "completed",
        }
    }

    /// Whether the task counts as finished for aggregates and readiness.
    pub fn is_completed(&self) -> bool {
        matches!(self, TaskStatus::Completed)
    }

    /// Get status with consistent icon formatting for display.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use waypoint_core::models::TaskStatus;
    ///
    /// assert_eq!(TaskStatus::Completed.with_icon(), "✓ Done");
    /// assert_eq!(TaskStatus::InProgress.with_icon(), "➤ In Progress");
    /// assert_eq!(TaskStatus::Pending.with_icon(), "○ To Do");
    /// ```
    pub fn with_icon(&self) -> &'static str {
        match self {
            TaskStatus::Completed => "✓ Done",
            TaskStatus::InProgress => "➤ In Progress",
            TaskStatus::Pending => "○ To Do",
        }
    }
}

/// Kind of reference attached to a plan.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub enum ResourceType {
    #[default]
    Link,
    Document,
    Video,
    Other,
}

impl FromStr for ResourceType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "link" => Ok(ResourceType::Link),
            "document" => Ok(ResourceType::Document),
            "video" => Ok(ResourceType::Video),
            "other" => Ok(ResourceType::Other),
            _ => Err(format!("Invalid resource type: {s}")),
        }
    }
}

impl ResourceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceType::Link => "link",
            ResourceType::Document => "document",
            ResourceType::Video => "video",
            ResourceType::Other => "other",
        }
    }
}
