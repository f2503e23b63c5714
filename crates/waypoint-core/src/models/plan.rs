//! Plan and resource model definitions.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::{PlanStatus, ResourceType, Task};

/// Represents a complete plan with metadata, tasks and resources.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Plan {
    /// Unique identifier for the plan
    pub id: u64,

    /// Owner of the plan
    pub user_id: String,

    /// Title of the plan
    pub title: String,

    /// Detailed multi-line description of the plan
    pub description: Option<String>,

    /// Lifecycle status of the plan
    #[serde(default)]
    pub status: PlanStatus,

    /// Timestamp when the plan was created (UTC)
    pub created_at: Timestamp,

    /// Timestamp when the plan was last modified (UTC)
    pub updated_at: Timestamp,

    /// Tasks ordered by their `order` field
    #[serde(default)]
    pub tasks: Vec<Task>,

    /// Reference links, independent of task ordering
    #[serde(default)]
    pub resources: Vec<Resource>,
}

/// A reference link attached to a plan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Resource {
    pub id: u64,
    pub plan_id: u64,
    pub title: String,
    pub url: String,
    #[serde(rename = "type", default)]
    pub resource_type: ResourceType,
    pub created_at: Timestamp,
}
