//! Task model definition and related functionality.

use jiff::{civil::Date, Timestamp};
use serde::{Deserialize, Serialize};

use super::{Difficulty, TaskIntelligence, TaskStatus};

/// Represents an individual task within a plan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Task {
    /// Unique identifier for the task, stable for its lifetime
    pub id: u64,

    /// ID of the owning plan
    pub plan_id: u64,

    /// Brief title of the task
    pub title: String,

    /// Detailed description of the task
    pub description: Option<String>,

    /// Current status of the task
    #[serde(default)]
    pub status: TaskStatus,

    /// Position of the task within the plan (0-indexed)
    pub order: u32,

    /// Optional due date
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<Date>,

    /// Estimated effort in hours
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_time_hours: Option<f64>,

    /// Estimated cost in US dollars
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_cost_usd: Option<f64>,

    /// Difficulty from 1 (very easy) to 5 (very hard)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,

    /// Tools or materials needed
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tools_needed: Vec<String>,

    /// Order values of sibling tasks that must be completed first
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub prerequisites: Vec<u32>,

    /// Free-form labels
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    /// Timestamp when the task was created (UTC)
    pub created_at: Timestamp,

    /// Timestamp when the task was last updated (UTC)
    pub updated_at: Timestamp,
}

impl Task {
    /// Creates a pending task with no metadata.
    pub fn new(id: u64, plan_id: u64, title: impl Into<String>, order: u32) -> Self {
        let now = Timestamp::now();
        Self {
            id,
            plan_id,
            title: title.into(),
            description: None,
            status: TaskStatus::Pending,
            order,
            due_date: None,
            estimated_time_hours: None,
            estimated_cost_usd: None,
            difficulty: None,
            tools_needed: Vec::new(),
            prerequisites: Vec::new(),
            tags: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_prerequisites(mut self, prerequisites: impl Into<Vec<u32>>) -> Self {
        self.prerequisites = prerequisites.into();
        self
    }

    pub fn with_estimates(mut self, hours: Option<f64>, cost_usd: Option<f64>) -> Self {
        self.estimated_time_hours = hours;
        self.estimated_cost_usd = cost_usd;
        self
    }

    pub fn with_due_date(mut self, due_date: Date) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Snapshot of the task's regenerable metadata.
    pub fn intelligence(&self) -> TaskIntelligence {
        TaskIntelligence {
            estimated_time_hours: self.estimated_time_hours,
            estimated_cost_usd: self.estimated_cost_usd,
            difficulty: self.difficulty,
            tools_needed: self.tools_needed.clone(),
            prerequisites: self.prerequisites.clone(),
            tags: self.tags.clone(),
        }
    }

    /// Replaces all regenerable metadata at once.
    pub fn set_intelligence(&mut self, intelligence: TaskIntelligence) {
        self.estimated_time_hours = intelligence.estimated_time_hours;
        self.estimated_cost_usd = intelligence.estimated_cost_usd;
        self.difficulty = intelligence.difficulty;
        self.tools_needed = intelligence.tools_needed;
        self.prerequisites = intelligence.prerequisites;
        self.tags = intelligence.tags;
    }
}
