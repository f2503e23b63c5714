//! Plan summary types and functionality.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::{Plan, PlanStatus};
use crate::ordering::TaskAggregates;

/// Summary information about a plan with task statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanSummary {
    /// Plan ID
    pub id: u64,
    /// Owner of the plan
    pub user_id: String,
    /// Title of the plan
    pub title: String,
    /// Detailed multi-line description of the plan
    pub description: Option<String>,
    /// Plan status
    pub status: PlanStatus,
    /// Creation timestamp
    pub created_at: Timestamp,
    /// Last update timestamp
    pub updated_at: Timestamp,
    /// Total number of tasks
    pub total_tasks: u32,
    /// Number of completed tasks
    pub completed_tasks: u32,
    /// Rounded completion percentage (0..=100)
    pub completion_percentage: u32,
    /// Sum of estimated hours over every task
    pub total_estimated_hours: f64,
    /// Sum of estimated cost over every task
    pub total_estimated_cost: f64,
}

impl From<&Plan> for PlanSummary {
    fn from(plan: &Plan) -> Self {
        let aggregates = TaskAggregates::from_tasks(&plan.tasks);

        Self {
            id: plan.id,
            user_id: plan.user_id.clone(),
            title: plan.title.clone(),
            description: plan.description.clone(),
            status: plan.status,
            created_at: plan.created_at,
            updated_at: plan.updated_at,
            total_tasks: aggregates.total,
            completed_tasks: aggregates.completed,
            completion_percentage: aggregates.completion_percentage,
            total_estimated_hours: aggregates.total_time_hours,
            total_estimated_cost: aggregates.total_cost_usd,
        }
    }
}

impl PlanSummary {
    /// Number of tasks not yet completed.
    pub fn remaining_tasks(&self) -> u32 {
        self.total_tasks - self.completed_tasks
    }
}

/// Number of plans in each lifecycle status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanStats {
    pub total: u32,
    pub draft: u32,
    pub active: u32,
    pub completed: u32,
    pub archived: u32,
}
