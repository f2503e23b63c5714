//! Derived statistics over a task list.
//!
//! Every function here is pure and total: it never mutates its input and is
//! cheap enough to recompute on each read.

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use super::{prerequisites_satisfied, schedule};
use crate::models::{Task, TaskStatus};

/// `round(100 * completed / total)`, or 0 for an empty list.
///
/// ```rust
/// use waypoint_core::{models::{Task, TaskStatus}, ordering::completion_percentage};
///
/// assert_eq!(completion_percentage(&[]), 0);
/// let tasks = vec![
///     Task::new(1, 1, "a", 0).with_status(TaskStatus::Completed),
///     Task::new(2, 1, "b", 1),
/// ];
/// assert_eq!(completion_percentage(&tasks), 50);
/// ```
pub fn completion_percentage(tasks: &[Task]) -> u32 {
    let total = tasks.len() as u64;
    if total == 0 {
        return 0;
    }
    let completed = completed_count(tasks) as u64;
    // Half rounds up, like `Math.round` on a positive ratio.
    ((200 * completed + total) / (2 * total)) as u32
}

/// Sum of estimated hours over every task; missing estimates count as 0.
pub fn total_estimated_time(tasks: &[Task]) -> f64 {
    sum(tasks.iter(), |t| t.estimated_time_hours)
}

/// Sum of estimated hours over tasks that are not completed.
pub fn remaining_estimated_time(tasks: &[Task]) -> f64 {
    sum(open(tasks), |t| t.estimated_time_hours)
}

/// Sum of estimated cost over every task; missing estimates count as 0.
pub fn total_estimated_cost(tasks: &[Task]) -> f64 {
    sum(tasks.iter(), |t| t.estimated_cost_usd)
}

/// Sum of estimated cost over tasks that are not completed.
pub fn remaining_estimated_cost(tasks: &[Task]) -> f64 {
    sum(open(tasks), |t| t.estimated_cost_usd)
}

fn open(tasks: &[Task]) -> impl Iterator<Item = &Task> {
    tasks.iter().filter(|t| !t.status.is_completed())
}

fn sum<'a>(tasks: impl Iterator<Item = &'a Task>, value: impl Fn(&Task) -> Option<f64>) -> f64 {
    tasks.filter_map(value).sum()
}

fn completed_count(tasks: &[Task]) -> u32 {
    tasks.iter().filter(|t| t.status.is_completed()).count() as u32
}

/// All aggregates of a task list computed in one place.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskAggregates {
    pub total: u32,
    pub completed: u32,
    pub in_progress: u32,
    pub pending: u32,
    pub completion_percentage: u32,
    pub total_time_hours: f64,
    pub remaining_time_hours: f64,
    pub total_cost_usd: f64,
    pub remaining_cost_usd: f64,
}

impl TaskAggregates {
    pub fn from_tasks(tasks: &[Task]) -> Self {
        let count = |status: TaskStatus| tasks.iter().filter(|t| t.status == status).count() as u32;

        Self {
            total: tasks.len() as u32,
            completed: count(TaskStatus::Completed),
            in_progress: count(TaskStatus::InProgress),
            pending: count(TaskStatus::Pending),
            completion_percentage: completion_percentage(tasks),
            total_time_hours: total_estimated_time(tasks),
            remaining_time_hours: remaining_estimated_time(tasks),
            total_cost_usd: total_estimated_cost(tasks),
            remaining_cost_usd: remaining_estimated_cost(tasks),
        }
    }
}

/// Progress report for one plan as of a given day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanProgress {
    pub plan_id: u64,
    pub today: Date,
    #[serde(flatten)]
    pub aggregates: TaskAggregates,
    /// Open tasks whose prerequisites are all completed
    pub ready: u32,
    /// Open tasks waiting on at least one unfinished prerequisite
    pub blocked: u32,
    /// Open tasks whose due date has passed
    pub overdue: u32,
    /// Open tasks due today or within the next three days
    pub due_soon: u32,
}

impl PlanProgress {
    pub fn compute(plan_id: u64, tasks: &[Task], today: Date) -> Self {
        let mut progress = Self {
            plan_id,
            today,
            aggregates: TaskAggregates::from_tasks(tasks),
            ready: 0,
            blocked: 0,
            overdue: 0,
            due_soon: 0,
        };

        for task in open(tasks) {
            if prerequisites_satisfied(task, tasks) {
                progress.ready += 1;
            } else {
                progress.blocked += 1;
            }
            match schedule::DueUrgency::for_task(task, today) {
                schedule::DueUrgency::Overdue => progress.overdue += 1,
                schedule::DueUrgency::DueToday | schedule::DueUrgency::DueSoon => {
                    progress.due_soon += 1
                }
                _ => {}
            }
        }

        progress
    }
}
