//! Collection wrapper types for displaying groups of domain objects.

use std::{fmt, ops::Index};

use jiff::civil::Date;

use super::{datetime::DueLabel, estimates::format_time_estimate};
use crate::{
    models::{PlanSummary, Task},
    ordering::prerequisites_satisfied,
};

/// Newtype wrapper for displaying collections of plan summaries.
///
/// # Examples
///
/// ```rust
/// use waypoint_core::{
///     display::PlanSummaries,
///     models::{Plan, PlanStatus, PlanSummary},
/// };
/// use jiff::Timestamp;
///
/// let plan = Plan {
///     id: 1,
///     user_id: "local".to_string(),
///     title: "My Project".to_string(),
///     description: None,
///     status: PlanStatus::Active,
///     created_at: Timestamp::now(),
///     updated_at: Timestamp::now(),
///     tasks: vec![],
///     resources: vec![],
/// };
///
/// let summaries = PlanSummaries(vec![PlanSummary::from(&plan)]);
/// assert!(summaries.to_string().contains("My Project"));
/// ```
#[derive(Debug, Clone)]
pub struct PlanSummaries(pub Vec<PlanSummary>);

impl PlanSummaries {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PlanSummary> {
        self.0.iter()
    }
}

impl Index<usize> for PlanSummaries {
    type Output = PlanSummary;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl IntoIterator for PlanSummaries {
    type Item = PlanSummary;
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl fmt::Display for PlanSummaries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            writeln!(f, "No plans found.")
        } else {
            for plan in &self.0 {
                write!(f, "{plan}")?;
            }
            Ok(())
        }
    }
}

/// Newtype wrapper for displaying collections of tasks in full.
#[derive(Debug, Clone)]
pub struct Tasks(pub Vec<Task>);

impl Tasks {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Task> {
        self.0.iter()
    }
}

impl Index<usize> for Tasks {
    type Output = Task;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl IntoIterator for Tasks {
    type Item = Task;
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl fmt::Display for Tasks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            writeln!(f, "No tasks found.")
        } else {
            for task in &self.0 {
                write!(f, "{task}")?;
            }
            Ok(())
        }
    }
}

/// Compact one-line-per-task listing relative to a given day.
///
/// `context` holds the whole plan so prerequisite state can be shown for
/// each listed task, which may be a filtered or re-sorted subset.
pub struct Agenda<'a> {
    pub tasks: &'a [Task],
    pub context: &'a [Task],
    pub today: Date,
}

impl fmt::Display for Agenda<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.tasks.is_empty() {
            return writeln!(f, "No tasks found.");
        }

        for task in self.tasks {
            write!(f, "- [{}] {} ({})", task.order, task.title, task.status.with_icon())?;
            if let Some(due) = task.due_date {
                write!(
                    f,
                    ", due {}",
                    DueLabel {
                        due,
                        status: task.status,
                        today: self.today,
                    }
                )?;
            }
            if task.estimated_time_hours.is_some() {
                write!(f, ", {}", format_time_estimate(task.estimated_time_hours))?;
            }
            if !task.status.is_completed() && !prerequisites_satisfied(task, self.context) {
                write!(f, ", blocked")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;
    use crate::models::TaskStatus;

    #[test]
    fn test_tasks_display_empty() {
        assert_eq!(Tasks(vec![]).to_string(), "No tasks found.\n");
        assert_eq!(PlanSummaries(vec![]).to_string(), "No plans found.\n");
    }

    #[test]
    fn test_tasks_display_multiple() {
        let tasks = Tasks(vec![
            Task::new(1, 1, "First", 0),
            Task::new(2, 1, "Second", 1).with_status(TaskStatus::Completed),
        ]);
        let output = tasks.to_string();

        assert!(output.contains("### 0. First (○ To Do)"));
        assert!(output.contains("### 1. Second (✓ Done)"));
    }

    #[test]
    fn test_agenda_marks_blocked_and_due() {
        let tasks = vec![
            Task::new(1, 1, "Buy paint", 0).with_due_date(date(2025, 6, 14)),
            Task::new(2, 1, "Paint", 1)
                .with_prerequisites(vec![0])
                .with_estimates(Some(2.0), None),
        ];
        let output = Agenda {
            tasks: &tasks,
            context: &tasks,
            today: date(2025, 6, 15),
        }
        .to_string();

        assert_eq!(
            output,
            "- [0] Buy paint (○ To Do), due 2025-06-14 (Yesterday, overdue)\n\
             - [1] Paint (○ To Do), 2 hours, blocked\n"
        );
    }
}
