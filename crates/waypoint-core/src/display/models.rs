//! Display implementations for domain models.
//!
//! All output is markdown so the same text renders in a terminal and reads
//! naturally as an MCP tool result.

use std::fmt;

use super::{
    datetime::LocalDateTime,
    estimates::{format_cost, format_time_estimate},
};
use crate::{
    models::{Plan, PlanStats, PlanStatus, PlanSummary, Resource, ResourceType, Task, TaskStatus},
    ordering::PlanProgress,
};

impl fmt::Display for PlanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}. {}", self.id, self.title)?;
        writeln!(f)?;

        writeln!(f, "- Status: {}", self.status)?;
        writeln!(f, "- Created: {}", LocalDateTime(&self.created_at))?;
        writeln!(f, "- Updated: {}", LocalDateTime(&self.updated_at))?;

        if let Some(desc) = &self.description {
            writeln!(f)?;
            writeln!(f, "{desc}")?;
        }

        if self.tasks.is_empty() {
            writeln!(f, "\nNo tasks in this plan.")?;
        } else {
            writeln!(f, "\n## Tasks")?;
            writeln!(f)?;
            for task in &self.tasks {
                write!(f, "{task}")?;
            }
        }

        if !self.resources.is_empty() {
            writeln!(f, "## Resources")?;
            writeln!(f)?;
            for resource in &self.resources {
                writeln!(f, "{resource}")?;
            }
        }

        Ok(())
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "### {}. {} ({})",
            self.order,
            self.title,
            self.status.with_icon()
        )?;
        writeln!(f)?;
        writeln!(f, "- ID: {}", self.id)?;

        if let Some(due) = &self.due_date {
            writeln!(f, "- Due: {due}")?;
        }
        if self.estimated_time_hours.is_some() || self.estimated_cost_usd.is_some() {
            writeln!(
                f,
                "- Estimate: {}, {}",
                format_time_estimate(self.estimated_time_hours),
                format_cost(self.estimated_cost_usd)
            )?;
        }
        if let Some(difficulty) = &self.difficulty {
            writeln!(f, "- Difficulty: {difficulty}")?;
        }
        if !self.prerequisites.is_empty() {
            let orders: Vec<String> = self.prerequisites.iter().map(u32::to_string).collect();
            writeln!(f, "- After: {}", orders.join(", "))?;
        }
        if !self.tools_needed.is_empty() {
            writeln!(f, "- Tools: {}", self.tools_needed.join(", "))?;
        }
        if !self.tags.is_empty() {
            writeln!(f, "- Tags: {}", self.tags.join(", "))?;
        }

        if let Some(desc) = &self.description {
            writeln!(f)?;
            writeln!(f, "{desc}")?;
        }
        writeln!(f)
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "- [{}]({}) ({})", self.title, self.url, self.resource_type)
    }
}

impl fmt::Display for PlanSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let progress = if self.total_tasks > 0 {
            format!(
                " ({}/{}, {}%)",
                self.completed_tasks, self.total_tasks, self.completion_percentage
            )
        } else {
            String::new()
        };

        writeln!(f, "## {} (ID: {}){progress}", self.title, self.id)?;
        writeln!(f)?;

        writeln!(f, "- **Status**: {}", self.status)?;
        if let Some(desc) = &self.description {
            writeln!(f, "- **Description**: {desc}")?;
        }
        if self.total_estimated_hours > 0.0 || self.total_estimated_cost > 0.0 {
            writeln!(
                f,
                "- **Estimate**: {}, {}",
                format_time_estimate(Some(self.total_estimated_hours)),
                format_cost(Some(self.total_estimated_cost))
            )?;
        }
        writeln!(f, "- **Updated**: {}", LocalDateTime(&self.updated_at))?;
        writeln!(f)
    }
}

impl fmt::Display for PlanStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## Plans ({})", self.total)?;
        writeln!(f)?;
        writeln!(f, "- Draft: {}", self.draft)?;
        writeln!(f, "- Active: {}", self.active)?;
        writeln!(f, "- Completed: {}", self.completed)?;
        writeln!(f, "- Archived: {}", self.archived)
    }
}

impl fmt::Display for PlanProgress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let totals = &self.aggregates;

        writeln!(f, "## Progress of plan {} as of {}", self.plan_id, self.today)?;
        writeln!(f)?;
        writeln!(
            f,
            "- Completed: {}/{} ({}%)",
            totals.completed, totals.total, totals.completion_percentage
        )?;
        writeln!(f, "- In progress: {}", totals.in_progress)?;
        writeln!(f, "- Ready: {}", self.ready)?;
        writeln!(f, "- Blocked: {}", self.blocked)?;
        writeln!(f, "- Overdue: {}", self.overdue)?;
        writeln!(f, "- Due soon: {}", self.due_soon)?;
        writeln!(
            f,
            "- Time: {} total, {} remaining",
            format_time_estimate(Some(totals.total_time_hours)),
            format_time_estimate(Some(totals.remaining_time_hours))
        )?;
        writeln!(
            f,
            "- Cost: {} total, {} remaining",
            format_cost(Some(totals.total_cost_usd)),
            format_cost(Some(totals.remaining_cost_usd))
        )
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;
    use crate::models::Difficulty;

    #[test]
    fn test_task_display_includes_metadata() {
        let mut task = Task::new(3, 1, "Tile backsplash", 2)
            .with_status(TaskStatus::InProgress)
            .with_prerequisites(vec![0, 1])
            .with_estimates(Some(4.0), Some(250.0))
            .with_due_date(date(2025, 7, 1));
        task.difficulty = Some(Difficulty::new(3).unwrap());

        let output = task.to_string();
        assert!(output.starts_with("### 2. Tile backsplash (➤ In Progress)"));
        assert!(output.contains("- Due: 2025-07-01"));
        assert!(output.contains("- Estimate: 4 hours, $250"));
        assert!(output.contains("- Difficulty: 3/5 (Medium)"));
        assert!(output.contains("- After: 0, 1"));
    }

    #[test]
    fn test_task_display_omits_missing_fields() {
        let output = Task::new(1, 1, "Plain", 0).to_string();
        assert!(output.contains("○ To Do"));
        assert!(!output.contains("Due:"));
        assert!(!output.contains("Estimate:"));
        assert!(!output.contains("After:"));
    }

    #[test]
    fn test_progress_display() {
        let tasks = vec![
            Task::new(1, 9, "A", 0).with_status(TaskStatus::Completed),
            Task::new(2, 9, "B", 1).with_prerequisites(vec![0]),
            Task::new(3, 9, "C", 2).with_prerequisites(vec![1]),
        ];
        let progress = PlanProgress::compute(9, &tasks, date(2025, 6, 15));
        let output = progress.to_string();

        assert!(output.contains("## Progress of plan 9 as of 2025-06-15"));
        assert!(output.contains("- Completed: 1/3 (33%)"));
        assert!(output.contains("- Ready: 1"));
        assert!(output.contains("- Blocked: 1"));
        assert!(output.contains("- Time: Not estimated total"));
    }
}
