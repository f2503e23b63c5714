//! Due-date arithmetic.
//!
//! Every helper takes `today` explicitly so results do not depend on the
//! wall clock; [`today`] reads it from the system time zone.

use std::fmt;

use jiff::{civil::Date, Zoned};
use serde::{Deserialize, Serialize};

use crate::models::{Task, TaskStatus};

/// Days within which an open task counts as due soon.
pub const DUE_SOON_DAYS: i32 = 3;

/// The current date in the system time zone.
pub fn today() -> Date {
    Zoned::now().date()
}

/// Whole days from `today` until `due`; negative once it has passed.
pub fn days_until_due(due: Date, today: Date) -> i32 {
    (today.duration_until(due).as_hours() / 24) as i32
}

/// A task is overdue when its due date lies before today and it is not
/// completed. Tasks due today are not overdue.
pub fn is_overdue(due: Option<Date>, status: TaskStatus, today: Date) -> bool {
    match due {
        Some(due) if !status.is_completed() => due < today,
        _ => false,
    }
}

/// How pressing a due date is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DueUrgency {
    Overdue,
    DueToday,
    DueSoon,
    Upcoming,
    /// No due date, or the task is already completed
    None,
}

impl DueUrgency {
    pub fn classify(due: Option<Date>, status: TaskStatus, today: Date) -> Self {
        let Some(due) = due else {
            return DueUrgency::None;
        };
        if status.is_completed() {
            return DueUrgency::None;
        }
        match days_until_due(due, today) {
            days if days < 0 => DueUrgency::Overdue,
            0 => DueUrgency::DueToday,
            days if days <= DUE_SOON_DAYS => DueUrgency::DueSoon,
            _ => DueUrgency::Upcoming,
        }
    }

    pub fn for_task(task: &Task, today: Date) -> Self {
        Self::classify(task.due_date, task.status, today)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DueUrgency::Overdue => "overdue",
            DueUrgency::DueToday => "due today",
            DueUrgency::DueSoon => "due soon",
            DueUrgency::Upcoming => "upcoming",
            DueUrgency::None => "none",
        }
    }
}

/// Human-friendly distance to a due date ("Tomorrow", "In 2 weeks").
///
/// ```rust
/// use jiff::civil::date;
/// use waypoint_core::ordering::RelativeDue;
///
/// let today = date(2025, 1, 10);
/// assert_eq!(RelativeDue::new(date(2025, 1, 11), today).to_string(), "Tomorrow");
/// assert_eq!(RelativeDue::new(date(2025, 1, 7), today).to_string(), "3 days ago");
/// assert_eq!(RelativeDue::new(date(2025, 1, 19), today).to_string(), "In 2 weeks");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelativeDue {
    days: i32,
}

impl RelativeDue {
    pub fn new(due: Date, today: Date) -> Self {
        Self {
            days: days_until_due(due, today),
        }
    }

    pub fn days(&self) -> i32 {
        self.days
    }
}

impl fmt::Display for RelativeDue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let plural = |n: i32| if n > 1 { "s" } else { "" };
        match self.days {
            0 => write!(f, "Today"),
            1 => write!(f, "Tomorrow"),
            -1 => write!(f, "Yesterday"),
            d @ 2..=7 => write!(f, "In {d} days"),
            d @ -7..=-2 => write!(f, "{} days ago", -d),
            d if d > 7 => {
                let weeks = (d + 6) / 7;
                write!(f, "In {weeks} week{}", plural(weeks))
            }
            d => {
                let weeks = (-d + 6) / 7;
                write!(f, "{weeks} week{} ago", plural(weeks))
            }
        }
    }
}
