//! DateTime display utilities.

use std::fmt;

use jiff::{civil::Date, tz::TimeZone, Timestamp};

use crate::{
    models::TaskStatus,
    ordering::{DueUrgency, RelativeDue},
};

/// A wrapper around `Timestamp` that formats it in the system timezone as
/// `YYYY-MM-DD HH:MM:SS TZ`.
pub struct LocalDateTime<'a>(pub &'a Timestamp);

impl<'a> fmt::Display for LocalDateTime<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            self.0
                .to_zoned(TimeZone::system())
                .strftime("%Y-%m-%d %H:%M:%S %Z")
        )
    }
}

/// A due date relative to a reference day, e.g. `2025-06-18 (In 3 days, due soon)`.
///
/// Completed tasks show only the date and the relative distance.
pub struct DueLabel {
    pub due: Date,
    pub status: TaskStatus,
    pub today: Date,
}

impl fmt::Display for DueLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let relative = RelativeDue::new(self.due, self.today);
        match DueUrgency::classify(Some(self.due), self.status, self.today) {
            urgency @ (DueUrgency::Overdue | DueUrgency::DueSoon) => {
                write!(f, "{} ({relative}, {})", self.due, urgency.as_str())
            }
            _ => write!(f, "{} ({relative})", self.due),
        }
    }
}
