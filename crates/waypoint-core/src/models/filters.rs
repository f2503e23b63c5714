//! Filter types for querying plans.

use super::PlanStatus;

/// Filter options for querying plans.
#[derive(Debug, Clone, Default)]
pub struct PlanFilter {
    /// Filter by owner
    pub user_id: Option<String>,

    /// Filter by plan title (case-insensitive partial match)
    pub title_contains: Option<String>,

    /// Filter by plan status. `None` shows every non-archived plan.
    pub status: Option<PlanStatus>,

    /// Show archived plans as well when no status is set
    pub include_archived: bool,
}

impl TryFrom<&crate::params::ListPlans> for PlanFilter {
    type Error = crate::PlannerError;

    /// Convert ListPlans parameters to a PlanFilter for plan queries.
    ///
    /// ```rust
    /// use waypoint_core::{models::{PlanFilter, PlanStatus}, params::ListPlans};
    ///
    /// let params = ListPlans { status: Some("draft".to_string()), all: false };
    /// let filter = PlanFilter::try_from(&params)?;
    /// assert_eq!(filter.status, Some(PlanStatus::Draft));
    ///
    /// let bogus = ListPlans { status: Some("paused".to_string()), all: false };
    /// assert!(PlanFilter::try_from(&bogus).is_err());
    /// # Ok::<(), waypoint_core::PlannerError>(())
    /// ```
    fn try_from(params: &crate::params::ListPlans) -> Result<Self, Self::Error> {
        let status = params
            .status
            .as_deref()
            .map(|s| {
                s.parse::<PlanStatus>()
                    .map_err(|e| crate::PlannerError::invalid_input("status").with_reason(e))
            })
            .transpose()?;

        Ok(Self {
            status,
            include_archived: params.all,
            ..Default::default()
        })
    }
}
