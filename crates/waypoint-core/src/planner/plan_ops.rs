//! Plan operations for the Planner.

use log::debug;

use super::Planner;
use crate::{
    error::Result,
    models::{Plan, PlanFilter, PlanStats, Resource},
    params::{AddResource, CreatePlan, Id, UpdatePlanStatus},
};

impl Planner {
    /// Creates a new plan owned by the planner's user.
    pub async fn create_plan(&self, params: &CreatePlan) -> Result<Plan> {
        let status = params.validate()?;
        let user_id = self.user_id.clone();
        let title = params.title.clone();
        let description = params.description.clone();

        self.run_blocking(move |db| {
            db.create_plan(&user_id, &title, description.as_deref(), status)
        })
        .await
    }

    /// Retrieves a plan with its tasks and resources.
    pub async fn get_plan(&self, params: &Id) -> Result<Option<Plan>> {
        let plan_id = params.id;
        self.run_blocking(move |db| db.get_plan(plan_id)).await
    }

    /// Lists the planner user's plans matching `filter`.
    ///
    /// A filter without a user is scoped to the planner's user.
    pub async fn list_plans(&self, filter: PlanFilter) -> Result<Vec<Plan>> {
        let filter = PlanFilter {
            user_id: filter.user_id.or_else(|| Some(self.user_id.clone())),
            ..filter
        };
        self.run_blocking(move |db| db.list_plans(&filter)).await
    }

    /// Changes a plan's lifecycle status.
    pub async fn update_plan_status(&self, params: &UpdatePlanStatus) -> Result<Option<Plan>> {
        let status = params.validate()?;
        let plan_id = params.id;
        debug!("Setting plan {plan_id} status to {}", status.as_str());
        self.run_blocking(move |db| db.update_plan_status(plan_id, status))
            .await
    }

    /// Permanently deletes a plan together with its tasks and resources.
    /// This operation cannot be undone.
    pub async fn delete_plan_by_id(&self, params: &Id) -> Result<()> {
        let plan_id = params.id;
        self.run_blocking(move |db| db.delete_plan(plan_id)).await
    }

    /// Counts the planner user's plans per status.
    pub async fn plan_stats(&self) -> Result<PlanStats> {
        let user_id = self.user_id.clone();
        self.run_blocking(move |db| db.plan_stats(Some(&user_id)))
            .await
    }

    /// Attaches a reference link to a plan.
    pub async fn add_resource(&self, params: &AddResource) -> Result<Resource> {
        let resource_type = params.validate()?;
        let plan_id = params.plan_id;
        let title = params.title.clone();
        let url = params.url.clone();

        self.run_blocking(move |db| db.add_resource(plan_id, &title, &url, resource_type))
            .await
    }
}
