//! MCP tool handlers.

use std::sync::Arc;

use log::debug;
use rmcp::{
    handler::server::tool::Parameters,
    model::{CallToolResult, Content},
    ErrorData,
};
use schemars::JsonSchema;
use serde::Deserialize;
use tokio::sync::Mutex;
use waypoint_core::{
    display::{Agenda, CreateResult, DeleteResult, OperationStatus, UpdateResult},
    params as core, Planner, Settlement, TaskStore,
};

use super::errors::to_mcp_error;

/// Transparent wrapper that lets core parameter types act as tool
/// arguments. Deserialization and schema generation pass straight through
/// to the wrapped type.
#[derive(Debug, Deserialize)]
#[serde(transparent)]
pub struct McpParams<T>(T)
where
    T: JsonSchema;

impl<T> JsonSchema for McpParams<T>
where
    T: JsonSchema,
{
    fn schema_name() -> std::borrow::Cow<'static, str> {
        T::schema_name()
    }

    fn json_schema(g: &mut schemars::SchemaGenerator) -> schemars::Schema {
        T::json_schema(g)
    }
}

impl<T> AsRef<T> for McpParams<T>
where
    T: JsonSchema,
{
    fn as_ref(&self) -> &T {
        &self.0
    }
}

pub type Id = McpParams<core::Id>;
pub type CreatePlan = McpParams<core::CreatePlan>;
pub type ListPlans = McpParams<core::ListPlans>;
pub type UpdatePlanStatus = McpParams<core::UpdatePlanStatus>;
pub type DeletePlan = McpParams<core::DeletePlan>;
pub type AddResource = McpParams<core::AddResource>;
pub type ShowProgress = McpParams<core::ShowProgress>;
pub type CreateTask = McpParams<core::CreateTask>;
pub type UpdateTask = McpParams<core::UpdateTask>;
pub type MoveTask = McpParams<core::MoveTask>;
pub type ReorderTasks = McpParams<core::ReorderTasks>;
pub type SortTasks = McpParams<core::SortTasks>;
pub type SetTaskIntelligence = McpParams<core::SetTaskIntelligence>;

pub type McpResult = Result<CallToolResult, ErrorData>;

fn text(body: impl Into<String>) -> McpResult {
    Ok(CallToolResult::success(vec![Content::text(body.into())]))
}

fn not_found(kind: &str, id: u64) -> ErrorData {
    ErrorData::invalid_params(format!("{kind} with ID {id} not found"), None)
}

pub struct McpHandlers {
    planner: Arc<Mutex<Planner>>,
}

impl McpHandlers {
    pub fn new(planner: Arc<Mutex<Planner>>) -> Self {
        Self { planner }
    }

    pub async fn create_plan(&self, Parameters(params): Parameters<CreatePlan>) -> McpResult {
        debug!("create_plan: {params:?}");

        let plan = self
            .planner
            .lock()
            .await
            .create_plan(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to create plan", &e))?;

        text(CreateResult::new(plan).to_string())
    }

    pub async fn list_plans(&self, Parameters(params): Parameters<ListPlans>) -> McpResult {
        debug!("list_plans: {params:?}");

        let inner = params.as_ref();
        let summaries = self
            .planner
            .lock()
            .await
            .list_plans_summary(inner)
            .await
            .map_err(|e| to_mcp_error("Failed to list plans", &e))?;

        let title = match (&inner.status, inner.all) {
            (Some(status), _) => format!("Plans ({status})"),
            (None, true) => "All Plans".to_string(),
            (None, false) => "Active Plans".to_string(),
        };
        text(format!("# {title}\n\n{summaries}"))
    }

    pub async fn show_plan(&self, Parameters(params): Parameters<Id>) -> McpResult {
        debug!("show_plan: {params:?}");

        let plan = self
            .planner
            .lock()
            .await
            .show_plan(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to get plan", &e))?
            .ok_or_else(|| not_found("Plan", params.as_ref().id))?;

        text(plan.to_string())
    }

    pub async fn update_plan_status(
        &self,
        Parameters(params): Parameters<UpdatePlanStatus>,
    ) -> McpResult {
        debug!("update_plan_status: {params:?}");

        let plan = self
            .planner
            .lock()
            .await
            .update_plan_status(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to update plan status", &e))?
            .ok_or_else(|| not_found("Plan", params.as_ref().id))?;

        let change = format!("Status set to {}", plan.status);
        text(UpdateResult::with_changes(plan, vec![change]).to_string())
    }

    pub async fn delete_plan(&self, Parameters(params): Parameters<DeletePlan>) -> McpResult {
        debug!("delete_plan: {params:?}");

        let plan = self
            .planner
            .lock()
            .await
            .delete_plan(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to delete plan", &e))?
            .ok_or_else(|| not_found("Plan", params.as_ref().id))?;

        text(DeleteResult::new(plan).to_string())
    }

    pub async fn add_resource(&self, Parameters(params): Parameters<AddResource>) -> McpResult {
        debug!("add_resource: {params:?}");

        let resource = self
            .planner
            .lock()
            .await
            .add_resource(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to add resource", &e))?;

        text(CreateResult::new(resource).to_string())
    }

    pub async fn plan_progress(&self, Parameters(params): Parameters<ShowProgress>) -> McpResult {
        debug!("plan_progress: {params:?}");

        let progress = self
            .planner
            .lock()
            .await
            .plan_progress(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to compute progress", &e))?;

        text(progress.to_string())
    }

    pub async fn add_task(&self, Parameters(params): Parameters<CreateTask>) -> McpResult {
        debug!("add_task: {params:?}");

        let task = self
            .planner
            .lock()
            .await
            .add_task(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to add task", &e))?;

        text(CreateResult::new(task).to_string())
    }

    pub async fn update_task(&self, Parameters(params): Parameters<UpdateTask>) -> McpResult {
        debug!("update_task: {params:?}");

        let task = self
            .planner
            .lock()
            .await
            .update_task_validated(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to update task", &e))?;

        text(UpdateResult::new(task).to_string())
    }

    pub async fn show_task(&self, Parameters(params): Parameters<Id>) -> McpResult {
        debug!("show_task: {params:?}");

        let task = self
            .planner
            .lock()
            .await
            .get_task(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to get task", &e))?
            .ok_or_else(|| not_found("Task", params.as_ref().id))?;

        text(task.to_string())
    }

    /// Applies a move through the optimistic board. A store rejection is
    /// reported as a tool error carrying the rollback notice.
    pub async fn move_task(&self, Parameters(params): Parameters<MoveTask>) -> McpResult {
        debug!("move_task: {params:?}");

        let planner = self.planner.lock().await;
        let (settlement, tasks) = planner
            .move_task(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to move task", &e))?;

        let status = OperationStatus::from_settlement(&settlement, "Move");
        if let Settlement::RolledBack(_) = settlement {
            return Ok(CallToolResult::error(vec![Content::text(
                status.to_string(),
            )]));
        }

        let today = waypoint_core::ordering::schedule::today();
        let agenda = Agenda {
            tasks: &tasks,
            context: &tasks,
            today,
        };
        text(format!("{status}\n{agenda}"))
    }

    pub async fn reorder_tasks(&self, Parameters(params): Parameters<ReorderTasks>) -> McpResult {
        debug!("reorder_tasks: {params:?}");

        let orders = &params.as_ref().orders;
        self.planner
            .lock()
            .await
            .reorder_tasks(orders)
            .await
            .map_err(|e| to_mcp_error("Failed to reorder tasks", &e))?;

        text(OperationStatus::success(format!("Reordered {} tasks", orders.len())).to_string())
    }

    pub async fn delete_task(&self, Parameters(params): Parameters<Id>) -> McpResult {
        debug!("delete_task: {params:?}");

        let task = self
            .planner
            .lock()
            .await
            .remove_task(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to delete task", &e))?
            .ok_or_else(|| not_found("Task", params.as_ref().id))?;

        text(DeleteResult::new(task).to_string())
    }

    pub async fn sorted_tasks(&self, Parameters(params): Parameters<SortTasks>) -> McpResult {
        debug!("sorted_tasks: {params:?}");

        let planner = self.planner.lock().await;
        let context = planner
            .fetch_tasks(params.as_ref().plan_id)
            .await
            .map_err(|e| to_mcp_error("Failed to load tasks", &e))?;
        let sorted = planner
            .sorted_tasks(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to sort tasks", &e))?;

        let agenda = Agenda {
            tasks: &sorted.0,
            context: &context,
            today: waypoint_core::ordering::schedule::today(),
        };
        text(agenda.to_string())
    }

    pub async fn ready_tasks(&self, Parameters(params): Parameters<Id>) -> McpResult {
        debug!("ready_tasks: {params:?}");

        let planner = self.planner.lock().await;
        let context = planner
            .fetch_tasks(params.as_ref().id)
            .await
            .map_err(|e| to_mcp_error("Failed to load tasks", &e))?;
        let ready = planner
            .ready_tasks(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to find ready tasks", &e))?;

        let agenda = Agenda {
            tasks: &ready.0,
            context: &context,
            today: waypoint_core::ordering::schedule::today(),
        };
        text(agenda.to_string())
    }

    pub async fn set_task_intelligence(
        &self,
        Parameters(params): Parameters<SetTaskIntelligence>,
    ) -> McpResult {
        debug!("set_task_intelligence: {params:?}");

        let task = self
            .planner
            .lock()
            .await
            .set_task_intelligence(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to set task estimates", &e))?;

        text(UpdateResult::new(task).to_string())
    }
}
