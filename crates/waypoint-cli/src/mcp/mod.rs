//! MCP server for Waypoint.
//!
//! Exposes plans, task ordering and prerequisite queries as tools over the
//! Model Context Protocol so an assistant can manage a plan alongside the
//! terminal interface.

use std::{future::Future, sync::Arc};

use anyhow::Result;
use log::{debug, error, info};
use rmcp::{
    handler::server::{router::tool::ToolRouter, tool::Parameters},
    model::{Implementation, ProtocolVersion, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router, ServerHandler,
};
use tokio::{
    signal::unix::{signal, SignalKind},
    sync::Mutex,
};
use waypoint_core::Planner;

pub mod errors;
pub mod handlers;

use handlers::{
    AddResource, CreatePlan, CreateTask, DeletePlan, Id, ListPlans, McpHandlers, McpResult,
    MoveTask, ReorderTasks, SetTaskIntelligence, ShowProgress, SortTasks, UpdatePlanStatus,
    UpdateTask,
};

#[derive(Clone)]
pub struct WaypointMcpServer {
    planner: Arc<Mutex<Planner>>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl WaypointMcpServer {
    pub fn new(planner: Planner) -> Self {
        Self {
            planner: Arc::new(Mutex::new(planner)),
            tool_router: Self::tool_router(),
        }
    }

    fn handlers(&self) -> McpHandlers {
        McpHandlers::new(self.planner.clone())
    }

    #[tool(
        name = "create_plan",
        description = "Create a plan. Requires a title; optional description and status (draft, active, completed, archived). Returns the new plan ID."
    )]
    async fn create_plan(&self, params: Parameters<CreatePlan>) -> McpResult {
        self.handlers().create_plan(params).await
    }

    #[tool(
        name = "list_plans",
        description = "List plans with task counts, completion and estimate totals. Archived plans are hidden unless all=true or status is given."
    )]
    async fn list_plans(&self, params: Parameters<ListPlans>) -> McpResult {
        self.handlers().list_plans(params).await
    }

    #[tool(
        name = "show_plan",
        description = "Show a plan with its tasks in order and its linked resources."
    )]
    async fn show_plan(&self, params: Parameters<Id>) -> McpResult {
        self.handlers().show_plan(params).await
    }

    #[tool(
        name = "update_plan_status",
        description = "Change a plan's status: draft, active, completed or archived."
    )]
    async fn update_plan_status(&self, params: Parameters<UpdatePlanStatus>) -> McpResult {
        self.handlers().update_plan_status(params).await
    }

    #[tool(
        name = "delete_plan",
        description = "Permanently delete a plan with its tasks and resources. Requires confirmed=true."
    )]
    async fn delete_plan(&self, params: Parameters<DeletePlan>) -> McpResult {
        self.handlers().delete_plan(params).await
    }

    #[tool(
        name = "add_resource",
        description = "Link a resource (link, document, video or other) to a plan by title and URL."
    )]
    async fn add_resource(&self, params: Parameters<AddResource>) -> McpResult {
        self.handlers().add_resource(params).await
    }

    #[tool(
        name = "plan_progress",
        description = "Report completion, ready and blocked counts, overdue and due-soon tasks, and remaining time and cost for a plan. Pass today as YYYY-MM-DD to override the reference date."
    )]
    async fn plan_progress(&self, params: Parameters<ShowProgress>) -> McpResult {
        self.handlers().plan_progress(params).await
    }

    #[tool(
        name = "add_task",
        description = "Add a task to a plan. Appended at the end unless a zero-based position is given; later tasks shift down and prerequisite references follow them."
    )]
    async fn add_task(&self, params: Parameters<CreateTask>) -> McpResult {
        self.handlers().add_task(params).await
    }

    #[tool(
        name = "update_task",
        description = "Update a task's status (pending, in_progress, completed), title, description, due date or order. An empty due date clears it."
    )]
    async fn update_task(&self, params: Parameters<UpdateTask>) -> McpResult {
        self.handlers().update_task(params).await
    }

    #[tool(
        name = "show_task",
        description = "Show one task with its estimates, prerequisites, tools and tags."
    )]
    async fn show_task(&self, params: Parameters<Id>) -> McpResult {
        self.handlers().show_task(params).await
    }

    #[tool(
        name = "move_task",
        description = "Move the task at zero-based position source to position destination within a plan. The move is applied optimistically and reverted if it cannot be saved. Omit destination to cancel."
    )]
    async fn move_task(&self, params: Parameters<MoveTask>) -> McpResult {
        self.handlers().move_task(params).await
    }

    #[tool(
        name = "reorder_tasks",
        description = "Assign explicit orders to tasks of one plan as a list of {task_id, order}. The resulting orders must stay contiguous."
    )]
    async fn reorder_tasks(&self, params: Parameters<ReorderTasks>) -> McpResult {
        self.handlers().reorder_tasks(params).await
    }

    #[tool(
        name = "delete_task",
        description = "Delete a task. Later tasks close the gap and prerequisite references are adjusted."
    )]
    async fn delete_task(&self, params: Parameters<Id>) -> McpResult {
        self.handlers().delete_task(params).await
    }

    #[tool(
        name = "sorted_tasks",
        description = "List a plan's tasks so every task comes after its prerequisites. With strict=true a prerequisite cycle is reported instead of broken."
    )]
    async fn sorted_tasks(&self, params: Parameters<SortTasks>) -> McpResult {
        self.handlers().sorted_tasks(params).await
    }

    #[tool(
        name = "ready_tasks",
        description = "List open tasks of a plan whose prerequisites are all completed."
    )]
    async fn ready_tasks(&self, params: Parameters<Id>) -> McpResult {
        self.handlers().ready_tasks(params).await
    }

    #[tool(
        name = "set_task_intelligence",
        description = "Replace a task's estimates: estimated_time_hours, estimated_cost_usd, difficulty (1-5), prerequisites as task orders (orders no task holds are dropped), tools_needed and tags. Omitted fields are cleared."
    )]
    async fn set_task_intelligence(&self, params: Parameters<SetTaskIntelligence>) -> McpResult {
        self.handlers().set_task_intelligence(params).await
    }
}

#[tool_handler(router = self.tool_router)]
impl ServerHandler for WaypointMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "waypoint".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            instructions: Some(r#"Waypoint keeps ordered task lists for plans.

## Concepts
- **Plans** have a title, description, status and linked resources.
- **Tasks** belong to a plan and hold a zero-based order. Prerequisites point at other tasks by order and are adjusted whenever tasks move.

## Typical flow
1. `create_plan`, then `add_task` for each step.
2. `set_task_intelligence` to record estimates and prerequisites.
3. `sorted_tasks` or `ready_tasks` to decide what to work on next.
4. `move_task` or `reorder_tasks` to rearrange, `update_task` to change status.
5. `plan_progress` for a summary of what is done, blocked or overdue."#.to_string()),
        }
    }
}

/// Serves the MCP protocol on stdin/stdout until the client disconnects or
/// the process receives SIGINT or SIGTERM.
pub async fn run_stdio_server(server: WaypointMcpServer) -> Result<()> {
    use rmcp::{transport::stdio, ServiceExt};

    info!("Starting Waypoint MCP server on stdio");
    debug!(
        "Server created with {} tools",
        server.tool_router.list_all().len()
    );

    let service = server.serve(stdio()).await.inspect_err(|e| {
        error!("serving error: {e:?}");
    })?;

    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;

    tokio::select! {
        result = service.waiting() => {
            match result {
                Ok(_) => info!("MCP server stopped normally"),
                Err(e) => error!("MCP server error: {e:?}"),
            }
        }
        _ = sigint.recv() => {
            info!("Received SIGINT, shutting down");
        }
        _ = sigterm.recv() => {
            info!("Received SIGTERM, shutting down");
        }
    }

    info!("MCP server shutdown complete");
    Ok(())
}
