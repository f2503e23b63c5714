//! Command-line arguments.
//!
//! Each command takes a clap-derived argument struct that converts into the
//! matching core parameter type, so clap attributes never leak into
//! `waypoint_core`:
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → Planner
//! ```

use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use waypoint_core::{
    models::{Difficulty, TaskIntelligence},
    params::*,
    TaskOrder,
};

/// Waypoint: ordered task plans with prerequisites and due dates
///
/// Plans hold ordered tasks. Tasks can depend on earlier work, carry due
/// dates and estimates, and can be moved around without breaking those
/// links. Run `wp serve` to expose the same operations over MCP.
#[derive(Parser)]
#[command(version, about, name = "wp")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/waypoint/waypoint.db
    #[arg(long, global = true, env = "WAYPOINT_DATABASE_FILE")]
    pub database_file: Option<PathBuf>,

    /// Owner recorded on new plans and used to scope listings
    #[arg(long, global = true, env = "WAYPOINT_USER", default_value = "local")]
    pub user: String,

    /// Reference date (YYYY-MM-DD) for due-date reports. Defaults to today
    #[arg(long, global = true)]
    pub today: Option<String>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage plans
    #[command(alias = "p")]
    Plan {
        #[command(subcommand)]
        command: PlanCommands,
    },
    /// Manage tasks within plans
    #[command(alias = "t")]
    Task {
        #[command(subcommand)]
        command: TaskCommands,
    },
    /// Start the MCP server on stdio
    Serve,
}

/// Plan lifecycle status accepted on the command line
#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum PlanStatusArg {
    Draft,
    Active,
    Completed,
    Archived,
}

impl PlanStatusArg {
    fn as_param(self) -> String {
        match self {
            PlanStatusArg::Draft => "draft",
            PlanStatusArg::Active => "active",
            PlanStatusArg::Completed => "completed",
            PlanStatusArg::Archived => "archived",
        }
        .to_string()
    }
}

/// Task status accepted on the command line
#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum TaskStatusArg {
    /// Not started
    #[value(alias = "todo")]
    Pending,
    /// Being worked on
    InProgress,
    /// Finished
    #[value(alias = "done")]
    Completed,
}

impl TaskStatusArg {
    fn as_param(self) -> String {
        match self {
            TaskStatusArg::Pending => "pending",
            TaskStatusArg::InProgress => "in_progress",
            TaskStatusArg::Completed => "completed",
        }
        .to_string()
    }
}

// ============================================================================
// Plan commands
// ============================================================================

#[derive(Subcommand)]
pub enum PlanCommands {
    /// Create a new plan
    #[command(alias = "c")]
    Create(CreatePlanArgs),
    /// List plans
    #[command(aliases = ["l", "ls"])]
    List(ListPlansArgs),
    /// Show a plan with its tasks and resources
    #[command(alias = "s")]
    Show(PlanIdArgs),
    /// Change a plan's status
    Status(PlanStatusArgs),
    /// Delete a plan permanently
    #[command(aliases = ["d", "rm"])]
    Delete(DeletePlanArgs),
    /// Count plans per status
    Stats,
    /// Show completion, readiness and due dates of a plan
    #[command(alias = "pr")]
    Progress(PlanIdArgs),
    /// Attach a reference link to a plan
    Link(AddResourceArgs),
}

#[derive(ClapArgs)]
pub struct CreatePlanArgs {
    /// Title of the plan
    pub title: String,
    /// Optional description providing more context about the plan
    #[arg(short, long)]
    pub description: Option<String>,
    /// Initial status
    #[arg(short, long, value_enum)]
    pub status: Option<PlanStatusArg>,
}

impl From<CreatePlanArgs> for CreatePlan {
    fn from(val: CreatePlanArgs) -> Self {
        CreatePlan {
            title: val.title,
            description: val.description,
            status: val.status.map(PlanStatusArg::as_param),
        }
    }
}

#[derive(ClapArgs)]
pub struct ListPlansArgs {
    /// Only plans with this status
    #[arg(short, long, value_enum)]
    pub status: Option<PlanStatusArg>,
    /// Include archived plans
    #[arg(short, long)]
    pub all: bool,
}

impl From<ListPlansArgs> for ListPlans {
    fn from(val: ListPlansArgs) -> Self {
        ListPlans {
            status: val.status.map(PlanStatusArg::as_param),
            all: val.all,
        }
    }
}

#[derive(ClapArgs)]
pub struct PlanIdArgs {
    /// ID of the plan
    pub id: u64,
}

impl From<PlanIdArgs> for Id {
    fn from(val: PlanIdArgs) -> Self {
        Id { id: val.id }
    }
}

#[derive(ClapArgs)]
pub struct PlanStatusArgs {
    /// ID of the plan
    pub id: u64,
    /// New status
    #[arg(value_enum)]
    pub status: PlanStatusArg,
}

impl From<PlanStatusArgs> for UpdatePlanStatus {
    fn from(val: PlanStatusArgs) -> Self {
        UpdatePlanStatus {
            id: val.id,
            status: val.status.as_param(),
        }
    }
}

#[derive(ClapArgs)]
pub struct DeletePlanArgs {
    /// ID of the plan to delete
    pub id: u64,
    /// Confirm the deletion (required to prevent accidental deletion)
    #[arg(long)]
    pub confirm: bool,
}

impl From<DeletePlanArgs> for DeletePlan {
    fn from(val: DeletePlanArgs) -> Self {
        DeletePlan {
            id: val.id,
            confirmed: val.confirm,
        }
    }
}

#[derive(ClapArgs)]
pub struct AddResourceArgs {
    /// ID of the plan
    pub plan_id: u64,
    /// Title of the link
    pub title: String,
    /// URL of the resource
    pub url: String,
    /// Kind of resource: link, document, video or other
    #[arg(short = 'k', long = "kind")]
    pub resource_type: Option<String>,
}

impl From<AddResourceArgs> for AddResource {
    fn from(val: AddResourceArgs) -> Self {
        AddResource {
            plan_id: val.plan_id,
            title: val.title,
            url: val.url,
            resource_type: val.resource_type,
        }
    }
}

// ============================================================================
// Task commands
// ============================================================================

#[derive(Subcommand)]
pub enum TaskCommands {
    /// Add a task to a plan
    #[command(alias = "a")]
    Add(AddTaskArgs),
    /// Update a task's status or details
    #[command(alias = "u")]
    Update(UpdateTaskArgs),
    /// Show a single task
    #[command(alias = "s")]
    Show(TaskIdArgs),
    /// Delete a task; later tasks move up
    #[command(aliases = ["d", "rm"])]
    Delete(TaskIdArgs),
    /// Move the task at one position to another
    #[command(alias = "mv")]
    Move(MoveTaskArgs),
    /// Apply an explicit batch of new orders
    Reorder(ReorderTasksArgs),
    /// List a plan's tasks with prerequisites first
    Sorted(SortTasksArgs),
    /// List open tasks whose prerequisites are done
    Ready(PlanTasksArgs),
    /// Set a task's estimates, difficulty and prerequisites
    #[command(alias = "est")]
    Estimate(EstimateTaskArgs),
}

#[derive(ClapArgs)]
pub struct AddTaskArgs {
    /// ID of the plan to add the task to
    pub plan_id: u64,
    /// Title of the task
    pub title: String,
    /// Optional details of what needs to be done
    #[arg(short, long)]
    pub description: Option<String>,
    /// Due date as YYYY-MM-DD
    #[arg(long)]
    pub due: Option<String>,
    /// 0-based position to insert at (0 = first). Appends when omitted
    #[arg(short, long)]
    pub position: Option<u32>,
}

impl From<AddTaskArgs> for CreateTask {
    fn from(val: AddTaskArgs) -> Self {
        CreateTask {
            plan_id: val.plan_id,
            title: val.title,
            description: val.description,
            due_date: val.due,
            position: val.position,
        }
    }
}

#[derive(ClapArgs)]
pub struct UpdateTaskArgs {
    /// ID of the task to update
    pub id: u64,
    /// New status
    #[arg(short, long, value_enum)]
    pub status: Option<TaskStatusArg>,
    /// New title
    #[arg(short, long)]
    pub title: Option<String>,
    /// New description; an empty value clears it
    #[arg(short, long)]
    pub description: Option<String>,
    /// New due date as YYYY-MM-DD; an empty value clears it
    #[arg(long)]
    pub due: Option<String>,
    /// Move the task to this 0-based position
    #[arg(short, long)]
    pub order: Option<u32>,
}

impl From<UpdateTaskArgs> for UpdateTask {
    fn from(val: UpdateTaskArgs) -> Self {
        UpdateTask {
            id: val.id,
            status: val.status.map(TaskStatusArg::as_param),
            title: val.title,
            description: val.description,
            due_date: val.due,
            order: val.order,
        }
    }
}

#[derive(ClapArgs)]
pub struct TaskIdArgs {
    /// ID of the task
    pub id: u64,
}

impl From<TaskIdArgs> for Id {
    fn from(val: TaskIdArgs) -> Self {
        Id { id: val.id }
    }
}

#[derive(ClapArgs)]
pub struct MoveTaskArgs {
    /// ID of the plan
    pub plan_id: u64,
    /// Current 0-based position of the task
    pub source: usize,
    /// Target 0-based position
    pub destination: usize,
}

impl From<MoveTaskArgs> for MoveTask {
    fn from(val: MoveTaskArgs) -> Self {
        MoveTask {
            plan_id: val.plan_id,
            source: val.source,
            destination: Some(val.destination),
        }
    }
}

#[derive(ClapArgs)]
pub struct ReorderTasksArgs {
    /// New orders as TASK_ID:ORDER pairs, e.g. `12:0 9:1`
    #[arg(required = true, value_parser = parse_task_order)]
    pub orders: Vec<TaskOrder>,
}

impl From<ReorderTasksArgs> for ReorderTasks {
    fn from(val: ReorderTasksArgs) -> Self {
        ReorderTasks { orders: val.orders }
    }
}

fn parse_task_order(s: &str) -> Result<TaskOrder, String> {
    let (task_id, order) = s
        .split_once(':')
        .ok_or_else(|| format!("expected TASK_ID:ORDER, got '{s}'"))?;
    let task_id = task_id
        .trim()
        .parse()
        .map_err(|e| format!("invalid task ID '{task_id}': {e}"))?;
    let order = order
        .trim()
        .parse()
        .map_err(|e| format!("invalid order '{order}': {e}"))?;
    Ok(TaskOrder::new(task_id, order))
}

#[derive(ClapArgs)]
pub struct SortTasksArgs {
    /// ID of the plan
    pub plan_id: u64,
    /// Fail on prerequisite cycles instead of breaking them
    #[arg(long)]
    pub strict: bool,
}

impl From<SortTasksArgs> for SortTasks {
    fn from(val: SortTasksArgs) -> Self {
        SortTasks {
            plan_id: val.plan_id,
            strict: val.strict,
        }
    }
}

#[derive(ClapArgs)]
pub struct PlanTasksArgs {
    /// ID of the plan
    pub plan_id: u64,
}

impl From<PlanTasksArgs> for Id {
    fn from(val: PlanTasksArgs) -> Self {
        Id { id: val.plan_id }
    }
}

#[derive(ClapArgs)]
pub struct EstimateTaskArgs {
    /// ID of the task
    pub id: u64,
    /// Estimated effort in hours
    #[arg(long)]
    pub hours: Option<f64>,
    /// Estimated cost in US dollars
    #[arg(long)]
    pub cost: Option<f64>,
    /// Difficulty from 1 (very easy) to 5 (very hard)
    #[arg(long, value_parser = parse_difficulty)]
    pub difficulty: Option<Difficulty>,
    /// Tools or materials needed, comma-separated
    #[arg(long, value_delimiter = ',')]
    pub tools: Vec<String>,
    /// Positions of tasks that must be completed first, comma-separated
    #[arg(long, value_delimiter = ',')]
    pub after: Vec<u32>,
    /// Free-form labels, comma-separated
    #[arg(long, value_delimiter = ',')]
    pub tags: Vec<String>,
}

impl From<EstimateTaskArgs> for SetTaskIntelligence {
    fn from(val: EstimateTaskArgs) -> Self {
        SetTaskIntelligence {
            id: val.id,
            intelligence: TaskIntelligence {
                estimated_time_hours: val.hours,
                estimated_cost_usd: val.cost,
                difficulty: val.difficulty,
                tools_needed: val.tools,
                prerequisites: val.after,
                tags: val.tags,
            },
        }
    }
}

fn parse_difficulty(s: &str) -> Result<Difficulty, String> {
    let value: u8 = s.parse().map_err(|e| format!("invalid difficulty '{s}': {e}"))?;
    Difficulty::new(value).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_args_are_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_task_order() {
        assert_eq!(parse_task_order("12:3"), Ok(TaskOrder::new(12, 3)));
        assert!(parse_task_order("12").is_err());
        assert!(parse_task_order("x:1").is_err());
    }

    #[test]
    fn test_status_args_map_to_core_values() {
        let args = Args::parse_from(["wp", "task", "update", "4", "--status", "done"]);
        let Some(Commands::Task {
            command: TaskCommands::Update(update),
        }) = args.command
        else {
            panic!("expected a task update");
        };
        assert_eq!(UpdateTask::from(update).status.as_deref(), Some("completed"));
    }

    #[test]
    fn test_estimate_collects_lists() {
        let args = Args::parse_from([
            "wp", "task", "estimate", "7", "--hours", "1.5", "--difficulty", "2", "--after", "0,2",
        ]);
        let Some(Commands::Task {
            command: TaskCommands::Estimate(estimate),
        }) = args.command
        else {
            panic!("expected a task estimate");
        };
        let params = SetTaskIntelligence::from(estimate);
        assert_eq!(params.intelligence.prerequisites, vec![0, 2]);
        assert_eq!(params.intelligence.estimated_time_hours, Some(1.5));
    }
}
