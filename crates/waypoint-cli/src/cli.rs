//! Command handlers for the terminal interface.

use anyhow::{anyhow, bail, Context, Result};
use jiff::civil::Date;
use log::debug;
use waypoint_core::{
    display::{Agenda, CreateResult, DeleteResult, OperationStatus, UpdateResult},
    ordering::schedule,
    params::*,
    Planner, Settlement, Task, TaskStore,
};

use crate::{
    args::{PlanCommands, TaskCommands},
    renderer::TerminalRenderer,
};

pub struct Cli {
    planner: Planner,
    renderer: TerminalRenderer,
    today: Option<String>,
}

impl Cli {
    pub fn new(planner: Planner, renderer: TerminalRenderer, today: Option<String>) -> Self {
        Self {
            planner,
            renderer,
            today,
        }
    }

    fn today(&self) -> Result<Date> {
        match self.today.as_deref() {
            Some(s) => s
                .parse()
                .with_context(|| format!("Invalid --today date '{s}', expected YYYY-MM-DD")),
            None => Ok(schedule::today()),
        }
    }

    pub async fn handle_plan_command(&self, command: PlanCommands) -> Result<()> {
        match command {
            PlanCommands::Create(args) => {
                let plan = self.planner.create_plan(&args.into()).await?;
                self.renderer.render(&CreateResult::new(plan).to_string());
            }
            PlanCommands::List(args) => self.list_plans(&args.into()).await?,
            PlanCommands::Show(args) => {
                let params: Id = args.into();
                let plan = self
                    .planner
                    .show_plan(&params)
                    .await?
                    .ok_or_else(|| anyhow!("Plan with ID {} not found", params.id))?;
                self.renderer.render(&plan.to_string());
            }
            PlanCommands::Status(args) => {
                let params: UpdatePlanStatus = args.into();
                let plan = self
                    .planner
                    .update_plan_status(&params)
                    .await?
                    .ok_or_else(|| anyhow!("Plan with ID {} not found", params.id))?;
                let change = format!("Status set to {}", plan.status);
                self.renderer
                    .render(&UpdateResult::with_changes(plan, vec![change]).to_string());
            }
            PlanCommands::Delete(args) => {
                let params: DeletePlan = args.into();
                if !params.confirmed {
                    bail!(
                        "Deleting plan {} removes all of its tasks. Re-run with --confirm",
                        params.id
                    );
                }
                let plan = self
                    .planner
                    .delete_plan(&params)
                    .await?
                    .ok_or_else(|| anyhow!("Plan with ID {} not found", params.id))?;
                self.renderer.render(&DeleteResult::new(plan).to_string());
            }
            PlanCommands::Stats => {
                let stats = self.planner.plan_stats().await?;
                self.renderer.render(&stats.to_string());
            }
            PlanCommands::Progress(args) => {
                let params = ShowProgress {
                    plan_id: args.id,
                    today: Some(self.today()?.to_string()),
                };
                let progress = self.planner.plan_progress(&params).await?;
                self.renderer.render(&progress.to_string());
            }
            PlanCommands::Link(args) => {
                let resource = self.planner.add_resource(&args.into()).await?;
                self.renderer.render(&CreateResult::new(resource).to_string());
            }
        }
        Ok(())
    }

    pub async fn handle_task_command(&self, command: TaskCommands) -> Result<()> {
        match command {
            TaskCommands::Add(args) => {
                let task = self.planner.add_task(&args.into()).await?;
                self.renderer.render(&CreateResult::new(task).to_string());
            }
            TaskCommands::Update(args) => {
                let task = self.planner.update_task_validated(&args.into()).await?;
                self.renderer.render(&UpdateResult::new(task).to_string());
            }
            TaskCommands::Show(args) => {
                let params: Id = args.into();
                let task = self
                    .planner
                    .get_task(&params)
                    .await?
                    .ok_or_else(|| anyhow!("Task with ID {} not found", params.id))?;
                self.renderer.render(&task.to_string());
            }
            TaskCommands::Delete(args) => {
                let params: Id = args.into();
                let task = self
                    .planner
                    .remove_task(&params)
                    .await?
                    .ok_or_else(|| anyhow!("Task with ID {} not found", params.id))?;
                self.renderer.render(&DeleteResult::new(task).to_string());
            }
            TaskCommands::Move(args) => {
                let params: MoveTask = args.into();
                let (settlement, tasks) = self.planner.move_task(&params).await?;
                debug!("Move in plan {} settled as {settlement:?}", params.plan_id);
                if let Settlement::RolledBack(notice) = &settlement {
                    bail!("{notice}");
                }
                let today = self.today()?;
                let status = OperationStatus::from_settlement(&settlement, "Move");
                self.renderer.render(&format!(
                    "{status}\n{}",
                    Agenda {
                        tasks: &tasks,
                        context: &tasks,
                        today,
                    }
                ));
            }
            TaskCommands::Reorder(args) => {
                let params: ReorderTasks = args.into();
                self.planner.reorder_tasks(&params.orders).await?;
                let status =
                    OperationStatus::success(format!("Reordered {} tasks", params.orders.len()));
                self.renderer.render(&status.to_string());
            }
            TaskCommands::Sorted(args) => {
                let params: SortTasks = args.into();
                let context = self.planner.fetch_tasks(params.plan_id).await?;
                let sorted = self.planner.sorted_tasks(&params).await?;
                self.render_agenda(&sorted.0, &context)?;
            }
            TaskCommands::Ready(args) => {
                let params: Id = args.into();
                let context = self.planner.fetch_tasks(params.id).await?;
                let ready = self.planner.ready_tasks(&params).await?;
                self.render_agenda(&ready.0, &context)?;
            }
            TaskCommands::Estimate(args) => {
                let task = self.planner.set_task_intelligence(&args.into()).await?;
                self.renderer.render(&UpdateResult::new(task).to_string());
            }
        }
        Ok(())
    }

    pub async fn list_plans(&self, params: &ListPlans) -> Result<()> {
        let summaries = self.planner.list_plans_summary(params).await?;
        let title = match (&params.status, params.all) {
            (Some(status), _) => format!("Plans ({status})"),
            (None, true) => "All Plans".to_string(),
            (None, false) => "Active Plans".to_string(),
        };
        self.renderer.render(&format!("# {title}\n\n{summaries}"));
        Ok(())
    }

    fn render_agenda(&self, tasks: &[Task], context: &[Task]) -> Result<()> {
        let agenda = Agenda {
            tasks,
            context,
            today: self.today()?,
        };
        self.renderer.render(&agenda.to_string());
        Ok(())
    }
}
