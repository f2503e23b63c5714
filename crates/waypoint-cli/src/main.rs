//! Waypoint command-line application.
//!
//! Manages plans and their ordered tasks from the terminal, or serves the
//! same operations over MCP with `wp serve`.

mod args;
mod cli;
mod mcp;
mod renderer;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use log::info;
use mcp::{run_stdio_server, WaypointMcpServer};
use renderer::TerminalRenderer;
use waypoint_core::{params::ListPlans, PlannerBuilder};
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        database_file,
        user,
        today,
        no_color,
        command,
    } = Args::parse();

    let planner = PlannerBuilder::new()
        .with_database_path(database_file)
        .with_user_id(user)
        .build()
        .await
        .context("Failed to initialize planner")?;

    let renderer = TerminalRenderer::new(!no_color);

    info!("Waypoint started");

    match command {
        Some(Plan { command }) => {
            Cli::new(planner, renderer, today)
                .handle_plan_command(command)
                .await
        }
        Some(Task { command }) => {
            Cli::new(planner, renderer, today)
                .handle_task_command(command)
                .await
        }
        Some(Serve) => {
            info!("Starting Waypoint MCP server");
            run_stdio_server(WaypointMcpServer::new(planner))
                .await
                .context("MCP server failed")
        }
        None => {
            Cli::new(planner, renderer, today)
                .list_plans(&ListPlans::default())
                .await
        }
    }
}
