//! Tempo CLI Application
//!
//! Command-line interface and MCP server for the Tempo session planner.

mod args;
mod cli;
mod mcp;
mod renderer;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use log::info;
use mcp::{run_stdio_server, TempoMcpServer};
use renderer::TerminalRenderer;
use tempo_core::{
    parse_now, Config, JsonGoalStore, PlanInput, PlanRequest, PlannerBuilder, PlannerPreferences,
};

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();

    let mut config = Config::load(args.config.as_deref()).context("Failed to load configuration")?;
    if let Some(command) = args.backend_command() {
        config.backend.command = command;
    }
    if let Some(path) = &args.goals_file {
        config.goals_file = Some(path.clone());
    }

    let request = args.plan_request();
    let preferences = request
        .apply(config.preferences.clone())
        .context("Invalid planning preferences")?;

    let planner = PlannerBuilder::new()
        .with_config(&config)
        .build()
        .context("Failed to initialize planner")?;
    let store = JsonGoalStore::new(config.goals_path().context("Failed to locate goals file")?);

    info!("Tempo started with backend '{}'", planner.backend_name());

    let renderer = TerminalRenderer::new(!args.no_color);
    match args.command.unwrap_or(Commands::Plan { stream: false }) {
        Commands::Serve => {
            info!("Starting Tempo MCP server");
            run_stdio_server(TempoMcpServer::new(planner, store, preferences))
                .await
                .context("MCP server failed")
        }
        Commands::Plan { stream } => {
            let input = load_input(&store, &request, preferences)?;
            Cli::new(planner, renderer).plan(&input, stream).await
        }
        Commands::Eligible => {
            let input = load_input(&store, &request, preferences)?;
            Cli::new(planner, renderer).eligible(&input)
        }
        Commands::Score { goal_id } => {
            let input = load_input(&store, &request, preferences)?;
            Cli::new(planner, renderer).score(&input, &goal_id)
        }
        Commands::Next => {
            let input = load_input(&store, &request, preferences)?;
            Cli::new(planner, renderer).next(&input)
        }
        Commands::Prompt => {
            let input = load_input(&store, &request, preferences)?;
            Cli::new(planner, renderer).prompt(&input)
        }
    }
}

/// Reads goals and today's sessions for the requested moment.
fn load_input(
    store: &JsonGoalStore,
    request: &PlanRequest,
    preferences: PlannerPreferences,
) -> Result<PlanInput> {
    let now = parse_now(request.now.as_deref()).context("Invalid --now value")?;
    PlanInput::from_store(store, now, preferences)
        .with_context(|| format!("Failed to read goals from {}", store.path().display()))
}
