//! Command-line argument definitions using clap.
//!
//! Global flags override the configuration file; they are folded into the
//! core [`PlanRequest`] before any planning happens.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tempo_core::PlanRequest;

/// Plan focused sessions across your weekly goals
///
/// Tempo reads your goals and today's progress, picks the goals that need
/// time now, and lays out a plan for the rest of the day. Small days are
/// planned locally; larger ones go to the configured generation command.
#[derive(Parser)]
#[command(version, about, name = "tempo")]
pub struct Args {
    /// Configuration file. Defaults to $XDG_CONFIG_HOME/tempo/config.json
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Goals file. Defaults to $XDG_DATA_HOME/tempo/goals.json
    #[arg(long, global = true)]
    pub goals_file: Option<PathBuf>,

    /// Local date and time to plan for, e.g. 2026-10-19T09:30. Defaults to now
    #[arg(long, global = true)]
    pub now: Option<String>,

    /// Generation command and its arguments, separated by spaces
    #[arg(long, global = true)]
    pub backend_command: Option<String>,

    /// Maximum number of sessions in a plan
    #[arg(long, global = true)]
    pub max_sessions: Option<usize>,

    /// Focus mode: deepWork, balanced or flexible
    #[arg(long, global = true)]
    pub focus_mode: Option<String>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Args {
    /// Planning overrides given on the command line.
    pub fn plan_request(&self) -> PlanRequest {
        PlanRequest {
            now: self.now.clone(),
            max_sessions: self.max_sessions,
            focus_mode: self.focus_mode.clone(),
        }
    }

    /// The backend command split into program and arguments.
    pub fn backend_command(&self) -> Option<Vec<String>> {
        self.backend_command
            .as_deref()
            .map(|command| command.split_whitespace().map(String::from).collect())
    }
}

/// Available commands; `plan` runs when none is given.
#[derive(Subcommand)]
pub enum Commands {
    /// Generate today's plan
    #[command(alias = "p")]
    Plan {
        /// Show sessions as the backend produces them
        #[arg(long)]
        stream: bool,
    },
    /// List the goals that need time right now, most urgent first
    #[command(alias = "e")]
    Eligible,
    /// Show how recommended a goal is right now
    Score {
        /// Goal identity
        goal_id: String,
    },
    /// Show the single best goal to work on now
    #[command(alias = "n")]
    Next,
    /// Print the request that would be sent to the generation command
    Prompt,
    /// Start the MCP server
    Serve,
}
