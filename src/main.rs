//! Taskboard MCP Server - Main Entry Point
//!
//! Parses the command line, sets up logging on stderr (stdout carries the
//! MCP protocol) and serves the handler over stdio.

use anyhow::Result;
use clap::{CommandFactory, Parser};
use mcp_attr::server::serve_stdio;
use std::path::PathBuf;
use taskboard_mcp::schedule::{DEFAULT_UPCOMING_DAYS, DEFAULT_UPCOMING_LIMIT, UpcomingWindow};
use taskboard_mcp::{PlannerConfig, TaskboardHandler};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Taskboard MCP Server - categories, projects and tasks via Model Context Protocol
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the taskboard data file (TOML)
    file: PathBuf,

    /// Initial-data JSON applied to empty collections on startup
    #[arg(long)]
    seed: Option<PathBuf>,

    /// Do not schedule task reminders
    #[arg(long)]
    no_notifications: bool,

    /// Days ahead counted as "upcoming" on the dashboard
    #[arg(long, default_value_t = DEFAULT_UPCOMING_DAYS)]
    upcoming_days: u64,

    /// Maximum number of upcoming tasks on the dashboard
    #[arg(long, default_value_t = DEFAULT_UPCOMING_LIMIT)]
    upcoming_limit: usize,
}

impl Args {
    fn into_config(self) -> PlannerConfig {
        PlannerConfig {
            data_file: Some(self.file),
            seed_file: self.seed,
            notifications: !self.no_notifications,
            upcoming: UpcomingWindow {
                days: self.upcoming_days,
                limit: self.upcoming_limit,
            },
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Check if no arguments were provided (except the program name)
    if std::env::args().len() == 1 {
        let mut cmd = Args::command();
        cmd.print_help().ok();
        println!();
        std::process::exit(2);
    }

    let args = Args::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "taskboard_mcp=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let handler = TaskboardHandler::new(args.into_config())?;
    serve_stdio(handler).await?;
    Ok(())
}
