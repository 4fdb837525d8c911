//! mathtutor CLI — the main entry point.
//!
//! Commands:
//! - `onboard` — Initialize config
//! - `run`     — Start the Slack bot
//! - `ask`     — Ask the agent a single question from the terminal
//! - `tool`    — Run one math tool directly
//! - `doctor`  — Diagnose configuration

use clap::{Parser, Subcommand};
use mathtutor_config::AppConfig;

mod commands;

#[derive(Parser)]
#[command(
    name = "mathtutor",
    about = "mathtutor — a math tutoring Slack bot",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize configuration
    Onboard,

    /// Start the Slack bot
    Run,

    /// Ask the agent a single question
    Ask {
        /// The question text
        message: String,
    },

    /// Run one math tool directly
    Tool {
        /// Tool name (e.g. solve_equation)
        name: String,

        /// Tool arguments as JSON
        #[arg(default_value = "{}")]
        args: String,
    },

    /// Diagnose configuration
    Doctor,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose {
        "debug".to_string()
    } else {
        AppConfig::load()
            .map(|config| config.log_level)
            .unwrap_or_else(|_| "info".to_string())
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    match cli.command {
        Commands::Onboard => commands::onboard::run().await?,
        Commands::Run => commands::run::run().await?,
        Commands::Ask { message } => commands::ask::run(&message).await?,
        Commands::Tool { name, args } => commands::tool::run(&name, &args).await?,
        Commands::Doctor => commands::doctor::run().await?,
    }

    Ok(())
}
