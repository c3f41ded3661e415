//! Capstan CLI — the main entry point.
//!
//! Commands:
//! - `serve`        — Start the HTTP gateway
//! - `chat`         — Run a single chat turn from the terminal
//! - `capabilities` — List registered resources, tools, and prompts
//! - `doctor`       — Diagnose configuration and backend selection

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "capstan",
    about = "Capstan — MCP-style chat broker",
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
    /// Start the HTTP gateway server
    Serve {
        /// Override the port
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Run a single chat turn
    Chat {
        /// The message to send
        message: String,

        /// Resource ids to attach as context (repeatable)
        #[arg(short, long = "resource")]
        resources: Vec<String>,

        /// Tools to call with empty arguments (repeatable)
        #[arg(short, long = "tool")]
        tools: Vec<String>,

        /// Force the deterministic offline backend
        #[arg(long)]
        offline: bool,
    },

    /// List registered resources, tools, and prompts
    Capabilities,

    /// Diagnose configuration and backend selection
    Doctor,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    match cli.command {
        Commands::Serve { port } => commands::serve::run(port).await?,
        Commands::Chat {
            message,
            resources,
            tools,
            offline,
        } => commands::chat::run(message, resources, tools, offline).await?,
        Commands::Capabilities => commands::capabilities::run()?,
        Commands::Doctor => commands::doctor::run()?,
    }

    Ok(())
}
