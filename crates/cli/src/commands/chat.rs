//! `capstan chat` — Run a single chat turn from the terminal.

use std::sync::Arc;

use anyhow::Context;
use capstan_broker::ChatOrchestrator;
use capstan_config::AppConfig;
use capstan_core::chat::{ChatRequest, Outcome, ToolCallRequest};
use capstan_registry::demo_registry;

pub async fn run(
    message: String,
    resources: Vec<String>,
    tools: Vec<String>,
    offline: bool,
) -> anyhow::Result<()> {
    let mut config = AppConfig::load().context("Failed to load config")?;
    if offline {
        config.force_offline = true;
    }

    let registry = Arc::new(demo_registry());
    let backend = capstan_providers::build_from_config(&config);
    let orchestrator = ChatOrchestrator::new(registry, backend);

    let request = ChatRequest {
        message,
        context_resources: resources,
        tool_calls: tools
            .into_iter()
            .map(|tool_name| ToolCallRequest {
                tool_name,
                arguments: serde_json::Map::new(),
            })
            .collect(),
        prompt_name: None,
        prompt_inputs: serde_json::Map::new(),
    };

    let response = orchestrator
        .chat(&request)
        .await
        .context("Chat turn failed")?;

    for warning in &response.warnings {
        eprintln!("  [warning] {warning}");
    }
    for result in &response.tool_results {
        match &result.outcome {
            Outcome::Success { value } => {
                println!("  [{}] {}", result.tool_name, value);
            }
            Outcome::Failure { reason } => {
                eprintln!("  [{} failed] {}", result.tool_name, reason);
            }
        }
    }

    println!();
    println!("{}", response.reply);
    println!();
    println!(
        "  ({}{})",
        response.used_provider,
        if response.offline { ", offline" } else { "" }
    );

    Ok(())
}
