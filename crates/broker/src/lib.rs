//! Chat orchestration for Capstan.
//!
//! The orchestrator drives one chat turn end to end: assemble the
//! context (resources, tool calls, optional prompt), hand it to the
//! selected model backend, and shape the structured response. Only a
//! backend failure aborts the turn; every other problem degrades into
//! warnings or failure outcomes inside the response.

pub mod assembler;

pub use assembler::ContextAssembler;

use std::sync::Arc;

use capstan_core::backend::ModelBackend;
use capstan_core::chat::{ChatRequest, ChatResponse};
use capstan_core::error::ProviderError;
use capstan_registry::CapabilityRegistry;
use tracing::info;

/// Instruction prefix prepended to every backend call.
const SYSTEM_PREAMBLE: &str = "You are an assistant connected to an MCP demo server. \
                               Use provided context to craft practical answers.";

/// Drives chat turns against a registry and a model backend.
#[derive(Clone)]
pub struct ChatOrchestrator {
    assembler: ContextAssembler,
    backend: Arc<dyn ModelBackend>,
}

impl ChatOrchestrator {
    pub fn new(registry: Arc<CapabilityRegistry>, backend: Arc<dyn ModelBackend>) -> Self {
        Self {
            assembler: ContextAssembler::new(registry),
            backend,
        }
    }

    /// Which backend this orchestrator dispatches to.
    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }

    /// Execute one chat turn.
    ///
    /// `Err` only on backend failure; assembly problems surface as
    /// warnings and failure outcomes in the `Ok` response.
    pub async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse, ProviderError> {
        let (context, warnings) = self.assembler.assemble(request).await;

        let mut context_text = String::from(SYSTEM_PREAMBLE);
        let assembled = context.to_context_text();
        if !assembled.is_empty() {
            context_text.push_str("\n\n");
            context_text.push_str(&assembled);
        }

        let reply = self.backend.generate(&context_text, &request.message).await?;

        info!(
            provider = %self.backend.name(),
            offline = self.backend.is_offline(),
            warnings = warnings.len(),
            tools = context.tool_results.len(),
            "Chat turn completed"
        );

        Ok(ChatResponse {
            reply,
            used_provider: self.backend.name().to_string(),
            offline: self.backend.is_offline(),
            tool_results: context.tool_results.clone(),
            context,
            warnings,
        })
    }
}
