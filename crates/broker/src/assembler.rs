//! Context assembly for a chat turn.
//!
//! Assembly never aborts: unknown resources are omitted with a warning,
//! failing tool calls are recorded as failure outcomes, and a prompt
//! that cannot render falls back to the raw message with a warning.
//! Resource warnings come first, then at most one prompt warning.

use std::sync::Arc;

use capstan_core::chat::{AssembledContext, ChatRequest, ContextWarning, ResourceSection};
use capstan_registry::{CapabilityRegistry, PromptRenderer, ToolInvoker};
use tracing::{debug, warn};

/// Assembles the per-turn context from a shared registry.
#[derive(Clone)]
pub struct ContextAssembler {
    registry: Arc<CapabilityRegistry>,
    invoker: ToolInvoker,
    renderer: PromptRenderer,
}

impl ContextAssembler {
    pub fn new(registry: Arc<CapabilityRegistry>) -> Self {
        let invoker = ToolInvoker::new(registry.clone());
        let renderer = PromptRenderer::new(registry.clone());
        Self {
            registry,
            invoker,
            renderer,
        }
    }

    /// Resolve resources, run tool calls, and render the optional prompt.
    ///
    /// Request order is preserved throughout: resources appear in the
    /// order requested, tool results in the order called.
    pub async fn assemble(&self, request: &ChatRequest) -> (AssembledContext, Vec<ContextWarning>) {
        let mut warnings = Vec::new();

        let mut resources = Vec::with_capacity(request.context_resources.len());
        for id in &request.context_resources {
            match self.registry.resource(id) {
                Some(resource) => resources.push(ResourceSection {
                    id: resource.id.clone(),
                    title: resource.title.clone(),
                    content: resource.content_text(),
                }),
                None => {
                    warn!(id = %id, "Requested resource not registered; omitting");
                    warnings.push(ContextWarning::UnknownResource { id: id.clone() });
                }
            }
        }

        let mut tool_results = Vec::with_capacity(request.tool_calls.len());
        for call in &request.tool_calls {
            let result = self.invoker.record(&call.tool_name, &call.arguments).await;
            if !result.is_success() {
                debug!(tool = %call.tool_name, "Tool call recorded as failure");
            }
            tool_results.push(result);
        }

        let rendered_prompt = match &request.prompt_name {
            Some(name) => match self.renderer.render(name, &request.prompt_inputs) {
                Ok(text) => Some(text),
                Err(e) => {
                    warn!(prompt = %name, error = %e, "Prompt render failed; using raw message");
                    warnings.push(ContextWarning::PromptFallback {
                        prompt: name.clone(),
                        reason: e.to_string(),
                    });
                    None
                }
            },
            None => None,
        };

        let context = AssembledContext {
            resources,
            tool_results,
            rendered_prompt,
            message: request.message.clone(),
        };

        (context, warnings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use capstan_core::chat::{Outcome, ToolCallRequest};
    use capstan_registry::demo_registry;

    fn assembler() -> ContextAssembler {
        ContextAssembler::new(Arc::new(demo_registry()))
    }

    fn request(json: serde_json::Value) -> ChatRequest {
        serde_json::from_value(json).unwrap()
    }

    #[tokio::test]
    async fn resolves_resources_in_request_order() {
        let req = request(serde_json::json!({
            "message": "hi",
            "context_resources": ["product:faq", "company:outline"],
        }));
        let (ctx, warnings) = assembler().assemble(&req).await;

        assert!(warnings.is_empty());
        assert_eq!(ctx.resources.len(), 2);
        assert_eq!(ctx.resources[0].id, "product:faq");
        assert_eq!(ctx.resources[1].id, "company:outline");
        assert!(ctx.resources[0].content.contains("99.9%"));
    }

    #[tokio::test]
    async fn unknown_resource_warns_and_continues() {
        let req = request(serde_json::json!({
            "message": "hi",
            "context_resources": ["company:outline", "rX"],
        }));
        let (ctx, warnings) = assembler().assemble(&req).await;

        assert_eq!(ctx.resources.len(), 1);
        assert_eq!(warnings.len(), 1);
        assert!(matches!(
            &warnings[0],
            ContextWarning::UnknownResource { id } if id == "rX"
        ));
    }

    #[tokio::test]
    async fn tool_failures_do_not_abort_later_calls() {
        let req = ChatRequest {
            message: "hi".into(),
            context_resources: vec![],
            tool_calls: vec![
                ToolCallRequest {
                    tool_name: "math.add".into(),
                    arguments: serde_json::json!({"a": "oops", "b": 2})
                        .as_object()
                        .unwrap()
                        .clone(),
                },
                ToolCallRequest {
                    tool_name: "math.add".into(),
                    arguments: serde_json::json!({"a": 2, "b": 3})
                        .as_object()
                        .unwrap()
                        .clone(),
                },
            ],
            prompt_name: None,
            prompt_inputs: serde_json::Map::new(),
        };
        let (ctx, warnings) = assembler().assemble(&req).await;

        assert!(warnings.is_empty());
        assert_eq!(ctx.tool_results.len(), 2);
        assert!(!ctx.tool_results[0].is_success());
        assert!(ctx.tool_results[1].is_success());
        match &ctx.tool_results[1].outcome {
            Outcome::Success { value } => assert_eq!(value, &serde_json::json!(5.0)),
            other => panic!("Expected success, got: {other:?}"),
        }
    }

    #[tokio::test]
    async fn prompt_renders_into_context() {
        let req = request(serde_json::json!({
            "message": "hi",
            "prompt_name": "support-reply",
            "prompt_inputs": {"customer_message": "It broke", "context": "FAQ says restart"},
        }));
        let (ctx, warnings) = assembler().assemble(&req).await;

        assert!(warnings.is_empty());
        let rendered = ctx.rendered_prompt.as_deref().unwrap();
        assert!(rendered.contains("It broke"));
        assert!(rendered.contains("FAQ says restart"));
    }

    #[tokio::test]
    async fn prompt_failure_falls_back_with_warning() {
        let req = request(serde_json::json!({
            "message": "hi",
            "prompt_name": "support-reply",
            "prompt_inputs": {"customer_message": "It broke"},
        }));
        let (ctx, warnings) = assembler().assemble(&req).await;

        assert!(ctx.rendered_prompt.is_none());
        assert_eq!(warnings.len(), 1);
        match &warnings[0] {
            ContextWarning::PromptFallback { prompt, reason } => {
                assert_eq!(prompt, "support-reply");
                assert!(reason.contains("context"));
            }
            other => panic!("Expected PromptFallback, got: {other:?}"),
        }
    }

    #[tokio::test]
    async fn resource_warnings_precede_prompt_warning() {
        let req = request(serde_json::json!({
            "message": "hi",
            "context_resources": ["rX"],
            "prompt_name": "nonexistent",
        }));
        let (_, warnings) = assembler().assemble(&req).await;

        assert_eq!(warnings.len(), 2);
        assert!(matches!(warnings[0], ContextWarning::UnknownResource { .. }));
        assert!(matches!(warnings[1], ContextWarning::PromptFallback { .. }));
    }
}
