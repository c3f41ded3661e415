//! Chat turn types — the request a client sends, the per-step results
//! collected while serving it, and the response it gets back.
//!
//! All of these are request-scoped and immutable once built.

use serde::{Deserialize, Serialize};

/// A request to execute a single tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCallRequest {
    pub tool_name: String,

    #[serde(default)]
    pub arguments: serde_json::Map<String, serde_json::Value>,
}

/// The outcome of one tool call — success with a value or failure with a
/// reason. Failures are data, not faults: a failing call never aborts the
/// rest of the request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    Success { value: serde_json::Value },
    Failure { reason: String },
}

/// The recorded result of one tool call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCallResult {
    pub tool_name: String,
    pub outcome: Outcome,
}

impl ToolCallResult {
    pub fn success(tool_name: impl Into<String>, value: serde_json::Value) -> Self {
        Self {
            tool_name: tool_name.into(),
            outcome: Outcome::Success { value },
        }
    }

    pub fn failure(tool_name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            tool_name: tool_name.into(),
            outcome: Outcome::Failure {
                reason: reason.into(),
            },
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self.outcome, Outcome::Success { .. })
    }
}

/// A warning recorded while assembling context. Warnings degrade the
/// context instead of failing the request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ContextWarning {
    /// A requested resource id is not registered; it was omitted.
    UnknownResource { id: String },

    /// Prompt rendering failed; the raw message was used instead.
    PromptFallback { prompt: String, reason: String },
}

impl std::fmt::Display for ContextWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContextWarning::UnknownResource { id } => {
                write!(f, "unknown resource '{id}' omitted from context")
            }
            ContextWarning::PromptFallback { prompt, reason } => {
                write!(f, "prompt '{prompt}' not rendered ({reason}); using raw message")
            }
        }
    }
}

/// One resolved resource, in request order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceSection {
    pub id: String,
    pub title: String,
    pub content: String,
}

/// Everything assembled for a single chat turn: ordered resource contents,
/// ordered tool results, the optional rendered prompt, and the original
/// message. Built once per request, then read-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssembledContext {
    pub resources: Vec<ResourceSection>,
    pub tool_results: Vec<ToolCallResult>,
    pub rendered_prompt: Option<String>,
    pub message: String,
}

impl AssembledContext {
    /// Build the context text handed to the model backend.
    ///
    /// Section order is fixed: rendered prompt, resource snippets, tool
    /// outputs. Failed tool calls are noted inline so the model knows the
    /// output is missing rather than empty.
    pub fn to_context_text(&self) -> String {
        let mut sections: Vec<String> = Vec::new();

        if let Some(prompt) = &self.rendered_prompt {
            sections.push(prompt.clone());
        }

        if !self.resources.is_empty() {
            let block = self
                .resources
                .iter()
                .map(|r| format!("Resource {}:\n{}", r.title, r.content))
                .collect::<Vec<_>>()
                .join("\n\n");
            sections.push(format!("Context snippets:\n{block}"));
        }

        if !self.tool_results.is_empty() {
            let block = self
                .tool_results
                .iter()
                .map(|r| match &r.outcome {
                    Outcome::Success { value } => value_text(value),
                    Outcome::Failure { reason } => {
                        format!("(tool {} failed: {})", r.tool_name, reason)
                    }
                })
                .collect::<Vec<_>>()
                .join("\n");
            sections.push(format!("Tool outputs:\n{block}"));
        }

        sections.join("\n\n")
    }
}

fn value_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// A single chat turn request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    /// The user's message.
    pub message: String,

    /// Resource ids to resolve into context, in order.
    #[serde(default)]
    pub context_resources: Vec<String>,

    /// Tool calls to execute, in order.
    #[serde(default)]
    pub tool_calls: Vec<ToolCallRequest>,

    /// Optional prompt template to render as the leading context section.
    #[serde(default)]
    pub prompt_name: Option<String>,

    /// Inputs for the prompt template.
    #[serde(default)]
    pub prompt_inputs: serde_json::Map<String, serde_json::Value>,
}

/// The structured result of a chat turn. Always carries enough detail to
/// tell which parts of the request succeeded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    /// The model's reply text.
    pub reply: String,

    /// Which backend answered (e.g. "openai", "gemini", "offline").
    pub used_provider: String,

    /// Whether the reply is synthetic (offline backend).
    pub offline: bool,

    /// The assembled context, returned for transparency.
    pub context: AssembledContext,

    /// Per-call tool outcomes, in request order.
    pub tool_results: Vec<ToolCallResult>,

    /// Warnings recorded during assembly.
    pub warnings: Vec<ContextWarning>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chat_request_defaults() {
        let req: ChatRequest = serde_json::from_str(r#"{"message": "hi"}"#).unwrap();
        assert_eq!(req.message, "hi");
        assert!(req.context_resources.is_empty());
        assert!(req.tool_calls.is_empty());
        assert!(req.prompt_name.is_none());
        assert!(req.prompt_inputs.is_empty());
    }

    #[test]
    fn outcome_serialization_is_tagged() {
        let ok = ToolCallResult::success("time.now", serde_json::json!("2026-01-01T00:00:00Z"));
        let json = serde_json::to_string(&ok).unwrap();
        assert!(json.contains("\"status\":\"success\""));

        let bad = ToolCallResult::failure("math.add", "boom");
        let json = serde_json::to_string(&bad).unwrap();
        assert!(json.contains("\"status\":\"failure\""));
        assert!(json.contains("boom"));
        assert!(!bad.is_success());
    }

    #[test]
    fn context_text_section_order() {
        let ctx = AssembledContext {
            resources: vec![ResourceSection {
                id: "r1".into(),
                title: "Company Overview".into(),
                content: "We make tools.".into(),
            }],
            tool_results: vec![ToolCallResult::success("math.add", serde_json::json!(5.0))],
            rendered_prompt: Some("Be concise.".into()),
            message: "hi".into(),
        };

        let text = ctx.to_context_text();
        let prompt_pos = text.find("Be concise.").unwrap();
        let res_pos = text.find("Context snippets:").unwrap();
        let tool_pos = text.find("Tool outputs:").unwrap();
        assert!(prompt_pos < res_pos);
        assert!(res_pos < tool_pos);
        assert!(text.contains("Resource Company Overview:"));
    }

    #[test]
    fn context_text_notes_failed_tools() {
        let ctx = AssembledContext {
            resources: vec![],
            tool_results: vec![ToolCallResult::failure("math.add", "division by zero")],
            rendered_prompt: None,
            message: "hi".into(),
        };
        let text = ctx.to_context_text();
        assert!(text.contains("(tool math.add failed: division by zero)"));
    }

    #[test]
    fn empty_context_text_is_empty() {
        let ctx = AssembledContext {
            resources: vec![],
            tool_results: vec![],
            rendered_prompt: None,
            message: "hi".into(),
        };
        assert_eq!(ctx.to_context_text(), "");
    }

    #[test]
    fn warning_display() {
        let w = ContextWarning::UnknownResource { id: "rX".into() };
        assert!(w.to_string().contains("rX"));

        let w = ContextWarning::PromptFallback {
            prompt: "support-reply".into(),
            reason: "missing inputs".into(),
        };
        assert!(w.to_string().contains("support-reply"));
        assert!(w.to_string().contains("raw message"));
    }
}
