//! Tool invoker — validates and executes a single tool call against the
//! registry.
//!
//! Validation is exhaustive: every missing required parameter and every
//! type mismatch is collected before returning, so the caller sees the
//! complete error set in one pass. Unknown extra keys are ignored.

use std::sync::Arc;

use capstan_core::chat::ToolCallResult;
use capstan_core::error::ToolError;
use capstan_core::tool::ToolParam;
use tracing::debug;

use crate::CapabilityRegistry;

/// Executes tool calls against a shared registry.
#[derive(Clone)]
pub struct ToolInvoker {
    registry: Arc<CapabilityRegistry>,
}

impl ToolInvoker {
    pub fn new(registry: Arc<CapabilityRegistry>) -> Self {
        Self { registry }
    }

    /// Validate and execute one tool call.
    ///
    /// Handler failures are normalized into `ToolError::Execution`; they
    /// never propagate as process-level faults.
    pub async fn invoke(
        &self,
        tool_name: &str,
        arguments: &serde_json::Map<String, serde_json::Value>,
    ) -> Result<serde_json::Value, ToolError> {
        let tool = self
            .registry
            .tool(tool_name)
            .ok_or_else(|| ToolError::Unknown(tool_name.to_string()))?;

        let violations = validate_arguments(&tool.params(), arguments);
        if !violations.is_empty() {
            return Err(ToolError::InvalidArguments {
                tool_name: tool_name.to_string(),
                violations,
            });
        }

        debug!(tool = %tool_name, "Executing tool");
        tool.execute(arguments)
            .await
            .map_err(|e| ToolError::Execution {
                tool_name: tool_name.to_string(),
                reason: e.to_string(),
            })
    }

    /// Execute one tool call and record the outcome as data, success or
    /// failure, for partial-failure aggregation.
    pub async fn record(
        &self,
        tool_name: &str,
        arguments: &serde_json::Map<String, serde_json::Value>,
    ) -> ToolCallResult {
        match self.invoke(tool_name, arguments).await {
            Ok(value) => ToolCallResult::success(tool_name, value),
            Err(e) => ToolCallResult::failure(tool_name, e.to_string()),
        }
    }
}

/// Check arguments against the declared parameter list.
///
/// Returns every violation, in parameter declaration order.
fn validate_arguments(
    params: &[ToolParam],
    arguments: &serde_json::Map<String, serde_json::Value>,
) -> Vec<String> {
    let mut violations = Vec::new();

    for param in params {
        match arguments.get(&param.name) {
            None => {
                if param.required {
                    violations.push(format!("missing required parameter '{}'", param.name));
                }
            }
            Some(value) => {
                if !param.kind.matches(value) {
                    violations.push(format!(
                        "parameter '{}' must be a {} (got {})",
                        param.name,
                        param.kind.label(),
                        json_type_name(value)
                    ));
                }
            }
        }
    }

    violations
}

fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use capstan_core::tool::{ParamKind, Tool};

    struct EchoTool;

    #[async_trait]
    impl Tool for EchoTool {
        fn name(&self) -> &str {
            "echo"
        }
        fn description(&self) -> &str {
            "Echoes back the 'text' argument"
        }
        fn params(&self) -> Vec<ToolParam> {
            vec![
                ToolParam::required("text", ParamKind::String, "Text to echo"),
                ToolParam::optional("loud", ParamKind::Boolean, "Uppercase the result"),
                ToolParam::optional("extra", ParamKind::Object, "Structured extras"),
            ]
        }
        async fn execute(
            &self,
            arguments: &serde_json::Map<String, serde_json::Value>,
        ) -> Result<serde_json::Value, ToolError> {
            let text = arguments
                .get("text")
                .and_then(|v| v.as_str())
                .unwrap_or_default();
            let loud = arguments
                .get("loud")
                .and_then(|v| v.as_bool())
                .unwrap_or(false);
            Ok(serde_json::json!(if loud {
                text.to_uppercase()
            } else {
                text.to_string()
            }))
        }
    }

    struct BrokenTool;

    #[async_trait]
    impl Tool for BrokenTool {
        fn name(&self) -> &str {
            "broken"
        }
        fn description(&self) -> &str {
            "Always fails"
        }
        fn params(&self) -> Vec<ToolParam> {
            vec![]
        }
        async fn execute(
            &self,
            _arguments: &serde_json::Map<String, serde_json::Value>,
        ) -> Result<serde_json::Value, ToolError> {
            Err(ToolError::Execution {
                tool_name: "broken".into(),
                reason: "handler blew up".into(),
            })
        }
    }

    fn invoker() -> ToolInvoker {
        let registry = CapabilityRegistry::builder()
            .tool(Box::new(EchoTool))
            .tool(Box::new(BrokenTool))
            .build();
        ToolInvoker::new(Arc::new(registry))
    }

    fn args(json: serde_json::Value) -> serde_json::Map<String, serde_json::Value> {
        json.as_object().unwrap().clone()
    }

    #[tokio::test]
    async fn valid_call_succeeds() {
        let value = invoker()
            .invoke("echo", &args(serde_json::json!({"text": "hi", "loud": true})))
            .await
            .unwrap();
        assert_eq!(value, serde_json::json!("HI"));
    }

    #[tokio::test]
    async fn unknown_tool() {
        let err = invoker()
            .invoke("nonexistent", &serde_json::Map::new())
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::Unknown(_)));
    }

    #[tokio::test]
    async fn validation_is_exhaustive() {
        // Missing required 'text' AND wrong type for 'loud' AND wrong type
        // for 'extra' — all three must be reported in one pass.
        let err = invoker()
            .invoke("echo", &args(serde_json::json!({"loud": "yes", "extra": [1]})))
            .await
            .unwrap_err();

        match err {
            ToolError::InvalidArguments { violations, .. } => {
                assert_eq!(violations.len(), 3);
                assert!(violations[0].contains("'text'"));
                assert!(violations[1].contains("'loud'"));
                assert!(violations[1].contains("boolean"));
                assert!(violations[2].contains("'extra'"));
                assert!(violations[2].contains("got array"));
            }
            other => panic!("Expected InvalidArguments, got: {other:?}"),
        }
    }

    #[tokio::test]
    async fn extra_keys_are_ignored() {
        let value = invoker()
            .invoke(
                "echo",
                &args(serde_json::json!({"text": "hi", "unrelated": 42})),
            )
            .await
            .unwrap();
        assert_eq!(value, serde_json::json!("hi"));
    }

    #[tokio::test]
    async fn handler_failure_is_execution_error() {
        let err = invoker()
            .invoke("broken", &serde_json::Map::new())
            .await
            .unwrap_err();
        match err {
            ToolError::Execution { tool_name, reason } => {
                assert_eq!(tool_name, "broken");
                assert!(reason.contains("handler blew up"));
            }
            other => panic!("Expected Execution, got: {other:?}"),
        }
    }

    #[tokio::test]
    async fn record_maps_errors_to_failure_outcomes() {
        let inv = invoker();

        let ok = inv.record("echo", &args(serde_json::json!({"text": "x"}))).await;
        assert!(ok.is_success());

        let bad = inv.record("broken", &serde_json::Map::new()).await;
        assert!(!bad.is_success());

        let missing = inv.record("nonexistent", &serde_json::Map::new()).await;
        assert!(!missing.is_success());
    }
}
