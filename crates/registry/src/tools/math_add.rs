//! math.add — adds two numbers.

use async_trait::async_trait;
use capstan_core::error::ToolError;
use capstan_core::tool::{ParamKind, Tool, ToolParam};

pub struct MathAddTool;

#[async_trait]
impl Tool for MathAddTool {
    fn name(&self) -> &str {
        "math.add"
    }

    fn description(&self) -> &str {
        "Adds two numbers and returns the sum."
    }

    fn params(&self) -> Vec<ToolParam> {
        vec![
            ToolParam::required("a", ParamKind::Number, "First addend."),
            ToolParam::required("b", ParamKind::Number, "Second addend."),
        ]
    }

    async fn execute(
        &self,
        arguments: &serde_json::Map<String, serde_json::Value>,
    ) -> Result<serde_json::Value, ToolError> {
        // Presence and type are guaranteed by invoker validation.
        let a = arguments.get("a").and_then(|v| v.as_f64()).ok_or_else(|| {
            ToolError::Execution {
                tool_name: "math.add".into(),
                reason: "argument 'a' is not representable as f64".into(),
            }
        })?;
        let b = arguments.get("b").and_then(|v| v.as_f64()).ok_or_else(|| {
            ToolError::Execution {
                tool_name: "math.add".into(),
                reason: "argument 'b' is not representable as f64".into(),
            }
        })?;
        Ok(serde_json::json!(a + b))
    }
}
