//! Tool trait — a named, schema-validated operation the client can
//! request execution of.
//!
//! Each tool declares an ordered parameter list; the invoker validates
//! caller arguments against it before the handler runs.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::error::ToolError;

/// The closed set of parameter type tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamKind {
    String,
    Number,
    Boolean,
    Object,
}

impl ParamKind {
    /// Whether a JSON value matches this type tag.
    pub fn matches(&self, value: &serde_json::Value) -> bool {
        match self {
            ParamKind::String => value.is_string(),
            ParamKind::Number => value.is_number(),
            ParamKind::Boolean => value.is_boolean(),
            ParamKind::Object => value.is_object(),
        }
    }

    /// The tag name used in validation messages.
    pub fn label(&self) -> &'static str {
        match self {
            ParamKind::String => "string",
            ParamKind::Number => "number",
            ParamKind::Boolean => "boolean",
            ParamKind::Object => "object",
        }
    }
}

/// A single parameter descriptor in a tool's input schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolParam {
    pub name: String,

    #[serde(rename = "type")]
    pub kind: ParamKind,

    pub description: String,

    #[serde(default)]
    pub required: bool,
}

impl ToolParam {
    pub fn required(name: &str, kind: ParamKind, description: &str) -> Self {
        Self {
            name: name.into(),
            kind,
            description: description.into(),
            required: true,
        }
    }

    pub fn optional(name: &str, kind: ParamKind, description: &str) -> Self {
        Self {
            name: name.into(),
            kind,
            description: description.into(),
            required: false,
        }
    }
}

/// The serializable listing form of a tool, as returned by the REST surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolSpec {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub params: Vec<ToolParam>,
}

/// The core Tool trait.
///
/// Handlers receive arguments that have already passed schema validation.
/// A handler failure is reported as `ToolError::Execution` by the invoker
/// and never aborts the surrounding request.
#[async_trait]
pub trait Tool: Send + Sync {
    /// The unique name of this tool (e.g., "math.add").
    fn name(&self) -> &str;

    /// A description of what this tool does.
    fn description(&self) -> &str;

    /// The ordered parameter descriptors making up the input schema.
    fn params(&self) -> Vec<ToolParam>;

    /// Execute the tool with validated arguments.
    async fn execute(
        &self,
        arguments: &serde_json::Map<String, serde_json::Value>,
    ) -> std::result::Result<serde_json::Value, ToolError>;

    /// Convert this tool into its listing form.
    fn spec(&self) -> ToolSpec {
        ToolSpec {
            name: self.name().to_string(),
            description: self.description().to_string(),
            params: self.params(),
        }
    }
}
