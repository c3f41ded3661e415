//! Error types for the Capstan domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error type.
//!
//! Propagation policy: tool and prompt failures are recoverable — they
//! are captured per step and surfaced as data in the response. Only a
//! `ProviderError` aborts a whole chat turn, since without a model reply
//! there is nothing useful to return.

use thiserror::Error;

/// Failures from tool invocation.
#[derive(Debug, Clone, Error)]
pub enum ToolError {
    #[error("Unknown tool: {0}")]
    Unknown(String),

    /// Argument validation failed. `violations` holds every violated
    /// parameter, not just the first — validation is exhaustive.
    #[error("Invalid arguments for tool '{tool_name}': {}", violations.join("; "))]
    InvalidArguments {
        tool_name: String,
        violations: Vec<String>,
    },

    /// The tool handler itself failed. Isolated per call; never aborts the
    /// surrounding request.
    #[error("Tool execution failed: {tool_name} — {reason}")]
    Execution { tool_name: String, reason: String },
}

/// Failures from prompt rendering.
#[derive(Debug, Clone, Error)]
pub enum PromptError {
    #[error("Unknown prompt: {0}")]
    Unknown(String),

    /// Every required input absent from the caller's map, not just the first.
    #[error("Missing prompt inputs for '{prompt_name}': {}", missing.join(", "))]
    MissingInputs {
        prompt_name: String,
        missing: Vec<String>,
    },
}

/// Failures from a model backend. Any of these means the backend produced
/// no usable reply, so they are the only request-aborting error class.
#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("API request failed: {message} (status: {status_code})")]
    Api { status_code: u16, message: String },

    #[error("Malformed provider response: {0}")]
    MalformedResponse(String),
}
