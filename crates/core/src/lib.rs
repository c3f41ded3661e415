//! # Capstan Core
//!
//! Domain types, traits, and error definitions for the Capstan chat broker.
//! This crate has **zero framework dependencies** — it defines the domain model
//! that all other crates implement against.
//!
//! ## Design Philosophy
//!
//! The capability surface (resources, tools, prompts) and the model backend
//! are defined as types and traits here. Implementations live in their
//! respective crates. This enables:
//! - Swapping backends via configuration
//! - Easy testing with offline/stub implementations
//! - Clean dependency graph (all crates depend inward on core)

pub mod backend;
pub mod chat;
pub mod error;
pub mod prompt;
pub mod resource;
pub mod tool;

// Re-export key types at crate root for ergonomics
pub use backend::ModelBackend;
pub use chat::{
    AssembledContext, ChatRequest, ChatResponse, ContextWarning, Outcome, ResourceSection,
    ToolCallRequest, ToolCallResult,
};
pub use error::{PromptError, ProviderError, ToolError};
pub use prompt::PromptDefinition;
pub use resource::Resource;
pub use tool::{ParamKind, Tool, ToolParam, ToolSpec};
