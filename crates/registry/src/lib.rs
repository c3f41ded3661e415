//! Capability registry for Capstan — the typed surface of resources,
//! tools, and prompts a client can compose into a chat turn.
//!
//! The registry is populated once at process start via [`RegistryBuilder`]
//! and immutable afterwards, so concurrent reads need no synchronization.
//! Listings yield registration order.

pub mod demo;
pub mod invoker;
pub mod renderer;
pub mod tools;

pub use demo::demo_registry;
pub use invoker::ToolInvoker;
pub use renderer::PromptRenderer;

use std::collections::HashMap;

use capstan_core::prompt::PromptDefinition;
use capstan_core::resource::Resource;
use capstan_core::tool::{Tool, ToolSpec};

/// The immutable capability registry.
///
/// Keys are unique within each kind. Lookups never mutate state.
pub struct CapabilityRegistry {
    resources: Vec<Resource>,
    resource_index: HashMap<String, usize>,
    tools: Vec<Box<dyn Tool>>,
    tool_index: HashMap<String, usize>,
    prompts: Vec<PromptDefinition>,
    prompt_index: HashMap<String, usize>,
}

impl CapabilityRegistry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Look up a resource by id.
    pub fn resource(&self, id: &str) -> Option<&Resource> {
        self.resource_index.get(id).map(|&i| &self.resources[i])
    }

    /// Look up a tool by name.
    pub fn tool(&self, name: &str) -> Option<&dyn Tool> {
        self.tool_index.get(name).map(|&i| self.tools[i].as_ref())
    }

    /// Look up a prompt by name.
    pub fn prompt(&self, name: &str) -> Option<&PromptDefinition> {
        self.prompt_index.get(name).map(|&i| &self.prompts[i])
    }

    /// Resources in registration order.
    pub fn iter_resources(&self) -> impl Iterator<Item = &Resource> {
        self.resources.iter()
    }

    /// Tools in registration order.
    pub fn iter_tools(&self) -> impl Iterator<Item = &dyn Tool> {
        self.tools.iter().map(|t| t.as_ref())
    }

    /// Prompts in registration order.
    pub fn iter_prompts(&self) -> impl Iterator<Item = &PromptDefinition> {
        self.prompts.iter()
    }

    /// Listing forms of all tools, in registration order.
    pub fn tool_specs(&self) -> Vec<ToolSpec> {
        self.iter_tools().map(|t| t.spec()).collect()
    }
}

/// Builder for [`CapabilityRegistry`]. Registration happens once at startup.
///
/// Registering a duplicate key replaces the prior entry and logs a warning,
/// preserving the per-kind uniqueness invariant.
#[derive(Default)]
pub struct RegistryBuilder {
    resources: Vec<Resource>,
    tools: Vec<Box<dyn Tool>>,
    prompts: Vec<PromptDefinition>,
}

impl RegistryBuilder {
    pub fn resource(mut self, resource: Resource) -> Self {
        if let Some(existing) = self.resources.iter_mut().find(|r| r.id == resource.id) {
            tracing::warn!(id = %resource.id, "Replacing already-registered resource");
            *existing = resource;
        } else {
            self.resources.push(resource);
        }
        self
    }

    pub fn tool(mut self, tool: Box<dyn Tool>) -> Self {
        if let Some(existing) = self.tools.iter_mut().find(|t| t.name() == tool.name()) {
            tracing::warn!(name = %tool.name(), "Replacing already-registered tool");
            *existing = tool;
        } else {
            self.tools.push(tool);
        }
        self
    }

    pub fn prompt(mut self, prompt: PromptDefinition) -> Self {
        if let Some(existing) = self.prompts.iter_mut().find(|p| p.name == prompt.name) {
            tracing::warn!(name = %prompt.name, "Replacing already-registered prompt");
            *existing = prompt;
        } else {
            self.prompts.push(prompt);
        }
        self
    }

    pub fn build(self) -> CapabilityRegistry {
        let resource_index = self
            .resources
            .iter()
            .enumerate()
            .map(|(i, r)| (r.id.clone(), i))
            .collect();
        let tool_index = self
            .tools
            .iter()
            .enumerate()
            .map(|(i, t)| (t.name().to_string(), i))
            .collect();
        let prompt_index = self
            .prompts
            .iter()
            .enumerate()
            .map(|(i, p)| (p.name.clone(), i))
            .collect();

        CapabilityRegistry {
            resources: self.resources,
            resource_index,
            tools: self.tools,
            tool_index,
            prompts: self.prompts,
            prompt_index,
        }
    }
}
