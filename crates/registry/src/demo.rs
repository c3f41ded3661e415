//! The built-in demo capability set.
//!
//! A small company knowledge base, two tools, and two prompt templates —
//! enough to exercise every part of the chat pipeline without external
//! services. Host applications are free to build their own registry
//! instead; the gateway and CLI wire this one up.

use capstan_core::prompt::PromptDefinition;
use capstan_core::resource::Resource;

use crate::tools::{MathAddTool, TimeNowTool};
use crate::CapabilityRegistry;

/// Build the demo registry: two resources, two tools, two prompts.
pub fn demo_registry() -> CapabilityRegistry {
    CapabilityRegistry::builder()
        .resource(Resource {
            id: "company:outline".into(),
            title: "Company Overview".into(),
            description: "High-level overview of the example company profile.".into(),
            uri: "mcp://resources/company-outline".into(),
            mime_type: "application/json".into(),
            tags: vec!["company".into(), "knowledge-base".into()],
            data: serde_json::json!({
                "name": "Instrat Demo Co.",
                "mission": "Deliver AI-enabled productivity tooling.",
                "products": [
                    "MCP integration services",
                    "LLM consulting",
                    "Automation toolkits",
                ],
            }),
        })
        .resource(Resource {
            id: "product:faq".into(),
            title: "Product FAQ".into(),
            description: "Frequently asked questions for the flagship product.".into(),
            uri: "mcp://resources/product-faq".into(),
            mime_type: "application/json".into(),
            tags: vec!["faq".into(), "support".into()],
            data: serde_json::json!({
                "deployment": "Docker or serverless",
                "uptime_sla": "99.9%",
                "support": "Email support within one business day",
            }),
        })
        .tool(Box::new(MathAddTool))
        .tool(Box::new(TimeNowTool))
        .prompt(PromptDefinition {
            name: "summarize-resource".into(),
            description: "Summarize a resource for a customer-facing answer.".into(),
            template: "You are preparing a short summary for a customer question.\n\
                       Resource details:\n{resource_json}\n\
                       User question:\n{question}\n\
                       Provide a concise response."
                .into(),
            required_inputs: vec!["resource_json".into(), "question".into()],
        })
        .prompt(PromptDefinition {
            name: "support-reply".into(),
            description: "Craft a polite support response using provided context.".into(),
            template: "Customer message:\n{customer_message}\n\n\
                       Context snippets:\n{context}\n\n\
                       Compose a supportive reply with next steps."
                .into(),
            required_inputs: vec!["customer_message".into(), "context".into()],
        })
        .build()
}
