//! Prompt definitions — named text templates with declared required inputs.

use serde::{Deserialize, Serialize};

/// A renderable prompt template.
///
/// Placeholders use `{name}` syntax. `required_inputs` lists the placeholders
/// that must be supplied; others are optional and pass through unresolved
/// when absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptDefinition {
    /// Unique key, e.g. "support-reply".
    pub name: String,

    /// What this prompt is for.
    pub description: String,

    /// Template text with `{name}` placeholders.
    pub template: String,

    /// Placeholder names that must be present in the render inputs.
    #[serde(default)]
    pub required_inputs: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip() {
        let p = PromptDefinition {
            name: "greet".into(),
            description: "Greets someone".into(),
            template: "Hello {name}!".into(),
            required_inputs: vec!["name".into()],
        };
        let json = serde_json::to_string(&p).unwrap();
        let parsed: PromptDefinition = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.name, "greet");
        assert_eq!(parsed.required_inputs, vec!["name".to_string()]);
    }
}
