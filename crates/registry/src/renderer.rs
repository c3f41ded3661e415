//! Prompt renderer — fills a named template with caller-supplied inputs.
//!
//! Substitution is a single literal pass: each `{name}` occurrence is
//! replaced with the corresponding input's string form, and substituted
//! values are never rescanned, so a value containing `{other}` cannot
//! trigger further expansion. Placeholders with no matching input pass
//! through verbatim, tolerating optional template sections.

use std::sync::Arc;

use capstan_core::error::PromptError;

use crate::CapabilityRegistry;

/// Renders prompt templates from a shared registry.
#[derive(Clone)]
pub struct PromptRenderer {
    registry: Arc<CapabilityRegistry>,
}

impl PromptRenderer {
    pub fn new(registry: Arc<CapabilityRegistry>) -> Self {
        Self { registry }
    }

    /// Render a named prompt with the given inputs.
    ///
    /// Every absent required input is reported, not just the first.
    pub fn render(
        &self,
        prompt_name: &str,
        inputs: &serde_json::Map<String, serde_json::Value>,
    ) -> Result<String, PromptError> {
        let prompt = self
            .registry
            .prompt(prompt_name)
            .ok_or_else(|| PromptError::Unknown(prompt_name.to_string()))?;

        let missing: Vec<String> = prompt
            .required_inputs
            .iter()
            .filter(|name| !inputs.contains_key(name.as_str()))
            .cloned()
            .collect();
        if !missing.is_empty() {
            return Err(PromptError::MissingInputs {
                prompt_name: prompt_name.to_string(),
                missing,
            });
        }

        Ok(render_template(&prompt.template, inputs))
    }
}

/// Single-pass `{placeholder}` substitution over `template`.
fn render_template(
    template: &str,
    inputs: &serde_json::Map<String, serde_json::Value>,
) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        match after.find('}') {
            Some(close) => {
                let key = &after[..close];
                match inputs.get(key) {
                    Some(value) => out.push_str(&value_text(value)),
                    None => {
                        // Unresolved placeholder passes through
                        out.push('{');
                        out.push_str(key);
                        out.push('}');
                    }
                }
                rest = &after[close + 1..];
            }
            None => {
                // Unclosed brace: keep the tail literally
                out.push_str(&rest[open..]);
                rest = "";
            }
        }
    }

    out.push_str(rest);
    out
}

fn value_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use capstan_core::prompt::PromptDefinition;

    fn renderer() -> PromptRenderer {
        let registry = CapabilityRegistry::builder()
            .prompt(PromptDefinition {
                name: "greet".into(),
                description: "Greets someone".into(),
                template: "Hello {name}, you asked: {question}".into(),
                required_inputs: vec!["name".into(), "question".into()],
            })
            .prompt(PromptDefinition {
                name: "partial".into(),
                description: "Has an optional section".into(),
                template: "Topic: {topic}. Footnote: {footnote}".into(),
                required_inputs: vec!["topic".into()],
            })
            .build();
        PromptRenderer::new(Arc::new(registry))
    }

    fn inputs(json: serde_json::Value) -> serde_json::Map<String, serde_json::Value> {
        json.as_object().unwrap().clone()
    }

    #[test]
    fn renders_with_all_inputs() {
        let text = renderer()
            .render("greet", &inputs(serde_json::json!({"name": "Ada", "question": "why?"})))
            .unwrap();
        assert_eq!(text, "Hello Ada, you asked: why?");
    }

    #[test]
    fn unknown_prompt() {
        let err = renderer()
            .render("nonexistent", &serde_json::Map::new())
            .unwrap_err();
        assert!(matches!(err, PromptError::Unknown(_)));
    }

    #[test]
    fn missing_inputs_listed_exhaustively() {
        let err = renderer()
            .render("greet", &serde_json::Map::new())
            .unwrap_err();
        match err {
            PromptError::MissingInputs { missing, .. } => {
                assert_eq!(missing, vec!["name".to_string(), "question".to_string()]);
            }
            other => panic!("Expected MissingInputs, got: {other:?}"),
        }
    }

    #[test]
    fn any_single_missing_input_fails() {
        let err = renderer()
            .render("greet", &inputs(serde_json::json!({"name": "Ada"})))
            .unwrap_err();
        match err {
            PromptError::MissingInputs { missing, .. } => {
                assert_eq!(missing, vec!["question".to_string()]);
            }
            other => panic!("Expected MissingInputs, got: {other:?}"),
        }
    }

    #[test]
    fn optional_placeholder_passes_through() {
        let text = renderer()
            .render("partial", &inputs(serde_json::json!({"topic": "uptime"})))
            .unwrap();
        assert_eq!(text, "Topic: uptime. Footnote: {footnote}");
    }

    #[test]
    fn substituted_values_are_not_rescanned() {
        // A value that itself looks like a placeholder must not expand again.
        let text = renderer()
            .render(
                "greet",
                &inputs(serde_json::json!({"name": "{question}", "question": "why?"})),
            )
            .unwrap();
        assert_eq!(text, "Hello {question}, you asked: why?");
    }

    #[test]
    fn non_string_inputs_use_json_form() {
        let text = renderer()
            .render(
                "greet",
                &inputs(serde_json::json!({"name": 42, "question": {"q": 1}})),
            )
            .unwrap();
        assert_eq!(text, "Hello 42, you asked: {\"q\":1}");
    }

    #[test]
    fn repeated_placeholder_substituted_each_time() {
        let map = inputs(serde_json::json!({"x": "a"}));
        assert_eq!(render_template("{x}{x}{x}", &map), "aaa");
    }

    #[test]
    fn unclosed_brace_kept_literally() {
        let map = inputs(serde_json::json!({"x": "a"}));
        assert_eq!(render_template("{x} and {tail", &map), "a and {tail");
    }
}
