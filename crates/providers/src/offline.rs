//! Deterministic offline backend.
//!
//! Produces a reply from the assembled context and message alone, with
//! no network access. The same input always produces the same output,
//! which makes chat pipelines testable end to end without credentials.

use async_trait::async_trait;
use capstan_core::backend::ModelBackend;
use capstan_core::error::ProviderError;

pub struct OfflineBackend;

impl OfflineBackend {
    pub fn new() -> Self {
        Self
    }

    fn compose(context_text: &str, message: &str) -> String {
        let mut reply = format!(
            "Offline response generated without contacting an external model. \
             Echoing your request: {message}"
        );
        if !context_text.is_empty() {
            let lines = context_text.lines().count();
            reply.push_str(&format!(
                "\n\nAssembled context ({lines} line{}):\n{context_text}",
                if lines == 1 { "" } else { "s" }
            ));
        }
        reply
    }
}

impl Default for OfflineBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ModelBackend for OfflineBackend {
    fn name(&self) -> &str {
        "offline"
    }

    fn is_offline(&self) -> bool {
        true
    }

    async fn generate(
        &self,
        context_text: &str,
        message: &str,
    ) -> std::result::Result<String, ProviderError> {
        Ok(Self::compose(context_text, message))
    }
}
