//! ModelBackend trait — the abstraction over language-model backends.
//!
//! A backend knows how to turn assembled context text plus a user message
//! into a reply. Implementations: OpenAI, Gemini, and a deterministic
//! offline backend for tests and demos.

use async_trait::async_trait;
use crate::error::ProviderError;

/// The core backend trait.
///
/// The orchestrator calls `generate()` without knowing which backend is
/// configured — pure polymorphism, resolved once at startup.
#[async_trait]
pub trait ModelBackend: Send + Sync {
    /// A stable name for this backend (e.g., "openai", "gemini", "offline").
    fn name(&self) -> &str;

    /// Whether replies are synthetic rather than from a remote model.
    fn is_offline(&self) -> bool {
        false
    }

    /// Produce a reply from the assembled context text and user message.
    ///
    /// The call must be timeout-bound; a slow backend surfaces as
    /// `ProviderError::Timeout` rather than stalling the request forever.
    async fn generate(
        &self,
        context_text: &str,
        message: &str,
    ) -> std::result::Result<String, ProviderError>;
}
