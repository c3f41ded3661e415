//! Backend selection.
//!
//! Selection is a pure function of the loaded configuration: no network
//! probing, no environment reads. A request handled by the offline
//! backend never means "the remote call failed" — it means selection
//! chose offline up front, either because it was forced or because no
//! usable credential exists for the preferred provider.

use std::sync::Arc;
use std::time::Duration;

use capstan_config::AppConfig;
use capstan_core::backend::ModelBackend;
use tracing::info;

use crate::{GeminiBackend, OfflineBackend, OpenAiBackend};

/// The outcome of backend selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendChoice {
    OpenAi,
    Gemini,
    Offline,
}

/// Decide which backend to use. Pure and total:
///
/// 1. `force_offline` wins over everything.
/// 2. A known provider name with a credential selects that provider.
/// 3. Anything else (unknown provider, missing credential) is offline.
pub fn choose(
    force_offline: bool,
    provider: &str,
    has_openai_key: bool,
    has_gemini_key: bool,
) -> BackendChoice {
    if force_offline {
        return BackendChoice::Offline;
    }
    match provider.trim().to_ascii_lowercase().as_str() {
        "openai" if has_openai_key => BackendChoice::OpenAi,
        "gemini" if has_gemini_key => BackendChoice::Gemini,
        _ => BackendChoice::Offline,
    }
}

/// Build the selected backend from configuration.
pub fn build_from_config(config: &AppConfig) -> Arc<dyn ModelBackend> {
    let timeout = Duration::from_secs(config.gateway.request_timeout_secs);
    let choice = choose(
        config.force_offline,
        &config.provider,
        config.openai.api_key.is_some(),
        config.gemini.api_key.is_some(),
    );

    info!(provider = %config.provider, ?choice, "Selected model backend");

    match choice {
        BackendChoice::OpenAi => {
            let key = config.openai.api_key.clone().unwrap_or_default();
            Arc::new(OpenAiBackend::new(key, config.openai.model.clone(), timeout))
        }
        BackendChoice::Gemini => {
            let key = config.gemini.api_key.clone().unwrap_or_default();
            Arc::new(GeminiBackend::new(key, config.gemini.model.clone(), timeout))
        }
        BackendChoice::Offline => Arc::new(OfflineBackend::new()),
    }
}
