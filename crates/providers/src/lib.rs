//! Model backend implementations for Capstan.
//!
//! All backends implement the `capstan_core::ModelBackend` trait.
//! Selection picks the correct backend from configuration, falling back
//! to the deterministic offline backend when no usable remote provider
//! is configured.

pub mod gemini;
pub mod offline;
pub mod openai;
pub mod select;

pub use gemini::GeminiBackend;
pub use offline::OfflineBackend;
pub use openai::OpenAiBackend;
pub use select::{build_from_config, choose, BackendChoice};
