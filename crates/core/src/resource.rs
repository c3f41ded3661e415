//! Resource — a named, static piece of content the model can be given
//! as context.
//!
//! Resources are created once at registry initialization and never mutated.

use serde::{Deserialize, Serialize};

/// A static context resource, looked up by id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resource {
    /// Unique key, e.g. "company:outline".
    pub id: String,

    /// Human-readable title.
    pub title: String,

    /// What this resource contains.
    pub description: String,

    /// Stable URI, e.g. "mcp://resources/company-outline".
    pub uri: String,

    /// MIME type of `data`.
    pub mime_type: String,

    /// Free-form classification tags.
    #[serde(default)]
    pub tags: Vec<String>,

    /// The content payload — plain text or a structured document.
    pub data: serde_json::Value,
}

impl Resource {
    /// The content as text, for inclusion in an assembled context.
    ///
    /// String payloads are used verbatim; structured payloads are
    /// pretty-printed JSON.
    pub fn content_text(&self) -> String {
        match &self.data {
            serde_json::Value::String(s) => s.clone(),
            other => serde_json::to_string_pretty(other).unwrap_or_else(|_| other.to_string()),
        }
    }
}
