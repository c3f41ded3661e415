//! time.now — returns the current UTC timestamp.

use async_trait::async_trait;
use capstan_core::error::ToolError;
use capstan_core::tool::{Tool, ToolParam};
use chrono::{SecondsFormat, Utc};

pub struct TimeNowTool;

#[async_trait]
impl Tool for TimeNowTool {
    fn name(&self) -> &str {
        "time.now"
    }

    fn description(&self) -> &str {
        "Returns the current timestamp in RFC 3339 format."
    }

    fn params(&self) -> Vec<ToolParam> {
        vec![]
    }

    async fn execute(
        &self,
        _arguments: &serde_json::Map<String, serde_json::Value>,
    ) -> Result<serde_json::Value, ToolError> {
        let now = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
        Ok(serde_json::json!(now))
    }
}
