//! Travel tools used by the agent and by the sibling API endpoints
//!
//! Every tool returns mock or locally computed data. Each module also exposes
//! the simulated payload its endpoint serves when the tool is disabled or
//! fails, so callers always get a deterministic answer.

pub mod currency;
pub mod expenses;
pub mod places;
pub mod weather;

pub use currency::CurrencyConverterTool;
pub use expenses::ExpenseCalculatorTool;
pub use places::PlaceSearchTool;
pub use weather::WeatherTool;

use crate::config::ToolsConfig;
use anyhow::Result;
use async_trait::async_trait;
use futures::FutureExt;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::collections::HashMap;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;

/// Result of executing a tool
#[derive(Debug, Clone, PartialEq)]
pub struct ToolResult {
    pub success: bool,
    pub output: Value,
}

impl ToolResult {
    pub fn success(output: impl Into<Value>) -> Self {
        Self {
            success: true,
            output: output.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            output: Value::String(message.into()),
        }
    }

    /// Output as display text: strings verbatim, anything else as JSON
    pub fn text(&self) -> String {
        match &self.output {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

/// Trait for travel tools
#[async_trait]
pub trait Tool: Send + Sync {
    /// Get the tool name
    fn name(&self) -> &str;

    /// Get the tool description
    fn description(&self) -> &str;

    /// Get the JSON schema for parameters
    fn parameters(&self) -> Value;

    /// Execute the tool with given parameters
    async fn execute(&self, params: Value) -> Result<ToolResult>;
}

/// Registry of available tools
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
    tool_timeout_secs: u64,
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
            tool_timeout_secs: 10,
        }
    }

    /// Create a registry holding the tools enabled in `config`
    pub fn from_config(config: &ToolsConfig) -> Self {
        let mut registry = Self::new();
        registry.set_tool_timeout_secs(config.timeout_secs);

        for name in &config.enabled {
            let tool: Arc<dyn Tool> = match name.as_str() {
                weather::NAME => Arc::new(WeatherTool),
                currency::NAME => Arc::new(CurrencyConverterTool),
                expenses::NAME => Arc::new(ExpenseCalculatorTool),
                places::NAME => Arc::new(PlaceSearchTool),
                other => {
                    tracing::warn!("Ignoring unknown tool '{}' in config", other);
                    continue;
                }
            };
            registry.register(tool);
        }

        let tool_names: Vec<_> = registry.tools.keys().cloned().collect();
        tracing::debug!("Tool registry created with tools: {:?}", tool_names);

        registry
    }

    /// Register a tool
    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        self.tools.insert(tool.name().to_string(), tool);
    }

    /// Set the default tool timeout (seconds)
    pub fn set_tool_timeout_secs(&mut self, secs: u64) {
        self.tool_timeout_secs = secs;
    }

    /// Get a tool by name
    pub fn get(&self, name: &str) -> Option<&Arc<dyn Tool>> {
        self.tools.get(name)
    }

    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tools.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    /// Execute a tool by name with given parameters
    ///
    /// Errors, panics and timeouts all come back as an unsuccessful
    /// [`ToolResult`].
    pub async fn execute(&self, name: &str, params: Value) -> ToolResult {
        let Some(tool) = self.tools.get(name) else {
            return ToolResult::error(format!("Unknown tool: {}", name));
        };

        let timeout_duration = Duration::from_secs(self.tool_timeout_secs);

        match timeout(
            timeout_duration,
            AssertUnwindSafe(tool.execute(params)).catch_unwind(),
        )
        .await
        {
            Ok(Ok(Ok(result))) => result,
            Ok(Ok(Err(e))) => {
                tracing::debug!("Tool '{}' failed: {}", name, e);
                ToolResult::error(format!("Tool '{}' failed: {}", name, e))
            }
            Ok(Err(panic_info)) => {
                let panic_msg = if let Some(s) = panic_info.downcast_ref::<&str>() {
                    (*s).to_string()
                } else if let Some(s) = panic_info.downcast_ref::<String>() {
                    s.clone()
                } else {
                    "Unknown panic".to_string()
                };
                tracing::error!("Tool '{}' panicked: {}", name, panic_msg);
                ToolResult::error(format!("Tool '{}' crashed: {}", name, panic_msg))
            }
            Err(_) => ToolResult::error(format!(
                "Tool '{}' timed out after {} seconds",
                name, self.tool_timeout_secs
            )),
        }
    }
}

/// Fetch a required, non-empty string parameter
pub(crate) fn required_str<'a>(params: &'a Value, key: &str) -> Result<&'a str> {
    match params.get(key).and_then(|v| v.as_str()) {
        Some(s) if !s.trim().is_empty() => Ok(s),
        _ => anyhow::bail!("Missing required parameter '{}'", key),
    }
}

pub(crate) fn optional_str<'a>(params: &'a Value, key: &str) -> Option<&'a str> {
    params
        .get(key)
        .and_then(|v| v.as_str())
        .filter(|s| !s.trim().is_empty())
}

pub(crate) fn required_f64(params: &Value, key: &str) -> Result<f64> {
    params
        .get(key)
        .and_then(|v| v.as_f64())
        .ok_or_else(|| anyhow::anyhow!("Missing numeric parameter '{}'", key))
}

/// Selected operation, defaulting to the tool's primary one
pub(crate) fn operation<'a>(params: &'a Value, default: &'a str) -> &'a str {
    params
        .get("operation")
        .and_then(|v| v.as_str())
        .unwrap_or(default)
}

/// A numeric request field as clients actually send it
#[derive(Deserialize)]
#[serde(untagged)]
enum NumberValue {
    Integer(i64),
    Float(f64),
    Text(String),
}

/// Accept `12`, `12.5` or `" 12.5 "`; `null` counts as absent (0)
pub(crate) fn deserialize_number<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let opt: Option<NumberValue> = Option::deserialize(deserializer)?;
    match opt {
        None => Ok(0.0),
        Some(NumberValue::Integer(n)) => Ok(n as f64),
        Some(NumberValue::Float(f)) => Ok(f),
        Some(NumberValue::Text(s)) => s
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|f| f.is_finite())
            .ok_or_else(|| D::Error::custom(format!("could not convert string to number: '{}'", s))),
    }
}

/// Accept `7`, `7.0` or `"7"`; fractional values truncate toward zero and
/// `null` counts as absent (0)
pub(crate) fn deserialize_integer<'de, D>(deserializer: D) -> std::result::Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let opt: Option<NumberValue> = Option::deserialize(deserializer)?;
    match opt {
        None => Ok(0),
        Some(NumberValue::Integer(n)) => Ok(n),
        Some(NumberValue::Float(f)) if f.is_finite() && f.abs() < i64::MAX as f64 => {
            Ok(f.trunc() as i64)
        }
        Some(NumberValue::Float(f)) => Err(D::Error::custom(format!(
            "cannot convert {} to an integer",
            f
        ))),
        Some(NumberValue::Text(s)) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| D::Error::custom(format!("invalid integer literal: '{}'", s))),
    }
}

/// Round half away from zero to `places` decimals
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}
