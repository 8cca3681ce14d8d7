//! Weather lookup (mock data)

use super::{operation, optional_str, required_str, Tool, ToolResult};
use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

pub const NAME: &str = "weather";

const DEFAULT_FORECAST_DAYS: u64 = 5;

/// Current conditions for a city
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub city: String,
    pub country: String,
    pub temperature: i32,
    pub condition: String,
    pub humidity: u32,
    pub wind_speed: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

/// Conditions reported by the tool itself
pub fn current_weather(city: &str, country: &str) -> WeatherReport {
    WeatherReport {
        city: city.to_string(),
        country: country.to_string(),
        temperature: 25,
        condition: "Sunny".to_string(),
        humidity: 60,
        wind_speed: 10,
        summary: Some(format!(
            "Current weather in {}: Sunny, 25°C, Humidity: 60%",
            city
        )),
    }
}

/// Payload served when the tool is unavailable
pub fn simulated_weather(city: &str, country: &str) -> WeatherReport {
    WeatherReport {
        city: city.to_string(),
        country: country.to_string(),
        temperature: 22,
        condition: "Sunny".to_string(),
        humidity: 65,
        wind_speed: 12,
        summary: None,
    }
}

pub fn forecast_text(city: &str, days: u64) -> String {
    format!(
        "Weather forecast for {} for the next {} days: Mostly sunny with occasional clouds, \
         temperatures ranging from 20-28°C",
        city, days
    )
}

pub struct WeatherTool;

#[async_trait]
impl Tool for WeatherTool {
    fn name(&self) -> &str {
        NAME
    }

    fn description(&self) -> &str {
        "Get current weather or a multi-day forecast for a city."
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "operation": {
                    "type": "string",
                    "enum": ["current", "forecast"],
                    "description": "current (default) or forecast"
                },
                "city": { "type": "string" },
                "country": { "type": "string" },
                "days": { "type": "integer", "description": "Forecast length, default 5" }
            },
            "required": ["city"]
        })
    }

    async fn execute(&self, params: Value) -> Result<ToolResult> {
        let city = required_str(&params, "city")?;

        match operation(&params, "current") {
            "current" => {
                let country = optional_str(&params, "country").unwrap_or_default();
                Ok(ToolResult::success(serde_json::to_value(current_weather(
                    city, country,
                ))?))
            }
            "forecast" => {
                let days = params
                    .get("days")
                    .and_then(|v| v.as_u64())
                    .unwrap_or(DEFAULT_FORECAST_DAYS);
                Ok(ToolResult::success(json!({
                    "city": city,
                    "days": days,
                    "forecast": forecast_text(city, days),
                })))
            }
            other => Ok(ToolResult::error(format!(
                "Unknown weather operation: {}",
                other
            ))),
        }
    }
}
