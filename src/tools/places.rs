//! Place search (mock data)

use super::{operation, optional_str, required_str, Tool, ToolResult};
use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

pub const NAME: &str = "places";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub name: String,
    pub rating: f64,
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
}

impl Place {
    fn new(name: String, rating: f64, kind: &str, description: String) -> Self {
        Self {
            name,
            rating,
            kind: kind.to_string(),
            description,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceSearch {
    pub query: String,
    pub location: String,
    pub results: Vec<Place>,
}

/// Results reported by the tool itself
pub fn search_places(query: &str, location: Option<&str>) -> PlaceSearch {
    let scope = match location {
        Some(location) => format!("'{}' in {}", query, location),
        None => format!("'{}'", query),
    };
    PlaceSearch {
        query: query.to_string(),
        location: location.unwrap_or_default().to_string(),
        results: vec![
            Place::new(
                "Sample Restaurant".to_string(),
                4.4,
                "Restaurant",
                format!("Dining option matching {}.", scope),
            ),
            Place::new(
                "Tourist Attraction".to_string(),
                4.6,
                "Attraction",
                format!("Sight matching {}.", scope),
            ),
            Place::new(
                "Local Hotel".to_string(),
                4.1,
                "Hotel",
                format!("Accommodation matching {}.", scope),
            ),
        ],
    }
}

/// Results served when the tool is unavailable
pub fn simulated_places(query: &str, location: &str) -> PlaceSearch {
    PlaceSearch {
        query: query.to_string(),
        location: location.to_string(),
        results: vec![
            Place::new(
                format!("{} in {}", query, location),
                4.5,
                "Attraction",
                "A popular destination that matches your search criteria.".to_string(),
            ),
            Place::new(
                format!("{} Experience", query),
                4.2,
                "Activity",
                "An exciting activity that you might enjoy.".to_string(),
            ),
            Place::new(
                format!("{} Tour", query),
                4.7,
                "Tour",
                "A guided tour option for your interests.".to_string(),
            ),
        ],
    }
}

pub struct PlaceSearchTool;

#[async_trait]
impl Tool for PlaceSearchTool {
    fn name(&self) -> &str {
        NAME
    }

    fn description(&self) -> &str {
        "Search restaurants, attractions and hotels, or get details for one place."
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "operation": {
                    "type": "string",
                    "enum": ["search", "details"],
                    "description": "search (default) or details"
                },
                "query": { "type": "string", "description": "What to look for" },
                "place_name": { "type": "string", "description": "For details" },
                "location": { "type": "string" }
            }
        })
    }

    async fn execute(&self, params: Value) -> Result<ToolResult> {
        let location = optional_str(&params, "location");

        match operation(&params, "search") {
            "search" => {
                let query = required_str(&params, "query")?;
                Ok(ToolResult::success(serde_json::to_value(search_places(
                    query, location,
                ))?))
            }
            "details" => {
                let place_name = required_str(&params, "place_name")?;
                Ok(ToolResult::success(json!({
                    "name": place_name,
                    "location": location,
                    "address": "123 Main St",
                    "rating": 4.5,
                    "hours": "9 AM - 10 PM",
                    "phone": "(555) 123-4567",
                })))
            }
            other => Ok(ToolResult::error(format!(
                "Unknown places operation: {}",
                other
            ))),
        }
    }
}
