//! Trip expense arithmetic

use super::{
    deserialize_integer, deserialize_number, operation, optional_str, required_f64, round_to,
    Tool, ToolResult,
};
use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;

pub const NAME: &str = "expenses";

const TAX_RATE: f64 = 0.08;
/// Share of a total budget assumed to be spent
const SPEND_RATIO: f64 = 0.7;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TripCosts {
    #[serde(deserialize_with = "deserialize_number")]
    pub flight_cost: f64,
    #[serde(deserialize_with = "deserialize_number")]
    pub accommodation_cost: f64,
    #[serde(deserialize_with = "deserialize_number")]
    pub daily_budget: f64,
    #[serde(deserialize_with = "deserialize_integer")]
    pub trip_duration: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseBreakdown {
    pub flight_cost: f64,
    pub accommodation_cost: f64,
    pub daily_budget: f64,
    pub trip_duration: i64,
    pub total_daily_cost: f64,
    pub total_cost: f64,
    pub average_daily_cost: f64,
}

#[derive(Debug, Error, PartialEq)]
pub enum ExpenseError {
    #[error("Trip duration must be greater than 0")]
    NonPositiveDuration,

    #[error("Expense total is not a finite number")]
    NonFinite,
}

/// Totals for a trip. Duration must be positive and the result finite.
pub fn calculate_trip(costs: &TripCosts) -> Result<ExpenseBreakdown, ExpenseError> {
    if costs.trip_duration <= 0 {
        return Err(ExpenseError::NonPositiveDuration);
    }

    let days = costs.trip_duration as f64;
    let total_daily_cost = costs.daily_budget * days;
    let total_cost = costs.flight_cost + costs.accommodation_cost + total_daily_cost;
    let average_daily_cost = total_cost / days;

    if !(total_cost.is_finite() && average_daily_cost.is_finite()) {
        return Err(ExpenseError::NonFinite);
    }

    Ok(ExpenseBreakdown {
        flight_cost: costs.flight_cost,
        accommodation_cost: costs.accommodation_cost,
        daily_budget: costs.daily_budget,
        trip_duration: costs.trip_duration,
        total_daily_cost: round_to(total_daily_cost, 2),
        total_cost: round_to(total_cost, 2),
        average_daily_cost: round_to(average_daily_cost, 2),
    })
}

pub struct ExpenseCalculatorTool;

#[async_trait]
impl Tool for ExpenseCalculatorTool {
    fn name(&self) -> &str {
        NAME
    }

    fn description(&self) -> &str {
        "Total up trip costs, add tax to an expense, or estimate remaining budget."
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "operation": {
                    "type": "string",
                    "enum": ["trip", "tax", "budget"],
                    "description": "trip (default), tax or budget"
                },
                "flight_cost": { "type": "number" },
                "accommodation_cost": { "type": "number" },
                "daily_budget": { "type": "number" },
                "trip_duration": { "type": "integer" },
                "amount": { "type": "number", "description": "For tax" },
                "currency": { "type": "string", "description": "For tax, default USD" },
                "total_budget": { "type": "number", "description": "For budget" }
            }
        })
    }

    async fn execute(&self, params: Value) -> Result<ToolResult> {
        match operation(&params, "trip") {
            "trip" => {
                let costs: TripCosts = serde_json::from_value(params.clone())?;
                Ok(match calculate_trip(&costs) {
                    Ok(breakdown) => ToolResult::success(serde_json::to_value(breakdown)?),
                    Err(e) => ToolResult::error(e.to_string()),
                })
            }
            "tax" => {
                let amount = required_f64(&params, "amount")?;
                let currency = optional_str(&params, "currency").unwrap_or("USD");
                let tax_amount = amount * TAX_RATE;
                Ok(ToolResult::success(json!({
                    "currency": currency,
                    "base_amount": round_to(amount, 2),
                    "tax_rate": TAX_RATE,
                    "tax_amount": round_to(tax_amount, 2),
                    "total": round_to(amount + tax_amount, 2),
                })))
            }
            "budget" => {
                let total_budget = required_f64(&params, "total_budget")?;
                let estimated_expenses = total_budget * SPEND_RATIO;
                Ok(ToolResult::success(json!({
                    "total_budget": round_to(total_budget, 2),
                    "estimated_expenses": round_to(estimated_expenses, 2),
                    "remaining_budget": round_to(total_budget - estimated_expenses, 2),
                })))
            }
            other => Ok(ToolResult::error(format!(
                "Unknown expense operation: {}",
                other
            ))),
        }
    }
}
