//! Currency conversion over fixed mock exchange rates

use super::{operation, required_f64, required_str, round_to, Tool, ToolResult};
use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

pub const NAME: &str = "currency";

/// Rates known to the tool: (from, to, rate)
const TOOL_RATES: &[(&str, &str, f64)] = &[
    ("USD", "EUR", 0.85),
    ("USD", "GBP", 0.73),
    ("USD", "JPY", 110.0),
    ("EUR", "USD", 1.18),
    ("EUR", "GBP", 0.86),
    ("EUR", "JPY", 129.0),
    ("GBP", "USD", 1.37),
    ("GBP", "EUR", 1.16),
    ("GBP", "JPY", 150.0),
];

/// Wider table used by the endpoint when the tool is unavailable
const SIMULATED_RATES: &[(&str, &str, f64)] = &[
    ("USD", "EUR", 0.85),
    ("USD", "GBP", 0.73),
    ("USD", "JPY", 110.0),
    ("USD", "CAD", 1.25),
    ("EUR", "USD", 1.18),
    ("EUR", "GBP", 0.86),
    ("EUR", "JPY", 129.4),
    ("EUR", "CAD", 1.47),
    ("GBP", "USD", 1.37),
    ("GBP", "EUR", 1.16),
    ("GBP", "JPY", 150.7),
    ("GBP", "CAD", 1.71),
    ("JPY", "USD", 0.009),
    ("JPY", "EUR", 0.0077),
    ("JPY", "GBP", 0.0066),
    ("JPY", "CAD", 0.011),
    ("CAD", "USD", 0.80),
    ("CAD", "EUR", 0.68),
    ("CAD", "GBP", 0.58),
    ("CAD", "JPY", 88.0),
];

fn lookup(table: &[(&str, &str, f64)], from: &str, to: &str) -> Option<f64> {
    table
        .iter()
        .find(|(f, t, _)| *f == from && *t == to)
        .map(|(_, _, rate)| *rate)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrencyConversion {
    pub from_currency: String,
    pub to_currency: String,
    pub amount: f64,
    pub converted_amount: f64,
    pub exchange_rate: f64,
}

impl CurrencyConversion {
    fn new(from: &str, to: &str, amount: f64, rate: f64) -> Self {
        Self {
            from_currency: from.to_string(),
            to_currency: to.to_string(),
            amount,
            converted_amount: round_to(amount * rate, 2),
            exchange_rate: round_to(rate, 4),
        }
    }
}

/// Conversion with the tool's rates; `None` for pairs it does not know
pub fn convert(from: &str, to: &str, amount: f64) -> Option<CurrencyConversion> {
    lookup(TOOL_RATES, from, to).map(|rate| CurrencyConversion::new(from, to, amount, rate))
}

/// Conversion served when the tool is unavailable; unknown pairs use rate 1
pub fn simulated_conversion(from: &str, to: &str, amount: f64) -> CurrencyConversion {
    let rate = lookup(SIMULATED_RATES, from, to).unwrap_or(1.0);
    CurrencyConversion::new(from, to, amount, rate)
}

fn unavailable(from: &str, to: &str) -> ToolResult {
    ToolResult::error(format!(
        "Exchange rate not available for {} to {}",
        from, to
    ))
}

pub struct CurrencyConverterTool;

#[async_trait]
impl Tool for CurrencyConverterTool {
    fn name(&self) -> &str {
        NAME
    }

    fn description(&self) -> &str {
        "Convert an amount between currencies or look up an exchange rate."
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "operation": {
                    "type": "string",
                    "enum": ["convert", "rate"],
                    "description": "convert (default) or rate"
                },
                "from_currency": { "type": "string", "description": "ISO code, e.g. USD" },
                "to_currency": { "type": "string", "description": "ISO code, e.g. EUR" },
                "amount": { "type": "number" }
            },
            "required": ["from_currency", "to_currency"]
        })
    }

    async fn execute(&self, params: Value) -> Result<ToolResult> {
        let from = required_str(&params, "from_currency")?;
        let to = required_str(&params, "to_currency")?;

        match operation(&params, "convert") {
            "convert" => {
                let amount = required_f64(&params, "amount")?;
                Ok(match convert(from, to, amount) {
                    Some(conversion) => ToolResult::success(serde_json::to_value(conversion)?),
                    None => unavailable(from, to),
                })
            }
            "rate" => Ok(match lookup(TOOL_RATES, from, to) {
                Some(rate) => ToolResult::success(json!({
                    "from_currency": from,
                    "to_currency": to,
                    "exchange_rate": rate,
                    "summary": format!("1 {} = {} {}", from, rate, to),
                })),
                None => unavailable(from, to),
            }),
            other => Ok(ToolResult::error(format!(
                "Unknown currency operation: {}",
                other
            ))),
        }
    }
}
