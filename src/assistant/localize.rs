//! Currency symbol localization for replies
//!
//! When the user's question mentions an Indian destination or currency, dollar
//! amounts in the reply are shown with the rupee sign instead. This is a
//! cosmetic rewrite, not a conversion: the numbers are left as they are.

use crate::config::LocalizationConfig;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde_json::Value;

/// Utterance substrings that select the rupee sign
pub const DEFAULT_LOCALE_KEYWORDS: &[&str] = &[
    "india", "manali", "inr", "rupee", "₹", "delhi", "mumbai", "goa", "himachal", "bali inr",
];

/// `$` followed by a digit, possibly after whitespace. The whitespace and
/// digit are captured so they can be written back untouched.
static DOLLAR_AMOUNT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\$(\s*\d)").unwrap());

#[derive(Debug, Clone)]
pub struct CurrencyLocalizer {
    enabled: bool,
    symbol: String,
    keywords: Vec<String>,
}

impl Default for CurrencyLocalizer {
    fn default() -> Self {
        Self::from_config(&LocalizationConfig::default())
    }
}

impl CurrencyLocalizer {
    pub fn from_config(config: &LocalizationConfig) -> Self {
        Self {
            enabled: config.enabled,
            symbol: config.symbol.clone(),
            keywords: config.keywords.iter().map(|k| k.to_lowercase()).collect(),
        }
    }

    /// Whether the utterance asks for the local currency
    pub fn applies_to(&self, utterance: &str) -> bool {
        if !self.enabled {
            return false;
        }
        let folded = utterance.to_lowercase();
        self.keywords.iter().any(|k| folded.contains(k.as_str()))
    }

    /// Rewrite dollar amounts in `text` when `utterance` calls for it
    pub fn localize(&self, text: &str, utterance: &str) -> String {
        if !self.applies_to(utterance) {
            return text.to_string();
        }
        DOLLAR_AMOUNT
            .replace_all(text, |caps: &Captures| format!("{}{}", self.symbol, &caps[1]))
            .into_owned()
    }

    /// Like [`localize`](Self::localize) for arbitrary JSON; only strings are
    /// rewritten, everything else comes back as given.
    pub fn localize_value(&self, value: Value, utterance: &str) -> Value {
        match value {
            Value::String(text) => Value::String(self.localize(&text, utterance)),
            other => other,
        }
    }
}
