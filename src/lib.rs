//! brevo: travel-planning chat relay
//!
//! This library provides:
//! - A response router that asks the agent backend and falls back to
//!   keyword-matched canned replies when it cannot answer
//! - Currency symbol localization for replies about Indian destinations
//! - Mock travel tools (weather, currency, expenses, places)
//! - An HTTP relay and a terminal chat over the same router

pub mod assistant;
pub mod config;
pub mod tools;
pub mod transport;

pub use assistant::{CurrencyLocalizer, KeywordTable, Reply, ReplySource, ResponseRouter};
pub use config::Config;
