//! HTTP relay: chat plus the sibling travel tool endpoints

use super::errors::ApiError;
use crate::assistant::{ReplySource, ResponseRouter};
use crate::config::Config;
use crate::tools::expenses::{self, TripCosts};
use crate::tools::{currency, deserialize_number, places, weather, ToolRegistry};
use anyhow::Result;
use axum::{
    body::Bytes,
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};

/// Shared application state. Nothing in here changes after startup.
pub struct AppState {
    pub router: ResponseRouter,
    pub tools: ToolRegistry,
}

impl AppState {
    pub fn new(router: ResponseRouter, tools: ToolRegistry) -> Self {
        Self { router, tools }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            ResponseRouter::from_config(config),
            ToolRegistry::from_config(&config.tools),
        )
    }
}

/// Request for chat
#[derive(Debug, Deserialize)]
struct ChatRequest {
    #[serde(default)]
    message: Option<String>,
}

/// Response for chat
#[derive(Debug, Serialize)]
struct ChatResponse {
    response: String,
    source: ReplySource,
    timestamp: String,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
    timestamp: String,
}

#[derive(Debug, Deserialize)]
struct WeatherRequest {
    #[serde(default)]
    city: Option<String>,
    #[serde(default)]
    country: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CurrencyRequest {
    #[serde(default)]
    from_currency: Option<String>,
    #[serde(default)]
    to_currency: Option<String>,
    #[serde(default, deserialize_with = "deserialize_number")]
    amount: f64,
}

#[derive(Debug, Deserialize)]
struct PlacesRequest {
    #[serde(default)]
    query: Option<String>,
    #[serde(default)]
    location: Option<String>,
}

/// A string field that is present, non-null and non-empty
fn provided(field: Option<String>) -> Option<String> {
    field.filter(|s| !s.is_empty())
}

/// Local time in ISO-8601 without offset, e.g. `2025-03-01T14:05:09.123456`
pub fn timestamp() -> String {
    chrono::Local::now()
        .format("%Y-%m-%dT%H:%M:%S%.6f")
        .to_string()
}

/// Build the axum router over shared state
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/chat", post(handle_chat))
        .route("/api/weather", post(handle_weather))
        .route("/api/currency", post(handle_currency))
        .route("/api/expenses", post(handle_expenses))
        .route("/api/places", post(handle_places))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

/// Serve on an already bound listener
pub async fn serve(listener: TcpListener, state: Arc<AppState>) -> Result<()> {
    axum::serve(listener, build_router(state)).await?;
    Ok(())
}

/// Run the HTTP server
pub async fn run_http_server(config: &Config) -> Result<()> {
    let state = Arc::new(AppState::from_config(config));

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("HTTP server listening on {}", addr);
    tracing::info!("Agent backend: {}", config.backend.url);
    tracing::info!("Tools enabled: {:?}", state.tools.names());

    serve(listener, state).await
}

/// Parse a JSON body; malformed input is an internal error, not a 4xx
fn parse_body<T: DeserializeOwned>(body: &Bytes) -> Result<T, ApiError> {
    Ok(serde_json::from_slice(body)?)
}

/// Run a tool and use its output, or fall back to simulated data when the
/// tool is disabled or fails
async fn tool_or_simulated<F>(
    tools: &ToolRegistry,
    name: &str,
    params: Value,
    simulated: F,
) -> Result<Value, ApiError>
where
    F: FnOnce() -> Result<Value, ApiError>,
{
    if tools.get(name).is_none() {
        tracing::debug!("Tool '{}' not enabled, serving simulated data", name);
        return simulated();
    }

    let result = tools.execute(name, params).await;
    if result.success {
        Ok(result.output)
    } else {
        tracing::warn!(
            "Tool '{}' unavailable, serving simulated data: {}",
            name,
            result.text()
        );
        simulated()
    }
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        timestamp: timestamp(),
    })
}

async fn handle_chat(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<ChatResponse>, ApiError> {
    let req: ChatRequest = parse_body(&body)?;
    let Some(message) = provided(req.message) else {
        return Err(ApiError::bad_request("No message provided"));
    };

    tracing::info!("Chat request ({} chars)", message.chars().count());
    let reply = state.router.answer(&message).await;
    tracing::debug!("Chat reply from {}", reply.source);

    Ok(Json(ChatResponse {
        response: reply.text,
        source: reply.source,
        timestamp: timestamp(),
    }))
}

async fn handle_weather(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<Value>, ApiError> {
    let req: WeatherRequest = parse_body(&body)?;
    let (Some(city), Some(country)) = (provided(req.city), provided(req.country)) else {
        return Err(ApiError::bad_request("City and country are required"));
    };

    let params = json!({ "city": city, "country": country });
    let report = tool_or_simulated(&state.tools, weather::NAME, params, || {
        Ok(serde_json::to_value(weather::simulated_weather(&city, &country))?)
    })
    .await?;
    Ok(Json(report))
}

async fn handle_currency(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<Value>, ApiError> {
    let req: CurrencyRequest = parse_body(&body)?;
    let (Some(from), Some(to)) = (provided(req.from_currency), provided(req.to_currency)) else {
        return Err(ApiError::bad_request("Invalid parameters"));
    };
    if req.amount <= 0.0 {
        return Err(ApiError::bad_request("Invalid parameters"));
    }

    let params = json!({
        "from_currency": from,
        "to_currency": to,
        "amount": req.amount,
    });
    let conversion = tool_or_simulated(&state.tools, currency::NAME, params, || {
        Ok(serde_json::to_value(currency::simulated_conversion(
            &from, &to, req.amount,
        ))?)
    })
    .await?;
    Ok(Json(conversion))
}

async fn handle_expenses(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<Value>, ApiError> {
    let costs: TripCosts = parse_body(&body)?;
    if costs.trip_duration <= 0 {
        return Err(ApiError::bad_request(
            expenses::ExpenseError::NonPositiveDuration.to_string(),
        ));
    }

    let params = serde_json::to_value(costs)?;
    let breakdown = tool_or_simulated(&state.tools, expenses::NAME, params, || {
        let breakdown = expenses::calculate_trip(&costs)
            .map_err(|e| ApiError::Internal(e.to_string()))?;
        Ok(serde_json::to_value(breakdown)?)
    })
    .await?;
    Ok(Json(breakdown))
}

async fn handle_places(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<Value>, ApiError> {
    let req: PlacesRequest = parse_body(&body)?;
    let (Some(query), Some(location)) = (provided(req.query), provided(req.location)) else {
        return Err(ApiError::bad_request("Query and location are required"));
    };

    let params = json!({ "query": query, "location": location });
    let results = tool_or_simulated(&state.tools, places::NAME, params, || {
        Ok(serde_json::to_value(places::simulated_places(&query, &location))?)
    })
    .await?;
    Ok(Json(results))
}
