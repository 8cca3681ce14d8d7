//! HTTP relay tests against a live server on an ephemeral port

use axum::{http::StatusCode, routing::post, Json, Router};
use brevo::config::Config;
use brevo::transport::{http, AppState};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

async fn spawn_relay(config: Config) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let state = Arc::new(AppState::from_config(&config));
    tokio::spawn(async move {
        http::serve(listener, state).await.unwrap();
    });
    format!("http://{}", addr)
}

/// Stand-in for the agent query service
async fn spawn_agent(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

fn answering_agent(answer: &'static str) -> Router {
    Router::new().route(
        "/query",
        post(move |Json(body): Json<Value>| async move {
            assert!(body["question"].is_string());
            Json(json!({ "answer": answer }))
        }),
    )
}

fn config_with_backend(url: &str) -> Config {
    let mut config = Config::default();
    config.backend.url = url.to_string();
    config
}

async fn post_json(base: &str, path: &str, body: Value) -> (StatusCode, Value) {
    let response = reqwest::Client::new()
        .post(format!("{}{}", base, path))
        .json(&body)
        .send()
        .await
        .unwrap();
    let status = StatusCode::from_u16(response.status().as_u16()).unwrap();
    (status, response.json().await.unwrap())
}

#[tokio::test]
async fn chat_relays_agent_answer_with_localized_currency() {
    let agent = spawn_agent(answering_agent("Beach huts cost $80 per night.")).await;
    let relay = spawn_relay(config_with_backend(&agent)).await;

    let (status, body) = post_json(&relay, "/api/chat", json!({ "message": "Trip to Goa" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["response"], "Beach huts cost ₹80 per night.");
    assert_eq!(body["source"], "agent");
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn chat_keeps_dollars_without_locale_keyword() {
    let agent = spawn_agent(answering_agent("Rooms from $120.")).await;
    let relay = spawn_relay(config_with_backend(&agent)).await;

    let (_, body) = post_json(&relay, "/api/chat", json!({ "message": "trip to paris" })).await;
    assert_eq!(body["response"], "Rooms from $120.");
}

#[tokio::test]
async fn chat_falls_back_on_backend_error_status() {
    let failing = Router::new().route(
        "/query",
        post(|| async {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "graph failed" })),
            )
        }),
    );
    let agent = spawn_agent(failing).await;
    let relay = spawn_relay(config_with_backend(&agent)).await;

    let (status, body) =
        post_json(&relay, "/api/chat", json!({ "message": "weather in Tokyo" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["source"], "fallback");
    assert!(body["response"]
        .as_str()
        .unwrap()
        .starts_with("I can help you check weather conditions"));
}

#[tokio::test]
async fn chat_falls_back_on_backend_timeout() {
    let slow = Router::new().route(
        "/query",
        post(|| async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Json(json!({ "answer": "too late" }))
        }),
    );
    let agent = spawn_agent(slow).await;
    let mut config = config_with_backend(&agent);
    config.backend.timeout_secs = 1;
    let relay = spawn_relay(config).await;

    let (_, body) = post_json(&relay, "/api/chat", json!({ "message": "japan in spring" })).await;
    assert_eq!(body["source"], "fallback");
    assert!(body["response"].as_str().unwrap().starts_with("Japan is amazing!"));
}

#[tokio::test]
async fn chat_unreachable_backend_gives_default_reply() {
    let relay = spawn_relay(config_with_backend("http://127.0.0.1:1")).await;

    let (_, body) = post_json(&relay, "/api/chat", json!({ "message": "hello" })).await;
    assert!(body["response"]
        .as_str()
        .unwrap()
        .starts_with("I'd love to help you plan your trip!"));
}

#[tokio::test]
async fn chat_answer_without_field_uses_placeholder() {
    let agent = spawn_agent(Router::new().route("/query", post(|| async { Json(json!({})) }))).await;
    let relay = spawn_relay(config_with_backend(&agent)).await;

    let (_, body) = post_json(&relay, "/api/chat", json!({ "message": "hi" })).await;
    assert_eq!(body["response"], "No response from AI");
}

#[tokio::test]
async fn chat_rejects_empty_message() {
    let relay = spawn_relay(config_with_backend("http://127.0.0.1:1")).await;

    let (status, body) = post_json(&relay, "/api/chat", json!({ "message": "" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "No message provided" }));

    let (status, _) = post_json(&relay, "/api/chat", json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = post_json(&relay, "/api/chat", json!({ "message": null })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "No message provided");
}

#[tokio::test]
async fn chat_routes_whitespace_only_message() {
    let relay = spawn_relay(config_with_backend("http://127.0.0.1:1")).await;

    let (status, body) = post_json(&relay, "/api/chat", json!({ "message": "   " })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["source"], "fallback");
    assert!(body["response"]
        .as_str()
        .unwrap()
        .starts_with("I'd love to help you plan your trip!"));
}

#[tokio::test]
async fn malformed_json_is_a_server_error() {
    let relay = spawn_relay(Config::default()).await;

    let response = reqwest::Client::new()
        .post(format!("{}/api/chat", relay))
        .header("content-type", "application/json")
        .body("{\"message\": ")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 500);
    let body: Value = response.json().await.unwrap();
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn weather_endpoint_uses_tool_then_simulation() {
    let relay = spawn_relay(Config::default()).await;
    let (status, body) = post_json(
        &relay,
        "/api/weather",
        json!({ "city": "Tokyo", "country": "Japan" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["temperature"], 25);

    let mut config = Config::default();
    config.tools.enabled.clear();
    let relay = spawn_relay(config).await;
    let (_, body) = post_json(
        &relay,
        "/api/weather",
        json!({ "city": "Tokyo", "country": "Japan" }),
    )
    .await;
    assert_eq!(
        body,
        json!({
            "city": "Tokyo",
            "country": "Japan",
            "temperature": 22,
            "condition": "Sunny",
            "humidity": 65,
            "wind_speed": 12
        })
    );
}

#[tokio::test]
async fn weather_requires_city_and_country() {
    let relay = spawn_relay(Config::default()).await;
    let (status, body) = post_json(&relay, "/api/weather", json!({ "city": "Tokyo" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "City and country are required");

    let (status, body) = post_json(
        &relay,
        "/api/weather",
        json!({ "city": null, "country": "Japan" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "City and country are required");
}

#[tokio::test]
async fn places_rejects_null_location() {
    let relay = spawn_relay(Config::default()).await;
    let (status, body) = post_json(
        &relay,
        "/api/places",
        json!({ "query": "Museum", "location": null }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Query and location are required");
}

#[tokio::test]
async fn currency_endpoint() {
    let relay = spawn_relay(Config::default()).await;

    let (_, body) = post_json(
        &relay,
        "/api/currency",
        json!({ "from_currency": "USD", "to_currency": "EUR", "amount": 200 }),
    )
    .await;
    assert_eq!(body["converted_amount"], 170.0);

    // Unknown to the tool, served from the simulated table
    let (status, body) = post_json(
        &relay,
        "/api/currency",
        json!({ "from_currency": "CAD", "to_currency": "JPY", "amount": 10 }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["exchange_rate"], 88.0);
    assert_eq!(body["converted_amount"], 880.0);

    let (status, body) = post_json(
        &relay,
        "/api/currency",
        json!({ "from_currency": "USD", "to_currency": "EUR", "amount": 0 }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid parameters");

    let (status, body) = post_json(
        &relay,
        "/api/currency",
        json!({ "from_currency": "USD", "to_currency": "EUR", "amount": "100" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["converted_amount"], 85.0);

    let (status, body) = post_json(
        &relay,
        "/api/currency",
        json!({ "from_currency": null, "to_currency": "EUR", "amount": 10 }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid parameters");
}

#[tokio::test]
async fn expenses_endpoint() {
    let relay = spawn_relay(Config::default()).await;

    let (status, body) = post_json(
        &relay,
        "/api/expenses",
        json!({
            "flight_cost": 450,
            "accommodation_cost": 600,
            "daily_budget": 80,
            "trip_duration": 7
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_cost"], 1610.0);
    assert_eq!(body["average_daily_cost"], 230.0);

    let (status, body) =
        post_json(&relay, "/api/expenses", json!({ "trip_duration": 0 })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Trip duration must be greater than 0");

    let (status, body) = post_json(
        &relay,
        "/api/expenses",
        json!({ "flight_cost": "450", "daily_budget": 80, "trip_duration": 7.0 }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_cost"], 1010.0);

    let (status, _) =
        post_json(&relay, "/api/expenses", json!({ "trip_duration": null })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) =
        post_json(&relay, "/api/expenses", json!({ "trip_duration": "a week" })).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn expenses_overflow_is_a_server_error() {
    let relay = spawn_relay(Config::default()).await;

    let (status, body) = post_json(
        &relay,
        "/api/expenses",
        json!({ "flight_cost": 1e308, "accommodation_cost": 1e308, "trip_duration": 1 }),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Expense total is not a finite number");
}

#[tokio::test]
async fn places_endpoint() {
    let mut config = Config::default();
    config.tools.enabled = vec!["weather".to_string()];
    let relay = spawn_relay(config).await;

    let (status, body) = post_json(
        &relay,
        "/api/places",
        json!({ "query": "Museum", "location": "Rome" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["results"].as_array().unwrap().len(), 3);
    assert_eq!(body["results"][0]["name"], "Museum in Rome");

    let (status, _) = post_json(&relay, "/api/places", json!({ "query": "Museum" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn health_reports_healthy() {
    let relay = spawn_relay(Config::default()).await;
    let body: Value = reqwest::get(format!("{}/health", relay))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["status"], "healthy");
}
