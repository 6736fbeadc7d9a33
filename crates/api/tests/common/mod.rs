#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use planetsync_api::config::ServerConfig;
use planetsync_api::router::build_app_router;
use planetsync_api::state::AppState;
use planetsync_db::store::PgPlanetStore;
use planetsync_graphql::{GraphqlConfig, StarWarsPlanets};
use planetsync_sync::PlanetSyncEngine;
use serde_json::json;
use sqlx::PgPool;
use tower::ServiceExt;
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Build a test `ServerConfig` pointing the GraphQL client at `graphql_endpoint`.
pub fn test_config(graphql_endpoint: &str) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        graphql: GraphqlConfig {
            endpoint: graphql_endpoint.to_string(),
            timeout_secs: 5,
        },
    }
}

/// Build the full application router (same middleware stack as `main.rs`).
///
/// Returns the router together with its state so a test can send several
/// requests through one engine.
pub fn build_test_app_with_upstream(pool: PgPool, graphql_endpoint: &str) -> (Router, AppState) {
    build_test_app_with_config(pool, test_config(graphql_endpoint))
}

/// Build the full application router from an explicit config.
pub fn build_test_app_with_config(pool: PgPool, config: ServerConfig) -> (Router, AppState) {
    let source = StarWarsPlanets::from_config(&config.graphql).unwrap();
    let engine = PlanetSyncEngine::new(source, PgPlanetStore::new(pool.clone()));

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        sync: Arc::new(engine),
    };

    (build_app_router(state.clone(), &config), state)
}

/// Build the app with an upstream that is never called.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with_upstream(pool, "http://127.0.0.1:9/graphql").0
}

/// Start a mock GraphQL endpoint serving `planets` under `allPlanets`.
pub async fn mock_planets_upstream(planets: serde_json::Value) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"data": {"allPlanets": {"planets": planets}}})),
        )
        .mount(&server)
        .await;
    server
}

pub fn graphql_endpoint(server: &MockServer) -> String {
    format!("{}/graphql", server.uri())
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(app: Router, method: Method, uri: &str, body: Option<serde_json::Value>) -> Response {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, Method::GET, uri, None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn post_empty(app: Router, uri: &str) -> Response {
    send(app, Method::POST, uri, None).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, Method::PUT, uri, Some(body)).await
}

pub async fn delete(app: Router, uri: &str) -> Response {
    send(app, Method::DELETE, uri, None).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
