//! HTTP endpoints
//!
//! REST surface for the catalog tools.

use axum::{
    extract::{Path, State},
    http::{HeaderValue, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use shop_agent_tools::{ToolError, ToolExecutor};

use crate::state::AppState;

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    let cors_layer = build_cors_layer(
        &state.config.server.cors_origins,
        state.config.server.cors_enabled,
    );

    Router::new()
        // Tool endpoints
        .route("/api/tools", get(list_tools))
        .route("/api/tools/:name", post(call_tool))
        // Rendered phone-ID reference for prompt construction
        .route("/api/reference", get(get_reference))
        // Health checks
        .route("/health", get(health_check))
        .route("/ready", get(readiness_check))
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer)
        .with_state(state)
}

/// Build the CORS layer from configured origins.
///
/// Disabled CORS means a permissive layer (development only); no
/// configured origins defaults to localhost:3000.
fn build_cors_layer(origins: &[String], enabled: bool) -> CorsLayer {
    if !enabled {
        tracing::warn!("CORS is disabled - allowing all origins (NOT FOR PRODUCTION)");
        return CorsLayer::permissive();
    }

    let parsed_origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| {
            origin.parse::<HeaderValue>().ok().or_else(|| {
                tracing::warn!("Invalid CORS origin: {}", origin);
                None
            })
        })
        .collect();

    if parsed_origins.is_empty() {
        tracing::info!("No CORS origins configured, defaulting to localhost:3000");
        return CorsLayer::new()
            .allow_origin("http://localhost:3000".parse::<HeaderValue>().unwrap())
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers(Any);
    }

    tracing::info!("CORS configured with {} origins", parsed_origins.len());
    CorsLayer::new()
        .allow_origin(parsed_origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
}

/// List registered tool schemas
async fn list_tools(State(state): State<AppState>) -> Json<Value> {
    Json(json!({ "tools": state.registry.schemas() }))
}

#[derive(Debug, Default, Deserialize)]
struct CallToolRequest {
    #[serde(default)]
    arguments: Value,
}

/// Invoke a tool by name
async fn call_tool(
    State(state): State<AppState>,
    Path(name): Path<String>,
    payload: Option<Json<CallToolRequest>>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let arguments = payload.map(|Json(p)| p.arguments).unwrap_or(Value::Null);

    match state.registry.execute(&name, arguments).await {
        Ok(output) => {
            let body = output
                .first_json()
                .cloned()
                .unwrap_or_else(|| serde_json::to_value(&output).unwrap_or(Value::Null));
            Ok(Json(body))
        }
        Err(err) => Err(tool_error_response(err)),
    }
}

fn tool_error_response(err: ToolError) -> (StatusCode, Json<Value>) {
    let status = match err {
        ToolError::UnknownTool(_) => StatusCode::NOT_FOUND,
        ToolError::InvalidArguments(_) => StatusCode::BAD_REQUEST,
        ToolError::Store(_) => StatusCode::BAD_GATEWAY,
        ToolError::ExecutionFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(json!({ "error": err.to_string() })))
}

/// Rendered phone-ID reference text
async fn get_reference(State(state): State<AppState>) -> Json<Value> {
    Json(json!({ "reference": state.reference.get().await }))
}

async fn health_check() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

async fn readiness_check(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    if state.registry.is_empty() {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "status": "no tools registered" })),
        )
    } else {
        (
            StatusCode::OK,
            Json(json!({ "status": "ready", "tools": state.registry.len() })),
        )
    }
}
