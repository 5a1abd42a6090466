//! HTTP API for the AI Automation Builder
//!
//! JSON endpoints consumed by the web UI: health, entity listing, entity
//! test, automation generation and automation save. Remote Home Assistant
//! failures are presented fail-soft: a missing token or a connection error
//! degrades to an empty/error payload with HTTP 200 so the UI keeps
//! working, while non-success answers from Home Assistant keep their
//! upstream status.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use ab_automation::Automation;
use ab_generate::GenerationSelector;
use ab_ha_client::{EntityState, HaClient, HaClientError};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Generation entry point
    pub selector: Arc<GenerationSelector>,
    /// Home Assistant gateway; `None` means no token (demo mode)
    pub ha: Option<Arc<HaClient>>,
}

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/health", get(health))
        .route("/api/entities", get(get_entities))
        .route("/api/entity/test", post(test_entity))
        .route("/api/generate", post(generate))
        .route("/api/save", post(save))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Start the API server
pub async fn start_server(state: AppState, addr: &str) -> std::io::Result<()> {
    let router = create_router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("API server listening on {}", addr);
    axum::serve(listener, router).await
}

// ==================== Responses ====================

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    service: &'static str,
    ha_connected: bool,
    llm_enabled: bool,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
        .into_response()
}

/// One entity as presented to the UI
#[derive(Serialize)]
struct EntityEntry {
    entity_id: String,
    name: String,
    state: String,
    attributes: HashMap<String, serde_json::Value>,
}

impl From<&EntityState> for EntityEntry {
    fn from(entity: &EntityState) -> Self {
        Self {
            entity_id: entity.entity_id.clone(),
            name: entity.friendly_name().to_string(),
            state: entity.state.clone(),
            attributes: entity.attributes.clone(),
        }
    }
}

#[derive(Serialize, Default)]
struct EntitiesResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    entities: Vec<EntityState>,
    domains: HashMap<String, Vec<EntityEntry>>,
}

impl EntitiesResponse {
    fn error(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ..Self::default()
        }
    }
}

#[derive(Serialize)]
struct ActionOutcome {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl ActionOutcome {
    fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            error: None,
        }
    }

    fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            message: None,
            error: Some(error.into()),
        }
    }
}

// ==================== Handlers ====================

/// GET /api/health
async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "AI Automation Builder",
        ha_connected: state.ha.is_some(),
        llm_enabled: state.selector.llm_enabled(),
    })
}

/// GET /api/entities - entity states grouped by domain
async fn get_entities(State(state): State<AppState>) -> Response {
    let Some(ha) = &state.ha else {
        // fail-soft: empty result with OK status so the UI stays usable
        return Json(EntitiesResponse::error(
            "Home Assistant token not available",
        ))
        .into_response();
    };

    match ha.states().await {
        Ok(entities) => {
            let mut domains: HashMap<String, Vec<EntityEntry>> = HashMap::new();
            for entity in &entities {
                domains
                    .entry(entity.domain().to_string())
                    .or_default()
                    .push(EntityEntry::from(entity));
            }
            info!(
                entities = entities.len(),
                domains = domains.len(),
                "fetched entity states"
            );
            Json(EntitiesResponse {
                error: None,
                entities,
                domains,
            })
            .into_response()
        }
        Err(HaClientError::Status { status, body }) => (
            StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY),
            Json(EntitiesResponse::error(format!(
                "Failed to fetch entities: {body}"
            ))),
        )
            .into_response(),
        Err(error) => {
            warn!(%error, "could not reach Home Assistant");
            Json(EntitiesResponse::error(format!("Connection error: {error}"))).into_response()
        }
    }
}

#[derive(Deserialize)]
struct TestEntityRequest {
    entity_id: Option<String>,
    #[serde(default = "default_action")]
    action: String,
}

fn default_action() -> String {
    "toggle".to_string()
}

/// POST /api/entity/test - invoke a service against one entity
async fn test_entity(
    State(state): State<AppState>,
    Json(request): Json<TestEntityRequest>,
) -> Response {
    let Some(entity_id) = request.entity_id.filter(|id| !id.is_empty()) else {
        return error_response(StatusCode::BAD_REQUEST, "No entity_id provided");
    };

    let Some(ha) = &state.ha else {
        return Json(ActionOutcome::failed("Home Assistant token not available")).into_response();
    };

    let domain = entity_id.split('.').next().unwrap_or("");
    match ha.call_service(domain, &request.action, &entity_id).await {
        Ok(()) => Json(ActionOutcome::ok(format!(
            "Successfully tested {entity_id} with {}",
            request.action
        )))
        .into_response(),
        Err(HaClientError::Status { status, body }) => (
            StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY),
            Json(ActionOutcome::failed(format!(
                "Failed to test entity: {body}"
            ))),
        )
            .into_response(),
        Err(error) => {
            warn!(%error, %entity_id, "entity test failed");
            Json(ActionOutcome::failed(format!("Connection error: {error}"))).into_response()
        }
    }
}

#[derive(Deserialize)]
struct GenerateRequest {
    #[serde(default)]
    description: String,
}

#[derive(Serialize)]
struct GenerateResponse {
    automation: Automation,
    yaml: String,
}

/// POST /api/generate - natural language description to automation
async fn generate(
    State(state): State<AppState>,
    Json(request): Json<GenerateRequest>,
) -> Response {
    if request.description.is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "No description provided");
    }

    info!(description = %request.description, "generating automation");
    let automation = state.selector.generate(&request.description);

    match automation.to_yaml() {
        Ok(yaml) => Json(GenerateResponse { automation, yaml }).into_response(),
        Err(error) => error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to render automation: {error}"),
        ),
    }
}

#[derive(Deserialize)]
struct SaveRequest {
    automation: Option<Automation>,
}

#[derive(Serialize)]
struct SaveResponse {
    success: bool,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    filename: Option<String>,
}

/// POST /api/save - persist an automation to Home Assistant
async fn save(State(state): State<AppState>, Json(request): Json<SaveRequest>) -> Response {
    let Some(automation) = request.automation else {
        return error_response(StatusCode::BAD_REQUEST, "No automation data provided");
    };

    let Some(ha) = &state.ha else {
        return Json(SaveResponse {
            success: true,
            message: "Automation created successfully (demo mode - no HA token provided)"
                .to_string(),
            filename: None,
        })
        .into_response();
    };

    match ha.save_automation(&automation).await {
        Ok(filename) => Json(SaveResponse {
            success: true,
            message: format!("Automation saved successfully to {filename}"),
            filename: Some(filename),
        })
        .into_response(),
        Err(HaClientError::Status { status, body }) => (
            StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY),
            Json(SaveResponse {
                success: false,
                message: format!("Error saving to Home Assistant: {body}"),
                filename: None,
            }),
        )
            .into_response(),
        Err(error) => {
            warn!(%error, "automation save failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(SaveResponse {
                    success: false,
                    message: format!("Connection error: {error}"),
                    filename: None,
                }),
            )
                .into_response()
        }
    }
}
