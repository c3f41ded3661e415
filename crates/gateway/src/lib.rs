//! HTTP API gateway for Capstan.
//!
//! Exposes the capability listings (resources, tools, prompts), direct
//! tool invocation and prompt rendering, and the composite chat
//! endpoint. Built on Axum.
//!
//! Status mapping is uniform: unknown names are 404, invalid inputs are
//! 400 with the full violation list, backend failures are 502. A tool
//! call that validates but fails during execution is 200 with a failure
//! outcome in the body — execution failures are data, not transport
//! errors.

pub mod frontend;

use axum::extract::DefaultBodyLimit;
use axum::{
    Router,
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::{info, info_span, warn, Instrument};

use capstan_broker::ChatOrchestrator;
use capstan_core::chat::{ChatRequest, ChatResponse, ToolCallResult};
use capstan_core::error::{PromptError, ToolError};
use capstan_core::prompt::PromptDefinition;
use capstan_core::resource::Resource;
use capstan_core::tool::ToolSpec;
use capstan_registry::{CapabilityRegistry, PromptRenderer, ToolInvoker};

/// Shared application state for the gateway.
pub struct GatewayState {
    pub registry: Arc<CapabilityRegistry>,
    pub invoker: ToolInvoker,
    pub renderer: PromptRenderer,
    pub orchestrator: ChatOrchestrator,
}

impl GatewayState {
    pub fn new(
        registry: Arc<CapabilityRegistry>,
        backend: Arc<dyn capstan_core::backend::ModelBackend>,
    ) -> Self {
        Self {
            invoker: ToolInvoker::new(registry.clone()),
            renderer: PromptRenderer::new(registry.clone()),
            orchestrator: ChatOrchestrator::new(registry.clone(), backend),
            registry,
        }
    }
}

type SharedState = Arc<GatewayState>;

/// Build the Axum router with all gateway routes.
///
/// Layers applied:
/// - CORS (permissive — the bundled frontend may be served elsewhere)
/// - Request body size limit (1 MB)
/// - HTTP trace logging
pub fn build_router(state: SharedState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/mcp/resources", get(list_resources_handler))
        .route("/mcp/resources/{id}", get(get_resource_handler))
        .route("/mcp/tools", get(list_tools_handler))
        .route("/mcp/tools/invoke", post(invoke_tool_handler))
        .route("/mcp/prompts", get(list_prompts_handler))
        .route("/mcp/prompts/render", post(render_prompt_handler))
        .route("/mcp/chat", post(chat_handler))
        .with_state(state)
        .merge(frontend::frontend_router())
        .layer(DefaultBodyLimit::max(1024 * 1024))
        .layer(CorsLayer::permissive())
        .layer(tower_http::trace::TraceLayer::new_for_http())
}

/// Start the gateway HTTP server with the built-in demo capability set.
pub async fn start(config: capstan_config::AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let addr = format!("{}:{}", config.gateway.host, config.gateway.port);

    let registry = Arc::new(capstan_registry::demo_registry());
    let backend = capstan_providers::build_from_config(&config);
    let state = Arc::new(GatewayState::new(registry, backend));

    let app = build_router(state);

    info!(addr = %addr, "Gateway starting");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// --- Request / Response types ---

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

#[derive(Serialize)]
struct ResourceListResponse {
    resources: Vec<ResourceSummaryDto>,
    count: usize,
}

/// Listing form of a resource — everything except the payload.
#[derive(Serialize)]
struct ResourceSummaryDto {
    id: String,
    title: String,
    description: String,
    uri: String,
    mime_type: String,
    tags: Vec<String>,
}

#[derive(Serialize)]
struct ToolListResponse {
    tools: Vec<ToolSpec>,
    count: usize,
}

#[derive(Deserialize)]
struct InvokeToolRequest {
    tool_name: String,
    #[serde(default)]
    arguments: serde_json::Map<String, serde_json::Value>,
}

#[derive(Serialize)]
struct PromptListResponse {
    prompts: Vec<PromptDefinition>,
    count: usize,
}

#[derive(Deserialize)]
struct RenderPromptRequest {
    prompt_name: String,
    #[serde(default)]
    inputs: serde_json::Map<String, serde_json::Value>,
}

#[derive(Serialize)]
struct RenderPromptResponse {
    prompt_name: String,
    text: String,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    details: Vec<String>,
}

impl ErrorResponse {
    fn message(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: Vec::new(),
        }
    }
}

// --- Handlers ---

async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

async fn list_resources_handler(State(state): State<SharedState>) -> Json<ResourceListResponse> {
    let resources: Vec<ResourceSummaryDto> = state
        .registry
        .iter_resources()
        .map(|r| ResourceSummaryDto {
            id: r.id.clone(),
            title: r.title.clone(),
            description: r.description.clone(),
            uri: r.uri.clone(),
            mime_type: r.mime_type.clone(),
            tags: r.tags.clone(),
        })
        .collect();
    let count = resources.len();
    Json(ResourceListResponse { resources, count })
}

async fn get_resource_handler(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<Resource>, (StatusCode, Json<ErrorResponse>)> {
    state.registry.resource(&id).cloned().map(Json).ok_or_else(|| {
        (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::message(format!("Unknown resource: '{id}'"))),
        )
    })
}

async fn list_tools_handler(State(state): State<SharedState>) -> Json<ToolListResponse> {
    let tools = state.registry.tool_specs();
    let count = tools.len();
    Json(ToolListResponse { tools, count })
}

async fn invoke_tool_handler(
    State(state): State<SharedState>,
    Json(payload): Json<InvokeToolRequest>,
) -> Result<Json<ToolCallResult>, (StatusCode, Json<ErrorResponse>)> {
    info!(tool = %payload.tool_name, "Tool invocation request");

    match state.invoker.invoke(&payload.tool_name, &payload.arguments).await {
        Ok(value) => Ok(Json(ToolCallResult::success(&payload.tool_name, value))),
        Err(ToolError::Unknown(name)) => Err((
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::message(format!("Unknown tool: '{name}'"))),
        )),
        Err(ToolError::InvalidArguments { tool_name, violations }) => Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: format!("Invalid arguments for tool '{tool_name}'"),
                details: violations,
            }),
        )),
        // A handler fault is a recorded outcome, not a transport error.
        Err(e @ ToolError::Execution { .. }) => {
            warn!(tool = %payload.tool_name, error = %e, "Tool execution failed");
            Ok(Json(ToolCallResult::failure(&payload.tool_name, e.to_string())))
        }
    }
}

async fn list_prompts_handler(State(state): State<SharedState>) -> Json<PromptListResponse> {
    let prompts: Vec<PromptDefinition> = state.registry.iter_prompts().cloned().collect();
    let count = prompts.len();
    Json(PromptListResponse { prompts, count })
}

async fn render_prompt_handler(
    State(state): State<SharedState>,
    Json(payload): Json<RenderPromptRequest>,
) -> Result<Json<RenderPromptResponse>, (StatusCode, Json<ErrorResponse>)> {
    match state.renderer.render(&payload.prompt_name, &payload.inputs) {
        Ok(text) => Ok(Json(RenderPromptResponse {
            prompt_name: payload.prompt_name,
            text,
        })),
        Err(PromptError::Unknown(name)) => Err((
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::message(format!("Unknown prompt: '{name}'"))),
        )),
        Err(PromptError::MissingInputs { prompt_name, missing }) => Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: format!("Missing required inputs for prompt '{prompt_name}'"),
                details: missing,
            }),
        )),
    }
}

async fn chat_handler(
    State(state): State<SharedState>,
    Json(payload): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, (StatusCode, Json<ErrorResponse>)> {
    let request_id = uuid::Uuid::new_v4();
    let span = info_span!("chat", %request_id);

    async {
        info!(
            resources = payload.context_resources.len(),
            tools = payload.tool_calls.len(),
            prompt = payload.prompt_name.as_deref().unwrap_or("-"),
            "Chat request"
        );

        match state.orchestrator.chat(&payload).await {
            Ok(response) => Ok(Json(response)),
            Err(e) => {
                tracing::error!(error = %e, "Provider call failed");
                Err((
                    StatusCode::BAD_GATEWAY,
                    Json(ErrorResponse::message(e.to_string())),
                ))
            }
        }
    }
    .instrument(span)
    .await
}
