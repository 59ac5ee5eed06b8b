//! HTTP API for the kafkapulse dashboard.
//!
//! Serves the live metric window published by the feed task, the static
//! cluster metadata, and the AI analysis and chat operations. Handlers only
//! read the window; every request sees one whole snapshot.

use std::sync::Arc;

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use kafkapulse_assistant::Assistant;
use kafkapulse_core::{
    ChatMessage, ClusterInfo, ConnectionTrend, DashboardSnapshot, MetricRecord, MetricWindow,
};

/// Shared server state.
pub struct AppState {
    window: watch::Receiver<Arc<MetricWindow>>,
    cluster: ClusterInfo,
    assistant: Assistant,
}

impl AppState {
    pub fn new(
        window: watch::Receiver<Arc<MetricWindow>>,
        cluster: ClusterInfo,
        assistant: Assistant,
    ) -> Self {
        AppState {
            window,
            cluster,
            assistant,
        }
    }

    /// The window as of now. Never hold a `watch::Ref` across an await.
    fn current(&self) -> Arc<MetricWindow> {
        Arc::clone(&self.window.borrow())
    }
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
    generation: u64,
    records: usize,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LatestResponse {
    generation: u64,
    record: MetricRecord,
    trend: ConnectionTrend,
    /// Trend rounded to one decimal.
    trend_display: f64,
}

#[derive(Serialize)]
struct AnalysisResponse {
    generation: u64,
    model: String,
    summary: String,
}

#[derive(Deserialize)]
struct ChatRequest {
    #[serde(default)]
    history: Vec<ChatMessage>,
}

#[derive(Serialize)]
struct ChatResponse {
    reply: String,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

fn error(status: StatusCode, message: impl Into<String>) -> (StatusCode, Json<ErrorResponse>) {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
}

async fn handle_health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let window = state.current();
    Json(HealthResponse {
        status: "ok",
        version: kafkapulse_core::VERSION,
        generation: window.generation(),
        records: window.len(),
    })
}

async fn handle_cluster(State(state): State<Arc<AppState>>) -> Json<ClusterInfo> {
    Json(state.cluster.clone())
}

async fn handle_metrics(State(state): State<Arc<AppState>>) -> Json<DashboardSnapshot> {
    Json(DashboardSnapshot::capture(&state.cluster, &state.current()))
}

async fn handle_latest(
    State(state): State<Arc<AppState>>,
) -> Result<Json<LatestResponse>, (StatusCode, Json<ErrorResponse>)> {
    let window = state.current();
    let record = window
        .latest()
        .cloned()
        .ok_or_else(|| error(StatusCode::NOT_FOUND, "no metrics recorded yet"))?;
    let trend = window.trend();
    Ok(Json(LatestResponse {
        generation: window.generation(),
        record,
        trend,
        trend_display: trend.display_percent(),
    }))
}

async fn handle_analysis(State(state): State<Arc<AppState>>) -> Json<AnalysisResponse> {
    let window = state.current();
    let summary = state.assistant.summarize(&window).await;
    Json(AnalysisResponse {
        generation: window.generation(),
        model: state.assistant.model().to_string(),
        summary,
    })
}

async fn handle_chat(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, (StatusCode, Json<ErrorResponse>)> {
    if request.history.is_empty() {
        return Err(error(
            StatusCode::BAD_REQUEST,
            "history must contain at least one message",
        ));
    }
    let window = state.current();
    let reply = state.assistant.chat(&request.history, window.latest()).await;
    Ok(Json(ChatResponse { reply }))
}

async fn handle_index(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "name": "KafkaPulse Server",
        "version": kafkapulse_core::VERSION,
        "cluster": state.cluster.label(),
        "model": state.assistant.model(),
        "endpoints": {
            "/": "This API index",
            "/health": "Health check with current tick",
            "/cluster": "Cluster metadata",
            "/metrics": "Current metric window with trend",
            "/metrics/latest": "Newest record with trend vs previous",
            "/analysis": {
                "method": "POST",
                "description": "AI summary of the current window",
            },
            "/chat": {
                "method": "POST",
                "description": "Ask the assistant about the metrics",
                "body": "{\"history\": [{\"role\": \"user\", \"content\": \"...\"}]}",
            },
        },
    }))
}

/// Build the axum router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handle_index))
        .route("/health", get(handle_health))
        .route("/cluster", get(handle_cluster))
        .route("/metrics", get(handle_metrics))
        .route("/metrics/latest", get(handle_latest))
        .route("/analysis", post(handle_analysis))
        .route("/chat", post(handle_chat))
        .with_state(Arc::new(state))
}

/// Run the HTTP API until the process is stopped.
pub async fn run_server(state: AppState, host: &str, port: u16) -> std::io::Result<()> {
    let app = build_router(state);
    let addr = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    log::info!("listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await
}
