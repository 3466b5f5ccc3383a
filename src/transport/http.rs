//! HTTP transport: a minimal axum router exposing `GET /health` and a
//! single tool-dispatch endpoint (§6).

use std::sync::Arc;

use anyhow::Result;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use serde_json::Value;
use tracing::{error, info};

use crate::gateway::GatewayContext;

#[derive(Clone)]
struct HttpState {
    ctx: Arc<GatewayContext>,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: String,
    server: String,
}

fn build_router(state: HttpState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/tools/{name}", post(tool_handler))
        .with_state(state)
}

async fn health_handler(State(state): State<HttpState>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        version: state.ctx.settings.server_version.clone(),
        server: state.ctx.settings.server_name.clone(),
    })
}

async fn tool_handler(
    State(state): State<HttpState>,
    Path(name): Path<String>,
    Json(params): Json<Value>,
) -> impl IntoResponse {
    let body = crate::tools::dispatch(&state.ctx, &name, params).await;
    ([(axum::http::header::CONTENT_TYPE, "application/json")], body)
}

/// Runs the HTTP transport until the listener is closed or bind fails.
pub async fn serve(ctx: Arc<GatewayContext>, host: &str, port: u16) -> Result<()> {
    let state = HttpState { ctx };
    let app = build_router(state);
    let addr = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("HTTP transport listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| {
            error!("HTTP transport error: {e}");
            anyhow::anyhow!(e)
        })
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
