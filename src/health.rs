//! HTTP liveness endpoint for hosting platforms which probe a port

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RootStatus {
    pub status: String,
    pub message: String,
    pub uptime_secs: u64,
    pub timestamp: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub service: String,
    pub bot_username: Option<String>,
}

/// Shared state for the liveness routes
#[derive(Clone)]
pub struct AppState {
    pub start_time: Instant,
    pub bot_username: Arc<RwLock<Option<String>>>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            bot_username: Arc::new(RwLock::new(None)),
        }
    }

    pub async fn set_bot_username(&self, username: String) {
        *self.bot_username.write().await = Some(username);
    }
}

async fn root_handler(State(state): State<AppState>) -> Json<RootStatus> {
    Json(RootStatus {
        status: "online".to_owned(),
        message: "Discord Bot is running!".to_owned(),
        uptime_secs: state.start_time.elapsed().as_secs(),
        timestamp: serenity::model::Timestamp::now().to_string(),
    })
}

async fn ping_handler() -> &'static str {
    "pong"
}

async fn health_handler(State(state): State<AppState>) -> (StatusCode, Json<HealthStatus>) {
    let bot_username = state.bot_username.read().await.clone();
    (
        StatusCode::OK,
        Json(HealthStatus {
            status: "healthy".to_owned(),
            service: env!("CARGO_PKG_NAME").to_owned(),
            bot_username,
        }),
    )
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/ping", get(ping_handler))
        .route("/health", get(health_handler))
        .with_state(state)
}

/// Serve the liveness routes.  Failing to bind is logged but leaves the bot running.
pub async fn serve(state: AppState, port: u16) {
    let addr = format!("0.0.0.0:{}", port);
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!("Could not bind health server to {}: {}", addr, err);
            return;
        }
    };

    tracing::info!("Health check server listening on {}", addr);
    if let Err(err) = axum::serve(listener, router(state)).await {
        tracing::error!("Health server stopped: {}", err);
    }
}
