//! Health check endpoint

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::db::StudentRepo;
use crate::http::server::AppState;

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    /// Stored student count; absent when the store cannot be read
    #[serde(skip_serializing_if = "Option::is_none")]
    pub students: Option<i64>,
}

/// GET /health
async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let students = match StudentRepo::new(&state.db).count().await {
        Ok(count) => Some(count),
        Err(e) => {
            tracing::warn!(error = %e, "health check could not read student store");
            None
        }
    };

    Json(HealthResponse {
        status: if students.is_some() { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        students,
    })
}

/// Health routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/health", get(health))
}
