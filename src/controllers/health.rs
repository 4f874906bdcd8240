use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use std::sync::Arc;

use crate::domain::tts::TtsService;

/// GET / - Service banner
pub async fn root() -> impl IntoResponse {
    Json(json!({
        "message": "Kokoro TTS API is running",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "tts": "/tts",
            "voices": "/voices",
            "audio": "/audio/{id}",
            "health": "/health"
        }
    }))
}

/// GET /health - Liveness plus the pipelines loaded so far
pub async fn health(State(tts_service): State<Arc<TtsService>>) -> impl IntoResponse {
    let pipelines = tts_service.registry().loaded_variants().await;
    let artifacts = tts_service.artifact_count().await;

    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "pipelines_loaded": pipelines,
            "artifacts": artifacts
        })),
    )
}
