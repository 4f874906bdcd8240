use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    Json,
};
use serde_json::{json, Value};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    domain::tts::{TtsService, TtsServiceApi},
    error::{AppError, AppResult},
};

pub struct AudioController {
    tts_service: Arc<TtsService>,
}

impl AudioController {
    pub fn new(tts_service: Arc<TtsService>) -> Self {
        Self { tts_service }
    }

    /// GET /audio/{audioId} - Download a synthesized WAV file
    pub async fn get_audio(
        State(controller): State<Arc<AudioController>>,
        Path(audio_id): Path<String>,
    ) -> AppResult<(StatusCode, HeaderMap, Body)> {
        let audio_id = parse_audio_id(&audio_id)?;
        let stored = controller.tts_service.get_audio(audio_id).await?;

        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("audio/wav"));
        let disposition = format!("attachment; filename=\"{}\"", stored.artifact.file_name());
        if let Ok(value) = HeaderValue::from_str(&disposition) {
            headers.insert(header::CONTENT_DISPOSITION, value);
        }

        Ok((StatusCode::OK, headers, Body::from(stored.bytes)))
    }

    /// DELETE /audio/{audioId} - Remove a synthesized file
    pub async fn delete_audio(
        State(controller): State<Arc<AudioController>>,
        Path(audio_id): Path<String>,
    ) -> AppResult<Json<Value>> {
        let audio_id = parse_audio_id(&audio_id)?;
        controller.tts_service.delete_audio(audio_id).await?;

        Ok(Json(json!({ "message": "Audio file deleted successfully" })))
    }
}

/// Ids that are not UUIDs cannot name an artifact
fn parse_audio_id(raw: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| AppError::NotFound("Audio file not found".to_string()))
}
