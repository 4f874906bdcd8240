use axum::{extract::State, Json};
use std::sync::Arc;

use crate::{
    domain::tts::{TtsRequest, TtsResponse, TtsService, TtsServiceApi, VoicesResponse},
    error::AppResult,
};

pub struct TtsController {
    tts_service: Arc<TtsService>,
}

impl TtsController {
    pub fn new(tts_service: Arc<TtsService>) -> Self {
        Self { tts_service }
    }

    /// POST /tts - Convert text to speech
    pub async fn synthesize(
        State(controller): State<Arc<TtsController>>,
        Json(request): Json<TtsRequest>,
    ) -> AppResult<Json<TtsResponse>> {
        let outcome = controller.tts_service.synthesize(request).await?;

        Ok(Json(TtsResponse {
            success: true,
            message: "Speech generated successfully".to_string(),
            audio_id: outcome.audio_id,
            audio_url: format!("/audio/{}", outcome.audio_id),
            phonemes: outcome.phonemes,
            duration: outcome.duration_seconds,
        }))
    }

    /// GET /voices - Voices grouped by lang_code
    pub async fn list_voices(State(controller): State<Arc<TtsController>>) -> Json<VoicesResponse> {
        Json(VoicesResponse {
            voices: controller.tts_service.catalog().as_map().clone(),
        })
    }
}
