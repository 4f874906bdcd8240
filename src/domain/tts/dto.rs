use super::voices::DEFAULT_VOICE;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

fn default_voice() -> String {
    DEFAULT_VOICE.to_string()
}

fn default_speed() -> f64 {
    1.0
}

/// Request for POST /tts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TtsRequest {
    pub text: String,
    #[serde(default = "default_voice")]
    pub voice: String,
    #[serde(default = "default_speed")]
    pub speed: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lang_code: Option<String>,
    #[serde(default)]
    pub return_phonemes: bool,
}

/// Response for POST /tts
#[derive(Debug, Serialize, Deserialize)]
pub struct TtsResponse {
    pub success: bool,
    pub message: String,
    pub audio_id: Uuid,
    pub audio_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phonemes: Option<String>,
    pub duration: f64,
}

/// Response for GET /voices
#[derive(Debug, Serialize, Deserialize)]
pub struct VoicesResponse {
    pub voices: BTreeMap<String, Vec<String>>,
}
