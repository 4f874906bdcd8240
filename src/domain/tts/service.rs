use super::dto::TtsRequest;
use super::error::TtsServiceError;
use super::registry::BackendRegistry;
use super::validation::{validate, ValidatedRequest};
use super::voices::VoiceCatalog;
use crate::domain::artifact::{ExpirySweeper, StoredAudio};
use crate::infrastructure::repositories::ArtifactRepository;
use async_trait::async_trait;
use futures::StreamExt;
use std::sync::Arc;
use std::time::Instant;
use uuid::Uuid;

pub const DEFAULT_SAMPLE_RATE: u32 = 24000;
pub const PHONEME_SEPARATOR: &str = " | ";

/// Fully assembled backend output for one request
#[derive(Debug, Clone, PartialEq)]
pub struct SynthesisResult {
    pub audio: Vec<f32>,
    pub phonemes: Option<String>,
    pub duration_seconds: f64,
}

/// What a caller gets back once the audio is stored
#[derive(Debug, Clone)]
pub struct TtsSynthesisOutcome {
    pub audio_id: Uuid,
    pub phonemes: Option<String>,
    pub duration_seconds: f64,
}

pub struct TtsService {
    catalog: VoiceCatalog,
    registry: Arc<BackendRegistry>,
    artifacts: Arc<ArtifactRepository>,
    sweeper: Arc<ExpirySweeper>,
    sample_rate: u32,
}

impl TtsService {
    pub fn new(
        catalog: VoiceCatalog,
        registry: Arc<BackendRegistry>,
        artifacts: Arc<ArtifactRepository>,
        sweeper: Arc<ExpirySweeper>,
        sample_rate: u32,
    ) -> Self {
        Self {
            catalog,
            registry,
            artifacts,
            sweeper,
            sample_rate,
        }
    }

    pub fn catalog(&self) -> &VoiceCatalog {
        &self.catalog
    }

    pub fn registry(&self) -> &BackendRegistry {
        &self.registry
    }

    pub async fn artifact_count(&self) -> usize {
        self.artifacts.len().await
    }
}

#[async_trait]
pub trait TtsServiceApi: Send + Sync {
    /// Validate, synthesize and store a request
    ///
    /// This operation:
    /// - Rejects invalid input before touching any backend
    /// - Drives the variant's backend to completion and assembles the audio
    /// - Stores the audio as a WAV artifact and kicks off an expiry sweep
    async fn synthesize(&self, request: TtsRequest) -> Result<TtsSynthesisOutcome, TtsServiceError>;

    /// Run the backend for an already validated request
    async fn render(&self, request: &ValidatedRequest) -> Result<SynthesisResult, TtsServiceError>;

    async fn get_audio(&self, audio_id: Uuid) -> Result<StoredAudio, TtsServiceError>;

    async fn delete_audio(&self, audio_id: Uuid) -> Result<(), TtsServiceError>;
}

#[async_trait]
impl TtsServiceApi for TtsService {
    async fn synthesize(&self, request: TtsRequest) -> Result<TtsSynthesisOutcome, TtsServiceError> {
        // 1. Validate input
        let request = validate(request, &self.catalog)?;
        let started = Instant::now();

        // 2. Run the backend
        let result = self.render(&request).await?;

        // 3. Persist audio
        let audio_id = self.artifacts.save(&result.audio, self.sample_rate).await?;

        // 4. Reclaim old artifacts in the background
        self.sweeper.trigger();

        tracing::info!(
            audio_id = %audio_id,
            lang_code = %request.variant,
            voice = %request.voice,
            text_length = request.text.chars().count(),
            duration_seconds = result.duration_seconds,
            generation_seconds = started.elapsed().as_secs_f64(),
            "Generated speech"
        );

        Ok(TtsSynthesisOutcome {
            audio_id,
            phonemes: result.phonemes,
            duration_seconds: result.duration_seconds,
        })
    }

    async fn render(&self, request: &ValidatedRequest) -> Result<SynthesisResult, TtsServiceError> {
        let backend = self.registry.get_or_create(&request.variant).await?;

        let mut chunks = backend.generate(&request.text, &request.voice, request.speed);
        let mut audio: Vec<f32> = Vec::new();
        let mut phonemes: Vec<String> = Vec::new();

        while let Some(chunk) = chunks.next().await {
            let chunk = chunk.map_err(|e| {
                tracing::error!(lang_code = %request.variant, error = %e, "Backend failed mid-synthesis");
                TtsServiceError::Synthesis(e.to_string())
            })?;

            audio.extend_from_slice(&chunk.audio);
            if request.want_phonemes {
                phonemes.push(chunk.phonemes);
            }
        }

        if audio.is_empty() {
            return Err(TtsServiceError::Synthesis("no audio produced".to_string()));
        }

        let phonemes = if request.want_phonemes && !phonemes.is_empty() {
            Some(phonemes.join(PHONEME_SEPARATOR))
        } else {
            None
        };

        Ok(SynthesisResult {
            duration_seconds: audio.len() as f64 / self.sample_rate as f64,
            audio,
            phonemes,
        })
    }

    async fn get_audio(&self, audio_id: Uuid) -> Result<StoredAudio, TtsServiceError> {
        Ok(self.artifacts.get(audio_id).await?)
    }

    async fn delete_audio(&self, audio_id: Uuid) -> Result<(), TtsServiceError> {
        self.artifacts.delete(audio_id).await?;
        tracing::info!(audio_id = %audio_id, "Audio file deleted");
        Ok(())
    }
}
