use super::synthesis_backend::{
    BackendError, BackendFactory, BackendInitError, ChunkStream, SynthesisBackend, SynthesisChunk,
};
use async_trait::async_trait;
use futures::{stream, StreamExt};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Serialize)]
struct LoadPipelineRequest<'a> {
    lang_code: &'a str,
    lexicon: HashMap<&'static str, &'static str>,
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    lang_code: &'a str,
    text: &'a str,
    voice: &'a str,
    speed: f32,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    segments: Vec<Segment>,
}

#[derive(Debug, Deserialize)]
struct Segment {
    #[serde(default)]
    graphemes: String,
    #[serde(default)]
    phonemes: String,
    audio: Vec<f32>,
}

/// Pronunciation fixes pushed into each pipeline's lexicon when it loads
fn lexicon_overrides(variant: &str) -> HashMap<&'static str, &'static str> {
    match variant {
        "a" => HashMap::from([("kokoro", "kˈOkəɹO")]),
        "b" => HashMap::from([("kokoro", "kˈQkəɹQ")]),
        _ => HashMap::new(),
    }
}

/// Creates pipelines on a Kokoro inference sidecar
pub struct KokoroBackendFactory {
    client: reqwest::Client,
    base_url: String,
}

impl KokoroBackendFactory {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl BackendFactory for KokoroBackendFactory {
    async fn create(&self, variant: &str) -> Result<Arc<dyn SynthesisBackend>, BackendInitError> {
        let init_error = |reason: String| BackendInitError {
            variant: variant.to_string(),
            reason,
        };

        tracing::info!(
            lang_code = variant,
            base_url = %self.base_url,
            "Loading Kokoro pipeline"
        );

        let response = self
            .client
            .post(format!("{}/v1/pipelines", self.base_url))
            .json(&LoadPipelineRequest {
                lang_code: variant,
                lexicon: lexicon_overrides(variant),
            })
            .send()
            .await
            .map_err(|e| init_error(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(init_error(format!("sidecar returned {}: {}", status.as_u16(), body)));
        }

        Ok(Arc::new(KokoroBackend {
            client: self.client.clone(),
            base_url: self.base_url.clone(),
            variant: variant.to_string(),
        }))
    }
}

/// Pipeline for one language variant, hosted by the sidecar
pub struct KokoroBackend {
    client: reqwest::Client,
    base_url: String,
    variant: String,
}

impl KokoroBackend {
    async fn fetch_segments(
        &self,
        text: &str,
        voice: &str,
        speed: f64,
    ) -> Result<Vec<Segment>, BackendError> {
        let response = self
            .client
            .post(format!("{}/v1/generate", self.base_url))
            .json(&GenerateRequest {
                lang_code: &self.variant,
                text,
                voice,
                // the sidecar takes single precision
                speed: speed as f32,
            })
            .send()
            .await
            .map_err(|e| BackendError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BackendError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let payload: GenerateResponse = response
            .json()
            .await
            .map_err(|e| BackendError::Malformed(e.to_string()))?;

        Ok(payload.segments)
    }
}

impl SynthesisBackend for KokoroBackend {
    fn variant(&self) -> &str {
        &self.variant
    }

    fn generate<'a>(&'a self, text: &'a str, voice: &'a str, speed: f64) -> ChunkStream<'a> {
        stream::once(self.fetch_segments(text, voice, speed))
            .map(|result| match result {
                Ok(segments) => stream::iter(segments.into_iter().map(|segment| {
                    Ok::<_, BackendError>(SynthesisChunk {
                        graphemes: segment.graphemes,
                        phonemes: segment.phonemes,
                        audio: segment.audio,
                    })
                }))
                .left_stream(),
                Err(e) => stream::iter(std::iter::once(Err(e))).right_stream(),
            })
            .flatten()
            .boxed()
    }
}
