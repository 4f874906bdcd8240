use async_trait::async_trait;
use futures::stream::BoxStream;
use std::sync::Arc;

/// One segment emitted by an inference backend
#[derive(Debug, Clone, PartialEq)]
pub struct SynthesisChunk {
    /// Source text the segment was aligned to
    pub graphemes: String,
    pub phonemes: String,
    pub audio: Vec<f32>,
}

/// Ordered, finite stream of chunks for a single generate call
pub type ChunkStream<'a> = BoxStream<'a, Result<SynthesisChunk, BackendError>>;

#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("backend request failed: {0}")]
    Transport(String),
    #[error("backend returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("malformed backend response: {0}")]
    Malformed(String),
}

#[derive(Debug, thiserror::Error)]
#[error("failed to initialize backend for lang_code '{variant}': {reason}")]
pub struct BackendInitError {
    pub variant: String,
    pub reason: String,
}

/// Speech inference engine bound to one language variant.
///
/// The engine is opaque: the service only relies on `generate` yielding a
/// finite sequence of chunks in reading order.
pub trait SynthesisBackend: Send + Sync {
    fn variant(&self) -> &str;

    fn generate<'a>(&'a self, text: &'a str, voice: &'a str, speed: f64) -> ChunkStream<'a>;
}

/// Builds backends on demand. Construction may load models and is expected
/// to be slow.
#[async_trait]
pub trait BackendFactory: Send + Sync {
    async fn create(&self, variant: &str) -> Result<Arc<dyn SynthesisBackend>, BackendInitError>;
}
