pub mod artifact_repository;
pub mod kokoro_backend;
pub mod synthesis_backend;

pub use artifact_repository::ArtifactRepository;
pub use kokoro_backend::{KokoroBackend, KokoroBackendFactory};
pub use synthesis_backend::{
    BackendError, BackendFactory, BackendInitError, ChunkStream, SynthesisBackend, SynthesisChunk,
};
