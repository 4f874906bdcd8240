use super::validation::ValidationError;
use crate::domain::artifact::ArtifactError;
use crate::error::AppError;
use crate::infrastructure::repositories::BackendInitError;

#[derive(Debug, thiserror::Error)]
pub enum TtsServiceError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error("{0}")]
    BackendInit(String),
    #[error("{0}")]
    Synthesis(String),
    #[error(transparent)]
    Artifact(#[from] ArtifactError),
}

impl From<BackendInitError> for TtsServiceError {
    fn from(err: BackendInitError) -> Self {
        TtsServiceError::BackendInit(err.to_string())
    }
}

impl From<TtsServiceError> for AppError {
    fn from(err: TtsServiceError) -> Self {
        match err {
            TtsServiceError::Invalid(e) => AppError::BadRequest(e.to_string()),
            TtsServiceError::BackendInit(msg) => AppError::BackendInit(msg),
            TtsServiceError::Synthesis(msg) => AppError::Synthesis(msg),
            TtsServiceError::Artifact(e) => AppError::from(e),
        }
    }
}
