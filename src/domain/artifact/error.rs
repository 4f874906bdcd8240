use crate::error::AppError;

#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("audio file not found")]
    NotFound,
    #[error("storage error: {0}")]
    Storage(#[from] std::io::Error),
    #[error("encoding error: {0}")]
    Encoding(#[from] hound::Error),
}

impl From<ArtifactError> for AppError {
    fn from(err: ArtifactError) -> Self {
        match err {
            ArtifactError::NotFound => AppError::NotFound("Audio file not found".to_string()),
            ArtifactError::Storage(e) => AppError::Internal(e.to_string()),
            ArtifactError::Encoding(e) => AppError::Internal(e.to_string()),
        }
    }
}
