use super::dto::TtsRequest;
use super::voices::VoiceCatalog;

pub const MAX_TEXT_CHARS: usize = 5000;
pub const MIN_SPEED: f64 = 0.5;
pub const MAX_SPEED: f64 = 2.0;

/// A request that passed every input check
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedRequest {
    pub text: String,
    pub voice: String,
    pub speed: f64,
    pub variant: String,
    pub want_phonemes: bool,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("Text cannot be empty")]
    EmptyText,
    #[error("Text too long (max {} characters)", MAX_TEXT_CHARS)]
    TextTooLong { length: usize },
    #[error("Speed must be between 0.5 and 2.0")]
    SpeedOutOfRange { speed: f64 },
    #[error("Unsupported lang_code: {variant}")]
    UnknownVariant { variant: String },
    #[error("Voice {voice} not available for lang_code {variant}")]
    UnknownVoice { voice: String, variant: String },
}

/// Check a request against the input contract.
///
/// Checks run cheapest first and stop at the first failure. An explicit
/// `lang_code` takes precedence over the voice prefix; the voice must then
/// belong to that variant.
pub fn validate(
    request: TtsRequest,
    catalog: &VoiceCatalog,
) -> Result<ValidatedRequest, ValidationError> {
    if request.text.trim().is_empty() {
        return Err(ValidationError::EmptyText);
    }

    let length = request.text.chars().count();
    if length > MAX_TEXT_CHARS {
        return Err(ValidationError::TextTooLong { length });
    }

    if !(MIN_SPEED..=MAX_SPEED).contains(&request.speed) {
        return Err(ValidationError::SpeedOutOfRange {
            speed: request.speed,
        });
    }

    let variant = match request.lang_code {
        Some(lang_code) => lang_code,
        None => request
            .voice
            .chars()
            .next()
            .map(String::from)
            .unwrap_or_default(),
    };

    if !catalog.contains_variant(&variant) {
        return Err(ValidationError::UnknownVariant { variant });
    }

    if !catalog.has_voice(&variant, &request.voice) {
        return Err(ValidationError::UnknownVoice {
            voice: request.voice,
            variant,
        });
    }

    Ok(ValidatedRequest {
        text: request.text,
        voice: request.voice,
        speed: request.speed,
        variant,
        want_phonemes: request.return_phonemes,
    })
}
