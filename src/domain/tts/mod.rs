pub mod dto;
pub mod error;
pub mod registry;
pub mod service;
pub mod validation;
pub mod voices;

pub use dto::{TtsRequest, TtsResponse, VoicesResponse};
pub use error::TtsServiceError;
pub use registry::BackendRegistry;
pub use service::{SynthesisResult, TtsService, TtsServiceApi, TtsSynthesisOutcome};
pub use validation::{validate, ValidatedRequest, ValidationError};
pub use voices::VoiceCatalog;
