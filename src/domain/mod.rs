pub mod artifact;
pub mod tts;
