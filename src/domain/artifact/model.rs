use chrono::{DateTime, Utc};
use std::path::PathBuf;
use uuid::Uuid;

/// Index entry for a synthesized audio file
#[derive(Debug, Clone, PartialEq)]
pub struct Artifact {
    pub id: Uuid,
    pub path: PathBuf,
    pub created_at: DateTime<Utc>,
}

impl Artifact {
    pub fn file_name(&self) -> String {
        artifact_file_name(self.id)
    }

    pub fn is_expired(&self, now: DateTime<Utc>, ttl: chrono::Duration) -> bool {
        now - self.created_at > ttl
    }
}

/// Artifact contents as read back from storage
#[derive(Debug, Clone)]
pub struct StoredAudio {
    pub artifact: Artifact,
    pub bytes: Vec<u8>,
}

pub fn artifact_file_name(id: Uuid) -> String {
    format!("kokoro_tts_{}.wav", id)
}
