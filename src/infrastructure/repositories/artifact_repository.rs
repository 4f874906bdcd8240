use crate::domain::artifact::model::artifact_file_name;
use crate::domain::artifact::{Artifact, ArtifactError, StoredAudio};
use crate::infrastructure::audio::encode_wav;
use chrono::{DateTime, Utc};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tokio::sync::RwLock;
use uuid::Uuid;

/// File-backed store for synthesized audio.
///
/// The index is the source of truth for which artifacts exist. Writers
/// (save, delete, sweep) take the write lock; `get` holds the read lock while
/// it reads the file so an entry cannot be swept out from under it.
pub struct ArtifactRepository {
    dir: PathBuf,
    index: RwLock<HashMap<Uuid, Artifact>>,
}

impl ArtifactRepository {
    /// Create the store, making sure the scratch directory exists
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, std::io::Error> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self {
            dir,
            index: RwLock::new(HashMap::new()),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Encode samples as WAV, write them to a fresh file and index it
    pub async fn save(&self, samples: &[f32], sample_rate: u32) -> Result<Uuid, ArtifactError> {
        let bytes = encode_wav(samples, sample_rate)?;

        loop {
            let id = Uuid::new_v4();
            let path = self.dir.join(artifact_file_name(id));

            // create_new refuses to clobber a file left by an earlier process
            let mut file = match tokio::fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .await
            {
                Ok(file) => file,
                Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
                Err(e) => return Err(e.into()),
            };

            if let Err(e) = write_all(&mut file, &bytes).await {
                remove_file_if_present(&path).await;
                return Err(e.into());
            }

            let mut index = self.index.write().await;
            match index.entry(id) {
                Entry::Occupied(_) => {
                    drop(index);
                    remove_file_if_present(&path).await;
                    continue;
                }
                Entry::Vacant(slot) => {
                    slot.insert(Artifact {
                        id,
                        path,
                        created_at: Utc::now(),
                    });
                }
            }

            tracing::debug!(artifact_id = %id, size = bytes.len(), "Audio artifact stored");
            return Ok(id);
        }
    }

    /// Read an artifact back. A missing backing file evicts the entry.
    pub async fn get(&self, id: Uuid) -> Result<StoredAudio, ArtifactError> {
        let stale = {
            let index = self.index.read().await;
            let artifact = index.get(&id).ok_or(ArtifactError::NotFound)?;

            match tokio::fs::read(&artifact.path).await {
                Ok(bytes) => {
                    return Ok(StoredAudio {
                        artifact: artifact.clone(),
                        bytes,
                    })
                }
                Err(e) if e.kind() == ErrorKind::NotFound => artifact.clone(),
                Err(e) => return Err(e.into()),
            }
        };

        let mut index = self.index.write().await;
        if index.get(&id) == Some(&stale) {
            index.remove(&id);
            tracing::warn!(
                artifact_id = %id,
                path = %stale.path.display(),
                "Audio file vanished from disk, dropping index entry"
            );
        }

        Err(ArtifactError::NotFound)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), ArtifactError> {
        let artifact = self
            .index
            .write()
            .await
            .remove(&id)
            .ok_or(ArtifactError::NotFound)?;

        remove_file_if_present(&artifact.path).await;
        tracing::debug!(artifact_id = %id, "Audio artifact deleted");
        Ok(())
    }

    /// Drop every artifact older than `ttl` at `now`. Returns how many went.
    pub async fn sweep(&self, now: DateTime<Utc>, ttl: chrono::Duration) -> usize {
        let expired: Vec<Artifact> = {
            let mut index = self.index.write().await;
            let ids: Vec<Uuid> = index
                .values()
                .filter(|artifact| artifact.is_expired(now, ttl))
                .map(|artifact| artifact.id)
                .collect();
            ids.iter().filter_map(|id| index.remove(id)).collect()
        };

        for artifact in &expired {
            remove_file_if_present(&artifact.path).await;
        }

        expired.len()
    }

    pub async fn len(&self) -> usize {
        self.index.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.index.read().await.is_empty()
    }
}

async fn write_all(file: &mut tokio::fs::File, bytes: &[u8]) -> Result<(), std::io::Error> {
    file.write_all(bytes).await?;
    file.flush().await
}

async fn remove_file_if_present(path: &Path) {
    match tokio::fs::remove_file(path).await {
        Ok(()) => {}
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Failed to remove audio file");
        }
    }
}
