use crate::infrastructure::repositories::ArtifactRepository;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

pub const DEFAULT_ARTIFACT_TTL_SECS: u32 = 3600;

/// Reclaims artifacts older than the configured TTL.
///
/// Sweeps are driven by activity: the TTS service triggers one after every
/// successful synthesis, so expired files can linger while the service is
/// idle. `spawn_periodic` adds a timer on top for deployments that care.
pub struct ExpirySweeper {
    store: Arc<ArtifactRepository>,
    ttl: chrono::Duration,
}

impl ExpirySweeper {
    pub fn new(store: Arc<ArtifactRepository>, ttl_secs: u32) -> Self {
        Self {
            store,
            ttl: chrono::Duration::seconds(i64::from(ttl_secs)),
        }
    }

    pub fn ttl(&self) -> chrono::Duration {
        self.ttl
    }

    pub async fn sweep(&self, now: DateTime<Utc>) -> usize {
        let removed = self.store.sweep(now, self.ttl).await;
        if removed > 0 {
            tracing::info!(removed, ttl_secs = self.ttl.num_seconds(), "Expired audio files cleaned up");
        }
        removed
    }

    pub async fn sweep_now(&self) -> usize {
        self.sweep(Utc::now()).await
    }

    /// Run a sweep in the background without holding up the caller
    pub fn trigger(self: &Arc<Self>) -> JoinHandle<usize> {
        let sweeper = self.clone();
        tokio::spawn(async move { sweeper.sweep_now().await })
    }

    pub fn spawn_periodic(self: &Arc<Self>, every: Duration) -> JoinHandle<()> {
        let sweeper = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            // first tick completes immediately
            ticker.tick().await;
            loop {
                ticker.tick().await;
                sweeper.sweep_now().await;
            }
        })
    }
}
