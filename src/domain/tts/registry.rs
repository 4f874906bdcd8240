use super::error::TtsServiceError;
use crate::infrastructure::repositories::{BackendFactory, BackendInitError, SynthesisBackend};
use moka::future::Cache;
use std::sync::Arc;

/// Lazily created synthesis backends, one per language variant.
///
/// Entries never expire. Concurrent first requests for the same variant are
/// coalesced by the cache so only one of them runs the factory; a failed
/// construction is not stored and the next call tries again.
pub struct BackendRegistry {
    factory: Arc<dyn BackendFactory>,
    backends: Cache<String, Arc<dyn SynthesisBackend>>,
}

impl BackendRegistry {
    pub fn new(factory: Arc<dyn BackendFactory>) -> Self {
        Self {
            factory,
            backends: Cache::builder().build(),
        }
    }

    pub async fn get_or_create(
        &self,
        variant: &str,
    ) -> Result<Arc<dyn SynthesisBackend>, TtsServiceError> {
        let init = async {
            tracing::info!(lang_code = variant, "Initializing pipeline");
            self.factory.create(variant).await
        };

        self.backends
            .try_get_with(variant.to_string(), init)
            .await
            .map_err(|e: Arc<BackendInitError>| {
                tracing::error!(lang_code = variant, error = %e, "Pipeline initialization failed");
                TtsServiceError::BackendInit(e.to_string())
            })
    }

    /// Variants with a ready backend, sorted
    pub async fn loaded_variants(&self) -> Vec<String> {
        self.backends.run_pending_tasks().await;
        let mut variants: Vec<String> = self
            .backends
            .iter()
            .map(|(variant, _)| variant.to_string())
            .collect();
        variants.sort();
        variants
    }
}
