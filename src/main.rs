use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use kokoro_tts::controllers::{audio::AudioController, tts::TtsController};
use kokoro_tts::domain::artifact::ExpirySweeper;
use kokoro_tts::domain::tts::{BackendRegistry, TtsService, VoiceCatalog};
use kokoro_tts::infrastructure::config::{Config, LogFormat};
use kokoro_tts::infrastructure::http::{create_router, start_http_server};
use kokoro_tts::infrastructure::repositories::{ArtifactRepository, KokoroBackendFactory};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    init_logging(&config);

    tracing::info!(
        "Starting Kokoro TTS API on {}:{}",
        config.host,
        config.port
    );
    if config.is_development() {
        tracing::debug!(?config, "Running in development mode");
    }

    // === DEPENDENCY INJECTION SETUP ===
    // 1. Instantiate repositories
    tracing::info!(kokoro_url = %config.kokoro_url, "Instantiating repositories...");
    let backend_factory = Arc::new(KokoroBackendFactory::new(
        &config.kokoro_url,
        Duration::from_secs(config.backend_timeout_secs),
    )?);
    let artifacts = Arc::new(ArtifactRepository::new(config.audio_dir.clone())?);
    tracing::info!(audio_dir = %artifacts.dir().display(), "Audio scratch directory ready");

    // 2. Instantiate services
    tracing::info!("Instantiating services...");
    let registry = Arc::new(BackendRegistry::new(backend_factory));
    let sweeper = Arc::new(ExpirySweeper::new(artifacts.clone(), config.artifact_ttl_secs));
    let tts_service = Arc::new(TtsService::new(
        VoiceCatalog::default(),
        registry.clone(),
        artifacts,
        sweeper.clone(),
        config.sample_rate,
    ));

    tracing::info!(
        lang_codes = ?tts_service.catalog().variants().collect::<Vec<_>>(),
        "Voice catalog loaded"
    );

    // 3. Instantiate controllers
    tracing::info!("Instantiating controllers...");
    let tts_controller = Arc::new(TtsController::new(tts_service.clone()));
    let audio_controller = Arc::new(AudioController::new(tts_service.clone()));

    // Warm up pipelines; a failure here is retried on the first request
    for variant in &config.preload_variants {
        match registry.get_or_create(variant).await {
            Ok(_) => tracing::info!(lang_code = %variant, "Pipeline preloaded"),
            Err(e) => tracing::warn!(lang_code = %variant, error = %e, "Pipeline preload failed"),
        }
    }

    if config.sweep_interval_secs > 0 {
        tracing::info!(interval_secs = config.sweep_interval_secs, "Starting periodic sweeper");
        sweeper.spawn_periodic(Duration::from_secs(config.sweep_interval_secs));
    }

    let app = create_router(tts_service, tts_controller, audio_controller);
    start_http_server(Arc::new(config), app, shutdown_signal()).await?;

    tracing::info!("Server stopped");
    Ok(())
}

fn init_logging(config: &Config) {
    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "kokoro_tts=debug,tower_http=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "kokoro_tts=debug,tower_http=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
