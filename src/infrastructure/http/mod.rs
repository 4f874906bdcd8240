pub mod request_id;

use axum::{
    http::HeaderName,
    middleware,
    routing::{get, post},
    Router,
};
use std::future::Future;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::controllers::{audio::AudioController, health, tts::TtsController};
use crate::domain::tts::TtsService;
use crate::infrastructure::config::Config;

pub use request_id::{request_id_middleware, X_REQUEST_ID};

/// Build the application router with every route and layer attached
pub fn create_router(
    tts_service: Arc<TtsService>,
    tts_controller: Arc<TtsController>,
    audio_controller: Arc<AudioController>,
) -> Router {
    let tts_routes = Router::new()
        .route("/tts", post(TtsController::synthesize))
        .route("/voices", get(TtsController::list_voices))
        .with_state(tts_controller);

    let audio_routes = Router::new()
        .route(
            "/audio/:audioId",
            get(AudioController::get_audio).delete(AudioController::delete_audio),
        )
        .with_state(audio_controller);

    // Browser clients on any origin may call the API
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .expose_headers([HeaderName::from_static(X_REQUEST_ID)]);

    Router::new()
        .route("/", get(health::root))
        .route("/health", get(health::health))
        .with_state(tts_service)
        .merge(tts_routes)
        .merge(audio_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(middleware::from_fn(request_id_middleware))
                .layer(cors),
        )
}

/// Start the HTTP server and run until `shutdown` resolves
pub async fn start_http_server(
    config: Arc<Config>,
    app: Router,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<(), Box<dyn std::error::Error>> {
    let listener =
        tokio::net::TcpListener::bind(format!("{}:{}", config.host, config.port)).await?;

    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    Ok(())
}
