//! TextVox HTTP Server
//!
//! Main entry point for the HTTP API server.

use std::{sync::Arc, time::Duration};

use ai_speech::{EspeakProvider, GoogleTranslateTtsProvider, TextToSpeech};
use ai_vision::{DetectorCache, TesseractDetectorFactory};
use application::{ImageTextService, SpeechService};
use infrastructure::{AppConfig, init_tracing};
use presentation_http::{RetentionSweeper, routes, state::AppState};
use tokio::{net::TcpListener, signal};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Configuration selects the log format
    let (config, load_error) = match AppConfig::load() {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    init_tracing(config.server.json_logs())?;

    info!("TextVox v{} starting...", env!("CARGO_PKG_VERSION"));
    if let Some(e) = load_error {
        warn!("Failed to load config, using defaults: {}", e);
    }

    info!(
        host = %config.server.host,
        port = %config.server.port,
        uploads = %config.storage.uploads_dir.display(),
        results = %config.storage.results_dir.display(),
        audio = %config.storage.audio_dir.display(),
        "Configuration loaded"
    );

    let layout = config.storage.layout();
    layout
        .ensure_dirs()
        .map_err(|e| anyhow::anyhow!("Failed to create storage directories: {e}"))?;

    // Text detection
    let detector_factory = Arc::new(TesseractDetectorFactory::new(&config.ocr));
    let detectors = Arc::new(DetectorCache::new(
        detector_factory,
        config.ocr.max_cached_detectors,
    ));
    let image_service = ImageTextService::new(detectors, &layout.results_dir);

    // Speech synthesis
    let networked: Arc<dyn TextToSpeech> = Arc::new(
        GoogleTranslateTtsProvider::new(&config.speech)
            .map_err(|e| anyhow::anyhow!("Failed to initialize networked TTS: {e}"))?,
    );
    let offline: Arc<dyn TextToSpeech> = Arc::new(
        EspeakProvider::new(config.speech.clone())
            .map_err(|e| anyhow::anyhow!("Failed to initialize offline TTS: {e}"))?,
    );
    if !offline.is_available().await {
        warn!("Offline TTS engine not found; pyttsx3 requests and /voices will fail");
    }
    let speech_service = SpeechService::new(networked, offline, &layout.audio_dir);

    // Retention sweep
    let sweeper = Arc::new(RetentionSweeper::from_config(&config.storage));
    let sweep_handle = config
        .storage
        .sweep_interval()
        .map(|interval| Arc::clone(&sweeper).spawn_periodic(interval));

    let state = AppState {
        image_service: Arc::new(image_service),
        speech_service: Arc::new(speech_service),
        sweeper,
        config: Arc::new(config.clone()),
    };

    let app = routes::with_middleware(routes::create_router(state), &config.server);

    // Start server
    let addr = config.server.bind_address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server listening on http://{}", addr);
    info!("API docs: http://{}/docs", addr);

    let shutdown_timeout = Duration::from_secs(config.server.shutdown_timeout_secs);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown_timeout))
        .await?;

    if let Some(handle) = sweep_handle {
        handle.abort();
    }

    info!("Server shutdown complete");

    Ok(())
}

/// Wait for shutdown signals (SIGINT, SIGTERM) and handle graceful shutdown
async fn shutdown_signal(timeout: Duration) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        () = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown...");
        }
    }

    info!("Waiting up to {:?} for connections to close...", timeout);
}
