use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;

use echoscribe::application::services::TranscriptionService;
use echoscribe::infrastructure::audio::{TranscriptionEngineFactory, WavInspector};
use echoscribe::infrastructure::observability::{TracingConfig, init_tracing};
use echoscribe::infrastructure::storage::LocalScratchStore;
use echoscribe::presentation::{AppState, Environment, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment = Environment::from_env().map_err(anyhow::Error::msg)?;
    let settings = Settings::load(environment).context("failed to load settings")?;

    let tracing_config =
        TracingConfig::new(environment.as_str(), settings.logging.json).with_env_override();
    init_tracing(&tracing_config);

    let scratch_store = Arc::new(
        LocalScratchStore::new(&settings.storage.upload_dir)
            .context("failed to prepare upload directory")?,
    );

    let primary = TranscriptionEngineFactory::create(&settings.recognition.primary)
        .context("failed to build primary recognition engine")?;

    let fallback_settings = settings.recognition.fallback.clone();
    let fallback = if fallback_settings.enabled {
        // Local models download and load synchronously.
        let engine = tokio::task::spawn_blocking(move || {
            TranscriptionEngineFactory::create(&fallback_settings)
        })
        .await?
        .context("failed to build fallback recognition engine")?;
        Some(engine)
    } else {
        tracing::warn!("Fallback recognition disabled");
        None
    };

    let service = Arc::new(TranscriptionService::new(
        primary,
        fallback,
        Arc::new(WavInspector),
        scratch_store,
    ));

    tracing::info!(
        primary = service.primary_engine(),
        fallback = ?service.fallback_engine(),
        upload_dir = %settings.storage.upload_dir.display(),
        "Transcription service ready"
    );

    let host = settings
        .server
        .host
        .parse::<std::net::IpAddr>()
        .with_context(|| format!("invalid server host {}", settings.server.host))?;
    let addr = SocketAddr::from((host, settings.server.port));

    let router = create_router(AppState::new(service, settings));

    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
