use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;

use solace_gateway::application::services::{AudioPipeline, SpeechService, TipsService};
use solace_gateway::infrastructure::TokioClock;
use solace_gateway::infrastructure::gemini::{GeminiFileStoreClient, GeminiGenerationClient};
use solace_gateway::infrastructure::google_tts::{GoogleTtsClient, ServiceAccountTokenSource};
use solace_gateway::infrastructure::observability::{TracingConfig, init_tracing};
use solace_gateway::infrastructure::staging::FsStagingArea;
use solace_gateway::infrastructure::transcode::FfmpegTranscoder;
use solace_gateway::presentation::{AppState, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = Settings::from_env()?;
    init_tracing(TracingConfig::default(), settings.server.port);

    if settings.google.api_key.is_none() {
        tracing::warn!("GOOGLE_API_KEY is not set, Gemini-backed endpoints will fail");
    }

    let http_client = reqwest::Client::builder()
        .timeout(settings.google.http_timeout)
        .connect_timeout(Duration::from_secs(10))
        .build()?;

    let model = Arc::new(GeminiGenerationClient::new(
        http_client.clone(),
        GeminiGenerationClient::DEFAULT_BASE_URL,
        settings.google.api_key.clone(),
        settings.google.model.clone(),
    ));
    let file_store = Arc::new(GeminiFileStoreClient::new(
        http_client.clone(),
        GeminiFileStoreClient::DEFAULT_BASE_URL,
        settings.google.api_key.clone(),
    ));
    let token_source = Arc::new(ServiceAccountTokenSource::new(
        settings.google.tts_credentials_path.clone(),
    ));
    let synthesizer = Arc::new(GoogleTtsClient::new(
        http_client,
        GoogleTtsClient::DEFAULT_BASE_URL,
        token_source,
    ));
    let transcoder = Arc::new(FfmpegTranscoder::new(settings.audio.transcode_timeout));
    let staging = Arc::new(FsStagingArea::new(settings.audio.staging_dir.clone()));

    tokio::fs::create_dir_all(staging.base_dir()).await?;

    let audio_pipeline = Arc::new(AudioPipeline::new(
        model.clone(),
        file_store,
        transcoder,
        staging,
        Arc::new(TokioClock),
        settings.audio.poll_max_attempts,
        settings.audio.poll_interval,
        settings.audio.remote_deadline,
    ));
    let tips_service = Arc::new(TipsService::new(model));
    let speech_service = Arc::new(SpeechService::new(synthesizer));

    let addr = SocketAddr::new(settings.server.host.parse()?, settings.server.port);

    let state = AppState {
        audio_pipeline,
        tips_service,
        speech_service,
        settings,
    };

    let router = create_router(state);

    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
