use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use polyglot_audio_backend::controllers::translation::TranslationController;
use polyglot_audio_backend::domain::job::{JobService, PipelineConfig};
use polyglot_audio_backend::domain::speech::SpeechService;
use polyglot_audio_backend::domain::translation::TranslationService;
use polyglot_audio_backend::infrastructure::config::{Config, LogFormat, TtsProvider};
use polyglot_audio_backend::infrastructure::db::{check_connection, create_pool, run_migrations};
use polyglot_audio_backend::infrastructure::http::{create_router, start_http_server};
use polyglot_audio_backend::infrastructure::repositories::{
    GoogleTranslateRepository, GoogleTtsRepository, JobRepository, OpenAiTtsRepository,
    PollyTtsRepository, PostgresJobRepository, TtsRepository,
};
use polyglot_audio_backend::infrastructure::storage::ArtifactStorage;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    init_logging(&config);

    tracing::info!(
        environment = ?config.environment,
        "Starting Polyglot Audio Backend on {}:{}",
        config.host,
        config.port
    );

    // Create database connection pool
    let pool = create_pool(&config.database_url).await?;
    tracing::info!("Database connection pool created");

    // Verify database connection
    check_connection(&pool).await?;
    tracing::info!("Database connection verified");

    run_migrations(&pool).await?;
    tracing::info!("Database migrations applied");

    // Prepare artifact directories
    let storage = Arc::new(ArtifactStorage::new(
        config.output_dir.clone(),
        config.upload_dir.clone(),
    ));
    storage.ensure_dirs().await?;
    tracing::info!(
        output_dir = %config.output_dir.display(),
        upload_dir = %config.upload_dir.display(),
        "Artifact directories ready"
    );

    // Shared HTTP client for the translation and speech providers
    let http_client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.provider_timeout_secs))
        .build()?;

    let pool = Arc::new(pool);
    let config = Arc::new(config);

    // === DEPENDENCY INJECTION SETUP ===
    // 1. Instantiate repositories (inject db pool and provider clients)
    tracing::info!("Instantiating repositories...");
    let job_repo: Arc<dyn JobRepository> = Arc::new(PostgresJobRepository::new(pool.clone()));
    let translation_repo = Arc::new(GoogleTranslateRepository::new(http_client.clone()));
    let tts_repo = create_tts_repository(&config, http_client).await?;

    // 2. Instantiate services (inject repositories)
    tracing::info!("Instantiating services...");
    let translation_service = Arc::new(TranslationService::new(
        translation_repo,
        config.source_language.clone(),
        config.chunk_max_chars,
        config.translation_cache_enabled,
    ));
    let speech_service = Arc::new(SpeechService::new(tts_repo));
    let job_service = Arc::new(JobService::new(
        translation_service,
        speech_service,
        job_repo.clone(),
        storage,
        PipelineConfig {
            source_language: config.source_language.clone(),
            target_languages: config.target_languages.clone(),
        },
    ));
    tracing::info!(
        source_language = %config.source_language,
        targets = ?config
            .target_languages
            .iter()
            .map(|l| l.code.as_str())
            .collect::<Vec<_>>(),
        "Pipeline configured"
    );

    // 3. Instantiate controllers (inject services)
    tracing::info!("Instantiating controllers...");
    let translation_controller = Arc::new(TranslationController::new(job_service));

    // Start HTTP server with all routes
    let app = create_router(
        job_repo,
        translation_controller,
        &config.output_dir,
        config.max_upload_bytes,
    );
    start_http_server(config, app).await?;

    Ok(())
}

async fn create_tts_repository(
    config: &Config,
    http_client: reqwest::Client,
) -> Result<Arc<dyn TtsRepository>, Box<dyn std::error::Error>> {
    match config.tts_provider {
        TtsProvider::Google => {
            tracing::info!("Using Google Translate TTS");
            Ok(Arc::new(GoogleTtsRepository::new(http_client)))
        }
        TtsProvider::Polly => {
            tracing::info!("Initializing AWS Polly client with region: {}", config.aws_region);

            let has_access_key = std::env::var("AWS_ACCESS_KEY_ID").is_ok();
            let has_secret_key = std::env::var("AWS_SECRET_ACCESS_KEY").is_ok();
            if !has_access_key || !has_secret_key {
                tracing::warn!("AWS credentials not found in environment variables. Will attempt to use other credential providers (instance metadata, etc.)");
            }

            let aws_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
                .region(aws_config::Region::new(config.aws_region.clone()))
                .load()
                .await;
            let polly_client = aws_sdk_polly::Client::new(&aws_config);
            tracing::info!("AWS Polly client initialized successfully");

            Ok(Arc::new(PollyTtsRepository::new(Arc::new(polly_client))))
        }
        TtsProvider::OpenAi => {
            let api_key = config
                .openai_api_key
                .clone()
                .ok_or("OPENAI_API_KEY is required when TTS_PROVIDER=openai")?;
            let client = async_openai::Client::with_config(
                async_openai::config::OpenAIConfig::new().with_api_key(api_key),
            );
            tracing::info!(
                model = %config.openai_tts_model,
                voice = %config.openai_tts_voice,
                "OpenAI TTS client initialized"
            );

            Ok(Arc::new(OpenAiTtsRepository::new(
                Arc::new(client),
                config.openai_tts_model.clone(),
                config.openai_tts_voice.clone(),
            )))
        }
    }
}

fn init_logging(config: &Config) {
    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| config.default_log_filter().into()),
            )
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| config.default_log_filter().into()),
            )
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}
