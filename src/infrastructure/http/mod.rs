use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Router,
};
use std::path::Path;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

use crate::infrastructure::config::Config;
use crate::infrastructure::repositories::JobRepository;
use crate::infrastructure::storage::OUTPUTS_URL_PREFIX;
use crate::{
    controllers::{health, translation::TranslationController},
    infrastructure::middleware::request_id_middleware,
};

/// Build the application router with all routes and layers
pub fn create_router(
    job_repo: Arc<dyn JobRepository>,
    translation_controller: Arc<TranslationController>,
    output_dir: &Path,
    max_upload_bytes: usize,
) -> Router {
    // Health and banner routes (ping the job store)
    let health_routes = Router::new()
        .route("/", get(health::index))
        .route("/health", get(health::health))
        .route("/health/ready", get(health::health_ready))
        .with_state(job_repo);

    // Job routes, with the upload size cap applied to multipart bodies
    let job_routes = Router::new()
        .route(
            "/api/translate-upload",
            post(TranslationController::translate_upload),
        )
        .route("/api/jobs", get(TranslationController::list_jobs))
        .with_state(translation_controller)
        .layer(DefaultBodyLimit::max(max_upload_bytes));

    Router::new()
        .merge(health_routes)
        .merge(job_routes)
        .nest_service(OUTPUTS_URL_PREFIX, ServeDir::new(output_dir))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Start the HTTP server on the configured address
pub async fn start_http_server(
    config: Arc<Config>,
    app: Router,
) -> Result<(), Box<dyn std::error::Error>> {
    let listener =
        tokio::net::TcpListener::bind(format!("{}:{}", config.host, config.port)).await?;

    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
