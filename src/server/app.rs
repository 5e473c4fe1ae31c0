use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::body::Bytes;
use axum::{
    extract::State,
    http::{header, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeFile;
use tracing::info;

use super::{error_body, health_body, process_download, DownloadRequest};
use crate::config::Config;
use crate::media::MediaExtractor;

/// Framework transport: the axum application. Stateless beyond the shared
/// extractor handle.
pub async fn run(config: Config) -> Result<()> {
    let extractor = Arc::new(MediaExtractor::new());
    extractor.test_setup().await;

    let app = router(extractor, &config.static_dir);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!("Starting YouTube download API on {}", addr);
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

fn router(extractor: Arc<MediaExtractor>, static_dir: &str) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    let static_dir = PathBuf::from(static_dir);

    Router::new()
        .route("/api/download", post(download))
        .route("/api/health", get(health))
        .route_service("/", ServeFile::new(static_dir.join("index.html")))
        .route_service("/test", ServeFile::new(static_dir.join("test.html")))
        .route_service("/debug", ServeFile::new(static_dir.join("debug.html")))
        .fallback(not_found)
        .layer(cors)
        .with_state(extractor)
}

async fn download(
    State(extractor): State<Arc<MediaExtractor>>,
    body: Bytes,
) -> impl IntoResponse {
    // A missing or malformed JSON body is treated the same as a body
    // without a url.
    let request: DownloadRequest = serde_json::from_slice(&body).unwrap_or_default();
    let (status, payload) = process_download(extractor.as_ref(), request).await;
    (status, Json(payload))
}

async fn health() -> impl IntoResponse {
    Json(health_body(None))
}

async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(error_body("Endpoint not found")))
}
