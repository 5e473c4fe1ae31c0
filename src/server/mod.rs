pub mod app;
pub mod bare;

use axum::http::StatusCode;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{error, info};

use crate::media::{ExtractError, MediaExtractor, MetadataSource};

/// Body of `POST /api/download`. The optional `format` hint is accepted for
/// compatibility but does not influence extraction.
#[derive(Debug, Default, Deserialize)]
pub struct DownloadRequest {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub format: Option<String>,
}

/// The one orchestration path both transports call. Returns the status code
/// and JSON body to send; transports only add framing and headers.
pub async fn process_download<S: MetadataSource>(
    extractor: &MediaExtractor<S>,
    request: DownloadRequest,
) -> (StatusCode, Value) {
    let url = match request.url {
        Some(url) => url,
        None => {
            return (StatusCode::BAD_REQUEST, error_body("URL is required"));
        }
    };

    info!("Processing download request for: {}", url);
    if let Some(format) = &request.format {
        info!("Requested format hint: {}", format);
    }

    match extractor.extract(&url).await {
        Ok(summary) => {
            if summary.formats.is_empty() {
                info!("No downloadable formats for: {}", url);
                return (
                    StatusCode::NOT_FOUND,
                    error_body("No downloadable video formats found"),
                );
            }

            info!("Successfully extracted video info: {}", summary.title);
            match serde_json::to_value(&summary) {
                Ok(body) => (StatusCode::OK, body),
                Err(e) => {
                    error!("Failed to serialize summary: {}", e);
                    internal_error()
                }
            }
        }
        Err(ExtractError::Internal(detail)) => {
            error!("Unexpected error: {}", detail);
            internal_error()
        }
        Err(e) => {
            error!("Validation error: {}", e);
            (StatusCode::BAD_REQUEST, error_body(&e.to_string()))
        }
    }
}

/// Health payload. The bare handler passes its deployment platform; the
/// framework server passes `None`.
pub fn health_body(platform: Option<&str>) -> Value {
    let mut body = json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
    });
    if let Some(platform) = platform {
        body["platform"] = json!(platform);
    }
    body
}

pub fn error_body(message: &str) -> Value {
    json!({ "error": message })
}

fn internal_error() -> (StatusCode, Value) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        error_body("Internal server error occurred"),
    )
}
