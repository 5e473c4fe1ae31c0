use std::convert::Infallible;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Method, Request, Response, StatusCode};
use hyper_util::rt::TokioIo;
use serde_json::Value;
use tracing::{error, info, warn};

use super::{error_body, health_body, process_download, DownloadRequest};
use crate::config::Config;
use crate::media::MediaExtractor;

/// Deployment platform reported by this transport's health endpoint.
const PLATFORM: &str = "vercel";

/// Bare transport: a hand-routed request handler one level below the
/// framework, the serverless-style deployment target. Same contract as the
/// axum app, same shared orchestration function.
pub async fn run(config: Config) -> Result<()> {
    let extractor = Arc::new(MediaExtractor::new());
    extractor.test_setup().await;

    let static_dir: Arc<str> = Arc::from(config.static_dir.as_str());

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!("Starting YouTube download handler on {}", addr);

    loop {
        let (stream, _) = listener.accept().await.context("Accept failed")?;
        let io = TokioIo::new(stream);
        let extractor = extractor.clone();
        let static_dir = static_dir.clone();

        tokio::spawn(async move {
            let service = service_fn(move |req| {
                let extractor = extractor.clone();
                let static_dir = static_dir.clone();
                async move { route(req, extractor, &static_dir).await }
            });

            if let Err(e) = http1::Builder::new().serve_connection(io, service).await {
                warn!("Connection error: {}", e);
            }
        });
    }
}

async fn route(
    req: Request<Incoming>,
    extractor: Arc<MediaExtractor>,
    static_dir: &str,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let response = if method == Method::OPTIONS {
        preflight(&path)
    } else if method == Method::POST && path == "/api/download" {
        download(req, &extractor).await
    } else if method == Method::GET && path == "/api/health" {
        json_response(StatusCode::OK, health_body(Some(PLATFORM)), &path)
    } else if method == Method::GET && path == "/api/download" {
        json_response(
            StatusCode::METHOD_NOT_ALLOWED,
            error_body("Method not allowed"),
            &path,
        )
    } else if method == Method::GET && matches!(path.as_str(), "/" | "/test" | "/debug") {
        static_page(static_dir, &path).await
    } else {
        json_response(
            StatusCode::NOT_FOUND,
            error_body("Endpoint not found"),
            &path,
        )
    };

    Ok(response)
}

async fn download(
    req: Request<Incoming>,
    extractor: &MediaExtractor,
) -> Response<Full<Bytes>> {
    let body = match req.into_body().collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(e) => {
            error!("Failed to read request body: {}", e);
            return json_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                error_body("Internal server error occurred"),
                "/api/download",
            );
        }
    };

    // An unreadable or non-JSON body is treated as a request without a url.
    let request: DownloadRequest = serde_json::from_slice(&body).unwrap_or_default();

    let (status, payload) = process_download(extractor, request).await;
    json_response(status, payload, "/api/download")
}

fn preflight(path: &str) -> Response<Full<Bytes>> {
    base_response(StatusCode::OK, path, Bytes::new())
}

async fn static_page(static_dir: &str, path: &str) -> Response<Full<Bytes>> {
    let file = match path {
        "/" => "index.html",
        "/test" => "test.html",
        "/debug" => "debug.html",
        _ => unreachable!("routed static page"),
    };

    match tokio::fs::read(Path::new(static_dir).join(file)).await {
        Ok(contents) => Response::builder()
            .status(StatusCode::OK)
            .header("Content-Type", "text/html; charset=utf-8")
            .header("Access-Control-Allow-Origin", "*")
            .body(Full::new(Bytes::from(contents)))
            .expect("static response parts"),
        Err(e) => {
            warn!("Failed to read static page {}: {}", file, e);
            json_response(StatusCode::NOT_FOUND, error_body("Endpoint not found"), path)
        }
    }
}

fn json_response(status: StatusCode, body: Value, path: &str) -> Response<Full<Bytes>> {
    base_response(status, path, Bytes::from(body.to_string()))
}

/// Every response carries permissive CORS headers with route-appropriate
/// allowed methods, matching the framework transport's CORS layer.
fn base_response(status: StatusCode, path: &str, body: Bytes) -> Response<Full<Bytes>> {
    let allow_methods = if path == "/api/download" {
        "GET, POST, OPTIONS"
    } else {
        "GET, OPTIONS"
    };

    Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .header("Access-Control-Allow-Origin", "*")
        .header("Access-Control-Allow-Methods", allow_methods)
        .header("Access-Control-Allow-Headers", "Content-Type")
        .body(Full::new(body))
        .expect("static response parts")
}
