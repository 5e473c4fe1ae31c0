mod error;
mod extractor;
mod formats;
mod personas;
mod types;
mod ytdlp;

pub use error::{classify_failure, ExtractError};
pub use extractor::MetadataSource;
pub use personas::{Persona, PERSONAS};
pub use types::{FormatVariant, RawMetadata, StreamDescriptor, VideoSummary};
pub use ytdlp::YtDlpSource;

use crate::urls::{is_youtube_url, normalize_url};
use rand::Rng;
use std::ops::Range;
use std::time::Duration;
use tracing::{info, warn};

/// Seconds slept between persona attempts, uniformly sampled.
const RETRY_DELAY_SECS: Range<f64> = 1.0..3.0;

/// Walks the persona table against a metadata source until one attempt
/// yields a dump, then reshapes the dump into a [`VideoSummary`]. Stateless:
/// one instance serves every request.
pub struct MediaExtractor<S = YtDlpSource> {
    source: S,
}

impl MediaExtractor<YtDlpSource> {
    pub fn new() -> Self {
        Self {
            source: YtDlpSource::new(),
        }
    }

    pub async fn test_setup(&self) -> bool {
        let available = YtDlpSource::test_availability().await;
        if !available {
            warn!("yt-dlp is not available; extraction requests will fail");
        }
        available
    }
}

impl Default for MediaExtractor<YtDlpSource> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: MetadataSource> MediaExtractor<S> {
    pub fn with_source(source: S) -> Self {
        Self { source }
    }

    /// Normalizes and validates the URL, then tries each persona in order.
    /// A persona gets exactly one attempt; between attempts the loop sleeps
    /// a randomized interval to avoid tripping rate-based defenses.
    pub async fn extract(&self, raw_url: &str) -> Result<VideoSummary, ExtractError> {
        let url = normalize_url(raw_url);
        if !is_youtube_url(&url) {
            warn!("Rejected URL after normalization: {}", url);
            return Err(ExtractError::InvalidUrl);
        }

        let mut last_error: Option<String> = None;
        let mut metadata: Option<RawMetadata> = None;

        for (i, persona) in PERSONAS.iter().enumerate() {
            if i > 0 {
                let delay = rand::thread_rng().gen_range(RETRY_DELAY_SECS);
                info!("Waiting {:.1}s before next attempt", delay);
                tokio::time::sleep(Duration::from_secs_f64(delay)).await;
            }

            info!("Trying persona {} ({})", i + 1, persona.name);
            match self.source.fetch(&url, persona).await {
                Ok(dump) => {
                    info!(
                        "Successfully extracted metadata with persona {} ({})",
                        i + 1,
                        persona.name
                    );
                    metadata = Some(dump);
                    break;
                }
                Err(e) => {
                    warn!("Persona {} failed: {}", persona.name, e);
                    last_error = Some(e.to_string());
                }
            }
        }

        let metadata = match metadata {
            Some(m) => m,
            None => {
                let detail = last_error.unwrap_or_else(|| "unknown error".to_string());
                warn!("All personas failed, last error: {}", detail);
                return Err(classify_failure(&detail));
            }
        };

        // A collection dump carries entries; only the first one is served.
        let video = match metadata.entries {
            Some(entries) => entries
                .into_iter()
                .next()
                .ok_or(ExtractError::NoVideoFound)?,
            None => metadata,
        };

        Ok(VideoSummary::from_metadata(video))
    }
}
