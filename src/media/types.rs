use serde::{Deserialize, Serialize};

use crate::utils::{format_duration, format_filesize};

/// One downloadable variant reported by the extraction tool. Every field is
/// optional in the wire JSON; absent keys deserialize to `None`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StreamDescriptor {
    #[serde(default)]
    pub format_id: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub ext: Option<String>,
    #[serde(default)]
    pub vcodec: Option<String>,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub filesize: Option<f64>,
}

/// The extraction tool's metadata dump for a URL: either a single video or a
/// collection carrying `entries`. Only the fields this service reshapes are
/// kept; everything else in the dump is ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawMetadata {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub uploader: Option<String>,
    #[serde(default)]
    pub duration: Option<f64>,
    #[serde(default)]
    pub thumbnail: Option<String>,
    // Optional rather than defaulted: dumps may carry an explicit null.
    #[serde(default)]
    pub formats: Option<Vec<StreamDescriptor>>,
    #[serde(default)]
    pub entries: Option<Vec<RawMetadata>>,
    // Direct-URL fields, used only when the formats list yields nothing.
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub ext: Option<String>,
    #[serde(default)]
    pub filesize: Option<f64>,
}

/// One quality variant in the API response.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FormatVariant {
    pub format_id: String,
    pub url: String,
    pub ext: String,
    pub quality: String,
    pub filesize: String,
    pub filename: String,
}

/// The API response body for a successful extraction.
#[derive(Debug, Clone, Serialize)]
pub struct VideoSummary {
    pub title: String,
    pub author: String,
    pub duration: String,
    pub thumbnail: String,
    pub formats: Vec<FormatVariant>,
}

impl VideoSummary {
    /// Reshapes a single-video metadata dump into the response form.
    pub fn from_metadata(video: RawMetadata) -> Self {
        let formats = super::formats::reduce_formats(&video);

        Self {
            title: video.title.unwrap_or_else(|| "YouTube Video".to_string()),
            author: video.uploader.unwrap_or_else(|| "Unknown".to_string()),
            duration: format_duration(video.duration),
            thumbnail: video.thumbnail.unwrap_or_default(),
            formats,
        }
    }
}

impl StreamDescriptor {
    /// Declared byte size, with missing or negative values flattened to 0
    /// for comparison purposes.
    pub fn raw_filesize(&self) -> u64 {
        match self.filesize {
            Some(s) if s > 0.0 => s as u64,
            _ => 0,
        }
    }

    pub fn filesize_label(&self) -> String {
        format_filesize(self.filesize)
    }
}
