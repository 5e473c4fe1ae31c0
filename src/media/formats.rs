use super::types::{FormatVariant, RawMetadata, StreamDescriptor};
use crate::utils::sanitize_filename;

/// Most variants a response will carry.
const MAX_FORMATS: usize = 5;

/// Reduces the tool's raw format list to at most one variant per quality
/// bucket, at most [`MAX_FORMATS`] in total. Buckets appear in the order
/// they are first seen; within a bucket the larger declared size wins and
/// ties keep the earlier descriptor.
pub fn reduce_formats(video: &RawMetadata) -> Vec<FormatVariant> {
    let stem = sanitize_filename(video.title.as_deref().unwrap_or("video"));

    let mut buckets: Vec<(String, u64, FormatVariant)> = Vec::new();

    for desc in video.formats.iter().flatten() {
        // Audio-only descriptors declare vcodec "none"; a missing vcodec
        // still counts as video.
        if desc.vcodec.as_deref() == Some("none") {
            continue;
        }

        let quality = quality_label(desc);
        let size = desc.raw_filesize();
        let variant = make_variant(desc, &quality, &stem);

        match buckets.iter_mut().find(|(label, _, _)| *label == quality) {
            Some((_, best, slot)) => {
                if size > *best {
                    *best = size;
                    *slot = variant;
                }
            }
            None => buckets.push((quality, size, variant)),
        }
    }

    let mut formats: Vec<FormatVariant> = buckets.into_iter().map(|(_, _, v)| v).collect();

    // Some extractions report no per-format descriptors but still carry a
    // playable direct URL at the top level.
    if formats.is_empty() {
        if let Some(url) = video.url.as_deref().filter(|u| !u.is_empty()) {
            let ext = video.ext.clone().unwrap_or_else(|| "mp4".to_string());
            formats.push(FormatVariant {
                format_id: "direct".to_string(),
                url: url.to_string(),
                ext: ext.clone(),
                quality: "Standard Quality".to_string(),
                filesize: crate::utils::format_filesize(video.filesize),
                filename: format!("{stem}.{ext}"),
            });
        }
    }

    formats.truncate(MAX_FORMATS);
    formats
}

fn make_variant(desc: &StreamDescriptor, quality: &str, stem: &str) -> FormatVariant {
    let ext = desc.ext.clone().unwrap_or_else(|| "mp4".to_string());
    FormatVariant {
        format_id: desc.format_id.clone().unwrap_or_default(),
        url: desc.url.clone().unwrap_or_default(),
        ext: ext.clone(),
        quality: quality.to_string(),
        filesize: desc.filesize_label(),
        filename: format!("{stem}.{ext}"),
    }
}

/// Human-readable resolution tier. Height is preferred; width is a coarser
/// fallback for descriptors that only declare one dimension.
pub fn quality_label(desc: &StreamDescriptor) -> String {
    if let Some(height) = desc.height.filter(|h| *h > 0) {
        return match height {
            h if h >= 2160 => "4K (2160p)".to_string(),
            h if h >= 1440 => "1440p HD".to_string(),
            h if h >= 1080 => "1080p HD".to_string(),
            h if h >= 720 => "720p HD".to_string(),
            h if h >= 480 => "480p".to_string(),
            h if h >= 360 => "360p".to_string(),
            h if h >= 240 => "240p".to_string(),
            h => format!("{h}p"),
        };
    }

    if let Some(width) = desc.width.filter(|w| *w > 0) {
        return match width {
            w if w >= 3840 => "4K (2160p)".to_string(),
            w if w >= 2560 => "1440p HD".to_string(),
            w if w >= 1920 => "1080p HD".to_string(),
            w if w >= 1280 => "720p HD".to_string(),
            _ => "Standard Quality".to_string(),
        };
    }

    "Standard Quality".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn video_desc(height: u32, filesize: f64) -> StreamDescriptor {
        StreamDescriptor {
            format_id: Some(format!("f{height}-{filesize}")),
            url: Some(format!("https://cdn.example/{height}/{filesize}")),
            ext: Some("mp4".to_string()),
            vcodec: Some("avc1".to_string()),
            height: Some(height),
            filesize: Some(filesize),
            ..Default::default()
        }
    }

    fn metadata_with(formats: Vec<StreamDescriptor>) -> RawMetadata {
        RawMetadata {
            title: Some("clip".to_string()),
            formats: Some(formats),
            ..Default::default()
        }
    }

    #[test]
    fn test_dedup_keeps_largest_per_bucket() {
        let meta = metadata_with(vec![
            video_desc(1080, 100.0),
            video_desc(1080, 200.0),
            video_desc(720, 50.0),
        ]);

        let formats = reduce_formats(&meta);
        assert_eq!(formats.len(), 2);
        assert_eq!(formats[0].quality, "1080p HD");
        assert_eq!(formats[0].filesize, "200.0 B");
        assert_eq!(formats[1].quality, "720p HD");
        assert_eq!(formats[1].filesize, "50.0 B");
    }

    #[test]
    fn test_tie_keeps_first_seen() {
        let mut first = video_desc(1080, 100.0);
        first.format_id = Some("first".to_string());
        let mut second = video_desc(1080, 100.0);
        second.format_id = Some("second".to_string());

        let formats = reduce_formats(&metadata_with(vec![first, second]));
        assert_eq!(formats.len(), 1);
        assert_eq!(formats[0].format_id, "first");
    }

    #[test]
    fn test_missing_size_treated_as_zero() {
        let mut no_size = video_desc(720, 0.0);
        no_size.filesize = None;
        no_size.format_id = Some("sizeless".to_string());

        let formats = reduce_formats(&metadata_with(vec![no_size, video_desc(720, 10.0)]));
        assert_eq!(formats.len(), 1);
        assert_ne!(formats[0].format_id, "sizeless");
    }

    #[test]
    fn test_result_capped_at_five() {
        let heights = [2160, 1440, 1080, 720, 480, 360, 240];
        let meta = metadata_with(heights.iter().map(|h| video_desc(*h, 1.0)).collect());

        let formats = reduce_formats(&meta);
        assert_eq!(formats.len(), 5);
    }

    #[test]
    fn test_audio_only_filtered_out() {
        let mut audio = video_desc(0, 100.0);
        audio.vcodec = Some("none".to_string());
        audio.height = None;

        let formats = reduce_formats(&metadata_with(vec![audio]));
        assert!(formats.is_empty());
    }

    #[test]
    fn test_missing_vcodec_counts_as_video() {
        let mut desc = video_desc(360, 5.0);
        desc.vcodec = None;

        let formats = reduce_formats(&metadata_with(vec![desc]));
        assert_eq!(formats.len(), 1);
        assert_eq!(formats[0].quality, "360p");
    }

    #[test]
    fn test_direct_url_fallback() {
        let meta = RawMetadata {
            title: Some("clip".to_string()),
            url: Some("https://cdn.example/direct".to_string()),
            ext: Some("webm".to_string()),
            filesize: Some(1536.0),
            ..Default::default()
        };

        let formats = reduce_formats(&meta);
        assert_eq!(formats.len(), 1);
        assert_eq!(formats[0].format_id, "direct");
        assert_eq!(formats[0].quality, "Standard Quality");
        assert_eq!(formats[0].filesize, "1.5 KB");
        assert_eq!(formats[0].filename, "clip.webm");
    }

    #[test]
    fn test_fallback_only_when_empty() {
        let mut meta = metadata_with(vec![video_desc(480, 10.0)]);
        meta.url = Some("https://cdn.example/direct".to_string());

        let formats = reduce_formats(&meta);
        assert_eq!(formats.len(), 1);
        assert_ne!(formats[0].format_id, "direct");
    }

    #[test]
    fn test_quality_label_height_tiers() {
        let cases = [
            (4320, "4K (2160p)"),
            (2160, "4K (2160p)"),
            (1440, "1440p HD"),
            (1080, "1080p HD"),
            (720, "720p HD"),
            (480, "480p"),
            (360, "360p"),
            (240, "240p"),
        ];
        for (height, expected) in cases {
            let desc = StreamDescriptor {
                height: Some(height),
                ..Default::default()
            };
            assert_eq!(quality_label(&desc), expected, "height {height}");
        }

        let tiny = StreamDescriptor {
            height: Some(144),
            ..Default::default()
        };
        assert_eq!(quality_label(&tiny), "144p");
    }

    #[test]
    fn test_quality_label_width_fallback() {
        let cases = [
            (3840, "4K (2160p)"),
            (2560, "1440p HD"),
            (1920, "1080p HD"),
            (1280, "720p HD"),
            (640, "Standard Quality"),
        ];
        for (width, expected) in cases {
            let desc = StreamDescriptor {
                width: Some(width),
                ..Default::default()
            };
            assert_eq!(quality_label(&desc), expected, "width {width}");
        }
    }

    #[test]
    fn test_quality_label_no_dimensions() {
        assert_eq!(quality_label(&StreamDescriptor::default()), "Standard Quality");
    }

    #[test]
    fn test_filename_uses_sanitized_title() {
        let meta = RawMetadata {
            title: Some("My: Video Title".to_string()),
            formats: Some(vec![video_desc(720, 1.0)]),
            ..Default::default()
        };

        let formats = reduce_formats(&meta);
        assert_eq!(formats[0].filename, "My_Video_Title.mp4");
    }
}
