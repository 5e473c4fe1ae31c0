/// Characters stripped from titles before they become download filenames.
const INVALID_FILENAME_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

const FILENAME_MAX_LEN: usize = 50;

/// Human-readable file size: successive division by 1024 through B/KB/MB/GB,
/// one decimal place, falling through to TB. Missing or zero sizes are
/// reported as unknown rather than "0.0 B".
pub fn format_filesize(size: Option<f64>) -> String {
    let mut value = match size {
        Some(s) if s > 0.0 => s,
        _ => return "Unknown size".to_string(),
    };

    for unit in ["B", "KB", "MB", "GB"] {
        if value < 1024.0 {
            return format!("{value:.1} {unit}");
        }
        value /= 1024.0;
    }

    format!("{value:.1} TB")
}

/// `mm:ss`, or `hh:mm:ss` once the duration reaches an hour. Missing or
/// zero durations are "Unknown".
pub fn format_duration(duration: Option<f64>) -> String {
    let total = match duration {
        Some(d) if d > 0.0 => d as u64,
        _ => return "Unknown".to_string(),
    };

    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;

    if hours > 0 {
        format!("{hours:02}:{minutes:02}:{seconds:02}")
    } else {
        format!("{minutes:02}:{seconds:02}")
    }
}

/// Makes a video title safe to suggest as a download filename: strips
/// filesystem-hostile characters, trims, turns spaces into underscores and
/// caps the length. An empty title becomes "video".
pub fn sanitize_filename(title: &str) -> String {
    if title.is_empty() {
        return "video".to_string();
    }

    let stripped: String = title
        .chars()
        .filter(|c| !INVALID_FILENAME_CHARS.contains(c))
        .collect();

    stripped
        .trim()
        .replace(' ', "_")
        .chars()
        .take(FILENAME_MAX_LEN)
        .collect()
}
