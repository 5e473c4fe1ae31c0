use thiserror::Error;

/// Substrings in the extraction tool's error output that all mean the same
/// thing to a user: the target wants an interactive sign-in.
const BOT_CHECK_MARKERS: &[&str] = &[
    "Sign in to confirm you're not a bot",
    "Unable to fetch GVS PO Token",
    "Missing required Visitor Data",
];

/// Characters of upstream error text surfaced in the generic failure message.
const ERROR_EXCERPT_LEN: usize = 100;

/// User-facing extraction failures. The Display strings are the wire
/// contract: they are returned verbatim in the JSON `error` field.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Invalid YouTube URL")]
    InvalidUrl,

    #[error("No video found in the provided URL")]
    NoVideoFound,

    /// The target refused every persona with a sign-in or bot-check wall.
    /// Surfaced verbatim so clients can offer a "try again later" flow.
    #[error("Sign in to confirm you're not a bot")]
    BotCheckRequired,

    /// Generic extraction failure carrying a truncated excerpt of the last
    /// upstream error.
    #[error(
        "Failed to extract video information. Please try a different video or try again later. ({0}...)"
    )]
    ExtractionFailed(String),

    /// Catch-all whose message is deliberately generic; the detail is logged
    /// server-side only.
    #[error("Internal server error occurred")]
    Internal(String),
}

/// Classifies the last error observed after every persona has failed. The
/// tool's error text is the only signal available, so this is a substring
/// match by contract.
pub fn classify_failure(last_error: &str) -> ExtractError {
    let bot_check = BOT_CHECK_MARKERS.iter().any(|m| last_error.contains(m))
        || (last_error.contains("Operation not permitted") && last_error.contains("Cookies"));

    if bot_check {
        ExtractError::BotCheckRequired
    } else {
        ExtractError::ExtractionFailed(last_error.chars().take(ERROR_EXCERPT_LEN).collect())
    }
}
