/// A fixed bundle of simulated-browser request headers handed to the
/// extraction tool. Personas carry no identity and are never mutated; the
/// orchestrator walks [`PERSONAS`] in order until one gets through.
#[derive(Debug, Clone, Copy)]
pub struct Persona {
    pub name: &'static str,
    pub user_agent: &'static str,
    pub referer: &'static str,
    pub headers: &'static [(&'static str, &'static str)],
    /// Extra extractor tuning passed through to the tool, when set.
    pub extractor_args: Option<&'static str>,
}

const CHROME_UA: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
const SAFARI_UA: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.0 Safari/605.1.15";
const FIREFOX_UA: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:120.0) Gecko/20100101 Firefox/120.0";
const MOBILE_CHROME_UA: &str = "Mozilla/5.0 (Linux; Android 10; K) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Mobile Safari/537.36";

/// Ordered attempt list. Desktop Chrome with full fetch-metadata headers
/// first, a bare minimum last.
pub const PERSONAS: &[Persona] = &[
    Persona {
        name: "desktop-chrome",
        user_agent: CHROME_UA,
        referer: "https://www.youtube.com/",
        headers: &[
            (
                "Accept",
                "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,image/apng,*/*;q=0.8",
            ),
            ("Accept-Language", "en-US,en;q=0.9"),
            ("Accept-Encoding", "gzip, deflate, br"),
            ("DNT", "1"),
            ("Connection", "keep-alive"),
            ("Upgrade-Insecure-Requests", "1"),
            ("Sec-Fetch-Dest", "document"),
            ("Sec-Fetch-Mode", "navigate"),
            ("Sec-Fetch-Site", "none"),
            ("Cache-Control", "max-age=0"),
        ],
        extractor_args: Some("youtube:skip=dash,hls;player_skip=configs,webpage"),
    },
    Persona {
        name: "safari",
        user_agent: SAFARI_UA,
        referer: "https://www.youtube.com/",
        headers: &[
            (
                "Accept",
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
            ),
            ("Accept-Language", "en-US,en;q=0.5"),
            ("Accept-Encoding", "gzip, deflate, br"),
            ("DNT", "1"),
            ("Connection", "keep-alive"),
            ("Upgrade-Insecure-Requests", "1"),
        ],
        extractor_args: None,
    },
    Persona {
        name: "firefox",
        user_agent: FIREFOX_UA,
        referer: "https://www.youtube.com/",
        headers: &[
            (
                "Accept",
                "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8",
            ),
            ("Accept-Language", "en-US,en;q=0.5"),
            ("Accept-Encoding", "gzip, deflate, br"),
            ("DNT", "1"),
            ("Connection", "keep-alive"),
            ("Upgrade-Insecure-Requests", "1"),
            ("Sec-Fetch-Dest", "document"),
            ("Sec-Fetch-Mode", "navigate"),
            ("Sec-Fetch-Site", "none"),
        ],
        extractor_args: None,
    },
    Persona {
        name: "mobile-chrome",
        user_agent: MOBILE_CHROME_UA,
        referer: "https://m.youtube.com/",
        headers: &[
            (
                "Accept",
                "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,image/apng,*/*;q=0.8",
            ),
            ("Accept-Language", "en-US,en;q=0.9"),
            ("Accept-Encoding", "gzip, deflate, br"),
            ("DNT", "1"),
            ("Connection", "keep-alive"),
            ("Upgrade-Insecure-Requests", "1"),
        ],
        extractor_args: None,
    },
    Persona {
        name: "minimal",
        user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36",
        referer: "https://www.youtube.com/",
        headers: &[],
        extractor_args: None,
    },
];
