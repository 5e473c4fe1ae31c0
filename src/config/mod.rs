use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing_subscriber::filter::{EnvFilter, LevelFilter};

const DEFAULT_PORT: u16 = 5000;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    #[serde(default = "default_port")]
    pub port: u16,
    /// Lowers the default log filter to debug. Left unset in the file, the
    /// binary's own default applies (the dev server and the bare handler
    /// differ).
    #[serde(default)]
    pub debug: Option<bool>,
    #[serde(default = "default_log_format")]
    pub log_format: String,
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_log_format() -> String {
    "json".to_string()
}

fn default_static_dir() -> String {
    "static".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            debug: None,
            log_format: default_log_format(),
            static_dir: default_static_dir(),
        }
    }
}

impl Config {
    pub fn from_file(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {path}"))?;
        toml::from_str(&contents).with_context(|| format!("Failed to parse config file {path}"))
    }

    pub fn get_logging_format(&self) -> &str {
        &self.log_format
    }

    /// Effective debug flag for a binary whose baseline is `default_debug`.
    pub fn debug_enabled(&self, default_debug: bool) -> bool {
        self.debug.unwrap_or(default_debug)
    }
}

/// Config file discovery: explicit flag, then `CONFIG_FILE`, then the XDG
/// config dir, then `~/.config/grabtube/config.toml`.
pub fn config_path(explicit: Option<&str>) -> Option<String> {
    if let Some(path) = explicit {
        return Some(path.to_string());
    }

    if let Ok(path) = std::env::var("CONFIG_FILE") {
        return Some(path);
    }

    if let Ok(xdg_config_home) = std::env::var("XDG_CONFIG_HOME") {
        let config_path = format!("{xdg_config_home}/grabtube/config.toml");
        if std::path::Path::new(&config_path).exists() {
            return Some(config_path);
        }
    }

    if let Some(home) = dirs::home_dir() {
        let config_path = format!("{}/.config/grabtube/config.toml", home.display());
        if std::path::Path::new(&config_path).exists() {
            return Some(config_path);
        }
    }

    None
}

/// Loads the config for one binary: optional file, then `PORT` and `DEBUG`
/// environment overrides.
pub fn load(explicit_path: Option<&str>, default_debug: bool) -> Result<Config> {
    let mut config = match config_path(explicit_path) {
        Some(path) => Config::from_file(&path)
            .with_context(|| format!("Failed to load config from {path}"))?,
        None => Config::default(),
    };

    if let Ok(port) = std::env::var("PORT") {
        config.port = port
            .parse()
            .with_context(|| format!("Invalid PORT value: {port}"))?;
    }

    if let Ok(debug) = std::env::var("DEBUG") {
        config.debug = Some(debug.to_lowercase() == "true");
    }

    if config.debug.is_none() {
        config.debug = Some(default_debug);
    }

    Ok(config)
}

/// Tracing bootstrap shared by both binaries: `RUST_LOG` wins, otherwise
/// the debug flag picks the default level; output is JSON or human-readable
/// per the config.
pub fn init_tracing(config: &Config) {
    let default_level = if config.debug_enabled(false) {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };

    let env_filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy();

    if config.get_logging_format() == "json" {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(env_filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.port, 5000);
        assert_eq!(config.log_format, "json");
        assert_eq!(config.static_dir, "static");
        assert!(config.debug.is_none());
    }

    #[test]
    fn test_parse_partial_file() {
        let config: Config = toml::from_str("port = 8080").unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.log_format, "json");
    }

    #[test]
    fn test_parse_full_file() {
        let config: Config = toml::from_str(
            "port = 9000\ndebug = true\nlog_format = \"pretty\"\nstatic_dir = \"www\"",
        )
        .unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.debug, Some(true));
        assert_eq!(config.log_format, "pretty");
        assert_eq!(config.static_dir, "www");
    }

    #[test]
    fn test_debug_default_per_binary() {
        let config = Config::default();
        assert!(config.debug_enabled(true));
        assert!(!config.debug_enabled(false));

        let pinned = Config {
            debug: Some(false),
            ..Default::default()
        };
        assert!(!pinned.debug_enabled(true));
    }
}
