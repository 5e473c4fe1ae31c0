use super::{extractor::MetadataSource, personas::Persona, types::RawMetadata};
use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, info, warn};

/// Metadata source backed by the `yt-dlp` executable. Extraction is metadata
/// only; no media bytes are ever downloaded. The call is not wrapped in a
/// timeout: a hanging tool call blocks the request that made it, nothing
/// else.
pub struct YtDlpSource;

impl YtDlpSource {
    pub fn new() -> Self {
        Self
    }

    fn build_command(url: &str, persona: &Persona) -> Command {
        let mut cmd = Command::new("yt-dlp");
        cmd.arg("--dump-single-json")
            .arg("--no-download")
            .arg("--no-warnings")
            .arg("--quiet")
            .arg("--user-agent")
            .arg(persona.user_agent)
            .arg("--referer")
            .arg(persona.referer);

        for (name, value) in persona.headers {
            cmd.arg("--add-header").arg(format!("{name}:{value}"));
        }

        if let Some(args) = persona.extractor_args {
            cmd.arg("--extractor-args").arg(args);
        }

        cmd.arg(url);
        cmd
    }
}

impl Default for YtDlpSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MetadataSource for YtDlpSource {
    fn name(&self) -> &'static str {
        "yt-dlp"
    }

    async fn fetch(&self, url: &str, persona: &Persona) -> Result<RawMetadata> {
        debug!("Extracting metadata with yt-dlp ({}) for: {}", persona.name, url);

        let output = Self::build_command(url, persona)
            .output()
            .await
            .context("Failed to run yt-dlp")?;

        if !output.status.success() {
            let error = String::from_utf8_lossy(&output.stderr);
            return Err(anyhow::anyhow!(
                "Metadata extraction failed: {}",
                error.trim()
            ));
        }

        let json_str = String::from_utf8_lossy(&output.stdout);
        let metadata: RawMetadata =
            serde_json::from_str(&json_str).context("Failed to parse metadata dump")?;

        Ok(metadata)
    }

    async fn test_availability() -> bool {
        match Command::new("yt-dlp").arg("--version").output().await {
            Ok(output) => {
                if output.status.success() {
                    let version = String::from_utf8_lossy(&output.stdout);
                    info!("yt-dlp is available, version: {}", version.trim());
                    true
                } else {
                    warn!("yt-dlp command failed");
                    false
                }
            }
            Err(e) => {
                warn!("yt-dlp not found: {}", e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::personas::PERSONAS;

    #[test]
    fn test_command_carries_persona_headers() {
        let persona = &PERSONAS[0];
        let cmd = YtDlpSource::build_command("https://www.youtube.com/watch?v=x", persona);
        let args: Vec<String> = cmd
            .as_std()
            .get_args()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();

        assert!(args.contains(&"--dump-single-json".to_string()));
        assert!(args.contains(&persona.user_agent.to_string()));
        assert!(args.contains(&"Sec-Fetch-Mode:navigate".to_string()));
        assert!(args.contains(&"youtube:skip=dash,hls;player_skip=configs,webpage".to_string()));
        assert_eq!(args.last().map(String::as_str), Some("https://www.youtube.com/watch?v=x"));
    }

    #[test]
    fn test_minimal_persona_adds_no_headers() {
        let persona = PERSONAS.last().unwrap();
        let cmd = YtDlpSource::build_command("https://www.youtube.com/watch?v=x", persona);
        let args: Vec<String> = cmd
            .as_std()
            .get_args()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();

        assert!(!args.contains(&"--add-header".to_string()));
        assert!(!args.contains(&"--extractor-args".to_string()));
    }
}
