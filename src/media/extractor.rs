use super::{personas::Persona, types::RawMetadata};
use anyhow::Result;
use async_trait::async_trait;

/// Seam between the orchestrator and the external extraction tool. The tool
/// is an opaque collaborator: given a URL and a persona it either returns a
/// metadata dump or fails with an error message, and that message text is
/// the only failure signal available.
#[async_trait]
pub trait MetadataSource: Send + Sync {
    /// Human-readable name of the source
    fn name(&self) -> &'static str;

    /// Fetch raw metadata for the URL using the given persona's headers
    async fn fetch(&self, url: &str, persona: &Persona) -> Result<RawMetadata>;

    /// Test if this source is available on the system
    async fn test_availability() -> bool
    where
        Self: Sized;
}
