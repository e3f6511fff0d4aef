//! Seams between the dispatch surface and the outbound clients.

use crate::catalog::MemeConfig;
use crate::types::{CaptionResult, GenerationResult};
use async_trait::async_trait;

/// Produces persona text for a prompt.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate a reply. Must not fail; problems become `Unavailable`.
    async fn generate(&self, prompt: &str, persona: &str) -> GenerationResult;
}

/// Renders a captioned meme image.
#[async_trait]
pub trait MemeCaptioner: Send + Sync {
    /// Caption the configured template. Must not fail; problems become `Unavailable`.
    async fn caption(&self, meme: &MemeConfig) -> CaptionResult;
}
