//! Trait definitions for text and image backends.

use async_trait::async_trait;
use vignette_core::{GenerateRequest, GenerateResponse, RenderRequest, RenderedImage};
use vignette_error::VignetteResult;

/// Backend that turns a text prompt into generated text.
///
/// Story generation and every edit go through this trait.
#[async_trait]
pub trait TextDriver: Send + Sync {
    /// Generate text for a single request.
    async fn generate(&self, req: &GenerateRequest) -> VignetteResult<GenerateResponse>;

    /// Provider name (e.g., "gemini").
    fn provider_name(&self) -> &'static str;

    /// Default model identifier.
    fn model_name(&self) -> &str;
}

/// Backend that renders a text prompt into an image.
#[async_trait]
pub trait ImageDriver: Send + Sync {
    /// Render one image.
    ///
    /// Returns `Ok(None)` when the provider answered without a renderable
    /// payload. Callers treat that the same as a transient failure.
    async fn render(&self, req: &RenderRequest) -> VignetteResult<Option<RenderedImage>>;

    /// Provider name (e.g., "gemini").
    fn provider_name(&self) -> &'static str;

    /// Default model identifier.
    fn model_name(&self) -> &str;
}
