//! Request and response types exchanged with text and image providers.

use serde::{Deserialize, Serialize};

/// Text generation request.
///
/// # Examples
///
/// ```
/// use vignette_core::GenerateRequest;
///
/// let request = GenerateRequest::builder()
///     .prompt("Outline a story about a lighthouse keeper")
///     .temperature(Some(0.7))
///     .build()
///     .unwrap();
///
/// assert!(request.model.is_none());
/// assert!(request.json_output);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_builder::Builder)]
pub struct GenerateRequest {
    /// User prompt
    #[builder(setter(into))]
    pub prompt: String,
    /// Optional system instruction
    #[builder(default)]
    pub system: Option<String>,
    /// Model identifier to use instead of the driver default
    #[builder(default)]
    pub model: Option<String>,
    /// Sampling temperature (0.0 to 2.0)
    #[builder(default)]
    pub temperature: Option<f32>,
    /// Maximum number of tokens to generate
    #[builder(default)]
    pub max_tokens: Option<u32>,
    /// Ask the provider for a bare JSON response
    #[builder(default = "true")]
    pub json_output: bool,
}

impl GenerateRequest {
    /// Creates a new builder for `GenerateRequest`.
    pub fn builder() -> GenerateRequestBuilder {
        GenerateRequestBuilder::default()
    }
}

/// Text generation response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateResponse {
    /// Generated text
    pub text: String,
}

/// Image render request: one text prompt in, at most one image out.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RenderRequest {
    /// Fully resolved render prompt
    pub prompt: String,
    /// Model identifier to use instead of the driver default
    pub model: Option<String>,
}

impl RenderRequest {
    /// Render request for the driver's default model.
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            model: None,
        }
    }
}

/// Binary image payload returned by an image provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RenderedImage {
    /// MIME type, e.g. "image/png"
    pub mime_type: String,
    /// Raw image bytes
    pub data: Vec<u8>,
}

impl RenderedImage {
    /// True when the payload carries no bytes.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
