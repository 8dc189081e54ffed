//! Google Gemini drivers.
//!
//! - [`GeminiClient`] - text generation via `gemini-rust`
//! - [`GeminiImageClient`] - image generation via the REST `generateContent` endpoint

mod client;
mod dto;
mod image;

pub use client::GeminiClient;
pub use dto::{
    Candidate, Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig,
    InlineData, InlineDataPart, Part, TextPart,
};
pub use image::GeminiImageClient;

use vignette_error::{GeminiError, GeminiErrorKind};

/// Result type for Gemini operations.
pub(crate) type GeminiResult<T> = Result<T, GeminiError>;

/// Read the API key from `GEMINI_API_KEY`.
pub(crate) fn api_key_from_env() -> GeminiResult<String> {
    match std::env::var("GEMINI_API_KEY") {
        Ok(key) if !key.trim().is_empty() => Ok(key),
        _ => Err(GeminiError::new(GeminiErrorKind::MissingApiKey)),
    }
}

/// Reject empty keys passed explicitly.
pub(crate) fn require_key(api_key: String) -> GeminiResult<String> {
    if api_key.trim().is_empty() {
        Err(GeminiError::new(GeminiErrorKind::MissingApiKey))
    } else {
        Ok(api_key)
    }
}
