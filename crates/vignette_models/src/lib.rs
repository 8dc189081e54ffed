//! Provider drivers for Vignette.
//!
//! - [`GeminiClient`] generates story text through the `gemini-rust` SDK.
//! - [`GeminiImageClient`] renders scene images through the Gemini REST API.
//!
//! Both read `GEMINI_API_KEY` from the environment unless a key is passed
//! explicitly.
//!
//! ```no_run
//! use vignette_core::RenderRequest;
//! use vignette_interface::ImageDriver;
//! use vignette_models::GeminiImageClient;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = GeminiImageClient::new(
//!     "https://generativelanguage.googleapis.com/v1beta",
//!     "gemini-2.5-flash-image",
//! )?;
//! let image = client.render(&RenderRequest::new("A lighthouse at dusk")).await?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod gemini;

pub use gemini::{
    Candidate, Content, GeminiClient, GeminiImageClient, GenerateContentRequest,
    GenerateContentResponse, GenerationConfig, InlineData, InlineDataPart, Part, TextPart,
};
