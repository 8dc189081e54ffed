//! Vignette - short-form story studio
//!
//! Vignette drafts a six-scene story from a one-line idea, renders an image
//! for every scene and keeps those images in step with later edits. Scene
//! prompts refer to characters and locations by name; before rendering each
//! name is expanded into the entity's full description, and a scene is
//! rendered again only when its expanded prompt changed.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use vignette::{
//!     AssetGenerator, FileSystemStorage, GeminiClient, GeminiImageClient, SceneSynchronizer,
//!     SessionId, StoryGenerator, Studio,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let images = GeminiImageClient::new(
//!         "https://generativelanguage.googleapis.com/v1beta",
//!         "gemini-2.5-flash-image",
//!     )?;
//!     let generator = AssetGenerator::builder()
//!         .driver(Arc::new(images))
//!         .storage(Arc::new(FileSystemStorage::new("assets")?))
//!         .session(SessionId::new())
//!         .fallback_reference("assets/fallback.png")
//!         .build()?;
//!     generator.verify_fallback().await?;
//!
//!     let text = StoryGenerator::new(Arc::new(GeminiClient::new("gemini-2.5-flash")?));
//!     let mut studio = Studio::new(text, SceneSynchronizer::new(generator));
//!
//!     studio.start("A lighthouse keeper finds a message in a bottle").await?;
//!     let story = studio.draft_story().await?;
//!     println!("{}", serde_json::to_string_pretty(story)?);
//!     Ok(())
//! }
//! ```
//!
//! # Cargo Features
//!
//! - `gemini` (default) - Google Gemini text and image drivers, and the
//!   `vignette` binary
//! - `api` - enables tests that call the live Gemini API
//!
//! # Architecture
//!
//! - `vignette_error` - Error types
//! - `vignette_core` - Story data model and provider request types
//! - `vignette_interface` - `TextDriver` and `ImageDriver` traits
//! - `vignette_config` - Layered TOML configuration
//! - `vignette_storage` - Scene asset storage
//! - `vignette_models` - Gemini drivers
//! - `vignette_engine` - Reference resolution and incremental regeneration
//! - `vignette_studio` - Story drafting, editing and sessions
//!
//! This crate (`vignette`) re-exports everything for convenience.

pub use vignette_config::*;
pub use vignette_core::*;
pub use vignette_engine::*;
pub use vignette_error::*;
pub use vignette_interface::*;
pub use vignette_storage::*;
pub use vignette_studio::*;

#[cfg(feature = "gemini")]
pub use vignette_models::{GeminiClient, GeminiImageClient};

pub mod telemetry;
