//! Error types for the Vignette story studio.
//!
//! This crate provides the foundation error types used throughout the Vignette workspace.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use vignette_error::{ConfigError, VignetteResult};
//!
//! fn load_settings() -> VignetteResult<String> {
//!     Err(ConfigError::new("assets.base_dir is empty"))?
//! }
//!
//! match load_settings() {
//!     Ok(value) => println!("Got: {}", value),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod builder;
mod config;
mod error;
mod gemini;
mod json;
mod not_found;
mod storage;
mod story;

pub use builder::{BuilderError, BuilderErrorKind};
pub use config::ConfigError;
pub use error::{VignetteError, VignetteErrorKind, VignetteResult};
pub use gemini::{GeminiError, GeminiErrorKind, RetryableError};
pub use json::JsonError;
pub use not_found::{EntityKind, NotFoundError};
pub use storage::{StorageError, StorageErrorKind};
pub use story::{StoryError, StoryErrorKind};
