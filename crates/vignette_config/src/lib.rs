//! Configuration for Vignette.
//!
//! Settings are read from TOML with the following precedence (later sources
//! override earlier ones):
//! - Bundled defaults (`include_str!` of `vignette.toml`)
//! - `~/.config/vignette/vignette.toml`
//! - `./vignette.toml`
//! - Environment variables prefixed `VIGNETTE__`, e.g. `VIGNETTE__RETRY__TIME_UNIT_MS=10`
//!
//! API keys are not part of the configuration; drivers read them from the
//! environment.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod settings;

pub use settings::{AssetConfig, GeminiConfig, RetryConfig, VignetteConfig};
