//! Configuration structures and loaders.

use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, instrument};
use vignette_error::{ConfigError, VignetteError, VignetteResult};

/// Gemini provider settings.
///
/// ```toml
/// [gemini]
/// text_model = "gemini-2.5-flash"
/// image_model = "gemini-2.5-flash-image"
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct GeminiConfig {
    /// Model used for story text
    pub text_model: String,
    /// Model used for scene images
    pub image_model: String,
    /// Base URL of the REST API
    pub api_base: String,
    /// Sampling temperature for story text
    pub temperature: f32,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            text_model: "gemini-2.5-flash".to_string(),
            image_model: "gemini-2.5-flash-image".to_string(),
            api_base: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            temperature: 0.9,
        }
    }
}

/// Asset storage settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct AssetConfig {
    /// Root directory for generated images
    pub base_dir: PathBuf,
    /// Placeholder reference used when generation gives up
    pub fallback_path: String,
    /// MIME type assumed when a provider omits one
    pub mime_type: String,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from("assets"),
            fallback_path: "assets/fallback.png".to_string(),
            mime_type: "image/png".to_string(),
        }
    }
}

/// Retry and pacing settings for asset generation.
///
/// The wait between attempt `n` (zero based) and the next is `2^n` time units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Attempts per scene before falling back
    pub max_attempts: u32,
    /// Length of one time unit in milliseconds
    pub time_unit_ms: u64,
    /// Delay between consecutive generation calls, in time units
    pub pacing_units: u32,
}

impl RetryConfig {
    /// One time unit as a [`Duration`].
    pub fn time_unit(&self) -> Duration {
        Duration::from_millis(self.time_unit_ms)
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            time_unit_ms: 1000,
            pacing_units: 1,
        }
    }
}

/// Top-level Vignette configuration.
///
/// # Example
///
/// ```no_run
/// use vignette_config::VignetteConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = VignetteConfig::load()?;
/// println!("Rendering with {}", config.gemini.image_model);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct VignetteConfig {
    /// Gemini provider settings
    #[serde(default)]
    pub gemini: GeminiConfig,
    /// Asset storage settings
    #[serde(default)]
    pub assets: AssetConfig,
    /// Retry and pacing settings
    #[serde(default)]
    pub retry: RetryConfig,
}

impl VignetteConfig {
    /// Load configuration from a single file.
    ///
    /// Sections missing from the file take their built-in defaults.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<std::path::Path>) -> VignetteResult<Self> {
        debug!("Loading configuration from file");

        Config::builder()
            .add_source(File::from(path.as_ref()))
            .build()
            .map_err(|e| {
                VignetteError::from(ConfigError::new(format!(
                    "Failed to read configuration from {}: {}",
                    path.as_ref().display(),
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                VignetteError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })
    }

    /// Load configuration from every layer.
    ///
    /// User files are optional and skipped when absent.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if a present source is malformed.
    #[instrument]
    pub fn load() -> VignetteResult<Self> {
        debug!("Loading configuration: env > current dir > home dir > bundled defaults");

        const DEFAULT_CONFIG: &str = include_str!("../../../vignette.toml");

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/vignette/vignette.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder
            .add_source(File::with_name("vignette").required(false))
            .add_source(
                Environment::with_prefix("VIGNETTE")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            );

        builder
            .build()
            .map_err(|e| {
                VignetteError::from(ConfigError::new(format!(
                    "Failed to build configuration: {}",
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                VignetteError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })
    }
}
