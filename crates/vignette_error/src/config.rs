//! Configuration error types.

use std::path::Path;

/// A setting that cannot be used as given.
///
/// Raised while layering `vignette.toml` sources and environment overrides,
/// or when a configured path such as the fallback placeholder is missing.
/// These are never retried.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Configuration Error: {} at line {} in {}", message, line, file)]
pub struct ConfigError {
    /// What is wrong with the setting
    pub message: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl ConfigError {
    /// Create a configuration error at the caller's location.
    ///
    /// ```
    /// use vignette_error::ConfigError;
    ///
    /// let err = ConfigError::new("retry.max_attempts must be at least 1");
    /// assert!(err.message.contains("max_attempts"));
    /// ```
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: location.line(),
            file: location.file(),
        }
    }

    /// A configured `setting` names a file that is not there.
    ///
    /// ```
    /// use vignette_error::ConfigError;
    ///
    /// let err = ConfigError::missing_file("assets.fallback_path", "assets/fallback.png".as_ref());
    /// assert!(err.message.starts_with("assets.fallback_path"));
    /// assert!(err.message.contains("assets/fallback.png"));
    /// ```
    #[track_caller]
    pub fn missing_file(setting: &str, path: &Path) -> Self {
        Self::new(format!(
            "{setting} points at {}, which does not exist",
            path.display()
        ))
    }
}
