//! Top-level error wrapper types.

use crate::{
    BuilderError, ConfigError, GeminiError, JsonError, NotFoundError, RetryableError,
    StorageError, StorageErrorKind, StoryError,
};

/// Every error condition the Vignette crates can raise.
///
/// # Examples
///
/// ```
/// use vignette_error::{VignetteError, JsonError};
///
/// let json_err = JsonError::new("trailing comma");
/// let err: VignetteError = json_err.into();
/// assert!(format!("{}", err).contains("JSON Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum VignetteErrorKind {
    /// Story or session could not be encoded as JSON
    #[from(JsonError)]
    Json(JsonError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Builder error
    #[from(BuilderError)]
    Builder(BuilderError),
    /// Asset storage error
    #[from(StorageError)]
    Storage(StorageError),
    /// Gemini provider error
    #[from(GeminiError)]
    Gemini(GeminiError),
    /// Story generation or session error
    #[from(StoryError)]
    Story(StoryError),
    /// Requested entity does not exist
    #[from(NotFoundError)]
    NotFound(NotFoundError),
}

/// Vignette error with kind discrimination.
///
/// # Examples
///
/// ```
/// use vignette_error::{VignetteResult, ConfigError};
///
/// fn might_fail() -> VignetteResult<()> {
///     Err(ConfigError::new("Missing field"))?
/// }
///
/// let err = might_fail().unwrap_err();
/// assert!(err.is_configuration());
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Vignette Error: {}", _0)]
pub struct VignetteError(Box<VignetteErrorKind>);

impl VignetteError {
    /// Create a new error from a kind.
    pub fn new(kind: VignetteErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &VignetteErrorKind {
        &self.0
    }

    /// True for fatal setup problems such as missing credentials.
    ///
    /// Configuration errors are surfaced to the caller immediately and never retried.
    pub fn is_configuration(&self) -> bool {
        match self.kind() {
            VignetteErrorKind::Config(_) => true,
            VignetteErrorKind::Gemini(e) => e.kind.is_configuration(),
            VignetteErrorKind::Storage(e) => matches!(e.kind, StorageErrorKind::InvalidConfig(_)),
            _ => false,
        }
    }

    /// True when the requested entity id does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self.kind(), VignetteErrorKind::NotFound(_))
    }
}

impl RetryableError for VignetteError {
    fn is_retryable(&self) -> bool {
        match self.kind() {
            VignetteErrorKind::Gemini(e) => e.is_retryable(),
            VignetteErrorKind::Storage(e) => matches!(
                e.kind,
                StorageErrorKind::DirectoryCreation(_) | StorageErrorKind::FileWrite(_)
            ),
            _ => false,
        }
    }
}

// Generic From implementation for any type that converts to VignetteErrorKind
impl<T> From<T> for VignetteError
where
    T: Into<VignetteErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Vignette operations.
pub type VignetteResult<T> = std::result::Result<T, VignetteError>;
