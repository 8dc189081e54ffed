//! JSON encoding errors.

/// A story or session could not be written out as JSON.
///
/// Model replies that fail to parse are story errors, not this type; see
/// [`StoryErrorKind::Parse`](crate::StoryErrorKind::Parse).
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("JSON Error: {} at line {} in {}", message, line, file)]
pub struct JsonError {
    /// Message from the serializer
    pub message: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl JsonError {
    /// Wrap a serializer message, recording the caller's location.
    ///
    /// ```
    /// use vignette_error::JsonError;
    ///
    /// let err = JsonError::new("key must be a string");
    /// assert!(err.to_string().starts_with("JSON Error: key must be a string"));
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
}
