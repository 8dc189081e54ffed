//! Story generation and session error types.

/// Specific error conditions for story generation and editing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum StoryErrorKind {
    /// Model response contained no JSON payload
    #[display("No JSON found in model response: {}", _0)]
    MissingJson(String),
    /// Model response JSON did not match the expected shape
    #[display("Failed to parse model response: {}", _0)]
    Parse(String),
    /// Story violates a structural invariant
    #[display("Invalid story: {}", _0)]
    Invalid(String),
    /// Operation needs an overview that the session does not have yet
    #[display("Session has no overview yet; start a session from an idea first")]
    MissingOverview,
    /// Operation needs a story that the session does not have yet
    #[display("Session has no story yet; draft the story first")]
    MissingStory,
    /// Session file could not be read or written
    #[display("Session file error: {}", _0)]
    SessionFile(String),
}

/// Error type for story operations.
///
/// # Examples
///
/// ```
/// use vignette_error::{StoryError, StoryErrorKind};
///
/// let err = StoryError::new(StoryErrorKind::Invalid("expected 6 scenes, got 5".into()));
/// assert!(format!("{}", err).contains("expected 6 scenes"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Story Error: {} at line {} in {}", kind, line, file)]
pub struct StoryError {
    /// The specific error condition
    pub kind: StoryErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl StoryError {
    /// Create a new StoryError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: StoryErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
