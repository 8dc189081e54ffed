//! Lookup failures for story entities.

/// The kind of story entity a lookup targeted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum EntityKind {
    /// A character in the cast
    #[display("Character")]
    Character,
    /// A location
    #[display("Location")]
    Location,
    /// A scene
    #[display("Scene")]
    Scene,
}

/// A requested character, location or scene id has no match.
///
/// Not-found errors are client-visible and never retried.
///
/// # Examples
///
/// ```
/// use vignette_error::{EntityKind, NotFoundError};
///
/// let err = NotFoundError::new(EntityKind::Character, 4);
/// assert!(format!("{}", err).contains("Character with id 4 not found"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("{} with id {} not found at line {} in {}", entity, id, line, file)]
pub struct NotFoundError {
    /// Entity kind that was looked up
    pub entity: EntityKind,
    /// Requested id
    pub id: u32,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl NotFoundError {
    /// Create a new NotFoundError at the current location.
    #[track_caller]
    pub fn new(entity: EntityKind, id: u32) -> Self {
        let location = std::panic::Location::caller();
        Self {
            entity,
            id,
            line: location.line(),
            file: location.file(),
        }
    }
}
