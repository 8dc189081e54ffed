//! Story settings.

use serde::{Deserialize, Serialize};

/// A setting where scenes take place.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, derive_builder::Builder,
)]
pub struct Location {
    /// Stable identifier, starting at 1
    pub id: u32,
    /// Display name used to reference the location in scene text
    #[builder(setter(into))]
    pub name: String,
    /// Visual description substituted for the name in render prompts
    #[builder(default, setter(into))]
    #[serde(default)]
    pub description: String,
}

impl Location {
    /// Creates a new builder for `Location`.
    pub fn builder() -> LocationBuilder {
        LocationBuilder::default()
    }
}
