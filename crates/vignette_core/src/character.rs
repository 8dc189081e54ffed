//! Cast members.

use serde::{Deserialize, Serialize};

/// A member of the story's cast.
///
/// Identity is the `id`. The `name` is only the key that scene text uses to
/// refer to the character and may change between edits.
///
/// # Examples
///
/// ```
/// use vignette_core::Character;
///
/// let mira = Character::builder()
///     .id(1)
///     .name("Mira")
///     .age("34")
///     .clothing("a yellow raincoat")
///     .skin("olive")
///     .hair("silver")
///     .build()
///     .unwrap();
///
/// assert_eq!(
///     mira.describe(),
///     "Mira, 34 years old, with silver hair, olive skin, wearing a yellow raincoat"
/// );
/// ```
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, derive_builder::Builder,
)]
pub struct Character {
    /// Stable identifier, starting at 1
    pub id: u32,
    /// Display name used to reference the character in scene text
    #[builder(setter(into))]
    pub name: String,
    /// Age or age range
    #[builder(default, setter(into))]
    #[serde(default)]
    pub age: String,
    /// Clothing description
    #[builder(default, setter(into))]
    #[serde(default)]
    pub clothing: String,
    /// Skin tone description
    #[builder(default, setter(into))]
    #[serde(default)]
    pub skin: String,
    /// Hair description
    #[builder(default, setter(into))]
    #[serde(default)]
    pub hair: String,
}

impl Character {
    /// Creates a new builder for `Character`.
    pub fn builder() -> CharacterBuilder {
        CharacterBuilder::default()
    }

    /// Full visual description substituted for the character's name in render prompts.
    pub fn describe(&self) -> String {
        format!(
            "{}, {} years old, with {} hair, {} skin, wearing {}",
            self.name, self.age, self.hair, self.skin, self.clothing
        )
    }
}
