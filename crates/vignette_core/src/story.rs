//! The story aggregate.

use crate::{Character, Location, Scene};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use vignette_error::{StoryError, StoryErrorKind, VignetteResult};

/// A short-form story: storyline, cast, locations and six scenes.
///
/// Scene text refers to characters and locations by name. Names that match no
/// entity are tolerated and left as they are when prompts are resolved.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Story {
    /// Six to ten sentence storyline overview
    pub storyline: String,
    /// Primary emotional tones of the whole story
    #[serde(default)]
    pub tones: Vec<String>,
    /// Cast, in display order
    #[serde(default)]
    pub characters: Vec<Character>,
    /// Settings, in display order
    #[serde(default)]
    pub locations: Vec<Location>,
    /// Scenes, in temporal order
    #[serde(default)]
    pub scenes: Vec<Scene>,
}

impl Story {
    /// Number of scenes every generated story contains.
    pub const SCENE_COUNT: usize = 6;

    /// Look up a character by id.
    pub fn character(&self, id: u32) -> Option<&Character> {
        self.characters.iter().find(|c| c.id == id)
    }

    /// Look up a location by id.
    pub fn location(&self, id: u32) -> Option<&Location> {
        self.locations.iter().find(|l| l.id == id)
    }

    /// Look up a scene by id.
    pub fn scene(&self, id: u32) -> Option<&Scene> {
        self.scenes.iter().find(|s| s.id == id)
    }

    /// Look up a scene by id for mutation.
    pub fn scene_mut(&mut self, id: u32) -> Option<&mut Scene> {
        self.scenes.iter_mut().find(|s| s.id == id)
    }

    /// Check the structural invariants a generated story must satisfy.
    ///
    /// - exactly [`Story::SCENE_COUNT`] scenes with ids `1..=6`
    /// - character and location ids are unique and start at 1
    ///
    /// # Errors
    ///
    /// Returns [`StoryErrorKind::Invalid`] describing the first violation found.
    pub fn validate(&self) -> VignetteResult<()> {
        if self.scenes.len() != Self::SCENE_COUNT {
            return Err(invalid(format!(
                "expected {} scenes, got {}",
                Self::SCENE_COUNT,
                self.scenes.len()
            )));
        }

        let mut scene_ids: Vec<u32> = self.scenes.iter().map(|s| s.id).collect();
        scene_ids.sort_unstable();
        let expected: Vec<u32> = (1..=Self::SCENE_COUNT as u32).collect();
        if scene_ids != expected {
            return Err(invalid(format!(
                "scene ids must be 1 through {}, got {:?}",
                Self::SCENE_COUNT,
                scene_ids
            )));
        }

        check_ids("character", self.characters.iter().map(|c| c.id))?;
        check_ids("location", self.locations.iter().map(|l| l.id))?;

        Ok(())
    }
}

fn check_ids(label: &str, ids: impl Iterator<Item = u32>) -> VignetteResult<()> {
    let mut seen = HashSet::new();
    for id in ids {
        if id == 0 {
            return Err(invalid(format!("{} ids start at 1", label)));
        }
        if !seen.insert(id) {
            return Err(invalid(format!("duplicate {} id {}", label, id)));
        }
    }
    Ok(())
}

#[track_caller]
fn invalid(message: String) -> vignette_error::VignetteError {
    StoryError::new(StoryErrorKind::Invalid(message)).into()
}
