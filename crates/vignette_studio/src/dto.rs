//! Wire shapes of model responses.
//!
//! The text model speaks in `persona_description` / `setting_description`
//! terms; these types translate between that vocabulary and the story
//! aggregate in `vignette_core`.

use derive_getters::Getters;
use serde::{Deserialize, Deserializer, Serialize};
use vignette_core::{Character, Location, Overview, Scene, Story};

/// Overview as returned by the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct OverviewDto {
    /// Storyline in a few sentences
    storyline: String,
    /// Primary emotional tones
    #[serde(default)]
    emotional_tones: Vec<String>,
}

impl From<OverviewDto> for Overview {
    fn from(dto: OverviewDto) -> Self {
        Overview {
            storyline: dto.storyline,
            tones: dto.emotional_tones,
        }
    }
}

impl From<&Overview> for OverviewDto {
    fn from(overview: &Overview) -> Self {
        Self {
            storyline: overview.storyline.clone(),
            emotional_tones: overview.tones.clone(),
        }
    }
}

/// One persona in a generated story.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct PersonaDto {
    /// One-based id
    id: u32,
    /// Name as used in prompts
    name: String,
    /// Age, as text
    #[serde(default, deserialize_with = "lenient_string")]
    age: String,
    /// Clothing
    #[serde(default)]
    clothing: String,
    /// Skin tone
    #[serde(default)]
    skin: String,
    /// Hair
    #[serde(default)]
    hair: String,
}

impl From<PersonaDto> for Character {
    fn from(dto: PersonaDto) -> Self {
        Character {
            id: dto.id,
            name: dto.name,
            age: dto.age,
            clothing: dto.clothing,
            skin: dto.skin,
            hair: dto.hair,
        }
    }
}

impl From<&Character> for PersonaDto {
    fn from(character: &Character) -> Self {
        Self {
            id: character.id,
            name: character.name.clone(),
            age: character.age.clone(),
            clothing: character.clothing.clone(),
            skin: character.skin.clone(),
            hair: character.hair.clone(),
        }
    }
}

/// One setting in a generated story.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct SettingDto {
    /// One-based id
    id: u32,
    /// Name as used in prompts
    name: String,
    /// Visual description
    #[serde(default)]
    description: String,
}

impl From<SettingDto> for Location {
    fn from(dto: SettingDto) -> Self {
        Location {
            id: dto.id,
            name: dto.name,
            description: dto.description,
        }
    }
}

impl From<&Location> for SettingDto {
    fn from(location: &Location) -> Self {
        Self {
            id: location.id,
            name: location.name.clone(),
            description: location.description.clone(),
        }
    }
}

/// One scene in a generated story.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct SceneDto {
    /// One-based id
    id: u32,
    /// Visual for image generation
    image_prompt: String,
    /// Narration text
    #[serde(default)]
    narration: String,
    /// Scene tones, when given
    #[serde(default, skip_serializing_if = "Option::is_none")]
    emotional_tones: Option<Vec<String>>,
}

impl From<&Scene> for SceneDto {
    fn from(scene: &Scene) -> Self {
        Self {
            id: scene.id,
            image_prompt: scene.image_prompt.clone(),
            narration: scene.narration.clone(),
            emotional_tones: Some(scene.emotional_tones.clone()),
        }
    }
}

/// A complete story as returned by the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct StoryDto {
    /// Storyline in a few sentences
    storyline: String,
    /// Cast
    #[serde(default)]
    persona_description: Vec<PersonaDto>,
    /// Settings
    #[serde(default)]
    setting_description: Vec<SettingDto>,
    /// Scenes in story order
    #[serde(default)]
    scenes: Vec<SceneDto>,
    /// Primary emotional tones
    #[serde(default)]
    emotional_tones: Vec<String>,
}

impl StoryDto {
    /// Wire form of an existing story, used as prompt context.
    pub fn from_story(story: &Story) -> Self {
        Self {
            storyline: story.storyline.clone(),
            persona_description: story.characters.iter().map(PersonaDto::from).collect(),
            setting_description: story.locations.iter().map(SettingDto::from).collect(),
            scenes: story.scenes.iter().map(SceneDto::from).collect(),
            emotional_tones: story.tones.clone(),
        }
    }

    /// Convert into a story with no assets.
    ///
    /// Scenes the model returned without tones take the story's tones.
    pub fn into_story(self) -> Story {
        let tones = self.emotional_tones;
        let scenes = self
            .scenes
            .into_iter()
            .map(|dto| Scene {
                id: dto.id,
                image_prompt: dto.image_prompt,
                narration: dto.narration,
                emotional_tones: dto.emotional_tones.unwrap_or_else(|| tones.clone()),
                asset_reference: None,
                content_fingerprint: None,
                resolved_prompt: None,
            })
            .collect();

        Story {
            storyline: self.storyline,
            characters: self
                .persona_description
                .into_iter()
                .map(Character::from)
                .collect(),
            locations: self
                .setting_description
                .into_iter()
                .map(Location::from)
                .collect(),
            scenes,
            tones,
        }
    }
}

/// A single regenerated scene.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Getters)]
pub struct SceneEditDto {
    /// Scene id the model answered for
    #[serde(default)]
    id: Option<u32>,
    /// Visual for image generation
    image_prompt: String,
    /// Narration text
    #[serde(default)]
    narration: String,
    /// Scene tones, when given
    #[serde(default)]
    emotional_tones: Option<Vec<String>>,
}

impl SceneEditDto {
    /// Write the edit into `scene`, leaving its id and asset fields alone.
    pub fn apply_to(self, scene: &mut Scene) {
        scene.image_prompt = self.image_prompt;
        scene.narration = self.narration;
        if let Some(tones) = self.emotional_tones {
            scene.emotional_tones = tones;
        }
    }
}

/// A regenerated narration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Getters)]
pub struct NarrationDto {
    /// Narration text
    narration: String,
}

impl NarrationDto {
    /// Unwrap the narration text.
    pub fn into_narration(self) -> String {
        self.narration
    }
}

/// Accept a string or a bare number (models write `"age": 34` as often as
/// `"age": "34"`).
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    })
}
