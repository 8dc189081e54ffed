//! Prompt templates for story generation and editing.

use crate::dto::{OverviewDto, PersonaDto, SceneDto, SettingDto, StoryDto};
use vignette_core::{Overview, Scene, Story};

/// Shape every full-story response must follow.
const STORY_SHAPE: &str = r#"Return ONLY a JSON object in this exact format:
{
  "storyline": "string",
  "persona_description": [
    {"id": 1, "name": "string", "age": "string", "clothing": "string", "skin": "string", "hair": "string"}
  ],
  "setting_description": [
    {"id": 1, "name": "string", "description": "string"}
  ],
  "scenes": [
    {"id": 1, "image_prompt": "string", "narration": "string", "emotional_tones": ["string"]}
  ],
  "emotional_tones": ["string"]
}"#;

const OVERVIEW_SHAPE: &str = r#"Return ONLY a JSON object in this exact format:
{
  "storyline": "string",
  "emotional_tones": ["string"]
}"#;

pub(crate) fn overview(idea: &str) -> String {
    format!(
        "Based on this story idea, create a storyline overview in 6-10 sentences. \
The overview should include 1-3 main characters, 1-3 settings, and a description of 6 scenes.

Based off the storyline, identify the primary emotional tones of the story.

Story Idea: {idea}

{OVERVIEW_SHAPE}"
    )
}

pub(crate) fn edit_overview(current: &Overview, feedback: &str) -> String {
    format!(
        "Based on this story overview and user feedback, edit the 6-10 sentence storyline \
only making changes described in user feedback and then identify the primary emotional \
tones of the edited version.

Make sure the overview still includes 1-3 main characters, 1-3 settings, and a description of 6 scenes.

Current overview: {current}

Feedback: {feedback}

{OVERVIEW_SHAPE}",
        current = pretty(&OverviewDto::from(current)),
    )
}

pub(crate) fn generate_story(overview: &Overview) -> String {
    format!(
        "You are a helpful tool to create a vlog-style script based off this storyline: {storyline}
Emotional tones: {tones}
The vlog should be TikTok style and around 1 minute long.

Work step by step:

(1) Keep the storyline the same.

(2) Create a persona_description of each persona (1-3 personas) including: id (starting from 1), \
name, age, clothing, skin tone, hair.

(3) Create a setting_description for each setting (1-3 settings) including: id (starting from 1), \
name, and detailed description.

(4) Create exactly 6 scenes. Each scene should have: id (starting from 1), an image_prompt that \
describes a detailed visual for AI image generation, referring to personas and settings by name, \
a short narration, and the scene's emotional_tones.

(5) Keep the emotional_tones the same.

{STORY_SHAPE}",
        storyline = overview.storyline,
        tones = overview.tones.join(", "),
    )
}

pub(crate) fn edit_character(story: &Story, id: u32, feedback: &str) -> String {
    let wire = StoryDto::from_story(story);
    let current: Vec<&PersonaDto> = wire
        .persona_description()
        .iter()
        .filter(|p| *p.id() == id)
        .collect();
    let others: Vec<&PersonaDto> = wire
        .persona_description()
        .iter()
        .filter(|p| *p.id() != id)
        .collect();

    format!(
        "You are updating a character in a story and must regenerate the ENTIRE story to reflect \
this change consistently throughout.

Current Story:
Storyline: {storyline}
Emotional Tones: {tones}

Character Being Updated (ID {id}):
{current}

User Feedback for This Character: {feedback}

Other Characters (keep these the same):
{others}

Settings (keep these the same):
{settings}

Current Scenes:
{scenes}

IMPORTANT:
1. Update character {id} based on the user feedback
2. Keep the emotional tones, other characters, and settings the same
3. Regenerate the storyline and all 6 scenes to reflect the updated character consistently
4. If the character's name changed, update it everywhere in the scenes
5. Maintain the same story flow and scene structure

{STORY_SHAPE}",
        storyline = story.storyline,
        tones = story.tones.join(", "),
        current = pretty(&current),
        others = pretty(&others),
        settings = pretty(wire.setting_description()),
        scenes = pretty(wire.scenes()),
    )
}

pub(crate) fn edit_location(story: &Story, id: u32, feedback: &str) -> String {
    let wire = StoryDto::from_story(story);
    let current: Vec<&SettingDto> = wire
        .setting_description()
        .iter()
        .filter(|s| *s.id() == id)
        .collect();
    let others: Vec<&SettingDto> = wire
        .setting_description()
        .iter()
        .filter(|s| *s.id() != id)
        .collect();

    format!(
        "You are updating a location in a story and must regenerate the ENTIRE story to reflect \
this environmental change consistently throughout.

Current Story:
Storyline: {storyline}
Emotional Tones: {tones}

Location Being Updated (ID {id}):
{current}

User Feedback for This Location:
{feedback}

Other Locations (keep these the same):
{others}

Characters (keep these the same):
{characters}

Current Scenes:
{scenes}

IMPORTANT:
1. Update location {id} based on the user feedback.
2. Keep the emotional tones, characters, and other settings unchanged.
3. Regenerate the storyline and all 6 scenes to reflect the updated location naturally.
4. If this location's name changed, update it everywhere in the scenes.
5. Maintain the same story flow, structure, and scene ordering.

{STORY_SHAPE}",
        storyline = story.storyline,
        tones = story.tones.join(", "),
        current = pretty(&current),
        others = pretty(&others),
        characters = pretty(wire.persona_description()),
        scenes = pretty(wire.scenes()),
    )
}

pub(crate) fn edit_scene(story: &Story, index: usize, feedback: &str) -> String {
    let wire = StoryDto::from_story(story);
    let scene = &story.scenes[index];
    let (previous, next) = neighbours(story, index);

    format!(
        "You are updating Scene {id} in a 6-scene visual story.

Story Overview: {storyline}
Tone: {tones}

Characters:
{characters}

Locations:
{locations}

Current Scene {id}:
{current}

{previous}

{next}

User Feedback on Visuals: {feedback}

Update this scene based on the feedback. The image_prompt and narration should work together to \
tell this part of the story. Maintain consistency with character appearances and the overall story \
arc. Refer to characters and locations by name.

Return ONLY a JSON object in this exact format:
{{
  \"id\": {id},
  \"image_prompt\": \"Detailed visual description for image generation (50-100 words). Include: \
character names, location, lighting, mood, camera angle, composition.\",
  \"narration\": \"The narrative text for this scene. Should advance the story and complement the visual.\"
}}",
        id = scene.id,
        storyline = story.storyline,
        tones = story.tones.join(", "),
        characters = pretty(wire.persona_description()),
        locations = pretty(wire.setting_description()),
        current = pretty(&SceneDto::from(scene)),
        previous = previous
            .map(|s| format!("Previous Scene: {}", pretty(&SceneDto::from(s))))
            .unwrap_or_else(|| "This is the first scene.".to_string()),
        next = next
            .map(|s| format!("Next Scene: {}", pretty(&SceneDto::from(s))))
            .unwrap_or_else(|| "This is the final scene.".to_string()),
    )
}

pub(crate) fn edit_narration(story: &Story, index: usize, feedback: &str) -> String {
    let scene = &story.scenes[index];
    let (previous, next) = neighbours(story, index);

    format!(
        "You are updating the narration for Scene {id} in a visual story.

Story Overview: {storyline}
Tone: {tones}

Scene {id} Visual:
{visual}

Current Narration:
{narration}

{previous}

{next}

User Feedback: {feedback}

Update the narration based on the feedback. It should complement the visual and maintain story continuity.

Return ONLY a JSON object in this exact format:
{{
  \"narration\": \"Updated narrative text that advances the story and fits the visual context\"
}}",
        id = scene.id,
        storyline = story.storyline,
        tones = story.tones.join(", "),
        visual = scene.image_prompt,
        narration = scene.narration,
        previous = previous
            .map(|s| format!("Previous Scene Narration: {}", s.narration))
            .unwrap_or_else(|| "This is the first scene.".to_string()),
        next = next
            .map(|s| format!("Next Scene Narration: {}", s.narration))
            .unwrap_or_else(|| "This is the final scene.".to_string()),
    )
}

/// Scenes immediately before and after `index` in story order.
fn neighbours(story: &Story, index: usize) -> (Option<&Scene>, Option<&Scene>) {
    let previous = index.checked_sub(1).and_then(|i| story.scenes.get(i));
    let next = story.scenes.get(index + 1);
    (previous, next)
}

fn pretty<T: serde::Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn story() -> Story {
        Story {
            storyline: "Mira returns home.".to_string(),
            tones: vec!["wistful".to_string()],
            scenes: (1..=3)
                .map(|id| {
                    Scene::builder()
                        .id(id)
                        .image_prompt(format!("shot {id}"))
                        .narration(format!("line {id}"))
                        .build()
                        .unwrap()
                })
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn first_scene_has_no_previous() {
        let prompt = edit_scene(&story(), 0, "brighter");
        assert!(prompt.contains("This is the first scene."));
        assert!(prompt.contains("Next Scene:"));
        assert!(prompt.contains("\"id\": 1"));
    }

    #[test]
    fn last_narration_has_no_next() {
        let prompt = edit_narration(&story(), 2, "shorter");
        assert!(prompt.contains("Previous Scene Narration: line 2"));
        assert!(prompt.contains("This is the final scene."));
    }

    #[test]
    fn story_prompt_carries_tones() {
        let overview = Overview {
            storyline: "A storm.".to_string(),
            tones: vec!["tense".to_string(), "hopeful".to_string()],
        };
        assert!(generate_story(&overview).contains("Emotional tones: tense, hopeful"));
    }
}
