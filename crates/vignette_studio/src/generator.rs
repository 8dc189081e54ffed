//! Story generation and editing on top of a text driver.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use tracing::{debug, info, instrument, warn};
use vignette_core::{GenerateRequest, Overview, Story};
use vignette_error::{BuilderError, EntityKind, NotFoundError, VignetteResult};
use vignette_interface::TextDriver;

use crate::dto::{NarrationDto, OverviewDto, SceneEditDto, StoryDto};
use crate::extraction::parse_json;
use crate::prompts;

/// Drafts and edits stories through a text model.
///
/// Every operation is a single model call whose response is parsed from
/// JSON and checked before it is returned. Edits addressing an id that
/// does not exist fail before the model is called.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use vignette_interface::TextDriver;
/// use vignette_studio::StoryGenerator;
///
/// # async fn example(driver: Arc<dyn TextDriver>) -> Result<(), Box<dyn std::error::Error>> {
/// let generator = StoryGenerator::new(driver).with_temperature(0.9);
///
/// let overview = generator.overview("A lighthouse keeper finds a message in a bottle").await?;
/// let story = generator.generate_story(&overview).await?;
/// assert_eq!(story.scenes.len(), 6);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct StoryGenerator {
    driver: Arc<dyn TextDriver>,
    temperature: Option<f32>,
    model: Option<String>,
}

impl std::fmt::Debug for StoryGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoryGenerator")
            .field("provider", &self.driver.provider_name())
            .field("model", &self.model.as_deref().unwrap_or(self.driver.model_name()))
            .field("temperature", &self.temperature)
            .finish()
    }
}

impl StoryGenerator {
    /// Generator using the driver's default model and temperature.
    pub fn new(driver: Arc<dyn TextDriver>) -> Self {
        Self {
            driver,
            temperature: None,
            model: None,
        }
    }

    /// Sampling temperature for every request.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Model override for every request.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Storyline overview and emotional tones for a story idea.
    #[instrument(skip(self, idea), fields(idea_len = idea.len()))]
    pub async fn overview(&self, idea: &str) -> VignetteResult<Overview> {
        let dto: OverviewDto = self.ask(prompts::overview(idea)).await?;
        let overview = Overview::from(dto);
        info!(tones = ?overview.tones, "Drafted overview");
        Ok(overview)
    }

    /// Overview revised according to `feedback`.
    #[instrument(skip_all)]
    pub async fn edit_overview(
        &self,
        current: &Overview,
        feedback: &str,
    ) -> VignetteResult<Overview> {
        let dto: OverviewDto = self
            .ask(prompts::edit_overview(current, feedback))
            .await?;
        Ok(Overview::from(dto))
    }

    /// Full story for an overview: cast, settings and six scenes.
    ///
    /// The overview's storyline and tones are carried into the story as
    /// given, whatever the model echoes back.
    #[instrument(skip_all)]
    pub async fn generate_story(&self, overview: &Overview) -> VignetteResult<Story> {
        let dto: StoryDto = self.ask(prompts::generate_story(overview)).await?;

        let mut story = dto.into_story();
        story.storyline = overview.storyline.clone();
        story.tones = overview.tones.clone();
        story.validate()?;

        info!(
            characters = story.characters.len(),
            locations = story.locations.len(),
            "Generated story"
        );
        Ok(story)
    }

    /// Story regenerated around an edited character.
    ///
    /// The whole story is rewritten so a rename reaches every scene. Other
    /// characters, every location and the tones are kept from `story`.
    #[instrument(skip(self, story, feedback))]
    pub async fn edit_character(
        &self,
        story: &Story,
        id: u32,
        feedback: &str,
    ) -> VignetteResult<Story> {
        if story.character(id).is_none() {
            return Err(NotFoundError::new(EntityKind::Character, id).into());
        }

        let dto: StoryDto = self
            .ask(prompts::edit_character(story, id, feedback))
            .await?;
        let mut edited = dto.into_story();

        if edited.character(id).is_none() {
            warn!(id, "Model dropped the edited character");
        }
        for character in &mut edited.characters {
            if character.id == id {
                continue;
            }
            if let Some(original) = story.character(character.id) {
                *character = original.clone();
            }
        }
        for original in &story.characters {
            if original.id != id && edited.character(original.id).is_none() {
                edited.characters.push(original.clone());
            }
        }
        edited.locations = story.locations.clone();
        edited.tones = story.tones.clone();
        edited.validate()?;

        Ok(edited)
    }

    /// Story regenerated around an edited location.
    ///
    /// Other locations, every character and the tones are kept from `story`.
    #[instrument(skip(self, story, feedback))]
    pub async fn edit_location(
        &self,
        story: &Story,
        id: u32,
        feedback: &str,
    ) -> VignetteResult<Story> {
        if story.location(id).is_none() {
            return Err(NotFoundError::new(EntityKind::Location, id).into());
        }

        let dto: StoryDto = self
            .ask(prompts::edit_location(story, id, feedback))
            .await?;
        let mut edited = dto.into_story();

        if edited.location(id).is_none() {
            warn!(id, "Model dropped the edited location");
        }
        for location in &mut edited.locations {
            if location.id == id {
                continue;
            }
            if let Some(original) = story.location(location.id) {
                *location = original.clone();
            }
        }
        for original in &story.locations {
            if original.id != id && edited.location(original.id).is_none() {
                edited.locations.push(original.clone());
            }
        }
        edited.characters = story.characters.clone();
        edited.tones = story.tones.clone();
        edited.validate()?;

        Ok(edited)
    }

    /// Story with one scene's image prompt and narration rewritten.
    #[instrument(skip(self, story, feedback))]
    pub async fn edit_scene(
        &self,
        story: &Story,
        scene_id: u32,
        feedback: &str,
    ) -> VignetteResult<Story> {
        let index = scene_index(story, scene_id)?;

        let dto: SceneEditDto = self
            .ask(prompts::edit_scene(story, index, feedback))
            .await?;
        if let Some(returned) = *dto.id() {
            if returned != scene_id {
                warn!(scene_id, returned, "Model answered for a different scene id");
            }
        }

        let mut edited = story.clone();
        dto.apply_to(&mut edited.scenes[index]);
        edited.validate()?;
        Ok(edited)
    }

    /// Story with one scene's narration rewritten.
    #[instrument(skip(self, story, feedback))]
    pub async fn edit_narration(
        &self,
        story: &Story,
        scene_id: u32,
        feedback: &str,
    ) -> VignetteResult<Story> {
        let index = scene_index(story, scene_id)?;

        let dto: NarrationDto = self
            .ask(prompts::edit_narration(story, index, feedback))
            .await?;

        let mut edited = story.clone();
        edited.scenes[index].narration = dto.into_narration();
        Ok(edited)
    }

    async fn ask<T: DeserializeOwned>(&self, prompt: String) -> VignetteResult<T> {
        let request = GenerateRequest::builder()
            .prompt(prompt)
            .model(self.model.clone())
            .temperature(self.temperature)
            .json_output(true)
            .build()
            .map_err(|e| BuilderError::from(e.to_string()))?;

        debug!(
            provider = self.driver.provider_name(),
            prompt_len = request.prompt.len(),
            "Sending text request"
        );
        let response = self.driver.generate(&request).await?;
        parse_json(&response.text)
    }
}

fn scene_index(story: &Story, scene_id: u32) -> VignetteResult<usize> {
    story
        .scenes
        .iter()
        .position(|s| s.id == scene_id)
        .ok_or_else(|| NotFoundError::new(EntityKind::Scene, scene_id).into())
}
