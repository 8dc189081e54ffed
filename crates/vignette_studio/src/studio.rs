//! The editing workflow: idea, overview, story, edits.

use tracing::{info, instrument};
use vignette_core::{Overview, SessionId, Story};
use vignette_engine::SceneSynchronizer;
use vignette_error::{ConfigError, StoryError, StoryErrorKind, VignetteResult};

use crate::{StoryGenerator, StorySession};

/// Drives one editing session.
///
/// Every step that produces a story also synchronizes its scene assets
/// against the story it replaces, so only scenes whose resolved prompt
/// changed are rendered again. The session's story is replaced only when
/// both the edit and the synchronization succeed.
#[derive(Debug)]
pub struct Studio {
    generator: StoryGenerator,
    synchronizer: SceneSynchronizer,
    session: StorySession,
}

impl Studio {
    /// Empty studio using the synchronizer's session id.
    pub fn new(generator: StoryGenerator, synchronizer: SceneSynchronizer) -> Self {
        let session_id = *synchronizer.generator().session();
        Self {
            generator,
            synchronizer,
            session: StorySession {
                session_id,
                idea: String::new(),
                overview: None,
                story: None,
            },
        }
    }

    /// Continue a saved session.
    ///
    /// # Errors
    ///
    /// Fails when the synchronizer stores assets under a different session.
    pub fn resume(
        generator: StoryGenerator,
        synchronizer: SceneSynchronizer,
        session: StorySession,
    ) -> VignetteResult<Self> {
        let expected = *synchronizer.generator().session();
        if session.session_id != expected {
            return Err(ConfigError::new(format!(
                "asset generator is bound to session {}, but the loaded session is {}",
                expected, session.session_id
            ))
            .into());
        }
        Ok(Self {
            generator,
            synchronizer,
            session,
        })
    }

    /// Current session state.
    pub fn session(&self) -> &StorySession {
        &self.session
    }

    /// Session id qualifying this studio's assets.
    pub fn session_id(&self) -> SessionId {
        self.session.session_id
    }

    /// Current overview, if drafted.
    pub fn overview(&self) -> Option<&Overview> {
        self.session.overview.as_ref()
    }

    /// Current story, if drafted.
    pub fn story(&self) -> Option<&Story> {
        self.session.story.as_ref()
    }

    /// Hand back the session state.
    pub fn into_session(self) -> StorySession {
        self.session
    }

    /// Start over from a new idea. Any previous overview and story are dropped.
    #[instrument(skip(self, idea), fields(session = %self.session.session_id))]
    pub async fn start(&mut self, idea: &str) -> VignetteResult<&Overview> {
        let overview = self.generator.overview(idea).await?;
        info!("Session started");
        self.session.idea = idea.to_string();
        self.session.story = None;
        Ok(self.session.overview.insert(overview))
    }

    /// Revise the overview. The story, if any, is left as it is until
    /// the next draft.
    #[instrument(skip(self, feedback), fields(session = %self.session.session_id))]
    pub async fn revise_overview(&mut self, feedback: &str) -> VignetteResult<&Overview> {
        let current = self.require_overview()?;
        let revised = self.generator.edit_overview(current, feedback).await?;
        Ok(self.session.overview.insert(revised))
    }

    /// Generate the story from the overview and render its scenes.
    ///
    /// Redrafting over an existing story reuses the assets of scenes whose
    /// resolved prompt did not change.
    #[instrument(skip(self), fields(session = %self.session.session_id))]
    pub async fn draft_story(&mut self) -> VignetteResult<&Story> {
        let overview = self.require_overview()?;
        let story = self.generator.generate_story(overview).await?;
        self.commit(story).await
    }

    /// Edit one character and re-render the scenes that changed.
    #[instrument(skip(self, feedback), fields(session = %self.session.session_id))]
    pub async fn revise_character(&mut self, id: u32, feedback: &str) -> VignetteResult<&Story> {
        let current = self.require_story()?;
        let edited = self.generator.edit_character(current, id, feedback).await?;
        self.commit(edited).await
    }

    /// Edit one location and re-render the scenes that changed.
    #[instrument(skip(self, feedback), fields(session = %self.session.session_id))]
    pub async fn revise_location(&mut self, id: u32, feedback: &str) -> VignetteResult<&Story> {
        let current = self.require_story()?;
        let edited = self.generator.edit_location(current, id, feedback).await?;
        self.commit(edited).await
    }

    /// Rewrite one scene and re-render it.
    #[instrument(skip(self, feedback), fields(session = %self.session.session_id))]
    pub async fn revise_scene(&mut self, id: u32, feedback: &str) -> VignetteResult<&Story> {
        let current = self.require_story()?;
        let edited = self.generator.edit_scene(current, id, feedback).await?;
        self.commit(edited).await
    }

    /// Rewrite one scene's narration. Narration is not part of the image
    /// prompt, so no scene is re-rendered.
    #[instrument(skip(self, feedback), fields(session = %self.session.session_id))]
    pub async fn revise_narration(&mut self, id: u32, feedback: &str) -> VignetteResult<&Story> {
        let current = self.require_story()?;
        let edited = self.generator.edit_narration(current, id, feedback).await?;
        self.commit(edited).await
    }

    /// Run a synchronization pass over the current story.
    ///
    /// Scenes already in step are reused; scenes left on the fallback by an
    /// earlier pass are rendered again.
    #[instrument(skip(self), fields(session = %self.session.session_id))]
    pub async fn resync(&mut self) -> VignetteResult<&Story> {
        let current = self.require_story()?.clone();
        self.commit(current).await
    }

    /// Synchronize `story` against the current one and adopt it.
    async fn commit(&mut self, story: Story) -> VignetteResult<&Story> {
        let synced = self
            .synchronizer
            .synchronize(story, self.session.story.as_ref())
            .await?;
        Ok(self.session.story.insert(synced))
    }

    fn require_overview(&self) -> VignetteResult<&Overview> {
        self.session
            .overview
            .as_ref()
            .ok_or_else(|| StoryError::new(StoryErrorKind::MissingOverview).into())
    }

    fn require_story(&self) -> VignetteResult<&Story> {
        self.session
            .story
            .as_ref()
            .ok_or_else(|| StoryError::new(StoryErrorKind::MissingStory).into())
    }
}
