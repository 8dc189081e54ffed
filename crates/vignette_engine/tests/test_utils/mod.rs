//! Test doubles for the asset engine.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tempfile::TempDir;
use vignette_core::{Character, Location, RenderRequest, RenderedImage, Scene, SessionId, Story};
use vignette_engine::{AssetGenerator, RetryPolicy, SceneSynchronizer};
use vignette_error::{GeminiError, GeminiErrorKind, VignetteResult};
use vignette_interface::ImageDriver;
use vignette_storage::FileSystemStorage;

pub const FALLBACK: &str = "static/fallback.png";

/// What the scripted driver does for one call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Return an image derived from the prompt
    Image,
    /// Answer without an image
    NoImage,
    /// Fail with a retryable provider error
    Overloaded,
    /// Fail with a non-retryable provider error
    BadRequest,
    /// Fail because the provider rejected the API key
    Unauthorized,
    /// Fail with a configuration error
    MissingKey,
}

/// Image driver that follows a script, then succeeds forever.
#[derive(Debug, Default)]
pub struct ScriptedImageDriver {
    script: Mutex<VecDeque<Outcome>>,
    prompts: Mutex<Vec<String>>,
    calls: AtomicUsize,
}

impl ScriptedImageDriver {
    pub fn succeeding() -> Self {
        Self::default()
    }

    pub fn with_script(outcomes: impl IntoIterator<Item = Outcome>) -> Self {
        Self {
            script: Mutex::new(outcomes.into_iter().collect()),
            ..Default::default()
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl ImageDriver for ScriptedImageDriver {
    async fn render(&self, req: &RenderRequest) -> VignetteResult<Option<RenderedImage>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(req.prompt.clone());

        let outcome = self
            .script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Outcome::Image);

        match outcome {
            Outcome::Image => Ok(Some(RenderedImage {
                mime_type: "image/png".to_string(),
                data: format!("pixels for {}", req.prompt).into_bytes(),
            })),
            Outcome::NoImage => Ok(None),
            Outcome::Overloaded => Err(GeminiError::new(GeminiErrorKind::HttpError {
                status_code: 503,
                message: "overloaded".to_string(),
            })
            .into()),
            Outcome::BadRequest => Err(GeminiError::new(GeminiErrorKind::HttpError {
                status_code: 400,
                message: "bad request".to_string(),
            })
            .into()),
            Outcome::Unauthorized => Err(GeminiError::new(GeminiErrorKind::HttpError {
                status_code: 401,
                message: "API key not valid".to_string(),
            })
            .into()),
            Outcome::MissingKey => Err(GeminiError::new(GeminiErrorKind::MissingApiKey).into()),
        }
    }

    fn provider_name(&self) -> &'static str {
        "scripted"
    }

    fn model_name(&self) -> &str {
        "scripted-image"
    }
}

/// One second per time unit, matching the shipped configuration.
pub fn policy() -> RetryPolicy {
    RetryPolicy {
        max_attempts: 3,
        time_unit: Duration::from_secs(1),
        pacing_units: 1,
    }
}

/// Generator writing into a fresh temp directory.
pub fn generator(driver: Arc<ScriptedImageDriver>, dir: &TempDir) -> AssetGenerator {
    AssetGenerator::builder()
        .driver(driver)
        .storage(Arc::new(FileSystemStorage::new(dir.path()).unwrap()))
        .session(SessionId::new())
        .policy(policy())
        .fallback_reference(FALLBACK)
        .build()
        .unwrap()
}

pub fn synchronizer(driver: Arc<ScriptedImageDriver>, dir: &TempDir) -> SceneSynchronizer {
    SceneSynchronizer::new(generator(driver, dir))
}

pub fn mira() -> Character {
    Character::builder()
        .id(1)
        .name("Mira")
        .age("34")
        .hair("silver")
        .skin("olive")
        .clothing("a yellow raincoat")
        .build()
        .unwrap()
}

pub fn old_pier() -> Location {
    Location::builder()
        .id(1)
        .name("Old Pier")
        .description("a weathered wooden pier jutting into grey water")
        .build()
        .unwrap()
}

pub fn scene(id: u32, prompt: &str, tones: &[&str]) -> Scene {
    Scene::builder()
        .id(id)
        .image_prompt(prompt)
        .emotional_tones(tones.iter().map(|t| t.to_string()).collect::<Vec<_>>())
        .build()
        .unwrap()
}

/// Two scenes: Mira on the beach, then the empty Old Pier.
pub fn harbor_story() -> Story {
    Story {
        storyline: "Mira returns to the harbor town she left.".to_string(),
        tones: vec!["wistful".to_string()],
        characters: vec![mira()],
        locations: vec![old_pier()],
        scenes: vec![
            scene(1, "Mira walks along the beach at dawn", &["wistful"]),
            scene(2, "Fog rolls over the Old Pier", &["lonely"]),
        ],
    }
}

/// Paused-clock elapsed time, allowing for timer-wheel rounding.
pub fn assert_elapsed(start: tokio::time::Instant, expected: Duration) {
    let elapsed = start.elapsed();
    assert!(
        elapsed >= expected && elapsed < expected + Duration::from_millis(50),
        "expected about {expected:?}, got {elapsed:?}"
    );
}
