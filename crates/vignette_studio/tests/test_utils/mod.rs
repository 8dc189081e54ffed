//! Scripted drivers and story fixtures.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;
use tempfile::TempDir;
use vignette_core::{GenerateRequest, GenerateResponse, RenderRequest, RenderedImage, SessionId};
use vignette_engine::{AssetGenerator, RetryPolicy, SceneSynchronizer};
use vignette_error::{GeminiError, GeminiErrorKind, VignetteResult};
use vignette_interface::{ImageDriver, TextDriver};
use vignette_storage::FileSystemStorage;
use vignette_studio::{StoryGenerator, Studio};

pub const FALLBACK: &str = "static/fallback.png";

/// Text driver replaying canned responses in order.
///
/// Once the script runs out every call fails with a non-retryable error.
#[derive(Debug, Default)]
pub struct ScriptedTextDriver {
    responses: Mutex<VecDeque<String>>,
    requests: Mutex<Vec<GenerateRequest>>,
}

impl ScriptedTextDriver {
    pub fn new(responses: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            responses: Mutex::new(responses.into_iter().map(Into::into).collect()),
            ..Default::default()
        }
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<GenerateRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_prompt(&self) -> String {
        self.requests
            .lock()
            .unwrap()
            .last()
            .map(|r| r.prompt.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl TextDriver for ScriptedTextDriver {
    async fn generate(&self, req: &GenerateRequest) -> VignetteResult<GenerateResponse> {
        self.requests.lock().unwrap().push(req.clone());
        match self.responses.lock().unwrap().pop_front() {
            Some(text) => Ok(GenerateResponse { text }),
            None => Err(GeminiError::new(GeminiErrorKind::HttpError {
                status_code: 400,
                message: "script exhausted".to_string(),
            })
            .into()),
        }
    }

    fn provider_name(&self) -> &'static str {
        "scripted"
    }

    fn model_name(&self) -> &str {
        "scripted-text"
    }
}

/// Image driver that always renders, recording prompts.
#[derive(Debug, Default)]
pub struct RecordingImageDriver {
    prompts: Mutex<Vec<String>>,
    calls: AtomicUsize,
    fail_with_missing_key: bool,
}

impl RecordingImageDriver {
    pub fn misconfigured() -> Self {
        Self {
            fail_with_missing_key: true,
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
impl ImageDriver for RecordingImageDriver {
    async fn render(&self, req: &RenderRequest) -> VignetteResult<Option<RenderedImage>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(req.prompt.clone());
        if self.fail_with_missing_key {
            return Err(GeminiError::new(GeminiErrorKind::MissingApiKey).into());
        }
        Ok(Some(RenderedImage {
            mime_type: "image/png".to_string(),
            data: format!("pixels for {}", req.prompt).into_bytes(),
        }))
    }

    fn provider_name(&self) -> &'static str {
        "recording"
    }

    fn model_name(&self) -> &str {
        "recording-image"
    }
}

pub fn synchronizer(
    driver: Arc<RecordingImageDriver>,
    dir: &TempDir,
    session: SessionId,
) -> SceneSynchronizer {
    let generator = AssetGenerator::builder()
        .driver(driver)
        .storage(Arc::new(FileSystemStorage::new(dir.path()).unwrap()))
        .session(session)
        .policy(RetryPolicy {
            max_attempts: 3,
            time_unit: Duration::from_secs(1),
            pacing_units: 1,
        })
        .fallback_reference(FALLBACK)
        .build()
        .unwrap();
    SceneSynchronizer::new(generator)
}

pub fn studio(
    text: Arc<ScriptedTextDriver>,
    images: Arc<RecordingImageDriver>,
    dir: &TempDir,
) -> Studio {
    Studio::new(
        StoryGenerator::new(text),
        synchronizer(images, dir, SessionId::new()),
    )
}

pub fn overview_json() -> String {
    json!({
        "storyline": "Mira returns to the harbor town she left and finds the Old Pier still standing.",
        "emotional_tones": ["wistful", "hopeful"]
    })
    .to_string()
}

/// Six-scene story where scenes 1 and 4 mention the heroine by `name` and
/// scenes 2 and 5 mention the Old Pier. Scenes 3 and 6 mention neither.
pub fn story_json(name: &str, pier: &str) -> String {
    json!({
        "storyline": "Mira returns to the harbor town she left.",
        "persona_description": [
            {"id": 1, "name": name, "age": 34, "clothing": "a yellow raincoat", "skin": "olive", "hair": "silver"},
            {"id": 2, "name": "Tomas", "age": "60", "clothing": "a fisherman's sweater", "skin": "tanned", "hair": "white"}
        ],
        "setting_description": [
            {"id": 1, "name": "Old Pier", "description": pier},
            {"id": 2, "name": "Lighthouse", "description": "a red lighthouse on the point"}
        ],
        "scenes": [
            {"id": 1, "image_prompt": format!("{name} steps off the bus at dawn"), "narration": "She is back."},
            {"id": 2, "image_prompt": "Fog rolls over the Old Pier", "narration": "Nothing has changed."},
            {"id": 3, "image_prompt": "Gulls circle the harbor", "narration": "The town wakes."},
            {"id": 4, "image_prompt": format!("{name} knocks on a blue door"), "narration": "A familiar face."},
            {"id": 5, "image_prompt": "Lanterns glow along the Old Pier", "narration": "Night falls."},
            {"id": 6, "image_prompt": "Waves break under a red sky", "narration": "She stays."}
        ],
        "emotional_tones": ["wistful", "hopeful"]
    })
    .to_string()
}

pub fn default_story_json() -> String {
    story_json("Mira", "a weathered wooden pier jutting into grey water")
}
