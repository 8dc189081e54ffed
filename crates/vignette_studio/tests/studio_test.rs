//! Tests for the editing workflow and its asset synchronization.

mod test_utils;

use std::sync::Arc;

use tempfile::TempDir;
use test_utils::{
    RecordingImageDriver, ScriptedTextDriver, default_story_json, overview_json, story_json,
    studio, synchronizer,
};
use vignette_core::SessionId;
use vignette_error::{StoryErrorKind, VignetteErrorKind};
use vignette_studio::{StoryGenerator, StorySession, Studio};

fn story_error_kind(err: &vignette_error::VignetteError) -> Option<&StoryErrorKind> {
    match err.kind() {
        VignetteErrorKind::Story(e) => Some(&e.kind),
        _ => None,
    }
}

#[tokio::test(start_paused = true)]
async fn test_draft_renders_every_scene() {
    let dir = TempDir::new().unwrap();
    let text = Arc::new(ScriptedTextDriver::new([overview_json(), default_story_json()]));
    let images = Arc::new(RecordingImageDriver::default());
    let mut studio = studio(text, images.clone(), &dir);

    studio.start("a woman comes home").await.unwrap();
    let story = studio.draft_story().await.unwrap().clone();

    assert_eq!(images.call_count(), 6);
    assert!(story.scenes.iter().all(|s| s.has_asset()));
    assert!(images.prompts()[0].starts_with("Mira, 34 years old, with silver hair"));
    assert!(images.prompts()[1].contains("a weathered wooden pier jutting into grey water"));
    assert_eq!(studio.session().idea, "a woman comes home");
    assert!(studio.overview().is_some());
}

#[tokio::test(start_paused = true)]
async fn test_rename_rerenders_only_scenes_mentioning_the_character() {
    let dir = TempDir::new().unwrap();
    let text = Arc::new(ScriptedTextDriver::new([
        overview_json(),
        default_story_json(),
        story_json("Mia", "a weathered wooden pier jutting into grey water"),
    ]));
    let images = Arc::new(RecordingImageDriver::default());
    let mut studio = studio(text, images.clone(), &dir);

    studio.start("a woman comes home").await.unwrap();
    let before = studio.draft_story().await.unwrap().clone();
    let after = studio
        .revise_character(1, "rename her to Mia")
        .await
        .unwrap()
        .clone();

    assert_eq!(images.call_count(), 8);
    let prompts = images.prompts();
    assert!(prompts[6..].iter().all(|p| p.starts_with("Mia, 34 years old")));
    for id in [1, 4] {
        assert_ne!(
            after.scene(id).unwrap().asset_reference,
            before.scene(id).unwrap().asset_reference
        );
    }
    for id in [2, 3, 5, 6] {
        assert_eq!(
            after.scene(id).unwrap().asset_reference,
            before.scene(id).unwrap().asset_reference
        );
    }
}

#[tokio::test(start_paused = true)]
async fn test_narration_edit_rerenders_nothing() {
    let dir = TempDir::new().unwrap();
    let text = Arc::new(ScriptedTextDriver::new([
        overview_json(),
        default_story_json(),
        r#"{"narration": "She is finally home."}"#.to_string(),
    ]));
    let images = Arc::new(RecordingImageDriver::default());
    let mut studio = studio(text, images.clone(), &dir);

    studio.start("idea").await.unwrap();
    let before = studio.draft_story().await.unwrap().clone();
    let after = studio.revise_narration(1, "warmer").await.unwrap().clone();

    assert_eq!(images.call_count(), 6);
    assert_eq!(after.scene(1).unwrap().narration, "She is finally home.");
    assert_eq!(
        after.scene(1).unwrap().asset_reference,
        before.scene(1).unwrap().asset_reference
    );
}

#[tokio::test(start_paused = true)]
async fn test_scene_edit_rerenders_that_scene() {
    let dir = TempDir::new().unwrap();
    let text = Arc::new(ScriptedTextDriver::new([
        overview_json(),
        default_story_json(),
        r#"{"id": 3, "image_prompt": "Gulls scatter over the Old Pier", "narration": "Loud."}"#
            .to_string(),
    ]));
    let images = Arc::new(RecordingImageDriver::default());
    let mut studio = studio(text, images.clone(), &dir);

    studio.start("idea").await.unwrap();
    let before = studio.draft_story().await.unwrap().clone();
    let after = studio.revise_scene(3, "bring in the pier").await.unwrap().clone();

    assert_eq!(images.call_count(), 7);
    assert!(images.prompts()[6].contains("a weathered wooden pier"));
    assert_ne!(
        after.scene(3).unwrap().asset_reference,
        before.scene(3).unwrap().asset_reference
    );
    assert_eq!(after.scene(4), before.scene(4));
}

#[tokio::test(start_paused = true)]
async fn test_resync_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let text = Arc::new(ScriptedTextDriver::new([overview_json(), default_story_json()]));
    let images = Arc::new(RecordingImageDriver::default());
    let mut studio = studio(text, images.clone(), &dir);

    studio.start("idea").await.unwrap();
    let drafted = studio.draft_story().await.unwrap().clone();
    let resynced = studio.resync().await.unwrap().clone();

    assert_eq!(images.call_count(), 6);
    assert_eq!(resynced, drafted);
}

#[tokio::test(start_paused = true)]
async fn test_steps_before_their_inputs_exist_fail() {
    let dir = TempDir::new().unwrap();
    let text = Arc::new(ScriptedTextDriver::new(Vec::<String>::new()));
    let images = Arc::new(RecordingImageDriver::default());
    let mut studio = studio(text.clone(), images, &dir);

    let err = studio.draft_story().await.unwrap_err();
    assert_eq!(story_error_kind(&err), Some(&StoryErrorKind::MissingOverview));

    let err = studio.revise_overview("shorter").await.unwrap_err();
    assert_eq!(story_error_kind(&err), Some(&StoryErrorKind::MissingOverview));

    let err = studio.revise_character(1, "older").await.unwrap_err();
    assert_eq!(story_error_kind(&err), Some(&StoryErrorKind::MissingStory));

    let err = studio.resync().await.unwrap_err();
    assert_eq!(story_error_kind(&err), Some(&StoryErrorKind::MissingStory));

    assert_eq!(text.call_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_failed_edit_keeps_current_story() {
    let dir = TempDir::new().unwrap();
    // Script runs out after the draft, so the edit's model call fails.
    let text = Arc::new(ScriptedTextDriver::new([overview_json(), default_story_json()]));
    let images = Arc::new(RecordingImageDriver::default());
    let mut studio = studio(text, images, &dir);

    studio.start("idea").await.unwrap();
    let drafted = studio.draft_story().await.unwrap().clone();

    assert!(studio.revise_location(1, "rotting").await.is_err());
    assert_eq!(studio.story(), Some(&drafted));
}

#[tokio::test(start_paused = true)]
async fn test_misconfigured_renderer_leaves_no_story() {
    let dir = TempDir::new().unwrap();
    let text = Arc::new(ScriptedTextDriver::new([overview_json(), default_story_json()]));
    let images = Arc::new(RecordingImageDriver::misconfigured());
    let mut studio = studio(text, images.clone(), &dir);

    studio.start("idea").await.unwrap();
    let err = studio.draft_story().await.unwrap_err();

    assert!(err.is_configuration());
    assert_eq!(images.call_count(), 1);
    assert!(studio.story().is_none());
}

#[tokio::test]
async fn test_resume_requires_matching_session() {
    let dir = TempDir::new().unwrap();
    let text = Arc::new(ScriptedTextDriver::new(Vec::<String>::new()));
    let images = Arc::new(RecordingImageDriver::default());
    let saved = StorySession::new("idea");

    let mismatched = Studio::resume(
        StoryGenerator::new(text.clone()),
        synchronizer(images.clone(), &dir, SessionId::new()),
        saved.clone(),
    );
    assert!(mismatched.unwrap_err().is_configuration());

    let resumed = Studio::resume(
        StoryGenerator::new(text),
        synchronizer(images, &dir, saved.session_id),
        saved.clone(),
    )
    .unwrap();
    assert_eq!(resumed.session(), &saved);
}
