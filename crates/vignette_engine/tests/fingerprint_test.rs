//! Tests for the regeneration comparator.

mod test_utils;

use test_utils::{harbor_story, mira, scene};
use vignette_engine::{fingerprint_of, resolve, should_regenerate};

fn synchronized(id: u32, prompt: &str, resolved: &str) -> vignette_core::Scene {
    let mut prior = scene(id, prompt, &[]);
    prior.asset_reference = Some(format!("assets/s/scene-{id}.png"));
    prior.content_fingerprint = Some(fingerprint_of(resolved));
    prior
}

#[test]
fn test_identical_resolved_prompt_is_a_cache_hit() {
    let current = scene(1, "Mira at dawn", &[]);
    let resolved = resolve(&current.image_prompt, &[mira()], &[], &[]);
    let prior = synchronized(1, "Mira at dawn", &resolved);

    assert!(!should_regenerate(&current, &resolved, Some(&prior)));
}

#[test]
fn test_missing_prior_requires_generation() {
    let current = scene(1, "Mira at dawn", &[]);
    assert!(should_regenerate(&current, "anything", None));
}

#[test]
fn test_prior_without_asset_requires_generation() {
    let current = scene(1, "Mira at dawn", &[]);
    let mut prior = synchronized(1, "Mira at dawn", "resolved");
    prior.asset_reference = None;
    assert!(should_regenerate(&current, "resolved", Some(&prior)));

    let mut prior = synchronized(1, "Mira at dawn", "resolved");
    prior.content_fingerprint = None;
    assert!(should_regenerate(&current, "resolved", Some(&prior)));
}

#[test]
fn test_prior_of_another_scene_is_ignored() {
    let current = scene(2, "Mira at dawn", &[]);
    let prior = synchronized(1, "Mira at dawn", "resolved");
    assert!(should_regenerate(&current, "resolved", Some(&prior)));
}

#[test]
fn test_rename_flips_to_regenerate() {
    let story = harbor_story();
    let current = &story.scenes[0];
    let resolved = resolve(
        &current.image_prompt,
        &story.characters,
        &story.locations,
        &current.emotional_tones,
    );
    let prior = synchronized(1, &current.image_prompt, &resolved);
    assert!(!should_regenerate(current, &resolved, Some(&prior)));

    let mut renamed = story.clone();
    renamed.characters[0].name = "Mia".to_string();
    renamed.scenes[0].image_prompt = "Mia walks along the beach at dawn".to_string();
    let scene = &renamed.scenes[0];
    let resolved_after = resolve(
        &scene.image_prompt,
        &renamed.characters,
        &renamed.locations,
        &scene.emotional_tones,
    );

    assert!(should_regenerate(scene, &resolved_after, Some(&prior)));
}

#[test]
fn test_fingerprint_ignores_raw_prompt() {
    // Same raw prompt, different character detail: the fingerprint must change.
    let story = harbor_story();
    let raw = &story.scenes[0].image_prompt;
    let before = resolve(raw, &story.characters, &[], &[]);

    let mut dyed = story.characters.clone();
    dyed[0].hair = "blue".to_string();
    let after = resolve(raw, &dyed, &[], &[]);

    assert_ne!(fingerprint_of(&before), fingerprint_of(&after));
}
