//! One synchronization pass over a story's scenes.

use tracing::{debug, error, info, instrument, warn};
use vignette_core::Story;
use vignette_error::VignetteResult;

use crate::{AssetGenerator, fingerprint_of, resolve, should_regenerate};

/// Keeps every scene's asset in step with its resolved prompt.
///
/// Scenes whose resolved prompt is unchanged since the prior revision keep
/// their asset, as long as the stored file is still there; every other
/// scene is rendered again. Scenes are processed one at a time in ascending
/// id order.
#[derive(Debug, Clone)]
pub struct SceneSynchronizer {
    generator: AssetGenerator,
}

/// Counters for one pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct PassSummary {
    reused: usize,
    generated: usize,
    fallback: usize,
}

impl SceneSynchronizer {
    /// Create a synchronizer around an asset generator.
    pub fn new(generator: AssetGenerator) -> Self {
        Self { generator }
    }

    /// The asset generator used for cache misses.
    pub fn generator(&self) -> &AssetGenerator {
        &self.generator
    }

    /// Bring every scene of `story` up to date against `prior`.
    ///
    /// Only `asset_reference`, `content_fingerprint` and `resolved_prompt`
    /// of each scene are touched. When the pass returns `Ok`, every scene has
    /// an asset reference; scenes left on the fallback have no fingerprint
    /// and are retried on the next pass.
    ///
    /// # Errors
    ///
    /// Configuration errors abort the pass and are returned. The generator
    /// turns every other per-scene failure into the fallback asset.
    #[instrument(skip_all, fields(session = %self.generator.session(), scenes = story.scenes.len(), has_prior = prior.is_some()))]
    pub async fn synchronize(&self, mut story: Story, prior: Option<&Story>) -> VignetteResult<Story> {
        let mut order: Vec<usize> = (0..story.scenes.len()).collect();
        order.sort_by_key(|&index| story.scenes[index].id);

        let pacing = self.generator.policy().pacing();
        let mut summary = PassSummary::default();
        let mut calls = 0usize;

        for index in order {
            let scene = &story.scenes[index];
            let scene_id = scene.id;
            let resolved = resolve(
                &scene.image_prompt,
                &story.characters,
                &story.locations,
                &scene.emotional_tones,
            );
            let prior_scene = prior.and_then(|p| p.scene(scene_id));

            if !should_regenerate(scene, &resolved, prior_scene) {
                if let Some(prior_scene) = prior_scene {
                    let stored = match prior_scene.asset_reference.as_deref() {
                        Some(reference) => self.generator.asset_exists(reference).await,
                        None => false,
                    };
                    if stored {
                        debug!(scene_id, "Resolved prompt unchanged, reusing asset");
                        let scene = &mut story.scenes[index];
                        scene.asset_reference = prior_scene.asset_reference.clone();
                        scene.content_fingerprint = prior_scene.content_fingerprint.clone();
                        scene.resolved_prompt = Some(resolved);
                        summary.reused += 1;
                        continue;
                    }
                    warn!(scene_id, "Stored asset is gone, rendering again");
                }
            }

            if calls > 0 && !pacing.is_zero() {
                debug!(scene_id, delay_ms = pacing.as_millis() as u64, "Pacing generation");
                tokio::time::sleep(pacing).await;
            }
            calls += 1;

            let asset = match self.generator.generate(scene_id, &resolved).await {
                Ok(asset) => asset,
                Err(e) => {
                    error!(scene_id, error = %e, "Synchronization aborted");
                    return Err(e);
                }
            };

            let scene = &mut story.scenes[index];
            if asset.fallback {
                scene.content_fingerprint = None;
                summary.fallback += 1;
            } else {
                scene.content_fingerprint = Some(fingerprint_of(&resolved));
                summary.generated += 1;
            }
            scene.asset_reference = Some(asset.reference);
            scene.resolved_prompt = Some(resolved);
        }

        info!(
            reused = summary.reused,
            generated = summary.generated,
            fallback = summary.fallback,
            "Synchronization pass complete"
        );
        Ok(story)
    }
}
