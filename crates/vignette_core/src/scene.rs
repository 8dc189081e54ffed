//! Scenes and their rendered assets.

use serde::{Deserialize, Serialize};

/// One of the story's six temporally ordered scenes.
///
/// The text fields come from story generation. The asset fields
/// (`asset_reference`, `content_fingerprint`, `resolved_prompt`) are owned by
/// scene synchronization and record what the current image was rendered from.
///
/// # Examples
///
/// ```
/// use vignette_core::Scene;
///
/// let scene = Scene::builder()
///     .id(1)
///     .image_prompt("Mira walks along the Old Pier at dusk")
///     .emotional_tones(vec!["wistful".to_string()])
///     .build()
///     .unwrap();
///
/// assert!(!scene.has_asset());
/// ```
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, derive_builder::Builder,
)]
pub struct Scene {
    /// Ordinal position, 1 through 6
    pub id: u32,
    /// Visual description that may mention characters and locations by name
    #[builder(setter(into))]
    pub image_prompt: String,
    /// Narration spoken over the scene
    #[builder(default, setter(into))]
    #[serde(default)]
    pub narration: String,
    /// Emotional tones the image should convey, in display order
    #[builder(default)]
    #[serde(default)]
    pub emotional_tones: Vec<String>,
    /// Path or handle of the last generated visual
    #[builder(default)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset_reference: Option<String>,
    /// Fingerprint of the resolved prompt the asset was generated from
    #[builder(default)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_fingerprint: Option<String>,
    /// Resolved prompt from the last synchronization pass
    #[builder(default)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved_prompt: Option<String>,
}

impl Scene {
    /// Creates a new builder for `Scene`.
    pub fn builder() -> SceneBuilder {
        SceneBuilder::default()
    }

    /// True when the scene has both an asset and the fingerprint it was generated from.
    pub fn has_asset(&self) -> bool {
        self.asset_reference.is_some() && self.content_fingerprint.is_some()
    }

    /// Copies the asset fields of `other` onto this scene.
    ///
    /// Used when an edit replaces scene text but keeps the previously rendered image
    /// as the cache candidate for the next synchronization pass.
    pub fn inherit_asset(&mut self, other: &Scene) {
        self.asset_reference = other.asset_reference.clone();
        self.content_fingerprint = other.content_fingerprint.clone();
        self.resolved_prompt = other.resolved_prompt.clone();
    }
}
