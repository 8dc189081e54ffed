//! Cache keys for generated scene assets.

use sha2::{Digest, Sha256};
use vignette_core::Scene;

/// Fingerprint of a resolved prompt.
///
/// ```
/// use vignette_engine::fingerprint_of;
///
/// let a = fingerprint_of("a weathered wooden pier");
/// assert!(a.starts_with("sha256:"));
/// assert_eq!(a, fingerprint_of("a weathered wooden pier"));
/// assert_ne!(a, fingerprint_of("a weathered wooden pier."));
/// ```
pub fn fingerprint_of(resolved_prompt: &str) -> String {
    format!("sha256:{:x}", Sha256::digest(resolved_prompt.as_bytes()))
}

/// Whether `scene` needs a new asset for `resolved_prompt`.
///
/// Returns `false` only when `prior` is the same scene, already carries an
/// asset reference and a fingerprint, and that fingerprint equals the
/// fingerprint of `resolved_prompt`.
pub fn should_regenerate(scene: &Scene, resolved_prompt: &str, prior: Option<&Scene>) -> bool {
    let Some(prior) = prior else {
        return true;
    };
    if prior.id != scene.id || prior.asset_reference.is_none() {
        return true;
    }
    match &prior.content_fingerprint {
        Some(stored) => *stored != fingerprint_of(resolved_prompt),
        None => true,
    }
}
