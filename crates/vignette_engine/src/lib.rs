//! Reference resolution and incremental asset regeneration.
//!
//! A scene's image prompt mentions characters and locations by name. Before
//! rendering, [`resolve`] expands those names into full descriptions, and
//! the fingerprint of the expanded prompt decides whether the scene's image
//! is still current ([`should_regenerate`]). [`SceneSynchronizer`] runs that
//! check over every scene and asks the [`AssetGenerator`] for new images
//! only where something changed, so renaming a character re-renders exactly
//! the scenes that mention them.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod fingerprint;
mod generator;
mod resolver;
mod synchronizer;

pub use fingerprint::{fingerprint_of, should_regenerate};
pub use generator::{
    AssetGenerator, AssetGeneratorBuilder, AssetGeneratorBuilderError, GeneratedAsset, RetryPolicy,
};
pub use resolver::resolve;
pub use synchronizer::SceneSynchronizer;
