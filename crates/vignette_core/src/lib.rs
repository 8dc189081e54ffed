//! Core data types for the Vignette story studio.
//!
//! This crate provides the story aggregate shared across all Vignette crates:
//! a [`Story`] owns its cast ([`Character`]), its [`Location`]s and exactly six
//! ordered [`Scene`]s, plus the request/response types exchanged with text and
//! image providers.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod character;
mod location;
mod overview;
mod request;
mod scene;
mod session;
mod story;

pub use character::{Character, CharacterBuilder};
pub use location::{Location, LocationBuilder};
pub use overview::Overview;
pub use request::{
    GenerateRequest, GenerateRequestBuilder, GenerateResponse, RenderRequest, RenderedImage,
};
pub use scene::{Scene, SceneBuilder};
pub use session::SessionId;
pub use story::Story;
