//! Capability traits for the Vignette story studio.
//!
//! Story generation and image rendering are external capabilities. The
//! studio and the asset engine only talk to them through these traits, so a
//! Gemini client, a local model or a scripted test double are interchangeable.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod traits;

pub use traits::{ImageDriver, TextDriver};
