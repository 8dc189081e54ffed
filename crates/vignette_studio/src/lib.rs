//! Story drafting and editing for Vignette.
//!
//! [`StoryGenerator`] turns an idea into an [`Overview`](vignette_core::Overview)
//! and then into a six-scene [`Story`](vignette_core::Story), and applies
//! targeted edits to characters, locations, scenes and narration.
//! [`Studio`] ties those edits to scene asset synchronization and keeps the
//! session state that [`SessionFile`] persists between runs.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod dto;
mod extraction;
mod generator;
mod prompts;
mod session;
mod studio;

pub use dto::{
    NarrationDto, OverviewDto, PersonaDto, SceneDto, SceneEditDto, SettingDto, StoryDto,
};
pub use extraction::{extract_json, parse_json};
pub use generator::StoryGenerator;
pub use session::{SessionFile, StorySession};
pub use studio::Studio;
