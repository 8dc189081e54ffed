//! Story overview produced from an idea before the full story is drafted.

use serde::{Deserialize, Serialize};

/// Short storyline plus the story's emotional tones.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Overview {
    /// Six to ten sentence storyline
    pub storyline: String,
    /// Primary emotional tones
    #[serde(default)]
    pub tones: Vec<String>,
}
