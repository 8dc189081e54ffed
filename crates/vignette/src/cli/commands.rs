//! CLI command definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Vignette - draft a six-scene story from an idea and keep its images current
#[derive(Parser, Debug)]
#[command(name = "vignette")]
#[command(about = "Draft short illustrated stories and re-render only the scenes an edit touches", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Session file to read and update
    #[arg(long, global = true, default_value = "vignette-session.json")]
    pub session: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start a new session from a story idea and print its overview
    New {
        /// One-line story idea
        idea: String,
    },

    /// Revise the overview
    Overview {
        /// What to change
        feedback: String,
    },

    /// Generate the full story from the overview and render every scene
    Draft,

    /// Edit a character and re-render the scenes that mention them
    Character {
        /// Character id
        id: u32,
        /// What to change
        feedback: String,
    },

    /// Edit a location and re-render the scenes that mention it
    Location {
        /// Location id
        id: u32,
        /// What to change
        feedback: String,
    },

    /// Rewrite a scene's image prompt and narration
    Scene {
        /// Scene id (1-6)
        id: u32,
        /// What to change
        feedback: String,
    },

    /// Rewrite a scene's narration only
    Narration {
        /// Scene id (1-6)
        id: u32,
        /// What to change
        feedback: String,
    },

    /// Print the current story as JSON
    Show,

    /// Re-render scenes whose images are missing or out of date
    Sync,
}
