//! Vignette CLI binary.
//!
//! Every command loads the session file, runs one step of the editing
//! workflow and writes the session back:
//! - Start a session from an idea and revise its overview
//! - Draft the story and render its scenes
//! - Edit characters, locations, scenes and narration
//! - Print the story or re-run synchronization

use clap::Parser;

mod cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use cli::{Cli, run_command};

    // Secrets such as GEMINI_API_KEY may live in .env
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    vignette::telemetry::init_console_telemetry(cli.verbose)?;

    run_command(cli.command, &cli.session).await?;

    Ok(())
}
