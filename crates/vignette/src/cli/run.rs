//! Command handlers.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info};
use vignette::{
    AssetGenerator, BuilderError, FileSystemStorage, GeminiClient, GeminiImageClient, Overview,
    RetryPolicy, SceneSynchronizer, SessionFile, Story, StoryError, StoryErrorKind,
    StoryGenerator, StorySession, Studio, VignetteConfig, VignetteResult,
};

use super::Commands;

/// Run one command against the session stored at `session_path`.
pub async fn run_command(command: Commands, session_path: &Path) -> VignetteResult<()> {
    let file = SessionFile::new(session_path);

    match command {
        Commands::New { idea } => {
            let config = VignetteConfig::load()?;
            let mut studio = build_studio(&config, StorySession::new(idea.as_str())).await?;
            let overview = studio.start(&idea).await?.clone();
            file.save(studio.session()).await?;
            print_overview(&overview);
        }
        Commands::Show => {
            let session = require_session(&file).await?;
            let story = session
                .story
                .ok_or_else(|| StoryError::new(StoryErrorKind::MissingStory))?;
            print_story(&story)?;
        }
        Commands::Overview { feedback } => {
            let mut studio = load_studio(&file).await?;
            let overview = studio.revise_overview(&feedback).await?.clone();
            file.save(studio.session()).await?;
            print_overview(&overview);
        }
        Commands::Draft => {
            let mut studio = load_studio(&file).await?;
            studio.draft_story().await?;
            save_and_print(&file, &studio).await?;
        }
        Commands::Character { id, feedback } => {
            let mut studio = load_studio(&file).await?;
            studio.revise_character(id, &feedback).await?;
            save_and_print(&file, &studio).await?;
        }
        Commands::Location { id, feedback } => {
            let mut studio = load_studio(&file).await?;
            studio.revise_location(id, &feedback).await?;
            save_and_print(&file, &studio).await?;
        }
        Commands::Scene { id, feedback } => {
            let mut studio = load_studio(&file).await?;
            studio.revise_scene(id, &feedback).await?;
            save_and_print(&file, &studio).await?;
        }
        Commands::Narration { id, feedback } => {
            let mut studio = load_studio(&file).await?;
            studio.revise_narration(id, &feedback).await?;
            save_and_print(&file, &studio).await?;
        }
        Commands::Sync => {
            let mut studio = load_studio(&file).await?;
            studio.resync().await?;
            save_and_print(&file, &studio).await?;
        }
    }

    info!(session = %session_path.display(), "Done");
    Ok(())
}

/// Studio for the session saved in `file`.
async fn load_studio(file: &SessionFile) -> VignetteResult<Studio> {
    let config = VignetteConfig::load()?;
    let session = require_session(file).await?;
    build_studio(&config, session).await
}

async fn save_and_print(file: &SessionFile, studio: &Studio) -> VignetteResult<()> {
    file.save(studio.session()).await?;
    let story = studio
        .story()
        .ok_or_else(|| StoryError::new(StoryErrorKind::MissingStory))?;
    print_story(story)
}

/// Wire Gemini drivers, storage and retry policy for `session`.
///
/// # Errors
///
/// Fails with a configuration error when the fallback placeholder is missing.
async fn build_studio(config: &VignetteConfig, session: StorySession) -> VignetteResult<Studio> {
    debug!(
        text_model = %config.gemini.text_model,
        image_model = %config.gemini.image_model,
        assets = %config.assets.base_dir.display(),
        "Building studio"
    );

    let text = GeminiClient::new(config.gemini.text_model.clone())?;
    let images = GeminiImageClient::new(
        config.gemini.api_base.clone(),
        config.gemini.image_model.clone(),
    )?;
    let storage = FileSystemStorage::new(&config.assets.base_dir)?;

    let generator = AssetGenerator::builder()
        .driver(Arc::new(images))
        .storage(Arc::new(storage))
        .session(session.session_id)
        .policy(RetryPolicy::from(&config.retry))
        .fallback_reference(config.assets.fallback_path.clone())
        .default_mime(config.assets.mime_type.clone())
        .build()
        .map_err(|e| BuilderError::from(e.to_string()))?;
    generator.verify_fallback().await?;

    let stories = StoryGenerator::new(Arc::new(text)).with_temperature(config.gemini.temperature);

    Studio::resume(stories, SceneSynchronizer::new(generator), session)
}

async fn require_session(file: &SessionFile) -> VignetteResult<StorySession> {
    file.load().await?.ok_or_else(|| {
        StoryError::new(StoryErrorKind::SessionFile(format!(
            "{} does not exist; start one with `vignette new <idea>`",
            file.path().display()
        )))
        .into()
    })
}

fn print_overview(overview: &Overview) {
    println!("{}", overview.storyline);
    if !overview.tones.is_empty() {
        println!();
        println!("Tones: {}", overview.tones.join(", "));
    }
}

fn print_story(story: &Story) -> VignetteResult<()> {
    let json = serde_json::to_string_pretty(story)
        .map_err(|e| vignette::JsonError::new(e.to_string()))?;
    println!("{json}");
    Ok(())
}
