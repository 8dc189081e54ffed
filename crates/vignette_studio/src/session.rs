//! Editing session state and its JSON file store.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};
use vignette_core::{Overview, SessionId, Story};
use vignette_error::{StoryError, StoryErrorKind, VignetteResult};

/// Everything one editing session has produced so far.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorySession {
    /// Qualifies every asset rendered for this session
    pub session_id: SessionId,
    /// The idea the session started from
    pub idea: String,
    /// Current overview, once drafted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overview: Option<Overview>,
    /// Current story, once drafted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub story: Option<Story>,
}

impl StorySession {
    /// Fresh session for an idea.
    pub fn new(idea: impl Into<String>) -> Self {
        Self {
            session_id: SessionId::new(),
            idea: idea.into(),
            overview: None,
            story: None,
        }
    }
}

/// JSON file holding one [`StorySession`].
#[derive(Debug, Clone)]
pub struct SessionFile {
    path: PathBuf,
}

impl SessionFile {
    /// Store at `path`. Nothing is touched until `load` or `save`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the session, or `None` when the file does not exist yet.
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub async fn load(&self) -> VignetteResult<Option<StorySession>> {
        debug!("Loading session");
        if !tokio::fs::try_exists(&self.path)
            .await
            .map_err(|e| session_error(&self.path, e))?
        {
            return Ok(None);
        }

        let json = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| session_error(&self.path, e))?;
        let session = serde_json::from_str(&json).map_err(|e| session_error(&self.path, e))?;
        info!("Session loaded");
        Ok(Some(session))
    }

    /// Write the session, replacing any previous contents atomically.
    #[instrument(skip(self, session), fields(path = %self.path.display(), session_id = %session.session_id))]
    pub async fn save(&self, session: &StorySession) -> VignetteResult<()> {
        debug!("Saving session");
        let json =
            serde_json::to_string_pretty(session).map_err(|e| session_error(&self.path, e))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| session_error(parent, e))?;
        }

        let temp = self.path.with_extension("json.tmp");
        tokio::fs::write(&temp, json)
            .await
            .map_err(|e| session_error(&temp, e))?;
        tokio::fs::rename(&temp, &self.path)
            .await
            .map_err(|e| session_error(&self.path, e))?;

        info!("Session saved");
        Ok(())
    }
}

#[track_caller]
fn session_error(path: &Path, err: impl std::fmt::Display) -> vignette_error::VignetteError {
    StoryError::new(StoryErrorKind::SessionFile(format!(
        "{}: {}",
        path.display(),
        err
    )))
    .into()
}
