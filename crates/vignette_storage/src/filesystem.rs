//! Filesystem-based asset storage.

use crate::{AssetReference, AssetStorage};
use sha2::{Digest, Sha256};
use std::path::PathBuf;
use vignette_core::SessionId;
use vignette_error::{StorageError, StorageErrorKind, VignetteResult};

/// Filesystem storage backend.
///
/// Layout: `{base_path}/{session_id}/scene-{id}-{hash[0:16]}.{ext}`
///
/// ```text
/// assets/
/// └── 0b6f.../
///     ├── scene-1-3fa9c2d41e07b815.png
///     ├── scene-2-91c0a77e5d2b4f60.png
///     └── scene-2-c4e1f0a3b8d92e17.png   (earlier revision, kept)
/// ```
///
/// Writes go to a temp file first and are renamed into place.
pub struct FileSystemStorage {
    base_path: PathBuf,
}

impl FileSystemStorage {
    /// Create a new filesystem storage backend rooted at `base_path`.
    ///
    /// # Errors
    ///
    /// Returns error if the directory cannot be created.
    #[tracing::instrument(skip(base_path))]
    pub fn new(base_path: impl Into<PathBuf>) -> VignetteResult<Self> {
        let base_path = base_path.into();

        std::fs::create_dir_all(&base_path).map_err(|e| {
            StorageError::new(StorageErrorKind::InvalidConfig(format!(
                "{}: {}",
                base_path.display(),
                e
            )))
        })?;

        tracing::info!(path = %base_path.display(), "Created filesystem storage");
        Ok(Self { base_path })
    }

    fn compute_hash(data: &[u8]) -> String {
        let mut hasher = Sha256::new();
        hasher.update(data);
        format!("{:x}", hasher.finalize())
    }

    fn get_path(&self, session: &SessionId, scene_id: u32, hash: &str, mime_type: &str) -> PathBuf {
        self.base_path.join(session.to_string()).join(format!(
            "scene-{}-{}.{}",
            scene_id,
            &hash[..16],
            extension_for(mime_type)
        ))
    }
}

/// File extension for an image MIME type.
///
/// ```
/// use vignette_storage::extension_for;
///
/// assert_eq!(extension_for("image/jpeg"), "jpg");
/// assert_eq!(extension_for("application/octet-stream"), "bin");
/// ```
pub fn extension_for(mime_type: &str) -> &'static str {
    match mime_type {
        "image/png" => "png",
        "image/jpeg" | "image/jpg" => "jpg",
        "image/webp" => "webp",
        "image/gif" => "gif",
        _ => "bin",
    }
}

#[async_trait::async_trait]
impl AssetStorage for FileSystemStorage {
    #[tracing::instrument(skip(self, data), fields(session = %session, size = data.len()))]
    async fn store(
        &self,
        session: &SessionId,
        scene_id: u32,
        data: &[u8],
        mime_type: &str,
    ) -> VignetteResult<AssetReference> {
        let hash = Self::compute_hash(data);
        let path = self.get_path(session, scene_id, &hash, mime_type);
        let reference = AssetReference {
            content_hash: hash.clone(),
            storage_path: path.to_string_lossy().to_string(),
        };

        if tokio::fs::try_exists(&path).await.unwrap_or(false) {
            tracing::debug!(
                hash = %hash,
                path = %path.display(),
                "Asset already exists, returning existing reference"
            );
            return Ok(reference);
        }

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                    "{}: {}",
                    parent.display(),
                    e
                )))
            })?;
        }

        let temp_path = path.with_extension("tmp");
        tokio::fs::write(&temp_path, data).await.map_err(|e| {
            StorageError::new(StorageErrorKind::FileWrite(format!(
                "{}: {}",
                temp_path.display(),
                e
            )))
        })?;

        tokio::fs::rename(&temp_path, &path).await.map_err(|e| {
            StorageError::new(StorageErrorKind::FileWrite(format!(
                "rename {} to {}: {}",
                temp_path.display(),
                path.display(),
                e
            )))
        })?;

        tracing::info!(
            scene_id,
            hash = %hash,
            path = %path.display(),
            size = data.len(),
            "Stored scene asset"
        );

        Ok(reference)
    }

    #[tracing::instrument(skip(self))]
    async fn exists(&self, storage_path: &str) -> VignetteResult<bool> {
        let present = tokio::fs::try_exists(storage_path).await.unwrap_or(false);
        if !present {
            tracing::debug!("Stored asset is missing");
        }
        Ok(present)
    }
}
