//! Scene asset storage for Vignette.
//!
//! Generated images are written once and never deleted, so an earlier story
//! revision can keep pointing at its assets after a later pass regenerates a
//! scene.
//!
//! # Example
//!
//! ```rust
//! use vignette_core::SessionId;
//! use vignette_storage::{AssetStorage, FileSystemStorage};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let storage = FileSystemStorage::new("/tmp/vignette-assets")?;
//! let session = SessionId::new();
//!
//! let data = vec![0u8; 1024]; // PNG data
//! let reference = storage.store(&session, 1, &data, "image/png").await?;
//!
//! assert!(storage.exists(&reference.storage_path).await?);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use vignette_core::SessionId;
use vignette_error::VignetteResult;

mod filesystem;

pub use filesystem::{FileSystemStorage, extension_for};
pub use vignette_error::{StorageError, StorageErrorKind};

/// Trait for scene asset storage backends.
#[async_trait::async_trait]
pub trait AssetStorage: Send + Sync {
    /// Store the image for one scene and return where it landed.
    ///
    /// Storing identical bytes for the same scene returns the existing
    /// reference without rewriting the file.
    async fn store(
        &self,
        session: &SessionId,
        scene_id: u32,
        data: &[u8],
        mime_type: &str,
    ) -> VignetteResult<AssetReference>;

    /// Check whether an asset previously returned by [`store`](Self::store)
    /// is still present at `storage_path`.
    async fn exists(&self, storage_path: &str) -> VignetteResult<bool>;
}

/// Where a scene image was stored.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AssetReference {
    /// SHA-256 hex digest of the stored bytes
    pub content_hash: String,
    /// Backend-specific path to the asset
    pub storage_path: String,
}
