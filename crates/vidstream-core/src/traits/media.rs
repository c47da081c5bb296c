//! Media storage port
//!
//! Uploaded files (video sources, thumbnails, avatars, cover images)
//! go through this trait; the storage layer decides where the bytes
//! land and what URL they are served from.

use async_trait::async_trait;

use crate::traits::repositories::RepoResult;

/// The outcome of a successful upload
#[derive(Debug, Clone, PartialEq)]
pub struct StoredMedia {
    /// Publicly reachable URL for the stored file
    pub url: String,
    /// Playback length in seconds, when the file is a video the store
    /// could probe
    pub duration_seconds: Option<f64>,
}

#[async_trait]
pub trait MediaStore: Send + Sync {
    /// Persist an uploaded file and return its public URL
    ///
    /// # Errors
    /// Returns `DomainError::MediaRejected` when the file is empty,
    /// oversized, or of an unsupported content type.
    async fn store(
        &self,
        filename: &str,
        content_type: &str,
        data: Vec<u8>,
    ) -> RepoResult<StoredMedia>;

    /// Best-effort removal of a previously stored file by its URL
    ///
    /// Missing files are not an error; the caller has already moved on.
    async fn remove(&self, url: &str) -> RepoResult<()>;
}
