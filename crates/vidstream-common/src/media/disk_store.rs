//! Local-disk media storage
//!
//! Stores uploaded files under a configured directory and serves them
//! from a public base URL. Filenames are random UUIDs so uploads can
//! never collide or traverse outside the upload directory.

use std::path::PathBuf;

use async_trait::async_trait;
use uuid::Uuid;
use vidstream_core::{DomainError, MediaStore, RepoResult, StoredMedia};

use crate::config::MediaConfig;

/// Content types accepted for upload, with the file extension each maps to
const ALLOWED_TYPES: &[(&str, &str)] = &[
    ("video/mp4", "mp4"),
    ("video/webm", "webm"),
    ("image/jpeg", "jpg"),
    ("image/png", "png"),
    ("image/webp", "webp"),
];

/// `MediaStore` backed by the local filesystem
#[derive(Debug, Clone)]
pub struct DiskMediaStore {
    upload_dir: PathBuf,
    public_base_url: String,
    max_bytes: u64,
}

impl DiskMediaStore {
    #[must_use]
    pub fn new(config: &MediaConfig) -> Self {
        Self {
            upload_dir: PathBuf::from(&config.upload_dir),
            public_base_url: config.public_base_url.trim_end_matches('/').to_string(),
            max_bytes: u64::from(config.max_file_size_mb) * 1024 * 1024,
        }
    }

    fn extension_for(content_type: &str) -> Option<&'static str> {
        ALLOWED_TYPES
            .iter()
            .find(|(ct, _)| content_type.eq_ignore_ascii_case(ct))
            .map(|(_, ext)| *ext)
    }

    /// Map a public URL back to the file path it was stored at
    ///
    /// Returns `None` when the URL is not under this store's base URL or
    /// names anything other than a bare file.
    fn path_for_url(&self, url: &str) -> Option<PathBuf> {
        let name = url.strip_prefix(&self.public_base_url)?.strip_prefix('/')?;
        if name.is_empty() || name.contains('/') || name.contains('\\') || name.contains("..") {
            return None;
        }
        Some(self.upload_dir.join(name))
    }
}

#[async_trait]
impl MediaStore for DiskMediaStore {
    async fn store(
        &self,
        filename: &str,
        content_type: &str,
        data: Vec<u8>,
    ) -> RepoResult<StoredMedia> {
        if data.is_empty() {
            return Err(DomainError::MediaRejected(format!(
                "empty upload: {filename}"
            )));
        }

        if data.len() as u64 > self.max_bytes {
            return Err(DomainError::MediaRejected(format!(
                "file exceeds {} bytes",
                self.max_bytes
            )));
        }

        let ext = Self::extension_for(content_type).ok_or_else(|| {
            DomainError::MediaRejected(format!("unsupported content type: {content_type}"))
        })?;

        let stored_name = format!("{}.{ext}", Uuid::new_v4());
        let path = self.upload_dir.join(&stored_name);

        tokio::fs::create_dir_all(&self.upload_dir)
            .await
            .map_err(|e| DomainError::InternalError(format!("create upload dir: {e}")))?;
        tokio::fs::write(&path, &data)
            .await
            .map_err(|e| DomainError::InternalError(format!("write upload: {e}")))?;

        tracing::debug!(original = filename, stored = %stored_name, bytes = data.len(), "stored media file");

        Ok(StoredMedia {
            url: format!("{}/{stored_name}", self.public_base_url),
            duration_seconds: None,
        })
    }

    async fn remove(&self, url: &str) -> RepoResult<()> {
        let Some(path) = self.path_for_url(url) else {
            // Foreign URL (e.g. seeded data); nothing to remove locally
            return Ok(());
        };

        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(DomainError::InternalError(format!(
                "remove {}: {e}",
                path.display()
            ))),
        }
    }
}
