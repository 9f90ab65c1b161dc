//! Asset storage
//!
//! Product images and synthesized audio live on the local filesystem and
//! are served under a public static prefix. Records store the public path,
//! never the binary.

use std::fmt::Debug;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use serde::Deserialize;
use sha2::{Digest, Sha256};

use crate::domain::DomainError;

const IMAGES_DIR: &str = "uploads";
const AUDIO_DIR: &str = "audio";

/// Filesystem location and public mount point for stored assets
#[derive(Debug, Clone, Deserialize)]
pub struct AssetConfig {
    /// Directory assets are written to
    #[serde(default = "default_root")]
    pub root: PathBuf,
    /// URL prefix the directory is served under
    #[serde(default = "default_public_prefix")]
    pub public_prefix: String,
}

fn default_root() -> PathBuf {
    PathBuf::from("static")
}

fn default_public_prefix() -> String {
    "/static".to_string()
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            public_prefix: default_public_prefix(),
        }
    }
}

/// Binary asset storage seam
#[async_trait]
pub trait AssetStore: Send + Sync + Debug {
    /// Store an uploaded image; returns its public path.
    ///
    /// The original filename only contributes its extension; the stored
    /// name is derived from the content so identical uploads collapse to
    /// one file and names never collide.
    async fn store_image(&self, filename: &str, bytes: Bytes) -> Result<String, DomainError>;

    /// Store a synthesized audio clip; returns its public path
    async fn store_audio(&self, bytes: Bytes) -> Result<String, DomainError>;

    /// Remove the asset at the given public path.
    ///
    /// A missing file is not an error. Callers treat any failure as
    /// non-fatal; record deletion is the operation that matters.
    async fn remove(&self, public_path: &str) -> Result<(), DomainError>;
}

/// Local-filesystem asset store
#[derive(Debug)]
pub struct FsAssetStore {
    root: PathBuf,
    public_prefix: String,
}

impl FsAssetStore {
    pub fn new(config: &AssetConfig) -> Self {
        Self {
            root: config.root.clone(),
            public_prefix: config.public_prefix.trim_end_matches('/').to_string(),
        }
    }

    fn content_name(bytes: &[u8], extension: &str) -> String {
        let digest = Sha256::digest(bytes);
        format!("{}.{}", hex::encode(&digest[..16]), extension)
    }

    fn image_extension(filename: &str) -> Result<&'static str, DomainError> {
        let guess = mime_guess::from_path(filename).first().ok_or_else(|| {
            DomainError::validation("Image filename has no recognizable extension")
        })?;

        match (guess.type_().as_str(), guess.subtype().as_str()) {
            ("image", "jpeg") => Ok("jpg"),
            ("image", "png") => Ok("png"),
            ("image", "gif") => Ok("gif"),
            ("image", "webp") => Ok("webp"),
            _ => Err(DomainError::validation(
                "Only JPEG, PNG, GIF, and WebP images are accepted",
            )),
        }
    }

    async fn write(&self, dir: &str, name: &str, bytes: &[u8]) -> Result<String, DomainError> {
        let target_dir = self.root.join(dir);

        tokio::fs::create_dir_all(&target_dir)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to create asset directory: {}", e)))?;

        tokio::fs::write(target_dir.join(name), bytes)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to write asset: {}", e)))?;

        Ok(format!("{}/{}/{}", self.public_prefix, dir, name))
    }

    /// Maps a public path back to a filesystem path, rejecting anything
    /// outside the asset root.
    fn resolve(&self, public_path: &str) -> Option<PathBuf> {
        let relative = public_path
            .strip_prefix(&self.public_prefix)?
            .trim_start_matches('/');

        if relative.is_empty()
            || Path::new(relative)
                .components()
                .any(|c| !matches!(c, std::path::Component::Normal(_)))
        {
            return None;
        }

        Some(self.root.join(relative))
    }
}

#[async_trait]
impl AssetStore for FsAssetStore {
    async fn store_image(&self, filename: &str, bytes: Bytes) -> Result<String, DomainError> {
        if bytes.is_empty() {
            return Err(DomainError::validation("Image upload is empty"));
        }

        let extension = Self::image_extension(filename)?;
        let name = Self::content_name(&bytes, extension);

        self.write(IMAGES_DIR, &name, &bytes).await
    }

    async fn store_audio(&self, bytes: Bytes) -> Result<String, DomainError> {
        if bytes.is_empty() {
            return Err(DomainError::validation("Audio payload is empty"));
        }

        let name = Self::content_name(&bytes, "mp3");

        self.write(AUDIO_DIR, &name, &bytes).await
    }

    async fn remove(&self, public_path: &str) -> Result<(), DomainError> {
        let Some(path) = self.resolve(public_path) else {
            return Err(DomainError::validation(format!(
                "Path '{}' is not a stored asset",
                public_path
            )));
        };

        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(DomainError::storage(format!(
                "Failed to remove asset: {}",
                e
            ))),
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn store(dir: &Path) -> FsAssetStore {
        FsAssetStore::new(&AssetConfig {
            root: dir.to_path_buf(),
            public_prefix: "/static".to_string(),
        })
    }

    #[tokio::test]
    async fn test_store_image_is_content_addressed() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(dir.path());

        let a = store
            .store_image("photo.jpg", Bytes::from_static(b"image-bytes"))
            .await
            .unwrap();
        let b = store
            .store_image("other-name.jpg", Bytes::from_static(b"image-bytes"))
            .await
            .unwrap();

        assert_eq!(a, b);
        assert!(a.starts_with("/static/uploads/"));
        assert!(a.ends_with(".jpg"));
    }

    #[tokio::test]
    async fn test_rejects_non_image_extension() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(dir.path());

        let result = store
            .store_image("script.exe", Bytes::from_static(b"bytes"))
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_rejects_empty_upload() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(dir.path());

        assert!(store.store_image("a.png", Bytes::new()).await.is_err());
    }

    #[tokio::test]
    async fn test_remove_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(dir.path());

        let path = store
            .store_image("photo.png", Bytes::from_static(b"png-bytes"))
            .await
            .unwrap();

        store.remove(&path).await.unwrap();
        store.remove(&path).await.unwrap();
    }

    #[tokio::test]
    async fn test_remove_rejects_traversal() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(dir.path());

        assert!(store.remove("/static/../etc/passwd").await.is_err());
        assert!(store.remove("/elsewhere/file.jpg").await.is_err());
    }

    #[tokio::test]
    async fn test_store_audio() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(dir.path());

        let path = store
            .store_audio(Bytes::from_static(b"mp3-bytes"))
            .await
            .unwrap();
        assert!(path.starts_with("/static/audio/"));
        assert!(path.ends_with(".mp3"));
    }
}
