//! Evidence photo storage.
//!
//! Photos are checked before anything is written. Handlers store them only
//! once a report is otherwise valid, and discard them if the report insert
//! fails, so a rejected upload leaves nothing behind.

use std::path::PathBuf;

use async_trait::async_trait;
use postertrack_core::evidence::{inspect_image, storage_key, EvidenceImage, GeoTag, ImageInfo};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::multipart::UploadedImage;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("invalid storage key '{0}'")]
    InvalidKey(String),

    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        AppError::InternalError(err.to_string())
    }
}

/// Blob storage for evidence photos.
#[async_trait]
pub trait EvidenceStore: Send + Sync {
    /// Store `bytes` under `key` and return the public URL.
    async fn put(&self, key: &str, bytes: Vec<u8>, content_type: &str)
        -> Result<String, StorageError>;

    /// Remove the object under `key`. A missing object is not an error.
    async fn delete(&self, key: &str) -> Result<(), StorageError>;
}

/// Writes photos to a local directory served at `/uploads`.
#[derive(Debug, Clone)]
pub struct LocalEvidenceStore {
    root: PathBuf,
    public_base_url: String,
}

impl LocalEvidenceStore {
    pub fn new(root: impl Into<PathBuf>, public_base_url: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            public_base_url: public_base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        if key.is_empty() || key.contains(['/', '\\']) || key.starts_with('.') {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.root.join(key))
    }
}

#[async_trait]
impl EvidenceStore for LocalEvidenceStore {
    async fn put(
        &self,
        key: &str,
        bytes: Vec<u8>,
        _content_type: &str,
    ) -> Result<String, StorageError> {
        let path = self.path_for(key)?;
        tokio::fs::create_dir_all(&self.root).await?;
        tokio::fs::write(path, bytes).await?;

        Ok(format!("{}/{key}", self.public_base_url))
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        match tokio::fs::remove_file(self.path_for(key)?).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

/// A photo that passed validation and is ready to store.
#[derive(Debug)]
pub struct CheckedImage {
    image: UploadedImage,
    info: ImageInfo,
    tag: GeoTag,
}

/// Photos written to the store, with the keys needed to remove them again.
#[derive(Debug, Default)]
pub struct StoredEvidence {
    pub images: Vec<EvidenceImage>,
    pub keys: Vec<String>,
}

/// Validate a report's photos without writing anything.
///
/// Every photo must be a PNG, JPEG or WebP and carry in-range coordinates.
/// With `require_capture_time`, each also needs `captured_at`.
pub fn check_images(
    images: Vec<UploadedImage>,
    require_capture_time: bool,
) -> AppResult<Vec<CheckedImage>> {
    let mut checked = Vec::with_capacity(images.len());
    for image in images {
        let info = inspect_image(&image.filename, &image.bytes)?;
        let tag = GeoTag::parse(
            &image.filename,
            image.latitude.as_deref(),
            image.longitude.as_deref(),
            image.captured_at.as_deref(),
        )?;
        if require_capture_time {
            tag.require_capture_time(&image.filename)?;
        }
        checked.push(CheckedImage { image, info, tag });
    }
    Ok(checked)
}

/// Write checked photos. If one write fails, the ones already written are
/// removed before the error is returned.
pub async fn put_images(
    store: &dyn EvidenceStore,
    checked: Vec<CheckedImage>,
) -> AppResult<StoredEvidence> {
    let now = chrono::Utc::now().timestamp_millis();
    let batch = Uuid::new_v4().simple().to_string();
    let mut stored = StoredEvidence::default();

    for (index, CheckedImage { image, info, tag }) in checked.into_iter().enumerate() {
        let key = storage_key(&format!("{batch}-{index}-{}", image.filename), now);
        let url = match store.put(&key, image.bytes, info.content_type()).await {
            Ok(url) => url,
            Err(err) => {
                discard(store, &stored.keys).await;
                return Err(err.into());
            }
        };
        tracing::debug!(key = %key, "Stored evidence photo");
        stored.keys.push(key);
        stored.images.push(EvidenceImage {
            url,
            latitude: tag.latitude,
            longitude: tag.longitude,
            captured_at: tag.captured_at,
        });
    }

    Ok(stored)
}

/// Best-effort removal of photos whose report was never saved.
pub async fn discard(store: &dyn EvidenceStore, keys: &[String]) {
    for key in keys {
        if let Err(err) = store.delete(key).await {
            tracing::warn!(key = %key, error = %err, "Failed to remove orphaned evidence photo");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use assert_matches::assert_matches;
    use postertrack_core::error::CoreError;

    use super::*;

    fn png() -> Vec<u8> {
        let img = image::RgbImage::new(2, 2);
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, image::ImageFormat::Png).unwrap();
        out.into_inner()
    }

    fn uploaded(filename: &str, bytes: Vec<u8>, captured_at: Option<&str>) -> UploadedImage {
        UploadedImage {
            filename: filename.into(),
            bytes,
            latitude: Some("6.5244".into()),
            longitude: Some("3.3792".into()),
            captured_at: captured_at.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn local_store_writes_file_and_returns_url() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalEvidenceStore::new(dir.path(), "http://host/uploads/");

        let url = store.put("1-a.png", vec![9, 9], "image/png").await.unwrap();

        assert_eq!(url, "http://host/uploads/1-a.png");
        assert_eq!(std::fs::read(dir.path().join("1-a.png")).unwrap(), vec![9, 9]);
    }

    #[tokio::test]
    async fn local_store_rejects_path_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalEvidenceStore::new(dir.path(), "http://host/uploads");
        assert_matches!(
            store.put("../escape.png", vec![], "image/png").await,
            Err(StorageError::InvalidKey(_))
        );
    }

    #[tokio::test]
    async fn local_store_delete_removes_file_and_tolerates_missing() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalEvidenceStore::new(dir.path(), "http://host/uploads");
        store.put("1-a.png", vec![1], "image/png").await.unwrap();

        store.delete("1-a.png").await.unwrap();
        assert!(!dir.path().join("1-a.png").exists());
        store.delete("1-a.png").await.unwrap();
    }

    #[tokio::test]
    async fn put_images_records_geotags() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalEvidenceStore::new(dir.path(), "http://host/uploads");

        let checked =
            check_images(vec![uploaded("board.png", png(), Some("2024-05-01T09:30:00Z"))], true)
                .unwrap();
        let stored = put_images(&store, checked).await.unwrap();

        assert_eq!(stored.images.len(), 1);
        assert_eq!(stored.images[0].latitude, 6.5244);
        assert!(stored.images[0].url.ends_with("-0-board.png"));
        assert!(stored.images[0].captured_at.is_some());
        assert!(dir.path().join(&stored.keys[0]).exists());
    }

    #[tokio::test]
    async fn same_filename_in_separate_reports_gets_separate_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalEvidenceStore::new(dir.path(), "http://host/uploads");

        let first = check_images(vec![uploaded("IMG_0001.png", png(), None)], false).unwrap();
        let second = check_images(vec![uploaded("IMG_0001.png", png(), None)], false).unwrap();
        let first = put_images(&store, first).await.unwrap();
        let second = put_images(&store, second).await.unwrap();

        assert_ne!(first.keys[0], second.keys[0]);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 2);
    }

    #[tokio::test]
    async fn discard_removes_stored_photos() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalEvidenceStore::new(dir.path(), "http://host/uploads");

        let checked = check_images(
            vec![uploaded("a.png", png(), None), uploaded("b.png", png(), None)],
            false,
        )
        .unwrap();
        let stored = put_images(&store, checked).await.unwrap();
        discard(&store, &stored.keys).await;

        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn one_bad_photo_fails_the_whole_check() {
        let result = check_images(
            vec![
                uploaded("good.png", png(), None),
                uploaded("bad.png", b"not an image".to_vec(), None),
            ],
            false,
        );
        assert_matches!(result, Err(AppError::Core(CoreError::Validation(_))));
    }

    #[test]
    fn capture_time_can_be_required() {
        let result = check_images(vec![uploaded("a.png", png(), None)], true);
        assert_matches!(
            result,
            Err(AppError::Core(CoreError::Validation(msg))) if msg.contains("capture date")
        );
    }
}
