//! Filesystem file-store for uploaded vehicle images.
//!
//! Images live in a flat directory, addressed by their sanitized upload
//! filename. Name collisions overwrite silently; delete of a vehicle row
//! never removes its image (orphans are accepted at this scope).

use std::path::{Path, PathBuf};

use crate::core::error::{AppError, Result};
use crate::shared::validation::sanitize_filename;

/// Accepted image file extensions, matched case-insensitively against the
/// extension only. No content sniffing.
pub const ALLOWED_IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif"];

pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Open the file-store, creating the directory if it does not exist yet.
    pub async fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        tokio::fs::create_dir_all(&root).await.map_err(|e| {
            AppError::Internal(format!(
                "Failed to create upload directory {}: {}",
                root.display(),
                e
            ))
        })?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Check the filename's extension against the allow-list.
    pub fn allowed_file(filename: &str) -> bool {
        filename
            .rsplit_once('.')
            .map(|(_, ext)| {
                ALLOWED_IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str())
            })
            .unwrap_or(false)
    }

    /// Validate and sanitize an uploaded filename, returning the name the
    /// file will be stored under.
    pub fn accept_filename(filename: &str) -> Result<String> {
        if !Self::allowed_file(filename) {
            return Err(AppError::UnsupportedImageType(format!(
                "Invalid image file '{}'. Allowed types: {}",
                filename,
                ALLOWED_IMAGE_EXTENSIONS.join(", ")
            )));
        }

        sanitize_filename(filename).ok_or_else(|| {
            AppError::Validation(vec![format!(
                "Image filename '{}' is empty after sanitization",
                filename
            )])
        })
    }

    /// Write image bytes under the given (already sanitized) name,
    /// overwriting any existing file with the same name.
    pub async fn save(&self, filename: &str, data: &[u8]) -> Result<()> {
        let path = self.root.join(filename);
        tokio::fs::write(&path, data).await.map_err(|e| {
            AppError::Internal(format!("Failed to save image {}: {}", path.display(), e))
        })?;
        tracing::debug!("Image saved to file-store: {}", path.display());
        Ok(())
    }

    /// Read a stored file by name for serving. The requested name is
    /// re-sanitized so a crafted path cannot escape the root.
    pub async fn read(&self, filename: &str) -> Result<Vec<u8>> {
        let safe_name = sanitize_filename(filename)
            .ok_or_else(|| AppError::NotFound(format!("File '{}' not found", filename)))?;

        let path = self.root.join(&safe_name);
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(AppError::NotFound(format!("File '{}' not found", safe_name)))
            }
            Err(e) => Err(AppError::Internal(format!(
                "Failed to read image {}: {}",
                path.display(),
                e
            ))),
        }
    }

    /// True when a file with this name exists in the store.
    pub async fn exists(&self, filename: &str) -> bool {
        tokio::fs::try_exists(self.root.join(filename))
            .await
            .unwrap_or(false)
    }

    /// Content type for serving, derived from the extension only.
    pub fn content_type_for(filename: &str) -> &'static str {
        match filename
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .as_deref()
        {
            Some("png") => "image/png",
            Some("jpg") | Some("jpeg") => "image/jpeg",
            Some("gif") => "image/gif",
            _ => "application/octet-stream",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_allow_list_is_case_insensitive() {
        assert!(FileStore::allowed_file("car.jpg"));
        assert!(FileStore::allowed_file("car.JPEG"));
        assert!(FileStore::allowed_file("car.Png"));
        assert!(FileStore::allowed_file("car.gif"));
        assert!(!FileStore::allowed_file("car.pdf"));
        assert!(!FileStore::allowed_file("car.svg"));
        assert!(!FileStore::allowed_file("car"));
    }

    #[test]
    fn accept_filename_rejects_bad_extension() {
        let err = FileStore::accept_filename("malware.exe").unwrap_err();
        assert!(matches!(
            err,
            crate::core::error::AppError::UnsupportedImageType(_)
        ));
    }

    #[test]
    fn accept_filename_sanitizes() {
        assert_eq!(
            FileStore::accept_filename("../../sneaky car.jpg").unwrap(),
            "sneakycar.jpg"
        );
    }

    #[tokio::test]
    async fn save_overwrites_on_collision() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path()).await.unwrap();

        store.save("car.jpg", b"first").await.unwrap();
        store.save("car.jpg", b"second").await.unwrap();

        assert_eq!(store.read("car.jpg").await.unwrap(), b"second");
    }

    #[tokio::test]
    async fn read_cannot_escape_the_root() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("uploads")).await.unwrap();

        // A file outside the store root must stay unreachable
        std::fs::write(dir.path().join("secret.gif"), b"top secret").unwrap();

        let err = store.read("../secret.gif").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path()).await.unwrap();
        let err = store.read("absent.png").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[test]
    fn content_types_follow_the_extension() {
        assert_eq!(FileStore::content_type_for("a.png"), "image/png");
        assert_eq!(FileStore::content_type_for("a.JPG"), "image/jpeg");
        assert_eq!(FileStore::content_type_for("a.jpeg"), "image/jpeg");
        assert_eq!(FileStore::content_type_for("a.gif"), "image/gif");
        assert_eq!(
            FileStore::content_type_for("a.bin"),
            "application/octet-stream"
        );
    }
}
