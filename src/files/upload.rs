/// Loading the user's sketch from disk
use std::path::{Path, PathBuf};
use tokio::task;

use crate::error::FileError;
use crate::state::UploadedFile;

/// Extensions offered by the file picker. Only a hint; anything picked is sent.
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp", "bmp", "gif"];

/// Read a picked file into memory
pub async fn load_upload(path: PathBuf) -> Result<UploadedFile, FileError> {
    // Spawn blocking because sketches can be several MB
    task::spawn_blocking(move || load_upload_blocking(&path))
        .await
        .map_err(|e| FileError::Join(e.to_string()))?
}

/// Blocking implementation of upload loading
fn load_upload_blocking(path: &Path) -> Result<UploadedFile, FileError> {
    let bytes = std::fs::read(path).map_err(|e| FileError::Read {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "upload".to_string());

    Ok(UploadedFile::new(name, bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_load_upload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sketch.jpg");
        std::fs::write(&path, [0xFF, 0xD8, 0xFF, 0xE0, 0, 0]).unwrap();

        let file = load_upload(path).await.unwrap();
        assert_eq!(file.name, "sketch.jpg");
        assert_eq!(file.bytes.len(), 6);
        assert_eq!(file.mime, "image/jpeg");
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let result = load_upload(PathBuf::from("/nonexistent/sketch.png")).await;
        assert!(matches!(result, Err(FileError::Read { .. })));
    }
}
