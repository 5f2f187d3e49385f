/// Saving the generated render
///
/// The stored payload is always treated as base64 PNG data, whichever
/// response field it came from. A render that arrived as `image_url` therefore
/// produces an invalid data reference and fails to decode. That mismatch is
/// kept as-is; see DESIGN.md.

use base64::Engine as _;
use std::path::{Path, PathBuf};
use tokio::task;
use tracing::{debug, info};

use crate::error::DownloadError;

const DATA_URI_PREFIX: &str = "data:image/png;base64,";

/// Build the data reference exactly as the payload is stored
pub fn data_uri(payload: &str) -> String {
    format!("{}{}", DATA_URI_PREFIX, payload)
}

/// Decode the stored payload into image bytes
pub fn decode_payload(payload: &str) -> Result<Vec<u8>, DownloadError> {
    base64::engine::general_purpose::STANDARD
        .decode(payload.trim())
        .map_err(|e| DownloadError::InvalidPayload(e.to_string()))
}

/// Image bytes behind a `data:image/png;base64,` reference
pub fn decode_data_uri(reference: &str) -> Result<Vec<u8>, DownloadError> {
    let payload = reference
        .strip_prefix(DATA_URI_PREFIX)
        .ok_or_else(|| DownloadError::InvalidPayload("not a PNG data reference".to_string()))?;
    decode_payload(payload)
}

/// Decode the data reference and write the render to `path`
pub async fn save_render(path: PathBuf, reference: String) -> Result<PathBuf, DownloadError> {
    task::spawn_blocking(move || save_render_blocking(&path, &reference).map(|_| path))
        .await
        .map_err(|e| DownloadError::Join(e.to_string()))?
}

fn save_render_blocking(path: &Path, reference: &str) -> Result<(), DownloadError> {
    debug!("Saving data reference ({} chars)", reference.len());
    let bytes = decode_data_uri(reference)?;
    std::fs::write(path, &bytes).map_err(|e| DownloadError::Write {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    info!("💾 Saved render ({}KB) to {}", bytes.len() / 1024, path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    // 1x1 transparent PNG
    const TINY_PNG_B64: &str = "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAQAAAC1HAwCAAAAC0lEQVR42mNkYAAAAAYAAjCB0C8AAAAASUVORK5CYII=";

    #[test]
    fn test_data_uri_for_base64() {
        assert_eq!(data_uri("iVBORw0..."), "data:image/png;base64,iVBORw0...");
    }

    #[test]
    fn test_url_payload_builds_invalid_reference() {
        // Current behavior: the URL is pasted into the data reference verbatim
        let uri = data_uri("https://x/y.png");
        assert_eq!(uri, "data:image/png;base64,https://x/y.png");
        assert!(matches!(decode_data_uri(&uri), Err(DownloadError::InvalidPayload(_))));
    }

    #[test]
    fn test_decode_png() {
        let bytes = decode_payload(TINY_PNG_B64).unwrap();
        assert_eq!(&bytes[1..4], b"PNG");
        assert_eq!(decode_data_uri(&data_uri(TINY_PNG_B64)).unwrap(), bytes);
    }

    #[test]
    fn test_bare_payload_is_not_a_reference() {
        assert!(matches!(decode_data_uri(TINY_PNG_B64), Err(DownloadError::InvalidPayload(_))));
    }

    #[tokio::test]
    async fn test_save_render() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("architectural-render.png");

        let saved = save_render(path.clone(), data_uri(TINY_PNG_B64)).await.unwrap();
        assert_eq!(saved, path);
        assert_eq!(std::fs::read(&path).unwrap(), decode_payload(TINY_PNG_B64).unwrap());
    }

    #[tokio::test]
    async fn test_save_url_reference_fails_without_writing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("architectural-render.png");

        let result = save_render(path.clone(), data_uri("https://x/y.png")).await;
        assert!(matches!(result, Err(DownloadError::InvalidPayload(_))));
        assert!(!path.exists());
    }
}
