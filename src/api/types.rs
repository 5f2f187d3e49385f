/// Wire types for the render service

use serde::{Deserialize, Serialize};

use crate::state::GeneratedImage;

/// Body of a successful `POST /generate-render`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerateResponse {
    /// Base64-encoded image
    #[serde(default)]
    pub image_data: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    /// Prompt after server-side enrichment
    #[serde(default)]
    pub prompt_used: Option<String>,
}

impl GenerateResponse {
    /// Prefer the inline payload, fall back to the URL. Empty strings count as absent.
    pub fn into_image(self) -> Option<GeneratedImage> {
        let present = |v: Option<String>| v.filter(|s| !s.is_empty());
        match (present(self.image_data), present(self.image_url)) {
            (Some(data), _) => Some(GeneratedImage::inline(data)),
            (None, Some(url)) => Some(GeneratedImage::remote(url)),
            (None, None) => None,
        }
    }
}

/// Error body, `{"detail": "..."}`
///
/// `detail` is kept as raw JSON: validation failures send a list here.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
}

impl ErrorResponse {
    /// The detail text, only when the service sent a plain string
    pub fn message(&self) -> Option<String> {
        match &self.detail {
            Some(serde_json::Value::String(s)) if !s.is_empty() => Some(s.clone()),
            _ => None,
        }
    }
}

/// Body of `GET /`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServiceStatus {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::ImageSource;

    fn parse(json: &str) -> Option<GeneratedImage> {
        serde_json::from_str::<GenerateResponse>(json).unwrap().into_image()
    }

    #[test]
    fn test_prefers_inline_data() {
        let image = parse(r#"{"image_data": "iVBORw0...", "image_url": "https://x/y.png"}"#).unwrap();
        assert_eq!(image.payload, "iVBORw0...");
        assert_eq!(image.source, ImageSource::Inline);
    }

    #[test]
    fn test_falls_back_to_url() {
        let image = parse(r#"{"image_data": "", "image_url": "https://x/y.png"}"#).unwrap();
        assert_eq!(image, GeneratedImage::remote("https://x/y.png"));

        let image = parse(r#"{"image_url": "https://x/y.png"}"#).unwrap();
        assert_eq!(image.source, ImageSource::Remote);
    }

    #[test]
    fn test_no_image_fields() {
        assert_eq!(parse(r#"{"status": "success"}"#), None);
        assert_eq!(parse(r#"{"image_data": null}"#), None);
    }

    #[test]
    fn test_error_detail_string_only() {
        let err: ErrorResponse = serde_json::from_str(r#"{"detail": "bad prompt"}"#).unwrap();
        assert_eq!(err.message().as_deref(), Some("bad prompt"));

        let err: ErrorResponse =
            serde_json::from_str(r#"{"detail": [{"loc": ["body", "prompt"], "msg": "field required"}]}"#)
                .unwrap();
        assert_eq!(err.message(), None);

        let err: ErrorResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(err.message(), None);
    }
}
