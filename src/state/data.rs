/// Shared data structures for the render form
///
/// These structs represent the data model that flows between
/// the form state, the render service client and the UI layer.

use serde::{Deserialize, Serialize};

/// A sketch picked by the user, held in memory until replaced
#[derive(Clone, PartialEq, Eq)]
pub struct UploadedFile {
    /// File name only (e.g., "sketch.png")
    pub name: String,
    /// Raw file contents, sent as-is
    pub bytes: Vec<u8>,
    /// MIME type sent with the multipart part
    pub mime: String,
}

impl UploadedFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let name = name.into();
        let mime = sniff_mime(&name, &bytes);
        Self { name, bytes, mime }
    }
}

// Sketches can be several MB; keep them out of logs and Message debug output
impl std::fmt::Debug for UploadedFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploadedFile")
            .field("name", &self.name)
            .field("size", &self.bytes.len())
            .field("mime", &self.mime)
            .finish()
    }
}

/// Guess the MIME type from the file header, then the extension
fn sniff_mime(name: &str, bytes: &[u8]) -> String {
    if let Ok(format) = image::guess_format(bytes) {
        return format.to_mime_type().to_string();
    }

    std::path::Path::new(name)
        .extension()
        .and_then(|ext| image::ImageFormat::from_extension(ext))
        .map(|format| format.to_mime_type().to_string())
        .unwrap_or_else(|| "application/octet-stream".to_string())
}

/// Conditioning signal the backend should use when generating the render
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlMode {
    /// Freehand sketch edges
    #[default]
    Scribble,
    /// CAD / technical line art
    Canny,
    /// Volumetric massing
    Depth,
}

impl ControlMode {
    /// All modes in display order
    pub const ALL: [ControlMode; 3] = [ControlMode::Scribble, ControlMode::Canny, ControlMode::Depth];

    /// Value of the `control_type` form field
    pub fn wire_name(self) -> &'static str {
        match self {
            ControlMode::Scribble => "scribble",
            ControlMode::Canny => "canny",
            ControlMode::Depth => "depth",
        }
    }

    /// Button label
    pub fn label(self) -> &'static str {
        match self {
            ControlMode::Scribble => "Sketch",
            ControlMode::Canny => "CAD",
            ControlMode::Depth => "Massing",
        }
    }
}

/// Which response field a render came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSource {
    /// `image_data`: base64-encoded image bytes
    Inline,
    /// `image_url`: a resolvable URL
    Remote,
}

/// A render returned by the service, stored verbatim
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedImage {
    pub payload: String,
    pub source: ImageSource,
}

impl GeneratedImage {
    pub fn inline(payload: impl Into<String>) -> Self {
        Self { payload: payload.into(), source: ImageSource::Inline }
    }

    pub fn remote(url: impl Into<String>) -> Self {
        Self { payload: url.into(), source: ImageSource::Remote }
    }
}

/// Lifecycle of the single outbound render request
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RequestState {
    #[default]
    Idle,
    InFlight,
    Done,
}

impl RequestState {
    pub fn is_loading(self) -> bool {
        self == RequestState::InFlight
    }
}

/// Client-side verification gate
///
/// Unlocked only by a timer after the external page is opened.
/// This is not a security control: nothing confirms the page was viewed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GateState {
    #[default]
    Locked,
    /// External page opened, timer running
    Pending,
    Unlocked,
}
