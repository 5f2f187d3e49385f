use thiserror::Error;

/// Shown when the service gives no usable detail
pub const GENERIC_FAILURE: &str = "Failed to generate image. Please try again.";
pub const VERIFICATION_REQUIRED: &str = "Please complete the verification step first.";
pub const MISSING_FIELDS: &str = "Please provide both a file and a prompt";

/// Why a submission was refused before any request went out
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    #[error("{}", VERIFICATION_REQUIRED)]
    VerificationRequired,

    #[error("{}", MISSING_FIELDS)]
    MissingFields,

    #[error("A render request is already in flight")]
    AlreadyInFlight,
}

/// A failed render request, carrying the text to show the user
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct RequestError {
    pub message: String,
    /// HTTP status, if the service answered at all
    pub status: Option<u16>,
}

impl RequestError {
    /// Prefer the service's `detail`, otherwise the generic message
    pub fn from_detail(detail: Option<String>, status: Option<u16>) -> Self {
        Self {
            message: detail.unwrap_or_else(|| GENERIC_FAILURE.to_string()),
            status,
        }
    }

    pub fn generic(status: Option<u16>) -> Self {
        Self::from_detail(None, status)
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },

    #[error("HTTP client error: {0}")]
    Client(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FileError {
    #[error("Failed to read {path}: {reason}")]
    Read { path: String, reason: String },

    #[error("Task join error: {0}")]
    Join(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DownloadError {
    #[error("No render to download")]
    NothingToSave,

    #[error("Render payload is not valid base64: {0}")]
    InvalidPayload(String),

    #[error("Failed to write {path}: {reason}")]
    Write { path: String, reason: String },

    #[error("Task join error: {0}")]
    Join(String),
}

#[derive(Error, Debug)]
pub enum VerifyError {
    #[error("Failed to open {url}: {source}")]
    Open {
        url: String,
        #[source]
        source: std::io::Error,
    },
}
