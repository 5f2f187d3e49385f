/// The render request form
///
/// Holds everything the single screen knows: the picked sketch, the prompt,
/// the selected control mode, the verification gate, the request lifecycle,
/// the latest render and the latest error. Every transition is synchronous;
/// side effects (opening the verification page, sending the request) are
/// left to the caller.

use tracing::{debug, warn};

use super::data::{ControlMode, GateState, GeneratedImage, RequestState, UploadedFile};
use crate::error::{RequestError, SubmitError};

/// Everything the render service needs for one request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub file: UploadedFile,
    pub prompt: String,
    pub mode: ControlMode,
}

/// What the result panel should show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayState<'a> {
    Loading,
    Populated(&'a GeneratedImage),
    Empty,
}

#[derive(Debug, Default)]
pub struct RenderForm {
    file: Option<UploadedFile>,
    prompt: String,
    mode: ControlMode,
    gate: GateState,
    request: RequestState,
    result: Option<GeneratedImage>,
    error: Option<String>,
}

impl RenderForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn file(&self) -> Option<&UploadedFile> {
        self.file.as_ref()
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn mode(&self) -> ControlMode {
        self.mode
    }

    pub fn gate(&self) -> GateState {
        self.gate
    }

    #[cfg(test)]
    pub fn request_state(&self) -> RequestState {
        self.request
    }

    pub fn result(&self) -> Option<&GeneratedImage> {
        self.result.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.request.is_loading()
    }

    /// Replace the selected sketch. Clears any error.
    pub fn select_file(&mut self, file: UploadedFile) {
        debug!("Selected sketch {:?}", file);
        self.file = Some(file);
        self.error = None;
    }

    pub fn set_prompt(&mut self, prompt: String) {
        self.prompt = prompt;
    }

    pub fn select_mode(&mut self, mode: ControlMode) {
        self.mode = mode;
    }

    /// Start the verification step.
    ///
    /// Returns true when the caller should open the external page and start
    /// the unlock timer.
    pub fn begin_verification(&mut self) -> bool {
        match self.gate {
            GateState::Unlocked => false,
            GateState::Locked | GateState::Pending => {
                self.gate = GateState::Pending;
                true
            }
        }
    }

    /// Timer elapsed: unlock regardless of what happened on the external page
    pub fn complete_verification(&mut self) {
        self.gate = GateState::Unlocked;
    }

    /// Whether the submit control should be enabled
    pub fn can_submit(&self) -> bool {
        self.gate == GateState::Unlocked
            && self.file.is_some()
            && !self.prompt.is_empty()
            && !self.is_loading()
    }

    /// Validate inputs and mark the request as in flight.
    ///
    /// The gate is checked before the fields. Validation failures are stored
    /// as the form's error text; a duplicate submit while in flight is dropped
    /// without touching the error.
    pub fn prepare_submission(&mut self) -> Result<Submission, SubmitError> {
        if self.gate != GateState::Unlocked {
            return Err(self.reject(SubmitError::VerificationRequired));
        }

        let file = match &self.file {
            Some(file) if !self.prompt.is_empty() => file.clone(),
            _ => return Err(self.reject(SubmitError::MissingFields)),
        };

        if self.is_loading() {
            warn!("Ignoring submit: a render request is already in flight");
            return Err(SubmitError::AlreadyInFlight);
        }

        self.request = RequestState::InFlight;
        self.error = None;

        Ok(Submission {
            file,
            prompt: self.prompt.clone(),
            mode: self.mode,
        })
    }

    fn reject(&mut self, err: SubmitError) -> SubmitError {
        self.error = Some(err.to_string());
        err
    }

    /// Record the outcome of the in-flight request.
    ///
    /// `Ok(None)` is a success body with no image field; it clears the result.
    pub fn finish_submission(&mut self, outcome: Result<Option<GeneratedImage>, RequestError>) {
        self.request = RequestState::Done;
        match outcome {
            Ok(image) => self.result = image,
            Err(err) => self.error = Some(err.message),
        }
    }

    /// Loading wins; otherwise the presence of a render decides
    pub fn display_state(&self) -> DisplayState<'_> {
        if self.is_loading() {
            return DisplayState::Loading;
        }
        match &self.result {
            Some(image) => DisplayState::Populated(image),
            None => DisplayState::Empty,
        }
    }
}
