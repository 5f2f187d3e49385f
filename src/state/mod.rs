/// State management module
///
/// This module handles all application state, including:
/// - Shared data structures (data.rs)
/// - The render request form and its transitions (form.rs)

pub mod data;
pub mod form;

pub use data::{ControlMode, GateState, GeneratedImage, ImageSource, UploadedFile};
pub use form::{DisplayState, RenderForm, Submission};
