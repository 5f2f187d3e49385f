/// File IO module
///
/// This module handles:
/// - Reading the picked sketch into memory (upload.rs)
/// - Decoding and saving the generated render (download.rs)

pub mod download;
pub mod upload;
