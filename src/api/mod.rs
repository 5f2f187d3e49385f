/// Render service module
///
/// This module handles:
/// - Building and sending the multipart render request (client.rs)
/// - The JSON bodies the service answers with (types.rs)

pub mod client;
pub mod types;

pub use client::RenderClient;
pub use types::ServiceStatus;
