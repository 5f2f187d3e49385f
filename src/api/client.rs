/// HTTP client for the render service
///
/// One multipart POST per submission. No timeout and no retry: if the
/// service never answers, the request stays in flight.

use reqwest::multipart::{Form, Part};
use reqwest::Client;
use tracing::{debug, error, info};
use url::Url;

use super::types::{ErrorResponse, GenerateResponse, ServiceStatus};
use crate::config::ApiConfig;
use crate::error::{ConfigError, RequestError};
use crate::state::{GeneratedImage, Submission};

pub const GENERATE_PATH: &str = "generate-render";

#[derive(Debug, Clone)]
pub struct RenderClient {
    http: Client,
    generate_url: Url,
    root_url: Url,
}

impl RenderClient {
    pub fn new(config: &ApiConfig) -> Result<Self, ConfigError> {
        let http = Client::builder()
            .build()
            .map_err(|e| ConfigError::Client(e.to_string()))?;

        Ok(Self {
            http,
            generate_url: config.endpoint(GENERATE_PATH)?,
            root_url: config.root()?,
        })
    }

    pub fn generate_url(&self) -> &Url {
        &self.generate_url
    }

    /// Send the sketch, prompt and mode; return the render if the body had one
    pub async fn generate(&self, submission: Submission) -> Result<Option<GeneratedImage>, RequestError> {
        let Submission { file, prompt, mode } = submission;
        info!(
            "🎨 Requesting render: {} ({} bytes), mode={}",
            file.name,
            file.bytes.len(),
            mode.wire_name()
        );

        let part = Part::bytes(file.bytes)
            .file_name(file.name)
            .mime_str(&file.mime)
            .map_err(|e| {
                error!("Error generating render: invalid MIME type: {}", e);
                RequestError::generic(None)
            })?;

        let form = Form::new()
            .part("file", part)
            .text("prompt", prompt)
            .text("control_type", mode.wire_name());

        let response = self
            .http
            .post(self.generate_url.clone())
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                error!("Error generating render: {}", e);
                RequestError::generic(None)
            })?;

        let status = response.status();
        let body = response.bytes().await.map_err(|e| {
            error!("Error generating render: failed to read body: {}", e);
            RequestError::generic(Some(status.as_u16()))
        })?;

        if !status.is_success() {
            let detail = serde_json::from_slice::<ErrorResponse>(&body)
                .ok()
                .and_then(|err| err.message());
            error!(
                "Error generating render: HTTP {} {}",
                status.as_u16(),
                detail.as_deref().unwrap_or("(no detail)")
            );
            return Err(RequestError::from_detail(detail, Some(status.as_u16())));
        }

        let parsed: GenerateResponse = serde_json::from_slice(&body).map_err(|e| {
            error!("Error generating render: unreadable response: {}", e);
            RequestError::generic(Some(status.as_u16()))
        })?;

        if let Some(prompt_used) = &parsed.prompt_used {
            debug!("Service prompt: {}", prompt_used);
        }
        let image = parsed.into_image();
        match &image {
            Some(image) => info!("✅ Render received ({:?}, {} chars)", image.source, image.payload.len()),
            None => info!("⚠️  Render response had no image field"),
        }
        Ok(image)
    }

    /// Probe the service root. The API prefix is not applied here.
    pub async fn health(&self) -> Result<ServiceStatus, RequestError> {
        let response = self
            .http
            .get(self.root_url.clone())
            .send()
            .await
            .map_err(|e| {
                error!("Render service unreachable: {}", e);
                RequestError::generic(None)
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(RequestError::generic(Some(status.as_u16())));
        }

        response.json::<ServiceStatus>().await.map_err(|e| {
            error!("Render service status unreadable: {}", e);
            RequestError::generic(Some(status.as_u16()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GENERIC_FAILURE;
    use crate::state::{ControlMode, ImageSource, UploadedFile};
    use axum::extract::{Multipart, State};
    use axum::http::StatusCode;
    use axum::routing::{get, post};
    use axum::{Json, Router};
    use serde_json::{json, Value};
    use std::sync::{Arc, Mutex};

    #[derive(Debug, Clone)]
    struct ReceivedField {
        name: String,
        file_name: Option<String>,
        content_type: Option<String>,
        data: Vec<u8>,
    }

    type Received = Arc<Mutex<Vec<ReceivedField>>>;

    const PNG_BYTES: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 1, 2, 3, 4];

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn client_for(base_url: String, prefix: Option<&str>) -> RenderClient {
        RenderClient::new(&ApiConfig {
            base_url,
            api_prefix: prefix.map(str::to_string),
        })
        .unwrap()
    }

    fn submission() -> Submission {
        Submission {
            file: UploadedFile::new("sketch.png", PNG_BYTES.to_vec()),
            prompt: "modern villa, warm lighting".into(),
            mode: ControlMode::Scribble,
        }
    }

    async fn record(State(received): State<Received>, mut multipart: Multipart) -> Json<Value> {
        while let Some(field) = multipart.next_field().await.unwrap() {
            let entry = ReceivedField {
                name: field.name().unwrap_or_default().to_string(),
                file_name: field.file_name().map(str::to_string),
                content_type: field.content_type().map(str::to_string),
                data: field.bytes().await.unwrap().to_vec(),
            };
            received.lock().unwrap().push(entry);
        }
        Json(json!({ "status": "success", "image_data": "iVBORw0..." }))
    }

    fn fixed(status: StatusCode, body: Value) -> Router {
        Router::new().route(
            "/generate-render",
            post(move || {
                let body = body.clone();
                async move { (status, Json(body)) }
            }),
        )
    }

    #[tokio::test]
    async fn test_sends_multipart_fields() {
        let received: Received = Arc::default();
        let router = Router::new()
            .route("/generate-render", post(record))
            .with_state(received.clone());
        let client = client_for(serve(router).await, None);

        let image = client.generate(submission()).await.unwrap().unwrap();
        assert_eq!(image, GeneratedImage::inline("iVBORw0..."));

        let fields = received.lock().unwrap().clone();
        let names: Vec<_> = fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["file", "prompt", "control_type"]);

        assert_eq!(fields[0].file_name.as_deref(), Some("sketch.png"));
        assert_eq!(fields[0].content_type.as_deref(), Some("image/png"));
        assert_eq!(fields[0].data, PNG_BYTES);
        assert_eq!(fields[1].data, b"modern villa, warm lighting");
        assert_eq!(fields[2].data, b"scribble");
    }

    #[tokio::test]
    async fn test_api_prefix_route() {
        let received: Received = Arc::default();
        let router = Router::new()
            .route("/api/generate-render", post(record))
            .with_state(received.clone());
        let client = client_for(serve(router).await, Some("/api"));

        assert!(client.generate_url().as_str().ends_with("/api/generate-render"));
        assert!(client.generate(submission()).await.unwrap().is_some());
        assert_eq!(received.lock().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_url_response() {
        let router = fixed(StatusCode::OK, json!({ "image_url": "https://x/y.png" }));
        let client = client_for(serve(router).await, None);

        let image = client.generate(submission()).await.unwrap().unwrap();
        assert_eq!(image.payload, "https://x/y.png");
        assert_eq!(image.source, ImageSource::Remote);
    }

    #[tokio::test]
    async fn test_success_without_image() {
        let router = fixed(StatusCode::OK, json!({ "status": "success" }));
        let client = client_for(serve(router).await, None);
        assert_eq!(client.generate(submission()).await, Ok(None));
    }

    #[tokio::test]
    async fn test_error_detail() {
        let router = fixed(StatusCode::BAD_REQUEST, json!({ "detail": "bad prompt" }));
        let client = client_for(serve(router).await, None);

        let err = client.generate(submission()).await.unwrap_err();
        assert_eq!(err.message, "bad prompt");
        assert_eq!(err.status, Some(400));
    }

    #[tokio::test]
    async fn test_error_without_body() {
        let router = Router::new().route(
            "/generate-render",
            post(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
        );
        let client = client_for(serve(router).await, None);

        let err = client.generate(submission()).await.unwrap_err();
        assert_eq!(err.message, GENERIC_FAILURE);
        assert_eq!(err.status, Some(500));
    }

    #[tokio::test]
    async fn test_unreadable_success_body() {
        let router = Router::new().route("/generate-render", post(|| async { "<html>oops</html>" }));
        let client = client_for(serve(router).await, None);

        let err = client.generate(submission()).await.unwrap_err();
        assert_eq!(err.message, GENERIC_FAILURE);
    }

    #[tokio::test]
    async fn test_unreachable_service() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = client_for(format!("http://{}", addr), None);
        let err = client.generate(submission()).await.unwrap_err();
        assert_eq!(err.message, GENERIC_FAILURE);
        assert_eq!(err.status, None);
    }

    #[tokio::test]
    async fn test_health() {
        let router = Router::new().route(
            "/",
            get(|| async {
                Json(json!({ "message": "AI Architecture Visualizer API", "status": "running" }))
            }),
        );
        let client = client_for(serve(router).await, None);

        let status = client.health().await.unwrap();
        assert_eq!(status.status, "running");
        assert_eq!(status.message, "AI Architecture Visualizer API");
    }

    #[tokio::test]
    async fn test_health_skips_api_prefix() {
        let router = Router::new().route(
            "/",
            get(|| async { Json(json!({ "message": "root", "status": "running" })) }),
        );
        let client = client_for(serve(router).await, Some("/api"));

        assert_eq!(client.health().await.unwrap().status, "running");
    }
}
