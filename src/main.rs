use iced::widget::image::Handle;
use iced::widget::{column, container, row, scrollable, text};
use iced::{Element, Length, Task, Theme};
use rfd::FileDialog;
use std::path::PathBuf;
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

mod api;
mod config;
mod error;
mod files;
mod state;
mod ui;
mod verify;

use api::{RenderClient, ServiceStatus};
use config::AppConfig;
use error::{DownloadError, FileError, RequestError};
use state::{ControlMode, GeneratedImage, ImageSource, RenderForm, UploadedFile};
use ui::{panels, Skin};

/// Main application state
struct SketchRender {
    config: AppConfig,
    /// None when the HTTP client could not be built; submissions then fail
    client: Option<RenderClient>,
    form: RenderForm,
    skin: Skin,
    /// Decoded preview of the picked sketch
    sketch_preview: Option<Handle>,
    /// Decoded preview of the latest inline render
    render_preview: Option<Handle>,
    /// Service and download status line
    status: String,
}

/// Application messages (events)
#[derive(Debug, Clone)]
pub enum Message {
    /// User clicked the upload area
    PickFile,
    /// Background read of the picked file finished
    FileLoaded(Result<UploadedFile, FileError>),
    PromptChanged(String),
    ModeSelected(ControlMode),
    /// User clicked the verification button
    Verify,
    /// Verification delay elapsed
    VerificationComplete,
    Submit,
    RenderFinished(Result<Option<GeneratedImage>, RequestError>),
    Download,
    DownloadFinished(Result<PathBuf, DownloadError>),
    ToggleSkin,
    HealthChecked(Result<ServiceStatus, RequestError>),
}

impl SketchRender {
    /// Create a new instance of the application
    fn new() -> (Self, Task<Message>) {
        let config = AppConfig::load().unwrap_or_else(|e| {
            error!("❌ Invalid configuration, falling back to defaults: {}", e);
            AppConfig::default()
        });

        let client = match RenderClient::new(&config.api) {
            Ok(client) => Some(client),
            Err(e) => {
                error!("❌ Could not create render client: {}", e);
                None
            }
        };

        let task = match &client {
            Some(client) => {
                info!("🎨 Render endpoint: {}", client.generate_url());
                let client = client.clone();
                Task::perform(async move { client.health().await }, Message::HealthChecked)
            }
            None => Task::none(),
        };

        let app = SketchRender {
            skin: config.skin,
            config,
            client,
            form: RenderForm::new(),
            sketch_preview: None,
            render_preview: None,
            status: "Connecting to render service...".to_string(),
        };

        (app, task)
    }

    fn title(&self) -> String {
        self.skin.title().to_string()
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::PickFile => {
                let picked = FileDialog::new()
                    .set_title("Select a Sketch")
                    .add_filter("Images", files::upload::IMAGE_EXTENSIONS)
                    .pick_file();

                match picked {
                    Some(path) => Task::perform(files::upload::load_upload(path), Message::FileLoaded),
                    None => Task::none(),
                }
            }
            Message::FileLoaded(Ok(file)) => {
                self.sketch_preview = Some(Handle::from_bytes(file.bytes.clone()));
                self.form.select_file(file);
                Task::none()
            }
            Message::FileLoaded(Err(e)) => {
                error!("⚠️  {}", e);
                self.status = e.to_string();
                Task::none()
            }
            Message::PromptChanged(prompt) => {
                self.form.set_prompt(prompt);
                Task::none()
            }
            Message::ModeSelected(mode) => {
                self.form.select_mode(mode);
                Task::none()
            }
            Message::Verify => {
                if !self.form.begin_verification() {
                    return Task::none();
                }
                let verification = &self.config.verification;
                Task::perform(
                    verify::run_verification(verification.url.clone(), verification.delay()),
                    |_| Message::VerificationComplete,
                )
            }
            Message::VerificationComplete => {
                self.form.complete_verification();
                Task::none()
            }
            Message::Submit => {
                let submission = match self.form.prepare_submission() {
                    Ok(submission) => submission,
                    Err(e) => {
                        debug!("Submission refused: {}", e);
                        return Task::none();
                    }
                };

                match self.client.clone() {
                    Some(client) => Task::perform(
                        async move { client.generate(submission).await },
                        Message::RenderFinished,
                    ),
                    None => Task::done(Message::RenderFinished(Err(RequestError::generic(None)))),
                }
            }
            Message::RenderFinished(outcome) => {
                if let Ok(image) = &outcome {
                    self.render_preview = image.as_ref().and_then(preview_handle);
                }
                self.form.finish_submission(outcome);
                Task::none()
            }
            Message::Download => {
                let Some(image) = self.form.result() else {
                    warn!("{}", DownloadError::NothingToSave);
                    return Task::none();
                };
                if image.source == ImageSource::Remote {
                    warn!("⚠️  Saving a URL render as base64 data; the file will not decode");
                }

                let target = FileDialog::new()
                    .set_title("Save Render")
                    .set_file_name(&self.config.download_filename)
                    .add_filter("PNG", &["png"])
                    .save_file();

                let reference = files::download::data_uri(&image.payload);
                match target {
                    Some(path) => Task::perform(
                        files::download::save_render(path, reference),
                        Message::DownloadFinished,
                    ),
                    None => Task::none(),
                }
            }
            Message::DownloadFinished(Ok(path)) => {
                self.status = format!("Saved render to {}", path.display());
                Task::none()
            }
            Message::DownloadFinished(Err(e)) => {
                error!("❌ Download failed: {}", e);
                self.status = format!("Download failed: {}", e);
                Task::none()
            }
            Message::ToggleSkin => {
                self.skin = self.skin.toggled();
                Task::none()
            }
            Message::HealthChecked(Ok(service)) => {
                info!("✅ Render service: {} ({})", service.message, service.status);
                self.status = format!("Render service {}", service.status);
                Task::none()
            }
            Message::HealthChecked(Err(_)) => {
                warn!("⚠️  Render service did not answer the status probe");
                self.status = "Render service unreachable".to_string();
                Task::none()
            }
        }
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        let inputs = column![
            panels::upload_card(&self.form, self.sketch_preview.as_ref()),
            panels::config_card(&self.form),
            panels::actions(&self.form),
        ]
        .spacing(24)
        .width(Length::FillPortion(5));

        let output = container(panels::result_panel(&self.form, self.render_preview.as_ref()))
            .width(Length::FillPortion(7))
            .height(Length::Fixed(600.0));

        let content = column![
            panels::header(self.skin),
            row![inputs, output].spacing(32),
            text(self.status.as_str()).size(13).style(text::secondary),
        ]
        .spacing(32)
        .padding(40)
        .max_width(1280.0);

        scrollable(container(content).center_x(Length::Fill)).into()
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        self.skin.theme()
    }
}

/// Decode an inline render for display. Remote renders are not fetched.
fn preview_handle(image: &GeneratedImage) -> Option<Handle> {
    match image.source {
        ImageSource::Inline => files::download::decode_payload(&image.payload)
            .map(Handle::from_bytes)
            .map_err(|e| warn!("⚠️  Render preview unavailable: {}", e))
            .ok(),
        ImageSource::Remote => None,
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("sketch_render=info,warn"));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();
}

fn main() -> iced::Result {
    init_tracing();

    iced::application(SketchRender::title, SketchRender::update, SketchRender::view)
        .theme(SketchRender::theme)
        .window_size((1200.0, 860.0))
        .centered()
        .run_with(SketchRender::new)
}
