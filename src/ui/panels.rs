/// Form panels
///
/// Pure view functions over the form state. Colours come from the active
/// skin's theme, so the same panels serve both skins.

use iced::widget::image::Handle;
use iced::widget::{button, column, container, image, row, text, text_input, Column, Space};
use iced::{Alignment, ContentFit, Element, Length};

use super::theme::Skin;
use crate::state::{ControlMode, DisplayState, GateState, ImageSource, RenderForm};
use crate::Message;

const PREVIEW_HEIGHT: f32 = 192.0;

pub fn header<'a>(skin: Skin) -> Element<'a, Message> {
    let toggle = button(text(format!("Skin: {}", skin.name())).size(14))
        .on_press(Message::ToggleSkin)
        .style(button::secondary)
        .padding([6, 12]);

    column![
        row![Space::with_width(Length::Fill), toggle],
        text(skin.title()).size(40),
        text(skin.tagline()).size(16).style(text::secondary),
    ]
    .spacing(8)
    .align_x(Alignment::Center)
    .width(Length::Fill)
    .into()
}

/// Step 1: pick the sketch
pub fn upload_card<'a>(form: &'a RenderForm, preview: Option<&'a Handle>) -> Element<'a, Message> {
    let body: Element<'a, Message> = match form.file() {
        Some(file) => {
            let mut content = Column::new().spacing(8).align_x(Alignment::Center);
            if let Some(handle) = preview {
                content = content.push(
                    image(handle.clone())
                        .content_fit(ContentFit::Contain)
                        .width(Length::Fill)
                        .height(Length::Fixed(PREVIEW_HEIGHT)),
                );
            }
            content.push(text(file.name.as_str()).size(14).style(text::primary)).into()
        }
        None => column![
            text("Click to choose a sketch").size(16),
            text("Supports JPG, PNG").size(13).style(text::secondary),
        ]
        .spacing(4)
        .align_x(Alignment::Center)
        .into(),
    };

    let picker = button(body)
        .on_press(Message::PickFile)
        .style(button::text)
        .padding(24)
        .width(Length::Fill);

    card(1, "Upload Source", picker.into())
}

/// Step 2: control mode and prompt
pub fn config_card<'a>(form: &'a RenderForm) -> Element<'a, Message> {
    let modes = ControlMode::ALL.iter().fold(row![].spacing(12), |modes, &mode| {
        let style = if form.mode() == mode { button::primary } else { button::secondary };
        modes.push(
            button(text(mode.label()).size(14).center())
                .on_press(Message::ModeSelected(mode))
                .style(style)
                .padding(12)
                .width(Length::Fill),
        )
    });

    let prompt = text_input("Describe the materials, lighting, and atmosphere...", form.prompt())
        .on_input(Message::PromptChanged)
        .on_submit(Message::Submit)
        .padding(12);

    let content = column![
        modes,
        text("Style Prompt").size(14).style(text::secondary),
        prompt
    ]
    .spacing(12);

    card(2, "Configuration", content.into())
}

/// Error line plus either the verification or the submit button
pub fn actions<'a>(form: &'a RenderForm) -> Element<'a, Message> {
    let mut content = Column::new().spacing(12);

    if let Some(err) = form.error() {
        content = content.push(
            container(text(format!("⚠ {}", err)).size(14).style(text::danger))
                .padding(12)
                .width(Length::Fill)
                .style(container::bordered_box),
        );
    }

    let action = match form.gate() {
        GateState::Locked | GateState::Pending => {
            let label = if form.gate() == GateState::Pending {
                "Verifying..."
            } else {
                "Complete Verification to Unlock Generator"
            };
            button(text(label).center().width(Length::Fill))
                .on_press(Message::Verify)
                .style(button::success)
        }
        GateState::Unlocked => {
            let label = if form.is_loading() { "Rendering..." } else { "Generate Visualization" };
            button(text(label).center().width(Length::Fill))
                .on_press_maybe(form.can_submit().then_some(Message::Submit))
                .style(button::primary)
        }
    };

    content
        .push(action.padding(18).width(Length::Fill))
        .into()
}

/// Right-hand side: loading, the render, or the empty placeholder
pub fn result_panel<'a>(form: &'a RenderForm, render: Option<&'a Handle>) -> Element<'a, Message> {
    let content: Element<'a, Message> = match form.display_state() {
        DisplayState::Loading => column![
            text("AI is dreaming...").size(22),
            text("Analyzing geometry and applying materials").style(text::secondary),
        ]
        .spacing(8)
        .align_x(Alignment::Center)
        .into(),
        DisplayState::Populated(generated) => {
            let picture: Element<'a, Message> = match (generated.source, render) {
                (ImageSource::Inline, Some(handle)) => image(handle.clone())
                    .content_fit(ContentFit::Contain)
                    .width(Length::Fill)
                    .height(Length::Fill)
                    .into(),
                (ImageSource::Remote, _) => column![
                    text("Render available at").style(text::secondary),
                    text(generated.payload.as_str()).style(text::primary),
                ]
                .spacing(4)
                .align_x(Alignment::Center)
                .into(),
                (ImageSource::Inline, None) => text("The render could not be decoded for preview")
                    .style(text::danger)
                    .into(),
            };

            column![
                picture,
                button(text("Download High-Res"))
                    .on_press(Message::Download)
                    .style(button::primary)
                    .padding([12, 28]),
            ]
            .spacing(16)
            .align_x(Alignment::Center)
            .into()
        }
        DisplayState::Empty => column![
            text("Ready to visualize").size(20),
            text("Upload a sketch to begin").style(text::secondary),
        ]
        .spacing(6)
        .align_x(Alignment::Center)
        .into(),
    };

    container(content)
        .padding(16)
        .width(Length::Fill)
        .height(Length::Fill)
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .style(container::rounded_box)
        .into()
}

/// Numbered card used by the input steps
fn card<'a>(step: u8, title: &'a str, body: Element<'a, Message>) -> Element<'a, Message> {
    let heading = row![
        text(step.to_string()).size(18).style(text::primary),
        text(title).size(20),
    ]
    .spacing(12)
    .align_y(Alignment::Center);

    container(column![heading, body].spacing(16))
        .padding(24)
        .width(Length::Fill)
        .style(container::rounded_box)
        .into()
}
