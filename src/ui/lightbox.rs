use iced::widget::{
    button, column, container, horizontal_space, image, mouse_area, opaque, row, text,
};
use iced::{Alignment, Background, Border, Color, ContentFit, Element, Length, Theme};

use crate::state::data::Photo;
use crate::Message;

const CAPTION_COLOR: Color = Color {
    r: 1.0,
    g: 1.0,
    b: 1.0,
    a: 0.7,
};
const COUNTER_COLOR: Color = Color {
    r: 1.0,
    g: 1.0,
    b: 1.0,
    a: 0.5,
};

/// Full-screen overlay for the selected photo.
///
/// Clicking the backdrop closes the lightbox; clicks on the photo or its
/// caption are swallowed so they don't.
pub fn view(photo: &Photo, position: (usize, usize)) -> Element<'_, Message> {
    let (index, total) = position;

    let picture: Element<Message> = match photo.local_path() {
        Some(path) => image(image::Handle::from_path(path))
            .content_fit(ContentFit::Contain)
            .width(Length::Shrink)
            .height(Length::Fill)
            .into(),
        None => container(text("Remote image").size(18).color(COUNTER_COLOR))
            .padding(48)
            .into(),
    };

    let caption = column![
        text(&photo.title).size(36).color(Color::WHITE),
        text(&photo.description).size(18).color(CAPTION_COLOR),
        text(format!("{} / {}", index, total))
            .size(14)
            .color(COUNTER_COLOR),
    ]
    .spacing(8)
    .align_x(Alignment::Center);

    let content = mouse_area(
        column![picture, caption]
            .spacing(24)
            .align_x(Alignment::Center),
    )
    .on_press(Message::LightboxContentPressed);

    let close = button(text("✕").size(24).color(Color::WHITE))
        .padding(12)
        .style(round_button)
        .on_press(Message::Close);

    let prev = button(text("‹").size(40).color(Color::WHITE))
        .padding([8, 20])
        .style(round_button)
        .on_press(Message::Prev);

    let next = button(text("›").size(40).color(Color::WHITE))
        .padding([8, 20])
        .style(round_button)
        .on_press(Message::Next);

    let body = column![
        row![horizontal_space(), close],
        row![
            prev,
            container(content)
                .center_x(Length::Fill)
                .center_y(Length::Fill),
            next,
        ]
        .spacing(16)
        .align_y(Alignment::Center)
        .height(Length::Fill),
    ]
    .padding(24)
    .spacing(8);

    let backdrop = container(body)
        .width(Length::Fill)
        .height(Length::Fill)
        .style(backdrop_style);

    opaque(mouse_area(backdrop).on_press(Message::Close))
}

fn backdrop_style(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(Color::from_rgba(0.0, 0.0, 0.0, 0.95))),
        ..container::Style::default()
    }
}

fn round_button(_theme: &Theme, status: button::Status) -> button::Style {
    let alpha = match status {
        button::Status::Hovered | button::Status::Pressed => 0.2,
        button::Status::Active | button::Status::Disabled => 0.1,
    };

    button::Style {
        background: Some(Background::Color(Color::from_rgba(1.0, 1.0, 1.0, alpha))),
        text_color: Color::WHITE,
        border: Border {
            radius: 999.0.into(),
            ..Border::default()
        },
        ..button::Style::default()
    }
}
