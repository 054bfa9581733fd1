use std::collections::HashMap;
use std::path::PathBuf;

use iced::widget::{button, column, container, image, row, scrollable, text, tooltip, Column};
use iced::{Alignment, ContentFit, Element, Length};
use iced_aw::Wrap;

use crate::state::data::{Photo, PhotoId, PhotoList};
use crate::Message;

/// Everything the grid needs to draw itself
pub struct GridView<'a> {
    pub title: &'a str,
    pub subtitle: &'a str,
    pub status: &'a str,
    pub photos: &'a PhotoList,
    /// Cached thumbnails by photo, filled in as they are generated
    pub thumbnails: &'a HashMap<PhotoId, PathBuf>,
    pub tile_size: f32,
    pub spacing: f32,
}

impl<'a> GridView<'a> {
    pub fn view(self) -> Element<'a, Message> {
        let header: Column<Message> = column![
            text(self.title).size(56),
            text(self.subtitle).size(20),
            row![
                button("Open Folder")
                    .on_press(Message::OpenFolder)
                    .padding(10),
                button("Open Manifest")
                    .on_press(Message::OpenManifest)
                    .padding(10)
                    .style(button::secondary),
            ]
            .spacing(12),
            text(self.status).size(14),
        ]
        .spacing(12)
        .align_x(Alignment::Center);

        let tiles: Vec<Element<Message>> = self
            .photos
            .iter()
            .map(|photo| tile(photo, self.thumbnails.get(&photo.id), self.tile_size))
            .collect();

        let grid = Wrap::with_elements(tiles)
            .spacing(self.spacing)
            .line_spacing(self.spacing);

        let content = column![
            container(header).center_x(Length::Fill),
            container(grid).center_x(Length::Fill),
        ]
        .spacing(48)
        .padding(40)
        .width(Length::Fill);

        scrollable(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }
}

/// Image shown in a tile: the cached thumbnail, else the full local image
fn tile_source(photo: &Photo, thumbnail: Option<&PathBuf>) -> Option<PathBuf> {
    thumbnail.cloned().or_else(|| photo.local_path())
}

/// One clickable square tile with a caption tooltip
fn tile<'a>(photo: &'a Photo, thumbnail: Option<&PathBuf>, size: f32) -> Element<'a, Message> {
    let content: Element<Message> = match tile_source(photo, thumbnail) {
        Some(path) => image(image::Handle::from_path(path))
            .width(Length::Fixed(size))
            .height(Length::Fixed(size))
            .content_fit(ContentFit::Cover)
            .into(),
        None => placeholder(photo, size),
    };

    let tile = button(content)
        .padding(0)
        .style(button::text)
        .on_press(Message::PhotoPressed(photo.id));

    let caption = column![
        text(&photo.title).size(18),
        text(&photo.description).size(14),
    ]
    .spacing(4);

    tooltip(
        tile,
        container(caption).padding(10).style(container::rounded_box),
        tooltip::Position::Bottom,
    )
    .into()
}

/// Remote photos are never fetched; show their caption instead
fn placeholder(photo: &Photo, size: f32) -> Element<'_, Message> {
    let label = column![
        text(&photo.title).size(20),
        text(&photo.description).size(14),
    ]
    .spacing(6)
    .align_x(Alignment::Center);

    container(label)
        .width(Length::Fixed(size))
        .height(Length::Fixed(size))
        .padding(12)
        .center_x(Length::Fixed(size))
        .center_y(Length::Fixed(size))
        .style(container::rounded_box)
        .into()
}
