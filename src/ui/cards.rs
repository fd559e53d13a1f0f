//! Card grid and profile header

use iced::widget::image::{Handle, Image};
use iced::widget::{button, column, container, mouse_area, row, text, Space};
use iced::{Alignment, ContentFit, Element, Length};
use iced_aw::Wrap;

use super::images::{ImageCache, ImageState};
use crate::state::data::{Card, Profile, UserId};
use crate::state::dialog::Dialog;
use crate::Message;

const CARD_SIZE: f32 = 282.0;
const AVATAR_SIZE: f32 = 120.0;

/// Square thumbnail for `url`, or a placeholder while it loads
fn picture<'a>(url: &str, size: f32, images: &'a ImageCache) -> Element<'a, Message> {
    match images.get(url) {
        Some(ImageState::Ready(handle)) => Image::<Handle>::new(handle.clone())
            .width(Length::Fixed(size))
            .height(Length::Fixed(size))
            .content_fit(ContentFit::Cover)
            .into(),
        state => {
            let label = if matches!(state, Some(ImageState::Failed)) { "No image" } else { "..." };
            container(text(label))
                .width(Length::Fixed(size))
                .height(Length::Fixed(size))
                .center_x(Length::Fixed(size))
                .center_y(Length::Fixed(size))
                .style(container::rounded_box)
                .into()
        }
    }
}

/// Avatar, name, bio and the buttons that open the editing dialogs
pub fn profile_header<'a>(profile: &'a Profile, images: &'a ImageCache) -> Element<'a, Message> {
    let avatar = mouse_area(picture(&profile.avatar, AVATAR_SIZE, images))
        .on_press(Message::Open(Dialog::EditAvatar));

    let info = column![
        row![
            text(profile.name.as_str()).size(36),
            button(text("Edit")).on_press(Message::Open(Dialog::EditProfile)),
        ]
        .spacing(16)
        .align_y(Alignment::Center),
        text(profile.about.as_str()).size(18),
    ]
    .spacing(8);

    row![
        avatar,
        info,
        Space::with_width(Length::Fill),
        button(text("+").size(24))
            .padding([8, 40])
            .on_press(Message::Open(Dialog::AddCard)),
    ]
    .spacing(24)
    .align_y(Alignment::Center)
    .into()
}

fn card_tile<'a>(card: &'a Card, user: Option<&UserId>, images: &'a ImageCache) -> Element<'a, Message> {
    let liked = user.is_some_and(|user| card.is_liked_by(user));
    let heart = if liked { "♥" } else { "♡" };

    let mut footer = row![
        text(card.name.as_str()).size(18).width(Length::Fill),
        column![
            button(text(heart)).on_press(Message::ToggleLike(card.id.clone())),
            text(card.like_count().to_string()).size(13),
        ]
        .align_x(Alignment::Center),
    ]
    .spacing(8)
    .align_y(Alignment::Center);

    if user.is_some_and(|user| card.is_owned_by(user)) {
        footer = footer.push(
            button(text("Delete")).on_press(Message::Open(Dialog::ConfirmDelete(card.id.clone()))),
        );
    }

    column![
        mouse_area(picture(&card.link, CARD_SIZE, images))
            .on_press(Message::Open(Dialog::ViewImage(card.id.clone()))),
        footer,
    ]
    .width(Length::Fixed(CARD_SIZE))
    .spacing(10)
    .into()
}

/// Wrapping grid of cards, newest first
pub fn card_grid<'a>(cards: &'a [Card], user: Option<&UserId>, images: &'a ImageCache) -> Element<'a, Message> {
    if cards.is_empty() {
        return text("No places yet. Add the first one!").into();
    }

    let tiles: Vec<Element<Message>> = cards
        .iter()
        .map(|card| card_tile(card, user, images))
        .collect();

    Wrap::with_elements(tiles)
        .spacing(16.0)
        .line_spacing(16.0)
        .into()
}
