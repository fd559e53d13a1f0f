//! Modal dialogs
//!
//! Every form dialog is drawn by the same `form_popup`, parameterized by
//! its `DialogForm`; only the image viewer has its own layout.

use iced::widget::image::{Handle, Image};
use iced::widget::{
    button, center, column, container, mouse_area, opaque, stack, text, text_input, Column,
};
use iced::{Color, ContentFit, Element, Length};

use super::images::{ImageCache, ImageState};
use crate::state::data::Card;
use crate::state::form::{DialogForm, FormDialog, Submission};
use crate::Message;

const ERROR_COLOR: Color = Color { r: 0.9, g: 0.3, b: 0.3, a: 1.0 };

/// Lay `content` over `base`, dimming the page; clicking outside sends `on_blur`
pub fn modal<'a>(
    base: impl Into<Element<'a, Message>>,
    content: impl Into<Element<'a, Message>>,
    on_blur: Message,
) -> Element<'a, Message> {
    stack![
        base.into(),
        opaque(
            mouse_area(center(opaque(content)).style(|_theme| container::Style {
                background: Some(Color { a: 0.8, ..Color::BLACK }.into()),
                ..container::Style::default()
            }))
            .on_press(on_blur)
        )
    ]
    .into()
}

fn panel<'a>(content: impl Into<Element<'a, Message>>) -> Element<'a, Message> {
    container(content)
        .width(Length::Fixed(430.0))
        .padding(32)
        .style(container::rounded_box)
        .into()
}

/// Generic form dialog: title, one input per field, status line, submit
pub fn form_popup<'a, F: DialogForm>(
    dialog: &'a FormDialog<F>,
    validation: Option<&'a str>,
    on_submit: Message,
) -> Element<'a, Message> {
    let pending = dialog.is_pending();

    let mut content: Column<Message> = column![
        text(F::TITLE).size(24),
    ]
    .spacing(16);

    for input in dialog.form().inputs() {
        let field = input.field;
        let mut widget = text_input(input.placeholder, input.value).padding(10);
        if !pending {
            widget = widget
                .on_input(move |value| Message::FieldChanged(field, value))
                .on_submit(on_submit.clone());
        }
        content = content.push(widget);
    }

    if let Some(message) = validation {
        content = content.push(text(message).size(14).color(ERROR_COLOR));
    }
    if let Submission::Failed(reason) = dialog.submission() {
        content = content.push(text(reason.as_str()).size(14).color(ERROR_COLOR));
    }

    let label = if pending { "Saving..." } else { F::SUBMIT_LABEL };
    content = content.push(
        button(text(label))
            .width(Length::Fill)
            .padding(12)
            .on_press_maybe((!pending).then_some(on_submit)),
    );

    panel(content)
}

/// Full-size view of a card's image with its caption
pub fn image_popup<'a>(card: Option<&'a Card>, images: &'a ImageCache) -> Element<'a, Message> {
    let Some(card) = card else {
        return panel(text("This card is no longer on the board."));
    };

    let picture: Element<Message> = match images.get(&card.link) {
        Some(ImageState::Ready(handle)) => Image::<Handle>::new(handle.clone())
            .width(Length::Fixed(720.0))
            .content_fit(ContentFit::Contain)
            .into(),
        Some(ImageState::Failed) => text("Image unavailable").into(),
        _ => text("Loading...").into(),
    };

    column![
        picture,
        text(card.name.as_str()).size(16),
        button(text("Close")).on_press(Message::CloseDialog),
    ]
    .spacing(8)
    .into()
}
