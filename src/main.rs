use std::sync::Arc;

use anyhow::{anyhow, Context};
use iced::widget::image::Handle;
use iced::widget::{button, column, container, row, scrollable, text, Column};
use iced::{Alignment, Element, Length, Task, Theme};
use log::{info, warn};

mod api;
mod config;
mod state;
mod ui;

use api::{Gateway, GatewayError, HttpGateway};
use config::Config;
use state::board::Board;
use state::coordinator::{execute, Mutation, MutationFailure, MutationKind, Outcome};
use state::data::CardId;
use state::dialog::Dialog;
use state::form::{Field, ValidationError};
use state::store::{fetch_initial, LoadFailure, LoadStatus, Loaded};
use ui::images::{fetch_image, ImageCache};

/// Main application state
struct PhotoBoard {
    /// Store, dialogs and forms
    board: Board,
    /// Remote board API
    gateway: Arc<dyn Gateway>,
    /// Downloaded card and avatar images
    images: ImageCache,
    /// Validation message for the open form
    form_error: Option<String>,
    /// Failure that has no open dialog to show it in
    notice: Option<String>,
}

/// Application messages (events)
#[derive(Debug, Clone)]
pub enum Message {
    /// User asked to retry the initial load
    Reload,
    /// Initial bundle arrived (or failed)
    Loaded(Result<Loaded, LoadFailure>),
    Open(Dialog),
    CloseDialog,
    FieldChanged(Field, String),
    /// Submit the active form dialog
    Submit,
    ConfirmDelete(CardId),
    ToggleLike(CardId),
    /// A coordinator's remote call came back
    Settled(MutationKind, Outcome),
    ImageLoaded(String, Result<Handle, GatewayError>),
    DismissNotice,
}

impl PhotoBoard {
    /// Create the application and kick off the initial load
    fn new(gateway: Arc<dyn Gateway>) -> (Self, Task<Message>) {
        let mut app = PhotoBoard {
            board: Board::new(),
            gateway,
            images: ImageCache::default(),
            form_error: None,
            notice: None,
        };

        let task = app.load();
        (app, task)
    }

    fn load(&mut self) -> Task<Message> {
        if !self.board.begin_load() {
            return Task::none();
        }
        Task::perform(fetch_initial(Arc::clone(&self.gateway)), Message::Loaded)
    }

    /// Send a mutation through its coordinator; the outcome comes back as `Settled`
    fn dispatch(&self, mutation: Mutation) -> Task<Message> {
        let kind = mutation.kind();
        Task::perform(execute(Arc::clone(&self.gateway), mutation), move |outcome| {
            Message::Settled(kind, outcome)
        })
    }

    fn after_submit(&mut self, result: Result<Option<Mutation>, ValidationError>) -> Task<Message> {
        match result {
            Ok(Some(mutation)) => {
                self.form_error = None;
                self.dispatch(mutation)
            }
            Ok(None) => Task::none(),
            Err(err) => {
                self.form_error = Some(err.to_string());
                Task::none()
            }
        }
    }

    /// Fetch any card or avatar image not seen yet
    fn fetch_missing_images(&mut self) -> Task<Message> {
        let snapshot = self.board.snapshot();
        let avatar = snapshot.profile.as_deref().map(|profile| profile.avatar.as_str());
        let urls = avatar
            .into_iter()
            .chain(snapshot.cards.iter().map(|card| card.link.as_str()));

        let fresh = self.images.request(urls);
        Task::batch(fresh.into_iter().map(|url| {
            let client = self.images.client();
            Task::perform(fetch_image(client, url.clone()), move |result| {
                Message::ImageLoaded(url.clone(), result)
            })
        }))
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Reload => {
                self.notice = None;
                self.load()
            }
            Message::Loaded(result) => match self.board.finish_load(result) {
                Ok(()) => self.fetch_missing_images(),
                Err(_) => Task::none(),
            },
            Message::Open(dialog) => {
                self.form_error = None;
                self.board.open(dialog);
                Task::none()
            }
            Message::CloseDialog => {
                self.form_error = None;
                self.board.close_dialog();
                Task::none()
            }
            Message::FieldChanged(field, value) => {
                self.form_error = None;
                self.board.edit(field, value);
                Task::none()
            }
            Message::Submit => {
                let result = self.board.submit();
                self.after_submit(result)
            }
            Message::ConfirmDelete(id) => {
                let result = self.board.confirm_delete(&id);
                self.after_submit(result)
            }
            Message::ToggleLike(id) => match self.board.toggle_like(&id) {
                Some(mutation) => self.dispatch(mutation),
                None => {
                    warn!("Like toggle for unknown card {}", id);
                    Task::none()
                }
            },
            Message::Settled(kind, outcome) => match self.board.settle(kind, outcome) {
                Ok(()) => self.fetch_missing_images(),
                Err(failure) => {
                    if !shows_failure(self.board.dialog(), &failure) {
                        self.notice = Some(failure.to_string());
                    }
                    Task::none()
                }
            },
            Message::ImageLoaded(url, result) => {
                self.images.finish(url, result);
                Task::none()
            }
            Message::DismissNotice => {
                self.notice = None;
                Task::none()
            }
        }
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        let store = self.board.store();

        let body: Element<Message> = match (store.status(), store.profile()) {
            (LoadStatus::Ready, Some(profile)) => column![
                ui::cards::profile_header(profile, &self.images),
                ui::cards::card_grid(store.cards(), Some(&profile.id), &self.images),
            ]
            .spacing(40)
            .into(),
            (LoadStatus::Failed(reason), _) => column![
                text(reason.as_str()).size(18),
                button("Reload").on_press(Message::Reload).padding(10),
            ]
            .spacing(20)
            .align_x(Alignment::Center)
            .into(),
            _ => text("Loading...").size(24).into(),
        };

        let mut page: Column<Message> = column![text("Photo Board").size(32)]
            .spacing(32)
            .padding(40);

        if let Some(notice) = &self.notice {
            page = page.push(
                row![
                    text(notice.as_str()).width(Length::Fill),
                    button("Dismiss").on_press(Message::DismissNotice),
                ]
                .spacing(16)
                .align_y(Alignment::Center),
            );
        }
        page = page.push(body);

        let base = container(scrollable(page))
            .width(Length::Fill)
            .height(Length::Fill)
            .center_x(Length::Fill);

        match self.board.dialog() {
            Dialog::Closed => base.into(),
            dialog => ui::popup::modal(base, self.dialog_view(dialog), Message::CloseDialog),
        }
    }

    fn dialog_view<'a>(&'a self, dialog: &'a Dialog) -> Element<'a, Message> {
        let validation = self.form_error.as_deref();
        match dialog {
            Dialog::EditProfile => {
                ui::popup::form_popup(self.board.profile_form(), validation, Message::Submit)
            }
            Dialog::EditAvatar => {
                ui::popup::form_popup(self.board.avatar_form(), validation, Message::Submit)
            }
            Dialog::AddCard => {
                ui::popup::form_popup(self.board.card_form(), validation, Message::Submit)
            }
            Dialog::ConfirmDelete(id) => ui::popup::form_popup(
                self.board.delete_form(),
                validation,
                Message::ConfirmDelete(id.clone()),
            ),
            Dialog::ViewImage(id) => {
                let card = self.board.store().cards().iter().find(|card| &card.id == id);
                ui::popup::image_popup(card, &self.images)
            }
            Dialog::Closed => text("").into(),
        }
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

/// Whether the open dialog already shows `failure` inline
fn shows_failure(dialog: &Dialog, failure: &MutationFailure) -> bool {
    match (dialog, failure.kind) {
        (Dialog::EditProfile, MutationKind::EditProfile)
        | (Dialog::EditAvatar, MutationKind::EditAvatar)
        | (Dialog::AddCard, MutationKind::AddCard) => true,
        (Dialog::ConfirmDelete(id), MutationKind::DeleteCard) => failure.card.as_ref() == Some(id),
        _ => false,
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    info!("Loading configuration");
    let config = Config::load().context("failed to load configuration")?;

    let gateway: Arc<dyn Gateway> =
        Arc::new(HttpGateway::new(&config).context("failed to build the HTTP client")?);
    info!("Using board API at {}", config.api_base_url);

    iced::application("Photo Board", PhotoBoard::update, PhotoBoard::view)
        .theme(PhotoBoard::theme)
        .centered()
        .run_with(move || PhotoBoard::new(Arc::clone(&gateway)))
        .map_err(|err| anyhow!("UI failed: {}", err))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failure(kind: MutationKind, card: Option<&str>) -> MutationFailure {
        MutationFailure {
            kind,
            card: card.map(CardId::from),
            source: GatewayError::Transport("offline".to_string()),
        }
    }

    #[test]
    fn test_inline_failures_only_for_matching_dialog() {
        let id = CardId::from("2");
        let delete = failure(MutationKind::DeleteCard, Some("2"));
        assert!(shows_failure(&Dialog::ConfirmDelete(id.clone()), &delete));
        assert!(!shows_failure(&Dialog::ConfirmDelete(CardId::from("1")), &delete));
        assert!(shows_failure(&Dialog::EditProfile, &failure(MutationKind::EditProfile, None)));
        assert!(!shows_failure(&Dialog::EditAvatar, &failure(MutationKind::EditProfile, None)));
        assert!(!shows_failure(&Dialog::ViewImage(id), &failure(MutationKind::ToggleLike, Some("2"))));
        assert!(!shows_failure(&Dialog::Closed, &failure(MutationKind::AddCard, None)));
    }
}
