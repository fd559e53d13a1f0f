//! Dialog orchestrator
//!
//! Exactly one dialog is visible at a time. That is a property of the
//! `Dialog` type itself: opening a dialog replaces whatever was open.

use log::debug;

use super::coordinator::MutationKind;
use super::data::CardId;

/// Which modal, if any, is on screen
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Dialog {
    #[default]
    Closed,
    EditProfile,
    EditAvatar,
    AddCard,
    ConfirmDelete(CardId),
    ViewImage(CardId),
}

impl Dialog {
    pub fn is_open(&self) -> bool {
        !matches!(self, Dialog::Closed)
    }

    /// The card a dialog refers to, for the card-scoped variants
    pub fn card(&self) -> Option<&CardId> {
        match self {
            Dialog::ConfirmDelete(id) | Dialog::ViewImage(id) => Some(id),
            _ => None,
        }
    }
}

/// State machine over `Dialog`
#[derive(Debug, Default)]
pub struct DialogOrchestrator {
    active: Dialog,
}

impl DialogOrchestrator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> &Dialog {
        &self.active
    }

    /// Open `dialog`, replacing any dialog already open
    pub fn open(&mut self, dialog: Dialog) {
        if self.active != dialog {
            debug!("Dialog {:?} -> {:?}", self.active, dialog);
        }
        self.active = dialog;
    }

    /// Universal escape; closing an already closed dialog is a no-op
    pub fn close(&mut self) {
        if self.active.is_open() {
            debug!("Dialog {:?} -> Closed", self.active);
        }
        self.active = Dialog::Closed;
    }

    /// A coordinator finished successfully.
    ///
    /// Form-driven coordinators (and delete) close unconditionally, even if
    /// the user has moved to another dialog since submitting.
    pub fn on_mutation_success(&mut self, kind: MutationKind) {
        if kind.closes_dialog() {
            self.close();
        }
    }
}
