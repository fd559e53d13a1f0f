//! Intent handling for the whole board
//!
//! `Board` ties the store, the dialog orchestrator and the dialog forms
//! together behind the intents the view can raise. Remote calls are not
//! made here: intents that need one hand back a `Mutation`, and the
//! caller reports the outcome through `settle` once it arrives.

use log::{debug, info};

use super::coordinator::{Mutation, MutationFailure, MutationKind, Outcome, Reconciliation};
use super::data::CardId;
use super::dialog::{Dialog, DialogOrchestrator};
use super::form::{
    AvatarForm, CardForm, DeleteForm, Field, FormDialog, ProfileForm, ValidationError,
};
use super::store::{LoadFailure, Loaded, Snapshot, Store};

#[derive(Debug, Default)]
pub struct Board {
    store: Store,
    dialogs: DialogOrchestrator,
    profile_form: FormDialog<ProfileForm>,
    avatar_form: FormDialog<AvatarForm>,
    card_form: FormDialog<CardForm>,
    delete_form: FormDialog<DeleteForm>,
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn snapshot(&self) -> Snapshot {
        self.store.snapshot()
    }

    pub fn dialog(&self) -> &Dialog {
        self.dialogs.active()
    }

    pub fn profile_form(&self) -> &FormDialog<ProfileForm> {
        &self.profile_form
    }

    pub fn avatar_form(&self) -> &FormDialog<AvatarForm> {
        &self.avatar_form
    }

    pub fn card_form(&self) -> &FormDialog<CardForm> {
        &self.card_form
    }

    pub fn delete_form(&self) -> &FormDialog<DeleteForm> {
        &self.delete_form
    }

    /// Start the initial load (or a reload after failure)
    pub fn begin_load(&mut self) -> bool {
        self.store.begin_load()
    }

    pub fn finish_load(&mut self, result: Result<Loaded, LoadFailure>) -> Result<(), LoadFailure> {
        self.store.finish_load(result)
    }

    /// Open a dialog, replacing the current one, and seed its form
    pub fn open(&mut self, dialog: Dialog) {
        let snapshot = self.store.snapshot();
        match &dialog {
            Dialog::EditProfile => self.profile_form.reopen(&snapshot, &dialog),
            Dialog::EditAvatar => self.avatar_form.reopen(&snapshot, &dialog),
            Dialog::AddCard => self.card_form.reopen(&snapshot, &dialog),
            Dialog::ConfirmDelete(_) => self.delete_form.reopen(&snapshot, &dialog),
            Dialog::ViewImage(_) | Dialog::Closed => {}
        }
        self.dialogs.open(dialog);
    }

    pub fn close_dialog(&mut self) {
        self.dialogs.close();
    }

    /// Route a field edit to the form of the active dialog
    pub fn edit(&mut self, field: Field, value: String) {
        match self.dialogs.active() {
            Dialog::EditProfile => self.profile_form.edit(field, value),
            Dialog::EditAvatar => self.avatar_form.edit(field, value),
            Dialog::AddCard => self.card_form.edit(field, value),
            _ => debug!("Ignoring edit of {:?} with no form open", field),
        }
    }

    /// Submit the active form dialog.
    ///
    /// `Ok(None)` when nothing needs sending: no form is open, or its
    /// previous submission is still pending.
    pub fn submit(&mut self) -> Result<Option<Mutation>, ValidationError> {
        match self.dialogs.active() {
            Dialog::EditProfile => self.profile_form.submit(),
            Dialog::EditAvatar => self.avatar_form.submit(),
            Dialog::AddCard => self.card_form.submit(),
            Dialog::ConfirmDelete(_) => self.delete_form.submit(),
            Dialog::ViewImage(_) | Dialog::Closed => Ok(None),
        }
    }

    /// Confirm deletion of `id` from its confirmation dialog
    pub fn confirm_delete(&mut self, id: &CardId) -> Result<Option<Mutation>, ValidationError> {
        if self.dialogs.active() != &Dialog::ConfirmDelete(id.clone()) {
            debug!("Ignoring delete confirmation for {} outside its dialog", id);
            return Ok(None);
        }
        self.delete_form.submit()
    }

    /// Like or unlike `id` based on the membership visible right now
    pub fn toggle_like(&self, id: &CardId) -> Option<Mutation> {
        Mutation::toggle_like(&self.store.snapshot(), id)
    }

    /// Absorb a coordinator outcome in arrival order.
    ///
    /// Success reconciles the store, resets the owning form and closes the
    /// dialog (likes excepted). Failure leaves the store and the dialog
    /// alone and is handed back for the view to show. A delete outcome only
    /// settles the confirmation form when it is for the card shown there.
    pub fn settle(&mut self, kind: MutationKind, outcome: Outcome) -> Result<(), MutationFailure> {
        let target = match &outcome {
            Ok(Reconciliation::Remove(id)) => Some(id.clone()),
            Ok(_) => None,
            Err(failure) => failure.card.clone(),
        };

        let result = match outcome {
            Ok(reconciliation) => {
                info!("{} succeeded", kind);
                self.store.reconcile(reconciliation);
                self.dialogs.on_mutation_success(kind);
                Ok(())
            }
            Err(failure) => Err(failure),
        };

        let status = result.as_ref().map(|_| ());
        match kind {
            MutationKind::EditProfile => self.profile_form.settle(status),
            MutationKind::EditAvatar => self.avatar_form.settle(status),
            MutationKind::AddCard => self.card_form.settle(status),
            MutationKind::DeleteCard if self.delete_form.form().card == target => {
                self.delete_form.settle(status)
            }
            MutationKind::DeleteCard => debug!("Delete outcome for a card no longer confirmed"),
            MutationKind::ToggleLike => {}
        }
        result
    }
}
