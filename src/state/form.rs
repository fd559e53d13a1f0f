//! Form-driven dialogs
//!
//! Every editing dialog follows the same shape: its fields are seeded from
//! the current snapshot when it opens, the user edits them, and submitting
//! produces a `Mutation` for a coordinator. `FormDialog` adds the
//! per-submission status on top of any `DialogForm`.

use thiserror::Error;

use super::coordinator::{Mutation, MutationFailure};
use super::data::CardId;
use super::dialog::Dialog;
use super::store::Snapshot;

/// Editable inputs across all dialogs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    About,
    Avatar,
    Caption,
    Link,
}

/// Field constraint violated; stays inside the form layer
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} must be {min} to {max} characters long")]
    Length {
        field: &'static str,
        min: usize,
        max: usize,
    },
    #[error("{field} must be a web link")]
    Url { field: &'static str },
    #[error("no card selected")]
    MissingCard,
}

/// One rendered input of a form
#[derive(Debug, Clone, PartialEq)]
pub struct Input<'a> {
    pub field: Field,
    pub placeholder: &'static str,
    pub value: &'a str,
}

/// The fields and submit target of one dialog
pub trait DialogForm: Clone + Default {
    const TITLE: &'static str;
    const SUBMIT_LABEL: &'static str;

    /// Initial field values when the dialog opens
    fn seed(snapshot: &Snapshot, dialog: &Dialog) -> Self;

    /// Fields a form doesn't own are ignored
    fn set(&mut self, field: Field, value: String);

    fn inputs(&self) -> Vec<Input<'_>>;

    /// Validate and build the coordinator input
    fn to_mutation(&self) -> Result<Mutation, ValidationError>;

    /// Whether two seeds act on the same thing. Card-scoped forms compare ids.
    fn same_target(&self, _other: &Self) -> bool {
        true
    }
}

/// Status of the latest submission from a dialog
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Submission {
    #[default]
    Idle,
    Pending,
    Failed(String),
}

/// A `DialogForm` plus its submission status
#[derive(Debug, Clone, Default)]
pub struct FormDialog<F> {
    form: F,
    submission: Submission,
}

impl<F: DialogForm> FormDialog<F> {
    pub fn form(&self) -> &F {
        &self.form
    }

    pub fn submission(&self) -> &Submission {
        &self.submission
    }

    pub fn is_pending(&self) -> bool {
        self.submission == Submission::Pending
    }

    /// Re-seed on open. An unanswered submission for the same target keeps
    /// its fields and status; a different target starts over.
    pub fn reopen(&mut self, snapshot: &Snapshot, dialog: &Dialog) {
        let seeded = F::seed(snapshot, dialog);
        if self.is_pending() && self.form.same_target(&seeded) {
            return;
        }
        self.form = seeded;
        self.submission = Submission::Idle;
    }

    pub fn edit(&mut self, field: Field, value: String) {
        self.form.set(field, value);
    }

    /// Start a submission. `Ok(None)` while a previous one is still pending.
    pub fn submit(&mut self) -> Result<Option<Mutation>, ValidationError> {
        if self.is_pending() {
            return Ok(None);
        }
        let mutation = self.form.to_mutation()?;
        self.submission = Submission::Pending;
        Ok(Some(mutation))
    }

    pub fn settle(&mut self, result: Result<(), &MutationFailure>) {
        self.submission = match result {
            Ok(()) => Submission::Idle,
            Err(failure) => Submission::Failed(failure.to_string()),
        };
    }
}

fn check_length(field: &'static str, value: &str, min: usize, max: usize) -> Result<(), ValidationError> {
    let len = value.trim().chars().count();
    if len < min || len > max {
        return Err(ValidationError::Length { field, min, max });
    }
    Ok(())
}

fn check_url(field: &'static str, value: &str) -> Result<(), ValidationError> {
    match reqwest::Url::parse(value.trim()) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(()),
        _ => Err(ValidationError::Url { field }),
    }
}

/// Name + bio, seeded from the current profile
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileForm {
    pub name: String,
    pub about: String,
}

impl DialogForm for ProfileForm {
    const TITLE: &'static str = "Edit profile";
    const SUBMIT_LABEL: &'static str = "Save";

    fn seed(snapshot: &Snapshot, _dialog: &Dialog) -> Self {
        match snapshot.profile.as_deref() {
            Some(profile) => Self {
                name: profile.name.clone(),
                about: profile.about.clone(),
            },
            None => Self::default(),
        }
    }

    fn set(&mut self, field: Field, value: String) {
        match field {
            Field::Name => self.name = value,
            Field::About => self.about = value,
            _ => {}
        }
    }

    fn inputs(&self) -> Vec<Input<'_>> {
        vec![
            Input { field: Field::Name, placeholder: "Name", value: &self.name },
            Input { field: Field::About, placeholder: "About", value: &self.about },
        ]
    }

    fn to_mutation(&self) -> Result<Mutation, ValidationError> {
        check_length("name", &self.name, 2, 40)?;
        check_length("about", &self.about, 2, 200)?;
        Ok(Mutation::EditProfile {
            name: self.name.trim().to_string(),
            about: self.about.trim().to_string(),
        })
    }
}

/// New avatar link, starts empty
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AvatarForm {
    pub avatar: String,
}

impl DialogForm for AvatarForm {
    const TITLE: &'static str = "Change avatar";
    const SUBMIT_LABEL: &'static str = "Save";

    fn seed(_snapshot: &Snapshot, _dialog: &Dialog) -> Self {
        Self::default()
    }

    fn set(&mut self, field: Field, value: String) {
        if field == Field::Avatar {
            self.avatar = value;
        }
    }

    fn inputs(&self) -> Vec<Input<'_>> {
        vec![Input { field: Field::Avatar, placeholder: "Avatar link", value: &self.avatar }]
    }

    fn to_mutation(&self) -> Result<Mutation, ValidationError> {
        check_url("avatar", &self.avatar)?;
        Ok(Mutation::EditAvatar {
            avatar: self.avatar.trim().to_string(),
        })
    }
}

/// Caption + image link for a new card, starts empty
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CardForm {
    pub caption: String,
    pub link: String,
}

impl DialogForm for CardForm {
    const TITLE: &'static str = "New place";
    const SUBMIT_LABEL: &'static str = "Create";

    fn seed(_snapshot: &Snapshot, _dialog: &Dialog) -> Self {
        Self::default()
    }

    fn set(&mut self, field: Field, value: String) {
        match field {
            Field::Caption => self.caption = value,
            Field::Link => self.link = value,
            _ => {}
        }
    }

    fn inputs(&self) -> Vec<Input<'_>> {
        vec![
            Input { field: Field::Caption, placeholder: "Title", value: &self.caption },
            Input { field: Field::Link, placeholder: "Image link", value: &self.link },
        ]
    }

    fn to_mutation(&self) -> Result<Mutation, ValidationError> {
        check_length("title", &self.caption, 2, 30)?;
        check_url("image link", &self.link)?;
        Ok(Mutation::AddCard {
            name: self.caption.trim().to_string(),
            link: self.link.trim().to_string(),
        })
    }
}

/// Delete confirmation: no inputs, the target comes from the dialog
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeleteForm {
    pub card: Option<CardId>,
}

impl DialogForm for DeleteForm {
    const TITLE: &'static str = "Are you sure?";
    const SUBMIT_LABEL: &'static str = "Yes";

    fn seed(_snapshot: &Snapshot, dialog: &Dialog) -> Self {
        Self {
            card: dialog.card().cloned(),
        }
    }

    fn set(&mut self, _field: Field, _value: String) {}

    fn inputs(&self) -> Vec<Input<'_>> {
        Vec::new()
    }

    fn to_mutation(&self) -> Result<Mutation, ValidationError> {
        let id = self.card.clone().ok_or(ValidationError::MissingCard)?;
        Ok(Mutation::DeleteCard { id })
    }

    fn same_target(&self, other: &Self) -> bool {
        self.card == other.card
    }
}
