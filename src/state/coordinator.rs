//! Mutation coordinators
//!
//! One coordinator per user action. Each performs exactly one remote call
//! and, on success, describes how the store should absorb the server's
//! canonical answer. Applying that description is left to the update
//! loop, so reconciliations land in the order responses arrive.

use std::fmt;
use std::sync::Arc;

use log::{debug, warn};
use thiserror::Error;

use super::data::{Card, CardId, Profile};
use super::normalize::{normalize_card, normalize_profile};
use super::store::Snapshot;
use crate::api::{Gateway, GatewayError};

/// Which coordinator a mutation belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MutationKind {
    EditProfile,
    EditAvatar,
    AddCard,
    DeleteCard,
    ToggleLike,
}

impl MutationKind {
    /// Every coordinator except the like toggle closes the active dialog on success
    pub fn closes_dialog(self) -> bool {
        !matches!(self, MutationKind::ToggleLike)
    }
}

impl fmt::Display for MutationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MutationKind::EditProfile => "profile update",
            MutationKind::EditAvatar => "avatar update",
            MutationKind::AddCard => "card creation",
            MutationKind::DeleteCard => "card deletion",
            MutationKind::ToggleLike => "like toggle",
        };
        f.write_str(label)
    }
}

/// A user action ready to be sent to the server
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    EditProfile { name: String, about: String },
    EditAvatar { avatar: String },
    AddCard { name: String, link: String },
    DeleteCard { id: CardId },
    ToggleLike { id: CardId, liked: bool },
}

impl Mutation {
    pub fn kind(&self) -> MutationKind {
        match self {
            Mutation::EditProfile { .. } => MutationKind::EditProfile,
            Mutation::EditAvatar { .. } => MutationKind::EditAvatar,
            Mutation::AddCard { .. } => MutationKind::AddCard,
            Mutation::DeleteCard { .. } => MutationKind::DeleteCard,
            Mutation::ToggleLike { .. } => MutationKind::ToggleLike,
        }
    }

    /// The card a card-scoped mutation acts on
    pub fn card(&self) -> Option<&CardId> {
        match self {
            Mutation::DeleteCard { id } | Mutation::ToggleLike { id, .. } => Some(id),
            _ => None,
        }
    }

    /// Build a like toggle against whatever the snapshot shows right now.
    ///
    /// Two quick clicks may both read the same membership and send the
    /// same desired state; the last response to arrive wins.
    pub fn toggle_like(snapshot: &Snapshot, id: &CardId) -> Option<Self> {
        let user = snapshot.current_user()?;
        let card = snapshot.card(id)?;

        Some(Mutation::ToggleLike {
            id: id.clone(),
            liked: !card.is_liked_by(user),
        })
    }
}

/// How the store absorbs a successful mutation
#[derive(Debug, Clone, PartialEq)]
pub enum Reconciliation {
    /// Whole-value profile replace
    ReplaceProfile(Profile),
    /// New card goes to the front of the collection
    Prepend(Card),
    /// Drop the card with this id
    Remove(CardId),
    /// Swap the card with the same id for this canonical one
    Replace(Card),
}

/// A coordinator's remote call failed; the store is untouched
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{kind} failed: {source}")]
pub struct MutationFailure {
    pub kind: MutationKind,
    /// Card the mutation targeted (delete and like toggle)
    pub card: Option<CardId>,
    #[source]
    pub source: GatewayError,
}

pub type Outcome = Result<Reconciliation, MutationFailure>;

/// Edit Profile: `update_profile(name, about)` -> whole profile replace
pub async fn edit_profile(gateway: &dyn Gateway, name: &str, about: &str) -> Result<Reconciliation, GatewayError> {
    let user = gateway.update_profile(name, about).await?;
    Ok(Reconciliation::ReplaceProfile(normalize_profile(user)))
}

/// Edit Avatar: `update_avatar(url)` -> whole profile replace
pub async fn edit_avatar(gateway: &dyn Gateway, avatar: &str) -> Result<Reconciliation, GatewayError> {
    let user = gateway.update_avatar(avatar).await?;
    Ok(Reconciliation::ReplaceProfile(normalize_profile(user)))
}

/// Add Card: `create_card(name, link)` -> prepend the normalized card
pub async fn add_card(gateway: &dyn Gateway, name: &str, link: &str) -> Result<Reconciliation, GatewayError> {
    let card = gateway.create_card(name, link).await?;
    Ok(Reconciliation::Prepend(normalize_card(card)))
}

/// Delete Card: `delete_card(id)` -> remove by id
pub async fn delete_card(gateway: &dyn Gateway, id: CardId) -> Result<Reconciliation, GatewayError> {
    gateway.delete_card(&id).await?;
    Ok(Reconciliation::Remove(id))
}

/// Toggle Like: `set_like(id, liked)` -> replace with the server's card
pub async fn toggle_like(gateway: &dyn Gateway, id: &CardId, liked: bool) -> Result<Reconciliation, GatewayError> {
    let card = gateway.set_like(id, liked).await?;
    Ok(Reconciliation::Replace(normalize_card(card)))
}

/// Run the coordinator matching `mutation`. Never panics on remote failure.
pub async fn execute(gateway: Arc<dyn Gateway>, mutation: Mutation) -> Outcome {
    let kind = mutation.kind();
    let card = mutation.card().cloned();
    debug!("Dispatching {:?}", mutation);

    let gateway = gateway.as_ref();
    let result = match mutation {
        Mutation::EditProfile { name, about } => edit_profile(gateway, &name, &about).await,
        Mutation::EditAvatar { avatar } => edit_avatar(gateway, &avatar).await,
        Mutation::AddCard { name, link } => add_card(gateway, &name, &link).await,
        Mutation::DeleteCard { id } => delete_card(gateway, id).await,
        Mutation::ToggleLike { id, liked } => toggle_like(gateway, &id, liked).await,
    };

    result.map_err(|source| {
        let failure = MutationFailure { kind, card, source };
        warn!("{}", failure);
        failure
    })
}
