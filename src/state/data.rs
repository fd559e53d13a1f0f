//! Shared data structures for the application state
//!
//! These structs represent the data model that flows between
//! the remote gateway and the UI layer. They are always replaced
//! wholesale, never patched field-by-field.

use std::collections::HashSet;
use std::fmt;

use chrono::{DateTime, Utc};

/// Opaque identifier of a board user (profile owner, card owner, liker)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId(pub String);

/// Opaque identifier of a card, unique within the collection
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CardId(pub String);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UserId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<&str> for CardId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// The signed-in user's profile
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    /// Stable identifier (also the current user's identity)
    pub id: UserId,
    /// Display name (2-40 chars, enforced by the form layer)
    pub name: String,
    /// Short bio (2-200 chars, enforced by the form layer)
    pub about: String,
    /// Avatar image URL
    pub avatar: String,
}

/// A single photo card on the board
#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    /// Stable identifier, never changes across updates
    pub id: CardId,
    /// Image URL
    pub link: String,
    /// Caption shown under the image
    pub name: String,
    /// Identifier of the user who posted the card
    pub owner_id: UserId,
    /// Users who liked the card
    pub likers: HashSet<UserId>,
    /// Server creation timestamp, when the server sent one
    pub created_at: Option<DateTime<Utc>>,
}

impl Card {
    /// Number of likes, always derived from the liker set
    pub fn like_count(&self) -> usize {
        self.likers.len()
    }

    /// Whether `user` currently likes this card
    pub fn is_liked_by(&self, user: &UserId) -> bool {
        self.likers.contains(user)
    }

    /// Whether `user` posted this card (only owners may delete)
    pub fn is_owned_by(&self, user: &UserId) -> bool {
        &self.owner_id == user
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(likers: &[&str]) -> Card {
        Card {
            id: CardId::from("c1"),
            link: "https://img.example/1.jpg".to_string(),
            name: "Lake".to_string(),
            owner_id: UserId::from("owner"),
            likers: likers.iter().map(|id| UserId::from(*id)).collect(),
            created_at: None,
        }
    }

    #[test]
    fn test_like_count_follows_likers() {
        assert_eq!(card(&[]).like_count(), 0);
        assert_eq!(card(&["a", "b"]).like_count(), 2);
    }

    #[test]
    fn test_membership_and_ownership() {
        let card = card(&["9"]);
        assert!(card.is_liked_by(&UserId::from("9")));
        assert!(!card.is_liked_by(&UserId::from("owner")));
        assert!(card.is_owned_by(&UserId::from("owner")));
        assert!(!card.is_owned_by(&UserId::from("9")));
    }
}
