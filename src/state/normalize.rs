//! Raw wire records -> internal entities
//!
//! Pure and deterministic: no network, no store access.

use super::data::{Card, CardId, Profile, UserId};
use crate::api::entities::{RawCard, RawOwner, RawUser};

/// Convert a server card into the internal `Card` shape
///
/// - `_id` becomes the stable `CardId`
/// - the owner (full record or bare id) becomes `owner_id`
/// - the likes array collapses into a liker set
pub fn normalize_card(raw: RawCard) -> Card {
    let owner_id = match raw.owner {
        RawOwner::User(user) => UserId(user.id),
        RawOwner::Id(id) => UserId(id),
    };

    Card {
        id: CardId(raw.id),
        link: raw.link,
        name: raw.name,
        owner_id,
        likers: raw.likes.into_iter().map(|liker| UserId(liker.id)).collect(),
        created_at: raw.created_at,
    }
}

/// Convert a server user record into the `Profile` shape
pub fn normalize_profile(raw: RawUser) -> Profile {
    Profile {
        id: UserId(raw.id),
        name: raw.name,
        about: raw.about,
        avatar: raw.avatar,
    }
}
