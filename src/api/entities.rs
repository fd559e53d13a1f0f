//! Wire records exchanged with the board REST API
//!
//! These mirror the JSON payloads exactly; the rest of the app only
//! sees the normalized shapes from `state::data`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user record as the server sends it
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct RawUser {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub about: String,
    #[serde(default)]
    pub avatar: String,
}

/// Card owner: older endpoints send the full user, newer ones only the id
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum RawOwner {
    User(RawUser),
    Id(String),
}

/// Anything in the `likes` array exposing an `_id`
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct RawLiker {
    #[serde(rename = "_id")]
    pub id: String,
}

/// A card record as the server sends it
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct RawCard {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub link: String,
    pub owner: RawOwner,
    #[serde(default)]
    pub likes: Vec<RawLiker>,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Body of `PATCH /users/me`
#[derive(Serialize, Debug, Clone)]
pub struct ProfileUpdate<'a> {
    pub name: &'a str,
    pub about: &'a str,
}

/// Body of `PATCH /users/me/avatar`
#[derive(Serialize, Debug, Clone)]
pub struct AvatarUpdate<'a> {
    pub avatar: &'a str,
}

/// Body of `POST /cards`
#[derive(Serialize, Debug, Clone)]
pub struct NewCard<'a> {
    pub name: &'a str,
    pub link: &'a str,
}

/// Error body returned alongside non-2xx statuses
#[derive(Deserialize, Debug, Clone)]
pub struct ErrorBody {
    pub message: Option<String>,
}
