//! Remote gateway
//!
//! This module handles everything that talks to the board server:
//! - The gateway contract the core consumes (this file)
//! - Wire records (entities.rs)
//! - The reqwest-backed implementation (http.rs)

pub mod entities;
pub mod http;

use async_trait::async_trait;
use thiserror::Error;

use crate::state::data::CardId;
use entities::{RawCard, RawUser};

pub use http::HttpGateway;

/// Failure of a single remote call
///
/// Kept `Clone` so it can ride inside iced messages.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GatewayError {
    #[error("network error: {0}")]
    Transport(String),
    #[error("server answered {status}: {message}")]
    Status { status: u16, message: String },
    #[error("unexpected response body: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            GatewayError::Decode(err.to_string())
        } else {
            GatewayError::Transport(err.to_string())
        }
    }
}

pub type GatewayResult<T> = Result<T, GatewayError>;

/// The combined initial payload: every card plus the signed-in user
#[derive(Debug, Clone, PartialEq)]
pub struct Bundle {
    pub cards: Vec<RawCard>,
    pub user: RawUser,
}

/// The six remote operations the board exposes
///
/// Object safe so the app can hold an `Arc<dyn Gateway>` and move
/// clones of it into background tasks.
#[async_trait]
pub trait Gateway: Send + Sync {
    async fn fetch_bundle(&self) -> GatewayResult<Bundle>;

    async fn update_profile(&self, name: &str, about: &str) -> GatewayResult<RawUser>;

    async fn update_avatar(&self, avatar: &str) -> GatewayResult<RawUser>;

    async fn create_card(&self, name: &str, link: &str) -> GatewayResult<RawCard>;

    async fn delete_card(&self, id: &CardId) -> GatewayResult<()>;

    /// `liked = true` adds the current user to the likers, `false` removes them
    async fn set_like(&self, id: &CardId, liked: bool) -> GatewayResult<RawCard>;
}
