//! Test fixtures and a scripted in-memory gateway

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::data::{Card, CardId, Profile, UserId};
use super::store::Loaded;
use crate::api::entities::{RawCard, RawLiker, RawOwner, RawUser};
use crate::api::{Bundle, Gateway, GatewayError, GatewayResult};

pub fn card(id: &str, likers: &[&str]) -> Card {
    Card {
        id: CardId::from(id),
        link: format!("https://img.example/{}.jpg", id),
        name: format!("Card {}", id),
        owner_id: UserId::from("9"),
        likers: likers.iter().map(|l| UserId::from(*l)).collect(),
        created_at: None,
    }
}

pub fn profile(id: &str) -> Profile {
    Profile {
        id: UserId::from(id),
        name: "A".to_string(),
        about: "B".to_string(),
        avatar: "u1".to_string(),
    }
}

pub fn loaded(profile: Profile, cards: Vec<Card>) -> Loaded {
    Loaded { profile, cards }
}

enum Scripted {
    Bundle(Bundle),
    User(RawUser),
    Card(RawCard),
    Ack,
    Fail(GatewayError),
}

/// Replays queued responses in order and records every call
#[derive(Default)]
pub struct MockGateway {
    script: Mutex<VecDeque<Scripted>>,
    calls: Mutex<Vec<String>>,
}

impl MockGateway {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn with_bundle(cards: Vec<RawCard>, user: RawUser) -> Arc<Self> {
        let gateway = Self::new();
        gateway.push(Scripted::Bundle(Bundle { cards, user }));
        gateway
    }

    pub fn raw_card(id: &str, owner: &str, likers: &[&str]) -> RawCard {
        RawCard {
            id: id.to_string(),
            name: format!("Card {}", id),
            link: format!("https://img.example/{}.jpg", id),
            owner: RawOwner::Id(owner.to_string()),
            likes: likers
                .iter()
                .map(|l| RawLiker { id: l.to_string() })
                .collect(),
            created_at: None,
        }
    }

    pub fn raw_user(id: &str, name: &str, about: &str, avatar: &str) -> RawUser {
        RawUser {
            id: id.to_string(),
            name: name.to_string(),
            about: about.to_string(),
            avatar: avatar.to_string(),
        }
    }

    pub fn respond_user(&self, user: RawUser) {
        self.push(Scripted::User(user));
    }

    pub fn respond_card(&self, card: RawCard) {
        self.push(Scripted::Card(card));
    }

    pub fn respond_ack(&self) {
        self.push(Scripted::Ack);
    }

    pub fn fail_next(&self, err: GatewayError) {
        self.push(Scripted::Fail(err));
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn push(&self, scripted: Scripted) {
        self.script.lock().unwrap().push_back(scripted);
    }

    fn next(&self, call: String) -> Scripted {
        self.calls.lock().unwrap().push(call);
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Scripted::Fail(GatewayError::Transport("nothing scripted".to_string())))
    }
}

fn mismatch() -> GatewayError {
    GatewayError::Decode("scripted response does not fit this call".to_string())
}

#[async_trait]
impl Gateway for MockGateway {
    async fn fetch_bundle(&self) -> GatewayResult<Bundle> {
        match self.next("fetch_bundle".to_string()) {
            Scripted::Bundle(bundle) => Ok(bundle),
            Scripted::Fail(err) => Err(err),
            _ => Err(mismatch()),
        }
    }

    async fn update_profile(&self, name: &str, about: &str) -> GatewayResult<RawUser> {
        match self.next(format!("update_profile({}, {})", name, about)) {
            Scripted::User(user) => Ok(user),
            Scripted::Fail(err) => Err(err),
            _ => Err(mismatch()),
        }
    }

    async fn update_avatar(&self, avatar: &str) -> GatewayResult<RawUser> {
        match self.next(format!("update_avatar({})", avatar)) {
            Scripted::User(user) => Ok(user),
            Scripted::Fail(err) => Err(err),
            _ => Err(mismatch()),
        }
    }

    async fn create_card(&self, name: &str, link: &str) -> GatewayResult<RawCard> {
        match self.next(format!("create_card({}, {})", name, link)) {
            Scripted::Card(card) => Ok(card),
            Scripted::Fail(err) => Err(err),
            _ => Err(mismatch()),
        }
    }

    async fn delete_card(&self, id: &CardId) -> GatewayResult<()> {
        match self.next(format!("delete_card({})", id)) {
            Scripted::Ack => Ok(()),
            Scripted::Fail(err) => Err(err),
            _ => Err(mismatch()),
        }
    }

    async fn set_like(&self, id: &CardId, liked: bool) -> GatewayResult<RawCard> {
        match self.next(format!("set_like({}, {})", id, liked)) {
            Scripted::Card(card) => Ok(card),
            Scripted::Fail(err) => Err(err),
            _ => Err(mismatch()),
        }
    }
}
