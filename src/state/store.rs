//! Application state store
//!
//! Holds the current profile, the card collection and the initial load
//! status. Both the profile and the collection sit behind `Arc`s and are
//! swapped in one assignment per change, so anything holding a `Snapshot`
//! keeps seeing a consistent value.

use std::collections::HashSet;
use std::sync::Arc;

use log::{debug, error, info, warn};
use thiserror::Error;

use super::coordinator::Reconciliation;
use super::data::{Card, CardId, Profile, UserId};
use super::normalize::{normalize_card, normalize_profile};
use crate::api::{Gateway, GatewayError};

/// Status of the initial bundle fetch (mutations track their own)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadStatus {
    #[default]
    Idle,
    Loading,
    Ready,
    Failed(String),
}

/// The initial bundle fetch failed; nothing is shown until a reload succeeds
#[derive(Debug, Clone, PartialEq, Error)]
#[error("could not load the board: {0}")]
pub struct LoadFailure(#[from] pub GatewayError);

/// Normalized result of the initial fetch
#[derive(Debug, Clone, PartialEq)]
pub struct Loaded {
    pub profile: Profile,
    pub cards: Vec<Card>,
}

/// Fetch and normalize the bundle. Runs off the update loop.
pub async fn fetch_initial(gateway: Arc<dyn Gateway>) -> Result<Loaded, LoadFailure> {
    let bundle = gateway.fetch_bundle().await?;

    Ok(Loaded {
        profile: normalize_profile(bundle.user),
        cards: bundle.cards.into_iter().map(normalize_card).collect(),
    })
}

/// Read-only view of the store handed to dialogs, coordinators and the view
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub profile: Option<Arc<Profile>>,
    pub cards: Arc<Vec<Card>>,
}

impl Snapshot {
    /// Identity of the signed-in user, once the profile is known
    pub fn current_user(&self) -> Option<&UserId> {
        self.profile.as_deref().map(|profile| &profile.id)
    }

    pub fn card(&self, id: &CardId) -> Option<&Card> {
        self.cards.iter().find(|card| &card.id == id)
    }
}

/// The single owner of board state
#[derive(Debug, Default)]
pub struct Store {
    profile: Option<Arc<Profile>>,
    cards: Arc<Vec<Card>>,
    status: LoadStatus,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn profile(&self) -> Option<&Profile> {
        self.profile.as_deref()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            profile: self.profile.clone(),
            cards: Arc::clone(&self.cards),
        }
    }

    /// Mark the initial load as started.
    ///
    /// Returns `false` when a load is already running or has succeeded;
    /// from `Failed` this is the explicit reload.
    pub(crate) fn begin_load(&mut self) -> bool {
        match self.status {
            LoadStatus::Idle | LoadStatus::Failed(_) => {
                self.status = LoadStatus::Loading;
                info!("Loading board");
                true
            }
            LoadStatus::Loading | LoadStatus::Ready => false,
        }
    }

    /// Apply the outcome of `fetch_initial`
    pub(crate) fn finish_load(&mut self, result: Result<Loaded, LoadFailure>) -> Result<(), LoadFailure> {
        match result {
            Ok(loaded) => {
                let cards = dedup_by_id(loaded.cards);
                info!("Board ready: {} cards for {}", cards.len(), loaded.profile.name);

                self.profile = Some(Arc::new(loaded.profile));
                self.cards = Arc::new(cards);
                self.status = LoadStatus::Ready;
                Ok(())
            }
            Err(failure) => {
                error!("{}", failure);
                self.status = LoadStatus::Failed(failure.to_string());
                Err(failure)
            }
        }
    }

    /// Merge a successful mutation's canonical result
    pub(crate) fn reconcile(&mut self, reconciliation: Reconciliation) {
        match reconciliation {
            Reconciliation::ReplaceProfile(profile) => {
                self.profile = Some(Arc::new(profile));
            }
            Reconciliation::Prepend(card) => {
                let mut cards = Vec::with_capacity(self.cards.len() + 1);
                let id = card.id.clone();
                cards.push(card);
                cards.extend(self.cards.iter().filter(|c| c.id != id).cloned());
                self.cards = Arc::new(cards);
            }
            Reconciliation::Remove(id) => {
                let cards: Vec<Card> = self.cards.iter().filter(|c| c.id != id).cloned().collect();
                self.cards = Arc::new(cards);
            }
            Reconciliation::Replace(card) => {
                if self.cards.iter().all(|c| c.id != card.id) {
                    // Deleted while the like was in flight; don't bring it back
                    debug!("Dropping update for card {} no longer on the board", card.id);
                    return;
                }
                let cards: Vec<Card> = self
                    .cards
                    .iter()
                    .map(|c| if c.id == card.id { card.clone() } else { c.clone() })
                    .collect();
                self.cards = Arc::new(cards);
            }
        }
    }
}

/// Keep the first occurrence of each id
fn dedup_by_id(cards: Vec<Card>) -> Vec<Card> {
    let mut seen = HashSet::with_capacity(cards.len());
    let total = cards.len();
    let unique: Vec<Card> = cards
        .into_iter()
        .filter(|card| seen.insert(card.id.clone()))
        .collect();

    if unique.len() != total {
        warn!("Server sent {} duplicate cards, ignoring them", total - unique.len());
    }
    unique
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::testing::{card, loaded, profile, MockGateway};

    fn ready_store() -> Store {
        let mut store = Store::new();
        assert!(store.begin_load());
        store
            .finish_load(Ok(loaded(profile("9"), vec![card("1", &[]), card("2", &["9"])])))
            .unwrap();
        store
    }

    fn ids(store: &Store) -> Vec<&str> {
        store.cards().iter().map(|c| c.id.0.as_str()).collect()
    }

    #[tokio::test]
    async fn test_initial_load_scenario() {
        let gateway = MockGateway::with_bundle(
            vec![MockGateway::raw_card("1", "9", &[]), MockGateway::raw_card("2", "9", &["9"])],
            MockGateway::raw_user("9", "A", "B", "u1"),
        );
        let mut store = Store::new();

        assert!(store.begin_load());
        assert_eq!(store.status(), &LoadStatus::Loading);

        let result = fetch_initial(gateway.clone()).await;
        store.finish_load(result).unwrap();

        assert_eq!(ids(&store), vec!["1", "2"]);
        let profile = store.profile().unwrap();
        assert_eq!((profile.name.as_str(), profile.about.as_str(), profile.avatar.as_str()), ("A", "B", "u1"));
        assert_eq!(store.status(), &LoadStatus::Ready);
        assert_eq!(gateway.calls(), vec!["fetch_bundle".to_string()]);
    }

    #[tokio::test]
    async fn test_failed_load_keeps_nothing_and_allows_reload() {
        let gateway = MockGateway::new();
        gateway.fail_next(GatewayError::Transport("offline".to_string()));
        let mut store = Store::new();

        assert!(store.begin_load());
        let result = fetch_initial(gateway).await;
        assert!(store.finish_load(result).is_err());

        assert!(matches!(store.status(), LoadStatus::Failed(_)));
        assert!(store.profile().is_none());
        assert!(store.cards().is_empty());
        assert!(store.begin_load());
    }

    #[test]
    fn test_load_runs_once() {
        let mut store = ready_store();
        assert!(!store.begin_load());

        let mut loading = Store::new();
        assert!(loading.begin_load());
        assert!(!loading.begin_load());
    }

    #[test]
    fn test_duplicate_ids_from_server_are_dropped() {
        let mut store = Store::new();
        store.begin_load();
        store
            .finish_load(Ok(loaded(profile("9"), vec![card("1", &[]), card("1", &["9"]), card("2", &[])])))
            .unwrap();

        assert_eq!(ids(&store), vec!["1", "2"]);
        assert_eq!(store.cards()[0].like_count(), 0);
    }

    #[test]
    fn test_prepend_puts_new_card_first() {
        let mut store = ready_store();

        store.reconcile(Reconciliation::Prepend(card("3", &[])));

        assert_eq!(ids(&store), vec!["3", "1", "2"]);
    }

    #[test]
    fn test_prepend_of_known_id_does_not_duplicate() {
        let mut store = ready_store();

        store.reconcile(Reconciliation::Prepend(card("2", &[])));

        assert_eq!(ids(&store), vec!["2", "1"]);
    }

    #[test]
    fn test_replace_touches_only_matching_card() {
        let mut store = ready_store();
        let untouched = store.cards()[1].clone();

        store.reconcile(Reconciliation::Replace(card("1", &["9"])));

        assert_eq!(ids(&store), vec!["1", "2"]);
        assert_eq!(store.cards()[0].like_count(), 1);
        assert_eq!(store.cards()[1], untouched);
    }

    #[test]
    fn test_replace_of_removed_card_is_ignored() {
        let mut store = ready_store();
        store.reconcile(Reconciliation::Remove(CardId::from("1")));

        store.reconcile(Reconciliation::Replace(card("1", &["9"])));

        assert_eq!(ids(&store), vec!["2"]);
    }

    #[test]
    fn test_snapshot_is_not_affected_by_later_changes() {
        let mut store = ready_store();
        let before = store.snapshot();

        store.reconcile(Reconciliation::Remove(CardId::from("2")));
        store.reconcile(Reconciliation::ReplaceProfile(profile("10")));

        assert_eq!(before.cards.len(), 2);
        assert_eq!(before.current_user(), Some(&UserId::from("9")));
        assert_eq!(store.snapshot().current_user(), Some(&UserId::from("10")));
        assert!(store.snapshot().card(&CardId::from("2")).is_none());
    }
}
