//! The state controller: single source of truth for presentation.
//!
//! [`StateController`] composes the debounced search, the persisted favorites
//! set and the two record views (favorites and character details) behind one
//! cloneable handle. Every mutation bumps a shared [`ChangeFeed`] so a
//! subscriber can re-read a [`Snapshot`] whenever something changed.
//!
//! All state sits behind `std::sync::Mutex`es that are never held across an
//! `.await`; remote calls run with no lock taken.

use crate::app::favorites::{FavoritesStore, ToggleOutcome};
use crate::app::search::SearchController;
use crate::app::state::{ChangeFeed, DetailState, FavoritesView, Latest, SearchState, Snapshot};
use crate::catalog::CatalogClient;
use crate::domain::{CharacterId, CharacterSummary};
use crate::storage::KeyValueStore;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::sync::watch;

/// Error shown when the favorites records cannot be fetched.
pub const FAVORITES_FAILED_MESSAGE: &str =
    "Failed to load favorite characters. Some characters might have been removed from the API.";

/// Error shown when a single character cannot be fetched.
pub const DETAIL_FAILED_MESSAGE: &str = "Failed to load character details. Character might not exist.";

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

struct Inner {
    catalog: Arc<dyn CatalogClient>,
    search: SearchController,
    favorites: Mutex<FavoritesStore>,
    favorites_view: Mutex<Latest<FavoritesView>>,
    detail: Mutex<Latest<DetailState>>,
    feed: ChangeFeed,
}

/// Cloneable handle to the application state.
///
/// Requires a running tokio runtime.
///
/// # Example
///
/// ```rust
/// use character_finder::app::StateController;
/// use character_finder::catalog::ScriptedCatalog;
/// use character_finder::domain::CharacterSummary;
/// use character_finder::storage::MemoryStore;
/// use std::sync::Arc;
/// use std::time::Duration;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let catalog = ScriptedCatalog::new().with_record(CharacterSummary::new(1, "Rick Sanchez"));
/// let controller = StateController::new(
///     Arc::new(catalog),
///     Box::new(MemoryStore::default()),
///     Duration::from_millis(10),
/// );
///
/// controller.toggle_favorite(1);
/// controller.load_favorites().await;
/// assert_eq!(controller.favorites_view().characters[0].name, "Rick Sanchez");
/// # }
/// ```
#[derive(Clone)]
pub struct StateController {
    inner: Arc<Inner>,
}

impl StateController {
    /// Builds the controller, restoring favorites from `store`.
    pub fn new(catalog: Arc<dyn CatalogClient>, store: Box<dyn KeyValueStore>, debounce: Duration) -> Self {
        let feed = ChangeFeed::new();
        let search = SearchController::new(Arc::clone(&catalog), debounce, feed.clone());
        let favorites = FavoritesStore::load(store);

        tracing::debug!(
            debounce = ?search.debounce_delay(),
            favorites = favorites.len(),
            "state controller ready"
        );

        Self {
            inner: Arc::new(Inner {
                catalog,
                search,
                favorites: Mutex::new(favorites),
                favorites_view: Mutex::new(Latest::default()),
                detail: Mutex::new(Latest::default()),
                feed,
            }),
        }
    }

    // Search

    #[must_use]
    pub fn search_term(&self) -> String {
        self.inner.search.term()
    }

    /// Replaces the search term; the search itself runs after the debounce
    /// period.
    pub fn set_search_term(&self, term: impl Into<String>) {
        self.inner.search.set_search_term(term);
    }

    #[must_use]
    pub fn search_results(&self) -> Vec<CharacterSummary> {
        self.inner.search.results()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.inner.search.is_loading()
    }

    #[must_use]
    pub fn error(&self) -> Option<String> {
        self.inner.search.error()
    }

    #[must_use]
    pub fn search_state(&self) -> SearchState {
        self.inner.search.state()
    }

    /// Quiet period applied to search term edits.
    #[must_use]
    pub fn debounce_delay(&self) -> Duration {
        self.inner.search.debounce_delay()
    }

    // Favorites

    #[must_use]
    pub fn favorite_ids(&self) -> Vec<CharacterId> {
        lock(&self.inner.favorites).ids().to_vec()
    }

    #[must_use]
    pub fn is_favorite(&self, id: CharacterId) -> bool {
        lock(&self.inner.favorites).is_favorite(id)
    }

    /// Adds or removes `id` from the favorites set.
    ///
    /// The change is persisted before this returns. Check
    /// [`ToggleOutcome::notice`] for the capacity message.
    pub fn toggle_favorite(&self, id: CharacterId) -> ToggleOutcome {
        let outcome = lock(&self.inner.favorites).toggle(id);
        if outcome != ToggleOutcome::CapacityExceeded {
            self.inner.feed.bump();
        }
        outcome
    }

    /// Fetches full records for the current favorite ids in one request.
    ///
    /// With no favorites the view is emptied without contacting the catalog.
    /// A response is dropped if another load started meanwhile or the
    /// favorites set changed under it.
    pub async fn load_favorites(&self) {
        let ids = self.favorite_ids();

        if ids.is_empty() {
            {
                let mut slot = lock(&self.inner.favorites_view);
                slot.begin();
                slot.view = FavoritesView::default();
            }
            tracing::debug!("no favorites to load");
            self.inner.feed.bump();
            return;
        }

        let ticket = {
            let mut slot = lock(&self.inner.favorites_view);
            let ticket = slot.begin();
            slot.view.loading = true;
            slot.view.error = None;
            ticket
        };
        self.inner.feed.bump();
        tracing::debug!(count = ids.len(), ticket = ticket, "favorites request issued");

        let outcome = self.inner.catalog.get_by_ids(&ids).await;

        let current = self.favorite_ids();
        {
            let mut slot = lock(&self.inner.favorites_view);
            if !slot.is_latest(ticket) {
                tracing::debug!(ticket = ticket, "discarding superseded favorites response");
                return;
            }
            let view = &mut slot.view;
            view.loading = false;
            if current != ids {
                tracing::debug!("favorites changed while loading, discarding response");
                view.characters.clear();
            } else {
                match outcome {
                    Ok(characters) => {
                        tracing::debug!(count = characters.len(), "favorites loaded");
                        view.characters = characters;
                        view.error = None;
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "failed to load favorites");
                        view.characters.clear();
                        view.error = Some(FAVORITES_FAILED_MESSAGE.to_string());
                    }
                }
            }
        }
        self.inner.feed.bump();
    }

    #[must_use]
    pub fn favorites_view(&self) -> FavoritesView {
        lock(&self.inner.favorites_view).view.clone()
    }

    // Details

    /// Fetches one character into the details view.
    ///
    /// Only the most recent call's response is applied.
    pub async fn load_character(&self, id: CharacterId) {
        let ticket = {
            let mut slot = lock(&self.inner.detail);
            let ticket = slot.begin();
            slot.view = DetailState {
                character: None,
                loading: true,
                error: None,
            };
            ticket
        };
        self.inner.feed.bump();
        tracing::debug!(id = id, ticket = ticket, "character lookup issued");

        let outcome = self.inner.catalog.get_by_id(id).await;

        {
            let mut slot = lock(&self.inner.detail);
            if !slot.is_latest(ticket) {
                tracing::debug!(id = id, "discarding superseded character response");
                return;
            }
            let view = &mut slot.view;
            view.loading = false;
            match outcome {
                Ok(character) => view.character = Some(character),
                Err(e) => {
                    tracing::warn!(id = id, error = %e, "failed to load character");
                    view.error = Some(DETAIL_FAILED_MESSAGE.to_string());
                }
            }
        }
        self.inner.feed.bump();
    }

    #[must_use]
    pub fn detail(&self) -> DetailState {
        lock(&self.inner.detail).view.clone()
    }

    // Observation

    /// Consistent-enough copy of every view, tagged with the current revision.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        let revision = self.inner.feed.revision();
        Snapshot {
            search: self.search_state(),
            favorite_ids: self.favorite_ids(),
            favorites: self.favorites_view(),
            detail: self.detail(),
            revision,
        }
    }

    /// Receiver that is notified with a new revision after every change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.inner.feed.subscribe()
    }
}

impl std::fmt::Debug for StateController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateController")
            .field("search", &self.inner.search)
            .field("favorites", &self.favorite_ids())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::favorites::{CAPACITY_NOTICE, FAVORITES_KEY};
    use crate::app::search::DEFAULT_DEBOUNCE;
    use crate::catalog::{CatalogCall, ScriptedCatalog};
    use crate::domain::CatalogError;
    use crate::storage::MemoryStore;
    use tokio::time::sleep;

    fn build(catalog: &Arc<ScriptedCatalog>, store: &MemoryStore) -> StateController {
        let catalog: Arc<dyn CatalogClient> = Arc::clone(catalog) as Arc<dyn CatalogClient>;
        StateController::new(catalog, Box::new(store.clone()), DEFAULT_DEBOUNCE)
    }

    fn cast() -> ScriptedCatalog {
        ScriptedCatalog::new()
            .with_record(CharacterSummary::new(1, "Rick Sanchez"))
            .with_record(CharacterSummary::new(2, "Morty Smith"))
            .with_record(CharacterSummary::new(3, "Summer Smith"))
    }

    #[tokio::test]
    async fn favorites_are_restored_and_persisted() {
        let store = MemoryStore::with_entry(FAVORITES_KEY, "[1,2,3,4]");
        let catalog = Arc::new(cast());
        let controller = build(&catalog, &store);
        assert_eq!(controller.favorite_ids(), vec![1, 2, 3, 4]);

        let outcome = controller.toggle_favorite(5);
        assert_eq!(outcome.notice(), Some(CAPACITY_NOTICE));
        assert_eq!(controller.favorite_ids(), vec![1, 2, 3, 4]);

        controller.toggle_favorite(2);
        assert!(!controller.is_favorite(2));
        assert_eq!(store.get(FAVORITES_KEY).unwrap().as_deref(), Some("[1,3,4]"));

        let reopened = build(&catalog, &store);
        assert_eq!(reopened.favorite_ids(), vec![1, 3, 4]);
    }

    #[tokio::test]
    async fn empty_favorites_load_without_request() {
        let catalog = Arc::new(cast());
        let controller = build(&catalog, &MemoryStore::default());

        controller.load_favorites().await;

        let view = controller.favorites_view();
        assert!(view.characters.is_empty());
        assert!(!view.loading);
        assert_eq!(view.error, None);
        assert!(catalog.calls().is_empty());
    }

    #[tokio::test]
    async fn favorites_load_in_one_batch() {
        let store = MemoryStore::with_entry(FAVORITES_KEY, "[2,1]");
        let catalog = Arc::new(cast());
        let controller = build(&catalog, &store);

        controller.load_favorites().await;

        assert_eq!(catalog.calls(), vec![CatalogCall::GetByIds(vec![2, 1])]);
        let names: Vec<_> = controller
            .favorites_view()
            .characters
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["Morty Smith", "Rick Sanchez"]);
    }

    #[tokio::test]
    async fn favorites_failure_sets_message() {
        let store = MemoryStore::with_entry(FAVORITES_KEY, "[1]");
        let catalog = Arc::new(cast().with_lookup_failure(CatalogError::Transient("timeout".to_string())));
        let controller = build(&catalog, &store);

        controller.load_favorites().await;

        let view = controller.favorites_view();
        assert!(view.characters.is_empty());
        assert!(!view.loading);
        assert_eq!(view.error.as_deref(), Some(FAVORITES_FAILED_MESSAGE));
    }

    #[tokio::test(start_paused = true)]
    async fn favorites_response_dropped_when_set_changes() {
        let store = MemoryStore::with_entry(FAVORITES_KEY, "[1,2]");
        let catalog = Arc::new(cast().with_lookup_latency(Duration::from_secs(1)));
        let controller = build(&catalog, &store);

        let loader = controller.clone();
        let load = tokio::spawn(async move { loader.load_favorites().await });
        sleep(Duration::from_millis(100)).await;
        assert!(controller.favorites_view().loading);

        controller.toggle_favorite(3);
        load.await.unwrap();

        let view = controller.favorites_view();
        assert!(!view.loading);
        assert!(view.characters.is_empty());

        controller.load_favorites().await;
        assert_eq!(controller.favorites_view().characters.len(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn stale_favorites_are_cleared_when_set_changes_mid_load() {
        let store = MemoryStore::with_entry(FAVORITES_KEY, "[1,2]");
        let catalog = Arc::new(cast().with_lookup_latency(Duration::from_secs(1)));
        let controller = build(&catalog, &store);

        controller.load_favorites().await;
        assert_eq!(controller.favorites_view().characters.len(), 2);

        let loader = controller.clone();
        let load = tokio::spawn(async move { loader.load_favorites().await });
        sleep(Duration::from_millis(100)).await;

        controller.toggle_favorite(1);
        load.await.unwrap();

        let view = controller.favorites_view();
        assert!(!view.loading);
        assert!(view.characters.is_empty());
    }

    #[tokio::test]
    async fn debounce_comes_from_construction() {
        let controller = StateController::new(
            Arc::new(cast()),
            Box::new(MemoryStore::default()),
            Duration::from_millis(250),
        );
        assert_eq!(controller.debounce_delay(), Duration::from_millis(250));
    }

    #[tokio::test]
    async fn character_details_load() {
        let catalog = Arc::new(cast());
        let controller = build(&catalog, &MemoryStore::default());

        controller.load_character(3).await;
        let detail = controller.detail();
        assert_eq!(detail.character.map(|c| c.name).as_deref(), Some("Summer Smith"));
        assert!(!detail.loading);

        controller.load_character(99).await;
        let detail = controller.detail();
        assert_eq!(detail.character, None);
        assert_eq!(detail.error.as_deref(), Some(DETAIL_FAILED_MESSAGE));
    }

    #[tokio::test(start_paused = true)]
    async fn only_latest_detail_response_applies() {
        let catalog = Arc::new(cast().with_lookup_latency(Duration::from_secs(1)));
        let controller = build(&catalog, &MemoryStore::default());

        let first = controller.clone();
        let slow = tokio::spawn(async move { first.load_character(1).await });
        sleep(Duration::from_millis(10)).await;

        let second = controller.clone();
        let fast = tokio::spawn(async move { second.load_character(2).await });

        slow.await.unwrap();
        fast.await.unwrap();
        assert_eq!(controller.detail().character.map(|c| c.id), Some(2));
    }

    #[tokio::test(start_paused = true)]
    async fn snapshot_tracks_search_and_favorites() {
        let catalog = Arc::new(cast().with_search("Rick", Ok(vec![CharacterSummary::new(1, "Rick Sanchez")])));
        let controller = build(&catalog, &MemoryStore::default());
        let mut changes = controller.subscribe();

        controller.set_search_term("Rick");
        assert!(changes.has_changed().unwrap());
        changes.borrow_and_update();

        sleep(Duration::from_millis(600)).await;
        controller.toggle_favorite(1);

        let snapshot = controller.snapshot();
        assert_eq!(snapshot.search.term, "Rick");
        assert_eq!(snapshot.search.results.len(), 1);
        assert!(snapshot.is_favorite(1));
        assert_eq!(snapshot.status_line(), None);
        assert_eq!(snapshot.revision, *changes.borrow_and_update());
    }
}
