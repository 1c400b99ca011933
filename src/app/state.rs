//! Observable state types.
//!
//! This module defines the read models presentation consumes: per-view state
//! structs, the aggregated [`Snapshot`], and the [`ChangeFeed`] that announces
//! every mutation. It also holds [`Latest`], the request bookkeeping that lets
//! each view accept only the response of its most recently issued request.

use crate::domain::{CharacterId, CharacterSummary};
use std::sync::Arc;
use tokio::sync::watch;

/// Search view state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchState {
    /// Current search term. Empty means "no query".
    pub term: String,
    /// Results of the latest applied search, replaced wholesale.
    pub results: Vec<CharacterSummary>,
    /// True while a search that will affect `results` is in flight.
    pub loading: bool,
    /// Message of the latest settled search, if it failed.
    pub error: Option<String>,
}

/// Favorites view state: full records for the favorite ids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FavoritesView {
    pub characters: Vec<CharacterSummary>,
    pub loading: bool,
    pub error: Option<String>,
}

/// Character details view state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetailState {
    pub character: Option<CharacterSummary>,
    pub loading: bool,
    pub error: Option<String>,
}

/// Point-in-time copy of everything presentation may read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    pub search: SearchState,
    pub favorite_ids: Vec<CharacterId>,
    pub favorites: FavoritesView,
    pub detail: DetailState,
    /// Change counter at the time the snapshot was taken.
    pub revision: u64,
}

impl Snapshot {
    #[must_use]
    pub fn is_favorite(&self, id: CharacterId) -> bool {
        self.favorite_ids.contains(&id)
    }

    /// Hint line for the search view, mirroring what a front end shows above
    /// the result list.
    ///
    /// # Example
    ///
    /// ```rust
    /// use character_finder::app::Snapshot;
    ///
    /// let snapshot = Snapshot::default();
    /// assert_eq!(snapshot.status_line().as_deref(), Some("Start typing to search for characters!"));
    /// ```
    #[must_use]
    pub fn status_line(&self) -> Option<String> {
        let search = &self.search;
        if search.loading {
            Some("Loading characters...".to_string())
        } else if let Some(error) = &search.error {
            Some(error.clone())
        } else if search.term.is_empty() {
            Some("Start typing to search for characters!".to_string())
        } else if search.results.is_empty() {
            Some(format!("No characters found for \"{}\".", search.term))
        } else {
            None
        }
    }
}

/// Broadcasts a revision number on every state change.
///
/// Cloning yields another handle to the same feed. Subscribers wait on
/// [`watch::Receiver::changed`] and then read a fresh snapshot.
#[derive(Debug, Clone)]
pub struct ChangeFeed {
    tx: Arc<watch::Sender<u64>>,
}

impl Default for ChangeFeed {
    fn default() -> Self {
        Self::new()
    }
}

impl ChangeFeed {
    #[must_use]
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(0);
        Self { tx: Arc::new(tx) }
    }

    /// Announces a change.
    pub fn bump(&self) {
        self.tx.send_modify(|revision| *revision = revision.wrapping_add(1));
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.tx.subscribe()
    }

    #[must_use]
    pub fn revision(&self) -> u64 {
        *self.tx.borrow()
    }
}

/// A view plus the ticket of the most recently issued request for it.
///
/// A response is applied only if its ticket is still the latest; anything
/// older has been superseded.
#[derive(Debug, Default)]
pub(crate) struct Latest<T> {
    pub(crate) view: T,
    issued: u64,
}

impl<T> Latest<T> {
    /// Issues a new ticket, superseding all earlier ones.
    pub(crate) fn begin(&mut self) -> u64 {
        self.issued = self.issued.wrapping_add(1);
        self.issued
    }

    pub(crate) const fn is_latest(&self, ticket: u64) -> bool {
        self.issued == ticket
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_line_follows_search_state() {
        let mut snapshot = Snapshot::default();
        snapshot.search.term = "Rick".to_string();
        assert_eq!(snapshot.status_line().as_deref(), Some("No characters found for \"Rick\"."));

        snapshot.search.loading = true;
        assert_eq!(snapshot.status_line().as_deref(), Some("Loading characters..."));

        snapshot.search.loading = false;
        snapshot.search.results.push(CharacterSummary::new(1, "Rick Sanchez"));
        assert_eq!(snapshot.status_line(), None);

        snapshot.search.error = Some("Failed to fetch characters. Please try again.".to_string());
        assert_eq!(
            snapshot.status_line().as_deref(),
            Some("Failed to fetch characters. Please try again.")
        );
    }

    #[test]
    fn latest_supersedes_older_tickets() {
        let mut slot: Latest<()> = Latest::default();
        let first = slot.begin();
        let second = slot.begin();
        assert!(!slot.is_latest(first));
        assert!(slot.is_latest(second));
    }

    #[tokio::test]
    async fn feed_notifies_subscribers() {
        let feed = ChangeFeed::new();
        let mut rx = feed.subscribe();
        feed.bump();
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow(), 1);
        assert_eq!(feed.revision(), 1);
    }
}
