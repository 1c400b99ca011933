//! Capacity-limited, persisted favorites set.
//!
//! [`FavoritesStore`] owns the ordered set of favorite ids. It is restored once
//! from the durable key-value store at construction and written back in full
//! after every accepted toggle, before the caller can observe the new set.

use crate::domain::CharacterId;
use crate::storage::KeyValueStore;
use serde::Deserialize;

/// Key under which the favorites payload is persisted.
pub const FAVORITES_KEY: &str = "favoriteCharacterIds";

/// Maximum number of favorites.
pub const MAX_FAVORITES: usize = 4;

/// Notice returned when an addition is rejected because the set is full.
pub const CAPACITY_NOTICE: &str = "You can't add more than 4 favorite characters!";

/// Result of [`FavoritesStore::toggle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// The id was appended.
    Added,
    /// The id was a member and has been removed.
    Removed,
    /// The set is full; nothing changed.
    CapacityExceeded,
}

impl ToggleOutcome {
    /// User-facing notice for this outcome, if any.
    #[must_use]
    pub const fn notice(self) -> Option<&'static str> {
        match self {
            Self::CapacityExceeded => Some(CAPACITY_NOTICE),
            Self::Added | Self::Removed => None,
        }
    }
}

/// Persisted id, accepted either as a number or as a numeric string.
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredId {
    Number(CharacterId),
    Text(String),
}

/// Ordered set of unique favorite ids, at most [`MAX_FAVORITES`] long.
pub struct FavoritesStore {
    ids: Vec<CharacterId>,
    store: Box<dyn KeyValueStore>,
}

impl FavoritesStore {
    /// Restores the set from `store`.
    ///
    /// A missing, unreadable or malformed value yields an empty set; this never
    /// fails. Duplicates are dropped and the set is cut to capacity so the
    /// invariants hold even for a hand-edited payload.
    ///
    /// # Example
    ///
    /// ```rust
    /// use character_finder::app::FavoritesStore;
    /// use character_finder::storage::MemoryStore;
    ///
    /// let favorites = FavoritesStore::load(Box::new(MemoryStore::with_entry("favoriteCharacterIds", "[3,1]")));
    /// assert_eq!(favorites.ids(), &[3, 1]);
    /// ```
    pub fn load(store: Box<dyn KeyValueStore>) -> Self {
        let ids = match store.get(FAVORITES_KEY) {
            Ok(Some(raw)) => Self::parse(&raw),
            Ok(None) => {
                tracing::debug!("no stored favorites");
                Vec::new()
            }
            Err(e) => {
                tracing::debug!(error = %e, "failed to read stored favorites, starting empty");
                Vec::new()
            }
        };

        tracing::debug!(count = ids.len(), "favorites restored");
        Self { ids, store }
    }

    fn parse(raw: &str) -> Vec<CharacterId> {
        let stored: Vec<StoredId> = match serde_json::from_str(raw) {
            Ok(stored) => stored,
            Err(e) => {
                tracing::debug!(error = %e, "stored favorites are malformed, starting empty");
                return Vec::new();
            }
        };

        let mut ids = Vec::with_capacity(MAX_FAVORITES);
        for entry in stored {
            let id = match entry {
                StoredId::Number(id) => Some(id),
                StoredId::Text(text) => text.trim().parse().ok(),
            };
            let Some(id) = id else {
                tracing::debug!("skipping non-numeric stored favorite");
                continue;
            };
            if !ids.contains(&id) && ids.len() < MAX_FAVORITES {
                ids.push(id);
            }
        }
        ids
    }

    /// Adds `id` if absent, removes it if present.
    ///
    /// An addition to a full set is rejected with
    /// [`ToggleOutcome::CapacityExceeded`] and leaves the set untouched.
    /// Accepted changes are persisted before this returns; a failed write is
    /// logged and the in-memory set stays authoritative.
    pub fn toggle(&mut self, id: CharacterId) -> ToggleOutcome {
        let _span = tracing::debug_span!("toggle_favorite", id = id, count = self.ids.len()).entered();

        let outcome = if let Some(position) = self.ids.iter().position(|&member| member == id) {
            self.ids.remove(position);
            ToggleOutcome::Removed
        } else if self.ids.len() < MAX_FAVORITES {
            self.ids.push(id);
            ToggleOutcome::Added
        } else {
            tracing::info!(limit = MAX_FAVORITES, "favorite rejected, set is full");
            return ToggleOutcome::CapacityExceeded;
        };

        self.persist();
        tracing::debug!(outcome = ?outcome, count = self.ids.len(), "favorites updated");
        outcome
    }

    #[must_use]
    pub fn is_favorite(&self, id: CharacterId) -> bool {
        self.ids.contains(&id)
    }

    #[must_use]
    pub fn ids(&self) -> &[CharacterId] {
        &self.ids
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    fn persist(&mut self) {
        let payload = match serde_json::to_string(&self.ids) {
            Ok(payload) => payload,
            Err(e) => {
                tracing::warn!(error = %e, "failed to encode favorites");
                return;
            }
        };
        if let Err(e) = self.store.set(FAVORITES_KEY, &payload) {
            tracing::warn!(error = %e, "failed to persist favorites, keeping in-memory set");
        }
    }
}

impl std::fmt::Debug for FavoritesStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FavoritesStore")
            .field("ids", &self.ids)
            .finish_non_exhaustive()
    }
}
