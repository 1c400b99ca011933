//! Scripted in-memory catalog for tests and offline demos.
//!
//! Responses are registered up front; every call is recorded so tests can
//! assert on how many requests the controller actually issued. Optional
//! per-term latency (driven by `tokio::time`) makes out-of-order completion
//! reproducible under a paused clock.

use crate::catalog::client::CatalogClient;
use crate::domain::{CatalogError, CharacterId, CharacterSummary};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

/// One recorded call against a [`ScriptedCatalog`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogCall {
    SearchByName(String),
    GetById(CharacterId),
    GetByIds(Vec<CharacterId>),
}

/// Catalog double with canned answers.
///
/// Unscripted search terms and unknown ids answer [`CatalogError::NotFound`].
/// Batched lookups skip unknown ids, as the real catalog does.
///
/// # Examples
///
/// ```
/// use character_finder::catalog::{CatalogClient, ScriptedCatalog};
/// use character_finder::domain::CharacterSummary;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let catalog = ScriptedCatalog::new()
///     .with_search("Rick", Ok(vec![CharacterSummary::new(1, "Rick Sanchez")]));
/// let found = catalog.search_by_name("Rick").await.unwrap();
/// assert_eq!(found[0].id, 1);
/// assert_eq!(catalog.calls().len(), 1);
/// # }
/// ```
#[derive(Debug, Default)]
pub struct ScriptedCatalog {
    searches: Mutex<HashMap<String, Result<Vec<CharacterSummary>, CatalogError>>>,
    search_latency: Mutex<HashMap<String, Duration>>,
    records: Mutex<HashMap<CharacterId, CharacterSummary>>,
    lookup_failure: Mutex<Option<CatalogError>>,
    lookup_latency: Mutex<Duration>,
    calls: Mutex<Vec<CatalogCall>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl ScriptedCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the answer for a name search.
    #[must_use]
    pub fn with_search(
        self,
        term: impl Into<String>,
        answer: Result<Vec<CharacterSummary>, CatalogError>,
    ) -> Self {
        lock(&self.searches).insert(term.into(), answer);
        self
    }

    /// Delays the answer for `term` by `latency`.
    #[must_use]
    pub fn with_search_latency(self, term: impl Into<String>, latency: Duration) -> Self {
        lock(&self.search_latency).insert(term.into(), latency);
        self
    }

    /// Registers a record for id lookups.
    #[must_use]
    pub fn with_record(self, record: CharacterSummary) -> Self {
        lock(&self.records).insert(record.id, record);
        self
    }

    /// Delays every id lookup by `latency`.
    #[must_use]
    pub fn with_lookup_latency(self, latency: Duration) -> Self {
        *lock(&self.lookup_latency) = latency;
        self
    }

    /// Makes every id lookup fail with `error`.
    #[must_use]
    pub fn with_lookup_failure(self, error: CatalogError) -> Self {
        *lock(&self.lookup_failure) = Some(error);
        self
    }

    /// All calls received so far, in arrival order.
    pub fn calls(&self) -> Vec<CatalogCall> {
        lock(&self.calls).clone()
    }

    /// Terms of all name searches received so far.
    pub fn searched_terms(&self) -> Vec<String> {
        lock(&self.calls)
            .iter()
            .filter_map(|call| match call {
                CatalogCall::SearchByName(term) => Some(term.clone()),
                _ => None,
            })
            .collect()
    }

    fn record_call(&self, call: CatalogCall) {
        lock(&self.calls).push(call);
    }

    async fn lookup_delay(&self) -> Result<(), CatalogError> {
        let latency = *lock(&self.lookup_latency);
        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }
        match lock(&self.lookup_failure).clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl CatalogClient for ScriptedCatalog {
    async fn search_by_name(&self, name: &str) -> Result<Vec<CharacterSummary>, CatalogError> {
        self.record_call(CatalogCall::SearchByName(name.to_string()));

        let latency = lock(&self.search_latency).get(name).copied();
        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }

        lock(&self.searches)
            .get(name)
            .cloned()
            .unwrap_or(Err(CatalogError::NotFound))
    }

    async fn get_by_id(&self, id: CharacterId) -> Result<CharacterSummary, CatalogError> {
        self.record_call(CatalogCall::GetById(id));
        self.lookup_delay().await?;
        lock(&self.records).get(&id).cloned().ok_or(CatalogError::NotFound)
    }

    async fn get_by_ids(&self, ids: &[CharacterId]) -> Result<Vec<CharacterSummary>, CatalogError> {
        self.record_call(CatalogCall::GetByIds(ids.to_vec()));
        self.lookup_delay().await?;
        let records = lock(&self.records);
        Ok(ids.iter().filter_map(|id| records.get(id).cloned()).collect())
    }
}
