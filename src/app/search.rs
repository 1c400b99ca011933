//! Debounced name search.
//!
//! [`SearchController`] turns keystrokes into at most one remote query per
//! quiet period and keeps only the most recent response authoritative.
//!
//! The flow has two stages:
//!
//! 1. **Scheduling** ([`SearchController::set_search_term`]): synchronous.
//!    Records the term and re-arms the debouncer.
//! 2. **Execution** ([`SearchController::run_search`]): async. Issues the
//!    request and applies the response only if it is still current.
//!
//! A response is current when its request is the latest one issued *and* its
//! term is still the search term. A response that lost only the term check
//! also clears the loading flag, since no newer request owns it.

use crate::app::debounce::Debouncer;
use crate::app::state::{ChangeFeed, Latest, SearchState};
use crate::catalog::CatalogClient;
use crate::domain::{CatalogError, CharacterSummary};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tracing::Instrument;

/// Default quiet period between the last keystroke and the request.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

/// Error shown when a search fails for any reason other than "no match".
pub const SEARCH_FAILED_MESSAGE: &str = "Failed to fetch characters. Please try again.";

/// Error shown when the catalog has no match for `term`.
#[must_use]
pub fn not_found_message(term: &str) -> String {
    format!("No characters found for \"{term}\".")
}

struct SearchCore {
    catalog: Arc<dyn CatalogClient>,
    state: Mutex<Latest<SearchState>>,
    feed: ChangeFeed,
}

impl SearchCore {
    fn lock(&self) -> MutexGuard<'_, Latest<SearchState>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    async fn run_search(&self, term: String) {
        if term.is_empty() {
            let mut slot = self.lock();
            if !slot.view.term.is_empty() {
                tracing::debug!("empty search superseded before it ran");
                return;
            }
            slot.view.results.clear();
            drop(slot);
            tracing::debug!("search cleared");
            self.feed.bump();
            return;
        }

        let ticket = {
            let mut slot = self.lock();
            let ticket = slot.begin();
            slot.view.loading = true;
            slot.view.error = None;
            ticket
        };
        self.feed.bump();

        tracing::debug!(ticket = ticket, "search request issued");
        let outcome = self.catalog.search_by_name(&term).await;
        self.apply(ticket, &term, outcome);
    }

    fn apply(&self, ticket: u64, term: &str, outcome: Result<Vec<CharacterSummary>, CatalogError>) {
        let mut slot = self.lock();

        if !slot.is_latest(ticket) {
            tracing::debug!(ticket = ticket, "discarding response superseded by a newer request");
            return;
        }
        if slot.view.term != term {
            tracing::debug!(current = %slot.view.term, "discarding response for a stale term");
            slot.view.loading = false;
            drop(slot);
            self.feed.bump();
            return;
        }

        let view = &mut slot.view;
        match outcome {
            Ok(results) => {
                tracing::debug!(count = results.len(), "search results applied");
                view.results = results;
                view.error = None;
            }
            Err(CatalogError::NotFound) => {
                tracing::debug!("search matched nothing");
                view.results.clear();
                view.error = Some(not_found_message(term));
            }
            Err(CatalogError::Transient(reason)) => {
                tracing::warn!(error = %reason, "search request failed");
                view.results.clear();
                view.error = Some(SEARCH_FAILED_MESSAGE.to_string());
            }
        }
        view.loading = false;
        drop(slot);
        self.feed.bump();
    }
}

/// Owns the search term, results, loading flag and error.
///
/// Requires a running tokio runtime (the debouncer spawns timer tasks).
pub struct SearchController {
    core: Arc<SearchCore>,
    debouncer: Debouncer<String>,
}

impl SearchController {
    /// Creates a controller whose requests go to `catalog` after `delay` of
    /// quiet. Every state change is announced on `feed`.
    pub fn new(catalog: Arc<dyn CatalogClient>, delay: Duration, feed: ChangeFeed) -> Self {
        let core = Arc::new(SearchCore {
            catalog,
            state: Mutex::new(Latest::default()),
            feed,
        });

        let worker = Arc::clone(&core);
        let debouncer = Debouncer::new(delay, move |term: String| {
            let core = Arc::clone(&worker);
            let span = tracing::debug_span!("debounced_search", term = %term);
            async move { core.run_search(term).await }.instrument(span)
        });

        Self { core, debouncer }
    }

    /// Replaces the search term and schedules a debounced search for it.
    ///
    /// Setting the term it already has is a no-op: scheduling is keyed by
    /// the term value, not by how often this is called.
    pub fn set_search_term(&self, term: impl Into<String>) {
        let term = term.into();
        {
            let mut slot = self.core.lock();
            if slot.view.term == term {
                tracing::trace!(term = %term, "search term unchanged");
                return;
            }
            slot.view.term.clone_from(&term);
        }
        tracing::trace!(term = %term, "search term updated");
        self.core.feed.bump();
        self.debouncer.trigger(term);
    }

    /// Execution stage: runs one search for `term` right now.
    ///
    /// This is what the debouncer invokes. It is public so the currency check
    /// can be driven directly, without timers.
    pub async fn run_search(&self, term: impl Into<String>) {
        self.core.run_search(term.into()).await;
    }

    #[must_use]
    pub fn state(&self) -> SearchState {
        self.core.lock().view.clone()
    }

    #[must_use]
    pub fn term(&self) -> String {
        self.core.lock().view.term.clone()
    }

    #[must_use]
    pub fn results(&self) -> Vec<CharacterSummary> {
        self.core.lock().view.results.clone()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.core.lock().view.loading
    }

    #[must_use]
    pub fn error(&self) -> Option<String> {
        self.core.lock().view.error.clone()
    }

    #[must_use]
    pub fn debounce_delay(&self) -> Duration {
        self.debouncer.delay()
    }
}

impl std::fmt::Debug for SearchController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchController")
            .field("state", &self.state())
            .field("debouncer", &self.debouncer)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ScriptedCatalog;
    use tokio::time::sleep;

    fn rick_results() -> Vec<CharacterSummary> {
        vec![
            CharacterSummary::new(1, "Rick Sanchez"),
            CharacterSummary::new(2, "Rick Sanchez Prime"),
        ]
    }

    fn controller(catalog: &Arc<ScriptedCatalog>) -> SearchController {
        let catalog: Arc<dyn CatalogClient> = Arc::clone(catalog) as Arc<dyn CatalogClient>;
        SearchController::new(catalog, DEFAULT_DEBOUNCE, ChangeFeed::new())
    }

    #[tokio::test(start_paused = true)]
    async fn rapid_edits_issue_one_request_for_final_term() {
        let catalog = Arc::new(ScriptedCatalog::new().with_search("Rick", Ok(rick_results())));
        let search = controller(&catalog);

        for term in ["R", "Ri", "Ric", "Rick"] {
            search.set_search_term(term);
            sleep(Duration::from_millis(120)).await;
        }
        assert!(catalog.searched_terms().is_empty());

        sleep(Duration::from_millis(600)).await;
        assert_eq!(catalog.searched_terms(), vec!["Rick".to_string()]);

        let state = search.state();
        assert_eq!(state.results, rick_results());
        assert!(!state.loading);
        assert_eq!(state.error, None);
    }

    #[tokio::test(start_paused = true)]
    async fn not_found_sets_message_and_clears_results() {
        let catalog = Arc::new(ScriptedCatalog::new().with_search("Rick", Ok(rick_results())));
        let search = controller(&catalog);

        search.set_search_term("Rick");
        sleep(Duration::from_millis(600)).await;
        assert_eq!(search.results().len(), 2);

        search.set_search_term("Zyx999");
        sleep(Duration::from_millis(600)).await;

        assert!(search.results().is_empty());
        assert_eq!(search.error().as_deref(), Some("No characters found for \"Zyx999\"."));
        assert!(!search.is_loading());
    }

    #[tokio::test(start_paused = true)]
    async fn transient_failure_sets_generic_message_and_recovers() {
        let catalog = Arc::new(
            ScriptedCatalog::new()
                .with_search("Rick", Err(CatalogError::Transient("502".to_string())))
                .with_search("Morty", Ok(vec![CharacterSummary::new(2, "Morty Smith")])),
        );
        let search = controller(&catalog);

        search.set_search_term("Rick");
        sleep(Duration::from_millis(600)).await;
        assert_eq!(search.error().as_deref(), Some(SEARCH_FAILED_MESSAGE));
        assert!(search.results().is_empty());

        search.set_search_term("Morty");
        sleep(Duration::from_millis(600)).await;
        assert_eq!(search.error(), None);
        assert_eq!(search.results()[0].name, "Morty Smith");
    }

    #[tokio::test(start_paused = true)]
    async fn empty_term_clears_results_without_request() {
        let catalog = Arc::new(ScriptedCatalog::new().with_search("Rick", Ok(rick_results())));
        let search = controller(&catalog);

        search.set_search_term("Rick");
        sleep(Duration::from_millis(600)).await;
        search.set_search_term("");
        sleep(Duration::from_millis(600)).await;

        assert!(search.results().is_empty());
        assert_eq!(catalog.searched_terms(), vec!["Rick".to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn empty_term_leaves_error_untouched() {
        let catalog = Arc::new(ScriptedCatalog::new());
        let search = controller(&catalog);

        search.set_search_term("nobody");
        sleep(Duration::from_millis(600)).await;
        search.set_search_term("");
        sleep(Duration::from_millis(600)).await;

        assert_eq!(search.error().as_deref(), Some("No characters found for \"nobody\"."));
    }

    #[tokio::test(start_paused = true)]
    async fn repeating_the_current_term_schedules_nothing() {
        let catalog = Arc::new(ScriptedCatalog::new().with_search("Rick", Ok(rick_results())));
        let search = controller(&catalog);

        search.set_search_term("Rick");
        sleep(Duration::from_millis(600)).await;
        search.set_search_term("Rick");
        search.set_search_term("Rick");
        sleep(Duration::from_millis(600)).await;

        assert_eq!(catalog.searched_terms().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn stale_response_is_not_applied() {
        let catalog = Arc::new(
            ScriptedCatalog::new()
                .with_search("Rick", Ok(rick_results()))
                .with_search_latency("Rick", Duration::from_secs(5))
                .with_search("Morty", Ok(vec![CharacterSummary::new(2, "Morty Smith")])),
        );
        let search = controller(&catalog);

        // Slow request for "Rick" is in flight when the user moves on.
        search.set_search_term("Rick");
        sleep(Duration::from_millis(600)).await;
        assert!(search.is_loading());

        search.set_search_term("Morty");
        sleep(Duration::from_millis(600)).await;
        assert_eq!(search.results()[0].name, "Morty Smith");
        assert!(!search.is_loading());

        sleep(Duration::from_secs(6)).await;
        assert_eq!(search.results()[0].name, "Morty Smith");
        assert_eq!(search.error(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn response_for_abandoned_term_clears_loading() {
        let catalog = Arc::new(
            ScriptedCatalog::new()
                .with_search("Rick", Ok(rick_results()))
                .with_search_latency("Rick", Duration::from_secs(2)),
        );
        let search = controller(&catalog);

        search.set_search_term("Rick");
        sleep(Duration::from_millis(600)).await;
        assert!(search.is_loading());

        // Clearing the term issues no request of its own.
        search.set_search_term("");
        sleep(Duration::from_millis(600)).await;
        assert!(search.results().is_empty());

        sleep(Duration::from_secs(2)).await;
        assert!(!search.is_loading());
        assert!(search.results().is_empty());
        assert_eq!(catalog.searched_terms(), vec!["Rick".to_string()]);
    }

    #[tokio::test]
    async fn execution_stage_checks_currency_in_isolation() {
        let catalog = Arc::new(ScriptedCatalog::new().with_search("Rick", Ok(rick_results())));
        let search = controller(&catalog);

        // The term was never set to "Rick", so the response is stale.
        search.run_search("Rick").await;
        assert!(search.results().is_empty());
        assert!(!search.is_loading());
        assert_eq!(catalog.searched_terms(), vec!["Rick".to_string()]);
    }
}
