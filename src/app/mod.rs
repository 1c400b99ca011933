//! Application layer: state, search, favorites and command handling.
//!
//! This layer sits between the front end (main.rs) and the catalog/storage
//! layers. Presentation never talks to the catalog directly; it reads
//! snapshots from the [`StateController`] and feeds it commands.
//!
//! # Architecture
//!
//! ```text
//! Input line → Command → handle_command → State mutations → Actions → Loads
//!                                              │
//!                        ChangeFeed ← bump ────┘   → Snapshot → render
//! ```
//!
//! # Modules
//!
//! - [`controller`]: [`StateController`], the composition root and single source of truth
//! - [`search`]: debounced search with latest-response-wins
//! - [`debounce`]: generic trailing-edge debouncer
//! - [`favorites`]: capacity-limited persisted favorites set
//! - [`state`]: observable view states, snapshots and the change feed
//! - [`handler`]: input parsing and dispatch
//! - [`actions`]: side effects for the front end to execute
//! - [`modes`]: which view is showing
//!
//! # Example
//!
//! ```rust
//! use character_finder::app::{handle_command, Action, Command, StateController, ViewMode};
//! use character_finder::catalog::ScriptedCatalog;
//! use character_finder::storage::MemoryStore;
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let controller = StateController::new(
//!     Arc::new(ScriptedCatalog::new()),
//!     Box::new(MemoryStore::default()),
//!     Duration::from_millis(500),
//! );
//! let mut view = ViewMode::default();
//!
//! let (_, actions) = handle_command(&controller, &mut view, &Command::parse(":favs")?);
//! assert_eq!(actions, vec![Action::LoadFavorites]);
//! # Ok(())
//! # }
//! ```

pub mod actions;
pub mod controller;
pub mod debounce;
pub mod favorites;
pub mod handler;
pub mod modes;
pub mod search;
pub mod state;

pub use actions::Action;
pub use controller::StateController;
pub use debounce::Debouncer;
pub use favorites::{FavoritesStore, ToggleOutcome};
pub use handler::{handle_command, Command};
pub use modes::ViewMode;
pub use search::SearchController;
pub use state::{ChangeFeed, DetailState, FavoritesView, SearchState, Snapshot};
