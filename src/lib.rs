//! Character Finder: debounced search over a remote character catalog with a
//! small, persisted favorites set.
//!
//! The crate provides:
//! - Debounced name search where only the latest response is ever applied
//! - A favorites set capped at four entries, persisted after every change
//! - Favorites and character detail views loaded from the catalog
//! - A change feed so any front end can redraw from consistent snapshots
//! - A line-oriented terminal front end (`character-finder` binary)

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Terminal front end (main.rs)                       │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │
//! │  - StateController (single source of truth)         │
//! │  - Debounced search, favorites, detail views        │
//! │  - Command handling                                 │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Storage Layer │   │ Catalog Layer │
//! │ (ui/)         │   │ (storage/)    │   │ (catalog/)    │
//! │ - View models │   │ - Key-value   │   │ - Client port │
//! │ - Rendering   │   │ - JSON file   │   │ - HTTP client │
//! │ - Theming     │   │ - In-memory   │   │ - Scripted    │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                    │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Infrastructure & Domain Layers                     │
//! │  - Data/config paths (infrastructure/)              │
//! │  - Character model, errors (domain/)                │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │  ← Optional
//! │  - OpenTelemetry tracing, file-based OTLP export    │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Configuration
//!
//! Settings come from defaults, a TOML file, or a flat key/value map:
//!
//! ```toml
//! # ~/.config/character-finder/config.toml
//! api_base_url = "https://rickandmortyapi.com/api"
//! debounce_ms = 500
//! request_timeout_secs = 10
//! data_dir = "~/.local/share/character-finder"
//! theme = "catppuccin-mocha"
//! trace_level = "debug"
//! ```
//!
//! # Example
//!
//! ```rust
//! use character_finder::app::StateController;
//! use character_finder::catalog::ScriptedCatalog;
//! use character_finder::domain::CharacterSummary;
//! use character_finder::storage::MemoryStore;
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let catalog = ScriptedCatalog::new()
//!     .with_search("Rick", Ok(vec![CharacterSummary::new(1, "Rick Sanchez")]));
//! let controller = StateController::new(
//!     Arc::new(catalog),
//!     Box::new(MemoryStore::default()),
//!     Duration::from_millis(20),
//! );
//!
//! controller.set_search_term("Rick");
//! tokio::time::sleep(Duration::from_millis(100)).await;
//! assert_eq!(controller.search_results()[0].name, "Rick Sanchez");
//! # }
//! ```

pub mod app;
pub mod catalog;
pub mod domain;
pub mod infrastructure;
pub mod storage;

pub mod ui;

pub mod observability;

pub use app::{handle_command, Action, Command, Snapshot, StateController, ViewMode};
pub use domain::{CatalogError, CharacterId, CharacterSummary, FinderError, Result};
pub use ui::Theme;

use catalog::HttpCatalogClient;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use storage::{JsonFileStore, KeyValueStore, MemoryStore};

/// Default catalog endpoint.
pub const DEFAULT_API_BASE_URL: &str = "https://rickandmortyapi.com/api";

/// Application settings.
///
/// Every field has a default, so a settings file only needs the keys it
/// changes.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the character catalog API, without trailing slash.
    pub api_base_url: String,

    /// Directory for the favorites store and trace file.
    ///
    /// `~` is expanded. Default: `$XDG_DATA_HOME/character-finder` or
    /// `~/.local/share/character-finder`.
    pub data_dir: Option<String>,

    /// Quiet period between the last search edit and the request.
    pub debounce_ms: u64,

    /// Per-request timeout for catalog calls.
    pub request_timeout_secs: u64,

    /// Tracing filter, e.g. `info` or `character_finder=debug`.
    pub trace_level: Option<String>,

    /// Built-in theme name: `catppuccin-mocha`, `catppuccin-latte`, `plain`.
    pub theme: Option<String>,

    /// Path to a custom TOML theme. Takes precedence over `theme`.
    pub theme_file: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            data_dir: None,
            debounce_ms: 500,
            request_timeout_secs: 10,
            trace_level: None,
            theme: None,
            theme_file: None,
        }
    }
}

impl Config {
    /// Parses settings from a flat key/value map.
    ///
    /// Parsing is lenient: unknown keys are ignored and values that fail to
    /// parse keep their default.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use character_finder::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("debounce_ms".to_string(), "250".to_string());
    /// map.insert("request_timeout_secs".to_string(), "soon".to_string());
    ///
    /// let config = Config::from_map(&map);
    /// assert_eq!(config.debounce_ms, 250);
    /// assert_eq!(config.request_timeout_secs, 10);
    /// ```
    #[must_use]
    pub fn from_map(map: &BTreeMap<String, String>) -> Self {
        let defaults = Self::default();
        let text = |key: &str| {
            map.get(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let number = |key: &str, fallback: u64| {
            text(key).and_then(|v| v.parse::<u64>().ok()).unwrap_or(fallback)
        };

        Self {
            api_base_url: text("api_base_url").unwrap_or(defaults.api_base_url),
            data_dir: text("data_dir"),
            debounce_ms: number("debounce_ms", defaults.debounce_ms),
            request_timeout_secs: number("request_timeout_secs", defaults.request_timeout_secs),
            trace_level: text("trace_level"),
            theme: text("theme"),
            theme_file: text("theme_file"),
        }
    }

    /// Reads settings from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`FinderError::Io`] if the file cannot be read and
    /// [`FinderError::Config`] if it is not valid settings TOML.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        toml::from_str(&contents)
            .map_err(|e| FinderError::Config(format!("{}: {e}", path.display())))
    }

    /// Overlays `map` on top of `self`: only keys present and parseable in
    /// `map` replace the current values.
    #[must_use]
    pub fn merged_with(mut self, map: &BTreeMap<String, String>) -> Self {
        let parsed = Self::from_map(map);
        if map.get("api_base_url").is_some_and(|v| !v.trim().is_empty()) {
            self.api_base_url = parsed.api_base_url;
        }
        if map.get("debounce_ms").is_some_and(|v| v.trim().parse::<u64>().is_ok()) {
            self.debounce_ms = parsed.debounce_ms;
        }
        if map.get("request_timeout_secs").is_some_and(|v| v.trim().parse::<u64>().is_ok()) {
            self.request_timeout_secs = parsed.request_timeout_secs;
        }
        self.data_dir = parsed.data_dir.or(self.data_dir);
        self.trace_level = parsed.trace_level.or(self.trace_level);
        self.theme = parsed.theme.or(self.theme);
        self.theme_file = parsed.theme_file.or(self.theme_file);
        self
    }

    #[must_use]
    pub const fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Data directory after applying the override and XDG fallbacks.
    #[must_use]
    pub fn resolved_data_dir(&self) -> PathBuf {
        infrastructure::data_dir_from_env(self.data_dir.as_deref())
    }

    /// Location of the persisted key-value store.
    #[must_use]
    pub fn store_path(&self) -> PathBuf {
        self.resolved_data_dir().join(infrastructure::STORE_FILE)
    }

    /// Theme from `theme_file`, else `theme`, else the default. Failures fall
    /// back to the default theme.
    #[must_use]
    pub fn load_theme(&self) -> Theme {
        if let Some(file) = &self.theme_file {
            match Theme::from_file(file) {
                Ok(theme) => return theme,
                Err(e) => tracing::warn!(theme_file = %file, error = %e, "failed to load theme file, using default"),
            }
        }
        if let Some(name) = &self.theme {
            match Theme::from_name(name) {
                Some(theme) => return theme,
                None => tracing::warn!(theme = %name, "unknown theme, using default"),
            }
        }
        Theme::default()
    }
}

/// Opens the durable store, degrading to an in-memory store if the data
/// directory is unusable.
fn open_store(path: PathBuf) -> Box<dyn KeyValueStore> {
    match JsonFileStore::open(path.clone()) {
        Ok(store) => {
            tracing::debug!(path = %store.path().display(), "opened favorites store");
            Box::new(store)
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "store unavailable, favorites will not persist");
            Box::new(MemoryStore::default())
        }
    }
}

/// Builds a [`StateController`] wired to the HTTP catalog and the on-disk
/// favorites store.
///
/// Must be called inside a tokio runtime.
///
/// # Errors
///
/// Returns [`FinderError::Config`] if the catalog client cannot be built
/// (e.g. an empty `api_base_url`).
///
/// # Example
///
/// ```rust,no_run
/// use character_finder::{initialize, Config};
///
/// # #[tokio::main]
/// # async fn main() -> character_finder::Result<()> {
/// let controller = initialize(&Config::default())?;
/// controller.set_search_term("Morty");
/// # Ok(())
/// # }
/// ```
pub fn initialize(config: &Config) -> Result<StateController> {
    let _span = tracing::debug_span!("initialize", api = %config.api_base_url).entered();

    let catalog = HttpCatalogClient::new(config.api_base_url.clone(), config.request_timeout())?;
    let store = open_store(config.store_path());

    Ok(StateController::new(Arc::new(catalog), store, config.debounce()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.api_base_url, "https://rickandmortyapi.com/api");
        assert_eq!(config.debounce(), Duration::from_millis(500));
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn from_map_is_lenient() {
        let config = Config::from_map(&map(&[
            ("api_base_url", " http://localhost:8080/api "),
            ("debounce_ms", "-5"),
            ("trace_level", ""),
            ("theme", "plain"),
            ("unknown", "x"),
        ]));
        assert_eq!(config.api_base_url, "http://localhost:8080/api");
        assert_eq!(config.debounce_ms, 500);
        assert_eq!(config.trace_level, None);
        assert_eq!(config.theme.as_deref(), Some("plain"));
    }

    #[test]
    fn from_file_reads_partial_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "debounce_ms = 300\ntrace_level = \"debug\"").unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.debounce_ms, 300);
        assert_eq!(config.trace_level.as_deref(), Some("debug"));
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
    }

    #[test]
    fn from_file_rejects_bad_types() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "debounce_ms = \"fast\"").unwrap();
        assert!(matches!(Config::from_file(file.path()), Err(FinderError::Config(_))));

        let missing = Config::from_file("/definitely/not/here.toml");
        assert!(matches!(missing, Err(FinderError::Io(_))));
    }

    #[test]
    fn merge_only_replaces_given_keys() {
        let base = Config {
            debounce_ms: 300,
            theme: Some("catppuccin-latte".to_string()),
            ..Config::default()
        };
        let merged = base.merged_with(&map(&[("trace_level", "warn"), ("debounce_ms", "oops")]));
        assert_eq!(merged.debounce_ms, 300);
        assert_eq!(merged.theme.as_deref(), Some("catppuccin-latte"));
        assert_eq!(merged.trace_level.as_deref(), Some("warn"));
    }

    #[test]
    fn store_path_honors_override() {
        let config = Config {
            data_dir: Some("/srv/finder".to_string()),
            ..Config::default()
        };
        assert_eq!(config.store_path(), PathBuf::from("/srv/finder/store.json"));
    }

    #[test]
    fn unknown_theme_falls_back() {
        let config = Config {
            theme: Some("neon".to_string()),
            ..Config::default()
        };
        assert_eq!(config.load_theme().name, "catppuccin-mocha");
    }

    #[tokio::test]
    async fn initialize_persists_into_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            data_dir: Some(dir.path().display().to_string()),
            ..Config::default()
        };

        let controller = initialize(&config).unwrap();
        controller.toggle_favorite(3);

        let reopened = initialize(&config).unwrap();
        assert_eq!(reopened.favorite_ids(), vec![3]);
        assert!(dir.path().join("store.json").exists());
    }

    #[test]
    fn initialize_rejects_empty_base_url() {
        let config = Config {
            api_base_url: "  ".to_string(),
            ..Config::default()
        };
        assert!(initialize(&config).is_err());
    }
}
