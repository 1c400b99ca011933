//! Filesystem locations for data and configuration.
//!
//! Locations follow the XDG base directory conventions, with `$HOME`
//! fallbacks. The resolvers take environment values as arguments so they
//! can be tested without touching the process environment; the
//! `*_from_env` wrappers read the real environment.

use std::env;
use std::path::{Path, PathBuf};

/// Directory name used under the XDG base directories.
pub const APP_DIR: &str = "character-finder";

/// Name of the persisted key-value store inside the data directory.
pub const STORE_FILE: &str = "store.json";

/// Name of the optional settings file inside the config directory.
pub const CONFIG_FILE: &str = "config.toml";

/// Expands a leading `~` to `home`.
///
/// # Examples
///
/// ```
/// use character_finder::infrastructure::expand_tilde;
/// use std::path::{Path, PathBuf};
///
/// let home = Some(Path::new("/home/morty"));
/// assert_eq!(expand_tilde("~/finder", home), PathBuf::from("/home/morty/finder"));
/// assert_eq!(expand_tilde("~", home), PathBuf::from("/home/morty"));
/// assert_eq!(expand_tilde("/srv/finder", home), PathBuf::from("/srv/finder"));
/// ```
#[must_use]
pub fn expand_tilde(path: &str, home: Option<&Path>) -> PathBuf {
    match home {
        Some(home) if path == "~" => home.to_path_buf(),
        Some(home) => path
            .strip_prefix("~/")
            .map_or_else(|| PathBuf::from(path), |rest| home.join(rest)),
        None => PathBuf::from(path),
    }
}

/// Resolves the data directory.
///
/// Precedence: explicit override (tilde-expanded), `$XDG_DATA_HOME/character-finder`,
/// `$HOME/.local/share/character-finder`, then `./.character-finder`.
#[must_use]
pub fn resolve_data_dir(over: Option<&str>, xdg_data_home: Option<&Path>, home: Option<&Path>) -> PathBuf {
    if let Some(dir) = over.map(str::trim).filter(|d| !d.is_empty()) {
        return expand_tilde(dir, home);
    }
    if let Some(xdg) = xdg_data_home.filter(|p| p.is_absolute()) {
        return xdg.join(APP_DIR);
    }
    match home {
        Some(home) => home.join(".local").join("share").join(APP_DIR),
        None => PathBuf::from(format!(".{APP_DIR}")),
    }
}

/// Resolves the default settings file path, if a home can be found.
#[must_use]
pub fn resolve_config_file(xdg_config_home: Option<&Path>, home: Option<&Path>) -> Option<PathBuf> {
    let base = match xdg_config_home.filter(|p| p.is_absolute()) {
        Some(xdg) => xdg.to_path_buf(),
        None => home?.join(".config"),
    };
    Some(base.join(APP_DIR).join(CONFIG_FILE))
}

fn env_path(name: &str) -> Option<PathBuf> {
    env::var_os(name).filter(|v| !v.is_empty()).map(PathBuf::from)
}

/// [`resolve_data_dir`] against the process environment.
#[must_use]
pub fn data_dir_from_env(over: Option<&str>) -> PathBuf {
    let home = env_path("HOME");
    resolve_data_dir(over, env_path("XDG_DATA_HOME").as_deref(), home.as_deref())
}

/// [`resolve_config_file`] against the process environment.
#[must_use]
pub fn config_file_from_env() -> Option<PathBuf> {
    let home = env_path("HOME");
    resolve_config_file(env_path("XDG_CONFIG_HOME").as_deref(), home.as_deref())
}
