//! View mode state for the terminal front end.
//!
//! The front end shows exactly one view at a time:
//! - **Search**: the search prompt and its results (default)
//! - **Favorites**: full records of the favorite characters
//! - **Details**: one character's record
//!
//! # Example
//!
//! ```rust
//! use character_finder::app::ViewMode;
//!
//! let view = ViewMode::Details(1);
//! assert_eq!(view.title(), "details");
//! assert_eq!(ViewMode::default(), ViewMode::Search);
//! ```

use crate::domain::CharacterId;

/// Which view the front end is showing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ViewMode {
    /// Search prompt and results.
    #[default]
    Search,

    /// Records for the favorite ids, loaded on entry.
    Favorites,

    /// Details of one character, loaded on entry.
    Details(CharacterId),
}

impl ViewMode {
    /// Short name used in log events.
    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self {
            Self::Search => "search",
            Self::Favorites => "favorites",
            Self::Details(_) => "details",
        }
    }
}
