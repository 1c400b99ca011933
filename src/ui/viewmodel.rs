//! View model types representing one renderable frame.
//!
//! [`compute_viewmodel`] turns a [`Snapshot`] and the active [`ViewMode`] into
//! display-ready data. It holds no business logic: which hint to show, what
//! the header says and how rows are marked are all decided here so the
//! components only lay text out.

use crate::app::favorites::MAX_FAVORITES;
use crate::app::{Snapshot, ViewMode};
use crate::domain::{CharacterId, CharacterSummary};

/// Complete view model for one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameViewModel {
    pub header: HeaderInfo,
    /// Search input line, shown in the search view only.
    pub search_bar: Option<SearchBarInfo>,
    pub body: Body,
    /// Loading, error or hint line under the body.
    pub status: Option<StatusLine>,
    pub footer: FooterInfo,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    pub title: String,
    /// Right-aligned badge, e.g. `Favorites (2/4)`.
    pub badge: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBarInfo {
    pub query: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    pub keybindings: String,
}

/// Main content of a frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body {
    Table(Vec<CharacterRow>),
    Card(CharacterCard),
    Empty(EmptyState),
}

/// One row in the character table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterRow {
    pub id: CharacterId,
    pub name: String,
    pub status: String,
    pub species: String,
    pub is_favorite: bool,
}

/// Full record of one character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterCard {
    pub id: CharacterId,
    pub name: String,
    pub is_favorite: bool,
    /// `(label, value)` pairs in display order.
    pub fields: Vec<(&'static str, String)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    pub message: String,
    pub subtitle: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub text: String,
    pub tone: Tone,
}

impl StatusLine {
    fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tone: Tone::Info,
        }
    }

    fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tone: Tone::Error,
        }
    }
}

const SEARCH_TAGLINE: &str = "Wubba Lubba Dub Dub! Dive into the multiverse!";
const SEARCH_KEYS: &str = "type to search | :fav <id> | :show <id> | :favs | :help | :quit";
const FAVORITES_KEYS: &str = ":fav <id> removes | :show <id> | :search | :quit";
const DETAIL_KEYS: &str = ":fav <id> | :search | :favs | :quit";

/// Builds the view model for `view` from `snapshot`.
#[must_use]
pub fn compute_viewmodel(snapshot: &Snapshot, view: &ViewMode) -> FrameViewModel {
    let badge = format!("Favorites ({}/{MAX_FAVORITES})", snapshot.favorite_ids.len());

    match view {
        ViewMode::Search => search_frame(snapshot, badge),
        ViewMode::Favorites => favorites_frame(snapshot, badge),
        ViewMode::Details(id) => detail_frame(snapshot, *id, badge),
    }
}

fn row(snapshot: &Snapshot, character: &CharacterSummary) -> CharacterRow {
    CharacterRow {
        id: character.id,
        name: character.name.clone(),
        status: character.status.clone(),
        species: character.species.clone(),
        is_favorite: snapshot.is_favorite(character.id),
    }
}

fn search_frame(snapshot: &Snapshot, badge: String) -> FrameViewModel {
    let search = &snapshot.search;

    let status = snapshot.status_line().map(|text| {
        if !search.loading && search.error.is_some() {
            StatusLine::error(text)
        } else {
            StatusLine::info(text)
        }
    });

    let body = if search.results.is_empty() {
        Body::Empty(EmptyState {
            message: SEARCH_TAGLINE.to_string(),
            subtitle: "Search for your favorite Rick and Morty characters!".to_string(),
        })
    } else {
        Body::Table(search.results.iter().map(|c| row(snapshot, c)).collect())
    };

    FrameViewModel {
        header: HeaderInfo {
            title: "Character Finder".to_string(),
            badge,
        },
        search_bar: Some(SearchBarInfo {
            query: search.term.clone(),
        }),
        body,
        status,
        footer: FooterInfo {
            keybindings: SEARCH_KEYS.to_string(),
        },
    }
}

fn favorites_frame(snapshot: &Snapshot, badge: String) -> FrameViewModel {
    let view = &snapshot.favorites;

    let status = if view.loading {
        Some(StatusLine::info("Loading favorite characters..."))
    } else {
        view.error.as_deref().map(StatusLine::error)
    };

    let body = if view.characters.is_empty() {
        Body::Empty(EmptyState {
            message: "You haven't added any characters to your favorites yet.".to_string(),
            subtitle: "Type :search to go back and find some!".to_string(),
        })
    } else {
        Body::Table(view.characters.iter().map(|c| row(snapshot, c)).collect())
    };

    FrameViewModel {
        header: HeaderInfo {
            title: format!(
                "Your Favorite Characters ({}/{MAX_FAVORITES})",
                snapshot.favorite_ids.len()
            ),
            badge,
        },
        search_bar: None,
        body,
        status,
        footer: FooterInfo {
            keybindings: FAVORITES_KEYS.to_string(),
        },
    }
}

fn detail_frame(snapshot: &Snapshot, id: CharacterId, badge: String) -> FrameViewModel {
    let detail = &snapshot.detail;

    let (body, status) = if detail.loading {
        (
            Body::Empty(EmptyState {
                message: format!("Character #{id}"),
                subtitle: String::new(),
            }),
            Some(StatusLine::info("Loading character details...")),
        )
    } else if let Some(error) = &detail.error {
        (
            Body::Empty(EmptyState {
                message: format!("Character #{id}"),
                subtitle: "Type :search to go back home.".to_string(),
            }),
            Some(StatusLine::error(error.clone())),
        )
    } else if let Some(character) = &detail.character {
        (Body::Card(card(snapshot, character)), None)
    } else {
        (
            Body::Empty(EmptyState {
                message: "No character data available.".to_string(),
                subtitle: "Type :search to go back home.".to_string(),
            }),
            None,
        )
    };

    FrameViewModel {
        header: HeaderInfo {
            title: "Character Details".to_string(),
            badge,
        },
        search_bar: None,
        body,
        status,
        footer: FooterInfo {
            keybindings: DETAIL_KEYS.to_string(),
        },
    }
}

fn card(snapshot: &Snapshot, character: &CharacterSummary) -> CharacterCard {
    let mut fields = vec![
        ("Status", character.status.clone()),
        ("Species", character.species.clone()),
    ];
    if let Some(kind) = &character.kind {
        fields.push(("Type", kind.clone()));
    }
    fields.push(("Gender", character.gender.clone()));
    fields.push(("Origin", character.origin.name.clone()));
    fields.push(("Last Known Location", character.location.name.clone()));
    fields.push(("Image", character.image.clone()));

    CharacterCard {
        id: character.id,
        name: character.name.clone(),
        is_favorite: snapshot.is_favorite(character.id),
        fields,
    }
}
