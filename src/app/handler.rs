//! Command parsing and dispatch for the terminal front end.
//!
//! Each input line becomes one [`Command`]. [`handle_command`] applies it to
//! the [`StateController`] and the active [`ViewMode`], then returns whether
//! the frame should be redrawn together with the [`Action`]s the front end
//! must execute.
//!
//! # Input Syntax
//!
//! - any text not starting with `:` sets the search term (empty clears it)
//! - `:fav <id>` toggles a favorite
//! - `:favs` shows the favorites view
//! - `:show <id>` shows one character's details
//! - `:search` returns to the search view
//! - `:help` prints the command list
//! - `:quit` exits
//!
//! # Example
//!
//! ```rust
//! use character_finder::app::Command;
//!
//! assert_eq!(Command::parse("Rick").unwrap(), Command::Search("Rick".to_string()));
//! assert_eq!(Command::parse(":fav 7").unwrap(), Command::ToggleFavorite(7));
//! assert!(Command::parse(":fav seven").is_err());
//! ```

use crate::app::favorites::ToggleOutcome;
use crate::app::{Action, StateController, ViewMode};
use crate::domain::{CharacterId, FinderError, Result};

/// Text printed for `:help`.
pub const HELP_TEXT: &str = "\
Type a name to search (an empty line clears the search).
  :fav <id>                add or remove a favorite (at most 4)
  :favs, :favorites        show favorite characters
  :show <id>               show one character's details
  :search, :back           back to search results
  :help, :h, :?            show this help
  :quit, :q, :exit         exit";

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Replace the search term.
    Search(String),
    ToggleFavorite(CharacterId),
    ShowFavorites,
    ShowCharacter(CharacterId),
    ShowSearch,
    Help,
    Quit,
}

impl Command {
    /// Parses one input line.
    ///
    /// The line terminator is stripped; everything else of a search line is
    /// kept as typed.
    ///
    /// # Errors
    ///
    /// Returns [`FinderError::Command`] for unknown `:` commands and for
    /// missing or non-numeric ids.
    pub fn parse(line: &str) -> Result<Self> {
        let line = line.trim_end_matches(['\r', '\n']);

        let Some(command) = line.strip_prefix(':') else {
            return Ok(Self::Search(line.to_string()));
        };

        let mut words = command.split_whitespace();
        let name = words.next().unwrap_or_default();
        let argument = words.next();
        if words.next().is_some() {
            return Err(FinderError::Command(format!("too many arguments for :{name}")));
        }

        match (name, argument) {
            ("fav", Some(id)) => Ok(Self::ToggleFavorite(parse_id(name, id)?)),
            ("show", Some(id)) => Ok(Self::ShowCharacter(parse_id(name, id)?)),
            ("fav" | "show", None) => Err(FinderError::Command(format!("usage: :{name} <id>"))),
            ("favs" | "favorites", None) => Ok(Self::ShowFavorites),
            ("search" | "back", None) => Ok(Self::ShowSearch),
            ("help" | "h" | "?", None) => Ok(Self::Help),
            ("quit" | "q" | "exit", None) => Ok(Self::Quit),
            ("", _) => Err(FinderError::Command("empty command".to_string())),
            (_, Some(_)) if is_known(name) => {
                Err(FinderError::Command(format!(":{name} takes no argument")))
            }
            _ => Err(FinderError::Command(format!("unknown command :{name}"))),
        }
    }
}

fn is_known(name: &str) -> bool {
    matches!(
        name,
        "favs" | "favorites" | "search" | "back" | "help" | "h" | "?" | "quit" | "q" | "exit"
    )
}

fn parse_id(name: &str, raw: &str) -> Result<CharacterId> {
    raw.parse()
        .map_err(|_| FinderError::Command(format!(":{name} expects a numeric id, got {raw:?}")))
}

/// Applies `command` and returns `(should_render, actions)`.
///
/// State changes happen before this returns; anything that must await a
/// remote call is returned as an [`Action`].
///
/// Toggling a favorite while the favorites view is open also reloads that
/// view, so it always reflects the current set.
pub fn handle_command(
    controller: &StateController,
    view: &mut ViewMode,
    command: &Command,
) -> (bool, Vec<Action>) {
    let _span = tracing::debug_span!("handle_command", command = ?command, view = view.title()).entered();

    match command {
        Command::Search(term) => {
            *view = ViewMode::Search;
            controller.set_search_term(term.as_str());
            (true, vec![])
        }
        Command::ToggleFavorite(id) => {
            let outcome = controller.toggle_favorite(*id);
            let mut actions = Vec::new();
            if let Some(notice) = outcome.notice() {
                actions.push(Action::Notify(notice.to_string()));
            }
            if *view == ViewMode::Favorites && outcome != ToggleOutcome::CapacityExceeded {
                actions.push(Action::LoadFavorites);
            }
            (outcome != ToggleOutcome::CapacityExceeded, actions)
        }
        Command::ShowFavorites => {
            *view = ViewMode::Favorites;
            (true, vec![Action::LoadFavorites])
        }
        Command::ShowCharacter(id) => {
            *view = ViewMode::Details(*id);
            (true, vec![Action::LoadCharacter(*id)])
        }
        Command::ShowSearch => {
            *view = ViewMode::Search;
            (true, vec![])
        }
        Command::Help => (false, vec![Action::Notify(HELP_TEXT.to_string())]),
        Command::Quit => (false, vec![Action::Quit]),
    }
}
