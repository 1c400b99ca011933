//! Side effects requested by the command handler.
//!
//! [`handle_command`](crate::app::handle_command) mutates controller state
//! synchronously and returns the effects that need the runtime: remote loads
//! that must be awaited, notices to print, and shutdown. The front end
//! executes them in order.

use crate::domain::CharacterId;

/// Commands representing side effects to be executed by the front end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Fetch the records for the current favorite ids.
    LoadFavorites,

    /// Fetch one character into the details view.
    LoadCharacter(CharacterId),

    /// Show a one-off message outside the frame, e.g. the capacity notice.
    Notify(String),

    /// Stop reading input and exit.
    Quit,
}
