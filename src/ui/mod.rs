//! Plain-text frame rendering for the terminal front end.
//!
//! ```text
//! Snapshot + ViewMode → compute_viewmodel → FrameViewModel → render → String
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: display-ready frame data
//! - [`renderer`]: top-level layout
//! - [`components`]: header, table, card and footer renderers
//! - [`helpers`]: char-aware truncation and padding
//! - [`theme`]: colors and ANSI escape sequences

pub mod components;
pub mod helpers;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use renderer::render;
pub use theme::Theme;
pub use viewmodel::{compute_viewmodel, FrameViewModel};
