//! Top-level frame rendering.
//!
//! Rendering is a two-step process:
//!
//! 1. **View model computation**: [`compute_viewmodel`] turns the snapshot and
//!    active view into display data.
//! 2. **Component rendering**: the components lay that data out as text.
//!
//! The result is a `String` the caller prints; the renderer never writes to
//! stdout itself.

use crate::app::{Snapshot, ViewMode};
use crate::ui::components;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{compute_viewmodel, Body, FrameViewModel};

/// Smallest width the layout is computed for.
pub const MIN_COLS: usize = 40;

/// Renders one frame of `view` for a terminal `cols` wide.
///
/// # Example
///
/// ```rust
/// use character_finder::app::{Snapshot, ViewMode};
/// use character_finder::ui::{render, Theme};
///
/// let frame = render(&Snapshot::default(), &ViewMode::Search, &Theme::plain(), 80);
/// assert!(frame.contains("Start typing to search for characters!"));
/// ```
#[must_use]
pub fn render(snapshot: &Snapshot, view: &ViewMode, theme: &Theme, cols: usize) -> String {
    let viewmodel = compute_viewmodel(snapshot, view);
    render_viewmodel(&viewmodel, theme, cols.max(MIN_COLS))
}

/// Lays out a computed view model.
///
/// ```text
/// [Header]
/// [Border]
/// [Search bar]        (search view only)
/// [Body]              table, card or centered message
/// [Status]            loading / error / hint, if any
/// [Border]
/// [Footer]
/// ```
#[must_use]
pub fn render_viewmodel(vm: &FrameViewModel, theme: &Theme, cols: usize) -> String {
    let mut out = String::new();

    components::render_header(&mut out, &vm.header, theme, cols);
    components::render_border(&mut out, theme, cols);

    if let Some(search) = &vm.search_bar {
        components::render_search_bar(&mut out, search, theme, cols);
        out.push('\n');
    }

    match &vm.body {
        Body::Table(rows) => {
            components::render_table_headers(&mut out, theme, cols);
            components::render_table_rows(&mut out, rows, theme, cols);
        }
        Body::Card(card) => components::render_card(&mut out, card, theme, cols),
        Body::Empty(empty) => {
            components::render_centered(&mut out, &empty.message, &empty.subtitle, theme, cols);
        }
    }

    if let Some(status) = &vm.status {
        out.push('\n');
        components::render_status(&mut out, status, theme);
    }

    components::render_border(&mut out, theme, cols);
    components::render_footer(&mut out, &vm.footer, theme, cols);
    out
}
