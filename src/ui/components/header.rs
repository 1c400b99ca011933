//! Header and search bar renderers.

use crate::ui::helpers::{center_padding, truncate};
use crate::ui::theme::{Role, Theme};
use crate::ui::viewmodel::{HeaderInfo, SearchBarInfo};

/// Renders the title on the left and the badge right-aligned on one line.
///
/// On terminals too narrow for both, the badge wins and the title is cut.
pub fn render_header(out: &mut String, header: &HeaderInfo, theme: &Theme, cols: usize) {
    let badge_len = header.badge.chars().count();
    let title = truncate(&header.title, cols.saturating_sub(badge_len + 1));
    let gap = cols.saturating_sub(title.chars().count() + badge_len).max(1);

    out.push_str(&theme.strong(Role::Header, &title));
    out.push_str(&" ".repeat(gap));
    out.push_str(&theme.paint(Role::Favorite, &header.badge));
    out.push('\n');
}

/// Renders the current query as a prompt line.
pub fn render_search_bar(out: &mut String, search: &SearchBarInfo, theme: &Theme, cols: usize) {
    let label = "Search: ";
    if search.query.is_empty() {
        out.push_str(&theme.paint(Role::Dim, label));
        out.push_str(&theme.paint(Role::Dim, "Search character name..."));
    } else {
        out.push_str(&theme.paint(Role::Dim, label));
        let query = truncate(&search.query, cols.saturating_sub(label.len()));
        out.push_str(&theme.strong(Role::Text, &query));
    }
    out.push('\n');
}

/// Renders a two-line centered message.
pub fn render_centered(out: &mut String, message: &str, subtitle: &str, theme: &Theme, cols: usize) {
    for (text, role) in [(message, Role::Hint), (subtitle, Role::Dim)] {
        if text.is_empty() {
            continue;
        }
        let text = truncate(text, cols);
        out.push_str(&" ".repeat(center_padding(text.chars().count(), cols)));
        out.push_str(&theme.paint(role, &text));
        out.push('\n');
    }
}
