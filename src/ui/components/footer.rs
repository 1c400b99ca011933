//! Footer and status line renderers.

use crate::ui::helpers::{center_padding, truncate};
use crate::ui::theme::{Role, Theme};
use crate::ui::viewmodel::{FooterInfo, StatusLine, Tone};

/// Renders the keybinding hints centered and dimmed.
///
/// Hints wider than the terminal are truncated rather than wrapped.
pub fn render_footer(out: &mut String, footer: &FooterInfo, theme: &Theme, cols: usize) {
    let text = truncate(&footer.keybindings, cols);
    out.push_str(&" ".repeat(center_padding(text.chars().count(), cols)));
    out.push_str(&theme.paint(Role::Dim, &text));
    out.push('\n');
}

/// Renders a loading, error or hint line.
pub fn render_status(out: &mut String, status: &StatusLine, theme: &Theme) {
    let role = match status.tone {
        Tone::Info => Role::Hint,
        Tone::Error => Role::Error,
    };
    out.push_str(&theme.paint(role, &status.text));
    out.push('\n');
}
