//! Composable frame component renderers.
//!
//! Every component appends its lines to a `String` buffer; nothing here
//! touches stdout.
//!
//! # Components
//!
//! - [`header`]: title line, search prompt and centered messages
//! - [`table`]: character table and detail card
//! - [`footer`]: status line and keybinding hints

pub mod footer;
pub mod header;
pub mod table;

use crate::ui::theme::{Role, Theme};

pub use footer::{render_footer, render_status};
pub use header::{render_centered, render_header, render_search_bar};
pub use table::{render_card, render_table_headers, render_table_rows, FAVORITE_MARK};

/// Appends a full-width separator line.
pub fn render_border(out: &mut String, theme: &Theme, cols: usize) {
    out.push_str(&theme.paint(Role::Border, &"-".repeat(cols)));
    out.push('\n');
}
