//! Character table and detail card renderers.

use crate::ui::helpers::{fit, truncate};
use crate::ui::theme::{Role, Theme};
use crate::ui::viewmodel::{CharacterCard, CharacterRow};

const MARK_WIDTH: usize = 2;
const ID_WIDTH: usize = 6;
const STATUS_WIDTH: usize = 9;
const SPECIES_WIDTH: usize = 14;
const MIN_NAME_WIDTH: usize = 12;

/// Favorite marker shown in front of rows and card titles.
pub const FAVORITE_MARK: &str = "*";

fn name_width(cols: usize) -> usize {
    cols.saturating_sub(MARK_WIDTH + ID_WIDTH + STATUS_WIDTH + SPECIES_WIDTH + 3)
        .max(MIN_NAME_WIDTH)
}

/// Renders the `ID NAME STATUS SPECIES` column headings.
pub fn render_table_headers(out: &mut String, theme: &Theme, cols: usize) {
    let line = format!(
        "{}{} {} {} {}",
        " ".repeat(MARK_WIDTH),
        fit("ID", ID_WIDTH),
        fit("NAME", name_width(cols)),
        fit("STATUS", STATUS_WIDTH),
        "SPECIES"
    );
    out.push_str(&theme.strong(Role::Header, &line));
    out.push('\n');
}

/// Renders one line per row; favorites carry [`FAVORITE_MARK`].
pub fn render_table_rows(out: &mut String, rows: &[CharacterRow], theme: &Theme, cols: usize) {
    for row in rows {
        if row.is_favorite {
            out.push_str(&theme.paint(Role::Favorite, &fit(FAVORITE_MARK, MARK_WIDTH)));
        } else {
            out.push_str(&" ".repeat(MARK_WIDTH));
        }
        let line = format!(
            "{} {} {} {}",
            fit(&row.id.to_string(), ID_WIDTH),
            fit(&row.name, name_width(cols)),
            fit(&row.status, STATUS_WIDTH),
            truncate(&row.species, SPECIES_WIDTH)
        );
        out.push_str(&theme.paint(Role::Text, line.trim_end()));
        out.push('\n');
    }
}

/// Renders the name line followed by one `Label: value` line per field.
pub fn render_card(out: &mut String, card: &CharacterCard, theme: &Theme, cols: usize) {
    let title = format!("{} (#{})", card.name, card.id);
    if card.is_favorite {
        out.push_str(&theme.paint(Role::Favorite, &format!("{FAVORITE_MARK} ")));
    }
    out.push_str(&theme.strong(Role::Header, &truncate(&title, cols)));
    out.push('\n');

    for (label, value) in &card.fields {
        out.push_str(&theme.strong(Role::Dim, &format!("{label}: ")));
        out.push_str(&theme.paint(Role::Text, value));
        out.push('\n');
    }
}
