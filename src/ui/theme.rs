//! Theme management and ANSI escape sequence generation.
//!
//! Themes map each [`Role`] of the rendered frame to a hex color. Built-in
//! themes ship as TOML under `themes/`; custom themes are loaded from a file
//! with the same shape. The `plain` theme has no colors and emits no escape
//! sequences at all, which is what tests and non-terminal output use.
//!
//! # TOML Format
//!
//! ```toml
//! name = "my-theme"
//!
//! [colors]
//! header_fg = "#89b4fa"
//! text_normal = "#cdd6f4"
//! text_dim = "#6c7086"
//! border = "#45475a"
//! favorite_fg = "#f9e2af"
//! error_fg = "#f38ba8"
//! hint_fg = "#89dceb"
//! ```
//!
//! # Example
//!
//! ```rust
//! use character_finder::ui::theme::{Role, Theme};
//!
//! let theme = Theme::from_name("catppuccin-mocha").unwrap();
//! assert!(theme.paint(Role::Error, "boom").starts_with("\u{1b}[38;2;"));
//! assert_eq!(Theme::plain().paint(Role::Error, "boom"), "boom");
//! ```

use crate::domain::{FinderError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// What a piece of text is, for coloring purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Header,
    Text,
    Dim,
    Border,
    Favorite,
    Error,
    Hint,
}

/// Color scheme for rendering.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Theme {
    pub name: String,
    /// `None` renders without any escape sequences.
    #[serde(default)]
    pub colors: Option<ThemeColors>,
}

/// Hex colors (e.g. `"#cdd6f4"`) for every [`Role`].
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ThemeColors {
    pub header_fg: String,
    pub text_normal: String,
    pub text_dim: String,
    pub border: String,
    pub favorite_fg: String,
    pub error_fg: String,
    pub hint_fg: String,
}

impl ThemeColors {
    fn color(&self, role: Role) -> &str {
        match role {
            Role::Header => &self.header_fg,
            Role::Text => &self.text_normal,
            Role::Dim => &self.text_dim,
            Role::Border => &self.border,
            Role::Favorite => &self.favorite_fg,
            Role::Error => &self.error_fg,
            Role::Hint => &self.hint_fg,
        }
    }
}

impl Theme {
    /// Theme without colors.
    #[must_use]
    pub fn plain() -> Self {
        Self {
            name: "plain".to_string(),
            colors: None,
        }
    }

    /// Loads a built-in theme by name.
    ///
    /// Supported names: `catppuccin-mocha`, `catppuccin-latte`, `plain`.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let toml_str = match name {
            "catppuccin-mocha" => include_str!("../../themes/catppuccin-mocha.toml"),
            "catppuccin-latte" => include_str!("../../themes/catppuccin-latte.toml"),
            "plain" => return Some(Self::plain()),
            _ => return None,
        };

        toml::from_str(toml_str).ok()
    }

    /// Loads a theme from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`FinderError::Io`] if the file cannot be read and
    /// [`FinderError::Config`] if it is not a valid theme.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        toml::from_str(&contents).map_err(|e| FinderError::Config(format!("invalid theme: {e}")))
    }

    /// Wraps `text` in the color for `role`.
    #[must_use]
    pub fn paint(&self, role: Role, text: &str) -> String {
        match &self.colors {
            Some(colors) => format!("{}{text}{}", Self::fg(colors.color(role)), Self::reset()),
            None => text.to_string(),
        }
    }

    /// Like [`paint`](Self::paint), in bold.
    #[must_use]
    pub fn strong(&self, role: Role, text: &str) -> String {
        match &self.colors {
            Some(colors) => format!(
                "{}{}{text}{}",
                Self::bold(),
                Self::fg(colors.color(role)),
                Self::reset()
            ),
            None => text.to_string(),
        }
    }

    /// Parses `#rrggbb`; anything else renders white.
    fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
        let hex = hex.trim_start_matches('#').trim();

        if hex.len() != 6 || !hex.is_ascii() {
            return (255, 255, 255);
        }

        let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(255);
        let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(255);
        let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(255);

        (r, g, b)
    }

    /// ANSI 24-bit foreground escape for `hex`.
    #[must_use]
    pub fn fg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[38;2;{r};{g};{b}m")
    }

    #[must_use]
    pub const fn bold() -> &'static str {
        "\u{001b}[1m"
    }

    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{001b}[0m"
    }
}

impl Default for Theme {
    /// Catppuccin Mocha, or `plain` if the bundled file is unusable.
    fn default() -> Self {
        Self::from_name("catppuccin-mocha").unwrap_or_else(Self::plain)
    }
}
