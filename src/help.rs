//! Help line listing the timer's key bindings.
//!
//! The short view puts every enabled binding on one line, separated by
//! bullets, and cuts off with an ellipsis when it would overflow the width.
//! The full view lays out each group of bindings as its own column.

use crate::key::{Binding, KeyMap};
use lipgloss_extras::lipgloss;
use lipgloss_extras::prelude::*;

/// Styles of the help view.
#[derive(Debug, Clone)]
pub struct Styles {
    /// The `…` shown when bindings are cut off.
    pub ellipsis: Style,
    /// Key names.
    pub key: Style,
    /// Descriptions.
    pub desc: Style,
    /// Separators between bindings and columns.
    pub separator: Style,
}

impl Default for Styles {
    fn default() -> Self {
        use lipgloss::AdaptiveColor;

        let key_style = Style::new().foreground(AdaptiveColor {
            Light: "#909090",
            Dark: "#626262",
        });
        let desc_style = Style::new().foreground(AdaptiveColor {
            Light: "#B2B2B2",
            Dark: "#4A4A4A",
        });
        let sep_style = Style::new().foreground(AdaptiveColor {
            Light: "#DDDADA",
            Dark: "#3C3C3C",
        });

        Self {
            ellipsis: sep_style.clone(),
            key: key_style,
            desc: desc_style,
            separator: sep_style,
        }
    }
}

/// Help view state.
#[derive(Debug, Clone)]
pub struct Model {
    /// Show the full, multi-column help instead of the single line.
    pub show_all: bool,
    /// Maximum width in cells; `0` means unlimited.
    pub width: usize,
    /// Separator between bindings in the short view.
    pub short_separator: String,
    /// Separator between columns in the full view.
    pub full_separator: String,
    /// Marker for cut-off bindings.
    pub ellipsis: String,
    /// Styles.
    pub styles: Styles,
}

impl Default for Model {
    fn default() -> Self {
        Self {
            show_all: false,
            width: 0,
            short_separator: " • ".to_string(),
            full_separator: "    ".to_string(),
            ellipsis: "…".to_string(),
            styles: Styles::default(),
        }
    }
}

impl Model {
    /// Creates a help view with default styles and no width limit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the width limit.
    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    /// Renders the help for `keymap`, short or full depending on
    /// [`show_all`](Self::show_all).
    pub fn view<K: KeyMap>(&self, keymap: &K) -> String {
        if self.show_all {
            self.full_help_view(keymap.full_help())
        } else {
            self.short_help_view(keymap.short_help())
        }
    }

    /// Renders bindings on a single line.
    pub fn short_help_view(&self, bindings: Vec<&Binding>) -> String {
        let separator = self
            .styles
            .separator
            .clone()
            .inline(true)
            .render(&self.short_separator);

        let mut out = String::new();
        let mut total_width = 0;
        for kb in bindings.iter().filter(|b| b.enabled()) {
            let sep = if total_width > 0 { separator.as_str() } else { "" };
            let item = format!("{}{}", sep, self.entry(kb));
            let item_width = lipgloss::width_visible(&item);

            if let Some(tail) = self.overflow_tail(total_width, item_width) {
                out.push_str(&tail);
                break;
            }
            total_width += item_width;
            out.push_str(&item);
        }
        out
    }

    /// Renders each group of bindings as a column.
    pub fn full_help_view(&self, groups: Vec<Vec<&Binding>>) -> String {
        let separator = self
            .styles
            .separator
            .clone()
            .inline(true)
            .render(&self.full_separator);
        let sep_width = lipgloss::width_visible(&separator);

        let mut columns: Vec<String> = Vec::new();
        let mut total_width = 0;
        for group in groups.iter() {
            let rows: Vec<String> = group
                .iter()
                .filter(|b| b.enabled())
                .map(|b| self.entry(b))
                .collect();
            if rows.is_empty() {
                continue;
            }

            let column = rows.join("\n");
            let mut col_width = column
                .lines()
                .map(|l| lipgloss::width_visible(l))
                .max()
                .unwrap_or(0);
            if !columns.is_empty() {
                col_width += sep_width;
            }

            if let Some(tail) = self.overflow_tail(total_width, col_width) {
                if !tail.is_empty() {
                    columns.push(tail);
                }
                break;
            }
            total_width += col_width;
            columns.push(column);
        }

        let mut parts: Vec<&str> = Vec::new();
        for (i, col) in columns.iter().enumerate() {
            if i > 0 {
                parts.push(separator.as_str());
            }
            parts.push(col.as_str());
        }
        lipgloss::join_horizontal(lipgloss::TOP, &parts)
    }

    fn entry(&self, kb: &Binding) -> String {
        let help = kb.help();
        let key = self.styles.key.clone().inline(true).render(&help.key);
        let desc = self.styles.desc.clone().inline(true).render(&help.desc);
        format!("{} {}", key, desc)
    }

    // `Some` when the item does not fit: the ellipsis if that still fits,
    // otherwise an empty string.
    fn overflow_tail(&self, total_width: usize, item_width: usize) -> Option<String> {
        if self.width == 0 || total_width + item_width <= self.width {
            return None;
        }
        let tail = format!(
            " {}",
            self.styles.ellipsis.clone().inline(true).render(&self.ellipsis)
        );
        if total_width + lipgloss::width_visible(&tail) < self.width {
            Some(tail)
        } else {
            Some(String::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyCode;

    struct Keys {
        start: Binding,
        reset: Binding,
        quit: Binding,
    }

    impl Keys {
        fn new() -> Self {
            Self {
                start: Binding::new(vec![KeyCode::Char(' ')]).with_help("space", "start"),
                reset: Binding::new(vec![KeyCode::Char('r')]).with_help("r", "reset"),
                quit: Binding::new(vec![KeyCode::Char('q')]).with_help("q", "quit"),
            }
        }
    }

    impl KeyMap for Keys {
        fn short_help(&self) -> Vec<&Binding> {
            vec![&self.start, &self.reset, &self.quit]
        }

        fn full_help(&self) -> Vec<Vec<&Binding>> {
            vec![vec![&self.start, &self.reset], vec![&self.quit]]
        }
    }

    fn plain(s: &str) -> String {
        String::from_utf8(strip_ansi_escapes::strip(s)).unwrap()
    }

    #[test]
    fn test_short_view_lists_bindings() {
        let help = Model::new();
        let view = plain(&help.view(&Keys::new()));
        assert_eq!(view, "space start • r reset • q quit");
    }

    #[test]
    fn test_short_view_skips_disabled() {
        let mut keys = Keys::new();
        keys.reset.set_enabled(false);
        let view = plain(&Model::new().view(&keys));
        assert_eq!(view, "space start • q quit");
    }

    #[test]
    fn test_short_view_truncates_with_ellipsis() {
        let help = Model::new().with_width(22);
        let view = plain(&help.view(&Keys::new()));
        assert!(view.starts_with("space start • r reset"));
        assert!(!view.contains("quit"));
    }

    #[test]
    fn test_full_view_has_columns() {
        let mut help = Model::new();
        help.show_all = true;
        let view = plain(&help.view(&Keys::new()));
        let lines: Vec<&str> = view.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("space start"));
        assert!(lines[0].contains("q quit"));
        assert!(lines[1].contains("r reset"));
    }

    #[test]
    fn test_empty_keymap() {
        assert_eq!(Model::new().short_help_view(vec![]), "");
    }
}
