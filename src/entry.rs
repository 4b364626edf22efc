//! Duration entry field.
//!
//! A one-line text field for typing a duration. It only ever holds digits
//! and at most one colon, so anything else typed or pasted is dropped on the
//! way in. `25` reads as twenty-five minutes, `1:30` as ninety seconds and
//! `:45` as forty-five seconds; values past an hour are clamped when the
//! field is committed.
//!
//! ```rust
//! use bubbletea_dialtimer::entry::{EntryEvent, Model};
//! use bubbletea_dialtimer::Component;
//! use bubbletea_rs::KeyMsg;
//! use crossterm::event::{KeyCode, KeyModifiers};
//! use std::time::Duration;
//!
//! let mut entry = Model::new();
//! entry.focus();
//! entry.set_value("2m:3x0");
//! assert_eq!(entry.value(), "2:30");
//!
//! let enter = KeyMsg { key: KeyCode::Enter, modifiers: KeyModifiers::NONE };
//! assert_eq!(
//!     entry.handle_key(&enter),
//!     Some(EntryEvent::Commit(Duration::from_secs(150)))
//! );
//! assert!(!entry.focused());
//! ```

use crate::error::Result;
use crate::format::{parse_duration, sanitize_input};
use crate::Component;
use bubbletea_rs::{Cmd, KeyMsg};
use crossterm::event::{KeyCode, KeyModifiers};
use lipgloss_extras::prelude::*;
use log::debug;
use std::time::Duration;

/// Longest accepted input, enough for `MM:SS`.
pub const MAX_LEN: usize = 5;

/// What a key press did to the field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryEvent {
    /// The user confirmed a valid duration. The field is blurred.
    Commit(Duration),
    /// The user backed out, or confirmed text with no digits. The field is
    /// blurred and cleared.
    Cancel,
}

/// Duration entry state.
#[derive(Debug, Clone)]
pub struct Model {
    /// Text shown before the value.
    pub prompt: String,
    /// Text shown while the value is empty.
    pub placeholder: String,
    /// Style of the prompt.
    pub prompt_style: Style,
    /// Style of the typed text.
    pub text_style: Style,
    /// Style of the placeholder.
    pub placeholder_style: Style,
    /// Style of the cursor block.
    pub cursor_style: Style,
    value: String,
    focus: bool,
}

impl Default for Model {
    fn default() -> Self {
        Self {
            prompt: "set ".to_string(),
            placeholder: "MM:SS".to_string(),
            prompt_style: Style::new().foreground(Color::from("#626262")),
            text_style: Style::new(),
            placeholder_style: Style::new().foreground(Color::from("#4A4A4A")),
            cursor_style: Style::new().reverse(true),
            value: String::new(),
            focus: false,
        }
    }
}

impl Model {
    /// Creates an empty, blurred field.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current text.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Replaces the text, keeping only accepted characters.
    pub fn set_value(&mut self, raw: &str) {
        self.value = sanitize_input(raw, MAX_LEN);
    }

    /// Empties the field.
    pub fn reset(&mut self) {
        self.value.clear();
    }

    /// Parses the current text.
    pub fn duration(&self) -> Result<Duration> {
        parse_duration(&self.value)
    }

    /// Handles a key press while focused. Keys are ignored while blurred.
    pub fn handle_key(&mut self, key: &KeyMsg) -> Option<EntryEvent> {
        if !self.focus {
            return None;
        }

        match key.key {
            KeyCode::Enter => {
                self.blur();
                let event = match self.duration() {
                    Ok(d) => EntryEvent::Commit(d),
                    Err(err) => {
                        debug!("discarding duration entry: {}", err);
                        EntryEvent::Cancel
                    }
                };
                self.reset();
                Some(event)
            }
            KeyCode::Esc => {
                self.blur();
                self.reset();
                Some(EntryEvent::Cancel)
            }
            KeyCode::Backspace => {
                self.value.pop();
                None
            }
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.reset();
                None
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                let mut next = self.value.clone();
                next.push(c);
                self.set_value(&next);
                None
            }
            _ => None,
        }
    }

    /// Renders the prompt, the text and a cursor block while focused.
    pub fn view(&self) -> String {
        let prompt = self.prompt_style.render(&self.prompt);
        let cursor = if self.focus {
            self.cursor_style.render(" ")
        } else {
            String::new()
        };
        if self.value.is_empty() {
            let placeholder = self.placeholder_style.render(&self.placeholder);
            return format!("{}{}{}", prompt, cursor, placeholder);
        }
        format!("{}{}{}", prompt, self.text_style.render(&self.value), cursor)
    }
}

impl Component for Model {
    fn focus(&mut self) -> Option<Cmd> {
        self.focus = true;
        None
    }

    fn blur(&mut self) {
        self.focus = false;
    }

    fn focused(&self) -> bool {
        self.focus
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(entry: &mut Model, code: KeyCode) -> Option<EntryEvent> {
        entry.handle_key(&KeyMsg {
            key: code,
            modifiers: KeyModifiers::NONE,
        })
    }

    fn type_str(entry: &mut Model, s: &str) {
        for c in s.chars() {
            press(entry, KeyCode::Char(c));
        }
    }

    fn plain(s: &str) -> String {
        String::from_utf8(strip_ansi_escapes::strip(s)).unwrap()
    }

    #[test]
    fn test_blurred_ignores_keys() {
        let mut entry = Model::new();
        assert_eq!(press(&mut entry, KeyCode::Char('5')), None);
        assert_eq!(entry.value(), "");
    }

    #[test]
    fn test_typing_is_masked() {
        let mut entry = Model::new();
        entry.focus();
        type_str(&mut entry, "1a2::3b4567");
        assert_eq!(entry.value(), "12:34");
    }

    #[test]
    fn test_backspace_and_clear() {
        let mut entry = Model::new();
        entry.focus();
        type_str(&mut entry, "45");
        press(&mut entry, KeyCode::Backspace);
        assert_eq!(entry.value(), "4");

        entry.handle_key(&KeyMsg {
            key: KeyCode::Char('u'),
            modifiers: KeyModifiers::CONTROL,
        });
        assert_eq!(entry.value(), "");
    }

    #[test]
    fn test_commit_minutes() {
        let mut entry = Model::new();
        entry.focus();
        type_str(&mut entry, "25");
        assert_eq!(
            press(&mut entry, KeyCode::Enter),
            Some(EntryEvent::Commit(Duration::from_secs(1500)))
        );
        assert!(!entry.focused());
        assert_eq!(entry.value(), "");
    }

    #[test]
    fn test_commit_clamps() {
        let mut entry = Model::new();
        entry.focus();
        type_str(&mut entry, "90");
        assert_eq!(
            press(&mut entry, KeyCode::Enter),
            Some(EntryEvent::Commit(Duration::from_secs(3600)))
        );
    }

    #[test]
    fn test_commit_without_digits_cancels() {
        let mut entry = Model::new();
        entry.focus();
        type_str(&mut entry, ":");
        assert_eq!(press(&mut entry, KeyCode::Enter), Some(EntryEvent::Cancel));
        assert!(!entry.focused());
    }

    #[test]
    fn test_escape_cancels() {
        let mut entry = Model::new();
        entry.focus();
        type_str(&mut entry, "12");
        assert_eq!(press(&mut entry, KeyCode::Esc), Some(EntryEvent::Cancel));
        assert_eq!(entry.value(), "");
    }

    #[test]
    fn test_view_placeholder_and_value() {
        let mut entry = Model::new();
        assert_eq!(plain(&entry.view()), "set MM:SS");
        entry.set_value("7:5");
        assert_eq!(plain(&entry.view()), "set 7:5");
        entry.focus();
        assert_eq!(plain(&entry.view()), "set 7:5 ");
    }
}
