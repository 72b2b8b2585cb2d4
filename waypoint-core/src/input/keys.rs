//! Keyboard events delivered to the address bar.

use serde::{Deserialize, Serialize};

use super::ActiveField;

/// Keys the address bar distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Key {
    /// Confirm the highlighted candidate or commit.
    Enter,
    /// Collapse suggestions or revert the field.
    Escape,
    /// Move the highlight up.
    ArrowUp,
    /// Move the highlight down.
    ArrowDown,
    /// Consumed without effect.
    ArrowLeft,
    /// Consumed without effect.
    ArrowRight,
    /// Deletes text before the caret.
    Backspace,
    /// Deletes text after the caret.
    Delete,
    /// Any other key, typically one that edits text.
    Other,
}

impl Key {
    /// Map a DOM-style key code.
    ///
    /// # Examples
    /// ```
    /// use waypoint_core::Key;
    ///
    /// assert_eq!(Key::from_code(13), Key::Enter);
    /// assert_eq!(Key::from_code(65), Key::Other);
    /// ```
    #[must_use]
    pub const fn from_code(code: u16) -> Self {
        match code {
            8 => Self::Backspace,
            13 => Self::Enter,
            27 => Self::Escape,
            37 => Self::ArrowLeft,
            38 => Self::ArrowUp,
            39 => Self::ArrowRight,
            40 => Self::ArrowDown,
            46 => Self::Delete,
            _ => Self::Other,
        }
    }

    /// Whether the key removes text.
    #[must_use]
    pub const fn is_deletion(self) -> bool {
        matches!(self, Self::Backspace | Self::Delete)
    }
}

/// A key release on one of the two fields.
///
/// `text` is the field's content after the key took effect; the address bar
/// reads it at the moment of the event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyEvent {
    /// Field that received the key.
    pub field: ActiveField,
    /// Key that was released.
    pub key: Key,
    /// Field text after the key.
    pub text: String,
}

impl KeyEvent {
    /// Construct a key event.
    pub fn new(field: ActiveField, key: Key, text: impl Into<String>) -> Self {
        Self {
            field,
            key,
            text: text.into(),
        }
    }
}
