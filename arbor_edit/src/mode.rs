// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Edit modes, the externally selectable mode toggles, and key input.

/// How pointer and key events are interpreted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Hover tracking, spawning and splicing nodes, and label entry.
    #[default]
    Default,
    /// Pointer-down moves nodes or edges into the quarantine.
    Delete,
    /// A freshly created node follows the pointer until release.
    ///
    /// Only entered from [`Mode::Default`]; never selectable from outside.
    Drag,
    /// The selected node follows the pointer and snaps to the nearest node.
    Move,
}

/// The three mutually exclusive mode switches a host can expose.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ModeToggle {
    /// Selects [`Mode::Default`].
    #[default]
    Default,
    /// Selects [`Mode::Delete`].
    Delete,
    /// Selects [`Mode::Move`].
    Move,
}

impl From<ModeToggle> for Mode {
    fn from(toggle: ModeToggle) -> Self {
        match toggle {
            ModeToggle::Default => Self::Default,
            ModeToggle::Delete => Self::Delete,
            ModeToggle::Move => Self::Move,
        }
    }
}

/// Keyboard input understood by the editor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// An ASCII digit, appended to the operate node's label.
    Digit(char),
    /// Removes the last label character.
    Backspace,
    /// Any other single character (`d` and `e` are mode shortcuts).
    Character(char),
    /// Everything else; ignored.
    Other,
}

impl Key {
    /// Shortcut held to enter [`Mode::Delete`].
    pub const DELETE_SHORTCUT: Self = Self::Character('d');
    /// Shortcut held to enter [`Mode::Move`].
    pub const MOVE_SHORTCUT: Self = Self::Character('e');

    /// Interpret a DOM-style key name such as `"7"`, `"Backspace"`, or `"d"`.
    ///
    /// ```
    /// use arbor_edit::Key;
    ///
    /// assert_eq!(Key::from_name("7"), Key::Digit('7'));
    /// assert_eq!(Key::from_name("Backspace"), Key::Backspace);
    /// assert_eq!(Key::from_name("d"), Key::DELETE_SHORTCUT);
    /// assert_eq!(Key::from_name("Shift"), Key::Other);
    /// ```
    pub fn from_name(name: &str) -> Self {
        if name == "Backspace" {
            return Self::Backspace;
        }
        let mut chars = name.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if c.is_ascii_digit() => Self::Digit(c),
            (Some(c), None) => Self::Character(c),
            _ => Self::Other,
        }
    }
}
