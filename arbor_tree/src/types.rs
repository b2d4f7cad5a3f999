// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the tree: node identifiers, flags, labels, and parameters.

use alloc::string::String;
use core::fmt;

use kurbo::Size;

/// Identifier for a node in the tree (generational).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct NodeId(pub(crate) u32, pub(crate) u32);

impl NodeId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

bitflags::bitflags! {
    /// Auxiliary markers carried on a node for code generation.
    ///
    /// The tree stores and returns these but never interprets them.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct NodeFlags: u8 {
        /// Node was read by the operation being modelled.
        const READ    = 0b0000_0001;
        /// Node was deleted by the operation being modelled.
        const DELETED = 0b0000_0010;
    }
}

/// Display label of a node.
///
/// Labels are edited one character at a time (digit entry and backspace), and
/// siblings are ordered by [`Label::value`].
///
/// ```rust
/// use arbor_tree::Label;
///
/// let mut label = Label::default();
/// label.push('4');
/// label.push('2');
/// assert_eq!(label.as_str(), "42");
/// assert_eq!(label.value(), 42.0);
///
/// label.pop();
/// label.pop();
/// assert!(label.is_empty());
/// assert_eq!(label.value(), 0.0);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Label(String);

impl Label {
    /// Create a label from its text.
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// The label text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` if the label has no text.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Append one character.
    pub fn push(&mut self, c: char) {
        self.0.push(c);
    }

    /// Drop the last character, if any.
    pub fn pop(&mut self) -> Option<char> {
        self.0.pop()
    }

    /// Numeric value used for sibling ordering.
    ///
    /// Leading zeros are ignored. Empty text counts as `0`, and so does text
    /// that is not a finite number (`NaN` and `inf` included), so the value
    /// is never NaN.
    pub fn value(&self) -> f64 {
        self.0
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .unwrap_or(0.0)
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Label {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

/// Geometry parameters shared by every node of a [`crate::Tree`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TreeParams {
    /// Width and height of every node box. Only used for hit testing.
    pub node_size: Size,
    /// A point closer than this to the line through an edge hits that edge.
    pub edge_tolerance: f64,
}

impl Default for TreeParams {
    fn default() -> Self {
        Self {
            node_size: Size::new(50.0, 50.0),
            edge_tolerance: 5.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_value_is_always_finite() {
        assert_eq!(Label::from("007").value(), 7.0);
        assert_eq!(Label::from("2.5").value(), 2.5);
        assert_eq!(Label::from("abc").value(), 0.0);
        for text in ["NaN", "nan", "inf", "-inf", "infinity", "1e400"] {
            assert_eq!(Label::from(text).value(), 0.0, "{text}");
        }
    }
}
