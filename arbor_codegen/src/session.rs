// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Two-stage generation: snapshot the original tree, then the edited result.

use alloc::string::String;
use alloc::vec::Vec;

use arbor_tree::{NodeId, Tree};

use crate::label_node_declarations;

/// Step of a [`Session`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Stage {
    /// Next output is the tree before any edits.
    #[default]
    Original,
    /// Next output is the edited tree followed by the removed nodes.
    AfterChange,
}

impl Stage {
    /// Caption for the control that triggers this stage.
    pub fn caption(self) -> &'static str {
        match self {
            Self::Original => "Store original tree state",
            Self::AfterChange => "Generate tree code after change",
        }
    }
}

/// Alternates between recording the original tree and the edited one.
///
/// ```rust
/// use arbor_codegen::{Session, Stage};
/// use arbor_tree::{Label, Tree};
///
/// let mut tree = Tree::new();
/// let working = tree.insert(None, Label::from("0"), None);
/// let removed = tree.insert(None, Label::from("0"), None);
///
/// let mut session = Session::new();
/// let first = session.advance(&tree, working, removed);
/// assert_eq!(first[0], "original:");
/// assert_eq!(session.stage(), Stage::AfterChange);
///
/// let second = session.advance(&tree, working, removed);
/// assert_eq!(second[0], "after modify:");
/// assert_eq!(session.stage(), Stage::Original);
/// ```
#[derive(Clone, Debug, Default)]
pub struct Session {
    stage: Stage,
}

impl Session {
    /// Start at [`Stage::Original`].
    pub fn new() -> Self {
        Self::default()
    }

    /// The stage the next [`Session::advance`] will run.
    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Emit the lines for the current stage and move to the next one.
    ///
    /// [`Stage::Original`] emits `original:` and the working tree.
    /// [`Stage::AfterChange`] emits `after modify:`, the working tree,
    /// `delete nodes:`, and the quarantine, then two empty lines before
    /// wrapping back to [`Stage::Original`].
    pub fn advance(&mut self, tree: &Tree, working: NodeId, quarantine: NodeId) -> Vec<String> {
        let mut lines = Vec::new();
        match self.stage {
            Stage::Original => {
                lines.push(String::from("original:"));
                lines.extend(label_node_declarations(tree, working));
                self.stage = Stage::AfterChange;
            }
            Stage::AfterChange => {
                lines.push(String::from("after modify:"));
                lines.extend(label_node_declarations(tree, working));
                lines.push(String::from("delete nodes:"));
                lines.extend(label_node_declarations(tree, quarantine));
                lines.push(String::new());
                lines.push(String::new());
                self.stage = Stage::Original;
            }
        }
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arbor_tree::Label;

    #[test]
    fn full_cycle_output() {
        let mut tree = Tree::new();
        let working = tree.insert(None, Label::from("0"), None);
        let quarantine = tree.insert(None, Label::from("0"), None);
        let mut session = Session::new();
        assert_eq!(session.stage().caption(), "Store original tree state");

        let first = session.advance(&tree, working, quarantine);
        assert_eq!(first, ["original:", "auto leafNode0 = LabelNode(0, {  });"]);
        assert_eq!(session.stage().caption(), "Generate tree code after change");

        tree.insert(Some(working), Label::from("5"), None);
        tree.insert(Some(quarantine), Label::from("8"), None);
        let second = session.advance(&tree, working, quarantine);
        assert_eq!(
            second,
            [
                "after modify:",
                "auto leafNode0 = LabelNode(5, {  });",
                "auto middleNode0 = LabelNode(0, { leafNode0 });",
                "delete nodes:",
                "auto leafNode0 = LabelNode(8, {  });",
                "auto middleNode0 = LabelNode(0, { leafNode0 });",
                "",
                "",
            ]
        );
        assert_eq!(session.stage(), Stage::Original);
    }
}
