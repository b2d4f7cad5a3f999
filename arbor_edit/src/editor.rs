// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The edit controller: turns pointer and key events into tree mutations.

use arbor_tree::{Label, NodeId, Tree, TreeParams};
use kurbo::Point;
use tracing::{debug, trace};

use crate::mode::{Key, Mode, ModeToggle};

/// Where the working root is placed by [`Editor::new`].
pub const DEFAULT_ROOT_POSITION: Point = Point::new(275.0, 20.0);

/// Mode-based edit controller owning a working tree and a quarantine.
///
/// Both trees live in one [`Tree`] arena. Nodes removed from the working tree
/// are moved under the quarantine root rather than freed, so they remain
/// available for inspection and code generation.
///
/// The event handlers are the only mutation entry points. Events that do not
/// apply in the current state (pointer-down on empty canvas, label edits with
/// nothing targeted, deleting the root) do nothing.
///
/// ## Example
///
/// ```rust
/// use arbor_edit::{Editor, Key, Mode};
/// use kurbo::Point;
///
/// let mut editor = Editor::default();
/// let root = editor.root();
///
/// // Press on the root box: a child is spawned and follows the pointer.
/// editor.on_pointer_down(Point::new(300.0, 40.0));
/// assert_eq!(editor.mode(), Mode::Drag);
/// editor.on_pointer_move(Point::new(200.0, 150.0));
/// editor.on_pointer_up();
/// assert_eq!(editor.mode(), Mode::Default);
///
/// let child = editor.tree().children_of(root)[0];
/// assert_eq!(editor.tree().position(child), Some(Point::new(200.0, 150.0)));
///
/// // Hover the child and type a label.
/// editor.on_pointer_move(Point::new(210.0, 160.0));
/// editor.on_key_down(Key::Digit('7'));
/// assert_eq!(editor.tree().label(child).unwrap().as_str(), "7");
/// ```
#[derive(Debug)]
pub struct Editor {
    tree: Tree,
    root: NodeId,
    quarantine: NodeId,
    mode: Mode,
    toggle: ModeToggle,
    /// Target of the current drag, move, or label edit.
    operate: Option<NodeId>,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(TreeParams::default())
    }
}

impl Editor {
    /// Create an editor with a working root labelled `0` at
    /// [`DEFAULT_ROOT_POSITION`] and an empty quarantine.
    pub fn new(params: TreeParams) -> Self {
        Self::with_root_position(params, DEFAULT_ROOT_POSITION)
    }

    /// Create an editor whose working root is placed at `origin`.
    pub fn with_root_position(params: TreeParams, origin: Point) -> Self {
        let mut tree = Tree::with_params(params);
        let root = tree.insert(None, Label::from("0"), Some(origin));
        let quarantine = tree.insert(None, Label::from("0"), None);
        Self {
            tree,
            root,
            quarantine,
            mode: Mode::Default,
            toggle: ModeToggle::Default,
            operate: None,
        }
    }

    /// The arena holding both the working tree and the quarantine.
    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    /// Root of the working tree.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Root of the quarantine collecting removed subtrees.
    pub fn quarantine(&self) -> NodeId {
        self.quarantine
    }

    /// Current interpretation mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// The toggle that is currently switched on.
    pub fn active_toggle(&self) -> ModeToggle {
        self.toggle
    }

    /// Target of the current drag, move, or label edit.
    pub fn operate_node(&self) -> Option<NodeId> {
        self.operate
    }

    /// Switch on `toggle`, switching the other two off.
    ///
    /// Takes effect immediately, even in the middle of a drag.
    pub fn set_mode(&mut self, toggle: ModeToggle) {
        self.toggle = toggle;
        self.mode = toggle.into();
        debug!(?toggle, mode = ?self.mode, "mode selected");
    }

    /// Switch off `toggle`. If it was the active one, [`ModeToggle::Default`]
    /// is selected instead; otherwise nothing changes.
    pub fn clear_mode(&mut self, toggle: ModeToggle) {
        if self.toggle == toggle {
            self.set_mode(ModeToggle::Default);
        }
    }

    /// Free every subtree held in the quarantine.
    pub fn clear_quarantine(&mut self) {
        let removed: alloc::vec::Vec<NodeId> = self.tree.children_of(self.quarantine).to_vec();
        for id in &removed {
            self.tree.remove(*id);
        }
        debug!(count = removed.len(), "quarantine cleared");
    }

    /// Pointer moved to `pt`.
    pub fn on_pointer_move(&mut self, pt: Point) {
        match self.mode {
            Mode::Default => {
                self.operate = self.tree.locate_point(self.root, pt);
                trace!(hover = ?self.operate, "hover");
            }
            Mode::Drag => {
                if let Some(n) = self.operate {
                    self.tree.set_position(n, pt);
                }
            }
            Mode::Move => {
                if let Some(n) = self.operate {
                    self.move_and_snap(n, pt);
                }
            }
            Mode::Delete => {}
        }
    }

    /// Pointer pressed at `pt`.
    ///
    /// A node box under the pointer takes precedence over an edge.
    pub fn on_pointer_down(&mut self, pt: Point) {
        if let Some(n) = self.tree.locate_point(self.root, pt) {
            match self.mode {
                Mode::Default => {
                    self.operate = self.tree.born_child(n);
                    self.mode = Mode::Drag;
                    debug!(parent = ?n, child = ?self.operate, "spawned child, dragging");
                }
                Mode::Delete => self.quarantine_node(n),
                Mode::Move => {
                    self.operate = Some(n);
                    debug!(node = ?n, "selected for move");
                }
                Mode::Drag => {}
            }
        } else if let Some(edge_child) = self.tree.locate_edge(self.root, pt) {
            match self.mode {
                Mode::Default => self.splice_on_edge(edge_child, pt),
                Mode::Delete => self.quarantine_edge(edge_child),
                Mode::Move | Mode::Drag => {}
            }
        }
    }

    /// Pointer released.
    ///
    /// A drag that ends on its parent's position is cancelled and the dragged
    /// node is freed with its whole subtree. For a node spliced onto an edge
    /// that subtree includes the former edge child.
    pub fn on_pointer_up(&mut self) {
        let Some(n) = self.operate else {
            return;
        };
        match self.mode {
            Mode::Drag => {
                if let Some(parent) = self.tree.parent_of(n)
                    && self.tree.position(n) == self.tree.position(parent)
                {
                    // Released where it was born: the spawn is cancelled.
                    self.tree.remove(n);
                    debug!(node = ?n, "drag cancelled without movement");
                }
                self.operate = None;
                self.mode = Mode::Default;
                debug!("drag finished");
            }
            Mode::Move => self.operate = None,
            Mode::Default | Mode::Delete => {}
        }
    }

    /// Key pressed.
    ///
    /// The `d` and `e` shortcuts switch on the delete and move toggles. In
    /// [`Mode::Default`], digits and backspace edit the operate node's label.
    pub fn on_key_down(&mut self, key: Key) {
        if key == Key::DELETE_SHORTCUT && self.toggle != ModeToggle::Delete {
            self.set_mode(ModeToggle::Delete);
        } else if key == Key::MOVE_SHORTCUT && self.toggle != ModeToggle::Move {
            self.set_mode(ModeToggle::Move);
        } else if self.mode == Mode::Default
            && let Some(n) = self.operate
            && let Some(label) = self.tree.label_mut(n)
        {
            match key {
                Key::Digit(c) => label.push(c),
                Key::Backspace => {
                    label.pop();
                }
                Key::Character(_) | Key::Other => {}
            }
        }
    }

    /// Key released. Releasing a mode shortcut switches its toggle off.
    pub fn on_key_up(&mut self, key: Key) {
        if key == Key::DELETE_SHORTCUT {
            self.clear_mode(ModeToggle::Delete);
        } else if key == Key::MOVE_SHORTCUT {
            self.clear_mode(ModeToggle::Move);
        }
    }

    fn splice_on_edge(&mut self, edge_child: NodeId, pt: Point) {
        if self.tree.parent_of(edge_child).is_none() {
            return;
        }
        let n = self.tree.insert(None, Label::default(), Some(pt));
        self.tree.splice_as_new_parent(edge_child, n);
        self.operate = Some(n);
        self.mode = Mode::Drag;
        debug!(node = ?n, below = ?edge_child, "spliced onto edge, dragging");
    }

    /// Remove `n` alone: its children are promoted to its parent.
    fn quarantine_node(&mut self, n: NodeId) {
        if self.tree.detach_and_replace_with_children(n).is_some() {
            self.tree.add_child(self.quarantine, n);
            debug!(node = ?n, "node quarantined");
        }
    }

    /// Remove the edge's child end together with its whole subtree.
    fn quarantine_edge(&mut self, edge_child: NodeId) {
        let Some(parent) = self.tree.parent_of(edge_child) else {
            return;
        };
        self.tree.remove_child(parent, edge_child);
        self.tree.add_child(self.quarantine, edge_child);
        debug!(node = ?edge_child, "subtree quarantined");
    }

    /// Place `n` at `pt` and re-parent it under the nearest node.
    ///
    /// The nearest node is searched while `n` is still attached, so it may be
    /// `n` itself or one of its descendants; the resulting self-loop or cycle
    /// detaches that group from the working tree until a later move. The
    /// working root is placed but never re-parented.
    fn move_and_snap(&mut self, n: NodeId, pt: Point) {
        self.tree.set_position(n, pt);
        let Some(parent) = self.tree.parent_of(n) else {
            return;
        };
        let Some(target) = self.tree.nearest_node(self.root, pt) else {
            return;
        };
        self.tree.remove_child(parent, n);
        self.tree.add_child(target, n);
        trace!(node = ?n, from = ?parent, to = ?target, "re-parented");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn editor_at_origin() -> Editor {
        Editor::with_root_position(TreeParams::default(), Point::ZERO)
    }

    #[test]
    fn starts_in_default_mode_with_two_roots() {
        let editor = Editor::default();
        assert_eq!(editor.mode(), Mode::Default);
        assert_eq!(editor.active_toggle(), ModeToggle::Default);
        assert_eq!(editor.operate_node(), None);
        assert_eq!(editor.tree().position(editor.root()), Some(DEFAULT_ROOT_POSITION));
        assert_eq!(editor.tree().position(editor.quarantine()), None);
        assert_eq!(editor.tree().parent_of(editor.root()), None);
        assert_eq!(editor.tree().parent_of(editor.quarantine()), None);
    }

    #[test]
    fn toggles_are_exclusive_and_fall_back_to_default() {
        let mut editor = editor_at_origin();
        editor.set_mode(ModeToggle::Delete);
        assert_eq!(editor.mode(), Mode::Delete);

        editor.set_mode(ModeToggle::Move);
        assert_eq!(editor.mode(), Mode::Move);
        assert_eq!(editor.active_toggle(), ModeToggle::Move);

        // Clearing an inactive toggle changes nothing.
        editor.clear_mode(ModeToggle::Delete);
        assert_eq!(editor.mode(), Mode::Move);

        editor.clear_mode(ModeToggle::Move);
        assert_eq!(editor.mode(), Mode::Default);
        assert_eq!(editor.active_toggle(), ModeToggle::Default);

        editor.clear_mode(ModeToggle::Default);
        assert_eq!(editor.mode(), Mode::Default);
    }

    #[test]
    fn shortcut_keys_hold_a_mode() {
        let mut editor = editor_at_origin();
        editor.on_key_down(Key::DELETE_SHORTCUT);
        assert_eq!(editor.mode(), Mode::Delete);
        // Auto-repeat keeps the mode.
        editor.on_key_down(Key::DELETE_SHORTCUT);
        assert_eq!(editor.mode(), Mode::Delete);
        editor.on_key_up(Key::DELETE_SHORTCUT);
        assert_eq!(editor.mode(), Mode::Default);

        editor.on_key_down(Key::MOVE_SHORTCUT);
        assert_eq!(editor.mode(), Mode::Move);
        // Releasing the other shortcut does not leave move mode.
        editor.on_key_up(Key::DELETE_SHORTCUT);
        assert_eq!(editor.mode(), Mode::Move);
        editor.on_key_up(Key::MOVE_SHORTCUT);
        assert_eq!(editor.mode(), Mode::Default);
    }

    #[test]
    fn hover_tracks_node_under_pointer() {
        let mut editor = editor_at_origin();
        editor.on_pointer_move(Point::new(10.0, 10.0));
        assert_eq!(editor.operate_node(), Some(editor.root()));
        editor.on_pointer_move(Point::new(300.0, 300.0));
        assert_eq!(editor.operate_node(), None);
    }

    #[test]
    fn label_entry_and_backspace() {
        let mut editor = editor_at_origin();
        let root = editor.root();
        // Nothing hovered: ignored.
        editor.on_key_down(Key::Digit('5'));
        assert_eq!(editor.tree().label(root).unwrap().as_str(), "0");

        editor.on_pointer_move(Point::new(10.0, 10.0));
        editor.on_key_down(Key::Digit('5'));
        editor.on_key_down(Key::Digit('1'));
        assert_eq!(editor.tree().label(root).unwrap().as_str(), "051");
        editor.on_key_down(Key::Character('x'));
        editor.on_key_down(Key::Backspace);
        assert_eq!(editor.tree().label(root).unwrap().as_str(), "05");
        for _ in 0..4 {
            editor.on_key_down(Key::Backspace);
        }
        assert!(editor.tree().label(root).unwrap().is_empty());
    }

    #[test]
    fn pointer_down_on_empty_canvas_does_nothing() {
        let mut editor = editor_at_origin();
        editor.on_pointer_down(Point::new(400.0, 400.0));
        assert_eq!(editor.mode(), Mode::Default);
        assert_eq!(editor.operate_node(), None);
        assert!(editor.tree().children_of(editor.root()).is_empty());
    }

    #[test]
    fn drag_places_spawned_child() {
        let mut editor = editor_at_origin();
        let root = editor.root();
        editor.on_pointer_down(Point::new(10.0, 10.0));
        let child = editor.operate_node().unwrap();
        assert_eq!(editor.mode(), Mode::Drag);
        assert_eq!(editor.tree().parent_of(child), Some(root));
        assert_eq!(editor.tree().position(child), Some(Point::ZERO));

        editor.on_pointer_move(Point::new(0.0, 120.0));
        editor.on_pointer_up();
        assert_eq!(editor.mode(), Mode::Default);
        assert_eq!(editor.operate_node(), None);
        assert_eq!(editor.tree().children_of(root), &[child]);
        assert_eq!(editor.tree().position(child), Some(Point::new(0.0, 120.0)));
    }

    #[test]
    fn digits_are_ignored_while_dragging() {
        let mut editor = editor_at_origin();
        editor.on_pointer_down(Point::new(10.0, 10.0));
        let child = editor.operate_node().unwrap();
        editor.on_key_down(Key::Digit('3'));
        assert!(editor.tree().label(child).unwrap().is_empty());
    }

    #[test]
    fn move_mode_ignores_edges_and_root_is_never_reparented() {
        let mut editor = editor_at_origin();
        let root = editor.root();
        editor.set_mode(ModeToggle::Move);
        editor.on_pointer_down(Point::new(10.0, 10.0));
        assert_eq!(editor.operate_node(), Some(root));
        editor.on_pointer_move(Point::new(70.0, 80.0));
        assert_eq!(editor.tree().position(root), Some(Point::new(70.0, 80.0)));
        assert_eq!(editor.tree().parent_of(root), None);
        editor.on_pointer_up();
        assert_eq!(editor.operate_node(), None);
        assert_eq!(editor.mode(), Mode::Move);
    }

    #[test]
    fn clear_quarantine_frees_removed_nodes() {
        let mut editor = editor_at_origin();
        editor.on_pointer_down(Point::new(10.0, 10.0));
        editor.on_pointer_move(Point::new(0.0, 200.0));
        editor.on_pointer_up();
        let child = editor.tree().children_of(editor.root())[0];

        editor.set_mode(ModeToggle::Delete);
        editor.on_pointer_down(Point::new(10.0, 210.0));
        assert_eq!(editor.tree().children_of(editor.quarantine()), &[child]);

        editor.clear_quarantine();
        assert!(editor.tree().children_of(editor.quarantine()).is_empty());
        assert!(!editor.tree().is_alive(child));
    }
}
