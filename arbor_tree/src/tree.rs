// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core tree implementation: node storage, structural edits, traversal.

use alloc::vec::Vec;

use kurbo::Point;
use smallvec::SmallVec;

use crate::types::{Label, NodeFlags, NodeId, TreeParams};

/// Arena of labelled nodes forming one or more rooted, ordered trees.
///
/// Any node without a parent is a root. An editing session typically keeps
/// two roots in the same arena (a working tree and a quarantine for removed
/// subtrees) so that subtrees can move between them without copying.
///
/// Children are kept sorted ascending by [`Label::value`]; every structural
/// insertion re-establishes the order.
///
/// Operations that receive a stale [`NodeId`] do nothing and, where they
/// return something, return `None`.
///
/// Structural edits do not prevent cycles, so a node can end up with no root
/// above it (see [`Tree::is_rooted`]). Walks and queries started from such a
/// node return `None`; walks started from a rooted node never reach one.
///
/// ## Example
///
/// ```rust
/// use arbor_tree::{Label, Tree};
/// use kurbo::Point;
///
/// let mut tree = Tree::new();
/// let root = tree.insert(None, Label::from("0"), Some(Point::new(0.0, 0.0)));
/// let a = tree.insert(Some(root), Label::from("5"), None);
/// let b = tree.insert(Some(root), Label::from("3"), None);
///
/// assert_eq!(tree.children_of(root), &[b, a]);
/// assert_eq!(tree.parent_of(a), Some(root));
/// ```
pub struct Tree {
    /// slots
    nodes: Vec<Option<Node>>,
    /// last generation per slot (persists across frees)
    generations: Vec<u32>,
    free_list: Vec<usize>,
    params: TreeParams,
}

impl core::fmt::Debug for Tree {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.nodes.len();
        let alive = self.nodes.iter().filter(|n| n.is_some()).count();
        let free = self.free_list.len();
        f.debug_struct("Tree")
            .field("nodes_total", &total)
            .field("nodes_alive", &alive)
            .field("free_list", &free)
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

/// Read-only view of one node.
#[derive(Clone, Debug)]
pub struct Node {
    generation: u32,
    parent: Option<NodeId>,
    children: SmallVec<[NodeId; 4]>,
    label: Label,
    position: Option<Point>,
    flags: NodeFlags,
}

impl Node {
    fn new(generation: u32, label: Label, position: Option<Point>) -> Self {
        Self {
            generation,
            parent: None,
            children: SmallVec::new(),
            label,
            position,
            flags: NodeFlags::empty(),
        }
    }

    /// The node's label.
    pub fn label(&self) -> &Label {
        &self.label
    }

    /// Top-left corner of the node box, or `None` if the node was never placed.
    pub fn position(&self) -> Option<Point> {
        self.position
    }

    /// Code generation markers.
    pub fn flags(&self) -> NodeFlags {
        self.flags
    }

    /// Parent, or `None` for a root.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Children in ascending label order.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

impl Tree {
    /// Create an empty tree with default [`TreeParams`].
    pub fn new() -> Self {
        Self::with_params(TreeParams::default())
    }

    /// Create an empty tree with the given geometry parameters.
    pub fn with_params(params: TreeParams) -> Self {
        Self {
            nodes: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            params,
        }
    }

    /// Geometry parameters of this tree.
    pub fn params(&self) -> &TreeParams {
        &self.params
    }

    /// Insert a new node as a child of `parent` (or as a root if `None`).
    ///
    /// A stale `parent` also yields a root.
    pub fn insert(
        &mut self,
        parent: Option<NodeId>,
        label: Label,
        position: Option<Point>,
    ) -> NodeId {
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.nodes[idx] = Some(Node::new(generation, label, position));
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId uses 32-bit indices by design."
            )]
            (idx as u32, generation)
        } else {
            let generation = 1_u32;
            self.nodes.push(Some(Node::new(generation, label, position)));
            self.generations.push(generation);
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId uses 32-bit indices by design."
            )]
            ((self.nodes.len() - 1) as u32, generation)
        };
        let id = NodeId::new(idx, generation);
        if let Some(p) = parent {
            self.add_child(p, id);
        }
        id
    }

    /// Remove a node and its whole subtree from the arena.
    ///
    /// The node is unlinked from its parent first; every identifier in the
    /// subtree becomes stale.
    pub fn remove(&mut self, id: NodeId) {
        if !self.is_alive(id) {
            return;
        }
        if let Some(parent) = self.node_ref(id).parent {
            self.unlink_parent(id, parent);
        }
        let children = self.node_ref(id).children.clone();
        for child in children {
            self.remove(child);
        }
        self.nodes[id.idx()] = None;
        self.free_list.push(id.idx());
    }

    /// Make `child` the last child of `parent`, then re-sort `parent`'s children.
    ///
    /// If `child` already has a parent it is unlinked from it first. There is
    /// no cycle check: `child` may be `parent` itself or one of its ancestors.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) {
        if !self.is_alive(parent) || !self.is_alive(child) {
            return;
        }
        if let Some(old) = self.node_ref(child).parent {
            self.unlink_parent(child, old);
        }
        self.node_mut(parent).children.push(child);
        self.node_mut(child).parent = Some(parent);
        self.sort_children(parent);
    }

    /// Unlink `child` from `parent`. No-op if `child` is not one of its children.
    ///
    /// The unlinked child becomes a root and keeps its own subtree.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) {
        if !self.is_alive(parent) || !self.is_alive(child) {
            return;
        }
        if self.node_ref(parent).children.contains(&child) {
            self.unlink_parent(child, parent);
        }
    }

    /// Unlink `id` from its parent and promote its children to that parent.
    ///
    /// Afterwards `id` is a childless root. Returns the former parent, or
    /// `None` (and does nothing) if `id` is a root or stale.
    pub fn detach_and_replace_with_children(&mut self, id: NodeId) -> Option<NodeId> {
        let parent = self.parent_of(id)?;
        self.unlink_parent(id, parent);
        let children = core::mem::take(&mut self.node_mut(id).children);
        for child in children {
            self.node_mut(child).parent = None;
            self.add_child(parent, child);
        }
        Some(parent)
    }

    /// Insert `new_node` on the edge between `edge_child` and its parent.
    ///
    /// `edge_child` is unlinked from its parent, `new_node` is added to that
    /// parent, and `edge_child` becomes a child of `new_node`. No-op if
    /// `edge_child` is a root.
    pub fn splice_as_new_parent(&mut self, edge_child: NodeId, new_node: NodeId) {
        if !self.is_alive(new_node) {
            return;
        }
        let Some(parent) = self.parent_of(edge_child) else {
            return;
        };
        self.remove_child(parent, edge_child);
        self.add_child(parent, new_node);
        self.add_child(new_node, edge_child);
    }

    /// Spawn a child of `parent` at the parent's current position with an
    /// empty label.
    pub fn born_child(&mut self, parent: NodeId) -> Option<NodeId> {
        let position = self.node(parent)?.position;
        Some(self.insert(Some(parent), Label::default(), position))
    }

    /// Deep-copy the subtree rooted at `id` into a new, independent tree.
    ///
    /// Every copied node keeps its label and position. Copies start with
    /// empty flags and with no parent link, so the copy carries no
    /// back-references; the children lists mirror the source shape. Returns
    /// the new tree together with the identifier of the copied root.
    ///
    /// Returns `None` if `id` is stale or not [rooted](Tree::is_rooted).
    pub fn clone_subtree(&self, id: NodeId) -> Option<(Self, NodeId)> {
        if !self.is_rooted(id) {
            return None;
        }
        let mut copy = Self::with_params(self.params);
        let root = self.copy_into(id, &mut copy);
        Some((copy, root))
    }

    fn copy_into(&self, id: NodeId, copy: &mut Self) -> NodeId {
        let node = self.node_ref(id);
        let children: SmallVec<[NodeId; 4]> = node
            .children
            .iter()
            .map(|&child| self.copy_into(child, copy))
            .collect();
        let new_id = copy.insert(None, node.label.clone(), node.position);
        copy.node_mut(new_id).children = children;
        new_id
    }

    /// Postorder traversal: children first, then the node itself.
    ///
    /// `visitor` receives the node and the results of its children, in child
    /// order, and returns the node's own result. Returns the result for `id`,
    /// or `None` if `id` is stale or not [rooted](Tree::is_rooted).
    pub fn traverse<R>(&self, id: NodeId, mut visitor: impl FnMut(&Node, Vec<R>) -> R) -> Option<R> {
        self.traverse_filtered(id, |_| true, &mut visitor)
    }

    /// Like [`Tree::traverse`], but a child for which `predicate` returns
    /// `false` is skipped together with its whole subtree.
    ///
    /// The predicate is never asked about `id` itself.
    pub fn traverse_filtered<R>(
        &self,
        id: NodeId,
        mut predicate: impl FnMut(&Node) -> bool,
        mut visitor: impl FnMut(&Node, Vec<R>) -> R,
    ) -> Option<R> {
        if !self.is_rooted(id) {
            return None;
        }
        Some(self.traverse_recursive(id, &mut predicate, &mut visitor))
    }

    fn traverse_recursive<R, P, V>(&self, id: NodeId, predicate: &mut P, visitor: &mut V) -> R
    where
        P: FnMut(&Node) -> bool,
        V: FnMut(&Node, Vec<R>) -> R,
    {
        let node = self.node_ref(id);
        let mut results = Vec::with_capacity(node.children.len());
        for &child in &node.children {
            if predicate(self.node_ref(child)) {
                results.push(self.traverse_recursive(child, predicate, visitor));
            }
        }
        visitor(node, results)
    }

    /// Move the node box to `position`.
    pub fn set_position(&mut self, id: NodeId, position: Point) {
        if let Some(n) = self.node_opt_mut(id) {
            n.position = Some(position);
        }
    }

    /// Replace the node's code generation markers.
    pub fn set_flags(&mut self, id: NodeId, flags: NodeFlags) {
        if let Some(n) = self.node_opt_mut(id) {
            n.flags = flags;
        }
    }

    /// Mutable access to a node's label for character-wise editing.
    ///
    /// Editing a label does not re-sort the siblings; order is only
    /// re-established on the next insertion under the same parent.
    pub fn label_mut(&mut self, id: NodeId) -> Option<&mut Label> {
        self.node_opt_mut(id).map(|n| &mut n.label)
    }

    /// Text shown on the node box: the label, then ` d` if deleted and ` r`
    /// if read.
    pub fn render_text(&self, id: NodeId) -> Option<alloc::string::String> {
        let node = self.node(id)?;
        let mut text = alloc::string::String::from(node.label.as_str());
        if node.flags.contains(NodeFlags::DELETED) {
            text.push_str(" d");
        }
        if node.flags.contains(NodeFlags::READ) {
            text.push_str(" r");
        }
        Some(text)
    }
}

impl Tree {
    // --- accessors ---

    /// Returns true if `id` refers to a live node.
    ///
    /// A `NodeId` is considered live if its slot exists and its generation matches
    /// the current generation stored in that slot.
    pub fn is_alive(&self, id: NodeId) -> bool {
        self.nodes
            .get(id.idx())
            .and_then(|n| n.as_ref())
            .map(|n| n.generation == id.1)
            .unwrap_or(false)
    }

    /// Read-only view of a live node.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        let n = self.nodes.get(id.idx())?.as_ref()?;
        (n.generation == id.1).then_some(n)
    }

    /// Returns the parent of a node if live, or `None` for roots or stale ids.
    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(|n| n.parent)
    }

    /// Get the children of a node, or empty slice if node is stale.
    pub fn children_of(&self, id: NodeId) -> &[NodeId] {
        self.node(id).map_or(&[], |n| &n.children)
    }

    /// Returns the label of a live node.
    pub fn label(&self, id: NodeId) -> Option<&Label> {
        self.node(id).map(|n| &n.label)
    }

    /// Returns the position of a live node, if it has been placed.
    pub fn position(&self, id: NodeId) -> Option<Point> {
        self.node(id).and_then(|n| n.position)
    }

    /// Returns the flags of a node if the identifier is live.
    pub fn flags(&self, id: NodeId) -> Option<NodeFlags> {
        self.node(id).map(|n| n.flags)
    }

    /// Returns true if `id` is live and following parent links from it ends
    /// at a root.
    ///
    /// This is false for every node of a parent cycle and for everything
    /// below one.
    pub fn is_rooted(&self, id: NodeId) -> bool {
        if !self.is_alive(id) {
            return false;
        }
        // A chain that ends at a root has fewer links than there are slots.
        let mut cur = id;
        for _ in 0..self.nodes.len() {
            match self.node_ref(cur).parent {
                Some(parent) => cur = parent,
                None => return true,
            }
        }
        false
    }

    /// Get the next node in preorder.
    ///
    /// Returns `None` if no next node exists or if the current node is stale
    /// or not [rooted](Tree::is_rooted).
    /// This is a standard tree traversal that does not wrap around.
    pub fn next_depth_first(&self, current: NodeId) -> Option<NodeId> {
        if !self.is_rooted(current) {
            return None;
        }
        if let Some(&first_child) = self.node_ref(current).children.first() {
            return Some(first_child);
        }

        let mut node = current;
        while let Some(parent) = self.parent_of(node) {
            if let Some(next_sibling) = self.next_sibling(node) {
                return Some(next_sibling);
            }
            node = parent;
        }
        None
    }

    fn next_sibling(&self, node: NodeId) -> Option<NodeId> {
        let parent = self.parent_of(node)?;
        let siblings = &self.node_ref(parent).children;
        let pos = siblings.iter().position(|&id| id == node)?;
        siblings.get(pos + 1).copied()
    }

    // --- internals ---

    /// Access a live node; panics if `id` is stale.
    pub(crate) fn node_ref(&self, id: NodeId) -> &Node {
        self.nodes[id.idx()].as_ref().expect("dangling NodeId")
    }

    /// Access a live node mutably; panics if `id` is stale.
    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        self.nodes[id.idx()].as_mut().expect("dangling NodeId")
    }

    fn node_opt_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        let n = self.nodes.get_mut(id.idx())?.as_mut()?;
        if n.generation != id.1 {
            return None;
        }
        Some(n)
    }

    fn unlink_parent(&mut self, id: NodeId, parent: NodeId) {
        let p = self.node_mut(parent);
        p.children.retain(|c| *c != id);
        self.node_mut(id).parent = None;
    }

    /// Stable sort by label value, so equal labels keep insertion order.
    fn sort_children(&mut self, parent: NodeId) {
        let mut children = core::mem::take(&mut self.node_mut(parent).children);
        children.sort_by(|&a, &b| {
            let a = self.node_ref(a).label.value();
            let b = self.node_ref(b).label.value();
            a.total_cmp(&b)
        });
        self.node_mut(parent).children = children;
    }
}
