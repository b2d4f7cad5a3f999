// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=arbor_codegen --heading-base-level=0

//! Arbor Codegen: turn [`arbor_tree`] trees into C++ test fixture declarations.
//!
//! Each node becomes one `auto` declaration naming its children, emitted in
//! postorder so every name is declared before it is used:
//!
//! ```rust
//! use arbor_codegen::label_node_declarations;
//! use arbor_tree::{Label, Tree};
//!
//! let mut tree = Tree::new();
//! let root = tree.insert(None, Label::from("0"), None);
//! tree.insert(Some(root), Label::from("4"), None);
//! tree.insert(Some(root), Label::from("9"), None);
//!
//! assert_eq!(
//!     label_node_declarations(&tree, root),
//!     [
//!         "auto leafNode0 = LabelNode(4, {  });",
//!         "auto leafNode1 = LabelNode(9, {  });",
//!         "auto middleNode0 = LabelNode(0, { leafNode0, leafNode1 });",
//!     ]
//! );
//! ```
//!
//! Leaves and inner nodes are numbered separately (`leafNode{i}`,
//! `middleNode{j}`) in visit order. An empty label is written as `0`.
//!
//! [`Session`] reproduces the two-step "store original, then generate after
//! change" workflow of the sketching tool.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod session;

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use arbor_tree::{Label, Node, NodeFlags, NodeId, Tree};

pub use session::{Session, Stage};

/// Assigns `leafNode{i}` / `middleNode{j}` names in visit order.
#[derive(Debug, Default)]
struct Namer {
    leaves: usize,
    middles: usize,
}

impl Namer {
    fn next(&mut self, has_children: bool) -> String {
        if has_children {
            let name = format!("middleNode{}", self.middles);
            self.middles += 1;
            name
        } else {
            let name = format!("leafNode{}", self.leaves);
            self.leaves += 1;
            name
        }
    }
}

fn label_text(label: &Label) -> &str {
    if label.is_empty() { "0" } else { label.as_str() }
}

/// `LabelNode` declarations for the whole subtree under `root`.
///
/// Returns no lines if `root` is stale or caught in a parent cycle.
pub fn label_node_declarations(tree: &Tree, root: NodeId) -> Vec<String> {
    let mut namer = Namer::default();
    let mut lines = Vec::new();
    tree.traverse(root, |node: &Node, children: Vec<String>| {
        let name = namer.next(!children.is_empty());
        lines.push(format!(
            "auto {name} = LabelNode({}, {{ {} }});",
            label_text(node.label()),
            children.join(", ")
        ));
        name
    });
    lines
}

/// `ReadStateLabelNode` declarations for `root` and the descendants reachable
/// through nodes marked [`NodeFlags::READ`].
///
/// A child without the marker is left out together with its subtree. Each
/// line ends with the node's own read state.
pub fn read_state_declarations(tree: &Tree, root: NodeId) -> Vec<String> {
    let mut namer = Namer::default();
    let mut lines = Vec::new();
    tree.traverse_filtered(
        root,
        |child: &Node| child.flags().contains(NodeFlags::READ),
        |node: &Node, children: Vec<String>| {
            let name = namer.next(!children.is_empty());
            let read = node.flags().contains(NodeFlags::READ);
            lines.push(format!(
                "auto {name} = ReadStateLabelNode({}, {{ {} }},  {read});",
                label_text(node.label()),
                children.join(", ")
            ));
            name
        },
    );
    lines
}
