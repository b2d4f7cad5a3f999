// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=arbor_tree --heading-base-level=0

//! Arbor Tree: an ordered, labelled node tree with canvas hit testing.
//!
//! Arbor Tree is the data layer of a small tree sketching tool: each node is a
//! fixed-size box on a 2D canvas, carries an editable numeric label, and keeps
//! its children sorted by label value. Edges are the lines between a node's
//! centre and each child's centre.
//!
//! - Nodes live in an arena and are addressed by generational [`NodeId`]s, so
//!   parent links are plain indices. Re-parenting that forms a cycle is
//!   representable and never violates ownership.
//! - Any parentless node is a root; several trees can share one arena and
//!   move subtrees between each other without copying.
//! - Geometric queries answer "which box is under the pointer", "which edge is
//!   the pointer on", and "which node is near the pointer".
//!
//! ## Not a scene graph
//!
//! There are no transforms, clips, or z-order. Positions are absolute canvas
//! coordinates of each box's top-left corner, and precedence among
//! overlapping boxes is preorder traversal order: an ancestor is found before
//! any of its descendants.
//!
//! ## API overview
//!
//! - [`Tree`]: node arena with structural edits, traversal, and queries.
//! - [`Node`]: read-only view of one node (label, position, flags, links).
//! - [`Label`]: character-wise editable label with a numeric sort value.
//! - [`NodeFlags`]: `READ` / `DELETED` markers for code generation.
//! - [`TreeParams`]: node box size and edge hit tolerance.
//!
//! Key operations:
//! - [`Tree::insert`], [`Tree::add_child`], [`Tree::remove_child`], [`Tree::remove`]
//! - [`Tree::detach_and_replace_with_children`] and [`Tree::splice_as_new_parent`]
//! - [`Tree::born_child`] and [`Tree::clone_subtree`]
//! - [`Tree::locate_point`], [`Tree::locate_edge`], [`Tree::nearest_node`]
//! - [`Tree::traverse`] and [`Tree::traverse_filtered`] (postorder, child
//!   results passed to the parent's visitor)
//!
//! ## Example
//!
//! ```rust
//! use arbor_tree::{Label, Tree};
//! use kurbo::Point;
//!
//! let mut tree = Tree::new();
//! let root = tree.insert(None, Label::from("0"), Some(Point::new(0.0, 0.0)));
//! let child = tree.insert(Some(root), Label::from("1"), Some(Point::new(100.0, 0.0)));
//!
//! // Node boxes are 50x50 by default; the point lies inside the child's box.
//! assert_eq!(tree.locate_point(root, Point::new(120.0, 10.0)), Some(child));
//! // The edge runs between the box centres (25, 25) and (125, 25).
//! assert_eq!(tree.locate_edge(root, Point::new(75.0, 27.0)), Some(child));
//!
//! let text = tree.traverse(root, |node, kids: Vec<String>| {
//!     format!("{}[{}]", node.label(), kids.join(","))
//! });
//! assert_eq!(text.as_deref(), Some("0[1[]]"));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod hit;
mod tree;
mod types;
mod util;

pub use tree::{Node, Tree};
pub use types::{Label, NodeFlags, NodeId, TreeParams};
