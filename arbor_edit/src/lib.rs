// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=arbor_edit --heading-base-level=0

//! Arbor Edit: a mode-based edit controller for [`arbor_tree`] trees.
//!
//! The [`Editor`] owns an [`arbor_tree::Tree`] arena with two roots, the
//! working tree and a quarantine for removed subtrees, and exposes discrete
//! pointer and key handlers as its only mutation entry points. A host (canvas
//! widget, terminal UI, test script) feeds it events and reads the tree back
//! for rendering or code generation.
//!
//! ## Modes
//!
//! | Mode | pointer-down on node | pointer-down on edge | pointer-move | pointer-up |
//! |---|---|---|---|---|
//! | [`Mode::Default`] | spawn child, enter `Drag` | splice new node, enter `Drag` | hover target for label edits | — |
//! | [`Mode::Drag`] | — | — | move the new node | cancel if never moved; back to `Default` |
//! | [`Mode::Delete`] | quarantine node, promote its children | quarantine child subtree | — | — |
//! | [`Mode::Move`] | select node | — | move and snap under nearest node | deselect |
//!
//! Hosts select modes through three exclusive toggles ([`ModeToggle`]) with
//! [`Editor::set_mode`] and [`Editor::clear_mode`]; clearing the active toggle
//! falls back to `Default`. `Drag` is never selected from outside. Holding the
//! `d` or `e` key switches the delete or move toggle on until release.
//!
//! Every event that does not apply (empty canvas, nothing hovered, deleting the
//! root) is ignored rather than reported.
//!
//! ## Logging
//!
//! Mode changes and structural edits are reported through [`tracing`] at
//! `debug` level, hover and move re-parenting at `trace` level. This crate never
//! installs a subscriber.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod editor;
mod mode;

pub use editor::{DEFAULT_ROOT_POSITION, Editor};
pub use mode::{Key, Mode, ModeToggle};
