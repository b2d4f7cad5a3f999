// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared helpers for the Arbor demos.

use arbor_tree::{NodeId, Tree};

/// Indented text outline of the tree under `root`, one node per line.
///
/// Each line shows the node's render text and the top-left corner of its box.
pub fn outline(tree: &Tree, root: NodeId) -> String {
    let lines = tree.traverse(root, |node, children: Vec<Vec<String>>| {
        let text = if node.label().is_empty() {
            "_".to_owned()
        } else {
            node.label().to_string()
        };
        let at = node
            .position()
            .map_or_else(|| "unplaced".to_owned(), |p| format!("({}, {})", p.x, p.y));
        let mut lines = vec![format!("{text} {at}")];
        for child in children {
            lines.extend(child.into_iter().map(|l| format!("  {l}")));
        }
        lines
    });
    lines.unwrap_or_default().join("\n")
}

/// Install a `tracing` subscriber filtered by `RUST_LOG`, defaulting to `debug`
/// for the Arbor crates.
pub fn init_logging() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("arbor_edit=debug"));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();
}
