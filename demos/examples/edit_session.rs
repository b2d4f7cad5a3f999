// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Replay a scripted editing session and print the generated declarations.
//!
//! The script spawns a few nodes and labels them. It then splices a node onto
//! an edge, deletes a node and an edge, and moves a node under another. After
//! each phase the working tree and the quarantine are printed as outlines.
//!
//! Run:
//! - `cargo run -p arbor_demos --example edit_session`
//! - `RUST_LOG=arbor_edit=trace cargo run -p arbor_demos --example edit_session`

use arbor_codegen::{Session, read_state_declarations};
use arbor_demos::{init_logging, outline};
use arbor_edit::{Editor, Key, ModeToggle};
use arbor_tree::{NodeFlags, NodeId, Tree};
use kurbo::{Point, Vec2};

/// Hover `at` and type `text` one key at a time.
fn type_label(editor: &mut Editor, at: Point, text: &str) {
    editor.on_pointer_move(at);
    for c in text.chars() {
        let mut buf = [0_u8; 4];
        editor.on_key_down(Key::from_name(c.encode_utf8(&mut buf)));
    }
}

/// Press inside the box at `from`, drag the new child to `to`, release, and
/// label it.
fn spawn(editor: &mut Editor, from: Point, to: Point, label: &str) {
    editor.on_pointer_down(from);
    editor.on_pointer_move(to);
    editor.on_pointer_up();
    type_label(editor, to + Vec2::new(5.0, 5.0), label);
}

fn print_state(title: &str, editor: &Editor) {
    tracing::info!(phase = title, mode = ?editor.mode(), "session phase");
    println!("== {title}");
    println!("{}", outline(editor.tree(), editor.root()));
    println!("-- quarantine");
    println!("{}", outline(editor.tree(), editor.quarantine()));
    println!();
}

fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{line}");
    }
}

fn child_labelled(tree: &Tree, parent: NodeId, text: &str) -> Option<NodeId> {
    tree.children_of(parent)
        .iter()
        .copied()
        .find(|&id| tree.label(id).is_some_and(|l| l.as_str() == text))
}

fn main() {
    init_logging();

    let mut editor = Editor::default();
    let mut session = Session::new();

    // Relabel the root from `0` to `50`.
    editor.on_pointer_move(Point::new(280.0, 30.0));
    editor.on_key_down(Key::from_name("Backspace"));
    type_label(&mut editor, Point::new(280.0, 30.0), "50");

    spawn(&mut editor, Point::new(290.0, 40.0), Point::new(150.0, 150.0), "20");
    spawn(&mut editor, Point::new(290.0, 40.0), Point::new(400.0, 150.0), "80");
    spawn(&mut editor, Point::new(160.0, 160.0), Point::new(80.0, 280.0), "10");
    spawn(&mut editor, Point::new(160.0, 160.0), Point::new(220.0, 280.0), "30");
    spawn(&mut editor, Point::new(410.0, 160.0), Point::new(400.0, 280.0), "90");
    print_state("built", &editor);

    println!("[{}]", session.stage().caption());
    print_lines(&session.advance(editor.tree(), editor.root(), editor.quarantine()));
    println!();

    // Between the boxes of 80 and 90, on the edge joining their centres.
    editor.on_pointer_down(Point::new(425.0, 225.0));
    editor.on_pointer_move(Point::new(470.0, 215.0));
    editor.on_pointer_up();
    type_label(&mut editor, Point::new(475.0, 220.0), "85");
    print_state("spliced 85", &editor);

    // Hold `d` and press on 20: its children move up to the root.
    editor.on_key_down(Key::DELETE_SHORTCUT);
    editor.on_pointer_down(Point::new(160.0, 160.0));
    editor.on_key_up(Key::DELETE_SHORTCUT);
    print_state("deleted 20", &editor);

    // Midway along the root -> 80 edge: the whole 80 subtree goes.
    editor.set_mode(ModeToggle::Delete);
    editor.on_pointer_down(Point::new(362.5, 110.0));
    editor.clear_mode(ModeToggle::Delete);
    print_state("deleted edge to 80", &editor);

    // Hold `e`, grab 30 and drop it on 10's corner.
    editor.on_key_down(Key::MOVE_SHORTCUT);
    editor.on_pointer_down(Point::new(230.0, 290.0));
    editor.on_pointer_move(Point::new(80.0, 280.0));
    editor.on_pointer_up();
    editor.on_key_up(Key::MOVE_SHORTCUT);
    print_state("moved 30 under 10", &editor);

    println!("[{}]", session.stage().caption());
    print_lines(&session.advance(editor.tree(), editor.root(), editor.quarantine()));

    // Read-state fixture for a copy where the path root -> 10 -> 30 was read.
    let Some((mut copy, copy_root)) = editor.tree().clone_subtree(editor.root()) else {
        return;
    };
    if let Some(ten) = child_labelled(&copy, copy_root, "10") {
        copy.set_flags(ten, NodeFlags::READ);
        if let Some(thirty) = child_labelled(&copy, ten, "30") {
            copy.set_flags(thirty, NodeFlags::READ);
        }
    }
    println!("read state:");
    print_lines(&read_state_declarations(&copy, copy_root));

    editor.clear_quarantine();
    print_state("quarantine cleared", &editor);
}
