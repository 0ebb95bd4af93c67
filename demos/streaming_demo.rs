//! Scripted streaming walkthrough.
//!
//! Replays the generator scenarios a host editor drives: a heading that is
//! revised once content arrives, paragraphs that grow across takes, and a
//! final snapshot pass that reconciles the whole document.
//!
//! Run with: cargo run --example streaming_demo

use streamdoc::{ChunkOptions, Fragment, SnapshotOptions, StreamManager};

fn print_document(manager: &StreamManager, label: &str) {
    println!("-- {}", label);
    for node in manager.nodes() {
        println!("   [{}] {}: {}", node.kind, node.id, node.text());
    }
    println!();
}

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let mut manager = StreamManager::new();
    manager.start();

    // The generator opens with a placeholder heading, then revises it.
    manager
        .stream_chunk(
            Fragment::heading("dynamic-heading", "Loading...", 1),
            ChunkOptions::default(),
        )
        .unwrap();
    print_document(&manager, "placeholder heading");

    manager
        .stream_chunk(
            Fragment::heading("dynamic-heading", "Streaming Content Example", 1),
            ChunkOptions::default(),
        )
        .unwrap();
    print_document(&manager, "heading revised in place");

    // A paragraph arrives in growing takes on the same id.
    manager
        .stream_chunk(
            Fragment::paragraph("dynamic-paragraph", "Initial content..."),
            ChunkOptions::default(),
        )
        .unwrap();
    manager
        .stream_chunk(
            Fragment::paragraph(
                "dynamic-paragraph",
                "This paragraph was updated with new content.",
            ),
            ChunkOptions::default(),
        )
        .unwrap();
    print_document(&manager, "paragraph after two takes");

    // A fresh id appends; the cursor follows the last append of the run.
    manager
        .stream_chunk(
            Fragment::paragraph("final-paragraph", "This is a new paragraph that was added."),
            ChunkOptions::new().with_move_cursor(true),
        )
        .unwrap();
    manager.stop();
    print_document(&manager, "chunk run complete");
    println!("   cursor: {:?}\n", manager.editor().cursor());

    // The generator's final snapshot: heading kept, first paragraph revised,
    // trailing paragraph dropped, a closing paragraph added.
    let snapshot = vec![
        Fragment::heading("dynamic-heading", "Streaming Content Example", 1),
        Fragment::paragraph("dynamic-paragraph", "Final wording for the body paragraph."),
        Fragment::paragraph("closing", "Reconciled in one pass."),
    ];
    manager
        .stream_full(&snapshot, SnapshotOptions::new().with_debug(true))
        .unwrap();
    print_document(&manager, "after snapshot reconciliation");

    println!(
        "structural ops applied: {}, undo entries: {}",
        manager.editor().structural_ops(),
        manager.editor().history_len()
    );
}
