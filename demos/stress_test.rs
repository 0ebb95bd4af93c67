//! Stress Test Suite for StreamDoc
//!
//! Covers: Incremental Chunk Throughput and Snapshot Reconciliation Overhead
//!
//! Run with: cargo run --release --example stress_test

use std::time::Instant;
use streamdoc::{ChunkOptions, Fragment, SnapshotOptions, StreamManager};

fn main() {
    println!("========================================");
    println!(" StreamDoc Stress Suite");
    println!("========================================\n");

    test_chunk_throughput(1000, 5);
    test_snapshot_overhead(100);
}

// -----------------------------------------------------------------------------
// 1. Chunk Throughput (The "Revising Generator" Test)
// -----------------------------------------------------------------------------
fn test_chunk_throughput(nodes: usize, revisions: usize) {
    println!(
        "Test: Chunk Throughput ({} nodes, {} revisions each)",
        nodes, revisions
    );

    let mut manager = StreamManager::new();
    manager.start();

    let start = Instant::now();
    let mut total_chunks = 0;

    // Each node arrives as a growing sequence of takes on the same id,
    // the way an incremental generator revises its open paragraph.
    for i in 0..nodes {
        let id = format!("node-{}", i);
        let mut text = String::new();
        for r in 0..revisions {
            text.push_str(&format!("sentence {} of paragraph {}. ", r, i));
            manager
                .stream_chunk(
                    Fragment::paragraph(id.as_str(), text.as_str()),
                    ChunkOptions::default(),
                )
                .unwrap();
            total_chunks += 1;
        }
    }
    manager.stop();

    let duration = start.elapsed();
    println!("   Total Chunks:     {}", total_chunks);
    println!("   Total Time:       {:?}", duration);
    println!(
        "   Throughput:       {:.0} chunks/sec",
        total_chunks as f64 / duration.as_secs_f64()
    );

    // Validate convergence: one node per id, final revision kept
    println!(
        "   Document Length:  {} (Expected: {})",
        manager.nodes().len(),
        nodes
    );
    println!(
        "   Undo Entries:     {} (Expected: 0)",
        manager.editor().history_len()
    );
    if let Some(node) = manager.nodes().first() {
        let preview: String = node.text().chars().take(40).collect();
        println!("   Sample (Node 0):  \"{}...\"", preview);
    }

    println!("   [Analysis]: Revisions replace the open node in place. Length stays at node count.\n");
}

// -----------------------------------------------------------------------------
// 2. Snapshot Reconciliation Overhead
// -----------------------------------------------------------------------------
fn test_snapshot_overhead(nodes: usize) {
    println!("Test: Snapshot Reconciliation ({} nodes)", nodes);

    let target: Vec<Fragment> = (0..nodes)
        .map(|i| {
            Fragment::paragraph(
                format!("node-{}", i).as_str(),
                "A realistic paragraph of generated content used to size the diff.",
            )
        })
        .collect();

    // Cold build: every fragment appends
    let mut manager = StreamManager::new();
    let start = Instant::now();
    manager
        .stream_full(&target, SnapshotOptions::default())
        .unwrap();
    let build_time = start.elapsed();
    let build_ops = manager.editor().structural_ops();

    // Converged re-send: the diff should skip every pair
    let start = Instant::now();
    manager
        .stream_full(&target, SnapshotOptions::default())
        .unwrap();
    let noop_time = start.elapsed();
    let noop_ops = manager.editor().structural_ops() - build_ops;

    // One revised node in the middle: exactly one replace
    let mut revised = target.clone();
    revised[nodes / 2] = Fragment::paragraph(
        format!("node-{}", nodes / 2).as_str(),
        "This paragraph was revised by the generator.",
    );
    let start = Instant::now();
    manager
        .stream_full(&revised, SnapshotOptions::default())
        .unwrap();
    let single_time = start.elapsed();
    let single_ops = manager.editor().structural_ops() - build_ops - noop_ops;

    // Shrink to half: trailing removals only
    let start = Instant::now();
    manager
        .stream_full(&revised[..nodes / 2], SnapshotOptions::default())
        .unwrap();
    let shrink_time = start.elapsed();

    println!("   Cold Build:       {:>8.2?} ({} ops)", build_time, build_ops);
    println!("   Converged Re-send:{:>8.2?} ({} ops)", noop_time, noop_ops);
    println!("   Single Revision:  {:>8.2?} ({} ops)", single_time, single_ops);
    println!(
        "   Shrink to Half:   {:>8.2?} (length {})",
        shrink_time,
        manager.nodes().len()
    );
    println!("   [Analysis]: If the converged re-send applies any ops, the skip oracle is broken.\n");
}
