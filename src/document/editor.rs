//! Host editor interface and the in-memory reference implementation.
//!
//! The engine never mutates a document directly: it plans a list of edit
//! operations and hands them to a [`DocumentEditor`] as one scoped batch.
//! A batch is atomic with respect to the host's reactive re-rendering, runs
//! the host's normalization pass once after the last operation, and stays
//! out of undo history unless it explicitly asks to be recorded.

use serde::{Deserialize, Serialize};

use crate::document::model::{extract_text, BlockNode, ContentNode};
use crate::error::{StreamError, StreamResult};

// =============================================================================
// EDIT OPERATIONS
// =============================================================================

/// A single planned structural operation against the document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum EditOp {
    /// Insert a node at the given index.
    Insert { index: usize, node: BlockNode },

    /// Replace the node at the given index in place.
    Replace { index: usize, node: BlockNode },

    /// Remove the node at the given index.
    Remove { index: usize },

    /// Move the host cursor to the end-of-document position.
    MoveCursorToEnd,
}

/// An ordered list of operations applied as one scoped batch.
#[derive(Debug, Clone, Default)]
pub struct EditBatch {
    /// Operations in application order.
    pub ops: Vec<EditOp>,

    /// Whether the host should record this batch in undo history.
    /// Streaming batches never set this.
    pub record_history: bool,
}

impl EditBatch {
    /// Creates a batch from operations, excluded from undo history.
    pub fn new(ops: Vec<EditOp>) -> Self {
        Self {
            ops,
            record_history: false,
        }
    }

    /// Builder: Set whether the batch is recorded in undo history.
    pub fn history(mut self, record: bool) -> Self {
        self.record_history = record;
        self
    }

    /// Number of operations in the batch.
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// True when the batch holds no operations.
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
}

// =============================================================================
// HOST INTERFACE
// =============================================================================

/// The narrow interface the engine needs from a host document editor.
///
/// Implementations own the ordered top-level node list. `apply_batch` must
/// behave as a scoped batch context: no intermediate state observable by the
/// host's rendering mid-batch, one incremental-validation/normalization pass
/// after the last operation (not per operation), and no undo-history entry
/// unless the batch requests one.
pub trait DocumentEditor {
    /// The ordered top-level nodes.
    fn nodes(&self) -> &[BlockNode];

    /// Applies all operations of the batch in order.
    ///
    /// A failing operation propagates its error unchanged; operations
    /// already applied stay applied.
    fn apply_batch(&mut self, batch: EditBatch) -> StreamResult<()>;

    /// Number of top-level nodes.
    fn len(&self) -> usize {
        self.nodes().len()
    }

    /// True when the document has no nodes.
    fn is_empty(&self) -> bool {
        self.nodes().is_empty()
    }

    /// The node at `index`, if present.
    fn node_at(&self, index: usize) -> Option<&BlockNode> {
        self.nodes().get(index)
    }
}

// =============================================================================
// IN-MEMORY EDITOR
// =============================================================================

/// Cursor position: a block index and a character offset into its text.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct CursorPosition {
    /// Index of the block holding the cursor.
    pub block: usize,

    /// Character offset into the block's extracted text.
    pub offset: usize,
}

/// In-memory host editor: the reference implementation used in tests and as
/// the default backing for the manager.
///
/// Beyond the node list it models the host behaviors the engine depends on:
/// a cursor, an undo-history log that scoped batches stay out of, a deferred
/// normalization pass that runs once per batch, and a structural-operation
/// counter for asserting that redundant mutations were skipped.
#[derive(Debug, Clone, Default)]
pub struct MemoryEditor {
    nodes: Vec<BlockNode>,
    cursor: Option<CursorPosition>,
    history: Vec<EditBatch>,
    structural_ops: u64,
    normalize_passes: u64,
}

impl MemoryEditor {
    /// Creates an empty editor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an editor seeded with nodes.
    pub fn with_nodes(nodes: Vec<BlockNode>) -> Self {
        Self {
            nodes,
            ..Self::default()
        }
    }

    /// Current cursor position, if any.
    pub fn cursor(&self) -> Option<CursorPosition> {
        self.cursor
    }

    /// Number of batches recorded in undo history.
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Count of structural operations applied (insert/replace/remove).
    pub fn structural_ops(&self) -> u64 {
        self.structural_ops
    }

    /// Count of normalization passes run (one per non-empty batch).
    pub fn normalize_passes(&self) -> u64 {
        self.normalize_passes
    }

    fn apply_op(&mut self, op: &EditOp) -> StreamResult<()> {
        match op {
            EditOp::Insert { index, node } => {
                if *index > self.nodes.len() {
                    return Err(StreamError::index_out_of_bounds(*index, self.nodes.len()));
                }
                self.nodes.insert(*index, node.clone());
                self.structural_ops += 1;
                Ok(())
            }
            EditOp::Replace { index, node } => {
                if *index >= self.nodes.len() {
                    return Err(StreamError::index_out_of_bounds(*index, self.nodes.len()));
                }
                self.nodes[*index] = node.clone();
                self.structural_ops += 1;
                Ok(())
            }
            EditOp::Remove { index } => {
                if *index >= self.nodes.len() {
                    return Err(StreamError::index_out_of_bounds(*index, self.nodes.len()));
                }
                self.nodes.remove(*index);
                self.structural_ops += 1;
                Ok(())
            }
            EditOp::MoveCursorToEnd => {
                self.cursor = self.end_position();
                Ok(())
            }
        }
    }

    /// End-of-document position: after the last character of the last block.
    fn end_position(&self) -> Option<CursorPosition> {
        let block = self.nodes.len().checked_sub(1)?;
        let offset = extract_text(&self.nodes[block].children).chars().count();
        Some(CursorPosition { block, offset })
    }

    /// Merges adjacent text leaves with identical marks inside each block.
    /// Runs once per batch, after the last operation.
    fn normalize(&mut self) {
        for node in &mut self.nodes {
            merge_adjacent_text(&mut node.children);
        }
    }
}

impl DocumentEditor for MemoryEditor {
    fn nodes(&self) -> &[BlockNode] {
        &self.nodes
    }

    fn apply_batch(&mut self, batch: EditBatch) -> StreamResult<()> {
        if batch.is_empty() {
            return Ok(());
        }
        for op in &batch.ops {
            self.apply_op(op)?;
        }
        self.normalize();
        self.normalize_passes += 1;
        if batch.record_history {
            self.history.push(batch);
        }
        Ok(())
    }
}

fn merge_adjacent_text(children: &mut Vec<ContentNode>) {
    for child in children.iter_mut() {
        if let ContentNode::Element(element) = child {
            merge_adjacent_text(&mut element.children);
        }
    }
    let mut i = 0;
    while i + 1 < children.len() {
        let mergeable = matches!(
            (&children[i], &children[i + 1]),
            (ContentNode::Text(a), ContentNode::Text(b)) if a.marks == b.marks
        );
        if mergeable {
            if let ContentNode::Text(next) = children.remove(i + 1) {
                if let ContentNode::Text(span) = &mut children[i] {
                    span.text.push_str(&next.text);
                }
            }
        } else {
            i += 1;
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
