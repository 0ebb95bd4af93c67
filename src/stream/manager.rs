//! Core StreamManager implementation.
//!
//! The manager wraps a host editor and applies generator output to it with
//! two policies:
//! - `stream_chunk()` for one fragment at a time: append, or replace the
//!   open node when the generator re-sends an id
//! - `stream_full()` for a complete target snapshot: an index-aligned diff
//!   that converges the document with minimal mutations
//!
//! Every mutation goes through one scoped [`EditBatch`]: excluded from undo
//! history, atomic with respect to the host's re-rendering, with the host's
//! normalization pass deferred to batch end.

use tracing::{debug, trace};

use crate::document::editor::{DocumentEditor, EditBatch, EditOp, MemoryEditor};
use crate::document::model::{BlockNode, Fragment};
use crate::error::StreamResult;
use crate::stream::session::StreamSession;

// =============================================================================
// OPTIONS
// =============================================================================

/// Options for [`StreamManager::stream_chunk`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChunkOptions {
    /// Move the host cursor to the end of the document after appending.
    /// Off by default: moving the cursor on every fragment is expensive and
    /// unnecessary while content is still arriving.
    pub move_cursor: bool,
}

impl ChunkOptions {
    /// Creates default options (cursor untouched).
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: Set whether the cursor follows appended content.
    pub fn with_move_cursor(mut self, move_cursor: bool) -> Self {
        self.move_cursor = move_cursor;
        self
    }
}

/// Options for [`StreamManager::stream_full`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SnapshotOptions {
    /// Emit a diagnostic summary of the planned operations.
    /// Controls logging only, never behavior.
    pub debug: bool,
}

impl SnapshotOptions {
    /// Creates default options (no diagnostics).
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: Set diagnostic logging.
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }
}

// =============================================================================
// MANAGER
// =============================================================================

/// Applies generator fragments onto a host document editor.
///
/// The manager assumes single-writer access to the document while a session
/// is active; no other agent mutates it concurrently with streaming. That is
/// a documented precondition, not an enforced invariant.
pub struct StreamManager<E: DocumentEditor = MemoryEditor> {
    editor: E,
    session: StreamSession,
}

impl StreamManager<MemoryEditor> {
    /// Creates a manager over an empty in-memory document.
    pub fn new() -> Self {
        Self::with_editor(MemoryEditor::new())
    }
}

impl Default for StreamManager<MemoryEditor> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: DocumentEditor> StreamManager<E> {
    /// Creates a manager over an existing host editor.
    pub fn with_editor(editor: E) -> Self {
        Self {
            editor,
            session: StreamSession::new(),
        }
    }

    /// The wrapped editor.
    pub fn editor(&self) -> &E {
        &self.editor
    }

    /// Mutable access to the wrapped editor.
    pub fn editor_mut(&mut self) -> &mut E {
        &mut self.editor
    }

    /// Consumes the manager and returns the editor.
    pub fn into_editor(self) -> E {
        self.editor
    }

    /// The document's current top-level nodes.
    pub fn nodes(&self) -> &[BlockNode] {
        self.editor.nodes()
    }

    // =========================================================================
    // SESSION LIFECYCLE
    // =========================================================================

    /// Begins a streaming run. Idempotent; discards any open node.
    pub fn start(&mut self) {
        self.session.start();
    }

    /// Ends the streaming run and resets bookkeeping. Does not undo
    /// mutations already applied to the document.
    pub fn stop(&mut self) {
        self.session.stop();
    }

    /// True while a streaming run is active.
    pub fn is_streaming(&self) -> bool {
        self.session.is_streaming()
    }

    /// Id of the most recently applied fragment, if any.
    pub fn last_fragment_id(&self) -> Option<&str> {
        self.session.last_fragment_id()
    }

    // =========================================================================
    // CHUNK PATH
    // =========================================================================

    /// Applies one fragment incrementally.
    ///
    /// Re-sending the open node's id replaces the last document node with
    /// the fragment's content; any other id appends a new node, including
    /// an id an earlier, non-last node already carries (the one documented
    /// exception to the unique-id invariant). A fragment with
    /// empty content mutates nothing but still becomes the open node.
    pub fn stream_chunk(&mut self, fragment: Fragment, options: ChunkOptions) -> StreamResult<()> {
        if fragment.children.is_empty() {
            // No mutation, but the fragment still claims the open node.
            self.session.note_fragment(fragment.id);
            return Ok(());
        }

        let id = fragment.id.clone();
        let node = fragment.into_node();
        let replace = self.session.is_open_node(&id) && !self.editor.is_empty();

        let mut ops = Vec::with_capacity(2);
        if replace {
            ops.push(EditOp::Replace {
                index: self.editor.len() - 1,
                node,
            });
        } else {
            ops.push(EditOp::Insert {
                index: self.editor.len(),
                node,
            });
            if options.move_cursor {
                ops.push(EditOp::MoveCursorToEnd);
            }
        }

        self.editor.apply_batch(EditBatch::new(ops))?;
        trace!(id = %id, replace, "stream_chunk: applied fragment");
        self.session.note_fragment(id);
        Ok(())
    }

    // =========================================================================
    // SNAPSHOT PATH
    // =========================================================================

    /// Converges the document onto a complete target fragment sequence with
    /// minimal edits.
    ///
    /// Single index-aligned pass: an id mismatch or a text change replaces
    /// in place, a missing tail appends, a surplus tail is removed from the
    /// highest index down. Pairs whose id and extracted text both match are
    /// never touched; formatting-only changes inside such a pair are
    /// invisible to this comparison and do not trigger a refresh.
    ///
    /// An empty target is a no-op; the document is never emptied implicitly.
    /// The open-node bookkeeping is left alone.
    pub fn stream_full(
        &mut self,
        fragments: &[Fragment],
        options: SnapshotOptions,
    ) -> StreamResult<()> {
        if fragments.is_empty() {
            if options.debug {
                debug!("stream_full: empty target, nothing to do");
            }
            return Ok(());
        }

        let ops = self.plan_snapshot(fragments);
        if options.debug {
            let (replaced, appended, removed) = op_counts(&ops);
            let overlap = self.editor.len().min(fragments.len());
            debug!(
                current_len = self.editor.len(),
                target_len = fragments.len(),
                replaced,
                appended,
                removed,
                skipped = overlap - replaced,
                "stream_full: applying snapshot plan"
            );
        }
        self.editor.apply_batch(EditBatch::new(ops))
    }

    /// Plans the minimal edit list to make the document match `target`.
    fn plan_snapshot(&self, target: &[Fragment]) -> Vec<EditOp> {
        let current = self.editor.nodes();
        let mut ops = Vec::new();
        let mut end = current.len();

        for (i, fragment) in target.iter().enumerate() {
            match current.get(i) {
                Some(node) if node.id == fragment.id && node.text() == fragment.text() => {
                    // Up to date; never touched, even if nested formatting
                    // inside the pair differs.
                }
                Some(_) => ops.push(EditOp::Replace {
                    index: i,
                    node: fragment.to_node(),
                }),
                None => {
                    ops.push(EditOp::Insert {
                        index: end,
                        node: fragment.to_node(),
                    });
                    end += 1;
                }
            }
        }

        // Trailing surplus is removed from the highest index down so earlier
        // removals do not shift the ones still scheduled.
        for index in (target.len()..current.len()).rev() {
            ops.push(EditOp::Remove { index });
        }

        ops
    }

    // =========================================================================
    // NODE LOOKUP
    // =========================================================================

    /// Position of the node with `id`, checking **only the last node**.
    ///
    /// The incremental path only ever replaces the most recently appended
    /// node (the session's open node), so a general scan is deliberately
    /// avoided. An id an earlier node carries reports not-found.
    pub fn find_node_with_id(&self, id: &str) -> Option<usize> {
        let nodes = self.editor.nodes();
        let last = nodes.last()?;
        (last.id == id).then_some(nodes.len() - 1)
    }
}

fn op_counts(ops: &[EditOp]) -> (usize, usize, usize) {
    let mut replaced = 0;
    let mut appended = 0;
    let mut removed = 0;
    for op in ops {
        match op {
            EditOp::Replace { .. } => replaced += 1,
            EditOp::Insert { .. } => appended += 1,
            EditOp::Remove { .. } => removed += 1,
            EditOp::MoveCursorToEnd => {}
        }
    }
    (replaced, appended, removed)
}

// =============================================================================
// TESTS
// =============================================================================
