//! StreamDoc - Incremental document reconciliation for AI generation streams.
//!
//! This crate applies identified content fragments from an external,
//! possibly revising generator onto an ordered block document with the
//! minimal set of structural mutations:
//!
//! - **Chunk streaming**: re-sending a fragment id revises the open node in
//!   place instead of appending a duplicate
//! - **Snapshot reconciliation**: a complete target sequence converges the
//!   document through an index-aligned diff that skips nodes whose id and
//!   text already match
//! - **Host independence**: mutations go through a narrow editor interface
//!   as scoped batches, excluded from undo history, with normalization
//!   deferred to batch end
//!
//! # Example
//!
//! ```rust
//! use streamdoc::{ChunkOptions, Fragment, StreamManager};
//!
//! let mut manager = StreamManager::new();
//! manager.start();
//!
//! // First take of the opening paragraph.
//! manager
//!     .stream_chunk(Fragment::paragraph("intro", "Hello"), ChunkOptions::default())
//!     .unwrap();
//!
//! // The generator revises it: same id, so the node is replaced in place.
//! manager
//!     .stream_chunk(Fragment::paragraph("intro", "Hello world"), ChunkOptions::default())
//!     .unwrap();
//! assert_eq!(manager.nodes().len(), 1);
//! assert_eq!(manager.nodes()[0].text(), "Hello world");
//!
//! manager.stop();
//! ```

pub mod document;
pub mod error;

// Streaming module
pub mod stream;

// Re-exports for convenience
pub use document::{
    extract_text, BlockNode, ContentNode, CursorPosition, DocumentEditor, EditBatch, EditOp,
    ElementNode, Fragment, MemoryEditor, TextSpan,
};
pub use error::{StreamError, StreamResult};
pub use stream::{ChunkOptions, SnapshotOptions, StreamManager, StreamSession};

#[cfg(feature = "wasm")]
pub use stream::JsStreamManager;
