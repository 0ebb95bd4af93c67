//! Streaming reconciliation module.
//!
//! Provides the session lifecycle and the manager that applies generator
//! fragments onto a host document.

pub mod manager;
pub mod session;

#[cfg(feature = "wasm")]
pub mod wasm;

// Re-exports for convenience
pub use manager::{ChunkOptions, SnapshotOptions, StreamManager};
pub use session::StreamSession;

#[cfg(feature = "wasm")]
pub use wasm::JsStreamManager;
