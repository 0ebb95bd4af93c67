//! Streaming session lifecycle state.
//!
//! A session is ephemeral per streaming run: `start()` opens it, `stop()`
//! resets it. The only bookkeeping is whether streaming is active and which
//! fragment id was applied last: the "open node" the chunk path is allowed
//! to replace.

/// Bookkeeping for one streaming run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StreamSession {
    streaming: bool,
    last_fragment_id: Option<String>,
}

impl StreamSession {
    /// Creates an idle session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks the session as streaming and forgets any open node.
    /// Idempotent: calling twice is equivalent to calling once.
    pub fn start(&mut self) {
        self.streaming = true;
        self.last_fragment_id = None;
    }

    /// Ends the run and resets bookkeeping. Mutations already applied to the
    /// document stay applied.
    pub fn stop(&mut self) {
        self.streaming = false;
        self.last_fragment_id = None;
    }

    /// True while a streaming run is active.
    pub fn is_streaming(&self) -> bool {
        self.streaming
    }

    /// Id of the most recently applied fragment, if any.
    pub fn last_fragment_id(&self) -> Option<&str> {
        self.last_fragment_id.as_deref()
    }

    /// Records `id` as the open node.
    pub fn note_fragment(&mut self, id: impl Into<String>) {
        self.last_fragment_id = Some(id.into());
    }

    /// True when `id` is the open node.
    pub fn is_open_node(&self, id: &str) -> bool {
        self.last_fragment_id.as_deref() == Some(id)
    }
}

// =============================================================================
// TESTS
// =============================================================================
