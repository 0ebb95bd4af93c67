//! WASM bindings for the streaming manager.
//!
//! This module provides JavaScript-friendly wrappers around the core
//! StreamManager for use in browser editors.

use js_sys::Array;
use serde::Serialize;
use serde_wasm_bindgen::{from_value, Serializer};
use wasm_bindgen::prelude::*;

use crate::document::editor::MemoryEditor;
use crate::document::model::Fragment;
use crate::error::StreamError;
use crate::stream::manager::{ChunkOptions, SnapshotOptions, StreamManager};

/// Serialize a value to JsValue with maps as plain JS objects (not Map).
fn to_js_value<T: Serialize>(value: &T) -> Result<JsValue, serde_wasm_bindgen::Error> {
    value.serialize(&Serializer::new().serialize_maps_as_objects(true))
}

// =============================================================================
// ERROR CONVERSION
// =============================================================================

impl From<StreamError> for JsValue {
    fn from(err: StreamError) -> JsValue {
        JsValue::from_str(&err.to_string())
    }
}

/// Helper macro for Result conversion
macro_rules! js_result {
    ($expr:expr) => {
        $expr.map_err(|e: StreamError| JsValue::from(e))
    };
}

// =============================================================================
// MAIN WRAPPER TYPE
// =============================================================================

/// JavaScript-friendly wrapper around StreamManager.
///
/// Applies identified content fragments from a generator onto an in-memory
/// document that browser code can read back after every call.
#[wasm_bindgen]
pub struct JsStreamManager {
    inner: StreamManager<MemoryEditor>,
}

#[wasm_bindgen]
impl JsStreamManager {
    /// Creates a manager over an empty document.
    ///
    /// # Example (JavaScript)
    /// ```js
    /// const manager = new JsStreamManager();
    /// ```
    #[wasm_bindgen(constructor)]
    pub fn new() -> JsStreamManager {
        JsStreamManager {
            inner: StreamManager::new(),
        }
    }

    /// Begins a streaming run. Idempotent; discards any open node.
    ///
    /// # Example (JavaScript)
    /// ```js
    /// manager.start();
    /// ```
    pub fn start(&mut self) {
        self.inner.start();
    }

    /// Ends the streaming run and resets bookkeeping. Mutations already
    /// applied to the document stay applied.
    ///
    /// # Example (JavaScript)
    /// ```js
    /// manager.stop();
    /// ```
    pub fn stop(&mut self) {
        self.inner.stop();
    }

    /// True while a streaming run is active.
    ///
    /// # Example (JavaScript)
    /// ```js
    /// if (manager.isStreaming()) { ... }
    /// ```
    #[wasm_bindgen(js_name = isStreaming)]
    pub fn is_streaming(&self) -> bool {
        self.inner.is_streaming()
    }

    /// Id of the most recently applied fragment, or null.
    ///
    /// # Example (JavaScript)
    /// ```js
    /// const openNode = manager.lastFragmentId();
    /// ```
    #[wasm_bindgen(js_name = lastFragmentId)]
    pub fn last_fragment_id(&self) -> Option<String> {
        self.inner.last_fragment_id().map(str::to_owned)
    }
}

// =============================================================================
// STREAMING METHODS
// =============================================================================

#[wasm_bindgen]
impl JsStreamManager {
    /// Applies one fragment incrementally.
    ///
    /// Re-sending the open node's id replaces the last document node; any
    /// other id appends a new node.
    ///
    /// # Arguments
    /// * `fragment` - Fragment as a JavaScript object with fields:
    ///   - `id`: string
    ///   - `children`: array of content nodes (`{ text, ...marks }` leaves
    ///     or `{ kind, children }` elements)
    ///   - `kind`: string (e.g., "p", "h1")
    /// * `move_cursor` - move the host cursor to the end after appending
    ///
    /// # Example (JavaScript)
    /// ```js
    /// manager.streamChunk(
    ///   { id: 'intro', children: [{ text: 'Hello' }], kind: 'p' },
    ///   false
    /// );
    /// ```
    #[wasm_bindgen(js_name = streamChunk)]
    pub fn stream_chunk(
        &mut self,
        fragment: JsValue,
        move_cursor: Option<bool>,
    ) -> Result<(), JsValue> {
        let fragment: Fragment = from_value(fragment)?;
        let options = ChunkOptions::new().with_move_cursor(move_cursor.unwrap_or(false));
        js_result!(self.inner.stream_chunk(fragment, options))?;
        Ok(())
    }

    /// Converges the document onto a complete target fragment list with
    /// minimal edits. An empty list is a no-op.
    ///
    /// # Example (JavaScript)
    /// ```js
    /// manager.streamFull([
    ///   { id: 'title', children: [{ text: 'Report' }], kind: 'h1' },
    ///   { id: 'p1', children: [{ text: 'First paragraph' }], kind: 'p' }
    /// ], false);
    /// ```
    #[wasm_bindgen(js_name = streamFull)]
    pub fn stream_full(&mut self, fragments: JsValue, debug: Option<bool>) -> Result<(), JsValue> {
        let fragments: Vec<Fragment> = from_value(fragments)?;
        let options = SnapshotOptions::new().with_debug(debug.unwrap_or(false));
        js_result!(self.inner.stream_full(&fragments, options))?;
        Ok(())
    }
}

// =============================================================================
// DOCUMENT READ METHODS
// =============================================================================

#[wasm_bindgen]
impl JsStreamManager {
    /// Position of the node with `id`, checking only the last node;
    /// undefined when it does not match.
    ///
    /// # Example (JavaScript)
    /// ```js
    /// const index = manager.findNodeWithId('intro');
    /// ```
    #[wasm_bindgen(js_name = findNodeWithId)]
    pub fn find_node_with_id(&self, id: &str) -> Option<usize> {
        self.inner.find_node_with_id(id)
    }

    /// The document's current nodes as a JavaScript array of objects.
    ///
    /// # Example (JavaScript)
    /// ```js
    /// const nodes = manager.getNodes();
    /// console.log(nodes[0].id, nodes[0].children);
    /// ```
    #[wasm_bindgen(js_name = getNodes)]
    pub fn get_nodes(&self) -> Result<JsValue, JsValue> {
        Ok(to_js_value(&self.inner.nodes())?)
    }

    /// The current node ids in document order.
    ///
    /// # Example (JavaScript)
    /// ```js
    /// const ids = manager.getNodeIds();
    /// console.log(ids); // ['title', 'p1', 'p2']
    /// ```
    #[wasm_bindgen(js_name = getNodeIds)]
    pub fn get_node_ids(&self) -> Array {
        let array = Array::new();
        for node in self.inner.nodes() {
            array.push(&JsValue::from_str(&node.id));
        }
        array
    }

    /// Number of top-level nodes.
    ///
    /// # Example (JavaScript)
    /// ```js
    /// const count = manager.nodeCount();
    /// ```
    #[wasm_bindgen(js_name = nodeCount)]
    pub fn node_count(&self) -> usize {
        self.inner.nodes().len()
    }
}

impl Default for JsStreamManager {
    fn default() -> Self {
        Self::new()
    }
}
