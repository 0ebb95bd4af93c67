//! Data models for the streamed document.
//!
//! These structs mirror the host editor's JSON wire shape: a document is an
//! ordered list of block nodes, each block holding inline content that is
//! either a text leaf or a nested element.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// =============================================================================
// CONTENT NODES
// =============================================================================

/// One inline node inside a block: a nested element or a text leaf.
///
/// Serialization is untagged to match the host wire shape, where a text leaf
/// is `{ "text": "hi", "bold": true }` and an element is
/// `{ "kind": "link", "children": [...] }`. The element variant is tried
/// first so a leaf's flattened marks never swallow an element's fields.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ContentNode {
    /// Nested inline element with its own children.
    Element(ElementNode),

    /// Text leaf with optional formatting marks.
    Text(TextSpan),
}

impl ContentNode {
    /// Creates a plain text leaf with no marks.
    pub fn text(text: impl Into<String>) -> Self {
        ContentNode::Text(TextSpan::new(text))
    }
}

/// A text leaf with arbitrary formatting marks (bold, italic, ...).
///
/// Marks are kept opaque: the engine only ever reads `text`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TextSpan {
    /// The literal text content.
    pub text: String,

    /// Formatting marks, flattened into the leaf object on the wire.
    #[serde(flatten)]
    pub marks: Map<String, Value>,
}

impl TextSpan {
    /// Creates a new unmarked text span.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            marks: Map::new(),
        }
    }

    /// Builder: Add a formatting mark.
    pub fn with_mark(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.marks.insert(key.into(), value.into());
        self
    }
}

/// Nested inline element (link, mention, ...) with its own children.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ElementNode {
    /// Element type discriminator.
    pub kind: String,

    /// Ordered child content.
    pub children: Vec<ContentNode>,
}

impl ElementNode {
    /// Creates a new element with no children.
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            children: Vec::new(),
        }
    }

    /// Builder: Append a child.
    pub fn with_child(mut self, child: ContentNode) -> Self {
        self.children.push(child);
        self
    }
}

// =============================================================================
// BLOCK NODE
// =============================================================================

/// A single top-level document element.
///
/// Blocks are immutable value objects once constructed; replacing a block at
/// a position is the only form of mutation the engine performs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BlockNode {
    /// Stable identity, unique among present top-level nodes (best-effort;
    /// the chunk path's open-node exception is documented on the manager).
    pub id: String,

    /// Block type discriminator ("p", "h1", ...).
    pub kind: String,

    /// Ordered inline content.
    pub children: Vec<ContentNode>,
}

impl BlockNode {
    /// Creates a new block with no content.
    pub fn new(id: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
            children: Vec::new(),
        }
    }

    /// Builder: Append a content child.
    pub fn with_child(mut self, child: ContentNode) -> Self {
        self.children.push(child);
        self
    }

    /// Concatenated leaf text of this block.
    pub fn text(&self) -> String {
        extract_text(&self.children)
    }
}

// =============================================================================
// FRAGMENT
// =============================================================================

/// One identified unit of incoming generator content.
///
/// A fragment maps 1:1 to a prospective or replacement block node.
/// Re-sending an id revises that content; fragments are transient inputs and
/// are never stored by the engine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Fragment {
    /// Generator-assigned identity.
    pub id: String,

    /// Content for the block this fragment stands for.
    pub children: Vec<ContentNode>,

    /// Block type label carried onto the built node.
    pub kind: String,
}

impl Fragment {
    /// Creates a new fragment with no content.
    pub fn new(id: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            children: Vec::new(),
            kind: kind.into(),
        }
    }

    /// Paragraph fragment holding a single text leaf.
    pub fn paragraph(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(id, "p").with_child(ContentNode::text(text))
    }

    /// Heading fragment (level 1-6) holding a single text leaf.
    pub fn heading(id: impl Into<String>, text: impl Into<String>, level: u8) -> Self {
        Self::new(id, format!("h{}", level)).with_child(ContentNode::text(text))
    }

    /// Builder: Append a content child.
    pub fn with_child(mut self, child: ContentNode) -> Self {
        self.children.push(child);
        self
    }

    /// Concatenated leaf text of this fragment's content.
    pub fn text(&self) -> String {
        extract_text(&self.children)
    }

    /// Builds the block node this fragment stands for.
    pub fn into_node(self) -> BlockNode {
        BlockNode {
            id: self.id,
            kind: self.kind,
            children: self.children,
        }
    }

    /// Builds the block node without consuming the fragment.
    pub fn to_node(&self) -> BlockNode {
        self.clone().into_node()
    }
}

// =============================================================================
// TEXT EXTRACTION
// =============================================================================

/// Concatenated leaf text of a content sequence, in child order, with no
/// separators. Empty structures yield the empty string.
pub fn extract_text(children: &[ContentNode]) -> String {
    let mut out = String::new();
    collect_text(children, &mut out);
    out
}

fn collect_text(children: &[ContentNode], out: &mut String) {
    for child in children {
        match child {
            ContentNode::Text(span) => out.push_str(&span.text),
            ContentNode::Element(element) => collect_text(&element.children, out),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
