//! Document node types

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use vibe_core::Rect;

use crate::fiber::FiberId;
use crate::style::ComputedStyle;

/// Opaque handle identifying one node in a [`crate::Document`].
///
/// Handles stay valid after the node is detached, mirroring how a held
/// element reference outlives its removal from a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub u64);

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Document node kinds. Only element nodes are ever inspectable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Element,
    Text,
    Comment,
}

/// One node in the document arena.
///
/// Links are by [`NodeId`] rather than references so subtrees can be
/// detached and re-queried without lifetime gymnastics.
#[derive(Debug, Clone)]
pub struct Node {
    pub id: NodeId,
    pub kind: NodeKind,
    /// Lowercase tag name; empty for text/comment nodes.
    pub tag: String,
    pub attributes: BTreeMap<String, String>,
    /// Own text content for text/comment nodes.
    pub text: String,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub style: ComputedStyle,
    /// Bounding box in viewport coordinates.
    pub rect: Rect,
    /// Framework introspection handle, when the host attached one.
    pub fiber: Option<FiberId>,
}

impl Node {
    pub(crate) fn element(id: NodeId, tag: &str) -> Self {
        Self {
            id,
            kind: NodeKind::Element,
            tag: tag.to_ascii_lowercase(),
            attributes: BTreeMap::new(),
            text: String::new(),
            parent: None,
            children: Vec::new(),
            style: ComputedStyle::default(),
            rect: Rect::default(),
            fiber: None,
        }
    }

    pub(crate) fn text(id: NodeId, content: &str) -> Self {
        Self {
            id,
            kind: NodeKind::Text,
            tag: String::new(),
            attributes: BTreeMap::new(),
            text: content.to_string(),
            parent: None,
            children: Vec::new(),
            style: ComputedStyle::default(),
            rect: Rect::default(),
            fiber: None,
        }
    }

    pub(crate) fn comment(id: NodeId, content: &str) -> Self {
        Self {
            id,
            kind: NodeKind::Comment,
            tag: String::new(),
            attributes: BTreeMap::new(),
            text: content.to_string(),
            parent: None,
            children: Vec::new(),
            style: ComputedStyle::default(),
            rect: Rect::default(),
            fiber: None,
        }
    }

    pub fn is_element(&self) -> bool {
        self.kind == NodeKind::Element
    }

    /// The element's `id` attribute, if any.
    pub fn dom_id(&self) -> Option<&str> {
        self.attributes.get("id").map(String::as_str)
    }

    /// Class names parsed from the `class` attribute, in written order.
    pub fn classes(&self) -> Vec<String> {
        self.attributes
            .get("class")
            .map(|c| c.split_whitespace().map(str::to_string).collect())
            .unwrap_or_default()
    }
}
