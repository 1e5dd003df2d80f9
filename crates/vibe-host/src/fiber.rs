//! # Framework Introspection Handles
//!
//! A host framework may attach an internal debug handle (a "fiber") to a
//! document node, exposing component identity, props, and hook state. The
//! arena here models that structure the way a real component tree behaves:
//! nodes link to each other by id (`child` / `sibling` / `return_link`),
//! links can dangle, and — because real debug handles do — they can form
//! cycles. Consumers must therefore traverse with a visited set; the arena
//! itself makes no acyclicity promise.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Handle to one node in a [`FiberArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FiberId(pub u64);

/// Kind of component a fiber represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FiberKind {
    /// A plain function component.
    Function,
    /// A class component.
    Class,
    /// A host primitive (maps directly to a document element).
    Host,
    Unknown,
}

/// One node of the framework's internal component tree.
#[derive(Debug, Clone)]
pub struct FiberNode {
    /// Component display name; `None` on host primitives and corrupt handles.
    pub component_name: Option<String>,
    pub kind: FiberKind,
    /// Component props as the framework serialized them.
    pub props: serde_json::Map<String, Value>,
    /// Hook/state slots in declaration order.
    pub hooks: Vec<Value>,
    pub child: Option<FiberId>,
    pub sibling: Option<FiberId>,
    /// Link toward the parent fiber. May dangle or cycle on corrupt handles.
    pub return_link: Option<FiberId>,
}

impl FiberNode {
    pub fn function(name: &str) -> Self {
        Self {
            component_name: Some(name.to_string()),
            kind: FiberKind::Function,
            props: serde_json::Map::new(),
            hooks: Vec::new(),
            child: None,
            sibling: None,
            return_link: None,
        }
    }

    pub fn class(name: &str) -> Self {
        Self {
            kind: FiberKind::Class,
            ..Self::function(name)
        }
    }

    /// A host primitive fiber (e.g. the fiber backing a `div`).
    pub fn host(tag: &str) -> Self {
        Self {
            component_name: Some(tag.to_string()),
            kind: FiberKind::Host,
            props: serde_json::Map::new(),
            hooks: Vec::new(),
            child: None,
            sibling: None,
            return_link: None,
        }
    }

    /// A handle with no usable identity, as corrupt introspection data
    /// often presents.
    pub fn anonymous() -> Self {
        Self {
            component_name: None,
            kind: FiberKind::Unknown,
            props: serde_json::Map::new(),
            hooks: Vec::new(),
            child: None,
            sibling: None,
            return_link: None,
        }
    }

    pub fn with_props(mut self, props: serde_json::Map<String, Value>) -> Self {
        self.props = props;
        self
    }

    pub fn with_hooks(mut self, hooks: Vec<Value>) -> Self {
        self.hooks = hooks;
        self
    }
}

/// Arena of fiber nodes owned by a document.
#[derive(Debug, Default)]
pub struct FiberArena {
    nodes: HashMap<FiberId, FiberNode>,
    next_id: u64,
}

impl FiberArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, node: FiberNode) -> FiberId {
        self.next_id += 1;
        let id = FiberId(self.next_id);
        self.nodes.insert(id, node);
        id
    }

    pub fn get(&self, id: FiberId) -> Option<&FiberNode> {
        self.nodes.get(&id)
    }

    pub fn get_mut(&mut self, id: FiberId) -> Option<&mut FiberNode> {
        self.nodes.get_mut(&id)
    }

    /// Point `fiber`'s return link at `parent`. No cycle check: corrupt
    /// handles are representable on purpose.
    pub fn link_return(&mut self, fiber: FiberId, parent: FiberId) {
        if let Some(node) = self.nodes.get_mut(&fiber) {
            node.return_link = Some(parent);
        }
    }

    pub fn link_child(&mut self, parent: FiberId, child: FiberId) {
        if let Some(node) = self.nodes.get_mut(&parent) {
            node.child = Some(child);
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
