//! # Host Document
//!
//! Arena-backed document tree standing in for the host page. The engine
//! reads element identity/geometry/computed style through this surface and
//! writes its transient overlay nodes into it; tests drive it directly.
//!
//! Detached nodes stay addressable: removing a subtree unlinks it from the
//! tree but keeps the nodes in the arena, so a held [`NodeId`] behaves like
//! a JS reference to a removed element — queryable, but no longer
//! connected.
//!
//! Every mutating call delivers [`MutationRecord`]s synchronously to
//! observers registered on the mutated node or any of its ancestors.

use vibe_core::{Rect, Viewport};

use crate::fiber::{FiberArena, FiberId};
use crate::node::{Node, NodeId, NodeKind};
use crate::observer::{
    MutationKind, MutationRecord, ObserverCallback, ObserverId, ObserverRegistry,
};
use crate::style::ComputedStyle;

use std::collections::HashMap;

/// Tags that never count as inspectable even when connected.
const NON_INSPECTABLE_TAGS: &[&str] = &["script", "style", "template", "head", "meta", "link"];

/// The host page: node arena, viewport, observers, and fiber handles.
pub struct Document {
    nodes: HashMap<NodeId, Node>,
    root: NodeId,
    next_id: u64,
    viewport: Viewport,
    observers: ObserverRegistry,
    fibers: FiberArena,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create a document with a single connected `body` root.
    pub fn new() -> Self {
        let root = NodeId(1);
        let mut nodes = HashMap::new();
        nodes.insert(root, Node::element(root, "body"));
        Self {
            nodes,
            root,
            next_id: 1,
            viewport: Viewport::default(),
            observers: ObserverRegistry::default(),
            fibers: FiberArena::new(),
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn fibers(&self) -> &FiberArena {
        &self.fibers
    }

    pub fn fibers_mut(&mut self) -> &mut FiberArena {
        &mut self.fibers
    }

    // ─────────────────────────────────────────────────────────────
    // Node creation and tree structure
    // ─────────────────────────────────────────────────────────────

    fn alloc_id(&mut self) -> NodeId {
        self.next_id += 1;
        NodeId(self.next_id)
    }

    /// Create a detached element node.
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        let id = self.alloc_id();
        self.nodes.insert(id, Node::element(id, tag));
        id
    }

    /// Create a detached text node.
    pub fn create_text(&mut self, content: &str) -> NodeId {
        let id = self.alloc_id();
        self.nodes.insert(id, Node::text(id, content));
        id
    }

    /// Create a detached comment node.
    pub fn create_comment(&mut self, content: &str) -> NodeId {
        let id = self.alloc_id();
        self.nodes.insert(id, Node::comment(id, content));
        id
    }

    /// Append `child` as the last child of `parent`. A child already
    /// attached elsewhere is moved. Unknown ids are ignored with a warning.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if !self.nodes.contains_key(&parent) || !self.nodes.contains_key(&child) {
            tracing::warn!("append_child with unknown node: parent={parent} child={child}");
            return;
        }
        if parent == child {
            return;
        }
        // Detach from any previous parent first.
        if let Some(old_parent) = self.nodes.get(&child).and_then(|n| n.parent) {
            if let Some(p) = self.nodes.get_mut(&old_parent) {
                p.children.retain(|c| *c != child);
            }
        }
        if let Some(p) = self.nodes.get_mut(&parent) {
            p.children.push(child);
        }
        if let Some(c) = self.nodes.get_mut(&child) {
            c.parent = Some(parent);
        }
        self.emit(parent, MutationKind::ChildList);
    }

    /// Detach a subtree from the document. The nodes stay in the arena and
    /// remain queryable; they are simply no longer connected.
    pub fn remove(&mut self, node: NodeId) {
        let Some(parent) = self.nodes.get(&node).and_then(|n| n.parent) else {
            return;
        };
        // Observers on the node's (pre-detach) chain must still hear about
        // the detachment, so collect the chain before unlinking.
        let detach_chain = self.inclusive_ancestors(node);
        if let Some(p) = self.nodes.get_mut(&parent) {
            p.children.retain(|c| *c != node);
        }
        if let Some(n) = self.nodes.get_mut(&node) {
            n.parent = None;
        }
        self.emit_to_chain(&detach_chain, node, MutationKind::Detached);
        self.emit(parent, MutationKind::ChildList);
    }

    // ─────────────────────────────────────────────────────────────
    // Node queries
    // ─────────────────────────────────────────────────────────────

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes.get(&id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(&id).and_then(|n| n.parent)
    }

    /// Whether the node is reachable from the document root.
    pub fn is_connected(&self, id: NodeId) -> bool {
        let mut current = id;
        // Parent links cannot cycle by construction, but cap the walk so a
        // corrupted arena can never loop forever.
        for _ in 0..self.nodes.len().max(1) {
            if current == self.root {
                return self.nodes.contains_key(&id);
            }
            match self.nodes.get(&current).and_then(|n| n.parent) {
                Some(p) => current = p,
                None => return false,
            }
        }
        false
    }

    pub fn is_element(&self, id: NodeId) -> bool {
        self.nodes.get(&id).is_some_and(|n| n.is_element())
    }

    /// A rendered, connected element node eligible for hover/inspection.
    /// Excludes script/style/comment nodes and detached nodes.
    pub fn is_inspectable(&self, id: NodeId) -> bool {
        let Some(node) = self.nodes.get(&id) else {
            return false;
        };
        node.kind == NodeKind::Element
            && !NON_INSPECTABLE_TAGS.contains(&node.tag.as_str())
            && node.style.is_rendered()
            && self.is_connected(id)
    }

    /// First element with a matching `id` attribute, in tree order.
    pub fn element_by_id(&self, dom_id: &str) -> Option<NodeId> {
        self.walk_find(self.root, &|node| node.dom_id() == Some(dom_id))
    }

    fn walk_find(&self, from: NodeId, pred: &dyn Fn(&Node) -> bool) -> Option<NodeId> {
        let node = self.nodes.get(&from)?;
        if node.is_element() && pred(node) {
            return Some(from);
        }
        for child in &node.children {
            if let Some(found) = self.walk_find(*child, pred) {
                return Some(found);
            }
        }
        None
    }

    /// The node and its ancestors, nearest-first, self included.
    pub fn inclusive_ancestors(&self, id: NodeId) -> Vec<NodeId> {
        let mut chain = Vec::new();
        let mut current = Some(id);
        while let Some(c) = current {
            if chain.len() > self.nodes.len() {
                break;
            }
            chain.push(c);
            current = self.nodes.get(&c).and_then(|n| n.parent);
        }
        chain
    }

    /// Concatenated text of all descendant text nodes, tree order.
    pub fn visible_text(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(id, &mut out);
        out.trim().to_string()
    }

    fn collect_text(&self, id: NodeId, out: &mut String) {
        let Some(node) = self.nodes.get(&id) else {
            return;
        };
        match node.kind {
            NodeKind::Text => {
                if !out.is_empty() && !out.ends_with(' ') {
                    out.push(' ');
                }
                out.push_str(node.text.trim());
            }
            NodeKind::Element => {
                if node.style.is_rendered() {
                    for child in &node.children {
                        self.collect_text(*child, out);
                    }
                }
            }
            NodeKind::Comment => {}
        }
    }

    // ─────────────────────────────────────────────────────────────
    // Node mutation
    // ─────────────────────────────────────────────────────────────

    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.attributes.insert(name.to_string(), value.to_string());
            self.emit(id, MutationKind::Attributes);
        }
    }

    pub fn remove_attribute(&mut self, id: NodeId, name: &str) {
        if let Some(node) = self.nodes.get_mut(&id) {
            if node.attributes.remove(name).is_some() {
                self.emit(id, MutationKind::Attributes);
            }
        }
    }

    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.nodes
            .get(&id)
            .and_then(|n| n.attributes.get(name))
            .map(String::as_str)
    }

    /// Replace the element's class list.
    pub fn set_classes(&mut self, id: NodeId, classes: &[&str]) {
        self.set_attribute(id, "class", &classes.join(" "));
    }

    pub fn classes(&self, id: NodeId) -> Vec<String> {
        self.nodes.get(&id).map(|n| n.classes()).unwrap_or_default()
    }

    pub fn set_computed_style(&mut self, id: NodeId, style: ComputedStyle) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.style = style;
        }
    }

    pub fn style(&self, id: NodeId) -> Option<&ComputedStyle> {
        self.nodes.get(&id).map(|n| &n.style)
    }

    pub fn set_rect(&mut self, id: NodeId, rect: Rect) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.rect = rect;
        }
    }

    pub fn rect(&self, id: NodeId) -> Rect {
        self.nodes.get(&id).map(|n| n.rect).unwrap_or_default()
    }

    pub fn attach_fiber(&mut self, id: NodeId, fiber: FiberId) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.fiber = Some(fiber);
        }
    }

    pub fn fiber_of(&self, id: NodeId) -> Option<FiberId> {
        self.nodes.get(&id).and_then(|n| n.fiber)
    }

    // ─────────────────────────────────────────────────────────────
    // Overlay helpers
    // ─────────────────────────────────────────────────────────────

    /// All connected elements carrying the given marker attribute. Used by
    /// the engine to locate and remove its own overlay nodes.
    pub fn marked_elements(&self, marker: &str) -> Vec<NodeId> {
        let mut out = Vec::new();
        self.collect_marked(self.root, marker, &mut out);
        out
    }

    fn collect_marked(&self, from: NodeId, marker: &str, out: &mut Vec<NodeId>) {
        let Some(node) = self.nodes.get(&from) else {
            return;
        };
        if node.is_element() && node.attributes.contains_key(marker) {
            out.push(from);
        }
        for child in &node.children {
            self.collect_marked(*child, marker, out);
        }
    }

    // ─────────────────────────────────────────────────────────────
    // Mutation observation
    // ─────────────────────────────────────────────────────────────

    /// Watch `target` and its subtree for mutations. Delivery is
    /// synchronous from the mutating call. Stop with [`Document::unobserve`].
    pub fn observe(&mut self, target: NodeId, callback: ObserverCallback) -> ObserverId {
        self.observers.register(target, callback)
    }

    /// Stop an observer. Safe to call with an already-removed id.
    pub fn unobserve(&mut self, id: ObserverId) {
        self.observers.remove(id);
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    fn emit(&mut self, target: NodeId, kind: MutationKind) {
        let chain = self.inclusive_ancestors(target);
        self.emit_to_chain(&chain, target, kind);
    }

    fn emit_to_chain(&mut self, chain: &[NodeId], target: NodeId, kind: MutationKind) {
        let record = MutationRecord { target, kind };
        // Callbacks are cloned out of the registry before invocation so a
        // callback may observe/unobserve without tripping a borrow.
        for callback in self.observers.matching(chain) {
            (callback.borrow_mut())(&record);
        }
    }
}
