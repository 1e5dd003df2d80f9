//! # Mutation Observation
//!
//! Explicit per-node observation with a single cancel handle per
//! registration. Records are delivered synchronously by the document as a
//! side effect of the mutating call, to every observer registered on the
//! mutated node or one of its ancestors (subtree semantics).
//!
//! There is no garbage-collection-based lifecycle: an observer runs until
//! [`crate::Document::unobserve`] is called with its id, and `unobserve` is
//! idempotent.

use std::cell::RefCell;
use std::rc::Rc;

use crate::node::NodeId;

/// Handle identifying one observer registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(pub u64);

/// What changed on the observed subtree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    /// An attribute was set or removed.
    Attributes,
    /// A child was appended or removed.
    ChildList,
    /// The node itself was detached from the document.
    Detached,
}

/// One delivered mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MutationRecord {
    /// The node the mutation happened on (not the observer's target).
    pub target: NodeId,
    pub kind: MutationKind,
}

/// Observer callback. Receives only the record, never the document, so a
/// callback cannot re-enter document mutation mid-delivery.
pub type ObserverCallback = Rc<RefCell<dyn FnMut(&MutationRecord)>>;

pub(crate) struct ObserverEntry {
    pub id: ObserverId,
    pub target: NodeId,
    pub callback: ObserverCallback,
}

/// Registry of live observers, owned by the document.
#[derive(Default)]
pub(crate) struct ObserverRegistry {
    entries: Vec<ObserverEntry>,
    next_id: u64,
}

impl ObserverRegistry {
    pub fn register(&mut self, target: NodeId, callback: ObserverCallback) -> ObserverId {
        self.next_id += 1;
        let id = ObserverId(self.next_id);
        self.entries.push(ObserverEntry {
            id,
            target,
            callback,
        });
        id
    }

    /// Remove a registration. Returns false when the id was already gone.
    pub fn remove(&mut self, id: ObserverId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        before != self.entries.len()
    }

    /// Clone the callbacks of every observer whose target is in
    /// `watched_chain` (the mutated node and its ancestors). Cloning first
    /// keeps delivery re-entrancy-safe with respect to the registry.
    pub fn matching(&self, watched_chain: &[NodeId]) -> Vec<ObserverCallback> {
        self.entries
            .iter()
            .filter(|e| watched_chain.contains(&e.target))
            .map(|e| Rc::clone(&e.callback))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
