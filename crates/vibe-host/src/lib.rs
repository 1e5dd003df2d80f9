//! # vibe-host - Host Document Model
//!
//! The collaborator side of the inspection engine's boundary: an in-memory
//! document tree with computed styles, bounding geometry, framework
//! introspection handles, explicit mutation observation, and input event
//! values. The engine reads element data through [`Document`] and writes its
//! transient overlay nodes back into it; nothing here knows about the engine.
//!
//! ## Public API
//!
//! ### Document (`document`)
//! - [`Document`] - Arena-backed node tree with viewport and observer registry
//!
//! ### Nodes (`node`)
//! - [`NodeId`] - Stable handle, valid across detachment
//! - [`Node`], [`NodeKind`] - Node data and kinds
//!
//! ### Styles (`style`)
//! - [`ComputedStyle`] - Resolved display/position/visibility plus property map
//!
//! ### Framework Introspection (`fiber`)
//! - [`FiberArena`], [`FiberNode`], [`FiberId`], [`FiberKind`] - Possibly-cyclic
//!   component-tree handles attached to elements
//!
//! ### Observation (`observer`)
//! - [`ObserverId`], [`MutationRecord`], [`MutationKind`] - Explicit, cancelable
//!   subtree observation
//!
//! ### Events (`events`)
//! - [`HostEvent`], [`PointerEvent`], [`KeyEvent`], [`Key`] - Input values the
//!   host feeds to the engine

pub mod document;
pub mod events;
pub mod fiber;
pub mod node;
pub mod observer;
pub mod style;

pub use document::Document;
pub use events::{HostEvent, Key, KeyEvent, PointerEvent, PointerKind};
pub use fiber::{FiberArena, FiberId, FiberKind, FiberNode};
pub use node::{Node, NodeId, NodeKind};
pub use observer::{MutationKind, MutationRecord, ObserverCallback, ObserverId};
pub use style::ComputedStyle;
