//! Framework-component extraction from host introspection handles
//!
//! Debug handles come from outside the engine's control: links can dangle,
//! names can be missing, and `return_link` chains can point back into
//! themselves. Every traversal here carries a visited set and a depth
//! bound, and extraction never fails — the worst outcome is a snapshot
//! named `"Unknown"` or no snapshot at all.

use std::collections::{BTreeMap, HashSet};

use vibe_core::{ComponentKind, HookSnapshot, ReactInfo, GROUP_ENTRY_MAX};
use vibe_host::{FiberArena, FiberId, FiberKind, FiberNode};

/// How many `return_link` hops to follow looking for a named component.
const MAX_CLIMB_DEPTH: usize = 8;

/// Extract a shallow component snapshot for an element's fiber handle.
///
/// Host-primitive fibers carry no component identity of their own, so the
/// walk climbs `return_link` toward the nearest function/class component.
/// Returns `None` only when the handle does not resolve to any fiber.
pub fn extract(arena: &FiberArena, handle: FiberId) -> Option<ReactInfo> {
    let start = arena.get(handle)?;

    let component = find_component(arena, handle).unwrap_or(start);

    Some(ReactInfo {
        component_name: component
            .component_name
            .clone()
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| "Unknown".to_string()),
        kind: component_kind(component),
        props: shallow_props(component),
        hooks: shallow_hooks(component),
    })
}

/// Climb `return_link` to the nearest function/class component, breaking on
/// cycles, dangling links, and the depth bound.
fn find_component(arena: &FiberArena, start: FiberId) -> Option<&FiberNode> {
    let mut visited: HashSet<FiberId> = HashSet::new();
    let mut current = start;

    for _ in 0..=MAX_CLIMB_DEPTH {
        if !visited.insert(current) {
            tracing::warn!("fiber chain cycles at {current:?}; stopping extraction");
            return None;
        }
        let node = arena.get(current)?;
        if matches!(node.kind, FiberKind::Function | FiberKind::Class)
            && node.component_name.is_some()
        {
            return Some(node);
        }
        current = node.return_link?;
    }
    None
}

fn component_kind(node: &FiberNode) -> ComponentKind {
    match node.kind {
        FiberKind::Function => ComponentKind::Function,
        FiberKind::Class => ComponentKind::Class,
        FiberKind::Host | FiberKind::Unknown => ComponentKind::Unknown,
    }
}

/// Top-level props only; nested values are carried as-is but never walked.
fn shallow_props(node: &FiberNode) -> BTreeMap<String, serde_json::Value> {
    node.props
        .iter()
        .take(GROUP_ENTRY_MAX)
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}

fn shallow_hooks(node: &FiberNode) -> Vec<HookSnapshot> {
    node.hooks
        .iter()
        .take(GROUP_ENTRY_MAX)
        .enumerate()
        .map(|(index, value)| HookSnapshot {
            index,
            value: value.clone(),
        })
        .collect()
}
