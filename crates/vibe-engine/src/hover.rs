//! # Hover Tracking
//!
//! Resolves pointer crossings to the most specific inspectable element and
//! debounces rapid target changes so the inspection icon never flickers.
//!
//! Timing is explicit: every method takes `now`, and pending changes are
//! committed by [`HoverTracker::poll`] (driven from tick events). Two
//! windows apply:
//!
//! - target changes coalesce within [`DEBOUNCE`] (latest wins);
//! - leaving with no successor clears the target only after [`GRACE`], so
//!   the pointer can travel from an element onto its own inspection icon.

use std::time::{Duration, Instant};

use vibe_core::Point;
use vibe_host::{Document, NodeId};

/// Coalescing window for rapid enter/leave bursts.
pub const DEBOUNCE: Duration = Duration::from_millis(40);

/// Delay before a leave with no new target clears the hover target.
pub const GRACE: Duration = Duration::from_millis(150);

#[derive(Debug, Clone, Copy)]
struct PendingChange {
    target: Option<NodeId>,
    apply_at: Instant,
}

/// Tracks the current hover target while inspection mode is enabled.
#[derive(Debug, Default)]
pub struct HoverTracker {
    current: Option<NodeId>,
    pending: Option<PendingChange>,
}

impl HoverTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<NodeId> {
        self.current
    }

    /// Handle a pointer-enter dispatched to `target`. Schedules a debounced
    /// change to the resolved inspectable element, if any.
    pub fn pointer_entered(
        &mut self,
        doc: &Document,
        target: NodeId,
        position: Point,
        now: Instant,
    ) {
        match resolve_target(doc, target, position) {
            Some(resolved) if Some(resolved) == self.current => {
                // Re-entering the current target cancels a pending clear.
                self.pending = None;
            }
            Some(resolved) => {
                self.pending = Some(PendingChange {
                    target: Some(resolved),
                    apply_at: now + DEBOUNCE,
                });
            }
            None => self.schedule_clear(now),
        }
    }

    /// Handle a pointer-leave. With no successor enter before the grace
    /// window ends, the target clears.
    pub fn pointer_left(&mut self, target: NodeId, now: Instant) {
        let leaving_relevant = Some(target) == self.current
            || self
                .pending
                .is_some_and(|p| p.target == Some(target));
        if leaving_relevant {
            self.schedule_clear(now);
        }
    }

    fn schedule_clear(&mut self, now: Instant) {
        if self.current.is_some() || self.pending.is_some() {
            self.pending = Some(PendingChange {
                target: None,
                apply_at: now + GRACE,
            });
        }
    }

    /// Commit a due pending change. Returns the new target when the value
    /// actually changed.
    pub fn poll(&mut self, now: Instant) -> Option<Option<NodeId>> {
        let pending = self.pending?;
        if now < pending.apply_at {
            return None;
        }
        self.pending = None;
        if pending.target == self.current {
            return None;
        }
        self.current = pending.target;
        Some(pending.target)
    }

    /// Drop all state (mode disabled).
    pub fn reset(&mut self) {
        self.current = None;
        self.pending = None;
    }
}

/// Resolve a dispatch target to the most specific inspectable element under
/// the pointer: climb to the nearest inspectable ancestor, then descend to
/// the deepest inspectable child whose box contains the pointer. Ties
/// between equally deep siblings go to the earliest in DOM order.
pub fn resolve_target(doc: &Document, from: NodeId, position: Point) -> Option<NodeId> {
    let mut base = from;
    while !doc.is_inspectable(base) {
        base = doc.parent(base)?;
    }

    // Descend with a step cap so a corrupted tree cannot loop.
    for _ in 0..doc.node_count() {
        let next = doc
            .children(base)
            .iter()
            .copied()
            .find(|c| doc.is_inspectable(*c) && doc.rect(*c).contains(position));
        match next {
            Some(child) => base = child,
            None => break,
        }
    }
    Some(base)
}

#[cfg(test)]
mod tests {
    use super::*;
    use vibe_core::Rect;

    fn page() -> (Document, NodeId, NodeId, NodeId) {
        let mut doc = Document::new();
        let outer = doc.create_element("div");
        let inner = doc.create_element("span");
        let sibling = doc.create_element("p");
        doc.append_child(doc.root(), outer);
        doc.append_child(outer, inner);
        doc.append_child(outer, sibling);
        doc.set_rect(outer, Rect::new(0.0, 0.0, 400.0, 200.0));
        doc.set_rect(inner, Rect::new(10.0, 10.0, 100.0, 50.0));
        doc.set_rect(sibling, Rect::new(10.0, 100.0, 100.0, 50.0));
        (doc, outer, inner, sibling)
    }

    #[test]
    fn test_resolve_descends_to_deepest_containing_child() {
        let (doc, outer, inner, _) = page();
        let hit = resolve_target(&doc, outer, Point::new(20.0, 20.0));
        assert_eq!(hit, Some(inner));
    }

    #[test]
    fn test_resolve_stays_on_base_outside_children() {
        let (doc, outer, _, _) = page();
        let hit = resolve_target(&doc, outer, Point::new(300.0, 20.0));
        assert_eq!(hit, Some(outer));
    }

    #[test]
    fn test_resolve_climbs_from_non_inspectable_target() {
        let (mut doc, outer, _, _) = page();
        let text = doc.create_text("copy");
        doc.append_child(outer, text);
        let hit = resolve_target(&doc, text, Point::new(300.0, 20.0));
        assert_eq!(hit, Some(outer));
    }

    #[test]
    fn test_resolve_overlapping_siblings_first_in_dom_order_wins() {
        let (mut doc, outer, inner, sibling) = page();
        // Make both children contain the same point.
        doc.set_rect(sibling, Rect::new(10.0, 10.0, 100.0, 50.0));
        let hit = resolve_target(&doc, outer, Point::new(20.0, 20.0));
        assert_eq!(hit, Some(inner));
        let _ = sibling;
    }

    #[test]
    fn test_resolve_detached_yields_none() {
        let (mut doc, outer, inner, _) = page();
        doc.remove(outer);
        assert_eq!(resolve_target(&doc, inner, Point::new(20.0, 20.0)), None);
    }

    #[test]
    fn test_enter_commits_after_debounce() {
        let (doc, outer, inner, _) = page();
        let mut tracker = HoverTracker::new();
        let t0 = Instant::now();

        tracker.pointer_entered(&doc, outer, Point::new(20.0, 20.0), t0);
        assert_eq!(tracker.poll(t0), None);
        assert_eq!(tracker.poll(t0 + DEBOUNCE), Some(Some(inner)));
        assert_eq!(tracker.current(), Some(inner));
    }

    #[test]
    fn test_rapid_targets_coalesce_to_latest() {
        let (doc, outer, _, sibling) = page();
        let mut tracker = HoverTracker::new();
        let t0 = Instant::now();

        tracker.pointer_entered(&doc, outer, Point::new(20.0, 20.0), t0);
        tracker.pointer_entered(
            &doc,
            outer,
            Point::new(20.0, 120.0),
            t0 + Duration::from_millis(10),
        );
        // Only the latest target commits; converges to one affordance.
        assert_eq!(
            tracker.poll(t0 + Duration::from_millis(10) + DEBOUNCE),
            Some(Some(sibling))
        );
        assert_eq!(tracker.poll(t0 + Duration::from_millis(200)), None);
    }

    #[test]
    fn test_leave_clears_after_grace() {
        let (doc, outer, inner, _) = page();
        let mut tracker = HoverTracker::new();
        let t0 = Instant::now();

        tracker.pointer_entered(&doc, outer, Point::new(20.0, 20.0), t0);
        tracker.poll(t0 + DEBOUNCE);
        assert_eq!(tracker.current(), Some(inner));

        let t1 = t0 + Duration::from_millis(100);
        tracker.pointer_left(inner, t1);
        // Still hovering within the grace window.
        assert_eq!(tracker.poll(t1 + Duration::from_millis(50)), None);
        assert_eq!(tracker.poll(t1 + GRACE), Some(None));
        assert_eq!(tracker.current(), None);
    }

    #[test]
    fn test_reenter_within_grace_cancels_clear() {
        let (doc, outer, inner, _) = page();
        let mut tracker = HoverTracker::new();
        let t0 = Instant::now();

        tracker.pointer_entered(&doc, outer, Point::new(20.0, 20.0), t0);
        tracker.poll(t0 + DEBOUNCE);
        tracker.pointer_left(inner, t0 + Duration::from_millis(100));
        tracker.pointer_entered(
            &doc,
            inner,
            Point::new(20.0, 20.0),
            t0 + Duration::from_millis(120),
        );

        // The pending clear was cancelled; target is unchanged.
        assert_eq!(tracker.poll(t0 + Duration::from_millis(500)), None);
        assert_eq!(tracker.current(), Some(inner));
    }

    #[test]
    fn test_leave_of_unrelated_node_is_ignored() {
        let (doc, outer, inner, sibling) = page();
        let mut tracker = HoverTracker::new();
        let t0 = Instant::now();

        tracker.pointer_entered(&doc, outer, Point::new(20.0, 20.0), t0);
        tracker.poll(t0 + DEBOUNCE);
        tracker.pointer_left(sibling, t0 + Duration::from_millis(60));
        assert_eq!(tracker.poll(t0 + Duration::from_millis(500)), None);
        assert_eq!(tracker.current(), Some(inner));
    }

    #[test]
    fn test_reset_drops_everything() {
        let (doc, outer, _, _) = page();
        let mut tracker = HoverTracker::new();
        let t0 = Instant::now();
        tracker.pointer_entered(&doc, outer, Point::new(20.0, 20.0), t0);
        tracker.poll(t0 + DEBOUNCE);
        tracker.reset();
        assert_eq!(tracker.current(), None);
        assert_eq!(tracker.poll(t0 + Duration::from_secs(1)), None);
    }
}
