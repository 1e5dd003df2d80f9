//! Bounded analysis cache
//!
//! FIFO eviction: when the cache is full, the oldest-inserted entry is
//! dropped. Re-analyzing an element replaces its entry in place without
//! refreshing its insertion age — the simplest rule that keeps eviction
//! order testable.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use vibe_core::InspectionMetadata;
use vibe_host::NodeId;

use crate::stats::CacheStats;

/// Default maximum number of cached snapshots.
pub const DEFAULT_CACHE_CAPACITY: usize = 100;

pub struct AnalysisCache {
    entries: HashMap<NodeId, Arc<InspectionMetadata>>,
    /// Insertion order, oldest first.
    order: VecDeque<NodeId>,
    capacity: usize,
    hits: u64,
    misses: u64,
}

impl Default for AnalysisCache {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CACHE_CAPACITY)
    }
}

impl AnalysisCache {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            order: VecDeque::new(),
            capacity: capacity.max(1),
            hits: 0,
            misses: 0,
        }
    }

    /// Insert or replace a snapshot, evicting the oldest entry on overflow.
    pub fn insert(&mut self, element: NodeId, snapshot: Arc<InspectionMetadata>) {
        if self.entries.insert(element, snapshot).is_some() {
            // Replacement: insertion age is kept.
            return;
        }
        self.order.push_back(element);
        while self.entries.len() > self.capacity {
            if let Some(oldest) = self.order.pop_front() {
                self.entries.remove(&oldest);
                tracing::trace!("cache evicted {oldest}");
            }
        }
    }

    /// Counted lookup: updates hit/miss statistics.
    pub fn lookup(&mut self, element: NodeId) -> Option<Arc<InspectionMetadata>> {
        match self.entries.get(&element) {
            Some(snapshot) => {
                self.hits += 1;
                Some(Arc::clone(snapshot))
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    /// Uncounted lookup, for internal bookkeeping.
    pub fn peek(&self, element: NodeId) -> Option<&Arc<InspectionMetadata>> {
        self.entries.get(&element)
    }

    pub fn remove(&mut self, element: NodeId) {
        if self.entries.remove(&element).is_some() {
            self.order.retain(|e| *e != element);
        }
    }

    /// Drop every entry. Hit/miss counters survive: they describe lookup
    /// history, not occupancy.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.entries.len(),
            capacity: self.capacity,
            hits: self.hits,
            misses: self.misses,
            hit_rate: self.hit_rate(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::collections::BTreeMap;
    use vibe_core::{AnalysisLevel, ElementInfo, InspectionInfo, StyleInfo};

    fn snapshot(tag: &str) -> Arc<InspectionMetadata> {
        Arc::new(InspectionMetadata {
            element: ElementInfo {
                tag: tag.into(),
                id: None,
                classes: vec![],
                attributes: BTreeMap::new(),
                text: String::new(),
            },
            styles: StyleInfo {
                display: "block".into(),
                position: "static".into(),
                width: 0.0,
                height: 0.0,
                top: 0.0,
                left: 0.0,
                properties: BTreeMap::new(),
            },
            css_framework: None,
            layout: None,
            react: None,
            accessibility: vec![],
            performance: None,
            inspection: InspectionInfo {
                captured_at: Utc::now(),
                level: AnalysisLevel::Basic,
                is_visible: true,
                is_interactive: false,
            },
        })
    }

    #[test]
    fn test_insert_and_lookup() {
        let mut cache = AnalysisCache::with_capacity(10);
        cache.insert(NodeId(1), snapshot("div"));
        assert!(cache.lookup(NodeId(1)).is_some());
        assert!(cache.lookup(NodeId(2)).is_none());
        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert!((stats.hit_rate - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_fifo_eviction_order() {
        let mut cache = AnalysisCache::with_capacity(3);
        for i in 1..=3 {
            cache.insert(NodeId(i), snapshot("div"));
        }
        cache.insert(NodeId(4), snapshot("div"));
        assert_eq!(cache.len(), 3);
        assert!(cache.peek(NodeId(1)).is_none());
        assert!(cache.peek(NodeId(2)).is_some());
        assert!(cache.peek(NodeId(4)).is_some());
    }

    #[test]
    fn test_replacement_keeps_insertion_age() {
        let mut cache = AnalysisCache::with_capacity(2);
        cache.insert(NodeId(1), snapshot("div"));
        cache.insert(NodeId(2), snapshot("span"));
        // Re-analysis of 1 replaces the value but not its age.
        cache.insert(NodeId(1), snapshot("section"));
        cache.insert(NodeId(3), snapshot("p"));
        // 1 was still oldest, so it is the one evicted.
        assert!(cache.peek(NodeId(1)).is_none());
        assert!(cache.peek(NodeId(2)).is_some());
        assert!(cache.peek(NodeId(3)).is_some());
    }

    #[test]
    fn test_never_exceeds_capacity() {
        let mut cache = AnalysisCache::with_capacity(5);
        for i in 0..200 {
            cache.insert(NodeId(i), snapshot("div"));
            assert!(cache.len() <= 5);
        }
    }

    #[test]
    fn test_clear_is_idempotent_and_keeps_counters() {
        let mut cache = AnalysisCache::with_capacity(5);
        cache.insert(NodeId(1), snapshot("div"));
        cache.lookup(NodeId(1));
        cache.clear();
        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.stats().hits, 1);
        assert!(cache.lookup(NodeId(1)).is_none());
    }

    #[test]
    fn test_remove_unknown_is_noop() {
        let mut cache = AnalysisCache::with_capacity(5);
        cache.remove(NodeId(42));
        assert!(cache.is_empty());
    }
}
