//! # Element Analyzer
//!
//! Produces [`InspectionMetadata`] snapshots for document elements,
//! maintains the bounded analysis cache, and watches analyzed elements for
//! mutations that invalidate their cached snapshots.
//!
//! Analysis is async and budgeted: each [`AnalysisLevel`] carries a time
//! budget, enforced twice — an outer `tokio::time::timeout`, and explicit
//! deadline checkpoints inside the traversal stages so CPU-bound work that
//! never reaches an await point still observes the budget. An analysis that
//! exceeds its budget rejects with [`Error::AnalysisTimeout`]; it never
//! hangs.
//!
//! Failure policy: problems in the mandatory element/styles groups reject
//! the whole analysis; problems in optional groups (framework
//! introspection) degrade that group to `None` with at most a warning.

mod accessibility;
mod cache;
mod react;

pub use accessibility::{audit, is_interactive};
pub use cache::{AnalysisCache, DEFAULT_CACHE_CAPACITY};

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::rc::Rc;
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Utc;

use vibe_core::prelude::*;
use vibe_core::{
    classify_classes, truncate_text, AnalysisLevel, AncestorSummary, ChildSummary,
    CssFrameworkInfo, ElementInfo, InspectionInfo, InspectionMetadata, LayoutSummary,
    PerformanceMetrics, StyleInfo, GROUP_ENTRY_MAX,
};
use vibe_host::{Document, MutationRecord, NodeId, ObserverId};

use crate::stats::CacheStats;

type ObservedMap = Rc<RefCell<HashMap<NodeId, ObserverId>>>;
type DirtySet = Rc<RefCell<HashSet<NodeId>>>;

/// Cancel handle for one observed element.
///
/// Registration is idempotent per element: observing the same element again
/// hands out another handle to the same underlying observer. `cancel` from
/// any handle stops the observation; later cancels are no-ops.
pub struct ObserverRegistration {
    element: NodeId,
    observed: ObservedMap,
}

impl ObserverRegistration {
    /// Synchronously stop future observation callbacks for this element.
    pub fn cancel(&self, doc: &mut Document) {
        if let Some(id) = self.observed.borrow_mut().remove(&self.element) {
            doc.unobserve(id);
        }
    }

    pub fn is_active(&self) -> bool {
        self.observed.borrow().contains_key(&self.element)
    }
}

/// The analyzer: owns the cache exclusively; reads never trigger writes.
pub struct ElementAnalyzer {
    cache: AnalysisCache,
    observed: ObservedMap,
    /// Elements whose cached snapshot was invalidated by a mutation.
    /// Written from observer callbacks, drained before cache operations.
    dirty: DirtySet,
    /// Test hook: overrides every level's budget when set.
    budget_override: Option<Duration>,
}

impl Default for ElementAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl ElementAnalyzer {
    pub fn new() -> Self {
        Self::with_cache_capacity(DEFAULT_CACHE_CAPACITY)
    }

    pub fn with_cache_capacity(capacity: usize) -> Self {
        Self {
            cache: AnalysisCache::with_capacity(capacity),
            observed: Rc::new(RefCell::new(HashMap::new())),
            dirty: Rc::new(RefCell::new(HashSet::new())),
            budget_override: None,
        }
    }

    /// Replace the per-level budgets with a fixed duration. Test hook.
    pub fn set_budget_override(&mut self, budget: Option<Duration>) {
        self.budget_override = budget;
    }

    // ─────────────────────────────────────────────────────────────
    // Cache surface
    // ─────────────────────────────────────────────────────────────

    /// Pure lookup: returns the cached snapshot, never analyzes.
    pub fn get_cached_analysis(&mut self, element: NodeId) -> Option<Arc<InspectionMetadata>> {
        self.flush_invalidations();
        self.cache.lookup(element)
    }

    /// Drop every cached snapshot. Idempotent.
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    fn flush_invalidations(&mut self) {
        let stale: Vec<NodeId> = self.dirty.borrow_mut().drain().collect();
        for element in stale {
            trace!("invalidating cached analysis for {element}");
            self.cache.remove(element);
        }
    }

    // ─────────────────────────────────────────────────────────────
    // Observation
    // ─────────────────────────────────────────────────────────────

    /// Watch an element for attribute/subtree mutations so its cached
    /// snapshot can be invalidated. Safe to call multiple times for the
    /// same element — only one underlying observer is ever registered.
    pub fn observe_element(&mut self, doc: &mut Document, element: NodeId) -> ObserverRegistration {
        if !self.observed.borrow().contains_key(&element) {
            let dirty = Rc::clone(&self.dirty);
            let callback = Rc::new(RefCell::new(move |_record: &MutationRecord| {
                dirty.borrow_mut().insert(element);
            }));
            let id = doc.observe(element, callback);
            self.observed.borrow_mut().insert(element, id);
        }
        ObserverRegistration {
            element,
            observed: Rc::clone(&self.observed),
        }
    }

    pub fn observed_count(&self) -> usize {
        self.observed.borrow().len()
    }

    // ─────────────────────────────────────────────────────────────
    // Analysis
    // ─────────────────────────────────────────────────────────────

    /// Analyze one element at the requested level.
    ///
    /// Rejects with [`Error::InvalidTarget`] for non-elements and nodes
    /// detached before or during the analysis, and with
    /// [`Error::AnalysisTimeout`] when the level budget is exceeded. On
    /// success the snapshot replaces any cached entry for the element.
    pub async fn analyze_element(
        &mut self,
        doc: &Document,
        element: NodeId,
        level: AnalysisLevel,
    ) -> Result<Arc<InspectionMetadata>> {
        self.flush_invalidations();
        validate_target(doc, element)?;

        let budget = self.budget_override.unwrap_or_else(|| level.budget());
        let started = Instant::now();

        let outcome =
            tokio::time::timeout(budget, run_analysis(doc, element, level, started, budget)).await;

        let metadata = match outcome {
            Err(_elapsed) => {
                warn!("{level} analysis of {element} hit the outer timeout");
                return Err(Error::analysis_timeout(level));
            }
            Ok(Err(e)) => return Err(e),
            Ok(Ok(metadata)) => metadata,
        };

        let snapshot = Arc::new(metadata);
        self.cache.insert(element, Arc::clone(&snapshot));
        Ok(snapshot)
    }
}

/// Reject non-elements and detached nodes up front.
fn validate_target(doc: &Document, element: NodeId) -> Result<()> {
    let Some(node) = doc.get(element) else {
        return Err(Error::invalid_target(format!("unknown node {element}")));
    };
    if !node.is_element() {
        return Err(Error::invalid_target(format!(
            "{element} is not an element node"
        )));
    }
    if !doc.is_connected(element) {
        return Err(Error::invalid_target(format!(
            "{element} is detached from the document"
        )));
    }
    Ok(())
}

/// Deadline checkpoint used inside traversal stages.
fn check_budget(started: Instant, budget: Duration, level: AnalysisLevel) -> Result<()> {
    if started.elapsed() >= budget {
        return Err(Error::analysis_timeout(level));
    }
    Ok(())
}

/// Re-validate connectivity at stage boundaries: the element may be removed
/// while the analysis is parked at an await point.
fn ensure_attached(doc: &Document, element: NodeId) -> Result<()> {
    if !doc.is_connected(element) {
        return Err(Error::invalid_target(format!(
            "{element} was removed during analysis"
        )));
    }
    Ok(())
}

async fn run_analysis(
    doc: &Document,
    element: NodeId,
    level: AnalysisLevel,
    started: Instant,
    budget: Duration,
) -> Result<InspectionMetadata> {
    check_budget(started, budget, level)?;
    let node = doc
        .get(element)
        .ok_or_else(|| Error::invalid_target(format!("unknown node {element}")))?;

    // Mandatory groups: a failure here fails the analysis.
    let element_info = ElementInfo {
        tag: node.tag.clone(),
        id: node.dom_id().map(str::to_string),
        classes: node.classes(),
        attributes: node.attributes.clone(),
        text: truncate_text(&doc.visible_text(element)),
    };

    let rect = node.rect;
    let mut properties: BTreeMap<String, String> = BTreeMap::new();
    properties.insert("display".to_string(), node.style.display.clone());
    properties.insert("position".to_string(), node.style.position.clone());
    for (name, value) in &node.style.properties {
        if properties.len() >= GROUP_ENTRY_MAX {
            break;
        }
        properties.insert(name.clone(), value.clone());
    }
    let styles = StyleInfo {
        display: node.style.display.clone(),
        position: node.style.position.clone(),
        width: rect.width.max(0.0),
        height: rect.height.max(0.0),
        top: rect.y.max(0.0),
        left: rect.x.max(0.0),
        properties,
    };

    check_budget(started, budget, level)?;
    tokio::task::yield_now().await;
    ensure_attached(doc, element)?;

    // Optional groups: best-effort from here on.
    let css_framework = if level.includes_framework() {
        Some(CssFrameworkInfo {
            tailwind_classes: classify_classes(&node.classes()),
        })
    } else {
        None
    };

    let react = if level.includes_framework() {
        doc.fiber_of(element)
            .and_then(|handle| react::extract(doc.fibers(), handle))
    } else {
        None
    };

    check_budget(started, budget, level)?;
    tokio::task::yield_now().await;
    ensure_attached(doc, element)?;

    let layout = if level.includes_layout() {
        Some(build_layout(doc, element, started, budget, level)?)
    } else {
        None
    };

    let accessibility = audit(doc, element);

    let performance = if level.includes_framework() {
        let mut metrics = PerformanceMetrics::default();
        metrics.record("analysis_ms", started.elapsed().as_secs_f64() * 1000.0);
        metrics.record("child_count", doc.children(element).len() as f64);
        metrics.record("class_count", node.classes().len() as f64);
        metrics.record("attribute_count", node.attributes.len() as f64);
        Some(metrics)
    } else {
        None
    };

    check_budget(started, budget, level)?;

    Ok(InspectionMetadata {
        element: element_info,
        styles,
        css_framework,
        layout,
        react,
        accessibility,
        performance,
        inspection: InspectionInfo {
            captured_at: Utc::now(),
            level,
            is_visible: node.style.is_visible() && rect.has_area(),
            is_interactive: is_interactive(doc, element),
        },
    })
}

/// Ancestor/child chains, nearest-first parents, capped and budgeted.
fn build_layout(
    doc: &Document,
    element: NodeId,
    started: Instant,
    budget: Duration,
    level: AnalysisLevel,
) -> Result<LayoutSummary> {
    let mut parent_chain = Vec::new();
    for ancestor in doc.inclusive_ancestors(element).into_iter().skip(1) {
        check_budget(started, budget, level)?;
        if parent_chain.len() >= GROUP_ENTRY_MAX {
            break;
        }
        let Some(node) = doc.get(ancestor) else {
            continue;
        };
        if !node.is_element() {
            continue;
        }
        parent_chain.push(AncestorSummary {
            tag: node.tag.clone(),
            id: node.dom_id().map(str::to_string),
            display: node.style.display.clone(),
            position: node.style.position.clone(),
        });
    }

    let mut children = Vec::new();
    for child in doc.children(element) {
        check_budget(started, budget, level)?;
        if children.len() >= GROUP_ENTRY_MAX {
            break;
        }
        let Some(node) = doc.get(*child) else {
            continue;
        };
        if !node.is_element() {
            continue;
        }
        children.push(ChildSummary {
            tag: node.tag.clone(),
            id: node.dom_id().map(str::to_string),
            class_count: node.classes().len(),
        });
    }

    let position_kind = doc
        .style(element)
        .map(|s| s.position.clone())
        .unwrap_or_else(|| "static".to_string());

    Ok(LayoutSummary {
        position_kind,
        parent_chain,
        children,
    })
}
