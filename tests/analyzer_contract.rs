//! Integration tests for the element analyzer contract

use std::sync::Arc;
use std::time::Instant;

use vibe_core::{AnalysisLevel, Error, Rect, TailwindCategory};
use vibe_engine::ElementAnalyzer;
use vibe_host::{Document, FiberNode, NodeId};

/// Helper to build an attached element with geometry.
fn attach_element(doc: &mut Document, tag: &str, classes: &[&str]) -> NodeId {
    let node = doc.create_element(tag);
    doc.set_classes(node, classes);
    doc.set_rect(node, Rect::new(20.0, 20.0, 240.0, 120.0));
    doc.append_child(doc.root(), node);
    node
}

#[tokio::test]
async fn analysis_levels_populate_their_groups_within_budget() {
    let mut doc = Document::new();
    let div = attach_element(&mut doc, "div", &["p-4", "flex"]);
    let mut analyzer = ElementAnalyzer::new();

    for level in [
        AnalysisLevel::Basic,
        AnalysisLevel::Detailed,
        AnalysisLevel::Comprehensive,
    ] {
        let started = Instant::now();
        let meta = analyzer.analyze_element(&doc, div, level).await.unwrap();
        let elapsed = started.elapsed();

        assert!(
            elapsed < level.budget(),
            "{level} analysis took {elapsed:?}, budget {:?}",
            level.budget()
        );
        assert!(meta.satisfies_level());
        assert_eq!(meta.inspection.level, level);
        assert_eq!(meta.css_framework.is_some(), level.includes_framework());
        assert_eq!(meta.layout.is_some(), level.includes_layout());
    }
}

#[tokio::test]
async fn detached_and_bogus_targets_always_reject() {
    let mut doc = Document::new();
    let div = attach_element(&mut doc, "div", &[]);
    doc.remove(div);
    let mut analyzer = ElementAnalyzer::new();

    for level in [
        AnalysisLevel::Basic,
        AnalysisLevel::Detailed,
        AnalysisLevel::Comprehensive,
    ] {
        let err = analyzer.analyze_element(&doc, div, level).await.unwrap_err();
        assert!(matches!(err, Error::InvalidTarget { .. }));

        let err = analyzer
            .analyze_element(&doc, NodeId(123_456), level)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidTarget { .. }));
    }
}

#[tokio::test]
async fn tailwind_scenario_from_hover_to_classification() {
    let mut doc = Document::new();
    let div = attach_element(&mut doc, "div", &["p-4", "bg-blue-500", "sm:flex"]);
    let mut analyzer = ElementAnalyzer::new();

    let meta = analyzer
        .analyze_element(&doc, div, AnalysisLevel::Detailed)
        .await
        .unwrap();

    let classes = &meta.css_framework.as_ref().unwrap().tailwind_classes;
    let find = |name: &str| classes.iter().find(|c| c.class_name == name).unwrap();

    let p4 = find("p-4");
    assert_eq!(p4.category, TailwindCategory::Spacing);
    assert!(!p4.responsive);

    let bg = find("bg-blue-500");
    assert_eq!(bg.category, TailwindCategory::Colors);
    assert!(!bg.responsive);

    let smflex = find("sm:flex");
    assert_eq!(smflex.category, TailwindCategory::Layout);
    assert!(smflex.responsive);
}

#[tokio::test]
async fn cyclic_fiber_handle_analyzes_without_hanging() {
    let mut doc = Document::new();
    let div = attach_element(&mut doc, "div", &[]);

    // Three-node return cycle plus a self-loop, as corrupt handles present.
    let a = doc.fibers_mut().add(FiberNode::host("div"));
    let b = doc.fibers_mut().add(FiberNode::anonymous());
    let c = doc.fibers_mut().add(FiberNode::anonymous());
    doc.fibers_mut().link_return(a, b);
    doc.fibers_mut().link_return(b, c);
    doc.fibers_mut().link_return(c, a);
    doc.attach_fiber(div, a);

    let mut analyzer = ElementAnalyzer::new();
    let started = Instant::now();
    let meta = analyzer
        .analyze_element(&doc, div, AnalysisLevel::Comprehensive)
        .await
        .unwrap();

    assert!(started.elapsed() < AnalysisLevel::Comprehensive.budget());
    // Introspection degraded, analysis did not.
    let react = meta.react.as_ref().unwrap();
    assert_eq!(react.component_name, "div");
}

#[tokio::test]
async fn cache_reflects_last_analysis_and_clear_empties_it() {
    let mut doc = Document::new();
    let first = attach_element(&mut doc, "div", &[]);
    let second = attach_element(&mut doc, "span", &[]);
    let mut analyzer = ElementAnalyzer::new();

    let a = analyzer
        .analyze_element(&doc, first, AnalysisLevel::Basic)
        .await
        .unwrap();
    let b = analyzer
        .analyze_element(&doc, second, AnalysisLevel::Basic)
        .await
        .unwrap();

    assert!(Arc::ptr_eq(&analyzer.get_cached_analysis(first).unwrap(), &a));
    assert!(Arc::ptr_eq(&analyzer.get_cached_analysis(second).unwrap(), &b));

    analyzer.clear_cache();
    analyzer.clear_cache();
    assert!(analyzer.get_cached_analysis(first).is_none());
    assert!(analyzer.get_cached_analysis(second).is_none());
}

#[tokio::test]
async fn analyzing_many_elements_respects_the_cache_bound() {
    let mut doc = Document::new();
    let mut analyzer = ElementAnalyzer::new();

    for i in 0..150 {
        let div = attach_element(&mut doc, "div", &[]);
        doc.set_attribute(div, "data-index", &i.to_string());
        analyzer
            .analyze_element(&doc, div, AnalysisLevel::Basic)
            .await
            .unwrap();
        let stats = analyzer.cache_stats();
        assert!(stats.entries <= stats.capacity);
    }
    assert_eq!(analyzer.cache_stats().entries, 100);
}

#[tokio::test]
async fn mutation_during_observation_invalidates_only_that_entry() {
    let mut doc = Document::new();
    let watched = attach_element(&mut doc, "div", &[]);
    let untouched = attach_element(&mut doc, "span", &[]);
    let mut analyzer = ElementAnalyzer::new();

    analyzer
        .analyze_element(&doc, watched, AnalysisLevel::Basic)
        .await
        .unwrap();
    analyzer
        .analyze_element(&doc, untouched, AnalysisLevel::Basic)
        .await
        .unwrap();

    let registration = analyzer.observe_element(&mut doc, watched);
    doc.set_attribute(watched, "data-state", "open");

    assert!(analyzer.get_cached_analysis(watched).is_none());
    assert!(analyzer.get_cached_analysis(untouched).is_some());

    registration.cancel(&mut doc);
    registration.cancel(&mut doc);
}
