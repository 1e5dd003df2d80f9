//! # Inspection Snapshot Types
//!
//! Domain types for one element inspection: the immutable
//! [`InspectionMetadata`] snapshot and the metadata groups it is assembled
//! from. Snapshots are produced by the analyzer, cached behind `Arc`, and
//! never mutated — re-analysis produces a new value that replaces the cache
//! entry.
//!
//! ## Key Types
//!
//! - [`AnalysisLevel`] — requested inspection depth, with a time budget per level
//! - [`InspectionMetadata`] — the full snapshot
//! - [`ElementInfo`] / [`StyleInfo`] — mandatory groups, present at every level
//! - [`CssFrameworkInfo`] / [`ReactInfo`] — populated from `detailed` up
//! - [`LayoutSummary`] — ancestor/child chains, `comprehensive` only
//! - [`AccessibilityFinding`] — audit findings, produced at every level

use std::collections::BTreeMap;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::tailwind::TailwindClass;

/// Visible text on an element is truncated to this many characters.
pub const TEXT_PREVIEW_MAX: usize = 120;

/// Style property maps and ancestor/child chains are capped at this length.
pub const GROUP_ENTRY_MAX: usize = 32;

// ============================================================================
// AnalysisLevel
// ============================================================================

/// Requested depth of element inspection.
///
/// The level controls which metadata groups are populated and how much time
/// the analysis may spend before rejecting with a timeout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisLevel {
    /// Element + styles + inspection info only.
    Basic,
    /// Adds utility-class classification and framework introspection.
    #[default]
    Detailed,
    /// Adds full layout data with ancestor and child chains.
    Comprehensive,
}

impl AnalysisLevel {
    /// Time budget for one analysis at this level. An analysis exceeding
    /// its budget rejects rather than hangs.
    pub fn budget(&self) -> Duration {
        match self {
            AnalysisLevel::Basic => Duration::from_millis(100),
            AnalysisLevel::Detailed => Duration::from_millis(200),
            AnalysisLevel::Comprehensive => Duration::from_millis(500),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisLevel::Basic => "basic",
            AnalysisLevel::Detailed => "detailed",
            AnalysisLevel::Comprehensive => "comprehensive",
        }
    }

    /// Whether utility-class and framework groups are populated.
    pub fn includes_framework(&self) -> bool {
        !matches!(self, AnalysisLevel::Basic)
    }

    /// Whether ancestor/child layout chains are populated.
    pub fn includes_layout(&self) -> bool {
        matches!(self, AnalysisLevel::Comprehensive)
    }
}

impl std::fmt::Display for AnalysisLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string names no known analysis level.
///
/// Parsing is fallible on purpose: settings validation must reject unknown
/// levels instead of silently coercing them.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown analysis level: {0:?} (expected basic, detailed, or comprehensive)")]
pub struct ParseLevelError(pub String);

impl std::str::FromStr for AnalysisLevel {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "basic" => Ok(AnalysisLevel::Basic),
            "detailed" => Ok(AnalysisLevel::Detailed),
            "comprehensive" => Ok(AnalysisLevel::Comprehensive),
            other => Err(ParseLevelError(other.to_string())),
        }
    }
}

// ============================================================================
// Metadata groups
// ============================================================================

/// Identity of the inspected element: tag, id, classes, attributes, text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementInfo {
    pub tag: String,
    pub id: Option<String>,
    /// Class names in class-list order.
    pub classes: Vec<String>,
    pub attributes: BTreeMap<String, String>,
    /// Visible text, truncated to [`TEXT_PREVIEW_MAX`] characters.
    pub text: String,
}

/// Computed style summary: resolved display/position, box geometry, and a
/// bounded map of resolved properties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleInfo {
    pub display: String,
    pub position: String,
    pub width: f64,
    pub height: f64,
    pub top: f64,
    pub left: f64,
    /// Resolved CSS property → value, capped at [`GROUP_ENTRY_MAX`] entries.
    pub properties: BTreeMap<String, String>,
}

/// Utility-class classification for the element's class list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CssFrameworkInfo {
    pub tailwind_classes: Vec<TailwindClass>,
}

/// One ancestor in the layout parent chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AncestorSummary {
    pub tag: String,
    pub id: Option<String>,
    pub display: String,
    pub position: String,
}

/// One direct child in the layout summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChildSummary {
    pub tag: String,
    pub id: Option<String>,
    pub class_count: usize,
}

/// Positioning context plus bounded ancestor/child chains.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutSummary {
    /// The element's own computed `position` value.
    pub position_kind: String,
    /// Ancestors ordered nearest-first: the immediate parent is index 0.
    pub parent_chain: Vec<AncestorSummary>,
    /// Direct element children in DOM order.
    pub children: Vec<ChildSummary>,
}

/// Kind of framework component backing an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentKind {
    Function,
    Class,
    #[default]
    Unknown,
}

/// One hook/state slot captured from a framework component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HookSnapshot {
    pub index: usize,
    pub value: serde_json::Value,
}

/// Framework-component introspection extracted from the host's debug handle.
///
/// Best-effort by contract: absent, corrupted, or self-referential handles
/// degrade this group to `None` or partial data, never to an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReactInfo {
    /// Component name, or `"Unknown"` when undetectable.
    pub component_name: String,
    pub kind: ComponentKind,
    /// Shallow props: top-level entries only.
    pub props: BTreeMap<String, serde_json::Value>,
    /// Shallow hook/state snapshot.
    pub hooks: Vec<HookSnapshot>,
}

/// Severity of an accessibility finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
        }
    }
}

/// One accessibility audit finding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessibilityFinding {
    /// Stable machine-readable rule id, e.g. `missing-alt`.
    pub finding_type: String,
    pub message: String,
    pub severity: Severity,
}

impl AccessibilityFinding {
    pub fn new(
        finding_type: impl Into<String>,
        message: impl Into<String>,
        severity: Severity,
    ) -> Self {
        Self {
            finding_type: finding_type.into(),
            message: message.into(),
            severity,
        }
    }
}

/// Bounded metric name → value map captured during analysis.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    pub metrics: BTreeMap<String, f64>,
}

impl PerformanceMetrics {
    pub fn record(&mut self, name: impl Into<String>, value: f64) {
        if self.metrics.len() < GROUP_ENTRY_MAX {
            self.metrics.insert(name.into(), value);
        }
    }
}

/// Capture context: when, at what level, and basic element state flags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InspectionInfo {
    pub captured_at: DateTime<Utc>,
    pub level: AnalysisLevel,
    pub is_visible: bool,
    pub is_interactive: bool,
}

// ============================================================================
// InspectionMetadata
// ============================================================================

/// Immutable snapshot of one element at one point in time.
///
/// `element`, `styles`, `accessibility`, and `inspection` are always
/// present; the optional groups depend on the requested [`AnalysisLevel`]
/// and on whether the host exposed the data (a missing framework handle
/// yields `react: None` even at `detailed`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InspectionMetadata {
    pub element: ElementInfo,
    pub styles: StyleInfo,
    pub css_framework: Option<CssFrameworkInfo>,
    pub layout: Option<LayoutSummary>,
    pub react: Option<ReactInfo>,
    pub accessibility: Vec<AccessibilityFinding>,
    pub performance: Option<PerformanceMetrics>,
    pub inspection: InspectionInfo,
}

impl InspectionMetadata {
    /// Whether every group mandated by the snapshot's level is populated.
    ///
    /// Optional groups (`react`) are exempt: their absence means the host
    /// exposed no data, which the contract allows.
    pub fn satisfies_level(&self) -> bool {
        let level = self.inspection.level;
        if level.includes_framework() && self.css_framework.is_none() {
            return false;
        }
        if level.includes_layout() && self.layout.is_none() {
            return false;
        }
        true
    }
}

/// Truncate visible text to [`TEXT_PREVIEW_MAX`] characters on a char
/// boundary, appending an ellipsis when anything was cut.
pub fn truncate_text(text: &str) -> String {
    if text.chars().count() <= TEXT_PREVIEW_MAX {
        return text.to_string();
    }
    let mut out: String = text.chars().take(TEXT_PREVIEW_MAX).collect();
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_level_parse_known_values() {
        assert_eq!(
            AnalysisLevel::from_str("basic").unwrap(),
            AnalysisLevel::Basic
        );
        assert_eq!(
            AnalysisLevel::from_str("detailed").unwrap(),
            AnalysisLevel::Detailed
        );
        assert_eq!(
            AnalysisLevel::from_str("comprehensive").unwrap(),
            AnalysisLevel::Comprehensive
        );
    }

    #[test]
    fn test_level_parse_rejects_unknown() {
        let err = AnalysisLevel::from_str("bogus").unwrap_err();
        assert!(err.to_string().contains("bogus"));
        assert!(AnalysisLevel::from_str("").is_err());
        assert!(AnalysisLevel::from_str("Basic").is_err());
    }

    #[test]
    fn test_level_budgets_are_ordered() {
        assert!(AnalysisLevel::Basic.budget() < AnalysisLevel::Detailed.budget());
        assert!(AnalysisLevel::Detailed.budget() < AnalysisLevel::Comprehensive.budget());
        assert_eq!(AnalysisLevel::Basic.budget(), Duration::from_millis(100));
        assert_eq!(
            AnalysisLevel::Comprehensive.budget(),
            Duration::from_millis(500)
        );
    }

    #[test]
    fn test_level_group_flags() {
        assert!(!AnalysisLevel::Basic.includes_framework());
        assert!(AnalysisLevel::Detailed.includes_framework());
        assert!(!AnalysisLevel::Detailed.includes_layout());
        assert!(AnalysisLevel::Comprehensive.includes_layout());
    }

    #[test]
    fn test_level_serde_roundtrip() {
        let json = serde_json::to_string(&AnalysisLevel::Comprehensive).unwrap();
        assert_eq!(json, "\"comprehensive\"");
        let level: AnalysisLevel = serde_json::from_str("\"basic\"").unwrap();
        assert_eq!(level, AnalysisLevel::Basic);
    }

    #[test]
    fn test_truncate_text_short_passthrough() {
        assert_eq!(truncate_text("hello"), "hello");
        assert_eq!(truncate_text(""), "");
    }

    #[test]
    fn test_truncate_text_caps_long_content() {
        let long = "x".repeat(500);
        let out = truncate_text(&long);
        assert_eq!(out.chars().count(), TEXT_PREVIEW_MAX + 1);
        assert!(out.ends_with('…'));
    }

    #[test]
    fn test_truncate_text_multibyte_boundary() {
        let long = "é".repeat(200);
        let out = truncate_text(&long);
        assert_eq!(out.chars().count(), TEXT_PREVIEW_MAX + 1);
    }

    fn minimal_snapshot(level: AnalysisLevel) -> InspectionMetadata {
        InspectionMetadata {
            element: ElementInfo {
                tag: "div".into(),
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
                level,
                is_visible: true,
                is_interactive: false,
            },
        }
    }

    #[test]
    fn test_satisfies_level_basic_needs_no_optional_groups() {
        assert!(minimal_snapshot(AnalysisLevel::Basic).satisfies_level());
    }

    #[test]
    fn test_satisfies_level_detailed_requires_css_framework() {
        let mut snap = minimal_snapshot(AnalysisLevel::Detailed);
        assert!(!snap.satisfies_level());
        snap.css_framework = Some(CssFrameworkInfo {
            tailwind_classes: vec![],
        });
        // react may legitimately be None when the host has no handle.
        assert!(snap.satisfies_level());
    }

    #[test]
    fn test_satisfies_level_comprehensive_requires_layout() {
        let mut snap = minimal_snapshot(AnalysisLevel::Comprehensive);
        snap.css_framework = Some(CssFrameworkInfo {
            tailwind_classes: vec![],
        });
        assert!(!snap.satisfies_level());
        snap.layout = Some(LayoutSummary {
            position_kind: "static".into(),
            parent_chain: vec![],
            children: vec![],
        });
        assert!(snap.satisfies_level());
    }

    #[test]
    fn test_performance_metrics_bounded() {
        let mut perf = PerformanceMetrics::default();
        for i in 0..(GROUP_ENTRY_MAX + 10) {
            perf.record(format!("metric_{i}"), i as f64);
        }
        assert_eq!(perf.metrics.len(), GROUP_ENTRY_MAX);
    }
}
