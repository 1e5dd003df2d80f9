//! Popup content building
//!
//! Turns an [`InspectionMetadata`] snapshot plus the current display flags
//! into the tabbed section list the popup renders. Sections whose data the
//! host did not expose land in `coming_soon`; sections turned off by a
//! display flag are omitted entirely.

use serde::{Deserialize, Serialize};

use vibe_core::InspectionMetadata;

use crate::settings::VibeSettings;

/// How many style property rows the popup shows before truncating.
const STYLE_ROW_MAX: usize = 8;

/// Tabs of the popup surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PopupTab {
    Element,
    Styles,
    Framework,
    Accessibility,
    Performance,
}

impl PopupTab {
    pub fn title(&self) -> &'static str {
        match self {
            PopupTab::Element => "Element",
            PopupTab::Styles => "Styles",
            PopupTab::Framework => "Framework",
            PopupTab::Accessibility => "Accessibility",
            PopupTab::Performance => "Performance",
        }
    }
}

/// One populated tab: label/value rows in display order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopupSection {
    pub tab: PopupTab,
    pub rows: Vec<(String, String)>,
}

/// Everything the popup displays for one inspection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopupContent {
    /// Populated sections, in tab order.
    pub primary: Vec<PopupSection>,
    /// Tabs whose data is unavailable on this element.
    pub coming_soon: Vec<PopupTab>,
}

/// Assemble popup content from a snapshot, honoring the display flags.
pub fn build_content(meta: &InspectionMetadata, settings: &VibeSettings) -> PopupContent {
    let mut primary = Vec::new();
    let mut coming_soon = Vec::new();

    primary.push(element_section(meta));
    primary.push(styles_section(meta));

    if settings.show_css_analysis || settings.show_react_info {
        match framework_section(meta, settings) {
            Some(section) => primary.push(section),
            None => coming_soon.push(PopupTab::Framework),
        }
    }

    primary.push(accessibility_section(meta));

    if settings.show_performance_metrics {
        match performance_section(meta) {
            Some(section) => primary.push(section),
            None => coming_soon.push(PopupTab::Performance),
        }
    }

    PopupContent {
        primary,
        coming_soon,
    }
}

fn element_section(meta: &InspectionMetadata) -> PopupSection {
    let mut rows = vec![("tag".to_string(), format!("<{}>", meta.element.tag))];
    if let Some(id) = &meta.element.id {
        rows.push(("id".to_string(), format!("#{id}")));
    }
    if !meta.element.classes.is_empty() {
        rows.push(("classes".to_string(), meta.element.classes.join(" ")));
    }
    if !meta.element.text.is_empty() {
        rows.push(("text".to_string(), meta.element.text.clone()));
    }
    PopupSection {
        tab: PopupTab::Element,
        rows,
    }
}

fn styles_section(meta: &InspectionMetadata) -> PopupSection {
    let mut rows = vec![
        ("display".to_string(), meta.styles.display.clone()),
        ("position".to_string(), meta.styles.position.clone()),
        (
            "size".to_string(),
            format!("{}×{}", meta.styles.width, meta.styles.height),
        ),
        (
            "offset".to_string(),
            format!("{}, {}", meta.styles.left, meta.styles.top),
        ),
    ];
    for (name, value) in meta.styles.properties.iter().take(STYLE_ROW_MAX) {
        if name == "display" || name == "position" {
            continue;
        }
        rows.push((name.clone(), value.clone()));
    }
    PopupSection {
        tab: PopupTab::Styles,
        rows,
    }
}

/// The framework tab mixes utility-class and component data; it is
/// "available" when either half has something to show.
fn framework_section(meta: &InspectionMetadata, settings: &VibeSettings) -> Option<PopupSection> {
    let mut rows = Vec::new();

    if settings.show_css_analysis {
        if let Some(css) = &meta.css_framework {
            for class in &css.tailwind_classes {
                let mut value = class.category.as_str().to_string();
                if class.responsive {
                    value.push_str(" (responsive)");
                }
                rows.push((class.class_name.clone(), value));
            }
        }
    }

    if settings.show_react_info {
        if let Some(react) = &meta.react {
            rows.push(("component".to_string(), react.component_name.clone()));
            rows.push(("kind".to_string(), format!("{:?}", react.kind).to_lowercase()));
            if !react.props.is_empty() {
                let names: Vec<&str> = react.props.keys().map(String::as_str).collect();
                rows.push(("props".to_string(), names.join(", ")));
            }
            if !react.hooks.is_empty() {
                rows.push(("hooks".to_string(), react.hooks.len().to_string()));
            }
        }
    }

    if rows.is_empty() {
        None
    } else {
        Some(PopupSection {
            tab: PopupTab::Framework,
            rows,
        })
    }
}

fn accessibility_section(meta: &InspectionMetadata) -> PopupSection {
    let rows = if meta.accessibility.is_empty() {
        vec![("status".to_string(), "no issues found".to_string())]
    } else {
        meta.accessibility
            .iter()
            .map(|f| (f.severity.as_str().to_string(), f.message.clone()))
            .collect()
    };
    PopupSection {
        tab: PopupTab::Accessibility,
        rows,
    }
}

fn performance_section(meta: &InspectionMetadata) -> Option<PopupSection> {
    let perf = meta.performance.as_ref()?;
    if perf.metrics.is_empty() {
        return None;
    }
    let rows = perf
        .metrics
        .iter()
        .map(|(name, value)| (name.clone(), format!("{value:.1}")))
        .collect();
    Some(PopupSection {
        tab: PopupTab::Performance,
        rows,
    })
}

/// Flatten content into the plain-text body the overlay node carries.
pub fn render_body(content: &PopupContent) -> String {
    let mut out = String::new();
    for section in &content.primary {
        out.push_str("## ");
        out.push_str(section.tab.title());
        out.push('\n');
        for (label, value) in &section.rows {
            out.push_str(label);
            out.push_str(": ");
            out.push_str(value);
            out.push('\n');
        }
    }
    if !content.coming_soon.is_empty() {
        let tabs: Vec<&str> = content.coming_soon.iter().map(|t| t.title()).collect();
        out.push_str("Coming soon: ");
        out.push_str(&tabs.join(", "));
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::collections::BTreeMap;
    use vibe_core::{
        classify_classes, AnalysisLevel, CssFrameworkInfo, ElementInfo, InspectionInfo,
        StyleInfo,
    };

    fn snapshot_with_classes(classes: &[&str]) -> InspectionMetadata {
        let classes: Vec<String> = classes.iter().map(|c| c.to_string()).collect();
        InspectionMetadata {
            element: ElementInfo {
                tag: "div".into(),
                id: Some("hero".into()),
                classes: classes.clone(),
                attributes: BTreeMap::new(),
                text: "Try the demo".into(),
            },
            styles: StyleInfo {
                display: "flex".into(),
                position: "relative".into(),
                width: 320.0,
                height: 120.0,
                top: 24.0,
                left: 16.0,
                properties: BTreeMap::new(),
            },
            css_framework: Some(CssFrameworkInfo {
                tailwind_classes: classify_classes(&classes),
            }),
            layout: None,
            react: None,
            accessibility: vec![],
            performance: None,
            inspection: InspectionInfo {
                captured_at: Utc::now(),
                level: AnalysisLevel::Detailed,
                is_visible: true,
                is_interactive: false,
            },
        }
    }

    fn section<'a>(content: &'a PopupContent, tab: PopupTab) -> Option<&'a PopupSection> {
        content.primary.iter().find(|s| s.tab == tab)
    }

    #[test]
    fn test_element_and_styles_always_present() {
        let content = build_content(&snapshot_with_classes(&[]), &VibeSettings::default());
        assert!(section(&content, PopupTab::Element).is_some());
        assert!(section(&content, PopupTab::Styles).is_some());
        assert!(section(&content, PopupTab::Accessibility).is_some());
    }

    #[test]
    fn test_framework_section_rows_from_classes() {
        let content = build_content(
            &snapshot_with_classes(&["p-4", "sm:flex"]),
            &VibeSettings::default(),
        );
        let framework = section(&content, PopupTab::Framework).unwrap();
        assert_eq!(
            framework.rows[0],
            ("p-4".to_string(), "spacing".to_string())
        );
        assert_eq!(
            framework.rows[1],
            ("sm:flex".to_string(), "layout (responsive)".to_string())
        );
    }

    #[test]
    fn test_framework_without_data_is_coming_soon() {
        let mut meta = snapshot_with_classes(&[]);
        meta.css_framework = None;
        meta.react = None;
        let content = build_content(&meta, &VibeSettings::default());
        assert!(section(&content, PopupTab::Framework).is_none());
        assert!(content.coming_soon.contains(&PopupTab::Framework));
    }

    #[test]
    fn test_disabled_flags_omit_sections_entirely() {
        let mut settings = VibeSettings::default();
        settings.show_css_analysis = false;
        settings.show_react_info = false;
        let mut meta = snapshot_with_classes(&[]);
        meta.css_framework = None;

        let content = build_content(&meta, &settings);
        assert!(section(&content, PopupTab::Framework).is_none());
        assert!(!content.coming_soon.contains(&PopupTab::Framework));
    }

    #[test]
    fn test_performance_flag_gates_section() {
        let meta = snapshot_with_classes(&[]);
        let content = build_content(&meta, &VibeSettings::default());
        assert!(section(&content, PopupTab::Performance).is_none());
        assert!(!content.coming_soon.contains(&PopupTab::Performance));

        let mut settings = VibeSettings::default();
        settings.show_performance_metrics = true;
        // Flag on, but the snapshot carries no metrics: coming soon.
        let content = build_content(&meta, &settings);
        assert!(content.coming_soon.contains(&PopupTab::Performance));
    }

    #[test]
    fn test_render_body_snapshot() {
        let mut settings = VibeSettings::default();
        settings.show_react_info = false;
        let content = build_content(&snapshot_with_classes(&["p-4"]), &settings);
        insta::assert_snapshot!(render_body(&content), @r"
        ## Element
        tag: <div>
        id: #hero
        classes: p-4
        text: Try the demo
        ## Styles
        display: flex
        position: relative
        size: 320×120
        offset: 16, 24
        ## Framework
        p-4: spacing
        ## Accessibility
        status: no issues found
        ");
    }
}
