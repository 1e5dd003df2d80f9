//! Accessibility audit rules
//!
//! Small, element-local checks run on every analysis. Findings never fail
//! an analysis; they are data in the snapshot.

use vibe_core::{AccessibilityFinding, Severity};
use vibe_host::{Document, NodeId};

const INTERACTIVE_TAGS: &[&str] = &["a", "button", "input", "select", "textarea"];

const LABELABLE_TAGS: &[&str] = &["input", "select", "textarea"];

/// Whether the element participates in interaction (focus/click).
pub fn is_interactive(doc: &Document, node: NodeId) -> bool {
    let Some(n) = doc.get(node) else {
        return false;
    };
    if INTERACTIVE_TAGS.contains(&n.tag.as_str()) {
        return true;
    }
    if matches!(n.attributes.get("role").map(String::as_str), Some("button") | Some("link")) {
        return true;
    }
    n.attributes
        .get("tabindex")
        .and_then(|t| t.parse::<i32>().ok())
        .is_some_and(|t| t >= 0)
}

/// The name assistive technology would announce for the element, if any.
fn accessible_name(doc: &Document, node: NodeId) -> Option<String> {
    let n = doc.get(node)?;
    for attr in ["aria-label", "alt", "title", "value", "placeholder"] {
        if let Some(v) = n.attributes.get(attr) {
            if !v.trim().is_empty() {
                return Some(v.clone());
            }
        }
    }
    if n.attributes.contains_key("aria-labelledby") {
        return Some(String::new());
    }
    let text = doc.visible_text(node);
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Whether any `<label for=...>` in the document points at this element.
fn has_label_for(doc: &Document, node: NodeId) -> bool {
    let Some(target_id) = doc.get(node).and_then(|n| n.dom_id().map(str::to_string)) else {
        return false;
    };
    let mut stack = vec![doc.root()];
    while let Some(current) = stack.pop() {
        if let Some(n) = doc.get(current) {
            if n.tag == "label" && n.attributes.get("for").map(String::as_str) == Some(&target_id)
            {
                return true;
            }
            stack.extend_from_slice(&n.children);
        }
    }
    false
}

/// Run every audit rule against one element.
pub fn audit(doc: &Document, node: NodeId) -> Vec<AccessibilityFinding> {
    let Some(n) = doc.get(node) else {
        return Vec::new();
    };
    let mut findings = Vec::new();

    if n.tag == "img" && !n.attributes.contains_key("alt") {
        findings.push(AccessibilityFinding::new(
            "missing-alt",
            "image has no alt attribute",
            Severity::Error,
        ));
    }

    if is_interactive(doc, node) && accessible_name(doc, node).is_none() {
        findings.push(AccessibilityFinding::new(
            "missing-accessible-name",
            format!("interactive <{}> has no accessible name", n.tag),
            Severity::Warning,
        ));
    }

    if let Some(tabindex) = n
        .attributes
        .get("tabindex")
        .and_then(|t| t.parse::<i32>().ok())
    {
        if tabindex > 0 {
            findings.push(AccessibilityFinding::new(
                "positive-tabindex",
                format!("tabindex={tabindex} overrides the natural focus order"),
                Severity::Warning,
            ));
        }
    }

    if n.tag == "a" && !n.attributes.contains_key("href") {
        findings.push(AccessibilityFinding::new(
            "anchor-without-href",
            "anchor has no href and is not keyboard reachable",
            Severity::Info,
        ));
    }

    if LABELABLE_TAGS.contains(&n.tag.as_str())
        && n.attributes.get("type").map(String::as_str) != Some("hidden")
        && !n.attributes.contains_key("aria-label")
        && !n.attributes.contains_key("aria-labelledby")
        && !has_label_for(doc, node)
    {
        findings.push(AccessibilityFinding::new(
            "missing-label",
            format!("form control <{}> has no associated label", n.tag),
            Severity::Warning,
        ));
    }

    findings
}
