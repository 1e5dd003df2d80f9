//! Document-backed overlay surface

use vibe_core::prelude::*;
use vibe_host::{Document, NodeId};

use super::{OverlaySurface, OverlayView};

/// Renders an overlay as a real element in the host document, tagged with
/// its marker attribute so `disable()`/`destroy()` can always find and
/// remove it.
#[derive(Debug, Default)]
pub struct DomOverlay {
    node: Option<NodeId>,
}

impl DomOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    fn write_attributes(doc: &mut Document, node: NodeId, view: &OverlayView) {
        doc.set_attribute(node, view.marker, "");
        doc.set_attribute(node, "role", view.role);
        doc.set_attribute(node, "aria-label", &view.label);
        doc.set_attribute(node, "tabindex", "0");
        doc.set_attribute(
            node,
            "style",
            &format!(
                "position:fixed;left:{}px;top:{}px;width:{}px;height:{}px;z-index:2147483647",
                view.position.x, view.position.y, view.size.width, view.size.height
            ),
        );
    }

    fn write_body(doc: &mut Document, node: NodeId, view: &OverlayView) {
        if view.body.is_empty() {
            return;
        }
        let text = doc.create_text(&view.body);
        doc.append_child(node, text);
    }
}

impl OverlaySurface for DomOverlay {
    fn show(&mut self, doc: &mut Document, view: &OverlayView) {
        if self.node.is_some() {
            self.update(doc, view);
            return;
        }
        let node = doc.create_element("div");
        Self::write_attributes(doc, node, view);
        Self::write_body(doc, node, view);
        doc.append_child(doc.root(), node);
        self.node = Some(node);
        trace!("overlay {} mounted as {node}", view.marker);
    }

    fn update(&mut self, doc: &mut Document, view: &OverlayView) {
        let Some(node) = self.node else {
            return;
        };
        Self::write_attributes(doc, node, view);
        // Replace the body text wholesale.
        for child in doc.children(node).to_vec() {
            doc.remove(child);
        }
        Self::write_body(doc, node, view);
    }

    fn hide(&mut self, doc: &mut Document) {
        if let Some(node) = self.node.take() {
            doc.remove(node);
        }
    }

    fn destroy(&mut self, doc: &mut Document) {
        self.hide(doc);
    }

    fn is_visible(&self) -> bool {
        self.node.is_some()
    }

    fn node(&self) -> Option<NodeId> {
        self.node
    }
}
