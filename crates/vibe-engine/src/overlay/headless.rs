//! State-only overlay surface for constrained hosts

use vibe_host::{Document, NodeId};

use super::{OverlaySurface, OverlayView};

/// Fallback surface that records what would be rendered without touching
/// the document. Used when the host disallows overlay writes, and handy in
/// tests that only assert on lifecycle.
#[derive(Debug, Default)]
pub struct HeadlessOverlay {
    visible: bool,
    last_view: Option<OverlayView>,
}

impl HeadlessOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recently shown/updated view, kept across `hide`.
    pub fn last_view(&self) -> Option<&OverlayView> {
        self.last_view.as_ref()
    }
}

impl OverlaySurface for HeadlessOverlay {
    fn show(&mut self, _doc: &mut Document, view: &OverlayView) {
        self.visible = true;
        self.last_view = Some(view.clone());
    }

    fn update(&mut self, _doc: &mut Document, view: &OverlayView) {
        if self.visible {
            self.last_view = Some(view.clone());
        }
    }

    fn hide(&mut self, _doc: &mut Document) {
        self.visible = false;
    }

    fn destroy(&mut self, doc: &mut Document) {
        self.hide(doc);
        self.last_view = None;
    }

    fn is_visible(&self) -> bool {
        self.visible
    }

    fn node(&self) -> Option<NodeId> {
        None
    }
}
