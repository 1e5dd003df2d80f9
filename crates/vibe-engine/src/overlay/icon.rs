//! Inspection icon controller
//!
//! States: hidden → shown(target) → hidden, driven by hover-target changes
//! and by the manager's enable/disable. At most one icon exists at a time.

use vibe_host::{Document, Key, KeyEvent, NodeId};

use crate::action::EngineAction;

use super::{icon_position, OverlaySurface, OverlayView, ICON_MARKER, ICON_SIZE};

/// Floating affordance shown next to the hovered element.
pub struct IconController {
    surface: Box<dyn OverlaySurface>,
    target: Option<NodeId>,
    /// Icon-local hover highlight, distinct from page hover.
    hovered: bool,
    destroyed: bool,
}

impl IconController {
    pub fn new(surface: Box<dyn OverlaySurface>) -> Self {
        Self {
            surface,
            target: None,
            hovered: false,
            destroyed: false,
        }
    }

    pub fn target(&self) -> Option<NodeId> {
        self.target
    }

    pub fn is_visible(&self) -> bool {
        !self.destroyed && self.surface.is_visible()
    }

    /// The icon's own overlay node, for click routing.
    pub fn node(&self) -> Option<NodeId> {
        if self.destroyed {
            None
        } else {
            self.surface.node()
        }
    }

    fn view(&self, doc: &Document, target: NodeId) -> OverlayView {
        let position = icon_position(doc.rect(target), doc.viewport());
        OverlayView {
            marker: ICON_MARKER,
            role: "button",
            label: "Inspect element".to_string(),
            position,
            size: ICON_SIZE,
            body: String::new(),
        }
    }

    /// Show (or move) the icon next to `target`.
    pub fn show(&mut self, doc: &mut Document, target: NodeId) {
        if self.destroyed {
            return;
        }
        let view = self.view(doc, target);
        if self.surface.is_visible() {
            self.surface.update(doc, &view);
        } else {
            self.surface.show(doc, &view);
        }
        self.target = Some(target);
    }

    /// Remove the icon. Safe when already hidden.
    pub fn hide(&mut self, doc: &mut Document) {
        if self.destroyed {
            return;
        }
        self.surface.hide(doc);
        self.target = None;
        self.hovered = false;
    }

    /// Re-clamp the icon after scroll/resize while visible.
    pub fn reposition(&mut self, doc: &mut Document) {
        if self.destroyed || !self.surface.is_visible() {
            return;
        }
        if let Some(target) = self.target {
            let view = self.view(doc, target);
            self.surface.update(doc, &view);
        }
    }

    /// Icon-local hover state (visual highlight only).
    pub fn set_hovered(&mut self, hovered: bool) {
        if !self.destroyed {
            self.hovered = hovered;
        }
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    /// Click on the icon requests a full inspection of its target.
    pub fn handle_click(&self) -> Option<EngineAction> {
        if self.destroyed || !self.surface.is_visible() {
            return None;
        }
        self.target.map(EngineAction::RequestInspection)
    }

    /// Enter/Space activate like a click.
    pub fn handle_key(&self, event: KeyEvent) -> Option<EngineAction> {
        match event.key {
            Key::Enter | Key::Space => self.handle_click(),
            _ => None,
        }
    }

    /// Tear down the icon and its listeners. Idempotent; all other methods
    /// are no-ops afterwards.
    pub fn destroy(&mut self, doc: &mut Document) {
        if self.destroyed {
            return;
        }
        self.surface.destroy(doc);
        self.target = None;
        self.hovered = false;
        self.destroyed = true;
    }
}
