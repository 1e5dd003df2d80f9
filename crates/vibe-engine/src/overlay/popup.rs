//! Inspection popup controller
//!
//! States: closed → open(data) → closed. A single instance exists at a
//! time; showing new data while open implicitly closes the previous popup
//! before the new one is constructed.

use vibe_core::{InspectionMetadata, Placement, Point, Rect};
use vibe_host::{Document, Key, KeyEvent, NodeId};

use crate::action::EngineAction;
use crate::content::{render_body, PopupContent};
use crate::settings::{DisplayFlag, SettingsUpdate};

use super::{popup_position, OverlaySurface, OverlayView, POPUP_MARKER, POPUP_SIZE};

/// On-screen popup placement.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PopupPosition {
    pub x: f64,
    pub y: f64,
    pub placement: Placement,
}

/// Everything one open popup displays.
#[derive(Debug, Clone, PartialEq)]
pub struct PopupData {
    pub target: NodeId,
    pub metadata: InspectionMetadata,
    pub content: PopupContent,
    pub position: PopupPosition,
}

/// Tabbed information surface opened by icon activation.
pub struct PopupController {
    surface: Box<dyn OverlaySurface>,
    open: Option<PopupData>,
    destroyed: bool,
}

impl PopupController {
    pub fn new(surface: Box<dyn OverlaySurface>) -> Self {
        Self {
            surface,
            open: None,
            destroyed: false,
        }
    }

    pub fn is_open(&self) -> bool {
        !self.destroyed && self.open.is_some()
    }

    pub fn current(&self) -> Option<&PopupData> {
        self.open.as_ref()
    }

    fn view(data: &PopupData) -> OverlayView {
        OverlayView {
            marker: POPUP_MARKER,
            role: "dialog",
            label: format!(
                "Element inspection: <{}> ({})",
                data.metadata.element.tag,
                data.metadata.inspection.level
            ),
            position: Point::new(data.position.x, data.position.y),
            size: POPUP_SIZE,
            body: render_body(&data.content),
        }
    }

    /// Open the popup with `data`, closing any previous popup first.
    pub fn show(&mut self, doc: &mut Document, data: PopupData) {
        if self.destroyed {
            return;
        }
        if self.open.is_some() {
            // Fully close the predecessor before constructing new state.
            self.surface.hide(doc);
            self.open = None;
        }
        let view = Self::view(&data);
        self.surface.show(doc, &view);
        self.open = Some(data);
    }

    /// Replace the displayed data without closing/reopening. No-op while
    /// closed.
    pub fn update_content(&mut self, doc: &mut Document, data: PopupData) {
        if self.destroyed || self.open.is_none() {
            return;
        }
        let view = Self::view(&data);
        self.surface.update(doc, &view);
        self.open = Some(data);
    }

    /// Re-clamp the popup when any edge extends past the viewport.
    pub fn reposition_if_needed(&mut self, doc: &mut Document) {
        if self.destroyed {
            return;
        }
        let Some(data) = &mut self.open else {
            return;
        };
        let viewport = doc.viewport();
        let origin = Point::new(data.position.x, data.position.y);
        if !viewport.overflows(origin, POPUP_SIZE) {
            return;
        }
        let (clamped, placement) = popup_position(doc.rect(data.target), viewport, true);
        data.position = PopupPosition {
            x: clamped.x,
            y: clamped.y,
            placement,
        };
        let view = Self::view(data);
        self.surface.update(doc, &view);
    }

    /// The popup's on-screen box, while open.
    pub fn screen_rect(&self) -> Option<Rect> {
        let data = self.open.as_ref()?;
        Some(Rect::new(
            data.position.x,
            data.position.y,
            POPUP_SIZE.width,
            POPUP_SIZE.height,
        ))
    }

    /// Escape closes the popup.
    pub fn handle_key(&self, event: KeyEvent) -> Option<EngineAction> {
        if !self.is_open() {
            return None;
        }
        match event.key {
            Key::Escape => Some(EngineAction::ClosePopup),
            _ => None,
        }
    }

    /// A click outside the popup's box closes it (backdrop dismissal).
    pub fn handle_backdrop_click(&self, position: Point) -> Option<EngineAction> {
        let rect = self.screen_rect()?;
        if rect.contains(position) {
            None
        } else {
            Some(EngineAction::ClosePopup)
        }
    }

    /// Settings sub-panel: toggling a display flag routes back through the
    /// manager's settings update.
    pub fn toggle_display_flag(&self, flag: DisplayFlag, value: bool) -> Option<EngineAction> {
        if !self.is_open() {
            return None;
        }
        Some(EngineAction::UpdateSettings(SettingsUpdate::display_flag(
            flag, value,
        )))
    }

    /// Close the popup. Safe when nothing is open.
    pub fn hide(&mut self, doc: &mut Document) {
        if self.destroyed {
            return;
        }
        if self.open.take().is_some() {
            self.surface.hide(doc);
        }
    }

    /// Tear down the popup; idempotent; later calls are no-ops.
    pub fn destroy(&mut self, doc: &mut Document) {
        if self.destroyed {
            return;
        }
        self.surface.destroy(doc);
        self.open = None;
        self.destroyed = true;
    }
}
