//! # Overlay Surfaces
//!
//! The icon and popup are transient presentation state written into the
//! host document. Controllers own the lifecycle; rendering goes through the
//! [`OverlaySurface`] contract, with two independent implementations chosen
//! by composition:
//!
//! - [`DomOverlay`] writes a tagged element into the document;
//! - [`HeadlessOverlay`] records state only, for constrained hosts.
//!
//! Overlay nodes carry marker attributes ([`ICON_MARKER`], [`POPUP_MARKER`])
//! so they can always be located and removed again.

mod dom;
mod headless;
pub mod icon;
pub mod popup;

pub use dom::DomOverlay;
pub use headless::HeadlessOverlay;
pub use icon::IconController;
pub use popup::{PopupController, PopupData, PopupPosition};

use vibe_core::{Placement, Point, Rect, Size, Viewport};
use vibe_host::Document;

/// Marker attribute on the icon affordance node.
pub const ICON_MARKER: &str = "data-vibe-inspection-icon";

/// Marker attribute on the popup node.
pub const POPUP_MARKER: &str = "data-vibe-popup";

/// Icon affordance box, in CSS pixels.
pub const ICON_SIZE: Size = Size {
    width: 24.0,
    height: 24.0,
};

/// Gap between a target's corner and the icon.
pub const ICON_OFFSET: f64 = 4.0;

/// Fixed popup box, in CSS pixels.
pub const POPUP_SIZE: Size = Size {
    width: 320.0,
    height: 260.0,
};

/// Gap between a target edge and the popup.
pub const POPUP_GAP: f64 = 8.0;

/// Everything a surface needs to render one overlay box.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayView {
    /// Marker attribute identifying the overlay kind.
    pub marker: &'static str,
    /// Accessible role (`button` for the icon, `dialog` for the popup).
    pub role: &'static str,
    /// Accessible label announced for the overlay.
    pub label: String,
    pub position: Point,
    pub size: Size,
    /// Plain-text body (empty for the icon).
    pub body: String,
}

/// Minimal presentation contract for an overlay box.
///
/// All methods are idempotent at the surface level; controllers add the
/// destroyed-state guarding on top.
#[cfg_attr(test, mockall::automock)]
pub trait OverlaySurface {
    fn show(&mut self, doc: &mut Document, view: &OverlayView);
    fn update(&mut self, doc: &mut Document, view: &OverlayView);
    fn hide(&mut self, doc: &mut Document);
    fn destroy(&mut self, doc: &mut Document);
    fn is_visible(&self) -> bool;
    /// The overlay's own document node, when the surface has one.
    fn node(&self) -> Option<vibe_host::NodeId>;
}

/// Icon position: preferred corner is the target's top-right, offset
/// outward, clamped into the viewport.
pub fn icon_position(target: Rect, viewport: Viewport) -> Point {
    let origin = Point::new(target.right() + ICON_OFFSET, target.y - ICON_OFFSET);
    viewport.clamp(origin, ICON_SIZE)
}

/// Popup position with edge avoidance.
///
/// Preference order below → above → right → left; the first placement that
/// fits entirely inside the viewport wins. When none fits (or
/// `auto_position` is off), the below placement is clamped into view.
pub fn popup_position(
    target: Rect,
    viewport: Viewport,
    auto_position: bool,
) -> (Point, Placement) {
    let below = Point::new(target.x, target.bottom() + POPUP_GAP);
    if !auto_position {
        return (viewport.clamp(below, POPUP_SIZE), Placement::Below);
    }

    let candidates = [
        (below, Placement::Below),
        (
            Point::new(target.x, target.y - POPUP_SIZE.height - POPUP_GAP),
            Placement::Above,
        ),
        (
            Point::new(target.right() + POPUP_GAP, target.y),
            Placement::Right,
        ),
        (
            Point::new(target.x - POPUP_SIZE.width - POPUP_GAP, target.y),
            Placement::Left,
        ),
    ];

    for (origin, placement) in candidates {
        if !viewport.overflows(origin, POPUP_SIZE) {
            return (origin, placement);
        }
    }
    (viewport.clamp(below, POPUP_SIZE), Placement::Below)
}
