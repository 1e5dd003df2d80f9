//! Actions the manager should perform after a controller handled input
//!
//! Controllers never call back into the manager; they return one of these
//! and the single update path interprets it. Keeps ownership flat and makes
//! controller behavior testable without a manager.

use vibe_host::NodeId;

use crate::settings::SettingsUpdate;

/// What a controller asked the manager to do.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineAction {
    /// Run a full inspection of the element and open the popup.
    RequestInspection(NodeId),

    /// Close the active popup.
    ClosePopup,

    /// Merge a settings change (popup settings sub-panel toggles).
    UpdateSettings(SettingsUpdate),
}
