//! # vibe-engine - Element Inspection Engine
//!
//! The designed subsystem of vibe mode: analyze a hovered element, show an
//! inspection affordance, and open a tabbed popup with the element's derived
//! metadata. Everything is driven by host events fed into the
//! [`VibeModeManager`]; the host document itself lives in `vibe-host`.
//!
//! ## Layers
//!
//! - [`analyzer`] — [`ElementAnalyzer`]: budgeted async analysis, bounded
//!   FIFO cache, mutation-driven invalidation
//! - [`hover`] — [`HoverTracker`]: debounced hover-target resolution
//! - [`overlay`] — [`IconController`] / [`PopupController`] over the
//!   [`OverlaySurface`] contract ([`DomOverlay`] or [`HeadlessOverlay`])
//! - [`content`] — popup tab/section building from a snapshot
//! - [`manager`] — [`VibeModeManager`]: the state machine, pub/sub, and
//!   event routing
//! - [`settings`] / [`config`] — validated settings and `.vibe/config.toml`
//!   persistence
//!
//! ## Example
//!
//! ```rust
//! use vibe_engine::VibeModeManager;
//! use vibe_host::Document;
//!
//! let mut doc = Document::new();
//! let mut manager = VibeModeManager::new();
//! manager.enable(&mut doc);
//! assert!(manager.state().is_enabled);
//! ```

pub mod action;
pub mod analyzer;
pub mod config;
pub mod content;
pub mod hover;
pub mod manager;
pub mod overlay;
pub mod settings;
pub mod stats;

pub use action::EngineAction;
pub use analyzer::{ElementAnalyzer, ObserverRegistration, DEFAULT_CACHE_CAPACITY};
pub use content::{build_content, render_body, PopupContent, PopupSection, PopupTab};
pub use hover::HoverTracker;
pub use manager::{
    ActivePopup, SubscriptionId, VibeInspectionState, VibeModeManager, MODE_ATTR,
};
pub use overlay::{
    DomOverlay, HeadlessOverlay, IconController, OverlaySurface, PopupController, PopupData,
    PopupPosition, ICON_MARKER, POPUP_MARKER,
};
pub use settings::{DisplayFlag, SettingsUpdate, VibeSettings};
pub use stats::{CacheStats, EngineStats};
