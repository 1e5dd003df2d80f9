//! # Vibe Mode Manager
//!
//! Top-level state machine and public API of the inspection engine:
//! `disabled` ⇄ `enabled`, and within `enabled`: idle ⇄ hovering(target) ⇄
//! inspecting(target, popup). Owns the analyzer, the hover tracker, and the
//! icon/popup controllers, and broadcasts state snapshots to subscribers
//! after every committed transition.
//!
//! Manager state is the single source of truth. While enabled, the
//! document root carries a `data-vibe-mode="active"` attribute for
//! CSS-selector styling — a one-way projection that is never read back.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use vibe_core::prelude::*;
use vibe_core::InspectionMetadata;
use vibe_host::{Document, HostEvent, Key, KeyEvent, NodeId, PointerKind};

use crate::action::EngineAction;
use crate::analyzer::ElementAnalyzer;
use crate::content::{build_content, PopupContent};
use crate::hover::HoverTracker;
use crate::overlay::{
    popup_position, DomOverlay, HeadlessOverlay, IconController, OverlaySurface, PopupController,
    PopupData, PopupPosition,
};
use crate::settings::{SettingsUpdate, VibeSettings};
use crate::stats::{CacheStats, EngineStats};

/// Root attribute mirroring the enabled state for styling purposes only.
pub const MODE_ATTR: &str = "data-vibe-mode";

/// Activation chord repeats within this window are ignored.
const TOGGLE_DEBOUNCE: Duration = Duration::from_millis(250);

/// The active popup as reported in the state snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivePopup {
    pub target: NodeId,
    pub metadata: InspectionMetadata,
    pub content: PopupContent,
    pub position: PopupPosition,
}

/// Externally-observable manager state. A cloned snapshot: callers can
/// never mutate manager state through it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VibeInspectionState {
    pub is_enabled: bool,
    pub hovered_element: Option<NodeId>,
    /// Set together with `active_popup`, cleared together with it.
    pub current_target: Option<NodeId>,
    pub active_popup: Option<ActivePopup>,
    pub settings: VibeSettings,
    pub cache: CacheStats,
    pub performance: EngineStats,
}

/// Handle returned by [`VibeModeManager::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

struct Subscriber {
    id: SubscriptionId,
    callback: Box<dyn FnMut(&VibeInspectionState)>,
}

/// The inspection engine's public API and state machine.
pub struct VibeModeManager {
    enabled: bool,
    hovered: Option<NodeId>,
    active: Option<ActivePopup>,
    settings: VibeSettings,
    analyzer: ElementAnalyzer,
    hover: HoverTracker,
    icon: IconController,
    popup: PopupController,
    subscribers: Vec<Subscriber>,
    next_subscriber_id: u64,
    /// Monotonic counter; a finished analysis only commits when its
    /// generation is still current, so stale results never overwrite a
    /// newer popup.
    generation: u64,
    stats: EngineStats,
    last_toggle: Option<Instant>,
}

impl Default for VibeModeManager {
    fn default() -> Self {
        Self::new()
    }
}

impl VibeModeManager {
    /// Full-featured engine rendering overlays into the host document.
    pub fn new() -> Self {
        Self::with_settings(VibeSettings::default())
    }

    pub fn with_settings(settings: VibeSettings) -> Self {
        Self::with_surfaces(
            settings,
            Box::new(DomOverlay::new()),
            Box::new(DomOverlay::new()),
        )
    }

    /// Fallback engine for constrained hosts: overlays record state only.
    pub fn headless(settings: VibeSettings) -> Self {
        Self::with_surfaces(
            settings,
            Box::new(HeadlessOverlay::new()),
            Box::new(HeadlessOverlay::new()),
        )
    }

    /// Compose the engine from explicit overlay surfaces.
    pub fn with_surfaces(
        settings: VibeSettings,
        icon_surface: Box<dyn OverlaySurface>,
        popup_surface: Box<dyn OverlaySurface>,
    ) -> Self {
        Self {
            enabled: false,
            hovered: None,
            active: None,
            settings,
            analyzer: ElementAnalyzer::new(),
            hover: HoverTracker::new(),
            icon: IconController::new(icon_surface),
            popup: PopupController::new(popup_surface),
            subscribers: Vec::new(),
            next_subscriber_id: 0,
            generation: 0,
            stats: EngineStats::default(),
            last_toggle: None,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn analyzer(&self) -> &ElementAnalyzer {
        &self.analyzer
    }

    pub fn analyzer_mut(&mut self) -> &mut ElementAnalyzer {
        &mut self.analyzer
    }

    /// Snapshot of the externally-observable state.
    pub fn state(&self) -> VibeInspectionState {
        VibeInspectionState {
            is_enabled: self.enabled,
            hovered_element: self.hovered,
            current_target: self.active.as_ref().map(|p| p.target),
            active_popup: self.active.clone(),
            settings: self.settings.clone(),
            cache: self.analyzer.cache_stats(),
            performance: self.stats,
        }
    }

    // ─────────────────────────────────────────────────────────────
    // Subscriptions
    // ─────────────────────────────────────────────────────────────

    /// Register a callback invoked with the full state after every
    /// committed transition, in subscription order.
    pub fn subscribe(
        &mut self,
        callback: impl FnMut(&VibeInspectionState) + 'static,
    ) -> SubscriptionId {
        self.next_subscriber_id += 1;
        let id = SubscriptionId(self.next_subscriber_id);
        self.subscribers.push(Subscriber {
            id,
            callback: Box::new(callback),
        });
        id
    }

    /// Stop future callbacks for this subscription. Idempotent.
    pub fn unsubscribe(&mut self, id: SubscriptionId) {
        self.subscribers.retain(|s| s.id != id);
    }

    /// Deliver the current state to every subscriber. A panicking
    /// subscriber is isolated: it never prevents later subscribers from
    /// running, nor fails the emitting method.
    fn notify(&mut self) {
        let snapshot = self.state();
        for subscriber in &mut self.subscribers {
            let result = catch_unwind(AssertUnwindSafe(|| (subscriber.callback)(&snapshot)));
            if result.is_err() {
                warn!("state subscriber {:?} panicked; continuing", subscriber.id);
            }
        }
    }

    // ─────────────────────────────────────────────────────────────
    // Mode transitions
    // ─────────────────────────────────────────────────────────────

    /// Enter inspection mode. Idempotent: repeated calls neither re-notify
    /// nor re-project the mode attribute.
    pub fn enable(&mut self, doc: &mut Document) {
        if self.enabled {
            return;
        }
        self.enabled = true;
        doc.set_attribute(doc.root(), MODE_ATTR, "active");
        info!("vibe mode enabled");
        self.notify();
    }

    /// Leave inspection mode: clears the hover target and the active popup,
    /// removes every overlay node and marker, and notifies exactly once.
    pub fn disable(&mut self, doc: &mut Document) {
        if !self.enabled {
            return;
        }
        self.enabled = false;
        self.hover.reset();
        self.hovered = None;
        self.active = None;
        self.icon.hide(doc);
        self.popup.hide(doc);
        doc.remove_attribute(doc.root(), MODE_ATTR);
        info!("vibe mode disabled");
        self.notify();
    }

    /// Flip enabled state.
    pub fn toggle(&mut self, doc: &mut Document) {
        if self.enabled {
            self.disable(doc);
        } else {
            self.enable(doc);
        }
    }

    /// Tear down every owned overlay and subscription. The manager is
    /// unusable afterwards except for state reads.
    pub fn destroy(&mut self, doc: &mut Document) {
        self.disable(doc);
        self.icon.destroy(doc);
        self.popup.destroy(doc);
        self.subscribers.clear();
    }

    // ─────────────────────────────────────────────────────────────
    // Hover
    // ─────────────────────────────────────────────────────────────

    /// Set the hover target directly.
    ///
    /// Degrades silently while disabled (by design — hover is ambient
    /// noise, not an operation worth failing). While enabled, notifies only
    /// when the value actually changes.
    pub fn set_hover_target(&mut self, doc: &mut Document, target: Option<NodeId>) {
        if !self.enabled {
            trace!("set_hover_target ignored while disabled");
            return;
        }
        if target == self.hovered {
            return;
        }
        self.hovered = target;
        match target {
            Some(element) if doc.is_inspectable(element) => self.icon.show(doc, element),
            _ => self.icon.hide(doc),
        }
        self.notify();
    }

    fn flush_hover(&mut self, doc: &mut Document, now: Instant) {
        if let Some(change) = self.hover.poll(now) {
            self.set_hover_target(doc, change);
        }
    }

    // ─────────────────────────────────────────────────────────────
    // Inspection
    // ─────────────────────────────────────────────────────────────

    /// Analyze `element` at the configured level and open the popup.
    ///
    /// Fails with [`Error::NotEnabled`] while disabled and with the
    /// analyzer's error otherwise; on failure no popup state is touched. A
    /// call superseded by a newer one discards its result quietly.
    pub async fn show_inspection(&mut self, doc: &mut Document, element: NodeId) -> Result<()> {
        if !self.enabled {
            return Err(Error::NotEnabled);
        }

        self.generation += 1;
        let generation = self.generation;
        let level = self.settings.analysis_level;
        let started = Instant::now();

        let analyzed = self.analyzer.analyze_element(doc, element, level).await;
        let snapshot = match analyzed {
            Ok(snapshot) => snapshot,
            Err(e) => {
                if self.settings.debug_mode {
                    debug!("inspection of {element} failed: {e}");
                }
                return Err(e);
            }
        };
        self.stats.record_analysis(started.elapsed());
        self.stats
            .set_cache_hit_rate(self.analyzer.cache_stats().hit_rate);

        if generation != self.generation {
            trace!("inspection of {element} superseded; result discarded");
            return Ok(());
        }
        if !doc.is_connected(element) {
            return Err(Error::invalid_target(format!(
                "{element} was removed before the popup opened"
            )));
        }

        let metadata: InspectionMetadata = (*snapshot).clone();
        let content = build_content(&metadata, &self.settings);
        let (origin, placement) =
            popup_position(doc.rect(element), doc.viewport(), self.settings.auto_position);
        let position = PopupPosition {
            x: origin.x,
            y: origin.y,
            placement,
        };

        // Opening fully closes any previous popup before the new state is
        // committed; target and popup change together.
        self.popup.show(
            doc,
            PopupData {
                target: element,
                metadata: metadata.clone(),
                content: content.clone(),
                position,
            },
        );
        self.active = Some(ActivePopup {
            target: element,
            metadata,
            content,
            position,
        });
        self.notify();
        Ok(())
    }

    /// Close the active popup. Safe when nothing is active; notifies only
    /// when state actually changes.
    pub fn hide_inspection(&mut self, doc: &mut Document) {
        self.popup.hide(doc);
        if self.active.take().is_some() {
            self.notify();
        }
    }

    // ─────────────────────────────────────────────────────────────
    // Settings
    // ─────────────────────────────────────────────────────────────

    /// Validate and merge a settings update. Invalid values fail with
    /// [`Error::InvalidSettings`] and leave settings untouched; applied
    /// changes notify subscribers.
    ///
    /// An open popup keeps its current content until the next inspection;
    /// use [`VibeModeManager::update_settings_on`] to refresh it in place.
    pub fn update_settings(&mut self, update: SettingsUpdate) -> Result<()> {
        self.apply_settings(None, update)
    }

    /// Like [`VibeModeManager::update_settings`], but re-renders the open
    /// popup with the new display flags. Used by the popup's settings
    /// sub-panel.
    pub fn update_settings_on(
        &mut self,
        doc: &mut Document,
        update: SettingsUpdate,
    ) -> Result<()> {
        self.apply_settings(Some(doc), update)
    }

    fn apply_settings(&mut self, doc: Option<&mut Document>, update: SettingsUpdate) -> Result<()> {
        let next = self.settings.merged(&update)?;
        if next == self.settings {
            return Ok(());
        }
        self.settings = next;
        if let (Some(doc), Some(active)) = (doc, self.active.as_mut()) {
            let content = build_content(&active.metadata, &self.settings);
            active.content = content.clone();
            let data = PopupData {
                target: active.target,
                metadata: active.metadata.clone(),
                content,
                position: active.position,
            };
            self.popup.update_content(doc, data);
        }
        self.notify();
        Ok(())
    }

    pub fn settings(&self) -> &VibeSettings {
        &self.settings
    }

    // ─────────────────────────────────────────────────────────────
    // Event routing
    // ─────────────────────────────────────────────────────────────

    /// Route one host event through the engine.
    ///
    /// UI-path failures (an icon click racing element removal) degrade to
    /// the affordance not appearing; they are logged, never surfaced.
    pub async fn handle_event(&mut self, doc: &mut Document, event: HostEvent, now: Instant) {
        match event {
            HostEvent::Pointer(pointer) => {
                if !self.enabled || !self.settings.show_on_hover {
                    return;
                }
                match pointer.kind {
                    PointerKind::Enter => {
                        // Pointer entering the icon keeps its highlight in
                        // sync without disturbing the page hover target.
                        if self.icon.node() == Some(pointer.target) {
                            self.icon.set_hovered(true);
                            return;
                        }
                        self.icon.set_hovered(false);
                        self.hover
                            .pointer_entered(doc, pointer.target, pointer.position, now);
                    }
                    PointerKind::Leave => {
                        if self.icon.node() == Some(pointer.target) {
                            self.icon.set_hovered(false);
                            return;
                        }
                        self.hover.pointer_left(pointer.target, now);
                    }
                }
                self.flush_hover(doc, now);
            }
            HostEvent::Tick => self.flush_hover(doc, now),
            HostEvent::Key(key) => self.handle_key(doc, key, now).await,
            HostEvent::Click { target, position } => {
                if !self.enabled {
                    return;
                }
                if self.icon.node() == Some(target) {
                    if let Some(action) = self.icon.handle_click() {
                        self.apply_action(doc, action).await;
                    }
                } else if let Some(action) = self.popup.handle_backdrop_click(position) {
                    self.apply_action(doc, action).await;
                }
            }
            HostEvent::Resize(viewport) => {
                doc.set_viewport(viewport);
                self.icon.reposition(doc);
                self.popup.reposition_if_needed(doc);
            }
            HostEvent::Scroll { .. } => {
                self.icon.reposition(doc);
                self.popup.reposition_if_needed(doc);
            }
        }
    }

    async fn handle_key(&mut self, doc: &mut Document, key: KeyEvent, now: Instant) {
        if self.settings.keyboard_shortcuts && is_activation_chord(key) {
            // Activation is a discrete, debounced, idempotent action.
            let debounced = self
                .last_toggle
                .is_some_and(|t| now.duration_since(t) < TOGGLE_DEBOUNCE);
            if !debounced {
                self.last_toggle = Some(now);
                self.toggle(doc);
            }
            return;
        }
        if !self.enabled {
            return;
        }
        if let Some(action) = self.popup.handle_key(key) {
            self.apply_action(doc, action).await;
        } else if let Some(action) = self.icon.handle_key(key) {
            self.apply_action(doc, action).await;
        }
    }

    async fn apply_action(&mut self, doc: &mut Document, action: EngineAction) {
        match action {
            EngineAction::RequestInspection(element) => {
                if let Err(e) = self.show_inspection(doc, element).await {
                    debug!("inspection request for {element} not fulfilled: {e}");
                }
            }
            EngineAction::ClosePopup => self.hide_inspection(doc),
            EngineAction::UpdateSettings(update) => {
                if let Err(e) = self.update_settings_on(doc, update) {
                    warn!("settings update from popup rejected: {e}");
                }
            }
        }
    }
}

/// The activation chord: Ctrl+Shift+I.
fn is_activation_chord(key: KeyEvent) -> bool {
    key.ctrl && key.shift && matches!(key.key, Key::Char('i') | Key::Char('I'))
}
