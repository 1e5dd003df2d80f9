//! User-tunable inspection settings
//!
//! Settings are only ever changed through `VibeModeManager::update_settings`,
//! which validates the whole update before touching anything — an invalid
//! field leaves the previous settings fully intact.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use vibe_core::{AnalysisLevel, Error, Result};

/// All inspection settings, with their documented defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct VibeSettings {
    /// Show the inspection icon when hovering an element.
    #[serde(default = "default_true")]
    pub show_on_hover: bool,

    /// Analysis depth used by `show_inspection`.
    #[serde(default)]
    pub analysis_level: AnalysisLevel,

    /// Flip/clamp the popup to keep it inside the viewport.
    #[serde(default = "default_true")]
    pub auto_position: bool,

    /// React to the activation chord and popup keys.
    #[serde(default = "default_true")]
    pub keyboard_shortcuts: bool,

    /// Raise per-analysis diagnostics from trace to debug level.
    #[serde(default)]
    pub debug_mode: bool,

    /// Popup display flags (settings sub-panel).
    #[serde(default = "default_true")]
    pub show_react_info: bool,

    #[serde(default = "default_true")]
    pub show_css_analysis: bool,

    #[serde(default)]
    pub show_performance_metrics: bool,
}

fn default_true() -> bool {
    true
}

impl Default for VibeSettings {
    fn default() -> Self {
        Self {
            show_on_hover: true,
            analysis_level: AnalysisLevel::Detailed,
            auto_position: true,
            keyboard_shortcuts: true,
            debug_mode: false,
            show_react_info: true,
            show_css_analysis: true,
            show_performance_metrics: false,
        }
    }
}

/// Partial settings update. Unset fields keep their current value.
///
/// `analysis_level` arrives as a string (settings panels and config files
/// speak strings) and is validated against the known levels.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SettingsUpdate {
    pub show_on_hover: Option<bool>,
    pub analysis_level: Option<String>,
    pub auto_position: Option<bool>,
    pub keyboard_shortcuts: Option<bool>,
    pub debug_mode: Option<bool>,
    pub show_react_info: Option<bool>,
    pub show_css_analysis: Option<bool>,
    pub show_performance_metrics: Option<bool>,
}

impl SettingsUpdate {
    pub fn analysis_level(level: &str) -> Self {
        Self {
            analysis_level: Some(level.to_string()),
            ..Self::default()
        }
    }

    pub fn display_flag(flag: DisplayFlag, value: bool) -> Self {
        let mut update = Self::default();
        match flag {
            DisplayFlag::ReactInfo => update.show_react_info = Some(value),
            DisplayFlag::CssAnalysis => update.show_css_analysis = Some(value),
            DisplayFlag::PerformanceMetrics => update.show_performance_metrics = Some(value),
        }
        update
    }
}

/// Popup display-flag identifiers used by the settings sub-panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayFlag {
    ReactInfo,
    CssAnalysis,
    PerformanceMetrics,
}

impl VibeSettings {
    /// Validate and apply an update, returning the merged settings.
    ///
    /// Validation happens before any field is merged: an unknown
    /// `analysis_level` fails the whole update and the returned error
    /// leaves `self` untouched (the method never mutates).
    pub fn merged(&self, update: &SettingsUpdate) -> Result<VibeSettings> {
        let analysis_level = match &update.analysis_level {
            Some(raw) => Some(
                AnalysisLevel::from_str(raw)
                    .map_err(|e| Error::invalid_settings(e.to_string()))?,
            ),
            None => None,
        };

        let mut next = self.clone();
        if let Some(v) = update.show_on_hover {
            next.show_on_hover = v;
        }
        if let Some(level) = analysis_level {
            next.analysis_level = level;
        }
        if let Some(v) = update.auto_position {
            next.auto_position = v;
        }
        if let Some(v) = update.keyboard_shortcuts {
            next.keyboard_shortcuts = v;
        }
        if let Some(v) = update.debug_mode {
            next.debug_mode = v;
        }
        if let Some(v) = update.show_react_info {
            next.show_react_info = v;
        }
        if let Some(v) = update.show_css_analysis {
            next.show_css_analysis = v;
        }
        if let Some(v) = update.show_performance_metrics {
            next.show_performance_metrics = v;
        }
        Ok(next)
    }
}
