//! Integration tests for settings persistence
//!
//! The `.vibe/config.toml` round-trip as the settings panel uses it:
//! load → mutate through the manager → save → reload.

use tempfile::TempDir;

use vibe_engine::config::{load_settings, save_settings};
use vibe_engine::{SettingsUpdate, VibeModeManager};

#[test]
fn fresh_project_starts_with_defaults() {
    let project = TempDir::new().unwrap();
    let settings = load_settings(project.path());
    assert!(settings.show_on_hover);
    assert_eq!(settings.analysis_level.as_str(), "detailed");
}

#[test]
fn manager_changes_survive_a_save_load_cycle() {
    let project = TempDir::new().unwrap();

    let mut manager = VibeModeManager::with_settings(load_settings(project.path()));
    manager
        .update_settings(SettingsUpdate {
            analysis_level: Some("comprehensive".to_string()),
            debug_mode: Some(true),
            show_performance_metrics: Some(true),
            ..Default::default()
        })
        .unwrap();

    save_settings(project.path(), manager.settings()).unwrap();

    let reloaded = load_settings(project.path());
    assert_eq!(reloaded, *manager.settings());
    assert_eq!(reloaded.analysis_level.as_str(), "comprehensive");
    assert!(reloaded.debug_mode);
}

#[test]
fn rejected_update_is_never_persisted() {
    let project = TempDir::new().unwrap();

    let mut manager = VibeModeManager::with_settings(load_settings(project.path()));
    let before = manager.settings().clone();
    assert!(manager
        .update_settings(SettingsUpdate::analysis_level("turbo"))
        .is_err());

    save_settings(project.path(), manager.settings()).unwrap();
    assert_eq!(load_settings(project.path()), before);
}
