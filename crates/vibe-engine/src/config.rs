//! Settings persistence for `.vibe/config.toml`

use std::fs;
use std::path::{Path, PathBuf};

use vibe_core::prelude::*;

use crate::settings::VibeSettings;

const CONFIG_FILENAME: &str = "config.toml";
const VIBE_DIR: &str = ".vibe";

fn config_path(project_path: &Path) -> PathBuf {
    project_path.join(VIBE_DIR).join(CONFIG_FILENAME)
}

/// Load settings from `<project>/.vibe/config.toml`.
///
/// A missing or unreadable file yields the defaults; a malformed file is
/// logged and also yields the defaults, so a bad edit can never wedge the
/// engine.
pub fn load_settings(project_path: &Path) -> VibeSettings {
    let path = config_path(project_path);
    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(_) => {
            debug!("No config at {}, using defaults", path.display());
            return VibeSettings::default();
        }
    };

    match toml::from_str(&content) {
        Ok(settings) => settings,
        Err(e) => {
            warn!("Malformed config at {}: {e}; using defaults", path.display());
            VibeSettings::default()
        }
    }
}

/// Write settings to `<project>/.vibe/config.toml`, creating the directory
/// if needed.
pub fn save_settings(project_path: &Path, settings: &VibeSettings) -> Result<()> {
    let dir = project_path.join(VIBE_DIR);
    fs::create_dir_all(&dir)?;

    let content = toml::to_string_pretty(settings)
        .map_err(|e| Error::config(format!("failed to serialize settings: {e}")))?;
    fs::write(config_path(project_path), content)?;
    Ok(())
}
