//! Theme preference: a tri-state light/dark/system value persisted across runs.
//!
//! The preference lives in a single JSON settings file under the user config
//! directory. "system" defers to the OS color scheme reported by the window
//! system; egui resolves it on every frame once the preference is applied.

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    Dark,
    System,
}

impl ThemeMode {
    /// The toggle-button transition: dark goes to light, anything else to dark.
    pub fn toggled(self) -> ThemeMode {
        match self {
            ThemeMode::Dark => ThemeMode::Light,
            ThemeMode::Light | ThemeMode::System => ThemeMode::Dark,
        }
    }
}

impl From<ThemeMode> for egui::ThemePreference {
    fn from(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Light => egui::ThemePreference::Light,
            ThemeMode::Dark => egui::ThemePreference::Dark,
            ThemeMode::System => egui::ThemePreference::System,
        }
    }
}

/// On-disk shape of the settings file.
#[derive(Debug, Serialize, Deserialize)]
struct Settings {
    theme: ThemeMode,
}

/// Holds the current theme preference and persists changes best-effort.
pub struct ThemeStore {
    mode: ThemeMode,
    path: Option<PathBuf>,
}

impl ThemeStore {
    /// Reads the stored preference, falling back to `default` when the settings
    /// file is missing or unreadable.
    pub fn load(default: ThemeMode) -> Self {
        Self::load_from(settings_path(), default)
    }

    pub fn load_from(path: Option<PathBuf>, default: ThemeMode) -> Self {
        let mode = path
            .as_deref()
            .and_then(|p| fs::read_to_string(p).ok())
            .and_then(|raw| serde_json::from_str::<Settings>(&raw).ok())
            .map(|s| s.theme)
            .unwrap_or(default);
        Self { mode, path }
    }

    pub fn mode(&self) -> ThemeMode {
        self.mode
    }

    /// Updates the preference and persists it. A failed write keeps the new
    /// mode for this session and leaves a warning in the log.
    pub fn set_mode(&mut self, mode: ThemeMode) {
        self.mode = mode;
        self.persist();
    }

    /// Pushes the preference onto the egui context. Called at startup and after
    /// every change; `System` is resolved against the OS scheme by egui.
    pub fn apply(&self, ctx: &egui::Context) {
        ctx.set_theme(egui::ThemePreference::from(self.mode));
    }

    fn persist(&self) {
        let Some(path) = &self.path else { return };
        let settings = Settings { theme: self.mode };
        let result = path
            .parent()
            .map(fs::create_dir_all)
            .unwrap_or(Ok(()))
            .and_then(|_| {
                let json = serde_json::to_string_pretty(&settings)?;
                fs::write(path, json)
            });
        if let Err(e) = result {
            warn!("failed to persist theme preference to {}: {e}", path.display());
        }
    }
}

fn settings_path() -> Option<PathBuf> {
    let base = dirs::config_dir()
        .or_else(dirs::data_local_dir)
        .or_else(dirs::home_dir)?;
    Some(base.join("cvv-desktop").join("settings.json"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_lowercase() {
        assert_eq!(serde_json::to_string(&ThemeMode::Dark).unwrap(), "\"dark\"");
        assert_eq!(
            serde_json::from_str::<ThemeMode>("\"system\"").unwrap(),
            ThemeMode::System
        );
    }

    #[test]
    fn toggle_flips_between_light_and_dark() {
        assert_eq!(ThemeMode::Dark.toggled(), ThemeMode::Light);
        assert_eq!(ThemeMode::Light.toggled(), ThemeMode::Dark);
        // A "system" preference toggles to an explicit mode.
        assert_eq!(ThemeMode::System.toggled(), ThemeMode::Dark);
    }

    #[test]
    fn persists_and_reloads_preference() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");

        let mut store = ThemeStore::load_from(Some(path.clone()), ThemeMode::Light);
        assert_eq!(store.mode(), ThemeMode::Light);

        store.set_mode(ThemeMode::Dark);

        // A fresh load with the same storage resolves to dark without re-toggling.
        let reloaded = ThemeStore::load_from(Some(path), ThemeMode::Light);
        assert_eq!(reloaded.mode(), ThemeMode::Dark);
    }

    #[test]
    fn corrupt_settings_fall_back_to_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "not json").unwrap();

        let store = ThemeStore::load_from(Some(path), ThemeMode::Dark);
        assert_eq!(store.mode(), ThemeMode::Dark);
    }

    #[test]
    fn missing_path_is_session_only() {
        let mut store = ThemeStore::load_from(None, ThemeMode::Light);
        store.set_mode(ThemeMode::Dark);
        assert_eq!(store.mode(), ThemeMode::Dark);
    }
}
