use std::sync::Arc;

use parking_lot::RwLock;

use crate::Settings;

/// Unified config manager.
///
/// Loads once and hands out snapshot copies; collaborators that need live access share the
/// inner lock.
pub struct ConfigManager {
    settings: Arc<RwLock<Settings>>,
}

impl ConfigManager {
    pub fn new() -> Self {
        Self::with_settings(Settings::load())
    }

    pub fn with_settings(settings: Settings) -> Self {
        Self {
            settings: Arc::new(RwLock::new(settings)),
        }
    }

    /// Snapshot copy of the current settings.
    pub fn get(&self) -> Settings {
        self.settings.read().clone()
    }

    pub fn get_shared(&self) -> Arc<RwLock<Settings>> {
        Arc::clone(&self.settings)
    }

    /// Reload settings from disk.
    pub fn reload(&self) {
        *self.settings.write() = Settings::load();
    }

    /// Replace settings in memory (e.g. after the settings dialog applies changes).
    pub fn update(&self, settings: Settings) {
        *self.settings.write() = settings;
    }

    // Convenience accessors.

    #[inline]
    pub fn ocr_language(&self) -> String {
        self.settings.read().ocr_language.clone()
    }

    #[inline]
    pub fn save_log(&self) -> bool {
        self.settings.read().save_log
    }

    #[inline]
    pub fn log_path(&self) -> String {
        self.settings.read().log_path.clone()
    }

    #[inline]
    pub fn hotkey(&self) -> (u32, u32) {
        let s = self.settings.read();
        (s.hotkey_modifiers, s.hotkey_key)
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_is_isolated_from_later_updates() {
        let manager = ConfigManager::with_settings(Settings::default());
        let snapshot = manager.get();

        let mut changed = Settings::default();
        changed.ocr_language = "jpn".to_string();
        manager.update(changed);

        assert_eq!(snapshot.ocr_language, "eng");
        assert_eq!(manager.ocr_language(), "jpn");
    }
}
