use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::defaults::*;

/// Application settings.
///
/// The view fields are the passive style bag the capture overlay and result surface read;
/// colors are stored as 8-bit RGBA tuples so the JSON stays hand-editable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    // Result preview
    #[serde(default = "default_preview_font_name")]
    pub preview_font_name: String,
    #[serde(default = "default_preview_font_size")]
    pub preview_font_size: f32,
    #[serde(default = "default_preview_text_color")]
    pub preview_text_color: (u8, u8, u8, u8),
    #[serde(default = "default_preview_background")]
    pub preview_background: (u8, u8, u8, u8),
    #[serde(default = "default_preview_padding")]
    pub preview_padding: i32,

    // Selection rubber band
    #[serde(default = "default_selection_border_color")]
    pub selection_border_color: (u8, u8, u8, u8),
    #[serde(default = "default_selection_border_thickness")]
    pub selection_border_thickness: f32,
    #[serde(default = "default_selection_fill")]
    pub selection_fill: (u8, u8, u8, u8),
    #[serde(default = "default_window_tint")]
    pub window_tint: (u8, u8, u8, u8),

    // OCR language
    #[serde(default = "default_ocr_language")]
    pub ocr_language: String,

    // Text log
    #[serde(default = "default_save_log")]
    pub save_log: bool,
    #[serde(default = "default_log_path")]
    pub log_path: String,

    // Capture hotkey (modifier bitmask + virtual key)
    #[serde(default = "default_hotkey_modifiers")]
    pub hotkey_modifiers: u32,
    #[serde(default = "default_hotkey_key")]
    pub hotkey_key: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            preview_font_name: default_preview_font_name(),
            preview_font_size: default_preview_font_size(),
            preview_text_color: default_preview_text_color(),
            preview_background: default_preview_background(),
            preview_padding: default_preview_padding(),

            selection_border_color: default_selection_border_color(),
            selection_border_thickness: default_selection_border_thickness(),
            selection_fill: default_selection_fill(),
            window_tint: default_window_tint(),

            ocr_language: default_ocr_language(),

            save_log: default_save_log(),
            log_path: default_log_path(),

            hotkey_modifiers: default_hotkey_modifiers(),
            hotkey_key: default_hotkey_key(),
        }
    }
}

impl Settings {
    fn settings_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(home_dir)
            .join("textsnip")
    }

    pub fn default_settings_path() -> PathBuf {
        Self::settings_dir().join("settings.json")
    }

    /// Load settings from the default path, falling back to (and persisting) defaults.
    pub fn load() -> Self {
        Self::load_from(&Self::default_settings_path())
    }

    /// Load settings from `path`, falling back to (and persisting) defaults.
    pub fn load_from(path: &Path) -> Self {
        if let Ok(content) = fs::read_to_string(path) {
            match serde_json::from_str::<Settings>(&content) {
                Ok(settings) => return settings,
                Err(e) => log::warn!("ignoring malformed settings file: {e}"),
            }
        }

        let default_settings = Self::default();
        if let Err(e) = default_settings.save_to(path) {
            log::warn!("failed to persist default settings: {e:#}");
        }
        default_settings
    }

    pub fn save(&self) -> anyhow::Result<()> {
        self.save_to(&Self::default_settings_path())
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Get hotkey display string (e.g. "Alt+Q").
    pub fn hotkey_string(&self) -> String {
        const MOD_ALT: u32 = 0x0001;
        const MOD_CONTROL: u32 = 0x0002;
        const MOD_SHIFT: u32 = 0x0004;

        let mut parts = Vec::new();

        if self.hotkey_modifiers & MOD_CONTROL != 0 {
            parts.push("Ctrl");
        }
        if self.hotkey_modifiers & MOD_ALT != 0 {
            parts.push("Alt");
        }
        if self.hotkey_modifiers & MOD_SHIFT != 0 {
            parts.push("Shift");
        }

        let key_char = match self.hotkey_key {
            key if key >= 'A' as u32 && key <= 'Z' as u32 => {
                char::from_u32(key).unwrap_or('?').to_string()
            }
            key if key >= '0' as u32 && key <= '9' as u32 => {
                char::from_u32(key).unwrap_or('?').to_string()
            }
            _ => format!("Key{}", self.hotkey_key),
        };

        parts.push(&key_char);
        parts.join("+")
    }

    /// Parse a hotkey string (e.g. "Ctrl+Alt+S") into fields.
    ///
    /// Returns `true` if parsing succeeded; the fields are untouched on failure.
    pub fn parse_hotkey_string(&mut self, hotkey_str: &str) -> bool {
        const MOD_ALT: u32 = 0x0001;
        const MOD_CONTROL: u32 = 0x0002;
        const MOD_SHIFT: u32 = 0x0004;

        let parts: Vec<&str> = hotkey_str.split('+').map(|s| s.trim()).collect();
        if parts.is_empty() {
            return false;
        }

        let mut modifiers = 0u32;
        let mut key = 0u32;

        for part in &parts {
            match part.to_lowercase().as_str() {
                "ctrl" | "control" => modifiers |= MOD_CONTROL,
                "alt" => modifiers |= MOD_ALT,
                "shift" => modifiers |= MOD_SHIFT,
                key_str if key_str.len() == 1 => {
                    if let Some(ch) = key_str.chars().next() {
                        let ch = ch.to_ascii_uppercase();
                        if ch.is_ascii_alphanumeric() {
                            key = ch as u32;
                        }
                    }
                }
                _ => return false,
            }
        }

        if key == 0 || modifiers == 0 {
            return false;
        }

        self.hotkey_modifiers = modifiers;
        self.hotkey_key = key;
        true
    }
}
