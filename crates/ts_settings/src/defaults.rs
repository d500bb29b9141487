use std::path::PathBuf;

// Result preview defaults.
pub fn default_preview_font_name() -> String {
    "Arial".to_string()
}

pub fn default_preview_font_size() -> f32 {
    16.0
}

pub fn default_preview_text_color() -> (u8, u8, u8, u8) {
    (239, 240, 241, 255)
}

pub fn default_preview_background() -> (u8, u8, u8, u8) {
    (72, 75, 106, 230)
}

pub fn default_preview_padding() -> i32 {
    10
}

// Selection rubber-band defaults.
pub fn default_selection_border_color() -> (u8, u8, u8, u8) {
    (0, 128, 255, 255)
}

pub fn default_selection_border_thickness() -> f32 {
    2.0
}

pub fn default_selection_fill() -> (u8, u8, u8, u8) {
    (0, 128, 255, 60)
}

pub fn default_window_tint() -> (u8, u8, u8, u8) {
    (255, 255, 255, 13)
}

// OCR defaults.
pub fn default_ocr_language() -> String {
    "eng".to_string()
}

// Text log defaults.
pub fn default_save_log() -> bool {
    false
}

pub fn default_log_path() -> String {
    home_dir().to_string_lossy().to_string()
}

// Hotkey defaults (modifier bitmask + virtual key): Alt+Q opens a capture session.
pub fn default_hotkey_modifiers() -> u32 {
    0x0001 // MOD_ALT
}

pub fn default_hotkey_key() -> u32 {
    'Q' as u32
}

pub fn home_dir() -> PathBuf {
    if let Some(home) = dirs::home_dir() {
        return home;
    }

    // Fallback: program directory, then cwd.
    if let Ok(exe_path) = std::env::current_exe()
        && let Some(exe_dir) = exe_path.parent()
    {
        return exe_dir.to_path_buf();
    }

    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}
