/// Platform timer id for the selection debounce timer.
pub const DEBOUNCE_TIMER_ID: u32 = 1;

/// Global hotkey id for "open a capture session".
pub const HOTKEY_CAPTURE_ID: u32 = 1;

/// Tray menu command ids.
pub const TRAY_CMD_CAPTURE: u32 = 1001;
pub const TRAY_CMD_QUIT: u32 = 1003;

/// Tray tooltip.
pub const TRAY_TOOLTIP: &str = "textsnip";

/// Filename appended inside the configured log directory.
pub const LOG_FILENAME: &str = "log.txt";
