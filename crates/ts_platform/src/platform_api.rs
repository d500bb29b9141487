use std::fmt;

/// Error returned by host-facing platform side-effect APIs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlatformServicesError {
    Window(String),
    Clipboard(String),
    Timer(String),
    Tray(String),
    Hotkey(String),
    Other(String),
}

impl fmt::Display for PlatformServicesError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlatformServicesError::Window(msg) => write!(f, "window error: {msg}"),
            PlatformServicesError::Clipboard(msg) => write!(f, "clipboard error: {msg}"),
            PlatformServicesError::Timer(msg) => write!(f, "timer error: {msg}"),
            PlatformServicesError::Tray(msg) => write!(f, "tray error: {msg}"),
            PlatformServicesError::Hotkey(msg) => write!(f, "hotkey error: {msg}"),
            PlatformServicesError::Other(msg) => write!(f, "platform error: {msg}"),
        }
    }
}

impl std::error::Error for PlatformServicesError {}

/// Cursor icon (system cursor).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorIcon {
    Arrow,
    Crosshair,
    IBeam,
}

/// Host-facing platform API.
///
/// This is the boundary where the host requests platform side effects (window visibility,
/// timers, clipboard, tray, hotkeys) without reaching into a backend's internals. Timers use
/// restart semantics: calling `start_timer` with an id that is already scheduled replaces the
/// pending timer, which is what the debounce logic relies on.
pub trait HostPlatform {
    type WindowHandle: Copy;

    fn screen_size(&self) -> (i32, i32);

    fn is_window_visible(&self, window: Self::WindowHandle) -> bool;
    fn show_window(&self, window: Self::WindowHandle) -> Result<(), PlatformServicesError>;
    fn hide_window(&self, window: Self::WindowHandle) -> Result<(), PlatformServicesError>;

    /// Request that the platform closes the window gracefully.
    fn request_close(&self, window: Self::WindowHandle) -> Result<(), PlatformServicesError>;

    fn request_redraw(&self, window: Self::WindowHandle) -> Result<(), PlatformServicesError>;

    fn set_cursor(&self, cursor: CursorIcon);

    /// Schedule (or restart) a repeating timer that delivers `InputEvent::Timer { id }`.
    fn start_timer(
        &self,
        window: Self::WindowHandle,
        timer_id: u32,
        interval_ms: u32,
    ) -> Result<(), PlatformServicesError>;

    fn stop_timer(
        &self,
        window: Self::WindowHandle,
        timer_id: u32,
    ) -> Result<(), PlatformServicesError>;

    fn copy_text_to_clipboard(&self, text: &str) -> Result<(), PlatformServicesError>;

    /// Initialize the system tray icon (if supported).
    fn init_tray(
        &self,
        window: Self::WindowHandle,
        tooltip: &str,
    ) -> Result<(), PlatformServicesError>;

    /// Cleanup the system tray icon (if supported).
    fn cleanup_tray(&self) -> Result<(), PlatformServicesError>;

    /// Register a global hotkey (if supported).
    fn set_global_hotkey(
        &self,
        window: Self::WindowHandle,
        hotkey_id: i32,
        modifiers: u32,
        key: u32,
    ) -> Result<(), PlatformServicesError>;

    /// Unregister all global hotkeys registered by this process (if supported).
    fn clear_global_hotkeys(&self) -> Result<(), PlatformServicesError>;
}
