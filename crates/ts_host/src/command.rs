use ts_app::geometry::RectI32;

/// Host command queue items.
///
/// Commands are the host-side counterpart of core effects: small, serializable-ish units of
/// side effect the executor runs against the platform and surfaces.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Core actions (platform-neutral), dispatched through the reducer.
    Core(ts_app::Action),

    /// Show the full-screen capture overlay window.
    ShowCaptureWindow,
    /// Hide the capture overlay window.
    HideWindow,
    /// Ask the platform to close the capture window gracefully.
    CloseWindow,

    /// Request redraw (full window).
    RequestRedraw,

    /// Start (or restart) a platform timer.
    StartTimer(u32, u32),
    /// Stop a platform timer.
    StopTimer(u32),

    /// Snapshot the rectangle region and hand it to the recognition pipeline.
    DispatchRecognition(RectI32),

    /// Clear and show the result surface.
    ShowResultSurface,
    /// Replace the result surface text.
    SetResultText(String),
    /// Hide the rubber band and result surface.
    HideOverlays,

    /// Final commit: clipboard write plus optional log append.
    CommitText(String),

    /// Reload settings from disk and push the view style to the surfaces.
    ReloadSettings,

    /// Reset the host back to its initial state.
    ResetToInitialState,

    /// Quit the app (tray command).
    QuitApp,

    /// Show an error to the user (delegated to the platform).
    ShowError(String),

    /// No-op.
    None,
}
