use anyhow::Result;
use crossbeam_channel::{Receiver, Sender, unbounded};

use ts_app::{AppModel, session};
use ts_capture::{RecognitionEvent, RecognitionPipeline, ScreenSource, capture_region};
use ts_ocr::{OcrConfig, OcrHandle, TesseractRecognizer};
use ts_platform::{
    CursorIcon, HostPlatform, InputEvent, KeyCode, MouseButton, TrayEvent, WindowId,
};
use ts_render::{Color, RenderList};
use ts_settings::{ConfigManager, Settings};
use ts_ui::{ResultSurface, ViewStyle, build_capture_overlay_render_list};

use crate::command::Command;
use crate::constants::{
    DEBOUNCE_TIMER_ID, HOTKEY_CAPTURE_ID, TRAY_CMD_CAPTURE, TRAY_CMD_QUIT, TRAY_TOOLTIP,
};
use crate::core_bridge;
use crate::executor::CommandExecutor;
use crate::host_event::HostEvent;
use crate::log_sink::TextLog;

fn color_from_tuple((r, g, b, a): (u8, u8, u8, u8)) -> Color {
    Color::from_rgba8(r, g, b, a)
}

/// Build the passive view style from persisted settings.
pub fn style_from_settings(settings: &Settings) -> ViewStyle {
    ViewStyle {
        font_family: settings.preview_font_name.clone(),
        font_size: settings.preview_font_size,
        text_color: color_from_tuple(settings.preview_text_color),
        background: color_from_tuple(settings.preview_background),
        padding: settings.preview_padding as f32,

        border_color: color_from_tuple(settings.selection_border_color),
        border_thickness: settings.selection_border_thickness,
        selection_fill: color_from_tuple(settings.selection_fill),
        window_tint: color_from_tuple(settings.window_tint),
    }
}

/// Host application state.
///
/// Owns the platform-neutral core model, the recognition pipeline, and the
/// surfaces, and runs every core action and host command on the UI thread.
/// Background work (engine loading, recognition) reports back through the
/// host event channel, drained by `pump_host_events`.
pub struct CaptureApp<P: HostPlatform<WindowHandle = WindowId>> {
    platform: P,
    window: WindowId,

    core: AppModel,
    config: ConfigManager,

    screen: Box<dyn ScreenSource>,
    ocr: OcrHandle,
    pipeline: RecognitionPipeline<HostEvent>,
    host_events: Receiver<HostEvent>,
    host_sender: Sender<HostEvent>,

    surface: ResultSurface,
    style: ViewStyle,
    text_log: TextLog,

    ocr_available: bool,
    quit_requested: bool,
}

impl<P: HostPlatform<WindowHandle = WindowId>> CaptureApp<P> {
    pub fn new(
        platform: P,
        window: WindowId,
        screen: Box<dyn ScreenSource>,
        config: ConfigManager,
    ) -> Self {
        let settings = config.get();
        let style = style_from_settings(&settings);
        let text_log = TextLog::from_settings(&settings);

        let (host_sender, host_events) = unbounded();
        let ocr = OcrHandle::new();
        let pipeline = RecognitionPipeline::new(ocr.clone(), host_sender.clone());

        Self {
            platform,
            window,
            core: AppModel::new(),
            config,
            screen,
            ocr,
            pipeline,
            host_events,
            host_sender,
            surface: ResultSurface::new(style.clone()),
            style,
            text_log,
            ocr_available: false,
            quit_requested: false,
        }
    }

    /// Register the tray icon and capture hotkey, then kick off the engine load.
    pub fn initialize(&mut self) -> Result<()> {
        self.platform.init_tray(self.window, TRAY_TOOLTIP)?;
        self.register_hotkey()?;
        self.start_ocr_engine();
        Ok(())
    }

    fn register_hotkey(&self) -> Result<()> {
        let (modifiers, key) = self.config.hotkey();
        self.platform
            .set_global_hotkey(self.window, HOTKEY_CAPTURE_ID as i32, modifiers, key)?;
        Ok(())
    }

    /// Load the OCR engine off-thread; availability comes back as a host event.
    fn start_ocr_engine(&self) {
        let ocr_config = OcrConfig::new(self.config.ocr_language());
        let sender = self.host_sender.clone();

        self.ocr.load_in_background(
            move || {
                if !ts_ocr::engine_available() {
                    anyhow::bail!("tesseract binary not found on PATH");
                }
                Ok(Box::new(TesseractRecognizer::new(ocr_config)) as Box<dyn ts_ocr::Recognizer>)
            },
            move |available| {
                let _ = sender.send(HostEvent::OcrAvailabilityChanged { available });
            },
        );
    }

    pub fn is_ocr_available(&self) -> bool {
        self.ocr_available
    }

    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    pub fn core(&self) -> &AppModel {
        &self.core
    }

    pub fn surface(&self) -> &ResultSurface {
        &self.surface
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    /// Handle to the recognition capability (tests install fakes through it).
    pub fn ocr(&self) -> &OcrHandle {
        &self.ocr
    }

    /// Translate one platform input event into host commands and run them.
    pub fn handle_input_event(&mut self, event: InputEvent) {
        let commands = self.commands_for_input(event);
        self.execute_command_chain(commands, self.window);
    }

    fn commands_for_input(&self, event: InputEvent) -> Vec<Command> {
        match event {
            InputEvent::MouseDown {
                x,
                y,
                button: MouseButton::Left,
            } => vec![Command::Core(ts_app::Action::Session(
                session::Action::PointerDown { x, y },
            ))],
            InputEvent::MouseMove { x, y } => vec![Command::Core(ts_app::Action::Session(
                session::Action::PointerMove { x, y },
            ))],
            InputEvent::MouseUp {
                x,
                y,
                button: MouseButton::Left,
            } => vec![Command::Core(ts_app::Action::Session(
                session::Action::PointerUp { x, y },
            ))],

            InputEvent::Timer {
                id: DEBOUNCE_TIMER_ID,
            } => vec![Command::Core(ts_app::Action::Session(
                session::Action::DebounceElapsed,
            ))],

            InputEvent::KeyDown { key, .. } if key == KeyCode::ESCAPE => {
                vec![Command::Core(ts_app::Action::Cancel)]
            }

            InputEvent::Hotkey {
                id: HOTKEY_CAPTURE_ID,
            } => vec![Command::Core(ts_app::Action::StartCapture)],

            InputEvent::Tray(TrayEvent::DoubleClick)
            | InputEvent::Tray(TrayEvent::MenuCommand(TRAY_CMD_CAPTURE)) => {
                vec![Command::Core(ts_app::Action::StartCapture)]
            }
            InputEvent::Tray(TrayEvent::MenuCommand(TRAY_CMD_QUIT)) => vec![Command::QuitApp],

            _ => Vec::new(),
        }
    }

    /// Drain pending host events (recognition results, engine availability).
    pub fn pump_host_events(&mut self) {
        while let Ok(event) = self.host_events.try_recv() {
            self.handle_host_event(event);
        }
    }

    /// Block up to `timeout` for one host event, then drain the rest.
    pub fn wait_host_event(&mut self, timeout: std::time::Duration) -> bool {
        match self.host_events.recv_timeout(timeout) {
            Ok(event) => {
                self.handle_host_event(event);
                self.pump_host_events();
                true
            }
            Err(_) => false,
        }
    }

    fn handle_host_event(&mut self, event: HostEvent) {
        let commands = match event {
            HostEvent::Recognition(RecognitionEvent::Completed { text }) => {
                vec![Command::Core(ts_app::Action::Session(
                    session::Action::RecognitionDelivered { text },
                ))]
            }
            HostEvent::Recognition(RecognitionEvent::Failed) => {
                vec![Command::Core(ts_app::Action::Session(
                    session::Action::RecognitionAbandoned,
                ))]
            }
            HostEvent::OcrAvailabilityChanged { available } => {
                self.ocr_available = available;
                if available {
                    log::info!("OCR engine ready (language {})", self.config.ocr_language());
                } else {
                    log::warn!("OCR engine unavailable; recognition cycles will be abandoned");
                }
                Vec::new()
            }
        };
        self.execute_command_chain(commands, self.window);
    }

    /// Render items for the capture overlay plus the result surface.
    pub fn build_render_list(&self) -> RenderList {
        let screen_size = self.platform.screen_size();
        let session = self.core.session();

        let mut render_list =
            build_capture_overlay_render_list(screen_size, session.selection(), &self.style);
        render_list.extend(self.surface.build_render_list(session.selection(), screen_size));
        render_list
    }

    fn commit_text(&self, text: &str) {
        if let Err(e) = self.platform.copy_text_to_clipboard(text) {
            log::warn!("clipboard write failed: {e}");
        }
        if let Err(e) = self.text_log.append(text) {
            log::warn!("text log append failed: {e:#}");
        }
    }

    fn snapshot_and_dispatch(&self, rect: ts_app::geometry::RectI32) -> Vec<Command> {
        match capture_region(self.screen.as_ref(), rect) {
            Ok(image) => {
                self.pipeline.dispatch(image);
                Vec::new()
            }
            Err(e) => {
                // Abandon the cycle so the gate re-opens; prior text stays up.
                log::warn!("snapshot failed: {e}");
                vec![Command::Core(ts_app::Action::Session(
                    session::Action::RecognitionAbandoned,
                ))]
            }
        }
    }

    fn reload_settings(&mut self) -> Vec<Command> {
        self.config.reload();
        let settings = self.config.get();

        self.style = style_from_settings(&settings);
        self.surface.apply_style(self.style.clone());
        self.text_log = TextLog::from_settings(&settings);

        let _ = self.platform.clear_global_hotkeys();
        if let Err(e) = self.register_hotkey() {
            log::warn!("hotkey re-registration failed: {e:#}");
        }

        // Drop the installed engine first; a ready slot would otherwise keep
        // recognizing with the previous language.
        self.ocr.unload();
        self.start_ocr_engine();
        vec![Command::RequestRedraw]
    }

    fn reset_to_initial_state(&mut self) -> Vec<Command> {
        self.surface.hide();
        let _ = self.platform.stop_timer(self.window, DEBOUNCE_TIMER_ID);
        core_bridge::dispatch(&mut self.core, ts_app::Action::Session(session::Action::ResetToIdle))
    }

    fn cleanup_before_quit(&mut self) {
        self.ocr.unload();
        let _ = self.platform.clear_global_hotkeys();
        let _ = self.platform.cleanup_tray();
    }
}

impl<P: HostPlatform<WindowHandle = WindowId>> CommandExecutor for CaptureApp<P> {
    fn execute_command(&mut self, command: Command, window: WindowId) -> Vec<Command> {
        match command {
            Command::Core(action) => core_bridge::dispatch(&mut self.core, action),

            Command::ShowCaptureWindow => {
                if let Err(e) = self.platform.show_window(window) {
                    log::warn!("show window failed: {e}");
                }
                self.platform.set_cursor(CursorIcon::Crosshair);
                vec![Command::RequestRedraw]
            }
            Command::HideWindow => {
                let _ = self.platform.hide_window(window);
                self.platform.set_cursor(CursorIcon::Arrow);
                vec![]
            }
            Command::CloseWindow => {
                let _ = self.platform.request_close(window);
                vec![Command::ResetToInitialState]
            }

            Command::RequestRedraw => {
                let _ = self.platform.request_redraw(window);
                vec![]
            }

            Command::StartTimer(timer_id, interval_ms) => {
                let _ = self.platform.start_timer(window, timer_id, interval_ms);
                vec![]
            }
            Command::StopTimer(timer_id) => {
                let _ = self.platform.stop_timer(window, timer_id);
                vec![]
            }

            Command::DispatchRecognition(rect) => self.snapshot_and_dispatch(rect),

            Command::ShowResultSurface => {
                self.surface.show();
                vec![Command::RequestRedraw]
            }
            Command::SetResultText(text) => {
                self.surface.set_text(text);
                vec![Command::RequestRedraw]
            }
            Command::HideOverlays => {
                self.surface.hide();
                vec![Command::RequestRedraw]
            }

            Command::CommitText(text) => {
                self.commit_text(&text);
                vec![]
            }

            Command::ReloadSettings => self.reload_settings(),
            Command::ResetToInitialState => self.reset_to_initial_state(),

            Command::QuitApp => {
                self.cleanup_before_quit();
                self.quit_requested = true;
                let _ = self.platform.request_close(window);
                vec![]
            }

            Command::ShowError(msg) => {
                log::error!("{msg}");
                vec![]
            }

            Command::None => vec![],
        }
    }
}
