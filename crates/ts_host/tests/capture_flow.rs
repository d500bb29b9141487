//! End-to-end host flow against a fake platform, screen, and recognizer.

use std::sync::Mutex;
use std::time::Duration;

use image::RgbaImage;
use ts_app::session::Phase;
use ts_host::constants::DEBOUNCE_TIMER_ID;
use ts_host::{CaptureApp, Command, CommandExecutor};
use ts_ocr::Recognizer;
use ts_platform::{
    CursorIcon, HostPlatform, InputEvent, KeyCode, Modifiers, MouseButton, PlatformServicesError,
    TrayEvent, WindowId,
};
use ts_settings::{ConfigManager, Settings};

#[derive(Default)]
struct Calls {
    window_visible: bool,
    close_requested: bool,
    redraws: usize,
    started_timers: Vec<(u32, u32)>,
    stopped_timers: Vec<u32>,
    clipboard: Vec<String>,
    tray_active: bool,
    hotkeys: Vec<(i32, u32, u32)>,
}

#[derive(Default)]
struct FakePlatform {
    calls: Mutex<Calls>,
}

impl FakePlatform {
    fn calls(&self) -> std::sync::MutexGuard<'_, Calls> {
        self.calls.lock().unwrap()
    }
}

impl HostPlatform for FakePlatform {
    type WindowHandle = WindowId;

    fn screen_size(&self) -> (i32, i32) {
        (1920, 1080)
    }

    fn is_window_visible(&self, _window: WindowId) -> bool {
        self.calls().window_visible
    }

    fn show_window(&self, _window: WindowId) -> Result<(), PlatformServicesError> {
        self.calls().window_visible = true;
        Ok(())
    }

    fn hide_window(&self, _window: WindowId) -> Result<(), PlatformServicesError> {
        self.calls().window_visible = false;
        Ok(())
    }

    fn request_close(&self, _window: WindowId) -> Result<(), PlatformServicesError> {
        let mut calls = self.calls();
        calls.close_requested = true;
        calls.window_visible = false;
        Ok(())
    }

    fn request_redraw(&self, _window: WindowId) -> Result<(), PlatformServicesError> {
        self.calls().redraws += 1;
        Ok(())
    }

    fn set_cursor(&self, _cursor: CursorIcon) {}

    fn start_timer(
        &self,
        _window: WindowId,
        timer_id: u32,
        interval_ms: u32,
    ) -> Result<(), PlatformServicesError> {
        self.calls().started_timers.push((timer_id, interval_ms));
        Ok(())
    }

    fn stop_timer(&self, _window: WindowId, timer_id: u32) -> Result<(), PlatformServicesError> {
        self.calls().stopped_timers.push(timer_id);
        Ok(())
    }

    fn copy_text_to_clipboard(&self, text: &str) -> Result<(), PlatformServicesError> {
        self.calls().clipboard.push(text.to_string());
        Ok(())
    }

    fn init_tray(&self, _window: WindowId, _tooltip: &str) -> Result<(), PlatformServicesError> {
        self.calls().tray_active = true;
        Ok(())
    }

    fn cleanup_tray(&self) -> Result<(), PlatformServicesError> {
        self.calls().tray_active = false;
        Ok(())
    }

    fn set_global_hotkey(
        &self,
        _window: WindowId,
        hotkey_id: i32,
        modifiers: u32,
        key: u32,
    ) -> Result<(), PlatformServicesError> {
        self.calls().hotkeys.push((hotkey_id, modifiers, key));
        Ok(())
    }

    fn clear_global_hotkeys(&self) -> Result<(), PlatformServicesError> {
        self.calls().hotkeys.clear();
        Ok(())
    }
}

struct FakeScreen;

impl ts_capture::ScreenSource for FakeScreen {
    fn grab_screen(&self) -> anyhow::Result<RgbaImage> {
        Ok(RgbaImage::from_pixel(
            1920,
            1080,
            image::Rgba([200, 200, 200, 255]),
        ))
    }
}

struct FixedRecognizer(&'static str);

impl Recognizer for FixedRecognizer {
    fn recognize(&self, _image: &image::DynamicImage) -> anyhow::Result<String> {
        Ok(self.0.to_string())
    }
}

struct FailingRecognizer;

impl Recognizer for FailingRecognizer {
    fn recognize(&self, _image: &image::DynamicImage) -> anyhow::Result<String> {
        anyhow::bail!("recognizer crashed")
    }
}

fn new_app() -> CaptureApp<FakePlatform> {
    let config = ConfigManager::with_settings(Settings {
        save_log: false,
        ..Settings::default()
    });
    CaptureApp::new(
        FakePlatform::default(),
        WindowId::from_raw(1),
        Box::new(FakeScreen),
        config,
    )
}

fn left_down(x: i32, y: i32) -> InputEvent {
    InputEvent::MouseDown {
        x,
        y,
        button: MouseButton::Left,
    }
}

fn left_up(x: i32, y: i32) -> InputEvent {
    InputEvent::MouseUp {
        x,
        y,
        button: MouseButton::Left,
    }
}

fn debounce_fire() -> InputEvent {
    InputEvent::Timer {
        id: DEBOUNCE_TIMER_ID,
    }
}

#[test]
fn hotkey_opens_the_capture_overlay() {
    let mut app = new_app();
    app.handle_input_event(InputEvent::Hotkey { id: 1 });

    assert!(app.platform().calls().window_visible);
    assert!(app.platform().calls().redraws > 0);
}

#[test]
fn full_capture_cycle_delivers_text_and_commits_at_release() {
    let mut app = new_app();
    app.ocr().install(Box::new(FixedRecognizer("こんにちは")));

    app.handle_input_event(InputEvent::Hotkey { id: 1 });
    app.handle_input_event(left_down(100, 100));
    app.handle_input_event(InputEvent::MouseMove { x: 400, y: 300 });

    // Each move restarts the debounce timer with the quiet interval.
    assert_eq!(
        app.platform().calls().started_timers.last().copied(),
        Some((DEBOUNCE_TIMER_ID, ts_app::session::DEBOUNCE_INTERVAL_MS))
    );

    // Nothing committed while the pointer is still down.
    app.handle_input_event(debounce_fire());
    assert!(app.wait_host_event(Duration::from_secs(5)));

    assert_eq!(app.core().session().phase(), Phase::Displaying);
    assert_eq!(app.surface().text(), "こんにちは");
    assert!(app.surface().is_visible());
    assert!(app.platform().calls().clipboard.is_empty());

    // Release: commit to clipboard, tear the session down.
    app.handle_input_event(left_up(400, 300));

    assert_eq!(app.platform().calls().clipboard, vec!["こんにちは".to_string()]);
    assert!(app.platform().calls().close_requested);
    assert_eq!(app.core().session().phase(), Phase::Idle);
    assert!(!app.surface().is_visible());
}

#[test]
fn stray_timer_fire_without_stabilization_is_ignored() {
    let mut app = new_app();
    app.ocr().install(Box::new(FixedRecognizer("never")));

    app.handle_input_event(left_down(0, 0));
    // No movement yet, so there is nothing to dispatch.
    app.handle_input_event(debounce_fire());

    assert!(!app.wait_host_event(Duration::from_millis(200)));
    assert_eq!(app.surface().text(), "");
}

#[test]
fn failed_cycle_keeps_the_previous_result() {
    let mut app = new_app();
    app.ocr().install(Box::new(FixedRecognizer("first pass")));

    app.handle_input_event(left_down(10, 10));
    app.handle_input_event(InputEvent::MouseMove { x: 200, y: 200 });
    app.handle_input_event(debounce_fire());
    assert!(app.wait_host_event(Duration::from_secs(5)));
    assert_eq!(app.surface().text(), "first pass");

    // The next cycle fails; the surface must keep showing the prior text.
    app.ocr().install(Box::new(FailingRecognizer));
    app.handle_input_event(InputEvent::MouseMove { x: 220, y: 220 });
    app.handle_input_event(debounce_fire());
    assert!(app.wait_host_event(Duration::from_secs(5)));

    assert_eq!(app.surface().text(), "first pass");
    assert_eq!(app.core().session().phase(), Phase::Displaying);

    // Release still commits what is on the surface.
    app.handle_input_event(left_up(220, 220));
    assert_eq!(
        app.platform().calls().clipboard,
        vec!["first pass".to_string()]
    );
}

#[test]
fn release_before_stabilization_commits_empty_text() {
    let mut app = new_app();

    app.handle_input_event(left_down(0, 0));
    app.handle_input_event(InputEvent::MouseMove { x: 40, y: 40 });
    app.handle_input_event(left_up(40, 40));

    assert_eq!(app.platform().calls().clipboard, vec![String::new()]);
    assert!(
        app.platform()
            .calls()
            .stopped_timers
            .contains(&DEBOUNCE_TIMER_ID)
    );
}

#[test]
fn escape_cancels_and_hides_the_overlay() {
    let mut app = new_app();

    app.handle_input_event(InputEvent::Hotkey { id: 1 });
    app.handle_input_event(left_down(10, 10));
    app.handle_input_event(InputEvent::KeyDown {
        key: KeyCode::ESCAPE,
        modifiers: Modifiers::NONE,
    });

    assert!(!app.platform().calls().window_visible);
    assert_eq!(app.core().session().phase(), Phase::Idle);
    assert!(app.platform().calls().clipboard.is_empty());
}

#[test]
fn initialize_registers_tray_and_hotkey() {
    let mut app = new_app();
    app.initialize().unwrap();

    let defaults = Settings::default();
    assert!(app.platform().calls().tray_active);
    assert_eq!(
        app.platform().calls().hotkeys,
        vec![(1, defaults.hotkey_modifiers, defaults.hotkey_key)]
    );
}

#[test]
fn settings_reload_replaces_the_installed_engine() {
    let mut app = new_app();
    app.ocr().install(Box::new(FixedRecognizer("stale engine")));

    app.execute_command(Command::ReloadSettings, WindowId::from_raw(1));

    // The reload restarts the engine load; wait for its availability report.
    assert!(app.wait_host_event(Duration::from_secs(10)));

    // Whatever the restart produced, the pre-reload engine must be gone.
    let img = image::DynamicImage::new_rgba8(4, 4);
    assert_ne!(
        app.ocr().recognize(&img).unwrap_or_default(),
        "stale engine"
    );
}

#[test]
fn tray_quit_tears_everything_down() {
    let mut app = new_app();
    app.initialize().unwrap();

    app.handle_input_event(InputEvent::Tray(TrayEvent::MenuCommand(
        ts_host::constants::TRAY_CMD_QUIT,
    )));

    assert!(app.quit_requested());
    assert!(!app.platform().calls().tray_active);
    assert!(app.platform().calls().hotkeys.is_empty());
    assert!(app.platform().calls().close_requested);
}
