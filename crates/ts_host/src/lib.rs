pub mod app;
pub mod command;
pub mod constants;
pub mod core_bridge;
pub mod executor;
pub mod host_event;
pub mod log_sink;

pub use app::{CaptureApp, style_from_settings};
pub use command::Command;
pub use executor::{CommandExecutor, CommandQueue};
pub use host_event::HostEvent;
pub use log_sink::TextLog;

/// Initialize structured logging from `RUST_LOG` (default `info`).
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .try_init();
}
