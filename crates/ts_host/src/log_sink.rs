use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use ts_settings::Settings;

use crate::constants::LOG_FILENAME;

/// Optional plain-text sink for committed recognition results.
///
/// Appends one entry per commit to `log.txt` under the configured directory.
#[derive(Debug, Clone)]
pub struct TextLog {
    enabled: bool,
    dir: PathBuf,
}

impl TextLog {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            enabled: settings.save_log,
            dir: PathBuf::from(&settings.log_path),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(LOG_FILENAME)
    }

    /// Append `text` (plus a trailing newline) if logging is enabled.
    pub fn append(&self, text: &str) -> Result<()> {
        if !self.enabled {
            return Ok(());
        }

        let path = self.path();
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("failed to open {}", path.display()))?;
        writeln!(file, "{text}").with_context(|| format!("failed to write {}", path.display()))?;
        Ok(())
    }
}
