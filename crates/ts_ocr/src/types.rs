use anyhow::Result;
use image::DynamicImage;
use std::path::PathBuf;

/// The external recognition capability.
///
/// Implementations run on a worker thread; they must not touch UI state. A failure is
/// recovered by the pipeline as an abandoned cycle, never propagated as a crash.
pub trait Recognizer: Send + Sync {
    fn recognize(&self, image: &DynamicImage) -> Result<String>;
}

/// Host-provided OCR configuration.
#[derive(Debug, Clone)]
pub struct OcrConfig {
    /// Tesseract language identifier (e.g. "eng", "jpn").
    pub language: String,
    /// Page segmentation mode. Defaults to fully automatic.
    pub psm: i32,
    /// OCR engine mode.
    pub oem: i32,
    /// Optional tessdata directory override.
    pub tessdata_dir: Option<PathBuf>,
}

impl OcrConfig {
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            psm: 3,
            oem: 3,
            tessdata_dir: None,
        }
    }
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self::new("eng")
    }
}
