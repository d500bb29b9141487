use std::collections::HashMap;

use anyhow::Result;
use image::DynamicImage;

use crate::types::{OcrConfig, Recognizer};

/// Tesseract-backed recognizer.
///
/// Shells out through `rusty-tesseract`, so a `tesseract` binary with the configured
/// language pack must be installed on the machine.
#[derive(Debug, Clone)]
pub struct TesseractRecognizer {
    config: OcrConfig,
}

impl TesseractRecognizer {
    pub fn new(config: OcrConfig) -> Self {
        Self { config }
    }

    pub fn language(&self) -> &str {
        &self.config.language
    }

    fn args(&self, dpi: i32) -> rusty_tesseract::Args {
        let mut config_variables = HashMap::new();
        if let Some(dir) = &self.config.tessdata_dir {
            config_variables.insert(
                "tessdata-dir".to_string(),
                dir.to_string_lossy().to_string(),
            );
        }

        rusty_tesseract::Args {
            lang: self.config.language.clone(),
            config_variables,
            dpi: Some(dpi),
            psm: Some(self.config.psm),
            oem: Some(self.config.oem),
        }
    }
}

/// Upscale small captures so Tesseract sees glyphs at a workable size.
fn prepare_image(image: &DynamicImage) -> (DynamicImage, i32) {
    let min_dimension = image.width().min(image.height());

    let factor = if min_dimension < 100 {
        4
    } else if min_dimension < 200 {
        2
    } else {
        1
    };

    if factor == 1 {
        return (image.clone(), 150);
    }

    let scaled = image.resize(
        image.width() * factor,
        image.height() * factor,
        image::imageops::FilterType::Lanczos3,
    );
    (scaled, 300)
}

impl Recognizer for TesseractRecognizer {
    fn recognize(&self, image: &DynamicImage) -> Result<String> {
        let (prepared, dpi) = prepare_image(image);

        let tess_img = rusty_tesseract::Image::from_dynamic_image(&prepared)
            .map_err(|e| anyhow::anyhow!("failed to build tesseract image: {e}"))?;

        let text = rusty_tesseract::image_to_string(&tess_img, &self.args(dpi))
            .map_err(|e| anyhow::anyhow!("tesseract recognition failed: {e}"))?;

        Ok(text.trim_end().to_string())
    }
}

/// True when a usable tesseract installation is present.
pub fn engine_available() -> bool {
    rusty_tesseract::get_tesseract_version().is_ok()
}

/// List installed tesseract language packs.
pub fn available_languages() -> Vec<String> {
    rusty_tesseract::get_tesseract_langs().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_images_are_upscaled_for_recognition() {
        let img = DynamicImage::new_rgba8(50, 40);
        let (prepared, dpi) = prepare_image(&img);
        assert_eq!(prepared.height(), 160);
        assert_eq!(dpi, 300);

        let img = DynamicImage::new_rgba8(500, 400);
        let (prepared, dpi) = prepare_image(&img);
        assert_eq!(prepared.width(), 500);
        assert_eq!(dpi, 150);
    }

    #[test]
    fn tessdata_dir_lands_in_config_variables() {
        let mut config = OcrConfig::new("jpn");
        config.tessdata_dir = Some("/opt/tessdata".into());
        let rec = TesseractRecognizer::new(config);

        let args = rec.args(150);
        assert_eq!(args.lang, "jpn");
        assert_eq!(
            args.config_variables.get("tessdata-dir").map(String::as_str),
            Some("/opt/tessdata")
        );
    }
}
