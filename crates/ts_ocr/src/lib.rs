pub mod engine;
pub mod handle;
pub mod types;

pub use engine::{TesseractRecognizer, available_languages, engine_available};
pub use handle::OcrHandle;
pub use types::{OcrConfig, Recognizer};
