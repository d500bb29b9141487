use std::sync::Arc;
use std::thread;

use anyhow::Result;
use image::DynamicImage;
use parking_lot::Mutex;

use crate::types::Recognizer;

/// Engine slot: the "not yet loaded" state is explicit rather than a null check.
enum EngineSlot {
    NotLoaded,
    Ready(Box<dyn Recognizer>),
}

/// Process-scoped shared handle to the recognition engine.
///
/// One instance is created at startup and cloned into the pipeline. The engine itself is
/// loaded lazily (model/engine startup can be slow) and shared read-only afterwards.
#[derive(Clone)]
pub struct OcrHandle {
    slot: Arc<Mutex<EngineSlot>>,
}

impl Default for OcrHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl OcrHandle {
    pub fn new() -> Self {
        Self {
            slot: Arc::new(Mutex::new(EngineSlot::NotLoaded)),
        }
    }

    /// Install an already-constructed recognizer (used by tests and by hosts that load
    /// synchronously).
    pub fn install(&self, recognizer: Box<dyn Recognizer>) {
        *self.slot.lock() = EngineSlot::Ready(recognizer);
    }

    /// Load the engine on a background thread.
    ///
    /// `on_loaded` runs on the loader thread with the availability outcome; hosts forward it
    /// to the UI thread through their event channel.
    pub fn load_in_background<F, C>(&self, factory: F, on_loaded: C)
    where
        F: FnOnce() -> Result<Box<dyn Recognizer>> + Send + 'static,
        C: FnOnce(bool) + Send + 'static,
    {
        let slot = Arc::clone(&self.slot);
        thread::spawn(move || {
            {
                let guard = slot.lock();
                if matches!(*guard, EngineSlot::Ready(_)) {
                    drop(guard);
                    on_loaded(true);
                    return;
                }
            }

            match factory() {
                Ok(recognizer) => {
                    *slot.lock() = EngineSlot::Ready(recognizer);
                    on_loaded(true);
                }
                Err(e) => {
                    log::warn!("OCR engine failed to load: {e:#}");
                    on_loaded(false);
                }
            }
        });
    }

    /// Drop the engine, returning the handle to the not-loaded state.
    pub fn unload(&self) {
        *self.slot.lock() = EngineSlot::NotLoaded;
    }

    pub fn is_ready(&self) -> bool {
        matches!(*self.slot.lock(), EngineSlot::Ready(_))
    }

    /// Run one recognition. An unloaded engine is an error so the caller can abandon the
    /// cycle instead of blocking on a load.
    pub fn recognize(&self, image: &DynamicImage) -> Result<String> {
        let guard = self.slot.lock();
        match &*guard {
            EngineSlot::NotLoaded => Err(anyhow::anyhow!("OCR engine not loaded")),
            EngineSlot::Ready(recognizer) => recognizer.recognize(image),
        }
    }
}
