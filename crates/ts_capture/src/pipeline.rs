use std::thread;

use crossbeam_channel::Sender;
use image::{DynamicImage, RgbaImage};

use ts_ocr::OcrHandle;

/// Recognition outcome delivered from the worker thread.
///
/// Producers only send; the receiver must be drained on the UI-owning thread before any
/// widget mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecognitionEvent {
    /// Recognition finished. `text` may be empty when the region held no text.
    Completed { text: String },
    /// Recognition failed; the cycle should be abandoned with prior output intact.
    Failed,
}

/// Dispatches recognition work off the interaction thread.
///
/// There is no queue here: the session state machine guarantees at most one dispatch is in
/// flight, so each call spawns a short-lived worker. The sender's event type is generic so
/// hosts can funnel recognition outcomes into their own event enum.
#[derive(Clone)]
pub struct RecognitionPipeline<E = RecognitionEvent>
where
    E: From<RecognitionEvent> + Send + 'static,
{
    ocr: OcrHandle,
    events: Sender<E>,
}

impl<E> RecognitionPipeline<E>
where
    E: From<RecognitionEvent> + Send + 'static,
{
    pub fn new(ocr: OcrHandle, events: Sender<E>) -> Self {
        Self { ocr, events }
    }

    pub fn ocr(&self) -> &OcrHandle {
        &self.ocr
    }

    /// Recognize `image` on a worker thread and deliver the outcome via the event channel.
    ///
    /// Failures inside the recognition capability are caught, logged, and reported as
    /// `RecognitionEvent::Failed`; they never unwind into the host.
    pub fn dispatch(&self, image: RgbaImage) {
        let ocr = self.ocr.clone();
        let events = self.events.clone();

        thread::spawn(move || {
            let dynamic = DynamicImage::ImageRgba8(image);
            let event = match ocr.recognize(&dynamic) {
                Ok(text) => RecognitionEvent::Completed { text },
                Err(e) => {
                    log::warn!("recognition failed: {e:#}");
                    RecognitionEvent::Failed
                }
            };

            // A closed receiver means the host is shutting down; nothing to deliver to.
            if events.send(E::from(event)).is_err() {
                log::debug!("recognition result dropped: host event channel closed");
            }
        });
    }
}
