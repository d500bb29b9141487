use ts_capture::RecognitionEvent;

/// Events posted to the UI thread from background threads.
///
/// Worker threads never touch the model or the platform; they send one of
/// these over the host channel and the UI thread folds it into the reducer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEvent {
    Recognition(RecognitionEvent),
    /// The OCR engine finished loading (or failed to).
    OcrAvailabilityChanged { available: bool },
}

impl From<RecognitionEvent> for HostEvent {
    fn from(event: RecognitionEvent) -> Self {
        HostEvent::Recognition(event)
    }
}
