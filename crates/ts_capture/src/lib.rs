pub mod pipeline;
pub mod snapshot;

pub use pipeline::{RecognitionEvent, RecognitionPipeline};
pub use snapshot::{ScreenSource, SnapshotError, capture_region};
