pub mod result_surface;
pub mod rubber_band;
pub mod style;

pub use result_surface::{ResultSurface, SurfaceLayout};
pub use rubber_band::build_capture_overlay_render_list;
pub use style::ViewStyle;
