pub mod render_list;
pub mod types;

pub use render_list::{RenderBackend, RenderItem, RenderList, z_order};
pub use types::{Color, DrawStyle, Point, Rectangle, TextStyle};
