use crate::types::{Color, DrawStyle, Point, Rectangle, TextStyle};

/// Platform-specific backend that executes render items.
pub trait RenderBackend {
    type Error;

    fn draw_rectangle(&mut self, rect: Rectangle, style: &DrawStyle) -> Result<(), Self::Error>;

    fn draw_rounded_rectangle(
        &mut self,
        rect: Rectangle,
        radius: f32,
        style: &DrawStyle,
    ) -> Result<(), Self::Error>;

    fn draw_text(
        &mut self,
        text: &str,
        position: Point,
        style: &TextStyle,
    ) -> Result<(), Self::Error>;

    /// Fill the screen outside the selection with the mask color.
    fn draw_selection_mask(
        &mut self,
        screen_rect: Rectangle,
        selection_rect: Rectangle,
        mask_color: Color,
    ) -> Result<(), Self::Error>;

    fn draw_selection_border(
        &mut self,
        rect: Rectangle,
        color: Color,
        width: f32,
    ) -> Result<(), Self::Error>;
}

/// Render primitive.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderItem {
    Rectangle {
        rect: Rectangle,
        style: DrawStyle,
        z_order: i32,
    },

    RoundedRectangle {
        rect: Rectangle,
        radius: f32,
        style: DrawStyle,
        z_order: i32,
    },

    Text {
        text: String,
        position: Point,
        style: TextStyle,
        z_order: i32,
    },

    /// Translucent mask over everything outside the selection.
    SelectionMask {
        screen_rect: Rectangle,
        selection_rect: Rectangle,
        mask_color: Color,
        z_order: i32,
    },

    /// Rubber-band border.
    SelectionBorder {
        rect: Rectangle,
        color: Color,
        width: f32,
        z_order: i32,
    },
}

impl RenderItem {
    pub fn z_order(&self) -> i32 {
        match self {
            RenderItem::Rectangle { z_order, .. } => *z_order,
            RenderItem::RoundedRectangle { z_order, .. } => *z_order,
            RenderItem::Text { z_order, .. } => *z_order,
            RenderItem::SelectionMask { z_order, .. } => *z_order,
            RenderItem::SelectionBorder { z_order, .. } => *z_order,
        }
    }
}

/// Z-order layer constants for the capture overlay.
pub mod z_order {
    /// Full-window tint.
    pub const WINDOW_TINT: i32 = 0;
    /// Screen mask outside the rubber band.
    pub const MASK: i32 = 100;
    /// Rubber-band fill.
    pub const RUBBER_BAND_FILL: i32 = 200;
    /// Rubber-band border.
    pub const RUBBER_BAND_BORDER: i32 = 300;
    /// Result-surface panel.
    pub const RESULT_PANEL: i32 = 400;
    /// Result-surface text.
    pub const RESULT_TEXT: i32 = 500;
}

/// Ordered list of render items for one frame.
#[derive(Debug, Clone, Default)]
pub struct RenderList {
    items: Vec<RenderItem>,
}

impl RenderList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
        }
    }

    pub fn submit(&mut self, item: RenderItem) {
        self.items.push(item);
    }

    pub fn extend(&mut self, other: RenderList) {
        self.items.extend(other.items);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RenderItem> {
        self.items.iter()
    }

    /// Execute all items against a backend in ascending z-order.
    pub fn execute<B: RenderBackend>(&mut self, backend: &mut B) -> Result<(), B::Error> {
        self.items.sort_by_key(|item| item.z_order());

        for item in &self.items {
            match item {
                RenderItem::Rectangle { rect, style, .. } => {
                    backend.draw_rectangle(*rect, style)?;
                }
                RenderItem::RoundedRectangle {
                    rect,
                    radius,
                    style,
                    ..
                } => {
                    backend.draw_rounded_rectangle(*rect, *radius, style)?;
                }
                RenderItem::Text {
                    text,
                    position,
                    style,
                    ..
                } => {
                    backend.draw_text(text, *position, style)?;
                }
                RenderItem::SelectionMask {
                    screen_rect,
                    selection_rect,
                    mask_color,
                    ..
                } => {
                    backend.draw_selection_mask(*screen_rect, *selection_rect, *mask_color)?;
                }
                RenderItem::SelectionBorder {
                    rect, color, width, ..
                } => {
                    backend.draw_selection_border(*rect, *color, *width)?;
                }
            }
        }

        Ok(())
    }
}
