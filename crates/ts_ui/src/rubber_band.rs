use ts_app::geometry::RectI32;
use ts_render::{DrawStyle, Rectangle, RenderItem, RenderList, z_order};

use crate::style::ViewStyle;

#[inline]
fn to_rectangle_f32(rect: RectI32) -> Rectangle {
    Rectangle {
        x: rect.left as f32,
        y: rect.top as f32,
        width: rect.width() as f32,
        height: rect.height() as f32,
    }
}

/// Build the render list for the capture overlay: full-window tint plus, while a selection
/// is live, the rubber-band fill and border.
pub fn build_capture_overlay_render_list(
    screen_size: (i32, i32),
    selection_rect: Option<RectI32>,
    style: &ViewStyle,
) -> RenderList {
    let mut render_list = RenderList::with_capacity(3);

    let screen_rect = Rectangle {
        x: 0.0,
        y: 0.0,
        width: screen_size.0 as f32,
        height: screen_size.1 as f32,
    };

    // 1) Window tint over the whole overlay.
    render_list.submit(RenderItem::Rectangle {
        rect: screen_rect,
        style: DrawStyle {
            stroke_color: ts_render::Color::TRANSPARENT,
            fill_color: Some(style.window_tint),
            stroke_width: 0.0,
        },
        z_order: z_order::WINDOW_TINT,
    });

    let Some(selection_rect) = selection_rect else {
        return render_list;
    };

    let band = to_rectangle_f32(selection_rect);

    // 2) Rubber-band fill.
    render_list.submit(RenderItem::Rectangle {
        rect: band,
        style: DrawStyle {
            stroke_color: ts_render::Color::TRANSPARENT,
            fill_color: Some(style.selection_fill),
            stroke_width: 0.0,
        },
        z_order: z_order::RUBBER_BAND_FILL,
    });

    // 3) Rubber-band border.
    render_list.submit(RenderItem::SelectionBorder {
        rect: band,
        color: style.border_color,
        width: style.border_thickness,
        z_order: z_order::RUBBER_BAND_BORDER,
    });

    render_list
}
