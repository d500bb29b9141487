use ts_render::Color;

/// Passive style bag consumed by the capture overlay and result surface.
///
/// Owned by the settings collaborator; the views only read it. Pushing a changed style goes
/// through `ResultSurface::apply_style`.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewStyle {
    // Result preview
    pub font_family: String,
    pub font_size: f32,
    pub text_color: Color,
    pub background: Color,
    pub padding: f32,

    // Selection rubber band
    pub border_color: Color,
    pub border_thickness: f32,
    pub selection_fill: Color,
    pub window_tint: Color,
}

impl Default for ViewStyle {
    fn default() -> Self {
        Self {
            font_family: "Arial".to_string(),
            font_size: 16.0,
            text_color: Color::from_rgba8(239, 240, 241, 255),
            background: Color::from_rgba8(72, 75, 106, 230),
            padding: 10.0,

            border_color: Color::from_rgba8(0, 128, 255, 255),
            border_thickness: 2.0,
            selection_fill: Color::from_rgba8(0, 128, 255, 60),
            window_tint: Color::from_rgba8(255, 255, 255, 13),
        }
    }
}
