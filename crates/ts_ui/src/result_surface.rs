use ts_app::geometry::RectI32;
use ts_render::{DrawStyle, Point, Rectangle, RenderItem, RenderList, TextStyle, z_order};

use crate::style::ViewStyle;

/// Gap between the selection rectangle and the result surface.
const SURFACE_MARGIN: f32 = 8.0;

/// Line height as a multiple of the font size.
const LINE_HEIGHT_FACTOR: f32 = 1.4;

/// Estimated glyph advance. CJK and other wide glyphs advance a full em; the rest roughly
/// half. Good enough for a size-to-fit overlay without a text shaper.
fn glyph_advance(c: char, font_size: f32) -> f32 {
    if c.is_ascii() {
        font_size * 0.55
    } else {
        font_size
    }
}

fn line_width(line: &str, font_size: f32) -> f32 {
    line.chars().map(|c| glyph_advance(c, font_size)).sum()
}

/// Word-wrapped, size-to-fit layout for the surface text.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceLayout {
    pub lines: Vec<String>,
    pub width: f32,
    pub height: f32,
}

/// Greedy word wrap bounded by `max_text_width`; words wider than the bound are broken at
/// glyph granularity.
fn wrap_text(text: &str, font_size: f32, max_text_width: f32) -> Vec<String> {
    let mut lines = Vec::new();

    for raw_line in text.lines() {
        if raw_line.is_empty() {
            lines.push(String::new());
            continue;
        }

        let mut current = String::new();
        let mut current_width = 0.0;

        for word in raw_line.split_whitespace() {
            let word_width = line_width(word, font_size);
            let space_width = glyph_advance(' ', font_size);

            let fits =
                current.is_empty() || current_width + space_width + word_width <= max_text_width;

            if fits && !current.is_empty() {
                current.push(' ');
                current_width += space_width;
            } else if !fits {
                lines.push(std::mem::take(&mut current));
                current_width = 0.0;
            }

            if word_width > max_text_width {
                // Break an over-long word at glyph granularity.
                for c in word.chars() {
                    let advance = glyph_advance(c, font_size);
                    if current_width + advance > max_text_width && !current.is_empty() {
                        lines.push(std::mem::take(&mut current));
                        current_width = 0.0;
                    }
                    current.push(c);
                    current_width += advance;
                }
            } else {
                current.push_str(word);
                current_width += word_width;
            }
        }

        lines.push(current);
    }

    if lines.is_empty() {
        lines.push(String::new());
    }

    lines
}

/// The transient overlay that shows the latest recognized text.
///
/// Hidden before the first stabilization and at session end. Holds its style by value; the
/// settings collaborator pushes updates through `apply_style`.
#[derive(Debug, Clone, Default)]
pub struct ResultSurface {
    text: String,
    visible: bool,
    style: ViewStyle,
}

impl ResultSurface {
    pub fn new(style: ViewStyle) -> Self {
        Self {
            text: String::new(),
            visible: false,
            style,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn style(&self) -> &ViewStyle {
        &self.style
    }

    /// Clear and show (prepares the surface for a new capture cycle).
    pub fn show(&mut self) {
        self.text.clear();
        self.visible = true;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    /// Replace the displayed text; the surface resizes on the next layout.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Apply a (possibly changed) view style. Idempotent.
    pub fn apply_style(&mut self, style: ViewStyle) {
        self.style = style;
    }

    /// Compute the word-wrapped size-to-fit layout, bounded by the screen width.
    pub fn layout(&self, screen_size: (i32, i32)) -> SurfaceLayout {
        let padding = self.style.padding;
        let max_text_width = (screen_size.0 as f32 / 2.0 - 2.0 * padding).max(self.style.font_size);

        let lines = wrap_text(&self.text, self.style.font_size, max_text_width);

        let widest = lines
            .iter()
            .map(|l| line_width(l, self.style.font_size))
            .fold(0.0_f32, f32::max);

        let line_height = self.style.font_size * LINE_HEIGHT_FACTOR;

        SurfaceLayout {
            width: widest + 2.0 * padding,
            height: lines.len() as f32 * line_height + 2.0 * padding,
            lines,
        }
    }

    /// Surface origin: below the selection, flipped above when it would leave the screen,
    /// and clamped horizontally.
    pub fn placement(
        &self,
        selection: RectI32,
        layout: &SurfaceLayout,
        screen_size: (i32, i32),
    ) -> Point {
        let screen_w = screen_size.0 as f32;
        let screen_h = screen_size.1 as f32;

        let mut x = selection.left as f32;
        let mut y = selection.bottom as f32 + SURFACE_MARGIN;

        if y + layout.height > screen_h {
            y = (selection.top as f32 - SURFACE_MARGIN - layout.height).max(0.0);
        }
        if x + layout.width > screen_w {
            x = (screen_w - layout.width).max(0.0);
        }

        Point::new(x, y)
    }

    /// Build the render items for the surface (panel + text lines), or nothing while hidden.
    pub fn build_render_list(
        &self,
        selection: Option<RectI32>,
        screen_size: (i32, i32),
    ) -> RenderList {
        let mut render_list = RenderList::new();
        if !self.visible {
            return render_list;
        }
        let Some(selection) = selection else {
            return render_list;
        };

        let layout = self.layout(screen_size);
        let origin = self.placement(selection, &layout, screen_size);

        render_list.submit(RenderItem::RoundedRectangle {
            rect: Rectangle::new(origin.x, origin.y, layout.width, layout.height),
            radius: 4.0,
            style: DrawStyle {
                stroke_color: ts_render::Color::TRANSPARENT,
                fill_color: Some(self.style.background),
                stroke_width: 0.0,
            },
            z_order: z_order::RESULT_PANEL,
        });

        let line_height = self.style.font_size * LINE_HEIGHT_FACTOR;
        let text_style = TextStyle {
            font_size: self.style.font_size,
            color: self.style.text_color,
            font_family: self.style.font_family.clone(),
        };

        for (i, line) in layout.lines.iter().enumerate() {
            render_list.submit(RenderItem::Text {
                text: line.clone(),
                position: Point::new(
                    origin.x + self.style.padding,
                    origin.y + self.style.padding + i as f32 * line_height,
                ),
                style: text_style.clone(),
                z_order: z_order::RESULT_TEXT,
            });
        }

        render_list
    }
}
