/// Platform-neutral integer rectangle.
///
/// Stored as left/top/right/bottom in overlay-local coordinates. Constructors keep the
/// rectangle normalized (left <= right, top <= bottom) so width and height are never
/// negative regardless of drag direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RectI32 {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl RectI32 {
    /// Construct a normalized rectangle from two corner points (in any order).
    #[inline]
    pub fn from_points(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self {
            left: x1.min(x2),
            top: y1.min(y2),
            right: x1.max(x2),
            bottom: y1.max(y2),
        }
    }

    /// Zero-size rectangle anchored at a single point.
    #[inline]
    pub fn at_point(x: i32, y: i32) -> Self {
        Self::from_points(x, y, x, y)
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }

    /// True when the rectangle encloses no pixels.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// Intersect with a `width x height` screen starting at the origin.
    ///
    /// Returns `None` when nothing of the rectangle lies on the screen.
    pub fn clamped_to_screen(&self, width: u32, height: u32) -> Option<RectI32> {
        let clamped = RectI32 {
            left: self.left.clamp(0, width as i32),
            top: self.top.clamp(0, height as i32),
            right: self.right.clamp(0, width as i32),
            bottom: self.bottom.clamp(0, height as i32),
        };

        if clamped.is_empty() {
            None
        } else {
            Some(clamped)
        }
    }
}
