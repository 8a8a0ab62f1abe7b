/// Axis-aligned integer rectangle (top-left origin).
///
/// Zero or negative width/height is a degenerate rectangle: it contains no
/// pixels and drawing it is a no-op.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    #[inline]
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Rectangle anchored at the origin.
    #[inline]
    pub const fn from_size(w: u32, h: u32) -> Self {
        Self::new(0, 0, clamp_dim(w), clamp_dim(h))
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.w <= 0 || self.h <= 0
    }

    /// Exclusive right edge.
    #[inline]
    pub const fn right(self) -> i32 {
        self.x.saturating_add(self.w)
    }

    /// Exclusive bottom edge.
    #[inline]
    pub const fn bottom(self) -> i32 {
        self.y.saturating_add(self.h)
    }

    /// Half-open containment: [min, max).
    #[inline]
    pub const fn contains(self, x: i32, y: i32) -> bool {
        x >= self.x && y >= self.y && x < self.right() && y < self.bottom()
    }

    /// Overlapping region, or `None` when the rectangles share no pixel.
    #[inline]
    pub fn intersect(self, other: Rect) -> Option<Rect> {
        if self.is_empty() || other.is_empty() {
            return None;
        }

        let x0 = self.x.max(other.x);
        let y0 = self.y.max(other.y);
        let x1 = self.right().min(other.right());
        let y1 = self.bottom().min(other.bottom());

        if x1 <= x0 || y1 <= y0 {
            None
        } else {
            Some(Rect::new(x0, y0, x1 - x0, y1 - y0))
        }
    }
}

const fn clamp_dim(v: u32) -> i32 {
    if v > i32::MAX as u32 { i32::MAX } else { v as i32 }
}
