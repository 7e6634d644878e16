//! Axis-aligned rectangles and the overlap test shared by every collision.

/// Screen-space rectangle, top-left anchored, in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        debug_assert!(width > 0 && height > 0);
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// One past the rightmost column.
    pub const fn right(&self) -> i32 {
        self.x + self.width
    }

    /// One past the bottom row.
    pub const fn bottom(&self) -> i32 {
        self.y + self.height
    }
}

/// Half-open AABB overlap. Rectangles that only share an edge do not overlap.
pub const fn overlaps(a: Rect, b: Rect) -> bool {
    a.x < b.right() && a.right() > b.x && a.y < b.bottom() && a.bottom() > b.y
}
