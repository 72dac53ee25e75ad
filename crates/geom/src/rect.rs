use super::{Expanse, Point};

/// A rectangle defined by its top-left corner and a signed size. A rect with
/// a non-positive dimension is empty: it contains no points and hit tests
/// against it always miss.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Default)]
pub struct Rect {
    /// Top-left corner.
    pub tl: Point,
    /// Width.
    pub w: i32,
    /// Height.
    pub h: i32,
}

impl Rect {
    /// Construct a rectangle from coordinates and size.
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self {
            tl: Point::new(x, y),
            w,
            h,
        }
    }

    /// The zero-sized rectangle at the origin.
    pub const fn zero() -> Self {
        Self::new(0, 0, 0, 0)
    }

    /// Construct a rectangle from a corner point and a size.
    pub fn at(tl: Point, size: Expanse) -> Self {
        Self {
            tl,
            w: size.w,
            h: size.h,
        }
    }

    /// Does this rect have a zero or negative size?
    pub fn is_empty(&self) -> bool {
        self.w <= 0 || self.h <= 0
    }

    /// The size of this rectangle.
    pub fn size(&self) -> Expanse {
        Expanse {
            w: self.w,
            h: self.h,
        }
    }

    /// Left edge coordinate.
    pub fn left(&self) -> i32 {
        self.tl.x
    }

    /// Right edge coordinate (exclusive).
    pub fn right(&self) -> i32 {
        self.tl.x + self.w
    }

    /// Top edge coordinate.
    pub fn top(&self) -> i32 {
        self.tl.y
    }

    /// Bottom edge coordinate (exclusive).
    pub fn bottom(&self) -> i32 {
        self.tl.y + self.h
    }

    /// Center point. Divisions truncate, so the center of an odd-sized rect
    /// is biased toward the top-left, consistently across layout passes.
    pub fn center(&self) -> Point {
        Point {
            x: self.tl.x + self.w / 2,
            y: self.tl.y + self.h / 2,
        }
    }

    /// True if the point falls inside this rectangle. Empty rectangles
    /// contain nothing.
    pub fn contains(&self, p: Point) -> bool {
        !self.is_empty()
            && p.x >= self.left()
            && p.x < self.right()
            && p.y >= self.top()
            && p.y < self.bottom()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edges() {
        let r = Rect::new(10, 20, 200, 100);
        assert_eq!(r.left(), 10);
        assert_eq!(r.right(), 210);
        assert_eq!(r.top(), 20);
        assert_eq!(r.bottom(), 120);
        assert_eq!(r.center(), Point::new(110, 70));
    }

    #[test]
    fn contains() {
        let r = Rect::new(0, 0, 10, 10);
        assert!(r.contains(Point::new(0, 0)));
        assert!(r.contains(Point::new(9, 9)));
        assert!(!r.contains(Point::new(10, 10)));
        assert!(!r.contains(Point::new(-1, 0)));
    }

    #[test]
    fn empty_rect_misses() {
        let r = Rect::new(5, 5, 0, 10);
        assert!(r.is_empty());
        assert!(!r.contains(Point::new(5, 5)));
    }
}
