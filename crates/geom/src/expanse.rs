use super::{Point, Rect, Vec2};

/// An `Expanse` is a rectangle that has a width and height but no location.
/// Dimensions are signed so that arithmetic against degenerate parent
/// rectangles stays well defined; an expanse with a non-positive dimension
/// is empty.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Default)]
pub struct Expanse {
    /// Width in pixels.
    pub w: i32,
    /// Height in pixels.
    pub h: i32,
}

impl Expanse {
    /// The largest representable expanse, used as the default size clamp.
    pub const MAX: Self = Self {
        w: i32::MAX,
        h: i32::MAX,
    };

    /// Construct an expanse from a width and height.
    pub const fn new(w: i32, h: i32) -> Self {
        Self { w, h }
    }

    /// The zero-valued expanse.
    pub const fn zero() -> Self {
        Self { w: 0, h: 0 }
    }

    /// True if either dimension is zero or negative.
    pub fn is_empty(&self) -> bool {
        self.w <= 0 || self.h <= 0
    }

    /// Return a `Rect` with the same dimensions as the `Expanse`, but a
    /// location at (0, 0).
    pub fn rect(&self) -> Rect {
        Rect {
            tl: Point::zero(),
            w: self.w,
            h: self.h,
        }
    }

    /// Component-wise clamp between two other expanses.
    pub fn clamp(&self, min: Self, max: Self) -> Self {
        Self {
            w: self.w.clamp(min.w, max.w),
            h: self.h.clamp(min.h, max.h),
        }
    }

    /// Multiply each dimension by a floating-point factor, truncating toward
    /// zero. Truncation (not rounding) keeps repeated layout passes stable.
    pub fn scale(&self, factor: Vec2) -> Self {
        Self {
            w: (self.w as f32 * factor.x) as i32,
            h: (self.h as f32 * factor.y) as i32,
        }
    }
}

impl From<Rect> for Expanse {
    fn from(r: Rect) -> Self {
        Self { w: r.w, h: r.h }
    }
}

impl From<(i32, i32)> for Expanse {
    fn from(v: (i32, i32)) -> Self {
        Self { w: v.0, h: v.1 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp() {
        let e = Expanse::new(200, 200);
        assert_eq!(
            e.clamp(Expanse::zero(), Expanse::new(50, 50)),
            Expanse::new(50, 50)
        );
        assert_eq!(
            Expanse::new(-5, 10).clamp(Expanse::zero(), Expanse::MAX),
            Expanse::new(0, 10)
        );
    }

    #[test]
    fn scale() {
        assert_eq!(
            Expanse::new(200, 100).scale(Vec2::new(0.5, 0.5)),
            Expanse::new(100, 50)
        );
        // Truncates toward zero.
        assert_eq!(
            Expanse::new(3, 3).scale(Vec2::new(0.5, 0.5)),
            Expanse::new(1, 1)
        );
    }

    #[test]
    fn empty() {
        assert!(Expanse::zero().is_empty());
        assert!(Expanse::new(-1, 10).is_empty());
        assert!(!Expanse::new(1, 1).is_empty());
    }
}
