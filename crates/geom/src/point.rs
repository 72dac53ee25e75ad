use std::ops::{Add, AddAssign, Neg, Sub};

/// A point in screen space. Coordinates are signed so that anchor and pivot
/// math can move rectangles past the top or left edge of the screen.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Default)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: i32,
    /// Vertical coordinate.
    pub y: i32,
}

impl Point {
    /// Construct a point from coordinates.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The origin.
    pub const fn zero() -> Self {
        Self { x: 0, y: 0 }
    }

    /// True if both coordinates are zero.
    pub fn is_zero(&self) -> bool {
        self.x == 0 && self.y == 0
    }
}

impl Add for Point {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl AddAssign for Point {
    fn add_assign(&mut self, other: Self) {
        self.x += other.x;
        self.y += other.y;
    }
}

impl Sub for Point {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

impl Neg for Point {
    type Output = Self;

    fn neg(self) -> Self {
        Self {
            x: -self.x,
            y: -self.y,
        }
    }
}

impl From<(i32, i32)> for Point {
    #[inline]
    fn from(v: (i32, i32)) -> Self {
        Self { x: v.0, y: v.1 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arithmetic() {
        assert_eq!(Point::zero() + Point::new(1, 2), Point::new(1, 2));
        assert_eq!(Point::new(5, 5) - Point::new(1, 2), Point::new(4, 3));
        assert_eq!(-Point::new(3, -4), Point::new(-3, 4));
        assert!(Point::zero().is_zero());
        assert!(!Point::new(0, 1).is_zero());
    }
}
