use std::ops::{Add, Mul, Sub};

/// A floating-point pair, used for relative sizes, relative offsets and
/// scale factors.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2 {
    /// Horizontal component.
    pub x: f32,
    /// Vertical component.
    pub y: f32,
}

impl Vec2 {
    /// The zero vector.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };
    /// The unit vector, the identity for component-wise multiplication.
    pub const ONE: Self = Self { x: 1.0, y: 1.0 };

    /// Construct a vector from components.
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Construct a vector with both components equal.
    pub const fn splat(v: f32) -> Self {
        Self { x: v, y: v }
    }

    /// Approximate equality, used to short-circuit no-op property sets.
    pub fn nearly_equals(&self, other: Self) -> bool {
        (self.x - other.x).abs() < f32::EPSILON && (self.y - other.y).abs() < f32::EPSILON
    }
}

impl Add for Vec2 {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl Sub for Vec2 {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

/// Component-wise multiplication, as used for scale composition.
impl Mul for Vec2 {
    type Output = Self;

    fn mul(self, other: Self) -> Self {
        Self {
            x: self.x * other.x,
            y: self.y * other.y,
        }
    }
}

impl From<(f32, f32)> for Vec2 {
    #[inline]
    fn from(v: (f32, f32)) -> Self {
        Self { x: v.0, y: v.1 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compose() {
        let s = Vec2::splat(2.0) * Vec2::splat(3.0) * Vec2::ONE;
        assert!(s.nearly_equals(Vec2::splat(6.0)));
    }

    #[test]
    fn nearly_equals() {
        assert!(Vec2::ONE.nearly_equals(Vec2::new(1.0, 1.0)));
        assert!(!Vec2::ONE.nearly_equals(Vec2::new(1.0, 1.1)));
    }
}
