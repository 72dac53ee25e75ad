//! Geometry primitives used across trellis.

/// Width/height size type.
mod expanse;
/// Point helpers.
mod point;
/// Rectangle operations.
mod rect;
/// Floating-point pair for relative sizes and scale factors.
mod vec2;

pub use expanse::Expanse;
pub use point::Point;
pub use rect::Rect;
pub use vec2::Vec2;
