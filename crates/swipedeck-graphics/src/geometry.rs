//! Geometric primitives: Point, Size, CardTransform

use std::ops::{Add, AddAssign, Sub};

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    /// Euclidean length of the vector from the origin to this point.
    pub fn magnitude(&self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    pub fn dot(&self, other: Point) -> f32 {
        self.x * other.x + self.y * other.y
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl AddAssign for Point {
    fn add_assign(&mut self, rhs: Point) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub const ZERO: Size = Size {
        width: 0.0,
        height: 0.0,
    };
}

/// Visual transform applied to one card by the host renderer.
///
/// Translation is in logical pixels relative to the card's rest position,
/// rotation in degrees around the card center, alpha in [0, 1].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CardTransform {
    pub translation: Point,
    pub rotation_degrees: f32,
    pub alpha: f32,
}

impl Default for CardTransform {
    fn default() -> Self {
        Self {
            translation: Point::ZERO,
            rotation_degrees: 0.0,
            alpha: 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_arithmetic() {
        let a = Point::new(3.0, 4.0);
        let b = Point::new(1.0, -2.0);
        assert_eq!(a + b, Point::new(4.0, 2.0));
        assert_eq!(a - b, Point::new(2.0, 6.0));
        assert_eq!(a.magnitude(), 5.0);
    }

    #[test]
    fn default_transform_is_identity() {
        let transform = CardTransform::default();
        assert_eq!(transform.translation, Point::ZERO);
        assert_eq!(transform.rotation_degrees, 0.0);
        assert_eq!(transform.alpha, 1.0);
    }
}
