use std::ops::{Add, Mul, Sub};

/// A 2D point (or vector) in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn add(self, other: Point) -> Point {
        Point::new(self.x + other.x, self.y + other.y)
    }

    pub fn subtract(self, other: Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::add(self, rhs)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        self.subtract(rhs)
    }
}

impl Mul<f32> for Point {
    type Output = Point;

    fn mul(self, factor: f32) -> Point {
        Point::new(self.x * factor, self.y * factor)
    }
}

impl From<(f32, f32)> for Point {
    fn from((x, y): (f32, f32)) -> Self {
        Point::new(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_subtract() {
        let a = Point::new(10.0, 20.0);
        let b = Point::new(3.0, -4.0);

        assert_eq!(a.add(b), Point::new(13.0, 16.0));
        assert_eq!(a.subtract(b), Point::new(7.0, 24.0));
        assert_eq!(a + b, a.add(b));
        assert_eq!(a - b, a.subtract(b));
    }

    #[test]
    fn test_subtract_self_is_origin() {
        let p = Point::new(-12.5, 99.0);
        assert_eq!(p - p, Point::ORIGIN);
    }

    #[test]
    fn test_scale() {
        assert_eq!(Point::new(1.0, -1.0) * 20.0, Point::new(20.0, -20.0));
    }
}
