//! Canvas coordinates shared by the renderer, the layout engine and the
//! position map.

use std::ops::Add;

/// A point on the canvas in pixels. Fractional values are allowed; drawing
/// rounds to the nearest pixel.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Both coordinates truncated toward zero.
    pub fn trunc(self) -> Self {
        Self::new(self.x.trunc(), self.y.trunc())
    }

    /// Nearest whole-pixel position.
    pub fn to_pixel(self) -> (i32, i32) {
        (self.x.round() as i32, self.y.round() as i32)
    }
}

impl Add<(f32, f32)> for Point {
    type Output = Point;

    fn add(self, (dx, dy): (f32, f32)) -> Point {
        Point::new(self.x + dx, self.y + dy)
    }
}
