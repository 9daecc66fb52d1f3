// src/geometry.rs

use bytemuck::{Pod, Zeroable};

/// A point in screen space (pixels, origin top-left).
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, Pod, Zeroable, PartialEq)]
pub struct Point2 {
    pub x: f32,
    pub y: f32,
}

impl Point2 {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Moves `t` of the way from `self` towards `target`.
    pub fn lerp(&self, target: &Point2, t: f32) -> Point2 {
        Point2::new(
            self.x + (target.x - self.x) * t,
            self.y + (target.y - self.y) * t,
        )
    }

    pub fn distance(&self, other: &Point2) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}
