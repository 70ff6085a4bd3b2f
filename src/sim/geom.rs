//! Axis-aligned rectangle geometry
//!
//! Screen space: x grows right, y grows down. Points and velocities use
//! `glam::Vec2` (addition, scaling, `length`, and `normalize_or_zero`, which
//! returns the zero vector instead of dividing by zero).

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned bounding box. Width and height are never negative.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Aabb {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Aabb {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self::new(pos.x, pos.y, size.x, size.y)
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    #[inline]
    pub fn centerx(&self) -> f32 {
        self.x + self.width / 2.0
    }

    #[inline]
    pub fn centery(&self) -> f32 {
        self.y + self.height / 2.0
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.centerx(), self.centery())
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Point containment, half-open on the right and bottom edges
    pub fn contains_point(&self, p: Vec2) -> bool {
        p.x >= self.left() && p.x < self.right() && p.y >= self.top() && p.y < self.bottom()
    }
}

/// A horizontal span `[start, end)` on the x axis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Span {
    pub start: f32,
    pub end: f32,
}

impl Span {
    pub fn new(start: f32, end: f32) -> Self {
        Self {
            start: start.min(end),
            end: start.max(end),
        }
    }

    /// True if `[left, right]` lies entirely inside the span
    pub fn covers(&self, left: f32, right: f32) -> bool {
        left >= self.start && right <= self.end
    }

    pub fn contains(&self, x: f32) -> bool {
        x >= self.start && x < self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges_and_centers() {
        let r = Aabb::new(10.0, 20.0, 40.0, 60.0);
        assert_eq!(r.left(), 10.0);
        assert_eq!(r.right(), 50.0);
        assert_eq!(r.top(), 20.0);
        assert_eq!(r.bottom(), 80.0);
        assert_eq!(r.centerx(), 30.0);
        assert_eq!(r.centery(), 50.0);
    }

    #[test]
    fn test_negative_size_clamped() {
        let r = Aabb::new(0.0, 0.0, -5.0, -1.0);
        assert_eq!(r.width, 0.0);
        assert_eq!(r.height, 0.0);
    }

    #[test]
    fn test_zero_vector_normalizes_to_zero() {
        assert_eq!(Vec2::ZERO.normalize_or_zero(), Vec2::ZERO);
        let v = Vec2::new(3.0, 4.0);
        assert!((v.length() - 5.0).abs() < 1e-6);
        assert!((v.normalize_or_zero().length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_span_covers() {
        let pit = Span::new(700.0, 600.0);
        assert_eq!(pit.start, 600.0);
        assert!(pit.covers(610.0, 650.0));
        assert!(!pit.covers(590.0, 630.0));
        assert!(pit.contains(600.0));
        assert!(!pit.contains(700.0));
    }
}
