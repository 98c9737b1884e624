//! Axis-aligned rectangle geometry
//!
//! Every entity in the playfield is a box anchored at its top-left corner:
//! - x, y: top-left corner (y grows downward)
//! - w, h: extent along each axis

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle in screen space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Build from a top-left position and a size
    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self::new(pos.x, pos.y, size.x, size.y)
    }

    /// Right edge
    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    /// Bottom edge
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    /// Center point
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// Whether the top edge has left the visible vertical range
    pub fn is_off_screen_vertical(&self, screen_height: f32) -> bool {
        self.y < 0.0 || self.y > screen_height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges_and_center() {
        let r = Rect::new(10.0, 20.0, 40.0, 30.0);
        assert_eq!(r.right(), 50.0);
        assert_eq!(r.bottom(), 50.0);
        assert_eq!(r.center(), Vec2::new(30.0, 35.0));
    }

    #[test]
    fn test_off_screen_vertical() {
        assert!(Rect::new(0.0, -0.5, 4.0, 10.0).is_off_screen_vertical(600.0));
        assert!(Rect::new(0.0, 600.5, 4.0, 10.0).is_off_screen_vertical(600.0));
        assert!(!Rect::new(0.0, 0.0, 4.0, 10.0).is_off_screen_vertical(600.0));
        assert!(!Rect::new(0.0, 600.0, 4.0, 10.0).is_off_screen_vertical(600.0));
    }
}
