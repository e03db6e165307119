//! Axis-aligned hitbox geometry
//!
//! Hitbox offsets are authored in sprite pixels relative to an entity's anchor
//! and converted to world meters when translated to the entity's position.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A rectangle in sprite pixels, relative to an entity's anchor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PixelBox {
    pub top: f32,
    pub left: f32,
    pub width: f32,
    pub height: f32,
}

impl PixelBox {
    pub const fn new(top: f32, left: f32, width: f32, height: f32) -> Self {
        Self {
            top,
            left,
            width,
            height,
        }
    }
}

/// A world-space rectangle in meters (+y is downhill)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hitbox {
    pub top: f32,
    pub left: f32,
    pub width: f32,
    pub height: f32,
}

impl Hitbox {
    /// Far off-world, zero area. Never overlaps anything.
    pub const INVALID: Hitbox = Hitbox {
        top: -1000.0,
        left: -1000.0,
        width: 0.0,
        height: 0.0,
    };

    /// Place a pixel-space offset box at a world position
    pub fn translated(pos: Vec2, offsets: &PixelBox, pixels_per_meter: f32) -> Self {
        Self {
            top: pos.y + offsets.top / pixels_per_meter,
            left: pos.x + offsets.left / pixels_per_meter,
            width: offsets.width / pixels_per_meter,
            height: offsets.height / pixels_per_meter,
        }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    /// Zero-area boxes (including [`Hitbox::INVALID`]) are inert
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Strict overlap test; touching edges do not count
    pub fn overlaps(&self, other: &Hitbox) -> bool {
        if self.is_degenerate() || other.is_degenerate() {
            return false;
        }
        self.left < other.right()
            && self.right() > other.left
            && self.top < other.bottom()
            && self.bottom() > other.top
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn boxed(top: f32, left: f32, w: f32, h: f32) -> Hitbox {
        Hitbox {
            top,
            left,
            width: w,
            height: h,
        }
    }

    #[test]
    fn test_translated_converts_pixels_to_meters() {
        let offsets = PixelBox::new(15.0, 30.0, 45.0, 60.0);
        let hb = Hitbox::translated(Vec2::new(10.0, 20.0), &offsets, 15.0);
        assert_eq!(hb.top, 21.0);
        assert_eq!(hb.left, 12.0);
        assert_eq!(hb.width, 3.0);
        assert_eq!(hb.height, 4.0);
        assert_eq!(hb.right(), 15.0);
        assert_eq!(hb.bottom(), 25.0);
    }

    #[test]
    fn test_overlap_and_touching() {
        let a = boxed(0.0, 0.0, 2.0, 2.0);
        assert!(a.overlaps(&boxed(1.0, 1.0, 2.0, 2.0)));
        // Shared edge only
        assert!(!a.overlaps(&boxed(0.0, 2.0, 2.0, 2.0)));
        assert!(!a.overlaps(&boxed(2.0, 0.0, 2.0, 2.0)));
        assert!(!a.overlaps(&boxed(5.0, 5.0, 1.0, 1.0)));
    }

    #[test]
    fn test_invalid_never_overlaps() {
        let everything = boxed(-5000.0, -5000.0, 10000.0, 10000.0);
        assert!(!everything.overlaps(&Hitbox::INVALID));
        assert!(!Hitbox::INVALID.overlaps(&everything));
        // A zero-width sliver inside a box is still inert
        assert!(!everything.overlaps(&boxed(0.0, 0.0, 0.0, 1.0)));
    }
}
