//! Rotation of points about a pivot.
//!
//! ## Rotation Convention
//!
//! Canvas coordinates have the Y axis pointing down, so a positive angle turns
//! clockwise on screen:
//! - 0 = no rotation
//! - π/2 = right becomes down
//! - π = upside down
//! - 3π/2 = right becomes up

use super::types::{Point, Vector};

/// A 2D rotation around a center point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rotation {
    /// Rotation angle in radians (clockwise positive on screen)
    pub radians: f64,
    /// Pivot of the rotation
    pub center: Point,
}

impl Rotation {
    pub fn new(radians: f64, center: Point) -> Self {
        Self { radians, center }
    }

    /// Check if this is effectively a no-op.
    pub fn is_identity(&self) -> bool {
        self.radians.abs() < f64::EPSILON
    }

    /// The rotation that undoes this one around the same center.
    pub fn inverse(&self) -> Self {
        Self::new(-self.radians, self.center)
    }

    /// Rotate a point around the center.
    ///
    /// ```text
    /// x' = cx + (x - cx) * cos(θ) - (y - cy) * sin(θ)
    /// y' = cy + (x - cx) * sin(θ) + (y - cy) * cos(θ)
    /// ```
    pub fn transform_point(&self, point: Point) -> Point {
        if self.is_identity() {
            return point;
        }
        self.center.translate(self.transform_vector(point.offset_from(self.center)))
    }

    /// Rotate a displacement; the center plays no part.
    pub fn transform_vector(&self, v: Vector) -> Vector {
        if self.is_identity() {
            return v;
        }
        let (sin_a, cos_a) = self.radians.sin_cos();
        Vector::new(v.dx * cos_a - v.dy * sin_a, v.dx * sin_a + v.dy * cos_a)
    }
}
