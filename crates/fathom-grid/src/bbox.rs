//! Axis-aligned bounding boxes spanning a grid's world-space extent.

use glam::{DVec2, DVec3};

/// An axis-aligned 2-D box given by its lower and upper corners.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BoundingBox2 {
    /// Corner with the smallest coordinate on every axis.
    pub lower_corner: DVec2,
    /// Corner with the largest coordinate on every axis.
    pub upper_corner: DVec2,
}

impl BoundingBox2 {
    /// Create a box from two corners.
    pub fn new(lower_corner: DVec2, upper_corner: DVec2) -> Self {
        Self {
            lower_corner,
            upper_corner,
        }
    }

    /// Extent along x.
    pub fn width(&self) -> f64 {
        self.upper_corner.x - self.lower_corner.x
    }

    /// Extent along y.
    pub fn height(&self) -> f64 {
        self.upper_corner.y - self.lower_corner.y
    }

    /// Center of the box.
    pub fn mid_point(&self) -> DVec2 {
        (self.lower_corner + self.upper_corner) * 0.5
    }

    /// Returns `true` if `point` lies inside the box, boundary included.
    pub fn contains(&self, point: DVec2) -> bool {
        point.cmpge(self.lower_corner).all() && point.cmple(self.upper_corner).all()
    }
}

/// An axis-aligned 3-D box given by its lower and upper corners.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BoundingBox3 {
    /// Corner with the smallest coordinate on every axis.
    pub lower_corner: DVec3,
    /// Corner with the largest coordinate on every axis.
    pub upper_corner: DVec3,
}

impl BoundingBox3 {
    /// Create a box from two corners.
    pub fn new(lower_corner: DVec3, upper_corner: DVec3) -> Self {
        Self {
            lower_corner,
            upper_corner,
        }
    }

    /// Extent along x.
    pub fn width(&self) -> f64 {
        self.upper_corner.x - self.lower_corner.x
    }

    /// Extent along y.
    pub fn height(&self) -> f64 {
        self.upper_corner.y - self.lower_corner.y
    }

    /// Extent along z.
    pub fn depth(&self) -> f64 {
        self.upper_corner.z - self.lower_corner.z
    }

    /// Center of the box.
    pub fn mid_point(&self) -> DVec3 {
        (self.lower_corner + self.upper_corner) * 0.5
    }

    /// Returns `true` if `point` lies inside the box, boundary included.
    pub fn contains(&self, point: DVec3) -> bool {
        point.cmpge(self.lower_corner).all() && point.cmple(self.upper_corner).all()
    }
}
