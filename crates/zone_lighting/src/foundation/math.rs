//! Math utilities and types
//!
//! Provides the small amount of spatial math the zone adapter needs.

pub use nalgebra::Vector3;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// Axis-aligned box describing a zone entity in world space
///
/// Built from the entity's center position and full dimensions, the same
/// way the host reports them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoneBounds {
    /// Center of the box
    pub center: Vec3,
    /// Full size along each axis
    pub dimensions: Vec3,
}

impl ZoneBounds {
    /// Create bounds from a center point and full dimensions
    pub fn new(center: Vec3, dimensions: Vec3) -> Self {
        Self { center, dimensions }
    }

    /// Minimum corner
    pub fn min(&self) -> Vec3 {
        self.center - self.dimensions * 0.5
    }

    /// Maximum corner
    pub fn max(&self) -> Vec3 {
        self.center + self.dimensions * 0.5
    }

    /// Check if a point lies strictly inside the box
    ///
    /// Points exactly on a face count as outside; the host fires its own
    /// enter event once the avatar crosses the boundary.
    pub fn contains_point(&self, point: Vec3) -> bool {
        let min = self.min();
        let max = self.max();
        point.x > min.x && point.x < max.x &&
        point.y > min.y && point.y < max.y &&
        point.z > min.z && point.z < max.z
    }

    /// Specificity metric used to rank zones (sum of the dimensions)
    pub fn size_metric(&self) -> f32 {
        self.dimensions.x + self.dimensions.y + self.dimensions.z
    }
}
