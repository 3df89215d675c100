//! Proximity primitives

use crate::foundation::math::Vec3;

/// Sphere used for discrete proximity tests
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingSphere {
    /// Centre in world space
    pub center: Vec3,
    /// Radius (the proximity threshold); zero means "same point only"
    pub radius: f32,
}

impl BoundingSphere {
    /// Creates a new bounding sphere with the given center and radius
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Whether the spheres touch or overlap
    pub fn intersects(&self, other: &BoundingSphere) -> bool {
        let distance_squared = (self.center - other.center).magnitude_squared();
        let radius_sum = self.radius + other.radius;
        distance_squared <= radius_sum * radius_sum
    }

    /// Whether a point lies inside or on the sphere
    pub fn contains_point(&self, point: &Vec3) -> bool {
        (point - self.center).magnitude_squared() <= self.radius * self.radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn touching_spheres_intersect() {
        let a = BoundingSphere::new(Vec3::zeros(), 1.0);
        let b = BoundingSphere::new(Vec3::new(2.0, 0.0, 0.0), 1.0);
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
    }

    #[test]
    fn separated_spheres_do_not_intersect() {
        let a = BoundingSphere::new(Vec3::zeros(), 1.0);
        let b = BoundingSphere::new(Vec3::new(0.0, 2.5, 0.0), 1.0);
        assert!(!a.intersects(&b));
    }

    #[test]
    fn zero_radius_only_hits_same_point() {
        let a = BoundingSphere::new(Vec3::new(1.0, 1.0, 1.0), 0.0);
        assert!(a.intersects(&BoundingSphere::new(Vec3::new(1.0, 1.0, 1.0), 0.0)));
        assert!(!a.intersects(&BoundingSphere::new(Vec3::new(1.0, 1.0, 1.001), 0.0)));
        assert!(a.contains_point(&Vec3::new(1.0, 1.0, 1.0)));
    }
}
