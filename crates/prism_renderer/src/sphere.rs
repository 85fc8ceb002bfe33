//! Sphere primitive for ray tracing.

use crate::hittable::{HitRecord, Hittable};
use crate::MaterialId;
use prism_math::{Interval, Ray, Vec3};

/// A sphere primitive.
///
/// The radius is kept as given. A negative radius flips the outward normal,
/// which is handy for modelling the inner wall of a hollow glass ball.
#[derive(Debug, Clone, PartialEq)]
pub struct Sphere {
    center: Vec3,
    radius: f32,
    material: MaterialId,
}

impl Sphere {
    /// Create a new sphere.
    pub fn new(center: Vec3, radius: f32, material: MaterialId) -> Self {
        Self {
            center,
            radius,
            material,
        }
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn material(&self) -> MaterialId {
        self.material
    }
}

impl Hittable for Sphere {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord> {
        let oc = ray.origin() - self.center;
        let a = ray.direction().length_squared();
        let half_b = oc.dot(ray.direction());
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = half_b * half_b - a * c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrtd = discriminant.sqrt();

        // Find the nearest root in the acceptable range
        let mut root = (-half_b - sqrtd) / a;
        if !ray_t.surrounds(root) {
            root = (-half_b + sqrtd) / a;
            if !ray_t.surrounds(root) {
                return None;
            }
        }

        let outward_normal = (ray.at(root) - self.center) / self.radius;
        Some(HitRecord::new(ray, root, outward_normal, self.material))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAT: MaterialId = MaterialId(0);

    fn search() -> Interval {
        Interval::new(0.001, f32::INFINITY)
    }

    #[test]
    fn test_sphere_hit() {
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, -1.0), 0.5, MAT);
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));

        let rec = sphere.hit(&ray, search()).expect("ray aimed at center hits");
        assert!((rec.t - 0.5).abs() < 0.001); // Should hit at t=0.5
        assert!(rec.front_face);
        assert_eq!(rec.material, MAT);
    }

    #[test]
    fn test_hit_distance_from_outside() {
        let center = Vec3::new(2.0, -1.0, -7.0);
        let radius = 1.5;
        let sphere = Sphere::new(center, radius, MAT);

        for origin in [Vec3::ZERO, Vec3::new(10.0, 3.0, 1.0), Vec3::new(-4.0, 0.0, -20.0)] {
            let direction = (center - origin).normalize();
            let ray = Ray::new(origin, direction);
            let rec = sphere.hit(&ray, search()).unwrap();

            let expected_t = origin.distance(center) - radius;
            assert!((rec.t - expected_t).abs() < 1e-4, "t={} expected {}", rec.t, expected_t);

            // Outward normal points from the center toward the hit point
            let expected_normal = (rec.p - center).normalize();
            assert!((rec.normal - expected_normal).length() < 1e-4);
            assert!((rec.normal.length() - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_unnormalized_direction() {
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, -5.0), 1.0, MAT);
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -2.0));

        let rec = sphere.hit(&ray, search()).unwrap();
        // World distance 4 at direction length 2
        assert!((rec.t - 2.0).abs() < 1e-5);
        assert!((rec.p - Vec3::new(0.0, 0.0, -4.0)).length() < 1e-5);
    }

    #[test]
    fn test_sphere_miss() {
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, -1.0), 0.5, MAT);

        // Ray pointing away from sphere
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 1.0, 0.0));
        assert!(sphere.hit(&ray, search()).is_none());

        // Parallel ray offset by more than the radius
        let ray = Ray::new(Vec3::new(0.6, 0.0, 0.0), Vec3::new(0.0, 0.0, -1.0));
        assert!(sphere.hit(&ray, search()).is_none());
    }

    #[test]
    fn test_sphere_behind_ray_misses() {
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, 3.0), 1.0, MAT);
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        assert!(sphere.hit(&ray, search()).is_none());
    }

    #[test]
    fn test_tangent_ray() {
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, -4.0), 1.0, MAT);
        let ray = Ray::new(Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 0.0, -1.0));

        let rec = sphere.hit(&ray, search()).expect("grazing ray touches the sphere");
        assert!((rec.t - 4.0).abs() < 1e-4);
        assert!(ray.direction().dot(rec.normal) <= 0.0);
    }

    #[test]
    fn test_hit_from_inside() {
        let sphere = Sphere::new(Vec3::ZERO, 2.0, MAT);
        let ray = Ray::new(Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0));

        let rec = sphere.hit(&ray, search()).unwrap();
        assert!((rec.t - 2.0).abs() < 1e-5);
        assert!(!rec.front_face);
        assert_eq!(rec.normal, Vec3::new(-1.0, 0.0, 0.0));
    }

    #[test]
    fn test_normal_faces_ray() {
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, -3.0), 1.0, MAT);
        let origins = [Vec3::ZERO, Vec3::new(0.0, 0.0, -3.0), Vec3::new(0.2, 0.3, -2.5)];
        let directions = [
            Vec3::new(0.0, 0.0, -1.0),
            Vec3::new(0.1, 0.2, -1.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, -1.0, 0.5),
        ];

        for origin in origins {
            let inside = origin.distance(sphere.center()) < sphere.radius();
            for direction in directions {
                let ray = Ray::new(origin, direction);
                if let Some(rec) = sphere.hit(&ray, search()) {
                    assert!(ray.direction().dot(rec.normal) <= 0.0);
                    assert_eq!(rec.front_face, !inside);
                }
            }
        }
    }

    #[test]
    fn test_interval_limits_hits() {
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, -5.0), 1.0, MAT);
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));

        // Near root excluded, far root accepted
        let rec = sphere.hit(&ray, Interval::new(4.5, 10.0)).unwrap();
        assert!((rec.t - 6.0).abs() < 1e-5);

        // Both roots outside the window
        assert!(sphere.hit(&ray, Interval::new(0.001, 3.9)).is_none());
    }

    #[test]
    fn test_negative_radius_flips_normal() {
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, -3.0), -1.0, MAT);
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));

        let rec = sphere.hit(&ray, search()).unwrap();
        assert!((rec.t - 2.0).abs() < 1e-5);
        // Geometric normal points inward, so the ray counts as leaving
        assert!(!rec.front_face);
        assert!(ray.direction().dot(rec.normal) <= 0.0);
    }
}
