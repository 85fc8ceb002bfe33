//! Materials describing how light scatters off a surface.

use crate::hittable::HitRecord;
use prism_math::random::{random_f32, random_in_unit_sphere, random_unit_vector};
use prism_math::{reflect, refract, Ray, Vec3};
use rand::RngCore;

/// Color type alias (linear RGB, typically 0-1)
pub type Color = Vec3;

/// Handle to a material stored in a [`Scene`](crate::Scene).
///
/// Many spheres can share one material; the scene owns the only copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MaterialId(pub(crate) u32);

impl MaterialId {
    /// Index of the material in the scene's arena.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// The outcome of a successful scatter.
#[derive(Debug, Clone, Copy)]
pub struct ScatterResult {
    /// Per-channel fraction of the scattered light that survives
    pub attenuation: Color,
    /// Ray continuing the light path
    pub scattered: Ray,
}

/// Surface material.
///
/// A closed set of variants dispatched with `match`, which keeps the
/// per-bounce call direct.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Material {
    Lambertian(Lambertian),
    Metal(Metal),
    Dielectric(Dielectric),
}

impl Material {
    /// Scatter an incoming ray.
    ///
    /// Returns `None` when the light is absorbed.
    pub fn scatter(&self, ray_in: &Ray, rec: &HitRecord, rng: &mut dyn RngCore) -> Option<ScatterResult> {
        match self {
            Material::Lambertian(m) => m.scatter(ray_in, rec, rng),
            Material::Metal(m) => m.scatter(ray_in, rec, rng),
            Material::Dielectric(m) => m.scatter(ray_in, rec, rng),
        }
    }
}

impl From<Lambertian> for Material {
    fn from(m: Lambertian) -> Self {
        Material::Lambertian(m)
    }
}

impl From<Metal> for Material {
    fn from(m: Metal) -> Self {
        Material::Metal(m)
    }
}

impl From<Dielectric> for Material {
    fn from(m: Dielectric) -> Self {
        Material::Dielectric(m)
    }
}

/// Lambertian (diffuse) material.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lambertian {
    albedo: Color,
}

impl Lambertian {
    /// Create a new Lambertian material with the given albedo color.
    pub fn new(albedo: Color) -> Self {
        Self { albedo }
    }

    pub fn albedo(&self) -> Color {
        self.albedo
    }

    fn scatter(&self, _ray_in: &Ray, rec: &HitRecord, rng: &mut dyn RngCore) -> Option<ScatterResult> {
        let scatter_direction = diffuse_direction(rec.normal, random_unit_vector(rng));

        Some(ScatterResult {
            attenuation: self.albedo,
            scattered: Ray::new(rec.p, scatter_direction),
        })
    }
}

/// Offset the normal by a unit sample, falling back to the normal when the
/// sample nearly cancels it.
fn diffuse_direction(normal: Vec3, sample: Vec3) -> Vec3 {
    let direction = normal + sample;

    // Catch degenerate scatter direction
    if direction.length_squared() < 1e-8 {
        normal
    } else {
        direction
    }
}

/// Metal (specular) material.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Metal {
    albedo: Color,
    fuzz: f32,
}

impl Metal {
    /// Create a new Metal material.
    ///
    /// - `albedo`: The color of the metal
    /// - `fuzz`: Roughness, 0.0 = perfect mirror, 1.0 = very rough
    pub fn new(albedo: Color, fuzz: f32) -> Self {
        Self {
            albedo,
            fuzz: fuzz.clamp(0.0, 1.0),
        }
    }

    pub fn albedo(&self) -> Color {
        self.albedo
    }

    pub fn fuzz(&self) -> f32 {
        self.fuzz
    }

    fn scatter(&self, ray_in: &Ray, rec: &HitRecord, rng: &mut dyn RngCore) -> Option<ScatterResult> {
        let reflected = reflect(ray_in.direction().normalize(), rec.normal);
        let scattered_dir = reflected + self.fuzz * random_in_unit_sphere(rng);

        // Fuzz must not push the reflection below the surface
        if scattered_dir.dot(rec.normal) > 0.0 {
            Some(ScatterResult {
                attenuation: self.albedo,
                scattered: Ray::new(rec.p, scattered_dir),
            })
        } else {
            None
        }
    }
}

/// Dielectric (glass) material.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dielectric {
    /// Index of refraction
    ior: f32,
}

impl Dielectric {
    /// Create a new Dielectric material.
    ///
    /// - `ior`: Index of refraction (1.0 = air, 1.5 = glass, 2.4 = diamond)
    pub fn new(ior: f32) -> Self {
        Self { ior }
    }

    pub fn ior(&self) -> f32 {
        self.ior
    }

    /// Schlick's approximation for reflectance
    fn reflectance(cosine: f32, ref_idx: f32) -> f32 {
        let r0 = ((1.0 - ref_idx) / (1.0 + ref_idx)).powi(2);
        r0 + (1.0 - r0) * (1.0 - cosine).powi(5)
    }

    fn scatter(&self, ray_in: &Ray, rec: &HitRecord, rng: &mut dyn RngCore) -> Option<ScatterResult> {
        let refraction_ratio = if rec.front_face { 1.0 / self.ior } else { self.ior };

        let unit_direction = ray_in.direction().normalize();
        let cos_theta = (-unit_direction).dot(rec.normal).min(1.0);
        let sin_theta = (1.0 - cos_theta * cos_theta).sqrt();

        // Total internal reflection
        let cannot_refract = refraction_ratio * sin_theta > 1.0;

        let direction = if cannot_refract
            || Self::reflectance(cos_theta, refraction_ratio) > random_f32(rng)
        {
            reflect(unit_direction, rec.normal)
        } else {
            refract(unit_direction, rec.normal, refraction_ratio)
        };

        Some(ScatterResult {
            attenuation: Color::ONE,
            scattered: Ray::new(rec.p, direction),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// A hit on the top of a unit sphere seen from above.
    fn top_hit(front_face: bool) -> HitRecord {
        HitRecord {
            p: Vec3::new(0.0, 1.0, 0.0),
            normal: if front_face { Vec3::Y } else { -Vec3::Y },
            t: 1.0,
            front_face,
            material: MaterialId(0),
        }
    }

    #[test]
    fn test_lambertian_attenuation_is_albedo() {
        let albedo = Color::new(0.8, 0.3, 0.1);
        let material = Material::from(Lambertian::new(albedo));
        let ray = Ray::new(Vec3::new(0.0, 3.0, 0.0), -Vec3::Y);
        let rec = top_hit(true);
        let mut rng = StdRng::seed_from_u64(1);

        for _ in 0..500 {
            let result = material.scatter(&ray, &rec, &mut rng).expect("lambertian always scatters");
            assert_eq!(result.attenuation, albedo);
            assert_eq!(result.scattered.origin(), rec.p);
            // normal + unit vector never points below the tangent plane
            assert!(result.scattered.direction().dot(rec.normal) >= -1e-6);
        }
    }

    #[test]
    fn test_lambertian_degenerate_direction_uses_normal() {
        let normal = Vec3::new(0.0, 0.6, 0.8);

        assert_eq!(diffuse_direction(normal, -normal), normal);
        assert_eq!(diffuse_direction(normal, -normal * 1.00001), normal);

        let sample = Vec3::X;
        assert_eq!(diffuse_direction(normal, sample), normal + sample);
    }

    #[test]
    fn test_metal_scatters_above_surface() {
        let material = Material::from(Metal::new(Color::new(0.7, 0.6, 0.5), 1.0));
        let rec = top_hit(true);
        let mut rng = StdRng::seed_from_u64(2);
        let mut absorbed = 0;

        // Grazing rays with maximum fuzz exercise both outcomes
        let ray = Ray::new(Vec3::new(-5.0, 1.2, 0.0), Vec3::new(1.0, -0.04, 0.0));
        for _ in 0..2000 {
            match material.scatter(&ray, &rec, &mut rng) {
                Some(result) => {
                    assert!(result.scattered.direction().dot(rec.normal) > 0.0);
                    assert_eq!(result.attenuation, Color::new(0.7, 0.6, 0.5));
                }
                None => absorbed += 1,
            }
        }
        assert!(absorbed > 0);
    }

    #[test]
    fn test_metal_mirror_reflection() {
        let material = Material::from(Metal::new(Color::ONE, 0.0));
        let rec = top_hit(true);
        let ray = Ray::new(Vec3::new(-1.0, 2.0, 0.0), Vec3::new(1.0, -1.0, 0.0));
        let mut rng = StdRng::seed_from_u64(3);

        let result = material.scatter(&ray, &rec, &mut rng).expect("mirror reflects");
        let expected = Vec3::new(1.0, 1.0, 0.0).normalize();
        assert!((result.scattered.direction() - expected).length() < 1e-5);
    }

    #[test]
    fn test_metal_fuzz_clamped() {
        assert_eq!(Metal::new(Color::ONE, 3.0).fuzz(), 1.0);
        assert_eq!(Metal::new(Color::ONE, -1.0).fuzz(), 0.0);
        assert_eq!(Metal::new(Color::ONE, 0.3).fuzz(), 0.3);
    }

    #[test]
    fn test_dielectric_never_absorbs() {
        let material = Material::from(Dielectric::new(1.5));
        let mut rng = StdRng::seed_from_u64(4);
        let directions = [
            Vec3::new(0.0, -1.0, 0.0),
            Vec3::new(1.0, -1.0, 0.0),
            Vec3::new(1.0, -0.01, 0.3),
        ];

        for front_face in [true, false] {
            let rec = top_hit(front_face);
            for dir in directions {
                // Inside the medium the ray travels along the flipped normal
                let dir = if front_face { dir } else { Vec3::new(dir.x, -dir.y, dir.z) };
                let ray = Ray::new(rec.p - dir, dir);
                for _ in 0..100 {
                    let result = material.scatter(&ray, &rec, &mut rng).expect("glass always scatters");
                    assert_eq!(result.attenuation, Color::ONE);
                    assert!(result.scattered.direction().length_squared() > 0.0);
                }
            }
        }
    }

    #[test]
    fn test_dielectric_total_internal_reflection() {
        // Leaving glass at a grazing angle can't refract
        let material = Material::from(Dielectric::new(1.5));
        let rec = top_hit(false);
        let dir = Vec3::new(1.0, 0.2, 0.0).normalize();
        let ray = Ray::new(rec.p - dir, dir);
        let mut rng = StdRng::seed_from_u64(5);

        for _ in 0..100 {
            let result = material.scatter(&ray, &rec, &mut rng).unwrap();
            let expected = reflect(dir, rec.normal);
            assert!((result.scattered.direction() - expected).length() < 1e-5);
        }
    }

    #[test]
    fn test_reflectance_limits() {
        // Head-on glass reflects about 4%
        assert!((Dielectric::reflectance(1.0, 1.5) - 0.04).abs() < 1e-4);
        // Grazing incidence reflects everything
        assert!((Dielectric::reflectance(0.0, 1.5) - 1.0).abs() < 1e-6);
    }
}
