//! Random sampling helpers.
//!
//! Every function takes the generator explicitly so callers control the
//! stream: one generator per pixel keeps renders reproducible regardless of
//! how work is split across threads.

use crate::Vec3;
use rand::{Rng, RngCore};
use std::f32::consts::PI;

/// Generate a random f32 in [0.0, 1.0).
#[inline]
pub fn random_f32(rng: &mut dyn RngCore) -> f32 {
    rng.gen::<f32>()
}

/// Generate a random f32 in [min, max).
#[inline]
pub fn random_range(rng: &mut dyn RngCore, min: f32, max: f32) -> f32 {
    min + (max - min) * random_f32(rng)
}

/// Generate a vector whose components are independently uniform in [min, max).
pub fn random_vec3_range(rng: &mut dyn RngCore, min: f32, max: f32) -> Vec3 {
    Vec3::new(
        random_range(rng, min, max),
        random_range(rng, min, max),
        random_range(rng, min, max),
    )
}

/// Generate a point strictly inside the unit sphere.
///
/// Rejection sampling from the [-1, 1]^3 cube. About 52% of draws are
/// accepted, so the loop has no iteration cap and terminates with
/// probability 1.
pub fn random_in_unit_sphere(rng: &mut dyn RngCore) -> Vec3 {
    loop {
        let p = random_vec3_range(rng, -1.0, 1.0);
        if p.length_squared() < 1.0 {
            return p;
        }
    }
}

/// Generate a unit vector uniformly distributed on the unit sphere.
///
/// Drawn directly: z ~ U(-1, 1), phi ~ U(0, 2pi), r = sqrt(1 - z^2).
pub fn random_unit_vector(rng: &mut dyn RngCore) -> Vec3 {
    let phi = random_range(rng, 0.0, 2.0 * PI);
    let z = random_range(rng, -1.0, 1.0);
    let r = (1.0 - z * z).sqrt();
    Vec3::new(r * phi.cos(), r * phi.sin(), z)
}

/// Generate a point strictly inside the unit disk in the z = 0 plane.
pub fn random_in_unit_disk(rng: &mut dyn RngCore) -> Vec3 {
    loop {
        let p = Vec3::new(
            random_range(rng, -1.0, 1.0),
            random_range(rng, -1.0, 1.0),
            0.0,
        );
        if p.length_squared() < 1.0 {
            return p;
        }
    }
}
