//! Prism Renderer - CPU Path Tracing
//!
//! A Monte Carlo path tracer for spheres with diffuse, metal and glass
//! materials. Scenes are built up front, then rendered read-only into an
//! [`ImageBuffer`] that can be written out as a plain PPM.

mod camera;
mod error;
mod hittable;
mod material;
mod ppm;
mod renderer;
mod scene;
mod sphere;

pub use camera::{Camera, CameraSettings};
pub use error::{RenderError, RenderResult};
pub use hittable::{HitRecord, Hittable, HittableList, Primitive};
pub use material::{Color, Dielectric, Lambertian, Material, MaterialId, Metal, ScatterResult};
pub use ppm::write_ppm;
pub use renderer::{
    color_to_rgb, linear_to_gamma, ray_color, render, render_parallel, render_pixel, sky_gradient,
    ImageBuffer, RenderConfig, T_MIN,
};
pub use scene::Scene;
pub use sphere::Sphere;

/// Re-export Vec3 and common math types from prism_math
pub use prism_math::{Interval, Ray, Vec3};
