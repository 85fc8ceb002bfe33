//! Core path tracing renderer.
//!
//! Implements Monte Carlo path tracing with:
//! - Recursive ray tracing with configurable depth
//! - Anti-aliasing via jittered multi-sampling
//! - Gamma correction and 8-bit quantization
//!
//! Every pixel draws from its own generator seeded from the render seed and
//! the pixel coordinate, so [`render`] and [`render_parallel`] produce the
//! same image for any thread count.

use crate::{Camera, Color, Hittable, RenderError, RenderResult, Scene};
use log::{debug, trace};
use prism_math::random::random_f32;
use prism_math::{Interval, Ray};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU32, Ordering};

/// Lower bound of the intersection search.
///
/// Bounced rays start exactly on a surface; rounding can put the origin a
/// hair below it, so hits closer than this are ignored to avoid shadow acne.
pub const T_MIN: f32 = 0.001;

/// Render configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Output image width in pixels
    pub image_width: u32,
    /// Output image height in pixels
    pub image_height: u32,
    /// Samples per pixel for anti-aliasing
    pub samples_per_pixel: u32,
    /// Maximum ray bounce depth
    pub max_depth: u32,
    /// Base seed for the per-pixel random streams
    pub seed: u64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            image_width: 400,
            image_height: 225,
            samples_per_pixel: 100,
            max_depth: 50,
            seed: 0,
        }
    }
}

impl RenderConfig {
    /// Check that the configuration describes a renderable image.
    pub fn validate(&self) -> RenderResult<()> {
        if self.image_width == 0 || self.image_height == 0 {
            return Err(RenderError::EmptyImage {
                width: self.image_width,
                height: self.image_height,
            });
        }
        if self.samples_per_pixel == 0 {
            return Err(RenderError::NoSamples);
        }
        Ok(())
    }
}

/// Compute the color seen by a ray.
///
/// This is the core path tracing function. It traces the ray through
/// the scene, bouncing off surfaces and multiplying in each material's
/// attenuation. Recursion stops after `depth` bounces.
pub fn ray_color(ray: &Ray, scene: &Scene, depth: u32, rng: &mut dyn RngCore) -> Color {
    // If we've exceeded max depth, no more light is gathered
    if depth == 0 {
        return Color::ZERO;
    }

    let Some(rec) = scene.hit(ray, Interval::new(T_MIN, f32::INFINITY)) else {
        return sky_gradient(ray);
    };

    match scene.material(rec.material).scatter(ray, &rec, rng) {
        Some(result) => result.attenuation * ray_color(&result.scattered, scene, depth - 1, rng),
        // Absorbed
        None => Color::ZERO,
    }
}

/// Compute sky gradient background.
///
/// Blends white (looking straight down) into sky blue (straight up).
pub fn sky_gradient(ray: &Ray) -> Color {
    let unit_direction = ray.direction().normalize();
    let a = 0.5 * (unit_direction.y + 1.0);
    let white = Color::new(1.0, 1.0, 1.0);
    let blue = Color::new(0.5, 0.7, 1.0);
    (1.0 - a) * white + a * blue
}

/// Apply gamma correction (gamma = 2.0).
#[inline]
pub fn linear_to_gamma(linear: f32) -> f32 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// Convert a linear color to 8-bit RGB.
///
/// Channels are gamma corrected, clamped to [0, 0.999] and scaled by 256,
/// so a fully saturated channel lands on 255, never 256.
pub fn color_to_rgb(color: Color) -> [u8; 3] {
    let intensity = Interval::new(0.0, 0.999);
    let encode = |c: f32| (256.0 * intensity.clamp(linear_to_gamma(c))) as u8;
    [encode(color.x), encode(color.y), encode(color.z)]
}

/// Render a single pixel with multi-sampling.
///
/// `i` is the column from the left, `j` the row counted from the bottom of
/// the image plane. Returns the average of all samples in linear color.
pub fn render_pixel(
    camera: &Camera,
    scene: &Scene,
    i: u32,
    j: u32,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Color {
    // Single-pixel dimensions would divide by zero
    let width_span = config.image_width.saturating_sub(1).max(1) as f32;
    let height_span = config.image_height.saturating_sub(1).max(1) as f32;

    let mut pixel_color = Color::ZERO;

    for _ in 0..config.samples_per_pixel {
        let s = (i as f32 + random_f32(rng)) / width_span;
        let t = (j as f32 + random_f32(rng)) / height_span;
        let ray = camera.get_ray(s, t, rng);
        pixel_color += ray_color(&ray, scene, config.max_depth, rng);
    }

    // Average the samples
    pixel_color / config.samples_per_pixel as f32
}

/// Independent random stream for one pixel.
fn pixel_rng(seed: u64, i: u32, j: u32) -> StdRng {
    let pixel = (u64::from(j) << 32) | u64::from(i);
    StdRng::seed_from_u64(seed ^ pixel.wrapping_mul(0x9E37_79B9_7F4A_7C15))
}

/// Image-plane row `j` (counted from the bottom) for output row `y`.
///
/// Also the number of scanlines still to go once row `y` starts.
#[inline]
fn scanline(height: u32, y: u32) -> u32 {
    height - 1 - y
}

/// Render the pixel at image position (x, y), with y counted from the top.
fn shade(camera: &Camera, scene: &Scene, config: &RenderConfig, x: u32, y: u32) -> Color {
    let j = scanline(config.image_height, y);
    let mut rng = pixel_rng(config.seed, x, j);
    render_pixel(camera, scene, x, j, config, &mut rng)
}

/// Simple image buffer for storing render output.
///
/// Pixels are linear colors in row-major order, top row first.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; (width as usize) * (height as usize)],
        }
    }

    fn index(&self, x: u32, y: u32) -> usize {
        (y as usize) * (self.width as usize) + x as usize
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let index = self.index(x, y);
        self.pixels[index] = color;
    }

    /// Convert to gamma-corrected RGB bytes.
    pub fn to_rgb8(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|c| color_to_rgb(*c)).collect()
    }
}

/// Render the entire scene to an image buffer.
///
/// Single-threaded reference renderer. Progress is reported through the
/// `log` facade as remaining scanlines.
pub fn render(camera: &Camera, scene: &Scene, config: &RenderConfig) -> RenderResult<ImageBuffer> {
    config.validate()?;

    let mut image = ImageBuffer::new(config.image_width, config.image_height);

    for y in 0..config.image_height {
        trace!("Scanlines remaining: {}", scanline(config.image_height, y));
        for x in 0..config.image_width {
            let color = shade(camera, scene, config, x, y);
            image.set(x, y, color);
        }
    }

    debug!(
        "Rendered {}x{} @ {} spp",
        config.image_width, config.image_height, config.samples_per_pixel
    );
    Ok(image)
}

/// Render the entire scene using all rayon worker threads.
///
/// Scanlines are distributed across workers. Each row is written straight
/// into its own slice of the buffer, so the result is ordered by pixel
/// coordinate and identical to [`render`].
pub fn render_parallel(camera: &Camera, scene: &Scene, config: &RenderConfig) -> RenderResult<ImageBuffer> {
    config.validate()?;

    let mut image = ImageBuffer::new(config.image_width, config.image_height);
    let finished = AtomicU32::new(0);

    image
        .pixels
        .par_chunks_mut(config.image_width as usize)
        .enumerate()
        .for_each(|(y, row)| {
            for (x, pixel) in row.iter_mut().enumerate() {
                *pixel = shade(camera, scene, config, x as u32, y as u32);
            }
            let done = finished.fetch_add(1, Ordering::Relaxed) + 1;
            trace!("Scanlines remaining: {}", config.image_height - done);
        });

    debug!(
        "Rendered {}x{} @ {} spp on {} threads",
        config.image_width,
        config.image_height,
        config.samples_per_pixel,
        rayon::current_num_threads()
    );
    Ok(image)
}
