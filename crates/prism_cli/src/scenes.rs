//! Built-in scenes and their default cameras.

use clap::ValueEnum;
use prism_math::random::{random_f32, random_range, random_vec3_range};
use prism_renderer::{CameraSettings, Color, Dielectric, Lambertian, Metal, Scene, Vec3};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SceneKind {
    /// One diffuse sphere resting on a diffuse ground sphere
    Simple,
    /// Diffuse, hollow glass and metal spheres side by side
    Materials,
    /// Hundreds of random small spheres around three large ones
    Cover,
}

impl SceneKind {
    pub fn name(self) -> &'static str {
        match self {
            SceneKind::Simple => "simple",
            SceneKind::Materials => "materials",
            SceneKind::Cover => "cover",
        }
    }

    /// Camera framing the scene.
    pub fn default_camera(self) -> CameraSettings {
        match self {
            SceneKind::Simple => CameraSettings::default(),
            SceneKind::Materials => {
                let look_from = Vec3::new(3.0, 3.0, 2.0);
                let look_at = Vec3::new(0.0, 0.0, -1.0);
                CameraSettings::default()
                    .with_position(look_from, look_at, Vec3::Y)
                    .with_lens(20.0, 0.1, look_from.distance(look_at))
            }
            SceneKind::Cover => CameraSettings::default()
                .with_position(Vec3::new(13.0, 2.0, 3.0), Vec3::ZERO, Vec3::Y)
                .with_lens(20.0, 0.1, 10.0)
                .with_aspect_ratio(3.0 / 2.0),
        }
    }

    /// Populate the scene. Only `Cover` uses the seed.
    pub fn build(self, seed: u64) -> Scene {
        match self {
            SceneKind::Simple => simple(),
            SceneKind::Materials => materials(),
            SceneKind::Cover => cover(seed),
        }
    }
}

fn simple() -> Scene {
    let mut scene = Scene::new();
    let gray = scene.add_material(Lambertian::new(Color::splat(0.5)));

    scene.add_sphere(Vec3::new(0.0, 0.0, -1.0), 0.5, gray);
    scene.add_sphere(Vec3::new(0.0, -100.5, -1.0), 100.0, gray);
    scene
}

fn materials() -> Scene {
    let mut scene = Scene::new();
    let ground = scene.add_material(Lambertian::new(Color::new(0.8, 0.8, 0.0)));
    let center = scene.add_material(Lambertian::new(Color::new(0.1, 0.2, 0.5)));
    let glass = scene.add_material(Dielectric::new(1.5));
    let gold = scene.add_material(Metal::new(Color::new(0.8, 0.6, 0.2), 0.0));

    scene.add_sphere(Vec3::new(0.0, -100.5, -1.0), 100.0, ground);
    scene.add_sphere(Vec3::new(0.0, 0.0, -1.0), 0.5, center);
    // Negative inner radius turns the glass ball into a thin shell
    scene.add_sphere(Vec3::new(-1.0, 0.0, -1.0), 0.5, glass);
    scene.add_sphere(Vec3::new(-1.0, 0.0, -1.0), -0.45, glass);
    scene.add_sphere(Vec3::new(1.0, 0.0, -1.0), 0.5, gold);
    scene
}

fn cover(seed: u64) -> Scene {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut scene = Scene::new();

    let ground = scene.add_material(Lambertian::new(Color::new(0.5, 0.5, 0.5)));
    scene.add_sphere(Vec3::new(0.0, -1000.0, 0.0), 1000.0, ground);

    // Every small glass sphere can share one material
    let glass = scene.add_material(Dielectric::new(1.5));

    for a in -11..11 {
        for b in -11..11 {
            let choose_mat = random_f32(&mut rng);
            let center = Vec3::new(
                a as f32 + 0.9 * random_f32(&mut rng),
                0.2,
                b as f32 + 0.9 * random_f32(&mut rng),
            );

            // Keep clear of the large metal sphere
            if (center - Vec3::new(4.0, 0.2, 0.0)).length() <= 0.9 {
                continue;
            }

            let material = if choose_mat < 0.8 {
                let albedo = random_vec3_range(&mut rng, 0.0, 1.0) * random_vec3_range(&mut rng, 0.0, 1.0);
                scene.add_material(Lambertian::new(albedo))
            } else if choose_mat < 0.95 {
                let albedo = random_vec3_range(&mut rng, 0.5, 1.0);
                let fuzz = random_range(&mut rng, 0.0, 0.5);
                scene.add_material(Metal::new(albedo, fuzz))
            } else {
                glass
            };
            scene.add_sphere(center, 0.2, material);
        }
    }

    let brown = scene.add_material(Lambertian::new(Color::new(0.4, 0.2, 0.1)));
    let mirror = scene.add_material(Metal::new(Color::new(0.7, 0.6, 0.5), 0.0));

    scene.add_sphere(Vec3::new(0.0, 1.0, 0.0), 1.0, glass);
    scene.add_sphere(Vec3::new(-4.0, 1.0, 0.0), 1.0, brown);
    scene.add_sphere(Vec3::new(4.0, 1.0, 0.0), 1.0, mirror);
    scene
}
