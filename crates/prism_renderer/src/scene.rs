//! Scene container: material arena plus the list of primitives.

use crate::{HitRecord, Hittable, HittableList, Material, MaterialId, Primitive, Sphere};
use prism_math::{Interval, Ray, Vec3};

/// Everything the integrator needs to trace a ray.
///
/// Materials live in one arena and are referenced by [`MaterialId`], so any
/// number of spheres can share a material. A scene is built once, then only
/// read while rendering.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    materials: Vec<Material>,
    world: HittableList,
}

impl Scene {
    /// Create an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a material and return its handle.
    pub fn add_material(&mut self, material: impl Into<Material>) -> MaterialId {
        let id = MaterialId(self.materials.len() as u32);
        self.materials.push(material.into());
        id
    }

    /// Add a primitive to the world.
    ///
    /// The primitive's material handle must have been issued by this scene.
    /// Debug builds check this on insertion.
    pub fn add(&mut self, object: impl Into<Primitive>) {
        let object = object.into();
        debug_assert!(
            object.material().index() < self.materials.len(),
            "material {:?} is not part of this scene",
            object.material()
        );
        self.world.add(object);
    }

    /// Add a sphere with the given material.
    pub fn add_sphere(&mut self, center: Vec3, radius: f32, material: MaterialId) {
        self.add(Sphere::new(center, radius, material));
    }

    /// Look up a material by handle.
    #[inline]
    pub fn material(&self, id: MaterialId) -> &Material {
        &self.materials[id.index()]
    }

    pub fn material_count(&self) -> usize {
        self.materials.len()
    }

    pub fn object_count(&self) -> usize {
        self.world.len()
    }

    pub fn world(&self) -> &HittableList {
        &self.world
    }
}

impl Hittable for Scene {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord> {
        self.world.hit(ray, ray_t)
    }
}
