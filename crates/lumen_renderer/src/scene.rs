//! Scene container: an ordered list of primitives with a closest-hit query.

use crate::{
    hittable::{HitRecord, Hittable},
    Sphere,
};
use lumen_math::{Interval, Ray};

/// A geometric primitive. Each variant owns its material.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Sphere(Sphere),
}

impl From<Sphere> for Primitive {
    fn from(sphere: Sphere) -> Self {
        Primitive::Sphere(sphere)
    }
}

impl Hittable for Primitive {
    #[inline]
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'a>> {
        match self {
            Primitive::Sphere(sphere) => sphere.hit(ray, ray_t),
        }
    }
}

/// The world being rendered.
///
/// Built once, then only read while rays are in flight. Intersection is a
/// linear scan in insertion order.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    primitives: Vec<Primitive>,
}

impl Scene {
    /// Create a new empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a primitive to the scene.
    pub fn add(&mut self, primitive: impl Into<Primitive>) {
        self.primitives.push(primitive.into());
    }

    /// Get the number of primitives.
    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    /// Check if the scene is empty.
    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    /// Primitives in insertion order.
    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }
}

impl FromIterator<Primitive> for Scene {
    fn from_iter<I: IntoIterator<Item = Primitive>>(iter: I) -> Self {
        Self {
            primitives: iter.into_iter().collect(),
        }
    }
}

impl Hittable for Scene {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'a>> {
        let mut closest: Option<HitRecord<'a>> = None;
        let mut closest_so_far = ray_t.max;

        // Shrinking the range means later primitives can only get closer;
        // an exact tie fails the strict test so the first primitive keeps it
        for primitive in &self.primitives {
            if let Some(rec) = primitive.hit(ray, ray_t.with_max(closest_so_far)) {
                closest_so_far = rec.t;
                closest = Some(rec);
            }
        }

        closest
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Color, Material};
    use lumen_math::Vec3;

    fn sphere(center: Vec3, radius: f32, material: Material) -> Sphere {
        Sphere::new(center, radius, material).unwrap()
    }

    fn forward_ray() -> Ray {
        Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0))
    }

    #[test]
    fn test_empty_scene_misses() {
        let scene = Scene::new();
        assert!(scene.is_empty());
        assert!(scene.hit(&forward_ray(), Interval::new(0.001, f32::MAX)).is_none());
    }

    #[test]
    fn test_closest_hit_regardless_of_order() {
        let far = Material::lambertian(Color::new(0.1, 0.1, 0.1));
        let near = Material::lambertian(Color::new(0.9, 0.9, 0.9));

        let mut scene = Scene::new();
        scene.add(sphere(Vec3::new(0.0, 0.0, -10.0), 1.0, far));
        scene.add(sphere(Vec3::new(0.0, 0.0, -3.0), 1.0, near));
        scene.add(sphere(Vec3::new(0.0, 0.0, -20.0), 1.0, far));
        assert_eq!(scene.len(), 3);

        let rec = scene.hit(&forward_ray(), Interval::new(0.001, f32::MAX)).unwrap();
        assert_eq!(rec.t, 2.0);
        assert_eq!(*rec.material, near);
    }

    #[test]
    fn test_exact_tie_keeps_first_primitive() {
        let first = Material::lambertian(Color::new(1.0, 0.0, 0.0));
        let second = Material::metal(Color::new(0.0, 1.0, 0.0), 0.0);

        let primitives: [Primitive; 2] = [
            sphere(Vec3::new(0.0, 0.0, -3.0), 1.0, first).into(),
            sphere(Vec3::new(0.0, 0.0, -3.0), 1.0, second).into(),
        ];
        let scene: Scene = primitives.into_iter().collect();

        let rec = scene.hit(&forward_ray(), Interval::new(0.001, f32::MAX)).unwrap();
        assert_eq!(*rec.material, first);
    }

    #[test]
    fn test_respects_t_max() {
        let mut scene = Scene::new();
        let glass = Material::dielectric(1.5).unwrap();
        scene.add(sphere(Vec3::new(0.0, 0.0, -10.0), 1.0, glass));
        assert!(scene.hit(&forward_ray(), Interval::new(0.001, 5.0)).is_none());
    }
}
