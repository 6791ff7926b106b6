//! Radiance integrator.
//!
//! Follows a camera ray through the scene, letting each struck material
//! scatter it, and multiplies the attenuations along the path. Paths end when
//! they escape to the background, get absorbed, or hit the depth bound.

use crate::{Color, Hittable, RenderConfig};
use lumen_math::{Interval, Ray};
use rand::RngCore;

/// Sky color at the zenith.
pub const SKY_BLUE: Color = Color::new(0.5, 0.7, 1.0);

/// What a path contributes when it escapes the scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Background {
    /// Vertical gradient from white (straight down) to [`SKY_BLUE`] (straight up).
    Sky,
    /// A constant color in every direction.
    Solid(Color),
}

impl Background {
    /// Radiance arriving along an escaped ray.
    pub fn radiance(&self, ray: &Ray) -> Color {
        match *self {
            Background::Sky => sky_gradient(ray),
            Background::Solid(color) => color,
        }
    }
}

impl Default for Background {
    fn default() -> Self {
        Background::Sky
    }
}

/// Radiance carried by one path, plus how many segments it took.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathSample {
    pub color: Color,
    /// Number of rays traced, including the camera ray
    pub segments: u32,
}

/// Compute the color seen by a ray.
pub fn ray_color(
    ray: &Ray,
    world: &dyn Hittable,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Color {
    trace_path(ray, world, config, rng).color
}

/// Trace a full path starting at `ray`.
pub fn trace_path(
    ray: &Ray,
    world: &dyn Hittable,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> PathSample {
    let mut segments = 0;
    let color = radiance(ray, world, 0, config, rng, &mut segments);
    PathSample { color, segments }
}

fn radiance(
    ray: &Ray,
    world: &dyn Hittable,
    depth: u32,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
    segments: &mut u32,
) -> Color {
    *segments += 1;

    let Some(rec) = world.hit(ray, Interval::new(config.t_min, f32::MAX)) else {
        return config.background.radiance(ray);
    };

    // Past the depth bound the path carries no light
    if depth < config.max_depth {
        if let Some(result) = rec.material.scatter(ray, &rec, rng) {
            let incoming = radiance(&result.scattered, world, depth + 1, config, rng, segments);
            return result.attenuation * incoming;
        }
    }

    Color::ZERO
}

/// Compute sky gradient background.
pub fn sky_gradient(ray: &Ray) -> Color {
    let unit_direction = ray.direction().normalize();
    let a = 0.5 * (unit_direction.y + 1.0);
    (1.0 - a) * Color::ONE + a * SKY_BLUE
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sampling::test_rng::SequenceRng;
    use crate::{Material, Scene, Sphere};
    use lumen_math::Vec3;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn config(max_depth: u32) -> RenderConfig {
        RenderConfig {
            max_depth,
            ..RenderConfig::default()
        }
    }

    fn mirror_corridor() -> Scene {
        let mirror = Material::metal(Color::new(0.9, 0.9, 0.9), 0.0);
        let mut scene = Scene::new();
        scene.add(Sphere::new(Vec3::new(0.0, 0.0, -2.0), 1.0, mirror).unwrap());
        scene.add(Sphere::new(Vec3::new(0.0, 0.0, 2.0), 1.0, mirror).unwrap());
        scene
    }

    #[test]
    fn test_sky_gradient_endpoints() {
        let up = sky_gradient(&Ray::new(Vec3::ZERO, Vec3::new(0.0, 1.0, 0.0)));
        assert_eq!(up, SKY_BLUE);

        let down = sky_gradient(&Ray::new(Vec3::ZERO, Vec3::new(0.0, -1.0, 0.0)));
        assert_eq!(down, Color::ONE);

        // Horizontal rays sit halfway along the blend
        let level = sky_gradient(&Ray::new(Vec3::ZERO, Vec3::new(3.0, 0.0, 0.0)));
        assert!((level - Color::new(0.75, 0.85, 1.0)).length() < 1e-6);
    }

    #[test]
    fn test_sky_gradient_is_linear_in_y() {
        let direction = Vec3::new(0.0, 0.6, 0.8);
        let color = sky_gradient(&Ray::new(Vec3::ZERO, direction));
        let a = 0.5 * (0.6 + 1.0);
        let expected = (1.0 - a) * Color::ONE + a * SKY_BLUE;
        assert!((color - expected).length() < 1e-6);
    }

    #[test]
    fn test_miss_uses_background() {
        let scene = Scene::new();
        let mut rng = StdRng::seed_from_u64(1);
        let ray = Ray::new(Vec3::ZERO, Vec3::X);

        let solid = RenderConfig {
            background: Background::Solid(Color::new(0.2, 0.3, 0.4)),
            ..RenderConfig::default()
        };
        assert_eq!(ray_color(&ray, &scene, &solid, &mut rng), Color::new(0.2, 0.3, 0.4));

        let sample = trace_path(&ray, &scene, &config(50), &mut rng);
        assert_eq!(sample.segments, 1);
    }

    #[test]
    fn test_depth_bound_terminates_between_mirrors() {
        let scene = mirror_corridor();
        let mut rng = SequenceRng::constant(0.5);
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));

        let sample = trace_path(&ray, &scene, &config(3), &mut rng);
        assert_eq!(sample.color, Color::ZERO);
        assert_eq!(sample.segments, 4);
    }

    #[test]
    fn test_zero_depth_hit_is_black() {
        let scene = mirror_corridor();
        let mut rng = SequenceRng::constant(0.5);
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));

        let sample = trace_path(&ray, &scene, &config(0), &mut rng);
        assert_eq!(sample.color, Color::ZERO);
        assert_eq!(sample.segments, 1);
    }

    #[test]
    fn test_absorbed_path_is_black() {
        // A grazing hit on a fully rough metal whose fuzz sample points inward
        let material = Material::metal(Color::ONE, 1.0);
        let mut scene = Scene::new();
        scene.add(Sphere::new(Vec3::new(0.0, -1000.0, 0.0), 1000.0, material).unwrap());

        let ray = Ray::new(Vec3::new(-100.0, 1.0, 0.0), Vec3::new(100.0, -1.0, 0.0));
        let mut rng = SequenceRng::new(&[0.5, 0.05, 0.5]);
        let sample = trace_path(&ray, &scene, &config(50), &mut rng);
        assert_eq!(sample.color, Color::ZERO);
        assert_eq!(sample.segments, 1);
    }

    #[test]
    fn test_single_bounce_attenuates_sky() {
        // Diffuse ground, constant 0.5 draws scatter straight up into the sky
        let ground = Material::lambertian(Color::new(0.5, 0.5, 0.5));
        let mut scene = Scene::new();
        scene.add(Sphere::new(Vec3::new(0.0, -1000.0, 0.0), 1000.0, ground).unwrap());

        let ray = Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.0, -1.0, 0.0));
        let mut rng = SequenceRng::constant(0.5);
        let sample = trace_path(&ray, &scene, &config(50), &mut rng);

        assert_eq!(sample.segments, 2);
        assert_eq!(sample.color, Color::new(0.5, 0.5, 0.5) * SKY_BLUE);
    }

    #[test]
    fn test_accumulated_color_bounded_by_albedo() {
        let albedo = Color::new(0.8, 0.4, 0.2);
        let mut scene = Scene::new();
        let material = Material::lambertian(albedo);
        scene.add(Sphere::new(Vec3::new(0.0, -1000.0, 0.0), 1000.0, material).unwrap());
        scene.add(Sphere::new(Vec3::new(0.0, 1.0, 0.0), 1.0, material).unwrap());

        let mut rng = StdRng::seed_from_u64(5);
        for i in 0..200 {
            let x = (i as f32 / 200.0) * 2.0 - 1.0;
            let ray = Ray::new(Vec3::new(0.0, 1.0, 5.0), Vec3::new(x, -0.2, -1.0));
            let color = ray_color(&ray, &scene, &config(50), &mut rng);
            assert!(color.x <= albedo.x && color.y <= albedo.y && color.z <= albedo.z);
            assert!(color.min_element() >= 0.0);
        }
    }
}
