//! Built-in scenes.

use lumen_renderer::sampling::gen_f32;
use lumen_renderer::{CameraSettings, Color, Material, RenderResult, Scene, Sphere, Vec3};
use rand::RngCore;

/// Where the large metal sphere sits; small spheres keep clear of it.
const METAL_SPHERE_CENTER: Vec3 = Vec3::new(4.0, 0.2, 0.0);

/// The random sphere field: a large grey ground, a grid of small randomly
/// chosen spheres for `a, b` in `-grid..=grid`, and three large feature spheres.
pub fn random_spheres(grid: i32, rng: &mut dyn RngCore) -> RenderResult<Scene> {
    let mut scene = Scene::new();

    // Ground
    scene.add(Sphere::new(
        Vec3::new(0.0, -1000.0, 0.0),
        1000.0,
        Material::lambertian(Color::new(0.5, 0.5, 0.5)),
    )?);

    for a in -grid..=grid {
        for b in -grid..=grid {
            let x = a as f32 + 0.9 * gen_f32(rng);
            let z = b as f32 + 0.9 * gen_f32(rng);
            let center = Vec3::new(x, 0.2, z);
            if (center - METAL_SPHERE_CENTER).length() <= 0.9 {
                continue;
            }

            let choose_mat = gen_f32(rng);
            let material = if choose_mat < 0.8 {
                let albedo = Color::new(
                    gen_f32(rng) * gen_f32(rng),
                    gen_f32(rng) * gen_f32(rng),
                    gen_f32(rng) * gen_f32(rng),
                );
                Material::lambertian(albedo)
            } else if choose_mat < 0.95 {
                let tint = Color::new(gen_f32(rng), gen_f32(rng), gen_f32(rng));
                let albedo = 0.5 * (Color::ONE + tint);
                Material::metal(albedo, 0.5 * gen_f32(rng))
            } else {
                Material::dielectric(1.5)?
            };

            scene.add(Sphere::new(center, 0.2, material)?);
        }
    }

    // Three main spheres
    scene.add(Sphere::new(
        Vec3::new(0.0, 1.0, 0.0),
        1.0,
        Material::dielectric(1.5)?,
    )?);
    scene.add(Sphere::new(
        Vec3::new(-4.0, 1.0, 0.0),
        1.0,
        Material::lambertian(Color::new(0.4, 0.2, 0.1)),
    )?);
    scene.add(Sphere::new(
        Vec3::new(4.0, 1.0, 0.0),
        1.0,
        Material::metal(Color::new(0.7, 0.6, 0.5), 0.0),
    )?);

    log::debug!("Random sphere field with grid {} has {} spheres", grid, scene.len());
    Ok(scene)
}

/// Camera framing the random sphere field.
pub fn random_spheres_camera() -> CameraSettings {
    CameraSettings::new()
        .with_position(Vec3::new(13.0, 2.0, 3.0), Vec3::ZERO, Vec3::Y)
        .with_lens(20.0, 0.1, 10.0)
}
