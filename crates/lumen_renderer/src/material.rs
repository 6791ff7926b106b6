//! Materials describing how light scatters off surfaces.

use crate::hittable::HitRecord;
use crate::sampling::{gen_f32, random_in_unit_sphere};
use crate::{RenderError, RenderResult};
use lumen_math::{Ray, Vec3};
use rand::RngCore;

/// Color type alias (RGB values typically 0-1)
pub type Color = Vec3;

/// Outcome of a successful scatter event.
#[derive(Debug, Clone, Copy)]
pub struct ScatterResult {
    /// Per-channel fraction of the scattered ray's radiance that survives
    pub attenuation: Color,
    /// The continuation ray
    pub scattered: Ray,
}

/// Surface material. A closed set dispatched by `match`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Material {
    /// Ideal matte surface.
    Lambertian { albedo: Color },
    /// Specular reflector; `fuzz` 0.0 is a perfect mirror, 1.0 is very rough.
    Metal { albedo: Color, fuzz: f32 },
    /// Clear refracting surface (air 1.0, water 1.3, glass 1.5, diamond 2.4).
    Dielectric { ior: f32 },
}

impl Material {
    /// Create a Lambertian material. Albedo channels are clamped to [0, 1].
    pub fn lambertian(albedo: Color) -> Self {
        Material::Lambertian {
            albedo: clamp_albedo(albedo),
        }
    }

    /// Create a metal material.
    ///
    /// - `albedo`: The color of the metal, clamped to [0, 1]
    /// - `fuzz`: Roughness, clamped to [0, 1]
    pub fn metal(albedo: Color, fuzz: f32) -> Self {
        if !(0.0..=1.0).contains(&fuzz) {
            log::warn!("Metal fuzz {} outside [0, 1], clamping", fuzz);
        }
        Material::Metal {
            albedo: clamp_albedo(albedo),
            fuzz: fuzz.clamp(0.0, 1.0),
        }
    }

    /// Create a dielectric material with the given index of refraction.
    ///
    /// The index must be finite and positive.
    pub fn dielectric(ior: f32) -> RenderResult<Self> {
        if !(ior.is_finite() && ior > 0.0) {
            return Err(RenderError::InvalidMaterialParameter { name: "ior", value: ior });
        }
        Ok(Material::Dielectric { ior })
    }

    /// Scatter an incoming ray.
    ///
    /// Returns the attenuation and scattered ray, or `None` if the ray is
    /// absorbed.
    pub fn scatter(
        &self,
        ray_in: &Ray,
        rec: &HitRecord,
        rng: &mut dyn RngCore,
    ) -> Option<ScatterResult> {
        match *self {
            Material::Lambertian { albedo } => {
                let target = rec.p + rec.normal + random_in_unit_sphere(rng);
                Some(ScatterResult {
                    attenuation: albedo,
                    scattered: Ray::new(rec.p, target - rec.p),
                })
            }
            Material::Metal { albedo, fuzz } => {
                let reflected = reflect(ray_in.direction().normalize(), rec.normal);
                let scattered_dir = reflected + fuzz * random_in_unit_sphere(rng);

                // Rays pushed below the surface are absorbed
                if scattered_dir.dot(rec.normal) > 0.0 {
                    Some(ScatterResult {
                        attenuation: albedo,
                        scattered: Ray::new(rec.p, scattered_dir),
                    })
                } else {
                    None
                }
            }
            Material::Dielectric { ior } => Some(scatter_dielectric(ior, ray_in, rec, rng)),
        }
    }
}

fn scatter_dielectric(
    ior: f32,
    ray_in: &Ray,
    rec: &HitRecord,
    rng: &mut dyn RngCore,
) -> ScatterResult {
    let direction = ray_in.direction();
    let d_dot_n = direction.dot(rec.normal);

    // Sphere normals point outward, so a positive dot means we are leaving the medium
    let (outward_normal, ratio, cosine) = if d_dot_n > 0.0 {
        let cosine = d_dot_n / direction.length();
        let cosine = (1.0 - ior * ior * (1.0 - cosine * cosine)).sqrt();
        (-rec.normal, ior, cosine)
    } else {
        (rec.normal, 1.0 / ior, -d_dot_n / direction.length())
    };

    let refracted = refract(direction, outward_normal, ratio);
    let reflect_probability = match refracted {
        Some(_) => schlick(cosine, ior),
        None => 1.0,
    };

    // One draw per scatter, even when total internal reflection decides the branch
    let draw = gen_f32(rng);
    let scattered_dir = match refracted {
        Some(refracted) if draw >= reflect_probability => refracted,
        _ => reflect(direction, rec.normal),
    };

    ScatterResult {
        attenuation: Color::ONE,
        scattered: Ray::new(rec.p, scattered_dir),
    }
}

fn clamp_albedo(albedo: Color) -> Color {
    let clamped = albedo.clamp(Color::ZERO, Color::ONE);
    if clamped != albedo {
        log::warn!("Albedo {} outside [0, 1], clamping to {}", albedo, clamped);
    }
    clamped
}

/// Reflect a vector about a normal.
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Refract a vector through a surface with relative index `ratio`.
///
/// Returns `None` on total internal reflection.
#[inline]
pub fn refract(v: Vec3, n: Vec3, ratio: f32) -> Option<Vec3> {
    let uv = v.normalize();
    let dt = uv.dot(n);
    let discriminant = 1.0 - ratio * ratio * (1.0 - dt * dt);
    if discriminant > 0.0 {
        Some(ratio * (uv - n * dt) - n * discriminant.sqrt())
    } else {
        None
    }
}

/// Schlick's approximation for reflectance
#[inline]
pub fn schlick(cosine: f32, ior: f32) -> f32 {
    let r0 = ((1.0 - ior) / (1.0 + ior)).powi(2);
    r0 + (1.0 - r0) * (1.0 - cosine).powi(5)
}
