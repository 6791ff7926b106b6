//! Lumen Renderer - CPU Path Tracing
//!
//! A Monte Carlo path tracer over a linear list of spheres with diffuse,
//! metal and dielectric materials, a thin-lens camera, and a sky background.
//!
//! Every random draw comes from an `RngCore` passed in by the caller, and the
//! scene is read-only while rendering, so rows can be traced in parallel.

mod camera;
mod error;
mod hittable;
pub mod integrator;
mod material;
pub mod output;
mod renderer;
pub mod sampling;
mod scene;
mod sphere;

pub use camera::{Camera, CameraSettings};
pub use error::{RenderError, RenderResult};
pub use hittable::{HitRecord, Hittable};
pub use integrator::{ray_color, trace_path, Background, PathSample};
pub use material::{Color, Material, ScatterResult};
pub use renderer::{
    color_to_rgb, linear_to_gamma, render, render_cancellable, render_pixel, render_with_rng,
    ImageBuffer, RenderConfig,
};
pub use scene::{Primitive, Scene};
pub use sphere::Sphere;

/// Re-export Vec3 and common math types from lumen_math
pub use lumen_math::{Interval, Ray, Vec3};
