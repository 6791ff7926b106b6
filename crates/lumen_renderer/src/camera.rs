//! Thin-lens camera for ray generation.

use crate::sampling::random_in_unit_disk;
use crate::{RenderError, RenderResult};
use lumen_math::{Ray, Vec3};
use rand::RngCore;

/// Camera placement and lens parameters.
///
/// Built up with the `with_*` methods, then turned into an immutable
/// [`Camera`] by [`CameraSettings::build`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraSettings {
    // Camera positioning
    pub look_from: Vec3,
    pub look_at: Vec3,
    pub vup: Vec3,

    // Lens settings
    pub vfov: f32,           // Vertical field of view in degrees
    pub aspect_ratio: f32,   // Viewport width / height
    pub aperture: f32,       // Lens diameter; 0 is a pinhole
    pub focus_distance: f32, // Distance from camera to plane of perfect focus
}

impl CameraSettings {
    /// Create camera settings with default values.
    pub fn new() -> Self {
        Self {
            look_from: Vec3::new(0.0, 0.0, 0.0),
            look_at: Vec3::new(0.0, 0.0, -1.0),
            vup: Vec3::new(0.0, 1.0, 0.0),
            vfov: 90.0,
            aspect_ratio: 16.0 / 9.0,
            aperture: 0.0,
            focus_distance: 1.0,
        }
    }

    /// Set camera position.
    pub fn with_position(mut self, look_from: Vec3, look_at: Vec3, vup: Vec3) -> Self {
        self.look_from = look_from;
        self.look_at = look_at;
        self.vup = vup;
        self
    }

    /// Set lens settings.
    pub fn with_lens(mut self, vfov: f32, aperture: f32, focus_distance: f32) -> Self {
        self.vfov = vfov;
        self.aperture = aperture;
        self.focus_distance = focus_distance;
        self
    }

    /// Set the viewport aspect ratio (width / height).
    pub fn with_aspect_ratio(mut self, aspect_ratio: f32) -> Self {
        self.aspect_ratio = aspect_ratio;
        self
    }

    /// Validate the settings and compute the camera basis and viewport.
    pub fn build(&self) -> RenderResult<Camera> {
        if !(self.vfov > 0.0 && self.vfov < 180.0) {
            return Err(RenderError::InvalidCameraParameter {
                name: "vfov",
                value: self.vfov,
            });
        }
        if !(self.aspect_ratio.is_finite() && self.aspect_ratio > 0.0) {
            return Err(RenderError::InvalidCameraParameter {
                name: "aspect_ratio",
                value: self.aspect_ratio,
            });
        }
        if !(self.aperture.is_finite() && self.aperture >= 0.0) {
            return Err(RenderError::InvalidCameraParameter {
                name: "aperture",
                value: self.aperture,
            });
        }
        if !(self.focus_distance.is_finite() && self.focus_distance > 0.0) {
            return Err(RenderError::InvalidCameraParameter {
                name: "focus_distance",
                value: self.focus_distance,
            });
        }

        let half_height = (self.vfov.to_radians() / 2.0).tan();
        let half_width = self.aspect_ratio * half_height;

        // Calculate camera basis vectors
        let w = (self.look_from - self.look_at)
            .try_normalize()
            .ok_or(RenderError::DegenerateCamera("look_from and look_at coincide"))?;
        let u = self
            .vup
            .cross(w)
            .try_normalize()
            .ok_or(RenderError::DegenerateCamera("up vector is parallel to the view direction"))?;
        let v = w.cross(u);

        let origin = self.look_from;
        let focus = self.focus_distance;
        let lower_left_corner =
            origin - half_width * focus * u - half_height * focus * v - focus * w;

        log::debug!("Camera basis u={} v={} w={}", u, v, w);

        Ok(Camera {
            origin,
            lower_left_corner,
            horizontal: 2.0 * half_width * focus * u,
            vertical: 2.0 * half_height * focus * v,
            u,
            v,
            w,
            lens_radius: self.aperture / 2.0,
        })
    }
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self::new()
    }
}

/// Camera for generating rays into the scene. Immutable once built.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    origin: Vec3,
    lower_left_corner: Vec3,
    horizontal: Vec3,
    vertical: Vec3,
    u: Vec3,
    v: Vec3,
    w: Vec3,
    lens_radius: f32,
}

impl Camera {
    /// Generate a ray through normalized viewport coordinates (s, t).
    ///
    /// (0, 0) is the lower left corner of the viewport, (1, 1) the upper
    /// right. The origin is jittered across the lens for defocus blur.
    pub fn get_ray(&self, s: f32, t: f32, rng: &mut dyn RngCore) -> Ray {
        let rd = self.lens_radius * random_in_unit_disk(rng);
        let offset = self.u * rd.x + self.v * rd.y;

        Ray::new(
            self.origin + offset,
            self.lower_left_corner + s * self.horizontal + t * self.vertical - self.origin - offset,
        )
    }

    /// The orthonormal camera basis (u, v, w); w points away from the target.
    pub fn basis(&self) -> (Vec3, Vec3, Vec3) {
        (self.u, self.v, self.w)
    }

    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    pub fn lens_radius(&self) -> f32 {
        self.lens_radius
    }
}
