//! JSON scene descriptions.
//!
//! ```json
//! {
//!   "camera": { "look_from": [13, 2, 3], "look_at": [0, 0, 0], "vfov": 20, "aperture": 0.1 },
//!   "background": { "type": "sky" },
//!   "spheres": [
//!     { "center": [0, -1000, 0], "radius": 1000,
//!       "material": { "type": "lambertian", "albedo": [0.5, 0.5, 0.5] } }
//!   ]
//! }
//! ```

use std::path::Path;

use lumen_renderer::{Background, CameraSettings, Color, Material, RenderError, Scene, Sphere, Vec3};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while loading a scene file.
#[derive(Error, Debug)]
pub enum SceneFileError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid sphere #{index}: {source}")]
    Sphere {
        index: usize,
        #[source]
        source: RenderError,
    },
}

pub type SceneFileResult<T> = Result<T, SceneFileError>;

/// Top level of a scene file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneFile {
    #[serde(default)]
    pub camera: Option<CameraDescription>,

    #[serde(default)]
    pub background: Option<BackgroundDescription>,

    pub spheres: Vec<SphereDescription>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraDescription {
    pub look_from: [f32; 3],
    pub look_at: [f32; 3],

    #[serde(default = "default_up")]
    pub up: [f32; 3],

    /// Vertical field of view in degrees
    pub vfov: f32,

    #[serde(default)]
    pub aperture: f32,

    /// Defaults to the distance between `look_from` and `look_at`
    #[serde(default)]
    pub focus_distance: Option<f32>,
}

fn default_up() -> [f32; 3] {
    [0.0, 1.0, 0.0]
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SphereDescription {
    pub center: [f32; 3],
    pub radius: f32,
    pub material: MaterialDescription,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MaterialDescription {
    Lambertian {
        albedo: [f32; 3],
    },
    Metal {
        albedo: [f32; 3],
        #[serde(default)]
        fuzz: f32,
    },
    Dielectric {
        ior: f32,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BackgroundDescription {
    Sky,
    Solid { color: [f32; 3] },
}

impl TryFrom<MaterialDescription> for Material {
    type Error = RenderError;

    fn try_from(description: MaterialDescription) -> Result<Self, Self::Error> {
        match description {
            MaterialDescription::Lambertian { albedo } => {
                Ok(Material::lambertian(Color::from(albedo)))
            }
            MaterialDescription::Metal { albedo, fuzz } => {
                Ok(Material::metal(Color::from(albedo), fuzz))
            }
            MaterialDescription::Dielectric { ior } => Material::dielectric(ior),
        }
    }
}

impl From<BackgroundDescription> for Background {
    fn from(description: BackgroundDescription) -> Self {
        match description {
            BackgroundDescription::Sky => Background::Sky,
            BackgroundDescription::Solid { color } => Background::Solid(Color::from(color)),
        }
    }
}

impl CameraDescription {
    /// Camera settings without an aspect ratio; the caller sets it from the
    /// image size.
    pub fn settings(&self) -> CameraSettings {
        let look_from = Vec3::from(self.look_from);
        let look_at = Vec3::from(self.look_at);
        let focus_distance = self
            .focus_distance
            .unwrap_or_else(|| (look_from - look_at).length());

        CameraSettings::new()
            .with_position(look_from, look_at, Vec3::from(self.up))
            .with_lens(self.vfov, self.aperture, focus_distance)
    }
}

impl SceneFile {
    /// Parse a scene description from a JSON string.
    pub fn from_json(json: &str) -> SceneFileResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a scene description file.
    pub fn load(path: impl AsRef<Path>) -> SceneFileResult<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&json)
    }

    /// Build the scene, failing on the first invalid sphere.
    pub fn build_scene(&self) -> SceneFileResult<Scene> {
        let mut scene = Scene::new();
        for (index, description) in self.spheres.iter().enumerate() {
            let sphere = Material::try_from(description.material)
                .and_then(|material| {
                    Sphere::new(Vec3::from(description.center), description.radius, material)
                })
                .map_err(|source| SceneFileError::Sphere { index, source })?;
            scene.add(sphere);
        }
        Ok(scene)
    }
}
