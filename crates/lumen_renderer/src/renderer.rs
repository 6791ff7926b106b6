//! Core path tracing renderer.
//!
//! Implements Monte Carlo path tracing with:
//! - Anti-aliasing via jittered multi-sampling
//! - Gamma correction and 8-bit quantization
//! - Row-parallel rendering with per-row deterministic seeding

use crate::integrator::{trace_path, Background, PathSample};
use crate::sampling::gen_f32;
use crate::{Camera, Color, Hittable, RenderError, RenderResult};
use lumen_math::Interval;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use rayon::prelude::*;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::time::Instant;

/// Render configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Samples per pixel for anti-aliasing
    pub samples_per_pixel: u32,
    /// Maximum number of scatter events per path
    pub max_depth: u32,
    /// Lower bound on hit distance, keeps scattered rays off their own surface
    pub t_min: f32,
    /// Radiance for rays that escape the scene
    pub background: Background,
    /// Base seed for the per-row random sources
    pub seed: u64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 800,
            samples_per_pixel: 5,
            max_depth: 50,
            t_min: 0.001,
            background: Background::Sky,
            seed: 0,
        }
    }
}

impl RenderConfig {
    /// Image width over height.
    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    /// Check that the configuration describes a renderable image.
    pub fn validate(&self) -> RenderResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(RenderError::InvalidConfig(format!(
                "image size must be non-zero, got {}x{}",
                self.width, self.height
            )));
        }
        if self.samples_per_pixel == 0 {
            return Err(RenderError::InvalidConfig(
                "samples per pixel must be at least 1".to_string(),
            ));
        }
        if !(self.t_min.is_finite() && self.t_min > 0.0) {
            return Err(RenderError::InvalidConfig(format!(
                "t_min must be a small positive value, got {}",
                self.t_min
            )));
        }
        Ok(())
    }
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

/// Convert an averaged linear color to gamma-corrected 8-bit RGB.
pub fn color_to_rgb(color: Color) -> [u8; 3] {
    let quantize = |c: f32| (255.999 * Interval::UNIT.clamp(linear_to_gamma(c))) as u8;
    [quantize(color.x), quantize(color.y), quantize(color.z)]
}

/// Image of averaged linear colors.
///
/// Pixels are row-major with row 0 at the TOP of the image.
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
            pixels: vec![Color::ZERO; width as usize * height as usize],
        }
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

    /// Quantized RGB triples, top row first.
    pub fn to_rgb8(&self) -> Vec<[u8; 3]> {
        self.pixels.iter().map(|&color| color_to_rgb(color)).collect()
    }

    /// Quantized RGB as a flat byte buffer (for encoders).
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        bytemuck::cast_slice::<[u8; 3], u8>(self.to_rgb8().as_slice()).to_vec()
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}

/// Render a single pixel with multi-sampling.
///
/// `(x, y)` uses image coordinates (row 0 at the top). The returned color is
/// the linear average over all samples; segments are summed.
///
/// # Panics
///
/// Debug builds panic if `(x, y)` lies outside `config.width` x `config.height`.
pub fn render_pixel(
    camera: &Camera,
    world: &dyn Hittable,
    x: u32,
    y: u32,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> PathSample {
    debug_assert!(
        x < config.width && y < config.height,
        "pixel ({}, {}) outside {}x{} image",
        x,
        y,
        config.width,
        config.height
    );

    // Viewport t runs bottom to top
    let row_from_bottom = (config.height - 1 - y) as f32;
    let mut pixel_color = Color::ZERO;
    let mut segments = 0;

    for _ in 0..config.samples_per_pixel {
        let s = (x as f32 + gen_f32(rng)) / config.width as f32;
        let t = (row_from_bottom + gen_f32(rng)) / config.height as f32;

        let ray = camera.get_ray(s, t, rng);
        let sample = trace_path(&ray, world, config, rng);
        pixel_color += sample.color;
        segments += sample.segments;
    }

    PathSample {
        color: pixel_color / config.samples_per_pixel as f32,
        segments,
    }
}

/// Render the entire scene with a single caller-supplied random source.
///
/// Single-threaded; pixels are visited top row first.
pub fn render_with_rng(
    camera: &Camera,
    world: &dyn Hittable,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> RenderResult<ImageBuffer> {
    config.validate()?;
    let mut image = ImageBuffer::new(config.width, config.height);

    for y in 0..config.height {
        for x in 0..config.width {
            let sample = render_pixel(camera, world, x, y, config, rng);
            image.set(x, y, sample.color);
        }
    }

    Ok(image)
}

/// Render the entire scene in parallel.
pub fn render(
    camera: &Camera,
    world: &dyn Hittable,
    config: &RenderConfig,
) -> RenderResult<ImageBuffer> {
    render_cancellable(camera, world, config, &AtomicBool::new(false))
}

/// Render the entire scene in parallel, checking `cancel` between rows.
///
/// Rows are distributed over the rayon pool. Each row draws from its own
/// generator seeded with `config.seed + row`, so the image does not depend on
/// scheduling or thread count.
pub fn render_cancellable(
    camera: &Camera,
    world: &dyn Hittable,
    config: &RenderConfig,
    cancel: &AtomicBool,
) -> RenderResult<ImageBuffer> {
    config.validate()?;

    log::info!(
        "Rendering {}x{} @ {} spp, max depth {}, {} threads",
        config.width,
        config.height,
        config.samples_per_pixel,
        config.max_depth,
        rayon::current_num_threads()
    );

    let start = Instant::now();
    let mut image = ImageBuffer::new(config.width, config.height);
    let rows_done = AtomicU32::new(0);
    let progress_step = (config.height / 10).max(1);

    let row_segments = image
        .pixels
        .par_chunks_mut(config.width as usize)
        .enumerate()
        .map(|(y, row)| {
            if cancel.load(Ordering::Relaxed) {
                return Err(RenderError::Cancelled);
            }

            let y = y as u32;
            let mut rng = StdRng::seed_from_u64(config.seed.wrapping_add(u64::from(y)));
            let mut segments = 0u64;

            for (x, pixel) in row.iter_mut().enumerate() {
                let sample = render_pixel(camera, world, x as u32, y, config, &mut rng);
                *pixel = sample.color;
                segments += u64::from(sample.segments);
            }

            let done = rows_done.fetch_add(1, Ordering::Relaxed) + 1;
            if done % progress_step == 0 {
                log::debug!("Rendered {}/{} rows", done, config.height);
            }

            Ok(segments)
        })
        .collect::<RenderResult<Vec<u64>>>()?;

    let total_segments: u64 = row_segments.iter().sum();
    let paths =
        u64::from(config.width) * u64::from(config.height) * u64::from(config.samples_per_pixel);
    log::debug!(
        "Traced {} rays, mean path length {:.2}",
        total_segments,
        total_segments as f64 / paths as f64
    );
    log::info!("Rendered in {:.2?}", start.elapsed());

    Ok(image)
}
