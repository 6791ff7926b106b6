//! Lumen command line renderer.
//!
//! Builds a scene (the random sphere field, or a JSON scene file), path traces
//! it and writes the image to disk.

use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use lumen_renderer::output::save_image;
use lumen_renderer::{render, Background};
use rand::rngs::StdRng;
use rand::SeedableRng;

mod cli;
mod logger;
mod scene_file;
mod scenes;

use cli::Args;
use logger::init_logger;
use scene_file::SceneFile;

fn main() -> Result<()> {
    let args = Args::parse();
    init_logger(args.log_level.into());

    if let Some(threads) = args.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("Failed to configure the worker pool")?;
    }

    let seed = args.seed.unwrap_or_else(rand::random);
    log::info!("Seed {}", seed);
    let mut config = args.render_config(seed);

    // Build the scene
    let start = Instant::now();
    let (scene, camera_settings) = match &args.scene {
        Some(path) => {
            let file = SceneFile::load(path)
                .with_context(|| format!("Failed to load scene {}", path.display()))?;
            let scene = file.build_scene()?;
            if let Some(background) = file.background {
                config.background = Background::from(background);
            }
            let settings = file
                .camera
                .as_ref()
                .map(|camera| camera.settings())
                .unwrap_or_else(scenes::random_spheres_camera);
            (scene, settings)
        }
        None => {
            let mut rng = StdRng::seed_from_u64(seed);
            let scene = scenes::random_spheres(args.grid, &mut rng)?;
            (scene, scenes::random_spheres_camera())
        }
    };
    log::info!("Scene with {} spheres built in {:.2?}", scene.len(), start.elapsed());

    let camera = camera_settings
        .with_aspect_ratio(config.aspect_ratio())
        .build()
        .context("Invalid camera")?;

    let image = render(&camera, &scene, &config)?;

    save_image(&image, &args.output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    Ok(())
}
