use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::LevelFilter;
use lumen_renderer::RenderConfig;

/// Log levels selectable from the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "lumen")]
#[command(about = "Path trace a scene of spheres to an image file")]
pub struct Args {
    /// Image width in pixels
    #[arg(long, default_value_t = 1200)]
    pub width: u32,

    /// Image height in pixels
    #[arg(long, default_value_t = 800)]
    pub height: u32,

    /// Number of samples per pixel
    #[arg(short = 's', long = "samples", default_value_t = 5)]
    pub samples_per_pixel: u32,

    /// Maximum number of bounces per path
    #[arg(long, default_value_t = 50)]
    pub max_depth: u32,

    /// Seed for scene generation and sampling (random when omitted)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Worker threads (defaults to one per core)
    #[arg(short = 'j', long)]
    pub threads: Option<usize>,

    /// Output file path (.ppm, .png, .jpg, .bmp or .tga)
    #[arg(short, long, default_value = "image.ppm")]
    pub output: PathBuf,

    /// JSON scene description; the random sphere field is used when omitted
    #[arg(long)]
    pub scene: Option<PathBuf>,

    /// Half extent of the random sphere grid
    #[arg(long, default_value_t = 2)]
    pub grid: i32,

    /// Set the logging level
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,
}

impl Args {
    /// Render settings taken from the command line.
    pub fn render_config(&self, seed: u64) -> RenderConfig {
        RenderConfig {
            width: self.width,
            height: self.height,
            samples_per_pixel: self.samples_per_pixel,
            max_depth: self.max_depth,
            seed,
            ..RenderConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["lumen"]).unwrap();
        assert_eq!(args.width, 1200);
        assert_eq!(args.height, 800);
        assert_eq!(args.samples_per_pixel, 5);
        assert_eq!(args.max_depth, 50);
        assert_eq!(args.grid, 2);
        assert_eq!(args.output, PathBuf::from("image.ppm"));
        assert!(args.seed.is_none());
        assert!(args.scene.is_none());
        assert_eq!(args.log_level, LogLevel::Info);
    }

    #[test]
    fn test_render_config_from_args() {
        let args = Args::try_parse_from([
            "lumen",
            "--width",
            "64",
            "--height",
            "32",
            "-s",
            "4",
            "--max-depth",
            "8",
            "-o",
            "out.png",
            "--log-level",
            "debug",
        ])
        .unwrap();

        let config = args.render_config(7);
        assert_eq!((config.width, config.height), (64, 32));
        assert_eq!(config.samples_per_pixel, 4);
        assert_eq!(config.max_depth, 8);
        assert_eq!(config.seed, 7);
        assert_eq!(config.aspect_ratio(), 2.0);
        assert_eq!(LevelFilter::from(args.log_level), LevelFilter::Debug);
    }

    #[test]
    fn test_rejects_bad_numbers() {
        assert!(Args::try_parse_from(["lumen", "--width", "-3"]).is_err());
        assert!(Args::try_parse_from(["lumen", "--log-level", "loud"]).is_err());
    }
}
