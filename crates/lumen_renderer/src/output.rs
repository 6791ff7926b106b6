//! Image encoders for rendered frames.
//!
//! Kept apart from the tracing kernel: nothing else in the crate does I/O.

use crate::ImageBuffer;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while writing an image.
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Unsupported output format: {0}")]
    UnsupportedFormat(String),

    #[error("Pixel buffer does not match {width}x{height}")]
    BufferSize { width: u32, height: u32 },
}

pub type OutputResult<T> = Result<T, OutputError>;

/// Write the image as ASCII PPM (P3), top row first.
pub fn write_ppm<W: Write>(image: &ImageBuffer, writer: &mut W) -> OutputResult<()> {
    writeln!(writer, "P3")?;
    writeln!(writer, "{} {}", image.width, image.height)?;
    writeln!(writer, "255")?;

    for [r, g, b] in image.to_rgb8() {
        writeln!(writer, "{} {} {}", r, g, b)?;
    }

    Ok(())
}

/// Save the image, picking the encoder from the file extension.
///
/// `.ppm` is written directly; `.png`, `.jpg`, `.jpeg`, `.bmp` and `.tga` go
/// through the `image` crate.
pub fn save_image(image: &ImageBuffer, path: impl AsRef<Path>) -> OutputResult<()> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "ppm" => {
            let mut writer = BufWriter::new(File::create(path)?);
            write_ppm(image, &mut writer)?;
            writer.flush()?;
        }
        "png" | "jpg" | "jpeg" | "bmp" | "tga" => {
            let rgb = image::RgbImage::from_raw(image.width, image.height, image.to_rgb_bytes())
                .ok_or(OutputError::BufferSize {
                    width: image.width,
                    height: image.height,
                })?;
            rgb.save(path)?;
        }
        _ => return Err(OutputError::UnsupportedFormat(path.display().to_string())),
    }

    log::info!("Saved {}", path.display());
    Ok(())
}
