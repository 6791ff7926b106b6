//! Errors raised while building render inputs.
//!
//! The tracing kernel itself has no failure modes; everything here is a
//! construction-time validation error or a cooperative cancellation.

use thiserror::Error;

/// Errors that can occur while setting up or running a render.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    #[error("Invalid sphere radius: {0} (must be positive and finite)")]
    InvalidRadius(f32),

    #[error("Degenerate camera basis: {0}")]
    DegenerateCamera(&'static str),

    #[error("Invalid camera parameter {name}: {value}")]
    InvalidCameraParameter { name: &'static str, value: f32 },

    #[error("Invalid material parameter {name}: {value}")]
    InvalidMaterialParameter { name: &'static str, value: f32 },

    #[error("Invalid render config: {0}")]
    InvalidConfig(String),

    #[error("Render cancelled")]
    Cancelled,
}

/// Result type for render setup operations.
pub type RenderResult<T> = Result<T, RenderError>;
