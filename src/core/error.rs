use thiserror::Error;

/// Failures at the edges of the crate: parsing user input and writing plots.
/// The solver and playback themselves never fail.
#[derive(Debug, Error)]
pub enum SimError {
    #[error("{field} must be a finite number, got {value}")]
    NonFinite { field: &'static str, value: f64 },

    #[error("integration step must be between {min} and {max} s, got {value}")]
    StepSize { value: f64, min: f64, max: f64 },

    #[error("invalid viewport '{0}': expected <width>x<height> in pixels")]
    Viewport(String),

    #[error("could not render plot: {0}")]
    Plot(String),
}

pub type Result<T> = std::result::Result<T, SimError>;
