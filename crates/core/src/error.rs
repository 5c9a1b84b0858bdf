//! Configuration errors
//!
//! The diffusion kernels themselves are total functions over a well-formed grid,
//! so the only fallible surface is configuration: solver constants and grid
//! dimensions are validated before use and rejected, never clamped.

use std::error::Error;
use std::fmt;

/// Rejected solver or grid configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    /// Neighbor-transfer flow rate outside `(0, 1]`.
    FlowRateOutOfRange {
        /// The rejected value.
        value: f32,
    },
    /// Laplacian diffusivity outside `(0, 0.25]`.
    ///
    /// Values above 0.25 make the explicit 4-neighbor scheme diverge.
    DiffusivityOutOfRange {
        /// The rejected value.
        value: f32,
    },
    /// Grid width or height is zero.
    InvalidDimensions {
        /// Requested width in cells.
        width: usize,
        /// Requested height in cells.
        height: usize,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FlowRateOutOfRange { value } => {
                write!(f, "flow rate must be in (0, 1], got {value}")
            }
            Self::DiffusivityOutOfRange { value } => {
                write!(
                    f,
                    "diffusivity must be in (0, 0.25] for a stable explicit scheme, got {value}"
                )
            }
            Self::InvalidDimensions { width, height } => {
                write!(f, "grid dimensions must be at least 1x1, got {width}x{height}")
            }
        }
    }
}

impl Error for ConfigError {}
