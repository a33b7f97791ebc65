//! Error types for grip surfaces.

use thiserror::Error;

/// Errors that can occur while building the inputs of a grip surface.
///
/// Surface queries themselves never fail; only frame construction does.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SurfaceError {
    /// A frame component is NaN or infinite.
    #[error("frame {0} is not finite")]
    NonFiniteFrame(&'static str),

    /// A frame scale component is too small to invert.
    #[error("frame scale along {axis} is {value}, which cannot be inverted")]
    DegenerateScale {
        /// Axis name (`x`, `y` or `z`).
        axis: char,
        /// Offending scale value.
        value: f64,
    },
}

/// Result type for grip surface operations.
pub type Result<T> = std::result::Result<T, SurfaceError>;
