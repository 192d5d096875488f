//! Error types for swath and spherical geometry.

use thiserror::Error;

/// Errors raised while constructing or querying geometry objects.
///
/// Every variant is a validation failure: the call that produced it did not
/// build a partial object and nothing was retried.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// Latitude outside of [-π/2, π/2].
    #[error("latitude {0} is outside of [-pi/2, pi/2]")]
    InvalidLatitude(f64),

    /// Longitude or latitude is infinite or NaN.
    #[error("{axis} value {value} is not finite")]
    NonFinite { axis: &'static str, value: f64 },

    /// An array with several elements was given where a scalar is required.
    #[error("expected a scalar {axis}, got {len} elements (use SMultiPoint for several points)")]
    NotScalar { axis: &'static str, len: usize },

    /// A scalar was given where an array is required.
    #[error("expected an array of {axis} values, got a scalar (use SPoint for a single point)")]
    NotArray { axis: &'static str },

    /// Longitude and latitude arrays have different lengths.
    #[error("longitude and latitude lengths differ: {lon} != {lat}")]
    LengthMismatch { lon: usize, lat: usize },

    /// No coordinates were given.
    #[error("at least one coordinate is required")]
    Empty,

    /// Two arrays that must share a shape do not.
    #[error("shape mismatch: {left:?} != {right:?}")]
    ShapeMismatch {
        left: (usize, usize),
        right: (usize, usize),
    },

    /// The perimeter of a swath cannot be computed.
    #[error("can't compute boundary coordinates: {0}")]
    InvalidBoundary(String),

    /// Invalid number of vertices per bbox side.
    #[error("invalid bbox frequency {0}, at least 2 vertices per side are required")]
    InvalidFrequency(usize),

    /// An index or slice reaches past the array.
    #[error("requested {requested} is outside of array bounds {bounds}")]
    OutOfBounds { requested: String, bounds: String },

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

impl GeometryError {
    /// Create an InvalidBoundary error.
    pub fn invalid_boundary(msg: impl Into<String>) -> Self {
        Self::InvalidBoundary(msg.into())
    }

    /// Create an OutOfBounds error.
    pub fn out_of_bounds(requested: impl Into<String>, bounds: impl Into<String>) -> Self {
        Self::OutOfBounds {
            requested: requested.into(),
            bounds: bounds.into(),
        }
    }

    /// Create a Config error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

/// Result type for geometry operations.
pub type Result<T> = std::result::Result<T, GeometryError>;
