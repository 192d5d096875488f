//! Points on the unit sphere.
//!
//! This crate provides:
//!
//! - **Validated points**: [`SPoint`] and [`SMultiPoint`] in radians, with
//!   latitude range and finiteness checked at construction
//! - **Great-circle distances**: Vincenty and haversine, pairwise between
//!   any two point sets via [`SphericalCoordinates`]
//! - **Planar interchange**: conversion to `geo` points in degrees
//!
//! # Example
//!
//! ```
//! use std::f64::consts::{FRAC_PI_2, PI};
//! use spherical::{SMultiPoint, SphericalCoordinates};
//!
//! let poles = SMultiPoint::new([0.0, PI], [-FRAC_PI_2, FRAC_PI_2]).unwrap();
//! assert_eq!(poles.to_string(), "[[   0.  -90.]\n [-180.   90.]]");
//!
//! let d = poles.distance(&poles);
//! assert_eq!(d.shape(), (2, 2));
//! ```

pub mod coords;
pub mod distance;
pub mod multipoint;
pub mod point;
pub mod render;

// Re-export commonly used types at crate root
pub use coords::{wrap_longitude, CoordInput};
pub use distance::{haversine, vincenty, Distance, DistanceMatrix, SphericalCoordinates};
pub use multipoint::SMultiPoint;
pub use point::SPoint;
pub use resample_common::{GeometryError, Result};
