//! Swath definitions for satellite scan geometry.
//!
//! A swath is a pair of 2-D longitude/latitude grids. This crate provides:
//!
//! - **Content hashing**: swaths are usable as map keys; hashing never
//!   evaluates lazy arrays
//! - **Perimeter extraction**: the boundary of a curvilinear grid with
//!   decimation, NaN skipping and winding control
//! - **Two front ends**: the future [`SwathDefinition`] and the
//!   [`LegacySwathDefinition`], both behind the [`Swath`] trait
//!
//! # Example
//!
//! ```
//! use resample_common::Array2;
//! use swath::SwathDefinition;
//!
//! let lons = Array2::from_shape_fn((50, 10), |_, col| 3.0 + col as f64);
//! let lats = Array2::from_shape_fn((50, 10), |row, _| 75.0 - row as f64);
//! let swath = SwathDefinition::new(lons, lats).unwrap();
//!
//! let bbox = swath.get_bbox_lonlats(Some(5), true).unwrap();
//! assert_eq!(bbox.side_lengths(), [5, 5, 5, 5]);
//! assert!(bbox.is_clockwise());
//! ```

pub mod bbox;
pub mod definition;
pub mod geometry;
pub mod legacy;

// Re-export commonly used types at crate root
pub use bbox::{is_clockwise, BboxSides};
pub use definition::SwathDefinition;
pub use geometry::{swath_from_config, Swath};
pub use legacy::LegacySwathDefinition;
