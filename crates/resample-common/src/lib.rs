//! Common types shared by the swath and spherical geometry crates.
//!
//! - [`GeometryError`]: validation errors raised by every constructor
//! - [`GeometryConfig`]: runtime switches (legacy vs. future swaths, bbox defaults)
//! - [`array`]: the coordinate container abstraction with eager, lazy and
//!   labeled backends

pub mod array;
pub mod config;
pub mod error;

pub use array::{
    compute_count, concatenate_rows, Array2, CoordArray, Fingerprint, LabeledArray, LazyArray,
};
pub use config::GeometryConfig;
pub use error::{GeometryError, Result};

/// Evenly spaced integer positions from `start` to `stop` inclusive.
///
/// Positions are computed in floating point and truncated, so both ends are
/// always included and interior positions round toward zero.
pub fn linspace_indices(start: usize, stop: usize, num: usize) -> Vec<usize> {
    match num {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop as f64 - start as f64) / (num - 1) as f64;
            let mut indices: Vec<usize> = (0..num)
                .map(|i| (start as f64 + i as f64 * step) as usize)
                .collect();
            indices[num - 1] = stop;
            indices
        }
    }
}
