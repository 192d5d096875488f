//! Test support for the swath and spherical crates.
//!
//! - [`generators`]: longitude/latitude grids shaped like a satellite swath
//! - [`fixtures`]: corner orientations, missing-data patterns and array
//!   backends to iterate over
//! - `assert_*_approx_eq!` macros for float comparisons
//! - [`assert_maximum_computes`] to bound lazy evaluations
//!
//! Member crates pull it in as a dev-dependency:
//!
//! ```toml
//! [dev-dependencies]
//! test-utils.workspace = true
//! ```

pub mod fixtures;
pub mod generators;

// Re-export commonly used items at the crate root
pub use fixtures::*;
pub use generators::*;

/// Run `f` and panic if it triggered more than `max` lazy evaluations on
/// the current thread.
///
/// # Usage
///
/// ```
/// use test_utils::assert_maximum_computes;
///
/// let sum = assert_maximum_computes(0, || 1 + 1);
/// assert_eq!(sum, 2);
/// ```
pub fn assert_maximum_computes<T>(max: usize, f: impl FnOnce() -> T) -> T {
    let before = resample_common::compute_count();
    let result = f();
    let computes = resample_common::compute_count() - before;
    if computes > max {
        panic!(
            "too many lazy computations: {} performed, at most {} allowed",
            computes, max
        );
    }
    result
}

/// Assert that two floats differ by at most `epsilon`.
///
/// Both sides are converted to `f64` first, so mixed literal types work.
///
/// ```
/// use test_utils::assert_approx_eq;
///
/// assert_approx_eq!(std::f64::consts::FRAC_PI_2, 1.57079633, 1e-8);
/// ```
#[macro_export]
macro_rules! assert_approx_eq {
    ($left:expr, $right:expr, $epsilon:expr) => {{
        let (left, right, epsilon) = ($left as f64, $right as f64, $epsilon as f64);
        let diff = (left - right).abs();
        // `!(diff <= epsilon)` so NaN on either side fails too.
        if !(diff <= epsilon) {
            panic!(
                "assertion failed: {} ≈ {} (diff {} > epsilon {})",
                left, right, diff, epsilon
            );
        }
    }};
}

/// Assert that two `(lon, lat)` pairs agree to within `epsilon` on each axis.
///
/// ```
/// use test_utils::assert_coords_approx_eq;
///
/// assert_coords_approx_eq!((-180.0, 90.0), (-179.99999999999997, 90.0), 1e-10);
/// ```
#[macro_export]
macro_rules! assert_coords_approx_eq {
    (($lon1:expr, $lat1:expr), ($lon2:expr, $lat2:expr), $epsilon:expr) => {{
        $crate::assert_approx_eq!($lon1, $lon2, $epsilon);
        $crate::assert_approx_eq!($lat1, $lat2, $epsilon);
    }};
}

/// Assert that two slices have the same length and agree element-wise to
/// within `epsilon`.
///
/// ```
/// use test_utils::assert_slice_approx_eq;
///
/// assert_slice_approx_eq!(&[0.0, -1.5707963267948966], &[0.0, -1.57079633], 1e-8);
/// ```
#[macro_export]
macro_rules! assert_slice_approx_eq {
    ($left:expr, $right:expr, $epsilon:expr) => {{
        let left: &[f64] = $left;
        let right: &[f64] = $right;
        assert_eq!(left.len(), right.len(), "slice lengths differ");
        for (l, r) in left.iter().zip(right) {
            $crate::assert_approx_eq!(*l, *r, $epsilon);
        }
    }};
}

#[cfg(test)]
mod tests {
    use super::*;
    use resample_common::{Array2, CoordArray, LazyArray};

    #[test]
    fn test_assert_approx_eq_passes() {
        assert_approx_eq!(std::f64::consts::PI, 3.14159265, 1e-8);
        assert_approx_eq!(0.0, -0.0, 0.0);
        assert_approx_eq!(90.0_f32, 90.0, 1e-6);
    }

    #[test]
    #[should_panic(expected = "assertion failed")]
    fn test_assert_approx_eq_rejects_nan() {
        assert_approx_eq!(f64::NAN, 0.0, 1.0);
    }

    #[test]
    #[should_panic(expected = "assertion failed")]
    fn test_assert_approx_eq_fails() {
        assert_approx_eq!(-90.1, -90.0, 0.001);
    }

    #[test]
    fn test_assert_coords_approx_eq_passes() {
        assert_coords_approx_eq!((12.00001, 75.0), (12.0, 74.99999), 1e-4);
    }

    #[test]
    fn test_assert_slice_approx_eq_passes() {
        assert_slice_approx_eq!(&[1.0, 2.0], &[1.0, 2.00001], 1e-3);
    }

    #[test]
    fn test_assert_maximum_computes_within_budget() {
        let lazy = LazyArray::from_array(Array2::new(vec![1.0, 2.0], (1, 2)).unwrap());
        let values = assert_maximum_computes(1, || lazy.take(&[(0, 1)]).unwrap());
        assert_eq!(values, vec![2.0]);
    }

    #[test]
    #[should_panic(expected = "too many lazy computations")]
    fn test_assert_maximum_computes_over_budget() {
        let lazy = LazyArray::from_array(Array2::new(vec![1.0, 2.0], (1, 2)).unwrap());
        assert_maximum_computes(0, || lazy.materialize().unwrap());
    }
}
