//! Coordinate inputs and per-value validation.

use std::f64::consts::{FRAC_PI_2, PI, TAU};

use resample_common::{GeometryError, Result};

/// A longitude or latitude argument: one value or an array of values.
///
/// [`SPoint`](crate::SPoint) takes scalars (or single-element arrays) and
/// [`SMultiPoint`](crate::SMultiPoint) takes arrays, even of length one.
#[derive(Debug, Clone, PartialEq)]
pub enum CoordInput {
    Scalar(f64),
    Array(Vec<f64>),
}

impl CoordInput {
    /// The values as a slice, whatever the input kind.
    pub fn values(&self) -> &[f64] {
        match self {
            CoordInput::Scalar(value) => std::slice::from_ref(value),
            CoordInput::Array(values) => values,
        }
    }

    pub fn is_scalar(&self) -> bool {
        matches!(self, CoordInput::Scalar(_))
    }
}

impl From<f64> for CoordInput {
    fn from(value: f64) -> Self {
        CoordInput::Scalar(value)
    }
}

impl From<Vec<f64>> for CoordInput {
    fn from(values: Vec<f64>) -> Self {
        CoordInput::Array(values)
    }
}

impl From<&[f64]> for CoordInput {
    fn from(values: &[f64]) -> Self {
        CoordInput::Array(values.to_vec())
    }
}

impl<const N: usize> From<[f64; N]> for CoordInput {
    fn from(values: [f64; N]) -> Self {
        CoordInput::Array(values.to_vec())
    }
}

/// Map a longitude in radians into `[-π, π)`.
///
/// `π` and `-π` both map to `-π`.
pub fn wrap_longitude(lon: f64) -> f64 {
    let wrapped = (lon + PI).rem_euclid(TAU) - PI;
    // rem_euclid may round up to TAU itself.
    if wrapped >= PI {
        wrapped - TAU
    } else {
        wrapped
    }
}

/// Check one lon/lat pair in radians.
pub(crate) fn validate(lon: f64, lat: f64) -> Result<()> {
    if !lon.is_finite() {
        return Err(GeometryError::NonFinite {
            axis: "longitude",
            value: lon,
        });
    }
    if !lat.is_finite() {
        return Err(GeometryError::NonFinite {
            axis: "latitude",
            value: lat,
        });
    }
    if lat.abs() > FRAC_PI_2 {
        return Err(GeometryError::InvalidLatitude(lat));
    }
    Ok(())
}

/// Convert a lon/lat pair from degrees, validating it in degrees.
///
/// Checking the range before conversion keeps `±90°` valid even when the
/// converted value rounds past `±π/2`.
pub(crate) fn radians_from_degrees(lon: f64, lat: f64) -> Result<(f64, f64)> {
    if lon.is_finite() && lat.is_finite() && lat.abs() > 90.0 {
        return Err(GeometryError::InvalidLatitude(lat.to_radians()));
    }
    let (lon, lat) = (lon.to_radians(), lat.to_radians().clamp(-FRAC_PI_2, FRAC_PI_2));
    validate(lon, lat)?;
    Ok((lon, lat))
}

// numpy `isclose` defaults.
const RTOL: f64 = 1e-5;
const ATOL: f64 = 1e-8;

fn within_tolerance(difference: f64, reference: f64) -> bool {
    difference.abs() <= ATOL + RTOL * reference.abs()
}

/// Whether two lon/lat pairs denote the same point, across the antimeridian.
pub(crate) fn same_position(lon1: f64, lat1: f64, lon2: f64, lat2: f64) -> bool {
    within_tolerance(wrap_longitude(lon1 - lon2), lon2) && within_tolerance(lat1 - lat2, lat2)
}
