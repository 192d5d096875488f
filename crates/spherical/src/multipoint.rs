//! Collections of points on the unit sphere.

use std::fmt;

use serde::{Deserialize, Serialize};

use resample_common::{GeometryError, Result};

use crate::coords::{radians_from_degrees, same_position, validate, wrap_longitude, CoordInput};
use crate::distance::SphericalCoordinates;
use crate::point::SPoint;
use crate::render::format_matrix;

/// One or more points on the unit sphere, as parallel lon/lat arrays in
/// radians.
///
/// Every point obeys the [`SPoint`] rules. Formatting with `{}` or `{:?}`
/// prints the vertices in degrees the way numpy prints an array.
#[derive(Clone, Serialize, Deserialize)]
#[serde(try_from = "RawMultiPoint", into = "RawMultiPoint")]
pub struct SMultiPoint {
    lon: Vec<f64>,
    lat: Vec<f64>,
}

#[derive(Serialize, Deserialize)]
struct RawMultiPoint {
    lon: Vec<f64>,
    lat: Vec<f64>,
}

impl SMultiPoint {
    /// Create a multipoint from coordinate arrays in radians.
    ///
    /// Scalars are rejected with [`GeometryError::NotArray`]; wrap a single
    /// point in a one-element array.
    pub fn new(lon: impl Into<CoordInput>, lat: impl Into<CoordInput>) -> Result<Self> {
        let lon = array("longitude", lon.into())?;
        let lat = array("latitude", lat.into())?;
        check_lengths(&lon, &lat)?;
        for (&lo, &la) in lon.iter().zip(&lat) {
            validate(lo, la)?;
        }
        Ok(Self {
            lon: lon.into_iter().map(wrap_longitude).collect(),
            lat,
        })
    }

    /// Create a multipoint from coordinate slices in degrees.
    pub fn from_degrees(lons: &[f64], lats: &[f64]) -> Result<Self> {
        check_lengths(lons, lats)?;
        let (lon, lat) = lons
            .iter()
            .zip(lats)
            .map(|(&lo, &la)| radians_from_degrees(lo, la))
            .collect::<Result<Vec<_>>>()?
            .into_iter()
            .map(|(lo, la)| (wrap_longitude(lo), la))
            .unzip();
        Ok(Self { lon, lat })
    }

    pub fn lon(&self) -> &[f64] {
        &self.lon
    }

    pub fn lat(&self) -> &[f64] {
        &self.lat
    }

    pub fn len(&self) -> usize {
        self.lon.len()
    }

    /// Always false; empty multipoints cannot be built.
    pub fn is_empty(&self) -> bool {
        self.lon.is_empty()
    }

    /// `[lon, lat]` pairs in radians.
    pub fn vertices(&self) -> Vec<[f64; 2]> {
        self.lon.iter().zip(&self.lat).map(|(&lon, &lat)| [lon, lat]).collect()
    }

    /// `[lon, lat]` pairs in degrees.
    pub fn vertices_in_degrees(&self) -> Vec<[f64; 2]> {
        self.lon
            .iter()
            .zip(&self.lat)
            .map(|(lon, lat)| [lon.to_degrees(), lat.to_degrees()])
            .collect()
    }

    pub fn get(&self, index: usize) -> Option<SPoint> {
        Some(SPoint::from_valid(*self.lon.get(index)?, *self.lat.get(index)?))
    }

    pub fn iter(&self) -> impl Iterator<Item = SPoint> + '_ {
        self.lon
            .iter()
            .zip(&self.lat)
            .map(|(&lon, &lat)| SPoint::from_valid(lon, lat))
    }

    /// Planar multipoint in degrees (x = lon, y = lat).
    pub fn to_geo(&self) -> geo::MultiPoint<f64> {
        geo::MultiPoint::new(self.iter().map(|point| point.to_geo()).collect())
    }
}

fn array(axis: &'static str, input: CoordInput) -> Result<Vec<f64>> {
    match input {
        CoordInput::Scalar(_) => Err(GeometryError::NotArray { axis }),
        CoordInput::Array(values) => Ok(values),
    }
}

fn check_lengths(lon: &[f64], lat: &[f64]) -> Result<()> {
    if lon.len() != lat.len() {
        return Err(GeometryError::LengthMismatch {
            lon: lon.len(),
            lat: lat.len(),
        });
    }
    if lon.is_empty() {
        return Err(GeometryError::Empty);
    }
    Ok(())
}

impl SphericalCoordinates for SMultiPoint {
    fn lons(&self) -> &[f64] {
        &self.lon
    }

    fn lats(&self) -> &[f64] {
        &self.lat
    }
}

impl From<SPoint> for SMultiPoint {
    fn from(point: SPoint) -> Self {
        Self {
            lon: vec![point.lon()],
            lat: vec![point.lat()],
        }
    }
}

impl PartialEq for SMultiPoint {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .zip(other.iter())
                .all(|(a, b)| same_position(a.lon(), a.lat(), b.lon(), b.lat()))
    }
}

impl fmt::Display for SMultiPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let flat: Vec<f64> = self.vertices_in_degrees().into_iter().flatten().collect();
        f.write_str(&format_matrix(&flat, 2))
    }
}

impl fmt::Debug for SMultiPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl TryFrom<RawMultiPoint> for SMultiPoint {
    type Error = GeometryError;

    fn try_from(raw: RawMultiPoint) -> Result<Self> {
        Self::new(raw.lon, raw.lat)
    }
}

impl From<SMultiPoint> for RawMultiPoint {
    fn from(points: SMultiPoint) -> Self {
        Self {
            lon: points.lon,
            lat: points.lat,
        }
    }
}
