//! Single points on the unit sphere.

use std::fmt;

use serde::{Deserialize, Serialize};

use resample_common::{GeometryError, Result};

use crate::coords::{radians_from_degrees, same_position, validate, wrap_longitude, CoordInput};
use crate::distance::{haversine, vincenty, SphericalCoordinates};

/// A point on the unit sphere, in radians.
///
/// The latitude lies in `[-π/2, π/2]` and the longitude is kept in
/// `[-π, π)`. Equality is antimeridian aware and tolerant to rounding.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(try_from = "RawPoint", into = "RawPoint")]
pub struct SPoint {
    lon: f64,
    lat: f64,
}

#[derive(Serialize, Deserialize)]
struct RawPoint {
    lon: f64,
    lat: f64,
}

impl SPoint {
    /// Create a point from scalar coordinates in radians.
    ///
    /// Single-element arrays are accepted as scalars; longer arrays are
    /// rejected with [`GeometryError::NotScalar`].
    ///
    /// ```
    /// use spherical::SPoint;
    ///
    /// let point = SPoint::new(0.0, std::f64::consts::FRAC_PI_2).unwrap();
    /// assert!(SPoint::new(0.0, std::f64::consts::PI).is_err());
    /// assert!(SPoint::new(vec![0.0, 1.0], vec![0.0, 0.5]).is_err());
    /// # let _ = point;
    /// ```
    pub fn new(lon: impl Into<CoordInput>, lat: impl Into<CoordInput>) -> Result<Self> {
        let lon = scalar("longitude", &lon.into())?;
        let lat = scalar("latitude", &lat.into())?;
        validate(lon, lat)?;
        Ok(Self::from_valid(lon, lat))
    }

    /// Create a point from coordinates in degrees.
    pub fn from_degrees(lon: f64, lat: f64) -> Result<Self> {
        let (lon, lat) = radians_from_degrees(lon, lat)?;
        Ok(Self::from_valid(lon, lat))
    }

    pub(crate) fn from_valid(lon: f64, lat: f64) -> Self {
        Self {
            lon: wrap_longitude(lon),
            lat,
        }
    }

    pub fn lon(&self) -> f64 {
        self.lon
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    /// Vincenty distance to `other` in radians.
    pub fn distance(&self, other: &SPoint) -> f64 {
        vincenty(self.lon, self.lat, other.lon, other.lat)
    }

    /// Haversine distance to `other` in radians.
    pub fn hdistance(&self, other: &SPoint) -> f64 {
        haversine(self.lon, self.lat, other.lon, other.lat)
    }

    /// Unit vector `[x, y, z]` with z toward the north pole.
    pub fn to_cartesian(&self) -> [f64; 3] {
        let (sin_lat, cos_lat) = self.lat.sin_cos();
        let (sin_lon, cos_lon) = self.lon.sin_cos();
        [cos_lat * cos_lon, cos_lat * sin_lon, sin_lat]
    }

    /// Planar point in degrees (x = lon, y = lat).
    pub fn to_geo(&self) -> geo::Point<f64> {
        geo::Point::new(self.lon.to_degrees(), self.lat.to_degrees())
    }
}

fn scalar(axis: &'static str, input: &CoordInput) -> Result<f64> {
    match input.values() {
        [value] => Ok(*value),
        values => Err(GeometryError::NotScalar {
            axis,
            len: values.len(),
        }),
    }
}

impl SphericalCoordinates for SPoint {
    fn lons(&self) -> &[f64] {
        std::slice::from_ref(&self.lon)
    }

    fn lats(&self) -> &[f64] {
        std::slice::from_ref(&self.lat)
    }
}

impl PartialEq for SPoint {
    fn eq(&self, other: &Self) -> bool {
        same_position(self.lon, self.lat, other.lon, other.lat)
    }
}

impl fmt::Display for SPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.lon, self.lat)
    }
}

impl TryFrom<RawPoint> for SPoint {
    type Error = GeometryError;

    fn try_from(raw: RawPoint) -> Result<Self> {
        Self::new(raw.lon, raw.lat)
    }
}

impl From<SPoint> for RawPoint {
    fn from(point: SPoint) -> Self {
        Self {
            lon: point.lon,
            lat: point.lat,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_latitude_validity() {
        assert_eq!(SPoint::new(0.0, PI), Err(GeometryError::InvalidLatitude(PI)));
        assert!(SPoint::new(0.0, f64::INFINITY).is_err());
        assert!(SPoint::new(0.0, -FRAC_PI_2).is_ok());
    }

    #[test]
    fn test_longitude_validity() {
        assert!(matches!(
            SPoint::new(f64::INFINITY, 0.0),
            Err(GeometryError::NonFinite { axis: "longitude", .. })
        ));
        assert!(SPoint::new(f64::NAN, 0.0).is_err());
    }

    #[test]
    fn test_multi_element_input_rejected() {
        assert_eq!(
            SPoint::new(vec![0.0, PI], vec![-FRAC_PI_2, FRAC_PI_2]),
            Err(GeometryError::NotScalar {
                axis: "longitude",
                len: 2
            })
        );
        assert!(matches!(
            SPoint::new(0.0, Vec::<f64>::new()),
            Err(GeometryError::NotScalar { axis: "latitude", len: 0 })
        ));
        assert!(SPoint::new([1.0], [0.5]).is_ok());
    }

    #[test]
    fn test_longitude_wrapped() {
        let point = SPoint::new(PI, 0.0).unwrap();
        assert_eq!(point.lon(), -PI);
        assert_eq!(point, SPoint::new(-PI, 0.0).unwrap());
    }

    #[test]
    fn test_display() {
        let point = SPoint::new(0.5, -0.25).unwrap();
        assert_eq!(point.to_string(), "(0.5, -0.25)");
    }

    #[test]
    fn test_to_cartesian() {
        let [x, y, z] = SPoint::new(0.0, FRAC_PI_2).unwrap().to_cartesian();
        assert!(x.abs() < 1e-15 && y.abs() < 1e-15);
        assert_eq!(z, 1.0);

        let [x, y, z] = SPoint::new(FRAC_PI_2, 0.0).unwrap().to_cartesian();
        assert!(x.abs() < 1e-15);
        assert!((y - 1.0).abs() < 1e-15);
        assert_eq!(z, 0.0);
    }

    #[test]
    fn test_point_distances() {
        let a = SPoint::new(0.0, -FRAC_PI_2).unwrap();
        let b = SPoint::new(PI, FRAC_PI_2).unwrap();
        assert!((a.distance(&b) - PI).abs() < 1e-12);
        assert!((a.hdistance(&b) - PI).abs() < 1e-6);
        assert_eq!(a.distance(&a), 0.0);
    }
}
