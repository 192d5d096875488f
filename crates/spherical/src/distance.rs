//! Great-circle distances on the unit sphere.

use std::fmt;

use rayon::prelude::*;

use crate::render::format_matrix;

/// Vincenty's formula, stable for coincident and antipodal points.
pub fn vincenty(lon1: f64, lat1: f64, lon2: f64, lat2: f64) -> f64 {
    let dlon = lon1 - lon2;
    let (sin_lat1, cos_lat1) = lat1.sin_cos();
    let (sin_lat2, cos_lat2) = lat2.sin_cos();
    let (sin_dlon, cos_dlon) = dlon.sin_cos();

    let a = cos_lat2 * sin_dlon;
    let b = cos_lat1 * sin_lat2 - sin_lat1 * cos_lat2 * cos_dlon;
    let c = sin_lat1 * sin_lat2 + cos_lat1 * cos_lat2 * cos_dlon;
    a.hypot(b).atan2(c)
}

/// The haversine formula. Loses precision near antipodes.
pub fn haversine(lon1: f64, lat1: f64, lon2: f64, lat2: f64) -> f64 {
    let half_dlat = ((lat2 - lat1) / 2.0).sin();
    let half_dlon = ((lon2 - lon1) / 2.0).sin();
    let h = half_dlat * half_dlat + lat1.cos() * lat2.cos() * half_dlon * half_dlon;
    // Rounding can push h just past 1 for antipodal points.
    2.0 * h.sqrt().min(1.0).asin()
}

/// Row-major `rows x cols` matrix of pairwise distances in radians.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl DistanceMatrix {
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row < self.rows && col < self.cols {
            Some(self.data[row * self.cols + col])
        } else {
            None
        }
    }

    pub fn row(&self, row: usize) -> Option<&[f64]> {
        (row < self.rows).then(|| &self.data[row * self.cols..(row + 1) * self.cols])
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    pub fn transpose(&self) -> Self {
        let mut data = Vec::with_capacity(self.data.len());
        for col in 0..self.cols {
            for row in 0..self.rows {
                data.push(self.data[row * self.cols + col]);
            }
        }
        Self {
            rows: self.cols,
            cols: self.rows,
            data,
        }
    }
}

impl fmt::Display for DistanceMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_matrix(&self.data, self.cols))
    }
}

/// Result of a pairwise distance query.
///
/// A single pair collapses to [`Distance::Scalar`].
#[derive(Debug, Clone, PartialEq)]
pub enum Distance {
    Scalar(f64),
    Matrix(DistanceMatrix),
}

impl Distance {
    /// `(1, 1)` for a scalar.
    pub fn shape(&self) -> (usize, usize) {
        match self {
            Distance::Scalar(_) => (1, 1),
            Distance::Matrix(matrix) => matrix.shape(),
        }
    }

    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            Distance::Scalar(value) => Some(*value),
            Distance::Matrix(_) => None,
        }
    }

    pub fn as_matrix(&self) -> Option<&DistanceMatrix> {
        match self {
            Distance::Scalar(_) => None,
            Distance::Matrix(matrix) => Some(matrix),
        }
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        match self {
            Distance::Scalar(value) => (row == 0 && col == 0).then_some(*value),
            Distance::Matrix(matrix) => matrix.get(row, col),
        }
    }

    pub fn transpose(&self) -> Self {
        match self {
            Distance::Scalar(value) => Distance::Scalar(*value),
            Distance::Matrix(matrix) => Distance::Matrix(matrix.transpose()),
        }
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Distance::Scalar(value) => write!(f, "{value}"),
            Distance::Matrix(matrix) => matrix.fmt(f),
        }
    }
}

/// Anything holding one or more points as parallel lon/lat slices in radians.
pub trait SphericalCoordinates {
    fn lons(&self) -> &[f64];
    fn lats(&self) -> &[f64];

    /// Pairwise Vincenty distances from `self` (rows) to `other` (columns).
    fn distance(&self, other: &dyn SphericalCoordinates) -> Distance {
        pairwise(self.lons(), self.lats(), other.lons(), other.lats(), vincenty)
    }

    /// Pairwise haversine distances from `self` (rows) to `other` (columns).
    fn hdistance(&self, other: &dyn SphericalCoordinates) -> Distance {
        pairwise(self.lons(), self.lats(), other.lons(), other.lats(), haversine)
    }
}

/// Matrices with at least this many cells are filled in parallel.
const PARALLEL_THRESHOLD: usize = 1 << 16;

fn pairwise(
    lons1: &[f64],
    lats1: &[f64],
    lons2: &[f64],
    lats2: &[f64],
    metric: fn(f64, f64, f64, f64) -> f64,
) -> Distance {
    let points1: Vec<(f64, f64)> = lons1.iter().copied().zip(lats1.iter().copied()).collect();
    let points2: Vec<(f64, f64)> = lons2.iter().copied().zip(lats2.iter().copied()).collect();
    let (rows, cols) = (points1.len(), points2.len());
    let parallel = rows * cols >= PARALLEL_THRESHOLD;
    tracing::trace!(rows, cols, parallel, "computing pairwise distances");

    let mut data = vec![0.0; rows * cols];
    if cols > 0 {
        let fill_row = |(row, out): (usize, &mut [f64])| {
            let (lon1, lat1) = points1[row];
            for (value, &(lon2, lat2)) in out.iter_mut().zip(&points2) {
                *value = metric(lon1, lat1, lon2, lat2);
            }
        };
        if parallel {
            data.par_chunks_mut(cols).enumerate().for_each(fill_row);
        } else {
            data.chunks_mut(cols).enumerate().for_each(fill_row);
        }
    }

    if rows == 1 && cols == 1 {
        return Distance::Scalar(data[0]);
    }
    Distance::Matrix(DistanceMatrix { rows, cols, data })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

    #[test]
    fn test_vincenty_known_values() {
        assert_eq!(vincenty(0.0, 0.0, 0.0, 0.0), 0.0);
        assert!((vincenty(0.0, 0.0, FRAC_PI_2, 0.0) - FRAC_PI_2).abs() < 1e-12);
        assert!((vincenty(0.0, -FRAC_PI_2, 0.0, FRAC_PI_2) - PI).abs() < 1e-12);
        assert!((vincenty(0.0, 0.0, PI, 0.0) - PI).abs() < 1e-12);
    }

    #[test]
    fn test_haversine_matches_vincenty_away_from_antipodes() {
        let pairs = [(0.1, 0.2, 0.5, -0.3), (-2.0, FRAC_PI_4, 1.0, 0.0), (3.0, -1.2, -3.0, 1.1)];
        for (lon1, lat1, lon2, lat2) in pairs {
            let v = vincenty(lon1, lat1, lon2, lat2);
            let h = haversine(lon1, lat1, lon2, lat2);
            assert!((v - h).abs() < 1e-9, "{v} vs {h}");
        }
    }

    #[test]
    fn test_vincenty_near_coincident_points() {
        let (lon, lat) = (0.3_f64, 0.2_f64);
        let step = 1e-9;
        let north = lat + step;
        let east = lon + step;
        // (lon2, lat2, exact separation)
        let pairs = [
            (lon, north, north - lat),
            (east, lat, (east - lon) * lat.cos()),
            (lon - step, lat - step, ((step * lat.cos()).powi(2) + step * step).sqrt()),
        ];
        for (lon2, lat2, expected) in pairs {
            let v = vincenty(lon, lat, lon2, lat2);
            let h = haversine(lon, lat, lon2, lat2);
            assert!(v.is_finite() && v > 0.0, "{v}");
            assert!(((v - expected) / expected).abs() < 1e-6, "{v} vs {expected}");
            assert!(((v - h) / h).abs() < 1e-6, "{v} vs {h}");
        }
        assert_eq!(vincenty(lon, lat, lon, lat), 0.0);
    }

    #[test]
    fn test_haversine_antipodal_is_finite() {
        let d = haversine(0.0, 0.0, PI, 0.0);
        assert!(d.is_finite());
        assert!((d - PI).abs() < 1e-6);
    }

    #[test]
    fn test_pairwise_shapes() {
        let d = pairwise(&[0.0, 1.0], &[0.0, 0.0], &[0.0, 1.0, 2.0], &[0.0; 3], vincenty);
        assert_eq!(d.shape(), (2, 3));
        assert!(d.as_scalar().is_none());

        let d = pairwise(&[0.0], &[0.0], &[1.0], &[0.0], vincenty);
        let value = d.as_scalar().unwrap();
        assert!((value - 1.0).abs() < 1e-12);
        assert_eq!(d.shape(), (1, 1));
        assert_eq!(d.get(0, 0), Some(value));
        assert_eq!(d.transpose(), d);
    }

    #[test]
    fn test_parallel_fill_matches_serial() {
        let lons: Vec<f64> = (0..300).map(|i| -3.0 + i as f64 * 0.02).collect();
        let lats: Vec<f64> = (0..300).map(|i| -1.5 + i as f64 * 0.01).collect();
        assert!(lons.len() * lats.len() >= PARALLEL_THRESHOLD);

        let d = pairwise(&lons, &lats, &lons, &lats, haversine);
        let matrix = d.as_matrix().unwrap();
        for (row, col) in [(0, 0), (17, 250), (299, 3), (150, 150)] {
            let expected = haversine(lons[row], lats[row], lons[col], lats[col]);
            assert_eq!(matrix.get(row, col), Some(expected));
        }
    }

    #[test]
    fn test_matrix_transpose_and_access() {
        let d = pairwise(&[0.0, 1.0], &[0.0, 0.0], &[0.0, 1.0, 2.0], &[0.0; 3], vincenty);
        let matrix = d.as_matrix().unwrap();
        let t = matrix.transpose();
        assert_eq!(t.shape(), (3, 2));
        for row in 0..2 {
            for col in 0..3 {
                assert_eq!(matrix.get(row, col), t.get(col, row));
            }
        }
        assert_eq!(matrix.row(1).map(<[f64]>::len), Some(3));
        assert!(matrix.row(2).is_none());
        assert!(matrix.get(2, 0).is_none());
    }
}
