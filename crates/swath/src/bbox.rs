//! Perimeter ("bbox") extraction for swath grids.
//!
//! The perimeter is walked as four sides sharing their corners:
//!
//! ```text
//!   [0, 0] ──── side 0 (top row) ────► [0, w-1]
//!      ▲                                  │
//!   side 3 (left col,                side 1 (right col,
//!   bottom to top)                   top to bottom)
//!      │                                  ▼
//!  [h-1, 0] ◄── side 2 (bottom row) ── [h-1, w-1]
//! ```

use geo::{Coord, LineString, Polygon};
use resample_common::{linspace_indices, CoordArray, GeometryError, Result};

/// Boundary coordinates of a swath, one vector per side.
#[derive(Debug, Clone, PartialEq)]
pub struct BboxSides {
    pub lons: [Vec<f64>; 4],
    pub lats: [Vec<f64>; 4],
}

impl BboxSides {
    /// Number of points on each side.
    pub fn side_lengths(&self) -> [usize; 4] {
        [
            self.lons[0].len(),
            self.lons[1].len(),
            self.lons[2].len(),
            self.lons[3].len(),
        ]
    }

    /// All sides joined into one lon and one lat sequence.
    pub fn concatenated(&self) -> (Vec<f64>, Vec<f64>) {
        (self.lons.concat(), self.lats.concat())
    }

    /// Shoelace test over the joined sides.
    pub fn is_clockwise(&self) -> bool {
        let (lons, lats) = self.concatenated();
        is_clockwise(&lons, &lats)
    }

    /// Reverse the side order and every side, flipping the winding.
    pub fn reversed(self) -> Self {
        let [l0, l1, l2, l3] = self.lons;
        let [a0, a1, a2, a3] = self.lats;
        Self {
            lons: [rev(l3), rev(l2), rev(l1), rev(l0)],
            lats: [rev(a3), rev(a2), rev(a1), rev(a0)],
        }
    }

    /// Closed planar polygon (x = lon, y = lat) through the perimeter.
    ///
    /// Shared corners are emitted once.
    pub fn to_polygon(&self) -> Polygon<f64> {
        let (lons, lats) = self.concatenated();
        let mut coords: Vec<Coord<f64>> = Vec::with_capacity(lons.len());
        for (x, y) in lons.into_iter().zip(lats) {
            let coord = Coord { x, y };
            if coords.last() != Some(&coord) {
                coords.push(coord);
            }
        }
        if coords.len() > 1 && coords.first() == coords.last() {
            coords.pop();
        }
        Polygon::new(LineString::new(coords), vec![])
    }
}

fn rev(mut side: Vec<f64>) -> Vec<f64> {
    side.reverse();
    side
}

/// Whether the path through `(lons[i], lats[i])` winds clockwise.
///
/// Sums `(x2 - x1) * (y2 + y1)` over consecutive vertices; a positive sum
/// is clockwise with longitude to the east and latitude to the north.
pub fn is_clockwise(lons: &[f64], lats: &[f64]) -> bool {
    let edge_sum: f64 = lons
        .windows(2)
        .zip(lats.windows(2))
        .map(|(x, y)| (x[1] - x[0]) * (y[1] + y[0]))
        .sum();
    edge_sum > 0.0
}

/// Grid positions of each side, decimated to `frequency` points if given.
pub(crate) fn side_indices(
    shape: (usize, usize),
    frequency: Option<usize>,
) -> Result<[Vec<(usize, usize)>; 4]> {
    let (height, width) = shape;
    if height == 0 || width == 0 {
        return Err(GeometryError::invalid_boundary(format!("swath of shape {shape:?} is empty")));
    }

    let (row_num, col_num) = match frequency {
        None => (height, width),
        Some(k) if k < 2 => return Err(GeometryError::InvalidFrequency(k)),
        Some(k) => {
            if k > height || k > width {
                tracing::warn!(
                    frequency = k,
                    height,
                    width,
                    "bbox frequency exceeds side length, positions will repeat"
                );
            }
            (k, k)
        }
    };

    let top: Vec<_> = linspace_indices(0, width - 1, col_num)
        .into_iter()
        .map(|col| (0, col))
        .collect();
    let right: Vec<_> = linspace_indices(0, height - 1, row_num)
        .into_iter()
        .map(|row| (row, width - 1))
        .collect();
    let bottom: Vec<_> = linspace_indices(width - 1, 0, col_num)
        .into_iter()
        .map(|col| (height - 1, col))
        .collect();
    let left: Vec<_> = linspace_indices(height - 1, 0, row_num)
        .into_iter()
        .map(|row| (row, 0))
        .collect();
    Ok([top, right, bottom, left])
}

/// Extract the four perimeter sides of a lon/lat grid pair.
///
/// Positions where either coordinate is NaN are dropped; a side without any
/// valid position is an error. Each array is read with a single `take`.
pub(crate) fn extract(
    lons: &dyn CoordArray,
    lats: &dyn CoordArray,
    frequency: Option<usize>,
    force_clockwise: bool,
) -> Result<BboxSides> {
    let sides = side_indices(lons.shape(), frequency)?;
    let positions: Vec<(usize, usize)> = sides.iter().flatten().copied().collect();
    let lon_values = lons.take(&positions)?;
    let lat_values = lats.take(&positions)?;

    let mut side_lons: [Vec<f64>; 4] = Default::default();
    let mut side_lats: [Vec<f64>; 4] = Default::default();
    let mut start = 0;
    for (side, indices) in sides.iter().enumerate() {
        let end = start + indices.len();
        let (valid_lons, valid_lats): (Vec<f64>, Vec<f64>) = lon_values[start..end]
            .iter()
            .zip(&lat_values[start..end])
            .filter(|(lon, lat)| !lon.is_nan() && !lat.is_nan())
            .map(|(&lon, &lat)| (lon, lat))
            .unzip();

        if valid_lons.is_empty() {
            return Err(GeometryError::invalid_boundary(format!(
                "side {side} is completely invalid (all NaN)"
            )));
        }
        let dropped = indices.len() - valid_lons.len();
        if dropped > 0 {
            tracing::debug!(
                side,
                dropped,
                kept = valid_lons.len(),
                "dropped NaN positions from bbox side"
            );
        }

        side_lons[side] = valid_lons;
        side_lats[side] = valid_lats;
        start = end;
    }

    let bbox = BboxSides {
        lons: side_lons,
        lats: side_lats,
    };
    if force_clockwise && !bbox.is_clockwise() {
        tracing::trace!("reversing counter-clockwise bbox");
        return Ok(bbox.reversed());
    }
    Ok(bbox)
}
