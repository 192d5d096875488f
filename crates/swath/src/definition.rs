//! Swath definitions backed by any coordinate array backend.

use std::hash::{Hash, Hasher};
use std::ops::Range;
use std::sync::Arc;

use geo::Polygon;
use resample_common::{concatenate_rows, Array2, CoordArray, GeometryError, Result};

use crate::bbox::{self, BboxSides};

/// A swath: paired 2-D longitude and latitude grids in degrees.
///
/// Rows are scan lines and columns are samples along a scan. Coordinates are
/// kept exactly as given (no longitude normalization).
///
/// Hashing and equality go through the arrays' content fingerprints, so two
/// definitions built from the same data on different backends hash alike and
/// neither operation ever evaluates a lazy array.
#[derive(Debug, Clone)]
pub struct SwathDefinition {
    lons: Arc<dyn CoordArray>,
    lats: Arc<dyn CoordArray>,
}

impl SwathDefinition {
    /// Create a swath from longitude and latitude arrays of the same shape.
    pub fn new(lons: impl CoordArray + 'static, lats: impl CoordArray + 'static) -> Result<Self> {
        Self::from_arcs(Arc::new(lons), Arc::new(lats))
    }

    /// Create a swath from shared arrays.
    pub fn from_arcs(lons: Arc<dyn CoordArray>, lats: Arc<dyn CoordArray>) -> Result<Self> {
        if lons.shape() != lats.shape() {
            return Err(GeometryError::ShapeMismatch {
                left: lons.shape(),
                right: lats.shape(),
            });
        }
        Ok(Self { lons, lats })
    }

    pub fn lons(&self) -> &Arc<dyn CoordArray> {
        &self.lons
    }

    pub fn lats(&self) -> &Arc<dyn CoordArray> {
        &self.lats
    }

    /// `(rows, cols)` of the grids.
    pub fn shape(&self) -> (usize, usize) {
        self.lons.shape()
    }

    /// Number of pixels.
    pub fn size(&self) -> usize {
        self.lons.len()
    }

    /// Whether either grid is evaluated on demand.
    pub fn is_lazy(&self) -> bool {
        self.lons.is_lazy() || self.lats.is_lazy()
    }

    /// Both grids, forced into memory.
    pub fn get_lonlats(&self) -> Result<(Array2, Array2)> {
        Ok((self.lons.materialize()?, self.lats.materialize()?))
    }

    /// Coordinates of a single pixel.
    pub fn get_lonlat(&self, row: usize, col: usize) -> Result<(f64, f64)> {
        let lon = self.lons.take(&[(row, col)])?;
        let lat = self.lats.take(&[(row, col)])?;
        Ok((lon[0], lat[0]))
    }

    /// A new definition over `rows` × `cols` of this one.
    ///
    /// The result shares buffers with `self`; unless the window covers the
    /// whole grid its hash differs from that of an equivalent contiguous
    /// swath.
    pub fn slice(&self, rows: Range<usize>, cols: Range<usize>) -> Result<Self> {
        Ok(Self {
            lons: self.lons.slice(rows.clone(), cols.clone())?,
            lats: self.lats.slice(rows, cols)?,
        })
    }

    /// Append the scan lines of `other` below this swath.
    ///
    /// Hashes and compares like the stacked grid built directly, on any
    /// backend, without computing lazy inputs.
    pub fn concatenate(&self, other: &Self) -> Result<Self> {
        Self::from_arcs(
            concatenate_rows(&self.lons, &other.lons)?,
            concatenate_rows(&self.lats, &other.lats)?,
        )
    }

    /// Perimeter of the swath as four sides (top, right, bottom, left).
    ///
    /// With `frequency` each side is decimated to that many points, always
    /// keeping the corners. NaN positions are skipped; a side that is
    /// entirely NaN is an error. With `force_clockwise` the winding is
    /// reversed when it is not already clockwise.
    pub fn get_bbox_lonlats(
        &self,
        frequency: Option<usize>,
        force_clockwise: bool,
    ) -> Result<BboxSides> {
        bbox::extract(self.lons.as_ref(), self.lats.as_ref(), frequency, force_clockwise)
    }

    /// The perimeter as one lon and one lat sequence.
    pub fn get_edge_lonlats(
        &self,
        frequency: Option<usize>,
        force_clockwise: bool,
    ) -> Result<(Vec<f64>, Vec<f64>)> {
        Ok(self.get_bbox_lonlats(frequency, force_clockwise)?.concatenated())
    }

    /// Clockwise perimeter polygon in degrees.
    pub fn boundary_polygon(&self, frequency: Option<usize>) -> Result<Polygon<f64>> {
        Ok(self.get_bbox_lonlats(frequency, true)?.to_polygon())
    }

    fn eager_values_equal(&self, other: &Self) -> bool {
        fn same(a: &dyn CoordArray, b: &dyn CoordArray) -> bool {
            match (a.materialize(), b.materialize()) {
                (Ok(a), Ok(b)) => a.iter().zip(b.iter()).all(|(x, y)| x.to_bits() == y.to_bits()),
                _ => false,
            }
        }
        same(self.lons.as_ref(), other.lons.as_ref())
            && same(self.lats.as_ref(), other.lats.as_ref())
    }
}

impl Hash for SwathDefinition {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.lons.fingerprint().hash(state);
        self.lats.fingerprint().hash(state);
    }
}

impl PartialEq for SwathDefinition {
    fn eq(&self, other: &Self) -> bool {
        if self.lons.fingerprint() != other.lons.fingerprint()
            || self.lats.fingerprint() != other.lats.fingerprint()
        {
            return false;
        }
        // Lazy content is identified by its token alone.
        if self.is_lazy() || other.is_lazy() {
            return true;
        }
        self.eager_values_equal(other)
    }
}

impl Eq for SwathDefinition {}
