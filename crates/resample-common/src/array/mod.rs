//! Coordinate array backends.
//!
//! Swath geometry reads its longitude/latitude grids through the
//! [`CoordArray`] capability trait so the same code runs on:
//!
//! - [`Array2`]: an eager, possibly strided view over a shared buffer
//! - [`LazyArray`]: a deferred array that is only evaluated on demand
//! - [`LabeledArray`]: dimension names wrapped around any other backend
//!
//! # Fingerprints
//!
//! Every backend reports a [`Fingerprint`] built from the shape, a CRC-32
//! checksum of the values in row-major order and a flag marking views that do
//! not cover their whole buffer. Fingerprints never force a lazy evaluation
//! and do not depend on the backend, so the same logical data fingerprints
//! identically whether it is held eagerly, lazily or labeled. Row
//! concatenation derives its checksum from the inputs' checksums, so it keeps
//! that property without reading any values.

mod eager;
mod labeled;
mod lazy;

use std::fmt;
use std::ops::Range;
use std::sync::Arc;

use crate::error::{GeometryError, Result};

pub use eager::Array2;
pub use labeled::LabeledArray;
pub use lazy::{compute_count, LazyArray};

/// Minimal capability interface shared by all coordinate array backends.
pub trait CoordArray: fmt::Debug + Send + Sync {
    /// Logical shape as `(rows, cols)`.
    fn shape(&self) -> (usize, usize);

    /// Content fingerprint. Must not trigger a lazy evaluation.
    fn fingerprint(&self) -> Fingerprint;

    /// Gather the values at the given `(row, col)` positions.
    ///
    /// Lazy backends evaluate at most once per call.
    fn take(&self, index: &[(usize, usize)]) -> Result<Vec<f64>>;

    /// A view over `rows` × `cols`. Never evaluates a lazy array.
    fn slice(&self, rows: Range<usize>, cols: Range<usize>) -> Result<Arc<dyn CoordArray>>;

    /// Force the whole array into memory.
    fn materialize(&self) -> Result<Array2>;

    /// Whether reading values requires an evaluation.
    fn is_lazy(&self) -> bool {
        false
    }

    /// Dimension names, if the backend carries any.
    fn dims(&self) -> Option<(&str, &str)> {
        None
    }

    /// Number of elements.
    fn len(&self) -> usize {
        let (rows, cols) = self.shape();
        rows * cols
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Placement of a 2-D view inside a flat buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Layout {
    pub shape: (usize, usize),
    pub offset: usize,
    pub strides: (usize, usize),
}

impl Layout {
    /// Row-major layout covering a whole buffer of the given shape.
    pub fn contiguous(shape: (usize, usize)) -> Self {
        Self {
            shape,
            offset: 0,
            strides: (shape.1, 1),
        }
    }

    /// Number of elements in the view.
    pub fn len(&self) -> usize {
        self.shape.0 * self.shape.1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Buffer position of `(row, col)`, or `None` when out of the view.
    #[inline]
    pub fn index(&self, row: usize, col: usize) -> Option<usize> {
        if row >= self.shape.0 || col >= self.shape.1 {
            return None;
        }
        Some(self.offset + row * self.strides.0 + col * self.strides.1)
    }

    /// Sub-view over `rows` × `cols` (relative to this view).
    pub fn slice(&self, rows: Range<usize>, cols: Range<usize>) -> Result<Self> {
        if rows.start > rows.end
            || rows.end > self.shape.0
            || cols.start > cols.end
            || cols.end > self.shape.1
        {
            return Err(GeometryError::out_of_bounds(
                format!("slice [{rows:?}, {cols:?}]"),
                format!("{:?}", self.shape),
            ));
        }
        Ok(Self {
            shape: (rows.len(), cols.len()),
            offset: self.offset + rows.start * self.strides.0 + cols.start * self.strides.1,
            strides: self.strides,
        })
    }

    /// Whether this layout covers the whole buffer in row-major order.
    pub fn covers(&self, buffer_len: usize) -> bool {
        self.offset == 0 && self.strides == (self.shape.1, 1) && buffer_len == self.len()
    }
}

/// Backend independent identity of an array's content.
///
/// A view is never equal to a contiguous copy of the same values; two views
/// over equal values are equal whichever buffers they point into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint {
    pub shape: (usize, usize),
    pub checksum: u32,
    pub view: bool,
}

impl Fingerprint {
    pub fn new(shape: (usize, usize), checksum: u32, view: bool) -> Self {
        Self {
            shape,
            checksum,
            view,
        }
    }

    /// Whether the fingerprint describes a partial view of a larger buffer.
    pub fn is_view(&self) -> bool {
        self.view
    }
}

/// CRC-32 of the raw bytes of `values`.
pub fn checksum(values: &[f64]) -> u32 {
    crc32fast::hash(bytemuck::cast_slice(values))
}

/// Stack `bottom` under `top`. Stays lazy when either input is lazy.
pub fn concatenate_rows(
    top: &Arc<dyn CoordArray>,
    bottom: &Arc<dyn CoordArray>,
) -> Result<Arc<dyn CoordArray>> {
    let (top_rows, cols) = top.shape();
    let (bottom_rows, bottom_cols) = bottom.shape();
    if cols != bottom_cols {
        return Err(GeometryError::ShapeMismatch {
            left: top.shape(),
            right: bottom.shape(),
        });
    }
    let shape = (top_rows + bottom_rows, cols);
    let checksum = combine_checksums(
        top.fingerprint().checksum,
        bottom.fingerprint().checksum,
        bottom.len(),
    );

    if top.is_lazy() || bottom.is_lazy() {
        let name = format!("concatenate-{checksum:08x}");
        let (top, bottom) = (Arc::clone(top), Arc::clone(bottom));
        let lazy = LazyArray::with_token(shape, &name, checksum, move || {
            stack_rows(&top.materialize()?, &bottom.materialize()?)
        });
        return Ok(Arc::new(lazy));
    }

    Ok(Arc::new(stack_rows(&top.materialize()?, &bottom.materialize()?)?))
}

/// CRC-32 of two value runs laid end to end, from the runs' own checksums.
fn combine_checksums(first: u32, second: u32, second_len: usize) -> u32 {
    let second_bytes = (second_len * std::mem::size_of::<f64>()) as u64;
    let mut hasher = crc32fast::Hasher::new_with_initial(first);
    hasher.combine(&crc32fast::Hasher::new_with_initial_len(second, second_bytes));
    hasher.finalize()
}

fn stack_rows(top: &Array2, bottom: &Array2) -> Result<Array2> {
    let shape = (top.rows() + bottom.rows(), top.cols());
    let data: Vec<f64> = top.iter().chain(bottom.iter()).collect();
    Array2::new(data, shape)
}
