//! In-memory 2-D arrays.

use std::fmt;
use std::ops::Range;
use std::sync::{Arc, OnceLock};

use super::{checksum, CoordArray, Fingerprint, Layout};
use crate::error::{GeometryError, Result};

struct Buffer {
    values: Box<[f64]>,
    checksum: OnceLock<u32>,
}

impl Buffer {
    fn checksum(&self) -> u32 {
        *self.checksum.get_or_init(|| checksum(&self.values))
    }
}

/// A row-major 2-D array of `f64`, possibly a strided view over a buffer
/// shared with other arrays.
///
/// Slicing never copies: the result points into the same buffer, which is
/// what makes non-contiguous views cheap. A view checksums only the values
/// it covers, so two views over equal windows fingerprint the same.
#[derive(Clone)]
pub struct Array2 {
    buffer: Arc<Buffer>,
    layout: Layout,
    window_checksum: OnceLock<u32>,
}

impl Array2 {
    /// Create an array from row-major `data`.
    pub fn new(data: Vec<f64>, shape: (usize, usize)) -> Result<Self> {
        if data.len() != shape.0 * shape.1 {
            return Err(GeometryError::ShapeMismatch {
                left: (data.len(), 1),
                right: shape,
            });
        }
        Ok(Self {
            buffer: Arc::new(Buffer {
                values: data.into_boxed_slice(),
                checksum: OnceLock::new(),
            }),
            layout: Layout::contiguous(shape),
            window_checksum: OnceLock::new(),
        })
    }

    /// Create an array by evaluating `f(row, col)` for every cell.
    pub fn from_shape_fn(shape: (usize, usize), mut f: impl FnMut(usize, usize) -> f64) -> Self {
        let mut data = Vec::with_capacity(shape.0 * shape.1);
        for row in 0..shape.0 {
            for col in 0..shape.1 {
                data.push(f(row, col));
            }
        }
        Self {
            buffer: Arc::new(Buffer {
                values: data.into_boxed_slice(),
                checksum: OnceLock::new(),
            }),
            layout: Layout::contiguous(shape),
            window_checksum: OnceLock::new(),
        }
    }

    /// Create an array from equally long rows.
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self> {
        let cols = rows.first().map_or(0, |row| row.as_ref().len());
        let mut data = Vec::with_capacity(rows.len() * cols);
        for row in rows {
            let row = row.as_ref();
            if row.len() != cols {
                return Err(GeometryError::ShapeMismatch {
                    left: (1, row.len()),
                    right: (1, cols),
                });
            }
            data.extend_from_slice(row);
        }
        Self::new(data, (rows.len(), cols))
    }

    pub fn shape(&self) -> (usize, usize) {
        self.layout.shape
    }

    pub fn rows(&self) -> usize {
        self.layout.shape.0
    }

    pub fn cols(&self) -> usize {
        self.layout.shape.1
    }

    /// Value at `(row, col)`.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.layout
            .index(row, col)
            .map(|index| self.buffer.values[index])
    }

    /// A view sharing this array's buffer.
    pub fn view(&self, rows: Range<usize>, cols: Range<usize>) -> Result<Self> {
        Ok(Self {
            buffer: Arc::clone(&self.buffer),
            layout: self.layout.slice(rows, cols)?,
            window_checksum: OnceLock::new(),
        })
    }

    /// Whether this array covers its whole buffer in row-major order.
    pub fn is_contiguous(&self) -> bool {
        self.layout.covers(self.buffer.values.len())
    }

    /// Values in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        let (rows, cols) = self.shape();
        let Layout { offset, strides, .. } = self.layout;
        (0..rows).flat_map(move |row| {
            (0..cols).map(move |col| self.buffer.values[offset + row * strides.0 + col * strides.1])
        })
    }

    /// Copy the values into a new row-major vector.
    pub fn to_vec(&self) -> Vec<f64> {
        if self.is_contiguous() {
            return self.buffer.values.to_vec();
        }
        self.iter().collect()
    }

    /// One row as a vector.
    pub fn row(&self, row: usize) -> Option<Vec<f64>> {
        if row >= self.rows() {
            return None;
        }
        (0..self.cols()).map(|col| self.get(row, col)).collect()
    }

    /// One column as a vector.
    pub fn column(&self, col: usize) -> Option<Vec<f64>> {
        if col >= self.cols() {
            return None;
        }
        (0..self.rows()).map(|row| self.get(row, col)).collect()
    }

    /// CRC-32 of the covered values in row-major order.
    pub(crate) fn content_checksum(&self) -> u32 {
        if self.is_contiguous() {
            return self.buffer.checksum();
        }
        *self.window_checksum.get_or_init(|| checksum(&self.to_vec()))
    }
}

impl fmt::Debug for Array2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Array2")
            .field("shape", &self.layout.shape)
            .field("contiguous", &self.is_contiguous())
            .finish()
    }
}

impl PartialEq for Array2 {
    fn eq(&self, other: &Self) -> bool {
        self.shape() == other.shape() && self.iter().eq(other.iter())
    }
}

impl CoordArray for Array2 {
    fn shape(&self) -> (usize, usize) {
        self.layout.shape
    }

    fn fingerprint(&self) -> Fingerprint {
        Fingerprint::new(self.shape(), self.content_checksum(), !self.is_contiguous())
    }

    fn take(&self, index: &[(usize, usize)]) -> Result<Vec<f64>> {
        index
            .iter()
            .map(|&(row, col)| {
                self.get(row, col).ok_or_else(|| {
                    GeometryError::out_of_bounds(
                        format!("index ({row}, {col})"),
                        format!("{:?}", self.shape()),
                    )
                })
            })
            .collect()
    }

    fn slice(&self, rows: Range<usize>, cols: Range<usize>) -> Result<Arc<dyn CoordArray>> {
        Ok(Arc::new(self.view(rows, cols)?))
    }

    fn materialize(&self) -> Result<Array2> {
        Ok(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small() -> Array2 {
        Array2::from_rows(&[[1.2, 1.3, 1.4, 1.5], [2.2, 2.3, 2.4, 2.5]]).unwrap()
    }

    #[test]
    fn test_new_rejects_wrong_length() {
        assert!(matches!(
            Array2::new(vec![1.0, 2.0, 3.0], (2, 2)),
            Err(GeometryError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_from_rows_rejects_ragged() {
        let rows: Vec<Vec<f64>> = vec![vec![1.0, 2.0], vec![3.0]];
        assert!(Array2::from_rows(&rows).is_err());
    }

    #[test]
    fn test_view_shares_buffer() {
        let array = small();
        let view = array.view(0..2, 1..3).unwrap();
        assert_eq!(view.shape(), (2, 2));
        assert_eq!(view.to_vec(), vec![1.3, 1.4, 2.3, 2.4]);
        assert!(!view.is_contiguous());
        assert!(array.is_contiguous());
    }

    #[test]
    fn test_row_and_column() {
        let array = small();
        assert_eq!(array.row(1), Some(vec![2.2, 2.3, 2.4, 2.5]));
        assert_eq!(array.column(3), Some(vec![1.5, 2.5]));
        assert_eq!(array.row(2), None);
    }

    #[test]
    fn test_take_out_of_bounds() {
        let array = small();
        assert_eq!(array.take(&[(0, 0), (1, 3)]).unwrap(), vec![1.2, 2.5]);
        assert!(array.take(&[(2, 0)]).is_err());
    }

    #[test]
    fn test_fingerprint_equal_content() {
        assert_eq!(small().fingerprint(), small().fingerprint());
        let other = Array2::from_rows(&[[1.2, 1.3, 1.4, 1.5], [2.2, 2.3, 2.4, 2.6]]).unwrap();
        assert_ne!(small().fingerprint(), other.fingerprint());
    }

    #[test]
    fn test_view_fingerprint_differs_from_copy() {
        let array = small();
        let view = array.view(0..2, 0..2).unwrap();
        let copy = Array2::new(view.to_vec(), (2, 2)).unwrap();
        assert_eq!(view, copy);
        assert!(view.fingerprint().is_view());
        assert_ne!(view.fingerprint(), copy.fingerprint());
        assert_ne!(view.fingerprint(), array.fingerprint());
    }

    #[test]
    fn test_equal_windows_of_different_buffers_match() {
        let wide = small();
        let narrow = Array2::from_rows(&[[0.0, 1.3, 1.4], [0.0, 2.3, 2.4]]).unwrap();
        let left = wide.view(0..2, 1..3).unwrap();
        let right = narrow.view(0..2, 1..3).unwrap();
        assert_eq!(left, right);
        assert_eq!(left.fingerprint(), right.fingerprint());
        assert_eq!(left.fingerprint().checksum, checksum(&[1.3, 1.4, 2.3, 2.4]));
    }
}
