//! Arrays with named dimensions.

use std::ops::Range;
use std::sync::Arc;

use super::{Array2, CoordArray, Fingerprint};
use crate::error::Result;

/// Dimension names (e.g. `("y", "x")`) around any other backend.
///
/// Labels are metadata only: values, fingerprints and laziness all come
/// from the wrapped array.
#[derive(Debug, Clone)]
pub struct LabeledArray {
    inner: Arc<dyn CoordArray>,
    dims: (String, String),
}

impl LabeledArray {
    pub fn new(inner: impl CoordArray + 'static, dims: (&str, &str)) -> Self {
        Self::from_arc(Arc::new(inner), dims)
    }

    pub fn from_arc(inner: Arc<dyn CoordArray>, dims: (&str, &str)) -> Self {
        Self {
            inner,
            dims: (dims.0.to_string(), dims.1.to_string()),
        }
    }

    /// The wrapped array.
    pub fn inner(&self) -> &Arc<dyn CoordArray> {
        &self.inner
    }
}

impl CoordArray for LabeledArray {
    fn shape(&self) -> (usize, usize) {
        self.inner.shape()
    }

    fn fingerprint(&self) -> Fingerprint {
        self.inner.fingerprint()
    }

    fn take(&self, index: &[(usize, usize)]) -> Result<Vec<f64>> {
        self.inner.take(index)
    }

    fn slice(&self, rows: Range<usize>, cols: Range<usize>) -> Result<Arc<dyn CoordArray>> {
        Ok(Arc::new(Self {
            inner: self.inner.slice(rows, cols)?,
            dims: self.dims.clone(),
        }))
    }

    fn materialize(&self) -> Result<Array2> {
        self.inner.materialize()
    }

    fn is_lazy(&self) -> bool {
        self.inner.is_lazy()
    }

    fn dims(&self) -> Option<(&str, &str)> {
        Some((&self.dims.0, &self.dims.1))
    }
}
