//! Deferred arrays evaluated on demand.

use std::cell::Cell;
use std::fmt;
use std::ops::Range;
use std::sync::Arc;

use super::{Array2, CoordArray, Fingerprint, Layout};
use crate::error::{GeometryError, Result};

thread_local! {
    static COMPUTES: Cell<usize> = const { Cell::new(0) };
}

/// Number of lazy evaluations performed so far on the current thread.
pub fn compute_count() -> usize {
    COMPUTES.with(Cell::get)
}

type Source = dyn Fn() -> Result<Array2> + Send + Sync;

#[derive(Clone)]
enum Identity {
    /// The wrapped in-memory array, narrowed to the pending window.
    Content(Array2),
    /// Stand-in checksum for a source whose values are unknown until computed.
    Token(u32),
}

/// An array whose values are produced by a source function when needed.
///
/// Slices are recorded as a pending window and applied after evaluation, so
/// building views and fingerprints costs nothing. Each evaluation bumps the
/// per-thread [`compute_count`].
#[derive(Clone)]
pub struct LazyArray {
    source: Arc<Source>,
    name: Arc<str>,
    source_shape: (usize, usize),
    rows: Range<usize>,
    cols: Range<usize>,
    identity: Identity,
}

impl LazyArray {
    /// Wrap an in-memory array, tokenizing its content up front.
    ///
    /// The fingerprint matches the one of `array` itself.
    pub fn from_array(array: Array2) -> Self {
        let checksum = array.content_checksum();
        let shape = array.shape();
        let source = array.clone();
        Self {
            source: Arc::new(move || Ok(source.clone())),
            name: Arc::from(format!("array-{checksum:08x}")),
            source_shape: shape,
            rows: 0..shape.0,
            cols: 0..shape.1,
            identity: Identity::Content(array),
        }
    }

    /// A lazy array computed by `f`, identified by `name`.
    ///
    /// Two lazy arrays built with the same name and shape fingerprint the
    /// same; the name stands in for the content.
    pub fn from_fn<F>(shape: (usize, usize), name: &str, f: F) -> Self
    where
        F: Fn() -> Result<Array2> + Send + Sync + 'static,
    {
        Self::with_token(shape, name, crc32fast::hash(name.as_bytes()), f)
    }

    /// A lazy array computed by `f` whose whole-array checksum is `token`.
    pub(crate) fn with_token<F>(shape: (usize, usize), name: &str, token: u32, f: F) -> Self
    where
        F: Fn() -> Result<Array2> + Send + Sync + 'static,
    {
        Self {
            source: Arc::new(f),
            name: Arc::from(name),
            source_shape: shape,
            rows: 0..shape.0,
            cols: 0..shape.1,
            identity: Identity::Token(token),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn is_whole(&self) -> bool {
        self.rows == (0..self.source_shape.0) && self.cols == (0..self.source_shape.1)
    }

    fn compute(&self) -> Result<Array2> {
        tracing::trace!(name = %self.name, shape = ?self.source_shape, "computing lazy array");
        COMPUTES.with(|count| count.set(count.get() + 1));
        let base = (self.source)()?;
        if base.shape() != self.source_shape {
            return Err(GeometryError::ShapeMismatch {
                left: base.shape(),
                right: self.source_shape,
            });
        }
        Ok(base)
    }
}

impl fmt::Debug for LazyArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LazyArray")
            .field("name", &self.name)
            .field("shape", &self.shape())
            .finish()
    }
}

impl CoordArray for LazyArray {
    fn shape(&self) -> (usize, usize) {
        (self.rows.len(), self.cols.len())
    }

    fn fingerprint(&self) -> Fingerprint {
        match &self.identity {
            Identity::Content(array) => array.fingerprint(),
            Identity::Token(token) if self.is_whole() => {
                Fingerprint::new(self.shape(), *token, false)
            }
            Identity::Token(token) => {
                let window = format!("{token:08x}[{:?}, {:?}]", self.rows, self.cols);
                Fingerprint::new(self.shape(), crc32fast::hash(window.as_bytes()), true)
            }
        }
    }

    fn take(&self, index: &[(usize, usize)]) -> Result<Vec<f64>> {
        let shape = self.shape();
        let out_of_bounds = |row: usize, col: usize| {
            GeometryError::out_of_bounds(format!("index ({row}, {col})"), format!("{shape:?}"))
        };
        if let Some(&(row, col)) = index
            .iter()
            .find(|&&(row, col)| row >= shape.0 || col >= shape.1)
        {
            return Err(out_of_bounds(row, col));
        }
        let base = self.compute()?;
        index
            .iter()
            .map(|&(row, col)| {
                base.get(self.rows.start + row, self.cols.start + col)
                    .ok_or_else(|| out_of_bounds(row, col))
            })
            .collect()
    }

    fn slice(&self, rows: Range<usize>, cols: Range<usize>) -> Result<Arc<dyn CoordArray>> {
        Layout::contiguous(self.shape()).slice(rows.clone(), cols.clone())?;
        let identity = match &self.identity {
            Identity::Content(array) => Identity::Content(array.view(rows.clone(), cols.clone())?),
            Identity::Token(token) => Identity::Token(*token),
        };
        Ok(Arc::new(Self {
            source: Arc::clone(&self.source),
            name: Arc::clone(&self.name),
            source_shape: self.source_shape,
            rows: self.rows.start + rows.start..self.rows.start + rows.end,
            cols: self.cols.start + cols.start..self.cols.start + cols.end,
            identity,
        }))
    }

    fn materialize(&self) -> Result<Array2> {
        let base = self.compute()?;
        if self.is_whole() {
            return Ok(base);
        }
        base.view(self.rows.clone(), self.cols.clone())
    }

    fn is_lazy(&self) -> bool {
        true
    }
}
