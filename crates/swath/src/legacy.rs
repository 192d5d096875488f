//! Legacy swath definition kept for callers of the older API.

use std::hash::{Hash, Hasher};
use std::ops::Range;
use std::sync::Arc;

use resample_common::{CoordArray, Result};

use crate::definition::SwathDefinition;

/// Default number of worker processes recorded on legacy swaths.
pub const DEFAULT_NPROCS: usize = 1;

/// The legacy swath type.
///
/// Geometry, hashing and equality are those of the wrapped
/// [`SwathDefinition`]; `nprocs` is carried along for compatibility and is
/// not part of the swath's identity.
#[derive(Debug, Clone)]
pub struct LegacySwathDefinition {
    inner: SwathDefinition,
    nprocs: usize,
}

impl LegacySwathDefinition {
    pub fn new(lons: impl CoordArray + 'static, lats: impl CoordArray + 'static) -> Result<Self> {
        Ok(SwathDefinition::new(lons, lats)?.into())
    }

    pub fn from_arcs(lons: Arc<dyn CoordArray>, lats: Arc<dyn CoordArray>) -> Result<Self> {
        Ok(SwathDefinition::from_arcs(lons, lats)?.into())
    }

    pub fn with_nprocs(mut self, nprocs: usize) -> Self {
        self.nprocs = nprocs.max(1);
        self
    }

    pub fn nprocs(&self) -> usize {
        self.nprocs
    }

    /// The equivalent future definition.
    pub fn as_future(&self) -> &SwathDefinition {
        &self.inner
    }

    pub fn into_future(self) -> SwathDefinition {
        self.inner
    }

    pub fn lons(&self) -> &Arc<dyn CoordArray> {
        self.inner.lons()
    }

    pub fn lats(&self) -> &Arc<dyn CoordArray> {
        self.inner.lats()
    }

    pub fn slice(&self, rows: Range<usize>, cols: Range<usize>) -> Result<Self> {
        Ok(Self {
            inner: self.inner.slice(rows, cols)?,
            nprocs: self.nprocs,
        })
    }

    pub fn concatenate(&self, other: &Self) -> Result<Self> {
        Ok(Self {
            inner: self.inner.concatenate(&other.inner)?,
            nprocs: self.nprocs,
        })
    }
}

impl From<SwathDefinition> for LegacySwathDefinition {
    fn from(inner: SwathDefinition) -> Self {
        Self {
            inner,
            nprocs: DEFAULT_NPROCS,
        }
    }
}

impl Hash for LegacySwathDefinition {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.inner.hash(state);
    }
}

impl PartialEq for LegacySwathDefinition {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl Eq for LegacySwathDefinition {}
